// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The per-frame animation scheduler and selection/event bridge.
//!
//! [`RayScheduler`] owns every piece of mutable state in the crate: the
//! current forest, the drawable pool, the material resolver, the settings and
//! the animation counters. It is driven by one external `update(dt)` call per
//! fixed time step and touches all of its state only from that call, so the
//! whole crate is single-threaded by construction.
//!
//! Per frame it runs: mark the pool unused → refresh the forest if flagged
//! dirty → resolve the selection → dispatch exactly one draw strategy →
//! deactivate the unused pool remainder.

use crate::draw::DrawContext;
use crate::event::VizEvent;
use crate::material::MaterialResolver;
use crate::pool::RayObjectPool;
use aktis_core::event::EventBus;
use aktis_core::{
    CoreError, DrawableFactory, Forest, ForestSource, LinearRgba, NodeId, RaySettings,
    ViewportInfo,
};
use std::collections::HashSet;

/// Where the animation currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Never armed; the first animated frame arms it through the pending reset.
    Idle,
    /// Distance is accumulating and trees are partially drawn.
    Animating,
    /// The pass finished; frames fall back to cheap full draws until a reset
    /// or a loop re-arms.
    Complete,
}

/// The animation counters, zeroed as a unit whenever the animation re-arms.
#[derive(Debug)]
struct AnimState {
    phase: Phase,
    /// Cumulative draw distance for the current pass.
    distance: f32,
    /// The forest index currently being animated in sequential mode.
    tree_cursor: usize,
    /// A pending restart request, honored at the next animated frame.
    reset: bool,
}

impl AnimState {
    fn arm(&mut self) {
        self.phase = Phase::Animating;
        self.distance = 0.0;
        self.tree_cursor = 0;
        self.reset = false;
    }
}

/// The frame-driven draw scheduler for a forest of ray trees.
///
/// Collaborators are injected at construction: the [`ForestSource`] that
/// traces forests, the [`ViewportInfo`] that maps pixels to forest indices,
/// and the [`DrawableFactory`] the pool instantiates handles through.
pub struct RayScheduler {
    source: Box<dyn ForestSource>,
    viewport: Box<dyn ViewportInfo>,
    factory: Box<dyn DrawableFactory>,
    settings: RaySettings,
    pool: RayObjectPool,
    resolver: MaterialResolver,
    events: EventBus<VizEvent>,
    forest: Option<Forest>,
    forest_dirty: bool,
    /// The selected pixel, if any. Validated against the viewport each frame.
    selection: Option<(u32, u32)>,
    anim: AnimState,
    /// Nodes already notified as started this pass.
    started: HashSet<NodeId>,
    paused: bool,
    /// Lets exactly one frame through after a selection change while paused.
    refresh_while_paused: bool,
}

impl RayScheduler {
    /// Creates a scheduler, pre-warming the pool to the configured size.
    pub fn new(
        source: Box<dyn ForestSource>,
        viewport: Box<dyn ViewportInfo>,
        factory: Box<dyn DrawableFactory>,
        settings: RaySettings,
    ) -> Self {
        let pool = RayObjectPool::new(factory.as_ref(), settings.initial_pool_size);
        Self {
            source,
            viewport,
            factory,
            settings,
            pool,
            resolver: MaterialResolver::new(),
            events: EventBus::new(),
            forest: None,
            forest_dirty: true,
            selection: None,
            anim: AnimState {
                phase: Phase::Idle,
                distance: 0.0,
                tree_cursor: 0,
                reset: true,
            },
            started: HashSet::new(),
            paused: false,
            refresh_while_paused: false,
        }
    }

    /// Advances the visualization by one fixed time step of `dt` seconds.
    ///
    /// While paused this is a no-op, except for exactly one let-through frame
    /// after a selection change made during the pause.
    pub fn update(&mut self, dt: f32) {
        if self.paused {
            if !self.refresh_while_paused {
                return;
            }
            self.refresh_while_paused = false;
        }
        self.run_frame(dt);
    }

    /// Flags the current forest as stale; the next frame pulls a fresh one
    /// from the source. Call when the scene or the tracer changed.
    pub fn mark_forest_dirty(&mut self) {
        self.forest_dirty = true;
    }

    /// Requests an animation restart at the next animated frame.
    pub fn request_reset(&mut self) {
        self.anim.reset = true;
    }

    /// Selects the ray tree under the given pixel, restarts the animation
    /// and notifies observers. Out-of-bounds coordinates are tolerated and
    /// degrade to "no selection" at draw time.
    pub fn select_ray(&mut self, x: u32, y: u32) {
        self.selection = Some((x, y));
        self.anim.reset = true;
        if self.paused {
            self.refresh_while_paused = true;
        }
        log::debug!("Ray at pixel ({x}, {y}) selected.");
        self.events.publish(VizEvent::SelectionChanged { selected: true });
    }

    /// Clears the active selection, restarts the animation and notifies
    /// observers.
    pub fn deselect_ray(&mut self) {
        self.selection = None;
        self.anim.reset = true;
        if self.paused {
            self.refresh_while_paused = true;
        }
        log::debug!("Ray selection cleared.");
        self.events.publish(VizEvent::SelectionChanged { selected: false });
    }

    /// Pauses or resumes the per-frame cycle. Resuming runs one full frame
    /// immediately (with zero elapsed time) so the screen is never stale by
    /// one tick after a resume.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused == paused {
            return;
        }
        self.paused = paused;
        if !paused {
            self.refresh_while_paused = false;
            self.run_frame(0.0);
        }
    }

    /// Whether the per-frame cycle is currently paused.
    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Mutates the settings in place. Toggling `animate` or
    /// `animate_sequentially` arms an implicit reset; toggling the loop flag
    /// does not. Every change takes effect on the next frame.
    pub fn configure<F: FnOnce(&mut RaySettings)>(&mut self, mutate: F) {
        let before = (self.settings.animate, self.settings.animate_sequentially);
        mutate(&mut self.settings);
        let after = (self.settings.animate, self.settings.animate_sequentially);
        if before != after {
            self.anim.reset = true;
            log::debug!("Animation mode changed; restart armed.");
        }
    }

    /// The settings currently in effect.
    pub fn settings(&self) -> &RaySettings {
        &self.settings
    }

    /// The bus the scheduler publishes [`VizEvent`]s on.
    pub fn events(&self) -> &EventBus<VizEvent> {
        &self.events
    }

    /// Whether the current animation pass has completed.
    pub fn animation_complete(&self) -> bool {
        self.anim.phase == Phase::Complete
    }

    /// The root color of every tree in the current forest, row-major, with
    /// alpha forced to 1.0 (the tracer's alpha channel is unreliable).
    /// Empty until the first frame has pulled a forest.
    pub fn ray_colors(&self) -> Vec<LinearRgba> {
        match &self.forest {
            Some(forest) => forest
                .trees()
                .map(|tree| tree.ray.color.with_alpha(1.0))
                .collect(),
            None => Vec::new(),
        }
    }

    /// The forest currently being drawn, if one has been pulled.
    pub fn forest(&self) -> Option<&Forest> {
        self.forest.as_ref()
    }

    // --- Frame cycle ---

    fn run_frame(&mut self, dt: f32) {
        self.pool.mark_all_unused();

        if self.forest_dirty || self.forest.is_none() {
            let forest = self.source.render();
            log::debug!("Pulled a fresh forest of {} trees.", forest.len());
            self.forest = Some(forest);
            self.forest_dirty = false;
        }

        let selected = self.selected_index();

        if self.settings.show_rays {
            if self.settings.animate {
                self.draw_animated(dt, selected);
            } else {
                self.draw_full(selected);
            }
        }

        self.pool.deactivate_unused();
    }

    /// Validates the selected pixel against the viewport and the forest,
    /// degrading invalid selections to `None` instead of indexing out of
    /// bounds.
    fn selected_index(&self) -> Option<usize> {
        let (x, y) = self.selection?;
        let size = self.viewport.screen_size();
        let Some(index) = size.linear_index(x, y) else {
            log::warn!(
                "{}; treating as no selection.",
                CoreError::SelectionOutOfBounds {
                    x,
                    y,
                    width: size.width,
                    height: size.height,
                }
            );
            return None;
        };
        let forest_len = self.forest.as_ref().map_or(0, Forest::len);
        if index < forest_len {
            Some(index)
        } else {
            log::warn!(
                "Selection ({x}, {y}) maps to tree {index} beyond the {forest_len}-tree forest; \
                 treating as no selection."
            );
            None
        }
    }

    /// Draws the forest (or only the selected tree) at full length.
    fn draw_full(&mut self, selected: Option<usize>) {
        let Some(forest) = self.forest.as_ref() else {
            return;
        };
        let mut ctx = DrawContext {
            pool: &mut self.pool,
            resolver: &mut self.resolver,
            factory: self.factory.as_ref(),
            settings: &self.settings,
            events: &self.events,
            started: &mut self.started,
        };
        match selected.and_then(|index| forest.tree(index)) {
            Some(tree) => ctx.draw_tree_full(tree),
            None => {
                for tree in forest.trees() {
                    ctx.draw_tree_full(tree);
                }
            }
        }
    }

    /// Advances the animation state machine and dispatches exactly one of
    /// the three animated draw strategies.
    fn draw_animated(&mut self, dt: f32, selected: Option<usize>) {
        // Re-arm on a pending reset, or when a completed pass should loop.
        if self.anim.reset || (self.anim.phase == Phase::Complete && self.settings.loop_animation)
        {
            self.anim.arm();
            self.started.clear();
            log::debug!("Animation pass armed.");
        }

        // Completed and not looping: cheap steady state, full draw only.
        if self.anim.phase == Phase::Complete {
            self.draw_full(selected);
            return;
        }

        self.anim.phase = Phase::Animating;
        self.anim.distance += self.settings.speed * dt;
        let distance = self.anim.distance;

        let Some(forest) = self.forest.as_ref() else {
            return;
        };
        let forest_len = forest.len();
        let cursor = self.anim.tree_cursor;

        let mut ctx = DrawContext {
            pool: &mut self.pool,
            resolver: &mut self.resolver,
            factory: self.factory.as_ref(),
            settings: &self.settings,
            events: &self.events,
            started: &mut self.started,
        };

        let done = match selected.and_then(|index| forest.tree(index)) {
            // A selected ray animates alone, branch by branch; the
            // sequential and parallel flags are ignored.
            Some(tree) => ctx.draw_tree_sequential(tree, distance),

            None if self.settings.animate_sequentially => {
                // Trees before the cursor are already complete; draw them in
                // full so they stay on screen.
                for tree in forest.trees().take(cursor) {
                    ctx.draw_tree_full(tree);
                }
                match forest.tree(cursor) {
                    None => true,
                    Some(tree) => {
                        let tree_done = ctx.draw_tree_sequential(tree, distance);
                        if tree_done {
                            // The next tree restarts from zero distance.
                            self.anim.distance = 0.0;
                            self.anim.tree_cursor += 1;
                        }
                        tree_done && self.anim.tree_cursor >= forest_len
                    }
                }
            }

            // All trees share one distance budget. Every tree is visited
            // every frame; short-circuiting would freeze trailing trees.
            None => {
                let mut all_done = true;
                for tree in forest.trees() {
                    all_done &= ctx.draw_tree_animated(tree, distance);
                }
                all_done
            }
        };

        if done {
            self.anim.phase = Phase::Complete;
            log::debug!("Animation pass complete.");
            if selected.is_some() {
                // Allow a re-selection or reset to re-fire the node start
                // notifications of the next pass.
                self.started.clear();
            }
        }
    }
}
