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

//! The recursive tree draw engine.
//!
//! Three traversals share one per-node drawing core:
//! - **full**: every visible descendant at its full geometric length;
//! - **animated**: every visible descendant up to a shared distance budget,
//!   children recursing with the parent's leftover in parallel;
//! - **sequential**: like animated, but a child only starts receiving budget
//!   once its preceding sibling's whole subtree is done, and each node's
//!   first draw of a pass fires a one-shot start notification.
//!
//! Completion is folded explicitly over children instead of short-circuited:
//! in the parallel traversal every child must still be visited each frame so
//! its partial progress renders, and in the sequential traversal the fold
//! threads the shrinking leftover budget from sibling to sibling.

use crate::event::VizEvent;
use crate::material::MaterialResolver;
use crate::pool::RayObjectPool;
use aktis_core::event::EventBus;
use aktis_core::math::lerp;
use aktis_core::{DrawableFactory, NodeId, RayNode, RaySettings};
use std::collections::HashSet;

/// The tagged result of one animated (sub)tree traversal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawProgress {
    /// Whether the whole subtree has reached its full length.
    pub done: bool,
    /// The budget left after this subtree consumed its share. Only the
    /// sequential traversal threads this through siblings; it is zero
    /// whenever `done` is `false`.
    pub leftover: f32,
}

impl DrawProgress {
    fn unfinished() -> Self {
        Self {
            done: false,
            leftover: 0.0,
        }
    }

    fn finished(leftover: f32) -> Self {
        Self {
            done: true,
            leftover,
        }
    }
}

/// Borrows everything one frame's draw dispatch needs.
///
/// Constructed by the scheduler from disjoint fields of itself, so the
/// forest can be traversed immutably while the pool and resolver mutate.
pub struct DrawContext<'a> {
    /// The pool handing out drawable handles.
    pub pool: &'a mut RayObjectPool,
    /// The material resolver (mutable: color entries materialize lazily).
    pub resolver: &'a mut MaterialResolver,
    /// The factory the pool grows through.
    pub factory: &'a dyn DrawableFactory,
    /// The settings in effect for this frame.
    pub settings: &'a RaySettings,
    /// The bus node-start notifications are published on.
    pub events: &'a EventBus<VizEvent>,
    /// The nodes already notified as started this pass.
    pub started: &'a mut HashSet<NodeId>,
}

impl<'a> DrawContext<'a> {
    /// Draws every visible descendant of `root` at full length. The root
    /// itself (the zero-length camera origin) is never drawn.
    pub fn draw_tree_full(&mut self, root: &RayNode) {
        for child in &root.children {
            self.draw_node_full(child);
        }
    }

    /// Draws every visible descendant of `root` up to the shared `distance`,
    /// all branches advancing in parallel.
    ///
    /// ## Returns
    /// `true` once every visible node in the tree has reached full length.
    pub fn draw_tree_animated(&mut self, root: &RayNode, distance: f32) -> bool {
        let mut done = true;
        // No short-circuit: a finished sibling must not freeze the others.
        for child in &root.children {
            done &= self.draw_node_animated(child, distance).done;
        }
        done
    }

    /// Draws the descendants of `root` strictly branch by branch: a node's
    /// children consume budget in order, each starting only once its
    /// predecessor's subtree is complete.
    ///
    /// ## Returns
    /// `true` once the final branch has reached full length.
    pub fn draw_tree_sequential(&mut self, root: &RayNode, distance: f32) -> bool {
        let mut leftover = distance;
        for child in &root.children {
            let progress = self.draw_node_sequential(child, leftover);
            if !progress.done {
                return false;
            }
            leftover = progress.leftover;
        }
        true
    }

    /// The visibility policy, identical for all traversals: hidden nodes are
    /// not drawn and their subtrees are never visited.
    fn skipped(&self, node: &RayNode) -> bool {
        (self.settings.hide_no_hit && node.ray.kind.is_no_hit())
            || (self.settings.hide_negligible
                && node.ray.contribution <= self.settings.hide_threshold)
    }

    /// The world-space radius for one node.
    fn radius(&self, node: &RayNode) -> f32 {
        if self.settings.dynamic_radius_enabled {
            lerp(
                self.settings.min_radius,
                self.settings.max_radius,
                node.ray.contribution.clamp(0.0, 1.0),
            )
        } else {
            self.settings.radius
        }
    }

    /// Acquires a handle and draws one node up to `max_length`, returning
    /// the length actually drawn.
    fn draw_node(&mut self, node: &RayNode, max_length: f32) -> f32 {
        let material = self.resolver.resolve(
            node.ray.kind,
            node.ray.contribution,
            node.ray.color,
            self.settings,
        );
        let radius = self.radius(node);
        self.pool
            .acquire(self.factory)
            .draw(&node.ray, &material, radius, max_length)
    }

    fn draw_node_full(&mut self, node: &RayNode) {
        if self.skipped(node) {
            return;
        }

        let length = node.ray.draw_length(self.settings.infinite_ray_length);
        self.draw_node(node, length);

        for child in &node.children {
            self.draw_node_full(child);
        }
    }

    fn draw_node_animated(&mut self, node: &RayNode, budget: f32) -> DrawProgress {
        if self.skipped(node) {
            return DrawProgress::finished(budget);
        }

        let length = node.ray.draw_length(self.settings.infinite_ray_length);
        let drawn = self.draw_node(node, budget.min(length));
        let leftover = budget - drawn;

        // Not at full length yet; the subtree below cannot start.
        if leftover <= 0.0 {
            return DrawProgress::unfinished();
        }
        if node.is_leaf() {
            return DrawProgress::finished(leftover);
        }

        let mut done = true;
        for child in &node.children {
            done &= self.draw_node_animated(child, leftover).done;
        }
        if done {
            DrawProgress::finished(leftover)
        } else {
            DrawProgress::unfinished()
        }
    }

    fn draw_node_sequential(&mut self, node: &RayNode, budget: f32) -> DrawProgress {
        if self.skipped(node) {
            return DrawProgress::finished(budget);
        }

        self.notify_started(node);

        let length = node.ray.draw_length(self.settings.infinite_ray_length);
        let drawn = self.draw_node(node, budget.min(length));
        let leftover = budget - drawn;

        if leftover <= 0.0 {
            return DrawProgress::unfinished();
        }
        if node.is_leaf() {
            return DrawProgress::finished(leftover);
        }

        // Children consume the leftover strictly in order; the first
        // unfinished child ends the traversal for this frame, so later
        // siblings receive no budget at all until it completes.
        let mut leftover = leftover;
        for child in &node.children {
            let progress = self.draw_node_sequential(child, leftover);
            if !progress.done {
                return DrawProgress::unfinished();
            }
            leftover = progress.leftover;
        }
        DrawProgress::finished(leftover)
    }

    /// Publishes the one-shot start notification the first time a node
    /// receives a draw call within the current pass.
    fn notify_started(&mut self, node: &RayNode) {
        if self.started.insert(node.id) {
            log::trace!("Node {:?} started animating.", node.id);
            self.events.publish(VizEvent::NodeAnimationStarted {
                node: node.id,
                ray: node.ray.clone(),
            });
        }
    }
}
