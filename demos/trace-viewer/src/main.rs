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

// Trace Viewer
// Console demo: runs the scheduler over a small synthetic ray trace and logs
// what a renderer would draw each frame.

use std::sync::Arc;

use anyhow::Result;
use aktis_core::{
    DrawableFactory, Extent2D, Forest, ForestSource, LinearRgba, Ray, RayDrawable, RayKind,
    RayMaterial, RayNode, RaySettings, Vec3, ViewportInfo,
};
use aktis_viz::{RayScheduler, VizEvent};

const SCREEN: Extent2D = Extent2D {
    width: 2,
    height: 2,
};

const STEP_SECONDS: f32 = 0.02;
const STEPS: usize = 400;

/// A canned tracer: four pixel trees with reflection, refraction and shadow
/// branches, enough to exercise every animation path.
struct SyntheticTracer;

impl ForestSource for SyntheticTracer {
    fn render(&mut self) -> Forest {
        let roots = (0..SCREEN.area())
            .map(|pixel| pixel_tree(pixel as f32))
            .collect();
        Forest::new(roots)
    }
}

fn pixel_tree(offset: f32) -> RayNode {
    let origin = Vec3::new(offset, 0.0, 0.0);
    let primary = Ray::new(
        RayKind::Normal,
        1.0,
        LinearRgba::rgb(0.8, 0.6, 0.4),
        origin,
        Vec3::Z,
        3.0,
    );
    let hit = origin + Vec3::Z * 3.0;

    let reflection = Ray::new(
        RayKind::Reflect,
        0.4,
        LinearRgba::rgb(0.3, 0.5, 0.9),
        hit,
        Vec3::new(0.0, 0.7, -0.7),
        2.0,
    );
    let refraction = Ray::new(
        RayKind::Refract,
        0.15,
        LinearRgba::rgb(0.6, 0.4, 0.9),
        hit,
        Vec3::Z,
        1.5,
    );
    let shadow = Ray::new(
        RayKind::Shadow,
        0.0,
        LinearRgba::BLACK,
        hit,
        Vec3::Y,
        4.0,
    );
    let bounce_miss = Ray::infinite(
        RayKind::NoHit,
        0.0,
        LinearRgba::BLACK,
        hit + Vec3::new(0.0, 0.7, -0.7) * 2.0,
        Vec3::Y,
    );

    let camera = Ray::new(
        RayKind::Normal,
        1.0,
        LinearRgba::rgb(0.8, 0.6, 0.4),
        origin,
        Vec3::Z,
        0.0,
    );
    RayNode::with_children(
        camera,
        vec![RayNode::with_children(
            primary,
            vec![
                RayNode::with_children(reflection, vec![RayNode::new(bounce_miss)]),
                RayNode::new(refraction),
                RayNode::new(shadow),
            ],
        )],
    )
}

struct FixedViewport;

impl ViewportInfo for FixedViewport {
    fn screen_size(&self) -> Extent2D {
        SCREEN
    }
}

/// A "drawable" that just logs its segment instead of rendering it.
struct ConsoleRay {
    index: usize,
    visible: bool,
}

impl RayDrawable for ConsoleRay {
    fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            log::trace!("segment #{} visible={visible}", self.index);
            self.visible = visible;
        }
    }

    fn draw(
        &mut self,
        ray: &Ray,
        material: &Arc<RayMaterial>,
        radius: f32,
        max_length: f32,
    ) -> f32 {
        log::trace!(
            "segment #{}: {:?} from {:?} len {max_length:.2} radius {radius:.4} ambient {:.2}",
            self.index,
            ray.kind,
            ray.origin,
            material.ambient,
        );
        max_length
    }
}

struct ConsoleFactory {
    created: std::cell::Cell<usize>,
}

impl DrawableFactory for ConsoleFactory {
    fn instantiate(&self) -> Box<dyn RayDrawable> {
        let index = self.created.get();
        self.created.set(index + 1);
        Box::new(ConsoleRay {
            index,
            visible: false,
        })
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let settings = RaySettings {
        animate: true,
        animate_sequentially: true,
        speed: 20.0,
        initial_pool_size: 16,
        ..RaySettings::default()
    };

    let mut scheduler = RayScheduler::new(
        Box::new(SyntheticTracer),
        Box::new(FixedViewport),
        Box::new(ConsoleFactory {
            created: std::cell::Cell::new(0),
        }),
        settings,
    );

    log::info!(
        "Animating a {}x{} trace sequentially at {} units/s.",
        SCREEN.width,
        SCREEN.height,
        scheduler.settings().speed
    );

    let mut was_complete = false;
    for step in 0..STEPS {
        scheduler.update(STEP_SECONDS);

        for event in scheduler.events().receiver().try_iter() {
            match event {
                VizEvent::SelectionChanged { selected } => {
                    log::info!("selection changed: selected={selected}");
                }
                VizEvent::NodeAnimationStarted { node, ray } => {
                    log::info!("node {:?} started animating ({:?})", node, ray.kind);
                }
            }
        }

        // Halfway through, inspect a single pixel the way a UI would.
        if step == STEPS / 2 {
            scheduler.select_ray(1, 0);
        }
        let complete = scheduler.animation_complete();
        if complete && !was_complete {
            log::info!("animation pass complete at step {step}");
        }
        was_complete = complete;
    }

    scheduler.deselect_ray();
    let colors = scheduler.ray_colors();
    log::info!("traced {} pixels; root colors: {colors:?}", colors.len());

    Ok(())
}
