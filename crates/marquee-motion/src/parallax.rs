use std::rc::Rc;

use marquee_core::{FramePump, FrameScheduler, Vec2};
use smallvec::SmallVec;

use crate::preference::MotionPreferenceMonitor;
use crate::surface::{SharedSurface, StylePatch, Target};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Static scrub coefficient, assigned at layer construction.
#[derive(Clone, Copy, Debug)]
pub struct LayerCoefficient {
    /// Full offset in pixels at the end of the activation window. Signed.
    pub magnitude: f32,
    pub axis: Axis,
}

#[derive(Clone, Copy, Debug)]
pub struct ParallaxLayer {
    pub target: Target,
    pub coefficient: LayerCoefficient,
    /// Activation window as scroll positions relative to the reference
    /// container: `(start, end)`.
    pub window: (f32, f32),
    /// Desktop-only layers stay at rest while the viewport is mobile.
    pub desktop_only: bool,
}

/// Progress through an activation window: 0 before, 1 after, linear inside.
pub fn scrub_progress(scroll_y: f32, start: f32, end: f32) -> f32 {
    if end <= start {
        // degenerate window: snap at the boundary
        return if scroll_y >= end { 1.0 } else { 0.0 };
    }
    ((scroll_y - start) / (end - start)).clamp(0.0, 1.0)
}

/// Pure per-layer mapping; no state beyond the registered window bounds.
pub fn layer_offset(layer: &ParallaxLayer, scroll_y: f32, multiplier: f32, is_mobile: bool) -> Vec2 {
    if layer.desktop_only && is_mobile {
        return Vec2::ZERO;
    }
    let progress = scrub_progress(scroll_y, layer.window.0, layer.window.1);
    let offset = layer.coefficient.magnitude * progress * multiplier;
    match layer.coefficient.axis {
        Axis::X => Vec2::new(offset, 0.0),
        Axis::Y => Vec2::new(0.0, offset),
    }
}

/// Maps scroll position into scrub offsets for every registered layer,
/// recomputed at most once per frame.
pub struct ParallaxEngine {
    monitor: Rc<MotionPreferenceMonitor>,
    sched: FrameScheduler<f32>,
}

impl ParallaxEngine {
    pub fn new(
        pump: &FramePump,
        monitor: Rc<MotionPreferenceMonitor>,
        surface: SharedSurface,
        multiplier: f32,
        layers: impl IntoIterator<Item = ParallaxLayer>,
    ) -> Self {
        let layers: SmallVec<[ParallaxLayer; 4]> = layers.into_iter().collect();
        let sched = FrameScheduler::new(pump, {
            let monitor = monitor.clone();
            move |y: f32| {
                let is_mobile = monitor.current().is_mobile;
                let mut surface = surface.borrow_mut();
                for layer in &layers {
                    let offset = layer_offset(layer, y, multiplier, is_mobile);
                    surface.write(
                        layer.target,
                        StylePatch::default().translate(offset.x, offset.y),
                    );
                }
            }
        });
        Self { monitor, sched }
    }

    pub fn on_scroll(&self, y: f32) {
        if self.monitor.current().reduced_motion {
            return;
        }
        self.sched.schedule(y);
    }

    pub fn suppress(&self) {
        self.sched.cancel();
    }
}
