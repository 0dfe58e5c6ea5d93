use std::cell::Cell;
use std::rc::Rc;

use marquee_core::{FramePump, FrameScheduler, Vec2};

use crate::surface::{SharedSurface, StylePatch, Target};

/// Pointer contribution to the card transform.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CardPose {
    /// Degrees around the X/Y axes.
    pub tilt: Vec2,
    /// Pixels.
    pub translate: Vec2,
}

/// The only writer of [`Target::Card`].
///
/// The idle float and the pointer signal both legally target the card
/// transform; routing them here makes the result deterministic: translate is
/// the sum of the idle offset and the pointer translate, rotation comes from
/// the pointer alone, opacity/scale from the entrance reveal alone. One write
/// per frame, coalesced.
#[derive(Clone)]
pub struct CardCompositor {
    pointer: Rc<Cell<CardPose>>,
    idle_y: Rc<Cell<f32>>,
    reveal: Rc<Cell<Option<(f32, f32)>>>,
    sched: FrameScheduler<()>,
}

impl CardCompositor {
    pub fn new(pump: &FramePump, surface: SharedSurface) -> Self {
        let pointer = Rc::new(Cell::new(CardPose::default()));
        let idle_y = Rc::new(Cell::new(0.0f32));
        let reveal: Rc<Cell<Option<(f32, f32)>>> = Rc::new(Cell::new(None));

        let sched = FrameScheduler::new(pump, {
            let pointer = pointer.clone();
            let idle_y = idle_y.clone();
            let reveal = reveal.clone();
            move |_: ()| {
                let pose = pointer.get();
                let mut patch = StylePatch::default()
                    .translate(pose.translate.x, pose.translate.y + idle_y.get())
                    .rotate(pose.tilt.x, pose.tilt.y);
                if let Some((opacity, scale)) = reveal.get() {
                    patch = patch.opacity(opacity).scale(scale);
                }
                surface.borrow_mut().write(Target::Card, patch);
            }
        });

        Self {
            pointer,
            idle_y,
            reveal,
            sched,
        }
    }

    pub fn set_pointer(&self, pose: CardPose) {
        self.pointer.set(pose);
        self.sched.schedule(());
    }

    pub fn set_idle_offset(&self, dy: f32) {
        self.idle_y.set(dy);
        self.sched.schedule(());
    }

    /// Entrance reveal writes (opacity/scale) routed through the compositor
    /// so they merge with the live transform instead of racing it.
    pub fn apply_reveal(&self, patch: StylePatch) {
        self.reveal.set(Some((patch.opacity, patch.scale)));
        self.sched.schedule(());
    }

    pub fn suppress(&self) {
        self.sched.cancel();
    }
}
