use std::cell::Cell;
use std::rc::Rc;

use marquee_core::{FramePump, FrameScheduler, Rect, SubId, Vec2};

use crate::card::{CardCompositor, CardPose};
use crate::host::{MotionHost, Region};
use crate::preference::{MotionPreference, MotionPreferenceMonitor};
use crate::surface::{SharedSurface, StylePatch, Target};

/// Full tilt at the region edge, in degrees.
pub const TILT_MAX_DEG: f32 = 6.0;
pub const ORB_BASE_PX: f32 = 12.0;
pub const ORB_STEP_PX: f32 = 2.0;

/// Normalized pointer position within a tracked region, each axis clamped to
/// [-0.5, 0.5].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerOffset {
    pub x: f32,
    pub y: f32,
}

pub fn normalized_offset(region: Rect, x: f32, y: f32) -> PointerOffset {
    if region.w <= 0.0 || region.h <= 0.0 {
        return PointerOffset::default();
    }
    PointerOffset {
        x: ((x - region.x) / region.w - 0.5).clamp(-0.5, 0.5),
        y: ((y - region.y) / region.h - 0.5).clamp(-0.5, 0.5),
    }
}

pub fn card_tilt(offset: PointerOffset) -> Vec2 {
    Vec2::new(offset.y * TILT_MAX_DEG, -offset.x * TILT_MAX_DEG)
}

pub fn orb_translate(offset: PointerOffset, index: usize, multiplier: f32) -> Vec2 {
    let k = (ORB_BASE_PX + index as f32 * ORB_STEP_PX) * multiplier;
    Vec2::new(offset.x * k, offset.y * k)
}

/// Pointer-reactive tilt and orb drift over the hero visual region.
///
/// The region's bounding box is captured at attach time and refreshed on
/// resize. Writes are coalesced to one per frame. The signal detaches itself
/// (pending frame cancelled, outputs zeroed) whenever reduced motion or a
/// mobile viewport is reported, including mid-session transitions.
pub struct PointerSignal {
    inner: Rc<PointerInner>,
}

struct PointerInner {
    host: Rc<dyn MotionHost>,
    monitor: Rc<MotionPreferenceMonitor>,
    surface: SharedSurface,
    compositor: CardCompositor,
    sched: FrameScheduler<PointerOffset>,
    region: Cell<Option<Rect>>,
    attached: Cell<bool>,
    orb_count: usize,
    sub: Cell<Option<SubId>>,
}

impl PointerSignal {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pump: &FramePump,
        host: Rc<dyn MotionHost>,
        monitor: Rc<MotionPreferenceMonitor>,
        surface: SharedSurface,
        compositor: CardCompositor,
        orb_count: usize,
        translate_k: Vec2,
        multiplier: f32,
    ) -> Self {
        let sched = FrameScheduler::new(pump, {
            let surface = surface.clone();
            let compositor = compositor.clone();
            move |offset: PointerOffset| {
                compositor.set_pointer(CardPose {
                    tilt: card_tilt(offset),
                    translate: Vec2::new(
                        offset.x * translate_k.x * multiplier,
                        offset.y * translate_k.y * multiplier,
                    ),
                });
                let mut surface = surface.borrow_mut();
                for i in 0..orb_count {
                    let t = orb_translate(offset, i, multiplier);
                    surface.write(Target::Orb(i), StylePatch::default().translate(t.x, t.y));
                }
            }
        });

        let inner = Rc::new(PointerInner {
            host,
            monitor: monitor.clone(),
            surface,
            compositor,
            sched,
            region: Cell::new(None),
            attached: Cell::new(false),
            orb_count,
            sub: Cell::new(None),
        });

        let weak = Rc::downgrade(&inner);
        let sub = monitor.subscribe(move |pref| {
            if let Some(inner) = weak.upgrade() {
                inner.sync(pref);
            }
        });
        inner.sub.set(Some(sub));
        inner.sync(&monitor.current());

        Self { inner }
    }

    pub fn is_attached(&self) -> bool {
        self.inner.attached.get()
    }

    pub fn on_pointer_move(&self, x: f32, y: f32) {
        let inner = &self.inner;
        if !inner.attached.get() {
            return;
        }
        let Some(region) = inner.region.get() else {
            return;
        };
        inner.sched.schedule(normalized_offset(region, x, y));
    }

    /// The offset is discarded on leave, not frozen.
    pub fn on_pointer_leave(&self) {
        if self.inner.attached.get() {
            self.inner.reset_outputs();
        }
    }

    pub fn refresh_region(&self) {
        if self.inner.attached.get() {
            self.inner.region.set(self.inner.host.element_rect(Region::Visual));
        }
    }

    pub fn teardown(&self) {
        self.inner.detach();
        if let Some(sub) = self.inner.sub.take() {
            self.inner.monitor.unsubscribe(sub);
        }
    }
}

impl PointerInner {
    fn sync(&self, pref: &MotionPreference) {
        if pref.pointer_enabled() {
            self.attach();
        } else {
            self.detach();
        }
    }

    fn attach(&self) {
        if self.attached.get() {
            return;
        }
        self.region.set(self.host.element_rect(Region::Visual));
        self.attached.set(true);
        log::debug!("pointer signal attached (region {:?})", self.region.get());
    }

    fn detach(&self) {
        if !self.attached.get() {
            return;
        }
        self.attached.set(false);
        self.reset_outputs();
        log::debug!("pointer signal detached");
    }

    fn reset_outputs(&self) {
        self.sched.cancel();
        self.compositor.set_pointer(CardPose::default());
        let mut surface = self.surface.borrow_mut();
        for i in 0..self.orb_count {
            surface.write(Target::Orb(i), StylePatch::default().translate(0.0, 0.0));
        }
    }
}
