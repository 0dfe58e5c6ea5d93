use std::cell::RefCell;
use std::rc::Rc;

use marquee_core::{
    AnimatedValue, AnimationHandle, AnimationSpec, Easing, FramePump, FrameScheduler,
    TickerControl, lerp,
};
use web_time::Duration;

use crate::preference::MotionPreferenceMonitor;
use crate::surface::{SharedSurface, StylePatch, Target};

/// The header collapses over the first 120 px of scroll.
pub const HEADER_RAMP_PX: f32 = 120.0;
pub const HEADER_MAX_HEIGHT: f32 = 96.0;
pub const HEADER_MIN_HEIGHT: f32 = 64.0;
pub const ACCENT_MIN_OPACITY: f32 = 0.35;
pub const ACCENT_MAX_OPACITY: f32 = 0.9;

const GLOW_PEAK_OPACITY: f32 = 0.35;
const GLOW_DURATION: Duration = Duration::from_millis(600);

fn ramp(scroll_y: f32) -> f32 {
    (scroll_y / HEADER_RAMP_PX).clamp(0.0, 1.0)
}

/// Pure scrub mapping; frozen at the endpoints outside [0, 120].
pub fn header_height(scroll_y: f32) -> f32 {
    lerp(HEADER_MAX_HEIGHT, HEADER_MIN_HEIGHT, ramp(scroll_y))
}

/// Pure scrub mapping; frozen at the endpoints outside [0, 120].
pub fn accent_opacity(scroll_y: f32) -> f32 {
    lerp(ACCENT_MIN_OPACITY, ACCENT_MAX_OPACITY, ramp(scroll_y))
}

/// Scroll-driven header state: height and accent-bar opacity writes coalesced
/// to one per frame, plus a transient glow pulse per scroll tick with
/// kill-and-restart semantics. Suppressed entirely under reduced motion.
pub struct HeaderMotion {
    monitor: Rc<MotionPreferenceMonitor>,
    sched: FrameScheduler<f32>,
    pulse: Rc<RefCell<AnimationHandle>>,
}

impl HeaderMotion {
    pub fn new(
        pump: &FramePump,
        monitor: Rc<MotionPreferenceMonitor>,
        surface: SharedSurface,
    ) -> Self {
        let pulse: Rc<RefCell<AnimationHandle>> = Rc::new(RefCell::new(AnimationHandle::settled()));
        let sched = FrameScheduler::new(pump, {
            let pump = pump.clone();
            let pulse = pulse.clone();
            move |y: f32| {
                surface
                    .borrow_mut()
                    .write(Target::Header, StylePatch::default().height(header_height(y)));
                surface.borrow_mut().write(
                    Target::AccentBar,
                    StylePatch::default().opacity(accent_opacity(y)),
                );
                start_pulse(&pump, &surface, &pulse);
            }
        });
        Self {
            monitor,
            sched,
            pulse,
        }
    }

    pub fn on_scroll(&self, y: f32) {
        if self.monitor.current().reduced_motion {
            return;
        }
        self.sched.schedule(y);
    }

    /// Cancel the pending write and any in-flight pulse. Used on teardown and
    /// when reduced motion flips on mid-session.
    pub fn suppress(&self) {
        self.sched.cancel();
        self.pulse.borrow().cancel();
    }
}

// A new pulse replaces any in-flight one; it never queues behind it.
fn start_pulse(pump: &FramePump, surface: &SharedSurface, slot: &Rc<RefCell<AnimationHandle>>) {
    slot.borrow().cancel();

    let mut glow = AnimatedValue::new(0.0f32, AnimationSpec::tween(GLOW_DURATION, Easing::EaseOut));
    glow.set_target(GLOW_PEAK_OPACITY);

    let surface = surface.clone();
    let handle = pump.spawn_ticker(move |_| {
        let running = glow.update();
        surface
            .borrow_mut()
            .write(Target::HeaderGlow, StylePatch::default().opacity(*glow.get()));
        if running {
            TickerControl::Continue
        } else {
            TickerControl::Stop
        }
    });
    *slot.borrow_mut() = handle;
}
