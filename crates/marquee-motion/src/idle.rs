use std::cell::{Cell, RefCell};
use std::rc::Rc;

use marquee_core::{AnimationHandle, FramePump, TickerControl, clock};
use web_time::Duration;

use crate::card::CardCompositor;
use crate::preference::MotionPreferenceMonitor;

pub const FLOAT_AMPLITUDE_PX: f32 = 6.0;
pub const FLOAT_HALF_PERIOD: Duration = Duration::from_millis(1500);

/// Decorative vertical float of the card, active only after the entrance has
/// completed and only while motion is enabled. Runs until cancelled.
pub struct IdleLoop {
    pump: FramePump,
    monitor: Rc<MotionPreferenceMonitor>,
    compositor: CardCompositor,
    handle: RefCell<AnimationHandle>,
    running: Cell<bool>,
}

impl IdleLoop {
    pub fn new(
        pump: &FramePump,
        monitor: Rc<MotionPreferenceMonitor>,
        compositor: CardCompositor,
    ) -> Self {
        Self {
            pump: pump.clone(),
            monitor,
            compositor,
            handle: RefCell::new(AnimationHandle::settled()),
            running: Cell::new(false),
        }
    }

    /// No-op under reduced motion or while already running.
    pub fn start(&self) {
        if self.monitor.current().reduced_motion || self.running.get() {
            return;
        }
        self.running.set(true);
        log::debug!("idle float started");

        let compositor = self.compositor.clone();
        let t0 = clock::now();
        let handle = self.pump.spawn_ticker(move |now| {
            let t = now.saturating_duration_since(t0).as_secs_f32();
            let phase = std::f32::consts::PI * t / FLOAT_HALF_PERIOD.as_secs_f32();
            // 0 -> -6 -> 0, smooth at both ends
            let dy = -FLOAT_AMPLITUDE_PX * 0.5 * (1.0 - phase.cos());
            compositor.set_idle_offset(dy);
            TickerControl::Continue
        });
        *self.handle.borrow_mut() = handle;
    }

    /// Cancels atomically; safe to repeat.
    pub fn stop(&self) {
        self.handle.borrow().cancel();
        if self.running.replace(false) {
            log::debug!("idle float stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}
