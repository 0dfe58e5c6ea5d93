use std::cell::Cell;
use std::rc::Rc;

use marquee_core::{MotionError, Signal, SubId, signal};

use crate::host::MotionHost;

/// Viewports narrower than this count as mobile.
pub const MOBILE_WIDTH_PX: f32 = 768.0;

/// Process-wide accessibility/viewport state. Single source of truth, updated
/// only from forwarded system events, read-only to consumers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MotionPreference {
    pub reduced_motion: bool,
    pub is_mobile: bool,
}

impl MotionPreference {
    pub fn motion_enabled(&self) -> bool {
        !self.reduced_motion
    }

    /// Pointer-reactive effects need both motion and a non-mobile viewport.
    pub fn pointer_enabled(&self) -> bool {
        !self.reduced_motion && !self.is_mobile
    }
}

/// Tracks the reduced-motion and mobile-viewport flags. Queries the host at
/// init and on every forwarded change event; never polls.
pub struct MotionPreferenceMonitor {
    host: Rc<dyn MotionHost>,
    state: Signal<MotionPreference>,
    warned: Cell<bool>,
}

impl MotionPreferenceMonitor {
    pub fn new(host: Rc<dyn MotionHost>) -> Self {
        let monitor = Self {
            host,
            state: signal(MotionPreference::default()),
            warned: Cell::new(false),
        };
        monitor.refresh();
        monitor
    }

    pub fn current(&self) -> MotionPreference {
        self.state.get()
    }

    pub fn subscribe(&self, f: impl Fn(&MotionPreference) + 'static) -> SubId {
        self.state.subscribe(f)
    }

    /// Safe on an already-removed id.
    pub fn unsubscribe(&self, id: SubId) {
        self.state.unsubscribe(id);
    }

    /// Re-query the host capabilities. Wired to resize and preference-change
    /// events; missing capabilities degrade to motion-allowed defaults.
    pub fn refresh(&self) {
        let reduced_motion = match self.host.prefers_reduced_motion() {
            Some(v) => v,
            None => {
                self.warn_once(MotionError::MissingCapability("prefers-reduced-motion"));
                false
            }
        };
        let is_mobile = match self.host.viewport() {
            Some(vp) => vp.width < MOBILE_WIDTH_PX,
            None => {
                self.warn_once(MotionError::MissingCapability("viewport"));
                false
            }
        };

        let next = MotionPreference {
            reduced_motion,
            is_mobile,
        };
        if next != self.state.get() {
            log::debug!("motion preference -> {next:?}");
            self.state.set(next);
        }
    }

    fn warn_once(&self, err: MotionError) {
        if !self.warned.get() {
            self.warned.set(true);
            log::warn!("degrading to motion-allowed defaults: {err}");
        }
    }
}
