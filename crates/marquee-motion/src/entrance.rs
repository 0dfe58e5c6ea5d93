use std::cell::Cell;
use std::rc::Rc;

use marquee_core::{Easing, FramePump};
use web_time::Duration;

use crate::host::{MotionHost, Region};
use crate::preference::MotionPreferenceMonitor;
use crate::surface::{StylePatch, Target};
use crate::timeline::{StyleWriter, Timeline, TimelineBuilder, TimelineStep};

/// The entrance arms when the hero's top edge reaches this fraction of the
/// viewport height.
pub const VISIBILITY_THRESHOLD: f32 = 0.8;

pub const WORD_STAGGER: Duration = Duration::from_millis(45);
pub const LAYER_STAGGER: Duration = Duration::from_millis(80);

const WORD_RISE_PX: f32 = 28.0;

#[derive(Clone, Copy, Debug)]
pub struct EntranceSpec {
    pub words: usize,
    pub layers: usize,
    pub word_duration: Duration,
    pub layer_duration: Duration,
    pub card_duration: Duration,
    pub ring_duration: Duration,
}

impl EntranceSpec {
    pub fn new(words: usize, layers: usize) -> Self {
        Self {
            words,
            layers,
            word_duration: Duration::from_millis(500),
            layer_duration: Duration::from_millis(500),
            card_duration: Duration::from_millis(450),
            ring_duration: Duration::from_millis(900),
        }
    }
}

impl Default for EntranceSpec {
    fn default() -> Self {
        Self::new(8, 3)
    }
}

/// One-shot reveal sequence, armed by the first visibility-threshold crossing
/// and never re-armed, however often the hero scrolls in and out afterwards.
///
/// Stage order: headline words (staggered), decorative layers (staggered),
/// card, ring stroke overlapping the card. Under reduced motion the final
/// state is written directly — zero animation, not a faster one.
pub struct EntranceTimeline {
    host: Rc<dyn MotionHost>,
    monitor: Rc<MotionPreferenceMonitor>,
    timeline: Timeline,
    fired: Cell<bool>,
    completed: Rc<Cell<bool>>,
    on_complete: Rc<dyn Fn()>,
}

impl EntranceTimeline {
    pub fn new(
        pump: &FramePump,
        host: Rc<dyn MotionHost>,
        monitor: Rc<MotionPreferenceMonitor>,
        writer: StyleWriter,
        spec: EntranceSpec,
        on_complete: impl Fn() + 'static,
    ) -> Self {
        Self {
            host,
            monitor,
            timeline: build_timeline(pump, writer, spec),
            fired: Cell::new(false),
            completed: Rc::new(Cell::new(false)),
            on_complete: Rc::new(on_complete),
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired.get()
    }

    pub fn is_complete(&self) -> bool {
        self.completed.get()
    }

    /// Evaluate the visibility threshold; wired to throttled scroll/resize.
    pub fn observe_visibility(&self) {
        if self.fired.get() {
            return;
        }
        let visible = match (self.host.element_rect(Region::Hero), self.host.viewport()) {
            (Some(rect), Some(vp)) => rect.y <= vp.height * VISIBILITY_THRESHOLD,
            // no geometry to watch: reveal rather than stay blank forever
            _ => {
                log::warn!("hero geometry unavailable; revealing immediately");
                true
            }
        };
        if visible {
            self.fire();
        }
    }

    fn fire(&self) {
        self.fired.set(true);
        log::debug!("entrance triggered");

        let completed = self.completed.clone();
        let cb = self.on_complete.clone();
        let done = move || {
            completed.set(true);
            cb();
        };

        if self.monitor.current().reduced_motion {
            self.timeline.snap_to_end();
            done();
        } else {
            self.timeline.play(done);
        }
    }

    pub fn teardown(&self) {
        self.timeline.cancel();
    }
}

fn build_timeline(pump: &FramePump, writer: StyleWriter, spec: EntranceSpec) -> Timeline {
    let mut b = TimelineBuilder::new();

    for i in 0..spec.words {
        let step = TimelineStep {
            target: Target::Word(i),
            from: StylePatch::default().translate(0.0, WORD_RISE_PX).opacity(0.0),
            to: StylePatch::default().translate(0.0, 0.0).opacity(1.0),
            duration: spec.word_duration,
            delay: if i == 0 { Duration::ZERO } else { WORD_STAGGER },
            easing: Easing::Spring {
                damping: 0.8,
                stiffness: 200.0,
            },
        };
        b = if i == 0 { b.then(step) } else { b.with_previous(step) };
    }

    // Layer translate belongs to the parallax engine; the reveal only touches
    // opacity and scale, so the two never contend for a channel.
    for i in 0..spec.layers {
        let step = TimelineStep {
            target: Target::Layer(i),
            from: StylePatch::default().opacity(0.0).scale(0.96),
            to: StylePatch::default().opacity(1.0).scale(1.0),
            duration: spec.layer_duration,
            delay: if i == 0 { Duration::ZERO } else { LAYER_STAGGER },
            easing: Easing::EaseOut,
        };
        b = if i == 0 { b.then(step) } else { b.with_previous(step) };
    }

    b = b.then(TimelineStep {
        target: Target::Card,
        from: StylePatch::default().opacity(0.0).scale(0.96),
        to: StylePatch::default().opacity(1.0).scale(1.0),
        duration: spec.card_duration,
        delay: Duration::ZERO,
        easing: Easing::EaseOut,
    });

    // ring stroke draws while the card settles
    b = b.with_previous(TimelineStep {
        target: Target::Ring,
        from: StylePatch::default().dash_offset(1.0),
        to: StylePatch::default().dash_offset(0.0),
        duration: spec.ring_duration,
        delay: Duration::ZERO,
        easing: Easing::EaseInOut,
    });

    b.build(pump, writer)
}
