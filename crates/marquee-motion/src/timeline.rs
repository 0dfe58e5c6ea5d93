use std::cell::{Cell, RefCell};
use std::rc::Rc;

use marquee_core::{AnimationHandle, Easing, FramePump, TickerControl, clock};
use web_time::Duration;

use crate::surface::{StylePatch, Target};

/// Where a runner sends its interpolated writes. The hero routes Card writes
/// through the compositor and everything else straight to the surface.
pub type StyleWriter = Rc<dyn Fn(Target, StylePatch)>;

/// One declarative tween: `target` moves `from` → `to` over `duration` with
/// `easing`, `delay` after its anchor point in the timeline.
#[derive(Clone, Copy, Debug)]
pub struct TimelineStep {
    pub target: Target,
    pub from: StylePatch,
    pub to: StylePatch,
    pub duration: Duration,
    pub delay: Duration,
    pub easing: Easing,
}

#[derive(Clone, Copy)]
struct ScheduledStep {
    step: TimelineStep,
    /// Absolute start offset in seconds, resolved at build time.
    start_at: f32,
}

#[derive(Default)]
pub struct TimelineBuilder {
    steps: Vec<ScheduledStep>,
    cursor: f32,
    last_start: f32,
}

impl TimelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append after everything so far, offset by the step's delay.
    pub fn then(mut self, step: TimelineStep) -> Self {
        let start_at = self.cursor + step.delay.as_secs_f32();
        self.push(step, start_at);
        self
    }

    /// Overlap: anchor to the previous step's start, offset by the delay.
    pub fn with_previous(mut self, step: TimelineStep) -> Self {
        let start_at = self.last_start + step.delay.as_secs_f32();
        self.push(step, start_at);
        self
    }

    fn push(&mut self, step: TimelineStep, start_at: f32) {
        let end = start_at + step.duration.as_secs_f32();
        self.last_start = start_at;
        self.cursor = self.cursor.max(end);
        self.steps.push(ScheduledStep { step, start_at });
    }

    pub fn build(self, pump: &FramePump, writer: StyleWriter) -> Timeline {
        Timeline {
            pump: pump.clone(),
            writer,
            total: self.cursor,
            steps: Rc::new(self.steps),
            position: Rc::new(Cell::new(0.0)),
            playing: Rc::new(Cell::new(false)),
            handle: RefCell::new(AnimationHandle::settled()),
        }
    }
}

/// Frame-driven runner for an ordered step list. Supports play, reverse from
/// the current position, cancel, and snapping straight to an end state (the
/// reduced-motion branch).
pub struct Timeline {
    pump: FramePump,
    writer: StyleWriter,
    steps: Rc<Vec<ScheduledStep>>,
    total: f32,
    position: Rc<Cell<f32>>,
    playing: Rc<Cell<bool>>,
    handle: RefCell<AnimationHandle>,
}

impl Timeline {
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f32(self.total)
    }

    pub fn is_playing(&self) -> bool {
        self.playing.get()
    }

    /// Play forward from the current position. Replaces any in-flight run.
    pub fn play(&self, on_complete: impl FnOnce() + 'static) {
        self.run(1.0, Box::new(on_complete));
    }

    /// Play backward from the current position. Replaces any in-flight run.
    pub fn reverse(&self, on_complete: impl FnOnce() + 'static) {
        self.run(-1.0, Box::new(on_complete));
    }

    fn run(&self, dir: f32, on_complete: Box<dyn FnOnce()>) {
        self.cancel();

        let steps = self.steps.clone();
        let writer = self.writer.clone();
        let position = self.position.clone();
        let playing = self.playing.clone();
        let total = self.total;
        let base = position.get();
        let t0 = clock::now();
        let mut on_complete = Some(on_complete);

        playing.set(true);
        let handle = self.pump.spawn_ticker(move |now| {
            let elapsed = now.saturating_duration_since(t0).as_secs_f32();
            let pos = (base + dir * elapsed).clamp(0.0, total);
            position.set(pos);
            sample(&steps, &writer, pos);

            let done = if dir > 0.0 { pos >= total } else { pos <= 0.0 };
            if done {
                playing.set(false);
                if let Some(cb) = on_complete.take() {
                    cb();
                }
                TickerControl::Stop
            } else {
                TickerControl::Continue
            }
        });
        *self.handle.borrow_mut() = handle;
    }

    /// Drop any in-flight run; the playhead stays where it was. Idempotent.
    pub fn cancel(&self) {
        self.handle.borrow().cancel();
        self.playing.set(false);
    }

    /// Write every step's final state in one batch. No intermediate frames.
    pub fn snap_to_end(&self) {
        self.cancel();
        self.position.set(self.total);
        for s in self.steps.iter() {
            (self.writer)(s.step.target, s.step.to);
        }
    }

    /// Write every step's initial state in one batch.
    pub fn snap_to_start(&self) {
        self.cancel();
        self.position.set(0.0);
        for s in self.steps.iter() {
            (self.writer)(s.step.target, s.step.from);
        }
    }
}

fn sample(steps: &[ScheduledStep], writer: &StyleWriter, pos: f32) {
    for s in steps {
        let dur = s.step.duration.as_secs_f32();
        let local = if dur <= 0.0 {
            if pos >= s.start_at { 1.0 } else { 0.0 }
        } else {
            ((pos - s.start_at) / dur).clamp(0.0, 1.0)
        };

        // Endpoints write the declared states exactly; eased curves (springs
        // in particular) are not trusted to land on 1.0.
        if local <= 0.0 {
            writer(s.step.target, s.step.from);
        } else if local >= 1.0 {
            writer(s.step.target, s.step.to);
        } else {
            let eased = s.step.easing.interpolate(local);
            writer(s.step.target, s.step.from.interpolate(&s.step.to, eased));
        }
    }
}
