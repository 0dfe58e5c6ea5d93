use std::cell::{Cell, RefCell};
use std::rc::Rc;

use marquee_core::{Easing, FramePump, MotionError, Signal, SubId, signal};
use smallvec::SmallVec;
use web_time::Duration;

use crate::host::{FocusId, Key, Modifiers};
use crate::preference::MotionPreferenceMonitor;
use crate::surface::{StylePatch, Target};
use crate::timeline::{StyleWriter, Timeline, TimelineBuilder, TimelineStep};

pub const DRAWER_PANEL_SLIDE_PX: f32 = 320.0;
const PANEL_DURATION: Duration = Duration::from_millis(380);
const ITEM_DURATION: Duration = Duration::from_millis(250);
const ITEM_STAGGER: Duration = Duration::from_millis(60);
const ITEM_LEAD_IN: Duration = Duration::from_millis(50);
const ITEM_SLIDE_PX: f32 = 8.0;

/// Strictly sequential; requests that do not match the current state are
/// ignored, so an illegal jump (Closing -> Open, say) is unrepresentable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawerState {
    Closed,
    Opening,
    Open,
    Closing,
}

/// Mobile navigation drawer: slide timeline, focus trap, ESC handling, and
/// focus restore, as a small state machine.
///
/// Focus moves are *commands*: the controller publishes the id that should
/// hold focus through a signal and the host applies it, reporting real focus
/// changes back via [`DrawerController::note_focus`].
pub struct DrawerController {
    inner: Rc<DrawerInner>,
}

struct DrawerInner {
    monitor: Rc<MotionPreferenceMonitor>,
    state: Signal<DrawerState>,
    focusables: RefCell<SmallVec<[FocusId; 8]>>,
    focused: Signal<Option<FocusId>>,
    last_host_focus: Cell<Option<FocusId>>,
    snapshot: Cell<Option<FocusId>>,
    timeline: Timeline,
}

impl DrawerController {
    pub fn new(
        pump: &FramePump,
        monitor: Rc<MotionPreferenceMonitor>,
        writer: StyleWriter,
        item_count: usize,
    ) -> Self {
        let timeline = build_timeline(pump, writer, item_count);
        // park the panel in its hidden state
        timeline.snap_to_start();

        Self {
            inner: Rc::new(DrawerInner {
                monitor,
                state: signal(DrawerState::Closed),
                focusables: RefCell::new(SmallVec::new()),
                focused: signal(None),
                last_host_focus: Cell::new(None),
                snapshot: Cell::new(None),
                timeline,
            }),
        }
    }

    pub fn state(&self) -> DrawerState {
        self.inner.state.get()
    }

    pub fn is_visible(&self) -> bool {
        self.state() != DrawerState::Closed
    }

    pub fn subscribe_state(&self, f: impl Fn(&DrawerState) + 'static) -> SubId {
        self.inner.state.subscribe(f)
    }

    pub fn unsubscribe_state(&self, id: SubId) {
        self.inner.state.unsubscribe(id);
    }

    /// The id that should currently hold focus, per the trap.
    pub fn focused(&self) -> Option<FocusId> {
        self.inner.focused.get()
    }

    pub fn subscribe_focus(&self, f: impl Fn(&Option<FocusId>) + 'static) -> SubId {
        self.inner.focused.subscribe(f)
    }

    pub fn unsubscribe_focus(&self, id: SubId) {
        self.inner.focused.unsubscribe(id);
    }

    /// Replace the drawer's focusable set, in traversal order.
    pub fn set_focusables(&self, ids: impl IntoIterator<Item = FocusId>) {
        *self.inner.focusables.borrow_mut() = ids.into_iter().collect();
    }

    /// Host report of where real focus currently sits.
    pub fn note_focus(&self, focus: Option<FocusId>) {
        self.inner.last_host_focus.set(focus);
    }

    pub fn open(&self) {
        if self.state() != DrawerState::Closed {
            log::debug!("ignoring open request while {:?}", self.state());
            return;
        }
        DrawerInner::begin_opening(&self.inner);
    }

    /// Close request from the button or the backdrop.
    pub fn close(&self) {
        if self.state() != DrawerState::Open {
            log::debug!("ignoring close request while {:?}", self.state());
            return;
        }
        DrawerInner::begin_closing(&self.inner);
    }

    pub fn handle_key(&self, key: Key, modifiers: Modifiers) {
        if self.state() != DrawerState::Open {
            return;
        }
        match key {
            Key::Escape => DrawerInner::begin_closing(&self.inner),
            Key::Tab => self.inner.cycle_focus(modifiers.shift),
            _ => {}
        }
    }

    pub fn teardown(&self) {
        self.inner.timeline.cancel();
    }
}

impl DrawerInner {
    fn begin_opening(inner: &Rc<Self>) {
        inner.snapshot.set(inner.last_host_focus.get());
        inner.set_state(DrawerState::Opening);
        inner.focus_first();
        Self::run_timeline(inner, true, DrawerState::Open);
    }

    fn begin_closing(inner: &Rc<Self>) {
        inner.set_state(DrawerState::Closing);
        Self::run_timeline(inner, false, DrawerState::Closed);
    }

    fn run_timeline(inner: &Rc<Self>, forward: bool, end: DrawerState) {
        if inner.monitor.current().reduced_motion {
            // zero animation: complete in place
            if forward {
                inner.timeline.snap_to_end();
            } else {
                inner.timeline.snap_to_start();
            }
            inner.complete(end);
            return;
        }

        let weak = Rc::downgrade(inner);
        let done = move || {
            if let Some(inner) = weak.upgrade() {
                inner.complete(end);
            }
        };
        if forward {
            inner.timeline.play(done);
        } else {
            inner.timeline.reverse(done);
        }
    }

    fn complete(&self, end: DrawerState) {
        let legal = matches!(
            (self.state.get(), end),
            (DrawerState::Opening, DrawerState::Open) | (DrawerState::Closing, DrawerState::Closed)
        );
        if !legal {
            return;
        }
        self.set_state(end);
        if end == DrawerState::Closed {
            self.restore_focus();
        }
    }

    fn set_state(&self, next: DrawerState) {
        log::debug!("drawer {:?} -> {next:?}", self.state.get());
        self.state.set(next);
    }

    fn focus_first(&self) {
        match self.first_focusable() {
            Ok(first) => self.focused.set(Some(first)),
            Err(err) => log::debug!("focus move skipped: {err}"),
        }
    }

    fn first_focusable(&self) -> Result<FocusId, MotionError> {
        self.focusables
            .borrow()
            .first()
            .copied()
            .ok_or(MotionError::EmptyFocusSet)
    }

    fn restore_focus(&self) {
        if let Some(prev) = self.snapshot.take() {
            self.focused.set(Some(prev));
        }
    }

    fn cycle_focus(&self, backward: bool) {
        let next = {
            let chain = self.focusables.borrow();
            if chain.is_empty() {
                log::debug!("focus move skipped: {}", MotionError::EmptyFocusSet);
                return;
            }
            let current = self.focused.get();
            match current.and_then(|c| chain.iter().position(|&id| id == c)) {
                Some(idx) => {
                    if backward {
                        if idx == 0 {
                            chain[chain.len() - 1]
                        } else {
                            chain[idx - 1]
                        }
                    } else {
                        chain[(idx + 1) % chain.len()]
                    }
                }
                None => chain[0],
            }
        };
        self.focused.set(Some(next));
    }
}

fn build_timeline(pump: &FramePump, writer: StyleWriter, item_count: usize) -> Timeline {
    let mut b = TimelineBuilder::new().then(TimelineStep {
        target: Target::DrawerPanel,
        from: StylePatch::default()
            .translate(-DRAWER_PANEL_SLIDE_PX, 0.0)
            .opacity(0.0),
        to: StylePatch::default().translate(0.0, 0.0).opacity(1.0),
        duration: PANEL_DURATION,
        delay: Duration::ZERO,
        easing: Easing::EaseOut,
    });

    for i in 0..item_count {
        b = b.with_previous(TimelineStep {
            target: Target::DrawerItem(i),
            from: StylePatch::default().translate(-ITEM_SLIDE_PX, 0.0).opacity(0.0),
            to: StylePatch::default().translate(0.0, 0.0).opacity(1.0),
            duration: ITEM_DURATION,
            delay: if i == 0 { ITEM_LEAD_IN } else { ITEM_STAGGER },
            easing: Easing::EaseOut,
        });
    }

    b.build(pump, writer)
}
