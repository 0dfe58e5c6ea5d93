use std::cell::RefCell;
use std::rc::{Rc, Weak};

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;
use web_time::Instant;

use crate::clock::now;
use crate::handle::AnimationHandle;

new_key_type! {
    struct TickerId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickerControl {
    Continue,
    Stop,
}

type Task = Box<dyn FnOnce()>;
// Boxes sit in an Option so a ticker can be taken out of the registry while it
// runs; a ticker cancelled from inside its own callback simply never returns.
type TickerFn = Box<dyn FnMut(Instant) -> TickerControl>;

/// Host-ticked frame driver.
///
/// The host calls [`FramePump::frame`] once per rendering frame. A frame runs
/// the coalesced one-shot tasks queued since the previous frame, then advances
/// every registered ticker. The clock is read once per frame and the task
/// queue is snapshotted up front, so all work within a frame observes the same
/// instant and anything scheduled mid-frame lands in the next one.
#[derive(Clone, Default)]
pub struct FramePump {
    inner: Rc<RefCell<PumpInner>>,
}

#[derive(Default)]
struct PumpInner {
    queue: Vec<Task>,
    tickers: SlotMap<TickerId, Option<TickerFn>>,
}

impl FramePump {
    pub fn new() -> Self {
        Self::default()
    }

    fn enqueue(&self, task: Task) {
        self.inner.borrow_mut().queue.push(task);
    }

    /// Register a per-frame callback that runs until it returns
    /// [`TickerControl::Stop`] or its handle is cancelled.
    ///
    /// A ticker spawned from a one-shot task gets its first sample in the same
    /// frame; one spawned from another ticker starts the following frame.
    pub fn spawn_ticker(
        &self,
        f: impl FnMut(Instant) -> TickerControl + 'static,
    ) -> AnimationHandle {
        let id = self.inner.borrow_mut().tickers.insert(Some(Box::new(f)));
        let weak = Rc::downgrade(&self.inner);
        AnimationHandle::new(move || {
            if let Some(inner) = weak.upgrade() {
                let _ = inner.borrow_mut().tickers.remove(id);
            }
        })
    }

    /// Run one rendering frame.
    pub fn frame(&self) {
        let frame_now = now();

        let tasks = std::mem::take(&mut self.inner.borrow_mut().queue);
        for task in tasks {
            task();
        }

        let ids: SmallVec<[TickerId; 8]> = self.inner.borrow().tickers.keys().collect();
        for id in ids {
            let taken = match self.inner.borrow_mut().tickers.get_mut(id) {
                Some(slot) => slot.take(),
                None => None,
            };
            let Some(mut f) = taken else { continue };
            let ctl = f(frame_now);
            let mut inner = self.inner.borrow_mut();
            match ctl {
                TickerControl::Continue => {
                    // slot is gone if the ticker cancelled itself mid-run
                    if let Some(slot) = inner.tickers.get_mut(id) {
                        *slot = Some(f);
                    }
                }
                TickerControl::Stop => {
                    let _ = inner.tickers.remove(id);
                }
            }
        }
    }

    pub fn ticker_count(&self) -> usize {
        self.inner.borrow().tickers.len()
    }
}

/// Trailing-edge frame coalescing around a handler.
///
/// Any number of `schedule` calls between two frames collapse into one handler
/// run carrying the newest arguments. The pending flag is cleared on
/// execution, so a call made during the handler lands in the next frame.
pub struct FrameScheduler<T: 'static> {
    pump: FramePump,
    state: Rc<RefCell<SchedState<T>>>,
}

struct SchedState<T> {
    latest: Option<T>,
    pending: bool,
    handler: Rc<dyn Fn(T)>,
}

impl<T> Clone for FrameScheduler<T> {
    fn clone(&self) -> Self {
        Self {
            pump: self.pump.clone(),
            state: self.state.clone(),
        }
    }
}

impl<T> FrameScheduler<T> {
    pub fn new(pump: &FramePump, handler: impl Fn(T) + 'static) -> Self {
        Self {
            pump: pump.clone(),
            state: Rc::new(RefCell::new(SchedState {
                latest: None,
                pending: false,
                handler: Rc::new(handler),
            })),
        }
    }

    pub fn schedule(&self, args: T) {
        let mut s = self.state.borrow_mut();
        s.latest = Some(args);
        if s.pending {
            return;
        }
        s.pending = true;
        drop(s);

        let state = Rc::downgrade(&self.state);
        self.pump.enqueue(Box::new(move || {
            let Some(state) = state.upgrade() else { return };
            let (args, handler) = {
                let mut s = state.borrow_mut();
                if !s.pending {
                    return; // cancelled after enqueue
                }
                s.pending = false;
                (s.latest.take(), s.handler.clone())
            };
            if let Some(args) = args {
                handler(args);
            }
        }));
    }

    /// Drop the pending run, if any. Safe when idle and safe to repeat.
    pub fn cancel(&self) {
        let mut s = self.state.borrow_mut();
        s.pending = false;
        s.latest = None;
    }

    pub fn is_pending(&self) -> bool {
        self.state.borrow().pending
    }
}
