use std::cell::RefCell;
use std::rc::Rc;

/// Cancellation token for a pending frame, tween, or timeline.
///
/// Cancel runs the owner-supplied teardown at most once; cancelling a handle
/// that already completed (or one that never started anything) is a no-op from
/// any lifecycle phase.
#[derive(Clone, Default)]
pub struct AnimationHandle(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl AnimationHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(cancel)))))
    }

    /// A handle with nothing left to cancel.
    pub fn settled() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        if let Some(f) = self.0.borrow_mut().take() {
            f()
        }
    }

    pub fn is_settled(&self) -> bool {
        self.0.borrow().is_none()
    }

    /// Mark the work as naturally finished without running the teardown.
    pub fn settle(&self) {
        let _ = self.0.borrow_mut().take();
    }
}
