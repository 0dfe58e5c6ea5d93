use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Stable subscription id; removal is idempotent.
    pub struct SubId;
}

#[derive(Clone)]
pub struct Signal<T: 'static>(Rc<Inner<T>>);

// Value and subscriber list borrow independently, so a subscriber may read
// this (or any other) signal while a notification is in flight.
struct Inner<T> {
    value: RefCell<T>,
    subs: RefCell<SlotMap<SubId, Box<dyn Fn(&T)>>>,
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(Inner {
            value: RefCell::new(value),
            subs: RefCell::new(SlotMap::with_key()),
        }))
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.value.borrow().clone()
    }

    pub fn set(&self, v: T) {
        *self.0.value.borrow_mut() = v;
        self.notify();
    }

    pub fn update<F: FnOnce(&mut T)>(&self, f: F) {
        f(&mut self.0.value.borrow_mut());
        self.notify();
    }

    fn notify(&self) {
        let value = self.0.value.borrow();
        for (_, s) in self.0.subs.borrow().iter() {
            s(&value);
        }
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        self.0.subs.borrow_mut().insert(Box::new(f))
    }

    /// Safe on an already-removed (or never-issued) id.
    pub fn unsubscribe(&self, id: SubId) {
        let _ = self.0.subs.borrow_mut().remove(id);
    }
}

pub fn signal<T>(t: T) -> Signal<T> {
    Signal::new(t)
}
