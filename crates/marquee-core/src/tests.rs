#[cfg(test)]
mod tests {
    use crate::clock::{TestClock, set_clock};
    use crate::easing::*;
    use crate::frame::*;
    use crate::handle::AnimationHandle;
    use crate::scope::*;
    use crate::signal::*;
    use crate::tween::AnimatedValue;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use web_time::Duration;

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn test_signal_subscription() {
        let sig = signal(0);
        let called = Rc::new(Cell::new(0));

        let called_clone = called.clone();
        let id = sig.subscribe(move |_| {
            called_clone.set(called_clone.get() + 1);
        });

        sig.set(42);
        assert_eq!(called.get(), 1);

        sig.unsubscribe(id);
        sig.set(43);
        assert_eq!(called.get(), 1);

        // idempotent
        sig.unsubscribe(id);
        sig.set(44);
        assert_eq!(called.get(), 1);
    }

    #[test]
    fn test_scope_explicit_dispose() {
        let cleaned_up = Rc::new(Cell::new(false));

        let scope = Scope::new();
        let cleaned_up_clone = cleaned_up.clone();
        scope.add_disposer(move || {
            cleaned_up_clone.set(true);
        });

        assert!(!cleaned_up.get());
        scope.dispose();
        assert!(cleaned_up.get());
    }

    #[test]
    fn test_scheduler_coalesces_to_last_args() {
        let pump = FramePump::new();
        let runs = Rc::new(RefCell::new(Vec::new()));
        let sched = FrameScheduler::new(&pump, {
            let runs = runs.clone();
            move |v: i32| runs.borrow_mut().push(v)
        });

        sched.schedule(1);
        sched.schedule(2);
        sched.schedule(3);
        pump.frame();
        assert_eq!(*runs.borrow(), vec![3]);

        // nothing pending on the next frame
        pump.frame();
        assert_eq!(*runs.borrow(), vec![3]);
    }

    #[test]
    fn test_scheduler_cancel_is_idempotent() {
        let pump = FramePump::new();
        let runs = Rc::new(Cell::new(0));
        let sched = FrameScheduler::new(&pump, {
            let runs = runs.clone();
            move |_: ()| runs.set(runs.get() + 1)
        });

        // cancel while idle
        sched.cancel();

        sched.schedule(());
        sched.cancel();
        sched.cancel();
        pump.frame();
        assert_eq!(runs.get(), 0);

        // still usable afterwards
        sched.schedule(());
        pump.frame();
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn test_schedule_during_handler_runs_next_frame() {
        let pump = FramePump::new();
        let runs = Rc::new(RefCell::new(Vec::new()));
        let slot: Rc<RefCell<Option<FrameScheduler<i32>>>> = Rc::new(RefCell::new(None));

        let sched = FrameScheduler::new(&pump, {
            let runs = runs.clone();
            let slot = slot.clone();
            move |v: i32| {
                runs.borrow_mut().push(v);
                if v < 2 {
                    slot.borrow().as_ref().unwrap().schedule(v + 1);
                }
            }
        });
        *slot.borrow_mut() = Some(sched.clone());

        sched.schedule(1);
        pump.frame();
        assert_eq!(*runs.borrow(), vec![1]);
        pump.frame();
        assert_eq!(*runs.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_ticker_runs_until_stop() {
        let pump = FramePump::new();
        let count = Rc::new(Cell::new(0u32));
        let c = count.clone();
        let handle = pump.spawn_ticker(move |_| {
            c.set(c.get() + 1);
            if c.get() == 3 {
                TickerControl::Stop
            } else {
                TickerControl::Continue
            }
        });

        for _ in 0..5 {
            pump.frame();
        }
        assert_eq!(count.get(), 3);
        assert_eq!(pump.ticker_count(), 0);

        // cancelling a naturally-finished ticker is a no-op
        handle.cancel();
        handle.cancel();
    }

    #[test]
    fn test_ticker_cancel_stops_sampling() {
        let pump = FramePump::new();
        let count = Rc::new(Cell::new(0u32));
        let c = count.clone();
        let handle = pump.spawn_ticker(move |_| {
            c.set(c.get() + 1);
            TickerControl::Continue
        });

        pump.frame();
        assert_eq!(count.get(), 1);
        handle.cancel();
        pump.frame();
        assert_eq!(count.get(), 1);
        assert_eq!(pump.ticker_count(), 0);
    }

    #[test]
    fn test_scope_cancels_owned_handle() {
        let pump = FramePump::new();
        let count = Rc::new(Cell::new(0u32));
        let c = count.clone();
        let handle = pump.spawn_ticker(move |_| {
            c.set(c.get() + 1);
            TickerControl::Continue
        });

        let scope = Scope::new();
        let h = handle.clone();
        scope.add_disposer(move || h.cancel());

        pump.frame();
        scope.dispose();
        pump.frame();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_handle_double_cancel() {
        let count = Rc::new(Cell::new(0u32));
        let c = count.clone();
        let handle = AnimationHandle::new(move || c.set(c.get() + 1));

        handle.cancel();
        handle.cancel();
        assert_eq!(count.get(), 1);
        assert!(handle.is_settled());

        // a handle that never started anything
        let idle = AnimationHandle::settled();
        idle.cancel();
        assert!(idle.is_settled());
    }

    #[test]
    fn test_animation_deterministic() {
        let clock = TestClock::new();
        set_clock(Rc::new(clock.clone()));

        let mut a = AnimatedValue::new(
            0.0f32,
            AnimationSpec::tween(Duration::from_millis(1000), Easing::Linear),
        );
        a.set_target(10.0);

        clock.advance(Duration::from_millis(250));
        assert!(a.update());
        assert!((*a.get() - 2.5).abs() < 0.01);

        clock.advance(Duration::from_millis(750));
        let cont = a.update();
        assert!(!cont);
        assert!((*a.get() - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_snap_to_drops_animation() {
        let clock = TestClock::new();
        set_clock(Rc::new(clock.clone()));

        let mut a = AnimatedValue::new(0.0f32, AnimationSpec::fast());
        a.set_target(1.0);
        assert!(a.is_animating());

        a.snap_to(0.0);
        assert!(!a.is_animating());
        assert_eq!(*a.get(), 0.0);

        clock.advance(Duration::from_millis(500));
        assert!(!a.update());
        assert_eq!(*a.get(), 0.0);
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(96.0, 64.0, 0.0), 96.0);
        assert_eq!(lerp(96.0, 64.0, 1.0), 64.0);
        assert_eq!(lerp(96.0, 64.0, 0.5), 80.0);
    }
}
