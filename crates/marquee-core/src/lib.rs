//! # Signals, frames, and handles
//!
//! Marquee runs everything off a small cooperative core instead of an explicit
//! widget tree with mutable fields. There are four main pieces:
//!
//! - `Signal<T>` — observable value with a stable subscription registry.
//! - `Scope` — lifecycle-aware cleanup bound to a mount.
//! - `FramePump` / `FrameScheduler` — one execution per rendering frame,
//!   trailing-edge coalescing, latest arguments win.
//! - `AnimationHandle` — idempotent cancellation token for anything pending.
//!
//! ## Signals
//!
//! `Signal<T>` is a cloneable handle to a piece of state:
//!
//! ```rust
//! use marquee_core::*;
//!
//! let y = signal(0.0f32);
//! let sub = y.subscribe(|v| log::trace!("scroll {v}"));
//! y.set(120.0);
//! y.unsubscribe(sub);
//! y.unsubscribe(sub); // idempotent
//! ```
//!
//! ## Frames
//!
//! The host ticks `FramePump::frame()` once per rendering frame. Event sources
//! wrap their handlers in a `FrameScheduler`, so arbitrarily frequent events
//! collapse to at most one handler run per frame, carrying the newest payload:
//!
//! ```rust
//! use marquee_core::*;
//!
//! let pump = FramePump::new();
//! let seen = signal(0.0f32);
//! let sched = FrameScheduler::new(&pump, {
//!     let seen = seen.clone();
//!     move |y: f32| seen.set(y)
//! });
//! sched.schedule(10.0);
//! sched.schedule(60.0);
//! sched.schedule(120.0);
//! pump.frame();
//! assert_eq!(seen.get(), 120.0); // one run, last arguments
//! ```
//!
//! Continuous work (tweens, timelines, oscillators) registers a *ticker* on the
//! same pump; each ticker is owned by an `AnimationHandle` that its owner must
//! cancel on teardown. All tickers in one frame observe the same clock reading.
//!
//! ## Scopes and cleanup
//!
//! Use `scoped_effect` for side-effects with cleanups:
//!
//! ```rust
//! use marquee_core::*;
//!
//! let scope = Scope::new();
//! scope.run(|| {
//!     scoped_effect(|| {
//!         log::info!("mounted");
//!         Box::new(|| log::info!("unmounted"))
//!     });
//! });
//! scope.dispose();
//! ```
//!
//! Owners park their `AnimationHandle`s in the current scope so everything is
//! cancelled synchronously when the mount that owns it disappears.

pub mod clock;
pub mod easing;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod handle;
pub mod scope;
pub mod signal;
pub mod tests;
pub mod tween;

pub use clock::*;
pub use easing::*;
pub use error::*;
pub use frame::*;
pub use geometry::*;
pub use handle::*;
pub use scope::*;
pub use signal::*;
pub use tween::*;
