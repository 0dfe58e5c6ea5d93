//! # Header and hero motion orchestration
//!
//! This crate decides what numeric style values every animated element of a
//! page header and hero section should carry — per discrete event and per
//! rendering frame — given three independent inputs: scroll position, pointer
//! position, and the accessibility/viewport state. It renders nothing; the
//! host applies the values it emits.
//!
//! The pieces, roughly in dependency order:
//!
//! - [`preference::MotionPreferenceMonitor`] — reduced-motion + mobile flags,
//!   refreshed from forwarded system events only.
//! - [`header::HeaderMotion`] — scroll-scrubbed header height and accent
//!   opacity, plus a kill-and-restart glow pulse.
//! - [`parallax::ParallaxEngine`] — per-layer scrub offsets over activation
//!   windows.
//! - [`pointer::PointerSignal`] — normalized pointer offset driving card tilt
//!   and orb drift; detaches itself on reduced-motion/mobile.
//! - [`entrance::EntranceTimeline`] — one-shot staged reveal, triggered by
//!   first visibility.
//! - [`idle::IdleLoop`] — post-entrance decorative float.
//! - [`drawer::DrawerController`] — the mobile drawer state machine with its
//!   focus trap.
//! - [`card::CardCompositor`] — the single writer of the card transform,
//!   merging idle float, pointer pose, and entrance reveal deterministically.
//! - [`hero::HeroMotion`] — owns all of the above plus the frame pump, routes
//!   [`host::HostEvent`]s, and gates the particle backdrop.
//!
//! A typical host loop:
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use marquee_motion::*;
//!
//! struct HeadlessHost;
//! impl MotionHost for HeadlessHost {
//!     fn viewport(&self) -> Option<marquee_core::Size> {
//!         Some(marquee_core::Size { width: 1280.0, height: 800.0 })
//!     }
//!     fn prefers_reduced_motion(&self) -> Option<bool> {
//!         Some(false)
//!     }
//!     fn element_rect(&self, _region: Region) -> Option<marquee_core::Rect> {
//!         Some(marquee_core::Rect { x: 0.0, y: 120.0, w: 1280.0, h: 620.0 })
//!     }
//! }
//!
//! let surface = Rc::new(RefCell::new(MemorySurface::new()));
//! let shared: SharedSurface = surface.clone();
//! let hero = HeroMotion::new(
//!     Rc::new(HeadlessHost),
//!     shared,
//!     MotionConfig::default(),
//!     HeroSpec::default(),
//! );
//!
//! hero.handle_event(HostEvent::Scroll { y: 60.0 });
//! hero.frame();
//! assert!(surface.borrow().last(Target::Header).is_some());
//! hero.unmount();
//! ```

pub mod card;
pub mod config;
pub mod drawer;
pub mod entrance;
pub mod header;
pub mod hero;
pub mod host;
pub mod idle;
pub mod parallax;
pub mod pointer;
pub mod preference;
pub mod surface;
pub mod timeline;

pub use card::*;
pub use config::*;
pub use drawer::*;
pub use entrance::*;
pub use header::*;
pub use hero::*;
pub use host::*;
pub use idle::*;
pub use parallax::*;
pub use pointer::*;
pub use preference::*;
pub use surface::*;
pub use timeline::*;
