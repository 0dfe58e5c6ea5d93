//! Drives the full motion stack against an in-memory surface with a scripted
//! event session: scroll the header ramp, reveal the hero, tilt the card,
//! then walk the drawer through a keyboard round trip.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use marquee_core::{Rect, Size, TestClock, set_clock};
use marquee_motion::*;
use web_time::Duration;

struct DemoHost {
    viewport: Cell<Size>,
    reduced: Cell<bool>,
    scroll_y: Cell<f32>,
}

impl DemoHost {
    fn new() -> Self {
        Self {
            viewport: Cell::new(Size {
                width: 1280.0,
                height: 800.0,
            }),
            reduced: Cell::new(false),
            scroll_y: Cell::new(0.0),
        }
    }
}

impl MotionHost for DemoHost {
    fn viewport(&self) -> Option<Size> {
        Some(self.viewport.get())
    }

    fn prefers_reduced_motion(&self) -> Option<bool> {
        Some(self.reduced.get())
    }

    fn element_rect(&self, region: Region) -> Option<Rect> {
        // the hero sits one header below the top of the document
        let doc_y = match region {
            Region::Hero => 96.0,
            Region::Visual => 240.0,
        };
        Some(Rect {
            x: 640.0,
            y: doc_y - self.scroll_y.get(),
            w: 400.0,
            h: 400.0,
        })
    }
}

struct LogSurface;

impl Surface for LogSurface {
    fn write(&mut self, target: Target, patch: StylePatch) {
        let mut parts = Vec::new();
        if patch.mask.contains(StyleMask::HEIGHT) {
            parts.push(format!("height {:.1}", patch.height));
        }
        if patch.mask.contains(StyleMask::OPACITY) {
            parts.push(format!("opacity {:.2}", patch.opacity));
        }
        if patch.mask.contains(StyleMask::TRANSLATE) {
            parts.push(format!(
                "translate ({:.1}, {:.1})",
                patch.translate.x, patch.translate.y
            ));
        }
        if patch.mask.contains(StyleMask::ROTATE) {
            parts.push(format!(
                "rotate ({:.2}°, {:.2}°)",
                patch.rotate.x, patch.rotate.y
            ));
        }
        if patch.mask.contains(StyleMask::SCALE) {
            parts.push(format!("scale {:.2}", patch.scale));
        }
        if patch.mask.contains(StyleMask::DASH) {
            parts.push(format!("dash {:.2}", patch.dash_offset));
        }
        log::info!("{target:?}: {}", parts.join(", "));
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting hero motion demo");

    let clock = TestClock::new();
    set_clock(Rc::new(clock.clone()));

    let host = Rc::new(DemoHost::new());
    let surface: SharedSurface = Rc::new(RefCell::new(LogSurface));

    let config = MotionConfig::default()
        .with_particles_flag(std::env::var("MARQUEE_ENABLE_PARTICLES").ok().as_deref());
    let hero = HeroMotion::new(host.clone(), surface, config, HeroSpec::default());
    log::info!("particle backdrop enabled: {}", hero.particles_enabled());

    hero.drawer().set_focusables([
        FocusId(10),
        FocusId(11),
        FocusId(12),
        FocusId(13),
    ]);
    hero.handle_event(HostEvent::FocusChanged {
        focus: Some(FocusId(1)),
    });

    // scroll through the header ramp; the entrance arms on the first event
    for y in [0.0, 40.0, 80.0, 120.0, 200.0] {
        host.scroll_y.set(y);
        hero.handle_event(HostEvent::Scroll { y });
        hero.frame();
        clock.advance(Duration::from_millis(16));
    }

    // let the reveal and the idle float run for a moment
    for _ in 0..8 {
        clock.advance(Duration::from_millis(400));
        hero.frame();
    }
    log::info!(
        "entrance complete: {}, idle float running: {}",
        hero.entrance().is_complete(),
        hero.idle().is_running()
    );

    // drift the pointer across the visual region
    for (x, y) in [(700.0, 300.0), (900.0, 420.0), (1020.0, 580.0)] {
        hero.handle_event(HostEvent::PointerMove { x, y });
        hero.frame();
        clock.advance(Duration::from_millis(16));
        hero.frame();
    }
    hero.handle_event(HostEvent::PointerLeave);
    hero.frame();

    // drawer round trip: open, tab across the trap, escape out
    hero.handle_event(HostEvent::DrawerOpenRequested);
    for _ in 0..4 {
        clock.advance(Duration::from_millis(150));
        hero.frame();
    }
    log::info!("drawer: {:?}, focus on {:?}", hero.drawer().state(), hero.drawer().focused());

    for _ in 0..4 {
        hero.handle_event(HostEvent::KeyDown {
            key: Key::Tab,
            modifiers: Modifiers::default(),
        });
    }
    log::info!("after tabbing: focus on {:?}", hero.drawer().focused());

    hero.handle_event(HostEvent::KeyDown {
        key: Key::Escape,
        modifiers: Modifiers::default(),
    });
    for _ in 0..4 {
        clock.advance(Duration::from_millis(150));
        hero.frame();
    }
    log::info!("drawer: {:?}, focus on {:?}", hero.drawer().state(), hero.drawer().focused());

    hero.unmount();
    log::info!("unmounted; live tickers: {}", hero.pump().ticker_count());
    Ok(())
}
