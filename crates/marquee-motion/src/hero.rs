use std::cell::Cell;
use std::rc::Rc;

use marquee_core::{FramePump, Scope, Signal, Vec2, signal};

use crate::card::CardCompositor;
use crate::config::MotionConfig;
use crate::drawer::DrawerController;
use crate::entrance::{EntranceSpec, EntranceTimeline};
use crate::header::HeaderMotion;
use crate::host::{HostEvent, MotionHost};
use crate::idle::IdleLoop;
use crate::parallax::{Axis, LayerCoefficient, ParallaxEngine, ParallaxLayer};
use crate::pointer::PointerSignal;
use crate::preference::{MotionPreference, MotionPreferenceMonitor};
use crate::surface::{SharedSurface, Target};
use crate::timeline::StyleWriter;

/// Element counts and layer setup for one hero mount, mirroring the page
/// structure the host renders.
#[derive(Clone, Debug)]
pub struct HeroSpec {
    pub entrance: EntranceSpec,
    pub parallax_layers: Vec<ParallaxLayer>,
    pub orb_count: usize,
    pub drawer_items: usize,
    /// Card translate per unit of pointer offset; zero keeps the card
    /// tilt-only.
    pub card_translate_k: Vec2,
}

impl HeroSpec {
    /// Two slow blobs drifting down and one fast ring drifting up, all
    /// desktop-only, activating over the first viewport of scroll.
    pub fn default_layers() -> Vec<ParallaxLayer> {
        vec![
            ParallaxLayer {
                target: Target::Layer(0),
                coefficient: LayerCoefficient {
                    magnitude: 48.0,
                    axis: Axis::Y,
                },
                window: (0.0, 480.0),
                desktop_only: true,
            },
            ParallaxLayer {
                target: Target::Layer(1),
                coefficient: LayerCoefficient {
                    magnitude: 32.0,
                    axis: Axis::Y,
                },
                window: (0.0, 480.0),
                desktop_only: true,
            },
            ParallaxLayer {
                target: Target::Layer(2),
                coefficient: LayerCoefficient {
                    magnitude: -52.0,
                    axis: Axis::Y,
                },
                window: (0.0, 640.0),
                desktop_only: true,
            },
        ]
    }
}

impl Default for HeroSpec {
    fn default() -> Self {
        Self {
            entrance: EntranceSpec::default(),
            parallax_layers: Self::default_layers(),
            orb_count: 4,
            drawer_items: 6,
            card_translate_k: Vec2::ZERO,
        }
    }
}

/// The orchestrator: owns the frame pump and every motion component, routes
/// host events, and tears the whole arrangement down in one step.
pub struct HeroMotion {
    pump: FramePump,
    scope: Cell<Option<Scope>>,
    monitor: Rc<MotionPreferenceMonitor>,
    header: Rc<HeaderMotion>,
    parallax: Rc<ParallaxEngine>,
    pointer: Rc<PointerSignal>,
    entrance: Rc<EntranceTimeline>,
    idle: Rc<IdleLoop>,
    drawer: DrawerController,
    particles: Signal<bool>,
    last_scroll: Cell<f32>,
}

impl HeroMotion {
    pub fn new(
        host: Rc<dyn MotionHost>,
        surface: SharedSurface,
        config: MotionConfig,
        spec: HeroSpec,
    ) -> Self {
        let pump = FramePump::new();
        let monitor = Rc::new(MotionPreferenceMonitor::new(host.clone()));
        let compositor = CardCompositor::new(&pump, surface.clone());

        let header = Rc::new(HeaderMotion::new(&pump, monitor.clone(), surface.clone()));
        let parallax = Rc::new(ParallaxEngine::new(
            &pump,
            monitor.clone(),
            surface.clone(),
            config.parallax_multiplier,
            spec.parallax_layers.clone(),
        ));
        let pointer = Rc::new(PointerSignal::new(
            &pump,
            host.clone(),
            monitor.clone(),
            surface.clone(),
            compositor.clone(),
            spec.orb_count,
            spec.card_translate_k,
            config.parallax_multiplier,
        ));
        let idle = Rc::new(IdleLoop::new(&pump, monitor.clone(), compositor.clone()));

        // Card writes from the entrance merge into the compositor; everything
        // else lands on the surface directly.
        let entrance_writer: StyleWriter = Rc::new({
            let surface = surface.clone();
            let compositor = compositor.clone();
            move |target, patch| match target {
                Target::Card => compositor.apply_reveal(patch),
                _ => surface.borrow_mut().write(target, patch),
            }
        });
        let entrance = Rc::new(EntranceTimeline::new(
            &pump,
            host.clone(),
            monitor.clone(),
            entrance_writer,
            spec.entrance,
            {
                let idle = idle.clone();
                move || idle.start()
            },
        ));

        let drawer_writer: StyleWriter = Rc::new({
            let surface = surface.clone();
            move |target, patch| surface.borrow_mut().write(target, patch)
        });
        let drawer = DrawerController::new(&pump, monitor.clone(), drawer_writer, spec.drawer_items);

        let particles = signal(particles_gate(&config, &monitor.current()));

        let pref_sub = monitor.subscribe({
            let particles = particles.clone();
            let header = header.clone();
            let parallax = parallax.clone();
            let idle = idle.clone();
            let entrance = entrance.clone();
            move |pref: &MotionPreference| {
                particles.set(particles_gate(&config, pref));
                if pref.reduced_motion {
                    header.suppress();
                    parallax.suppress();
                    idle.stop();
                } else if entrance.is_complete() {
                    // motion re-enabled after the reveal already ran
                    idle.start();
                }
            }
        });

        let scope = Scope::new();
        {
            let header = header.clone();
            scope.add_disposer(move || header.suppress());
        }
        {
            let parallax = parallax.clone();
            scope.add_disposer(move || parallax.suppress());
        }
        {
            let pointer = pointer.clone();
            scope.add_disposer(move || pointer.teardown());
        }
        {
            let idle = idle.clone();
            scope.add_disposer(move || idle.stop());
        }
        {
            let entrance = entrance.clone();
            scope.add_disposer(move || entrance.teardown());
        }
        {
            let compositor = compositor.clone();
            scope.add_disposer(move || compositor.suppress());
        }
        {
            let monitor = monitor.clone();
            scope.add_disposer(move || monitor.unsubscribe(pref_sub));
        }

        Self {
            pump,
            scope: Cell::new(Some(scope)),
            monitor,
            header,
            parallax,
            pointer,
            entrance,
            idle,
            drawer,
            particles,
            last_scroll: Cell::new(0.0),
        }
    }

    pub fn handle_event(&self, event: HostEvent) {
        match event {
            HostEvent::Scroll { y } => {
                self.last_scroll.set(y);
                self.header.on_scroll(y);
                self.parallax.on_scroll(y);
                self.entrance.observe_visibility();
            }
            HostEvent::PointerMove { x, y } => self.pointer.on_pointer_move(x, y),
            HostEvent::PointerLeave => self.pointer.on_pointer_leave(),
            HostEvent::Resize => {
                self.monitor.refresh();
                self.pointer.refresh_region();
                self.parallax.on_scroll(self.last_scroll.get());
                self.entrance.observe_visibility();
            }
            HostEvent::KeyDown { key, modifiers } => self.drawer.handle_key(key, modifiers),
            HostEvent::PreferenceChange => self.monitor.refresh(),
            HostEvent::FocusChanged { focus } => self.drawer.note_focus(focus),
            HostEvent::DrawerOpenRequested => self.drawer.open(),
            HostEvent::DrawerCloseRequested => self.drawer.close(),
        }
    }

    /// Tick once per rendering frame.
    pub fn frame(&self) {
        self.pump.frame();
    }

    pub fn pump(&self) -> &FramePump {
        &self.pump
    }

    pub fn preference(&self) -> MotionPreference {
        self.monitor.current()
    }

    /// Whether the opaque particle backdrop should be mounted right now.
    pub fn particles_enabled(&self) -> bool {
        self.particles.get()
    }

    pub fn drawer(&self) -> &DrawerController {
        &self.drawer
    }

    pub fn entrance(&self) -> &EntranceTimeline {
        &self.entrance
    }

    pub fn idle(&self) -> &IdleLoop {
        &self.idle
    }

    pub fn pointer(&self) -> &PointerSignal {
        &self.pointer
    }

    /// Cancel every pending frame, ticker, and subscription. Idempotent.
    pub fn unmount(&self) {
        self.drawer.teardown();
        if let Some(scope) = self.scope.take() {
            scope.dispose();
        }
    }
}

impl Drop for HeroMotion {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn particles_gate(config: &MotionConfig, pref: &MotionPreference) -> bool {
    config.enable_particles && !pref.is_mobile && !pref.reduced_motion
}
