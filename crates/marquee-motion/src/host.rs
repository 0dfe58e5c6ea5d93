use marquee_core::{Rect, Size};

/// Stable identity of a focusable element, assigned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FocusId(pub u64);

/// Page regions the core asks geometry for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    /// The hero section container (entrance visibility checks).
    Hero,
    /// The pointer-tracked visual composition inside the hero.
    Visual,
}

/// Capabilities the page environment provides. Every accessor may come back
/// empty; absence degrades, it never faults.
pub trait MotionHost {
    /// Viewport size in CSS pixels.
    fn viewport(&self) -> Option<Size>;

    /// The user's reduced-motion preference.
    fn prefers_reduced_motion(&self) -> Option<bool>;

    /// Viewport-relative bounding box of a tracked region.
    fn element_rect(&self, region: Region) -> Option<Rect>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    Tab,
    Enter,
    Other,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Discrete events the host forwards into [`crate::hero::HeroMotion`]. The
/// host also ticks the frame pump once per rendering frame; everything else
/// in the core runs off these.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    Scroll { y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerLeave,
    /// Viewport or layout changed; geometry is re-queried, never carried.
    Resize,
    KeyDown { key: Key, modifiers: Modifiers },
    /// The system reduced-motion preference may have changed; re-query.
    PreferenceChange,
    FocusChanged { focus: Option<FocusId> },
    DrawerOpenRequested,
    DrawerCloseRequested,
}
