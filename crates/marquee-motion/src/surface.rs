use std::cell::RefCell;
use std::rc::Rc;

use bitflags::bitflags;
use marquee_core::Vec2;

/// Animated elements. The host binds each to a real node; the core only ever
/// hands out numeric style values for them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Header,
    AccentBar,
    HeaderGlow,
    Card,
    Ring,
    Word(usize),
    Layer(usize),
    Orb(usize),
    DrawerPanel,
    DrawerItem(usize),
}

bitflags! {
    /// Which channels of a [`StylePatch`] carry meaning.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct StyleMask: u8 {
        const HEIGHT    = 1 << 0;
        const OPACITY   = 1 << 1;
        const TRANSLATE = 1 << 2;
        const ROTATE    = 1 << 3;
        const SCALE     = 1 << 4;
        const DASH      = 1 << 5;
    }
}

/// One numeric style write. Channels outside `mask` must be ignored by the
/// receiving surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StylePatch {
    pub mask: StyleMask,
    pub height: f32,
    pub opacity: f32,
    /// Pixels.
    pub translate: Vec2,
    /// Tilt in degrees: x rotates around the X axis, y around the Y axis.
    pub rotate: Vec2,
    pub scale: f32,
    /// Fraction of the stroke still hidden: 1 = not drawn, 0 = fully drawn.
    pub dash_offset: f32,
}

impl StylePatch {
    pub fn height(mut self, v: f32) -> Self {
        self.height = v;
        self.mask |= StyleMask::HEIGHT;
        self
    }
    pub fn opacity(mut self, v: f32) -> Self {
        self.opacity = v;
        self.mask |= StyleMask::OPACITY;
        self
    }
    pub fn translate(mut self, x: f32, y: f32) -> Self {
        self.translate = Vec2::new(x, y);
        self.mask |= StyleMask::TRANSLATE;
        self
    }
    pub fn rotate(mut self, x_deg: f32, y_deg: f32) -> Self {
        self.rotate = Vec2::new(x_deg, y_deg);
        self.mask |= StyleMask::ROTATE;
        self
    }
    pub fn scale(mut self, v: f32) -> Self {
        self.scale = v;
        self.mask |= StyleMask::SCALE;
        self
    }
    pub fn dash_offset(mut self, v: f32) -> Self {
        self.dash_offset = v;
        self.mask |= StyleMask::DASH;
        self
    }

    /// Channel-wise interpolation over the union of both masks.
    pub fn interpolate(&self, to: &StylePatch, t: f32) -> StylePatch {
        use marquee_core::lerp;
        let mask = self.mask | to.mask;
        StylePatch {
            mask,
            height: lerp(self.height, to.height, t),
            opacity: lerp(self.opacity, to.opacity, t),
            translate: Vec2::new(
                lerp(self.translate.x, to.translate.x, t),
                lerp(self.translate.y, to.translate.y, t),
            ),
            rotate: Vec2::new(
                lerp(self.rotate.x, to.rotate.x, t),
                lerp(self.rotate.y, to.rotate.y, t),
            ),
            scale: lerp(self.scale, to.scale, t),
            dash_offset: lerp(self.dash_offset, to.dash_offset, t),
        }
    }
}

/// The rendering seam. Implementations apply numeric style parameters to the
/// node bound to `target`; they never see why a value changed.
pub trait Surface {
    fn write(&mut self, target: Target, patch: StylePatch);
}

pub type SharedSurface = Rc<RefCell<dyn Surface>>;

/// In-memory surface that records every write. Backs the tests and the
/// headless demo.
#[derive(Default)]
pub struct MemorySurface {
    writes: Vec<(Target, StylePatch)>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> &[(Target, StylePatch)] {
        &self.writes
    }

    pub fn last(&self, target: Target) -> Option<StylePatch> {
        self.writes
            .iter()
            .rev()
            .find(|(t, _)| *t == target)
            .map(|(_, p)| *p)
    }

    pub fn count_for(&self, target: Target) -> usize {
        self.writes.iter().filter(|(t, _)| *t == target).count()
    }

    pub fn clear(&mut self) {
        self.writes.clear();
    }
}

impl Surface for MemorySurface {
    fn write(&mut self, target: Target, patch: StylePatch) {
        self.writes.push((target, patch));
    }
}
