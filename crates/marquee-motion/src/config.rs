/// Recognized configuration surface.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionConfig {
    /// Gates the particle backdrop mount. The widget itself is opaque to the
    /// core; see [`crate::hero::HeroMotion::particles_enabled`].
    pub enable_particles: bool,
    /// Global scale applied to all parallax and pointer magnitudes.
    pub parallax_multiplier: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            enable_particles: true,
            parallax_multiplier: 1.0,
        }
    }
}

impl MotionConfig {
    /// Apply an env-style particles flag: unset keeps the default, the string
    /// "false" (any case) disables, anything else enables.
    pub fn with_particles_flag(mut self, value: Option<&str>) -> Self {
        if let Some(v) = value {
            self.enable_particles = !v.trim().eq_ignore_ascii_case("false");
        }
        self
    }

    pub fn with_parallax_multiplier(mut self, m: f32) -> Self {
        self.parallax_multiplier = m;
        self
    }
}
