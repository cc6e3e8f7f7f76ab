/// Vision tuning parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VisionConfig {
    /// View radius given to observers whose data does not specify one.
    pub default_view_radius: u32,
    /// Upper bound applied to every observer's view radius. Keeps a single
    /// field-of-view pass bounded no matter what the stored data says.
    pub max_view_radius: u32,
}

impl VisionConfig {
    pub const DEFAULT_VIEW_RADIUS: u32 = 8;
    pub const DEFAULT_MAX_VIEW_RADIUS: u32 = 64;

    pub fn new() -> Self {
        Self {
            default_view_radius: Self::DEFAULT_VIEW_RADIUS,
            max_view_radius: Self::DEFAULT_MAX_VIEW_RADIUS,
        }
    }

    pub fn with_default_view_radius(mut self, radius: u32) -> Self {
        self.default_view_radius = radius;
        self
    }

    pub fn with_max_view_radius(mut self, radius: u32) -> Self {
        self.max_view_radius = radius;
        self
    }

    /// Clamps `radius` to `max_view_radius`.
    pub fn clamp_radius(&self, radius: u32) -> u32 {
        radius.min(self.max_view_radius)
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self::new()
    }
}
