use serde::{Deserialize, Serialize};

/// Scales at or above this render one grid line per day.
pub const DAY_VIEW_MIN_SCALE: f32 = 30.0;
/// Scales at or above this (and below the day threshold) render a month grid.
pub const MONTH_VIEW_MIN_SCALE: f32 = 10.0;

/// Time unit of the timeline grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Day,
    Month,
    Quarter,
}

impl Granularity {
    pub fn label(self) -> &'static str {
        match self {
            Granularity::Day => "Day view",
            Granularity::Month => "Month view",
            Granularity::Quarter => "Quarter view",
        }
    }
}

/// Granularity for a given pixels-per-day scale.
pub fn granularity_for(scale: f32) -> Granularity {
    if scale >= DAY_VIEW_MIN_SCALE {
        Granularity::Day
    } else if scale >= MONTH_VIEW_MIN_SCALE {
        Granularity::Month
    } else {
        Granularity::Quarter
    }
}

/// Zoom limits, in pixels per day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub default: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min: 2.0,
            max: 200.0,
            step: 2.0,
            default: 50.0,
        }
    }
}

impl ZoomConfig {
    /// Whether the limits describe a usable, non-empty range.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.step.is_finite()
            && self.min > 0.0
            && self.max >= self.min
            && self.step > 0.0
    }
}

/// Owns the current scale and keeps it within the configured limits.
#[derive(Debug, Clone)]
pub struct ZoomController {
    config: ZoomConfig,
    scale: f32,
}

impl ZoomController {
    /// Create a controller at the configured default scale.
    ///
    /// Invalid limits fall back to [`ZoomConfig::default`].
    pub fn new(config: ZoomConfig) -> Self {
        let config = if config.is_valid() {
            config
        } else {
            ZoomConfig::default()
        };
        let mut zoom = Self {
            config,
            scale: config.min,
        };
        zoom.set_scale(config.default);
        zoom
    }

    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// Current pixels per day.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Clamp `requested` to the limits and snap it to the step grid.
    ///
    /// Non-finite requests are ignored. Returns the scale now in effect.
    pub fn set_scale(&mut self, requested: f32) -> f32 {
        if !requested.is_finite() {
            return self.scale;
        }
        let ZoomConfig { min, max, step, .. } = self.config;
        let clamped = requested.clamp(min, max);
        let snapped = min + ((clamped - min) / step).round() * step;
        self.scale = snapped.min(max);
        self.scale
    }

    pub fn zoom_in(&mut self) -> f32 {
        self.set_scale(self.scale + self.config.step)
    }

    pub fn zoom_out(&mut self) -> f32 {
        self.set_scale(self.scale - self.config.step)
    }

    pub fn can_zoom_in(&self) -> bool {
        self.scale < self.config.max
    }

    pub fn can_zoom_out(&self) -> bool {
        self.scale > self.config.min
    }

    pub fn reset(&mut self) -> f32 {
        self.set_scale(self.config.default)
    }

    pub fn granularity(&self) -> Granularity {
        granularity_for(self.scale)
    }
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}
