//! Window manager tuning constants and their TOML overrides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Point, Size, WindowKind};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid window manager config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("`{field}` must be a finite, non-negative number")]
    OutOfRange { field: &'static str },
    #[error("`cascade_wrap` must be at least 1")]
    ZeroCascadeWrap,
}

/// Default window sizes keyed by content kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultSizes {
    pub collection_view: Size,
    pub item_detail: Size,
    pub about: Size,
    pub settings: Size,
}

impl Default for DefaultSizes {
    fn default() -> Self {
        Self {
            collection_view: Size::new(640.0, 480.0),
            item_detail: Size::new(400.0, 500.0),
            about: Size::new(550.0, 600.0),
            settings: Size::new(640.0, 480.0),
        }
    }
}

impl DefaultSizes {
    pub fn for_kind(&self, kind: WindowKind) -> Size {
        match kind {
            WindowKind::CollectionView => self.collection_view,
            WindowKind::ItemDetail => self.item_detail,
            WindowKind::About => self.about,
            WindowKind::Settings => self.settings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowManagerConfig {
    /// Viewports narrower than this use the compact (fullscreen) layout.
    pub compact_breakpoint_px: f64,
    /// Strip reserved at the bottom of the viewport for the taskbar.
    pub taskbar_height_px: f64,
    pub cascade_origin: Point,
    pub cascade_step: f64,
    /// Number of cascade slots before placement wraps back to the origin.
    pub cascade_wrap: u32,
    pub min_window_width: f64,
    pub min_window_height: f64,
    pub default_sizes: DefaultSizes,
}

impl Default for WindowManagerConfig {
    fn default() -> Self {
        Self {
            compact_breakpoint_px: 768.0,
            taskbar_height_px: 40.0,
            cascade_origin: Point::new(50.0, 30.0),
            cascade_step: 30.0,
            cascade_wrap: 10,
            min_window_width: 300.0,
            min_window_height: 200.0,
            default_sizes: DefaultSizes::default(),
        }
    }
}

impl WindowManagerConfig {
    /// Parses a TOML override table; missing keys keep their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("compact_breakpoint_px", self.compact_breakpoint_px),
            ("taskbar_height_px", self.taskbar_height_px),
            ("cascade_step", self.cascade_step),
            ("min_window_width", self.min_window_width),
            ("min_window_height", self.min_window_height),
        ];
        for (field, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::OutOfRange { field });
            }
        }
        if self.cascade_wrap == 0 {
            return Err(ConfigError::ZeroCascadeWrap);
        }
        Ok(())
    }
}
