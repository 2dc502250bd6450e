use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::WindowManagerConfig;

/// Stable identity of an open window, derived from the content it shows.
///
/// Re-opening the same content yields the same id, which is what makes `OpenWindow` idempotent.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub String);

impl WindowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Window showing a catalogue collection (`"defi"`, `"all-projects"`, ...).
    pub fn for_collection(key: &str) -> Self {
        Self(key.to_string())
    }

    /// Window showing one catalogue item.
    pub fn for_item(item_id: &str) -> Self {
        Self(format!("item-{item_id}"))
    }

    pub fn about() -> Self {
        Self("about".to_string())
    }

    pub fn settings() -> Self {
        Self("settings".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Closed set of window content types. The window manager treats it as an opaque tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowKind {
    CollectionView,
    ItemDetail,
    About,
    Settings,
}

impl WindowKind {
    pub fn css_id(self) -> &'static str {
        match self {
            Self::CollectionView => "collection-view",
            Self::ItemDetail => "item-detail",
            Self::About => "about",
            Self::Settings => "settings",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Window rectangle in CSS pixels relative to the desktop origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub position: Point,
    pub size: Size,
}

impl WindowGeometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            position: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            position: Point::new(self.position.x + dx, self.position.y + dy),
            ..self
        }
    }

    pub fn clamped_min(self, min_width: f64, min_height: f64) -> Self {
        Self {
            size: Size::new(
                self.size.width.max(min_width),
                self.size.height.max(min_height),
            ),
            ..self
        }
    }

    pub fn css_style(&self) -> String {
        format!(
            "left:{}px;top:{}px;width:{}px;height:{}px;",
            self.position.x, self.position.y, self.size.width, self.size.height
        )
    }
}

/// Measured browser viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Layout rule set selected from the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Breakpoint {
    Compact,
    Desktop,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub kind: WindowKind,
    pub title: String,
    /// Forwarded untouched to the content renderer.
    pub payload: Value,
    /// Authoritative only while not maximized and in the desktop breakpoint.
    pub geometry: WindowGeometry,
    /// Pre-maximize geometry; `Some` iff `maximized`.
    pub saved_geometry: Option<WindowGeometry>,
    pub minimized: bool,
    pub maximized: bool,
    pub z_index: u32,
}

/// The single owned session aggregate mutated by [`crate::reducer::reduce_desktop`].
#[derive(Debug, Clone, PartialEq)]
pub struct DesktopState {
    /// Open windows in open order.
    pub windows: Vec<WindowRecord>,
    pub active_window_id: Option<WindowId>,
    /// `None` until the host has measured the viewport.
    pub viewport: Option<Viewport>,
    pub config: WindowManagerConfig,
    /// Cascade slot for the next newly opened window.
    pub cascade_index: u32,
    pub next_z_index: u32,
    pub start_menu_open: bool,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self::with_config(WindowManagerConfig::default())
    }
}

impl DesktopState {
    pub fn with_config(config: WindowManagerConfig) -> Self {
        Self {
            windows: Vec::new(),
            active_window_id: None,
            viewport: None,
            config,
            cascade_index: 0,
            next_z_index: 1,
            start_menu_open: false,
        }
    }

    pub fn window(&self, window_id: &WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| &w.id == window_id)
    }

    pub fn is_active(&self, window_id: &WindowId) -> bool {
        self.active_window_id.as_ref() == Some(window_id)
    }

    pub fn breakpoint(&self) -> Breakpoint {
        crate::window_manager::breakpoint_for(self.viewport, &self.config)
    }

    pub fn snapshot(&self) -> DesktopSnapshot {
        DesktopSnapshot {
            windows: self.windows.clone(),
            active_window_id: self.active_window_id.clone(),
            breakpoint: self.breakpoint(),
        }
    }
}

/// Read-only view of the session handed to the taskbar and other observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopSnapshot {
    pub windows: Vec<WindowRecord>,
    pub active_window_id: Option<WindowId>,
    pub breakpoint: Breakpoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenWindowRequest {
    pub id: WindowId,
    pub kind: WindowKind,
    pub title: String,
    pub payload: Value,
}

impl OpenWindowRequest {
    pub fn new(id: WindowId, kind: WindowKind, title: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            title: title.into(),
            payload: Value::Null,
        }
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureKind {
    Move,
    Resize(ResizeEdge),
}

/// An in-flight drag or resize. `proposal` is rendered but never committed until the gesture ends.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSession {
    pub window_id: WindowId,
    pub kind: GestureKind,
    pub pointer_start: PointerPosition,
    pub geometry_start: WindowGeometry,
    pub proposal: Option<WindowGeometry>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    pub gesture: Option<GestureSession>,
}

impl InteractionState {
    /// Uncommitted geometry to draw for `window_id` while a gesture is in flight.
    pub fn preview_for(&self, window_id: &WindowId) -> Option<WindowGeometry> {
        self.gesture
            .as_ref()
            .filter(|session| &session.window_id == window_id)
            .and_then(|session| session.proposal)
    }
}
