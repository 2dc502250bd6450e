//! Geometry and constraint rules shared by the session reducer and the window chrome.
//!
//! Everything here is pure: given the viewport, the breakpoint config, and a window's maximize
//! state, these functions decide the rectangle a window occupies and whether the user may drag or
//! resize it. Malformed measurements degrade to zero-area rectangles instead of failing.

use thiserror::Error;

use crate::config::WindowManagerConfig;
use crate::model::{
    Breakpoint, Point, ResizeEdge, Size, Viewport, WindowGeometry, WindowKind, WindowRecord,
};

/// Reasons a proposed geometry is refused. The caller keeps the last valid geometry instead.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("geometry contains a non-finite value")]
    NonFinite,
    #[error("geometry has a negative size")]
    NegativeSize,
    #[error("geometry has a negative position")]
    NegativePosition,
}

/// Which rule produced an [`EffectiveLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Compact,
    Maximized,
    Floating,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveLayout {
    pub geometry: WindowGeometry,
    pub mode: LayoutMode,
    /// Whether drag and resize gestures are permitted.
    pub interactive: bool,
    /// The viewport is unmeasured, so `geometry` is empty and the window fills the desktop
    /// through CSS insets instead.
    pub fill_viewport: bool,
}

impl EffectiveLayout {
    /// Inline CSS placing the window chrome.
    pub fn css_style(&self, config: &WindowManagerConfig) -> String {
        if self.fill_viewport {
            format!(
                "left:0px;top:0px;right:0px;bottom:{}px;",
                config.taskbar_height_px
            )
        } else {
            self.geometry.css_style()
        }
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Selects the layout rule set. An unmeasured viewport falls back to compact.
pub fn breakpoint_for(viewport: Option<Viewport>, config: &WindowManagerConfig) -> Breakpoint {
    match viewport {
        Some(viewport)
            if viewport.width.is_finite() && viewport.width >= config.compact_breakpoint_px =>
        {
            Breakpoint::Desktop
        }
        _ => Breakpoint::Compact,
    }
}

/// Area available to windows: the viewport pinned at the origin, minus the taskbar strip.
pub fn work_area(viewport: Option<Viewport>, config: &WindowManagerConfig) -> WindowGeometry {
    let Some(viewport) = viewport else {
        return WindowGeometry::default();
    };
    let width = non_negative(viewport.width);
    let height = non_negative(non_negative(viewport.height) - config.taskbar_height_px);
    WindowGeometry {
        position: Point::ORIGIN,
        size: Size::new(width, height),
    }
}

/// Floors width/height at the configured minimum.
pub fn clamp_min_size(geometry: WindowGeometry, config: &WindowManagerConfig) -> WindowGeometry {
    geometry.clamped_min(config.min_window_width, config.min_window_height)
}

/// Computes the rectangle a window is drawn at.
///
/// Compact overrides everything (including maximize). Maximized windows fill the work area.
/// Otherwise `geometry` is used as-is apart from the minimum-size floor.
pub fn effective_layout(
    geometry: WindowGeometry,
    maximized: bool,
    viewport: Option<Viewport>,
    config: &WindowManagerConfig,
) -> EffectiveLayout {
    match breakpoint_for(viewport, config) {
        Breakpoint::Compact => EffectiveLayout {
            geometry: work_area(viewport, config),
            mode: LayoutMode::Compact,
            interactive: false,
            fill_viewport: viewport.is_none(),
        },
        Breakpoint::Desktop if maximized => EffectiveLayout {
            geometry: work_area(viewport, config),
            mode: LayoutMode::Maximized,
            interactive: false,
            fill_viewport: false,
        },
        Breakpoint::Desktop => EffectiveLayout {
            geometry: clamp_min_size(geometry, config),
            mode: LayoutMode::Floating,
            interactive: true,
            fill_viewport: false,
        },
    }
}

pub fn layout_for_record(
    record: &WindowRecord,
    viewport: Option<Viewport>,
    config: &WindowManagerConfig,
) -> EffectiveLayout {
    effective_layout(record.geometry, record.maximized, viewport, config)
}

/// Position of the `index`-th window opened since the desktop was last empty.
///
/// Slots wrap every `cascade_wrap` windows so placement never walks off-screen.
pub fn cascade_position(index: u32, config: &WindowManagerConfig) -> Point {
    let slot = f64::from(index % config.cascade_wrap.max(1));
    Point::new(
        config.cascade_origin.x + config.cascade_step * slot,
        config.cascade_origin.y + config.cascade_step * slot,
    )
}

pub fn default_geometry(
    kind: WindowKind,
    cascade_index: u32,
    config: &WindowManagerConfig,
) -> WindowGeometry {
    WindowGeometry {
        position: cascade_position(cascade_index, config),
        size: config.default_sizes.for_kind(kind),
    }
}

/// Checks a user-proposed geometry before it can be committed.
pub fn validate_proposal(proposed: WindowGeometry) -> Result<WindowGeometry, GeometryError> {
    let WindowGeometry { position, size } = proposed;
    if ![position.x, position.y, size.width, size.height]
        .iter()
        .all(|value| value.is_finite())
    {
        return Err(GeometryError::NonFinite);
    }
    if size.width < 0.0 || size.height < 0.0 {
        return Err(GeometryError::NegativeSize);
    }
    if position.x < 0.0 || position.y < 0.0 {
        return Err(GeometryError::NegativePosition);
    }
    Ok(proposed)
}

fn finite_delta(dx: f64, dy: f64) -> Result<(), GeometryError> {
    if dx.is_finite() && dy.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::NonFinite)
    }
}

/// Title-bar drag: translate and keep the window inside the work area.
pub fn move_geometry(
    start: WindowGeometry,
    dx: f64,
    dy: f64,
    viewport: Option<Viewport>,
    config: &WindowManagerConfig,
) -> Result<WindowGeometry, GeometryError> {
    finite_delta(dx, dy)?;
    let area = work_area(viewport, config);
    let moved = start.offset(dx, dy);
    let max_x = non_negative(area.size.width - moved.size.width);
    let max_y = non_negative(area.size.height - moved.size.height);
    Ok(WindowGeometry {
        position: Point::new(
            moved.position.x.clamp(0.0, max_x),
            moved.position.y.clamp(0.0, max_y),
        ),
        ..moved
    })
}

/// Edge/corner resize. The opposite edge stays anchored when the minimum size is reached, and
/// west/north edges cannot be dragged past the desktop origin.
///
/// Non-finite deltas are refused up front: `f64::max` would otherwise swallow a NaN and yield a
/// plausible rectangle.
pub fn resize_geometry(
    start: WindowGeometry,
    edge: ResizeEdge,
    dx: f64,
    dy: f64,
    config: &WindowManagerConfig,
) -> Result<WindowGeometry, GeometryError> {
    finite_delta(dx, dy)?;
    let west = matches!(
        edge,
        ResizeEdge::West | ResizeEdge::NorthWest | ResizeEdge::SouthWest
    );
    let east = matches!(
        edge,
        ResizeEdge::East | ResizeEdge::NorthEast | ResizeEdge::SouthEast
    );
    let north = matches!(
        edge,
        ResizeEdge::North | ResizeEdge::NorthEast | ResizeEdge::NorthWest
    );
    let south = matches!(
        edge,
        ResizeEdge::South | ResizeEdge::SouthEast | ResizeEdge::SouthWest
    );

    let mut next = start;
    if east {
        next.size.width = (start.size.width + dx).max(config.min_window_width);
    }
    if west {
        let dx = dx.max(-start.position.x);
        let width = (start.size.width - dx).max(config.min_window_width);
        next.position.x = start.position.x + start.size.width - width;
        next.size.width = width;
    }
    if south {
        next.size.height = (start.size.height + dy).max(config.min_window_height);
    }
    if north {
        let dy = dy.max(-start.position.y);
        let height = (start.size.height - dy).max(config.min_window_height);
        next.position.y = start.position.y + start.size.height - height;
        next.size.height = height;
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn desktop() -> Option<Viewport> {
        Some(Viewport::new(1280.0, 800.0))
    }

    fn phone() -> Option<Viewport> {
        Some(Viewport::new(390.0, 844.0))
    }

    #[test]
    fn breakpoint_threshold_and_unmeasured_viewport() {
        let config = WindowManagerConfig::default();
        assert_eq!(breakpoint_for(desktop(), &config), Breakpoint::Desktop);
        assert_eq!(breakpoint_for(phone(), &config), Breakpoint::Compact);
        assert_eq!(
            breakpoint_for(Some(Viewport::new(768.0, 600.0)), &config),
            Breakpoint::Desktop
        );
        assert_eq!(breakpoint_for(None, &config), Breakpoint::Compact);
        assert_eq!(
            breakpoint_for(Some(Viewport::new(f64::NAN, 600.0)), &config),
            Breakpoint::Compact
        );
    }

    #[test]
    fn work_area_reserves_taskbar_and_clamps_negative_dimensions() {
        let config = WindowManagerConfig::default();
        assert_eq!(
            work_area(desktop(), &config),
            WindowGeometry::new(0.0, 0.0, 1280.0, 760.0)
        );
        assert_eq!(
            work_area(Some(Viewport::new(-20.0, 10.0)), &config),
            WindowGeometry::new(0.0, 0.0, 0.0, 0.0)
        );
        assert_eq!(work_area(None, &config), WindowGeometry::default());
    }

    #[test]
    fn compact_layout_overrides_maximize_and_disables_gestures() {
        let config = WindowManagerConfig::default();
        let geometry = WindowGeometry::new(120.0, 90.0, 500.0, 400.0);

        for maximized in [false, true] {
            let layout = effective_layout(geometry, maximized, phone(), &config);
            assert_eq!(layout.mode, LayoutMode::Compact);
            assert!(!layout.interactive);
            assert_eq!(
                layout.geometry,
                WindowGeometry::new(0.0, 0.0, 390.0, 804.0)
            );
        }
    }

    #[test]
    fn desktop_layout_uses_record_geometry_or_work_area() {
        let config = WindowManagerConfig::default();
        let geometry = WindowGeometry::new(120.0, 90.0, 500.0, 400.0);

        let floating = effective_layout(geometry, false, desktop(), &config);
        assert_eq!(floating.mode, LayoutMode::Floating);
        assert!(floating.interactive);
        assert_eq!(floating.geometry, geometry);

        let maximized = effective_layout(geometry, true, desktop(), &config);
        assert_eq!(maximized.mode, LayoutMode::Maximized);
        assert!(!maximized.interactive);
        assert_eq!(
            maximized.geometry,
            WindowGeometry::new(0.0, 0.0, 1280.0, 760.0)
        );
    }

    #[test]
    fn min_size_floor_applies_only_when_floating() {
        let config = WindowManagerConfig::default();
        let tiny = WindowGeometry::new(10.0, 10.0, 40.0, 30.0);

        let floating = effective_layout(tiny, false, desktop(), &config);
        assert_eq!(floating.geometry.size, Size::new(300.0, 200.0));

        let small_viewport = Some(Viewport::new(800.0, 150.0));
        let maximized = effective_layout(tiny, true, small_viewport, &config);
        assert_eq!(maximized.geometry.size, Size::new(800.0, 110.0));
    }

    #[test]
    fn cascade_steps_diagonally_and_wraps() {
        let config = WindowManagerConfig::default();
        assert_eq!(cascade_position(0, &config), Point::new(50.0, 30.0));
        assert_eq!(cascade_position(1, &config), Point::new(80.0, 60.0));
        assert_eq!(cascade_position(9, &config), Point::new(320.0, 300.0));
        assert_eq!(cascade_position(10, &config), Point::new(50.0, 30.0));
    }

    #[test]
    fn default_geometry_uses_kind_size() {
        let config = WindowManagerConfig::default();
        assert_eq!(
            default_geometry(WindowKind::ItemDetail, 2, &config),
            WindowGeometry::new(110.0, 90.0, 400.0, 500.0)
        );
        assert_eq!(
            default_geometry(WindowKind::About, 0, &config).size,
            Size::new(550.0, 600.0)
        );
    }

    #[test]
    fn validate_proposal_rejects_malformed_geometry() {
        assert_eq!(
            validate_proposal(WindowGeometry::new(f64::NAN, 0.0, 300.0, 200.0)),
            Err(GeometryError::NonFinite)
        );
        assert_eq!(
            validate_proposal(WindowGeometry::new(0.0, 0.0, f64::INFINITY, 200.0)),
            Err(GeometryError::NonFinite)
        );
        assert_eq!(
            validate_proposal(WindowGeometry::new(0.0, 0.0, -1.0, 200.0)),
            Err(GeometryError::NegativeSize)
        );
        assert_eq!(
            validate_proposal(WindowGeometry::new(-5.0, 0.0, 300.0, 200.0)),
            Err(GeometryError::NegativePosition)
        );
        let ok = WindowGeometry::new(5.0, 6.0, 300.0, 200.0);
        assert_eq!(validate_proposal(ok), Ok(ok));
    }

    #[test]
    fn move_keeps_window_inside_work_area() {
        let config = WindowManagerConfig::default();
        let start = WindowGeometry::new(100.0, 100.0, 400.0, 300.0);

        assert_eq!(
            move_geometry(start, 25.0, 40.0, desktop(), &config),
            Ok(WindowGeometry::new(125.0, 140.0, 400.0, 300.0))
        );
        assert_eq!(
            move_geometry(start, -500.0, -500.0, desktop(), &config).map(|g| g.position),
            Ok(Point::ORIGIN)
        );
        assert_eq!(
            move_geometry(start, 5000.0, 5000.0, desktop(), &config).map(|g| g.position),
            Ok(Point::new(880.0, 460.0))
        );
    }

    #[test]
    fn resize_anchors_opposite_edge_at_minimum_size() {
        let config = WindowManagerConfig::default();
        let start = WindowGeometry::new(100.0, 100.0, 400.0, 300.0);

        assert_eq!(
            resize_geometry(start, ResizeEdge::SouthEast, 50.0, 20.0, &config),
            Ok(WindowGeometry::new(100.0, 100.0, 450.0, 320.0))
        );
        assert_eq!(
            resize_geometry(start, ResizeEdge::West, 300.0, 0.0, &config),
            Ok(WindowGeometry::new(200.0, 100.0, 300.0, 300.0))
        );
        assert_eq!(
            resize_geometry(start, ResizeEdge::NorthWest, -250.0, -250.0, &config),
            Ok(WindowGeometry::new(0.0, 0.0, 500.0, 400.0))
        );
    }

    #[test]
    fn non_finite_deltas_are_refused_for_every_gesture() {
        let config = WindowManagerConfig::default();
        let start = WindowGeometry::new(100.0, 100.0, 400.0, 300.0);

        for edge in [ResizeEdge::NorthWest, ResizeEdge::SouthEast, ResizeEdge::West] {
            assert_eq!(
                resize_geometry(start, edge, f64::NAN, f64::NAN, &config),
                Err(GeometryError::NonFinite)
            );
        }
        assert_eq!(
            resize_geometry(start, ResizeEdge::North, 0.0, f64::INFINITY, &config),
            Err(GeometryError::NonFinite)
        );
        assert_eq!(
            move_geometry(start, f64::NAN, 0.0, desktop(), &config),
            Err(GeometryError::NonFinite)
        );
    }

    #[test]
    fn unmeasured_viewport_fills_the_desktop_above_the_taskbar() {
        let config = WindowManagerConfig::default();
        let geometry = WindowGeometry::new(120.0, 90.0, 500.0, 400.0);

        let layout = effective_layout(geometry, false, None, &config);
        assert_eq!(layout.mode, LayoutMode::Compact);
        assert!(layout.fill_viewport);
        assert_eq!(
            layout.css_style(&config),
            "left:0px;top:0px;right:0px;bottom:40px;"
        );

        let measured = effective_layout(geometry, false, phone(), &config);
        assert!(!measured.fill_viewport);
        assert_eq!(
            measured.css_style(&config),
            "left:0px;top:0px;width:390px;height:804px;"
        );
    }
}
