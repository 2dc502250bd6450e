//! Reducer actions, side-effect intents, and transition logic for the desktop session.

mod gesture;

use leptos::logging;
use thiserror::Error;

use crate::model::{
    Breakpoint, DesktopState, GestureKind, InteractionState, OpenWindowRequest, Point,
    PointerPosition, Size, Viewport, WindowGeometry, WindowId, WindowRecord,
};
use crate::window_manager::{self, GeometryError};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open a window, or focus/restore it if its id is already open.
    OpenWindow(OpenWindowRequest),
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Focus (and raise) a window, restoring it if minimized.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Blur every window (desktop background click).
    ClearFocus,
    /// Minimize a window.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Maximize a window, or restore it if already maximized.
    ToggleMaximize {
        /// Window to toggle.
        window_id: WindowId,
    },
    /// Commit a user-driven position/size.
    SetGeometry {
        /// Window to update.
        window_id: WindowId,
        /// New top-left corner.
        position: Point,
        /// New size.
        size: Size,
    },
    /// Taskbar button behavior: restore if minimized, minimize if focused, otherwise focus.
    ToggleTaskbarWindow {
        /// Window associated with the taskbar button.
        window_id: WindowId,
    },
    /// The browser viewport was measured or resized.
    ViewportResized {
        /// New viewport, or `None` if measurement is unavailable.
        viewport: Option<Viewport>,
    },
    /// Toggle the start menu open/closed.
    ToggleStartMenu,
    /// Close the start menu if open.
    CloseStartMenu,
    /// Begin dragging or resizing a window.
    BeginGesture {
        /// Window under the pointer.
        window_id: WindowId,
        /// Move or resize edge.
        kind: GestureKind,
        /// Pointer position at gesture start.
        pointer: PointerPosition,
    },
    /// Propose geometry for the in-flight gesture without committing it.
    UpdateGesture {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// Commit the last proposal of the in-flight gesture.
    CommitGesture,
    /// Abandon the in-flight gesture, keeping the pre-gesture geometry.
    CancelGesture,
    /// Open a catalogue link outside the desktop.
    OpenExternalUrl {
        /// Absolute URL.
        url: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the host to execute.
pub enum RuntimeEffect {
    /// Move keyboard focus into the newly focused window.
    FocusWindowInput(WindowId),
    /// Open an external URL in a new browser tab.
    OpenExternalUrl(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reasons an action was ignored. Never surfaced to the user.
pub enum ReducerError {
    /// The target window id is not open.
    #[error("window `{0}` not found")]
    WindowNotFound(WindowId),
    /// A proposed geometry was malformed and the last valid geometry was kept.
    #[error("geometry for window `{window_id}` rejected: {source}")]
    InvalidGeometry {
        /// Window the proposal targeted.
        window_id: WindowId,
        /// Validation failure.
        #[source]
        source: GeometryError,
    },
}

/// Applies a [`DesktopAction`] to the session and collects resulting side effects.
///
/// This function is the only mutation surface for window state. Actions that reference a window
/// which is no longer open are ignored: stale ids are expected from in-flight UI events and must
/// never break the session.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Vec<RuntimeEffect> {
    let mut effects = Vec::new();
    if let Err(err) = apply_action(state, interaction, action, &mut effects) {
        logging::debug_warn!("desktop action ignored: {err}");
    }
    normalize_focus(state);
    effects
}

fn apply_action(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    if gesture::reduce_gesture_action(state, interaction, &action)? {
        return Ok(());
    }

    match action {
        DesktopAction::OpenWindow(req) => {
            let window_id = req.id.clone();
            if find_window(&state.windows, &window_id).is_err() {
                let geometry =
                    window_manager::default_geometry(req.kind, state.cascade_index, &state.config);
                state.cascade_index = state.cascade_index.saturating_add(1);
                state.windows.push(WindowRecord {
                    id: req.id,
                    kind: req.kind,
                    title: req.title,
                    payload: req.payload,
                    geometry,
                    saved_geometry: None,
                    minimized: false,
                    maximized: false,
                    z_index: 0,
                });
            }
            focus_window_internal(state, &window_id)?;
            state.start_menu_open = false;
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
        DesktopAction::CloseWindow { window_id } => {
            let index = state
                .windows
                .iter()
                .position(|w| w.id == window_id)
                .ok_or_else(|| ReducerError::WindowNotFound(window_id.clone()))?;
            state.windows.remove(index);
            if state.is_active(&window_id) {
                state.active_window_id = None;
            }
            if state.windows.is_empty() {
                state.cascade_index = 0;
            }
            gesture::cancel_for_window(interaction, &window_id);
        }
        DesktopAction::FocusWindow { window_id } => {
            focus_window_internal(state, &window_id)?;
            state.start_menu_open = false;
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
        DesktopAction::ClearFocus => {
            state.active_window_id = None;
            state.start_menu_open = false;
        }
        DesktopAction::MinimizeWindow { window_id } => {
            minimize_window_internal(state, &window_id)?;
            gesture::cancel_for_window(interaction, &window_id);
        }
        DesktopAction::ToggleMaximize { window_id } => {
            // Maximize state is frozen while compact.
            if state.breakpoint() == Breakpoint::Compact {
                find_window(&state.windows, &window_id)?;
                return Ok(());
            }
            let window = find_window_mut(&mut state.windows, &window_id)?;
            if window.maximized {
                if let Some(saved) = window.saved_geometry.take() {
                    window.geometry = saved;
                }
                window.maximized = false;
            } else {
                if window.saved_geometry.is_none() {
                    window.saved_geometry = Some(window.geometry);
                }
                window.maximized = true;
            }
            focus_window_internal(state, &window_id)?;
            gesture::cancel_for_window(interaction, &window_id);
        }
        DesktopAction::SetGeometry {
            window_id,
            position,
            size,
        } => {
            set_geometry_internal(state, &window_id, WindowGeometry { position, size })?;
        }
        DesktopAction::ToggleTaskbarWindow { window_id } => {
            let minimized = find_window(&state.windows, &window_id)?.minimized;
            if minimized || !state.is_active(&window_id) {
                focus_window_internal(state, &window_id)?;
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            } else {
                minimize_window_internal(state, &window_id)?;
            }
        }
        DesktopAction::ViewportResized { viewport } => {
            state.viewport = viewport;
            if state.breakpoint() == Breakpoint::Compact {
                interaction.gesture = None;
            }
        }
        DesktopAction::ToggleStartMenu => {
            state.start_menu_open = !state.start_menu_open;
        }
        DesktopAction::CloseStartMenu => {
            state.start_menu_open = false;
        }
        DesktopAction::OpenExternalUrl { url } => {
            let url = url.trim();
            if !url.is_empty() {
                effects.push(RuntimeEffect::OpenExternalUrl(url.to_string()));
            }
        }
        DesktopAction::BeginGesture { .. }
        | DesktopAction::UpdateGesture { .. }
        | DesktopAction::CommitGesture
        | DesktopAction::CancelGesture => {}
    }

    Ok(())
}

fn find_window<'a>(
    windows: &'a [WindowRecord],
    window_id: &WindowId,
) -> Result<&'a WindowRecord, ReducerError> {
    windows
        .iter()
        .find(|w| &w.id == window_id)
        .ok_or_else(|| ReducerError::WindowNotFound(window_id.clone()))
}

fn find_window_mut<'a>(
    windows: &'a mut [WindowRecord],
    window_id: &WindowId,
) -> Result<&'a mut WindowRecord, ReducerError> {
    windows
        .iter_mut()
        .find(|w| &w.id == window_id)
        .ok_or_else(|| ReducerError::WindowNotFound(window_id.clone()))
}

fn focus_window_internal(
    state: &mut DesktopState,
    window_id: &WindowId,
) -> Result<(), ReducerError> {
    let top_z = state.next_z_index.saturating_sub(1);
    let window = find_window_mut(&mut state.windows, window_id)?;
    window.minimized = false;
    if window.z_index == 0 || window.z_index != top_z {
        window.z_index = state.next_z_index;
        state.next_z_index = state.next_z_index.saturating_add(1);
    }
    state.active_window_id = Some(window_id.clone());
    Ok(())
}

/// Minimizes `window_id`; if it held focus, focus passes to the most recently opened window that
/// is still visible.
fn minimize_window_internal(
    state: &mut DesktopState,
    window_id: &WindowId,
) -> Result<(), ReducerError> {
    find_window_mut(&mut state.windows, window_id)?.minimized = true;
    if state.is_active(window_id) {
        state.active_window_id = state
            .windows
            .iter()
            .rev()
            .find(|w| !w.minimized)
            .map(|w| w.id.clone());
    }
    Ok(())
}

/// Commits user geometry unless the layout is controller-forced (maximized or compact).
fn set_geometry_internal(
    state: &mut DesktopState,
    window_id: &WindowId,
    proposed: WindowGeometry,
) -> Result<(), ReducerError> {
    let compact = state.breakpoint() == Breakpoint::Compact;
    let window = find_window_mut(&mut state.windows, window_id)?;
    if window.maximized || compact {
        return Ok(());
    }
    let geometry = window_manager::validate_proposal(proposed).map_err(|source| {
        ReducerError::InvalidGeometry {
            window_id: window_id.clone(),
            source,
        }
    })?;
    window.geometry = window_manager::clamp_min_size(geometry, &state.config);
    Ok(())
}

/// Drops a focus pointer that no longer references an open, visible window.
fn normalize_focus(state: &mut DesktopState) {
    let valid = state
        .active_window_id
        .as_ref()
        .map(|id| state.windows.iter().any(|w| &w.id == id && !w.minimized))
        .unwrap_or(true);
    if !valid {
        state.active_window_id = None;
    }
}
