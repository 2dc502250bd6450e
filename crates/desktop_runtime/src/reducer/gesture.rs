//! Reducer helpers for two-phase drag and resize gestures.
//!
//! Pointer moves only update the proposal held in [`InteractionState`]; the window record is
//! written once, on commit, through the same path as `SetGeometry`. Cancelling drops the proposal
//! and the record keeps its pre-gesture geometry.

use super::{find_window, focus_window_internal, set_geometry_internal, ReducerError};
use crate::{
    model::{DesktopState, GestureKind, GestureSession, InteractionState, WindowId},
    reducer::DesktopAction,
    window_manager,
};

pub(super) fn reduce_gesture_action(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: &DesktopAction,
) -> Result<bool, ReducerError> {
    match action {
        DesktopAction::BeginGesture {
            window_id,
            kind,
            pointer,
        } => {
            let layout = window_manager::layout_for_record(
                find_window(&state.windows, window_id)?,
                state.viewport,
                &state.config,
            );
            focus_window_internal(state, window_id)?;
            interaction.gesture = layout.interactive.then(|| GestureSession {
                window_id: window_id.clone(),
                kind: *kind,
                pointer_start: *pointer,
                geometry_start: layout.geometry,
                proposal: None,
            });
        }
        DesktopAction::UpdateGesture { pointer } => {
            let Some(session) = interaction.gesture.as_mut() else {
                return Ok(true);
            };
            if find_window(&state.windows, &session.window_id).is_err() {
                let window_id = session.window_id.clone();
                interaction.gesture = None;
                return Err(ReducerError::WindowNotFound(window_id));
            }

            let dx = pointer.x - session.pointer_start.x;
            let dy = pointer.y - session.pointer_start.y;
            let proposal = match session.kind {
                GestureKind::Move => window_manager::move_geometry(
                    session.geometry_start,
                    dx,
                    dy,
                    state.viewport,
                    &state.config,
                ),
                GestureKind::Resize(edge) => window_manager::resize_geometry(
                    session.geometry_start,
                    edge,
                    dx,
                    dy,
                    &state.config,
                ),
            };
            // A malformed frame keeps the previous proposal on screen.
            if let Ok(proposal) = proposal.and_then(window_manager::validate_proposal) {
                session.proposal = Some(proposal);
            }
        }
        DesktopAction::CommitGesture => {
            let Some(session) = interaction.gesture.take() else {
                return Ok(true);
            };
            if let Some(proposal) = session.proposal {
                set_geometry_internal(state, &session.window_id, proposal)?;
            }
        }
        DesktopAction::CancelGesture => {
            interaction.gesture = None;
        }
        _ => return Ok(false),
    }

    Ok(true)
}

/// Abandons the in-flight gesture if it targets `window_id`.
pub(super) fn cancel_for_window(interaction: &mut InteractionState, window_id: &WindowId) {
    if interaction
        .gesture
        .as_ref()
        .is_some_and(|session| &session.window_id == window_id)
    {
        interaction.gesture = None;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::model::{
        OpenWindowRequest, PointerPosition, ResizeEdge, Viewport, WindowGeometry, WindowKind,
    };
    use crate::reducer::reduce_desktop;

    use super::*;

    fn open_defi(state: &mut DesktopState, interaction: &mut InteractionState) -> WindowId {
        let window_id = WindowId::for_collection("defi");
        reduce_desktop(
            state,
            interaction,
            DesktopAction::OpenWindow(OpenWindowRequest::new(
                window_id.clone(),
                WindowKind::CollectionView,
                "DeFi",
            )),
        );
        window_id
    }

    fn desktop_state() -> DesktopState {
        let mut state = DesktopState::default();
        state.viewport = Some(Viewport::new(1280.0, 800.0));
        state
    }

    fn pointer(x: f64, y: f64) -> PointerPosition {
        PointerPosition { x, y }
    }

    fn drag(
        state: &mut DesktopState,
        interaction: &mut InteractionState,
        window_id: &WindowId,
        kind: GestureKind,
        to: PointerPosition,
    ) {
        reduce_desktop(
            state,
            interaction,
            DesktopAction::BeginGesture {
                window_id: window_id.clone(),
                kind,
                pointer: pointer(0.0, 0.0),
            },
        );
        reduce_desktop(
            state,
            interaction,
            DesktopAction::UpdateGesture {
                pointer: pointer(to.x / 2.0, to.y / 2.0),
            },
        );
        reduce_desktop(
            state,
            interaction,
            DesktopAction::UpdateGesture { pointer: to },
        );
    }

    #[test]
    fn proposals_are_not_committed_until_gesture_ends() {
        let mut state = desktop_state();
        let mut interaction = InteractionState::default();
        let win = open_defi(&mut state, &mut interaction);
        let original = state.window(&win).unwrap().geometry;

        drag(
            &mut state,
            &mut interaction,
            &win,
            GestureKind::Move,
            pointer(25.0, 40.0),
        );

        let expected = original.offset(25.0, 40.0);
        assert_eq!(state.window(&win).unwrap().geometry, original);
        assert_eq!(interaction.preview_for(&win), Some(expected));

        reduce_desktop(&mut state, &mut interaction, DesktopAction::CommitGesture);
        assert_eq!(state.window(&win).unwrap().geometry, expected);
        assert_eq!(interaction.gesture, None);
    }

    #[test]
    fn cancelled_gesture_reverts_to_pre_gesture_geometry() {
        let mut state = desktop_state();
        let mut interaction = InteractionState::default();
        let win = open_defi(&mut state, &mut interaction);
        let original = state.window(&win).unwrap().geometry;

        drag(
            &mut state,
            &mut interaction,
            &win,
            GestureKind::Resize(ResizeEdge::SouthEast),
            pointer(80.0, 60.0),
        );
        assert!(interaction.preview_for(&win).is_some());

        reduce_desktop(&mut state, &mut interaction, DesktopAction::CancelGesture);
        reduce_desktop(&mut state, &mut interaction, DesktopAction::CommitGesture);

        assert_eq!(state.window(&win).unwrap().geometry, original);
        assert_eq!(interaction.preview_for(&win), None);
    }

    #[test]
    fn resize_commit_applies_edge_arithmetic() {
        let mut state = desktop_state();
        let mut interaction = InteractionState::default();
        let win = open_defi(&mut state, &mut interaction);

        drag(
            &mut state,
            &mut interaction,
            &win,
            GestureKind::Resize(ResizeEdge::SouthEast),
            pointer(80.0, 60.0),
        );
        reduce_desktop(&mut state, &mut interaction, DesktopAction::CommitGesture);

        assert_eq!(
            state.window(&win).unwrap().geometry,
            WindowGeometry::new(50.0, 30.0, 720.0, 540.0)
        );
    }

    #[test]
    fn gestures_do_not_start_on_maximized_or_compact_windows() {
        let mut state = desktop_state();
        let mut interaction = InteractionState::default();
        let win = open_defi(&mut state, &mut interaction);

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleMaximize {
                window_id: win.clone(),
            },
        );
        drag(
            &mut state,
            &mut interaction,
            &win,
            GestureKind::Move,
            pointer(10.0, 10.0),
        );
        assert_eq!(interaction.gesture, None);

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleMaximize {
                window_id: win.clone(),
            },
        );
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ViewportResized {
                viewport: Some(Viewport::new(390.0, 844.0)),
            },
        );
        drag(
            &mut state,
            &mut interaction,
            &win,
            GestureKind::Move,
            pointer(10.0, 10.0),
        );
        assert_eq!(interaction.gesture, None);
    }

    #[test]
    fn closing_or_shrinking_viewport_abandons_gesture() {
        let mut state = desktop_state();
        let mut interaction = InteractionState::default();
        let win = open_defi(&mut state, &mut interaction);

        drag(
            &mut state,
            &mut interaction,
            &win,
            GestureKind::Move,
            pointer(10.0, 10.0),
        );
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ViewportResized {
                viewport: Some(Viewport::new(500.0, 800.0)),
            },
        );
        assert_eq!(interaction.gesture, None);

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ViewportResized {
                viewport: Some(Viewport::new(1280.0, 800.0)),
            },
        );
        drag(
            &mut state,
            &mut interaction,
            &win,
            GestureKind::Move,
            pointer(10.0, 10.0),
        );
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow {
                window_id: win.clone(),
            },
        );
        assert_eq!(interaction.gesture, None);
    }

    #[test]
    fn non_finite_pointer_keeps_previous_proposal() {
        let mut state = desktop_state();
        let mut interaction = InteractionState::default();
        let win = open_defi(&mut state, &mut interaction);

        drag(
            &mut state,
            &mut interaction,
            &win,
            GestureKind::Move,
            pointer(20.0, 20.0),
        );
        let last_good = interaction.preview_for(&win);
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateGesture {
                pointer: pointer(f64::NAN, 5.0),
            },
        );

        assert_eq!(interaction.preview_for(&win), last_good);
    }

    #[test]
    fn non_finite_resize_frames_never_reach_the_record() {
        for edge in [ResizeEdge::NorthWest, ResizeEdge::SouthEast] {
            let mut state = desktop_state();
            let mut interaction = InteractionState::default();
            let win = open_defi(&mut state, &mut interaction);
            let original = state.window(&win).unwrap().geometry;

            reduce_desktop(
                &mut state,
                &mut interaction,
                DesktopAction::BeginGesture {
                    window_id: win.clone(),
                    kind: GestureKind::Resize(edge),
                    pointer: pointer(0.0, 0.0),
                },
            );
            reduce_desktop(
                &mut state,
                &mut interaction,
                DesktopAction::UpdateGesture {
                    pointer: pointer(f64::NAN, f64::NAN),
                },
            );
            assert_eq!(interaction.preview_for(&win), None);

            reduce_desktop(&mut state, &mut interaction, DesktopAction::CommitGesture);
            assert_eq!(state.window(&win).unwrap().geometry, original);
        }
    }

    #[test]
    fn non_finite_resize_frame_keeps_previous_proposal() {
        let mut state = desktop_state();
        let mut interaction = InteractionState::default();
        let win = open_defi(&mut state, &mut interaction);

        drag(
            &mut state,
            &mut interaction,
            &win,
            GestureKind::Resize(ResizeEdge::NorthWest),
            pointer(-20.0, -10.0),
        );
        let last_good = interaction.preview_for(&win);
        assert_eq!(last_good, Some(WindowGeometry::new(30.0, 20.0, 660.0, 490.0)));

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateGesture {
                pointer: pointer(f64::NAN, 4.0),
            },
        );
        reduce_desktop(&mut state, &mut interaction, DesktopAction::CommitGesture);

        assert_eq!(state.window(&win).unwrap().geometry, last_good.unwrap());
    }
}
