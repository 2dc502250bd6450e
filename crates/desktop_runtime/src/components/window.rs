use super::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use crate::{
    apps,
    host::window_content_dom_id,
    model::{GestureKind, ResizeEdge, WindowId},
    window_manager::{self, EffectiveLayout, LayoutMode},
};

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

fn resize_edge_class(edge: ResizeEdge) -> &'static str {
    match edge {
        ResizeEdge::North => "edge-n",
        ResizeEdge::South => "edge-s",
        ResizeEdge::East => "edge-e",
        ResizeEdge::West => "edge-w",
        ResizeEdge::NorthEast => "edge-ne",
        ResizeEdge::NorthWest => "edge-nw",
        ResizeEdge::SouthEast => "edge-se",
        ResizeEdge::SouthWest => "edge-sw",
    }
}

fn layout_class(mode: LayoutMode) -> &'static str {
    match mode {
        LayoutMode::Compact => " compact",
        LayoutMode::Maximized => " maximized",
        LayoutMode::Floating => "",
    }
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let window_id = store_value(window_id);

    let window = Signal::derive(move || {
        window_id.with_value(|id| runtime.state.with(|state| state.window(id).cloned()))
    });
    let is_active = Signal::derive(move || {
        window_id.with_value(|id| runtime.state.with(|state| state.is_active(id)))
    });
    // An in-flight proposal is drawn in place of the committed geometry.
    let layout = Signal::derive(move || -> Option<EffectiveLayout> {
        let interaction = runtime.interaction.get();
        runtime.state.with(|state| {
            window_id.with_value(|id| {
                state.window(id).map(|win| {
                    let geometry = interaction.preview_for(id).unwrap_or(win.geometry);
                    window_manager::effective_layout(
                        geometry,
                        win.maximized,
                        state.viewport,
                        &state.config,
                    )
                })
            })
        })
    });
    let interactive = Signal::derive(move || layout.get().is_some_and(|l| l.interactive));

    let focus = move |_| {
        if !is_active.get_untracked() {
            runtime.dispatch_action(DesktopAction::FocusWindow {
                window_id: window_id.get_value(),
            });
        }
    };
    let minimize = move || {
        runtime.dispatch_action(DesktopAction::MinimizeWindow {
            window_id: window_id.get_value(),
        })
    };
    let toggle_maximize = move || {
        runtime.dispatch_action(DesktopAction::ToggleMaximize {
            window_id: window_id.get_value(),
        })
    };
    let close = move || {
        runtime.dispatch_action(DesktopAction::CloseWindow {
            window_id: window_id.get_value(),
        })
    };
    let begin_move = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) || !interactive.get_untracked() {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        runtime.dispatch_action(DesktopAction::BeginGesture {
            window_id: window_id.get_value(),
            kind: GestureKind::Move,
            pointer: pointer_from_pointer_event(&ev),
        });
    };

    let Some((title, kind)) = window_id.with_value(|id| {
        runtime
            .state
            .with_untracked(|state| state.window(id).map(|w| (w.title.clone(), w.kind)))
    }) else {
        return ().into_view();
    };
    let maximized = Signal::derive(move || window.get().is_some_and(|w| w.maximized));
    let compact = Signal::derive(move || {
        layout
            .get()
            .is_some_and(|l| l.mode == LayoutMode::Compact)
    });
    let class_name = move || {
        let mode = layout.get().map_or(LayoutMode::Floating, |l| l.mode);
        let active = if is_active.get() { " active" } else { "" };
        format!(
            "desktop-window kind-{}{}{}",
            kind.css_id(),
            active,
            layout_class(mode)
        )
    };
    let style = move || match (layout.get(), window.get()) {
        (Some(layout), Some(win)) => {
            let placement = runtime.state.with(|state| layout.css_style(&state.config));
            format!("{placement}z-index:{};", win.z_index)
        }
        _ => String::new(),
    };

    view! {
        <Show when=move || window.get().is_some_and(|w| !w.minimized) fallback=|| ()>
            <section
                class=class_name
                style=style
                on:pointerdown=focus
                role="dialog"
                aria-label=title.clone()
            >
                <header
                    class="titlebar"
                    on:pointerdown=begin_move
                    on:dblclick=move |ev: web_sys::MouseEvent| {
                        stop_mouse_event(&ev);
                        if !compact.get_untracked() {
                            toggle_maximize();
                        }
                    }
                >
                    <div class="titlebar-title">
                        <span>{title.clone()}</span>
                    </div>
                    <div class="titlebar-controls">
                        <button
                            aria-label="Minimize window"
                            on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                            on:click=move |ev| {
                                stop_mouse_event(&ev);
                                minimize();
                            }
                        >
                            "_"
                        </button>
                        <button
                            aria-label=move || {
                                if maximized.get() { "Restore window" } else { "Maximize window" }
                            }
                            disabled=move || compact.get()
                            on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                            on:click=move |ev| {
                                stop_mouse_event(&ev);
                                toggle_maximize();
                            }
                        >
                            {move || if maximized.get() { "❐" } else { "□" }}
                        </button>
                        <button
                            aria-label="Close window"
                            on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                            on:click=move |ev| {
                                stop_mouse_event(&ev);
                                close();
                            }
                        >
                            "×"
                        </button>
                    </div>
                </header>
                <div class="window-body">
                    <WindowBody window_id=window_id.get_value() />
                </div>
                <Show when=move || interactive.get() fallback=|| ()>
                    <WindowResizeHandle window_id=window_id.get_value() edge=ResizeEdge::North />
                    <WindowResizeHandle window_id=window_id.get_value() edge=ResizeEdge::South />
                    <WindowResizeHandle window_id=window_id.get_value() edge=ResizeEdge::East />
                    <WindowResizeHandle window_id=window_id.get_value() edge=ResizeEdge::West />
                    <WindowResizeHandle window_id=window_id.get_value() edge=ResizeEdge::NorthEast />
                    <WindowResizeHandle window_id=window_id.get_value() edge=ResizeEdge::NorthWest />
                    <WindowResizeHandle window_id=window_id.get_value() edge=ResizeEdge::SouthEast />
                    <WindowResizeHandle window_id=window_id.get_value() edge=ResizeEdge::SouthWest />
                </Show>
            </section>
        </Show>
    }
    .into_view()
}

#[component]
fn WindowResizeHandle(window_id: WindowId, edge: ResizeEdge) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let window_id = store_value(window_id);
    let class_name = format!("window-resize-handle {}", resize_edge_class(edge));

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginGesture {
            window_id: window_id.get_value(),
            kind: GestureKind::Resize(edge),
            pointer: pointer_from_pointer_event(&ev),
        });
    };

    view! {
        <div
            class=class_name
            aria-hidden="true"
            on:pointerdown=on_pointerdown
        />
    }
}

/// Mounts window content once; the renderer only ever sees the window's kind and payload.
#[component]
fn WindowBody(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let contents = runtime
        .state
        .with_untracked(|state| {
            state
                .window(&window_id)
                .map(|w| apps::mount_window_content(w.kind, &w.payload))
        })
        .unwrap_or_else(|| view! { <p>"Closed"</p> }.into_view());

    view! {
        <div id=window_content_dom_id(&window_id) class="window-body-content" tabindex="-1">
            {contents}
        </div>
    }
}
