//! Desktop shell UI composition and interaction surfaces.

mod taskbar;
mod window;

use leptos::*;

use self::{taskbar::Taskbar, window::DesktopWindow};

use crate::{
    catalogue::Collection,
    model::{Breakpoint, PointerPosition},
    reducer::DesktopAction,
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: f64::from(ev.client_x()),
        y: f64::from(ev.client_y()),
    }
}

fn breakpoint_css_id(breakpoint: Breakpoint) -> &'static str {
    match breakpoint {
        Breakpoint::Compact => "compact",
        Breakpoint::Desktop => "desktop",
    }
}

#[component]
/// Renders the full desktop shell UI: icons, windows, and taskbar.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        if runtime.interaction.get_untracked().gesture.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateGesture {
                pointer: pointer_from_pointer_event(&ev),
            });
        }
    };
    let on_pointer_up = move |_| {
        if runtime.interaction.get_untracked().gesture.is_some() {
            runtime.dispatch_action(DesktopAction::CommitGesture);
        }
    };
    let on_pointer_abandon = move |_| {
        if runtime.interaction.get_untracked().gesture.is_some() {
            runtime.dispatch_action(DesktopAction::CancelGesture);
        }
    };

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            tabindex="-1"
            data-breakpoint=move || breakpoint_css_id(state.get().breakpoint())
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_up
            on:pointercancel=on_pointer_abandon
            on:pointerleave=on_pointer_abandon
        >
            <div
                class="desktop-backdrop"
                on:mousedown=move |_| runtime.dispatch_action(DesktopAction::ClearFocus)
            />
            <nav class="desktop-icon-grid" aria-label="Collections">
                <For each=move || Collection::DESKTOP key=|collection| collection.key() let:collection>
                    <button
                        class="desktop-icon folder"
                        on:click=move |_| {
                            runtime.dispatch_action(DesktopAction::OpenWindow(collection.open_request()));
                        }
                    >
                        <span class="desktop-icon-glyph" aria-hidden="true"></span>
                        <span class="desktop-icon-label">{collection.label()}</span>
                    </button>
                </For>
            </nav>

            <div class="desktop-window-layer">
                <For
                    each=move || state.get().windows
                    key=|win| win.id.clone()
                    let:win
                >
                    <DesktopWindow window_id=win.id />
                </For>
            </div>

            <Taskbar />
        </div>
    }
}
