use std::time::Duration;

use super::*;
use crate::model::{DesktopSnapshot, OpenWindowRequest, WindowId, WindowKind};

/// Wall-clock time shown in the taskbar tray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TaskbarClock {
    hours: u32,
    minutes: u32,
}

impl TaskbarClock {
    #[cfg(target_arch = "wasm32")]
    fn now() -> Self {
        let date = js_sys::Date::new_0();
        Self {
            hours: date.get_hours(),
            minutes: date.get_minutes(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now() -> Self {
        let secs = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        Self {
            hours: ((secs / 3600) % 24) as u32,
            minutes: ((secs / 60) % 60) as u32,
        }
    }

    fn label(self) -> String {
        let suffix = if self.hours < 12 { "AM" } else { "PM" };
        let hours = match self.hours % 12 {
            0 => 12,
            h => h,
        };
        format!("{hours}:{:02} {suffix}", self.minutes)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct TaskbarTab {
    id: WindowId,
    title: String,
    active: bool,
    minimized: bool,
}

/// One tab per open window in open order; minimized windows keep their tab.
fn taskbar_tabs(snapshot: &DesktopSnapshot) -> Vec<TaskbarTab> {
    snapshot
        .windows
        .iter()
        .map(|win| TaskbarTab {
            id: win.id.clone(),
            title: win.title.clone(),
            active: snapshot.active_window_id.as_ref() == Some(&win.id),
            minimized: win.minimized,
        })
        .collect()
}

fn taskbar_tab_class(tab: &TaskbarTab) -> &'static str {
    match (tab.active, tab.minimized) {
        (true, _) => "taskbar-app active",
        (false, true) => "taskbar-app minimized",
        (false, false) => "taskbar-app",
    }
}

fn start_menu_entries() -> [OpenWindowRequest; 3] {
    [
        crate::catalogue::Collection::All.open_request(),
        OpenWindowRequest::new(WindowId::about(), WindowKind::About, "About"),
        OpenWindowRequest::new(WindowId::settings(), WindowKind::Settings, "Settings"),
    ]
}

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let clock_now = create_rw_signal(TaskbarClock::now());
    let snapshot = create_memo(move |_| state.with(|desktop| desktop.snapshot()));

    if let Ok(interval) = set_interval_with_handle(
        move || clock_now.set(TaskbarClock::now()),
        Duration::from_secs(1),
    ) {
        on_cleanup(move || interval.clear());
    }

    let outside_click_listener = window_event_listener(ev::mousedown, move |_| {
        if runtime.state.get_untracked().start_menu_open {
            runtime.dispatch_action(DesktopAction::CloseStartMenu);
        }
    });
    on_cleanup(move || outside_click_listener.remove());

    view! {
        <footer
            class="taskbar"
            role="toolbar"
            aria-label="Desktop taskbar"
            on:mousedown=move |ev| ev.stop_propagation()
        >
            <div class="taskbar-left">
                <button
                    id="taskbar-start-button"
                    class="start-button"
                    aria-haspopup="menu"
                    aria-controls="desktop-start-menu"
                    aria-expanded=move || state.get().start_menu_open
                    on:click=move |_| runtime.dispatch_action(DesktopAction::ToggleStartMenu)
                >
                    <span>"Start"</span>
                </button>
            </div>

            <Show when=move || state.get().start_menu_open fallback=|| ()>
                <div id="desktop-start-menu" class="start-menu" role="menu">
                    <For
                        each=start_menu_entries
                        key=|request| request.id.clone()
                        let:request
                    >
                        {{
                            let label = request.title.clone();
                            let request = store_value(request);
                            view! {
                                <button
                                    class="start-menu-item"
                                    role="menuitem"
                                    on:click=move |_| {
                                        runtime.dispatch_action(DesktopAction::OpenWindow(request.get_value()));
                                    }
                                >
                                    {label}
                                </button>
                            }
                        }}
                    </For>
                </div>
            </Show>

            <div class="taskbar-windows" role="group" aria-label="Open windows">
                <For
                    each=move || taskbar_tabs(&snapshot.get())
                    key=|tab| (tab.id.clone(), tab.active, tab.minimized)
                    let:tab
                >
                    {{
                        let window_id = store_value(tab.id.clone());
                        view! {
                            <button
                                class=taskbar_tab_class(&tab)
                                aria-pressed=tab.active.to_string()
                                title=tab.title.clone()
                                on:click=move |_| {
                                    runtime.dispatch_action(DesktopAction::ToggleTaskbarWindow {
                                        window_id: window_id.get_value(),
                                    });
                                }
                            >
                                <span class="taskbar-app-label">{tab.title.clone()}</span>
                            </button>
                        }
                    }}
                </For>
            </div>

            <div class="taskbar-tray">
                <span class="taskbar-clock" aria-live="off">
                    {move || clock_now.get().label()}
                </span>
            </div>
        </footer>
    }
}
