//! Window content renderers keyed by [`WindowKind`].
//!
//! The window manager never looks inside a payload; only the renderer chosen here does.

use leptos::*;
use serde_json::Value;

use crate::{
    catalogue::{self, CatalogueItem, Collection},
    components::use_desktop_runtime,
    model::{Breakpoint, WindowKind},
    reducer::DesktopAction,
};

fn payload_str<'a>(payload: &'a Value, key: &str) -> Option<&'a str> {
    payload.get(key).and_then(Value::as_str)
}

/// Mounts the content view for a window of `kind` with its opaque `payload`.
pub fn mount_window_content(kind: WindowKind, payload: &Value) -> View {
    match kind {
        WindowKind::CollectionView => {
            let collection = payload_str(payload, "collection").and_then(Collection::from_key);
            match collection {
                Some(collection) => view! { <CollectionPane collection=collection /> }.into_view(),
                None => missing_content("Unknown collection"),
            }
        }
        WindowKind::ItemDetail => match payload_str(payload, "item_id").and_then(catalogue::find_item)
        {
            Some(item) => view! { <ItemDetailPane item=item /> }.into_view(),
            None => missing_content("This project is no longer listed."),
        },
        WindowKind::About => view! { <AboutPane /> }.into_view(),
        WindowKind::Settings => view! { <SettingsPane /> }.into_view(),
    }
}

fn missing_content(message: &'static str) -> View {
    view! {
        <div class="app-shell app-missing">
            <p>{message}</p>
        </div>
    }
    .into_view()
}

#[component]
fn CollectionPane(collection: Collection) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let items = catalogue::items_in_collection(catalogue::builtin_catalogue(), collection);
    let count = items.len();

    view! {
        <div class="app-shell app-collection">
            <ul class="collection-grid" role="list">
                {items
                    .into_iter()
                    .map(|item| {
                        let request = store_value(catalogue::item_open_request(item));
                        view! {
                            <li>
                                <button
                                    class="collection-entry"
                                    title=item.description.clone()
                                    on:click=move |_| {
                                        runtime.dispatch_action(DesktopAction::OpenWindow(request.get_value()));
                                    }
                                >
                                    <span class="collection-entry-name">{item.name.clone()}</span>
                                    <span class="collection-entry-category">{item.category.clone()}</span>
                                </button>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <div class="app-statusbar">
                <span>{format!("{count} object(s)")}</span>
            </div>
        </div>
    }
}

#[component]
fn ItemDetailPane(item: &'static CatalogueItem) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let description = if item.description.trim().is_empty() {
        "No description available.".to_string()
    } else {
        item.description.clone()
    };

    view! {
        <div class="app-shell app-item-detail">
            <header class="item-detail-header">
                <h1>{item.name.clone()}</h1>
                <span class="item-detail-badge">{item.category.clone()}</span>
            </header>
            <p class="item-detail-description">{description}</p>
            <ul class="item-detail-tags" role="list">
                {item
                    .tags
                    .iter()
                    .map(|tag| view! { <li class="item-detail-tag">{tag.clone()}</li> })
                    .collect_view()}
            </ul>
            <div class="item-detail-links" role="group" aria-label="Project links">
                {item
                    .links
                    .iter()
                    .map(|link| {
                        let url = store_value(link.url.clone());
                        view! {
                            <button
                                class="app-action"
                                title=link.url.clone()
                                on:click=move |_| {
                                    runtime.dispatch_action(DesktopAction::OpenExternalUrl {
                                        url: url.get_value(),
                                    });
                                }
                            >
                                {link.label.clone()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
fn AboutPane() -> impl IntoView {
    let total = catalogue::builtin_catalogue().len();

    view! {
        <div class="app-shell app-about">
            <h1>"MONAD"</h1>
            <p>
                "A retro desktop for browsing the ecosystem catalogue. Open a folder on the desktop "
                "to list its projects, then open a project for details and links."
            </p>
            <p class="app-about-stat">{format!("{total} projects catalogued")}</p>
        </div>
    }
}

#[component]
fn SettingsPane() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let layout_label = move || match state.with(|desktop| desktop.breakpoint()) {
        Breakpoint::Compact => "Compact (full screen windows)",
        Breakpoint::Desktop => "Desktop (floating windows)",
    };
    let viewport_label = move || {
        state.with(|desktop| match desktop.viewport {
            Some(viewport) => format!("{} x {}", viewport.width, viewport.height),
            None => "Not measured".to_string(),
        })
    };
    let window_count = move || state.with(|desktop| desktop.windows.len());

    view! {
        <div class="app-shell app-settings">
            <dl class="settings-list">
                <dt>"Layout"</dt>
                <dd>{layout_label}</dd>
                <dt>"Viewport"</dt>
                <dd>{viewport_label}</dd>
                <dt>"Open windows"</dt>
                <dd>{window_count}</dd>
            </dl>
        </div>
    }
}
