//! Host-side helpers for executing reducer effects and querying browser environment state.
//!
//! Everything that touches `web_sys` lives here so the reducer and geometry layer stay pure and
//! testable off the browser.

use leptos::{ev, logging, on_cleanup, window_event_listener, Callable, Callback};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use crate::{
    model::{Viewport, WindowId},
    reducer::{DesktopAction, RuntimeEffect},
};

/// DOM id of a window's focusable content root.
pub fn window_content_dom_id(window_id: &WindowId) -> String {
    format!("desktop-window-content-{}", window_id.as_str())
}

#[derive(Debug, Clone, Copy, Default)]
/// Browser host hooks for the desktop runtime.
pub struct DesktopHostContext;

impl DesktopHostContext {
    /// Measures the browser viewport, or `None` when layout is not available yet.
    pub fn measure_viewport(&self) -> Option<Viewport> {
        #[cfg(target_arch = "wasm32")]
        {
            let window = web_sys::window()?;
            let width = window.inner_width().ok()?.as_f64()?;
            let height = window.inner_height().ok()?.as_f64()?;
            Some(Viewport::new(width, height))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            None
        }
    }

    /// Re-measures the viewport on every browser resize and feeds it to the reducer.
    pub fn install_viewport_tracking(&self, dispatch: Callback<DesktopAction>) {
        let host = *self;
        let listener = window_event_listener(ev::resize, move |_| {
            let viewport = host.measure_viewport();
            if viewport.is_none() {
                logging::warn!("viewport measurement unavailable; using compact layout");
            }
            dispatch.call(DesktopAction::ViewportResized { viewport });
        });
        on_cleanup(move || listener.remove());
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::FocusWindowInput(window_id) => self.focus_window_input(&window_id),
            RuntimeEffect::OpenExternalUrl(url) => self.open_external_url(&url),
        }
    }

    /// Moves keyboard focus into the window's content root.
    pub fn focus_window_input(&self, window_id: &WindowId) {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(document) = web_sys::window().and_then(|window| window.document()) else {
                return;
            };
            let Some(element) = document.get_element_by_id(&window_content_dom_id(window_id))
            else {
                return;
            };
            if let Ok(element) = element.dyn_into::<web_sys::HtmlElement>() {
                let _ = element.focus();
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = window_id;
    }

    /// Opens `url` in a new browser tab.
    pub fn open_external_url(&self, url: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(window) = web_sys::window() else {
                logging::warn!("open external url failed for `{url}`: no window");
                return;
            };
            if let Err(err) = window.open_with_url_and_target(url, "_blank") {
                logging::warn!("open external url failed for `{url}`: {err:?}");
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        logging::warn!("open external url `{url}` ignored outside the browser");
    }
}
