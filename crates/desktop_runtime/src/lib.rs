//! Catalogue desktop runtime: window manager, session reducer, and the leptos shell around them.

pub mod apps;
pub mod catalogue;
pub mod components;
pub mod config;
mod effect_executor;
pub mod host;
pub mod model;
pub mod reducer;
mod runtime_context;
pub mod window_manager;

pub use components::{DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use config::{ConfigError, WindowManagerConfig};
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
