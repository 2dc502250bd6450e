use desktop_runtime::{DesktopProvider, DesktopShell, WindowManagerConfig};
use leptos::*;
use leptos_meta::*;

const DESKTOP_CONFIG_TOML: &str = include_str!("../desktop.toml");

/// Window manager config bundled with the site, falling back to defaults if it does not parse.
pub fn desktop_config() -> WindowManagerConfig {
    match WindowManagerConfig::from_toml_str(DESKTOP_CONFIG_TOML) {
        Ok(config) => config,
        Err(err) => {
            logging::warn!("bundled desktop.toml rejected, using defaults: {err}");
            WindowManagerConfig::default()
        }
    }
}

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="MonadXP" />
        <Meta name="description" content="A retro desktop for browsing the ecosystem catalogue." />

        <main class="site-root">
            <DesktopEntry />
        </main>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    view! {
        <DesktopProvider config=desktop_config()>
            <DesktopShell />
        </DesktopProvider>
    }
}
