use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::core::config;
use ui::views::{Climbers, Dashboard, Home};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Home {},
    #[route("/dashboard")]
    Dashboard {},
    #[route("/climbers")]
    Climbers {},
}

const FAVICON: Asset = asset!("/assets/favicon.svg");

fn nav_home(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Home {},
        "{label}"
    })
}
fn nav_dashboard(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Dashboard {},
        "{label}"
    })
}
fn nav_climbers(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Climbers {},
        "{label}"
    })
}

fn main() {
    if let Err(err) = dioxus::logger::init(config::log_level()) {
        eprintln!("logger already initialised: {err}");
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting cragstats web");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();
    register_nav(NavBuilder {
        home: nav_home,
        dashboard: nav_dashboard,
        climbers: nav_climbers,
    });

    // Shared language code; AppNavbar writes it, pages read it to re-render.
    let lang_code = use_signal(ui::i18n::current_language);
    use_context_provider(|| lang_code);

    rsx! {
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: ui::THEME_CSS }

        Router::<Route> {}
    }
}

#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar { }
        Outlet::<Route> {}
    }
}
