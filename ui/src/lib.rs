//! Shared UI crate for Cragstats: dashboard logic and the views every
//! platform launcher renders.

pub mod climbers;
pub mod core;
pub mod dashboard;
pub mod i18n;
pub mod views;

use dioxus::prelude::*;

/// Shared theme linked by every launcher.
pub const THEME_CSS: Asset = asset!("/assets/theme/main.css");

pub mod components {
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}

#[cfg(test)]
mod tests {
    mod i18n_completeness;

    #[test]
    fn theme_asset_resolves_to_stylesheet() {
        assert!(super::THEME_CSS.to_string().ends_with(".css"));
    }
}
