use dioxus::prelude::*;
use tracing::debug;

use api::StatsClient;

use crate::components::app_navbar::{nav_link, NavTarget};
use crate::core::config::DashboardConfig;
use crate::t;

const SOURCE_URL: &str = env!("CARGO_PKG_REPOSITORY");

#[component]
pub fn Home() -> Element {
    let _lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang_current = _lang_code
        .as_ref()
        .map(|s| s())
        .unwrap_or_else(|| "en-US".to_string());

    let config = use_hook(DashboardConfig::load);
    let docs_url = config.api_base.docs_url();

    let health = use_resource(move || {
        let client = StatsClient::new(config.api_base.clone());
        async move {
            let status = client.health().await;
            debug!(online = status.is_ok(), "api health check");
            status.is_ok()
        }
    });

    let (badge_class, badge_text) = match *health.read() {
        None => ("api-badge api-badge--checking", t!("home-api-checking")),
        Some(true) => ("api-badge api-badge--online", t!("home-api-online")),
        Some(false) => ("api-badge api-badge--offline", t!("home-api-offline")),
    };

    let dashboard = t!("home-link-dashboard");
    let climbers = t!("home-link-climbers");

    rsx! {
        div { style: "display:none", "{_lang_current}" }
        section { class: "page page-home",
            h1 { {t!("home-title")} }
            p { class: "page-home__intro", {t!("home-intro")} }

            span { class: "{badge_class}", role: "status", "{badge_text}" }

            div { class: "page-home__cta",
                if let Some(link) = nav_link(NavTarget::Dashboard, &dashboard) {
                    {link}
                }
                if let Some(link) = nav_link(NavTarget::Climbers, &climbers) {
                    {link}
                }
            }

            ul { class: "page-home__links",
                li {
                    a { href: "{docs_url}", target: "_blank", rel: "noopener", {t!("home-link-api")} }
                }
                li {
                    a { href: SOURCE_URL, target: "_blank", rel: "noopener", {t!("home-link-source")} }
                }
            }
        }
    }
}
