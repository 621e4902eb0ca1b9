use dioxus::prelude::*;

use crate::dashboard::DashboardView;

#[component]
pub fn Dashboard() -> Element {
    // Re-render on locale changes made elsewhere in the app.
    let _lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang_marker = _lang_code.as_ref().map(|s| s()).unwrap_or_default();

    rsx! {
        div { style: "display:none", "{_lang_marker}" }
        section { class: "page page-dashboard",
            h1 { {crate::t!("page-dashboard-title")} }
            p { {crate::t!("page-dashboard-intro")} }
            DashboardView {}
        }
    }
}
