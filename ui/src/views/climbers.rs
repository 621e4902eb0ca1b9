use dioxus::prelude::*;

use crate::climbers::ClimbersTable;

#[component]
pub fn Climbers() -> Element {
    let _lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang_marker = _lang_code.as_ref().map(|s| s()).unwrap_or_default();

    rsx! {
        div { style: "display:none", "{_lang_marker}" }
        section { class: "page page-climbers",
            h1 { {crate::t!("page-climbers-title")} }
            p { {crate::t!("page-climbers-intro")} }
            ClimbersTable {}
        }
    }
}
