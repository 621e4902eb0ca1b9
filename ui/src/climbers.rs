//! Paged listing of raw climber profiles.

use api::{ClimberRecord, Page, StatsClient};
use dioxus::prelude::*;
use tracing::warn;

use crate::core::config::DashboardConfig;
use crate::core::format;
use crate::t;

#[component]
pub fn ClimbersTable() -> Element {
    let config = use_hook(DashboardConfig::load);
    let client = use_hook(|| StatsClient::new(config.api_base.clone()));
    let mut page = use_signal(|| Page::first(config.page_size));

    let rows = use_resource(move || {
        let client = client.clone();
        let page = page();
        async move {
            client.list_climbers(page).await.map_err(|err| {
                warn!(skip = page.skip, limit = page.limit, "climber listing failed: {err}");
                err.to_string()
            })
        }
    });

    let current = page();
    let has_previous = current.skip > 0;
    // A short page means the listing is exhausted.
    let has_next = matches!(&*rows.read(), Some(Ok(list)) if list.len() as u32 == current.limit);

    let body = match &*rows.read() {
        None => rsx! { p { class: "climbers__placeholder", {t!("climbers-loading")} } },
        Some(Err(err)) => rsx! {
            p { class: "climbers__placeholder climbers__placeholder--error", role: "alert",
                {t!("climbers-failed", error = err.clone())}
            }
        },
        Some(Ok(list)) if list.is_empty() => {
            rsx! { p { class: "climbers__placeholder", {t!("climbers-empty")} } }
        }
        Some(Ok(list)) => rsx! { ClimberRows { climbers: list.clone() } },
    };

    rsx! {
        div { class: "climbers",
            {body}
            nav { class: "climbers__pager",
                button {
                    r#type: "button",
                    disabled: !has_previous,
                    onclick: move |_| page.set(current.previous()),
                    {t!("climbers-prev")}
                }
                span { class: "climbers__page", {t!("climbers-page", page = current.number())} }
                button {
                    r#type: "button",
                    disabled: !has_next,
                    onclick: move |_| page.set(current.next()),
                    {t!("climbers-next")}
                }
            }
        }
    }
}

#[component]
fn ClimberRows(climbers: Vec<ClimberRecord>) -> Element {
    rsx! {
        table { class: "climbers__table",
            thead {
                tr {
                    th { {t!("climbers-col-id")} }
                    th { {t!("climbers-col-country")} }
                    th { {t!("climbers-col-sex")} }
                    th { {t!("climbers-col-age")} }
                    th { {t!("climbers-col-experience")} }
                    th { {t!("climbers-col-grade-max")} }
                    th { {t!("climbers-col-grade-mean")} }
                }
            }
            tbody {
                for climber in climbers {
                    tr { key: "{climber.climber_id}",
                        td { "{climber.climber_id}" }
                        td { "{climber.country}" }
                        td { {sex_label(climber.sex)} }
                        td { {format::format_number(climber.age, 0)} }
                        td { "{climber.years_cl}" }
                        td { "{climber.grades_max}" }
                        td { {format::format_number(climber.grades_mean, 1)} }
                    }
                }
            }
        }
    }
}

fn sex_label(code: i32) -> String {
    match code {
        0 => t!("gender-male"),
        1 => t!("gender-female"),
        other => other.to_string(),
    }
}
