use api::Gender;
use dioxus::prelude::*;

use crate::core::filter::AgeBounds;
use crate::t;

fn gender_label(gender: Gender) -> String {
    match gender {
        Gender::Male => t!("gender-male"),
        Gender::Female => t!("gender-female"),
        Gender::Both => t!("gender-both"),
    }
}

/// Segmented radio group over the three gender options.
#[component]
pub fn GenderSelector(current: Gender, on_change: EventHandler<Gender>) -> Element {
    rsx! {
        fieldset { class: "filter filter-gender",
            legend { class: "filter__label", {t!("filter-gender-label")} }
            div { class: "filter-gender__options",
                for gender in Gender::ALL {
                    label {
                        key: "{gender}",
                        class: if gender == current { "filter-gender__option filter-gender__option--active" } else { "filter-gender__option" },
                        input {
                            r#type: "radio",
                            name: "gender",
                            value: gender.as_str(),
                            checked: gender == current,
                            onchange: move |_| on_change.call(gender),
                        }
                        span { {gender_label(gender)} }
                    }
                }
            }
        }
    }
}

/// Two range handles over `bounds`. A handle dragged past the other one stops
/// at it, so the rendered value always moves with the input.
#[component]
pub fn AgeRangeSelector(
    bounds: AgeBounds,
    age_min: u32,
    age_max: u32,
    on_min: EventHandler<u32>,
    on_max: EventHandler<u32>,
) -> Element {
    let heading = t!("filter-age-label", min = age_min, max = age_max);

    rsx! {
        fieldset { class: "filter filter-age",
            legend { class: "filter__label", "{heading}" }
            div { class: "filter-age__sliders",
                label { class: "filter-age__handle",
                    span { class: "visually-hidden", {t!("filter-age-min")} }
                    input {
                        r#type: "range",
                        min: "{bounds.min}",
                        max: "{bounds.max}",
                        step: "1",
                        value: "{age_min}",
                        oninput: move |evt: FormEvent| {
                            if let Some(value) = parse_age(&evt.value())
                                .and_then(|v| min_handle_move(v, age_min, age_max))
                            {
                                on_min.call(value);
                            }
                        },
                    }
                }
                label { class: "filter-age__handle",
                    span { class: "visually-hidden", {t!("filter-age-max")} }
                    input {
                        r#type: "range",
                        min: "{bounds.min}",
                        max: "{bounds.max}",
                        step: "1",
                        value: "{age_max}",
                        oninput: move |evt: FormEvent| {
                            if let Some(value) = parse_age(&evt.value())
                                .and_then(|v| max_handle_move(v, age_min, age_max))
                            {
                                on_max.call(value);
                            }
                        },
                    }
                }
            }
        }
    }
}

fn parse_age(raw: &str) -> Option<u32> {
    raw.trim().parse::<f64>().ok().and_then(|v| {
        if v.is_finite() && v >= 0.0 {
            Some(v.round() as u32)
        } else {
            None
        }
    })
}

/// New minimum for a min-handle move, capped at `age_max`. `None` when the
/// minimum would not change.
fn min_handle_move(value: u32, age_min: u32, age_max: u32) -> Option<u32> {
    let value = value.min(age_max);
    (value != age_min).then_some(value)
}

fn max_handle_move(value: u32, age_min: u32, age_max: u32) -> Option<u32> {
    let value = value.max(age_min);
    (value != age_max).then_some(value)
}
