use std::collections::HashMap;

use api::MetricId;
use dioxus::prelude::*;

use crate::core::format;
use crate::core::present::{ChartSeries, SeriesStatus, EXPERIENCE_BUCKETS};
use crate::i18n;
use crate::t;

use super::geometry::{self, Extent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Pie,
    Bar,
    Scatter,
}

impl ChartKind {
    pub fn for_metric(metric: MetricId) -> Self {
        match metric {
            MetricId::GenderPie | MetricId::ExperiencePie | MetricId::CountryPie => ChartKind::Pie,
            MetricId::GenderBar => ChartKind::Bar,
            MetricId::AgeGradeScatter => ChartKind::Scatter,
        }
    }
}

fn title(metric: MetricId) -> String {
    match metric {
        MetricId::GenderPie => t!("chart-gender-title"),
        MetricId::ExperiencePie => t!("chart-experience-title"),
        MetricId::CountryPie => t!("chart-country-title"),
        MetricId::GenderBar => t!("chart-gender-bar-title"),
        MetricId::AgeGradeScatter => t!("chart-scatter-title"),
    }
}

/// Localized category label. Country codes and unknown experience buckets
/// are shown as-is.
fn category_label(metric: MetricId, raw: &str) -> String {
    match metric {
        MetricId::GenderPie | MetricId::GenderBar => i18n::tr(&format!("gender-{raw}")),
        MetricId::ExperiencePie if EXPERIENCE_BUCKETS.contains(&raw) => {
            let mut args = HashMap::new();
            args.insert("range", raw.to_string());
            i18n::tr_args("experience-bucket", args)
        }
        _ => raw.to_string(),
    }
}

#[component]
pub fn ChartCard(metric: MetricId, series: ChartSeries) -> Element {
    let kind = ChartKind::for_metric(metric);
    let status_class = match series.status {
        SeriesStatus::Idle => "idle",
        SeriesStatus::Loading => "loading",
        SeriesStatus::Ready => "ready",
        SeriesStatus::Failed => "failed",
    };

    let body = match series.status {
        SeriesStatus::Idle => rsx! { p { class: "chart-card__placeholder", {t!("chart-idle")} } },
        SeriesStatus::Loading => rsx! {
            div { class: "chart-card__placeholder chart-card__placeholder--loading",
                span { class: "chart-card__spinner", aria_hidden: "true" }
                {t!("chart-loading")}
            }
        },
        SeriesStatus::Failed => rsx! {
            p { class: "chart-card__placeholder chart-card__placeholder--error", role: "alert",
                {t!("chart-failed")}
            }
        },
        SeriesStatus::Ready if series.data.is_empty() => {
            rsx! { p { class: "chart-card__placeholder", {t!("chart-empty")} } }
        }
        SeriesStatus::Ready => match kind {
            ChartKind::Pie => rsx! { PieChart { metric, series: series.clone() } },
            ChartKind::Bar => rsx! { BarChart { metric, series: series.clone() } },
            ChartKind::Scatter => rsx! { ScatterChart { series: series.clone() } },
        },
    };

    rsx! {
        article {
            class: "chart-card chart-card--{status_class}",
            "data-metric": metric.key(),
            h3 { class: "chart-card__title", {title(metric)} }
            div { class: "chart-card__body", {body} }
        }
    }
}

#[component]
fn PieChart(metric: MetricId, series: ChartSeries) -> Element {
    let values = series.values();
    let total: u64 = values.iter().sum();
    let slices = geometry::pie_slices(values, 100.0, 100.0, 90.0);

    let legend = series
        .labels()
        .iter()
        .zip(values.iter())
        .enumerate()
        .map(|(i, (label, count))| {
            let share = if total > 0 {
                *count as f64 / total as f64
            } else {
                f64::NAN
            };
            (
                i,
                format!("background:{}", geometry::color(i)),
                category_label(metric, label),
                format::format_count(*count),
                format::format_percent(share),
            )
        })
        .collect::<Vec<_>>();

    rsx! {
        div { class: "chart-pie",
            svg {
                class: "chart-pie__svg",
                view_box: "0 0 200 200",
                "role": "img",
                for slice in slices {
                    path {
                        key: "{slice.index}",
                        d: "{slice.path}",
                        fill: geometry::color(slice.index),
                    }
                }
            }
            ul { class: "chart-legend",
                for (i, swatch, label, count, share) in legend {
                    li { key: "{i}", class: "chart-legend__item",
                        span { class: "chart-legend__swatch", style: swatch }
                        span { class: "chart-legend__label", "{label}" }
                        span { class: "chart-legend__value", "{count} · {share}" }
                    }
                }
            }
        }
    }
}

struct Column {
    index: usize,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    center: f64,
    value_y: f64,
    label: String,
    count: String,
}

const BAR_WIDTH: f64 = 300.0;
const BAR_HEIGHT: f64 = 160.0;

#[component]
fn BarChart(metric: MetricId, series: ChartSeries) -> Element {
    let values = series.values();
    let laid = geometry::bars(values, BAR_WIDTH, BAR_HEIGHT, 24.0);
    let columns = laid
        .into_iter()
        .zip(series.labels().iter().zip(values.iter()))
        .enumerate()
        .map(|(i, (bar, (label, count)))| Column {
            index: i,
            x: bar.x,
            y: bar.y,
            width: bar.width,
            height: bar.height,
            center: bar.x + bar.width / 2.0,
            value_y: bar.y - 4.0,
            label: category_label(metric, label),
            count: format::format_count(*count),
        })
        .collect::<Vec<_>>();

    let view_box = format!("0 -16 {BAR_WIDTH} {}", BAR_HEIGHT + 40.0);
    let label_y = BAR_HEIGHT + 18.0;

    rsx! {
        svg {
            class: "chart-bar",
            view_box: "{view_box}",
            "role": "img",
            line {
                class: "chart-axis",
                x1: "0",
                y1: "{BAR_HEIGHT}",
                x2: "{BAR_WIDTH}",
                y2: "{BAR_HEIGHT}",
            }
            for col in columns {
                g { key: "{col.index}",
                    rect {
                        x: "{col.x}",
                        y: "{col.y}",
                        width: "{col.width}",
                        height: "{col.height}",
                        rx: "4",
                        fill: geometry::color(col.index),
                    }
                    text {
                        class: "chart-bar__value",
                        x: "{col.center}",
                        y: "{col.value_y}",
                        text_anchor: "middle",
                        "{col.count}"
                    }
                    text {
                        class: "chart-bar__label",
                        x: "{col.center}",
                        y: "{label_y}",
                        text_anchor: "middle",
                        "{col.label}"
                    }
                }
            }
        }
    }
}

const PLOT_WIDTH: f64 = 280.0;
const PLOT_HEIGHT: f64 = 180.0;
const PLOT_MARGIN: f64 = 36.0;

#[component]
fn ScatterChart(series: ChartSeries) -> Element {
    let points = series.points();
    let projected = geometry::scatter(points, PLOT_WIDTH, PLOT_HEIGHT);
    let ages = Extent::of(points.iter().map(|p| p.0));
    let grades = Extent::of(points.iter().map(|p| p.1));
    let (age_lo, age_hi) = ages
        .map(|e| (format::format_number(e.min, 0), format::format_number(e.max, 0)))
        .unwrap_or_default();
    let (grade_lo, grade_hi) = grades
        .map(|e| (format::format_number(e.min, 1), format::format_number(e.max, 1)))
        .unwrap_or_default();
    let x_label = t!("chart-scatter-x");
    let y_label = t!("chart-scatter-y");

    let view_box = format!(
        "0 0 {} {}",
        PLOT_WIDTH + PLOT_MARGIN * 1.5,
        PLOT_HEIGHT + PLOT_MARGIN * 1.5
    );
    let frame = format!("translate({PLOT_MARGIN}, {})", PLOT_MARGIN / 2.0);
    let tick_y = PLOT_HEIGHT + 14.0;
    let axis_label_y = PLOT_HEIGHT + 30.0;
    let mid_x = PLOT_WIDTH / 2.0;
    let mid_y = -PLOT_HEIGHT / 2.0;

    rsx! {
        svg {
            class: "chart-scatter",
            view_box: "{view_box}",
            "role": "img",
            g { transform: "{frame}",
                line { class: "chart-axis", x1: "0", y1: "{PLOT_HEIGHT}", x2: "{PLOT_WIDTH}", y2: "{PLOT_HEIGHT}" }
                line { class: "chart-axis", x1: "0", y1: "0", x2: "0", y2: "{PLOT_HEIGHT}" }
                for (i, (x, y)) in projected.into_iter().enumerate() {
                    circle {
                        key: "{i}",
                        class: "chart-scatter__point",
                        cx: "{x}",
                        cy: "{y}",
                        r: "3",
                    }
                }
                text { class: "chart-tick", x: "0", y: "{tick_y}", "{age_lo}" }
                text { class: "chart-tick", x: "{PLOT_WIDTH}", y: "{tick_y}", text_anchor: "end", "{age_hi}" }
                text { class: "chart-tick", x: "-4", y: "{PLOT_HEIGHT}", text_anchor: "end", "{grade_lo}" }
                text { class: "chart-tick", x: "-4", y: "8", text_anchor: "end", "{grade_hi}" }
                text {
                    class: "chart-axis-label",
                    x: "{mid_x}",
                    y: "{axis_label_y}",
                    text_anchor: "middle",
                    "{x_label}"
                }
                text {
                    class: "chart-axis-label",
                    transform: "rotate(-90)",
                    x: "{mid_y}",
                    y: "-26",
                    text_anchor: "middle",
                    "{y_label}"
                }
            }
        }
    }
}
