use std::cell::RefCell;
use std::rc::Rc;

use api::{DataFetcher, Gender, MetricId, MetricResult, StatsClient};
use dioxus::prelude::*;
use futures_channel::mpsc::UnboundedSender;
use futures_util::StreamExt;

use crate::core::config::DashboardConfig;
use crate::core::sync::{PendingFetch, SyncController};
use crate::core::{platform, timing};
use crate::t;

use super::charts::ChartCard;
use super::filters::{AgeRangeSelector, GenderSelector};

type Controller = SyncController<StatsClient>;
type SenderSlot = Rc<RefCell<Option<UnboundedSender<DashboardEvent>>>>;

/// Filters plus the five metric charts, kept in sync with the API.
#[component]
pub fn DashboardView() -> Element {
    let config = use_hook(|| Rc::new(DashboardConfig::load()));
    let controller = use_signal({
        let config = config.clone();
        move || {
            let client = StatsClient::new(config.api_base.clone());
            Controller::with_registry(config.initial_filter(), DataFetcher::new(client))
        }
    });

    let sender_slot: SenderSlot = use_hook(|| Rc::new(RefCell::new(None)));
    let sender_slot_for_loop = sender_slot.clone();
    let timeout_ms = config.request_timeout_ms;

    let coroutine = use_coroutine(move |mut rx: UnboundedReceiver<DashboardEvent>| {
        let sender_slot = sender_slot_for_loop.clone();
        let mut controller = controller;

        async move {
            while let Some(event) = rx.next().await {
                let fetches = match event {
                    DashboardEvent::Start => controller.with_mut(|c| c.start()),
                    DashboardEvent::Gender(gender) => controller.with_mut(|c| c.set_gender(gender)),
                    DashboardEvent::AgeMin(value) => controller.with_mut(|c| c.set_age_min(value)),
                    DashboardEvent::AgeMax(value) => controller.with_mut(|c| c.set_age_max(value)),
                    DashboardEvent::Resolved(result) => {
                        controller.with_mut(|c| c.apply(result));
                        continue;
                    }
                    DashboardEvent::Expired { metric, version } => {
                        controller.with_mut(|c| c.expire(metric, version));
                        continue;
                    }
                };

                for fetch in fetches {
                    queue_fetch(sender_slot.clone(), fetch, timeout_ms);
                }
            }
        }
    });

    sender_slot.borrow_mut().replace(coroutine.tx());

    use_hook(move || coroutine.send(DashboardEvent::Start));

    let (view, bounds) = controller.with(|c| (c.view_model().clone(), c.filter_state().bounds()));
    let filter = view.filter;
    let refreshing = view.is_loading();

    rsx! {
        div { class: "dashboard",
            div { class: "dashboard__filters",
                GenderSelector {
                    current: filter.gender,
                    on_change: move |gender: Gender| coroutine.send(DashboardEvent::Gender(gender)),
                }
                AgeRangeSelector {
                    bounds,
                    age_min: filter.age_min,
                    age_max: filter.age_max,
                    on_min: move |value: u32| coroutine.send(DashboardEvent::AgeMin(value)),
                    on_max: move |value: u32| coroutine.send(DashboardEvent::AgeMax(value)),
                }
                if refreshing {
                    span { class: "dashboard__status", aria_live: "polite", {t!("dashboard-refreshing")} }
                }
            }
            div { class: "dashboard__grid",
                for (key, metric) in MetricId::ALL.map(|m| (m.key(), m)) {
                    ChartCard { key: "{key}", metric, series: view.series(metric).clone() }
                }
            }
        }
    }
}

/// Run one metric request and arm its timeout. Both report back through the
/// coroutine; the controller sorts out which one wins.
fn queue_fetch(sender_slot: SenderSlot, fetch: PendingFetch, timeout_ms: u64) {
    let Some(sender) = sender_slot.borrow().as_ref().cloned() else {
        return;
    };

    let PendingFetch {
        metric,
        version,
        task,
    } = fetch;

    let on_result = sender.clone();
    platform::spawn_future(async move {
        let result = task.await;
        let _ = on_result.unbounded_send(DashboardEvent::Resolved(result));
    });

    platform::spawn_future(async move {
        timing::sleep_ms(timeout_ms).await;
        let _ = sender.unbounded_send(DashboardEvent::Expired { metric, version });
    });
}

#[derive(Debug, Clone)]
enum DashboardEvent {
    Start,
    Gender(Gender),
    AgeMin(u32),
    AgeMax(u32),
    Resolved(MetricResult),
    Expired { metric: MetricId, version: u64 },
}
