//! Platform glue for spawning work on the UI runtime.

use std::future::Future;

/// Run a future to completion on the current UI runtime without awaiting it.
#[cfg(target_arch = "wasm32")]
pub fn spawn_future<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

/// Run a future to completion on the current UI runtime without awaiting it.
///
/// Must be called from inside a Dioxus scope or task.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_future<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    dioxus::prelude::spawn(future);
}
