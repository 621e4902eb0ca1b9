//! Platform-agnostic dashboard logic: filter state, metric synchronisation
//! and the presentation model the views render.

pub mod config;
pub mod filter;
pub mod format;
pub mod platform;
pub mod present;
pub mod sync;
pub mod timing;
pub mod view_model;
