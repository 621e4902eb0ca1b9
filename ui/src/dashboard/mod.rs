//! Filter controls and metric charts of the statistics dashboard.

pub mod charts;
pub mod filters;
pub mod geometry;
mod view;

pub use view::DashboardView;
