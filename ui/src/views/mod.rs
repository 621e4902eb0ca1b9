mod climbers;
mod dashboard;
mod home;

pub use climbers::Climbers;
pub use dashboard::Dashboard;
pub use home::Home;
