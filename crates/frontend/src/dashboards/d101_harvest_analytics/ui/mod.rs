pub mod dashboard;
pub mod harvest_table;

pub use dashboard::HarvestAnalyticsDashboard;
