pub mod d100_overview;
pub mod d101_harvest_analytics;
pub mod d102_olap;

pub use d100_overview::ui::OverviewDashboard;
pub use d101_harvest_analytics::ui::HarvestAnalyticsDashboard;
pub use d102_olap::ui::OlapWizardPage;
