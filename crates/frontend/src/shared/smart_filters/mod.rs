pub mod api;
pub mod hook;
pub mod state;
pub mod ui;

pub use hook::{use_smart_filters, SmartFilters};
pub use ui::SmartFiltersPanel;
