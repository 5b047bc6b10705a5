pub mod api;
pub mod state;
pub mod summary;
pub mod ui;
