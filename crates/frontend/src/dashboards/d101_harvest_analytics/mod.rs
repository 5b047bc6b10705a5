pub mod aggregates;
pub mod ui;
