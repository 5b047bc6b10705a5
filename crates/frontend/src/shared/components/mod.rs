pub mod chart;
pub mod filter_panel;
pub mod page_header;
pub mod pagination_controls;
pub mod stat_card;
pub mod status_panel;
pub mod table;
