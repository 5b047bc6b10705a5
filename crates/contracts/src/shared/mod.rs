pub mod envelope;
pub mod error;
pub mod filters;
pub mod olap;
