pub mod dimensions;
pub mod harvest;
