pub mod query;
pub mod schema;

pub use query::*;
pub use schema::*;
