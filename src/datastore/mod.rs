pub mod client;
pub mod error;
pub mod query;

pub use client::{DataClient, Row, VerifiedUser};
pub use error::DataError;
pub use query::SelectQuery;
