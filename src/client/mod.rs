//! Resource access adapter for the league's REST layer.
//!
//! All five resources go through the same [`RestClient`]; the resource type
//! only decides the path, the key column and how rows decode.

mod adapter;
mod error;
mod outcome;
mod query;

pub use adapter::RestClient;
pub use error::ClientError;
pub use outcome::ResponseOutcome;
pub use query::Filter;
