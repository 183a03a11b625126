//! Intelligence - categorized identifiers gathered from a conversation.

mod aggregator;
mod model;
mod tactics;

pub use aggregator::IntelligenceAggregator;
pub use model::{Intelligence, IntelligenceCategory};
pub use tactics::describe_tactics;
