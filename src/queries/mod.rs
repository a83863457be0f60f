pub mod contact_queries;
pub mod duplicate_queries;
pub mod stats_queries;
