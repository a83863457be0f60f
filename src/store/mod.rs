pub mod schema;
pub mod property_repo;
