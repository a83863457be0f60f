pub mod label_directory;
pub mod contact_service;

pub use contact_service::{ContactService, FetchPolicy};
pub use label_directory::LabelDirectory;
