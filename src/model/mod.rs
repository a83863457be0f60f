pub mod contact;
pub mod label;

// Re-exports for convenience
pub use contact::{Contact, ContactField};
pub use label::Label;
