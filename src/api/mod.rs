pub mod types;
pub mod http;

pub use http::{ContactsApi, HttpContactsApi};
pub use types::{ConnectionsPage, ContactGroup, PersonResource};
