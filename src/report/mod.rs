pub mod templates;
pub mod builders;
pub mod mime;
pub mod dispatch;

pub use builders::Report;
