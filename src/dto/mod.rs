//! DTO modules that bridge services with templates and APIs.

pub mod format;
pub mod overview;
pub mod resource;
pub mod table;
