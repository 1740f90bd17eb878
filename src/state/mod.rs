//! Client-side state of a list page, independent of any rendering layer.

pub mod debounce;
pub mod filters;
pub mod page;
pub mod slot;
