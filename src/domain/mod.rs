//! Domain model of the dashboard: query parameters per resource and the
//! payloads returned by the cinema API.

pub mod actor;
pub mod envelope;
pub mod movie;
pub mod order;
pub mod overview;
pub mod query;
pub mod schedule;
pub mod ticket;
pub mod types;
