//! Strongly-typed value objects used by the query model.
//!
//! These wrappers enforce the invariants of the dashboard's query parameters
//! (sort directions, the fixed set of page sizes, the catalogue of remote
//! resources) so that once a value reaches the domain layer it can be treated
//! as trusted.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page sizes offered by every filter panel.
pub const PAGE_SIZES: [u32; 3] = [10, 20, 50];

/// Page size used when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided sort direction is neither `ASC` nor `DESC`.
    #[error("sort order must be ASC or DESC")]
    InvalidSortOrder,
    /// Provided resource slug does not name a dashboard resource.
    #[error("unknown resource: {0}")]
    UnknownResource(String),
}

/// Direction applied to the `sortBy` column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    /// Wire representation used in query strings.
    pub const fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortOrder::Asc),
            "DESC" => Ok(SortOrder::Desc),
            _ => Err(TypeConstraintError::InvalidSortOrder),
        }
    }
}

/// Remote collections and aggregates consumed by the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Resource {
    Movies,
    Actors,
    Schedules,
    Tickets,
    Orders,
    TicketOverview,
    OrderOverview,
}

impl Resource {
    pub const ALL: [Resource; 7] = [
        Resource::Movies,
        Resource::Actors,
        Resource::Schedules,
        Resource::Tickets,
        Resource::Orders,
        Resource::TicketOverview,
        Resource::OrderOverview,
    ];

    /// Path of the remote endpoint, relative to the API base URL.
    pub const fn api_path(self) -> &'static str {
        match self {
            Resource::Movies => "/movies/admin",
            Resource::Actors => "/actor/admin",
            Resource::Schedules => "/schedules/admin",
            Resource::Tickets => "/ticket/admin",
            Resource::Orders => "/order/admin",
            Resource::TicketOverview => "/ticket/overview-ticket",
            Resource::OrderOverview => "/order/overview-order",
        }
    }

    /// Short name used in dashboard URLs and cache keys.
    pub const fn slug(self) -> &'static str {
        match self {
            Resource::Movies => "movies",
            Resource::Actors => "actors",
            Resource::Schedules => "schedules",
            Resource::Tickets => "tickets",
            Resource::Orders => "orders",
            Resource::TicketOverview => "ticket-overview",
            Resource::OrderOverview => "order-overview",
        }
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Resource {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|resource| resource.slug() == s)
            .ok_or_else(|| TypeConstraintError::UnknownResource(s.to_string()))
    }
}

/// `{id, name}` reference embedded in several API payloads.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedRef {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}
