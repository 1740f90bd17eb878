use serde::{Deserialize, Serialize};

use crate::domain::query::{BaseQuery, FieldKind, FilterField, FilterValue, ResourceQuery};
use crate::domain::types::{NamedRef, Resource};

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TicketType {
    pub id: i64,
    pub name: String,
    pub audience_type: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TicketMovie {
    pub id: i64,
    pub name: String,
    pub duration: i64,
    pub thumbnail: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TicketSchedule {
    pub start_movie_time: String,
    pub end_movie_time: String,
    pub movie: Option<TicketMovie>,
    pub version: Option<NamedRef>,
    #[serde(rename = "cinemaRoom")]
    pub cinema_room: Option<NamedRef>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Seat {
    pub id: String,
    pub row: String,
    pub column: String,
}

/// Ticket as returned by `/ticket/admin`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Ticket {
    pub id: String,
    pub is_used: bool,
    pub status: bool,
    #[serde(rename = "ticketType")]
    pub ticket_type: Option<TicketType>,
    pub schedule: Option<TicketSchedule>,
    pub seat: Option<Seat>,
    pub seat_type: Option<NamedRef>,
}

const FIELDS: &[FilterField] = &[
    FilterField::new(
        "active",
        "Trạng thái vé",
        FieldKind::Flag {
            on: "Hoạt động",
            off: "Không hoạt động",
        },
    ),
    FilterField::new(
        "is_used",
        "Tình trạng sử dụng",
        FieldKind::Flag {
            on: "Đã sử dụng",
            off: "Chưa sử dụng",
        },
    ),
    FilterField::new("startDate", "Từ ngày đặt", FieldKind::Date),
    FilterField::new("endDate", "Đến ngày đặt", FieldKind::Date),
];

/// Ticket list parameters. Only active, unused tickets are listed by default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TicketQuery {
    pub base: BaseQuery,
    pub active: Option<bool>,
    pub is_used: Option<bool>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl Default for TicketQuery {
    fn default() -> Self {
        Self {
            base: BaseQuery::default(),
            active: Some(true),
            is_used: Some(false),
            start_date: None,
            end_date: None,
        }
    }
}

impl ResourceQuery for TicketQuery {
    type Row = Ticket;

    const RESOURCE: Resource = Resource::Tickets;
    const SORT_KEYS: &'static [&'static str] = &[
        "ticketType.id",
        "schedule.id",
        "ticket.is_used",
        "ticket.status",
    ];

    fn base(&self) -> &BaseQuery {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseQuery {
        &mut self.base
    }

    fn filter_fields() -> &'static [FilterField] {
        FIELDS
    }

    fn filter_value(&self, key: &str) -> Option<FilterValue> {
        match key {
            "active" => self.active.map(FilterValue::Flag),
            "is_used" => self.is_used.map(FilterValue::Flag),
            "startDate" => self.start_date.clone().map(FilterValue::Text),
            "endDate" => self.end_date.clone().map(FilterValue::Text),
            _ => None,
        }
    }

    fn set_filter_value(&mut self, key: &str, value: Option<FilterValue>) {
        match key {
            "active" => self.active = value.and_then(FilterValue::into_flag),
            "is_used" => self.is_used = value.and_then(FilterValue::into_flag),
            "startDate" => self.start_date = value.and_then(FilterValue::into_text),
            "endDate" => self.end_date = value.and_then(FilterValue::into_text),
            _ => {}
        }
    }
}
