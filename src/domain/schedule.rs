use serde::{Deserialize, Serialize};

use crate::domain::query::{BaseQuery, FieldKind, FilterField, FilterValue, ResourceQuery};
use crate::domain::types::{NamedRef, Resource};

/// Projection versions by API identifier.
pub const VERSIONS: &[(&str, &str)] = &[("2", "2D"), ("1", "3D"), ("6", "IMAX"), ("4", "4DX")];

/// Schedule as returned by `/schedules/admin`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Schedule {
    pub id: i64,
    pub is_deleted: bool,
    pub cinema_room_id: i64,
    pub start_movie_time: String,
    pub end_movie_time: String,
    pub version: Option<NamedRef>,
    pub movie: Option<NamedRef>,
}

const FIELDS: &[FilterField] = &[
    FilterField::new("movieName", "Tên phim", FieldKind::Text),
    FilterField::new("cinemaRoomName", "Phòng chiếu", FieldKind::Text),
    FilterField::new("version_id", "Phiên bản", FieldKind::Choice(VERSIONS)),
    FilterField::new(
        "is_deleted",
        "Trạng thái",
        FieldKind::Flag {
            on: "Đã xóa",
            off: "Đang hoạt động",
        },
    ),
    FilterField::new("scheduleStartTime", "Thời gian bắt đầu", FieldKind::DateTime),
    FilterField::new("scheduleEndTime", "Thời gian kết thúc", FieldKind::DateTime),
];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScheduleQuery {
    pub base: BaseQuery,
    pub movie_name: Option<String>,
    pub cinema_room_name: Option<String>,
    pub version_id: Option<String>,
    pub is_deleted: Option<bool>,
    pub schedule_start_time: Option<String>,
    pub schedule_end_time: Option<String>,
}

impl ResourceQuery for ScheduleQuery {
    type Row = Schedule;

    const RESOURCE: Resource = Resource::Schedules;
    const SORT_KEYS: &'static [&'static str] = &[
        "schedule.id",
        "movie.name",
        "cinemaRoom.cinema_room_name",
        "version.id",
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
        let text = match key {
            "movieName" => &self.movie_name,
            "cinemaRoomName" => &self.cinema_room_name,
            "version_id" => &self.version_id,
            "scheduleStartTime" => &self.schedule_start_time,
            "scheduleEndTime" => &self.schedule_end_time,
            "is_deleted" => return self.is_deleted.map(FilterValue::Flag),
            _ => return None,
        };
        text.clone().map(FilterValue::Text)
    }

    fn set_filter_value(&mut self, key: &str, value: Option<FilterValue>) {
        if key == "is_deleted" {
            self.is_deleted = value.and_then(FilterValue::into_flag);
            return;
        }
        let value = value.and_then(FilterValue::into_text);
        match key {
            "movieName" => self.movie_name = value,
            "cinemaRoomName" => self.cinema_room_name = value,
            "version_id" => self.version_id = value,
            "scheduleStartTime" => self.schedule_start_time = value,
            "scheduleEndTime" => self.schedule_end_time = value,
            _ => {}
        }
    }
}
