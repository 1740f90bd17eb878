//! Table rendering for list resources.
use serde::Serialize;

use crate::domain::actor::Actor;
use crate::domain::movie::Movie;
use crate::domain::order::Order;
use crate::domain::query::ResourceQuery;
use crate::domain::schedule::Schedule;
use crate::domain::ticket::Ticket;
use crate::domain::types::SortOrder;
use crate::dto::format::{
    format_date, format_date_time, format_time, format_vnd_str, minutes_between, truncate,
};

/// A column header. Columns with a `sort_key` are clickable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    pub label: &'static str,
    pub sort_key: Option<&'static str>,
}

const fn col(label: &'static str) -> Column {
    Column {
        label,
        sort_key: None,
    }
}

const fn sorted(label: &'static str, key: &'static str) -> Column {
    Column {
        label,
        sort_key: Some(key),
    }
}

/// Visual emphasis of a cell, mapped to a CSS class by the templates.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Plain,
    Success,
    Warning,
    Danger,
    Info,
    Muted,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub tone: Tone,
    /// Full value when `text` is truncated.
    pub title: Option<String>,
    pub image: Option<String>,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Plain,
            title: None,
            image: None,
        }
    }

    pub fn badge(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            tone,
            ..Self::text(text)
        }
    }

    pub fn truncated(text: &str, max_chars: usize) -> Self {
        Self {
            title: Some(text.to_string()),
            ..Self::text(truncate(text, max_chars))
        }
    }

    pub fn image(url: Option<&str>, alt: &str) -> Self {
        Self {
            image: url.filter(|url| !url.is_empty()).map(str::to_string),
            ..Self::text(alt)
        }
    }
}

fn or_missing(value: Option<&str>) -> String {
    value
        .filter(|value| !value.is_empty())
        .unwrap_or("N/A")
        .to_string()
}

/// A row type that knows its columns and cells.
pub trait TableRow {
    const COLUMNS: &'static [Column];

    /// One cell per entry of [`Self::COLUMNS`].
    fn cells(&self) -> Vec<Cell>;
}

impl TableRow for Movie {
    const COLUMNS: &'static [Column] = &[
        sorted("ID", "movie.id"),
        sorted("Tên phim", "movie.name"),
        sorted("Quốc gia", "movie.nation"),
        sorted("Đạo diễn", "movie.director"),
        col("Số diễn viên"),
        col("Số phiên bản"),
        col("Ngày khởi chiếu"),
        col("Ngày kết thúc"),
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(self.id.to_string()),
            Cell::truncated(&self.name, 40),
            Cell::text(&self.nation),
            Cell::truncated(&self.director, 30),
            Cell::badge(self.actors.len().to_string(), Tone::Info),
            Cell::badge(self.versions.len().to_string(), Tone::Info),
            Cell::text(format_date(&self.from_date)),
            Cell::text(format_date(&self.to_date)),
        ]
    }
}

impl TableRow for Actor {
    const COLUMNS: &'static [Column] = &[
        col("Avatar"),
        sorted("Tên thật", "name"),
        sorted("Nghệ danh", "stage_name"),
        sorted("Giới tính", "gender"),
        sorted("Ngày sinh", "date_of_birth"),
        sorted("Quốc tịch", "nationality"),
        col("Ngày tạo"),
        col("Trạng thái"),
    ];

    fn cells(&self) -> Vec<Cell> {
        let status = if self.is_deleted {
            Cell::badge("Đã xóa", Tone::Danger)
        } else {
            Cell::badge("Hoạt động", Tone::Success)
        };
        vec![
            Cell::image(self.profile_image.as_deref(), &self.name),
            Cell::text(&self.name),
            Cell::text(&self.stage_name),
            Cell::badge(self.gender_label(), Tone::Info),
            Cell::text(format_date(&self.date_of_birth)),
            Cell::text(&self.nationality),
            Cell::badge(format_date(&self.created_at), Tone::Muted),
            status,
        ]
    }
}

impl TableRow for Schedule {
    const COLUMNS: &'static [Column] = &[
        sorted("ID", "schedule.id"),
        sorted("Tên phim", "movie.name"),
        sorted("Phòng chiếu", "cinemaRoom.cinema_room_name"),
        sorted("Phiên bản", "version.id"),
        col("Giờ bắt đầu"),
        col("Giờ kết thúc"),
        col("Ngày chiếu"),
        col("Thời lượng"),
        col("Trạng thái"),
    ];

    fn cells(&self) -> Vec<Cell> {
        let movie = or_missing(self.movie.as_ref().map(|movie| movie.name.as_str()));
        let version = or_missing(self.version.as_ref().map(|version| version.name.as_str()));
        let duration = minutes_between(&self.start_movie_time, &self.end_movie_time)
            .map(|minutes| format!("{minutes} phút"))
            .unwrap_or_else(|| "N/A".to_string());
        let status = if self.is_deleted {
            Cell::badge("Đã hủy", Tone::Danger)
        } else {
            Cell::badge("Hoạt động", Tone::Success)
        };
        vec![
            Cell::text(self.id.to_string()),
            Cell::truncated(&movie, 40),
            Cell::badge(format!("Phòng {}", self.cinema_room_id), Tone::Info),
            Cell::badge(version, Tone::Info),
            Cell::text(format_time(&self.start_movie_time)),
            Cell::text(format_time(&self.end_movie_time)),
            Cell::text(format_date(&self.start_movie_time)),
            Cell::badge(duration, Tone::Info),
            status,
        ]
    }
}

impl TableRow for Ticket {
    const COLUMNS: &'static [Column] = &[
        col("Phim"),
        col("Phòng chiếu"),
        col("Ghế"),
        col("Loại ghế"),
        sorted("Loại vé", "ticketType.id"),
        col("Phiên bản"),
        sorted("Thời gian chiếu", "schedule.id"),
        sorted("Tình trạng", "ticket.is_used"),
        sorted("Trạng thái", "ticket.status"),
    ];

    fn cells(&self) -> Vec<Cell> {
        let schedule = self.schedule.as_ref();
        let movie = or_missing(
            schedule
                .and_then(|s| s.movie.as_ref())
                .map(|m| m.name.as_str()),
        );
        let room = or_missing(
            schedule
                .and_then(|s| s.cinema_room.as_ref())
                .map(|r| r.name.as_str()),
        );
        let version = or_missing(
            schedule
                .and_then(|s| s.version.as_ref())
                .map(|v| v.name.as_str()),
        );
        let seat = self
            .seat
            .as_ref()
            .map(|seat| format!("{}{}", seat.row, seat.column))
            .unwrap_or_else(|| "N/A".to_string());
        let seat_type = or_missing(self.seat_type.as_ref().map(|t| t.name.as_str()));
        let ticket_type = match &self.ticket_type {
            Some(t) if t.audience_type.is_empty() => t.name.clone(),
            Some(t) => format!("{} ({})", t.name, t.audience_type),
            None => "N/A".to_string(),
        };
        let show_time = schedule
            .filter(|s| !s.start_movie_time.is_empty())
            .map(|s| {
                format!(
                    "{} {}",
                    format_time(&s.start_movie_time),
                    format_date(&s.start_movie_time)
                )
            })
            .unwrap_or_else(|| "N/A".to_string());
        let usage = if self.is_used {
            Cell::badge("Đã sử dụng", Tone::Warning)
        } else {
            Cell::badge("Chưa sử dụng", Tone::Success)
        };
        let status = if self.status {
            Cell::badge("Hoạt động", Tone::Success)
        } else {
            Cell::badge("Không hoạt động", Tone::Danger)
        };
        vec![
            Cell::truncated(&movie, 40),
            Cell::badge(room, Tone::Info),
            Cell::text(seat),
            Cell::text(seat_type),
            Cell::text(ticket_type),
            Cell::badge(version, Tone::Info),
            Cell::text(show_time),
            usage,
            status,
        ]
    }
}

fn order_status_tone(status: &str) -> Tone {
    match status {
        "pending" => Tone::Warning,
        "confirmed" => Tone::Info,
        "success" | "completed" => Tone::Success,
        "cancelled" | "failed" => Tone::Danger,
        _ => Tone::Muted,
    }
}

impl TableRow for Order {
    const COLUMNS: &'static [Column] = &[
        sorted("ID", "order.id"),
        sorted("Tên người dùng", "user.username"),
        sorted("Tổng tiền", "order.total_prices"),
        sorted("Ngày đặt", "order.order_date"),
        sorted("Phương thức", "paymentMethod.name"),
        sorted("Trạng thái", "order.status"),
        sorted("Tên phim", "movie.name"),
        col("Xuất chiếu"),
    ];

    fn cells(&self) -> Vec<Cell> {
        let username = or_missing(self.user.as_ref().map(|u| u.username.as_str()));
        let movie = or_missing(self.movie.as_ref().map(|m| m.name.as_str()));
        let show_time = self
            .schedule
            .as_ref()
            .filter(|s| !s.start_time.is_empty() && !s.end_time.is_empty())
            .map(|s| format!("{} - {}", format_time(&s.start_time), format_time(&s.end_time)))
            .unwrap_or_else(|| "N/A".to_string());
        let total = if self.total_prices.is_empty() {
            "0"
        } else {
            self.total_prices.as_str()
        };
        vec![
            Cell::text(format!("#{}", self.id)),
            Cell::text(username),
            Cell::text(format_vnd_str(total)),
            Cell::text(format_date_time(&self.order_date)),
            Cell::badge(or_missing(self.payment_method_name()), Tone::Info),
            Cell::badge(self.status_label(), order_status_tone(&self.status)),
            Cell::truncated(&movie, 20),
            Cell::text(show_time),
        ]
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct HeaderView {
    pub label: &'static str,
    pub sortable: bool,
    pub active: bool,
    /// `asc` or `desc` for the active column.
    pub order: Option<&'static str>,
    /// Link applying the sort toggle for this column.
    pub href: Option<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct TableView {
    pub headers: Vec<HeaderView>,
    pub rows: Vec<Vec<Cell>>,
}

/// Builds the table for `rows`; `href` renders the parameters of a link.
pub fn build_table<Q, F>(params: &Q, rows: &[Q::Row], href: F) -> TableView
where
    Q: ResourceQuery,
    Q::Row: TableRow,
    F: Fn(&Q) -> String,
{
    let base = params.base();
    let headers = Q::Row::COLUMNS
        .iter()
        .map(|column| {
            let active = column.sort_key.is_some() && column.sort_key == base.sort_by.as_deref();
            let order = active.then(|| match base.sort_order.unwrap_or_default() {
                SortOrder::Asc => "asc",
                SortOrder::Desc => "desc",
            });
            let href = column.sort_key.map(|key| {
                let mut next = params.clone();
                next.base_mut().toggle_sort(key);
                href(&next)
            });
            HeaderView {
                label: column.label,
                sortable: column.sort_key.is_some(),
                active,
                order,
                href,
            }
        })
        .collect();

    TableView {
        headers,
        rows: rows.iter().map(|row| row.cells()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::movie::MovieQuery;
    use crate::domain::order::OrderQuery;

    fn assert_columns_match<R: TableRow>(row: &R) {
        assert_eq!(row.cells().len(), R::COLUMNS.len());
    }

    #[test]
    fn every_row_type_fills_its_columns() {
        assert_columns_match(&Movie::default());
        assert_columns_match(&Actor::default());
        assert_columns_match(&Schedule::default());
        assert_columns_match(&Ticket::default());
        assert_columns_match(&Order::default());
    }

    #[test]
    fn sort_keys_are_accepted_by_the_query() {
        fn check<Q: ResourceQuery>()
        where
            Q::Row: TableRow,
        {
            for column in Q::Row::COLUMNS {
                if let Some(key) = column.sort_key {
                    assert!(Q::SORT_KEYS.contains(&key), "{key} not sortable");
                }
            }
        }
        check::<MovieQuery>();
        check::<OrderQuery>();
        check::<crate::domain::actor::ActorQuery>();
        check::<crate::domain::schedule::ScheduleQuery>();
        check::<crate::domain::ticket::TicketQuery>();
    }

    #[test]
    fn headers_carry_toggle_links() {
        let params =
            MovieQuery::from_pairs([("sortBy", "movie.name"), ("sortOrder", "ASC")]).unwrap();
        let table = build_table(&params, &[Movie::default()], |next: &MovieQuery| {
            serde_html_form::to_string(next.to_query_pairs()).unwrap()
        });

        let name = &table.headers[1];
        assert!(name.active);
        assert_eq!(name.order, Some("asc"));
        assert_eq!(
            name.href.as_deref(),
            Some("page=1&sortBy=movie.name&sortOrder=DESC&take=10")
        );

        let nation = &table.headers[2];
        assert!(!nation.active);
        assert_eq!(
            nation.href.as_deref(),
            Some("page=1&sortBy=movie.nation&sortOrder=ASC&take=10")
        );
        assert!(table.headers[4].href.is_none());
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn order_cells_format_money_and_status() {
        let order = Order {
            id: 42,
            total_prices: "185000.00".to_string(),
            status: "pending".to_string(),
            ..Order::default()
        };
        let cells = order.cells();
        assert_eq!(cells[0].text, "#42");
        assert_eq!(cells[2].text, "185.000 ₫");
        assert_eq!(cells[5].text, "Chờ xử lý");
        assert_eq!(cells[5].tone, Tone::Warning);
    }
}
