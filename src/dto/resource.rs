//! Data handed to the list page templates.
use serde::Serialize;

use crate::domain::actor::ActorQuery;
use crate::domain::movie::MovieQuery;
use crate::domain::order::OrderQuery;
use crate::domain::query::ResourceQuery;
use crate::domain::schedule::ScheduleQuery;
use crate::domain::ticket::TicketQuery;
use crate::dto::table::{TableRow, TableView};
use crate::state::debounce::CommitPolicy;
use crate::state::filters::FilterPanelView;

pub const LOADING_MESSAGE: &str = "Đang tải dữ liệu...";
pub const ERROR_MESSAGE: &str = "Có lỗi xảy ra khi tải dữ liệu";
pub const NO_MATCH_HINT: &str = "Thử điều chỉnh bộ lọc hoặc tìm kiếm để tìm kết quả phù hợp";

/// Texts of a list page.
pub trait ResourcePage: ResourceQuery<Row: TableRow> {
    const TITLE: &'static str;
    const DESCRIPTION: &'static str;
    const SEARCH_LABEL: &'static str;
    const SEARCH_PLACEHOLDER: &'static str;
    /// Headline of the empty state.
    const EMPTY_TITLE: &'static str;
    const NO_DATA_MESSAGE: &'static str;

    /// Dashboard path of the page, e.g. `/movies`.
    fn path() -> String {
        format!("/{}", Self::RESOURCE.slug())
    }
}

impl ResourcePage for MovieQuery {
    const TITLE: &'static str = "Quản lý Phim";
    const DESCRIPTION: &'static str = "Quản lý thông tin phim trong hệ thống";
    const SEARCH_LABEL: &'static str = "Tìm kiếm phim";
    const SEARCH_PLACEHOLDER: &'static str = "Tìm kiếm theo tên phim, đạo diễn, quốc gia...";
    const EMPTY_TITLE: &'static str = "Không tìm thấy phim nào";
    const NO_DATA_MESSAGE: &'static str = "Hiện tại chưa có phim nào trong hệ thống";
}

impl ResourcePage for ActorQuery {
    const TITLE: &'static str = "Quản lý Diễn viên";
    const DESCRIPTION: &'static str = "Quản lý thông tin diễn viên trong hệ thống";
    const SEARCH_LABEL: &'static str = "Tìm kiếm diễn viên";
    const SEARCH_PLACEHOLDER: &'static str = "Tìm kiếm theo tên, nghệ danh, quốc tịch...";
    const EMPTY_TITLE: &'static str = "Không tìm thấy diễn viên nào";
    const NO_DATA_MESSAGE: &'static str = "Hiện tại chưa có dữ liệu diễn viên trong hệ thống";
}

impl ResourcePage for ScheduleQuery {
    const TITLE: &'static str = "Quản lý Lịch chiếu";
    const DESCRIPTION: &'static str = "Quản lý lịch chiếu phim trong hệ thống";
    const SEARCH_LABEL: &'static str = "Tìm kiếm lịch chiếu";
    const SEARCH_PLACEHOLDER: &'static str =
        "Tìm kiếm theo ID lịch chiếu, tên phim, phòng chiếu...";
    const EMPTY_TITLE: &'static str = "Không tìm thấy lịch chiếu nào";
    const NO_DATA_MESSAGE: &'static str = "Hiện tại chưa có lịch chiếu nào trong hệ thống";
}

impl ResourcePage for TicketQuery {
    const TITLE: &'static str = "Quản lý vé";
    const DESCRIPTION: &'static str = "Danh sách vé đã đặt";
    const SEARCH_LABEL: &'static str = "Tìm kiếm vé";
    const SEARCH_PLACEHOLDER: &'static str =
        "Tìm kiếm theo tên phim, loại ghế, phòng chiếu, loại vé, phiên bản...";
    const EMPTY_TITLE: &'static str = "Không tìm thấy vé nào";
    const NO_DATA_MESSAGE: &'static str = "Hiện tại chưa có vé nào trong hệ thống";
}

impl ResourcePage for OrderQuery {
    const TITLE: &'static str = "Quản lý Đơn hàng";
    const DESCRIPTION: &'static str = "Quản lý đơn hàng và theo dõi trạng thái thanh toán";
    const SEARCH_LABEL: &'static str = "Tìm kiếm đơn hàng";
    const SEARCH_PLACEHOLDER: &'static str = "Tìm theo tên user hoặc tên phim...";
    const EMPTY_TITLE: &'static str = "Không tìm thấy đơn hàng nào";
    const NO_DATA_MESSAGE: &'static str = "Hiện tại chưa có dữ liệu đơn hàng trong hệ thống";
}

/// Link to `path` carrying `params`.
pub fn href<Q: ResourceQuery>(path: &str, params: &Q) -> String {
    match serde_html_form::to_string(params.link_pairs()) {
        Ok(query) if !query.is_empty() => format!("{path}?{query}"),
        Ok(_) => path.to_string(),
        Err(e) => {
            log::warn!("Failed to encode link for {path}: {e}");
            path.to_string()
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct HiddenInput {
    pub name: String,
    pub value: String,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ErrorView {
    pub message: &'static str,
    pub detail: String,
    pub retry_href: String,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct EmptyView {
    pub title: &'static str,
    pub message: &'static str,
    /// Present when filters are active.
    pub clear_href: Option<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PageLink {
    /// `None` renders an ellipsis.
    pub number: Option<u32>,
    pub href: Option<String>,
    pub current: bool,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PaginationLinks {
    pub summary: String,
    pub previous_href: Option<String>,
    pub next_href: Option<String>,
    pub pages: Vec<PageLink>,
}

/// Everything the list template renders.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ResourcePageData {
    pub resource: &'static str,
    pub path: String,
    pub title: &'static str,
    pub description: &'static str,
    pub search_label: &'static str,
    pub search_placeholder: &'static str,
    pub filters: FilterPanelView,
    /// Parameters the filter form carries as hidden inputs (the active sort).
    pub hidden: Vec<HiddenInput>,
    pub table: Option<TableView>,
    pub error: Option<ErrorView>,
    pub empty: Option<EmptyView>,
    pub pagination: Option<PaginationLinks>,
    pub clear_href: String,
    pub debounce_ms: u64,
    pub commit_policy: CommitPolicy,
}

impl ResourcePageData {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn href_keeps_cleared_defaults() {
        let params = TicketQuery::from_pairs([("active", ""), ("page", "2")]).unwrap();
        assert_eq!(
            href(&TicketQuery::path(), &params),
            "/tickets?active=&is_used=false&page=2&take=10"
        );
    }

    #[test]
    fn href_encodes_values() {
        let params = MovieQuery::from_pairs([("search", "Nhà Bà Nữ & co")]).unwrap();
        let link = href("/movies", &params);
        assert!(link.starts_with("/movies?page=1&search=Nh"));
        assert!(link.contains("%26"));
        assert!(!link.contains(' '));
    }
}
