use serde::Serialize;

use crate::domain::overview::{ChartSlice, OrderOverview, TicketOverview};
use crate::dto::format::format_vnd;

pub const OVERVIEW_TITLE: &str = "Tổng quan hệ thống";
pub const OVERVIEW_DESCRIPTION: &str =
    "Dashboard tổng quan về hoạt động của hệ thống quản lý rạp chiếu phim";

const TICKET_TITLE: &str = "Thống kê vé";
const TICKET_UNIT: &str = "vé";
const ORDER_TITLE: &str = "Thống kê đơn hàng";
const ORDER_UNIT: &str = "đơn";

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
}

/// One donut chart with its legend, or the error that prevented it.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ChartCard {
    pub title: &'static str,
    pub unit: &'static str,
    pub metrics: Vec<Metric>,
    pub slices: Vec<ChartSlice>,
    /// The aggregate total is zero and the placeholder slice is shown.
    pub empty: bool,
    pub error: Option<String>,
}

impl ChartCard {
    pub fn ticket_error(error: String) -> Self {
        Self::failed(TICKET_TITLE, TICKET_UNIT, error)
    }

    pub fn order_error(error: String) -> Self {
        Self::failed(ORDER_TITLE, ORDER_UNIT, error)
    }

    fn failed(title: &'static str, unit: &'static str, error: String) -> Self {
        Self {
            title,
            unit,
            metrics: Vec::new(),
            slices: Vec::new(),
            empty: false,
            error: Some(error),
        }
    }
}

impl From<&TicketOverview> for ChartCard {
    fn from(overview: &TicketOverview) -> Self {
        Self {
            title: TICKET_TITLE,
            unit: TICKET_UNIT,
            metrics: vec![Metric {
                label: "Tổng số vé",
                value: overview.total_tickets.to_string(),
            }],
            slices: overview.slices(),
            empty: overview.total_tickets == 0,
            error: None,
        }
    }
}

impl From<&OrderOverview> for ChartCard {
    fn from(overview: &OrderOverview) -> Self {
        Self {
            title: ORDER_TITLE,
            unit: ORDER_UNIT,
            metrics: vec![
                Metric {
                    label: "Tổng đơn hàng",
                    value: overview.total_orders.to_string(),
                },
                Metric {
                    label: "Doanh thu",
                    value: format_vnd(overview.revenue_amount()),
                },
            ],
            slices: overview.slices(),
            empty: overview.total_orders == 0,
            error: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct OverviewPageData {
    pub title: &'static str,
    pub description: &'static str,
    pub tickets: ChartCard,
    pub orders: ChartCard,
}
