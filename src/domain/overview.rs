//! Aggregates behind the two overview charts.
use serde::{Deserialize, Serialize};

pub const COLOR_ACTIVE: &str = "#10b981";
pub const COLOR_PENDING: &str = "#f59e0b";
pub const COLOR_FAILED: &str = "#ef4444";
pub const COLOR_EMPTY: &str = "#e5e7eb";

/// Counts returned by `/ticket/overview-ticket`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct TicketOverview {
    pub total_tickets: u64,
    pub total_available: u64,
    pub total_used: u64,
}

/// Counts and revenue returned by `/order/overview-order`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderOverview {
    pub total_orders: u64,
    pub total_success: u64,
    pub total_failed: u64,
    pub total_pending: u64,
    /// Decimal string, e.g. `"1250000.00"`.
    pub revenue: String,
}

/// One segment of a donut chart.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ChartSlice {
    pub label: &'static str,
    pub value: u64,
    /// Share of the total in percent, one decimal.
    pub percent: f64,
    /// Cumulative percent before this slice, used to lay out the ring.
    pub offset: f64,
    pub color: &'static str,
}

/// Builds slices against `total`. A zero total yields a single placeholder.
pub fn build_slices(total: u64, parts: &[(&'static str, u64, &'static str)]) -> Vec<ChartSlice> {
    if total == 0 {
        return vec![ChartSlice {
            label: "Chưa có dữ liệu",
            value: 0,
            percent: 100.0,
            offset: 0.0,
            color: COLOR_EMPTY,
        }];
    }

    let mut offset = 0.0;
    parts
        .iter()
        .map(|&(label, value, color)| {
            let percent = round_tenth(value as f64 / total as f64 * 100.0);
            let slice = ChartSlice {
                label,
                value,
                percent,
                offset,
                color,
            };
            offset = round_tenth(offset + percent);
            slice
        })
        .collect()
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl TicketOverview {
    pub fn slices(&self) -> Vec<ChartSlice> {
        build_slices(
            self.total_tickets,
            &[
                ("Đang hoạt động", self.total_available, COLOR_ACTIVE),
                ("Đã sử dụng", self.total_used, COLOR_PENDING),
            ],
        )
    }
}

impl OrderOverview {
    pub fn slices(&self) -> Vec<ChartSlice> {
        build_slices(
            self.total_orders,
            &[
                ("Thành công", self.total_success, COLOR_ACTIVE),
                ("Thất bại", self.total_failed, COLOR_FAILED),
                ("Chờ xử lý", self.total_pending, COLOR_PENDING),
            ],
        )
    }

    /// Revenue as a number; unparsable strings count as zero.
    pub fn revenue_amount(&self) -> f64 {
        self.revenue.trim().parse().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_slices_report_share_of_total() {
        let overview = TicketOverview {
            total_tickets: 200,
            total_available: 150,
            total_used: 50,
        };
        let slices = overview.slices();
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].percent, 75.0);
        assert_eq!(slices[1].percent, 25.0);
        assert_eq!(slices[1].offset, 75.0);
        assert_eq!(slices[1].color, COLOR_PENDING);
    }

    #[test]
    fn zero_total_renders_placeholder() {
        let slices = OrderOverview::default().slices();
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].label, "Chưa có dữ liệu");
        assert_eq!(slices[0].color, COLOR_EMPTY);
    }

    #[test]
    fn order_overview_parses_camel_case_and_revenue() {
        let overview: OrderOverview = serde_json::from_str(
            r#"{"totalOrders": 3, "totalSuccess": 1, "totalFailed": 1,
                "totalPending": 1, "revenue": "1250000.50"}"#,
        )
        .unwrap();
        assert_eq!(overview.total_pending, 1);
        assert_eq!(overview.revenue_amount(), 1_250_000.5);
        assert_eq!(overview.slices()[0].percent, 33.3);

        let broken = OrderOverview {
            revenue: "n/a".to_string(),
            ..OrderOverview::default()
        };
        assert_eq!(broken.revenue_amount(), 0.0);
    }
}
