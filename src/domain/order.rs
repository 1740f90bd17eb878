use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::query::{BaseQuery, FieldKind, FilterField, FilterValue, ResourceQuery};
use crate::domain::types::{NamedRef, Resource};

/// Statuses offered by the order filter.
pub const ORDER_STATUSES: &[(&str, &str)] = &[
    ("pending", "Chờ xử lý"),
    ("success", "Thành công"),
    ("failed", "Thất bại"),
];

pub const PAYMENT_METHODS: &[(&str, &str)] = &[
    ("momo", "Momo"),
    ("paypal", "PayPal"),
    ("visa", "Visa"),
    ("vnpay", "VnPay"),
    ("zalopay", "ZaloPay"),
];

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OrderUser {
    pub id: String,
    pub username: String,
    pub email: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Promotion {
    pub title: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OrderSchedule {
    pub id: i64,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PaymentMethod {
    pub method_name: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Transaction {
    pub transaction_code: String,
    pub transaction_date: String,
    pub status: String,
    #[serde(rename = "PaymentMethod")]
    pub payment_method: Option<PaymentMethod>,
}

/// Order as returned by `/order/admin`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Order {
    pub id: i64,
    pub order_date: String,
    pub total_prices: String,
    pub status: String,
    pub qr_code: Option<String>,
    pub user: Option<OrderUser>,
    pub promotion: Option<Promotion>,
    pub cinemaroom: Option<NamedRef>,
    pub schedule: Option<OrderSchedule>,
    pub movie: Option<NamedRef>,
    #[serde(rename = "orderDetails")]
    pub order_details: Vec<Value>,
    #[serde(rename = "orderExtras")]
    pub order_extras: Vec<Value>,
    pub transaction: Option<Transaction>,
}

impl Order {
    /// Display label for any status the API may report.
    pub fn status_label(&self) -> &str {
        match self.status.as_str() {
            "pending" => "Chờ xử lý",
            "confirmed" => "Đã xác nhận",
            "success" => "Thành công",
            "completed" => "Hoàn thành",
            "cancelled" => "Đã hủy",
            "failed" => "Thất bại",
            other => other,
        }
    }

    pub fn payment_method_name(&self) -> Option<&str> {
        self.transaction
            .as_ref()
            .and_then(|transaction| transaction.payment_method.as_ref())
            .map(|method| method.method_name.as_str())
    }
}

const FIELDS: &[FilterField] = &[
    FilterField::new("status", "Trạng thái", FieldKind::Choice(ORDER_STATUSES)),
    FilterField::new("email", "Email", FieldKind::Text),
    FilterField::new(
        "paymentMethod",
        "Phương thức thanh toán",
        FieldKind::Choice(PAYMENT_METHODS),
    ),
    FilterField::new("startDate", "Từ ngày", FieldKind::Date),
    FilterField::new("endDate", "Đến ngày", FieldKind::Date),
];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderQuery {
    pub base: BaseQuery,
    pub status: Option<String>,
    pub email: Option<String>,
    pub payment_method: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ResourceQuery for OrderQuery {
    type Row = Order;

    const RESOURCE: Resource = Resource::Orders;
    const SORT_KEYS: &'static [&'static str] = &[
        "order.id",
        "user.username",
        "order.total_prices",
        "order.order_date",
        "paymentMethod.name",
        "order.status",
        "movie.name",
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
        let value = match key {
            "status" => &self.status,
            "email" => &self.email,
            "paymentMethod" => &self.payment_method,
            "startDate" => &self.start_date,
            "endDate" => &self.end_date,
            _ => return None,
        };
        value.clone().map(FilterValue::Text)
    }

    fn set_filter_value(&mut self, key: &str, value: Option<FilterValue>) {
        let value = value.and_then(FilterValue::into_text);
        match key {
            "status" => self.status = value,
            "email" => self.email = value,
            "paymentMethod" => self.payment_method = value,
            "startDate" => self.start_date = value,
            "endDate" => self.end_date = value,
            _ => {}
        }
    }
}
