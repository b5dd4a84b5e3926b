//! Dashboard reports over mocked order data.
//!
//! There is no order pipeline; the repository serves the fixed snapshot
//! the dashboard has always shown. Derived figures (revenue per product,
//! stat totals) are still computed, not stored, so the numbers cannot
//! disagree with the rows.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use cubed_core::types::{OrderId, OrderStatus};

/// One order row on the dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: OrderId,
    pub customer: String,
    pub product: String,
    pub amount: Decimal,
    pub status: OrderStatus,
    pub date: NaiveDate,
}

/// Sales figures for a top product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub name: String,
    pub sales: u32,
    pub revenue: Decimal,
}

/// The dashboard summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: u32,
    pub total_orders: u32,
    pub total_revenue: Decimal,
    pub total_users: u32,
    pub recent_orders: Vec<OrderSummary>,
    pub top_products: Vec<ProductSales>,
}

/// In-memory source of dashboard data.
pub struct ReportsRepository {
    total_products: u32,
    total_orders: u32,
    total_revenue: Decimal,
    total_users: u32,
    recent_orders: Vec<OrderSummary>,
    top_products: Vec<ProductSales>,
}

impl ReportsRepository {
    /// The snapshot the dashboard ships with.
    #[must_use]
    pub fn seeded() -> Self {
        let date = |y: i32, m: u32, d: u32| {
            NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
        };

        Self {
            total_products: 24,
            total_orders: 156,
            total_revenue: Decimal::new(1_245_080, 2),
            total_users: 89,
            recent_orders: vec![
                OrderSummary {
                    id: OrderId::new("1"),
                    customer: "Maria Silva".to_owned(),
                    product: "Adjustable Phone Stand".to_owned(),
                    amount: Decimal::new(2590, 2),
                    status: OrderStatus::Completed,
                    date: date(2024, 1, 15),
                },
                OrderSummary {
                    id: OrderId::new("2"),
                    customer: "Joao Santos".to_owned(),
                    product: "Detailed Dragon Miniature".to_owned(),
                    amount: Decimal::new(4500, 2),
                    status: OrderStatus::Pending,
                    date: date(2024, 1, 14),
                },
                OrderSummary {
                    id: OrderId::new("3"),
                    customer: "Ana Costa".to_owned(),
                    product: "Universal Cable Organizer".to_owned(),
                    amount: Decimal::new(1990, 2),
                    status: OrderStatus::Processing,
                    date: date(2024, 1, 13),
                },
            ],
            top_products: vec![
                ProductSales {
                    name: "Adjustable Phone Stand".to_owned(),
                    sales: 24,
                    revenue: Decimal::new(62_160, 2),
                },
                ProductSales {
                    name: "Universal Cable Organizer".to_owned(),
                    sales: 18,
                    revenue: Decimal::new(35_820, 2),
                },
                ProductSales {
                    name: "Detailed Dragon Miniature".to_owned(),
                    sales: 15,
                    revenue: Decimal::new(67_500, 2),
                },
            ],
        }
    }

    /// The dashboard summary.
    #[must_use]
    pub fn dashboard_stats(&self) -> DashboardStats {
        DashboardStats {
            total_products: self.total_products,
            total_orders: self.total_orders,
            total_revenue: self.total_revenue,
            total_users: self.total_users,
            recent_orders: self.recent_orders.clone(),
            top_products: self.top_products.clone(),
        }
    }

    /// Recent orders, optionally filtered by status.
    #[must_use]
    pub fn orders(&self, status: Option<OrderStatus>) -> Vec<OrderSummary> {
        self.recent_orders
            .iter()
            .filter(|order| status.is_none_or(|wanted| order.status == wanted))
            .cloned()
            .collect()
    }

    /// Look up one order.
    #[must_use]
    pub fn order(&self, id: &OrderId) -> Option<OrderSummary> {
        self.recent_orders.iter().find(|order| &order.id == id).cloned()
    }
}
