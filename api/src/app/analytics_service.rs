//! Analytics service
//!
//! Aggregates order data for the admin dashboard: revenue, volume, status
//! distribution, hourly load and top-selling items over an optional date
//! range. Cancelled orders count toward volume but never toward revenue.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Timelike, Utc};
use serde::Serialize;

use crate::domain::entities::{Order, OrderStatus};
use crate::domain::ports::{BranchRepository, OrderRepository};
use crate::error::AppError;

/// Chart colors keyed by status, as rendered by the console
fn status_color(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Done => "#10B981",
        OrderStatus::Cancelled => "#EF4444",
        OrderStatus::Pending => "#F59E0B",
        OrderStatus::Accepted => "#3B82F6",
        OrderStatus::InKitchen => "#8B5CF6",
        OrderStatus::OutForDelivery => "#6366F1",
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BranchRevenue {
    pub name: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HourlyCount {
    pub hour: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusCount {
    pub name: String,
    pub value: u64,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopItem {
    pub name: String,
    pub sales: u64,
    pub revenue: f64,
}

/// Dashboard aggregate for a date range
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsData {
    pub total_revenue: f64,
    pub total_orders: u64,
    pub avg_delivery_time_minutes: f64,
    pub avg_order_value: f64,
    pub revenue_per_branch: Vec<BranchRevenue>,
    pub orders_per_hour: Vec<HourlyCount>,
    pub orders_by_status: Vec<StatusCount>,
    pub top_items: Vec<TopItem>,
}

/// Service computing dashboard aggregates
pub struct AnalyticsService<OR, BR>
where
    OR: OrderRepository,
    BR: BranchRepository,
{
    orders: Arc<OR>,
    branches: Arc<BR>,
}

impl<OR, BR> AnalyticsService<OR, BR>
where
    OR: OrderRepository,
    BR: BranchRepository,
{
    pub fn new(orders: Arc<OR>, branches: Arc<BR>) -> Self {
        Self { orders, branches }
    }

    /// Compute analytics over `[start, end]` (inclusive whole days, UTC).
    /// Omitted bounds default to all recorded history.
    pub async fn get_analytics(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<AnalyticsData, AppError> {
        let start = start
            .map(|d| day_start(d))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let end = end.map(|d| day_end(d)).unwrap_or(DateTime::<Utc>::MAX_UTC);

        let orders = self.orders.find_created_between(start, end).await?;
        let branches = self.branches.find_all().await?;

        let valid: Vec<&Order> = orders
            .iter()
            .filter(|o| o.status != OrderStatus::Cancelled)
            .collect();

        let total_revenue: f64 = valid.iter().map(|o| o.total_price).sum();
        let total_orders = orders.len() as u64;
        let avg_order_value = if valid.is_empty() {
            0.0
        } else {
            total_revenue / valid.len() as f64
        };

        // Average creation-to-done time over completed orders
        let delivery_minutes: Vec<f64> = orders
            .iter()
            .filter_map(|o| o.done_at.map(|done| (done - o.created_at).num_seconds()))
            .map(|secs| secs as f64 / 60.0)
            .collect();
        let avg_delivery_time_minutes = if delivery_minutes.is_empty() {
            0.0
        } else {
            delivery_minutes.iter().sum::<f64>() / delivery_minutes.len() as f64
        };

        let revenue_per_branch = branches
            .iter()
            .map(|b| BranchRevenue {
                name: b.name.clone(),
                revenue: valid
                    .iter()
                    .filter(|o| o.branch_id == b.id)
                    .map(|o| o.total_price)
                    .sum(),
            })
            .collect();

        let mut per_hour = [0u64; 24];
        for order in &valid {
            per_hour[order.created_at.hour() as usize] += 1;
        }
        let orders_per_hour = per_hour
            .iter()
            .enumerate()
            .map(|(hour, &count)| HourlyCount {
                hour: format!("{:02}:00", hour),
                count,
            })
            .collect();

        let mut status_counts: HashMap<OrderStatus, u64> = HashMap::new();
        for order in &orders {
            *status_counts.entry(order.status).or_default() += 1;
        }
        let mut orders_by_status: Vec<StatusCount> = status_counts
            .into_iter()
            .map(|(status, value)| StatusCount {
                name: status.to_string(),
                value,
                color: status_color(status).to_string(),
            })
            .collect();
        orders_by_status.sort_by(|a, b| b.value.cmp(&a.value).then(a.name.cmp(&b.name)));

        let mut item_sales: HashMap<String, (u64, f64)> = HashMap::new();
        for order in &valid {
            for item in &order.items {
                let entry = item_sales.entry(item.name.clone()).or_default();
                entry.0 += u64::from(item.qty);
                entry.1 += item.price * f64::from(item.qty);
            }
        }
        let mut top_items: Vec<TopItem> = item_sales
            .into_iter()
            .map(|(name, (sales, revenue))| TopItem {
                name,
                sales,
                revenue,
            })
            .collect();
        top_items.sort_by(|a, b| b.sales.cmp(&a.sales).then(a.name.cmp(&b.name)));
        top_items.truncate(5);

        Ok(AnalyticsData {
            total_revenue,
            total_orders,
            avg_delivery_time_minutes,
            avg_order_value,
            revenue_per_branch,
            orders_per_hour,
            orders_by_status,
            top_items,
        })
    }
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap_or_default())
}

fn day_end(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_milli_opt(23, 59, 59, 999).unwrap_or_default())
}
