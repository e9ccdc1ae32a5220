//! Back-office dashboard figures.

use serde::Serialize;

use crate::api::StorefrontApi;
use crate::catalog::Event;
use crate::checkout::OrderRecord;
use crate::money::{Currency, Money};
use crate::CommerceError;

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_events: usize,
    pub total_orders: usize,
    pub total_revenue: Money,
}

impl DashboardSummary {
    pub fn from_records(events: &[Event], orders: &[OrderRecord]) -> Self {
        Self {
            total_events: events.len(),
            total_orders: orders.len(),
            total_revenue: Money::sum(orders.iter().map(|o| o.order.total()), Currency::EUR),
        }
    }
}

/// Load events and orders concurrently and summarise them.
pub async fn load_dashboard(api: &dyn StorefrontApi) -> Result<DashboardSummary, CommerceError> {
    let (events, orders) = futures::try_join!(api.list_events(), api.list_orders())?;
    Ok(DashboardSummary::from_records(&events, &orders))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::OrderRequest;
    use crate::testing::FakeStorefront;

    fn order(total: f64) -> OrderRequest {
        OrderRequest {
            total_price: total,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_dashboard_sums_revenue() {
        let api = FakeStorefront::new();
        api.insert_event(Event::new("1", "A", 10.0));
        api.insert_event(Event::new("2", "B", 20.0));
        api.insert_order(order(25.5));
        api.insert_order(order(40.0));
        api.insert_order(order(0.1));

        let summary = load_dashboard(&api).await.unwrap();
        assert_eq!(summary.total_events, 2);
        assert_eq!(summary.total_orders, 3);
        assert_eq!(summary.total_revenue.amount_cents, 6560);
    }

    #[tokio::test]
    async fn test_empty_dashboard() {
        let summary = load_dashboard(&FakeStorefront::new()).await.unwrap();
        assert_eq!(summary.total_events, 0);
        assert!(summary.total_revenue.is_zero());
    }

    #[tokio::test]
    async fn test_dashboard_failure_propagates() {
        let api = FakeStorefront::new();
        api.fail_on("list_orders");
        assert!(load_dashboard(&api).await.is_err());
    }
}
