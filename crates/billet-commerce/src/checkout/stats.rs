//! Storefront statistics document.

use crate::ids::StatsId;
use serde::{Deserialize, Serialize};

/// The single `stats` record.
///
/// Fields this crate does not know about are carried through untouched, so
/// a read-modify-write never drops them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<StatsId>,
    #[serde(default)]
    pub total_tickets_sold: i64,
    #[serde(default)]
    pub events_hosted: i64,
    #[serde(default)]
    pub happy_customers: i64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl StatsSnapshot {
    /// The snapshot after one more order of `tickets` tickets.
    pub fn with_order(&self, tickets: i64) -> Self {
        Self {
            total_tickets_sold: self.total_tickets_sold.saturating_add(tickets),
            happy_customers: self.happy_customers.saturating_add(1),
            ..self.clone()
        }
    }
}
