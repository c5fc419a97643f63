use serde::{Deserialize, Serialize};

/// Computed totals of one order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillResult {
    pub sub_total: f64,
    pub vat: f64,
    pub total: f64,
}
