//! Dashboard prediction history entries

use serde::{Deserialize, Serialize};

/// One row of the dashboard's session-local prediction history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    /// Wall-clock time of the prediction, `YYYY-MM-DD HH:MM`
    pub timestamp: String,
    pub district: String,
    pub crop: String,
    pub planting_date: String,
    pub yield_t_ha: f64,
    pub message: String,
}

impl HistoryEntry {
    /// Build a history entry from a prediction response.
    pub fn from_estimate(timestamp: String, estimate: &crate::models::YieldEstimate) -> Self {
        Self {
            timestamp,
            district: estimate.district.clone(),
            crop: estimate.crop.clone(),
            planting_date: estimate.planting_date.clone(),
            yield_t_ha: estimate.predicted_yield_t_ha,
            message: estimate.message.clone(),
        }
    }
}
