use serde::{Deserialize, Serialize};

use super::grid::AvailabilityGrid;
use super::summary::OccupancySummary;

/// Query of `GET /api/d100/availability?year=2024&month=3`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityRequest {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    /// Period in format "YYYY-MM"
    pub period: String,
    pub grid: AvailabilityGrid,
    pub summary: OccupancySummary,
}
