use serde::{Deserialize, Serialize};

/// Headline figures shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantStats {
    pub no_show_rate: f64,
    pub table_utilization: f64,
    pub star_rating: f64,
    pub response_rate: f64,
    pub revenue_gain: f64,
}

impl Default for RestaurantStats {
    fn default() -> Self {
        Self {
            no_show_rate: 8.4,
            table_utilization: 82.0,
            star_rating: 4.8,
            response_rate: 98.0,
            revenue_gain: 15400.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub restaurant_name: String,
    pub stats: RestaurantStats,
    pub pending_reviews: usize,
    pub confirmed_reservations: usize,
    pub total_reservations: usize,
}
