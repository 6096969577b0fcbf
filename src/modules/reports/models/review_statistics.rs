use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::modules::metrics::TimeRange;

/// Star values a review rating is bucketed into
pub const STAR_VALUES: [u8; 5] = [1, 2, 3, 4, 5];

/// Customer review summary over a period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewStatistics {
    /// Resolved reporting window
    pub period: TimeRange,
    pub total_reviews: u64,
    pub average_rating: Decimal,
    /// Review count per star, every star present
    pub rating_distribution: BTreeMap<u8, u64>,
    /// Averages over reviews carrying all four sub-ratings
    pub sub_ratings: SubRatingAverages,
    /// Reviews that carry all four sub-ratings
    pub complete_sub_rating_count: u64,
    /// Share of reviews the vendor answered, as a percentage
    pub response_rate: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubRatingAverages {
    pub cleanliness: Decimal,
    pub communication: Decimal,
    pub vehicle_condition: Decimal,
    pub value: Decimal,
}

impl ReviewStatistics {
    pub fn is_empty(&self) -> bool {
        self.total_reviews == 0
    }
}
