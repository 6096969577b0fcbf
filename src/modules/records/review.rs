use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{decimal_field, string_field, timestamp_field};
use super::{RecordKind, SourceRecord};

/// Customer review left after a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: Option<String>,
    pub booking_id: Option<String>,
    /// Overall rating, 1 to 5
    pub rating: Option<Decimal>,
    pub cleanliness_rating: Option<Decimal>,
    pub communication_rating: Option<Decimal>,
    pub vehicle_condition_rating: Option<Decimal>,
    pub value_rating: Option<Decimal>,
    pub vendor_response: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// The four sub-ratings of a review, present only when all four are
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubRatings {
    pub cleanliness: Decimal,
    pub communication: Decimal,
    pub vehicle_condition: Decimal,
    pub value: Decimal,
}

impl Review {
    pub const FIELDS: &'static [&'static str] = &[
        "id",
        "booking_id",
        "rating",
        "cleanliness_rating",
        "communication_rating",
        "vehicle_condition_rating",
        "value_rating",
        "vendor_response",
        "created_at",
    ];

    pub fn sub_ratings(&self) -> Option<SubRatings> {
        Some(SubRatings {
            cleanliness: self.cleanliness_rating?,
            communication: self.communication_rating?,
            vehicle_condition: self.vehicle_condition_rating?,
            value: self.value_rating?,
        })
    }

    /// Overall rating rounded to a whole star, halves rounding up
    pub fn stars(&self) -> Option<u8> {
        let rounded = self
            .rating?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        (1..=5u8).find(|star| Decimal::from(*star) == rounded)
    }

    pub fn has_vendor_response(&self) -> bool {
        self.vendor_response.is_some()
    }
}

impl SourceRecord for Review {
    const KIND: RecordKind = RecordKind::Reviews;

    fn from_row(row: &Value) -> Self {
        Self {
            id: string_field(row, "id"),
            booking_id: string_field(row, "booking_id"),
            rating: decimal_field(row, "rating"),
            cleanliness_rating: decimal_field(row, "cleanliness_rating"),
            communication_rating: decimal_field(row, "communication_rating"),
            vehicle_condition_rating: decimal_field(row, "vehicle_condition_rating"),
            value_rating: decimal_field(row, "value_rating"),
            vendor_response: string_field(row, "vendor_response"),
            created_at: timestamp_field(row, "created_at"),
        }
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}
