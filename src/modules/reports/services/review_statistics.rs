use super::round2;
use crate::modules::metrics::aggregators::{distribution, mean, rate};
use crate::modules::metrics::TimeRange;
use crate::modules::records::review::SubRatings;
use crate::modules::records::Review;
use crate::modules::reports::models::{ReviewStatistics, SubRatingAverages, STAR_VALUES};

/// Summarize customer reviews over `period`
///
/// Sub-rating averages only consider reviews carrying all four sub-ratings;
/// the overall average still includes every rated review.
pub fn assemble_review_statistics(period: TimeRange, reviews: &[Review]) -> ReviewStatistics {
    let complete: Vec<SubRatings> = reviews.iter().filter_map(Review::sub_ratings).collect();

    let sub_ratings = SubRatingAverages {
        cleanliness: round2(mean(&complete, |s| Some(s.cleanliness))),
        communication: round2(mean(&complete, |s| Some(s.communication))),
        vehicle_condition: round2(mean(&complete, |s| Some(s.vehicle_condition))),
        value: round2(mean(&complete, |s| Some(s.value))),
    };

    ReviewStatistics {
        period,
        total_reviews: reviews.len() as u64,
        average_rating: round2(mean(reviews, |r| r.rating)),
        rating_distribution: distribution(reviews, Review::stars, &STAR_VALUES),
        sub_ratings,
        complete_sub_rating_count: complete.len() as u64,
        response_rate: round2(rate(reviews, Review::has_vendor_response)),
    }
}
