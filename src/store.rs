use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{
    Reservation, ReservationSource, ReservationStatus, RestaurantStats, Review, ReviewStatus,
    Sentiment,
};

/// Ephemeral dashboard data. Lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct DashboardStore {
    pub reservations: Vec<Reservation>,
    pub reviews: Vec<Review>,
    pub stats: RestaurantStats,
}

impl DashboardStore {
    pub fn new(reservations: Vec<Reservation>, reviews: Vec<Review>) -> Self {
        Self {
            reservations,
            reviews,
            stats: RestaurantStats::default(),
        }
    }

    /// The demo data the dashboard ships with.
    pub fn seeded() -> Self {
        Self::new(seed_reservations(), seed_reviews())
    }

    pub fn review(&self, id: &str) -> Option<&Review> {
        self.reviews.iter().find(|r| r.id == id)
    }

    pub fn review_mut(&mut self, id: &str) -> Option<&mut Review> {
        self.reviews.iter_mut().find(|r| r.id == id)
    }

    pub fn pending_reviews(&self) -> usize {
        self.reviews
            .iter()
            .filter(|r| r.status == ReviewStatus::Pending)
            .count()
    }

    pub fn confirmed_reservations(&self) -> usize {
        self.reservations
            .iter()
            .filter(|r| r.status == ReservationStatus::Confirmed)
            .count()
    }
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, 0))
        .unwrap_or_default()
}

fn reservation(
    id: &str,
    guest_name: &str,
    party_size: u32,
    date_time: NaiveDateTime,
    status: ReservationStatus,
    source: ReservationSource,
) -> Reservation {
    Reservation {
        id: id.to_string(),
        guest_name: guest_name.to_string(),
        party_size,
        date_time,
        status,
        source,
    }
}

fn seed_reservations() -> Vec<Reservation> {
    use ReservationSource::*;
    use ReservationStatus::*;

    vec![
        reservation("1", "David Chen", 4, at(2023, 11, 20, 19, 30), Confirmed, Web),
        reservation("2", "Sarah Miller", 2, at(2023, 11, 20, 20, 15), Confirmed, Sms),
        reservation("3", "James Wilson", 6, at(2023, 11, 21, 18, 0), Pending, Phone),
        reservation("4", "Emily Blunt", 2, at(2023, 11, 20, 18, 0), Confirmed, Web),
    ]
}

fn review(
    id: &str,
    author: &str,
    rating: u8,
    comment: &str,
    date: &str,
    sentiment: Sentiment,
) -> Review {
    Review {
        id: id.to_string(),
        author: author.to_string(),
        rating,
        comment: comment.to_string(),
        date: date.to_string(),
        sentiment,
        status: ReviewStatus::Pending,
        ai_draft: None,
    }
}

fn seed_reviews() -> Vec<Review> {
    vec![
        review(
            "1",
            "Jessica L.",
            5,
            "The sea bass was incredible! Waitstaff was very attentive. We will be back!",
            "2 hours ago",
            Sentiment::Positive,
        ),
        review(
            "2",
            "Mark T.",
            2,
            "Waiting 45 minutes for a confirmed table is unacceptable. \
             Food was okay, but service was slow.",
            "5 hours ago",
            Sentiment::Negative,
        ),
        review(
            "3",
            "Elena G.",
            4,
            "Great cocktails, a bit loud though. Good vibe overall.",
            "1 day ago",
            Sentiment::Neutral,
        ),
    ]
}
