pub mod conversation;
pub mod intent;
pub mod reservation;
pub mod review;
pub mod stats;

pub use conversation::{BookingSession, Turn, TurnRole};
pub use intent::BookingIntent;
pub use reservation::{Reservation, ReservationSource, ReservationStatus};
pub use review::{InvalidTransition, Review, ReviewStatus, Sentiment};
pub use stats::{DashboardSummary, RestaurantStats};
