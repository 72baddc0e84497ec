pub mod ai;
pub mod booking;
pub mod reservations;
pub mod reviews;
