pub mod availability;
pub mod booking;
pub mod schedule;

pub use availability::AvailabilityCalculator;
pub use booking::BookingService;
pub use schedule::{ClinicSchedule, OpeningWindow};
