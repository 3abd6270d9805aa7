pub mod booking;
pub mod validation;

pub use booking::AppointmentBookingService;
pub use validation::validate_booking_request;
