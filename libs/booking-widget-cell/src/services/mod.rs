pub mod calendar;
pub mod client;
pub mod embed;

pub use calendar::{booking_calendar, booking_window, is_bookable_date, is_offered_time, time_slots};
pub use client::{
    AppointmentSubmission, BookingSubmitter, HttpBookingClient, SubmissionError, SubmissionReceipt,
};
pub use embed::{adjust_color, resolve_widget_config};
