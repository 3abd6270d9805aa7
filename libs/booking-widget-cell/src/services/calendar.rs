use chrono::{Datelike, Days, NaiveDate, NaiveTime, Weekday};

use crate::models::{BookingCalendar, CalendarDay, TimeSlot};

/// Number of consecutive days, starting today, a patient can pick from.
pub const BOOKING_WINDOW_DAYS: u64 = 14;

/// Consultation start times, morning and afternoon sessions.
pub const SLOT_TIMES: [&str; 12] = [
    "09:00", "09:30", "10:00", "10:30", "11:00", "11:30",
    "14:00", "14:30", "15:00", "15:30", "16:00", "16:30",
];

pub fn booking_window(today: NaiveDate) -> Vec<CalendarDay> {
    today
        .iter_days()
        .take(BOOKING_WINDOW_DAYS as usize)
        .map(|date| CalendarDay {
            date,
            weekday: date.format("%a").to_string(),
            day: date.day(),
            month: date.format("%b").to_string(),
            is_weekend: matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
        })
        .collect()
}

pub fn is_bookable_date(today: NaiveDate, date: NaiveDate) -> bool {
    match today.checked_add_days(Days::new(BOOKING_WINDOW_DAYS)) {
        Some(end) => date >= today && date < end,
        None => false,
    }
}

pub fn time_slots() -> Vec<TimeSlot> {
    SLOT_TIMES
        .iter()
        .filter_map(|time| {
            NaiveTime::parse_from_str(time, "%H:%M").ok().map(|parsed| TimeSlot {
                time: (*time).to_string(),
                label: parsed.format("%-I:%M %p").to_string(),
            })
        })
        .collect()
}

pub fn is_offered_time(time: &str) -> bool {
    SLOT_TIMES.contains(&time)
}

pub fn booking_calendar(today: NaiveDate) -> BookingCalendar {
    BookingCalendar {
        days: booking_window(today),
        time_slots: time_slots(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_covers_fourteen_days_from_today() {
        // 2025-06-01 is a Sunday
        let days = booking_window(date(2025, 6, 1));

        assert_eq!(days.len(), 14);
        assert_eq!(days[0].date, date(2025, 6, 1));
        assert_eq!(days[0].weekday, "Sun");
        assert!(days[0].is_weekend);
        assert!(!days[1].is_weekend);
        assert_eq!(days[13].date, date(2025, 6, 14));
        assert_eq!(days[13].month, "Jun");
    }

    #[test]
    fn test_window_crosses_month_boundary() {
        let days = booking_window(date(2025, 12, 25));
        assert_eq!(days[7].date, date(2026, 1, 1));
        assert_eq!(days[7].day, 1);
        assert_eq!(days[7].month, "Jan");
    }

    #[test]
    fn test_bookable_dates() {
        let today = date(2025, 6, 1);
        assert!(is_bookable_date(today, today));
        assert!(is_bookable_date(today, date(2025, 6, 14)));
        assert!(!is_bookable_date(today, date(2025, 6, 15)));
        assert!(!is_bookable_date(today, date(2025, 5, 31)));
    }

    #[test]
    fn test_time_slot_labels() {
        let slots = time_slots();
        assert_eq!(slots.len(), 12);
        assert_eq!(slots[0].label, "9:00 AM");
        assert_eq!(slots[6].time, "14:00");
        assert_eq!(slots[6].label, "2:00 PM");
        assert_eq!(slots[11].label, "4:30 PM");
    }

    #[test]
    fn test_offered_times() {
        assert!(is_offered_time("10:00"));
        assert!(!is_offered_time("12:00"));
        assert!(!is_offered_time("9:00"));
    }
}
