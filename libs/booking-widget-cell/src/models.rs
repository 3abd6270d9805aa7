use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ==============================================================================
// WIDGET EMBED CONFIGURATION
// ==============================================================================

pub const DEFAULT_BUTTON_TEXT: &str = "Book Appointment";
pub const DEFAULT_PRIMARY_COLOR: &str = "#8B5C9E";
/// Hover shade offset applied to each colour channel.
pub const DARKEN_AMOUNT: i16 = -20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    #[default]
    Default,
    Outline,
    Minimal,
}

impl fmt::Display for ButtonStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonStyle::Default => write!(f, "default"),
            ButtonStyle::Outline => write!(f, "outline"),
            ButtonStyle::Minimal => write!(f, "minimal"),
        }
    }
}

impl FromStr for ButtonStyle {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(ButtonStyle::Default),
            "outline" => Ok(ButtonStyle::Outline),
            "minimal" => Ok(ButtonStyle::Minimal),
            _ => Err(WidgetError::InvalidButtonStyle(s.to_string())),
        }
    }
}

/// Options a host page passes when embedding the widget. Anything left out
/// falls back to the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetConfigQuery {
    pub button_style: Option<String>,
    pub button_text: Option<String>,
    pub primary_color: Option<String>,
    pub domain: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    pub button_style: ButtonStyle,
    pub button_text: String,
    pub primary_color: String,
    pub primary_color_dark: String,
    pub domain: String,
    pub iframe_src: String,
}

// ==============================================================================
// CALENDAR
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// `HH:MM`, 24 hour.
    pub time: String,
    /// e.g. `2:30 PM`
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub weekday: String,
    pub day: u32,
    pub month: String,
    pub is_weekend: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCalendar {
    pub days: Vec<CalendarDay>,
    pub time_slots: Vec<TimeSlot>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    #[error("Unknown button style '{0}', expected default, outline or minimal")]
    InvalidButtonStyle(String),

    #[error("Invalid colour '{0}', expected #RRGGBB")]
    InvalidColor(String),

    #[error("Invalid widget domain '{0}', expected an http(s) origin")]
    InvalidDomain(String),
}
