use serde::{Deserialize, Serialize};

use crate::format::{format_distance, format_speed, format_time};
use crate::PaceResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusStyle {
    Warning,
    Success,
}

impl StatusStyle {
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusStyle::Warning => "speed-warning",
            StatusStyle::Success => "speed-success",
        }
    }
}

/// Results panel content, already formatted for display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaceReport {
    pub current_speed: String,
    pub required_speed: String,
    pub remaining_distance: String,
    pub remaining_time: String,
    pub status_message: String,
    pub status_style: StatusStyle,
}

impl From<&PaceResult> for PaceReport {
    fn from(result: &PaceResult) -> Self {
        Self {
            current_speed: format_speed(result.current_speed_kmh),
            required_speed: format_speed(result.required_speed_kmh),
            remaining_distance: format_distance(result.remaining_distance_km),
            remaining_time: format_time(result.remaining_time_h),
            status_message: result.status.message(),
            status_style: result.status.style(),
        }
    }
}
