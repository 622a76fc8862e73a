//! Core race pace computation library: input validation, current/required speed and
//! the pace status shown to a runner chasing a target finish time.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod format;
pub mod history;
pub mod report;

pub use format::{format_distance, format_raw, format_speed, format_time};
pub use history::{History, HistoryRecord, Session, Submission, HISTORY_COLUMNS};
pub use report::{PaceReport, StatusStyle};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("Total distance must be greater than 0")]
    TotalDistanceNotPositive,
    #[error("Covered distance cannot be negative")]
    CoveredDistanceNegative,
    #[error("Covered distance cannot exceed total distance")]
    CoveredExceedsTotal,
    #[error("Elapsed time cannot be negative")]
    ElapsedTimeNegative,
    #[error("Target time must be greater than 0")]
    TargetTimeNotPositive,
    #[error("Elapsed time cannot be greater than or equal to target time")]
    ElapsedNotBeforeTarget,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaceError {
    #[error("invalid race input: {}", error_messages(.0).join("; "))]
    Invalid(Vec<ValidationError>),
}

/// The four form fields: distances in kilometers, times in hours.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RaceInput {
    pub total_distance_km: f64,
    pub covered_distance_km: f64,
    pub elapsed_time_h: f64,
    pub target_time_h: f64,
}

impl RaceInput {
    pub fn new(
        total_distance_km: f64,
        covered_distance_km: f64,
        elapsed_time_h: f64,
        target_time_h: f64,
    ) -> Self {
        Self {
            total_distance_km,
            covered_distance_km,
            elapsed_time_h,
            target_time_h,
        }
    }

    /// Build an input from raw field text, coercing each field with [`coerce_number`].
    pub fn from_fields(total: &str, covered: &str, elapsed: &str, target: &str) -> Self {
        Self::new(
            coerce_number(total),
            coerce_number(covered),
            coerce_number(elapsed),
            coerce_number(target),
        )
    }
}

/// Coerce raw field text to a number. Blank text is `0`; anything unparseable is NaN,
/// which the validation checks then reject.
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusKind {
    BehindPace { deficit_kmh: f64 },
    TargetExceeded,
    OnTrack,
}

impl StatusKind {
    pub fn message(&self) -> String {
        match self {
            StatusKind::BehindPace { deficit_kmh } => format!(
                "⚠️ You need to increase your pace by {} to meet your target time!",
                format_speed(*deficit_kmh)
            ),
            StatusKind::TargetExceeded => "⚠️ Your target time has already been exceeded!".into(),
            StatusKind::OnTrack => "✅ You're on track to meet your target time!".into(),
        }
    }

    pub fn style(&self) -> StatusStyle {
        match self {
            StatusKind::BehindPace { .. } | StatusKind::TargetExceeded => StatusStyle::Warning,
            StatusKind::OnTrack => StatusStyle::Success,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaceResult {
    pub current_speed_kmh: f64,
    pub required_speed_kmh: f64,
    pub remaining_distance_km: f64,
    pub remaining_time_h: f64,
    pub status: StatusKind,
}

/// Run every check in order and collect all violations; an empty vector means valid.
///
/// Total distance and target time are tested as `!(x > 0)` so NaN fails them; the
/// remaining checks are plain comparisons that NaN never trips.
pub fn validate(
    total_distance: f64,
    covered_distance: f64,
    elapsed_time: f64,
    target_time: f64,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !(total_distance > 0.0) {
        errors.push(ValidationError::TotalDistanceNotPositive);
    }
    if covered_distance < 0.0 {
        errors.push(ValidationError::CoveredDistanceNegative);
    }
    if covered_distance > total_distance {
        errors.push(ValidationError::CoveredExceedsTotal);
    }
    if elapsed_time < 0.0 {
        errors.push(ValidationError::ElapsedTimeNegative);
    }
    if !(target_time > 0.0) {
        errors.push(ValidationError::TargetTimeNotPositive);
    }
    if elapsed_time >= target_time {
        errors.push(ValidationError::ElapsedNotBeforeTarget);
    }

    errors
}

pub fn validate_input(input: &RaceInput) -> Vec<ValidationError> {
    validate(
        input.total_distance_km,
        input.covered_distance_km,
        input.elapsed_time_h,
        input.target_time_h,
    )
}

pub fn error_messages(errors: &[ValidationError]) -> Vec<String> {
    errors.iter().map(|e| e.to_string()).collect()
}

/// Average speed so far in km/h; `0` when no positive time has elapsed.
pub fn calculate_current_speed(covered_distance: f64, elapsed_time: f64) -> f64 {
    if elapsed_time <= 0.0 {
        return 0.0;
    }
    covered_distance / elapsed_time
}

/// Speed in km/h needed over the rest of the race; `0` once the target time is used up.
pub fn calculate_required_speed(
    total_distance: f64,
    covered_distance: f64,
    elapsed_time: f64,
    target_time: f64,
) -> f64 {
    let remaining_distance = total_distance - covered_distance;
    let remaining_time = target_time - elapsed_time;
    if remaining_time <= 0.0 {
        return 0.0;
    }
    remaining_distance / remaining_time
}

/// Compute speeds and status. Callers are expected to have validated `input`;
/// see [`evaluate`] for the checked entry point.
pub fn compute(input: &RaceInput) -> PaceResult {
    let current = calculate_current_speed(input.covered_distance_km, input.elapsed_time_h);
    let required = calculate_required_speed(
        input.total_distance_km,
        input.covered_distance_km,
        input.elapsed_time_h,
        input.target_time_h,
    );

    // A runner with zero current speed never reaches BehindPace; they fall
    // through to TargetExceeded or OnTrack.
    let status = if required > current && current > 0.0 {
        StatusKind::BehindPace {
            deficit_kmh: required - current,
        }
    } else if required <= 0.0 {
        StatusKind::TargetExceeded
    } else {
        StatusKind::OnTrack
    };

    PaceResult {
        current_speed_kmh: current,
        required_speed_kmh: required,
        remaining_distance_km: input.total_distance_km - input.covered_distance_km,
        remaining_time_h: input.target_time_h - input.elapsed_time_h,
        status,
    }
}

/// Validate then compute.
pub fn evaluate(input: &RaceInput) -> Result<PaceResult, PaceError> {
    let errors = validate_input(input);
    if !errors.is_empty() {
        return Err(PaceError::Invalid(errors));
    }
    Ok(compute(input))
}
