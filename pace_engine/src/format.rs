// Display formatting for speeds, distances and durations.

const MINUTES_PER_HOUR: f64 = 60.0;

/// Round half away from zero to `places` decimals.
fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

pub fn format_speed(speed_kmh: f64) -> String {
    if speed_kmh == 0.0 {
        return "0.00 km/h".to_string();
    }
    format!("{:.2} km/h", round_to(speed_kmh, 2))
}

pub fn format_distance(distance_km: f64) -> String {
    format!("{:.2} km", round_to(distance_km, 2))
}

/// Render hours as `"{h} hours {m} minutes"`, dropping the zero part.
///
/// No pluralization: one hour renders as `"1 hours"`. Minutes are rounded
/// independently of the hour count, so `1.999` renders as `"1 hours 60 minutes"`.
pub fn format_time(hours: f64) -> String {
    let whole_hours = hours.floor();
    // + 0.0 folds a rounded -0 into 0
    let minutes = round_half_up((hours - whole_hours) * MINUTES_PER_HOUR) + 0.0;

    if whole_hours == 0.0 {
        format!("{} minutes", minutes)
    } else if minutes == 0.0 {
        format!("{} hours", whole_hours)
    } else {
        format!("{} hours {} minutes", whole_hours, minutes)
    }
}

/// Raw field value followed by its unit, as entered (`"10 km"`, `"1.5 h"`).
pub fn format_raw(value: f64, unit: &str) -> String {
    format!("{} {}", value + 0.0, unit)
}

fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}
