/// End-to-end pace scenarios: validate, compute, report and history together.
///
/// Run with: cargo test -p pace_engine --test scenarios -- --nocapture
use chrono::{TimeZone, Utc};
use pace_engine::{
    calculate_current_speed, calculate_required_speed, compute, error_messages, evaluate,
    format_speed, format_time, validate, validate_input, PaceReport, RaceInput, Session,
    StatusKind, StatusStyle, Submission,
};

#[test]
fn test_scenario_even_split_on_track() {
    let input = RaceInput::new(10.0, 5.0, 1.0, 2.0);
    assert!(validate_input(&input).is_empty());

    let result = compute(&input);
    assert_eq!(format_speed(result.current_speed_kmh), "5.00 km/h");
    assert_eq!(result.remaining_distance_km, 5.0);
    assert_eq!(result.remaining_time_h, 1.0);
    assert_eq!(format_speed(result.required_speed_kmh), "5.00 km/h");
    // required == current is not "behind"
    assert_eq!(result.status, StatusKind::OnTrack);
}

#[test]
fn test_scenario_slow_start_behind_pace() {
    let input = RaceInput::new(10.0, 2.0, 1.0, 2.0);
    let result = evaluate(&input).expect("input is valid");

    assert_eq!(format_speed(result.current_speed_kmh), "2.00 km/h");
    assert_eq!(result.remaining_distance_km, 8.0);
    assert_eq!(result.remaining_time_h, 1.0);
    assert_eq!(format_speed(result.required_speed_kmh), "8.00 km/h");
    match result.status {
        StatusKind::BehindPace { deficit_kmh } => {
            assert_eq!(format_speed(deficit_kmh), "6.00 km/h")
        }
        other => panic!("expected BehindPace, got {:?}", other),
    }
}

#[test]
fn test_scenario_over_time_rejected() {
    let mut session = Session::new();
    let at = Utc.with_ymd_and_hms(2024, 4, 21, 9, 30, 0).unwrap();

    let outcome = session.submit(&RaceInput::new(10.0, 5.0, 3.0, 2.0), at);
    match outcome {
        Submission::Rejected(errors) => {
            let messages = error_messages(&errors);
            println!("rejected: {:?}", messages);
            assert!(messages
                .iter()
                .any(|m| m == "Elapsed time cannot be greater than or equal to target time"));
        }
        Submission::Accepted(report) => panic!("unexpected report {:?}", report),
    }
    assert!(session.history().is_empty(), "rejected input is never recorded");
}

#[test]
fn test_non_positive_total_distance_always_flagged() {
    for total in [0.0, -0.5, -10.0, f64::NAN] {
        for covered in [-1.0, 0.0, 3.0] {
            let messages = error_messages(&validate(total, covered, 1.0, 2.0));
            assert!(
                messages.contains(&"Total distance must be greater than 0".to_string()),
                "total={} covered={}",
                total,
                covered
            );
        }
    }
}

#[test]
fn test_covered_beyond_total_flagged() {
    for (total, covered) in [(5.0, 5.01), (1.0, 42.0), (42.195, 50.0)] {
        let messages = error_messages(&validate(total, covered, 1.0, 2.0));
        assert!(messages.contains(&"Covered distance cannot exceed total distance".to_string()));
    }
}

#[test]
fn test_elapsed_not_before_target_never_valid() {
    for (elapsed, target) in [(2.0, 2.0), (3.0, 2.0), (0.0, 0.0), (1.0, -1.0)] {
        let errors = validate(10.0, 5.0, elapsed, target);
        assert!(!errors.is_empty());
        assert!(error_messages(&errors)
            .contains(&"Elapsed time cannot be greater than or equal to target time".to_string()));
    }
}

#[test]
fn test_speed_fallbacks() {
    for x in [0.0, 1.0, 42.195, -3.0] {
        assert_eq!(calculate_current_speed(x, 0.0), 0.0);
    }
    assert_eq!(calculate_current_speed(21.0, 1.5), 14.0);
    for (elapsed, target) in [(2.0, 2.0), (2.5, 2.0), (1.0, 0.0)] {
        assert_eq!(calculate_required_speed(10.0, 4.0, elapsed, target), 0.0);
    }
}

#[test]
fn test_formatting_examples() {
    assert_eq!(format_speed(0.0), "0.00 km/h");
    assert_eq!(format_speed(12.345), "12.35 km/h");
    assert_eq!(format_time(1.5), "1 hours 30 minutes");
    assert_eq!(format_time(0.25), "15 minutes");
    assert_eq!(format_time(2.0), "2 hours");
}

#[test]
fn test_session_history_and_clear() {
    let mut session = Session::new();
    let start = Utc.with_ymd_and_hms(2024, 4, 21, 9, 30, 0).unwrap();

    for n in 1..=4 {
        let at = start + chrono::Duration::minutes(n);
        let covered = n as f64;
        assert!(session.submit(&RaceInput::new(10.0, covered, 1.0, 2.0), at).is_accepted());
    }
    assert_eq!(session.history().len(), 4);

    let newest = session.history().newest_first().next().expect("history has rows");
    assert_eq!(newest.timestamp, "2024-04-21 09:34:00");
    assert_eq!(newest.covered_distance, "4 km");
    assert_eq!(newest.current_speed, "4.00 km/h");
    assert_eq!(newest.required_speed, "6.00 km/h");

    session.clear_history();
    assert!(session.history().is_empty());
}

#[test]
fn test_report_serializes_for_display() {
    let report = PaceReport::from(&compute(&RaceInput::new(10.0, 2.0, 1.0, 2.0)));
    assert_eq!(report.status_style, StatusStyle::Warning);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["current_speed"], "2.00 km/h");
    assert_eq!(json["remaining_time"], "1 hours");
    assert_eq!(json["status_style"], "warning");
}
