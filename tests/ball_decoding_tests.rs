use cricket_charts::VizError;
use cricket_charts::core::{
    BallEvent, ExtrasType, Inning, MAX_OVER_INDEX, OverNotation, RawBallRecord, decode_balls,
};
use serde_json::{Value, json};

fn record(overrides: Value) -> Value {
    let mut base = json!({
        "game": 7,
        "inning": 1,
        "ovr": 12.3,
        "ball_within_over": 3,
        "batting_team": "India",
        "bowling_team": "Australia",
        "batsman_name": "Virat Kohli",
        "non_striker": "Rohit Sharma",
        "bowler_name": "Pat Cummins",
        "runs_batter": 4,
        "runs_w_extras": 4,
        "extras_type": "",
        "wicket": 0,
        "who_out": null,
        "wicket_method": null,
        "cumul_runs": 88
    });
    if let (Some(base_map), Value::Object(extra)) = (base.as_object_mut(), overrides) {
        for (key, value) in extra {
            base_map.insert(key, value);
        }
    }
    base
}

fn decode_one(overrides: Value) -> Result<BallEvent, VizError> {
    let json = Value::Array(vec![record(overrides)]).to_string();
    decode_balls(&json).map(|mut balls| balls.remove(0))
}

fn malformed_field(error: VizError) -> String {
    match error {
        VizError::MalformedRecord { field, .. } => field,
        other => panic!("expected malformed record, got {other:?}"),
    }
}

#[test]
fn decodes_a_complete_delivery_record() {
    let ball = decode_one(json!({})).expect("valid record");

    assert_eq!(ball.match_id, 7);
    assert_eq!(ball.inning, Inning::First);
    assert_eq!(ball.notation, OverNotation { over: 12, ball: 3 });
    assert_eq!(ball.over_index(), 12);
    assert_eq!(ball.display_over(), 13);
    assert_eq!(ball.striker, "Virat Kohli");
    assert_eq!(ball.bowler, "Pat Cummins");
    assert_eq!(ball.extras, ExtrasType::None);
    assert!(!ball.wicket);
    assert_eq!(ball.cumul_runs, 88);
}

#[test]
fn numeric_strings_are_accepted_and_text_is_trimmed() {
    let ball = decode_one(json!({
        "inning": "2",
        "ovr": "0.4",
        "runs_batter": "1",
        "batsman_name": "  Shubman Gill "
    }))
    .expect("numeric strings decode");

    assert_eq!(ball.inning, Inning::Second);
    assert_eq!(ball.notation, OverNotation { over: 0, ball: 4 });
    assert_eq!(ball.runs_batter, 1);
    assert_eq!(ball.striker, "Shubman Gill");
}

#[test]
fn extras_codes_map_to_categories() {
    for (code, expected) in [
        ("", ExtrasType::None),
        ("Wd", ExtrasType::Wide),
        ("Nb", ExtrasType::NoBall),
        ("Lb", ExtrasType::LegBye),
        ("B", ExtrasType::Bye),
    ] {
        let ball = decode_one(json!({ "extras_type": code })).expect("known code");
        assert_eq!(ball.extras, expected, "code `{code}`");
        assert_eq!(expected.code(), code);
    }

    let missing = decode_one(json!({ "extras_type": null })).expect("null extras");
    assert_eq!(missing.extras, ExtrasType::None);
}

#[test]
fn unknown_extras_code_is_malformed() {
    let error = decode_one(json!({ "extras_type": "Penalty" })).expect_err("unknown code");
    assert_eq!(malformed_field(error), "extras_type");
}

#[test]
fn inning_outside_one_or_two_is_rejected() {
    for inning in [json!(0), json!(3), json!("3"), json!(1.5)] {
        let error = decode_one(json!({ "inning": inning })).expect_err("invalid inning");
        assert_eq!(malformed_field(error), "inning");
    }
}

#[test]
fn non_numeric_fields_are_never_coerced() {
    let error = decode_one(json!({ "runs_batter": "four" })).expect_err("non-numeric runs");
    assert_eq!(malformed_field(error), "runs_batter");

    let error = decode_one(json!({ "cumul_runs": null })).expect_err("missing cumul");
    assert_eq!(malformed_field(error), "cumul_runs");

    let error = decode_one(json!({ "runs_w_extras": -1 })).expect_err("negative runs");
    assert_eq!(malformed_field(error), "runs_w_extras");

    let error = decode_one(json!({ "ovr": [1, 2] })).expect_err("array over");
    assert_eq!(malformed_field(error), "ovr");
}

#[test]
fn empty_names_are_malformed() {
    let error = decode_one(json!({ "bowler_name": "   " })).expect_err("blank bowler");
    assert_eq!(malformed_field(error), "bowler_name");
}

#[test]
fn wicket_flag_accepts_bool_number_and_text_forms() {
    for (value, expected) in [
        (json!(true), true),
        (json!(false), false),
        (json!(1), true),
        (json!(0), false),
        (json!("TRUE"), true),
        (json!("false"), false),
        (Value::Null, false),
    ] {
        let ball = decode_one(json!({ "wicket": value.clone() })).expect("flag form");
        assert_eq!(ball.wicket, expected, "wicket {value}");
    }

    let error = decode_one(json!({ "wicket": 2 })).expect_err("flag out of range");
    assert_eq!(malformed_field(error), "wicket");
}

#[test]
fn a_document_that_is_not_an_array_is_malformed() {
    let error = decode_balls("{\"game\": 1}").expect_err("object instead of array");
    assert_eq!(malformed_field(error), "balls");
}

#[test]
fn over_notation_splits_without_float_drift() {
    let notation = OverNotation::parse(0.1 + 0.2).expect("sum of tenths");
    assert_eq!(notation, OverNotation { over: 0, ball: 3 });

    let notation = OverNotation::parse(49.6).expect("last over");
    assert_eq!(notation.index(), 49);
    assert_eq!(notation.display_over(), 50);
}

#[test]
fn display_over_is_the_ceiling_of_the_notation() {
    let cases = [(0.1, 1), (0.6, 1), (1.0, 1), (1.1, 2), (12.0, 12), (12.3, 13)];
    for (ovr, expected) in cases {
        let notation = OverNotation::parse(ovr).expect("valid over");
        assert_eq!(notation.display_over(), expected, "ovr {ovr}");
    }
}

#[test]
fn negative_or_non_finite_overs_are_rejected() {
    assert!(OverNotation::parse(-0.1).is_err());
    assert!(OverNotation::parse(f64::NAN).is_err());
    assert!(OverNotation::parse(f64::INFINITY).is_err());
}

#[test]
fn overs_far_beyond_the_axis_are_rejected() {
    let last = OverNotation::parse(f64::from(MAX_OVER_INDEX) + 0.6).expect("highest over");
    assert_eq!(last.index(), MAX_OVER_INDEX);

    assert!(OverNotation::parse(f64::from(MAX_OVER_INDEX) + 1.0).is_err());
    assert!(OverNotation::parse(4e9).is_err());

    let error = decode_one(json!({ "ovr": 4e9 })).expect_err("runaway over");
    assert_eq!(malformed_field(error), "ovr");
}

#[test]
fn describe_builds_tooltip_lines() {
    let ball = decode_one(json!({
        "extras_type": "Wd",
        "runs_batter": 0,
        "runs_w_extras": 1,
        "wicket": 1,
        "who_out": "Virat Kohli",
        "wicket_method": "run out"
    }))
    .expect("wide with wicket flag");

    let description = ball.describe();
    assert_eq!(description.title, "Over 13, Ball 3");
    assert_eq!(description.runs_line, "Virat Kohli: 1 Wides");
    assert_eq!(description.bowler_line, "Bowled by Pat Cummins");
    assert_eq!(description.wicket_line, None, "wides never show a wicket");
    assert_eq!(description.lines().len(), 3);

    let dismissal = decode_one(json!({
        "wicket": true,
        "who_out": "Virat Kohli",
        "wicket_method": "caught"
    }))
    .expect("counted wicket");
    let description = dismissal.describe();
    assert_eq!(
        description.wicket_line.as_deref(),
        Some("Wicket- Virat Kohli (caught)")
    );
    assert_eq!(description.lines().len(), 4);
}

#[test]
fn raw_records_convert_through_try_from() {
    let raw: RawBallRecord = serde_json::from_value(record(json!({}))).expect("raw record");
    let ball = BallEvent::try_from(&raw).expect("convert");
    let owned = BallEvent::try_from(raw).expect("convert owned");

    assert_eq!(ball, owned);
    assert_eq!(ball.key(), owned.key());
}
