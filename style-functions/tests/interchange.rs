use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use style_functions::{
    CameraFunction, CategoricalStops, CompositeFunction, ExponentialStops, IntervalStops,
    SourceFunction, Stop, Stops, ToInterchange,
};

fn pair() -> [Stop<i64, &'static str>; 2] {
    [Stop::new(0, "red"), Stop::new(10, "blue")]
}

#[rstest]
#[case::categorical(CategoricalStops::new(pair()).unwrap().into(), "categorical")]
#[case::interval(IntervalStops::new(pair()).unwrap().into(), "interval")]
#[case::exponential(ExponentialStops::new(pair()).unwrap().into(), "exponential")]
fn type_tag_and_stop_count_round_trip(
    #[case] stops: Stops<i64, &'static str>,
    #[case] tag: &str,
) {
    let map = stops.to_interchange();
    assert_eq!(map["type"], json!(tag));
    assert_eq!(map["stops"].as_array().unwrap().len(), stops.len());
}

#[test]
fn interval_stops_scenario() {
    let stops = IntervalStops::new(pair()).unwrap();
    assert_eq!(
        Value::Object(stops.to_interchange()),
        json!({
            "type": "interval",
            "stops": [[0, "red"], [10, "blue"]],
        })
    );
}

#[test]
fn categorical_source_function_scenario() {
    let stops = CategoricalStops::new([
        Stop::new("park", "#00ff00"),
        Stop::new("water", "#0000ff"),
    ])
    .unwrap();
    let function = SourceFunction::categorical("class", stops);

    assert_eq!(
        Value::Object(function.to_interchange()),
        json!({
            "type": "categorical",
            "property": "class",
            "stops": [["park", "#00ff00"], ["water", "#0000ff"]],
        })
    );
}

#[test]
fn camera_exponential_emits_the_default_base() {
    let stops = ExponentialStops::new([Stop::new(0.0f32, 1.0), Stop::new(18.0, 4.0)]).unwrap();
    let function = CameraFunction::exponential(stops);

    assert_eq!(
        Value::Object(function.to_interchange()),
        json!({
            "type": "exponential",
            "base": 1.0,
            "stops": [[0.0, 1.0], [18.0, 4.0]],
        })
    );
}

#[test]
fn identity_source_function_scenario() {
    let function: SourceFunction<f64, f64> = SourceFunction::identity("height");

    assert_eq!(
        Value::Object(function.to_interchange()),
        json!({ "type": "identity", "property": "height" })
    );
}

#[test]
fn composite_exponential_scenario() {
    let stops = ExponentialStops::with_base(
        1.5,
        [
            Stop::composite(5, "a", 1.0),
            Stop::composite(5, "b", 2.0),
            Stop::composite(10, "a", 3.0),
        ],
    )
    .unwrap();
    let function = CompositeFunction::exponential("magnitude", stops);

    let map = function.to_interchange();
    assert_eq!(map["type"], json!("exponential"));
    assert_eq!(map["base"], json!(1.5));
    assert_eq!(map["property"], json!("magnitude"));

    // Cross-group order is unspecified, so the flat list is checked as a
    // multiset; in-group order is part of the contract.
    let stops = map["stops"].as_array().unwrap();
    assert_eq!(stops.len(), 3);

    let expected = [
        json!([{ "zoom": 5, "value": "a" }, 1.0]),
        json!([{ "zoom": 5, "value": "b" }, 2.0]),
        json!([{ "zoom": 10, "value": "a" }, 3.0]),
    ];
    for entry in &expected {
        assert!(stops.contains(entry), "missing stop {entry}");
    }

    let position = |entry: &Value| stops.iter().position(|stop| stop == entry).unwrap();
    assert!(position(&expected[0]) < position(&expected[1]));
}

#[test]
fn stops_as_mismatch_is_a_soft_failure() {
    let stops = IntervalStops::new([Stop::new(0, 1.0)]).unwrap();
    let function = SourceFunction::interval("rank", stops);

    assert!(function.stops_as::<ExponentialStops<i64, f64>>().is_none());
    assert!(function.stops_as::<IntervalStops<i64, f64>>().is_some());
}
