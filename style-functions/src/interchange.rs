use serde_json::{Map, Value};

use crate::{
    composite::CompositeStops,
    function::{CameraFunction, CompositeFunction, SourceFunction},
    stop::{CompositeValue, Stop},
    stops::{CategoricalStops, ExponentialStops, IdentityStops, IntervalStops, Stops},
};

/// The JSON-equivalent mapping handed to the rendering engine.
pub type InterchangeMap = Map<String, Value>;

/// Conversion of a function declaration into the engine-facing interchange
/// mapping.
///
/// Pure: every call allocates a fresh map, so the caller may mutate the
/// result without affecting the source model or earlier results.
pub trait ToInterchange {
    fn to_interchange(&self) -> InterchangeMap;
}

impl<Z, V> From<CompositeValue<Z, V>> for Value
where
    Z: Into<Value>,
    V: Into<Value>,
{
    fn from(composite: CompositeValue<Z, V>) -> Self {
        let mut map = InterchangeMap::new();
        map.insert("zoom".to_string(), composite.zoom.into());
        map.insert("value".to_string(), composite.value.into());
        Value::Object(map)
    }
}

/// A stop serializes as the two-element array `[input, output]`.
impl<I, O> From<Stop<I, O>> for Value
where
    I: Into<Value>,
    O: Into<Value>,
{
    fn from(stop: Stop<I, O>) -> Self {
        Value::Array(vec![stop.input.into(), stop.output.into()])
    }
}

impl<I, O> ToInterchange for IdentityStops<I, O> {
    fn to_interchange(&self) -> InterchangeMap {
        tagged_map(self.type_tag())
    }
}

impl<I, O> ToInterchange for CategoricalStops<I, O>
where
    I: Clone + Into<Value>,
    O: Clone + Into<Value>,
{
    fn to_interchange(&self) -> InterchangeMap {
        let mut map = tagged_map(self.type_tag());
        map.insert("stops".to_string(), stops_array(self.stops()));
        map
    }
}

impl<I, O> ToInterchange for IntervalStops<I, O>
where
    I: Clone + Into<Value>,
    O: Clone + Into<Value>,
{
    fn to_interchange(&self) -> InterchangeMap {
        let mut map = tagged_map(self.type_tag());
        map.insert("stops".to_string(), stops_array(self.stops()));
        map
    }
}

impl<I, O> ToInterchange for ExponentialStops<I, O>
where
    I: Clone + Into<Value>,
    O: Clone + Into<Value>,
{
    fn to_interchange(&self) -> InterchangeMap {
        let mut map = tagged_map(self.type_tag());
        // Emitted even when it is the default.
        map.insert("base".to_string(), Value::from(self.base()));
        map.insert("stops".to_string(), stops_array(self.stops()));
        map
    }
}

impl<I, O> ToInterchange for Stops<I, O>
where
    I: Clone + Into<Value>,
    O: Clone + Into<Value>,
{
    fn to_interchange(&self) -> InterchangeMap {
        match self {
            Stops::Identity(stops) => stops.to_interchange(),
            Stops::Categorical(stops) => stops.to_interchange(),
            Stops::Interval(stops) => stops.to_interchange(),
            Stops::Exponential(stops) => stops.to_interchange(),
        }
    }
}

/// Composite stops present to the engine as a single flat stop list over
/// composite inputs, not as a nested zoom map.
impl<Z, I, O> ToInterchange for CompositeStops<Z, I, O>
where
    Z: Copy + Into<Value>,
    I: Clone + Into<Value>,
    O: Clone + Into<Value>,
{
    fn to_interchange(&self) -> InterchangeMap {
        let mut map = tagged_map(self.type_tag());
        if let Some(base) = self.base() {
            map.insert("base".to_string(), Value::from(base));
        }
        map.insert(
            "stops".to_string(),
            Value::Array(self.flatten().into_iter().map(Value::from).collect()),
        );
        map
    }
}

impl<Z, O> ToInterchange for CameraFunction<Z, O>
where
    Z: Clone + Into<Value>,
    O: Clone + Into<Value>,
{
    fn to_interchange(&self) -> InterchangeMap {
        self.stops().to_interchange()
    }
}

impl<I, O> ToInterchange for SourceFunction<I, O>
where
    I: Clone + Into<Value>,
    O: Clone + Into<Value>,
{
    fn to_interchange(&self) -> InterchangeMap {
        let mut map = self.stops().to_interchange();
        map.insert("property".to_string(), Value::from(self.property()));
        map
    }
}

impl<Z, I, O> ToInterchange for CompositeFunction<Z, I, O>
where
    Z: Copy + Into<Value>,
    I: Clone + Into<Value>,
    O: Clone + Into<Value>,
{
    fn to_interchange(&self) -> InterchangeMap {
        let mut map = self.stops().to_interchange();
        map.insert("property".to_string(), Value::from(self.property()));
        map
    }
}

fn tagged_map(type_tag: &str) -> InterchangeMap {
    let mut map = InterchangeMap::new();
    map.insert("type".to_string(), Value::from(type_tag));
    map
}

fn stops_array<I, O>(stops: &[Stop<I, O>]) -> Value
where
    I: Clone + Into<Value>,
    O: Clone + Into<Value>,
{
    Value::Array(stops.iter().cloned().map(Value::from).collect())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::stop::Stop;

    use super::*;

    #[test]
    fn interchange_maps_are_fresh_per_call() {
        let stops = IntervalStops::new([Stop::new(0, "red")]).unwrap();

        let mut first = stops.to_interchange();
        first.insert("mutated".to_string(), Value::Bool(true));

        assert!(!stops.to_interchange().contains_key("mutated"));
    }

    #[test]
    fn composite_value_serializes_as_an_object() {
        let value = Value::from(CompositeValue::new(5, "water"));
        assert_eq!(value, json!({ "zoom": 5, "value": "water" }));
    }

    #[test]
    fn stop_serializes_as_a_pair() {
        let value = Value::from(Stop::new(0, "red"));
        assert_eq!(value, json!([0, "red"]));
    }
}
