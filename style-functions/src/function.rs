use tracing::debug;

use crate::{
    composite::{CompositeStops, Zoom},
    stop::CompositeValue,
    stops::{CategoricalStops, ExponentialStops, IdentityStops, IntervalStops, Stops, StopsVariant},
};

/// A function whose only input is the map's zoom level.
///
/// Zoom functions change the appearance of a map feature with the zoom,
/// creating an illusion of depth or controlling data density. Categorical
/// and identity stops are unsupported for zoom input, so no constructor
/// accepts them.
#[derive(Clone, PartialEq, Debug)]
pub struct CameraFunction<Z, O> {
    stops: Stops<Z, O>,
}

impl<Z: Zoom, O> CameraFunction<Z, O> {
    /// A step function over zoom thresholds.
    pub fn interval(stops: IntervalStops<Z, O>) -> Self {
        Self {
            stops: stops.into(),
        }
    }

    /// A function interpolating between zoom stops.
    pub fn exponential(stops: ExponentialStops<Z, O>) -> Self {
        Self {
            stops: stops.into(),
        }
    }
}

impl<Z, O> CameraFunction<Z, O> {
    pub fn stops(&self) -> &Stops<Z, O> {
        &self.stops
    }

    /// View the stops as the concrete variant `S`.
    ///
    /// A convenience probe, not a type assertion: a mismatch logs a debug
    /// diagnostic and yields `None`. Never panics, never mutates.
    pub fn stops_as<S: StopsVariant<Z, O>>(&self) -> Option<&S> {
        stops_as(&self.stops)
    }
}

/// A function reading a named feature property.
#[derive(Clone, PartialEq, Debug)]
pub struct SourceFunction<I, O> {
    property: String,
    stops: Stops<I, O>,
}

impl<T> SourceFunction<T, T> {
    /// Use the feature property value as the output directly.
    pub fn identity(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            stops: IdentityStops::new().into(),
        }
    }
}

impl<I, O> SourceFunction<I, O> {
    /// Match the feature property against discrete stop keys.
    pub fn categorical(property: impl Into<String>, stops: CategoricalStops<I, O>) -> Self {
        Self {
            property: property.into(),
            stops: stops.into(),
        }
    }

    /// A step function over feature property thresholds.
    pub fn interval(property: impl Into<String>, stops: IntervalStops<I, O>) -> Self {
        Self {
            property: property.into(),
            stops: stops.into(),
        }
    }

    /// Interpolate between feature property stops.
    pub fn exponential(property: impl Into<String>, stops: ExponentialStops<I, O>) -> Self {
        Self {
            property: property.into(),
            stops: stops.into(),
        }
    }

    /// The feature property this function reads.
    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn stops(&self) -> &Stops<I, O> {
        &self.stops
    }

    /// View the stops as the concrete variant `S`.
    ///
    /// A convenience probe, not a type assertion: a mismatch logs a debug
    /// diagnostic and yields `None`. Never panics, never mutates.
    pub fn stops_as<S: StopsVariant<I, O>>(&self) -> Option<&S> {
        stops_as(&self.stops)
    }
}

/// A function reading both the zoom level and a named feature property.
///
/// Construction folds the flat two-dimensional stop list into per-zoom
/// groups; see [`CompositeStops`].
#[derive(Clone, PartialEq, Debug)]
pub struct CompositeFunction<Z, I, O> {
    property: String,
    stops: CompositeStops<Z, I, O>,
}

impl<Z: Zoom, I, O> CompositeFunction<Z, I, O> {
    /// A step function over (zoom, feature property) stops.
    pub fn interval(
        property: impl Into<String>,
        stops: IntervalStops<CompositeValue<Z, I>, O>,
    ) -> Self {
        Self {
            property: property.into(),
            stops: stops.into(),
        }
    }

    /// An interpolating function over (zoom, feature property) stops.
    pub fn exponential(
        property: impl Into<String>,
        stops: ExponentialStops<CompositeValue<Z, I>, O>,
    ) -> Self {
        Self {
            property: property.into(),
            stops: stops.into(),
        }
    }
}

impl<Z, I, O> CompositeFunction<Z, I, O> {
    /// The feature property this function reads.
    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn stops(&self) -> &CompositeStops<Z, I, O> {
        &self.stops
    }
}

fn stops_as<I, O, S: StopsVariant<I, O>>(stops: &Stops<I, O>) -> Option<&S> {
    let found = S::from_stops(stops);
    if found.is_none() {
        debug!(
            "stops variant mismatch: these are {} stops",
            stops.type_tag()
        );
    }
    found
}

#[cfg(test)]
mod tests {
    use crate::stop::Stop;

    use super::*;

    fn zoom_stops() -> ExponentialStops<f32, f64> {
        ExponentialStops::new([Stop::new(0.0, 1.0), Stop::new(18.0, 4.0)]).unwrap()
    }

    #[test]
    fn camera_function_owns_its_stops() {
        let function = CameraFunction::exponential(zoom_stops());
        assert_eq!(function.stops().type_tag(), "exponential");
        assert_eq!(function.stops().len(), 2);
    }

    #[test]
    fn stops_as_recovers_the_matching_variant() {
        let function = CameraFunction::exponential(zoom_stops());
        let stops: Option<&ExponentialStops<f32, f64>> = function.stops_as();
        assert_eq!(stops.map(|stops| stops.len()), Some(2));
    }

    #[test]
    fn stops_as_mismatch_is_absent_not_a_panic() {
        let function = CameraFunction::exponential(zoom_stops());
        let before = function.clone();

        let stops: Option<&IntervalStops<f32, f64>> = function.stops_as();
        assert!(stops.is_none());
        assert_eq!(function, before);
    }

    #[test]
    fn source_function_remembers_its_property() {
        let stops = CategoricalStops::new([Stop::new("water", "#0000ff")]).unwrap();
        let function = SourceFunction::categorical("class", stops);
        assert_eq!(function.property(), "class");
        assert_eq!(function.stops().type_tag(), "categorical");
    }

    #[test]
    fn identity_source_function_has_no_stops() {
        let function: SourceFunction<f64, f64> = SourceFunction::identity("opacity");
        assert!(function.stops().is_empty());
        assert!(function.stops_as::<IdentityStops<f64, f64>>().is_some());
    }

    #[test]
    fn composite_function_folds_on_construction() {
        let stops = IntervalStops::new([
            Stop::composite(5, "a", 1.0),
            Stop::composite(10, "b", 2.0),
        ])
        .unwrap();

        let function = CompositeFunction::interval("density", stops);
        assert_eq!(function.property(), "density");
        assert_eq!(function.stops().len(), 2);
        assert_eq!(function.stops().type_tag(), "interval");
    }
}
