use std::fmt::{self, Display};

/// A single data point in the graph of a style function.
///
/// The output's semantic type must match the visual property the function
/// drives; this model performs no coercion.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Stop<I, O> {
    /// The function input this stop anchors.
    pub input: I,
    /// The property value produced at this input.
    pub output: O,
}

impl<I, O> Stop<I, O> {
    pub const fn new(input: I, output: O) -> Self {
        Self { input, output }
    }
}

impl<Z, V, O> Stop<CompositeValue<Z, V>, O> {
    /// A two-dimensional stop for functions that read both the zoom level
    /// and a feature property value.
    pub const fn composite(zoom: Z, value: V, output: O) -> Self {
        Self {
            input: CompositeValue::new(zoom, value),
            output,
        }
    }
}

impl<I: Display, O: Display> Display for Stop<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.input, self.output)
    }
}

/// The input component of a stop belonging to a composite function.
///
/// Not a stop itself: a composite stop is `Stop<CompositeValue<Z, V>, O>`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CompositeValue<Z, V> {
    /// The zoom level component.
    pub zoom: Z,
    /// The feature property value component.
    pub value: V,
}

impl<Z, V> CompositeValue<Z, V> {
    pub const fn new(zoom: Z, value: V) -> Self {
        Self { zoom, value }
    }
}

impl<Z: Display, V: Display> Display for CompositeValue<Z, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[zoom: {}, value: {}]", self.zoom, self.value)
    }
}
