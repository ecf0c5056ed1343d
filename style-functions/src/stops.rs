use std::marker::PhantomData;

use smallvec::SmallVec;

use crate::{
    error::{ConstructionError, ConstructionResult},
    stop::Stop,
};

/// Stop sequences are almost always a handful of entries.
pub(crate) type StopVec<I, O> = SmallVec<Stop<I, O>, 4>;

/// The closed set of one-dimensional stop collections.
///
/// Each variant carries its own payload struct so that a concrete reference
/// can be recovered through [`StopsVariant`]. A stop sequence is never
/// mutated after construction; iteration yields stops in construction order,
/// which for interval stops is the threshold order.
#[derive(Clone, PartialEq, Debug)]
pub enum Stops<I, O> {
    /// The output is the input, carried through unchanged.
    Identity(IdentityStops<I, O>),
    /// The output of the stop whose key equals the input exactly.
    Categorical(CategoricalStops<I, O>),
    /// The output of the greatest stop whose input does not exceed the query.
    Interval(IntervalStops<I, O>),
    /// Output interpolated between neighbouring stops on an exponential curve.
    Exponential(ExponentialStops<I, O>),
}

impl<T> Stops<T, T> {
    /// Convenience for use in function declarations.
    pub fn identity() -> Self {
        Self::Identity(IdentityStops::new())
    }
}

impl<I, O> Stops<I, O> {
    /// Convenience for use in function declarations.
    pub fn categorical(stops: impl IntoIterator<Item = Stop<I, O>>) -> ConstructionResult<Self> {
        CategoricalStops::new(stops).map(Self::Categorical)
    }

    /// Convenience for use in function declarations.
    pub fn interval(stops: impl IntoIterator<Item = Stop<I, O>>) -> ConstructionResult<Self> {
        IntervalStops::new(stops).map(Self::Interval)
    }

    /// Convenience for use in function declarations.
    pub fn exponential(stops: impl IntoIterator<Item = Stop<I, O>>) -> ConstructionResult<Self> {
        ExponentialStops::new(stops).map(Self::Exponential)
    }

    /// Convenience for use in function declarations.
    pub fn exponential_with_base(
        base: f32,
        stops: impl IntoIterator<Item = Stop<I, O>>,
    ) -> ConstructionResult<Self> {
        ExponentialStops::with_base(base, stops).map(Self::Exponential)
    }

    /// The type tag this collection serializes under.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Identity(stops) => stops.type_tag(),
            Self::Categorical(stops) => stops.type_tag(),
            Self::Interval(stops) => stops.type_tag(),
            Self::Exponential(stops) => stops.type_tag(),
        }
    }

    /// The stops in construction order. Identity has none.
    pub fn iter(&self) -> std::slice::Iter<'_, Stop<I, O>> {
        self.as_slice().iter()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    fn as_slice(&self) -> &[Stop<I, O>] {
        match self {
            Self::Identity(_) => &[],
            Self::Categorical(stops) => stops.stops(),
            Self::Interval(stops) => stops.stops(),
            Self::Exponential(stops) => stops.stops(),
        }
    }
}

impl<'s, I, O> IntoIterator for &'s Stops<I, O> {
    type Item = &'s Stop<I, O>;
    type IntoIter = std::slice::Iter<'s, Stop<I, O>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<I, O> From<IdentityStops<I, O>> for Stops<I, O> {
    fn from(stops: IdentityStops<I, O>) -> Self {
        Self::Identity(stops)
    }
}

impl<I, O> From<CategoricalStops<I, O>> for Stops<I, O> {
    fn from(stops: CategoricalStops<I, O>) -> Self {
        Self::Categorical(stops)
    }
}

impl<I, O> From<IntervalStops<I, O>> for Stops<I, O> {
    fn from(stops: IntervalStops<I, O>) -> Self {
        Self::Interval(stops)
    }
}

impl<I, O> From<ExponentialStops<I, O>> for Stops<I, O> {
    fn from(stops: ExponentialStops<I, O>) -> Self {
        Self::Exponential(stops)
    }
}

/// A concrete stop collection that can be recovered from behind the
/// [`Stops`] union.
///
/// This is a total function from the union to an optional concrete
/// reference; there is no panicking downcast.
pub trait StopsVariant<I, O>: Sized {
    fn from_stops(stops: &Stops<I, O>) -> Option<&Self>;
}

impl<I, O> StopsVariant<I, O> for IdentityStops<I, O> {
    fn from_stops(stops: &Stops<I, O>) -> Option<&Self> {
        match stops {
            Stops::Identity(stops) => Some(stops),
            _ => None,
        }
    }
}

impl<I, O> StopsVariant<I, O> for CategoricalStops<I, O> {
    fn from_stops(stops: &Stops<I, O>) -> Option<&Self> {
        match stops {
            Stops::Categorical(stops) => Some(stops),
            _ => None,
        }
    }
}

impl<I, O> StopsVariant<I, O> for IntervalStops<I, O> {
    fn from_stops(stops: &Stops<I, O>) -> Option<&Self> {
        match stops {
            Stops::Interval(stops) => Some(stops),
            _ => None,
        }
    }
}

impl<I, O> StopsVariant<I, O> for ExponentialStops<I, O> {
    fn from_stops(stops: &Stops<I, O>) -> Option<&Self> {
        match stops {
            Stops::Exponential(stops) => Some(stops),
            _ => None,
        }
    }
}

/// Type-preserving passthrough: the raw input value is used as the output.
///
/// Only constructible with matching input and output types.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct IdentityStops<I, O> {
    _io: PhantomData<fn(I) -> O>,
}

impl<T> IdentityStops<T, T> {
    pub fn new() -> Self {
        Self { _io: PhantomData }
    }
}

impl<T> Default for IdentityStops<T, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, O> IdentityStops<I, O> {
    pub fn type_tag(&self) -> &'static str {
        "identity"
    }
}

/// Discrete mapping: a stop applies when the input equals its key exactly.
#[derive(Clone, PartialEq, Debug)]
pub struct CategoricalStops<I, O> {
    stops: StopVec<I, O>,
}

impl<I, O> CategoricalStops<I, O> {
    pub fn new(stops: impl IntoIterator<Item = Stop<I, O>>) -> ConstructionResult<Self> {
        let stops: StopVec<I, O> = stops.into_iter().collect();
        if stops.is_empty() {
            return Err(ConstructionError::EmptyStops);
        }
        Ok(Self { stops })
    }

    pub fn stops(&self) -> &[Stop<I, O>] {
        &self.stops
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stop<I, O>> {
        self.stops.iter()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn type_tag(&self) -> &'static str {
        "categorical"
    }
}

impl<I, O> IntoIterator for CategoricalStops<I, O> {
    type Item = Stop<I, O>;
    type IntoIter = smallvec::IntoIter<Stop<I, O>, 4>;

    fn into_iter(self) -> Self::IntoIter {
        self.stops.into_iter()
    }
}

impl<'s, I, O> IntoIterator for &'s CategoricalStops<I, O> {
    type Item = &'s Stop<I, O>;
    type IntoIter = std::slice::Iter<'s, Stop<I, O>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Step mapping over ordered thresholds.
///
/// The caller-supplied stop order is the threshold order; it is preserved
/// verbatim.
#[derive(Clone, PartialEq, Debug)]
pub struct IntervalStops<I, O> {
    stops: StopVec<I, O>,
}

impl<I, O> IntervalStops<I, O> {
    pub fn new(stops: impl IntoIterator<Item = Stop<I, O>>) -> ConstructionResult<Self> {
        let stops: StopVec<I, O> = stops.into_iter().collect();
        if stops.is_empty() {
            return Err(ConstructionError::EmptyStops);
        }
        Ok(Self { stops })
    }

    /// Invariant: `stops` is non-empty.
    pub(crate) fn new_unchecked(stops: StopVec<I, O>) -> Self {
        debug_assert!(!stops.is_empty());
        Self { stops }
    }

    pub fn stops(&self) -> &[Stop<I, O>] {
        &self.stops
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stop<I, O>> {
        self.stops.iter()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn type_tag(&self) -> &'static str {
        "interval"
    }
}

impl<I, O> IntoIterator for IntervalStops<I, O> {
    type Item = Stop<I, O>;
    type IntoIter = smallvec::IntoIter<Stop<I, O>, 4>;

    fn into_iter(self) -> Self::IntoIter {
        self.stops.into_iter()
    }
}

impl<'s, I, O> IntoIterator for &'s IntervalStops<I, O> {
    type Item = &'s Stop<I, O>;
    type IntoIter = std::slice::Iter<'s, Stop<I, O>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Interpolating stops on an exponential curve between thresholds.
#[derive(Clone, PartialEq, Debug)]
pub struct ExponentialStops<I, O> {
    base: f32,
    stops: StopVec<I, O>,
    // TODO: color space parameter for interpolating colors outside RGB
}

impl<I, O> ExponentialStops<I, O> {
    /// The base used when none is given, meaning linear interpolation.
    pub const DEFAULT_BASE: f32 = 1.0;

    /// Linear stops, base [`Self::DEFAULT_BASE`].
    pub fn new(stops: impl IntoIterator<Item = Stop<I, O>>) -> ConstructionResult<Self> {
        Self::with_base(Self::DEFAULT_BASE, stops)
    }

    pub fn with_base(
        base: f32,
        stops: impl IntoIterator<Item = Stop<I, O>>,
    ) -> ConstructionResult<Self> {
        let stops: StopVec<I, O> = stops.into_iter().collect();
        if stops.is_empty() {
            return Err(ConstructionError::EmptyStops);
        }
        Ok(Self { base, stops })
    }

    /// Invariant: `stops` is non-empty.
    pub(crate) fn new_unchecked(base: f32, stops: StopVec<I, O>) -> Self {
        debug_assert!(!stops.is_empty());
        Self { base, stops }
    }

    pub fn base(&self) -> f32 {
        self.base
    }

    pub fn stops(&self) -> &[Stop<I, O>] {
        &self.stops
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stop<I, O>> {
        self.stops.iter()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn type_tag(&self) -> &'static str {
        "exponential"
    }
}

impl<I, O> IntoIterator for ExponentialStops<I, O> {
    type Item = Stop<I, O>;
    type IntoIter = smallvec::IntoIter<Stop<I, O>, 4>;

    fn into_iter(self) -> Self::IntoIter {
        self.stops.into_iter()
    }
}

impl<'s, I, O> IntoIterator for &'s ExponentialStops<I, O> {
    type Item = &'s Stop<I, O>;
    type IntoIter = std::slice::Iter<'s, Stop<I, O>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
