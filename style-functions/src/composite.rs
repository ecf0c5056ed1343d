use std::hash::Hash;

use indexmap::IndexMap;
use itertools::Either;
use ordered_float::OrderedFloat;

use crate::{
    error::{ConstructionError, ConstructionResult},
    stop::{CompositeValue, Stop},
    stops::{ExponentialStops, IntervalStops, StopVec},
};

/// A numeric zoom level usable as a grouping key.
///
/// Float zoom levels are not hashable as-is; they group through
/// [`OrderedFloat`] instead. Integer zoom levels are their own key.
pub trait Zoom: Copy {
    type Key: Hash + Eq;

    fn key(self) -> Self::Key;
}

impl Zoom for f32 {
    type Key = OrderedFloat<f32>;

    fn key(self) -> Self::Key {
        OrderedFloat(self)
    }
}

impl Zoom for f64 {
    type Key = OrderedFloat<f64>;

    fn key(self) -> Self::Key {
        OrderedFloat(self)
    }
}

macro_rules! integer_zoom {
    ($($ty:ty),*) => {
        $(
            impl Zoom for $ty {
                type Key = $ty;

                fn key(self) -> Self::Key {
                    self
                }
            }
        )*
    };
}

integer_zoom!(u8, u16, u32, u64, i8, i16, i32, i64);

/// The one-dimensional stops applying at a single zoom level of a composite
/// function.
#[derive(Clone, PartialEq, Debug)]
pub struct ZoomGroup<Z, S> {
    zoom: Z,
    stops: S,
}

impl<Z: Copy, S> ZoomGroup<Z, S> {
    pub fn zoom(&self) -> Z {
        self.zoom
    }

    pub fn stops(&self) -> &S {
        &self.stops
    }
}

/// A zoom-indexed collection of one-dimensional stops, built by decomposing
/// a flat list of two-dimensional stops.
///
/// The kind is the enum tag; only interval and exponential stops exist in
/// composite form. Groups appear in first-encounter zoom order and the order
/// of stops within a group is the order they held in the flat list. Callers
/// must not rely on the cross-group order: the contract leaves it
/// unspecified.
#[derive(Clone, PartialEq, Debug)]
pub enum CompositeStops<Z, I, O> {
    Interval(Vec<ZoomGroup<Z, IntervalStops<I, O>>>),
    Exponential {
        /// Shared by every inner group, copied from the source definition.
        base: f32,
        groups: Vec<ZoomGroup<Z, ExponentialStops<I, O>>>,
    },
}

impl<Z: Zoom, I, O> CompositeStops<Z, I, O> {
    /// Fold a flat two-dimensional stop list into interval stops per zoom.
    pub fn interval(
        flat: impl IntoIterator<Item = Stop<CompositeValue<Z, I>, O>>,
    ) -> ConstructionResult<Self> {
        let grouped = fold_groups(flat);
        if grouped.is_empty() {
            return Err(ConstructionError::EmptyComposite);
        }
        Ok(Self::Interval(
            grouped
                .into_values()
                .map(|(zoom, stops)| ZoomGroup {
                    zoom,
                    stops: IntervalStops::new_unchecked(stops),
                })
                .collect(),
        ))
    }

    /// Fold a flat two-dimensional stop list into exponential stops per
    /// zoom, sharing `base` across all groups.
    pub fn exponential(
        base: f32,
        flat: impl IntoIterator<Item = Stop<CompositeValue<Z, I>, O>>,
    ) -> ConstructionResult<Self> {
        let grouped = fold_groups(flat);
        if grouped.is_empty() {
            return Err(ConstructionError::EmptyComposite);
        }
        Ok(Self::Exponential {
            base,
            groups: grouped
                .into_values()
                .map(|(zoom, stops)| ZoomGroup {
                    zoom,
                    stops: ExponentialStops::new_unchecked(base, stops),
                })
                .collect(),
        })
    }
}

impl<Z, I, O> CompositeStops<Z, I, O> {
    /// The type tag of the inner one-dimensional stops.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Interval(_) => "interval",
            Self::Exponential { .. } => "exponential",
        }
    }

    /// The shared exponential base, if this is an exponential collection.
    pub fn base(&self) -> Option<f32> {
        match self {
            Self::Interval(_) => None,
            Self::Exponential { base, .. } => Some(*base),
        }
    }

    /// Number of zoom groups.
    pub fn len(&self) -> usize {
        match self {
            Self::Interval(groups) => groups.len(),
            Self::Exponential { groups, .. } => groups.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<Z: Copy, I, O> CompositeStops<Z, I, O> {
    /// Iterate the groups as (zoom, stops in group) pairs regardless of kind.
    pub fn zoom_groups(&self) -> impl Iterator<Item = (Z, &[Stop<I, O>])> + '_ {
        match self {
            Self::Interval(groups) => {
                Either::Left(groups.iter().map(|group| (group.zoom, group.stops.stops())))
            }
            Self::Exponential { groups, .. } => {
                Either::Right(groups.iter().map(|group| (group.zoom, group.stops.stops())))
            }
        }
    }
}

impl<Z: Copy, I: Clone, O: Clone> CompositeStops<Z, I, O> {
    /// Recompose the flat two-dimensional stop list this collection was
    /// built from.
    ///
    /// The result is multiset-equal to the folded input: order is preserved
    /// within each zoom group, cross-group order is unspecified.
    pub fn flatten(&self) -> Vec<Stop<CompositeValue<Z, I>, O>> {
        let mut flat = Vec::new();
        for (zoom, stops) in self.zoom_groups() {
            for stop in stops {
                flat.push(Stop::composite(zoom, stop.input.clone(), stop.output.clone()));
            }
        }
        flat
    }
}

impl<Z: Zoom, I, O> From<IntervalStops<CompositeValue<Z, I>, O>> for CompositeStops<Z, I, O> {
    fn from(stops: IntervalStops<CompositeValue<Z, I>, O>) -> Self {
        Self::Interval(
            fold_groups(stops)
                .into_values()
                .map(|(zoom, stops)| ZoomGroup {
                    zoom,
                    stops: IntervalStops::new_unchecked(stops),
                })
                .collect(),
        )
    }
}

impl<Z: Zoom, I, O> From<ExponentialStops<CompositeValue<Z, I>, O>> for CompositeStops<Z, I, O> {
    fn from(stops: ExponentialStops<CompositeValue<Z, I>, O>) -> Self {
        let base = stops.base();
        Self::Exponential {
            base,
            groups: fold_groups(stops)
                .into_values()
                .map(|(zoom, stops)| ZoomGroup {
                    zoom,
                    stops: ExponentialStops::new_unchecked(base, stops),
                })
                .collect(),
        }
    }
}

/// Group a flat stop list by the zoom component of its composite inputs,
/// preserving both first-encounter group order and in-group stop order.
fn fold_groups<Z: Zoom, I, O>(
    flat: impl IntoIterator<Item = Stop<CompositeValue<Z, I>, O>>,
) -> IndexMap<Z::Key, (Z, StopVec<I, O>)> {
    let mut grouped: IndexMap<Z::Key, (Z, StopVec<I, O>)> = IndexMap::new();
    for stop in flat {
        let CompositeValue { zoom, value } = stop.input;
        grouped
            .entry(zoom.key())
            .or_insert_with(|| (zoom, StopVec::new()))
            .1
            .push(Stop::new(value, stop.output));
    }
    grouped
}
