#![forbid(unsafe_code)]

pub mod composite;
pub mod error;
pub mod function;
pub mod interchange;
pub mod stop;
pub mod stops;

pub use composite::{CompositeStops, Zoom, ZoomGroup};
pub use error::{ConstructionError, ConstructionResult};
pub use function::{CameraFunction, CompositeFunction, SourceFunction};
pub use interchange::{InterchangeMap, ToInterchange};
pub use stop::{CompositeValue, Stop};
pub use stops::{
    CategoricalStops, ExponentialStops, IdentityStops, IntervalStops, Stops, StopsVariant,
};
