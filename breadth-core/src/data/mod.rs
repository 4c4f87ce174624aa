//! Data acquisition: provider traits, the Polygon client, and the
//! trading-weekday calendar.

pub mod calendar;
pub mod polygon;
pub mod provider;

pub use calendar::weekdays;
pub use polygon::PolygonProvider;
pub use provider::{
    BarProvider, DataError, FetchProgress, ReferenceProvider, SilentProgress, StdoutProgress,
};
