//! Domain types.

pub mod bar;
pub mod reference;

pub use bar::Bar;
pub use reference::TickerRef;
