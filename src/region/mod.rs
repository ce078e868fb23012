//! Region algorithms under measurement.
//!
//! Every entry point takes a [`Meter`](crate::instrument::Meter) and accounts
//! for its pixel, LUT, stack, queue and recursion activity on it.

pub mod equal;
pub mod fill;
pub mod segment;

pub use equal::images_equal;
pub use fill::FillStrategy;
pub use segment::segment;
