//! Domain definitions.
//!
//! Everything here is pure and synchronous: no I/O, no shared state.

pub mod availability;
pub mod booking;
pub mod cancellation;
pub mod pricing;
pub mod space;

pub use self::{booking::Booking, space::Space};
