//! [`Task`]s definitions.

pub mod expire_bookings;

pub use common::Handler as Task;

pub use self::expire_bookings::ExpireBookings;
