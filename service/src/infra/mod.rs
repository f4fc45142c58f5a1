//! Infrastructure layer.

pub mod database;

#[cfg(feature = "memory")]
pub use self::database::{memory, Memory};
pub use self::database::Database;
