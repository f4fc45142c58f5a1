//! [`Handler`] abstractions.

use std::future::Future;

/// Asynchronous handler of some `Args`.
///
/// Queries, commands and database operations are all [`Handler`]s, differing
/// only by the arguments they accept.
pub trait Handler<Args = ()> {
    /// Type of a successful result.
    type Ok;

    /// Type of an error.
    type Err;

    /// Executes this [`Handler`] with the provided `args`.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
