//! [`Handler`] abstractions.

use std::future::Future;

/// Asynchronous executable handler.
///
/// Used for operations crossing an I/O boundary, like requests to a remote
/// backend.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}

/// Synchronous executable handler.
///
/// Unlike [`Handler`], the operation is complete once
/// [`BlockingHandler::execute()`] returns, so no other caller can observe it
/// half-applied.
pub trait BlockingHandler<Args = ()> {
    /// Type of successful [`BlockingHandler`] result.
    type Ok;

    /// Type of this [`BlockingHandler`] error.
    type Err;

    /// Executes this [`BlockingHandler`] with the provided arguments.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn execute(&self, args: Args) -> Result<Self::Ok, Self::Err>;
}
