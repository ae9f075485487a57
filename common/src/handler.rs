//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler of some `Args`.
///
/// Implemented by services for every query they are able to answer.
///
/// # Example
///
/// ```rust
/// # use std::convert::Infallible;
/// # use common::Handler;
/// struct Doubler;
///
/// impl Handler<u32> for Doubler {
///     type Ok = u32;
///     type Err = Infallible;
///
///     async fn execute(&self, n: u32) -> Result<u32, Infallible> {
///         Ok(n * 2)
///     }
/// }
/// ```
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided `args`.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
