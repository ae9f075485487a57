//! [`Context`]-related definitions.

use std::sync::atomic::{self, AtomicU16};

use axum::{async_trait, extract::FromRequestParts};
use juniper::{
    http::{GraphQLBatchResponse, GraphQLResponse},
    IntoFieldError as _,
};

use crate::{Error, JuniperResponse, Service};

/// Per-request GraphQL context.
#[derive(Debug)]
pub struct Context {
    /// [`Service`] answering the queries of the request.
    service: Service,

    /// HTTP status reported if the request fails, updated by the resolvers.
    error_status_code: AtomicU16,
}

impl Context {
    /// Creates a new [`Context`] around the provided [`Service`].
    ///
    /// Unless a resolver reports otherwise, failures are reported as
    /// `500 Internal Server Error`.
    #[must_use]
    pub fn new(service: Service) -> Self {
        Self {
            service,
            error_status_code: AtomicU16::new(
                http::StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            ),
        }
    }

    /// Returns the [`Service`] of this [`Context`].
    #[must_use]
    pub fn service(&self) -> &Service {
        &self.service
    }

    /// Returns the HTTP status to report if the request fails.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn error_status_code(&self) -> http::StatusCode {
        http::StatusCode::from_u16(
            self.error_status_code.load(atomic::Ordering::Relaxed),
        )
        .expect("invalid status code")
    }

    /// Overrides the HTTP status to report if the request fails.
    pub fn set_error_status_code(&self, status_code: http::StatusCode) {
        self.error_status_code
            .store(status_code.as_u16(), atomic::Ordering::Relaxed);
    }

    /// Returns a [`Result::map_err()`] closure recording the status of the
    /// passed [`Error`] via [`Context::set_error_status_code()`].
    pub fn error(&self) -> impl FnOnce(Error) -> Error + '_ {
        move |err| {
            self.set_error_status_code(err.status_code);
            err
        }
    }
}

impl juniper::Context for Context {}

#[async_trait]
impl<S> FromRequestParts<S> for Context
where
    S: Send + Sync,
{
    type Rejection = JuniperResponse;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        let service =
            parts.extensions.get::<Service>().copied().ok_or_else(|| {
                JuniperResponse {
                    status_code: http::StatusCode::INTERNAL_SERVER_ERROR,
                    response: GraphQLBatchResponse::Single(
                        GraphQLResponse::error(
                            Error::internal(&"missing `Service` extension")
                                .into_field_error(),
                        ),
                    ),
                }
            })?;

        Ok(Self::new(service))
    }
}

#[cfg(test)]
mod spec {
    use service::Config;

    use crate::{Error, Service};

    use super::Context;

    #[test]
    fn records_status_of_last_error() {
        let ctx = Context::new(Service::new(Config::default()));
        assert_eq!(
            ctx.error_status_code(),
            http::StatusCode::INTERNAL_SERVER_ERROR,
        );

        let mut err = Error::internal(&"rejected");
        err.status_code = http::StatusCode::BAD_REQUEST;
        let err = ctx.error()(err);

        assert_eq!(err.message, "rejected");
        assert_eq!(ctx.error_status_code(), http::StatusCode::BAD_REQUEST);
    }
}
