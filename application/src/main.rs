use std::{future::IntoFuture as _, io, sync::OnceLock, time};

use application::{api, router, Args, Config, Service};
use axum::extract::MatchedPath;
use axum_client_ip::InsecureClientIp;
use futures::TryFutureExt as _;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main]
async fn main() {
    init_logging();

    _ = start().await;
}

/// Installs compact log layers: [`STDERR_LEVELS`] go to `stderr`, everything
/// else to `stdout`.
fn init_logging() {
    let enabled = |to_stderr: bool| {
        filter_fn(move |meta| {
            let level = LOG_LEVEL.get().copied().unwrap_or(log::Level::INFO);
            meta.is_span()
                || STDERR_LEVELS.contains(meta.level()) == to_stderr
                    && level >= *meta.level()
        })
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_thread_names(true)
                .with_writer(io::stdout)
                .with_filter(enabled(false)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_thread_names(true)
                .with_writer(io::stderr)
                .with_filter(enabled(true)),
        )
        .init();
}

async fn start() -> Result<(), ()> {
    let Args { config } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let Config {
        server,
        service,
        log,
    } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let service = Service::new(service.into());
    log::info!(config = ?service.config(), "rent rules loaded");

    let allow_origin = if server.cors.origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            server
                .cors
                .origins
                .iter()
                .map(|origin| {
                    origin.parse::<http::header::HeaderValue>().map_err(|e| {
                        log::error!("invalid CORS origin `{origin}`: {e}");
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
        )
    };
    let cors = CorsLayer::new()
        .allow_methods([http::Method::GET, http::Method::POST])
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_origin(allow_origin);

    let app = router(service, api::schema()).layer(cors).layer(
        TraceLayer::new_for_http()
            .make_span_with(|r: &http::Request<_>| {
                log::info_span!(
                    "HTTP request",
                    http.client_ip = InsecureClientIp::from(
                        r.headers(),
                        r.extensions(),
                    )
                    .map(|ip| ip.0.to_string())
                    .ok(),
                    http.method = r.method().as_str(),
                    http.route = r
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str),
                    http.status_code = log::field::Empty,
                )
            })
            .on_response(
                |r: &http::Response<_>, dur: time::Duration, span: &log::Span| {
                    let status = r.status();
                    _ = span.record("http.status_code", status.as_u16());

                    let elapsed = format!("{}ms", dur.as_millis());
                    if status.is_server_error() {
                        log::error!(%elapsed, "request failed");
                    } else if status.is_client_error() {
                        log::warn!(%elapsed, "request rejected");
                    } else {
                        log::info!(%elapsed, "request served");
                    }
                },
            ),
    );

    let addr = (server.host.clone(), server.port);
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        log::error!("cannot bind `{}:{}`: {e}", server.host, server.port);
    })?;

    log::info!("serving GraphQL on `{}:{}`", server.host, server.port);

    axum::serve(listener, app)
        .into_future()
        .map_err(|e| log::error!("server stopped: {e}"))
        .await
}
