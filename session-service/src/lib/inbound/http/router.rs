use std::sync::Arc;
use std::time::Duration;

use auth::TokenService;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::account::account;
use super::handlers::index::index;
use super::handlers::login::login;
use super::handlers::login::login_form;
use super::handlers::logout::logout;
use super::handlers::signup::signup;
use super::middleware::authenticate;
use super::middleware::SessionGuard;
use crate::account::service::AccountService;
use crate::config::SessionConfig;
use crate::outbound::repositories::InMemoryAccountRepository;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AccountService<InMemoryAccountRepository>>,
    pub tokens: Arc<TokenService>,
    pub session: Arc<SessionConfig>,
}

pub fn create_router(
    account_service: Arc<AccountService<InMemoryAccountRepository>>,
    tokens: Arc<TokenService>,
    session: SessionConfig,
) -> Router {
    let state = AppState {
        account_service,
        tokens: Arc::clone(&tokens),
        session: Arc::new(session),
    };

    let guard = SessionGuard::new(tokens, Arc::clone(&state.session));

    let public_routes = Router::new()
        .route("/login", get(login_form).post(login))
        .route("/signup", post(signup))
        .route("/logout", get(logout));

    // Session-aware: anonymous requests fall through without an identity.
    let session_routes = Router::new()
        .route("/", get(index))
        .route_layer(middleware::from_fn_with_state(guard.clone(), authenticate));

    let protected_routes = Router::new()
        .route("/account", get(account))
        .route_layer(middleware::from_fn_with_state(
            guard.redirecting_to(state.session.login_path.clone()),
            authenticate,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            // Headers are left out: they carry the session cookie.
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(session_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .with_state(state)
}
