//! HTTP route table
//!
//! Every endpoint is declared once in [`ROUTES`]. The table is checked when
//! the router is built, so a duplicated `(method, path)` pair fails startup
//! instead of shadowing a handler.

use crate::{
    api,
    error::ServerError,
    middleware::auth_middleware,
    state::AppState,
};
use axum::{
    http::{header, StatusCode},
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::{on, MethodFilter, MethodRouter},
    Router,
};
use std::{collections::HashSet, fmt, sync::Arc, time::Duration};
use thiserror::Error;
use tower_http::{
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    fn filter(self) -> MethodFilter {
        match self {
            HttpMethod::Get => MethodFilter::GET,
            HttpMethod::Post => MethodFilter::POST,
            HttpMethod::Patch => MethodFilter::PATCH,
            HttpMethod::Delete => MethodFilter::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
}

/// One endpoint: where it lives, who may call it, and what serves it
#[derive(Clone, Copy)]
pub struct Route {
    pub method: HttpMethod,
    /// Path relative to the `/api` prefix
    pub path: &'static str,
    pub access: Access,
    pub operation: &'static str,
    pub handler: fn(MethodFilter) -> MethodRouter<AppState>,
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("access", &self.access)
            .field("operation", &self.operation)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteTableError {
    #[error("duplicate route {method} {path} ({operation})")]
    Duplicate {
        method: HttpMethod,
        path: &'static str,
        operation: &'static str,
    },

    #[error("route path must start with '/': {0}")]
    InvalidPath(&'static str),
}

pub const ROUTES: &[Route] = &[
    // Public
    Route {
        method: HttpMethod::Get,
        path: "/health",
        access: Access::Public,
        operation: "health",
        handler: |m| on(m, api::health::health),
    },
    Route {
        method: HttpMethod::Post,
        path: "/auth/login",
        access: Access::Public,
        operation: "login",
        handler: |m| on(m, api::auth::login),
    },
    Route {
        method: HttpMethod::Post,
        path: "/auth/refresh",
        access: Access::Public,
        operation: "refresh",
        handler: |m| on(m, api::auth::refresh),
    },
    // Comments
    Route {
        method: HttpMethod::Get,
        path: "/videos/:video_id/comments",
        access: Access::Public,
        operation: "list_video_comments",
        handler: |m| on(m, api::comments::list_video_comments),
    },
    Route {
        method: HttpMethod::Post,
        path: "/videos/:video_id/comments",
        access: Access::Authenticated,
        operation: "add_comment",
        handler: |m| on(m, api::comments::add_comment),
    },
    Route {
        method: HttpMethod::Patch,
        path: "/comments/:comment_id",
        access: Access::Authenticated,
        operation: "update_comment",
        handler: |m| on(m, api::comments::update_comment),
    },
    Route {
        method: HttpMethod::Delete,
        path: "/comments/:comment_id",
        access: Access::Authenticated,
        operation: "delete_comment",
        handler: |m| on(m, api::comments::delete_comment),
    },
    // Playlists
    Route {
        method: HttpMethod::Post,
        path: "/playlists",
        access: Access::Authenticated,
        operation: "create_playlist",
        handler: |m| on(m, api::playlists::create_playlist),
    },
    Route {
        method: HttpMethod::Get,
        path: "/users/:user_id/playlists",
        access: Access::Authenticated,
        operation: "list_user_playlists",
        handler: |m| on(m, api::playlists::list_user_playlists),
    },
    Route {
        method: HttpMethod::Get,
        path: "/playlists/:playlist_id",
        access: Access::Authenticated,
        operation: "get_playlist",
        handler: |m| on(m, api::playlists::get_playlist),
    },
    Route {
        method: HttpMethod::Patch,
        path: "/playlists/:playlist_id",
        access: Access::Authenticated,
        operation: "update_playlist",
        handler: |m| on(m, api::playlists::update_playlist),
    },
    Route {
        method: HttpMethod::Delete,
        path: "/playlists/:playlist_id",
        access: Access::Authenticated,
        operation: "delete_playlist",
        handler: |m| on(m, api::playlists::delete_playlist),
    },
    Route {
        method: HttpMethod::Patch,
        path: "/playlists/:playlist_id/videos/:video_id",
        access: Access::Authenticated,
        operation: "add_video_to_playlist",
        handler: |m| on(m, api::playlists::add_video_to_playlist),
    },
    Route {
        method: HttpMethod::Delete,
        path: "/playlists/:playlist_id/videos/:video_id",
        access: Access::Authenticated,
        operation: "remove_video_from_playlist",
        handler: |m| on(m, api::playlists::remove_video_from_playlist),
    },
    // Dashboard
    Route {
        method: HttpMethod::Get,
        path: "/dashboard/stats",
        access: Access::Authenticated,
        operation: "channel_stats",
        handler: |m| on(m, api::dashboard::channel_stats),
    },
    Route {
        method: HttpMethod::Get,
        path: "/dashboard/videos",
        access: Access::Authenticated,
        operation: "channel_videos",
        handler: |m| on(m, api::dashboard::channel_videos),
    },
];

/// Check a route table for malformed paths and duplicate endpoints
pub fn validate(table: &[Route]) -> Result<(), RouteTableError> {
    let mut seen = HashSet::new();
    for route in table {
        if !route.path.starts_with('/') {
            return Err(RouteTableError::InvalidPath(route.path));
        }
        if !seen.insert((route.method, route.path)) {
            return Err(RouteTableError::Duplicate {
                method: route.method,
                path: route.path,
                operation: route.operation,
            });
        }
    }
    Ok(())
}

/// Build the application router from [`ROUTES`]
pub fn build_router(state: AppState, request_timeout: Duration) -> Result<Router, RouteTableError> {
    build_router_from(ROUTES, state, request_timeout)
}

/// Build a router from an arbitrary table, mounted under `/api`
pub fn build_router_from(
    table: &[Route],
    state: AppState,
    request_timeout: Duration,
) -> Result<Router, RouteTableError> {
    validate(table)?;

    let auth_service = Arc::clone(&state.auth_service);
    let mut api_routes: Router<AppState> = Router::new();

    for route in table {
        let mut method_router = (route.handler)(route.method.filter());
        if route.access == Access::Authenticated {
            method_router = method_router.route_layer(axum_middleware::from_fn_with_state(
                Arc::clone(&auth_service),
                auth_middleware,
            ));
        }
        tracing::debug!("Registering {} /api{} -> {}", route.method, route.path, route.operation);
        api_routes = api_routes.route(route.path, method_router);
    }

    // Applies to the method routers registered above, so it must follow them
    let api_routes = api_routes.method_not_allowed_fallback(method_not_allowed);

    Ok(Router::new()
        .nest("/api", api_routes)
        .fallback(route_not_found)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(axum_middleware::map_response(timeout_envelope))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state))
}

async fn route_not_found() -> ServerError {
    ServerError::NotFound("Route not found".to_string())
}

async fn method_not_allowed() -> ServerError {
    ServerError::MethodNotAllowed
}

/// `TimeoutLayer` answers with a bodiless 408; give it the error envelope
async fn timeout_envelope(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT
        && !response.headers().contains_key(header::CONTENT_TYPE)
    {
        tracing::warn!("Request timed out");
        return ServerError::Timeout.into_response();
    }
    response
}
