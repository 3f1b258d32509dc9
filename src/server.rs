//! HTTP surface: the JSON API under `/api` and the front-end shell for
//! everything else.
pub mod extract;
pub mod handlers;
pub mod static_ui;

#[cfg(test)]
mod tests;

use anyhow::Result;
use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{MethodRouter, get, post};
use sea_orm::DatabaseConnection;
use std::future::Future;
use std::io;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

/// Shared handler state. Cloning is cheap: the connection is a pool handle.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub static_dir: PathBuf,
}

pub fn build_router(state: AppState) -> Router {
    use handlers::*;

    let api: [(&str, MethodRouter<AppState>); 5] = [
        ("/api/students", post(create_student)),
        ("/api/faculty", post(create_faculty)),
        ("/api/stats", get(stats)),
        ("/api/enrollments/recent", get(recent_enrollments)),
        ("/api/departments", get(list_departments)),
    ];

    api.into_iter()
        .fold(Router::new(), |router, (path, method_router)| {
            api_route(router, path, method_router)
        })
        .fallback(fallback)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Mounts an API route at `path` and at `path/`. Unsupported methods on
/// either get the JSON 404.
fn api_route(
    router: Router<AppState>,
    path: &str,
    method_router: MethodRouter<AppState>,
) -> Router<AppState> {
    let method_router = method_router.fallback(handlers::api_route_not_found);
    router
        .route(path, method_router.clone())
        .route(&format!("{path}/"), method_router)
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let resp = next.run(req).await;
    debug!(%method, %path, status = resp.status().as_u16(), "request");
    resp
}

/// Serves the router on an already bound listener until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let router = build_router(state);
    info!("Serving HTTP on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_on(tokio::signal::ctrl_c()))
        .await?;
    Ok(())
}

/// Resolves once `signal` fires. If the signal cannot be listened for, this
/// never resolves and the server runs until the process is killed.
async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            error!(error = %e, "failed to install shutdown signal handler");
            std::future::pending::<()>().await;
        }
    }
}
