//! One-shot loopback listener for the OAuth2 authorization code.
//!
//! The browser redirect lands on `http://localhost:{port}/?code=...`; the
//! first code received resolves the flow and shuts the listener down.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::routing::get;
use axum::Router;
use log::info;
use tokio::sync::oneshot;

use crate::shared::errors::{AppError, AppResult};

#[derive(Clone)]
struct ListenerState {
    code_tx: Arc<Mutex<Option<oneshot::Sender<String>>>>,
    shutdown_tx: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}

/// Serve until a `?code=` query arrives on the configured port, then
/// return the code.
pub async fn wait_for_code(port: u16) -> AppResult<String> {
    let (code_tx, code_rx) = oneshot::channel();
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let state = ListenerState {
        code_tx: Arc::new(Mutex::new(Some(code_tx))),
        shutdown_tx: Arc::new(Mutex::new(Some(shutdown_tx))),
    };
    let app = Router::new().route("/", get(receive_code)).with_state(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    info!("Waiting for the authorization code on http://localhost:{}/", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        })
        .await?;

    code_rx.await.map_err(|_| {
        AppError::Unauthorized("Authorization flow ended without a code".to_string())
    })
}

async fn receive_code(
    State(state): State<ListenerState>,
    Query(params): Query<HashMap<String, String>>,
) -> &'static str {
    let Some(code) = params.get("code") else {
        return "Missing 'code' query parameter";
    };
    if let Ok(mut tx) = state.code_tx.lock() {
        if let Some(tx) = tx.take() {
            let _ = tx.send(code.clone());
        }
    }
    if let Ok(mut tx) = state.shutdown_tx.lock() {
        if let Some(tx) = tx.take() {
            let _ = tx.send(());
        }
    }
    "Authorized. You can close this tab."
}
