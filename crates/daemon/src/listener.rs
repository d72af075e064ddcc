// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP listener for push deliveries.
//!
//! Each delivery runs the controller in its own task so a panic in one
//! invocation is contained and logged. The endpoint acknowledges every
//! delivery with `204 No Content` once processing completes, whatever the
//! outcome, so the transport never redelivers because of the controller.

use std::future::Future;
use std::net::SocketAddr;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, warn};
use xr_adapters::JobControl;
use xr_core::NotificationEvent;
use xr_engine::{Outcome, RetryController};

use crate::envelope;

/// Listener task serving the push endpoint.
pub struct Listener<J> {
    socket: TcpListener,
    controller: RetryController<J>,
}

impl<J: JobControl> Listener<J> {
    pub fn new(socket: TcpListener, controller: RetryController<J>) -> Self {
        Self { socket, controller }
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Serve until `shutdown` resolves, then drain in-flight deliveries.
    pub async fn run<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.socket, router(self.controller))
            .with_graceful_shutdown(shutdown)
            .await
    }
}

/// Routes: `POST /` for deliveries, `GET /healthz` for health checks.
pub fn router<J: JobControl>(controller: RetryController<J>) -> Router {
    Router::new()
        .route("/", post(receive::<J>))
        .route("/healthz", get(healthz))
        .with_state(controller)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn receive<J: JobControl>(
    State(controller): State<RetryController<J>>,
    body: Bytes,
) -> StatusCode {
    match envelope::parse(&body) {
        Ok(event) => {
            dispatch(controller, event).await;
        }
        Err(e) => warn!(error = %e, "ignoring push delivery"),
    }
    StatusCode::NO_CONTENT
}

/// Run one invocation in its own task. Returns `None` if it panicked.
pub(crate) async fn dispatch<J: JobControl>(
    controller: RetryController<J>,
    event: NotificationEvent,
) -> Option<Outcome> {
    let message_id = event.log_id().to_string();
    let handle = tokio::spawn(async move { controller.handle(&event).await });
    match handle.await {
        Ok(outcome) => Some(outcome),
        Err(e) => {
            error!(message_id, error = %e, "retry handler aborted");
            None
        }
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
