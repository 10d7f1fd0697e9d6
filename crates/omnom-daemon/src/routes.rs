//! Axum router and all HTTP handlers for omnom-daemon.
//!
//! `build_router` is the single entry point; `main.rs` calls it, mounts the
//! static directory with [`with_static_assets`] and attaches middleware.
//!
//! Every order-page handler ends by re-rendering the current order list.
//! Bad input, unknown ids and gateway failures are logged (by the handler
//! or the Order Service) and never surface as a distinct page state.

use std::{path::Path, sync::Arc};

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use tower_http::services::ServeDir;
use tracing::warn;

use crate::{
    api_types::{HealthResponse, NotifyCustomerForm, OrderStatusForm, OrdersResponse},
    state::AppState,
    views,
};

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the application router wired to the given shared state.
///
/// Static assets and middleware layers are **not** applied here so tests can
/// use the bare router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(order_page).post(order_status))
        .route("/notifyCustomer", post(notify_customer))
        .route("/v1/health", get(health))
        .route("/v1/orders", get(orders_json))
        .with_state(state)
}

/// Serve files under `dir` at `/static/*`.
pub fn with_static_assets(router: Router, dir: impl AsRef<Path>) -> Router {
    router.nest_service("/static", ServeDir::new(dir.as_ref()))
}

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

pub(crate) async fn order_page(State(st): State<Arc<AppState>>) -> Response {
    render_orders(&st).await
}

// ---------------------------------------------------------------------------
// POST /   (orderStatus=<id>_<status>)
// ---------------------------------------------------------------------------

pub(crate) async fn order_status(
    State(st): State<Arc<AppState>>,
    form: Result<Form<OrderStatusForm>, FormRejection>,
) -> Response {
    match form {
        Ok(Form(f)) if f.order_status.trim().is_empty() => {
            warn!("status form posted without orderStatus");
        }
        Ok(Form(f)) => {
            // Outcome is logged inside the service; the page shows the result.
            let _ = st.orders.apply_status_change(&f.order_status).await;
        }
        Err(rej) => {
            warn!(error = %rej, "unreadable status form");
        }
    }
    render_orders(&st).await
}

// ---------------------------------------------------------------------------
// POST /notifyCustomer   (sendMessageTo=<id>)
// ---------------------------------------------------------------------------

pub(crate) async fn notify_customer(
    State(st): State<Arc<AppState>>,
    form: Result<Form<NotifyCustomerForm>, FormRejection>,
) -> Response {
    match form {
        Ok(Form(f)) if f.send_message_to.trim().is_empty() => {
            warn!("notify form posted without sendMessageTo");
        }
        Ok(Form(f)) => {
            let _ = st.orders.notify_customer(f.send_message_to.trim()).await;
        }
        Err(rej) => {
            warn!(error = %rej, "unreadable notify form");
        }
    }
    render_orders(&st).await
}

// ---------------------------------------------------------------------------
// GET /v1/health
// ---------------------------------------------------------------------------

pub(crate) async fn health(State(st): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            ok: true,
            service: st.build.service,
            version: st.build.version,
            gateway: st.orders.gateway_name(),
            daemon_uptime_secs: st.uptime_secs(),
        }),
    )
}

// ---------------------------------------------------------------------------
// GET /v1/orders
// ---------------------------------------------------------------------------

pub(crate) async fn orders_json(State(st): State<Arc<AppState>>) -> impl IntoResponse {
    let orders = st.orders.orders().await;
    (StatusCode::OK, Json(OrdersResponse { orders }))
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

async fn render_orders(st: &AppState) -> Response {
    let orders = st.orders.orders().await;
    Html(views::render_order_page(&orders)).into_response()
}
