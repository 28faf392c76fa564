//! Main webserver implementation
//!
//! `WebServer` wires the order store, the advisor and the session registry
//! into one axum router. Every request does its own fresh load or mutation;
//! nothing about the order file is cached between requests.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
};
use chrono::Local;
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use advisor::AdvisorClient;
use orderbook::{DatasetLoader, MutationGateway, OrderStore};
use shared::{
    AdviceMode, FieldUpdates, MutationOutcome, OrderDraft, ProcessId, RowId, logging, process_info,
    process_warn,
};

use crate::core::{AnalyticsEngine, ForecastEngine, build_schedule};
use crate::error::{WebServerError, WebServerResult};
use crate::state::WebServerState;
use crate::traits::SessionRegistry;
use crate::types::{
    AdviceReply, AdviceRequest, AnalyticsQuery, AnalyticsResponse, EMPTY_DATABASE_MESSAGE, ExtractRequest,
    ExtractResponse, ForecastRequest, ForecastResponse, LoginRequest, LoginResponse, OrderRow, OrdersResponse,
    ScheduleQuery,
};

/// Main webserver struct with dependency injection
pub struct WebServer<S, A, R>
where
    S: OrderStore,
    A: AdvisorClient,
    R: SessionRegistry,
{
    state: Arc<WebServerState>,
    loader: DatasetLoader<S>,
    gateway: MutationGateway<S>,
    advisor: Arc<A>,
    sessions: Arc<R>,
    analytics: Arc<AnalyticsEngine>,
    forecaster: Arc<ForecastEngine>,
}

impl<S, A, R> Clone for WebServer<S, A, R>
where
    S: OrderStore,
    A: AdvisorClient,
    R: SessionRegistry,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            loader: self.loader.clone(),
            gateway: self.gateway.clone(),
            advisor: Arc::clone(&self.advisor),
            sessions: Arc::clone(&self.sessions),
            analytics: Arc::clone(&self.analytics),
            forecaster: Arc::clone(&self.forecaster),
        }
    }
}

impl<S, A, R> WebServer<S, A, R>
where
    S: OrderStore + 'static,
    A: AdvisorClient + 'static,
    R: SessionRegistry + 'static,
{
    /// Create a new webserver with dependency injection
    pub fn new(bind_address: SocketAddr, store: Arc<S>, advisor: Arc<A>, sessions: Arc<R>) -> Self {
        Self {
            state: Arc::new(WebServerState::new(bind_address)),
            loader: DatasetLoader::new(Arc::clone(&store)),
            gateway: MutationGateway::new(store),
            advisor,
            sessions,
            analytics: Arc::new(AnalyticsEngine::new()),
            forecaster: Arc::new(ForecastEngine::new()),
        }
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            // Access gate
            .route("/api/login", post(login_handler::<S, A, R>))
            .route("/api/logout", post(logout_handler::<S, A, R>))
            // Views
            .route("/api/schedule", get(schedule_handler::<S, A, R>))
            .route("/api/analytics", get(analytics_handler::<S, A, R>))
            .route("/api/analytics/advice", post(analytics_advice_handler::<S, A, R>))
            .route("/api/forecast", post(forecast_handler::<S, A, R>))
            // Order entry and editing
            .route(
                "/api/orders",
                get(list_orders_handler::<S, A, R>).post(create_order_handler::<S, A, R>),
            )
            .route(
                "/api/orders/:id",
                put(update_order_handler::<S, A, R>).delete(delete_order_handler::<S, A, R>),
            )
            .route("/api/extract", post(extract_handler::<S, A, R>))
            // Health check
            .route("/health", get(health_check::<S, A, R>))
            .layer(ServiceBuilder::new().layer(CorsLayer::permissive()).into_inner())
            .with_state(self.clone())
    }

    /// Serve until Ctrl+C
    pub async fn run(&self) -> WebServerResult<()> {
        let router = self.build_router();
        let address = self.state.bind_address;

        let listener = tokio::net::TcpListener::bind(address)
            .await
            .map_err(|e| WebServerError::ServerStartup(format!("Failed to bind to {}: {}", address, e)))?;

        logging::log_startup(
            ProcessId::current(),
            &format!("🌐 Dashboard API listening on http://{}", address),
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| WebServerError::ServerStartup(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Get server state for external access
    pub fn state(&self) -> &Arc<WebServerState> {
        &self.state
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => logging::log_shutdown(ProcessId::current(), "Received Ctrl+C signal"),
        Err(err) => logging::log_error(ProcessId::current(), "Signal handling", &err),
    }
}

/// Bearer token from the `Authorization` header, if it names an open session
async fn authorize<S, A, R>(webserver: &WebServer<S, A, R>, headers: &HeaderMap) -> Result<Uuid, StatusCode>
where
    S: OrderStore,
    A: AdvisorClient,
    R: SessionRegistry,
{
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .and_then(|value| Uuid::parse_str(value.trim()).ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if webserver.sessions.is_valid(&token).await {
        Ok(token)
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}

fn outcome_status(outcome: &MutationOutcome) -> StatusCode {
    if outcome.success {
        StatusCode::OK
    } else if outcome.is_not_found() {
        StatusCode::NOT_FOUND
    } else if outcome.is_rejected() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

// HTTP Handlers

async fn login_handler<S, A, R>(
    State(webserver): State<WebServer<S, A, R>>,
    Json(request): Json<LoginRequest>,
) -> Response
where
    S: OrderStore + 'static,
    A: AdvisorClient + 'static,
    R: SessionRegistry + 'static,
{
    match webserver.sessions.login(&request.password).await {
        Some(token) => Json(LoginResponse { token }).into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Incorrect password." })),
        )
            .into_response(),
    }
}

async fn logout_handler<S, A, R>(
    State(webserver): State<WebServer<S, A, R>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, StatusCode>
where
    S: OrderStore + 'static,
    A: AdvisorClient + 'static,
    R: SessionRegistry + 'static,
{
    let token = authorize(&webserver, &headers).await?;
    let closed = webserver.sessions.logout(&token).await;
    Ok(Json(json!({ "success": closed })))
}

async fn list_orders_handler<S, A, R>(
    State(webserver): State<WebServer<S, A, R>>,
    headers: HeaderMap,
) -> Result<Json<OrdersResponse>, StatusCode>
where
    S: OrderStore + 'static,
    A: AdvisorClient + 'static,
    R: SessionRegistry + 'static,
{
    authorize(&webserver, &headers).await?;
    let table = webserver.loader.load().await;

    Ok(Json(OrdersResponse {
        orders: table.iter().map(OrderRow::from).collect(),
        skipped_lines: table.skipped_lines,
        message: table.is_empty().then(|| EMPTY_DATABASE_MESSAGE.to_string()),
    }))
}

async fn schedule_handler<S, A, R>(
    State(webserver): State<WebServer<S, A, R>>,
    headers: HeaderMap,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<crate::core::Schedule>, StatusCode>
where
    S: OrderStore + 'static,
    A: AdvisorClient + 'static,
    R: SessionRegistry + 'static,
{
    authorize(&webserver, &headers).await?;
    let table = webserver.loader.load().await;

    let mut schedule = build_schedule(&table, query.view, Local::now().date_naive());
    if table.is_empty() {
        schedule.message = Some(EMPTY_DATABASE_MESSAGE.to_string());
    }
    Ok(Json(schedule))
}

async fn analytics_handler<S, A, R>(
    State(webserver): State<WebServer<S, A, R>>,
    headers: HeaderMap,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsResponse>, StatusCode>
where
    S: OrderStore + 'static,
    A: AdvisorClient + 'static,
    R: SessionRegistry + 'static,
{
    authorize(&webserver, &headers).await?;
    let table = webserver.loader.load().await;

    let years = webserver.analytics.available_years(&table);
    let year = query.year.or_else(|| years.first().copied());
    let snapshot = year.and_then(|y| webserver.analytics.year_snapshot(&table, y));

    let message = if table.is_empty() {
        Some(EMPTY_DATABASE_MESSAGE.to_string())
    } else {
        match (year, &snapshot) {
            (_, Some(_)) => None,
            (Some(y), None) => Some(format!("No orders in {}.", y)),
            (None, None) => Some("No orders with a valid date.".to_string()),
        }
    };

    Ok(Json(AnalyticsResponse {
        years,
        snapshot,
        message,
    }))
}

async fn analytics_advice_handler<S, A, R>(
    State(webserver): State<WebServer<S, A, R>>,
    headers: HeaderMap,
    Json(request): Json<AdviceRequest>,
) -> Result<Json<AdviceReply>, StatusCode>
where
    S: OrderStore + 'static,
    A: AdvisorClient + 'static,
    R: SessionRegistry + 'static,
{
    authorize(&webserver, &headers).await?;
    let table = webserver.loader.load().await;

    let year = request
        .year
        .or_else(|| webserver.analytics.available_years(&table).first().copied());
    let Some(snapshot) = year.and_then(|y| webserver.analytics.year_snapshot(&table, y)) else {
        let message = match year {
            Some(y) if !table.is_empty() => format!("No orders in {}.", y),
            _ => EMPTY_DATABASE_MESSAGE.to_string(),
        };
        return Ok(Json(AdviceReply::unavailable(message)));
    };

    let context = webserver.analytics.advice_context(&snapshot);
    let result = webserver
        .advisor
        .strategic_advice(&context, AdviceMode::Analytics)
        .await;
    if let Err(e) = &result {
        process_warn!(ProcessId::current(), "⚠️ Analytics advice failed: {}", e);
    }
    Ok(Json(AdviceReply::from(result)))
}

async fn forecast_handler<S, A, R>(
    State(webserver): State<WebServer<S, A, R>>,
    headers: HeaderMap,
    Json(request): Json<ForecastRequest>,
) -> Result<Response, StatusCode>
where
    S: OrderStore + 'static,
    A: AdvisorClient + 'static,
    R: SessionRegistry + 'static,
{
    authorize(&webserver, &headers).await?;
    let table = webserver.loader.load().await;

    let forecast = match webserver.forecaster.forecast(&table, request.year, request.month) {
        Ok(forecast) => forecast,
        Err(e) => {
            let status = match e {
                WebServerError::InsufficientHistory { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                WebServerError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let body = ForecastResponse {
                ok: false,
                forecast: None,
                advice: None,
                message: Some(e.to_string()),
            };
            return Ok((status, Json(body)).into_response());
        }
    };

    let advice = if request.with_advice {
        let context = webserver.forecaster.advice_context(&forecast);
        let result = webserver
            .advisor
            .strategic_advice(&context, AdviceMode::Forecast)
            .await;
        if let Err(e) = &result {
            process_warn!(ProcessId::current(), "⚠️ Forecast advice failed: {}", e);
        }
        Some(AdviceReply::from(result))
    } else {
        None
    };

    Ok(Json(ForecastResponse {
        ok: true,
        forecast: Some(forecast),
        advice,
        message: None,
    })
    .into_response())
}

async fn create_order_handler<S, A, R>(
    State(webserver): State<WebServer<S, A, R>>,
    headers: HeaderMap,
    Json(draft): Json<OrderDraft>,
) -> Result<Response, StatusCode>
where
    S: OrderStore + 'static,
    A: AdvisorClient + 'static,
    R: SessionRegistry + 'static,
{
    authorize(&webserver, &headers).await?;
    let outcome = webserver.gateway.create(&draft).await;
    let status = if outcome.success {
        StatusCode::CREATED
    } else {
        outcome_status(&outcome)
    };
    Ok((status, Json(outcome)).into_response())
}

async fn update_order_handler<S, A, R>(
    State(webserver): State<WebServer<S, A, R>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(updates): Json<FieldUpdates>,
) -> Result<Response, StatusCode>
where
    S: OrderStore + 'static,
    A: AdvisorClient + 'static,
    R: SessionRegistry + 'static,
{
    authorize(&webserver, &headers).await?;
    let outcome = webserver.gateway.update(RowId::new(id), &updates).await;
    Ok((outcome_status(&outcome), Json(outcome)).into_response())
}

async fn delete_order_handler<S, A, R>(
    State(webserver): State<WebServer<S, A, R>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<Response, StatusCode>
where
    S: OrderStore + 'static,
    A: AdvisorClient + 'static,
    R: SessionRegistry + 'static,
{
    authorize(&webserver, &headers).await?;
    let outcome = webserver.gateway.delete(RowId::new(id)).await;
    Ok((outcome_status(&outcome), Json(outcome)).into_response())
}

async fn extract_handler<S, A, R>(
    State(webserver): State<WebServer<S, A, R>>,
    headers: HeaderMap,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, StatusCode>
where
    S: OrderStore + 'static,
    A: AdvisorClient + 'static,
    R: SessionRegistry + 'static,
{
    authorize(&webserver, &headers).await?;
    match webserver.advisor.extract_order(&request.text).await {
        Ok(order) => {
            let draft = OrderDraft::from_extracted(&order, Local::now().date_naive());
            process_info!(
                ProcessId::current(),
                "🧾 Extracted order for {} ({} pax)",
                draft.customer_name,
                draft.pax
            );
            Ok(Json(ExtractResponse::extracted(order, draft)))
        }
        Err(e) => {
            process_warn!(ProcessId::current(), "⚠️ Order extraction failed: {}", e);
            Ok(Json(ExtractResponse::failed(&e)))
        }
    }
}

/// Health check endpoint
async fn health_check<S, A, R>(State(webserver): State<WebServer<S, A, R>>) -> Json<serde_json::Value>
where
    S: OrderStore + 'static,
    A: AdvisorClient + 'static,
    R: SessionRegistry + 'static,
{
    Json(json!({
        "status": "healthy",
        "uptime_seconds": webserver.state.get_uptime_seconds(),
        "active_sessions": webserver.sessions.active_count().await,
    }))
}
