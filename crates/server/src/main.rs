// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod live;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use helpdesk::NotificationKind;
use helpdesk_api::{
    ApiError, AuthenticatedCaller, CloseTicketRequest, CreateTicketRequest, ListTicketsRequest,
    ListTicketsResponse, NoExternalCalendar, NotificationInfo, RateTicketRequest,
    RejectTicketRequest, RolePermissionsResponse, ScheduleResponse, StaffInfo, TicketInfo,
    UpdateAvailabilityRequest, UpdatePermissionsRequest, accept_ticket, close_ticket,
    create_ticket, current_timestamp, delete_notification, get_role_permissions, get_schedule,
    get_ticket, list_notifications, list_staff, list_tickets, mark_notification_read, rate_ticket,
    reject_ticket, reset_role_permissions, set_staff_availability, update_role_permissions,
};
use helpdesk_domain::{Availability, PermissionSet, Role, TicketStatus, Urgency};
use helpdesk_persistence::SqlitePersistence;

use crate::live::{LiveEvent, LiveEventBroadcaster, live_events_handler};

/// Helpdesk Server - HTTP server for the helpdesk ticket routing system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// The persistence layer sits behind a Mutex; the lifecycle engine's
/// guarded updates make concurrent claims safe, the lock just
/// serializes connection use.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for tickets, staff, and notifications.
    persistence: Arc<Mutex<SqlitePersistence>>,
    /// Broadcaster for live ticket events.
    broadcaster: Arc<LiveEventBroadcaster>,
}

impl axum::extract::FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(state: &AppState) -> Self {
        state.broadcaster.clone()
    }
}

/// Caller identity attached to read requests as query parameters.
#[derive(Debug, Deserialize)]
struct ActorQuery {
    /// The caller's user identifier.
    actor_id: i64,
    /// The caller's role.
    actor_role: String,
}

/// API request for opening a ticket.
///
/// This includes caller identity in addition to the ticket data.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateTicketApiRequest {
    /// The caller's user identifier.
    actor_id: i64,
    /// The caller's role.
    actor_role: String,
    /// Short summary of the problem.
    title: String,
    /// Full problem description.
    description: String,
    /// Free-form category label.
    category: String,
    /// Requester-chosen urgency (low, medium, high).
    urgency: Option<String>,
    /// Optional room or location reference.
    room_id: Option<i64>,
    /// Optional equipment reference.
    equipment_id: Option<i64>,
}

/// API request for claiming a ticket.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AcceptTicketApiRequest {
    /// The caller's user identifier.
    actor_id: i64,
    /// The caller's role.
    actor_role: String,
}

/// API request for rejecting a ticket.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RejectTicketApiRequest {
    /// The caller's user identifier.
    actor_id: i64,
    /// The caller's role.
    actor_role: String,
    /// Why the ticket is being rejected.
    reason: String,
}

/// API request for closing a ticket.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CloseTicketApiRequest {
    /// The caller's user identifier.
    actor_id: i64,
    /// The caller's role.
    actor_role: String,
    /// What was done to resolve the ticket.
    resolution_note: String,
    /// Attachment URLs to record with the resolution.
    #[serde(default)]
    attachments: Vec<String>,
}

/// API request for rating a completed ticket.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RateTicketApiRequest {
    /// The caller's user identifier.
    actor_id: i64,
    /// The caller's role.
    actor_role: String,
    /// Satisfaction rating, 1 through 5.
    rating: i32,
}

/// API request for replacing a role's permission flags.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpdatePermissionsApiRequest {
    /// The caller's user identifier.
    actor_id: i64,
    /// The caller's role.
    actor_role: String,
    /// The new capability flags for the role.
    permissions: PermissionSet,
}

/// API request carrying only caller identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ActorApiRequest {
    /// The caller's user identifier.
    actor_id: i64,
    /// The caller's role.
    actor_role: String,
}

/// API request for setting a staff member's availability.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpdateAvailabilityApiRequest {
    /// The caller's user identifier.
    actor_id: i64,
    /// The caller's role.
    actor_role: String,
    /// The new availability state (available, busy, `on_leave`).
    availability: Availability,
}

/// Query parameters for listing tickets.
#[derive(Debug, Deserialize)]
struct ListTicketsQuery {
    /// The caller's user identifier.
    actor_id: i64,
    /// The caller's role.
    actor_role: String,
    /// Restrict to a single lifecycle status.
    status: Option<String>,
    /// Restrict to an exact category.
    category: Option<String>,
    /// Substring match over title and description.
    search: Option<String>,
    /// 1-based page number.
    page: Option<i64>,
    /// Page size.
    limit: Option<i64>,
}

/// Query parameters for listing staff.
#[derive(Debug, Deserialize)]
struct ListStaffQuery {
    /// The caller's user identifier.
    actor_id: i64,
    /// The caller's role.
    actor_role: String,
    /// Restrict to a single role.
    role: Option<String>,
}

/// Query parameters for the schedule endpoint.
#[derive(Debug, Deserialize)]
struct ScheduleQuery {
    /// The caller's user identifier.
    actor_id: i64,
    /// The caller's role.
    actor_role: String,
    /// Inclusive lower bound, ISO 8601.
    from: Option<String>,
    /// Exclusive upper bound, ISO 8601.
    to: Option<String>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl HttpError {
    fn bad_request(message: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Parses a role string into a `Role`.
fn parse_role(role_str: &str) -> Result<Role, HttpError> {
    Role::from_str(role_str).map_err(|_| {
        HttpError::bad_request(format!(
            "Invalid role: '{role_str}'. Must be 'admin', 'it_support', or 'user'"
        ))
    })
}

/// Builds the caller identity from its wire representation.
fn caller_from(actor_id: i64, actor_role: &str) -> Result<AuthenticatedCaller, HttpError> {
    let role: Role = parse_role(actor_role)?;
    Ok(AuthenticatedCaller::new(actor_id, role))
}

/// Pushes a live event mirroring a committed transition.
fn push_live_event(
    broadcaster: &LiveEventBroadcaster,
    kind: Option<NotificationKind>,
    ticket: &TicketInfo,
) {
    match kind {
        Some(NotificationKind::TicketCreated) => broadcaster.broadcast(&LiveEvent::TicketCreated {
            ticket_id: ticket.ticket_id,
        }),
        Some(NotificationKind::TicketUpdated) => broadcaster.broadcast(&LiveEvent::TicketUpdated {
            ticket_id: ticket.ticket_id,
            status: ticket.status.as_str().to_string(),
        }),
        None => {}
    }
}

/// Handler for POST `/tickets` endpoint.
///
/// Opens a new ticket with the caller as requester.
async fn handle_create_ticket(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateTicketApiRequest>,
) -> Result<Json<TicketInfo>, HttpError> {
    info!(actor_id = req.actor_id, title = %req.title, "Handling create_ticket request");

    let caller: AuthenticatedCaller = caller_from(req.actor_id, &req.actor_role)?;
    let urgency: Option<Urgency> = match req.urgency.as_deref() {
        Some(s) => Some(
            Urgency::from_str(s)
                .map_err(|e| HttpError::bad_request(e.to_string()))?,
        ),
        None => None,
    };
    let request: CreateTicketRequest = CreateTicketRequest {
        title: req.title,
        description: req.description,
        category: req.category,
        urgency,
        room_id: req.room_id,
        equipment_id: req.equipment_id,
    };
    let now: String = current_timestamp()?;

    let mut persistence = app_state.persistence.lock().await;
    let result = create_ticket(&mut persistence, &caller, request, &now)?;
    drop(persistence);

    push_live_event(&app_state.broadcaster, result.notification_kind, &result.response);
    Ok(Json(result.response))
}

/// Handler for GET `/tickets` endpoint.
async fn handle_list_tickets(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListTicketsQuery>,
) -> Result<Json<ListTicketsResponse>, HttpError> {
    let caller: AuthenticatedCaller = caller_from(query.actor_id, &query.actor_role)?;
    let status: Option<TicketStatus> = match query.status.as_deref() {
        Some(s) => Some(
            TicketStatus::from_str(s)
                .map_err(|e| HttpError::bad_request(e.to_string()))?,
        ),
        None => None,
    };
    let request: ListTicketsRequest = ListTicketsRequest {
        status,
        category: query.category,
        search: query.search,
        page: query.page,
        limit: query.limit,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: ListTicketsResponse = list_tickets(&mut persistence, &caller, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/tickets/{id}` endpoint.
async fn handle_get_ticket(
    AxumState(app_state): AxumState<AppState>,
    Path(ticket_id): Path<i64>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<TicketInfo>, HttpError> {
    let caller: AuthenticatedCaller = caller_from(query.actor_id, &query.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: TicketInfo = get_ticket(&mut persistence, &caller, ticket_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/tickets/{id}/accept` endpoint.
///
/// Claims the ticket for the calling staff member. A lost claim race
/// surfaces as 409.
async fn handle_accept_ticket(
    AxumState(app_state): AxumState<AppState>,
    Path(ticket_id): Path<i64>,
    Json(req): Json<AcceptTicketApiRequest>,
) -> Result<Json<TicketInfo>, HttpError> {
    info!(actor_id = req.actor_id, ticket_id, "Handling accept_ticket request");

    let caller: AuthenticatedCaller = caller_from(req.actor_id, &req.actor_role)?;
    let now: String = current_timestamp()?;

    let mut persistence = app_state.persistence.lock().await;
    let result = accept_ticket(&mut persistence, &caller, ticket_id, &now)?;
    drop(persistence);

    push_live_event(&app_state.broadcaster, result.notification_kind, &result.response);
    Ok(Json(result.response))
}

/// Handler for POST `/tickets/{id}/reject` endpoint.
async fn handle_reject_ticket(
    AxumState(app_state): AxumState<AppState>,
    Path(ticket_id): Path<i64>,
    Json(req): Json<RejectTicketApiRequest>,
) -> Result<Json<TicketInfo>, HttpError> {
    info!(actor_id = req.actor_id, ticket_id, "Handling reject_ticket request");

    let caller: AuthenticatedCaller = caller_from(req.actor_id, &req.actor_role)?;
    let now: String = current_timestamp()?;
    let request: RejectTicketRequest = RejectTicketRequest { reason: req.reason };

    let mut persistence = app_state.persistence.lock().await;
    let result = reject_ticket(&mut persistence, &caller, ticket_id, request, &now)?;
    drop(persistence);

    push_live_event(&app_state.broadcaster, result.notification_kind, &result.response);
    Ok(Json(result.response))
}

/// Handler for POST `/tickets/{id}/close` endpoint.
async fn handle_close_ticket(
    AxumState(app_state): AxumState<AppState>,
    Path(ticket_id): Path<i64>,
    Json(req): Json<CloseTicketApiRequest>,
) -> Result<Json<TicketInfo>, HttpError> {
    info!(actor_id = req.actor_id, ticket_id, "Handling close_ticket request");

    let caller: AuthenticatedCaller = caller_from(req.actor_id, &req.actor_role)?;
    let now: String = current_timestamp()?;
    let request: CloseTicketRequest = CloseTicketRequest {
        resolution_note: req.resolution_note,
        attachments: req.attachments,
    };

    let mut persistence = app_state.persistence.lock().await;
    let result = close_ticket(&mut persistence, &caller, ticket_id, request, &now)?;
    drop(persistence);

    push_live_event(&app_state.broadcaster, result.notification_kind, &result.response);
    Ok(Json(result.response))
}

/// Handler for POST `/tickets/{id}/rate` endpoint.
async fn handle_rate_ticket(
    AxumState(app_state): AxumState<AppState>,
    Path(ticket_id): Path<i64>,
    Json(req): Json<RateTicketApiRequest>,
) -> Result<Json<TicketInfo>, HttpError> {
    info!(actor_id = req.actor_id, ticket_id, "Handling rate_ticket request");

    let caller: AuthenticatedCaller = caller_from(req.actor_id, &req.actor_role)?;
    let now: String = current_timestamp()?;
    let request: RateTicketRequest = RateTicketRequest { rating: req.rating };

    let mut persistence = app_state.persistence.lock().await;
    let result = rate_ticket(&mut persistence, &caller, ticket_id, request, &now)?;
    drop(persistence);

    Ok(Json(result.response))
}

/// Handler for GET `/permissions/{role}` endpoint.
async fn handle_get_permissions(
    AxumState(app_state): AxumState<AppState>,
    Path(role): Path<String>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<RolePermissionsResponse>, HttpError> {
    let caller: AuthenticatedCaller = caller_from(query.actor_id, &query.actor_role)?;
    let target: Role = parse_role(&role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response = get_role_permissions(&mut persistence, &caller, target)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PUT `/permissions/{role}` endpoint.
async fn handle_update_permissions(
    AxumState(app_state): AxumState<AppState>,
    Path(role): Path<String>,
    Json(req): Json<UpdatePermissionsApiRequest>,
) -> Result<Json<RolePermissionsResponse>, HttpError> {
    info!(actor_id = req.actor_id, role = %role, "Handling update_permissions request");

    let caller: AuthenticatedCaller = caller_from(req.actor_id, &req.actor_role)?;
    let target: Role = parse_role(&role)?;
    let request: UpdatePermissionsRequest = UpdatePermissionsRequest {
        permissions: req.permissions,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response = update_role_permissions(&mut persistence, &caller, target, request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/permissions/{role}/reset` endpoint.
async fn handle_reset_permissions(
    AxumState(app_state): AxumState<AppState>,
    Path(role): Path<String>,
    Json(req): Json<ActorApiRequest>,
) -> Result<Json<RolePermissionsResponse>, HttpError> {
    info!(actor_id = req.actor_id, role = %role, "Handling reset_permissions request");

    let caller: AuthenticatedCaller = caller_from(req.actor_id, &req.actor_role)?;
    let target: Role = parse_role(&role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response = reset_role_permissions(&mut persistence, &caller, target)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/notifications` endpoint.
async fn handle_list_notifications(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<Vec<NotificationInfo>>, HttpError> {
    let caller: AuthenticatedCaller = caller_from(query.actor_id, &query.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response = list_notifications(&mut persistence, &caller)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/notifications/{id}/read` endpoint.
async fn handle_mark_notification_read(
    AxumState(app_state): AxumState<AppState>,
    Path(notification_id): Path<i64>,
    Json(req): Json<ActorApiRequest>,
) -> Result<StatusCode, HttpError> {
    let caller: AuthenticatedCaller = caller_from(req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    mark_notification_read(&mut persistence, &caller, notification_id)?;
    drop(persistence);

    Ok(StatusCode::NO_CONTENT)
}

/// Handler for DELETE `/notifications/{id}` endpoint.
async fn handle_delete_notification(
    AxumState(app_state): AxumState<AppState>,
    Path(notification_id): Path<i64>,
    Query(query): Query<ActorQuery>,
) -> Result<StatusCode, HttpError> {
    let caller: AuthenticatedCaller = caller_from(query.actor_id, &query.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    delete_notification(&mut persistence, &caller, notification_id)?;
    drop(persistence);

    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET `/staff` endpoint.
async fn handle_list_staff(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListStaffQuery>,
) -> Result<Json<Vec<StaffInfo>>, HttpError> {
    let caller: AuthenticatedCaller = caller_from(query.actor_id, &query.actor_role)?;
    let role: Option<Role> = match query.role.as_deref() {
        Some(s) => Some(parse_role(s)?),
        None => None,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response = list_staff(&mut persistence, &caller, role)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PUT `/staff/{id}/availability` endpoint.
async fn handle_set_availability(
    AxumState(app_state): AxumState<AppState>,
    Path(staff_id): Path<i64>,
    Json(req): Json<UpdateAvailabilityApiRequest>,
) -> Result<Json<StaffInfo>, HttpError> {
    info!(
        actor_id = req.actor_id,
        staff_id,
        availability = req.availability.as_str(),
        "Handling set_availability request"
    );

    let caller: AuthenticatedCaller = caller_from(req.actor_id, &req.actor_role)?;
    let request: UpdateAvailabilityRequest = UpdateAvailabilityRequest {
        availability: req.availability,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response = set_staff_availability(&mut persistence, &caller, staff_id, request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/schedule/{staff_id}` endpoint.
async fn handle_get_schedule(
    AxumState(app_state): AxumState<AppState>,
    Path(staff_id): Path<i64>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<ScheduleResponse>, HttpError> {
    let caller: AuthenticatedCaller = caller_from(query.actor_id, &query.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response = get_schedule(
        &mut persistence,
        &NoExternalCalendar,
        &caller,
        staff_id,
        query.from.as_deref(),
        query.to.as_deref(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/tickets", post(handle_create_ticket))
        .route("/tickets", get(handle_list_tickets))
        .route("/tickets/{id}", get(handle_get_ticket))
        .route("/tickets/{id}/accept", post(handle_accept_ticket))
        .route("/tickets/{id}/reject", post(handle_reject_ticket))
        .route("/tickets/{id}/close", post(handle_close_ticket))
        .route("/tickets/{id}/rate", post(handle_rate_ticket))
        .route("/permissions/{role}", get(handle_get_permissions))
        .route("/permissions/{role}", put(handle_update_permissions))
        .route("/permissions/{role}/reset", post(handle_reset_permissions))
        .route("/notifications", get(handle_list_notifications))
        .route(
            "/notifications/{id}/read",
            post(handle_mark_notification_read),
        )
        .route("/notifications/{id}", delete(handle_delete_notification))
        .route("/staff", get(handle_list_staff))
        .route("/staff/{id}/availability", put(handle_set_availability))
        .route("/schedule/{staff_id}", get(handle_get_schedule))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Helpdesk Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        broadcaster: Arc::new(LiveEventBroadcaster::new()),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
