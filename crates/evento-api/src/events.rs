// Event CRUD HTTP routes
// Decision: Paths and verbs match the existing client contract (camelCase, POST for id lookups)
// Decision: Bodies are taken as loose payloads and validated into commands, so every bad request gets the same `{error}` shape

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use chrono_tz::Tz;
use evento_core::{
    CreateEventPayload, Event, EventId, EventIdPayload, EventInput, EventStore, ListedEvent,
    UpdateEvent, UpdateEventPayload,
};
use std::sync::Arc;

use crate::error::{ApiError, ErrorResponse, MessageResponse};
use crate::services::EventService;

/// App state for event routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EventService>,
}

impl AppState {
    pub fn new(store: Arc<dyn EventStore>, display_timezone: Tz) -> Self {
        Self {
            service: Arc::new(EventService::new(store, display_timezone)),
        }
    }
}

/// Create event routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/createEvent", post(create_event))
        .route("/listEvents", get(list_events))
        .route("/getData", post(get_data))
        .route("/removeAllEvents", delete(remove_all_events))
        .route("/removeEvent/{id}", delete(remove_event))
        .route("/updateEvent", post(update_event))
        .with_state(state)
}

/// POST /createEvent - Create a new event
#[utoipa::path(
    post,
    path = "/createEvent",
    request_body = CreateEventPayload,
    responses(
        (status = 201, description = "Event created successfully", body = MessageResponse),
        (status = 400, description = "Missing or malformed fields", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<CreateEventPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    const CONTEXT: &str = "Failed to create event";

    let Json(payload) = payload?;
    let input = EventInput::try_from(payload).map_err(ApiError::context(CONTEXT))?;

    let event = state
        .service
        .create(input)
        .await
        .map_err(ApiError::context(CONTEXT))?;

    tracing::info!(event_id = event.id, title = %event.event_title, "Event created");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Event created successfully").with_id(event.id)),
    ))
}

/// GET /listEvents - List all events with zone-converted start/end
#[utoipa::path(
    get,
    path = "/listEvents",
    responses(
        (status = 200, description = "List of events", body = Vec<ListedEvent>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<ListedEvent>>, ApiError> {
    let events = state
        .service
        .list()
        .await
        .map_err(ApiError::context("Failed to list events"))?;

    tracing::info!(
        count = events.len(),
        timezone = %state.service.display_timezone(),
        "Events listed"
    );
    Ok(Json(events))
}

/// POST /getData - Get event by ID
#[utoipa::path(
    post,
    path = "/getData",
    request_body = EventIdPayload,
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn get_data(
    State(state): State<AppState>,
    payload: Result<Json<EventIdPayload>, JsonRejection>,
) -> Result<Json<Event>, ApiError> {
    const CONTEXT: &str = "Failed to get event";

    let Json(payload) = payload?;
    let id = EventId::try_from(payload).map_err(ApiError::context(CONTEXT))?;

    let event = state
        .service
        .get(id)
        .await
        .map_err(ApiError::context(CONTEXT))?;

    tracing::info!(event_id = event.id, "Event fetched");
    Ok(Json(event))
}

/// DELETE /removeAllEvents - Delete every event
#[utoipa::path(
    delete,
    path = "/removeAllEvents",
    responses(
        (status = 200, description = "All events deleted", body = MessageResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn remove_all_events(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let removed = state
        .service
        .delete_all()
        .await
        .map_err(ApiError::context("Failed to delete all events"))?;

    tracing::info!(removed, "All events deleted");
    Ok(Json(MessageResponse::new(
        "All events were deleted successfully",
    )))
}

/// DELETE /removeEvent/{id} - Delete one event
#[utoipa::path(
    delete,
    path = "/removeEvent/{id}",
    params(
        ("id" = String, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event deleted", body = MessageResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn remove_event(
    State(state): State<AppState>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    const CONTEXT: &str = "Failed to delete event";

    let Path(raw_id) = raw_id?;
    let id: EventId = raw_id.parse().map_err(ApiError::context(CONTEXT))?;

    state
        .service
        .delete(id)
        .await
        .map_err(ApiError::context(CONTEXT))?;

    tracing::info!(event_id = id.get(), "Event deleted");
    Ok(Json(MessageResponse::new("Event was deleted successfully")))
}

/// POST /updateEvent - Overwrite an event
#[utoipa::path(
    post,
    path = "/updateEvent",
    request_body = UpdateEventPayload,
    responses(
        (status = 200, description = "Event updated", body = MessageResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn update_event(
    State(state): State<AppState>,
    payload: Result<Json<UpdateEventPayload>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    const CONTEXT: &str = "Failed to update event";

    let Json(payload) = payload?;
    let cmd = UpdateEvent::try_from(payload).map_err(ApiError::context(CONTEXT))?;
    let id = cmd.id;

    let matched = state
        .service
        .update(cmd)
        .await
        .map_err(ApiError::context(CONTEXT))?;

    tracing::info!(event_id = id.get(), matched, "Event updated");
    Ok(Json(MessageResponse::new("Event updated successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use evento_core::InMemoryEventStore;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app_with(store: InMemoryEventStore) -> Router {
        routes(AppState::new(Arc::new(store), Tz::America__Sao_Paulo))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn standup() -> Value {
        json!({
            "startTime": "2024-01-10T09:00:00Z",
            "endTime": "2024-01-10T10:00:00Z",
            "eventTitle": "Standup"
        })
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let app = app_with(InMemoryEventStore::new());

        let (status, body) = send(&app, "POST", "/createEvent", Some(standup())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Event created successfully");
        assert_eq!(body["id"], 1);

        let (status, body) = send(&app, "GET", "/listEvents", None).await;
        assert_eq!(status, StatusCode::OK);
        let events = body.as_array().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["eventTitle"], "Standup");
        assert_eq!(events[0]["startTime"], "2024-01-10 09:00:00");
    }

    #[tokio::test]
    async fn test_list_adds_zone_converted_fields() {
        let app = app_with(InMemoryEventStore::new());
        send(
            &app,
            "POST",
            "/createEvent",
            Some(json!({
                "startTime": "2024-01-10T12:00:00Z",
                "endTime": "2024-01-10T13:30:00Z",
                "eventTitle": "Lunch"
            })),
        )
        .await;

        let (_, body) = send(&app, "GET", "/listEvents", None).await;
        assert_eq!(body[0]["start"], "2024-01-10T09:00:00-03:00");
        assert_eq!(body[0]["end"], "2024-01-10T10:30:00-03:00");
        // stored values are untouched
        assert_eq!(body[0]["startTime"], "2024-01-10 12:00:00");
        assert_eq!(body[0]["endTime"], "2024-01-10 13:30:00");
    }

    #[tokio::test]
    async fn test_list_empty() {
        let app = app_with(InMemoryEventStore::new());
        let (status, body) = send(&app, "GET", "/listEvents", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_create_missing_field_is_400() {
        let app = app_with(InMemoryEventStore::new());
        let (status, body) = send(
            &app,
            "POST",
            "/createEvent",
            Some(json!({"startTime": "2024-01-10T09:00:00Z", "eventTitle": "x"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required field: endTime");
    }

    #[tokio::test]
    async fn test_malformed_body_is_400_json() {
        let app = app_with(InMemoryEventStore::new());

        let request = Request::builder()
            .method("POST")
            .uri("/createEvent")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));

        let (status, _) = send(&app, "POST", "/getData", Some(json!("not an object"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_data_by_id() {
        let app = app_with(InMemoryEventStore::new());
        send(&app, "POST", "/createEvent", Some(standup())).await;

        let (status, body) = send(&app, "POST", "/getData", Some(json!({"id": "abc"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid id");

        let (status, _) = send(&app, "POST", "/getData", Some(json!({"id": 999}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, "POST", "/getData", Some(json!({"id": "1"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "id": 1,
                "startTime": "2024-01-10 09:00:00",
                "endTime": "2024-01-10 10:00:00",
                "eventTitle": "Standup"
            })
        );
    }

    #[tokio::test]
    async fn test_remove_event() {
        let store = InMemoryEventStore::new();
        let app = app_with(store.clone());
        send(&app, "POST", "/createEvent", Some(standup())).await;
        send(&app, "POST", "/createEvent", Some(standup())).await;

        let (status, body) = send(&app, "DELETE", "/removeEvent/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Event was deleted successfully");
        assert_eq!(store.len().await, 1);

        let (status, _) = send(&app, "DELETE", "/removeEvent/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, "DELETE", "/removeEvent/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid id");
    }

    #[tokio::test]
    async fn test_remove_event_undecodable_segment_is_json_400() {
        let app = app_with(InMemoryEventStore::new());

        let (status, body) = send(&app, "DELETE", "/removeEvent/%FF", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid path parameter"));
    }

    #[tokio::test]
    async fn test_remove_all_events() {
        let store = InMemoryEventStore::new();
        let app = app_with(store.clone());
        for _ in 0..3 {
            send(&app, "POST", "/createEvent", Some(standup())).await;
        }

        let (status, _) = send(&app, "DELETE", "/removeAllEvents", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(store.is_empty().await);

        // already empty
        let (status, body) = send(&app, "DELETE", "/removeAllEvents", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "All events were deleted successfully");
    }

    #[tokio::test]
    async fn test_update_missing_title_does_not_mutate() {
        let app = app_with(InMemoryEventStore::new());
        send(&app, "POST", "/createEvent", Some(standup())).await;

        let (status, _) = send(
            &app,
            "POST",
            "/updateEvent",
            Some(json!({
                "id": 1,
                "startTime": "2024-02-01T08:00:00Z",
                "endTime": "2024-02-01T09:00:00Z"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = send(&app, "POST", "/getData", Some(json!({"id": 1}))).await;
        assert_eq!(body["eventTitle"], "Standup");
        assert_eq!(body["startTime"], "2024-01-10 09:00:00");
    }

    #[tokio::test]
    async fn test_update_overwrites_in_canonical_form() {
        let app = app_with(InMemoryEventStore::new());
        send(&app, "POST", "/createEvent", Some(standup())).await;

        let (status, body) = send(
            &app,
            "POST",
            "/updateEvent",
            Some(json!({
                "id": "1",
                "startTime": "2024-02-01T08:15:30.999-03:00",
                "endTime": "2024-02-01T12:00:00Z",
                "eventTitle": "Planning"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Event updated successfully");

        let (_, body) = send(&app, "POST", "/getData", Some(json!({"id": 1}))).await;
        assert_eq!(
            body,
            json!({
                "id": 1,
                "startTime": "2024-02-01 11:15:30",
                "endTime": "2024-02-01 12:00:00",
                "eventTitle": "Planning"
            })
        );
    }

    #[tokio::test]
    async fn test_update_accepts_epoch_millis() {
        let app = app_with(InMemoryEventStore::new());
        send(&app, "POST", "/createEvent", Some(standup())).await;

        let (status, _) = send(
            &app,
            "POST",
            "/updateEvent",
            Some(json!({
                "id": 1.0,
                "startTime": 1706775300000i64,
                "endTime": 1706788800000i64,
                "eventTitle": "Planning"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&app, "POST", "/getData", Some(json!({"id": 1}))).await;
        assert_eq!(body["startTime"], "2024-02-01 08:15:00");
        assert_eq!(body["endTime"], "2024-02-01 12:00:00");
    }

    #[tokio::test]
    async fn test_update_invalid_id_is_400() {
        let app = app_with(InMemoryEventStore::new());
        let mut body = standup();
        body["id"] = json!("first");

        let (status, _) = send(&app, "POST", "/updateEvent", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_end_to_end_scenario() {
        let app = app_with(InMemoryEventStore::new());

        let (status, _) = send(&app, "POST", "/createEvent", Some(standup())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, "POST", "/getData", Some(json!({"id": 1}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["eventTitle"], "Standup");

        let (status, _) = send(&app, "DELETE", "/removeEvent/1", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, "POST", "/getData", Some(json!({"id": 1}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], crate::error::NOT_FOUND_MESSAGE);
    }
}
