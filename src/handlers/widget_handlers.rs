use crate::services::widget_service::{Widget, WidgetService};
use apikit::{write_json, HttpError};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

pub struct AppState {
    pub widget_service: WidgetService,
}

#[derive(Deserialize)]
struct NewWidget {
    name: String,
    owner: Option<String>,
}

pub fn init_widget_handlers(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(get_widgets).post(create_widget))
        .route("/{widget_id}", get(get_widget))
        .route("/{widget_id}/owner", get(get_widget_owner))
        .with_state(app_state)
}

async fn get_widgets(State(state): State<Arc<AppState>>) -> Response {
    write_json(StatusCode::OK, &state.widget_service.get_widgets().await)
}

async fn get_widget(
    Path(widget_id): Path<u32>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, HttpError> {
    let widget = find_widget(widget_id, &state).await?;
    Ok(write_json(StatusCode::OK, &widget))
}

async fn create_widget(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewWidget>, JsonRejection>,
) -> Result<Response, HttpError> {
    let Json(new_widget) = payload.map_err(|rejection| {
        HttpError::wrap(StatusCode::BAD_REQUEST, "Invalid widget payload", rejection)
    })?;

    if new_widget.name.trim().is_empty() {
        return Err(HttpError::validation_failed("Widget name must not be empty."));
    }

    let widget = state
        .widget_service
        .add_widget(new_widget.name.trim(), new_widget.owner.as_deref())
        .await;

    Ok(write_json(StatusCode::CREATED, &widget))
}

async fn get_widget_owner(
    Path(widget_id): Path<u32>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, HttpError> {
    let widget = find_widget(widget_id, &state).await?;

    let owner = state
        .widget_service
        .lookup_owner(&widget)
        .await
        .map_err(|e| HttpError::wrap(StatusCode::BAD_GATEWAY, "Owner directory unavailable.", e))?;

    Ok(write_json(StatusCode::OK, &json!({ "owner": owner })))
}

async fn find_widget(widget_id: u32, state: &AppState) -> Result<Widget, HttpError> {
    state
        .widget_service
        .get_widget(widget_id)
        .await
        .ok_or_else(|| HttpError::not_found(format!("Unable to find widget with id {}.", widget_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn app() -> Router {
        init_widget_handlers(Arc::new(AppState {
            widget_service: WidgetService::seeded().await,
        }))
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().await.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn should_list_seeded_widgets() {
        let (status, body) = send(get_request("/")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn should_return_widget() {
        let (status, body) = send(get_request("/1")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": 1, "name": "sprocket", "owner": "ops"}));
    }

    #[tokio::test]
    async fn should_return_not_found_body() {
        let (status, body) = send(get_request("/42")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({"code": 404, "message": "Unable to find widget with id 42."})
        );
    }

    #[tokio::test]
    async fn should_create_widget() {
        let (status, body) = send(post_request(r#"{"name": " gear "}"#)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({"id": 3, "name": "gear", "owner": null}));
    }

    #[tokio::test]
    async fn should_reject_empty_name() {
        let (status, body) = send(post_request(r#"{"name": "  "}"#)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], 422);
    }

    #[tokio::test]
    async fn should_reject_malformed_payload_without_details() {
        let (status, body) = send(post_request("{not json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"code": 400, "message": "Invalid widget payload"}));
    }

    #[tokio::test]
    async fn should_hide_owner_lookup_cause() {
        let (status, body) = send(get_request("/2/owner")).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            body,
            json!({"code": 502, "message": "Owner directory unavailable."})
        );
    }

    #[tokio::test]
    async fn should_return_owner() {
        let (status, body) = send(get_request("/1/owner")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"owner": "ops"}));
    }
}
