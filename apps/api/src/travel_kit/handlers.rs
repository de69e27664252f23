//! Axum route handlers for the travel kit.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::state::AppState;
use crate::travel_kit::advisories::{advisories_for, Advisory};
use crate::travel_kit::packing::{NewPackingItem, PackingItem};

#[derive(Debug, Serialize)]
pub struct PackingResponse {
    pub categories: Vec<String>,
    pub items: Vec<PackingItem>,
}

#[derive(Debug, Deserialize)]
pub struct AdvisoryQuery {
    pub country: Option<String>,
}

/// GET /api/v1/travel-kit/packing
pub async fn handle_list_packing(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Json<PackingResponse> {
    let response = state
        .packing
        .with_list(&identity.uid, |list| PackingResponse {
            categories: list.categories(),
            items: list.items().to_vec(),
        })
        .await;
    Json(response)
}

/// POST /api/v1/travel-kit/packing
pub async fn handle_add_packing_item(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(req): Json<NewPackingItem>,
) -> Result<(StatusCode, Json<PackingItem>), AppError> {
    let item = state
        .packing
        .with_list(&identity.uid, |list| list.add(&req.name))
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PATCH /api/v1/travel-kit/packing/:item_id
pub async fn handle_toggle_packing_item(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(item_id): Path<u64>,
) -> Result<Json<PackingItem>, AppError> {
    state
        .packing
        .with_list(&identity.uid, |list| list.toggle(item_id))
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Packing item {item_id} not found")))
}

/// DELETE /api/v1/travel-kit/packing/:item_id
pub async fn handle_delete_packing_item(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(item_id): Path<u64>,
) -> Result<StatusCode, AppError> {
    let removed = state
        .packing
        .with_list(&identity.uid, |list| list.remove(item_id))
        .await;
    if !removed {
        return Err(AppError::NotFound(format!("Packing item {item_id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/travel-kit/advisories
pub async fn handle_advisories(Query(query): Query<AdvisoryQuery>) -> Json<Vec<Advisory>> {
    Json(advisories_for(query.country.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::build_router;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, "Bearer user:mina");
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_packing_round_trip() {
        let app = build_router(AppState::for_testing("http://127.0.0.1:9"));

        let (status, body) = call(&app, Method::GET, "/api/v1/travel-kit/packing", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["categories"][0], "필수");

        let (status, item) = call(
            &app,
            Method::POST,
            "/api/v1/travel-kit/packing",
            Some(json!({ "name": "카메라" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(item["category"], "기타");
        let uri = format!("/api/v1/travel-kit/packing/{}", item["id"]);

        let (status, toggled) = call(&app, Method::PATCH, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(toggled["checked"], true);

        let (status, _) = call(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = call(&app, Method::PATCH, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_packing_requires_sign_in() {
        let app = build_router(AppState::for_testing("http://127.0.0.1:9"));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/travel-kit/packing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_advisories_are_public() {
        let app = build_router(AppState::for_testing("http://127.0.0.1:9"));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/travel-kit/advisories")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body[0]["country"], "일본");
        assert_eq!(body[0]["notes"][4]["linkText"], "Visit Japan Web");
    }
}
