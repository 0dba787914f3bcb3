use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::catalog::CatalogEntry;
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetActiveRequest {
    pub active: bool,
}

#[utoipa::path(
    get,
    path = "/api/catalog",
    tag = "catalog",
    responses(
        (status = 200, description = "Loaded objects and their active flag", body = Vec<CatalogEntry>)
    )
)]
pub async fn list_catalog(State(state): State<AppState>) -> Json<Vec<CatalogEntry>> {
    Json(state.catalog.read().await.entries())
}

#[utoipa::path(
    put,
    path = "/api/catalog/{name}/active",
    tag = "catalog",
    params(
        ("name" = String, Path, description = "Tracked object name")
    ),
    request_body = SetActiveRequest,
    responses(
        (status = 200, description = "Updated entry", body = CatalogEntry),
        (status = 404, description = "Unknown object", body = ErrorResponse)
    )
)]
pub async fn set_active(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<SetActiveRequest>,
) -> ApiResult<Json<CatalogEntry>> {
    state
        .catalog
        .write()
        .await
        .set_active(&name, request.active)?;

    log::info!(
        "{} {}",
        name,
        if request.active { "activated" } else { "deactivated" }
    );

    Ok(Json(CatalogEntry {
        name,
        active: request.active,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::api::error::ApiError;
    use crate::web::state::test_state;

    #[tokio::test]
    async fn lists_loaded_objects() {
        let Json(entries) = list_catalog(State(test_state())).await;
        assert_eq!(
            entries,
            vec![CatalogEntry {
                name: "ISS (ZARYA)".to_string(),
                active: true,
            }]
        );
    }

    #[tokio::test]
    async fn toggles_active_flag() {
        let state = test_state();
        let Json(entry) = set_active(
            State(state.clone()),
            Path("ISS (ZARYA)".to_string()),
            Json(SetActiveRequest { active: false }),
        )
        .await
        .unwrap();

        assert!(!entry.active);
        assert!(!state.catalog.read().await.has_active());
    }

    #[tokio::test]
    async fn unknown_object_is_not_found() {
        let result = set_active(
            State(test_state()),
            Path("HUBBLE".to_string()),
            Json(SetActiveRequest { active: true }),
        )
        .await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }
}
