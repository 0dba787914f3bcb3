use utoipa::OpenApi;

use super::api::catalog::SetActiveRequest;
use super::api::error::ErrorResponse;
use super::api::next_pass::{NextPassQuery, NextPassResponse, ObjectPassResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::next_pass::next_pass,
        super::api::next_pass::next_pass_for,
        super::api::catalog::list_catalog,
        super::api::catalog::set_active,
    ),
    components(
        schemas(
            NextPassQuery,
            NextPassResponse,
            ObjectPassResponse,
            SetActiveRequest,
            ErrorResponse,
            crate::catalog::CatalogEntry,
            crate::scheduler::PassCandidate,
            crate::scheduler::ScheduledPass,
        )
    ),
    info(
        title = "nextpass API",
        description = "Next satellite pass over a ground station",
        version = "0.1.0"
    ),
    tags(
        (name = "passes", description = "Pass scheduling"),
        (name = "catalog", description = "Tracked object catalog")
    )
)]
pub struct ApiDoc;
