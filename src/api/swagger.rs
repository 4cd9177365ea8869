use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Search Service API",
        version = "1.0.0",
        description = "CRUD and name search over user records stored in MongoDB.\n\n**Features:**\n- Add, list, update and delete users\n- Case-insensitive name search (query is matched literally)\n- Health monitoring and metrics"
    ),
    paths(
        // Users
        crate::api::users::add_user,
        crate::api::users::list_users,
        crate::api::users::search_users,
        crate::api::users::delete_user,
        crate::api::users::update_user,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            // Users
            crate::models::AddUserRequest,
            crate::models::UpdateUserRequest,
            crate::models::UserResponse,
            crate::models::MessageResponse,

            // Health & Metrics
            crate::api::health::HealthResponse,
            crate::api::metrics::MetricsResponse,
        )
    ),
    tags(
        (name = "Users", description = "User records: create, list, search, update and delete."),
        (name = "Health", description = "Health check and request metrics for monitoring service status."),
    )
)]
pub struct ApiDoc;
