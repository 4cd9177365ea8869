use actix_web::web;

pub mod health;
pub mod metrics;
pub mod swagger;
pub mod users;

/// Registers every route; shared by the server and the handler tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Health check
        .route("/health", web::get().to(health::health_check))
        // Metrics
        .route("/metrics", web::get().to(metrics::get_metrics))
        // Users
        .route("/add-user", web::post().to(users::add_user))
        .route("/users", web::get().to(users::list_users))
        .route("/search-users", web::get().to(users::search_users))
        .route("/delete-user/{id}", web::delete().to(users::delete_user))
        .route("/update-user/{id}", web::patch().to(users::update_user));
}
