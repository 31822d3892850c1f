use axum::{
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;
use serde::Deserialize;
use service::pagination::Pagination;
use utoipa::IntoParams;

use crate::openapi::ApiDoc;

pub mod auth;
pub mod catalog;
pub mod companies;
pub mod content;
pub mod inbox;
pub mod products;
pub mod users;

use auth::ServerState;

/// `?page=&per_page=` on paginated listings.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page
    pub page: Option<u32>,
    /// items per page, at most 100
    pub per_page: Option<u32>,
}

impl PageQuery {
    pub fn pagination(&self) -> Pagination {
        paginate(self.page, self.per_page)
    }
}

pub(crate) fn paginate(page: Option<u32>, per_page: Option<u32>) -> Pagination {
    let d = Pagination::default();
    Pagination { page: page.unwrap_or(d.page), per_page: per_page.unwrap_or(d.per_page) }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

fn public_routes() -> Router<ServerState> {
    Router::new()
        .route("/health", get(health))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/api/categories", get(catalog::list_categories))
        .route("/api/categories/:id", get(catalog::get_category))
        .route("/api/icons", get(catalog::list_icons))
        .route("/api/social-networks", get(catalog::list_social_networks))
        .route("/api/companies", get(companies::public_list))
        .route("/api/companies/:id", get(companies::public_get))
        .route("/api/products", get(products::public_list))
        .route("/api/products/:id", get(products::public_get))
        .route("/api/services", get(content::public_offerings))
        .route("/api/testimonials", get(content::public_testimonials).post(content::submit_testimonial))
        .route("/api/team", get(content::list_team))
        .route("/api/news", get(content::list_news))
        .route("/api/news/:id", get(content::get_news))
        .route("/api/contact-messages", post(inbox::submit_contact))
        .route("/api/socios", post(inbox::submit_partner))
        .route("/api/job-applications", post(inbox::submit_job_application))
}

fn admin_routes() -> Router<ServerState> {
    Router::new()
        .route("/auth/me", get(auth::me))
        // scoped per company
        .route("/admin/companies", get(companies::list).post(companies::create))
        .route("/admin/companies/:id", get(companies::get).put(companies::update).delete(companies::delete))
        .route("/admin/companies/:id/social-links", post(companies::add_social_link))
        .route("/admin/social-links/:id", delete(companies::remove_social_link))
        .route("/admin/products", get(products::list).post(products::create))
        .route("/admin/products/company-choices", get(products::company_choices))
        .route("/admin/products/:id", get(products::get).put(products::update).delete(products::delete))
        .route("/admin/products/:id/features", get(products::list_features).post(products::add_feature))
        .route("/admin/features/:id", delete(products::remove_feature))
        // superuser only
        .route("/admin/users", get(users::list_users).post(users::create_user))
        .route("/admin/users/:id", delete(users::delete_user))
        .route("/admin/users/:id/password", put(users::set_password))
        .route("/admin/users/:id/active", put(users::set_active))
        .route("/admin/company-users", get(users::list_bindings).post(users::bind))
        .route("/admin/company-users/:id", delete(users::unbind))
        .route("/admin/categories", post(catalog::create_category))
        .route("/admin/categories/:id", put(catalog::update_category).delete(catalog::delete_category))
        .route("/admin/icons", post(catalog::create_icon))
        .route("/admin/icons/:id", put(catalog::update_icon).delete(catalog::delete_icon))
        .route("/admin/social-networks", post(catalog::create_social_network))
        .route("/admin/social-networks/:id", put(catalog::update_social_network).delete(catalog::delete_social_network))
        .route("/admin/services", get(content::list_offerings).post(content::create_offering))
        .route("/admin/services/:id", put(content::update_offering).delete(content::delete_offering))
        .route("/admin/testimonials", get(content::list_testimonials))
        .route("/admin/testimonials/:id", delete(content::delete_testimonial))
        .route("/admin/testimonials/:id/approval", put(content::set_testimonial_approval))
        .route("/admin/team", post(content::create_team_member))
        .route(
            "/admin/team/:id",
            get(content::get_team_member).put(content::update_team_member).delete(content::delete_team_member),
        )
        .route("/admin/news", post(content::create_news))
        .route("/admin/news/:id", put(content::update_news).delete(content::delete_news))
        .route("/admin/contact-messages", get(inbox::list_contacts))
        .route("/admin/contact-messages/:id", delete(inbox::delete_contact))
        .route("/admin/contact-messages/:id/read", put(inbox::set_contact_read))
        .route("/admin/socios", get(inbox::list_partners))
        .route(
            "/admin/socios/:id",
            get(inbox::get_partner).put(inbox::review_partner).delete(inbox::delete_partner),
        )
        .route("/admin/job-applications", get(inbox::list_job_applications))
        .route(
            "/admin/job-applications/:id",
            get(inbox::get_job_application).delete(inbox::delete_job_application),
        )
        .route_layer(middleware::from_fn(auth::require_authenticated))
}

/// Build the full application router: public reads and submissions, the
/// authenticated admin surface, and the OpenAPI document.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    public_routes()
        .merge(admin_routes())
        .layer(middleware::from_fn_with_state(state.clone(), auth::resolve_principal))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
