//! Route table and OpenAPI document.

use axum::Router;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{calculation, combustion, fuel, user},
    state::AppState,
};

/// Adds the bearer token scheme referenced by protected routes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Fuel combustion calculation API",
        description = "Fuel catalog, combustion requests and asynchronous energy calculation."
    ),
    tags(
        (name = "user", description = "Registration, login and profile"),
        (name = "fuel", description = "Fuel catalog"),
        (name = "combustion", description = "Combustion request lifecycle"),
        (name = "calculation", description = "Asynchronous energy calculation")
    )
)]
pub struct ApiDoc;

fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(user::register))
        .routes(routes!(user::login))
        .routes(routes!(user::logout))
        .routes(routes!(user::get_me, user::update_me))
        .routes(routes!(fuel::list_fuels, fuel::create_fuel))
        .routes(routes!(fuel::get_fuel, fuel::update_fuel, fuel::delete_fuel))
        .routes(routes!(fuel::upload_fuel_image))
        .routes(routes!(fuel::add_fuel_to_draft))
        .routes(routes!(combustion::get_cart))
        .routes(routes!(combustion::list_combustions))
        .routes(routes!(
            combustion::get_combustion,
            combustion::update_molar_volume,
            combustion::delete_combustion
        ))
        .routes(routes!(combustion::submit_combustion))
        .routes(routes!(combustion::moderate_combustion))
        .routes(routes!(combustion::update_fuel_volume, combustion::remove_fuel))
        .routes(routes!(calculation::start_calculation))
        .routes(routes!(calculation::get_progress))
        .routes(routes!(calculation::update_result))
}

/// Builds the application router.
///
/// Stored images are served from `image_dir` under `image_path` when the image base URL is
/// a local path; otherwise another server is expected to serve them.
pub fn router(image_path: &str, image_dir: &str) -> Router<AppState> {
    let (router, api) = api_routes().split_for_parts();

    let mut router = router.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api));

    if image_path.starts_with('/') {
        router = router.nest_service(image_path.trim_end_matches('/'), ServeDir::new(image_dir));
    }

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
