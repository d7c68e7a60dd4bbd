/// OpenAPI documentation for ProConnect Feed Service
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ProConnect Feed Service API",
        version = "1.0.0",
        description = "Post feed ranked per viewer by content similarity, engagement and recency.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8085", description = "Development server"),
    ),
    paths(crate::handlers::feed::get_feed),
    tags(
        (name = "feed", description = "Ranked post feed"),
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

impl ApiDoc {
    pub fn openapi_json_path() -> &'static str {
        "/api/v1/openapi.json"
    }
}
