//! OpenAPI documents, one per published API version.
//!
//! Both documents share metadata and the `basicAuth` security scheme; debug
//! builds serve them through Swagger UI and `openapi-dump` prints them.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, User};

/// Name of the security scheme registered on every document.
pub const BASIC_AUTH_SCHEME: &str = "basicAuth";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            BASIC_AUTH_SCHEME,
            SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
        );
    }
}

/// Version 1.0: full user resource.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Migo API",
        version = "1.0",
        description = "Track the series and anime you are watching.",
        contact(
            name = "Isaac I.R.",
            email = "isaac.ir@hotmail.com",
            url = "https://github.com/Texmo100"
        ),
        license(name = "MIT", url = "https://opensource.org/license/MIT")
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("basicAuth" = [])),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(User, Error, ErrorCode)),
    tags(
        (name = "users", description = "Manage users"),
        (name = "health", description = "Liveness and readiness checks")
    )
)]
pub struct ApiDocV1;

/// Version 2.0: user listing only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Migo API",
        version = "2.0",
        description = "Track the series and anime you are watching.",
        contact(
            name = "Isaac I.R.",
            email = "isaac.ir@hotmail.com",
            url = "https://github.com/Texmo100"
        ),
        license(name = "MIT", url = "https://opensource.org/license/MIT")
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("basicAuth" = [])),
    paths(
        crate::inbound::http::users::list_users_v2,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(User, Error, ErrorCode)),
    tags(
        (name = "users", description = "Manage users"),
        (name = "health", description = "Liveness and readiness checks")
    )
)]
pub struct ApiDocV2;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn object_fields(doc: &utoipa::openapi::OpenApi, name: &str) -> Vec<String> {
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(name).expect("schema registered") {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected object schema for {name}"),
        }
    }

    #[rstest]
    fn user_schema_uses_camel_case_fields() {
        let fields = object_fields(&ApiDocV1::openapi(), "User");
        for field in ["id", "userName", "password", "firstName", "lastName", "age"] {
            assert!(fields.iter().any(|f| f == field), "missing {field}");
        }
    }

    #[rstest]
    fn error_schema_exposes_code_and_message() {
        let fields = object_fields(&ApiDocV1::openapi(), "Error");
        assert!(fields.iter().any(|f| f == "code"));
        assert!(fields.iter().any(|f| f == "message"));
    }

    #[rstest]
    #[case(ApiDocV1::openapi(), "1.0")]
    #[case(ApiDocV2::openapi(), "2.0")]
    fn documents_share_metadata(#[case] doc: utoipa::openapi::OpenApi, #[case] version: &str) {
        assert_eq!(doc.info.title, "Migo API");
        assert_eq!(doc.info.version, version);
        let license = doc.info.license.as_ref().expect("license");
        assert_eq!(license.name, "MIT");
        let components = doc.components.as_ref().expect("components");
        assert!(components.security_schemes.contains_key(BASIC_AUTH_SCHEME));
    }

    #[rstest]
    fn version_two_only_lists_users() {
        let doc = ApiDocV2::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| *p == "/api/v2/users"));
        assert!(!paths.iter().any(|p| p.starts_with("/api/v1")));
        assert!(!paths.iter().any(|p| p.contains("{id}")));
    }
}
