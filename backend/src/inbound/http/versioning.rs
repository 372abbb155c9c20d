//! API version routing for the `/api` surface.
//!
//! Unversioned `/api/users` routes behave as version 1. Version 2 only
//! exposes the user listing. Any other `/api/v{n}/users` path is rejected
//! with `400 unsupported_api_version`.

use std::fmt;
use std::str::FromStr;

use actix_web::{HttpResponse, Scope, middleware::DefaultHeaders, web};
use serde_json::json;

use crate::domain::Error;
use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::users;
use crate::middleware::BasicAuth;

/// Response header advertising the versions this server speaks.
pub const SUPPORTED_VERSIONS_HEADER: &str = "api-supported-versions";

/// A published API version.
///
/// # Examples
/// ```
/// use migo_api::inbound::http::versioning::ApiVersion;
///
/// assert_eq!("2.0".parse::<ApiVersion>(), Ok(ApiVersion::V2));
/// assert_eq!(ApiVersion::V1.to_string(), "1.0");
/// assert!("3".parse::<ApiVersion>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ApiVersion {
    /// Full user resource.
    V1,
    /// User listing only.
    V2,
}

impl ApiVersion {
    /// Every published version, oldest first.
    pub const ALL: [Self; 2] = [Self::V1, Self::V2];

    /// Path segments that select this version, e.g. `v1` and `v1.0`.
    #[must_use]
    pub const fn path_segments(self) -> [&'static str; 2] {
        match self {
            Self::V1 => ["/v1", "/v1.0"],
            Self::V2 => ["/v2", "/v2.0"],
        }
    }

    /// Comma-separated list for [`SUPPORTED_VERSIONS_HEADER`].
    #[must_use]
    pub fn supported_header_value() -> String {
        Self::ALL
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 => f.write_str("1.0"),
            Self::V2 => f.write_str("2.0"),
        }
    }
}

/// Returned when a version string names no published version.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported API version: {0}")]
pub struct UnsupportedVersion(pub String);

impl FromStr for ApiVersion {
    type Err = UnsupportedVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" | "1.0" => Ok(Self::V1),
            "2" | "2.0" => Ok(Self::V2),
            other => Err(UnsupportedVersion(other.to_owned())),
        }
    }
}

async fn unsupported_version(version: web::Path<(String, String)>) -> Result<HttpResponse, Error> {
    let (requested, _) = version.into_inner();
    match requested.parse::<ApiVersion>() {
        Ok(version) => Err(Error::not_found(format!(
            "No such resource in API version {version}"
        ))),
        Err(err) => Err(Error::invalid_request(err.to_string()).with_details(json!({
            "code": "unsupported_api_version",
            "requested": requested,
            "supported": ApiVersion::supported_header_value(),
        }))),
    }
}

fn v1_routes(scope: Scope) -> Scope {
    scope
        .service(users::list_users)
        .service(users::create_user)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
}

fn v2_routes(scope: Scope) -> Scope {
    scope.service(users::list_users_v2)
}

/// Mount the authenticated `/api` scope with every published version.
///
/// ```
/// use actix_web::App;
/// use migo_api::inbound::http::versioning::configure_api;
/// use migo_api::middleware::BasicAuth;
///
/// let app = App::new().configure(|cfg| configure_api(cfg, BasicAuth::disabled()));
/// # let _ = app;
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig, auth: BasicAuth) {
    let mut scope = web::scope("/api")
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(|err, _req| {
            Error::not_found(format!("No route matches: {err}")).into()
        }));
    for version in ApiVersion::ALL {
        for segment in version.path_segments() {
            let versioned = web::scope(segment);
            scope = scope.service(match version {
                ApiVersion::V1 => v1_routes(versioned),
                ApiVersion::V2 => v2_routes(versioned),
            });
        }
    }
    let api = v1_routes(scope).route(
        "/v{version}/users{tail:.*}",
        web::route().to(unsupported_version),
    );
    cfg.service(
        api.wrap(auth).wrap(DefaultHeaders::new().add((
            SUPPORTED_VERSIONS_HEADER,
            ApiVersion::supported_header_value(),
        ))),
    );
}
