//! HTTP Basic authentication against a single configured credential pair.
//!
//! When no credential is configured the middleware lets every request
//! through; the server logs a warning at startup in that case.
//!
//! Only SHA-256 digests of the configured pair are kept. Supplied
//! credentials are hashed and compared without early exit, so the time taken
//! does not depend on how many leading bytes match.

use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{AUTHORIZATION, HeaderValue, WWW_AUTHENTICATE};
use actix_web::{Error, ResponseError};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::domain::Error as ApiError;

const CHALLENGE: &str = r#"Basic realm="migo", charset="UTF-8""#;

type CredentialDigest = [u8; 32];

fn digest(value: &str) -> CredentialDigest {
    Sha256::digest(value.as_bytes()).into()
}

/// Bitwise difference of two digests; zero only when they are equal.
fn difference(left: &CredentialDigest, right: &CredentialDigest) -> u8 {
    left.iter()
        .zip(right)
        .fold(0, |acc, (l, r)| acc | (l ^ r))
}

#[derive(Debug)]
struct Credentials {
    username: CredentialDigest,
    password: CredentialDigest,
}

impl Credentials {
    fn new(username: &str, password: &str) -> Self {
        Self {
            username: digest(username),
            password: digest(password),
        }
    }

    /// Both halves are always compared, even when the user name differs.
    fn matches(&self, username: &str, password: &str) -> bool {
        let user = difference(&self.username, &digest(username));
        let pass = difference(&self.password, &digest(password));
        (user | pass) == 0
    }
}

/// Decode an `Authorization: Basic ...` header value into user and password.
fn parse_basic(header: &str) -> Option<(String, String)> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let bytes = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(bytes).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_owned(), password.to_owned()))
}

/// Middleware factory enforcing HTTP Basic authentication.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use migo_api::middleware::BasicAuth;
///
/// let app = App::new().service(web::scope("/api").wrap(BasicAuth::new("admin", "secret")));
/// # let _ = app;
/// ```
#[derive(Debug, Clone, Default)]
pub struct BasicAuth {
    expected: Option<Arc<Credentials>>,
}

impl BasicAuth {
    /// Require exactly this user name and password.
    #[must_use]
    pub fn new(username: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        Self {
            expected: Some(Arc::new(Credentials::new(
                username.as_ref(),
                password.as_ref(),
            ))),
        }
    }

    /// Accept every request.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Enable authentication only when both halves are configured.
    #[must_use]
    pub fn from_parts(username: Option<String>, password: Option<String>) -> Self {
        match (username, password) {
            (Some(username), Some(password)) => Self::new(username, password),
            (None, None) => Self::disabled(),
            _ => {
                warn!("basic auth needs both username and password; authentication disabled");
                Self::disabled()
            }
        }
    }

    /// Whether requests must carry credentials.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.expected.is_some()
    }
}

impl<S, B> Transform<S, ServiceRequest> for BasicAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = BasicAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BasicAuthMiddleware {
            service: Rc::new(service),
            expected: self.expected.clone(),
        }))
    }
}

/// Service produced by [`BasicAuth`].
pub struct BasicAuthMiddleware<S> {
    service: Rc<S>,
    expected: Option<Arc<Credentials>>,
}

impl<S> BasicAuthMiddleware<S> {
    fn authorised(&self, req: &ServiceRequest) -> bool {
        let Some(expected) = &self.expected else {
            return true;
        };
        req.headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_basic)
            .is_some_and(|(username, password)| expected.matches(&username, &password))
    }
}

impl<S, B> Service<ServiceRequest> for BasicAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if self.authorised(&req) {
            let service = Rc::clone(&self.service);
            return Box::pin(async move {
                let res = service.call(req).await?;
                Ok(res.map_into_left_body())
            });
        }

        debug!(path = %req.path(), "rejected request without valid credentials");
        let mut response = ApiError::unauthorized("Valid credentials are required").error_response();
        response
            .headers_mut()
            .insert(WWW_AUTHENTICATE, HeaderValue::from_static(CHALLENGE));
        Box::pin(ready(Ok(req.into_response(response).map_into_right_body())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::rstest;

    fn header_for(username: &str, password: &str) -> String {
        format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
    }

    async fn status_for(auth: BasicAuth, header: Option<String>) -> (StatusCode, Option<String>) {
        let app = actix_test::init_service(
            App::new().service(
                web::scope("/api")
                    .wrap(auth)
                    .route("/ping", web::get().to(|| async { HttpResponse::Ok().finish() })),
            ),
        )
        .await;
        let mut req = actix_test::TestRequest::get().uri("/api/ping");
        if let Some(value) = header {
            req = req.insert_header((AUTHORIZATION, value));
        }
        let res = actix_test::call_service(&app, req.to_request()).await;
        let challenge = res
            .headers()
            .get(WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        (res.status(), challenge)
    }

    #[rstest]
    #[case(Some(header_for("admin", "secret")), StatusCode::OK)]
    #[case(Some(header_for("admin", "wrong")), StatusCode::UNAUTHORIZED)]
    #[case(Some(header_for("root", "secret")), StatusCode::UNAUTHORIZED)]
    #[case(Some("Bearer abc".to_owned()), StatusCode::UNAUTHORIZED)]
    #[case(Some("Basic !!!".to_owned()), StatusCode::UNAUTHORIZED)]
    #[case(None, StatusCode::UNAUTHORIZED)]
    #[actix_web::test]
    async fn enforces_configured_credentials(
        #[case] header: Option<String>,
        #[case] expected: StatusCode,
    ) {
        let (status, challenge) = status_for(BasicAuth::new("admin", "secret"), header).await;
        assert_eq!(status, expected);
        if expected == StatusCode::UNAUTHORIZED {
            assert_eq!(challenge.as_deref(), Some(CHALLENGE));
        }
    }

    #[actix_web::test]
    async fn disabled_auth_lets_requests_through() {
        let (status, _) = status_for(BasicAuth::disabled(), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[rstest]
    #[case(Some("admin".to_owned()), Some("secret".to_owned()), true)]
    #[case(Some("admin".to_owned()), None, false)]
    #[case(None, Some("secret".to_owned()), false)]
    #[case(None, None, false)]
    fn from_parts_requires_both_halves(
        #[case] username: Option<String>,
        #[case] password: Option<String>,
        #[case] enabled: bool,
    ) {
        assert_eq!(BasicAuth::from_parts(username, password).is_enabled(), enabled);
    }

    #[rstest]
    #[case("admin", "secret", true)]
    #[case("admin", "secreT", false)]
    #[case("admin", "secret ", false)]
    #[case("admin", "", false)]
    #[case("Admin", "secret", false)]
    #[case("", "", false)]
    fn credentials_match_only_the_exact_pair(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: bool,
    ) {
        let stored = Credentials::new("admin", "secret");
        assert_eq!(stored.matches(username, password), expected);
    }

    #[rstest]
    fn configured_pair_is_not_kept_in_plain_text() {
        let stored = Credentials::new("admin", "secret");
        assert_ne!(stored.password.as_slice(), b"secret".as_slice());
        assert_eq!(stored.password, digest("secret"));
    }

    #[rstest]
    #[case([0_u8; 32], [0_u8; 32], 0)]
    #[case([0_u8; 32], [0xff_u8; 32], 0xff)]
    fn difference_is_zero_only_for_equal_digests(
        #[case] left: CredentialDigest,
        #[case] right: CredentialDigest,
        #[case] expected: u8,
    ) {
        assert_eq!(difference(&left, &right), expected);
    }

    #[rstest]
    #[case("basic YWRtaW46czpjcmV0", Some(("admin", "s:cret")))]
    #[case("Basic YWRtaW4=", None)]
    #[case("Digest YWRtaW46c2VjcmV0", None)]
    fn parse_basic_handles_edge_cases(#[case] header: &str, #[case] expected: Option<(&str, &str)>) {
        let parsed = parse_basic(header);
        assert_eq!(
            parsed.as_ref().map(|(u, p)| (u.as_str(), p.as_str())),
            expected
        );
    }
}
