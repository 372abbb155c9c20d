//! Correlation identifier shared by one request's log lines and error body.
//!
//! A caller may supply its own identifier in the `trace-id` request header;
//! otherwise a random one is minted. The active value is held in a Tokio
//! task-local, which spawned tasks do not inherit.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Header used both to accept and to echo the identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static ACTIVE: TraceId;
}

/// Per-request trace identifier.
///
/// # Examples
/// ```
/// use migo_api::domain::TraceId;
///
/// let supplied = TraceId::accept_or_generate(Some("8c4f2a1e-3b5d-4e6f-9a7b-0c1d2e3f4a5b"));
/// assert_eq!(supplied.to_string(), "8c4f2a1e-3b5d-4e6f-9a7b-0c1d2e3f4a5b");
///
/// let minted = TraceId::accept_or_generate(Some("not a uuid"));
/// assert_ne!(minted.to_string(), "not a uuid");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Mint a random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Reuse a caller-supplied identifier when it is a UUID, else mint one.
    #[must_use]
    pub fn accept_or_generate(supplied: Option<&str>) -> Self {
        supplied
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or_else(Self::generate)
    }

    /// Identifier of the request currently being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        ACTIVE.try_with(|id| *id).ok()
    }

    /// Run `fut` with `self` as the active identifier.
    pub async fn scope<Fut: Future>(self, fut: Fut) -> Fut::Output {
        ACTIVE.scope(self, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
