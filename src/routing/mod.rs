//! Route table and endpoint handlers.
//!
//! The router owns an ordered list of (method, pattern) entries mapping to
//! a closed enum of handlers. Patterns ending in `/` match any path
//! sharing that literal prefix; everything else matches exactly.

pub mod handlers;
pub mod router;

pub use handlers::Handler;
pub use router::{MatchMode, Route, Router};

/// Builds the route table this server ships with.
///
/// `GET /` is pinned to an exact match despite its trailing slash, so it
/// answers only the bare root path. `OPTIONS /` stays a prefix and
/// answers preflight for every path.
pub fn default_router() -> Router {
    let mut router = Router::new();

    router.register_with_mode("GET", "/", MatchMode::Exact, Handler::Root);
    router.get("/echo/", Handler::Echo);
    router.get("/user-agent", Handler::UserAgent);
    router.get("/files/", Handler::FileRead);
    router.post("/files/", Handler::FileCreate);
    router.options("/", Handler::Preflight);

    router
}
