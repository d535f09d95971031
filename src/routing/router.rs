use std::path::Path;

use crate::http::request::Request;
use crate::http::response::Response;
use crate::routing::handlers::Handler;

/// How a registered pattern is compared against request paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// The request path must equal the pattern exactly.
    Exact,
    /// The request path must start with the pattern's literal bytes. No
    /// segment-boundary awareness: it is a plain byte-wise prefix test, so
    /// sandboxing traversal suffixes is the file handlers' job, not the
    /// router's.
    Prefix,
}

/// One method + pattern entry of the route table.
#[derive(Debug)]
pub struct Route {
    method: String,
    pattern: String,
    mode: MatchMode,
    handler: Handler,
}

impl Route {
    fn matches(&self, req: &Request) -> bool {
        if self.method != req.method {
            return false;
        }

        match self.mode {
            MatchMode::Exact => req.path == self.pattern,
            MatchMode::Prefix => req.path.starts_with(&self.pattern),
        }
    }

    /// The handler this route dispatches to.
    pub fn handler(&self) -> Handler {
        self.handler
    }

    /// How this route's pattern is matched.
    pub fn mode(&self) -> MatchMode {
        self.mode
    }
}

/// Ordered table of routes.
///
/// Built once before the listener starts accepting and immutable
/// afterward, which is what makes it safe to share across connection
/// tasks behind an `Arc` with no locking. Registration order is match
/// order: the first route whose method and pattern fit wins.
#[derive(Debug)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Creates an empty route table.
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Adds a route with an explicit match mode.
    pub fn register_with_mode(
        &mut self,
        method: impl Into<String>,
        pattern: impl Into<String>,
        mode: MatchMode,
        handler: Handler,
    ) {
        self.routes.push(Route {
            method: method.into(),
            pattern: pattern.into(),
            mode,
            handler,
        });
    }

    /// Adds a route. A pattern ending in `/` is a prefix match, anything
    /// else must match exactly.
    pub fn register(
        &mut self,
        method: impl Into<String>,
        pattern: impl Into<String>,
        handler: Handler,
    ) {
        let pattern = pattern.into();
        let mode = if pattern.ends_with('/') {
            MatchMode::Prefix
        } else {
            MatchMode::Exact
        };

        self.register_with_mode(method, pattern, mode, handler);
    }

    pub fn get(&mut self, pattern: &str, handler: Handler) {
        self.register("GET", pattern, handler);
    }

    pub fn post(&mut self, pattern: &str, handler: Handler) {
        self.register("POST", pattern, handler);
    }

    pub fn options(&mut self, pattern: &str, handler: Handler) {
        self.register("OPTIONS", pattern, handler);
    }

    /// Finds the first matching route in registration order.
    pub fn route(&self, req: &Request) -> Option<&Route> {
        self.routes.iter().find(|r| r.matches(req))
    }

    /// Matches and runs the handler for `req`, or produces the fixed 404
    /// fallback when nothing matches.
    pub async fn dispatch(&self, req: &Request, root: &Path) -> Response {
        match self.route(req) {
            Some(route) => route.handler().respond(req, root).await,
            None => Response::not_found(),
        }
    }
}
