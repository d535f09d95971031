use std::path::Path;

use skiff::http::request::{Request, RequestBuilder};
use skiff::routing::{Handler, MatchMode, Router, default_router};

fn request(method: &str, path: &str) -> Request {
    RequestBuilder::new()
        .method(method)
        .path(path)
        .build()
        .unwrap()
}

#[test]
fn test_router_exact_match() {
    let mut router = Router::new();
    router.get("/user-agent", Handler::UserAgent);

    assert!(router.route(&request("GET", "/user-agent")).is_some());
    assert!(router.route(&request("GET", "/user-agent/")).is_none());
    assert!(router.route(&request("GET", "/user-agentX")).is_none());
    assert!(router.route(&request("GET", "/user")).is_none());
}

#[test]
fn test_router_pattern_ending_in_slash_is_prefix() {
    let mut router = Router::new();
    router.get("/echo/", Handler::Echo);

    let route = router.route(&request("GET", "/echo/hello")).unwrap();
    assert_eq!(route.mode(), MatchMode::Prefix);
    assert_eq!(route.handler(), Handler::Echo);
}

#[test]
fn test_router_prefix_match_requires_full_prefix() {
    let mut router = Router::new();
    router.get("/echo/", Handler::Echo);

    assert!(router.route(&request("GET", "/echo/")).is_some());
    assert!(router.route(&request("GET", "/echo/a/b/c")).is_some());
    // Missing the trailing slash, so the prefix does not fit.
    assert!(router.route(&request("GET", "/echo")).is_none());
}

#[test]
fn test_router_prefix_match_is_byte_wise() {
    // The router does not reason about traversal; it just compares bytes.
    let mut router = Router::new();
    router.get("/files/", Handler::FileRead);

    assert!(router.route(&request("GET", "/files/../secret")).is_some());
}

#[test]
fn test_router_method_must_match() {
    let mut router = Router::new();
    router.get("/files/", Handler::FileRead);

    assert!(router.route(&request("POST", "/files/a.txt")).is_none());
    assert!(router.route(&request("DELETE", "/files/a.txt")).is_none());
}

#[test]
fn test_router_first_registration_wins() {
    let mut router = Router::new();
    router.get("/files/", Handler::FileRead);
    router.get("/files/special", Handler::Root);

    // Both match; the earlier registration is taken.
    let route = router.route(&request("GET", "/files/special")).unwrap();
    assert_eq!(route.handler(), Handler::FileRead);
}

#[test]
fn test_router_empty_table_matches_nothing() {
    let router = Router::new();

    assert!(router.route(&request("GET", "/")).is_none());
}

#[test]
fn test_default_router_table() {
    let router = default_router();

    let probes = [
        ("GET", "/", Handler::Root),
        ("GET", "/echo/hi", Handler::Echo),
        ("GET", "/user-agent", Handler::UserAgent),
        ("GET", "/files/app.log", Handler::FileRead),
        ("POST", "/files/app.log", Handler::FileCreate),
        ("OPTIONS", "/", Handler::Preflight),
        ("OPTIONS", "/anything/else", Handler::Preflight),
    ];

    for (method, path, expected) in probes {
        let route = router.route(&request(method, path)).unwrap();
        assert_eq!(route.handler(), expected, "{} {}", method, path);
    }
}

#[test]
fn test_default_router_unmatched_requests() {
    let router = default_router();

    assert!(router.route(&request("GET", "/unknown")).is_none());
    assert!(router.route(&request("DELETE", "/")).is_none());
    assert!(router.route(&request("POST", "/")).is_none());
    assert!(router.route(&request("BREW", "/coffee")).is_none());
}

#[test]
fn test_default_router_root_is_exact() {
    let router = default_router();

    // "/" does not register a prefix route for GET; only the exact path.
    assert!(router.route(&request("GET", "/something")).is_none());
}

#[tokio::test]
async fn test_dispatch_unmatched_yields_empty_404() {
    let router = default_router();
    let req = request("GET", "/nope");

    let response = router.dispatch(&req, Path::new(".")).await;

    assert_eq!(response.status.as_u16(), 404);
    assert!(response.body.is_empty());
    assert!(response.headers.is_empty());
}

#[tokio::test]
async fn test_dispatch_runs_matched_handler() {
    let router = default_router();
    let req = request("GET", "/echo/abc");

    let response = router.dispatch(&req, Path::new(".")).await;

    assert_eq!(response.status.as_u16(), 200);
    assert_eq!(response.body, b"abc".to_vec());
}
