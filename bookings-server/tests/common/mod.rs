//! Test harness: the full router over a seeded in-memory repository, with a
//! cookie jar holding one session

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use bookings_server::db::repository::{DatabaseRepo, MemoryRepo};
use bookings_server::render::Renderer;
use bookings_server::{AppState, Config, build_app};
use http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const TEMPLATE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/templates");
pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

pub struct TestClient {
    pub repo: Arc<MemoryRepo>,
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    pub fn new() -> Self {
        let repo = Arc::new(MemoryRepo::seeded().unwrap());
        let mut config = Config::for_templates(TEMPLATE_DIR);
        config.static_dir = STATIC_DIR.into();
        let renderer = Renderer::new(TEMPLATE_DIR, true).unwrap();

        let dyn_repo: Arc<dyn DatabaseRepo> = repo.clone();
        let app = build_app(AppState::new(dyn_repo, renderer, config));
        Self {
            repo,
            app,
            cookie: None,
        }
    }

    pub async fn send(&mut self, mut req: Request<Body>) -> Response<Body> {
        if let Some(cookie) = &self.cookie {
            req.headers_mut()
                .insert(header::COOKIE, cookie.parse().unwrap());
        }
        let resp = self.app.clone().oneshot(req).await.unwrap();
        if let Some(set) = resp.headers().get(header::SET_COOKIE) {
            let pair = set.to_str().unwrap().split(';').next().unwrap().to_string();
            self.cookie = Some(pair);
        }
        resp
    }

    pub async fn get(&mut self, uri: &str) -> Response<Body> {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(req).await
    }

    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> Response<Body> {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(encode_form(fields)))
            .unwrap();
        self.send(req).await
    }

    /// GET and return the body, asserting 200
    pub async fn page(&mut self, uri: &str) -> String {
        let resp = self.get(uri).await;
        assert_eq!(resp.status(), StatusCode::OK, "GET {uri}");
        body_string(resp).await
    }

    /// Log in as the seeded administrator
    pub async fn login(&mut self) {
        let resp = self
            .post_form(
                "/user/login",
                &[("email", "admin@admin.com"), ("password", "password")],
            )
            .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/");
    }
}

pub async fn body_string(resp: Response<Body>) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(resp: &Response<Body>) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode(s: &str) -> String {
    s.bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}
