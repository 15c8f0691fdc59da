//! Shared helpers: an in-memory application behind the real router.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use gif_axum::bootstrap::AxumContext;
use gif_axum::config::CorsConfig;
use gif_axum::routes::create_router;
use gif_core::testing::{FakeIdentityProvider, RecordingMailer, StaticTokenVerifier, in_memory_repos};
use gif_core::{AppCore, Repos};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const APP_NAME: &str = "MaiTech";

pub struct TestApp {
    pub router: Router,
    pub repos: Repos,
    pub identity: Arc<FakeIdentityProvider>,
    pub mailer: Arc<RecordingMailer>,
}

pub struct TestAppBuilder {
    identity: FakeIdentityProvider,
    tokens: StaticTokenVerifier,
    mailer: RecordingMailer,
    cors: CorsConfig,
}

impl TestAppBuilder {
    pub fn identity(mut self, identity: FakeIdentityProvider) -> Self {
        self.identity = identity;
        self
    }

    pub fn tokens(mut self, tokens: StaticTokenVerifier) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn mailer(mut self, mailer: RecordingMailer) -> Self {
        self.mailer = mailer;
        self
    }

    pub fn cors(mut self, cors: CorsConfig) -> Self {
        self.cors = cors;
        self
    }

    pub fn build(self) -> TestApp {
        let repos = in_memory_repos();
        let identity = Arc::new(self.identity);
        let mailer = Arc::new(self.mailer);
        let core = AppCore::new(repos.clone(), identity.clone(), mailer.clone(), APP_NAME);
        let ctx = AxumContext::new(core, Arc::new(self.tokens));
        TestApp {
            router: create_router(ctx, &self.cors),
            repos,
            identity,
            mailer,
        }
    }
}

pub fn builder() -> TestAppBuilder {
    TestAppBuilder {
        identity: FakeIdentityProvider::default(),
        tokens: StaticTokenVerifier::default(),
        mailer: RecordingMailer::default(),
        cors: CorsConfig::AllowAll,
    }
}

pub fn app() -> TestApp {
    builder().build()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_token(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

pub fn json(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

impl TestApp {
    /// Send a request and decode the JSON body (`Null` when empty).
    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, body)
    }
}
