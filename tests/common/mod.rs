#![allow(dead_code)]

use axum::Router;
use axum::extract::ConnectInfo;
use axum_test::TestServer;
use chrono::{DateTime, TimeZone, Utc};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;
use url_shortener::api::middleware::access::AccessGate;
use url_shortener::application::services::{ShortenSettings, UrlService};
use url_shortener::domain::clock::{Clock, ManualClock};
use url_shortener::domain::code_generator::AlphanumericGenerator;
use url_shortener::domain::geo::NoGeoLookup;
use url_shortener::domain::repositories::UrlStore;
use url_shortener::infrastructure::memory::MemoryUrlStore;
use url_shortener::routes::api_router;
use url_shortener::state::AppState;

pub const ACCESS_CODE: &str = "test-code";
pub const BASE_URL: &str = "https://sho.rt";
pub const PEER_ADDR: &str = "127.0.0.1:12345";

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, 10, 15, 0).unwrap()
}

pub fn create_service(store: Arc<dyn UrlStore>, clock: Arc<dyn Clock>) -> UrlService {
    UrlService::new(
        store,
        Arc::new(AlphanumericGenerator),
        clock,
        ShortenSettings::default(),
    )
}

/// State over a fresh in-memory store and the given clock.
pub fn create_test_state(clock: Arc<ManualClock>) -> AppState {
    let store = Arc::new(MemoryUrlStore::new());

    AppState {
        url_service: Arc::new(create_service(store, clock)),
        geo: Arc::new(NoGeoLookup),
        access_gate: Arc::new(AccessGate::new(ACCESS_CODE)),
        base_url: Arc::from(BASE_URL),
        behind_proxy: false,
        cors_origins: Vec::new(),
    }
}

/// Full router with a fixed peer address.
pub fn test_server(state: AppState) -> TestServer {
    let app: Router = api_router(state).layer(MockConnectInfoLayer);
    TestServer::new(app).unwrap()
}

/// Server over a fresh state, plus the clock driving it.
pub fn setup() -> (TestServer, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(start_time()));
    let server = test_server(create_test_state(clock.clone()));
    (server, clock)
}

/// Inserts `ConnectInfo` so handlers see a peer address under the mock transport.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = PEER_ADDR.parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
