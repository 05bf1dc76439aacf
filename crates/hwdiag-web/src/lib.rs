//! # hwdiag-web
//!
//! 진단 수집 REST API 서버.
//! Axum 기반, 모든 엔드포인트는 `/api/v1` 아래에 있다.
//!
//! ## 기능
//! - 진단 보고 수집 (정규/레거시 JSON)
//! - 진단 목록/단건/시리얼별 조회
//! - 집계 통계 조회
//! - 헬스 체크

pub mod error;
pub mod handlers;
pub mod routes;

use axum::Router;
use hwdiag_core::config::WebConfig;
use hwdiag_core::ports::repository::DiagnosticRepository;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// API 경로 접두사
pub const API_PREFIX: &str = "/api/v1";

/// 웹 서버 애플리케이션 상태
#[derive(Clone)]
pub struct AppState {
    /// 진단 저장소
    pub repository: Arc<dyn DiagnosticRepository>,
}

/// 라우터 구성 (CORS + 요청 추적 포함)
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest(API_PREFIX, routes::api_routes())
        .fallback(handlers::route_not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 진단 API 서버
pub struct WebServer {
    config: WebConfig,
    state: AppState,
}

impl WebServer {
    /// 새 웹 서버 생성
    pub fn new(repository: Arc<dyn DiagnosticRepository>, config: WebConfig) -> Self {
        Self {
            config,
            state: AppState { repository },
        }
    }

    /// 바인드 주소 (`allow_external`이면 모든 인터페이스)
    pub fn bind_addr(&self) -> SocketAddr {
        let host: [u8; 4] = if self.config.allow_external {
            [0, 0, 0, 0]
        } else {
            [127, 0, 0, 1]
        };
        SocketAddr::from((host, self.config.port))
    }

    /// 서버 실행
    ///
    /// 설정된 포트에 바인드하고 `shutdown_rx`가 `true`가 될 때까지 요청을 처리한다.
    pub async fn run(self, shutdown_rx: watch::Receiver<bool>) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.bind_addr()).await?;
        self.serve(listener, shutdown_rx).await
    }

    /// 이미 바인드된 리스너로 서버 실행
    pub async fn serve(
        self,
        listener: TcpListener,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        let app = router(self.state);

        info!("진단 API 서버 시작: http://{addr}{API_PREFIX}");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                loop {
                    if *shutdown_rx.borrow() {
                        info!("웹 서버 종료 신호 수신");
                        break;
                    }
                    if shutdown_rx.changed().await.is_err() {
                        break;
                    }
                }
            })
            .await?;

        info!("진단 API 서버 종료");
        Ok(())
    }

    /// 서버 URL 반환
    pub fn url(&self) -> String {
        format!("http://localhost:{}{API_PREFIX}", self.config.port)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use hwdiag_storage::sqlite::SqliteStorage;
    use serde_json::Value;
    use tower::ServiceExt;

    /// 인메모리 저장소를 가진 라우터
    pub fn app() -> Router {
        let storage = SqliteStorage::open_in_memory().unwrap();
        router(AppState {
            repository: Arc::new(storage),
        })
    }

    /// 요청 1건 실행 후 (상태 코드, JSON 본문) 반환
    pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }
}
