//! # hwdiag-app
//!
//! HWDIAG 진단 수집 서버 바이너리 진입점.
//! 설정 로드, 저장소 생성, 웹 서버 실행, 종료 처리.

use anyhow::{Context, Result};
use clap::Parser;
use hwdiag_core::config::AppConfig;
use hwdiag_core::ports::repository::DiagnosticRepository;
use hwdiag_storage::sqlite::SqliteStorage;
use hwdiag_web::WebServer;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// HWDIAG 하드웨어 진단 수집 서버
///
/// 진단 클라이언트의 보고를 받아 SQLite에 저장하고 조회 API를 제공한다.
#[derive(Parser, Debug)]
#[command(name = "hwdiag")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 설정 파일 경로 (기본: 현재 디렉토리의 hwdiag.toml, 없으면 무시)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 리슨 포트 (설정/환경변수보다 우선)
    #[arg(long, short = 'p')]
    port: Option<u16>,

    /// SQLite 파일 경로 (설정/환경변수보다 우선)
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,
}

impl Args {
    /// CLI 인자로 설정 오버라이드
    fn apply_to(&self, config: &mut AppConfig) {
        if let Some(port) = self.port {
            config.web.port = port;
        }
        if let Some(ref path) = self.db_path {
            config.storage.db_path = path.clone();
        }
    }
}

/// `RUST_LOG`가 없을 때 사용할 crate별 필터
fn default_log_filter(level: &str) -> String {
    ["hwdiag", "hwdiag_app", "hwdiag_core", "hwdiag_storage", "hwdiag_web", "tower_http"]
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// OS 종료 시그널(SIGINT, SIGTERM) 대기, 수신한 시그널 이름 반환
#[cfg(unix)]
async fn os_signal() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = sigint.recv() => Ok("SIGINT"),
        _ = sigterm.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn os_signal() -> std::io::Result<&'static str> {
    tokio::signal::ctrl_c().await?;
    Ok("Ctrl+C")
}

/// 시그널 수신 시 `true`로 바뀌는 종료 채널
///
/// 핸들러 등록에 실패하면 채널은 `false`로 남고 송신측은 수신측이 모두 사라질 때까지 유지된다.
/// (송신측 drop은 웹 서버에서 종료 신호로 처리됨)
fn spawn_shutdown_listener<F>(signal: F) -> watch::Receiver<bool>
where
    F: Future<Output = std::io::Result<&'static str>> + Send + 'static,
{
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        match signal.await {
            Ok(name) => {
                info!("{name} 수신, 종료 신호 발송");
                let _ = shutdown_tx.send(true);
            }
            Err(e) => {
                warn!("시그널 핸들러 등록 실패, 시그널 종료 비활성: {e}");
                shutdown_tx.closed().await;
            }
        }
    });

    shutdown_rx
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_filter = default_log_filter(&args.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    info!("HWDIAG 서버 시작 (v{})", env!("CARGO_PKG_VERSION"));

    // 설정 로드: 기본값 → 설정 파일 → 환경변수 → CLI
    let mut config = AppConfig::load(args.config.as_deref()).context("설정 로드 실패")?;
    args.apply_to(&mut config);

    info!(
        "설정: port={}, allow_external={}, db={}",
        config.web.port,
        config.web.allow_external,
        config.storage.db_path.display()
    );

    // 저장소 (main 종료 시 drop되며 연결이 닫힘)
    let storage = SqliteStorage::open(&config.storage.db_path).with_context(|| {
        format!(
            "저장소 열기 실패: {}",
            config.storage.db_path.display()
        )
    })?;
    let repository: Arc<dyn DiagnosticRepository> = Arc::new(storage);

    let shutdown_rx = spawn_shutdown_listener(os_signal());

    let server = WebServer::new(repository, config.web.clone());
    info!("API 주소: {}", server.url());

    server
        .run(shutdown_rx)
        .await
        .context("웹 서버 실행 실패")?;

    info!("HWDIAG 서버 종료");
    Ok(())
}
