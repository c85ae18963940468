use std::path::Path;

use tracing_appender::non_blocking;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Tracing guards를 보관하는 구조체
/// 이 구조체가 drop되기 전까지 로깅이 계속 작동합니다
pub struct TracingGuards {
    _file: Option<WorkerGuard>,
    _stdout: WorkerGuard,
}

/// Tracing 초기화
/// stdout 로깅은 항상, 파일 로깅은 디렉터리가 주어졌을 때만 설정합니다
pub fn init_tracing(log_dir: Option<&Path>) -> TracingGuards {
    let (stdout_writer, stdout_guard) = non_blocking(std::io::stdout());

    // RUST_LOG가 없으면 info
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // 파일은 `logs/price-board.2025-11-29` 형식으로 날짜별 생성
    let (file_layer, file_guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "price-board");
            let (file_writer, guard) = non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer)
                .with_filter(EnvFilter::new("info"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(fmt::layer().with_writer(stdout_writer).with_ansi(true))
        .init();

    TracingGuards {
        _file: file_guard,
        _stdout: stdout_guard,
    }
}
