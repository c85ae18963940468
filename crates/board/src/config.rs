use std::{path::PathBuf, time::Duration};

use structopt::StructOpt;
use thiserror::Error;

use quotes::coingecko::SIMPLE_PRICE_URL;

pub const DEFAULT_PORT: u16 = 12090;
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("poll interval must be greater than zero")]
    ZeroInterval,
    #[error("endpoint must be an http(s) url: {0}")]
    InvalidEndpoint(String),
}

/// 실행 설정
/// 모든 옵션은 환경 변수(.env 포함)로도 지정할 수 있습니다
#[derive(Debug, Clone, StructOpt)]
#[structopt(name = "price-board", about = "BTC / ETH / SOL 실시간 시세 보드")]
pub struct BoardConfig {
    /// HTTP 서버 포트 (기본값 DEFAULT_PORT)
    #[structopt(long, env = "PRICE_BOARD_PORT")]
    pub port: Option<u16>,

    /// 시세 조회 엔드포인트 (/simple/price 호환)
    #[structopt(long, env = "PRICE_BOARD_ENDPOINT", default_value = SIMPLE_PRICE_URL)]
    pub endpoint: String,

    /// 조회 주기 (초, 기본값 DEFAULT_INTERVAL)
    #[structopt(long, env = "PRICE_BOARD_INTERVAL_SECS")]
    pub interval_secs: Option<u64>,

    /// 로그 파일 디렉터리. 지정하면 일별 파일 로그를 남깁니다
    #[structopt(long, env = "PRICE_BOARD_LOG_DIR", parse(from_os_str))]
    pub log_dir: Option<PathBuf>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            port: None,
            endpoint: SIMPLE_PRICE_URL.to_string(),
            interval_secs: None,
            log_dir: None,
        }
    }
}

impl BoardConfig {
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn interval(&self) -> Duration {
        self.interval_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_INTERVAL)
    }

    /// 요청 하나가 다음 주기를 넘겨 붙잡고 있지 않도록 주기와 같은 값
    pub fn request_timeout(&self) -> Duration {
        self.interval()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval().is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidEndpoint(self.endpoint.clone()));
        }
        Ok(())
    }
}
