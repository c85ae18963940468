use thiserror::Error;

/// 시세 조회 실패 원인
/// 원인은 로그에만 남고 화면에는 하나의 메시지로 표시됩니다
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status: {0}")]
    Status(u16),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("missing usd price for {0}")]
    MissingAsset(&'static str),
}
