use async_trait::async_trait;

use interface::{PriceSnapshot, QuoteError};

pub mod coingecko;

/// 시세 공급원
#[async_trait]
pub trait QuoteSource: Send + Sync {
    fn name(&self) -> &str;

    /// 세 자산의 USD 가격을 한 번 조회합니다.
    /// 하나라도 빠지면 전체를 실패로 처리합니다.
    async fn fetch_prices(&self) -> Result<PriceSnapshot, QuoteError>;
}

// Convenience re-exports
pub use coingecko::CoingeckoClient;
