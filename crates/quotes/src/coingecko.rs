use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use crate::QuoteSource;
use interface::{Asset, PriceSnapshot, QuoteError};

pub const SIMPLE_PRICE_URL: &str = "https://api.coingecko.com/api/v3/simple/price";
const VS_CURRENCY: &str = "usd";

#[derive(Clone)]
pub struct CoingeckoClient {
    http: reqwest::Client,
    base_url: String,
}

impl CoingeckoClient {
    pub fn new() -> Self {
        Self::with_base_url(SIMPLE_PRICE_URL)
    }

    /// 호환되는 다른 엔드포인트를 사용합니다 (테스트, 프록시 등)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// 요청 하나의 최대 대기 시간을 설정합니다
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, QuoteError> {
        self.http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for CoingeckoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteSource for CoingeckoClient {
    fn name(&self) -> &str {
        "coingecko"
    }

    async fn fetch_prices(&self) -> Result<PriceSnapshot, QuoteError> {
        let ids = Asset::ALL.map(|a| a.id()).join(",");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("ids", ids.as_str()), ("vs_currencies", VS_CURRENCY)])
            .header("accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(QuoteError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        debug!("coingecko response: {} bytes", body.len());

        parse_simple_price(&body)
    }
}

/// `/simple/price` 응답을 파싱합니다.
/// 형식: `{ "bitcoin": { "usd": 65000 }, "ethereum": { ... }, "solana": { ... } }`
pub fn parse_simple_price(body: &[u8]) -> Result<PriceSnapshot, QuoteError> {
    // 최상위는 객체여야 하지만 다른 키의 값은 검사하지 않는다
    let parsed: HashMap<String, Value> = serde_json::from_slice(body)?;

    let usd = |asset: Asset| -> Result<f64, QuoteError> {
        parsed
            .get(asset.id())
            .and_then(|rec| rec.get(VS_CURRENCY))
            .and_then(Value::as_f64)
            .ok_or(QuoteError::MissingAsset(asset.id()))
    };

    Ok(PriceSnapshot::new(
        usd(Asset::Bitcoin)?,
        usd(Asset::Ethereum)?,
        usd(Asset::Solana)?,
        Utc::now(),
    ))
}
