use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Asset;

/// 세 자산의 USD 가격
/// 첫 조회가 성공하기 전까지는 모든 값이 비어 있습니다
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub btc: Option<f64>,
    pub eth: Option<f64>,
    pub sol: Option<f64>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl PriceSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(btc: f64, eth: f64, sol: f64, updated_at: DateTime<Utc>) -> Self {
        Self {
            btc: Some(btc),
            eth: Some(eth),
            sol: Some(sol),
            updated_at: Some(updated_at),
        }
    }

    pub fn get(&self, asset: Asset) -> Option<f64> {
        match asset {
            Asset::Bitcoin => self.btc,
            Asset::Ethereum => self.eth,
            Asset::Solana => self.sol,
        }
    }

    pub fn is_complete(&self) -> bool {
        Asset::ALL.iter().all(|a| self.get(*a).is_some())
    }
}
