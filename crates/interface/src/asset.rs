use serde::{Deserialize, Serialize};

/// 시세를 표시하는 자산 목록 (고정)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Asset {
    Bitcoin,
    Ethereum,
    Solana,
}

impl Asset {
    /// 화면 표시 순서
    pub const ALL: [Asset; 3] = [Asset::Bitcoin, Asset::Ethereum, Asset::Solana];

    /// 시세 API에서 사용하는 id
    pub fn id(&self) -> &'static str {
        match self {
            Asset::Bitcoin => "bitcoin",
            Asset::Ethereum => "ethereum",
            Asset::Solana => "solana",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Asset::Bitcoin => "BTC",
            Asset::Ethereum => "ETH",
            Asset::Solana => "SOL",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Asset::Bitcoin => "Bitcoin",
            Asset::Ethereum => "Ethereum",
            Asset::Solana => "Solana",
        }
    }

    pub fn logo_url(&self) -> &'static str {
        match self {
            Asset::Bitcoin => "https://cryptologos.cc/logos/bitcoin-btc-logo.png",
            Asset::Ethereum => "https://cryptologos.cc/logos/ethereum-eth-logo.png",
            Asset::Solana => "https://cryptologos.cc/logos/solana-sol-logo.png",
        }
    }
}
