use serde::{Deserialize, Serialize};

use crate::{PriceSnapshot, QuoteError};

/// 조회 실패 시 화면에 표시되는 유일한 메시지
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load prices";

/// 화면 상태
///
/// `Loading`에서 시작하며, 조회 주기가 끝날 때마다 성공이면 `Loaded`,
/// 실패면 `Error`로 전이합니다. 종료 상태는 없습니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Loading,
    Loaded(PriceSnapshot),
    Error(String),
}

impl ViewState {
    /// 조회 결과를 반영합니다. 실패 시 이전 가격은 버려집니다.
    pub fn apply(&mut self, outcome: Result<PriceSnapshot, QuoteError>) {
        *self = match outcome {
            Ok(snapshot) => ViewState::Loaded(snapshot),
            Err(_) => ViewState::Error(LOAD_ERROR_MESSAGE.to_string()),
        };
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn snapshot(&self) -> Option<&PriceSnapshot> {
        match self {
            ViewState::Loaded(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn snapshot() -> PriceSnapshot {
        PriceSnapshot::new(65000.0, 3200.0, 150.0, Utc::now())
    }

    #[test]
    fn test_starts_loading() {
        assert!(ViewState::default().is_loading());
    }

    #[test]
    fn test_success_moves_to_loaded() {
        let mut view = ViewState::default();
        let s = snapshot();
        view.apply(Ok(s.clone()));
        assert_eq!(view, ViewState::Loaded(s));
    }

    #[test]
    fn test_failure_discards_prices() {
        let mut view = ViewState::Loaded(snapshot());
        view.apply(Err(QuoteError::Status(500)));
        assert_eq!(view, ViewState::Error(LOAD_ERROR_MESSAGE.to_string()));
        assert!(view.snapshot().is_none());
    }

    #[test]
    fn test_success_after_error_recovers() {
        let mut view = ViewState::default();
        view.apply(Err(QuoteError::MissingAsset("solana")));
        view.apply(Ok(snapshot()));
        assert!(view.snapshot().is_some());
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ViewState::Loading).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "loading" }));

        let json = serde_json::to_value(ViewState::Error(LOAD_ERROR_MESSAGE.into())).unwrap();
        assert_eq!(json["state"], "error");
        assert_eq!(json["data"], LOAD_ERROR_MESSAGE);
    }
}
