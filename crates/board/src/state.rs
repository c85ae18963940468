use std::{sync::Arc, time::Duration};

use serde::Serialize;
use tokio::sync::RwLock;

use crate::config::DEFAULT_INTERVAL;
use interface::{PriceSnapshot, QuoteError, ViewState};

#[derive(Debug, Clone, Default, Serialize)]
pub struct BoardState {
    pub view: ViewState,
    pub cycles: u64,
    pub failures: u64,
}

impl BoardState {
    pub fn record(&mut self, outcome: Result<PriceSnapshot, QuoteError>) {
        self.cycles += 1;
        if outcome.is_err() {
            self.failures += 1;
        }
        self.view.apply(outcome);
    }
}

#[derive(Clone)]
pub struct AppState {
    pub board: Arc<RwLock<BoardState>>,
    /// 조회 주기. 페이지 자동 새로고침 간격으로도 사용
    pub interval: Duration,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_interval(DEFAULT_INTERVAL)
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            board: Arc::new(RwLock::new(BoardState::default())),
            interval,
        }
    }

    pub async fn view(&self) -> ViewState {
        self.board.read().await.view.clone()
    }

    pub async fn record(&self, outcome: Result<PriceSnapshot, QuoteError>) {
        let mut guard = self.board.write().await;
        guard.record(outcome);
    }
}
