use std::{sync::Arc, time::Duration};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tracing::{info, warn};

use crate::render::format_price;
use crate::state::AppState;
use interface::{Asset, PriceSnapshot, QuoteError};
use quotes::QuoteSource;

/// 실행 중인 조회 루프의 핸들
/// `stop()`이 끝나면 더 이상 조회도, 상태 갱신도 일어나지 않습니다
pub struct PollerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            warn!("poller task ended abnormally: {:?}", e);
        }
    }
}

/// 한 번 조회하고 결과를 상태에 반영합니다
pub async fn run_cycle(source: &dyn QuoteSource, state: &AppState) {
    let outcome = source.fetch_prices().await;
    log_outcome(source.name(), &outcome);
    state.record(outcome).await;
}

fn log_outcome(source: &str, outcome: &Result<PriceSnapshot, QuoteError>) {
    match outcome {
        Ok(snapshot) => {
            let prices: Vec<String> = Asset::ALL
                .iter()
                .map(|a| format!("{}={}", a.symbol(), format_price(snapshot.get(*a))))
                .collect();
            info!("시세 갱신 ({}): {}", source, prices.join(" "));
        }
        Err(e) => {
            warn!("price fetch error from {}: {}", source, e);
        }
    }
}

/// 조회 루프를 시작합니다.
/// 첫 조회는 즉시, 이후 `period` 간격으로 반복합니다.
pub fn start_poll_loop(
    source: Arc<dyn QuoteSource>,
    state: Arc<AppState>,
    period: Duration,
) -> PollerHandle {
    let (shutdown, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        info!(
            "시세 조회 루프 시작: {}, {}초 간격",
            source.name(),
            period.as_secs()
        );

        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = shutdown_rx.changed() => break,
                _ = ticker.tick() => {}
            }

            // 종료 신호가 오면 진행 중인 주기는 버린다 (상태에 쓰지 않음)
            tokio::select! {
                biased;
                _ = shutdown_rx.changed() => break,
                _ = run_cycle(source.as_ref(), &state) => {}
            }
        }

        info!("시세 조회 루프 종료");
    });

    PollerHandle { shutdown, task }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{
        collections::VecDeque,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Mutex,
        },
    };

    use async_trait::async_trait;
    use chrono::Utc;
    use interface::ViewState;
    use tokio::time::sleep;

    /// 미리 정한 결과를 순서대로 돌려주는 공급원. 소진되면 계속 성공
    struct ScriptedSource {
        calls: AtomicUsize,
        script: Mutex<VecDeque<bool>>,
        delay: Duration,
    }

    impl ScriptedSource {
        fn new(script: &[bool]) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                script: Mutex::new(script.iter().copied().collect()),
                delay: Duration::ZERO,
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl QuoteSource for ScriptedSource {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn fetch_prices(&self) -> Result<PriceSnapshot, QuoteError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if !self.delay.is_zero() {
                sleep(self.delay).await;
            }
            let ok = self.script.lock().unwrap().pop_front().unwrap_or(true);
            if ok {
                Ok(PriceSnapshot::new(n as f64, 2.0, 3.0, Utc::now()))
            } else {
                Err(QuoteError::Status(500))
            }
        }
    }

    #[tokio::test]
    async fn test_run_cycle_updates_state() {
        let source = ScriptedSource::new(&[false, true]);
        let state = AppState::new();

        run_cycle(&source, &state).await;
        assert!(matches!(state.view().await, ViewState::Error(_)));

        run_cycle(&source, &state).await;
        assert!(matches!(state.view().await, ViewState::Loaded(_)));
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_on_start_then_every_period() {
        let source = Arc::new(ScriptedSource::new(&[]));
        let state = Arc::new(AppState::new());

        let handle = start_poll_loop(source.clone(), state.clone(), Duration::from_secs(10));

        sleep(Duration::from_secs(5)).await;
        assert_eq!(source.calls(), 1);
        assert!(matches!(state.view().await, ViewState::Loaded(_)));

        sleep(Duration::from_secs(10)).await;
        assert_eq!(source.calls(), 2);

        sleep(Duration::from_secs(20)).await;
        assert_eq!(source.calls(), 4);

        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_after_error_cycle() {
        let source = Arc::new(ScriptedSource::new(&[false, true]));
        let state = Arc::new(AppState::new());

        let handle = start_poll_loop(source.clone(), state.clone(), Duration::from_secs(10));

        sleep(Duration::from_secs(5)).await;
        assert!(matches!(state.view().await, ViewState::Error(_)));

        sleep(Duration::from_secs(10)).await;
        assert!(matches!(state.view().await, ViewState::Loaded(_)));

        // 루프도 run_cycle을 거쳐 카운터가 같은 방식으로 쌓인다
        {
            let board = state.board.read().await;
            assert_eq!(board.cycles, 2);
            assert_eq!(board.failures, 1);
        }

        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_fetch_or_write_after_stop() {
        let source = Arc::new(ScriptedSource::new(&[]));
        let state = Arc::new(AppState::new());

        let handle = start_poll_loop(source.clone(), state.clone(), Duration::from_secs(10));
        sleep(Duration::from_secs(15)).await;
        assert_eq!(source.calls(), 2);

        handle.stop().await;
        let cycles = state.board.read().await.cycles;

        sleep(Duration::from_secs(60)).await;
        assert_eq!(source.calls(), 2);
        assert_eq!(state.board.read().await.cycles, cycles);
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_flight_request_dropped_on_stop() {
        let source = Arc::new(ScriptedSource::new(&[]).with_delay(Duration::from_secs(30)));
        let state = Arc::new(AppState::new());

        let handle = start_poll_loop(source.clone(), state.clone(), Duration::from_secs(10));
        sleep(Duration::from_secs(1)).await;
        assert_eq!(source.calls(), 1);

        handle.stop().await;
        sleep(Duration::from_secs(60)).await;

        // 응답이 오기 전에 종료되었으므로 상태는 그대로 로딩
        assert!(state.view().await.is_loading());
        assert_eq!(state.board.read().await.cycles, 0);
    }
}
