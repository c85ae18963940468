use std::sync::Arc;

use color_eyre::eyre;
use structopt::StructOpt;
use tracing::info;

use board::{
    config::BoardConfig,
    logger,
    poller::start_poll_loop,
    server,
    state::AppState,
};
use quotes::{CoingeckoClient, QuoteSource};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // init error reporting
    color_eyre::install()?;

    dotenv::dotenv().ok();

    let config = BoardConfig::from_args();
    config.validate()?;

    // init logging
    let _guards = logger::init_tracing(config.log_dir.as_deref());

    info!("시세 보드 시작 중... ({})", config.endpoint);

    let state = Arc::new(AppState::with_interval(config.interval()));

    let source: Arc<dyn QuoteSource> = Arc::new(
        CoingeckoClient::with_base_url(config.endpoint.clone())
            .with_timeout(config.request_timeout())?,
    );

    // start background poller
    let poller = start_poll_loop(source, state.clone(), config.interval());

    // serve until ctrl-c
    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
        info!("종료 신호 수신");
    };
    let served = server::serve(state, config.port(), shutdown).await;

    poller.stop().await;
    info!("시세 보드 종료");

    served
}
