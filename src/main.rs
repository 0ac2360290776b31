use std::io;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{builder::RangedU64ValueParser, Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lights_out::core::{GameConfig, StartLayout, DEFAULT_SCRAMBLE_TOGGLES};
use lights_out::ranking::{FileBackend, RankingStore, DEFAULT_CAPACITY};
use lights_out::session::Session;
use lights_out::terminal::TerminalGame;
use lights_out::web::{self, AppState};

/// The Lights Out puzzle, in the terminal or in the browser.
#[derive(Parser, Debug)]
#[command(name = "lights-out", version, about)]
struct Cli {
    /// File holding the ranking.
    #[arg(long, env = "LIGHTS_OUT_RANKING_FILE", default_value = "ranking.txt", global = true)]
    ranking_file: PathBuf,

    /// Number of scores kept in the ranking.
    #[arg(
        long,
        default_value_t = DEFAULT_CAPACITY,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..),
        global = true
    )]
    ranking_size: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play in the terminal.
    Play(LayoutArgs),
    /// Serve the web game.
    Serve {
        #[arg(long, env = "LIGHTS_OUT_HOST", default_value = "0.0.0.0")]
        host: IpAddr,

        #[arg(long, env = "LIGHTS_OUT_PORT", default_value_t = 8080)]
        port: u16,

        #[command(flatten)]
        layout: LayoutArgs,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LayoutKind {
    Off,
    Classic,
    Scrambled,
}

#[derive(Args, Debug)]
struct LayoutArgs {
    /// Starting board.
    #[arg(long, value_enum)]
    layout: Option<LayoutKind>,

    /// Seed for a scrambled board. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Random toggles applied to a scrambled board.
    #[arg(
        long,
        default_value_t = DEFAULT_SCRAMBLE_TOGGLES,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    toggles: u32,
}

impl LayoutArgs {
    fn start_layout(&self, default: LayoutKind) -> StartLayout {
        match self.layout.unwrap_or(default) {
            LayoutKind::Off => StartLayout::AllOff,
            LayoutKind::Classic => StartLayout::Classic,
            LayoutKind::Scrambled => StartLayout::Scrambled {
                seed: self.seed.unwrap_or_else(rand::random),
                toggles: self.toggles,
            },
        }
    }
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let store = RankingStore::new(FileBackend::new(&cli.ranking_file)).with_capacity(cli.ranking_size);

    match cli.command {
        Command::Play(layout) => {
            init_tracing("warn");
            let config = GameConfig::new(layout.start_layout(LayoutKind::Classic));
            let stdin = io::stdin();
            let mut game = TerminalGame::new(&store, config, stdin.lock(), io::stdout());
            game.run().context("terminal game failed")
        }
        Command::Serve { host, port, layout } => {
            init_tracing("info");
            let config = GameConfig::new(layout.start_layout(LayoutKind::Off));
            let runtime = tokio::runtime::Runtime::new().context("failed to start the runtime")?;
            runtime.block_on(serve(SocketAddr::new(host, port), config, store))
        }
    }
}

async fn serve(addr: SocketAddr, config: GameConfig, store: RankingStore<FileBackend>) -> Result<()> {
    tracing::info!(layout = %config.layout, ranking = %store.backend().path().display(), "starting web game");
    let state = AppState::new(Session::new(config), store);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Lights Out running on http://{}", addr);

    web::serve(listener, state).await.context("server error")
}
