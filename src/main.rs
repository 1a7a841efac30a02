use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use battleship_arena::{
    init_logging, serve, ui, MatchLog, MatchRecord, RandomBot, ReplaySlot, Replayer,
    REPLAY_STEP_DELAY,
};
use clap::{Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the random bot to match runners.
    Bot {
        #[arg(long, env = "BATTLESHIP_BOT_ADDR", default_value = "0.0.0.0:6968")]
        bind: String,
        #[arg(long, env = "BATTLESHIP_BOT_NAME", default_value = "Rust Bot")]
        name: String,
        #[arg(long, help = "Fix RNG seed for reproducible play (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Replay a match in the terminal, from a JSON match log or from one
    /// entry of a records file.
    Spectate {
        #[arg(required_unless_present = "records", conflicts_with = "records")]
        log: Option<PathBuf>,
        #[arg(long, help = "JSON array of match records to pick from")]
        records: Option<PathBuf>,
        #[arg(long, default_value_t = 0, requires = "records", help = "Record index, as shown by `games`")]
        index: usize,
        #[arg(long, help = "Delay between steps in milliseconds")]
        delay_ms: Option<u64>,
    },
    /// List the matches in a JSON array of match records.
    Games { records: PathBuf },
    /// Rank players by wins from a JSON array of match records.
    Leaderboard { records: PathBuf },
}

fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_rng(&mut rand::rng()),
    }
}

fn read_records(path: &Path) -> anyhow::Result<Vec<MatchRecord>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Bot { bind, name, seed } => {
            let listener = TcpListener::bind(&bind)
                .await
                .with_context(|| format!("binding {}", bind))?;
            let mut rng = seeded_rng(seed);
            serve(listener, move || {
                RandomBot::new(name.clone(), SmallRng::from_rng(&mut rng))
            })
            .await?;
        }
        Commands::Spectate {
            log,
            records,
            index,
            delay_ms,
        } => {
            let (match_log, source) = match (log, records) {
                (Some(log), _) => {
                    let text = std::fs::read_to_string(&log)
                        .with_context(|| format!("reading {}", log.display()))?;
                    let match_log: MatchLog = serde_json::from_str(&text)
                        .with_context(|| format!("parsing {}", log.display()))?;
                    (match_log, log.display().to_string())
                }
                (None, Some(records)) => {
                    let mut all = read_records(&records)?;
                    if index >= all.len() {
                        anyhow::bail!(
                            "no match {} in {} ({} records)",
                            index,
                            records.display(),
                            all.len()
                        );
                    }
                    let record = all.swap_remove(index);
                    (record.log, format!("{}#{}", records.display(), index))
                }
                (None, None) => anyhow::bail!("nothing to spectate"),
            };
            let replayer = Replayer::new(match_log)
                .with_context(|| format!("cannot replay {}", source))?;
            let delay = delay_ms.map(Duration::from_millis).unwrap_or(REPLAY_STEP_DELAY);
            ui::print_match(&replayer);
            let mut slot = ReplaySlot::new();
            slot.start(replayer, delay, ui::print_match).await;
            let finished = tokio::select! {
                r = slot.join() => r?,
                _ = tokio::signal::ctrl_c() => None,
            };
            match finished.and_then(|r| r.log().winner().cloned()) {
                Some(winner) => println!("\nWinner: {}", winner),
                None => println!("\nNo winner recorded"),
            }
        }
        Commands::Games { records } => {
            print!("{}", ui::render_games(&read_records(&records)?));
        }
        Commands::Leaderboard { records } => {
            let records = read_records(&records)?;
            print!("{}", ui::render_leaderboard(&ui::leaderboard(&records)));
        }
    }
    Ok(())
}
