use clap::Parser;
use env_logger::Env;
use game_2048::selfplay::{self, EpisodeSummary};
use game_2048::{Board, EngineConfig};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

#[derive(Parser, Debug)]
#[command(
    name = "game-2048",
    version,
    about = "Play random-policy 2048 episodes and report scores"
)]
struct Args {
    /// Board side length
    #[arg(long, default_value_t = 4)]
    size: usize,
    /// Base seed; episode i uses seed + i. Omit for non-reproducible runs
    #[arg(long)]
    seed: Option<u64>,
    /// Number of independent episodes
    #[arg(short = 'n', long, default_value_t = 1)]
    episodes: usize,
    /// Stop each episode after this many moves
    #[arg(long)]
    max_moves: Option<u64>,
    /// Worker threads (defaults to rayon's choice)
    #[arg(long)]
    threads: Option<usize>,
    /// Emit one JSON object per episode instead of text
    #[arg(long)]
    json: bool,
    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new().num_threads(n).build_global()?;
    }

    let config = EngineConfig::new(args.size, args.seed);
    config.validate()?;
    info!(
        "running {} episode(s) on a {}x{} board (seed: {:?})",
        args.episodes, config.size, config.size, config.seed
    );

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(args.episodes as u64);
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} episodes ({eta})")?
                .progress_chars("=>-"),
        );
        pb
    };

    let results = selfplay::run_episodes(&config, args.episodes, args.max_moves, |_| pb.inc(1))?;
    pb.finish_and_clear();

    for summary in &results {
        if args.json {
            println!("{}", serde_json::to_string(summary)?);
        } else {
            print_summary(summary)?;
        }
    }

    if !args.json && results.len() > 1 {
        let total: u64 = results.iter().map(|s| s.score).sum();
        println!("Mean score: {:.1}", total as f64 / results.len() as f64);
    }
    Ok(())
}

fn print_summary(s: &EpisodeSummary) -> anyhow::Result<()> {
    let board = Board::from_rows(&s.final_board)?;
    println!("{board}");
    println!(
        "Episode {} | score: {} | moves: {} | highest tile: {}{}",
        s.episode,
        s.score,
        s.moves,
        s.highest_tile,
        if s.hit_tile_cap {
            " | stopped at tile ceiling"
        } else if s.stuck {
            ""
        } else {
            " | stopped at move cap"
        }
    );
    Ok(())
}
