use broadside::{init_logging, simulate, Difficulty, GameConfig, DEFAULT_BOARD_SIZE};
use clap::Parser;
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

/// Measure how many shots each strategy needs to clear a random fleet.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Strategy to run; all three when omitted.
    #[arg(long)]
    difficulty: Option<Difficulty>,
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,
    #[arg(long, default_value_t = 1)]
    seed: u64,
    #[arg(long, default_value_t = 100)]
    games: usize,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();
    let config = GameConfig::new(args.size)?;
    let mut rng = SmallRng::seed_from_u64(args.seed);

    let tiers = match args.difficulty {
        Some(d) => vec![d],
        None => Difficulty::ALL.to_vec(),
    };
    let reports: Vec<_> = tiers
        .into_iter()
        .map(|d| simulate(d, &config, args.games, &mut rng))
        .collect();

    let summary: Vec<_> = reports
        .iter()
        .map(|r| {
            json!({
                "difficulty": r.difficulty,
                "games": r.games,
                "min": r.min_shots,
                "max": r.max_shots,
                "mean": r.mean_shots,
            })
        })
        .collect();
    let result = json!({ "board_size": config.board_size(), "seed": args.seed, "results": summary });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
