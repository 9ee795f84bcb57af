#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    time::Duration,
};

#[cfg(feature = "std")]
use broadside::{
    heatmap, init_logging,
    ui::{coord_to_string, parse_coord, render_fleet, render_grid, render_heatmap},
    AiShot, AiTurnDriver, Difficulty, GameConfig, Match, MatchError, MatchState, Scoreboard, Side,
    TurnEnd, DEFAULT_BOARD_SIZE,
};
#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use rand::{rngs::SmallRng, SeedableRng};
#[cfg(feature = "std")]
use tokio::sync::Mutex;

#[derive(Parser)]
#[command(author, version, about = "Battleship against a computer opponent", long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play a match in the terminal.
    Play {
        /// easy, medium or hard
        #[arg(long, default_value_t = Difficulty::Easy)]
        difficulty: Difficulty,
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
        size: usize,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 350, help = "Pause between chained enemy shots")]
        delay_ms: u64,
        #[arg(long, default_value = "broadside-scores.json")]
        scores: PathBuf,
        #[arg(long, help = "Skip manual placement and deploy both fleets at random")]
        auto_place: bool,
    },
    /// Show or clear the win/loss tallies.
    Scores {
        #[arg(long, default_value = "broadside-scores.json")]
        scores: PathBuf,
        #[arg(long)]
        reset: bool,
    },
}

#[cfg(feature = "std")]
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            difficulty,
            size,
            seed,
            delay_ms,
            scores,
            auto_place,
        } => {
            let config = GameConfig::new(size)?.with_ai_delay(Duration::from_millis(delay_ms));
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let mut rng = match seed {
                Some(s) => SmallRng::seed_from_u64(s),
                None => SmallRng::from_rng(&mut rand::rng()),
            };
            let game = if auto_place {
                Match::with_random_fleets(config, difficulty, &mut rng)
            } else {
                Match::new(config, difficulty, &mut rng)
            };
            play(game, &mut rng, &scores).await?;
        }
        Commands::Scores { scores, reset } => {
            let mut board = Scoreboard::load(&scores)?;
            if reset {
                board.reset();
                board.save(&scores)?;
                println!("Scores cleared.");
            }
            println!("{}", board);
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
enum Command {
    Target((usize, usize)),
    Peek((usize, usize)),
    Rotate,
    Random,
    SetDifficulty(Difficulty),
    Heat,
    Scores,
    Board,
    Restart,
    Help,
    Quit,
}

#[cfg(feature = "std")]
fn parse_command(input: &str, size: usize) -> Result<Command, String> {
    let mut words = input.split_whitespace();
    let head = words.next().unwrap_or("").to_ascii_lowercase();
    let arg = words.next();
    Ok(match (head.as_str(), arg) {
        ("help" | "?" | "h", _) => Command::Help,
        ("quit" | "exit" | "q", _) => Command::Quit,
        ("restart" | "new", _) => Command::Restart,
        ("rotate" | "r", _) => Command::Rotate,
        ("random" | "randomize" | "rand", _) => Command::Random,
        ("heat", _) => Command::Heat,
        ("scores", _) => Command::Scores,
        ("board" | "", _) => Command::Board,
        ("difficulty", Some(level)) => {
            Command::SetDifficulty(level.parse().map_err(|e| format!("{}", e))?)
        }
        ("peek", Some(coord)) => Command::Peek(parse_coord(coord, size)?),
        ("fire" | "place", Some(coord)) => Command::Target(parse_coord(coord, size)?),
        (coord, None) => Command::Target(parse_coord(coord, size)?),
        (other, Some(_)) => return Err(format!("unknown command '{}', type help", other)),
    })
}

#[cfg(feature = "std")]
const HELP: &str = "Commands:
    <coord>             place the next ship (placement) or fire (battle), e.g. B7
    peek <coord>        show the cells the next ship would cover
    rotate              toggle horizontal/vertical placement
    random              place the remaining ships at random
    difficulty <level>  easy, medium or hard (placement only)
    heat                show the hard strategy's heatmap of the enemy board
    scores              show win/loss tallies
    board               redraw the boards
    restart             start a new match
    quit                leave";

#[cfg(feature = "std")]
async fn play(game: Match, rng: &mut SmallRng, scores_path: &Path) -> anyhow::Result<()> {
    let mut scores = Scoreboard::load(scores_path)?;
    let size = game.config().board_size();
    let driver = AiTurnDriver::new(game.config().ai_delay());
    let game = Mutex::new(game);

    println!("Type help for commands.");
    show(&*game.lock().await);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if game.lock().await.state() == MatchState::AiTurn {
            let end = driver
                .run(&game, rng, |g, shot| match shot {
                    AiShot::Fired { coord, .. } => {
                        println!("Enemy fires at {}. {}", coord_to_string(*coord), g.last_event())
                    }
                    AiShot::NoLegalMove => println!("{}", g.last_event()),
                })
                .await?;
            if end != TurnEnd::Cancelled {
                show(&*game.lock().await);
            }
        }

        let finished: Vec<_> = {
            let mut g = game.lock().await;
            std::iter::from_fn(|| g.take_concluded()).collect()
        };
        for event in &finished {
            scores.record(event);
            scores.save(scores_path)?;
        }

        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };
        let command = match parse_command(&line?, size) {
            Ok(command) => command,
            Err(msg) => {
                println!("{}", msg);
                continue;
            }
        };

        let mut g = game.lock().await;
        let result = match command {
            Command::Quit => return Ok(()),
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
            Command::Scores => {
                println!("{}", scores);
                continue;
            }
            Command::Board => Ok(()),
            Command::Heat => {
                let enemy = g.board(Side::Ai);
                let heat = heatmap(enemy.grid(), &enemy.fleet().remaining_lengths());
                println!("{}", render_heatmap(&heat, enemy.grid()));
                continue;
            }
            Command::Peek((r, c)) => {
                match g.preview(r, c) {
                    Some(p) => {
                        let cells: Vec<_> = p.cells.iter().map(|&x| coord_to_string(x)).collect();
                        let verdict = if p.valid { "fits" } else { "does not fit" };
                        println!("{} {}", cells.join(" "), verdict);
                    }
                    None => println!("Nothing left to place."),
                }
                continue;
            }
            Command::Rotate => g
                .rotate()
                .map(|o| println!("Placing {}.", o)),
            Command::Random => g.place_rest(rng),
            Command::SetDifficulty(d) => g.set_difficulty(d),
            Command::Restart => {
                g.reset(rng);
                Ok(())
            }
            Command::Target((r, c)) => match g.state() {
                MatchState::Placement => g.place_next(r, c).map(|_| ()),
                _ => g.fire(r, c).map(|_| ()),
            },
        };
        match result {
            Ok(()) => show(&g),
            Err(MatchError::Shot(e)) => println!("Can't fire there: {}.", e),
            Err(e) => println!("{}", e),
        }
    }
}

#[cfg(feature = "std")]
fn show(game: &Match) {
    let reveal_enemy = game.winner().is_some();
    let enemy = game.board(Side::Ai);
    let own = game.board(Side::Player);
    println!("\nEnemy board ({}):", game.difficulty());
    print!("{}", render_grid(enemy.grid(), reveal_enemy));
    print!("{}", render_fleet(enemy.fleet(), reveal_enemy));
    println!("\nYour board:");
    print!("{}", render_grid(own.grid(), true));
    print!("{}", render_fleet(own.fleet(), true));

    let status = match game.state() {
        MatchState::Placement => match game.next_ship() {
            Some((_, def)) => format!(
                "Placing {} ({}), {}",
                def.name(),
                def.length(),
                game.orientation()
            ),
            None => "Placing ships".to_string(),
        },
        MatchState::PlayerTurn => "Your turn".to_string(),
        MatchState::AiTurn => "Enemy turn".to_string(),
        MatchState::GameOver { winner: Side::Player } => "Game over: you win!".to_string(),
        MatchState::GameOver { winner: Side::Ai } => "Game over: you lose.".to_string(),
    };
    println!("\nStatus: {}", status);
    if !game.last_event().is_empty() {
        println!("{}", game.last_event());
    }
}
