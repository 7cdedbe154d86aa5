use adaptive_chess_engine::{
    AdaptiveEngine, AnyEngine, GameSession, HyperbolicConfig, HyperbolicEngine, MoveSelector,
    Player,
};
use clap::{Parser, ValueEnum};
use std::time::Instant;

/// Play the adaptive engine against an opponent engine and print the move
/// log with skill telemetry.
#[derive(Parser)]
#[command(name = "demo", about = "Adaptive chess engine demo game")]
struct Args {
    /// Seed for both engines (reproducible games)
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Maximum number of full moves before the demo stops
    #[arg(long, default_value_t = 60)]
    max_moves: u32,

    /// Engine playing the AI side
    #[arg(long, value_enum, default_value_t = EngineChoice::Adaptive)]
    engine: EngineChoice,

    /// Engine simulating the opponent side
    #[arg(long, value_enum, default_value_t = EngineChoice::Hyperbolic)]
    opponent: EngineChoice,

    /// Hyperbolic personality: temperature
    #[arg(long, default_value_t = 1.2)]
    temperature: f32,

    /// Hyperbolic personality: risk factor
    #[arg(long, default_value_t = 1.5)]
    risk_factor: f32,

    /// Dump the move records as JSON instead of the text log
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum EngineChoice {
    Adaptive,
    Hyperbolic,
}

fn build_engine(choice: EngineChoice, args: &Args, seed: u64) -> AnyEngine {
    match choice {
        EngineChoice::Adaptive => AnyEngine::Adaptive(AdaptiveEngine::with_seed(seed)),
        EngineChoice::Hyperbolic => {
            let config = HyperbolicConfig {
                temperature: args.temperature,
                risk_factor: args.risk_factor,
            };
            AnyEngine::Hyperbolic(HyperbolicEngine::with_seed(config, seed))
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // The AI plays White through the session; the opponent engine feeds its
    // moves in through the external-move path, exactly as a UI would.
    let mut session = GameSession::new(build_engine(args.engine, &args, args.seed), Player::White);
    let mut opponent = build_engine(args.opponent, &args, args.seed.wrapping_add(1));

    println!("Adaptive Chess Engine Demo");
    println!("==========================");
    println!(
        "white: {} (seed {}), black: opponent engine, up to {} moves",
        session.engine_name(),
        args.seed,
        args.max_moves
    );
    println!();

    for move_number in 1..=args.max_moves {
        if session.is_over() {
            break;
        }
        let Ok(Some(white)) = session.play_engine_move() else {
            break;
        };
        if !args.json {
            println!(
                "{:>3}. {:<7} eval {:+.2}  skill {:.1}  {:.2}s",
                move_number,
                white.san,
                white.evaluation,
                white.skill_level.unwrap_or_default(),
                white.time_taken_secs.unwrap_or_default()
            );
        }
        if session.is_over() {
            break;
        }

        let position = session.position();
        let start = Instant::now();
        let Some(reply) = opponent.choose_move(&position) else {
            break;
        };
        let elapsed = start.elapsed().as_secs_f64();
        match session.apply_opponent_move(&reply, elapsed) {
            Ok(black) => {
                if !args.json {
                    println!(
                        "     {:<7} eval {:+.2}  opponent skill {:.1} ({})",
                        black.san,
                        black.evaluation,
                        black.adaptive_skill.unwrap_or_default(),
                        session.opponent_style()
                    );
                }
            }
            Err(error) => {
                eprintln!("opponent move rejected: {}", error);
                break;
            }
        }
    }

    println!();
    match session.outcome() {
        Some(outcome) => println!("Game over: {}", outcome),
        None => println!("Move cap reached after {} records", session.records().len()),
    }
    println!(
        "Final opponent model: skill {:.1}, style {}, {} moves observed",
        session.skill_estimate(),
        session.opponent_style(),
        session.records().len() / 2
    );

    if args.json {
        match serde_json::to_string_pretty(session.records()) {
            Ok(json) => println!("{}", json),
            Err(error) => eprintln!("failed to serialize records: {}", error),
        }
    }
}
