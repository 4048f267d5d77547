//! Gambit CLI
//!
//! Play the engine in the terminal, watch it play itself, or analyse a
//! position.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use gambit_core::{render_move, Position, SearchLimits, MATE_LOWER};
use gambit_engine::{GambitEngine, Searcher};
use gambit_play::{
    eval_bar, GameMode, GameSession, MatchConfig, MatchRunner, PlayConfig, PlayError, CONFIG_FILE,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn print_usage() {
    println!("gambit - a king-capture chess engine");
    println!();
    println!("Usage:");
    println!("  gambit play [--black | --pvp] [--time MS] [--eval] [--no-book] [--unicode]");
    println!("  gambit selfplay [--games N] [--time MS] [--depth D] [--max-plies N] [--save FILE]");
    println!("  gambit analyse [FEN] [--time MS] [--depth D]");
    println!();
    println!("Every command accepts --config FILE (default: {CONFIG_FILE} if present).");
    println!("There is no checkmate: a game ends when a king is captured.");
}

fn print_play_help() {
    println!("Enter moves as e2e4, Ng1f3 or Nf3. Other commands:");
    println!("  board     show the board");
    println!("  log       show the move list");
    println!("  eval      toggle the eval bar");
    println!("  takeback  undo your last move");
    println!("  quit      leave the game");
}

/// Flags shared by every command, in the order they may appear.
#[derive(Debug, Default)]
struct Flags {
    config: Option<PathBuf>,
    time_ms: Option<u64>,
    depth: Option<u32>,
    games: Option<u32>,
    max_plies: Option<u32>,
    save: Option<PathBuf>,
    mode: Option<GameMode>,
    eval: bool,
    no_book: bool,
    unicode: bool,
    positional: Vec<String>,
}

fn value<T: FromStr>(args: &[String], i: usize, flag: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let text = args.get(i + 1).with_context(|| format!("{flag} needs a value"))?;
    text.parse()
        .with_context(|| format!("invalid value {text:?} for {flag}"))
}

fn parse_flags(args: &[String]) -> Result<Flags> {
    let mut flags = Flags::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                flags.config = Some(value(args, i, "--config")?);
                i += 1;
            }
            "--time" | "-t" => {
                flags.time_ms = Some(value(args, i, "--time")?);
                i += 1;
            }
            "--depth" | "-d" => {
                flags.depth = Some(value(args, i, "--depth")?);
                i += 1;
            }
            "--games" | "-g" => {
                flags.games = Some(value(args, i, "--games")?);
                i += 1;
            }
            "--max-plies" => {
                flags.max_plies = Some(value(args, i, "--max-plies")?);
                i += 1;
            }
            "--save" => {
                flags.save = Some(value(args, i, "--save")?);
                i += 1;
            }
            "--white" => flags.mode = Some(GameMode::PlayerWhite),
            "--black" => flags.mode = Some(GameMode::PlayerBlack),
            "--pvp" => flags.mode = Some(GameMode::PlayerVsPlayer),
            "--eval" => flags.eval = true,
            "--no-book" => flags.no_book = true,
            "--unicode" | "-u" => flags.unicode = true,
            other if other.starts_with('-') => bail!("unknown option {other}"),
            other => flags.positional.push(other.to_string()),
        }
        i += 1;
    }
    Ok(flags)
}

/// Config file values with command-line flags on top.
fn load_config(flags: &Flags) -> Result<PlayConfig> {
    let mut config = match &flags.config {
        Some(path) => PlayConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => PlayConfig::load_or_default(Path::new(CONFIG_FILE)).context("loading default config")?,
    };
    if let Some(ms) = flags.time_ms {
        config.thinking_time_ms = ms;
    }
    if let Some(plies) = flags.max_plies {
        config.max_plies = plies;
    }
    if flags.eval {
        config.show_eval = true;
    }
    if flags.no_book {
        config.use_opening_book = false;
    }
    Ok(config)
}

fn run_play(args: &[String]) -> Result<()> {
    let flags = parse_flags(args)?;
    let config = load_config(&flags)?;
    let mode = flags.mode.unwrap_or(GameMode::PlayerWhite);
    let engine = GambitEngine::with_config(config.search.clone());
    let mut game = GameSession::new(mode, config, Box::new(engine));

    print_play_help();
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        if game.is_engine_turn() {
            let reply = game.engine_move().context("engine move")?;
            match &reply.search {
                Some(search) => println!(
                    "{}: {} (depth {}, score {})",
                    reply.played.side, reply.played.record, search.depth, search.score
                ),
                None => println!("{}: {} (book)", reply.played.side, reply.played.record),
            }
        }

        println!("{}", game.render(flags.unicode));
        if let Some(winner) = game.winner() {
            match game.mode().engine_side() {
                Some(engine) if engine == winner => println!("The engine took your king. You lose!"),
                Some(_) => println!("You took the king. You win!"),
                None => println!("{winner} wins!"),
            }
            println!("{}", game.log_text());
            return Ok(());
        }

        print!("{} to move> ", game.side_to_move());
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        match line.trim() {
            "" => {}
            "quit" | "exit" | "resign" => return Ok(()),
            "help" => print_play_help(),
            "board" => {}
            "log" | "history" => println!("{}", game.log_text()),
            "eval" => {
                let show = !game.config().show_eval;
                game.config_mut().show_eval = show;
                println!("Eval bar is {}.", if show { "ON" } else { "OFF" });
            }
            "takeback" | "undo" => match game.takeback() {
                Ok(plies) => println!("Took back {plies} ply."),
                Err(e) => println!("Cannot take back: {e}"),
            },
            text => match game.play(text) {
                Ok(played) => println!("{}: {}", played.side, played.record),
                Err(PlayError::Notation(e)) => println!("{e}"),
                Err(e) => return Err(e.into()),
            },
        }
    }
}

fn run_selfplay(args: &[String]) -> Result<()> {
    let flags = parse_flags(args)?;
    let config = load_config(&flags)?;

    let match_config = MatchConfig {
        num_games: flags.games.unwrap_or(2),
        depth: flags.depth.unwrap_or(u32::MAX),
        time_per_move: Some(config.thinking_time()),
        max_plies: config.max_plies,
        alternate_colors: true,
    };
    println!(
        "=== Self-play: {} games, {} ms per move ===",
        match_config.num_games, config.thinking_time_ms
    );

    let mut engine1 = GambitEngine::with_config(config.search.clone());
    let mut engine2 = GambitEngine::with_config(config.search.clone());
    let report = MatchRunner::new(match_config).run_match(&mut engine1, &mut engine2);

    println!();
    println!("{}", report.generate_report());
    if let Some(path) = &flags.save {
        report
            .save(path)
            .with_context(|| format!("saving results to {}", path.display()))?;
        println!("Results saved to {}", path.display());
    }
    Ok(())
}

fn run_analyse(args: &[String]) -> Result<()> {
    let flags = parse_flags(args)?;
    let config = load_config(&flags)?;

    let (pos, white_to_move) = if flags.positional.is_empty() {
        (Position::startpos(), true)
    } else {
        let fen = flags.positional.join(" ");
        let pos = Position::from_fen(&fen).with_context(|| format!("parsing FEN {fen:?}"))?;
        let white = fen.split_whitespace().nth(1) != Some("b");
        (pos, white)
    };
    println!("{}", pos.diagram(white_to_move, flags.unicode));

    let limits = match flags.depth {
        Some(depth) => SearchLimits::depth_and_time(depth, config.thinking_time()),
        None => SearchLimits::time(config.thinking_time()),
    };
    limits.start();

    let mut searcher = Searcher::with_config(config.search.clone());
    let mut deepening = searcher.search(&pos, &[pos.clone()]);
    while let Some(it) = deepening.next() {
        let best = it
            .best_move
            .map_or_else(|| "-".to_string(), |m| render_move(m, white_to_move));
        let white_score = if white_to_move { it.score } else { -it.score };
        let mate = if it.score.abs() >= MATE_LOWER { " (king falls)" } else { "" };
        println!(
            "depth {:>3}  score {:>6}{mate}  best {best}  nodes {}  {}",
            it.depth,
            it.score,
            deepening.nodes(),
            eval_bar(white_score)
        );
        if !limits.should_deepen(it.depth) {
            break;
        }
    }
    println!("time {:?}", limits.time_control.elapsed());
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env().add_directive("gambit=info".parse()?))
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    match args[1].as_str() {
        "play" => run_play(&args[2..]),
        "selfplay" | "self-play" => run_selfplay(&args[2..]),
        "analyse" | "analyze" => run_analyse(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            print_usage();
            bail!("unknown command: {other}")
        }
    }
}
