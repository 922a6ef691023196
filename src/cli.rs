use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::cards::{parse_board, parse_cards, parse_hand};
use crate::chart::render;
use crate::display::{chart_grid, palette_grid, print_error, selection_line, summary_table};
use crate::error::VizResult;
use crate::orchestrator::{SolveOrchestrator, SolveState};
use crate::selection::SelectionCoordinator;
use crate::solver::{MockSolver, PrecalculatedSolver, Solver};

const CHART_COLS: usize = 100;
const CHART_ROWS: usize = 16;

#[derive(Parser)]
#[command(
    name = "winrate",
    version = "1.0.0",
    about = "Winrate visualizer — how a hand fares against every possible holding."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the winrate chart for a hand from precalculated solutions
    Chart {
        /// Hole cards, e.g. AhKh
        #[arg(long)]
        hand: String,
        /// Community cards, e.g. 2s5d8c
        #[arg(long)]
        board: Option<String>,
        /// Precalculated preflop solutions JSON
        #[arg(long)]
        solutions: PathBuf,
    },
    /// Render a chart from a fake solver, to preview the visualization
    Demo {
        #[arg(long, default_value_t = 200)]
        hands: usize,
        #[arg(long, default_value_t = 7)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        delay_ms: u64,
    },
    /// Show the 52-card palette, dimming cards already in play
    Palette {
        /// Cards to mark as taken, e.g. AhKh2s
        #[arg(long)]
        taken: Option<String>,
    },
}

pub async fn run() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Chart {
            hand,
            board,
            solutions,
        } => cmd_chart(&hand, board.as_deref(), &solutions).await,
        Commands::Demo {
            hands,
            seed,
            delay_ms,
        } => cmd_demo(hands, seed, delay_ms).await,
        Commands::Palette { taken } => cmd_palette(taken.as_deref()),
    };
    if let Err(err) = result {
        print_error(&err.to_string());
        std::process::exit(1);
    }
}

fn build_selection(hand: &str, board: Option<&str>) -> VizResult<SelectionCoordinator> {
    let hand = parse_hand(hand)?;
    let board = board.map(parse_board).transpose()?.unwrap_or_default();

    let mut coordinator = SelectionCoordinator::new();
    for card in hand {
        coordinator.assign_card(card);
    }
    // Completing the hand opened the board's first slot.
    for card in board {
        coordinator.assign_card(card);
    }
    Ok(coordinator)
}

async fn run_and_print(coordinator: &SelectionCoordinator, solver: Arc<dyn Solver>) {
    let orchestrator = SolveOrchestrator::new(solver);
    if let Some(handle) = orchestrator.observe(&coordinator.table()) {
        let _ = handle.await;
    }
    let state = orchestrator.state();
    let model = render(&state);

    println!("{}", selection_line(coordinator));
    println!();
    print!("{}", chart_grid(&model, CHART_COLS, CHART_ROWS));
    if let Some(error) = &model.error {
        print_error(error);
    } else if matches!(&state, SolveState::Failed(None)) {
        print_error("solver unavailable");
    }
    if let Some(solution) = state.solution() {
        println!();
        println!("{}", summary_table(solution));
    }
}

async fn cmd_chart(hand: &str, board: Option<&str>, solutions: &Path) -> VizResult<()> {
    let coordinator = build_selection(hand, board)?;
    let solver = Arc::new(PrecalculatedSolver::from_file(solutions)?);
    run_and_print(&coordinator, solver).await;
    Ok(())
}

async fn cmd_demo(hands: usize, seed: u64, delay_ms: u64) -> VizResult<()> {
    let coordinator = build_selection("AhKh", None)?;
    let solver = Arc::new(MockSolver::new(seed, hands, Duration::from_millis(delay_ms)));
    println!("{}", "(fake data)".dimmed());
    run_and_print(&coordinator, solver).await;
    Ok(())
}

fn cmd_palette(taken: Option<&str>) -> VizResult<()> {
    let taken = taken.map(parse_cards).transpose()?.unwrap_or_default();
    println!("{}", palette_grid(&taken));
    Ok(())
}
