use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::cards::{Card, FULL_DECK};
use crate::error::VizResult;

/// Cooperative cancellation flag shared between the orchestrator and an
/// in-flight solver call. Cancelling never interrupts the solver; it only
/// marks any result arriving under this token as stale.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> CancellationToken {
        CancellationToken::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// The full query sent to the solver: two hole-card slots and five board
/// slots, any of which may still be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub hand: Vec<Option<Card>>,
    pub board: Vec<Option<Card>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandResult {
    #[serde(rename = "h")]
    pub hand: [Card; 2],
    /// Board completions in which this opposing hand beats ours.
    #[serde(rename = "l")]
    pub beats_me_count: u64,
    /// Board completions in which this opposing hand loses to ours.
    #[serde(rename = "w")]
    pub is_beaten_count: u64,
}

impl HandResult {
    pub fn tie_count(&self, board_possibilities: u64) -> u64 {
        board_possibilities - self.beats_me_count - self.is_beaten_count
    }
}

/// One accepted solver result. Replaced wholesale, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// Every opposing two-card holding consistent with the known cards, in
    /// a solver-stable order.
    #[serde(rename = "h")]
    pub hands: Vec<HandResult>,
    #[serde(rename = "b")]
    pub board_possibilities: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrecalculatedSolution {
    #[serde(rename = "m")]
    pub my_hand: [Card; 2],
    #[serde(rename = "s")]
    pub solution: Solution,
}

/// Solver-side failure. Only described failures carry user-displayable text.
#[derive(Debug, Clone)]
pub enum SolverError {
    Described(String),
    Opaque,
}

impl SolverError {
    pub fn message(&self) -> Option<&str> {
        match self {
            SolverError::Described(msg) => Some(msg),
            SolverError::Opaque => None,
        }
    }
}

/// The external equity engine. Implementations must return hands in an
/// order that is stable across repeated calls with identical input, and may
/// consult the token to abandon work early.
#[async_trait]
pub trait Solver: Send + Sync {
    async fn solve(&self, token: &CancellationToken, table: &Table) -> Result<Solution, SolverError>;
}

/// Serves preflop solutions precalculated offline, one per representative
/// hand (pairs and offsuit hands as hearts+diamonds, suited hands as
/// hearts+hearts).
pub struct PrecalculatedSolver {
    solutions: Vec<PrecalculatedSolution>,
}

impl PrecalculatedSolver {
    pub fn new(solutions: Vec<PrecalculatedSolution>) -> PrecalculatedSolver {
        PrecalculatedSolver { solutions }
    }

    pub fn from_file(path: &Path) -> VizResult<PrecalculatedSolver> {
        let file = File::open(path)?;
        let solutions = serde_json::from_reader(BufReader::new(file))?;
        Ok(PrecalculatedSolver { solutions })
    }

    fn lookup(&self, hand: [Card; 2]) -> Option<&Solution> {
        let mut ranks = [hand[0].rank, hand[1].rank];
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        let suited = hand[0].suit == hand[1].suit && hand[0].rank != hand[1].rank;
        self.solutions
            .iter()
            .find(|p| {
                let mut rep = [p.my_hand[0].rank, p.my_hand[1].rank];
                rep.sort_unstable_by(|a, b| b.cmp(a));
                let rep_suited = p.my_hand[0].suit == p.my_hand[1].suit;
                rep == ranks && rep_suited == suited
            })
            .map(|p| &p.solution)
    }
}

#[async_trait]
impl Solver for PrecalculatedSolver {
    async fn solve(&self, token: &CancellationToken, table: &Table) -> Result<Solution, SolverError> {
        if token.is_cancelled() {
            return Err(SolverError::Opaque);
        }
        let first = table.hand.first().copied().flatten();
        let second = table.hand.get(1).copied().flatten();
        let (first, second) = match (first, second) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                let chosen = table.hand.iter().flatten().count();
                return Err(SolverError::Described(format!(
                    "Select both hole cards ({} of 2 chosen)",
                    chosen
                )));
            }
        };
        if table.board.iter().any(|c| c.is_some()) {
            return Err(SolverError::Described(
                "Precalculated solutions cover preflop only; clear the board".to_string(),
            ));
        }
        self.lookup([first, second]).cloned().ok_or_else(|| {
            SolverError::Described(format!("No precalculated solution for {}{}", first, second))
        })
    }
}

/// Deterministic fake solver for the demo subcommand. Produces a smooth
/// strength gradient across opposing hands so the chart has realistic shape.
pub struct MockSolver {
    seed: u64,
    hands: usize,
    delay: Duration,
}

impl MockSolver {
    pub fn new(seed: u64, hands: usize, delay: Duration) -> MockSolver {
        MockSolver { seed, hands, delay }
    }
}

#[async_trait]
impl Solver for MockSolver {
    async fn solve(&self, token: &CancellationToken, _table: &Table) -> Result<Solution, SolverError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if token.is_cancelled() {
            return Err(SolverError::Opaque);
        }
        // Reseeding per call keeps the hand order stable for identical input.
        let mut rng = StdRng::seed_from_u64(self.seed);
        let board_possibilities = 990u64;
        let n = self.hands.max(1);
        let hands = FULL_DECK
            .iter()
            .combinations(2)
            .take(n)
            .enumerate()
            .map(|(i, pair)| {
                let strength = i as f64 / n as f64;
                let jitter: f64 = rng.gen_range(-0.05..0.05);
                let beaten = ((strength + jitter).clamp(0.0, 0.95) * board_possibilities as f64) as u64;
                let ties = rng.gen_range(0..=(board_possibilities - beaten) / 10);
                HandResult {
                    hand: [*pair[0], *pair[1]],
                    beats_me_count: board_possibilities - beaten - ties,
                    is_beaten_count: beaten,
                }
            })
            .collect();
        Ok(Solution {
            hands,
            board_possibilities,
        })
    }
}
