use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;
use tokio::task::yield_now;

use winrate_cli::cards::parse_card;
use winrate_cli::orchestrator::{SolveOrchestrator, SolveState};
use winrate_cli::solver::{
    CancellationToken, HandResult, Solution, Solver, SolverError, Table,
};

fn solution(board_possibilities: u64) -> Solution {
    Solution {
        hands: vec![HandResult {
            hand: [parse_card("2h").unwrap(), parse_card("3h").unwrap()],
            beats_me_count: 0,
            is_beaten_count: 0,
        }],
        board_possibilities,
    }
}

fn table(hand: &str) -> Table {
    let cards = winrate_cli::cards::parse_hand(hand).unwrap();
    Table {
        hand: vec![Some(cards[0]), Some(cards[1])],
        board: vec![None; 5],
    }
}

/// Test solver that blocks each call on a gate and replays scripted
/// outcomes, recording how many calls it received and whether each call's
/// token was cancelled by the time it resolved.
struct ScriptedSolver {
    gate: Notify,
    script: Mutex<VecDeque<Result<Solution, SolverError>>>,
    calls: AtomicUsize,
    saw_cancelled: Mutex<Vec<bool>>,
}

impl ScriptedSolver {
    fn new(script: Vec<Result<Solution, SolverError>>) -> Arc<ScriptedSolver> {
        Arc::new(ScriptedSolver {
            gate: Notify::new(),
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
            saw_cancelled: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Solver for ScriptedSolver {
    async fn solve(&self, token: &CancellationToken, _table: &Table) -> Result<Solution, SolverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        self.saw_cancelled.lock().unwrap().push(token.is_cancelled());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(solution(1)))
    }
}

#[tokio::test]
async fn test_observe_solves_and_succeeds() {
    let solver = ScriptedSolver::new(vec![Ok(solution(990))]);
    let orchestrator = SolveOrchestrator::new(solver.clone());

    assert!(matches!(orchestrator.state(), SolveState::Idle));

    let handle = orchestrator.observe(&table("AhKh")).unwrap();
    assert!(matches!(orchestrator.state(), SolveState::Solving(None)));

    solver.gate.notify_one();
    handle.await.unwrap();

    match orchestrator.state() {
        SolveState::Succeeded(s) => assert_eq!(s.board_possibilities, 990),
        other => panic!("expected Succeeded, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unchanged_input_is_a_noop() {
    let solver = ScriptedSolver::new(vec![Ok(solution(1))]);
    let orchestrator = SolveOrchestrator::new(solver.clone());

    solver.gate.notify_one();
    let handle = orchestrator.observe(&table("AhKh")).unwrap();
    handle.await.unwrap();

    assert!(orchestrator.observe(&table("AhKh")).is_none());
    assert_eq!(solver.calls(), 1);
    assert!(matches!(orchestrator.state(), SolveState::Succeeded(_)));
}

#[tokio::test]
async fn test_stale_result_is_discarded() {
    let solver = ScriptedSolver::new(vec![Ok(solution(1)), Ok(solution(2))]);
    let orchestrator = SolveOrchestrator::new(solver.clone());

    let first = orchestrator.observe(&table("AhKh")).unwrap();
    yield_now().await;
    let second = orchestrator.observe(&table("QsQd")).unwrap();
    yield_now().await;

    solver.gate.notify_one();
    solver.gate.notify_one();
    first.await.unwrap();
    second.await.unwrap();

    // The first call raced to completion but its token was already
    // cancelled, so only the second result is visible.
    assert_eq!(solver.calls(), 2);
    assert_eq!(solver.saw_cancelled.lock().unwrap()[0], true);
    match orchestrator.state() {
        SolveState::Succeeded(s) => assert_eq!(s.board_possibilities, 2),
        other => panic!("expected Succeeded, got {:?}", other),
    }
}

#[tokio::test]
async fn test_stale_error_is_discarded() {
    let solver = ScriptedSolver::new(vec![
        Err(SolverError::Described("first call blew up".to_string())),
        Ok(solution(2)),
    ]);
    let orchestrator = SolveOrchestrator::new(solver.clone());

    let first = orchestrator.observe(&table("AhKh")).unwrap();
    yield_now().await;
    let second = orchestrator.observe(&table("QsQd")).unwrap();
    yield_now().await;

    solver.gate.notify_one();
    solver.gate.notify_one();
    first.await.unwrap();
    second.await.unwrap();

    assert!(matches!(orchestrator.state(), SolveState::Succeeded(_)));
}

#[tokio::test]
async fn test_solving_keeps_previous_solution() {
    let solver = ScriptedSolver::new(vec![Ok(solution(5)), Ok(solution(7))]);
    let orchestrator = SolveOrchestrator::new(solver.clone());

    solver.gate.notify_one();
    orchestrator.observe(&table("AhKh")).unwrap().await.unwrap();

    let handle = orchestrator.observe(&table("QsQd")).unwrap();
    match orchestrator.state() {
        SolveState::Solving(Some(previous)) => assert_eq!(previous.board_possibilities, 5),
        other => panic!("expected Solving with previous solution, got {:?}", other),
    }

    solver.gate.notify_one();
    handle.await.unwrap();
    match orchestrator.state() {
        SolveState::Succeeded(s) => assert_eq!(s.board_possibilities, 7),
        other => panic!("expected Succeeded, got {:?}", other),
    }
}

#[tokio::test]
async fn test_described_failure_surfaces_message() {
    let solver = ScriptedSolver::new(vec![Err(SolverError::Described("deck on fire".to_string()))]);
    let orchestrator = SolveOrchestrator::new(solver.clone());

    solver.gate.notify_one();
    orchestrator.observe(&table("AhKh")).unwrap().await.unwrap();

    match orchestrator.state() {
        SolveState::Failed(Some(message)) => assert_eq!(message, "deck on fire"),
        other => panic!("expected Failed with message, got {:?}", other),
    }
}

#[tokio::test]
async fn test_opaque_failure_has_no_message() {
    let solver = ScriptedSolver::new(vec![Err(SolverError::Opaque)]);
    let orchestrator = SolveOrchestrator::new(solver.clone());

    solver.gate.notify_one();
    orchestrator.observe(&table("AhKh")).unwrap().await.unwrap();

    assert!(matches!(orchestrator.state(), SolveState::Failed(None)));
}

#[tokio::test]
async fn test_drop_cancels_outstanding_call() {
    let solver = ScriptedSolver::new(vec![Ok(solution(1))]);
    let orchestrator = SolveOrchestrator::new(solver.clone());

    let handle = orchestrator.observe(&table("AhKh")).unwrap();
    yield_now().await;
    drop(orchestrator);

    solver.gate.notify_one();
    handle.await.unwrap();
    assert_eq!(solver.saw_cancelled.lock().unwrap()[0], true);
}
