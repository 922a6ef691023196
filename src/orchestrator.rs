use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;

use crate::solver::{CancellationToken, Solution, Solver, Table};

/// What the chart is allowed to see. `Solving` keeps the previously accepted
/// solution (if any) so the chart stays populated while a newer query runs.
#[derive(Debug, Clone)]
pub enum SolveState {
    Idle,
    Solving(Option<Arc<Solution>>),
    Succeeded(Arc<Solution>),
    Failed(Option<String>),
}

impl SolveState {
    pub fn solution(&self) -> Option<&Arc<Solution>> {
        match self {
            SolveState::Solving(Some(solution)) | SolveState::Succeeded(solution) => Some(solution),
            _ => None,
        }
    }
}

struct Inner {
    state: SolveState,
    last_input: Option<Table>,
    token: Option<CancellationToken>,
}

/// Re-invokes the solver whenever the observed table changes, suppressing
/// results that arrive after newer input superseded them. At most one
/// accepted result is ever visible.
pub struct SolveOrchestrator {
    solver: Arc<dyn Solver>,
    inner: Arc<Mutex<Inner>>,
}

impl SolveOrchestrator {
    pub fn new(solver: Arc<dyn Solver>) -> SolveOrchestrator {
        SolveOrchestrator {
            solver,
            inner: Arc::new(Mutex::new(Inner {
                state: SolveState::Idle,
                last_input: None,
                token: None,
            })),
        }
    }

    pub fn state(&self) -> SolveState {
        self.inner.lock().unwrap().state.clone()
    }

    /// Feeds the orchestrator a snapshot of the current selection. A table
    /// equal by value to the last observed one is a no-op and returns `None`;
    /// otherwise the outstanding call (if any) is cancelled, a fresh solve is
    /// spawned, and its join handle returned.
    pub fn observe(&self, table: &Table) -> Option<JoinHandle<()>> {
        let token = {
            let mut inner = self.inner.lock().unwrap();
            if inner.last_input.as_ref() == Some(table) {
                return None;
            }
            if let Some(stale) = inner.token.take() {
                stale.cancel();
            }
            let token = CancellationToken::new();
            inner.token = Some(token.clone());
            inner.last_input = Some(table.clone());
            let previous = inner.state.solution().cloned();
            inner.state = SolveState::Solving(previous);
            token
        };

        let solver = Arc::clone(&self.solver);
        let inner = Arc::clone(&self.inner);
        let table = table.clone();
        Some(tokio::spawn(async move {
            let result = solver.solve(&token, &table).await;
            let mut inner = inner.lock().unwrap();
            // A cancelled token means a newer cycle owns the state now.
            if token.is_cancelled() {
                return;
            }
            inner.token = None;
            inner.state = match result {
                Ok(solution) => SolveState::Succeeded(Arc::new(solution)),
                Err(err) => SolveState::Failed(err.message().map(str::to_string)),
            };
        }))
    }
}

impl Drop for SolveOrchestrator {
    fn drop(&mut self) {
        if let Some(token) = self.inner.lock().unwrap().token.take() {
            token.cancel();
        }
    }
}
