use crate::orchestrator::SolveState;
use crate::solver::Solution;

/// Fake hand count used by the placeholder chart so an empty or loading
/// state still draws a full-width baseline.
pub const PLACEHOLDER_HANDS: usize = 1000;
/// Floor on the own-hand marker width so a vanishingly thin rank band stays
/// visible.
pub const MIN_MARKER_WIDTH: f64 = 0.01;
/// The marker bleeds past the chart's vertical edges by this much.
pub const MARKER_OVERSHOOT: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// This opposing hand beats ours.
    Loss,
    Tie,
    /// This opposing hand is beaten.
    Win,
}

/// One rectangle of the stacked chart, normalized to [0,1] on both axes.
#[derive(Debug, Clone)]
pub struct Segment {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub kind: SegmentKind,
    /// Two-card text of the opposing hand, for hover/inspection.
    pub label: Option<String>,
}

/// Full-height own-hand marker, centered on the hand's rank position within
/// the distribution of all holdings.
#[derive(Debug, Clone)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone)]
pub struct RenderModel {
    pub segments: Vec<Segment>,
    pub marker: Marker,
    pub loading: bool,
    pub error: Option<String>,
}

/// Opposing hands we are strictly ahead of, respectively strictly behind,
/// counted over the hands sequence (not over board completions).
pub fn win_lose_counts(solution: &Solution) -> (usize, usize) {
    let win = solution
        .hands
        .iter()
        .filter(|h| h.is_beaten_count > h.beats_me_count)
        .count();
    let lose = solution
        .hands
        .iter()
        .filter(|h| h.beats_me_count > h.is_beaten_count)
        .count();
    (win, lose)
}

/// Pure function from orchestrator state to chart geometry. Never fails:
/// every state has a defined rendering.
pub fn render(state: &SolveState) -> RenderModel {
    match state {
        SolveState::Idle => placeholder(false, None),
        SolveState::Solving(None) => placeholder(true, None),
        SolveState::Solving(Some(solution)) => solved(solution, true, None),
        SolveState::Succeeded(solution) => solved(solution, false, None),
        SolveState::Failed(message) => placeholder(false, message.clone()),
    }
}

fn solved(solution: &Solution, loading: bool, error: Option<String>) -> RenderModel {
    let n = solution.hands.len();
    let b = solution.board_possibilities as f64;
    let width = 1.0 / n as f64;

    let mut segments = Vec::with_capacity(n * 3);
    for (i, hand) in solution.hands.iter().enumerate() {
        let x = i as f64 / n as f64;
        let label = Some(format!("{}{}", hand.hand[0], hand.hand[1]));
        let loss_h = hand.beats_me_count as f64 / b;
        let win_h = hand.is_beaten_count as f64 / b;
        let tie_h = 1.0 - loss_h - win_h;
        segments.push(Segment {
            x,
            y: 0.0,
            width,
            height: loss_h,
            kind: SegmentKind::Loss,
            label: label.clone(),
        });
        segments.push(Segment {
            x,
            y: loss_h,
            width,
            height: tie_h,
            kind: SegmentKind::Tie,
            label: label.clone(),
        });
        segments.push(Segment {
            x,
            y: loss_h + tie_h,
            width,
            height: win_h,
            kind: SegmentKind::Win,
            label,
        });
    }

    let (win_count, lose_count) = win_lose_counts(solution);
    let win_or_tie = n - lose_count;
    let marker_width = f64::max(
        MIN_MARKER_WIDTH,
        (win_or_tie - win_count) as f64 / n as f64,
    );
    let center = (win_count + win_or_tie) as f64 / (2.0 * n as f64);
    let marker = Marker {
        x: center - marker_width / 2.0,
        y: -MARKER_OVERSHOOT,
        width: marker_width,
        height: 1.0 + 2.0 * MARKER_OVERSHOOT,
    };

    RenderModel {
        segments,
        marker,
        loading,
        error,
    }
}

fn placeholder(loading: bool, error: Option<String>) -> RenderModel {
    let width = 1.0 / PLACEHOLDER_HANDS as f64;
    let mut segments = Vec::with_capacity(PLACEHOLDER_HANDS * 3);
    for i in 0..PLACEHOLDER_HANDS {
        let x = i as f64 / PLACEHOLDER_HANDS as f64;
        for kind in [SegmentKind::Loss, SegmentKind::Tie, SegmentKind::Win] {
            segments.push(Segment {
                x,
                y: 0.0,
                width,
                height: 0.0,
                kind,
                label: None,
            });
        }
    }
    RenderModel {
        segments,
        marker: Marker {
            x: -MARKER_OVERSHOOT,
            y: -MARKER_OVERSHOOT,
            width,
            height: 1.0 + 2.0 * MARKER_OVERSHOOT,
        },
        loading,
        error,
    }
}
