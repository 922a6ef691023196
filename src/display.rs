use colored::Colorize;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::cards::{Card, Suit, ALL_RANKS, ALL_SUITS};
use crate::chart::{win_lose_counts, RenderModel, SegmentKind};
use crate::selection::{Group, SelectionCoordinator};
use crate::solver::Solution;

pub fn card_text(card: Card) -> String {
    let text = format!("{}{}", card.rank.to_char(), card.suit.symbol());
    match card.suit {
        Suit::Hearts => text.red().to_string(),
        Suit::Diamonds => text.blue().to_string(),
        Suit::Spades => text.white().to_string(),
        Suit::Clubs => text.green().to_string(),
    }
}

fn group_line(coordinator: &SelectionCoordinator, group: Group) -> String {
    let collection = coordinator.group(group);
    collection
        .cards()
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let text = match slot {
                Some(card) => card_text(*card),
                None => "__".dimmed().to_string(),
            };
            if collection.active_slot() == Some(i) {
                format!("[{}]", text)
            } else {
                format!(" {} ", text)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn selection_line(coordinator: &SelectionCoordinator) -> String {
    format!(
        "{} {}   {} {}",
        "Hand:".bold(),
        group_line(coordinator, Group::Hand),
        "Board:".bold(),
        group_line(coordinator, Group::Board),
    )
}

/// Samples the normalized chart geometry into a character grid: loss red,
/// tie yellow, win green, own-hand marker white.
pub fn chart_grid(model: &RenderModel, cols: usize, rows: usize) -> String {
    let mut out = String::new();
    for row in 0..rows {
        // Sample from the top of the chart downwards.
        let y = (rows - row) as f64 / rows as f64 - 0.5 / rows as f64;
        for col in 0..cols {
            let x = (col as f64 + 0.5) / cols as f64;
            let in_marker = x >= model.marker.x && x < model.marker.x + model.marker.width;
            if in_marker {
                out.push_str(&"\u{2588}".white().bold().to_string());
                continue;
            }
            let hit = model
                .segments
                .iter()
                .find(|s| x >= s.x && x < s.x + s.width && y >= s.y && y < s.y + s.height);
            match hit.map(|s| s.kind) {
                Some(SegmentKind::Loss) => out.push_str(&"\u{2588}".red().to_string()),
                Some(SegmentKind::Tie) => out.push_str(&"\u{2588}".yellow().to_string()),
                Some(SegmentKind::Win) => out.push_str(&"\u{2588}".green().to_string()),
                None => out.push(' '),
            }
        }
        out.push('\n');
    }
    out
}

pub fn equity_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction * width as f64) as usize;
    let filled = filled.min(width);
    let bar: String = "\u{2588}".repeat(filled) + &"\u{2591}".repeat(width - filled);
    let pct = format!("{:.1}%", fraction * 100.0);

    if fraction >= 0.6 {
        format!("{} {}", bar.green(), pct)
    } else if fraction >= 0.4 {
        format!("{} {}", bar.yellow(), pct)
    } else {
        format!("{} {}", bar.red(), pct)
    }
}

pub fn summary_table(solution: &Solution) -> String {
    let n = solution.hands.len();
    let (win, lose) = win_lose_counts(solution);
    let tie = n - win - lose;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Metric").set_alignment(CellAlignment::Left),
        Cell::new("Value").set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Opposing hands".bold().to_string()),
        Cell::new(format!("{}", n)),
    ]);
    table.add_row(vec![
        Cell::new("Ahead of".bold().to_string()),
        Cell::new(format!("{}", win).green().to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Level with".bold().to_string()),
        Cell::new(format!("{}", tie).yellow().to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Behind".bold().to_string()),
        Cell::new(format!("{}", lose).red().to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Board completions".bold().to_string()),
        Cell::new(format!("{}", solution.board_possibilities)),
    ]);
    let share = if n == 0 {
        0.0
    } else {
        (win as f64 + tie as f64 / 2.0) / n as f64
    };
    table.add_row(vec![
        Cell::new("Rank position".bold().to_string()),
        Cell::new(equity_bar(share, 20)),
    ]);
    table.to_string()
}

/// 13x4 grid of the shared palette; taken cards are dimmed.
pub fn palette_grid(taken: &[Card]) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("")];
    for &r in ALL_RANKS.iter().rev() {
        header.push(Cell::new(r.to_char()).set_alignment(CellAlignment::Center));
    }
    table.set_header(header);

    for &suit in &ALL_SUITS {
        let mut row = vec![Cell::new(suit.symbol().bold().to_string())];
        for &rank in ALL_RANKS.iter().rev() {
            let card = Card::new(rank, suit);
            let cell = if taken.contains(&card) {
                Cell::new(card.notation().dimmed().to_string())
            } else {
                Cell::new(card_text(card))
            };
            row.push(cell.set_alignment(CellAlignment::Center));
        }
        table.add_row(row);
    }
    table.to_string()
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}
