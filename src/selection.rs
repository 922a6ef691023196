use crate::cards::{Card, BOARD_SIZE, HAND_SIZE};
use crate::slots::{AssignOutcome, SlotCollection};
use crate::solver::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Hand,
    Board,
}

/// What happened to a globally picked card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// No slot was open anywhere; the card was dropped.
    Ignored,
    /// The card landed and the same group is still collecting.
    InProgress(Group),
    /// The card filled the group's last slot.
    Completed(Group),
}

/// Owns the hand and board slot collections and keeps at most one of them
/// editable at a time. All selection mutations go through here.
#[derive(Debug, Clone)]
pub struct SelectionCoordinator {
    hand: SlotCollection,
    board: SlotCollection,
}

impl SelectionCoordinator {
    /// Starts with the hand's first slot open, matching a fresh session where
    /// the next picked card becomes the first hole card.
    pub fn new() -> SelectionCoordinator {
        SelectionCoordinator {
            hand: SlotCollection::new(HAND_SIZE, Some(0)),
            board: SlotCollection::new(BOARD_SIZE, None),
        }
    }

    pub fn group(&self, group: Group) -> &SlotCollection {
        match group {
            Group::Hand => &self.hand,
            Group::Board => &self.board,
        }
    }

    fn group_mut(&mut self, group: Group) -> &mut SlotCollection {
        match group {
            Group::Hand => &mut self.hand,
            Group::Board => &mut self.board,
        }
    }

    fn other(group: Group) -> Group {
        match group {
            Group::Hand => Group::Board,
            Group::Board => Group::Hand,
        }
    }

    pub fn active_group(&self) -> Option<Group> {
        if self.hand.active_slot().is_some() {
            Some(Group::Hand)
        } else if self.board.active_slot().is_some() {
            Some(Group::Board)
        } else {
            None
        }
    }

    /// Opens `index` in `group` for editing and closes editing everywhere
    /// else. `None` closes this group only.
    pub fn select_slot(&mut self, group: Group, index: Option<usize>) {
        self.group_mut(group).select(index);
        if index.is_some() {
            self.group_mut(Self::other(group)).select(None);
        }
    }

    /// Routes a card picked from the shared palette into whichever group is
    /// currently collecting. A completed hand hands editing over to the
    /// board's first slot.
    pub fn assign_card(&mut self, card: Card) -> PickOutcome {
        let Some(group) = self.active_group() else {
            return PickOutcome::Ignored;
        };
        match self.group_mut(group).assign(card) {
            Some(AssignOutcome::InProgress) => PickOutcome::InProgress(group),
            Some(AssignOutcome::Completed) => {
                if group == Group::Hand {
                    self.board.select(Some(0));
                }
                PickOutcome::Completed(group)
            }
            None => PickOutcome::Ignored,
        }
    }

    /// Empties one slot. Editing state is untouched.
    pub fn clear_slot(&mut self, group: Group, index: usize) {
        self.group_mut(group).clear(index);
    }

    /// Snapshot of the current hand and board, the solver's input.
    pub fn table(&self) -> Table {
        Table {
            hand: self.hand.cards().to_vec(),
            board: self.board.cards().to_vec(),
        }
    }

    /// Cards currently placed anywhere, for dimming the palette.
    pub fn taken_cards(&self) -> Vec<Card> {
        self.hand
            .cards()
            .iter()
            .chain(self.board.cards().iter())
            .flatten()
            .copied()
            .collect()
    }
}

impl Default for SelectionCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
