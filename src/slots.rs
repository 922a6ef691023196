use crate::cards::Card;

/// Whether an assignment left the group still accepting cards or wrapped past
/// its last slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOutcome {
    InProgress,
    Completed,
}

/// A fixed-size ordered run of card slots with at most one slot open for
/// editing. The hand is a 2-slot collection, the board a 5-slot one.
#[derive(Debug, Clone)]
pub struct SlotCollection {
    cards: Vec<Option<Card>>,
    active: Option<usize>,
}

impl SlotCollection {
    pub fn new(len: usize, initial_active: Option<usize>) -> SlotCollection {
        if let Some(i) = initial_active {
            assert!(i < len, "initial active slot {} out of range for {} slots", i, len);
        }
        SlotCollection {
            cards: vec![None; len],
            active: initial_active,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.iter().all(|c| c.is_none())
    }

    pub fn cards(&self) -> &[Option<Card>] {
        &self.cards
    }

    pub fn card_at(&self, index: usize) -> Option<Card> {
        self.cards[index]
    }

    pub fn active_slot(&self) -> Option<usize> {
        self.active
    }

    pub fn filled_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_some()).count()
    }

    /// Opens a slot for editing, dropping whatever card it held. `None`
    /// closes editing without touching any slot.
    pub fn select(&mut self, index: Option<usize>) {
        if let Some(i) = index {
            assert!(i < self.cards.len(), "slot {} out of range for {} slots", i, self.cards.len());
            self.cards[i] = None;
        }
        self.active = index;
    }

    /// Places a card at the active slot and advances it. Returns `None` when
    /// no slot is active (the card is ignored).
    pub fn assign(&mut self, card: Card) -> Option<AssignOutcome> {
        let slot = self.active?;
        self.cards[slot] = Some(card);
        let next = slot + 1;
        if next >= self.cards.len() {
            self.active = None;
            Some(AssignOutcome::Completed)
        } else {
            self.active = Some(next);
            Some(AssignOutcome::InProgress)
        }
    }

    /// Empties a slot without moving the active slot.
    pub fn clear(&mut self, index: usize) {
        assert!(index < self.cards.len(), "slot {} out of range for {} slots", index, self.cards.len());
        self.cards[index] = None;
    }
}
