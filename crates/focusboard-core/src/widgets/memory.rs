//! Memory matching game: six pairs dealt face down, flip two at a time.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

pub const SYMBOL_POOL: [&str; 10] = ["📖", "✏️", "🎓", "🧪", "🔬", "🌍", "🎨", "🎵", "💻", "🧮"];
pub const PAIRS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardState {
    Hidden,
    Flipped,
    Matched,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub symbol: &'static str,
    pub state: CardState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Locked board, bad index, or card already face up.
    Ignored,
    /// First card of a pair turned over.
    Flipped,
    Matched { won: bool },
    /// Second card differs; the board stays locked until [`MemoryGame::settle`].
    Mismatch,
}

#[derive(Debug, Clone)]
pub struct MemoryGame {
    cards: Vec<Card>,
    flipped: Vec<usize>,
    moves: u32,
    matched_pairs: usize,
    locked: bool,
}

impl MemoryGame {
    /// Deal a fresh board: pick [`PAIRS`] symbols, duplicate, shuffle.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut pool = SYMBOL_POOL;
        pool.shuffle(rng);
        let mut symbols: Vec<&'static str> = pool[..PAIRS]
            .iter()
            .chain(pool[..PAIRS].iter())
            .copied()
            .collect();
        symbols.shuffle(rng);
        Self::with_symbols(symbols)
    }

    /// Board with a fixed layout.
    pub fn with_symbols(symbols: Vec<&'static str>) -> Self {
        Self {
            cards: symbols
                .into_iter()
                .map(|symbol| Card {
                    symbol,
                    state: CardState::Hidden,
                })
                .collect(),
            flipped: Vec::with_capacity(2),
            moves: 0,
            matched_pairs: 0,
            locked: false,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_won(&self) -> bool {
        self.matched_pairs * 2 == self.cards.len()
    }

    pub fn win_message(&self) -> String {
        format!("You matched all pairs in {} moves!", self.moves)
    }

    pub fn flip(&mut self, index: usize) -> FlipOutcome {
        if self.locked {
            return FlipOutcome::Ignored;
        }
        match self.cards.get_mut(index) {
            Some(card) if card.state == CardState::Hidden => card.state = CardState::Flipped,
            _ => return FlipOutcome::Ignored,
        }
        self.flipped.push(index);
        if self.flipped.len() < 2 {
            return FlipOutcome::Flipped;
        }

        self.moves += 1;
        let (a, b) = (self.flipped[0], self.flipped[1]);
        if self.cards[a].symbol == self.cards[b].symbol {
            self.cards[a].state = CardState::Matched;
            self.cards[b].state = CardState::Matched;
            self.matched_pairs += 1;
            self.flipped.clear();
            FlipOutcome::Matched {
                won: self.is_won(),
            }
        } else {
            self.locked = true;
            FlipOutcome::Mismatch
        }
    }

    /// Turn a mismatched pair back over and unlock the board.
    pub fn settle(&mut self) {
        for index in self.flipped.drain(..) {
            if let Some(card) = self.cards.get_mut(index) {
                if card.state == CardState::Flipped {
                    card.state = CardState::Hidden;
                }
            }
        }
        self.locked = false;
    }
}
