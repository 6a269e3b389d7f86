//! Flashcard decks and kanji drills.

use rand::rng;
use rand::seq::SliceRandom;

use goi_core::model::{DifficultyRating, KanjiEntry, SessionId, WordEntry};

use crate::error::FlashcardError;
use crate::progress::ProgressTracker;

//
// ─── CARD CURSOR ───────────────────────────────────────────────────────────────
//

/// Deck position state: which card faces up, whether it is flipped, and the
/// display order.
///
/// The deck itself stays untouched; shuffling permutes an index table, so
/// toggling the shuffle off restores the load order exactly. The table is
/// never empty because both session types refuse to start on an empty deck.
#[derive(Debug, Clone)]
pub struct CardCursor {
    display: Vec<usize>,
    position: usize,
    flipped: bool,
    shuffled: bool,
}

impl CardCursor {
    fn new(len: usize) -> Self {
        Self {
            display: (0..len).collect(),
            position: 0,
            flipped: false,
            shuffled: false,
        }
    }

    /// Index into the deck for the card currently facing up.
    #[must_use]
    pub fn current(&self) -> usize {
        self.display[self.position]
    }

    /// 0-based position within the display order.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    #[must_use]
    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    /// Moves forward one card, wrapping at the end. The next card always
    /// starts face down.
    pub fn next(&mut self) {
        self.position = (self.position + 1) % self.display.len();
        self.flipped = false;
    }

    /// Moves back one card, wrapping at the start. The next card always
    /// starts face down.
    pub fn prev(&mut self) {
        self.position = if self.position == 0 {
            self.display.len() - 1
        } else {
            self.position - 1
        };
        self.flipped = false;
    }

    /// Shuffles the display order, or restores the load order when already
    /// shuffled. Either way the cursor rewinds to the first card.
    pub fn toggle_shuffle(&mut self) {
        if self.shuffled {
            self.display = (0..self.display.len()).collect();
        } else {
            let mut rng = rng();
            self.display.shuffle(&mut rng);
        }
        self.shuffled = !self.shuffled;
        self.position = 0;
        self.flipped = false;
    }
}

//
// ─── FLASHCARD SESSION ─────────────────────────────────────────────────────────
//

/// One study run over a lesson's vocabulary cards.
pub struct FlashcardSession {
    id: SessionId,
    cards: Vec<WordEntry>,
    cursor: CardCursor,
}

impl FlashcardSession {
    /// Starts a session over the given cards.
    ///
    /// # Errors
    ///
    /// Returns `FlashcardError::Empty` when there are no cards.
    pub fn start(cards: Vec<WordEntry>) -> Result<Self, FlashcardError> {
        if cards.is_empty() {
            return Err(FlashcardError::Empty);
        }
        let cursor = CardCursor::new(cards.len());
        Ok(Self {
            id: SessionId::new(),
            cards,
            cursor,
        })
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The card currently facing up.
    #[must_use]
    pub fn current(&self) -> &WordEntry {
        &self.cards[self.cursor.current()]
    }

    #[must_use]
    pub fn cursor(&self) -> &CardCursor {
        &self.cursor
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn flip(&mut self) {
        self.cursor.flip();
    }

    pub fn next(&mut self) {
        self.cursor.next();
    }

    pub fn prev(&mut self) {
        self.cursor.prev();
    }

    pub fn toggle_shuffle(&mut self) {
        self.cursor.toggle_shuffle();
    }

    /// Records a rating for the face-up card, touches the study streak, and
    /// advances to the next card.
    ///
    /// # Errors
    ///
    /// Returns `FlashcardError::Tracker` when persisting fails; the cursor
    /// stays put so the card can be marked again.
    pub fn mark_difficulty(
        &mut self,
        tracker: &mut ProgressTracker,
        rating: DifficultyRating,
    ) -> Result<(), FlashcardError> {
        tracker.record_difficulty(self.current().id(), rating)?;
        tracker.record_study_session()?;
        self.cursor.next();
        Ok(())
    }
}

//
// ─── KANJI DRILL ───────────────────────────────────────────────────────────────
//

/// One study run over the kanji reference deck.
///
/// Kanji ratings are tracked apart from vocabulary and do not advance the
/// study streak.
pub struct KanjiDrill {
    id: SessionId,
    cards: Vec<KanjiEntry>,
    cursor: CardCursor,
}

impl KanjiDrill {
    /// Starts a drill over the given kanji cards.
    ///
    /// # Errors
    ///
    /// Returns `FlashcardError::Empty` when there are no cards.
    pub fn start(cards: Vec<KanjiEntry>) -> Result<Self, FlashcardError> {
        if cards.is_empty() {
            return Err(FlashcardError::Empty);
        }
        let cursor = CardCursor::new(cards.len());
        Ok(Self {
            id: SessionId::new(),
            cards,
            cursor,
        })
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The card currently facing up.
    #[must_use]
    pub fn current(&self) -> &KanjiEntry {
        &self.cards[self.cursor.current()]
    }

    #[must_use]
    pub fn cursor(&self) -> &CardCursor {
        &self.cursor
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn flip(&mut self) {
        self.cursor.flip();
    }

    pub fn next(&mut self) {
        self.cursor.next();
    }

    pub fn prev(&mut self) {
        self.cursor.prev();
    }

    pub fn toggle_shuffle(&mut self) {
        self.cursor.toggle_shuffle();
    }

    /// Records a rating for the face-up kanji and advances.
    ///
    /// # Errors
    ///
    /// Returns `FlashcardError::Tracker` when persisting fails; the cursor
    /// stays put so the card can be marked again.
    pub fn mark_difficulty(
        &mut self,
        tracker: &mut ProgressTracker,
        rating: DifficultyRating,
    ) -> Result<(), FlashcardError> {
        tracker.record_kanji_difficulty(self.current().id(), rating)?;
        self.cursor.next();
        Ok(())
    }
}
