//! Transposition table keyed by board value
//!
//! A fixed number of buckets, each a chain of handles into one arena of
//! owned entries. The table is the only owner of the boards it stores;
//! everything else refers to them through [`EntryId`] handles.

use crate::{
    config::SolverConfig,
    error::{Error, Result},
    solver::Outcome,
    tictactoe::BoardState,
};

/// Handle to an entry owned by a [`TranspositionTable`].
///
/// Handles are only meaningful for the table that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(usize);

impl EntryId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A stored position and its label
#[derive(Debug, Clone)]
pub struct Entry {
    board: BoardState,
    outcome: Outcome,
}

impl Entry {
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }
}

/// Memo table from board value to [`Outcome`]
#[derive(Debug, Clone)]
pub struct TranspositionTable {
    buckets: Vec<Vec<EntryId>>,
    entries: Vec<Entry>,
}

impl TranspositionTable {
    /// Prime bucket count used unless configured otherwise
    pub const DEFAULT_BUCKET_COUNT: usize = 499;

    pub fn new() -> Self {
        Self::with_buckets(Self::DEFAULT_BUCKET_COUNT)
    }

    /// Create a table with the bucket count from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the bucket count is zero.
    pub fn from_config(config: &SolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_buckets(config.bucket_count))
    }

    fn with_buckets(bucket_count: usize) -> Self {
        Self {
            buckets: vec![Vec::new(); bucket_count],
            entries: Vec::new(),
        }
    }

    /// Sum of the side-to-move weight and all cell weights
    pub fn hash_board(board: &BoardState) -> usize {
        board.to_move.to_cell().value() + board.cells.iter().map(|c| c.value()).sum::<usize>()
    }

    fn bucket_of(&self, board: &BoardState) -> usize {
        Self::hash_board(board) % self.buckets.len()
    }

    /// Read-only lookup; `None` if the position has never been inserted
    pub fn find(&self, board: &BoardState) -> Option<EntryId> {
        // Chains are scanned newest first.
        self.buckets[self.bucket_of(board)]
            .iter()
            .rev()
            .copied()
            .find(|id| self.entries[id.0].board == *board)
    }

    /// Return the entry for `board`, inserting a copy labelled `initial` if absent.
    ///
    /// An existing entry is returned untouched and `initial` is ignored, so
    /// at most one entry ever exists per board value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if the table cannot grow. The
    /// table is unchanged in that case.
    pub fn lookup_or_insert(&mut self, board: &BoardState, initial: Outcome) -> Result<EntryId> {
        if let Some(id) = self.find(board) {
            return Ok(id);
        }

        let bucket = self.bucket_of(board);
        self.entries
            .try_reserve(1)
            .map_err(Error::allocation("transposition table entry"))?;
        self.buckets[bucket]
            .try_reserve(1)
            .map_err(Error::allocation("transposition table bucket"))?;

        let id = EntryId(self.entries.len());
        self.entries.push(Entry {
            board: *board,
            outcome: initial,
        });
        self.buckets[bucket].push(id);
        Ok(id)
    }

    pub fn board(&self, id: EntryId) -> &BoardState {
        &self.entries[id.0].board
    }

    pub fn outcome(&self, id: EntryId) -> Outcome {
        self.entries[id.0].outcome
    }

    /// Label of `board`, `None` if it is not in the table
    pub fn outcome_of(&self, board: &BoardState) -> Option<Outcome> {
        self.find(board).map(|id| self.outcome(id))
    }

    /// Write the final label of an unresolved entry.
    ///
    /// Resolved labels are never overwritten: returns `false` and leaves the
    /// entry alone if it already carries a label.
    pub fn resolve(&mut self, id: EntryId, outcome: Outcome) -> bool {
        debug_assert!(outcome.is_known(), "cannot resolve an entry to Unknown");
        let entry = &mut self.entries[id.0];
        if entry.outcome.is_known() {
            return false;
        }
        entry.outcome = outcome;
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Number of entries still labelled [`Outcome::Unknown`]
    pub fn count_unknown(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| !entry.outcome.is_known())
            .count()
    }

    /// All entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &Entry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (EntryId(i), entry))
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}
