//! Worklist-driven backward induction over the game DAG

use std::collections::VecDeque;

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::{
    config::SolverConfig,
    error::{Error, Result},
    solver::{EntryId, Outcome, TranspositionTable, generate_children},
    tictactoe::{BoardState, GameOutcome},
};

/// Counters collected while solving
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SolveStats {
    /// Entries in the table when the solve finished
    pub positions: usize,
    /// Items taken off the worklist
    pub pops: u64,
    /// Times a position's successors were generated
    pub expansions: u64,
    /// Times a position went back on the worklist to wait for its successors
    pub deferrals: u64,
    /// Positions labelled because a line was complete
    pub terminal_wins: u64,
    /// Full boards without a winner
    pub terminal_draws: u64,
    /// Positions where the mover can reach a won successor
    pub forced_wins: u64,
    /// Positions where every successor is won by the opponent
    pub forced_losses: u64,
    /// Non-terminal positions labelled as draws
    pub propagated_draws: u64,
    /// Longest the worklist ever got
    pub peak_worklist: usize,
}

/// FIFO of entries waiting for a label.
///
/// A handle is held at most once at a time; pushing one that is already
/// waiting is a no-op.
#[derive(Debug, Default)]
struct Worklist {
    queue: VecDeque<EntryId>,
    queued: Vec<bool>,
}

impl Worklist {
    fn push(&mut self, id: EntryId) -> Result<()> {
        let slot = id.index();
        if slot >= self.queued.len() {
            self.queued
                .try_reserve(slot + 1 - self.queued.len())
                .map_err(Error::allocation("worklist"))?;
            self.queued.resize(slot + 1, false);
        }
        if self.queued[slot] {
            return Ok(());
        }

        self.queue
            .try_reserve(1)
            .map_err(Error::allocation("worklist"))?;
        self.queue.push_back(id);
        self.queued[slot] = true;
        Ok(())
    }

    fn pop(&mut self) -> Option<EntryId> {
        let id = self.queue.pop_front()?;
        self.queued[id.index()] = false;
        Some(id)
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Backward-induction solver owning the table it fills.
///
/// A solver can be run again from another root and keeps everything it
/// already labelled.
#[derive(Debug)]
pub struct Solver {
    config: SolverConfig,
    table: TranspositionTable,
    stats: SolveStats,
}

impl Solver {
    /// Create a solver with an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `config` is invalid.
    pub fn new(config: SolverConfig) -> Result<Self> {
        let table = TranspositionTable::from_config(&config)?;
        Ok(Self {
            config,
            table,
            stats: SolveStats::default(),
        })
    }

    /// Continue from a table produced by an earlier, completed solve.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `config` is invalid or asks
    /// for a different bucket count than `table` was built with.
    pub fn with_table(config: SolverConfig, table: TranspositionTable) -> Result<Self> {
        config.validate()?;
        if config.bucket_count != table.bucket_count() {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "bucket count {} does not match the table's {}",
                    config.bucket_count,
                    table.bucket_count()
                ),
            });
        }
        Ok(Self {
            config,
            table,
            stats: SolveStats::default(),
        })
    }

    /// Label `root` and every position reachable from it.
    ///
    /// Returns the label of `root`.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailure`] aborts the solve. The table may then
    /// hold unresolved entries and must not be used for move selection.
    pub fn solve(&mut self, root: &BoardState) -> Result<Outcome> {
        let root_id = self.table.lookup_or_insert(root, Outcome::Unknown)?;
        let recorded = self.table.outcome(root_id);
        if recorded.is_known() {
            self.stats.positions = self.table.len();
            debug!(root = %root.encode(), outcome = %recorded, "root already solved");
            return Ok(recorded);
        }

        debug!(root = %root.encode(), known = self.table.len(), "solving");
        let mut worklist = Worklist::default();
        worklist.push(root_id)?;

        while let Some(cur) = worklist.pop() {
            self.stats.pops += 1;
            if self.config.progress_interval > 0
                && self.stats.pops.is_multiple_of(self.config.progress_interval)
            {
                debug!(
                    pops = self.stats.pops,
                    positions = self.table.len(),
                    pending = worklist.len(),
                    "solve progress"
                );
            }

            if self.table.outcome(cur).is_known() {
                continue;
            }
            self.label(cur, &mut worklist)?;
            self.stats.peak_worklist = self.stats.peak_worklist.max(worklist.len());
        }

        self.stats.positions = self.table.len();
        let outcome = self.table.outcome(root_id);
        if !outcome.is_known() {
            return Err(Error::UnsolvedLookup {
                board: root.encode(),
            });
        }

        info!(
            outcome = %outcome,
            positions = self.stats.positions,
            pops = self.stats.pops,
            expansions = self.stats.expansions,
            deferrals = self.stats.deferrals,
            "solve complete"
        );
        Ok(outcome)
    }

    /// One worklist step for an unresolved entry: label it, or requeue it
    /// behind its unresolved successors.
    fn label(&mut self, cur: EntryId, worklist: &mut Worklist) -> Result<()> {
        let board = *self.table.board(cur);

        if let Some(result) = GameOutcome::of(&board) {
            match result {
                GameOutcome::Win(_) => self.stats.terminal_wins += 1,
                GameOutcome::Draw => self.stats.terminal_draws += 1,
            }
            self.set(cur, result.into());
            return Ok(());
        }

        let children = generate_children(&mut self.table, &board)?;
        self.stats.expansions += 1;

        let mover = board.to_move;
        let mut pending = false;
        let mut any_draw = false;
        for &child in &children {
            match self.table.outcome(child) {
                outcome if outcome.is_win_for(mover) => {
                    self.stats.forced_wins += 1;
                    self.set(cur, outcome);
                    // The position no longer waits on its siblings, but they
                    // still need labels of their own.
                    return self.enqueue_unresolved(&children, worklist);
                }
                Outcome::Unknown => pending = true,
                Outcome::Draw => any_draw = true,
                Outcome::Win(_) => {}
            }
        }

        if pending {
            self.stats.deferrals += 1;
            self.enqueue_unresolved(&children, worklist)?;
            return worklist.push(cur);
        }

        if any_draw {
            self.stats.propagated_draws += 1;
            self.set(cur, Outcome::Draw);
        } else {
            self.stats.forced_losses += 1;
            self.set(cur, Outcome::win_for(mover.opponent()));
        }
        Ok(())
    }

    fn enqueue_unresolved(&self, children: &[EntryId], worklist: &mut Worklist) -> Result<()> {
        for &child in children {
            if !self.table.outcome(child).is_known() {
                worklist.push(child)?;
            }
        }
        Ok(())
    }

    fn set(&mut self, id: EntryId, outcome: Outcome) {
        trace!(board = %self.table.board(id).encode(), %outcome, "labelled");
        self.table.resolve(id, outcome);
    }

    pub fn table(&self) -> &TranspositionTable {
        &self.table
    }

    pub fn into_table(self) -> TranspositionTable {
        self.table
    }

    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }
}

/// Solve from `root` with the default configuration and hand back the table
pub fn solve(root: &BoardState) -> Result<TranspositionTable> {
    let mut solver = Solver::new(SolverConfig::default())?;
    solver.solve(root)?;
    Ok(solver.into_table())
}
