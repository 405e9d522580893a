//! Configuration types for solving and for interactive matches.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    solver::TranspositionTable,
    tictactoe::Player,
};

/// Configuration for a [`Solver`](crate::solver::Solver).
///
/// # Examples
///
/// ```
/// use tictactoe_solver::config::SolverConfig;
///
/// let config = SolverConfig::new()
///     .with_bucket_count(101)
///     .with_progress_interval(0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Fixed number of transposition table buckets
    pub bucket_count: usize,
    /// Log progress every this many worklist pops (0 disables)
    pub progress_interval: u64,
}

impl SolverConfig {
    /// Create a configuration with default values:
    /// - Bucket count: 499
    /// - Progress interval: every 100,000 pops
    pub fn new() -> Self {
        Self {
            bucket_count: TranspositionTable::DEFAULT_BUCKET_COUNT,
            progress_interval: 100_000,
        }
    }

    pub fn with_bucket_count(mut self, bucket_count: usize) -> Self {
        self.bucket_count = bucket_count;
        self
    }

    pub fn with_progress_interval(mut self, pops: u64) -> Self {
        self.progress_interval = pops;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.bucket_count == 0 {
            return Err(Error::InvalidConfiguration {
                message: "bucket count must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Who sits across from the human player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Opponent {
    Human,
    Computer { plays: Player },
}

/// Configuration for an interactive match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub opponent: Opponent,
    /// Side that makes the first move
    pub first_player: Player,
    /// A computer moving first takes the centre without consulting the table
    pub computer_opens_center: bool,
    pub solver: SolverConfig,
}

impl MatchConfig {
    /// Two humans sharing one board, X first
    pub fn human_vs_human() -> Self {
        Self {
            opponent: Opponent::Human,
            first_player: Player::X,
            computer_opens_center: true,
            solver: SolverConfig::default(),
        }
    }

    /// A human against the computer, which plays `plays`
    pub fn against_computer(plays: Player) -> Self {
        Self {
            opponent: Opponent::Computer { plays },
            ..Self::human_vs_human()
        }
    }

    pub fn with_first_player(mut self, player: Player) -> Self {
        self.first_player = player;
        self
    }

    pub fn with_center_opening(mut self, enabled: bool) -> Self {
        self.computer_opens_center = enabled;
        self
    }

    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// The side the computer plays, if any
    pub fn computer(&self) -> Option<Player> {
        match self.opponent {
            Opponent::Computer { plays } => Some(plays),
            Opponent::Human => None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.solver.validate()
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::human_vs_human()
    }
}
