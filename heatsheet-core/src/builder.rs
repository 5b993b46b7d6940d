/// Round builder: the full heat/lane plan for one race.
///
/// A `Race` is built exactly once from an explicit seed; no generator
/// state survives the call. Everything downstream (which heat a rider is
/// in, which lane they start from) is a pure function of roster order,
/// round count, and seed.
use thiserror::Error;

use crate::constants::{MAX_ROUND_COUNT, MIN_ROUND_COUNT};
use crate::heats::split_into_heats;
use crate::rng::{shuffle, SeedStream};
use crate::types::{Competitor, Phase, Round};

/// Immutable race parameters, fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RaceConfig {
    /// Total rounds including the final. 3..=6.
    pub round_count: usize,
    /// Fixes all randomness for this race.
    pub seed: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RaceStatus {
    Planned,
    Active,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("race has already been built")]
    AlreadyBuilt,
    #[error("no registered competitors to build from")]
    EmptyRoster,
    #[error("round count {0} is outside 3..=6")]
    RoundCountOutOfRange(usize),
}

/// One race for an event/category pair: config, lifecycle status, and,
/// once built, the round plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Race {
    config: RaceConfig,
    status: RaceStatus,
    rounds: Vec<Round>,
}

impl Race {
    pub fn new(config: RaceConfig) -> Result<Self, BuildError> {
        if !(MIN_ROUND_COUNT..=MAX_ROUND_COUNT).contains(&config.round_count) {
            return Err(BuildError::RoundCountOutOfRange(config.round_count));
        }
        Ok(Race {
            config,
            status: RaceStatus::Planned,
            rounds: Vec::new(),
        })
    }

    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    pub fn status(&self) -> RaceStatus {
        self.status
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn is_built(&self) -> bool {
        !self.rounds.is_empty()
    }

    /// Build the plan, exactly once.
    ///
    /// `roster` must already be filtered to eligible, confirmed entries
    /// and ordered (manual seed, then surname; see `order_roster`).
    /// Validation happens before any round is produced: a failed build
    /// leaves the race unbuilt and retryable. Success moves the race
    /// from Planned to Active.
    pub fn build(&mut self, roster: &[Competitor]) -> Result<&[Round], BuildError> {
        if self.is_built() {
            return Err(BuildError::AlreadyBuilt);
        }
        if roster.is_empty() {
            return Err(BuildError::EmptyRoster);
        }
        let ids: Vec<i64> = roster.iter().map(|c| c.id).collect();
        self.rounds = build_rounds(&ids, self.config.round_count, &self.config.seed);
        self.status = RaceStatus::Active;
        Ok(&self.rounds)
    }
}

/// Produce the heat/lane plan for every round of a race.
///
/// Round r reshuffles the roster on its own stream (`"{seed}-round-{r}"`)
/// and partitions the result into heats, so each round gets a distinct
/// but reproducible arrangement. The last round is the final, every
/// other round is qualifying.
pub fn build_rounds(roster_ids: &[i64], round_count: usize, seed: &str) -> Vec<Round> {
    (1..=round_count)
        .map(|round_no| {
            let mut order = roster_ids.to_vec();
            let mut stream = SeedStream::new(&format!("{seed}-round-{round_no}"));
            shuffle(&mut order, &mut stream);
            let phase = if round_no == round_count {
                Phase::Final
            } else {
                Phase::Qualifying
            };
            Round {
                order_no: round_no,
                phase,
                heats: split_into_heats(&order, seed, round_no),
            }
        })
        .collect()
}
