/// heatsheet-core: Race build & standings engine.
///
/// Deterministic heat/lane plans for multi-round races: seeded roster
/// shuffles, per-heat gate draws, final-round lane assignment (random or
/// gate choice by ranking), and qualifying standings with full
/// tie-breaking. No IO, no clocks. A race's seed string fixes every
/// draw, so the same seed and roster reproduce the same plan
/// bit-for-bit.
///
/// Competitors are identified by caller-provided `i64` IDs; the roster
/// carries names and plate numbers, plan and result types carry IDs.
///
/// # Quick start
///
/// ```rust
/// use heatsheet_core::{Competitor, Race, RaceConfig};
///
/// let roster: Vec<Competitor> = (1..=10)
///     .map(|n| Competitor {
///         id: n,
///         first_name: format!("Rider{n}"),
///         last_name: format!("Surname{n}"),
///         plate: 100 + n as u32,
///         club: None,
///         date_of_birth: None,
///         gender: None,
///     })
///     .collect();
///
/// let mut race = Race::new(RaceConfig {
///     round_count: 4,
///     seed: "race-42".to_string(),
/// })
/// .unwrap();
///
/// let rounds = race.build(&roster).unwrap();
/// assert_eq!(rounds.len(), 4); // three qualifying rounds plus the final
/// for heat in &rounds[0].heats {
///     assert!(heat.entries.len() <= 8);
/// }
/// ```

pub mod builder;
pub mod category;
pub mod constants;
pub mod finals;
pub mod gates;
pub mod heats;
pub mod rng;
pub mod roster;
pub mod standings;
pub mod types;

// Re-export primary public API at crate root.
pub use builder::{build_rounds, BuildError, Race, RaceConfig, RaceStatus};
pub use category::{age_at, Category, CategoryGender, WheelClass};
pub use finals::{
    assign_final_lanes, final_qualifiers, preferred_gates, FinalDrawError, FinalDrawMode,
    FinalLaneAssignment, FinalQualifier,
};
pub use gates::gate_sequence;
pub use heats::split_into_heats;
pub use rng::{shuffle, SeedStream};
pub use roster::order_roster;
pub use standings::{compute_standings, RoundScore, Standing, StandingsError, StandingsOptions};
pub use types::{
    Competitor, Gender, Heat, HeatEntry, HeatResult, Phase, PointsTable, PointsTableError,
    RegistrationEntry, RegistrationStatus, ResultStatus, Round, ScoredEntry,
};
