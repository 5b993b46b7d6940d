/// Maximum competitors per heat. The start gate has 8 lanes; a larger
/// roster splits into multiple heats per round.
pub const MAX_HEAT_SIZE: usize = 8;

/// Points charged for any outcome that is not a clean finish at a place
/// the points table covers: DQ/DNS/DNF, or a finish place the table
/// leaves undefined. This is the implicit "place 9" value and is fixed
/// by contract, not configurable.
pub const UNPLACED_POINTS: u32 = 9;

/// Inclusive bounds on a race's round count. The last round is always
/// the final, so the minimum still leaves two qualifying rounds.
pub const MIN_ROUND_COUNT: usize = 3;
pub const MAX_ROUND_COUNT: usize = 6;

/// How many leading standings ranks qualify for the final by default.
/// One full heat's worth.
pub const DEFAULT_FINAL_SLOTS: usize = 8;
