/// Qualifying standings: aggregate scores, tie-breaking, and the
/// final-qualification cut.
use std::collections::HashMap;

use thiserror::Error;

use crate::constants::{DEFAULT_FINAL_SLOTS, UNPLACED_POINTS};
use crate::types::{Competitor, Phase, PointsTable, ResultStatus, ScoredEntry};

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StandingsOptions {
    /// How many leading ranks qualify for the final.
    pub final_slot_count: usize,
}

impl Default for StandingsOptions {
    fn default() -> Self {
        StandingsOptions {
            final_slot_count: DEFAULT_FINAL_SLOTS,
        }
    }
}

/// One competitor's scored outcome in one qualifying round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundScore {
    pub round_no: usize,
    pub status: ResultStatus,
    pub position: Option<u8>,
    pub points: u32,
    pub time_ms: Option<u64>,
}

/// A competitor's place in the qualifying standings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Standing {
    pub competitor_id: i64,
    pub plate: u32,
    pub rounds: Vec<RoundScore>,
    pub total_points: u32,
    /// Lowest clean-finish position seen; None if never finished clean.
    pub best_position: Option<u8>,
    /// Lowest clean-finish time seen.
    pub best_time_ms: Option<u64>,
    pub completed_rounds: usize,
    /// 1-based rank after the full tie-break chain.
    pub rank: usize,
    pub qualifies_for_final: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StandingsError {
    #[error("competitor {0} has a recorded result but is not on the roster")]
    UnknownCompetitor(i64),
    #[error("finish position {position} recorded twice in round {round_no} heat {heat_no}")]
    DuplicateFinishPosition {
        round_no: usize,
        heat_no: usize,
        position: u8,
    },
}

/// Compute the ranked qualifying standings for one race.
///
/// Final-round entries are ignored, as are entries with no recorded
/// result; a competitor with zero recorded results does not appear at
/// all (no data, no rank). A clean finish at place p scores
/// `points_table[p]`, or 9 when the table leaves p undefined; every
/// non-clean status scores a flat 9. Ordering: total points, then best
/// position, then best time, then plate number, all ascending.
///
/// A duplicate clean-finish position within one heat is surfaced as an
/// error rather than scored; the calculator never guesses a winner.
pub fn compute_standings(
    roster: &[Competitor],
    entries: &[ScoredEntry],
    points_table: &PointsTable,
    options: &StandingsOptions,
) -> Result<Vec<Standing>, StandingsError> {
    let plates: HashMap<i64, u32> = roster.iter().map(|c| (c.id, c.plate)).collect();

    // First-seen entry order, so fully-tied rows never depend on hash
    // iteration order.
    let mut index: HashMap<i64, usize> = HashMap::new();
    let mut standings: Vec<Standing> = Vec::new();
    let mut taken_positions: HashMap<(usize, usize), Vec<u8>> = HashMap::new();

    for entry in entries {
        if entry.phase == Phase::Final {
            continue;
        }
        let Some(result) = entry.result else {
            continue;
        };

        let plate = *plates
            .get(&entry.competitor_id)
            .ok_or(StandingsError::UnknownCompetitor(entry.competitor_id))?;

        let finished_ok = result.status == ResultStatus::Ok;

        if finished_ok {
            if let Some(position) = result.finish_pos {
                let taken = taken_positions
                    .entry((entry.round_no, entry.heat_no))
                    .or_default();
                if taken.contains(&position) {
                    return Err(StandingsError::DuplicateFinishPosition {
                        round_no: entry.round_no,
                        heat_no: entry.heat_no,
                        position,
                    });
                }
                taken.push(position);
            }
        }

        let points = if finished_ok {
            result
                .finish_pos
                .and_then(|p| points_table.get(p))
                .unwrap_or(UNPLACED_POINTS)
        } else {
            UNPLACED_POINTS
        };

        let slot = match index.get(&entry.competitor_id).copied() {
            Some(slot) => slot,
            None => {
                standings.push(Standing {
                    competitor_id: entry.competitor_id,
                    plate,
                    rounds: Vec::new(),
                    total_points: 0,
                    best_position: None,
                    best_time_ms: None,
                    completed_rounds: 0,
                    rank: 0,
                    qualifies_for_final: false,
                });
                index.insert(entry.competitor_id, standings.len() - 1);
                standings.len() - 1
            }
        };

        let standing = &mut standings[slot];
        standing.rounds.push(RoundScore {
            round_no: entry.round_no,
            status: result.status,
            position: result.finish_pos,
            points,
            time_ms: result.time_ms,
        });
        standing.total_points += points;
        standing.completed_rounds += 1;

        if finished_ok {
            if let Some(position) = result.finish_pos {
                if standing.best_position.map_or(true, |best| position < best) {
                    standing.best_position = Some(position);
                }
            }
            if let Some(time) = result.time_ms {
                if standing.best_time_ms.map_or(true, |best| time < best) {
                    standing.best_time_ms = Some(time);
                }
            }
        }
    }

    // Missing best position sorts as the worst-case place 9; a missing
    // best time sorts after any recorded time within an otherwise tied
    // group, keeping the ordering total.
    standings.sort_by_key(|s| {
        (
            s.total_points,
            s.best_position.unwrap_or(UNPLACED_POINTS as u8),
            s.best_time_ms.unwrap_or(u64::MAX),
            s.plate,
        )
    });

    for (idx, standing) in standings.iter_mut().enumerate() {
        standing.rank = idx + 1;
        standing.qualifies_for_final = standing.rank <= options.final_slot_count;
    }

    Ok(standings)
}
