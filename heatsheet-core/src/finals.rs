/// Final-round lane assignment: seeded random draw, or rank-ordered
/// gate choice.
use thiserror::Error;

use crate::constants::MAX_HEAT_SIZE;
use crate::gates::gate_sequence;
use crate::rng::{shuffle, SeedStream};
use crate::standings::Standing;

/// How lanes for the final are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FinalDrawMode {
    /// Single-heat shuffle and gate draw on a dedicated final sub-seed.
    Random,
    /// Best-ranked competitor picks first from their preference order.
    GateChoice,
}

/// A competitor eligible for the final, with the standings total that
/// orders gate choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FinalQualifier {
    pub competitor_id: i64,
    pub total_points: u32,
}

/// One assigned final lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FinalLaneAssignment {
    pub competitor_id: i64,
    pub lane: u8,
    /// 1-based position in the selection sequence. Gate choice only; a
    /// random draw has no selection sequence to record.
    pub choice_order: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FinalDrawError {
    #[error("a final holds at most 8 competitors, got {0}")]
    TooManyQualifiers(usize),
}

/// Lane preference per standings rank, most preferred first. Rank 1
/// starts at the centre gates and works outward; ranks past the table
/// pick in ascending lane order.
const GATE_PREFERENCES: [[u8; 8]; 4] = [
    [4, 5, 3, 6, 2, 7, 1, 8],
    [3, 4, 5, 2, 6, 1, 7, 8],
    [5, 4, 6, 3, 7, 2, 8, 1],
    [6, 5, 4, 7, 3, 8, 2, 1],
];

const ASCENDING_LANES: [u8; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

/// Preference order for a 1-based standings rank.
pub fn preferred_gates(rank: usize) -> &'static [u8; 8] {
    match rank {
        1..=4 => &GATE_PREFERENCES[rank - 1],
        _ => &ASCENDING_LANES,
    }
}

/// Pull the final qualifiers out of a computed standings table.
pub fn final_qualifiers(standings: &[Standing]) -> Vec<FinalQualifier> {
    standings
        .iter()
        .filter(|s| s.qualifies_for_final)
        .map(|s| FinalQualifier {
            competitor_id: s.competitor_id,
            total_points: s.total_points,
        })
        .collect()
}

/// Assign final-round lanes to the qualifiers.
///
/// Random mode shuffles on `"{seed}-final"` and draws gates on
/// `"{seed}-final-gates"`. Gate-choice mode is a deterministic greedy
/// pass: qualifiers sorted ascending by total points (stable, so equal
/// totals keep standings order), each taking the first still-available
/// lane from their rank's preference order. No backtracking.
pub fn assign_final_lanes(
    qualifiers: &[FinalQualifier],
    mode: FinalDrawMode,
    race_seed: &str,
) -> Result<Vec<FinalLaneAssignment>, FinalDrawError> {
    if qualifiers.len() > MAX_HEAT_SIZE {
        return Err(FinalDrawError::TooManyQualifiers(qualifiers.len()));
    }
    match mode {
        FinalDrawMode::Random => Ok(random_draw(qualifiers, race_seed)),
        FinalDrawMode::GateChoice => Ok(gate_choice(qualifiers)),
    }
}

fn random_draw(qualifiers: &[FinalQualifier], race_seed: &str) -> Vec<FinalLaneAssignment> {
    let mut order: Vec<i64> = qualifiers.iter().map(|q| q.competitor_id).collect();
    let mut stream = SeedStream::new(&format!("{race_seed}-final"));
    shuffle(&mut order, &mut stream);
    let gates = gate_sequence(order.len(), &format!("{race_seed}-final-gates"));
    order
        .into_iter()
        .zip(gates)
        .map(|(competitor_id, lane)| FinalLaneAssignment {
            competitor_id,
            lane,
            choice_order: None,
        })
        .collect()
}

fn gate_choice(qualifiers: &[FinalQualifier]) -> Vec<FinalLaneAssignment> {
    let mut ranked = qualifiers.to_vec();
    ranked.sort_by_key(|q| q.total_points);

    let mut available: Vec<u8> = (1..=MAX_HEAT_SIZE as u8).collect();
    let mut assignments = Vec::with_capacity(ranked.len());

    for (idx, qualifier) in ranked.iter().enumerate() {
        let rank = idx + 1;
        let chosen = preferred_gates(rank)
            .iter()
            .copied()
            .find(|lane| available.contains(lane))
            .unwrap_or(available[0]);
        available.retain(|&lane| lane != chosen);
        assignments.push(FinalLaneAssignment {
            competitor_id: qualifier.competitor_id,
            lane: chosen,
            choice_order: Some(rank),
        });
    }

    assignments
}
