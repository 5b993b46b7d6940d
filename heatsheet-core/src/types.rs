/// Shared types for race plans, results, and scoring.
///
/// Competitors are identified by caller-provided `i64` IDs; plan and
/// result types reference competitors by ID only and the roster carries
/// the rest.
use chrono::NaiveDate;

use crate::constants::MAX_HEAT_SIZE;

/// A registered competitor, immutable for the duration of a build.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Competitor {
    /// Caller-provided ID, unique across the roster.
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Plate (bib) number. Unique, and the last tie-break key in standings.
    pub plate: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub club: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub date_of_birth: Option<NaiveDate>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gender: Option<Gender>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gender {
    #[cfg_attr(feature = "serde", serde(rename = "M"))]
    Male,
    #[cfg_attr(feature = "serde", serde(rename = "F"))]
    Female,
}

/// A competitor's registration for one event/category.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegistrationEntry {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub competitor: Competitor,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: RegistrationStatus,
    /// Manual seed: an explicit ranking override that orders the roster
    /// ahead of the surname sort.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum RegistrationStatus {
    #[default]
    Registered,
    Confirmed,
    Cancelled,
}

/// Which kind of round this is. Round identity is the ordinal plus this
/// tag; there are no string keys like "M1" anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Qualifying,
    Final,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Qualifying => write!(f, "Qualifying"),
            Phase::Final => write!(f, "Final"),
        }
    }
}

/// One round (moto) of a race.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Round {
    /// 1-based position within the race.
    pub order_no: usize,
    pub phase: Phase,
    pub heats: Vec<Heat>,
}

/// A single-run grouping of up to 8 competitors within a round.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Heat {
    /// 1-based within the round.
    pub heat_no: usize,
    pub entries: Vec<HeatEntry>,
}

/// A competitor's slot in a heat. Lanes are unique within the heat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeatEntry {
    pub competitor_id: i64,
    /// Starting lane, 1..=8.
    pub lane: u8,
}

/// Result status for one heat entry. Only a clean finish carries a
/// position and time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResultStatus {
    #[cfg_attr(feature = "serde", serde(rename = "OK"))]
    #[default]
    Ok,
    #[cfg_attr(feature = "serde", serde(rename = "DQ"))]
    Disqualified,
    #[cfg_attr(feature = "serde", serde(rename = "DNS"))]
    DidNotStart,
    #[cfg_attr(feature = "serde", serde(rename = "DNF"))]
    DidNotFinish,
}

impl std::fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ResultStatus::Ok => "OK",
            ResultStatus::Disqualified => "DQ",
            ResultStatus::DidNotStart => "DNS",
            ResultStatus::DidNotFinish => "DNF",
        };
        write!(f, "{s}")
    }
}

/// A recorded result for one heat entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeatResult {
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: ResultStatus,
    /// 1..=8, unique among clean finishes within the heat.
    #[cfg_attr(feature = "serde", serde(default))]
    pub finish_pos: Option<u8>,
    /// Elapsed time in integer milliseconds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub time_ms: Option<u64>,
}

/// A heat entry together with its recorded result, if any. This is the
/// standings calculator's input row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredEntry {
    pub round_no: usize,
    pub phase: Phase,
    pub heat_no: usize,
    pub competitor_id: i64,
    pub result: Option<HeatResult>,
}

/// Place → points for clean finishes, places 1..=8. Lower is better.
/// Injective: two places never score the same, so the table alone cannot
/// create standings ties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointsTable {
    points: [Option<u32>; MAX_HEAT_SIZE],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PointsTableError {
    #[error("place {0} is outside 1..=8")]
    PlaceOutOfRange(u8),
    #[error("place {0} appears more than once")]
    DuplicatePlace(u8),
    #[error("points value {0} is assigned to more than one place")]
    DuplicatePoints(u32),
}

impl PointsTable {
    /// Build a table from explicit (place, points) pairs.
    pub fn new(entries: &[(u8, u32)]) -> Result<Self, PointsTableError> {
        let mut points = [None; MAX_HEAT_SIZE];
        for &(place, value) in entries {
            if place < 1 || place as usize > MAX_HEAT_SIZE {
                return Err(PointsTableError::PlaceOutOfRange(place));
            }
            let idx = place as usize - 1;
            if points[idx].is_some() {
                return Err(PointsTableError::DuplicatePlace(place));
            }
            if points.iter().any(|p| *p == Some(value)) {
                return Err(PointsTableError::DuplicatePoints(value));
            }
            points[idx] = Some(value);
        }
        Ok(PointsTable { points })
    }

    /// Build a table from a dense list where index 0 is place 1.
    pub fn from_places(values: &[u32]) -> Result<Self, PointsTableError> {
        let entries: Vec<(u8, u32)> = values
            .iter()
            .enumerate()
            .map(|(idx, &value)| (idx as u8 + 1, value))
            .collect();
        PointsTable::new(&entries)
    }

    /// Points for a place, if the table defines it.
    pub fn get(&self, place: u8) -> Option<u32> {
        if place < 1 || place as usize > MAX_HEAT_SIZE {
            return None;
        }
        self.points[place as usize - 1]
    }
}

impl Default for PointsTable {
    /// The identity table: place n scores n points, for all 8 places.
    fn default() -> Self {
        let mut points = [None; MAX_HEAT_SIZE];
        for (idx, slot) in points.iter_mut().enumerate() {
            *slot = Some(idx as u32 + 1);
        }
        PointsTable { points }
    }
}
