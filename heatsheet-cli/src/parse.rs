/// Roster, results, and category file loading.
///
/// All three are JSON. The string-level parsers are split from the
/// filesystem wrappers so they can be tested directly.
use heatsheet_core::{Category, HeatResult, Phase, RegistrationEntry, ResultStatus, ScoredEntry};
use serde::Deserialize;
use std::path::Path;

use crate::bail;

/// One results-file row: a heat entry plus its recorded result.
/// `status` defaults to OK; the phase is derived from the round number.
#[derive(Deserialize)]
struct ResultRow {
    round_no: usize,
    heat_no: usize,
    competitor_id: i64,
    #[serde(default)]
    status: ResultStatus,
    #[serde(default)]
    finish_pos: Option<u8>,
    #[serde(default)]
    time_ms: Option<u64>,
}

pub fn parse_roster(content: &str) -> Result<Vec<RegistrationEntry>, serde_json::Error> {
    serde_json::from_str(content)
}

pub fn load_roster(path: &Path) -> Vec<RegistrationEntry> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| bail(format!("Failed to read roster file {}: {e}", path.display())));
    parse_roster(&content)
        .unwrap_or_else(|e| bail(format!("Failed to parse roster file {}: {e}", path.display())))
}

/// Rows for the race's last round are tagged Final so the standings
/// calculator skips them.
pub fn parse_results(
    content: &str,
    round_count: usize,
) -> Result<Vec<ScoredEntry>, serde_json::Error> {
    let rows: Vec<ResultRow> = serde_json::from_str(content)?;
    Ok(rows
        .into_iter()
        .map(|row| ScoredEntry {
            round_no: row.round_no,
            phase: if row.round_no == round_count {
                Phase::Final
            } else {
                Phase::Qualifying
            },
            heat_no: row.heat_no,
            competitor_id: row.competitor_id,
            result: Some(HeatResult {
                status: row.status,
                finish_pos: row.finish_pos,
                time_ms: row.time_ms,
            }),
        })
        .collect())
}

pub fn load_results(path: &Path, round_count: usize) -> Vec<ScoredEntry> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| bail(format!("Failed to read results file {}: {e}", path.display())));
    parse_results(&content, round_count)
        .unwrap_or_else(|e| bail(format!("Failed to parse results file {}: {e}", path.display())))
}

pub fn parse_category(content: &str) -> Result<Category, serde_json::Error> {
    serde_json::from_str(content)
}

pub fn load_category(path: &Path) -> Category {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| bail(format!("Failed to read category file {}: {e}", path.display())));
    parse_category(&content)
        .unwrap_or_else(|e| bail(format!("Failed to parse category file {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatsheet_core::{Gender, RegistrationStatus};

    #[test]
    fn test_parse_roster_row() {
        let json = r#"[
            {
                "id": 1,
                "first_name": "Jan",
                "last_name": "Novak",
                "plate": 101,
                "club": "Rocket BMX",
                "date_of_birth": "2015-06-15",
                "gender": "M",
                "status": "CONFIRMED",
                "seed": 2
            },
            {
                "id": 2,
                "first_name": "Eva",
                "last_name": "Mala",
                "plate": 102
            }
        ]"#;
        let entries = parse_roster(json).unwrap();
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].competitor.id, 1);
        assert_eq!(entries[0].competitor.club.as_deref(), Some("Rocket BMX"));
        assert_eq!(entries[0].competitor.gender, Some(Gender::Male));
        assert_eq!(entries[0].status, RegistrationStatus::Confirmed);
        assert_eq!(entries[0].seed, Some(2));

        // Minimal row: optional fields default.
        assert_eq!(entries[1].status, RegistrationStatus::Registered);
        assert_eq!(entries[1].seed, None);
        assert_eq!(entries[1].competitor.club, None);
        assert_eq!(entries[1].competitor.date_of_birth, None);
    }

    #[test]
    fn test_parse_roster_rejects_garbage() {
        assert!(parse_roster("not json").is_err());
        assert!(parse_roster(r#"[{"id": 1}]"#).is_err()); // missing names/plate
    }

    #[test]
    fn test_parse_results_statuses_and_phase() {
        let json = r#"[
            {"round_no": 1, "heat_no": 1, "competitor_id": 1, "finish_pos": 2, "time_ms": 39500},
            {"round_no": 2, "heat_no": 1, "competitor_id": 1, "status": "DNF"},
            {"round_no": 4, "heat_no": 1, "competitor_id": 1, "status": "OK", "finish_pos": 1, "time_ms": 38000}
        ]"#;
        let entries = parse_results(json, 4).unwrap();
        assert_eq!(entries.len(), 3);

        let first = entries[0].result.unwrap();
        assert_eq!(first.status, ResultStatus::Ok); // defaulted
        assert_eq!(first.finish_pos, Some(2));
        assert_eq!(entries[0].phase, Phase::Qualifying);

        let second = entries[1].result.unwrap();
        assert_eq!(second.status, ResultStatus::DidNotFinish);
        assert_eq!(second.finish_pos, None);

        // Round 4 of 4 is the final.
        assert_eq!(entries[2].phase, Phase::Final);
    }

    #[test]
    fn test_parse_category() {
        let json = r#"{
            "name": "Boys 9-10",
            "min_age": 9,
            "max_age": 10,
            "gender": "M",
            "wheel": "TWENTY_INCH"
        }"#;
        let category = parse_category(json).unwrap();
        assert_eq!(category.name, "Boys 9-10");
        assert_eq!(category.min_age, 9);
    }
}
