/// Roster construction: which registrations race, and in what order.
use crate::types::{Competitor, RegistrationEntry, RegistrationStatus};

/// Build the ordered roster for one race from its registrations.
///
/// Keeps Registered and Confirmed entries and drops the rest. Manually
/// seeded entries come first, ascending by seed; unseeded entries follow,
/// with surname, given name, and plate breaking remaining ties. The
/// result is what the round builder shuffles per round.
pub fn order_roster(entries: &[RegistrationEntry]) -> Vec<Competitor> {
    let mut kept: Vec<&RegistrationEntry> = entries
        .iter()
        .filter(|e| {
            matches!(
                e.status,
                RegistrationStatus::Registered | RegistrationStatus::Confirmed
            )
        })
        .collect();

    kept.sort_by(|a, b| {
        seed_key(a.seed)
            .cmp(&seed_key(b.seed))
            .then_with(|| a.competitor.last_name.cmp(&b.competitor.last_name))
            .then_with(|| a.competitor.first_name.cmp(&b.competitor.first_name))
            .then_with(|| a.competitor.plate.cmp(&b.competitor.plate))
    });

    kept.into_iter().map(|e| e.competitor.clone()).collect()
}

/// Unseeded entries sort after every explicit seed.
fn seed_key(seed: Option<u32>) -> (bool, u32) {
    match seed {
        Some(value) => (false, value),
        None => (true, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(
        id: i64,
        last_name: &str,
        plate: u32,
        status: RegistrationStatus,
        seed: Option<u32>,
    ) -> RegistrationEntry {
        RegistrationEntry {
            competitor: Competitor {
                id,
                first_name: "Rider".to_string(),
                last_name: last_name.to_string(),
                plate,
                club: None,
                date_of_birth: None,
                gender: None,
            },
            status,
            seed,
        }
    }

    #[test]
    fn test_only_registered_and_confirmed_race() {
        let entries = vec![
            entry(1, "Alpha", 101, RegistrationStatus::Registered, None),
            entry(2, "Bravo", 102, RegistrationStatus::Cancelled, None),
            entry(3, "Charlie", 103, RegistrationStatus::Confirmed, None),
        ];
        let roster = order_roster(&entries);
        let ids: Vec<i64> = roster.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_seeded_entries_lead_in_seed_order() {
        let entries = vec![
            entry(1, "Zulu", 101, RegistrationStatus::Confirmed, None),
            entry(2, "Yankee", 102, RegistrationStatus::Confirmed, Some(2)),
            entry(3, "Xray", 103, RegistrationStatus::Confirmed, Some(1)),
        ];
        let roster = order_roster(&entries);
        let ids: Vec<i64> = roster.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_unseeded_sorted_by_surname() {
        let entries = vec![
            entry(1, "Miller", 101, RegistrationStatus::Registered, None),
            entry(2, "Abbott", 102, RegistrationStatus::Registered, None),
            entry(3, "Keller", 103, RegistrationStatus::Registered, None),
        ];
        let roster = order_roster(&entries);
        let names: Vec<&str> = roster.iter().map(|c| c.last_name.as_str()).collect();
        assert_eq!(names, vec!["Abbott", "Keller", "Miller"]);
    }

    #[test]
    fn test_same_surname_falls_to_given_name_then_plate() {
        let mut a = entry(1, "Smith", 205, RegistrationStatus::Registered, None);
        a.competitor.first_name = "Ben".to_string();
        let mut b = entry(2, "Smith", 104, RegistrationStatus::Registered, None);
        b.competitor.first_name = "Ben".to_string();
        let mut c = entry(3, "Smith", 150, RegistrationStatus::Registered, None);
        c.competitor.first_name = "Amy".to_string();

        let roster = order_roster(&[a, b, c]);
        let ids: Vec<i64> = roster.iter().map(|x| x.id).collect();
        // Amy first; the two Bens by plate.
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_empty_registrations() {
        assert!(order_roster(&[]).is_empty());
    }
}
