/// Category eligibility: age window at event date, gender filter,
/// equipment class.
use chrono::{Datelike, NaiveDate};

use crate::types::{Competitor, Gender};

/// Who a category admits.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Category {
    pub name: String,
    pub min_age: u32,
    pub max_age: u32,
    pub gender: CategoryGender,
    pub wheel: WheelClass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CategoryGender {
    #[cfg_attr(feature = "serde", serde(rename = "M"))]
    Male,
    #[cfg_attr(feature = "serde", serde(rename = "F"))]
    Female,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WheelClass {
    #[cfg_attr(feature = "serde", serde(rename = "TWENTY_INCH"))]
    TwentyInch,
    #[cfg_attr(feature = "serde", serde(rename = "TWENTY_FOUR_INCH"))]
    TwentyFourInch,
    Cruiser,
}

/// Age in whole years at `at`: the year difference, minus one when the
/// birthday has not yet come around that year.
pub fn age_at(date_of_birth: NaiveDate, at: NaiveDate) -> u32 {
    let mut age = at.year() - date_of_birth.year();
    if (at.month(), at.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age.max(0) as u32
}

impl Category {
    /// Whether a competitor may race this category at an event on the
    /// given date. A missing birth date always fails; a missing gender
    /// fails unless the category is Mixed.
    pub fn is_eligible(&self, competitor: &Competitor, event_date: NaiveDate) -> bool {
        let age_ok = competitor
            .date_of_birth
            .map(|dob| {
                let age = age_at(dob, event_date);
                age >= self.min_age && age <= self.max_age
            })
            .unwrap_or(false);
        if !age_ok {
            return false;
        }
        match self.gender {
            CategoryGender::Mixed => true,
            CategoryGender::Male => competitor.gender == Some(Gender::Male),
            CategoryGender::Female => competitor.gender == Some(Gender::Female),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn competitor(dob: Option<NaiveDate>, gender: Option<Gender>) -> Competitor {
        Competitor {
            id: 1,
            first_name: "Rider".to_string(),
            last_name: "Surname".to_string(),
            plate: 101,
            club: None,
            date_of_birth: dob,
            gender,
        }
    }

    fn boys_9_10() -> Category {
        Category {
            name: "Boys 9-10".to_string(),
            min_age: 9,
            max_age: 10,
            gender: CategoryGender::Male,
            wheel: WheelClass::TwentyInch,
        }
    }

    #[test]
    fn test_age_counts_birthdays_not_years() {
        let dob = date(2015, 6, 15);
        assert_eq!(age_at(dob, date(2025, 6, 14)), 9);
        assert_eq!(age_at(dob, date(2025, 6, 15)), 10);
        assert_eq!(age_at(dob, date(2025, 6, 16)), 10);
    }

    #[test]
    fn test_age_window_boundaries_inclusive() {
        let cat = boys_9_10();
        let event = date(2025, 8, 1);
        let at_min = competitor(Some(date(2016, 7, 1)), Some(Gender::Male)); // 9
        let at_max = competitor(Some(date(2014, 9, 1)), Some(Gender::Male)); // 10
        let too_young = competitor(Some(date(2017, 7, 1)), Some(Gender::Male)); // 8
        let too_old = competitor(Some(date(2014, 7, 1)), Some(Gender::Male)); // 11
        assert!(cat.is_eligible(&at_min, event));
        assert!(cat.is_eligible(&at_max, event));
        assert!(!cat.is_eligible(&too_young, event));
        assert!(!cat.is_eligible(&too_old, event));
    }

    #[test]
    fn test_gender_filter() {
        let cat = boys_9_10();
        let event = date(2025, 8, 1);
        let girl = competitor(Some(date(2016, 1, 1)), Some(Gender::Female));
        assert!(!cat.is_eligible(&girl, event));

        let mixed = Category {
            gender: CategoryGender::Mixed,
            ..boys_9_10()
        };
        assert!(mixed.is_eligible(&girl, event));
    }

    #[test]
    fn test_missing_fields_fail_their_checks() {
        let cat = boys_9_10();
        let event = date(2025, 8, 1);
        let no_dob = competitor(None, Some(Gender::Male));
        assert!(!cat.is_eligible(&no_dob, event));

        let no_gender = competitor(Some(date(2016, 1, 1)), None);
        assert!(!cat.is_eligible(&no_gender, event));

        let mixed = Category {
            gender: CategoryGender::Mixed,
            ..boys_9_10()
        };
        assert!(mixed.is_eligible(&no_gender, event));
    }
}
