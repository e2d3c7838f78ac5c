use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Dish lists for one day, one list per ticket type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatsDuJour {
    pub ndekki: Vec<String>,
    pub repas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: String,
    pub date: NaiveDate,
    pub plats: PlatsDuJour,
    pub restaurant_id: String,
}

/// Where a menu sits relative to a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuJour {
    Passe,
    Aujourdhui,
    AVenir,
}

impl Menu {
    pub fn jour(&self, aujourdhui: NaiveDate) -> MenuJour {
        match self.date.cmp(&aujourdhui) {
            std::cmp::Ordering::Less => MenuJour::Passe,
            std::cmp::Ordering::Equal => MenuJour::Aujourdhui,
            std::cmp::Ordering::Greater => MenuJour::AVenir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(date: &str) -> Menu {
        Menu {
            id: "m".into(),
            date: date.parse().unwrap(),
            plats: PlatsDuJour {
                ndekki: vec!["Pain + café".into()],
                repas: vec!["Thiéboudienne".into()],
            },
            restaurant_id: "resto1".into(),
        }
    }

    #[test]
    fn jour_partitions_by_real_date_comparison() {
        let today: NaiveDate = "2025-01-15".parse().unwrap();
        assert_eq!(menu("2025-01-14").jour(today), MenuJour::Passe);
        assert_eq!(menu("2025-01-15").jour(today), MenuJour::Aujourdhui);
        // a later month with a smaller day-of-month still sorts after
        assert_eq!(menu("2025-02-01").jour(today), MenuJour::AVenir);
    }
}
