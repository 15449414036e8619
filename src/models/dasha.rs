use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Graha;

/// Remaining portion of the first mahadasha at birth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashaBalance {
    pub lord: Graha,
    pub years: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashaPeriod {
    pub lord: Graha,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DashaPeriod {
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at < self.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mahadasha {
    pub lord: Graha,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Full length of the period in years
    pub years: f64,
    pub antardashas: Vec<DashaPeriod>,
}

impl Mahadasha {
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at < self.end
    }
}

/// Vimshottari dasha sequence, in local birth time, starting with the
/// mahadasha running at birth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashas {
    pub balance: DashaBalance,
    pub mahadashas: Vec<Mahadasha>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashaWindow {
    pub mahadashas: Vec<Mahadasha>,
}

/// Dashas seen from a particular moment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashaSummary {
    pub balance: DashaBalance,
    pub current: DashaWindow,
    pub upcoming: DashaWindow,
}

impl Dashas {
    /// Split the sequence into the period running at `at` and the ones after it
    pub fn summary_at(&self, at: NaiveDateTime) -> DashaSummary {
        let current = self
            .mahadashas
            .iter()
            .filter(|m| m.contains(at))
            .cloned()
            .collect();
        let upcoming = self
            .mahadashas
            .iter()
            .filter(|m| m.start > at)
            .cloned()
            .collect();

        DashaSummary {
            balance: self.balance.clone(),
            current: DashaWindow { mahadashas: current },
            upcoming: DashaWindow { mahadashas: upcoming },
        }
    }
}
