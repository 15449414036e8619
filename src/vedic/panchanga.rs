//! Panchanga: the five limbs of the Hindu calendar day

use chrono::{Datelike, NaiveDateTime, Weekday};

use crate::models::{normalize_degrees, Nakshatra, Panchanga};

const TITHI_NAMES: [&str; 14] = [
    "Pratipada",
    "Dwitiya",
    "Tritiya",
    "Chaturthi",
    "Panchami",
    "Shashthi",
    "Saptami",
    "Ashtami",
    "Navami",
    "Dashami",
    "Ekadashi",
    "Dwadashi",
    "Trayodashi",
    "Chaturdashi",
];

const YOGA_NAMES: [&str; 27] = [
    "Vishkambha",
    "Priti",
    "Ayushman",
    "Saubhagya",
    "Shobhana",
    "Atiganda",
    "Sukarma",
    "Dhriti",
    "Shula",
    "Ganda",
    "Vriddhi",
    "Dhruva",
    "Vyaghata",
    "Harshana",
    "Vajra",
    "Siddhi",
    "Vyatipata",
    "Variyana",
    "Parigha",
    "Shiva",
    "Siddha",
    "Sadhya",
    "Shubha",
    "Shukla",
    "Brahma",
    "Indra",
    "Vaidhriti",
];

const MOVABLE_KARANAS: [&str; 7] = [
    "Bava", "Balava", "Kaulava", "Taitila", "Garaja", "Vanija", "Vishti",
];

/// Tithi (lunar day) from the Sun-Moon elongation
pub fn tithi(sun: f64, moon: f64) -> String {
    let elongation = normalize_degrees(moon - sun);
    let index = ((elongation / 12.0).floor() as usize).min(29);
    match index {
        14 => "Purnima".to_string(),
        29 => "Amavasya".to_string(),
        i if i < 14 => format!("Shukla {}", TITHI_NAMES[i]),
        i => format!("Krishna {}", TITHI_NAMES[i - 15]),
    }
}

/// Yoga from the sum of sidereal Sun and Moon longitudes
pub fn yoga(sun: f64, moon: f64) -> &'static str {
    let total = normalize_degrees(sun + moon);
    let index = ((total / (360.0 / 27.0)).floor() as usize).min(26);
    YOGA_NAMES[index]
}

/// Karana (half tithi)
///
/// The first half of Shukla Pratipada is Kimstughna, the last three halves of
/// the month are fixed; the seven movable karanas repeat in between.
pub fn karana(sun: f64, moon: f64) -> &'static str {
    let elongation = normalize_degrees(moon - sun);
    let index = ((elongation / 6.0).floor() as usize).min(59);
    match index {
        0 => "Kimstughna",
        57 => "Shakuni",
        58 => "Chatushpada",
        59 => "Naga",
        i => MOVABLE_KARANAS[(i - 1) % 7],
    }
}

/// Vedic weekday; the day runs from sunrise to sunrise
pub fn vaara(birth: NaiveDateTime, before_sunrise: bool) -> &'static str {
    let weekday = if before_sunrise {
        birth.weekday().pred()
    } else {
        birth.weekday()
    };
    match weekday {
        Weekday::Sun => "Ravivara",
        Weekday::Mon => "Somavara",
        Weekday::Tue => "Mangalavara",
        Weekday::Wed => "Budhavara",
        Weekday::Thu => "Guruvara",
        Weekday::Fri => "Shukravara",
        Weekday::Sat => "Shanivara",
    }
}

/// Panchanga at birth from sidereal Sun and Moon longitudes
pub fn compute_panchanga(
    sun: f64,
    moon: f64,
    birth: NaiveDateTime,
    before_sunrise: bool,
) -> Panchanga {
    Panchanga {
        tithi: tithi(sun, moon),
        nakshatra: Nakshatra::from_longitude(moon).to_string(),
        yoga: yoga(sun, moon).to_string(),
        karana: karana(sun, moon).to_string(),
        vaara: vaara(birth, before_sunrise).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn tithi_names() {
        assert_eq!(tithi(0.0, 5.0), "Shukla Pratipada");
        assert_eq!(tithi(0.0, 170.0), "Purnima");
        assert_eq!(tithi(0.0, 218.0), "Krishna Chaturthi");
        assert_eq!(tithi(100.0, 95.0), "Amavasya");
    }

    #[test]
    fn karana_fixed_and_movable() {
        assert_eq!(karana(0.0, 3.0), "Kimstughna");
        assert_eq!(karana(0.0, 7.0), "Bava");
        assert_eq!(karana(0.0, 43.0), "Vishti");
        assert_eq!(karana(0.0, 49.0), "Bava");
        assert_eq!(karana(0.0, 357.0), "Naga");
    }

    #[test]
    fn yoga_wraps_sum() {
        assert_eq!(yoga(0.0, 1.0), "Vishkambha");
        assert_eq!(yoga(200.0, 159.0), "Vaidhriti");
        assert_eq!(yoga(200.0, 161.0), "Vishkambha");
    }

    #[test]
    fn vaara_changes_at_sunrise() {
        // 1996-07-04 was a Thursday
        let birth = NaiveDate::from_ymd_opt(1996, 7, 4)
            .unwrap()
            .and_hms_opt(4, 0, 0)
            .unwrap();
        assert_eq!(vaara(birth, false), "Guruvara");
        assert_eq!(vaara(birth, true), "Budhavara");
    }
}
