use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{Ashtakavarga, Dashas, DivisionalChart, Graha, Nakshatra, Shadbala, SiderealPosition, ZodiacSign};

/// Birth details of the chart's native
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Local civil time of birth
    pub birth_datetime: NaiveDateTime,
    pub latitude: f64,
    pub longitude: f64,
    /// Hours east of UTC (e.g. 5.5 for IST)
    pub timezone_offset: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Sidereal correction used for the chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ayanamsa {
    pub name: String,
    /// Degrees
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionType {
    Direct,
    Retrograde,
    Stationary,
}

impl MotionType {
    /// Classify by daily motion; within 2% of the mean motion counts as stationary
    pub fn from_speed(graha: Graha, speed: f64) -> Self {
        if !graha.can_retrograde() {
            return MotionType::Direct;
        }
        if graha.is_node() {
            return MotionType::Retrograde;
        }
        if speed.abs() < graha.mean_daily_motion() * 0.02 {
            MotionType::Stationary
        } else if speed < 0.0 {
            MotionType::Retrograde
        } else {
            MotionType::Direct
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dignity {
    Exalted,
    Moolatrikona,
    OwnSign,
    Friend,
    Neutral,
    Enemy,
    Debilitated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dignities {
    pub dignity: Dignity,
    pub sign_lord: Graha,
    /// Same sign in the rasi and navamsa
    pub is_vargottama: bool,
}

/// Aspect cast by a graha onto a house, counted from the graha's own house
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectGiven {
    /// Aspect number (7 = seventh-house aspect)
    pub aspect: u8,
    pub to_house: u8,
    pub to_sign: ZodiacSign,
    pub to_planets: Vec<Graha>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectReceived {
    pub from_planet: Graha,
    pub aspect: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanetAspects {
    pub gives: Vec<AspectGiven>,
    pub receives: Vec<AspectReceived>,
}

/// A graha placed in the rasi (D1) chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetPlacement {
    pub celestial_body: Graha,
    #[serde(flatten)]
    pub position: SiderealPosition,
    /// Whole-sign house from the ascendant (1-12)
    pub house: u8,
    pub motion_type: MotionType,
    /// Daily motion in longitude (degrees/day)
    pub speed: f64,
    pub dignities: Dignities,
    /// Absent for Rahu and Ketu
    pub shadbala: Option<Shadbala>,
    pub aspects: PlanetAspects,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct House {
    pub number: u8,
    pub sign: ZodiacSign,
    pub lord: Graha,
    /// Ascendant degree, set on the first house only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign_degrees: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nakshatra: Option<Nakshatra>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pada: Option<u8>,
    pub occupants: Vec<Graha>,
}

/// The rasi (D1) chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RasiChart {
    pub ascendant: SiderealPosition,
    pub planets: Vec<PlanetPlacement>,
    /// Twelve whole-sign houses, index 0 = first house
    pub houses: Vec<House>,
}

impl RasiChart {
    pub fn planet(&self, graha: Graha) -> Option<&PlanetPlacement> {
        self.planets.iter().find(|p| p.celestial_body == graha)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panchanga {
    pub tithi: String,
    pub nakshatra: String,
    pub yoga: String,
    pub karana: String,
    pub vaara: String,
}

/// Sunrise and sunset on the birth date, in local clock hours after midnight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunriseSunset {
    pub sunrise_hours_from_midnight: f64,
    pub sunset_hours_from_midnight: f64,
    /// Birth falls between sunrise and sunset
    pub day_birth: bool,
}

/// A fully computed Vedic birth chart
///
/// The large parts are shared, so cloning a chart only copies the person and
/// the small summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VedicChart {
    pub person: Person,
    pub ayanamsa: Ayanamsa,
    pub d1_chart: Arc<RasiChart>,
    /// Keyed by lower-case code ("d9")
    pub divisional_charts: Arc<BTreeMap<String, DivisionalChart>>,
    pub panchanga: Panchanga,
    pub dashas: Arc<Dashas>,
    pub ashtakavarga: Arc<Ashtakavarga>,
}

impl VedicChart {
    /// Shallow copy of the chart with the native's name replaced
    pub fn with_person_name(&self, name: &str) -> Self {
        let mut chart = self.clone();
        chart.person.name = Some(name.to_string());
        chart
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nodes_are_always_retrograde() {
        assert_eq!(MotionType::from_speed(Graha::Rahu, 0.01), MotionType::Retrograde);
        assert_eq!(MotionType::from_speed(Graha::Ketu, -0.05), MotionType::Retrograde);
    }

    #[test]
    fn luminaries_are_always_direct() {
        assert_eq!(MotionType::from_speed(Graha::Sun, 0.95), MotionType::Direct);
        assert_eq!(MotionType::from_speed(Graha::Moon, 12.0), MotionType::Direct);
    }

    #[test]
    fn slow_planet_near_station() {
        assert_eq!(MotionType::from_speed(Graha::Saturn, 0.0001), MotionType::Stationary);
        assert_eq!(MotionType::from_speed(Graha::Saturn, -0.05), MotionType::Retrograde);
        assert_eq!(MotionType::from_speed(Graha::Mars, 0.6), MotionType::Direct);
    }

    #[test]
    fn named_copy_shares_computed_parts() {
        let chart = crate::vedic::compute_birth_chart(&crate::vedic::BirthDetails {
            year: 1996,
            month: 7,
            day: 4,
            hour: 9,
            minute: 10,
            second: 0,
            latitude: 18.404,
            longitude: 75.195,
            timezone_offset: 5.5,
        })
        .unwrap();
        let named = chart.with_person_name("Bhampu");

        assert_eq!(named.person.name.as_deref(), Some("Bhampu"));
        assert_eq!(chart.person.name, None);
        assert!(Arc::ptr_eq(&chart.d1_chart, &named.d1_chart));
        assert!(Arc::ptr_eq(&chart.divisional_charts, &named.divisional_charts));
        assert!(Arc::ptr_eq(&chart.dashas, &named.dashas));
        assert!(Arc::ptr_eq(&chart.ashtakavarga, &named.ashtakavarga));
    }
}
