//! Flat views of a chart returned by the individual tools

use serde::Serialize;

use super::{
    AspectGiven, AspectReceived, Dignity, Graha, House, MotionType, Nakshatra, PlanetPlacement,
    Shadbala, ZodiacSign,
};

#[derive(Debug, Clone, Serialize)]
pub struct PlanetSummary {
    pub celestial_body: Graha,
    pub sign: ZodiacSign,
    pub sign_degrees: f64,
    pub nakshatra: Nakshatra,
    pub pada: u8,
    pub house: u8,
    pub motion_type: MotionType,
    pub dignity: Dignity,
}

impl From<&PlanetPlacement> for PlanetSummary {
    fn from(planet: &PlanetPlacement) -> Self {
        Self {
            celestial_body: planet.celestial_body,
            sign: planet.position.sign,
            sign_degrees: planet.position.sign_degrees,
            nakshatra: planet.position.nakshatra,
            pada: planet.position.pada,
            house: planet.house,
            motion_type: planet.motion_type,
            dignity: planet.dignities.dignity,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanetShadbala {
    pub celestial_body: Graha,
    /// Null for Rahu and Ketu
    pub shadbala: Option<Shadbala>,
}

impl From<&PlanetPlacement> for PlanetShadbala {
    fn from(planet: &PlanetPlacement) -> Self {
        Self {
            celestial_body: planet.celestial_body,
            shadbala: planet.shadbala.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanetAspectSummary {
    pub celestial_body: Graha,
    pub aspects_given: Vec<AspectGiven>,
    pub aspects_received: Vec<AspectReceived>,
}

impl From<&PlanetPlacement> for PlanetAspectSummary {
    fn from(planet: &PlanetPlacement) -> Self {
        Self {
            celestial_body: planet.celestial_body,
            aspects_given: planet.aspects.gives.clone(),
            aspects_received: planet.aspects.receives.clone(),
        }
    }
}

/// The first house, i.e. the lagna
#[derive(Debug, Clone, Serialize)]
pub struct AscendantSummary {
    pub sign: ZodiacSign,
    pub house_number: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign_degrees: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nakshatra: Option<Nakshatra>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pada: Option<u8>,
}

impl From<&House> for AscendantSummary {
    fn from(house: &House) -> Self {
        Self {
            sign: house.sign,
            house_number: house.number,
            sign_degrees: house.sign_degrees,
            nakshatra: house.nakshatra,
            pada: house.pada,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HouseSummary {
    pub number: u8,
    pub sign: ZodiacSign,
    pub lord: Graha,
    pub occupants: Vec<Graha>,
}

impl From<&House> for HouseSummary {
    fn from(house: &House) -> Self {
        Self {
            number: house.number,
            sign: house.sign,
            lord: house.lord,
            occupants: house.occupants.clone(),
        }
    }
}
