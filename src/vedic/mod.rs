//! Vedic chart engine
//!
//! Everything here works in the sidereal zodiac: tropical positions from the
//! ephemeris are shifted by the ayanamsa once, then every derived quantity
//! (houses, vargas, panchanga, dashas, strengths) is computed from them.

pub mod ashtakavarga;
pub mod aspects;
pub mod dasha;
pub mod dignity;
pub mod jsonld;
pub mod panchanga;
pub mod shadbala;
pub mod varga;

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::ephemeris::{
    calc_all_grahas, calc_angles, calc_ayanamsa, calc_nutation, calc_sun_rise_set,
    local_to_julian_day, lock_ephemeris, whole_sign_house, RiseSet,
};
use crate::error::{ChartError, Result};
use crate::models::{
    normalize_degrees, Dignities, Graha, House, MotionType, Person, PlanetPlacement, RasiChart,
    SiderealPosition, SunriseSunset, Varga, VedicChart, ZodiacSign,
};

use self::shadbala::{PlanetState, StrengthContext};

/// The nine numeric values that identify a chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirthDetails {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub latitude: f64,
    pub longitude: f64,
    /// Hours east of UTC
    pub timezone_offset: f64,
}

impl BirthDetails {
    /// Local civil date and time of birth
    pub fn local_datetime(&self) -> Result<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .and_then(|date| date.and_hms_opt(self.hour, self.minute, self.second))
            .ok_or_else(|| {
                ChartError::InvalidDateTime(format!(
                    "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                    self.year, self.month, self.day, self.hour, self.minute, self.second
                ))
            })
    }

    fn validate(&self) -> Result<()> {
        let latitude_ok = self.latitude.is_finite() && self.latitude.abs() <= 90.0;
        let longitude_ok = self.longitude.is_finite() && self.longitude.abs() <= 180.0;
        if !latitude_ok || !longitude_ok {
            return Err(ChartError::InvalidCoordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            });
        }
        if !self.timezone_offset.is_finite() || self.timezone_offset.abs() > 14.0 {
            return Err(ChartError::InvalidTimezoneOffset(self.timezone_offset));
        }
        Ok(())
    }

    /// Julian Day (UT) of local midnight starting the birth date
    fn midnight_julian_day(&self, local: NaiveDateTime) -> f64 {
        local_to_julian_day(local.date().and_time(NaiveTime::default()), self.timezone_offset)
    }
}

/// Format a fixed offset as "UTC+05:30"
fn offset_label(hours: f64) -> String {
    let minutes = (hours * 60.0).round() as i64;
    let sign = if minutes < 0 { '-' } else { '+' };
    format!("UTC{}{:02}:{:02}", sign, minutes.abs() / 60, minutes.abs() % 60)
}

fn sidereal(tropical: f64, ayanamsa: f64) -> f64 {
    normalize_degrees(tropical - ayanamsa)
}

/// Sun's declination from its tropical longitude and the obliquity, ignoring
/// its ecliptic latitude
fn declination(tropical_longitude: f64, obliquity: f64) -> f64 {
    (obliquity.to_radians().sin() * tropical_longitude.to_radians().sin())
        .asin()
        .to_degrees()
}

struct GrahaInput {
    graha: Graha,
    longitude: f64,
    speed: f64,
}

/// Compute the full Vedic chart for a birth
pub fn compute_birth_chart(birth: &BirthDetails) -> Result<VedicChart> {
    let local = birth.local_datetime()?;
    birth.validate()?;

    let julian_day = local_to_julian_day(local, birth.timezone_offset);
    let midnight = birth.midnight_julian_day(local);

    let (ayanamsa, tropical, angles, obliquity, rise_set) = {
        let _guard = lock_ephemeris();
        let ayanamsa = calc_ayanamsa(julian_day).map_err(ChartError::Ephemeris)?;
        let tropical = calc_all_grahas(julian_day).map_err(ChartError::Ephemeris)?;
        let angles = calc_angles(julian_day, birth.latitude, birth.longitude)
            .map_err(ChartError::Ephemeris)?;
        let (_, obliquity) = calc_nutation(julian_day).map_err(ChartError::Ephemeris)?;
        let rise_set = calc_sun_rise_set(midnight, birth.latitude, birth.longitude)
            .map_err(ChartError::Ephemeris)?;
        (ayanamsa, tropical, angles, obliquity, rise_set)
    };

    let grahas: Vec<GrahaInput> = tropical
        .iter()
        .map(|(graha, pos)| GrahaInput {
            graha: *graha,
            longitude: sidereal(pos.longitude, ayanamsa.value),
            speed: pos.speed_longitude,
        })
        .collect();

    let sun_tropical = tropical
        .iter()
        .find(|(g, _)| *g == Graha::Sun)
        .map(|(_, pos)| pos.longitude)
        .unwrap_or_default();
    let longitude_of = |graha: Graha| {
        grahas
            .iter()
            .find(|g| g.graha == graha)
            .map(|g| g.longitude)
            .unwrap_or_default()
    };
    let sun = longitude_of(Graha::Sun);
    let moon = longitude_of(Graha::Moon);

    let ascendant_longitude = sidereal(angles.ascendant, ayanamsa.value);
    let ascendant = SiderealPosition::from_longitude(ascendant_longitude);

    let placements: Vec<(Graha, ZodiacSign)> = grahas
        .iter()
        .map(|g| (g.graha, ZodiacSign::from_longitude(g.longitude)))
        .collect();
    let mut aspects = aspects::compute_aspects(&placements, ascendant.sign);

    let context = StrengthContext {
        ascendant: ascendant_longitude,
        sun,
        moon,
        sun_declination: declination(sun_tropical, obliquity),
        local_mean_time: local_mean_time(local, birth.timezone_offset, birth.longitude),
    };

    let planets: Vec<PlanetPlacement> = grahas
        .iter()
        .map(|g| {
            let position = SiderealPosition::from_longitude(g.longitude);
            let navamsa = varga::varga_position(Varga::D9, g.longitude).sign;
            let house = whole_sign_house(ascendant.sign, position.sign);
            let motion_type = MotionType::from_speed(g.graha, g.speed);
            let planet_aspects = aspects.remove(&g.graha).unwrap_or_default();

            let shadbala = shadbala::compute_shadbala(
                &PlanetState {
                    graha: g.graha,
                    longitude: g.longitude,
                    navamsa,
                    house,
                    speed: g.speed,
                    motion: motion_type,
                    aspects_received: &planet_aspects.receives,
                },
                &context,
            );

            PlanetPlacement {
                celestial_body: g.graha,
                house,
                motion_type,
                speed: g.speed,
                dignities: Dignities {
                    dignity: dignity::dignity(g.graha, g.longitude),
                    sign_lord: position.sign.lord(),
                    is_vargottama: navamsa == position.sign,
                },
                shadbala,
                aspects: planet_aspects,
                position,
            }
        })
        .collect();

    let houses = build_houses(&ascendant, &planets);

    let planet_longitudes: Vec<(Graha, f64)> =
        grahas.iter().map(|g| (g.graha, g.longitude)).collect();
    let divisional_charts = Varga::all()
        .iter()
        .map(|v| {
            (
                v.code().to_string(),
                varga::divisional_chart(*v, ascendant_longitude, &planet_longitudes),
            )
        })
        .collect();

    let before_sunrise = rise_set.map_or(false, |rs| julian_day < rs.rise);
    let panchanga = panchanga::compute_panchanga(sun, moon, local, before_sunrise);

    let rasi_signs: BTreeMap<Graha, ZodiacSign> = placements
        .iter()
        .filter(|(graha, _)| !graha.is_node())
        .cloned()
        .collect();

    tracing::debug!(
        "Computed chart for {} at {:.3}, {:.3} (ayanamsa {} {:.4})",
        local,
        birth.latitude,
        birth.longitude,
        ayanamsa.name,
        ayanamsa.value
    );

    Ok(VedicChart {
        person: Person {
            birth_datetime: local,
            latitude: birth.latitude,
            longitude: birth.longitude,
            timezone_offset: birth.timezone_offset,
            timezone: Some(offset_label(birth.timezone_offset)),
            name: None,
        },
        ayanamsa,
        d1_chart: Arc::new(RasiChart {
            ascendant: ascendant.clone(),
            planets,
            houses,
        }),
        divisional_charts: Arc::new(divisional_charts),
        panchanga,
        dashas: Arc::new(dasha::compute_dashas(moon, local)),
        ashtakavarga: Arc::new(ashtakavarga::compute_ashtakavarga(&rasi_signs, ascendant.sign)),
    })
}

/// Local mean solar time in hours after midnight
fn local_mean_time(local: NaiveDateTime, timezone_offset: f64, longitude: f64) -> f64 {
    let clock = local.hour() as f64 + local.minute() as f64 / 60.0 + local.second() as f64 / 3600.0;
    (clock - timezone_offset + longitude / 15.0).rem_euclid(24.0)
}

fn build_houses(ascendant: &SiderealPosition, planets: &[PlanetPlacement]) -> Vec<House> {
    (1..=12)
        .map(|number| {
            let sign = ascendant.sign.nth(number);
            let first = number == 1;
            House {
                number: number as u8,
                sign,
                lord: sign.lord(),
                sign_degrees: first.then_some(ascendant.sign_degrees),
                nakshatra: first.then_some(ascendant.nakshatra),
                pada: first.then_some(ascendant.pada),
                occupants: planets
                    .iter()
                    .filter(|p| p.position.sign == sign)
                    .map(|p| p.celestial_body)
                    .collect(),
            }
        })
        .collect()
}

/// Sunrise and sunset on the birth date at the birth place
pub fn sunrise_sunset(birth: &BirthDetails) -> Result<SunriseSunset> {
    let local = birth.local_datetime()?;
    birth.validate()?;

    let julian_day = local_to_julian_day(local, birth.timezone_offset);
    let midnight = birth.midnight_julian_day(local);

    let rise_set = {
        let _guard = lock_ephemeris();
        calc_sun_rise_set(midnight, birth.latitude, birth.longitude)
            .map_err(ChartError::Ephemeris)?
    };
    let RiseSet { rise, set } = rise_set.ok_or(ChartError::NoSunrise(birth.latitude))?;

    Ok(SunriseSunset {
        sunrise_hours_from_midnight: (rise - midnight) * 24.0,
        sunset_hours_from_midnight: (set - midnight) * 24.0,
        day_birth: rise <= julian_day && julian_day < set,
    })
}
