//! Ayanamsa: the offset between the tropical and sidereal zodiacs
//!
//! True Chitra Paksha places Spica at exactly 180° sidereal. Its position is
//! taken from the Hipparcos catalog; without the catalog the Swiss Ephemeris
//! Lahiri model is used instead.

use super::catalog::{self, HipparcosStar, HIPPARCOS_EPOCH_JD};
use super::calculator::{calc_lahiri_ayanamsa, calc_nutation};
use crate::models::{normalize_degrees, Ayanamsa};

pub const TRUE_CHITRA: &str = "True Chitra Paksha";
pub const LAHIRI: &str = "Lahiri";

const J2000_JD: f64 = 2451545.0;
const DAYS_PER_JULIAN_YEAR: f64 = 365.25;
const MAS_PER_DEGREE: f64 = 3_600_000.0;
/// Mean obliquity of the ecliptic at J2000 (IAU 2006), degrees
const OBLIQUITY_J2000: f64 = 23.439_279_444;

/// Apparent tropical longitude of a catalog star on a given date
///
/// Proper motion carries the star from J1991.25; it is then rotated to the
/// J2000 ecliptic, precessed (IAU 2006 general precession in longitude) and
/// nutated to the equinox of date.
pub fn star_longitude_of_date(star: &HipparcosStar, julian_day: f64, nutation: f64) -> f64 {
    let years = (julian_day - HIPPARCOS_EPOCH_JD) / DAYS_PER_JULIAN_YEAR;
    let dec = star.dec_degrees + star.dec_mas_per_year * years / MAS_PER_DEGREE;
    let ra = star.ra_degrees
        + star.ra_mas_per_year * years / MAS_PER_DEGREE / star.dec_degrees.to_radians().cos();

    let (ra, dec, eps) = (ra.to_radians(), dec.to_radians(), OBLIQUITY_J2000.to_radians());
    let lon_j2000 = (ra.sin() * eps.cos() + dec.tan() * eps.sin())
        .atan2(ra.cos())
        .to_degrees();

    let t = (julian_day - J2000_JD) / 36525.0;
    let precession = (5028.796195 * t + 1.1054348 * t * t) / 3600.0;

    normalize_degrees(lon_j2000 + precession + nutation)
}

/// True Chitra Paksha ayanamsa for a star record of Spica
pub fn true_chitra_ayanamsa(spica: &HipparcosStar, julian_day: f64) -> Result<f64, String> {
    let (nutation, _) = calc_nutation(julian_day)?;
    Ok(star_longitude_of_date(spica, julian_day, nutation) - 180.0)
}

/// Ayanamsa for a chart, preferring the catalog-based True Chitra value
///
/// Callers must hold the ephemeris lock.
pub fn calc_ayanamsa(julian_day: f64) -> Result<Ayanamsa, String> {
    ayanamsa_from(catalog::spica().as_ref(), julian_day)
}

/// True Chitra when Spica is known, Lahiri otherwise
pub fn ayanamsa_from(spica: Option<&HipparcosStar>, julian_day: f64) -> Result<Ayanamsa, String> {
    match spica {
        Some(spica) => Ok(Ayanamsa {
            name: TRUE_CHITRA.to_string(),
            value: true_chitra_ayanamsa(spica, julian_day)?,
        }),
        None => Ok(Ayanamsa {
            name: LAHIRI.to_string(),
            value: calc_lahiri_ayanamsa(julian_day),
        }),
    }
}
