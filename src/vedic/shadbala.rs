//! Shadbala: the six-fold strength of the seven planets
//!
//! Values are in virupas (60 virupas = 1 rupa). The components computed are
//! sthana (uchcha, kendradi, ojayugmarasyamsa), dig, kala (nathonnatha and
//! paksha), chesta, naisargika and drik bala.

use crate::models::{AspectReceived, Graha, MotionType, Shadbala, ZodiacSign};

use super::dignity::exaltation_longitude;

/// Chart-wide quantities shared by every planet's strength
#[derive(Debug, Clone, Copy)]
pub struct StrengthContext {
    /// Sidereal longitude of the ascendant
    pub ascendant: f64,
    pub sun: f64,
    pub moon: f64,
    /// Declination of the Sun, degrees (north positive)
    pub sun_declination: f64,
    /// Local mean solar time of birth, hours after midnight
    pub local_mean_time: f64,
}

/// One planet's placement as seen by the strength calculation
#[derive(Debug, Clone, Copy)]
pub struct PlanetState<'a> {
    pub graha: Graha,
    pub longitude: f64,
    pub navamsa: ZodiacSign,
    pub house: u8,
    pub speed: f64,
    pub motion: MotionType,
    pub aspects_received: &'a [AspectReceived],
}

/// Minimum total strength, in rupas, for a planet to count as strong
pub fn required_rupas(graha: Graha) -> f64 {
    match graha {
        Graha::Sun => 6.5,
        Graha::Moon => 6.0,
        Graha::Mars => 5.0,
        Graha::Mercury => 7.0,
        Graha::Jupiter => 6.5,
        Graha::Venus => 5.5,
        Graha::Saturn => 5.0,
        Graha::Rahu | Graha::Ketu => 0.0,
    }
}

/// Fixed natural strength: 60 * n / 7 in the order Saturn..Sun
pub fn naisargika_bala(graha: Graha) -> f64 {
    let rank = match graha {
        Graha::Sun => 7.0,
        Graha::Moon => 6.0,
        Graha::Venus => 5.0,
        Graha::Jupiter => 4.0,
        Graha::Mercury => 3.0,
        Graha::Mars => 2.0,
        Graha::Saturn => 1.0,
        Graha::Rahu | Graha::Ketu => 0.0,
    };
    60.0 * rank / 7.0
}

/// Shortest arc between two longitudes (0-180)
fn separation(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(360.0);
    diff.min(360.0 - diff)
}

pub fn uchcha_bala(graha: Graha, longitude: f64) -> f64 {
    let debilitation = exaltation_longitude(graha) + 180.0;
    separation(longitude, debilitation) / 3.0
}

pub fn kendradi_bala(house: u8) -> f64 {
    match house {
        1 | 4 | 7 | 10 => 60.0,
        2 | 5 | 8 | 11 => 30.0,
        _ => 15.0,
    }
}

/// 15 virupas each for an odd/even rasi and navamsa; the Moon and Venus
/// prefer even signs, everyone else odd
pub fn ojayugma_bala(graha: Graha, rasi: ZodiacSign, navamsa: ZodiacSign) -> f64 {
    let prefers_even = matches!(graha, Graha::Moon | Graha::Venus);
    [rasi, navamsa]
        .iter()
        .filter(|sign| sign.is_odd() != prefers_even)
        .count() as f64
        * 15.0
}

/// Directional strength, full at the planet's strong angle
pub fn dig_bala(graha: Graha, longitude: f64, ascendant: f64) -> f64 {
    let strong_point = match graha {
        Graha::Jupiter | Graha::Mercury => ascendant,
        Graha::Sun | Graha::Mars => ascendant - 90.0,
        Graha::Saturn => ascendant + 180.0,
        Graha::Moon | Graha::Venus => ascendant + 90.0,
        Graha::Rahu | Graha::Ketu => return 0.0,
    };
    separation(longitude, strong_point + 180.0) / 3.0
}

/// Day/night strength: diurnal planets peak at noon, nocturnal at midnight
pub fn nathonnatha_bala(graha: Graha, local_mean_time: f64) -> f64 {
    let t = local_mean_time.rem_euclid(24.0);
    let from_midnight = t.min(24.0 - t);
    let day_strength = from_midnight * 5.0;
    match graha {
        Graha::Mercury => 60.0,
        Graha::Sun | Graha::Jupiter | Graha::Venus => day_strength,
        _ => 60.0 - day_strength,
    }
}

/// Lunar-phase strength; benefics gain as the Moon waxes, malefics as it wanes
pub fn paksha_bala(graha: Graha, sun: f64, moon: f64) -> f64 {
    let waxing_strength = separation(moon, sun) / 3.0;
    if graha.is_natural_benefic() {
        waxing_strength
    } else {
        60.0 - waxing_strength
    }
}

/// Motional strength
///
/// The Sun uses its declination (ayana), the Moon its phase; the other
/// planets are scored by motion relative to their mean speed.
pub fn chesta_bala(state: &PlanetState<'_>, ctx: &StrengthContext) -> f64 {
    match state.graha {
        Graha::Sun => ((24.0 + ctx.sun_declination) * 60.0 / 48.0).clamp(0.0, 60.0),
        Graha::Moon => separation(ctx.moon, ctx.sun) / 3.0,
        graha => match state.motion {
            MotionType::Retrograde => 60.0,
            MotionType::Stationary => 15.0,
            MotionType::Direct if state.speed < graha.mean_daily_motion() => 30.0,
            MotionType::Direct => 45.0,
        },
    }
}

/// Aspectual strength: +15 per benefic aspect received, -15 per malefic
pub fn drik_bala(aspects_received: &[AspectReceived]) -> f64 {
    aspects_received
        .iter()
        .map(|a| {
            if a.from_planet.is_natural_benefic() {
                15.0
            } else {
                -15.0
            }
        })
        .sum()
}

/// Full shadbala of a planet; `None` for Rahu and Ketu
pub fn compute_shadbala(state: &PlanetState<'_>, ctx: &StrengthContext) -> Option<Shadbala> {
    let graha = state.graha;
    if graha.is_node() {
        return None;
    }

    let rasi = ZodiacSign::from_longitude(state.longitude);

    let uchcha = uchcha_bala(graha, state.longitude);
    let kendradi = kendradi_bala(state.house);
    let ojayugma = ojayugma_bala(graha, rasi, state.navamsa);
    let sthana = uchcha + kendradi + ojayugma;

    let dig = dig_bala(graha, state.longitude, ctx.ascendant);

    let nathonnatha = nathonnatha_bala(graha, ctx.local_mean_time);
    let paksha = paksha_bala(graha, ctx.sun, ctx.moon);
    let kala = nathonnatha + paksha;

    let chesta = chesta_bala(state, ctx);
    let naisargika = naisargika_bala(graha);
    let drik = drik_bala(state.aspects_received);

    let total_virupas = sthana + dig + kala + chesta + naisargika + drik;
    let total_rupas = total_virupas / 60.0;
    let required = required_rupas(graha);

    Some(Shadbala {
        uchcha_bala: uchcha,
        kendradi_bala: kendradi,
        ojayugma_bala: ojayugma,
        sthana_bala: sthana,
        dig_bala: dig,
        nathonnatha_bala: nathonnatha,
        paksha_bala: paksha,
        kala_bala: kala,
        chesta_bala: chesta,
        naisargika_bala: naisargika,
        drik_bala: drik,
        total_virupas,
        total_rupas,
        required_rupas: required,
        strength_ratio: total_rupas / required,
    })
}
