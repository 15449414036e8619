//! Divisional charts (vargas) by the Parashari rules

use crate::models::{
    normalize_degrees, DivisionalChart, Element, Graha, Modality, Varga, VargaHouse, VargaOccupant, VargaPoint,
    ZodiacSign,
};

/// Trimsamsa segments for odd signs: (end degree, sign). Even signs mirror them.
const TRIMSAMSA_ODD: [(f64, ZodiacSign); 5] = [
    (5.0, ZodiacSign::Aries),
    (10.0, ZodiacSign::Aquarius),
    (18.0, ZodiacSign::Sagittarius),
    (25.0, ZodiacSign::Gemini),
    (30.0, ZodiacSign::Libra),
];
const TRIMSAMSA_EVEN: [(f64, ZodiacSign); 5] = [
    (5.0, ZodiacSign::Taurus),
    (12.0, ZodiacSign::Virgo),
    (20.0, ZodiacSign::Pisces),
    (25.0, ZodiacSign::Capricorn),
    (30.0, ZodiacSign::Scorpio),
];

/// Sign and degrees of a sidereal longitude in a divisional chart
///
/// Degrees are the position scaled into the division, so each part spans
/// a full 30°.
pub fn varga_position(varga: Varga, longitude: f64) -> VargaPoint {
    let longitude = normalize_degrees(longitude);
    let sign = ZodiacSign::from_longitude(longitude);
    let degrees = longitude - sign.start_degree();

    if varga == Varga::D30 {
        return trimsamsa(sign, degrees);
    }

    let n = varga.divisions() as f64;
    let part_span = 30.0 / n;
    let part = ((degrees / part_span).floor() as usize).min(varga.divisions() as usize - 1);
    let s = sign.index();
    let odd = sign.is_odd();

    let varga_sign = match varga {
        Varga::D2 => match (odd, part) {
            (true, 0) | (false, 1) => ZodiacSign::Leo,
            _ => ZodiacSign::Cancer,
        },
        Varga::D3 => ZodiacSign::from_index(s + 4 * part),
        Varga::D4 => ZodiacSign::from_index(s + 3 * part),
        Varga::D7 => ZodiacSign::from_index(s + part + if odd { 0 } else { 6 }),
        Varga::D9 => {
            let start = match sign.element() {
                Element::Fire => ZodiacSign::Aries,
                Element::Earth => ZodiacSign::Capricorn,
                Element::Air => ZodiacSign::Libra,
                Element::Water => ZodiacSign::Cancer,
            };
            ZodiacSign::from_index(start.index() + part)
        }
        Varga::D10 => ZodiacSign::from_index(s + part + if odd { 0 } else { 8 }),
        Varga::D12 => ZodiacSign::from_index(s + part),
        Varga::D16 => {
            let start = match sign.modality() {
                Modality::Movable => 0,
                Modality::Fixed => 4,
                Modality::Dual => 8,
            };
            ZodiacSign::from_index(start + part)
        }
        Varga::D24 => ZodiacSign::from_index(part + if odd { 4 } else { 3 }),
        Varga::D27 => ZodiacSign::from_index(s * 27 + part),
        Varga::D60 => ZodiacSign::from_index(s + part),
        Varga::D30 => unreachable!(),
    };

    VargaPoint {
        sign: varga_sign,
        sign_degrees: (degrees * n).rem_euclid(30.0),
    }
}

fn trimsamsa(sign: ZodiacSign, degrees: f64) -> VargaPoint {
    let segments = if sign.is_odd() {
        &TRIMSAMSA_ODD
    } else {
        &TRIMSAMSA_EVEN
    };

    let mut start = 0.0;
    for &(end, varga_sign) in segments.iter() {
        if degrees < end {
            return VargaPoint {
                sign: varga_sign,
                sign_degrees: (degrees - start) / (end - start) * 30.0,
            };
        }
        start = end;
    }

    let (_, last) = segments[segments.len() - 1];
    VargaPoint {
        sign: last,
        sign_degrees: 30.0,
    }
}

/// Build a divisional chart with whole-sign houses from the varga ascendant
pub fn divisional_chart(
    varga: Varga,
    ascendant_longitude: f64,
    planets: &[(Graha, f64)],
) -> DivisionalChart {
    let ascendant = varga_position(varga, ascendant_longitude);

    let occupants: Vec<VargaOccupant> = planets
        .iter()
        .map(|(graha, longitude)| {
            let point = varga_position(varga, *longitude);
            VargaOccupant {
                celestial_body: *graha,
                sign: point.sign,
                sign_degrees: point.sign_degrees,
            }
        })
        .collect();

    let houses = (1..=12)
        .map(|number| {
            let sign = ascendant.sign.nth(number);
            VargaHouse {
                number: number as u8,
                sign,
                lord: sign.lord(),
                occupants: occupants.iter().filter(|o| o.sign == sign).cloned().collect(),
            }
        })
        .collect();

    DivisionalChart {
        code: varga.code().to_string(),
        name: varga.name().to_string(),
        ascendant,
        houses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_of(varga: Varga, longitude: f64) -> ZodiacSign {
        varga_position(varga, longitude).sign
    }

    #[test]
    fn navamsa_starting_signs_follow_elements() {
        // Fire signs start from Aries, earth from Capricorn, air from Libra, water from Cancer
        assert_eq!(sign_of(Varga::D9, 0.5), ZodiacSign::Aries);
        assert_eq!(sign_of(Varga::D9, 30.5), ZodiacSign::Capricorn);
        assert_eq!(sign_of(Varga::D9, 60.5), ZodiacSign::Libra);
        assert_eq!(sign_of(Varga::D9, 90.5), ZodiacSign::Cancer);
        // Last navamsa of Pisces is Pisces
        assert_eq!(sign_of(Varga::D9, 359.9), ZodiacSign::Pisces);
    }

    #[test]
    fn hora_alternates_between_sun_and_moon() {
        assert_eq!(sign_of(Varga::D2, 10.0), ZodiacSign::Leo);
        assert_eq!(sign_of(Varga::D2, 20.0), ZodiacSign::Cancer);
        assert_eq!(sign_of(Varga::D2, 40.0), ZodiacSign::Cancer);
        assert_eq!(sign_of(Varga::D2, 50.0), ZodiacSign::Leo);
    }

    #[test]
    fn drekkana_and_dasamsa() {
        // Third decanate of Aries is Sagittarius
        assert_eq!(sign_of(Varga::D3, 25.0), ZodiacSign::Sagittarius);
        // First dasamsa of Taurus (even) starts from the ninth sign, Capricorn
        assert_eq!(sign_of(Varga::D10, 31.0), ZodiacSign::Capricorn);
        // First saptamsa of Taurus starts from the seventh sign, Scorpio
        assert_eq!(sign_of(Varga::D7, 31.0), ZodiacSign::Scorpio);
    }

    #[test]
    fn trimsamsa_uses_unequal_segments() {
        assert_eq!(sign_of(Varga::D30, 4.0), ZodiacSign::Aries);
        assert_eq!(sign_of(Varga::D30, 15.0), ZodiacSign::Sagittarius);
        assert_eq!(sign_of(Varga::D30, 30.0 + 4.0), ZodiacSign::Taurus);
        assert_eq!(sign_of(Varga::D30, 30.0 + 29.0), ZodiacSign::Scorpio);
        let point = varga_position(Varga::D30, 14.0);
        assert!((point.sign_degrees - 15.0).abs() < 1e-9);
    }

    #[test]
    fn varga_degrees_scale_with_division() {
        let point = varga_position(Varga::D9, 1.0);
        assert!((point.sign_degrees - 9.0).abs() < 1e-9);
        let point = varga_position(Varga::D60, 0.25);
        assert!((point.sign_degrees - 15.0).abs() < 1e-9);
    }

    #[test]
    fn divisional_chart_places_every_planet_once() {
        let planets = [(Graha::Sun, 78.8), (Graha::Moon, 296.0), (Graha::Mars, 45.2)];
        let chart = divisional_chart(Varga::D9, 130.0, &planets);
        assert_eq!(chart.houses.len(), 12);
        assert_eq!(chart.code, "d9");
        let placed: usize = chart.houses.iter().map(|h| h.occupants.len()).sum();
        assert_eq!(placed, 3);
        assert_eq!(chart.houses[0].sign, chart.ascendant.sign);
    }
}
