//! Ashtakavarga: benefic points contributed to each sign

use std::collections::BTreeMap;

use crate::models::{Ashtakavarga, Graha, SignPoints, ZodiacSign};

/// A contributor to a planet's ashtakavarga: one of the seven planets or the Lagna
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contributor {
    Planet(Graha),
    Lagna,
}

const CONTRIBUTORS: [Contributor; 8] = [
    Contributor::Planet(Graha::Sun),
    Contributor::Planet(Graha::Moon),
    Contributor::Planet(Graha::Mars),
    Contributor::Planet(Graha::Mercury),
    Contributor::Planet(Graha::Jupiter),
    Contributor::Planet(Graha::Venus),
    Contributor::Planet(Graha::Saturn),
    Contributor::Lagna,
];

/// Benefic places counted from each contributor, in the order Sun..Saturn, Lagna
type Places = [&'static [u8]; 8];

const SUN_PLACES: Places = [
    &[1, 2, 4, 7, 8, 9, 10, 11],
    &[3, 6, 10, 11],
    &[1, 2, 4, 7, 8, 9, 10, 11],
    &[3, 5, 6, 9, 10, 11, 12],
    &[5, 6, 9, 11],
    &[6, 7, 12],
    &[1, 2, 4, 7, 8, 9, 10, 11],
    &[3, 4, 6, 10, 11, 12],
];

const MOON_PLACES: Places = [
    &[3, 6, 7, 8, 10, 11],
    &[1, 3, 6, 7, 10, 11],
    &[2, 3, 5, 6, 9, 10, 11],
    &[1, 3, 4, 5, 7, 8, 10, 11],
    &[1, 4, 7, 8, 10, 11, 12],
    &[3, 4, 5, 7, 9, 10, 11],
    &[3, 5, 6, 11],
    &[3, 6, 10, 11],
];

const MARS_PLACES: Places = [
    &[3, 5, 6, 10, 11],
    &[3, 6, 11],
    &[1, 2, 4, 7, 8, 10, 11],
    &[3, 5, 6, 11],
    &[6, 10, 11, 12],
    &[6, 8, 11, 12],
    &[1, 4, 7, 8, 9, 10, 11],
    &[1, 3, 6, 10, 11],
];

const MERCURY_PLACES: Places = [
    &[5, 6, 9, 11, 12],
    &[2, 4, 6, 8, 10, 11],
    &[1, 2, 4, 7, 8, 9, 10, 11],
    &[1, 3, 5, 6, 9, 10, 11, 12],
    &[6, 8, 11, 12],
    &[1, 2, 3, 4, 5, 8, 9, 11],
    &[1, 2, 4, 7, 8, 9, 10, 11],
    &[1, 2, 4, 6, 8, 10, 11],
];

const JUPITER_PLACES: Places = [
    &[1, 2, 3, 4, 7, 8, 9, 10, 11],
    &[2, 5, 7, 9, 11],
    &[1, 2, 4, 7, 8, 10, 11],
    &[1, 2, 4, 5, 6, 9, 10, 11],
    &[1, 2, 3, 4, 7, 8, 10, 11],
    &[2, 5, 6, 9, 10, 11],
    &[3, 5, 6, 12],
    &[1, 2, 4, 5, 6, 7, 9, 10, 11],
];

const VENUS_PLACES: Places = [
    &[8, 11, 12],
    &[1, 2, 3, 4, 5, 8, 9, 11, 12],
    &[3, 5, 6, 9, 11, 12],
    &[3, 5, 6, 9, 11],
    &[5, 8, 9, 10, 11],
    &[1, 2, 3, 4, 5, 8, 9, 10, 11],
    &[3, 4, 5, 8, 9, 10, 11],
    &[1, 2, 3, 4, 5, 8, 9, 11],
];

const SATURN_PLACES: Places = [
    &[1, 2, 4, 7, 8, 10, 11],
    &[3, 6, 11],
    &[3, 5, 6, 10, 11, 12],
    &[6, 8, 9, 10, 11, 12],
    &[5, 6, 11, 12],
    &[6, 11, 12],
    &[3, 5, 6, 11],
    &[1, 3, 4, 6, 10, 11],
];

const NO_PLACES: Places = [&[], &[], &[], &[], &[], &[], &[], &[]];

fn benefic_places(graha: Graha) -> Places {
    match graha {
        Graha::Sun => SUN_PLACES,
        Graha::Moon => MOON_PLACES,
        Graha::Mars => MARS_PLACES,
        Graha::Mercury => MERCURY_PLACES,
        Graha::Jupiter => JUPITER_PLACES,
        Graha::Venus => VENUS_PLACES,
        Graha::Saturn => SATURN_PLACES,
        Graha::Rahu | Graha::Ketu => NO_PLACES,
    }
}

/// Bhinnashtakavarga of one planet
pub fn bhinnashtakavarga(
    graha: Graha,
    signs: &BTreeMap<Graha, ZodiacSign>,
    lagna: ZodiacSign,
) -> SignPoints {
    let mut points = [0u8; 12];

    for (contributor, places) in CONTRIBUTORS.iter().zip(benefic_places(graha)) {
        let from = match contributor {
            Contributor::Planet(g) => match signs.get(g) {
                Some(sign) => *sign,
                None => continue,
            },
            Contributor::Lagna => lagna,
        };
        for &place in places {
            points[from.nth(place as usize).index()] += 1;
        }
    }

    SignPoints::new(points)
}

/// Ashtakavarga of a chart from the rasi signs of the seven planets and Lagna
pub fn compute_ashtakavarga(signs: &BTreeMap<Graha, ZodiacSign>, lagna: ZodiacSign) -> Ashtakavarga {
    let bhinnashtakavarga: BTreeMap<Graha, SignPoints> = Graha::planets()
        .iter()
        .map(|graha| (*graha, bhinnashtakavarga(*graha, signs, lagna)))
        .collect();

    let mut sarva = [0u8; 12];
    for bav in bhinnashtakavarga.values() {
        for (total, points) in sarva.iter_mut().zip(bav.points.iter()) {
            *total += points;
        }
    }

    Ashtakavarga {
        sarvashtakavarga: SignPoints::new(sarva),
        bhinnashtakavarga,
    }
}
