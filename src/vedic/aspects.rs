//! Graha drishti: sign-based planetary aspects

use std::collections::BTreeMap;

use crate::models::{AspectGiven, AspectReceived, Graha, PlanetAspects, ZodiacSign};

/// Houses aspected by a graha, counted from its own house
pub fn aspect_numbers(graha: Graha) -> &'static [u8] {
    match graha {
        Graha::Mars => &[4, 7, 8],
        Graha::Jupiter => &[5, 7, 9],
        Graha::Saturn => &[3, 7, 10],
        Graha::Rahu | Graha::Ketu => &[5, 7, 9],
        _ => &[7],
    }
}

/// Aspects given and received by every graha
///
/// `placements` holds each graha's sign; `ascendant` fixes house numbers.
pub fn compute_aspects(
    placements: &[(Graha, ZodiacSign)],
    ascendant: ZodiacSign,
) -> BTreeMap<Graha, PlanetAspects> {
    let mut result: BTreeMap<Graha, PlanetAspects> = placements
        .iter()
        .map(|(graha, _)| (*graha, PlanetAspects::default()))
        .collect();

    for (graha, sign) in placements {
        for &aspect in aspect_numbers(*graha) {
            let target = sign.nth(aspect as usize);
            let to_planets: Vec<Graha> = placements
                .iter()
                .filter(|(other, other_sign)| other != graha && *other_sign == target)
                .map(|(other, _)| *other)
                .collect();

            for other in &to_planets {
                if let Some(entry) = result.get_mut(other) {
                    entry.receives.push(AspectReceived {
                        from_planet: *graha,
                        aspect,
                    });
                }
            }

            if let Some(entry) = result.get_mut(graha) {
                entry.gives.push(AspectGiven {
                    aspect,
                    to_house: ascendant.count_to(target) as u8,
                    to_sign: target,
                    to_planets,
                });
            }
        }
    }

    result
}
