//! Planetary dignity (exaltation, own sign, friendship with the sign lord)

use crate::models::{normalize_degrees, Dignity, Graha, ZodiacSign};

/// Deep exaltation point (sidereal longitude)
pub fn exaltation_longitude(graha: Graha) -> f64 {
    match graha {
        Graha::Sun => 10.0,      // Aries 10
        Graha::Moon => 33.0,     // Taurus 3
        Graha::Mars => 298.0,    // Capricorn 28
        Graha::Mercury => 165.0, // Virgo 15
        Graha::Jupiter => 95.0,  // Cancer 5
        Graha::Venus => 357.0,   // Pisces 27
        Graha::Saturn => 200.0,  // Libra 20
        Graha::Rahu => 50.0,     // Taurus 20
        Graha::Ketu => 230.0,    // Scorpio 20
    }
}

pub fn exaltation_sign(graha: Graha) -> ZodiacSign {
    ZodiacSign::from_longitude(exaltation_longitude(graha))
}

pub fn debilitation_sign(graha: Graha) -> ZodiacSign {
    exaltation_sign(graha).nth(7)
}

/// Moolatrikona sign and degree range within it
fn moolatrikona(graha: Graha) -> Option<(ZodiacSign, f64, f64)> {
    match graha {
        Graha::Sun => Some((ZodiacSign::Leo, 0.0, 20.0)),
        Graha::Moon => Some((ZodiacSign::Taurus, 3.0, 30.0)),
        Graha::Mars => Some((ZodiacSign::Aries, 0.0, 12.0)),
        Graha::Mercury => Some((ZodiacSign::Virgo, 15.0, 20.0)),
        Graha::Jupiter => Some((ZodiacSign::Sagittarius, 0.0, 10.0)),
        Graha::Venus => Some((ZodiacSign::Libra, 0.0, 15.0)),
        Graha::Saturn => Some((ZodiacSign::Aquarius, 0.0, 20.0)),
        Graha::Rahu | Graha::Ketu => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    Friend,
    Neutral,
    Enemy,
}

/// Natural (naisargika) relationship of `graha` towards `other`
///
/// The nodes borrow the relationships of Saturn (Rahu) and Mars (Ketu).
pub fn natural_relationship(graha: Graha, other: Graha) -> Relationship {
    use Graha::*;
    use Relationship::*;

    let graha = match graha {
        Rahu => Saturn,
        Ketu => Mars,
        g => g,
    };
    if graha == other {
        return Friend;
    }

    let friends: &[Graha] = match graha {
        Sun => &[Moon, Mars, Jupiter],
        Moon => &[Sun, Mercury],
        Mars => &[Sun, Moon, Jupiter],
        Mercury => &[Sun, Venus],
        Jupiter => &[Sun, Moon, Mars],
        Venus => &[Mercury, Saturn],
        Saturn => &[Mercury, Venus],
        Rahu | Ketu => unreachable!(),
    };
    let enemies: &[Graha] = match graha {
        Sun => &[Venus, Saturn],
        Moon => &[],
        Mars => &[Mercury],
        Mercury => &[Moon],
        Jupiter => &[Mercury, Venus],
        Venus => &[Sun, Moon],
        Saturn => &[Sun, Moon, Mars],
        Rahu | Ketu => unreachable!(),
    };

    if friends.contains(&other) {
        Friend
    } else if enemies.contains(&other) {
        Enemy
    } else {
        Neutral
    }
}

/// Dignity of a graha at a sidereal longitude
pub fn dignity(graha: Graha, longitude: f64) -> Dignity {
    let sign = ZodiacSign::from_longitude(longitude);
    let degrees = normalize_degrees(longitude) - sign.start_degree();

    // Moon and Mercury have their moolatrikona inside the exaltation sign
    if let Some((mt_sign, from, to)) = moolatrikona(graha) {
        if sign == mt_sign && degrees >= from && degrees < to {
            return Dignity::Moolatrikona;
        }
    }
    if sign == exaltation_sign(graha) {
        return Dignity::Exalted;
    }
    if sign == debilitation_sign(graha) {
        return Dignity::Debilitated;
    }

    let lord = sign.lord();
    if lord == graha {
        return Dignity::OwnSign;
    }
    match natural_relationship(graha, lord) {
        Relationship::Friend => Dignity::Friend,
        Relationship::Neutral => Dignity::Neutral,
        Relationship::Enemy => Dignity::Enemy,
    }
}
