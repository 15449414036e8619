use serde::{Deserialize, Serialize};
use std::fmt;

/// Arc of one nakshatra (13°20')
pub const NAKSHATRA_SPAN: f64 = 360.0 / 27.0;

/// Arc of one pada (3°20')
pub const PADA_SPAN: f64 = NAKSHATRA_SPAN / 4.0;

/// Zodiac signs (rashis) in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// Reduce an angle to [0, 360)
///
/// `rem_euclid` rounds tiny negative inputs up to exactly 360.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

impl ZodiacSign {
    /// Get sign from ecliptic longitude (0-360 degrees)
    pub fn from_longitude(longitude: f64) -> Self {
        let normalized = normalize_degrees(longitude);
        let sign_index = (normalized / 30.0).floor() as usize;
        Self::from_index(sign_index)
    }

    /// Get sign from index (0 = Aries, 11 = Pisces), wrapping past Pisces
    pub fn from_index(index: usize) -> Self {
        match index % 12 {
            0 => ZodiacSign::Aries,
            1 => ZodiacSign::Taurus,
            2 => ZodiacSign::Gemini,
            3 => ZodiacSign::Cancer,
            4 => ZodiacSign::Leo,
            5 => ZodiacSign::Virgo,
            6 => ZodiacSign::Libra,
            7 => ZodiacSign::Scorpio,
            8 => ZodiacSign::Sagittarius,
            9 => ZodiacSign::Capricorn,
            10 => ZodiacSign::Aquarius,
            11 => ZodiacSign::Pisces,
            _ => unreachable!(),
        }
    }

    /// Get the starting degree of this sign (0 = Aries start)
    pub fn start_degree(&self) -> f64 {
        self.index() as f64 * 30.0
    }

    /// Get sign index (0 = Aries, 11 = Pisces)
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Sign `n` places ahead, counting this sign as 1 (so `nth(1) == self`)
    pub fn nth(&self, n: usize) -> Self {
        Self::from_index(self.index() + (n + 11) % 12)
    }

    /// Number of signs from `self` to `other`, inclusive (1-12)
    pub fn count_to(&self, other: ZodiacSign) -> usize {
        (other.index() + 12 - self.index()) % 12 + 1
    }

    /// Odd (masculine) signs: Aries, Gemini, Leo, ...
    pub fn is_odd(&self) -> bool {
        self.index() % 2 == 0
    }

    pub fn modality(&self) -> Modality {
        match self.index() % 3 {
            0 => Modality::Movable,
            1 => Modality::Fixed,
            _ => Modality::Dual,
        }
    }

    pub fn element(&self) -> Element {
        match self.index() % 4 {
            0 => Element::Fire,
            1 => Element::Earth,
            2 => Element::Air,
            _ => Element::Water,
        }
    }

    /// Ruling graha of the sign
    pub fn lord(&self) -> Graha {
        match self {
            ZodiacSign::Aries | ZodiacSign::Scorpio => Graha::Mars,
            ZodiacSign::Taurus | ZodiacSign::Libra => Graha::Venus,
            ZodiacSign::Gemini | ZodiacSign::Virgo => Graha::Mercury,
            ZodiacSign::Cancer => Graha::Moon,
            ZodiacSign::Leo => Graha::Sun,
            ZodiacSign::Sagittarius | ZodiacSign::Pisces => Graha::Jupiter,
            ZodiacSign::Capricorn | ZodiacSign::Aquarius => Graha::Saturn,
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    Movable,
    Fixed,
    Dual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

/// The nine grahas of Vedic astrology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, schemars::JsonSchema)]
pub enum Graha {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    /// North (ascending) lunar node, mean position
    Rahu,
    /// South lunar node, always opposite Rahu
    Ketu,
}

impl Graha {
    /// All nine grahas in traditional order
    pub fn all() -> &'static [Graha] {
        &[
            Graha::Sun,
            Graha::Moon,
            Graha::Mars,
            Graha::Mercury,
            Graha::Jupiter,
            Graha::Venus,
            Graha::Saturn,
            Graha::Rahu,
            Graha::Ketu,
        ]
    }

    /// The seven visible planets (no nodes)
    pub fn planets() -> &'static [Graha] {
        &Self::all()[..7]
    }

    /// Get Swiss Ephemeris body ID. Ketu has none; it is derived from Rahu.
    pub fn swe_id(&self) -> Option<i32> {
        match self {
            Graha::Sun => Some(0),      // SE_SUN
            Graha::Moon => Some(1),     // SE_MOON
            Graha::Mercury => Some(2),  // SE_MERCURY
            Graha::Venus => Some(3),    // SE_VENUS
            Graha::Mars => Some(4),     // SE_MARS
            Graha::Jupiter => Some(5),  // SE_JUPITER
            Graha::Saturn => Some(6),   // SE_SATURN
            Graha::Rahu => Some(10),    // SE_MEAN_NODE
            Graha::Ketu => None,
        }
    }

    /// Whether this body can be retrograde
    pub fn can_retrograde(&self) -> bool {
        !matches!(self, Graha::Sun | Graha::Moon)
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Graha::Rahu | Graha::Ketu)
    }

    /// Natural benefics for paksha and drik bala
    pub fn is_natural_benefic(&self) -> bool {
        matches!(self, Graha::Moon | Graha::Mercury | Graha::Jupiter | Graha::Venus)
    }

    /// Mean daily motion in longitude (degrees/day)
    pub fn mean_daily_motion(&self) -> f64 {
        match self {
            Graha::Sun => 0.9856,
            Graha::Moon => 13.1764,
            Graha::Mars => 0.5240,
            Graha::Mercury => 0.9856,
            Graha::Jupiter => 0.0831,
            Graha::Venus => 0.9856,
            Graha::Saturn => 0.0335,
            Graha::Rahu | Graha::Ketu => 0.0529,
        }
    }
}

impl fmt::Display for Graha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Graha::Sun => "Sun",
            Graha::Moon => "Moon",
            Graha::Mars => "Mars",
            Graha::Mercury => "Mercury",
            Graha::Jupiter => "Jupiter",
            Graha::Venus => "Venus",
            Graha::Saturn => "Saturn",
            Graha::Rahu => "Rahu",
            Graha::Ketu => "Ketu",
        };
        write!(f, "{}", name)
    }
}

/// The 27 lunar mansions, starting at 0° sidereal Aries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
pub enum Nakshatra {
    Ashwini,
    Bharani,
    Krittika,
    Rohini,
    Mrigashira,
    Ardra,
    Punarvasu,
    Pushya,
    Ashlesha,
    Magha,
    #[serde(rename = "Purva Phalguni")]
    PurvaPhalguni,
    #[serde(rename = "Uttara Phalguni")]
    UttaraPhalguni,
    Hasta,
    Chitra,
    Swati,
    Vishakha,
    Anuradha,
    Jyeshtha,
    Mula,
    #[serde(rename = "Purva Ashadha")]
    PurvaAshadha,
    #[serde(rename = "Uttara Ashadha")]
    UttaraAshadha,
    Shravana,
    Dhanishta,
    Shatabhisha,
    #[serde(rename = "Purva Bhadrapada")]
    PurvaBhadrapada,
    #[serde(rename = "Uttara Bhadrapada")]
    UttaraBhadrapada,
    Revati,
}

const NAKSHATRAS: [Nakshatra; 27] = [
    Nakshatra::Ashwini,
    Nakshatra::Bharani,
    Nakshatra::Krittika,
    Nakshatra::Rohini,
    Nakshatra::Mrigashira,
    Nakshatra::Ardra,
    Nakshatra::Punarvasu,
    Nakshatra::Pushya,
    Nakshatra::Ashlesha,
    Nakshatra::Magha,
    Nakshatra::PurvaPhalguni,
    Nakshatra::UttaraPhalguni,
    Nakshatra::Hasta,
    Nakshatra::Chitra,
    Nakshatra::Swati,
    Nakshatra::Vishakha,
    Nakshatra::Anuradha,
    Nakshatra::Jyeshtha,
    Nakshatra::Mula,
    Nakshatra::PurvaAshadha,
    Nakshatra::UttaraAshadha,
    Nakshatra::Shravana,
    Nakshatra::Dhanishta,
    Nakshatra::Shatabhisha,
    Nakshatra::PurvaBhadrapada,
    Nakshatra::UttaraBhadrapada,
    Nakshatra::Revati,
];

impl Nakshatra {
    /// Get nakshatra from sidereal longitude
    pub fn from_longitude(longitude: f64) -> Self {
        let index = (normalize_degrees(longitude) / NAKSHATRA_SPAN).floor() as usize;
        NAKSHATRAS[index.min(26)]
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Vimshottari lord; the nine-lord sequence repeats three times from Ashwini
    pub fn lord(&self) -> Graha {
        const LORDS: [Graha; 9] = [
            Graha::Ketu,
            Graha::Venus,
            Graha::Sun,
            Graha::Moon,
            Graha::Mars,
            Graha::Rahu,
            Graha::Jupiter,
            Graha::Saturn,
            Graha::Mercury,
        ];
        LORDS[self.index() % 9]
    }

    /// Pada (quarter, 1-4) of a sidereal longitude within its nakshatra
    pub fn pada_of(longitude: f64) -> u8 {
        let within = normalize_degrees(longitude) % NAKSHATRA_SPAN;
        ((within / PADA_SPAN).floor() as u8).min(3) + 1
    }

    /// Fraction (0-1) of the nakshatra already traversed at a longitude
    pub fn fraction_elapsed(longitude: f64) -> f64 {
        (normalize_degrees(longitude) % NAKSHATRA_SPAN) / NAKSHATRA_SPAN
    }
}

impl fmt::Display for Nakshatra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Nakshatra::PurvaPhalguni => "Purva Phalguni",
            Nakshatra::UttaraPhalguni => "Uttara Phalguni",
            Nakshatra::PurvaAshadha => "Purva Ashadha",
            Nakshatra::UttaraAshadha => "Uttara Ashadha",
            Nakshatra::PurvaBhadrapada => "Purva Bhadrapada",
            Nakshatra::UttaraBhadrapada => "Uttara Bhadrapada",
            other => return write!(f, "{:?}", other),
        };
        write!(f, "{}", name)
    }
}

/// A sidereal position with sign, degree and nakshatra
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SiderealPosition {
    pub sign: ZodiacSign,
    /// Degree within the sign (0-29.999...)
    pub sign_degrees: f64,
    /// Full sidereal longitude (0-360)
    pub longitude: f64,
    pub nakshatra: Nakshatra,
    pub pada: u8,
}

impl SiderealPosition {
    pub fn from_longitude(longitude: f64) -> Self {
        let normalized = normalize_degrees(longitude);
        let sign = ZodiacSign::from_longitude(normalized);
        Self {
            sign,
            sign_degrees: normalized - sign.start_degree(),
            longitude: normalized,
            nakshatra: Nakshatra::from_longitude(normalized),
            pada: Nakshatra::pada_of(normalized),
        }
    }
}
