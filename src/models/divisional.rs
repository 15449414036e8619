use serde::{Deserialize, Serialize};

use super::{Graha, ZodiacSign};

/// Supported divisional charts, in ascending order of division
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Varga {
    D2,
    D3,
    D4,
    D7,
    D9,
    D10,
    D12,
    D16,
    D24,
    D27,
    D30,
    D60,
}

impl Varga {
    pub fn all() -> &'static [Varga] {
        &[
            Varga::D2,
            Varga::D3,
            Varga::D4,
            Varga::D7,
            Varga::D9,
            Varga::D10,
            Varga::D12,
            Varga::D16,
            Varga::D24,
            Varga::D27,
            Varga::D30,
            Varga::D60,
        ]
    }

    /// Parse a chart code such as "d9" or " D10 "
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_lowercase();
        Self::all().iter().copied().find(|v| v.code() == code)
    }

    pub fn code(&self) -> &'static str {
        match self {
            Varga::D2 => "d2",
            Varga::D3 => "d3",
            Varga::D4 => "d4",
            Varga::D7 => "d7",
            Varga::D9 => "d9",
            Varga::D10 => "d10",
            Varga::D12 => "d12",
            Varga::D16 => "d16",
            Varga::D24 => "d24",
            Varga::D27 => "d27",
            Varga::D30 => "d30",
            Varga::D60 => "d60",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Varga::D2 => "Hora",
            Varga::D3 => "Drekkana",
            Varga::D4 => "Chaturthamsa",
            Varga::D7 => "Saptamsa",
            Varga::D9 => "Navamsa",
            Varga::D10 => "Dasamsa",
            Varga::D12 => "Dwadasamsa",
            Varga::D16 => "Shodasamsa",
            Varga::D24 => "Chaturvimsamsa",
            Varga::D27 => "Bhamsa",
            Varga::D30 => "Trimsamsa",
            Varga::D60 => "Shashtiamsa",
        }
    }

    /// Number of parts each sign is divided into
    pub fn divisions(&self) -> u32 {
        match self {
            Varga::D2 => 2,
            Varga::D3 => 3,
            Varga::D4 => 4,
            Varga::D7 => 7,
            Varga::D9 => 9,
            Varga::D10 => 10,
            Varga::D12 => 12,
            Varga::D16 => 16,
            Varga::D24 => 24,
            Varga::D27 => 27,
            Varga::D30 => 30,
            Varga::D60 => 60,
        }
    }

    /// Comma-separated list of all codes, for error messages
    pub fn valid_codes() -> String {
        Self::all().iter().map(|v| v.code()).collect::<Vec<_>>().join(", ")
    }
}

/// A point (ascendant or graha) placed in a divisional chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VargaPoint {
    pub sign: ZodiacSign,
    pub sign_degrees: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VargaOccupant {
    pub celestial_body: Graha,
    pub sign: ZodiacSign,
    pub sign_degrees: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VargaHouse {
    pub number: u8,
    pub sign: ZodiacSign,
    pub lord: Graha,
    pub occupants: Vec<VargaOccupant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivisionalChart {
    pub code: String,
    pub name: String,
    pub ascendant: VargaPoint,
    pub houses: Vec<VargaHouse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_codes_are_normalized() {
        assert_eq!(Varga::from_code("d9"), Some(Varga::D9));
        assert_eq!(Varga::from_code(" D10 "), Some(Varga::D10));
        assert_eq!(Varga::from_code("d99"), None);
        assert_eq!(Varga::from_code("d1"), None);
    }

    #[test]
    fn valid_codes_lists_all_twelve() {
        let codes = Varga::valid_codes();
        assert!(codes.starts_with("d2, d3"));
        assert!(codes.ends_with("d30, d60"));
        assert_eq!(codes.split(", ").count(), 12);
    }
}
