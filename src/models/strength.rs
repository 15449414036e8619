use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Graha;

/// Benefic points per sign, Aries first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignPoints {
    pub points: [u8; 12],
    pub total: u32,
}

impl SignPoints {
    pub fn new(points: [u8; 12]) -> Self {
        let total = points.iter().map(|&p| p as u32).sum();
        Self { points, total }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ashtakavarga {
    pub sarvashtakavarga: SignPoints,
    /// One entry per planet (Sun through Saturn)
    pub bhinnashtakavarga: BTreeMap<Graha, SignPoints>,
}

/// Six-fold strength of a planet, in virupas unless noted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shadbala {
    pub uchcha_bala: f64,
    pub kendradi_bala: f64,
    pub ojayugma_bala: f64,
    pub sthana_bala: f64,
    pub dig_bala: f64,
    pub nathonnatha_bala: f64,
    pub paksha_bala: f64,
    pub kala_bala: f64,
    pub chesta_bala: f64,
    pub naisargika_bala: f64,
    pub drik_bala: f64,
    pub total_virupas: f64,
    pub total_rupas: f64,
    pub required_rupas: f64,
    /// total_rupas / required_rupas; at least 1.0 means sufficiently strong
    pub strength_ratio: f64,
}
