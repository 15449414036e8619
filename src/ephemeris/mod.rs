//! Ephemeris access: Swiss Ephemeris FFI, star catalog and ayanamsa

pub mod ayanamsa;
pub mod calculator;
pub mod catalog;
pub mod houses;

pub use ayanamsa::calc_ayanamsa;
pub use calculator::*;
pub use catalog::install_local_catalog_override;
pub use houses::{calc_angles, whole_sign_house, Angles};
