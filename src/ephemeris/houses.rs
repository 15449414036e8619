//! Ascendant and midheaven using Swiss Ephemeris
//!
//! Vedic charts use whole-sign houses, so only the angles are taken from the
//! library; house membership is derived from the sidereal ascendant sign.

use crate::models::ZodiacSign;

// Whole sign; the cusps are ignored, only ascmc is read
const HOUSE_WHOLE_SIGN: i32 = b'W' as i32;

/// Tropical angles at a given time and place
#[derive(Debug, Clone, Copy)]
pub struct Angles {
    /// Ascendant (tropical longitude)
    pub ascendant: f64,
    /// Midheaven (tropical longitude)
    pub midheaven: f64,
    /// ARMC (sidereal time at location, degrees)
    pub armc: f64,
}

/// Calculate the ascendant and midheaven for a given time and location
pub fn calc_angles(julian_day: f64, latitude: f64, longitude: f64) -> Result<Angles, String> {
    super::init_ephemeris(None);

    // Swiss Ephemeris uses a 13-element array for cusps (index 1-12)
    // and a 10-element array for special points
    let mut cusps: [f64; 13] = [0.0; 13];
    let mut ascmc: [f64; 10] = [0.0; 10];

    let ret = unsafe {
        libswisseph_sys::swe_houses(
            julian_day,
            latitude,
            longitude,
            HOUSE_WHOLE_SIGN,
            cusps.as_mut_ptr(),
            ascmc.as_mut_ptr(),
        )
    };

    if ret < 0 {
        return Err("Failed to calculate houses".to_string());
    }

    Ok(Angles {
        ascendant: ascmc[0],
        midheaven: ascmc[1],
        armc: ascmc[2],
    })
}

/// Whole-sign house (1-12) of a sign, counted from the ascendant sign
pub fn whole_sign_house(ascendant_sign: ZodiacSign, sign: ZodiacSign) -> u8 {
    ascendant_sign.count_to(sign) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::datetime_to_julian_day;
    use chrono::NaiveDate;

    #[test]
    fn whole_sign_houses_wrap() {
        assert_eq!(whole_sign_house(ZodiacSign::Leo, ZodiacSign::Leo), 1);
        assert_eq!(whole_sign_house(ZodiacSign::Leo, ZodiacSign::Aquarius), 7);
        assert_eq!(whole_sign_house(ZodiacSign::Leo, ZodiacSign::Cancer), 12);
    }

    #[test]
    fn midheaven_is_about_ninety_degrees_behind_ascendant() {
        let _guard = crate::ephemeris::lock_ephemeris();
        let jd = datetime_to_julian_day(
            NaiveDate::from_ymd_opt(1996, 7, 4)
                .unwrap()
                .and_hms_opt(3, 40, 0)
                .unwrap(),
        );
        let angles = calc_angles(jd, 18.404, 75.195).unwrap();
        let separation = (angles.ascendant - angles.midheaven).rem_euclid(360.0);
        // Near the tropics the separation stays within a few dozen degrees of 90
        assert!(separation > 60.0 && separation < 120.0, "separation {}", separation);
    }
}
