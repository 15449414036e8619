//! Swiss Ephemeris wrapper for planetary calculations
//!
//! This module provides safe Rust wrappers around the libswisseph-sys FFI bindings.
//! All positions returned here are tropical; sidereal conversion happens in the
//! engine once the ayanamsa is known.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, Once};

use chrono::{Datelike, Duration, NaiveDateTime, Timelike};

use crate::models::{normalize_degrees, Graha};

// Swiss Ephemeris constants
const SE_GREG_CAL: i32 = 1;
const SE_ECL_NUT: i32 = -1;
const SE_SIDM_LAHIRI: i32 = 1;
const SE_CALC_RISE: i32 = 1;
const SE_CALC_SET: i32 = 2;
const SE_BIT_HINDU_RISING: i32 = 128 | 256 | 512; // no ecliptic latitude, disc centre, no refraction
const SEFLG_SPEED: i32 = 256; // Include speed in calculations
const SEFLG_SWIEPH: i32 = 2; // Use Swiss Ephemeris

static INIT: Once = Once::new();

// The C library keeps global state (sidereal mode, file handles)
static SWE_LOCK: Mutex<()> = Mutex::new(());

/// Initialize Swiss Ephemeris (call once at startup)
///
/// With no path the library falls back to the Moshier analytical ephemeris,
/// which gives 0.1 arc seconds precision for planets and 3 arc seconds for the Moon.
pub fn init_ephemeris(ephe_path: Option<&Path>) {
    INIT.call_once(|| {
        let c_path = ephe_path.and_then(|p| CString::new(p.to_string_lossy().as_bytes()).ok());
        match &c_path {
            Some(path) => {
                tracing::info!("Using Swiss Ephemeris files from {}", path.to_string_lossy());
                unsafe { libswisseph_sys::swe_set_ephe_path(path.as_ptr() as *mut c_char) }
            }
            None => unsafe { libswisseph_sys::swe_set_ephe_path(std::ptr::null_mut()) },
        }
    });
}

/// Serialize access to the ephemeris for the duration of the guard
pub fn lock_ephemeris() -> MutexGuard<'static, ()> {
    SWE_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Result of a planetary calculation
#[derive(Debug, Clone)]
pub struct PlanetaryPosition {
    /// Tropical ecliptic longitude (0-360 degrees)
    pub longitude: f64,
    /// Ecliptic latitude
    pub latitude: f64,
    /// Distance (AU)
    pub distance: f64,
    /// Speed in longitude (degrees per day, negative = retrograde)
    pub speed_longitude: f64,
}

/// Convert a UT date/time to Julian Day (UT)
pub fn datetime_to_julian_day(datetime: NaiveDateTime) -> f64 {
    let year = datetime.date().year();
    let month = datetime.date().month() as i32;
    let day = datetime.date().day() as i32;
    let hour = datetime.time().hour() as f64
        + datetime.time().minute() as f64 / 60.0
        + datetime.time().second() as f64 / 3600.0;

    unsafe { libswisseph_sys::swe_julday(year, month, day, hour, SE_GREG_CAL) }
}

/// Convert a local civil time with a fixed UTC offset (hours) to Julian Day (UT)
pub fn local_to_julian_day(local: NaiveDateTime, timezone_offset: f64) -> f64 {
    let offset = Duration::seconds((timezone_offset * 3600.0).round() as i64);
    datetime_to_julian_day(local - offset)
}

fn error_message(serr: &[c_char]) -> String {
    unsafe { CStr::from_ptr(serr.as_ptr()) }
        .to_string_lossy()
        .to_string()
}

/// Calculate the tropical position of a graha at a given Julian Day
///
/// Ketu is returned as the point opposite the mean node.
pub fn calc_planet_position(graha: Graha, julian_day: f64) -> Result<PlanetaryPosition, String> {
    init_ephemeris(None);

    let body = match graha.swe_id() {
        Some(id) => id,
        None => {
            let rahu = calc_planet_position(Graha::Rahu, julian_day)?;
            return Ok(PlanetaryPosition {
                longitude: normalize_degrees(rahu.longitude + 180.0),
                latitude: -rahu.latitude,
                ..rahu
            });
        }
    };

    let mut xx: [f64; 6] = [0.0; 6];
    let mut serr: [c_char; 256] = [0; 256];

    let iflg = SEFLG_SPEED | SEFLG_SWIEPH;

    let ret = unsafe {
        libswisseph_sys::swe_calc_ut(julian_day, body, iflg, xx.as_mut_ptr(), serr.as_mut_ptr())
    };

    if ret < 0 {
        return Err(error_message(&serr));
    }

    Ok(PlanetaryPosition {
        longitude: xx[0],
        latitude: xx[1],
        distance: xx[2],
        speed_longitude: xx[3],
    })
}

/// Calculate tropical positions for all nine grahas
pub fn calc_all_grahas(julian_day: f64) -> Result<Vec<(Graha, PlanetaryPosition)>, String> {
    Graha::all()
        .iter()
        .map(|graha| calc_planet_position(*graha, julian_day).map(|pos| (*graha, pos)))
        .collect()
}

/// Nutation in longitude and true obliquity of the ecliptic, both in degrees
pub fn calc_nutation(julian_day: f64) -> Result<(f64, f64), String> {
    init_ephemeris(None);

    let mut xx: [f64; 6] = [0.0; 6];
    let mut serr: [c_char; 256] = [0; 256];

    let ret = unsafe {
        libswisseph_sys::swe_calc_ut(julian_day, SE_ECL_NUT, 0, xx.as_mut_ptr(), serr.as_mut_ptr())
    };

    if ret < 0 {
        return Err(error_message(&serr));
    }

    Ok((xx[2], xx[0]))
}

/// Lahiri (Chitrapaksha) ayanamsa as modelled by Swiss Ephemeris
pub fn calc_lahiri_ayanamsa(julian_day: f64) -> f64 {
    init_ephemeris(None);
    unsafe {
        libswisseph_sys::swe_set_sid_mode(SE_SIDM_LAHIRI, 0.0, 0.0);
        libswisseph_sys::swe_get_ayanamsa_ut(julian_day)
    }
}

/// Times of sunrise and sunset (Julian Day UT)
#[derive(Debug, Clone, Copy)]
pub struct RiseSet {
    pub rise: f64,
    pub set: f64,
}

/// Next sunrise and sunset after `start_julian_day`, Hindu convention
///
/// Returns `Ok(None)` when the Sun stays above or below the horizon all day.
pub fn calc_sun_rise_set(
    start_julian_day: f64,
    latitude: f64,
    longitude: f64,
) -> Result<Option<RiseSet>, String> {
    let rise = rise_trans(start_julian_day, latitude, longitude, SE_CALC_RISE)?;
    let set = rise_trans(start_julian_day, latitude, longitude, SE_CALC_SET)?;
    Ok(rise.zip(set).map(|(rise, set)| RiseSet { rise, set }))
}

fn rise_trans(
    start_julian_day: f64,
    latitude: f64,
    longitude: f64,
    event: i32,
) -> Result<Option<f64>, String> {
    init_ephemeris(None);

    let mut geopos: [f64; 3] = [longitude, latitude, 0.0];
    let mut tret: [f64; 10] = [0.0; 10];
    let mut serr: [c_char; 256] = [0; 256];

    let ret = unsafe {
        libswisseph_sys::swe_rise_trans(
            start_julian_day,
            0, // SE_SUN
            std::ptr::null_mut(),
            SEFLG_SWIEPH,
            event | SE_BIT_HINDU_RISING,
            geopos.as_mut_ptr(),
            0.0,
            0.0,
            tret.as_mut_ptr(),
            serr.as_mut_ptr(),
        )
    };

    match ret {
        0 => Ok(Some(tret[0])),
        -2 => Ok(None), // circumpolar
        _ => Err(error_message(&serr)),
    }
}
