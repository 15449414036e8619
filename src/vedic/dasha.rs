//! Vimshottari dasha periods

use chrono::{Duration, NaiveDateTime};

use crate::models::{DashaBalance, DashaPeriod, Dashas, Graha, Mahadasha, Nakshatra};

/// Length of the full Vimshottari cycle in years
pub const CYCLE_YEARS: f64 = 120.0;

const DAYS_PER_YEAR: f64 = 365.25;

/// Dasha lords in sequence, starting with Ketu
pub const SEQUENCE: [Graha; 9] = [
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

/// Mahadasha length in years
pub fn dasha_years(lord: Graha) -> f64 {
    match lord {
        Graha::Ketu => 7.0,
        Graha::Venus => 20.0,
        Graha::Sun => 6.0,
        Graha::Moon => 10.0,
        Graha::Mars => 7.0,
        Graha::Rahu => 18.0,
        Graha::Jupiter => 16.0,
        Graha::Saturn => 19.0,
        Graha::Mercury => 17.0,
    }
}

fn position_in_sequence(lord: Graha) -> usize {
    SEQUENCE.iter().position(|g| *g == lord).unwrap_or(0)
}

fn add_years(at: NaiveDateTime, years: f64) -> NaiveDateTime {
    at + Duration::seconds((years * DAYS_PER_YEAR * 86_400.0).round() as i64)
}

fn antardashas(lord: Graha, start: NaiveDateTime) -> Vec<DashaPeriod> {
    let years = dasha_years(lord);
    let first = position_in_sequence(lord);
    let mut cursor = start;

    (0..9)
        .map(|offset| {
            let sub = SEQUENCE[(first + offset) % 9];
            let end = add_years(cursor, years * dasha_years(sub) / CYCLE_YEARS);
            let period = DashaPeriod {
                lord: sub,
                start: cursor,
                end,
            };
            cursor = end;
            period
        })
        .collect()
}

/// Full Vimshottari sequence from the Moon's sidereal longitude at birth
///
/// The first mahadasha is dated from its notional start before birth, so
/// its end falls `balance` years after `birth`.
pub fn compute_dashas(moon_longitude: f64, birth: NaiveDateTime) -> Dashas {
    let first_lord = Nakshatra::from_longitude(moon_longitude).lord();
    let elapsed = Nakshatra::fraction_elapsed(moon_longitude);
    let first_years = dasha_years(first_lord);
    let balance_years = first_years * (1.0 - elapsed);

    let first = position_in_sequence(first_lord);
    let mut start = add_years(birth, -first_years * elapsed);

    let mahadashas = (0..9)
        .map(|offset| {
            let lord = SEQUENCE[(first + offset) % 9];
            let years = dasha_years(lord);
            let end = add_years(start, years);
            let mahadasha = Mahadasha {
                lord,
                start,
                end,
                years,
                antardashas: antardashas(lord, start),
            };
            start = end;
            mahadasha
        })
        .collect();

    Dashas {
        balance: DashaBalance {
            lord: first_lord,
            years: balance_years,
        },
        mahadashas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn birth() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(1996, 7, 4)
            .unwrap()
            .and_hms_opt(9, 10, 0)
            .unwrap()
    }

    #[test]
    fn cycle_totals_one_hundred_twenty_years() {
        let total: f64 = SEQUENCE.iter().map(|g| dasha_years(*g)).sum();
        assert_eq!(total, CYCLE_YEARS);
    }

    #[test]
    fn first_dasha_follows_moon_nakshatra() {
        // Middle of Dhanishta, ruled by Mars
        let moon = 22.5 * (360.0 / 27.0);
        let dashas = compute_dashas(moon, birth());
        assert_eq!(dashas.balance.lord, Graha::Mars);
        assert!((dashas.balance.years - 3.5).abs() < 1e-9);
        assert_eq!(dashas.mahadashas[0].lord, Graha::Mars);
        assert_eq!(dashas.mahadashas[1].lord, Graha::Rahu);
        assert_eq!(dashas.mahadashas.len(), 9);
    }

    #[test]
    fn periods_are_contiguous() {
        let dashas = compute_dashas(100.0, birth());
        for pair in dashas.mahadashas.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        for maha in &dashas.mahadashas {
            assert_eq!(maha.antardashas.len(), 9);
            assert_eq!(maha.antardashas[0].lord, maha.lord);
            assert_eq!(maha.antardashas[0].start, maha.start);
            let drift = (maha.antardashas[8].end - maha.end).num_seconds().abs();
            assert!(drift <= 10, "drift {}s", drift);
        }
    }

    #[test]
    fn summary_splits_current_and_upcoming() {
        let dashas = compute_dashas(100.0, birth());
        let at = birth() + Duration::days(365);
        let summary = dashas.summary_at(at);
        assert_eq!(summary.current.mahadashas.len(), 1);
        assert!(summary.current.mahadashas[0].contains(at));
        assert!(summary.upcoming.mahadashas.iter().all(|m| m.start > at));
        assert_eq!(
            summary.current.mahadashas.len() + summary.upcoming.mahadashas.len(),
            dashas
                .mahadashas
                .iter()
                .filter(|m| m.end > at)
                .count()
        );
    }
}
