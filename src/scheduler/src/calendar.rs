use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub const CUP_FIRST_ROUND: u16 = 100;
pub const CUP_FINAL_ROUND: u16 = 104;

pub const CONTINENTAL_FIRST_ROUND: u16 = 201;
pub const CONTINENTAL_FINAL_ROUND: u16 = 217;

#[derive(Debug, Clone, Copy)]
enum Occurrence {
    Nth(u8),
    Last,
}

#[derive(Debug, Clone, Copy)]
struct Anchor {
    /// 0 = season year, 1 = the following calendar year
    year_offset: i32,
    month: u32,
    weekday: Weekday,
    occurrence: Occurrence,
}

const fn anchor(year_offset: i32, month: u32, weekday: Weekday, occurrence: Occurrence) -> Anchor {
    Anchor {
        year_offset,
        month,
        weekday,
        occurrence,
    }
}

// R32, R16, QF, SF, Final
const CUP_ANCHORS: [Anchor; 5] = [
    anchor(0, 9, Weekday::Wed, Occurrence::Last),
    anchor(0, 10, Weekday::Wed, Occurrence::Last),
    anchor(1, 2, Weekday::Wed, Occurrence::Nth(1)),
    anchor(1, 3, Weekday::Wed, Occurrence::Nth(3)),
    anchor(1, 5, Weekday::Sat, Occurrence::Nth(4)),
];

// 201..=208 league phase, 209..=216 two-legged knockouts, 217 final
const CONTINENTAL_ANCHORS: [Anchor; 17] = [
    anchor(0, 9, Weekday::Tue, Occurrence::Nth(3)),
    anchor(0, 10, Weekday::Tue, Occurrence::Nth(1)),
    anchor(0, 10, Weekday::Tue, Occurrence::Nth(3)),
    anchor(0, 11, Weekday::Tue, Occurrence::Nth(1)),
    anchor(0, 11, Weekday::Tue, Occurrence::Nth(4)),
    anchor(0, 12, Weekday::Tue, Occurrence::Nth(2)),
    anchor(1, 1, Weekday::Tue, Occurrence::Nth(3)),
    anchor(1, 1, Weekday::Tue, Occurrence::Nth(4)),
    anchor(1, 2, Weekday::Tue, Occurrence::Nth(2)),
    anchor(1, 2, Weekday::Tue, Occurrence::Nth(3)),
    anchor(1, 3, Weekday::Tue, Occurrence::Nth(1)),
    anchor(1, 3, Weekday::Tue, Occurrence::Nth(2)),
    anchor(1, 4, Weekday::Tue, Occurrence::Nth(1)),
    anchor(1, 4, Weekday::Tue, Occurrence::Nth(2)),
    anchor(1, 4, Weekday::Tue, Occurrence::Nth(4)),
    anchor(1, 5, Weekday::Tue, Occurrence::Nth(1)),
    anchor(1, 5, Weekday::Sat, Occurrence::Last),
];

/// Maps abstract round numbers to match dates of one season.
///
/// Season `2025` means the 2025/26 season: the autumn half falls in 2025
/// and the spring half in 2026.
#[derive(Debug, Clone, Copy)]
pub struct Calendar {
    season_year: i32,
}

impl Calendar {
    pub fn new(season_year: i32) -> Self {
        Calendar { season_year }
    }

    pub fn season_year(&self) -> i32 {
        self.season_year
    }

    /// Anchor date of league week `week` (1-based) in a season of
    /// `total_weeks` weeks. The first half runs weekly from the second
    /// Saturday of August, the second half from the second Saturday of
    /// January.
    pub fn league_week(&self, week: u16, total_weeks: u16) -> NaiveDate {
        let week = week.max(1);
        let half = total_weeks.div_ceil(2).max(1);

        let (start, offset) = if week <= half {
            (self.nth_weekday(0, 8, Weekday::Sat, 2), week - 1)
        } else {
            (self.nth_weekday(1, 1, Weekday::Sat, 2), week - half - 1)
        };

        start + Duration::weeks(offset as i64)
    }

    pub fn cup_round(&self, round: u16) -> NaiveDate {
        let index = round.clamp(CUP_FIRST_ROUND, CUP_FINAL_ROUND) - CUP_FIRST_ROUND;
        self.resolve(CUP_ANCHORS[index as usize])
    }

    pub fn continental_round(&self, round: u16) -> NaiveDate {
        let index = round.clamp(CONTINENTAL_FIRST_ROUND, CONTINENTAL_FINAL_ROUND) - CONTINENTAL_FIRST_ROUND;
        self.resolve(CONTINENTAL_ANCHORS[index as usize])
    }

    fn resolve(&self, anchor: Anchor) -> NaiveDate {
        match anchor.occurrence {
            Occurrence::Nth(n) => self.nth_weekday(anchor.year_offset, anchor.month, anchor.weekday, n),
            Occurrence::Last => last_weekday_of_month(self.season_year + anchor.year_offset, anchor.month, anchor.weekday),
        }
    }

    fn nth_weekday(&self, year_offset: i32, month: u32, weekday: Weekday, n: u8) -> NaiveDate {
        let year = self.season_year + year_offset;

        NaiveDate::from_weekday_of_month_opt(year, month, weekday, n)
            .unwrap_or_else(|| last_weekday_of_month(year, month, weekday))
    }
}

/// Spreads a round over two consecutive days: the first half of the
/// fixtures (rounded up) on the anchor day, the rest on the day after.
pub fn matchday_date(anchor: NaiveDate, index: usize, fixtures_in_round: usize) -> NaiveDate {
    if index < fixtures_in_round.div_ceil(2) {
        anchor
    } else {
        anchor + Duration::days(1)
    }
}

fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> NaiveDate {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };

    let last_day = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .map(|d| d - Duration::days(1))
        .unwrap_or_default();

    let back = (7 + last_day.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;

    last_day - Duration::days(back as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SeasonSettings;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn league_weeks_start_in_august_and_resume_in_january() {
        let calendar = Calendar::new(2025);

        assert_eq!(calendar.league_week(1, 34), date(2025, 8, 9));
        assert_eq!(calendar.league_week(2, 34), date(2025, 8, 16));
        assert_eq!(calendar.league_week(17, 34), date(2025, 11, 29));
        assert_eq!(calendar.league_week(18, 34), date(2026, 1, 10));
        assert_eq!(calendar.league_week(34, 34), date(2026, 5, 2));
    }

    #[test]
    fn cup_rounds_follow_fixed_anchors() {
        let calendar = Calendar::new(2025);

        assert_eq!(calendar.cup_round(100), date(2025, 9, 24));
        assert_eq!(calendar.cup_round(101), date(2025, 10, 29));
        assert_eq!(calendar.cup_round(102), date(2026, 2, 4));
        assert_eq!(calendar.cup_round(103), date(2026, 3, 18));
        assert_eq!(calendar.cup_round(104), date(2026, 5, 23));
    }

    #[test]
    fn continental_rounds_are_ordered_and_inside_the_season() {
        let calendar = Calendar::new(2025);
        let window = SeasonSettings::default().window(2025);

        let dates: Vec<NaiveDate> = (CONTINENTAL_FIRST_ROUND..=CONTINENTAL_FINAL_ROUND)
            .map(|round| calendar.continental_round(round))
            .collect();

        assert_eq!(dates[0], date(2025, 9, 16));
        assert_eq!(dates[16], date(2026, 5, 30));
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
        assert!(dates.iter().all(|d| window.contains(*d)));
    }

    #[test]
    fn matchday_splits_at_midpoint() {
        let anchor = date(2025, 8, 9);

        assert_eq!(matchday_date(anchor, 0, 9), anchor);
        assert_eq!(matchday_date(anchor, 4, 9), anchor);
        assert_eq!(matchday_date(anchor, 5, 9), date(2025, 8, 10));
        assert_eq!(matchday_date(anchor, 8, 9), date(2025, 8, 10));
    }

    #[test]
    fn last_weekday_handles_december() {
        assert_eq!(last_weekday_of_month(2025, 12, Weekday::Wed), date(2025, 12, 31));
        assert_eq!(last_weekday_of_month(2025, 12, Weekday::Mon), date(2025, 12, 29));
    }
}
