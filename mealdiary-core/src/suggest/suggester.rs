use chrono::{DateTime, Duration, NaiveDate, TimeZone, Timelike, Utc};

use super::config::SuggestionConfig;

/// Proposes times for a new meal from the meals already logged on a day.
///
/// Calendar days and hour boundaries are evaluated in `tz`.
#[derive(Debug, Clone)]
pub struct MealTimeSuggester<Tz: TimeZone> {
    tz: Tz,
    config: SuggestionConfig,
}

impl<Tz: TimeZone> MealTimeSuggester<Tz> {
    pub fn new(tz: Tz) -> Self {
        Self {
            tz,
            config: SuggestionConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SuggestionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SuggestionConfig {
        &self.config
    }

    /// Suggestions relative to the current clock. See [`Self::suggest_times_at`].
    pub fn suggest_times(
        &self,
        existing: &[DateTime<Utc>],
        day: NaiveDate,
        relative_to_now: bool,
    ) -> Vec<DateTime<Tz>> {
        self.suggest_times_at(existing, day, relative_to_now, Utc::now())
    }

    /// Returns up to two candidate times for a new meal on `day`.
    ///
    /// Candidates are offsets from the latest existing meal, or from `now`
    /// when `relative_to_now` is set and the latest meal is close to `now`
    /// (or has no usable offset). No existing meals means no suggestions.
    pub fn suggest_times_at(
        &self,
        existing: &[DateTime<Utc>],
        day: NaiveDate,
        relative_to_now: bool,
        now: DateTime<Utc>,
    ) -> Vec<DateTime<Tz>> {
        let Some(&last_utc) = existing.iter().max() else {
            return Vec::new();
        };

        let last = last_utc.with_timezone(&self.tz);
        let first = self.config.first_offset_hours;
        let second = self.config.second_offset_hours;
        let first_from_last = self.rounded_offset(first, &last, day);

        let candidates = if relative_to_now {
            let now_local = now.with_timezone(&self.tz);
            let first_from_now = self.rounded_offset(first, &now_local, day);
            let second_from_now = self.rounded_offset(second, &now_local, day);

            let near_now =
                (last_utc - now).num_seconds().abs() <= self.config.near_now_window_secs;
            if near_now || first_from_last.is_none() {
                [first_from_now, second_from_now]
            } else {
                [first_from_last, first_from_now]
            }
        } else {
            [first_from_last, self.rounded_offset(second, &last, day)]
        };

        let suggestions: Vec<_> = candidates.into_iter().flatten().collect();
        tracing::debug!(
            %day,
            relative_to_now,
            suggestions = suggestions.len(),
            "suggested meal times"
        );
        suggestions
    }

    /// `base` rounded to its nearest hour, plus `hours`.
    ///
    /// A result on a different calendar day than `day` is only kept when it
    /// falls before the next-day cutoff hour. Non-positive `hours`, or an
    /// offset beyond the representable range, yield nothing.
    pub fn rounded_offset(
        &self,
        hours: i64,
        base: &DateTime<Tz>,
        day: NaiveDate,
    ) -> Option<DateTime<Tz>> {
        if hours <= 0 {
            return None;
        }

        let candidate = round_to_hour(base)?.checked_add_signed(Duration::try_hours(hours)?)?;
        if candidate.date_naive() == day || candidate.hour() < self.config.next_day_cutoff_hour {
            Some(candidate)
        } else {
            None
        }
    }

    /// Every `increment_hours` step after `base` that is still a valid slot
    /// for `day`, stopping at the first one that is not.
    pub fn times_till_end_of_day(
        &self,
        base: DateTime<Utc>,
        day: NaiveDate,
        increment_hours: i64,
    ) -> Vec<DateTime<Tz>> {
        if increment_hours <= 0 {
            return Vec::new();
        }

        let base = base.with_timezone(&self.tz);
        let last_day = day.succ_opt().unwrap_or(day);
        let mut slots = Vec::new();
        for step in 1_i64.. {
            let Some(hours) = step.checked_mul(increment_hours) else {
                break;
            };
            match self.rounded_offset(hours, &base, day) {
                Some(time) if time.date_naive() <= last_day => slots.push(time),
                _ => break,
            }
        }
        slots
    }
}

fn round_to_hour<Tz: TimeZone>(time: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let into_hour = Duration::seconds(i64::from(time.minute()) * 60 + i64::from(time.second()))
        + Duration::nanoseconds(i64::from(time.nanosecond()));
    let floor = time.clone().checked_sub_signed(into_hour)?;
    if time.minute() >= 30 {
        floor.checked_add_signed(Duration::hours(1))
    } else {
        Some(floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn at(d: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, d, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_no_existing_meals() {
        let suggester = MealTimeSuggester::new(Utc);
        assert!(suggester
            .suggest_times_at(&[], day(10), true, at(10, 12, 0))
            .is_empty());
        assert!(suggester.suggest_times(&[], day(10), false).is_empty());
    }

    #[test]
    fn test_offsets_from_last_meal() {
        let suggester = MealTimeSuggester::new(Utc);
        let existing = [at(10, 8, 0), at(10, 12, 0)];

        let times = suggester.suggest_times_at(&existing, day(10), false, at(10, 9, 0));

        assert_eq!(times, vec![at(10, 14, 0), at(10, 16, 0)]);
    }

    #[test]
    fn test_latest_meal_wins_regardless_of_order() {
        let suggester = MealTimeSuggester::new(Utc);
        let existing = [at(10, 12, 0), at(10, 7, 0)];

        let times = suggester.suggest_times_at(&existing, day(10), false, at(10, 9, 0));

        assert_eq!(times[0], at(10, 14, 0));
    }

    #[test]
    fn test_spill_into_early_next_day() {
        let suggester = MealTimeSuggester::new(Utc);

        let times = suggester.suggest_times_at(&[at(10, 23, 30)], day(10), false, at(10, 9, 0));

        assert_eq!(times, vec![at(11, 2, 0), at(11, 4, 0)]);
    }

    #[test]
    fn test_next_day_cutoff_rejects_late_slots() {
        let suggester = MealTimeSuggester::new(Utc);

        let times = suggester.suggest_times_at(&[at(11, 2, 0)], day(10), false, at(10, 9, 0));
        assert_eq!(times, vec![at(11, 4, 0)]);

        let times = suggester.suggest_times_at(&[at(11, 4, 0)], day(10), false, at(10, 9, 0));
        assert!(times.is_empty());
    }

    #[test]
    fn test_rounding_to_nearest_hour() {
        let suggester = MealTimeSuggester::new(Utc);

        let times = suggester.suggest_times_at(&[at(10, 12, 29)], day(10), false, at(10, 9, 0));
        assert_eq!(times[0], at(10, 14, 0));

        let times = suggester.suggest_times_at(&[at(10, 12, 30)], day(10), false, at(10, 9, 0));
        assert_eq!(times[0], at(10, 15, 0));
    }

    #[test]
    fn test_relative_to_now_when_last_meal_is_recent() {
        let suggester = MealTimeSuggester::new(Utc);

        let times = suggester.suggest_times_at(&[at(10, 12, 10)], day(10), true, at(10, 12, 40));

        assert_eq!(times, vec![at(10, 15, 0), at(10, 17, 0)]);
    }

    #[test]
    fn test_relative_to_now_window_is_inclusive() {
        let suggester = MealTimeSuggester::new(Utc);

        let times = suggester.suggest_times_at(&[at(10, 13, 0)], day(10), true, at(10, 12, 0));

        assert_eq!(times, vec![at(10, 14, 0), at(10, 16, 0)]);
    }

    #[test]
    fn test_relative_to_now_when_last_meal_is_old() {
        let suggester = MealTimeSuggester::new(Utc);

        let times = suggester.suggest_times_at(&[at(10, 8, 0)], day(10), true, at(10, 12, 20));

        assert_eq!(times, vec![at(10, 10, 0), at(10, 14, 0)]);
    }

    #[test]
    fn test_relative_to_now_without_offset_from_last() {
        let suggester = MealTimeSuggester::new(Utc);

        let times = suggester.suggest_times_at(&[at(11, 5, 0)], day(10), true, at(10, 20, 0));

        assert_eq!(times, vec![at(10, 22, 0), at(11, 0, 0)]);
    }

    #[test]
    fn test_day_boundaries_follow_time_zone() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let suggester = MealTimeSuggester::new(tz);

        // 21:30 UTC is 23:30 local.
        let times = suggester.suggest_times_at(&[at(10, 21, 30)], day(10), false, at(10, 9, 0));

        let expected: Vec<_> = [(11, 2), (11, 4)]
            .into_iter()
            .map(|(d, h)| tz.with_ymd_and_hms(2025, 3, d, h, 0, 0).unwrap())
            .collect();
        assert_eq!(times, expected);
    }

    #[test]
    fn test_rounded_offset_requires_positive_hours() {
        let suggester = MealTimeSuggester::new(Utc);
        let base = at(10, 12, 0);

        assert!(suggester.rounded_offset(0, &base, day(10)).is_none());
        assert!(suggester.rounded_offset(-2, &base, day(10)).is_none());
        assert_eq!(
            suggester.rounded_offset(1, &base, day(10)),
            Some(at(10, 13, 0))
        );
    }

    #[test]
    fn test_custom_cutoff() {
        let config = SuggestionConfig {
            next_day_cutoff_hour: 3,
            ..SuggestionConfig::default()
        };
        let suggester = MealTimeSuggester::new(Utc).with_config(config);

        let times = suggester.suggest_times_at(&[at(10, 23, 30)], day(10), false, at(10, 9, 0));

        assert_eq!(times, vec![at(11, 2, 0)]);
    }

    #[test]
    fn test_times_till_end_of_day() {
        let suggester = MealTimeSuggester::new(Utc);

        let times = suggester.times_till_end_of_day(at(10, 20, 0), day(10), 2);

        assert_eq!(
            times,
            vec![at(10, 22, 0), at(11, 0, 0), at(11, 2, 0), at(11, 4, 0)]
        );
    }

    #[test]
    fn test_times_till_end_of_day_stops_after_next_day() {
        let suggester = MealTimeSuggester::new(Utc);

        let times = suggester.times_till_end_of_day(at(10, 23, 0), day(10), 25);

        // Two days out is never a slot for the given day, even before the cutoff hour.
        assert!(times.is_empty());
        assert!(suggester
            .times_till_end_of_day(at(10, 20, 0), day(10), 0)
            .is_empty());
    }

    #[test]
    fn test_huge_offsets_yield_nothing() {
        let suggester = MealTimeSuggester::new(Utc);
        let base = at(10, 20, 0);

        assert!(suggester.rounded_offset(i64::MAX, &base, day(10)).is_none());
        // Fits a duration, but not a calendar date.
        assert!(suggester
            .rounded_offset(3_000_000_000, &base, day(10))
            .is_none());
        assert!(suggester
            .times_till_end_of_day(base, day(10), i64::MAX / 2)
            .is_empty());

        let suggester = MealTimeSuggester::new(Utc).with_config(SuggestionConfig {
            first_offset_hours: i64::MAX,
            second_offset_hours: i64::MAX,
            ..SuggestionConfig::default()
        });
        assert!(suggester
            .suggest_times_at(&[base], day(10), false, base)
            .is_empty());
    }
}
