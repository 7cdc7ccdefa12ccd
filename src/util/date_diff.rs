use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 두 시각의 차이를 일/시/분/초로 분해한 값
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateDiff {
    pub day: i64,
    pub hour: i64,
    pub min: i64,
    pub sec: i64,
}

/// `date1 - date2` 분해
///
/// 각 단계는 내림 나눗셈, 나머지는 피제수의 부호를 따른다.
/// 밀리초 이하는 버리며 음수 차이는 보정하지 않는다.
pub fn date_diff(date1: DateTime<Utc>, date2: DateTime<Utc>) -> DateDiff {
    let seconds = (date1 - date2).num_milliseconds().div_euclid(1000);
    let sec = seconds % 60;

    let minutes = seconds.div_euclid(60);
    let min = minutes % 60;

    let hours = minutes.div_euclid(60);
    let hour = hours % 24;

    DateDiff {
        day: hours.div_euclid(24),
        hour,
        min,
        sec,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn total_seconds(diff: &DateDiff) -> i64 {
        ((diff.day * 24 + diff.hour) * 60 + diff.min) * 60 + diff.sec
    }

    #[test]
    fn decomposes_days_hours_minutes_seconds() {
        let later = base() + Duration::days(2) + Duration::hours(5) + Duration::minutes(7)
            + Duration::seconds(9);

        let diff = date_diff(later, base());

        assert_eq!(
            diff,
            DateDiff {
                day: 2,
                hour: 5,
                min: 7,
                sec: 9
            }
        );
    }

    #[test]
    fn reconstructs_second_level_delta() {
        let deltas_ms = [0_i64, 999, 1_000, 59_999, 3_600_000, 86_399_999, 1_234_567_891];
        for ms in deltas_ms {
            let diff = date_diff(base() + Duration::milliseconds(ms), base());
            assert_eq!(total_seconds(&diff), ms.div_euclid(1000), "delta {ms}ms");
            assert!((0..24).contains(&diff.hour));
            assert!((0..60).contains(&diff.min));
            assert!((0..60).contains(&diff.sec));
        }
    }

    #[test]
    fn drops_sub_second_precision() {
        let diff = date_diff(base() + Duration::milliseconds(1_500), base());
        assert_eq!(diff.sec, 1);
        assert_eq!(diff.day, 0);
    }

    #[test]
    fn negative_delta_is_not_clamped() {
        let diff = date_diff(base(), base() + Duration::seconds(90));

        assert_eq!(
            diff,
            DateDiff {
                day: -1,
                hour: -1,
                min: -2,
                sec: -30
            }
        );
    }
}
