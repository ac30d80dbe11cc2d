//! Timeframe window boundaries
//!
//! Windows are anchored in the service's configured timezone: `day` starts
//! at local midnight, `week` at the most recent Sunday's local midnight.

use chrono::{DateTime, Datelike, Days, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use pomora_domain::Timeframe;

/// Compute the inclusive window start for a timeframe.
///
/// Sessions with `started_at >= window_start` fall inside the window.
pub fn window_start(timeframe: Timeframe, now: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    let local = now.with_timezone(&tz);
    let date = match timeframe {
        Timeframe::Day => local.date_naive(),
        Timeframe::Week => {
            let days_back = u64::from(local.weekday().num_days_from_sunday());
            local.date_naive().checked_sub_days(Days::new(days_back)).unwrap_or(local.date_naive())
        }
    };

    let midnight = date.and_time(NaiveTime::MIN);

    // `earliest` resolves DST folds; a midnight that does not exist locally
    // falls back to interpreting the naive time as UTC.
    tz.from_local_datetime(&midnight)
        .earliest()
        .map_or_else(|| Utc.from_utc_datetime(&midnight), |dt| dt.with_timezone(&Utc))
}
