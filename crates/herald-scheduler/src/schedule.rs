use chrono::{DateTime, Days, NaiveTime, TimeZone};

/// Compute the next fire instant for a `hour:minute` time of day, starting
/// from `now`.
///
/// The candidate is today's date at `HH:MM:00` in `now`'s time zone; if that
/// instant is not strictly in the future, the job fires at tomorrow's date
/// at the same wall-clock `HH:MM` — a calendar-day step, so the local fire
/// time is preserved across a UTC-offset change overnight. No further
/// rollover exists.
///
/// Returns `None` only when the wall-clock time does not exist in the
/// target day (DST gap with no earliest mapping).
pub fn next_fire_instant<Tz: TimeZone>(
    hour: u8,
    minute: u8,
    now: DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    let time = NaiveTime::from_hms_opt(hour as u32, minute as u32, 0)?;
    let tz = now.timezone();

    let today = tz
        .from_local_datetime(&now.date_naive().and_time(time))
        .earliest()?;
    if today > now {
        return Some(today);
    }

    // Today's window has passed — re-anchor on tomorrow's date rather than
    // adding 24 hours, which would drift on offset-transition days.
    let tomorrow = now.date_naive().checked_add_days(Days::new(1))?;
    tz.from_local_datetime(&tomorrow.and_time(time)).earliest()
}
