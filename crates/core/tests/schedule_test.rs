use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::{America::Argentina::Buenos_Aires, Europe::Madrid, Tz};
use pretty_assertions::assert_eq;
use cumplebot_core::{models::DayMonth, schedule::DailySchedule};

const TZ: Tz = Buenos_Aires;

fn nine() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap()
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

#[test]
fn test_first_fire_later_today() {
    // 08:00 local (UTC-3)
    let now = Utc.with_ymd_and_hms(2025, 3, 15, 11, 0, 0).unwrap();
    let schedule = DailySchedule::starting_after(now, nine(), TZ);
    assert_eq!(
        schedule.next_fire(),
        Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap()
    );
    assert_eq!(schedule.today(), DayMonth::parse("15-03").unwrap());
}

#[test]
fn test_first_fire_tomorrow_when_time_passed() {
    // 10:00 local
    let now = Utc.with_ymd_and_hms(2025, 3, 15, 13, 0, 0).unwrap();
    let schedule = DailySchedule::starting_after(now, nine(), TZ);
    assert_eq!(
        schedule.next_fire(),
        Utc.with_ymd_and_hms(2025, 3, 16, 12, 0, 0).unwrap()
    );
}

#[test]
fn test_exact_instant_is_not_reused() {
    let now = Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap();
    let schedule = DailySchedule::starting_after(now, nine(), TZ);
    assert_eq!(
        schedule.next_fire(),
        Utc.with_ymd_and_hms(2025, 3, 16, 12, 0, 0).unwrap()
    );
}

#[test]
fn test_advance_from_previous_target_not_now() {
    let now = Utc.with_ymd_and_hms(2025, 3, 15, 11, 0, 0).unwrap();
    let mut schedule = DailySchedule::starting_after(now, nine(), TZ);
    let first = schedule.next_fire();

    // The run finished a few minutes late.
    let finished = first + chrono::Duration::minutes(7);
    let second = schedule.advance(finished);

    assert_eq!(second, first + chrono::Duration::days(1));
    assert_eq!(schedule.today(), DayMonth::parse("16-03").unwrap());
}

#[test]
fn test_advance_skips_missed_days() {
    let now = Utc.with_ymd_and_hms(2025, 3, 15, 11, 0, 0).unwrap();
    let mut schedule = DailySchedule::starting_after(now, nine(), TZ);
    let first = schedule.next_fire();

    let woke_up = first + chrono::Duration::days(3) + chrono::Duration::hours(1);
    let next = schedule.advance(woke_up);

    assert_eq!(next, first + chrono::Duration::days(4));
    assert!(next > woke_up);
}

#[test]
fn test_every_date_fires_across_spring_forward() {
    // Madrid jumps from 02:00 to 03:00 on 2025-03-30.
    let now = Utc.with_ymd_and_hms(2025, 3, 25, 12, 0, 0).unwrap();
    let mut schedule = DailySchedule::starting_after(now, hm(23, 30), Madrid);

    let mut fired = Vec::new();
    for _ in 0..8 {
        let local = schedule.next_fire().with_timezone(&Madrid);
        fired.push((local.date_naive(), local.time()));
        let target = schedule.next_fire();
        schedule.advance(target);
    }

    let expected: Vec<_> = (25..=31)
        .map(|day| NaiveDate::from_ymd_opt(2025, 3, day).unwrap())
        .chain([NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()])
        .map(|date| (date, hm(23, 30)))
        .collect();
    assert_eq!(fired, expected);
}

#[test]
fn test_local_time_holds_across_fall_back() {
    // Madrid falls back from 03:00 to 02:00 on 2025-10-26.
    let now = Utc.with_ymd_and_hms(2025, 10, 24, 12, 0, 0).unwrap();
    let mut schedule = DailySchedule::starting_after(now, nine(), Madrid);

    for _ in 0..4 {
        assert_eq!(schedule.next_fire().with_timezone(&Madrid).time(), nine());
        let target = schedule.next_fire();
        schedule.advance(target);
    }
}

#[test]
fn test_skipped_local_time_fires_an_hour_later() {
    // 02:30 does not exist in Madrid on 2025-03-30.
    let now = Utc.with_ymd_and_hms(2025, 3, 29, 12, 0, 0).unwrap();
    let schedule = DailySchedule::starting_after(now, hm(2, 30), Madrid);

    let local = schedule.next_fire().with_timezone(&Madrid);
    assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2025, 3, 30).unwrap());
    assert_eq!(local.time(), hm(3, 30));
    assert_eq!(schedule.today(), DayMonth::parse("30-03").unwrap());
}

#[test]
fn test_today_uses_local_date() {
    // 22:30 on the 15th in Buenos Aires is already the 16th in UTC.
    let now = Utc.with_ymd_and_hms(2025, 3, 16, 1, 30, 0).unwrap();
    let schedule = DailySchedule::starting_after(now, hm(23, 0), TZ);

    assert_eq!(schedule.today(), DayMonth::parse("15-03").unwrap());
    assert_eq!(
        schedule.next_fire(),
        Utc.with_ymd_and_hms(2025, 3, 16, 2, 0, 0).unwrap()
    );
}

#[test]
fn test_leap_day_is_its_own_date() {
    // 08:00 local on the 28th.
    let now = Utc.with_ymd_and_hms(2028, 2, 28, 11, 0, 0).unwrap();
    let mut schedule = DailySchedule::starting_after(now, nine(), TZ);
    let target = schedule.next_fire();
    schedule.advance(target);

    assert_eq!(schedule.today(), DayMonth::parse("29-02").unwrap());
}
