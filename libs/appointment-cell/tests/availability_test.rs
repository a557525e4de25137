use assert_matches::assert_matches;
use chrono::{Duration, NaiveDate, NaiveTime};

use appointment_cell::services::schedule::{EVENING, MORNING};
use appointment_cell::{AppointmentError, AvailabilityCalculator, ClinicSchedule, OpeningWindow, SlotGroup};
use shared_utils::test_utils::at;

fn calculator(interval: u32) -> AvailabilityCalculator {
    AvailabilityCalculator::new(ClinicSchedule::standard(interval).unwrap())
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn values(group: &SlotGroup) -> Vec<&str> {
    group.slots.iter().map(|slot| slot.value.as_str()).collect()
}

#[test]
fn late_monday_evening_only_offers_closing_slot() {
    // 2024-01-15 is a Monday.
    for interval in [15, 30] {
        let groups = calculator(interval)
            .slots_for(at(2024, 1, 15, 21, 50), date(2024, 1, 15))
            .unwrap();

        assert_eq!(groups.len(), 1, "morning must be dropped entirely");
        assert_eq!(groups[0].period, EVENING);
        assert_eq!(values(&groups[0]), vec!["22:00"]);
        assert_eq!(groups[0].slots[0].label, "10:00 PM");
    }
}

#[test]
fn same_day_slots_are_strictly_after_now() {
    let groups = calculator(30)
        .slots_for(at(2024, 1, 15, 10, 30), date(2024, 1, 15))
        .unwrap();

    assert_eq!(groups[0].period, MORNING);
    assert_eq!(values(&groups[0]), vec!["11:00", "11:30", "12:00", "12:30", "13:00"]);
}

#[test]
fn same_day_never_returns_past_slot_at_any_moment() {
    let calc = calculator(15);
    let day = date(2024, 1, 15);
    let mut now = at(2024, 1, 15, 0, 0);

    while now.date() == day {
        let groups = calc.slots_for(now, day).unwrap();
        for slot in groups.iter().flat_map(|group| group.slots.iter()) {
            assert!(slot.time > now.time(), "{} offered at {}", slot.value, now);
        }
        now += Duration::minutes(7);
    }
}

#[test]
fn future_dates_are_not_time_filtered() {
    let groups = calculator(30)
        .slots_for(at(2024, 1, 15, 21, 50), date(2024, 1, 16))
        .unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].period, MORNING);
    assert_eq!(groups[0].slots.len(), 7);
    assert_eq!(groups[0].slots.first().unwrap().value, "10:00");
    assert_eq!(groups[0].slots.last().unwrap().value, "13:00");
    assert_eq!(groups[1].period, EVENING);
    assert_eq!(groups[1].slots.len(), 11);
    assert_eq!(groups[1].slots.last().unwrap().value, "22:00");
}

#[test]
fn sunday_evening_closes_at_eight() {
    // 2024-01-21 is a Sunday.
    let groups = calculator(30)
        .slots_for(at(2024, 1, 19, 9, 0), date(2024, 1, 21))
        .unwrap();

    let evening = &groups[1];
    assert_eq!(evening.slots.len(), 7);
    assert_eq!(evening.slots.last().unwrap().value, "20:00");
    assert_eq!(evening.slots.last().unwrap().label, "8:00 PM");
}

#[test]
fn fifteen_minute_granularity_doubles_ticks() {
    let groups = calculator(15)
        .slots_for(at(2024, 1, 15, 8, 0), date(2024, 1, 15))
        .unwrap();

    assert_eq!(groups[0].slots.len(), 13);
    assert_eq!(groups[1].slots.len(), 21);
    assert_eq!(groups[0].slots[1].label, "10:15 AM");
}

#[test]
fn twelve_hour_labels() {
    let groups = calculator(30)
        .slots_for(at(2024, 1, 15, 8, 0), date(2024, 1, 16))
        .unwrap();
    let labels: Vec<&str> = groups[0].slots.iter().map(|slot| slot.label.as_str()).collect();

    assert_eq!(labels[0], "10:00 AM");
    assert_eq!(labels[5], "12:30 PM");
    assert_eq!(labels[6], "1:00 PM");
}

#[test]
fn after_closing_yields_empty_sequence() {
    let groups = calculator(30)
        .slots_for(at(2024, 1, 15, 22, 0), date(2024, 1, 15))
        .unwrap();

    assert!(groups.is_empty());
}

#[test]
fn dates_outside_three_day_horizon_are_rejected() {
    let calc = calculator(30);
    let now = at(2024, 1, 15, 9, 0);

    assert_matches!(
        calc.slots_for(now, date(2024, 1, 18)),
        Err(AppointmentError::OutsideBookingHorizon { first, last, .. })
            if first == date(2024, 1, 15) && last == date(2024, 1, 17)
    );
    assert_matches!(
        calc.slots_for(now, date(2024, 1, 14)),
        Err(AppointmentError::OutsideBookingHorizon { .. })
    );
    assert!(calc.slots_for(now, date(2024, 1, 17)).is_ok());
}

#[test]
fn holiday_override_closes_the_day() {
    let schedule = ClinicSchedule::standard(30).unwrap().closed_on(date(2024, 1, 16));
    let calc = AvailabilityCalculator::new(schedule);

    assert!(calc.slots_for(at(2024, 1, 15, 9, 0), date(2024, 1, 16)).unwrap().is_empty());
}

#[test]
fn split_windows_with_same_label_share_a_period() {
    let schedule = ClinicSchedule::new(60).unwrap().with_override(
        date(2024, 1, 16),
        vec![
            OpeningWindow::from_hours(EVENING, (19, 0), (20, 0)).unwrap(),
            OpeningWindow::from_hours(MORNING, (9, 0), (10, 0)).unwrap(),
            OpeningWindow::from_hours(EVENING, (17, 0), (18, 0)).unwrap(),
        ],
    );
    let groups = AvailabilityCalculator::new(schedule)
        .slots_for(at(2024, 1, 15, 9, 0), date(2024, 1, 16))
        .unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(values(&groups[0]), vec!["09:00", "10:00"]);
    assert_eq!(values(&groups[1]), vec!["17:00", "18:00", "19:00", "20:00"]);
}

#[test]
fn bookable_dates_cover_today_and_next_two_days() {
    let dates = calculator(30).bookable_dates(at(2024, 1, 15, 9, 0));

    assert_eq!(dates.len(), 3);
    assert!(dates[0].is_today);
    assert_eq!(dates[0].label, "15 January 2024");
    assert_eq!(dates[0].weekday, "Monday");
    assert_eq!(dates[2].date, date(2024, 1, 17));
    assert!(!dates[2].is_today);
}

#[test]
fn is_bookable_checks_slot_membership() {
    let calc = calculator(30);
    let now = at(2024, 1, 15, 12, 0);
    let time = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();

    assert!(calc.is_bookable(now, date(2024, 1, 15), time(12, 30)).unwrap());
    assert!(!calc.is_bookable(now, date(2024, 1, 15), time(11, 30)).unwrap());
    assert!(!calc.is_bookable(now, date(2024, 1, 16), time(14, 0)).unwrap());
    assert!(!calc.is_bookable(now, date(2024, 1, 16), time(10, 15)).unwrap());
}
