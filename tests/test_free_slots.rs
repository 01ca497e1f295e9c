use chrono::{FixedOffset, NaiveDate, NaiveTime, TimeDelta};

use study_slots::{FreeSlotCalculator, MAX_SLOTS, ScheduleTimeIntervals, TimeInstant, TimeRange, overlaps_any};

fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 2).unwrap()
}

fn at_on(date: NaiveDate, hour: u32, minute: u32) -> TimeInstant {
    TimeInstant::at_date(date, NaiveTime::from_hms_opt(hour, minute, 0).unwrap(), utc()).unwrap()
}

fn at(hour: u32, minute: u32) -> TimeInstant {
    at_on(monday(), hour, minute)
}

fn range(from: (u32, u32), to: (u32, u32)) -> TimeRange {
    TimeRange::new(at(from.0, from.1), at(to.0, to.1)).unwrap()
}

fn school_day() -> ScheduleTimeIntervals {
    ScheduleTimeIntervals::new(at(8, 0), TimeDelta::minutes(45), TimeDelta::minutes(10))
}

#[test]
fn test_empty_day_is_all_free() {
    let slots = FreeSlotCalculator::default().calculate(Some(&school_day()), &[]).unwrap();

    let first = slots.slot(1).unwrap();
    assert_eq!(first.range, range((8, 0), (8, 45)));
    assert!(first.is_free);

    let second = slots.slot(2).unwrap();
    assert_eq!(second.range, range((8, 55), (9, 40)));
    assert!(second.is_free);

    assert!(slots.iter().all(|slot| slot.is_free));
}

#[test]
fn test_existing_class_marks_slot_occupied() {
    let existing = [range((8, 0), (8, 45))];
    let slots = FreeSlotCalculator::default().calculate(Some(&school_day()), &existing).unwrap();

    assert_eq!(slots.get(&range((8, 0), (8, 45))), Some(false));
    assert!(slots.iter().skip(1).all(|slot| slot.is_free));
    assert_eq!(slots.first_free().map(|slot| slot.number), Some(2));
}

#[test]
fn test_break_override_shifts_following_slot() {
    let intervals = school_day().with_break_duration(1, TimeDelta::minutes(20));
    let slots = FreeSlotCalculator::default().calculate(Some(&intervals), &[]).unwrap();

    let first = slots.slot(1).unwrap();
    let second = slots.slot(2).unwrap();
    assert_eq!(second.range.from(), first.range.to().plus(TimeDelta::minutes(20)).unwrap());

    // later breaks fall back to the base duration
    let third = slots.slot(3).unwrap();
    assert_eq!(third.range.from(), second.range.to().plus(TimeDelta::minutes(10)).unwrap());
}

#[test]
fn test_class_override_changes_only_that_slot() {
    let intervals = school_day().with_class_duration(2, TimeDelta::minutes(90));
    let slots = FreeSlotCalculator::default().calculate(Some(&intervals), &[]).unwrap();

    assert_eq!(slots.slot(2).unwrap().range, range((8, 55), (10, 25)));
    assert_eq!(slots.slot(3).unwrap().range, range((10, 35), (11, 20)));
}

#[test]
fn test_slot_crossing_midnight_is_not_emitted() {
    let intervals = ScheduleTimeIntervals::new(at(23, 30), TimeDelta::minutes(60), TimeDelta::minutes(10));
    let slots = FreeSlotCalculator::default().calculate(Some(&intervals), &[]).unwrap();

    assert!(slots.is_empty());
}

#[test]
fn test_generation_stops_at_end_of_day() {
    let intervals = ScheduleTimeIntervals::new(at(20, 0), TimeDelta::minutes(60), TimeDelta::minutes(0));
    let slots = FreeSlotCalculator::default().calculate(Some(&intervals), &[]).unwrap();

    // 20-21, 21-22, 22-23; 23-24 ends on the next day
    assert_eq!(slots.len(), 3);
    assert_eq!(slots.slot(3).unwrap().range, range((22, 0), (23, 0)));
}

#[test]
fn test_missing_fields_are_indeterminate() {
    let calculator = FreeSlotCalculator::default();
    let existing = [range((8, 0), (8, 45))];

    assert!(calculator.calculate(None, &existing).is_none());

    let mut no_start = school_day();
    no_start.first_class_time = None;
    assert!(calculator.calculate(Some(&no_start), &existing).is_none());

    let mut no_class = school_day();
    no_class.base_class_duration = None;
    assert!(calculator.calculate(Some(&no_class), &existing).is_none());

    let mut no_break = school_day();
    no_break.base_break_duration = None;
    assert!(calculator.calculate(Some(&no_break), &[]).is_none());
}

#[test]
fn test_indeterminate_differs_from_empty() {
    let calculator = FreeSlotCalculator::default();
    let late = ScheduleTimeIntervals::new(at(23, 30), TimeDelta::minutes(60), TimeDelta::minutes(10));

    assert_eq!(calculator.calculate(Some(&late), &[]).map(|slots| slots.len()), Some(0));
    assert_eq!(calculator.calculate(None, &[]), None);
}

#[test]
fn test_zero_durations_are_bounded() {
    let intervals = ScheduleTimeIntervals::new(at(8, 0), TimeDelta::zero(), TimeDelta::zero());

    let slots = FreeSlotCalculator::default().calculate(Some(&intervals), &[]).unwrap();
    assert_eq!(slots.len(), MAX_SLOTS);

    let slots = FreeSlotCalculator::default().with_max_slots(4).calculate(Some(&intervals), &[]).unwrap();
    assert_eq!(slots.len(), 4);
}

#[test]
fn test_reference_day_follows_first_existing_class() {
    let tuesday = monday().succ_opt().unwrap();
    let existing = [TimeRange::new(at_on(tuesday, 8, 55), at_on(tuesday, 9, 40)).unwrap()];

    let slots = FreeSlotCalculator::default().calculate(Some(&school_day()), &existing).unwrap();

    assert!(slots.iter().all(|slot| slot.range.from().date_in(utc()) == tuesday));
    assert!(!slots.slot(2).unwrap().is_free);
}

#[test]
fn test_classes_on_other_days_never_overlap() {
    let tuesday = monday().succ_opt().unwrap();
    let existing = [
        range((15, 0), (15, 45)),
        TimeRange::new(at_on(tuesday, 8, 0), at_on(tuesday, 8, 45)).unwrap(),
    ];

    let slots = FreeSlotCalculator::default().calculate(Some(&school_day()), &existing).unwrap();

    assert!(slots.slot(1).unwrap().is_free);
}

#[test]
fn test_day_is_read_in_calculator_zone() {
    // 08:00 at +02:00 is 06:00 UTC
    let zone = FixedOffset::east_opt(2 * 3600).unwrap();
    let first = TimeInstant::at_date(monday(), NaiveTime::from_hms_opt(8, 0, 0).unwrap(), zone).unwrap();
    let intervals = ScheduleTimeIntervals::new(first, TimeDelta::minutes(45), TimeDelta::minutes(10));

    let slots = FreeSlotCalculator::new(zone).calculate(Some(&intervals), &[]).unwrap();

    assert_eq!(slots.slot(1).unwrap().range, range((6, 0), (6, 45)));
    assert!(slots.iter().all(|slot| slot.range.to().date_in(zone) == monday()));
}

#[test]
fn test_results_are_ordered_contained_and_consistent() {
    let intervals = school_day()
        .with_break_duration(2, TimeDelta::minutes(25))
        .with_class_duration(4, TimeDelta::minutes(120))
        .with_break_duration(6, TimeDelta::minutes(0));
    let existing = [range((9, 0), (9, 30)), range((12, 0), (13, 0)), range((18, 40), (18, 41))];

    let slots = FreeSlotCalculator::default().calculate(Some(&intervals), &existing).unwrap();
    assert!(!slots.is_empty());

    for pair in slots.as_slice().windows(2) {
        assert!(pair[1].range.from() >= pair[0].range.to());
        assert!(pair[1].range.to() > pair[0].range.to());
        assert_eq!(pair[1].number, pair[0].number + 1);
    }

    for slot in &slots {
        assert_eq!(slot.range.from().date_in(utc()), monday());
        assert_eq!(slot.range.to().date_in(utc()), monday());
        assert_eq!(slot.is_free, !overlaps_any(&slot.range, &existing));
    }
}

#[test]
fn test_same_input_gives_same_result() {
    let calculator = FreeSlotCalculator::default();
    let existing = [range((10, 0), (10, 45))];

    let first = calculator.calculate(Some(&school_day()), &existing);
    let second = calculator.calculate(Some(&school_day()), &existing);

    assert_eq!(first, second);
}

#[test]
fn test_class_range_matches_calculated_slot() {
    let calculator = FreeSlotCalculator::default();
    let intervals = school_day().with_break_duration(1, TimeDelta::minutes(20));

    let slots = calculator.calculate(Some(&intervals), &[]).unwrap();

    assert_eq!(calculator.class_range(&intervals, 2, monday()), Some(slots.slot(2).unwrap().range));
    assert_eq!(calculator.class_range(&intervals, (MAX_SLOTS + 1) as u32, monday()), None);

    let mut incomplete = intervals.clone();
    incomplete.base_break_duration = None;
    assert_eq!(calculator.class_range(&incomplete, 1, monday()), None);
}

#[test]
fn test_calculator_is_shareable_across_threads() {
    let calculator = FreeSlotCalculator::default();
    let intervals = school_day();
    let expected = calculator.calculate(Some(&intervals), &[]);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| calculator.calculate(Some(&intervals), &[]))).collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
