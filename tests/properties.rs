//! Property tests for the schedule engine and the calendar grid.

use chrono::{Datelike, Days, NaiveDate};
use proptest::prelude::*;
use smarttani::calendar::{build_month_from, projection_horizon, CareKind, CareProjection};
use smarttani::models::{Plant, PlantState, PlantType};
use smarttani::schedule::{compute_status, days_since};

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    // 2000-01-01 plus up to ~40 years.
    (0u64..14_600).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2000, 1, 1)
            .and_then(|date| date.checked_add_days(Days::new(offset)))
            .expect("date in range")
    })
}

prop_compose! {
    fn arb_plant()(
        id in 1i64..1_000,
        planting in arb_date(),
        harvest in arb_date(),
        last_watered in arb_date(),
        last_fertilized in arb_date(),
        watering_schedule in -2i64..30,
        fertilizing_schedule in 1i64..60,
    ) -> Plant {
        Plant {
            id,
            user_id: 1,
            name: format!("Tanaman {id}"),
            plant_type: PlantType::Lainnya,
            planting_date: planting,
            harvest_date: harvest,
            watering_schedule,
            fertilizing_schedule,
            last_watered,
            last_fertilized,
            state: PlantState::Active,
            notes: String::new(),
        }
    }
}

proptest! {
    #[test]
    fn needs_water_matches_threshold(plant in arb_plant(), now in arb_date()) {
        let status = compute_status(&plant, now);
        prop_assert_eq!(
            status.needs_water,
            days_since(plant.last_watered, now) >= plant.watering_schedule
        );
        prop_assert_eq!(
            status.needs_fertilizer,
            days_since(plant.last_fertilized, now) >= plant.fertilizing_schedule
        );
    }

    #[test]
    fn status_is_deterministic(plant in arb_plant(), now in arb_date()) {
        prop_assert_eq!(compute_status(&plant, now), compute_status(&plant, now));
    }

    #[test]
    fn harvest_flags_are_exclusive(plant in arb_plant(), now in arb_date()) {
        let status = compute_status(&plant, now);
        prop_assert!(!(status.is_harvest_close && status.is_harvest_overdue));
        prop_assert_eq!(status.is_harvest_overdue, plant.harvest_date < now);
    }

    #[test]
    fn grid_places_every_day_once(year in 1990i32..2100, month0 in 0u32..12) {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let projection = CareProjection::project(&[], today).unwrap();
        let weeks = build_month_from(&projection, year, month0).unwrap();

        prop_assert!((4..=6).contains(&weeks.len()));
        let days: Vec<NaiveDate> = weeks.iter().flatten().filter_map(|day| day.date).collect();
        prop_assert_eq!(days[0].day(), 1);
        prop_assert!(days.windows(2).all(|pair| pair[0].succ_opt() == Some(pair[1])));
        prop_assert!(days.iter().all(|date| date.month0() == month0 && date.year() == year));
        prop_assert_eq!(days.last().and_then(|date| date.succ_opt()).map(|date| date.day()), Some(1));

        let offset = days[0].weekday().num_days_from_sunday() as usize;
        prop_assert_eq!(weeks[0][offset].date, Some(days[0]));
        prop_assert!(weeks.last().unwrap().iter().any(|day| day.date.is_some()));
    }

    #[test]
    fn projected_events_stay_in_window(plants in prop::collection::vec(arb_plant(), 0..4), today in arb_date()) {
        let projection = CareProjection::project(&plants, today).unwrap();
        let horizon = projection_horizon(today).unwrap();
        for event in projection.iter() {
            prop_assert!(event.date <= horizon);
            match event.kind {
                CareKind::Harvest => prop_assert!(event.date >= today),
                _ => prop_assert!(event.date > today),
            }
        }
    }
}
