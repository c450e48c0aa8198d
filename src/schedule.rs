use chrono::{Days, Local, NaiveDate};

use crate::models::Plant;

/// Days before the harvest date at which a plant counts as close to harvest.
pub const HARVEST_CLOSE_DAYS: i64 = 7;

/// Care status of a plant on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status {
    pub needs_water: bool,
    pub needs_fertilizer: bool,
    pub is_harvest_close: bool,
    pub is_harvest_overdue: bool,
    pub days_to_harvest: i64,
}

/// Local calendar date, the default reference day for status and calendar.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whole days from `from` to `to`; negative when `to` comes first.
pub fn days_since(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Computes the care status of `plant` as of `today`.
///
/// Only calendar dates take part, so a plant watered today reads as watered
/// for the rest of the day. A non-positive schedule is always due.
pub fn compute_status(plant: &Plant, today: NaiveDate) -> Status {
    let days_to_harvest = days_since(today, plant.harvest_date);

    Status {
        needs_water: days_since(plant.last_watered, today) >= plant.watering_schedule,
        needs_fertilizer: days_since(plant.last_fertilized, today) >= plant.fertilizing_schedule,
        is_harvest_close: (0..=HARVEST_CLOSE_DAYS).contains(&days_to_harvest),
        is_harvest_overdue: days_to_harvest < 0,
        days_to_harvest,
    }
}

fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

/// Date the plant is next due for watering. `None` only when the result
/// would fall outside the representable date range.
pub fn next_watering_date(plant: &Plant) -> Option<NaiveDate> {
    add_days(plant.last_watered, plant.watering_schedule)
}

pub fn next_fertilizing_date(plant: &Plant) -> Option<NaiveDate> {
    add_days(plant.last_fertilized, plant.fertilizing_schedule)
}

/// Counters shown above the plant list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardSummary {
    pub total: usize,
    pub needs_water: usize,
    pub needs_fertilizer: usize,
    /// Plants close to harvest or already past their harvest date.
    pub harvest_soon: usize,
}

impl DashboardSummary {
    pub fn from_plants(plants: &[Plant], today: NaiveDate) -> Self {
        plants.iter().fold(
            DashboardSummary {
                total: plants.len(),
                ..Default::default()
            },
            |mut summary, plant| {
                let status = compute_status(plant, today);
                summary.needs_water += usize::from(status.needs_water);
                summary.needs_fertilizer += usize::from(status.needs_fertilizer);
                summary.harvest_soon +=
                    usize::from(status.is_harvest_close || status.is_harvest_overdue);
                summary
            },
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{PlantState, PlantType};

    pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub(crate) fn padi_sawah() -> Plant {
        Plant {
            id: 1,
            user_id: 1,
            name: "Padi Sawah".to_string(),
            plant_type: PlantType::Padi,
            planting_date: date(2024, 1, 1),
            harvest_date: date(2024, 3, 1),
            watering_schedule: 2,
            fertilizing_schedule: 14,
            last_watered: date(2024, 1, 1),
            last_fertilized: date(2024, 1, 1),
            state: PlantState::Active,
            notes: String::new(),
        }
    }

    #[test]
    fn status_early_in_the_season() {
        let status = compute_status(&padi_sawah(), date(2024, 1, 5));
        assert_eq!(
            status,
            Status {
                needs_water: true,
                needs_fertilizer: false,
                is_harvest_close: false,
                is_harvest_overdue: false,
                days_to_harvest: 56,
            }
        );
    }

    #[test]
    fn status_on_harvest_day() {
        let status = compute_status(&padi_sawah(), date(2024, 3, 1));
        assert_eq!(status.days_to_harvest, 0);
        assert!(status.is_harvest_close);
        assert!(!status.is_harvest_overdue);
    }

    #[test]
    fn status_after_harvest_day() {
        let status = compute_status(&padi_sawah(), date(2024, 3, 10));
        assert_eq!(status.days_to_harvest, -9);
        assert!(status.is_harvest_overdue);
        assert!(!status.is_harvest_close);
    }

    #[test]
    fn harvest_close_window_ends_at_seven_days() {
        let plant = padi_sawah();
        assert!(compute_status(&plant, date(2024, 2, 23)).is_harvest_close);
        assert!(!compute_status(&plant, date(2024, 2, 22)).is_harvest_close);
    }

    #[test]
    fn watered_today_is_due_tomorrow_with_daily_schedule() {
        let today = date(2024, 6, 15);
        let plant = Plant {
            watering_schedule: 1,
            last_watered: today,
            ..padi_sawah()
        };
        assert!(!compute_status(&plant, today).needs_water);
        assert!(compute_status(&plant, date(2024, 6, 16)).needs_water);
    }

    #[test]
    fn time_of_day_is_ignored() {
        let today = date(2024, 6, 15);
        let plant = Plant {
            watering_schedule: 1,
            last_watered: today,
            ..padi_sawah()
        };
        let late = today.and_hms_opt(23, 59, 59).unwrap();
        assert_eq!(compute_status(&plant, late.date()), compute_status(&plant, today));
        assert!(!compute_status(&plant, late.date()).needs_water);
    }

    #[test]
    fn non_positive_schedule_is_always_due() {
        let plant = Plant {
            watering_schedule: 0,
            fertilizing_schedule: -3,
            ..padi_sawah()
        };
        let status = compute_status(&plant, date(2024, 1, 1));
        assert!(status.needs_water);
        assert!(status.needs_fertilizer);
    }

    #[test]
    fn next_dates_add_the_interval() {
        let plant = padi_sawah();
        assert_eq!(next_watering_date(&plant), Some(date(2024, 1, 3)));
        assert_eq!(next_fertilizing_date(&plant), Some(date(2024, 1, 15)));
    }

    #[test]
    fn summary_counts_each_flag() {
        let thirsty = padi_sawah();
        let fresh = Plant {
            id: 2,
            last_watered: date(2024, 2, 27),
            last_fertilized: date(2024, 2, 27),
            harvest_date: date(2024, 6, 1),
            ..padi_sawah()
        };
        let summary = DashboardSummary::from_plants(&[thirsty, fresh], date(2024, 2, 28));
        assert_eq!(
            summary,
            DashboardSummary {
                total: 2,
                needs_water: 1,
                needs_fertilizer: 1,
                harvest_soon: 1,
            }
        );
    }
}
