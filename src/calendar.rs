use std::collections::BTreeMap;

use chrono::{Datelike, Days, Months, NaiveDate};
use tracing::debug;

use crate::error::{PlantError, Result};
use crate::models::Plant;
use crate::schedule::days_since;

pub const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Column headers, Sunday first.
pub const WEEKDAY_NAMES: [&str; 7] = ["Min", "Sen", "Sel", "Rab", "Kam", "Jum", "Sab"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CareKind {
    Watering,
    Fertilizing,
    Harvest,
}

impl CareKind {
    pub fn label(&self) -> &'static str {
        match self {
            CareKind::Watering => "Siram",
            CareKind::Fertilizing => "Pupuk",
            CareKind::Harvest => "Panen",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareEvent {
    pub date: NaiveDate,
    pub kind: CareKind,
    pub plant_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CalendarDay {
    /// `None` for the padding cells before the 1st and after the last day.
    pub date: Option<NaiveDate>,
    pub is_today: bool,
    pub events: Vec<CareEvent>,
}

pub type CalendarWeek = [CalendarDay; 7];

impl CalendarDay {
    fn padding() -> Self {
        CalendarDay::default()
    }

    pub fn is_padding(&self) -> bool {
        self.date.is_none()
    }

    pub fn day(&self) -> Option<u32> {
        self.date.map(|date| date.day())
    }

    /// Event kinds present on this day, each listed once, in first-seen order.
    pub fn kinds(&self) -> Vec<CareKind> {
        let mut kinds = Vec::new();
        for event in &self.events {
            if !kinds.contains(&event.kind) {
                kinds.push(event.kind);
            }
        }
        kinds
    }

    pub fn has(&self, kind: CareKind) -> bool {
        self.events.iter().any(|event| event.kind == kind)
    }

    /// One line per plant event, e.g. `Siram Padi Sawah`.
    pub fn tooltip(&self) -> String {
        self.events
            .iter()
            .map(|event| format!("{} {}", event.kind.label(), event.plant_name))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn first_of_month(year: i32, month0: u32) -> Result<NaiveDate> {
    if month0 >= 12 {
        return Err(PlantError::InvalidMonth { year, month0 });
    }
    NaiveDate::from_ymd_opt(year, month0 + 1, 1).ok_or(PlantError::DateOutOfRange("first of month"))
}

fn first_of_following_month(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.with_day(1)?.checked_add_months(Months::new(months))
}

/// Last day of the month after the one containing `today`.
pub fn projection_horizon(today: NaiveDate) -> Result<NaiveDate> {
    first_of_following_month(today, 2)
        .and_then(|date| date.pred_opt())
        .ok_or(PlantError::DateOutOfRange("projection horizon"))
}

/// Care events of a set of plants for the window after `today` up to the
/// horizon, grouped by date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareProjection {
    today: NaiveDate,
    horizon: NaiveDate,
    events: BTreeMap<NaiveDate, Vec<CareEvent>>,
}

impl CareProjection {
    pub fn project(plants: &[Plant], today: NaiveDate) -> Result<Self> {
        let horizon = projection_horizon(today)?;
        let mut projection = CareProjection {
            today,
            horizon,
            events: BTreeMap::new(),
        };

        for plant in plants {
            projection.recurring(plant, plant.last_watered, plant.watering_schedule, CareKind::Watering);
            projection.recurring(
                plant,
                plant.last_fertilized,
                plant.fertilizing_schedule,
                CareKind::Fertilizing,
            );
            if today <= plant.harvest_date && plant.harvest_date <= horizon {
                projection.push(plant, plant.harvest_date, CareKind::Harvest);
            }
        }

        debug!(
            plants = plants.len(),
            events = projection.len(),
            %today,
            %horizon,
            "projected care events"
        );
        Ok(projection)
    }

    /// Steps from `start` by `interval` days and keeps the dates after today
    /// and on or before the horizon. A non-positive interval is due every day
    /// of the window.
    fn recurring(&mut self, plant: &Plant, start: NaiveDate, interval: i64, kind: CareKind) {
        if interval <= 0 {
            let mut next = self.today.succ_opt();
            while let Some(date) = next.filter(|date| *date <= self.horizon) {
                self.push(plant, date, kind);
                next = date.succ_opt();
            }
            return;
        }

        let step = Days::new(interval.unsigned_abs());
        // Skip the occurrences that are already behind today.
        let elapsed = days_since(start, self.today);
        let mut cursor = if elapsed > 0 {
            let skipped = (elapsed / interval) * interval;
            start.checked_add_days(Days::new(skipped.unsigned_abs()))
        } else {
            Some(start)
        };

        while let Some(date) = cursor.and_then(|date| date.checked_add_days(step)) {
            if date > self.horizon {
                break;
            }
            if date > self.today {
                self.push(plant, date, kind);
            }
            cursor = Some(date);
        }
    }

    fn push(&mut self, plant: &Plant, date: NaiveDate, kind: CareKind) {
        self.events.entry(date).or_default().push(CareEvent {
            date,
            kind,
            plant_name: plant.name.clone(),
        });
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn horizon(&self) -> NaiveDate {
        self.horizon
    }

    pub fn events_on(&self, date: NaiveDate) -> &[CareEvent] {
        self.events.get(&date).map(Vec::as_slice).unwrap_or_default()
    }

    /// All projected events in date order.
    pub fn iter(&self) -> impl Iterator<Item = &CareEvent> {
        self.events.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.events.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Builds the Sunday-first grid of a month (`month0` is zero-based) with the
/// care events of `plants` projected from `today`.
pub fn build_month(
    year: i32,
    month0: u32,
    plants: &[Plant],
    today: NaiveDate,
) -> Result<Vec<CalendarWeek>> {
    let projection = CareProjection::project(plants, today)?;
    build_month_from(&projection, year, month0)
}

/// Lays out a month over an existing projection.
pub fn build_month_from(
    projection: &CareProjection,
    year: i32,
    month0: u32,
) -> Result<Vec<CalendarWeek>> {
    let first = first_of_month(year, month0)?;
    let next = first_of_following_month(first, 1)
        .ok_or(PlantError::DateOutOfRange("end of month"))?;
    let days_in_month = days_since(first, next).unsigned_abs() as usize;
    let offset = first.weekday().num_days_from_sunday() as usize;

    let mut dates = first.iter_days().take(days_in_month).peekable();
    let mut weeks: Vec<CalendarWeek> = Vec::with_capacity(6);

    while dates.peek().is_some() {
        let first_row = weeks.is_empty();
        let week = std::array::from_fn(|column| {
            if first_row && column < offset {
                return CalendarDay::padding();
            }
            match dates.next() {
                Some(date) => CalendarDay {
                    date: Some(date),
                    is_today: date == projection.today(),
                    events: projection.events_on(date).to_vec(),
                },
                None => CalendarDay::padding(),
            }
        });
        weeks.push(week);
    }

    Ok(weeks)
}

/// The month shown by the calendar view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    pub year: i32,
    /// Zero-based month, January is 0.
    pub month0: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month0: u32) -> Result<Self> {
        first_of_month(year, month0)?;
        Ok(MonthCursor { year, month0 })
    }

    pub fn current(today: NaiveDate) -> Self {
        MonthCursor {
            year: today.year(),
            month0: today.month0(),
        }
    }

    /// Moves the cursor by `months`, failing when the target month is outside
    /// the supported date range.
    pub fn shifted(self, months: i32) -> Result<Self> {
        let index = i64::from(self.year) * 12 + i64::from(self.month0) + i64::from(months);
        let year = i32::try_from(index.div_euclid(12))
            .map_err(|_| PlantError::DateOutOfRange("shifted month"))?;
        let month0 = u32::try_from(index.rem_euclid(12))
            .map_err(|_| PlantError::DateOutOfRange("shifted month"))?;
        MonthCursor::new(year, month0).map_err(|_| PlantError::DateOutOfRange("shifted month"))
    }

    pub fn previous(self) -> Result<Self> {
        self.shifted(-1)
    }

    pub fn next(self) -> Result<Self> {
        self.shifted(1)
    }

    pub fn title(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.month0 as usize % 12], self.year)
    }

    pub fn build(&self, projection: &CareProjection) -> Result<Vec<CalendarWeek>> {
        build_month_from(projection, self.year, self.month0)
    }
}
