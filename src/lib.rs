//! Care schedules for SmartTani plants: watering and fertilizing status,
//! harvest proximity, a month calendar of upcoming care and reminders.

pub mod calendar;
pub mod error;
pub mod models;
pub mod notify;
pub mod render;
pub mod schedule;

pub use calendar::{build_month, CalendarDay, CalendarWeek, CareEvent, CareKind, CareProjection, MonthCursor};
pub use error::{PlantError, Result};
pub use models::{NewPlant, Plant, PlantDocument, PlantState, PlantType};
pub use schedule::{compute_status, next_fertilizing_date, next_watering_date, DashboardSummary, Status};
