//! Plain-text views for the terminal: plant cards, the dashboard summary and
//! the month grid.

use std::fmt::Write;

use chrono::{Datelike, NaiveDate};

use crate::calendar::{CalendarDay, CalendarWeek, CareKind, MonthCursor, MONTH_NAMES, WEEKDAY_NAMES};
use crate::models::Plant;
use crate::schedule::{next_fertilizing_date, next_watering_date, DashboardSummary, Status};

/// Long Indonesian date, e.g. `1 Maret 2024`.
pub fn long_date(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), MONTH_NAMES[date.month0() as usize], date.year())
}

fn optional_date(date: Option<NaiveDate>) -> String {
    date.map(long_date).unwrap_or_else(|| "-".to_string())
}

pub fn water_label(status: &Status) -> &'static str {
    if status.needs_water {
        "Perlu Disiram"
    } else {
        "Sudah Disiram"
    }
}

pub fn fertilizer_label(status: &Status) -> &'static str {
    if status.needs_fertilizer {
        "Perlu Dipupuk"
    } else {
        "Sudah Dipupuk"
    }
}

pub fn harvest_label(status: &Status) -> &'static str {
    if status.is_harvest_overdue {
        "Siap Panen"
    } else if status.is_harvest_close {
        "Mendekati Panen"
    } else {
        "Belum Waktunya"
    }
}

pub fn plant_card(plant: &Plant, status: &Status) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {} ({})", plant.id, plant.name, plant.plant_type);
    let _ = writeln!(out, "  Tanggal tanam: {}", long_date(plant.planting_date));
    let _ = writeln!(out, "  Perkiraan panen: {}", long_date(plant.harvest_date));
    let _ = writeln!(
        out,
        "  Penyiraman: {} (berikutnya {})",
        water_label(status),
        optional_date(next_watering_date(plant))
    );
    let _ = writeln!(
        out,
        "  Pemupukan: {} (berikutnya {})",
        fertilizer_label(status),
        optional_date(next_fertilizing_date(plant))
    );
    let _ = writeln!(out, "  Panen: {}", harvest_label(status));
    if !plant.notes.is_empty() {
        let _ = writeln!(out, "  Catatan: {}", plant.notes);
    }
    out
}

pub fn summary(summary: &DashboardSummary) -> String {
    format!(
        "Total tanaman: {} | Perlu disiram: {} | Perlu dipupuk: {} | Hampir panen: {}",
        summary.total, summary.needs_water, summary.needs_fertilizer, summary.harvest_soon
    )
}

fn marker(kind: CareKind) -> char {
    match kind {
        CareKind::Watering => 'S',
        CareKind::Fertilizing => 'P',
        CareKind::Harvest => 'H',
    }
}

/// Five-column cell: day number, today marker and one letter per event kind.
fn cell(day: &CalendarDay) -> String {
    let Some(number) = day.day() else {
        return " ".repeat(5);
    };
    let today = if day.is_today { '*' } else { ' ' };
    let kinds: String = day.kinds().into_iter().map(marker).collect();
    format!("{number:>2}{today}{kinds:<2}")
}

/// The month grid followed by one line per event in the month.
pub fn month(cursor: &MonthCursor, weeks: &[CalendarWeek]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", cursor.title());
    let header: Vec<String> = WEEKDAY_NAMES.iter().map(|name| format!("{name:<5}")).collect();
    let _ = writeln!(out, "{}", header.join(" ").trim_end());

    for week in weeks {
        let cells: Vec<String> = week.iter().map(cell).collect();
        let _ = writeln!(out, "{}", cells.join(" ").trim_end());
    }

    let busy: Vec<&CalendarDay> = weeks
        .iter()
        .flatten()
        .filter(|day| !day.events.is_empty())
        .collect();
    if !busy.is_empty() {
        let _ = writeln!(out);
        for day in busy {
            let Some(date) = day.date else { continue };
            for line in day.tooltip().lines() {
                let _ = writeln!(out, "{:>2} {}: {}", date.day(), MONTH_NAMES[date.month0() as usize], line);
            }
        }
    }

    out
}
