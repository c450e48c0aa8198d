//! Care reminders derived from plant status.
//!
//! Each true status flag yields one notification. Notifications of the same
//! class share a fixed delay so the reminders arrive staggered: watering
//! first, then fertilizing, harvest soon and harvest ready.

use std::time::Duration;

use chrono::NaiveDate;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

use crate::models::Plant;
use crate::schedule::compute_status;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NotificationKind {
    Watering,
    Fertilizing,
    HarvestSoon,
    HarvestReady,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
}

impl NotificationKind {
    pub fn delay(&self) -> Duration {
        match self {
            NotificationKind::Watering => Duration::from_secs(1),
            NotificationKind::Fertilizing => Duration::from_secs(2),
            NotificationKind::HarvestSoon => Duration::from_secs(3),
            NotificationKind::HarvestReady => Duration::from_secs(4),
        }
    }

    pub fn level(&self) -> Level {
        match self {
            NotificationKind::Watering | NotificationKind::Fertilizing => Level::Warning,
            NotificationKind::HarvestSoon => Level::Info,
            NotificationKind::HarvestReady => Level::Success,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub plant_id: i64,
    pub kind: NotificationKind,
    pub level: Level,
    pub message: String,
    pub delay: Duration,
}

impl Notification {
    fn new(plant: &Plant, kind: NotificationKind, message: String) -> Self {
        Notification {
            plant_id: plant.id,
            kind,
            level: kind.level(),
            message,
            delay: kind.delay(),
        }
    }
}

/// Reminders for every plant as of `today`, in plant order.
pub fn due_notifications(plants: &[Plant], today: NaiveDate) -> Vec<Notification> {
    let mut notifications = Vec::new();

    for plant in plants {
        let status = compute_status(plant, today);

        if status.needs_water {
            notifications.push(Notification::new(
                plant,
                NotificationKind::Watering,
                format!("Waktunya menyiram tanaman {}", plant.name),
            ));
        }
        if status.needs_fertilizer {
            notifications.push(Notification::new(
                plant,
                NotificationKind::Fertilizing,
                format!("Waktunya memupuk tanaman {}", plant.name),
            ));
        }
        if status.is_harvest_close {
            notifications.push(Notification::new(
                plant,
                NotificationKind::HarvestSoon,
                format!(
                    "Tanaman {} hampir panen ({} hari lagi)",
                    plant.name, status.days_to_harvest
                ),
            ));
        }
        if status.is_harvest_overdue {
            notifications.push(Notification::new(
                plant,
                NotificationKind::HarvestReady,
                format!("Tanaman {} siap panen!", plant.name),
            ));
        }
    }

    notifications
}

/// Hands each notification to `show` once its delay has elapsed, measured
/// from the call. With `staggered` off they are shown straight away, still in
/// delay order.
pub async fn dispatch<F>(mut notifications: Vec<Notification>, staggered: bool, mut show: F)
where
    F: FnMut(&Notification),
{
    notifications.sort_by_key(|notification| notification.delay);
    let start = Instant::now();

    for notification in &notifications {
        if staggered {
            sleep_until(start + notification.delay).await;
        }
        debug!(plant_id = notification.plant_id, kind = ?notification.kind, "notification due");
        show(notification);
    }
}
