use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use futures_util::stream::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, ReturnDocument};
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use smarttani::models::{
    check_growing_season, format_date, parse_date, NewPlant, PlantDocument, PlantState,
};

use crate::cli::UpdateArgs;

const PLANTS: &str = "plants";
const COUNTERS: &str = "counters";

#[derive(Serialize, Deserialize, Debug)]
struct Counter {
    #[serde(rename = "_id")]
    id: String,
    seq: i64,
}

/// Plant storage for one MongoDB database.
pub struct PlantStore {
    plants: Collection<PlantDocument>,
    counters: Collection<Counter>,
}

pub async fn connect(uri: &str, database: &str) -> Result<PlantStore> {
    let mut client_options = ClientOptions::parse(uri)
        .await
        .with_context(|| format!("URI MongoDB tidak valid: {uri}"))?;
    client_options.server_selection_timeout = Some(Duration::from_secs(10));

    let client = Client::with_options(client_options).context("gagal membuat klien MongoDB")?;
    let db = client.database(database);
    db.run_command(doc! { "ping": 1 })
        .await
        .context("gagal terhubung ke MongoDB (ping gagal)")?;

    info!(database, "connected to MongoDB");
    Ok(PlantStore::new(&db))
}

/// Filter matching one active plant of one user.
fn owned_active(id: i64, user_id: i64) -> Document {
    doc! { "_id": id, "userId": user_id, "status": PlantState::Active.as_str() }
}

/// `$set` document for an edit, or `None` when nothing changes.
pub fn edit_update(args: &UpdateArgs) -> Option<Document> {
    let mut set_ops = doc! {};

    if let Some(ref name) = args.name {
        set_ops.insert("name", name);
    }
    if let Some(ref plant_type) = args.plant_type {
        set_ops.insert("type", plant_type);
    }
    if let Some(date) = args.planting_date {
        set_ops.insert("plantingDate", format_date(date));
    }
    if let Some(date) = args.harvest_date {
        set_ops.insert("harvestDate", format_date(date));
    }
    if let Some(days) = args.watering_schedule {
        set_ops.insert("wateringSchedule", days);
    }
    if let Some(days) = args.fertilizing_schedule {
        set_ops.insert("fertilizingSchedule", days);
    }
    if let Some(ref notes) = args.notes {
        set_ops.insert("notes", notes);
    }

    if set_ops.is_empty() {
        None
    } else {
        Some(doc! { "$set": set_ops })
    }
}

/// Checks the planting/harvest pair an edit would leave on `stored`.
pub fn check_edited_dates(stored: &PlantDocument, args: &UpdateArgs) -> smarttani::Result<()> {
    let planting = match args.planting_date {
        Some(date) => date,
        None => parse_date("plantingDate", &stored.planting_date)?,
    };
    let harvest = match args.harvest_date {
        Some(date) => date,
        None => parse_date("harvestDate", &stored.harvest_date)?,
    };
    check_growing_season(planting, harvest)
}

impl PlantStore {
    pub fn new(db: &Database) -> Self {
        PlantStore {
            plants: db.collection(PLANTS),
            counters: db.collection(COUNTERS),
        }
    }

    /// Next plant id. Ids only grow, deleted plants keep theirs.
    async fn next_id(&self) -> Result<i64> {
        let counter = self
            .counters
            .find_one_and_update(doc! { "_id": PLANTS }, doc! { "$inc": { "seq": 1_i64 } })
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .context("penghitung ID tidak tersedia")?;
        Ok(counter.seq)
    }

    pub async fn add_plant(&self, new_plant: NewPlant) -> Result<PlantDocument> {
        new_plant.validate()?;
        let id = self.next_id().await?;
        let plant = new_plant.into_plant(id)?;
        let document = PlantDocument::from(&plant);
        self.plants.insert_one(&document).await?;
        debug!(id, user_id = plant.user_id, "plant inserted");
        Ok(document)
    }

    /// Active plants of `user_id`, oldest first.
    pub async fn active_plants(&self, user_id: i64) -> Result<Vec<PlantDocument>> {
        let filter = doc! { "userId": user_id, "status": PlantState::Active.as_str() };
        let cursor = self.plants.find(filter).sort(doc! { "_id": 1 }).await?;
        let plants: Vec<PlantDocument> = cursor.try_collect().await?;
        debug!(user_id, count = plants.len(), "loaded plants");
        Ok(plants)
    }

    async fn set_fields(&self, id: i64, user_id: i64, update: Document) -> Result<bool> {
        let result = self.plants.update_one(owned_active(id, user_id), update).await?;
        Ok(result.matched_count > 0)
    }

    pub async fn mark_watered(&self, id: i64, user_id: i64, today: NaiveDate) -> Result<bool> {
        self.set_fields(id, user_id, doc! { "$set": { "lastWatered": format_date(today) } })
            .await
    }

    pub async fn mark_fertilized(&self, id: i64, user_id: i64, today: NaiveDate) -> Result<bool> {
        self.set_fields(id, user_id, doc! { "$set": { "lastFertilized": format_date(today) } })
            .await
    }

    pub async fn update_plant(&self, user_id: i64, args: &UpdateArgs) -> Result<bool> {
        let Some(update) = edit_update(args) else {
            return Ok(false);
        };

        if args.planting_date.is_some() || args.harvest_date.is_some() {
            let Some(stored) = self.plants.find_one(owned_active(args.id, user_id)).await? else {
                return Ok(false);
            };
            check_edited_dates(&stored, args)?;
        }

        self.set_fields(args.id, user_id, update).await
    }

    /// Soft delete: the document stays, marked as deleted.
    pub async fn remove_plant(&self, id: i64, user_id: i64) -> Result<bool> {
        self.set_fields(
            id,
            user_id,
            doc! { "$set": { "status": PlantState::Deleted.as_str() } },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smarttani::PlantError;

    #[test]
    fn empty_edit_has_no_update() {
        let args = UpdateArgs {
            id: 1,
            ..Default::default()
        };
        assert!(edit_update(&args).is_none());
    }

    #[test]
    fn edit_sets_only_given_fields() {
        let args = UpdateArgs {
            id: 1,
            name: Some("Padi Gogo".to_string()),
            harvest_date: NaiveDate::from_ymd_opt(2024, 4, 2),
            watering_schedule: Some(3),
            ..Default::default()
        };
        let update = edit_update(&args).unwrap();
        assert_eq!(
            update,
            doc! { "$set": {
                "name": "Padi Gogo",
                "harvestDate": "2024-04-02",
                "wateringSchedule": 3_i64,
            } }
        );
    }

    fn stored() -> PlantDocument {
        PlantDocument {
            id: 1,
            user_id: 1,
            name: "Padi Sawah".to_string(),
            plant_type: "padi".to_string(),
            planting_date: "2024-01-01".to_string(),
            harvest_date: "2024-03-01".to_string(),
            watering_schedule: 2,
            fertilizing_schedule: 14,
            last_watered: "2024-01-01".to_string(),
            last_fertilized: "2024-01-01".to_string(),
            status: PlantState::Active,
            notes: String::new(),
        }
    }

    #[test]
    fn edited_harvest_before_stored_planting_is_rejected() {
        let args = UpdateArgs {
            id: 1,
            harvest_date: NaiveDate::from_ymd_opt(2023, 12, 31),
            ..Default::default()
        };
        assert!(matches!(
            check_edited_dates(&stored(), &args),
            Err(PlantError::HarvestBeforePlanting { .. })
        ));
    }

    #[test]
    fn edited_planting_after_stored_harvest_is_rejected() {
        let args = UpdateArgs {
            id: 1,
            planting_date: NaiveDate::from_ymd_opt(2024, 3, 2),
            ..Default::default()
        };
        assert!(check_edited_dates(&stored(), &args).is_err());

        let both = UpdateArgs {
            id: 1,
            planting_date: NaiveDate::from_ymd_opt(2024, 3, 2),
            harvest_date: NaiveDate::from_ymd_opt(2024, 5, 2),
            ..Default::default()
        };
        assert!(check_edited_dates(&stored(), &both).is_ok());
    }

    #[test]
    fn filter_targets_active_plants_of_the_user() {
        assert_eq!(
            owned_active(5, 2),
            doc! { "_id": 5_i64, "userId": 2_i64, "status": "active" }
        );
    }
}
