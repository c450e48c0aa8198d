use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PlantError, Result};

/// Date format used for every date stored in a plant document.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlantState {
    #[default]
    Active,
    Deleted,
}

impl PlantState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlantState::Active => "active",
            PlantState::Deleted => "deleted",
        }
    }
}

/// Category label of a plant. The set is open: labels outside the known
/// crops are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlantType {
    Padi,
    Jagung,
    Cabai,
    Tomat,
    Terong,
    Kentang,
    Wortel,
    Bayam,
    Kangkung,
    Lainnya,
    Other(String),
}

impl PlantType {
    pub fn label(&self) -> &str {
        match self {
            PlantType::Padi => "padi",
            PlantType::Jagung => "jagung",
            PlantType::Cabai => "cabai",
            PlantType::Tomat => "tomat",
            PlantType::Terong => "terong",
            PlantType::Kentang => "kentang",
            PlantType::Wortel => "wortel",
            PlantType::Bayam => "bayam",
            PlantType::Kangkung => "kangkung",
            PlantType::Lainnya => "lainnya",
            PlantType::Other(label) => label,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            PlantType::Padi => "Padi",
            PlantType::Jagung => "Jagung",
            PlantType::Cabai => "Cabai",
            PlantType::Tomat => "Tomat",
            PlantType::Terong => "Terong",
            PlantType::Kentang => "Kentang",
            PlantType::Wortel => "Wortel",
            PlantType::Bayam => "Bayam",
            PlantType::Kangkung => "Kangkung",
            PlantType::Lainnya => "Lainnya",
            PlantType::Other(label) => label,
        }
    }
}

impl From<&str> for PlantType {
    fn from(label: &str) -> Self {
        match label {
            "padi" => PlantType::Padi,
            "jagung" => PlantType::Jagung,
            "cabai" => PlantType::Cabai,
            "tomat" => PlantType::Tomat,
            "terong" => PlantType::Terong,
            "kentang" => PlantType::Kentang,
            "wortel" => PlantType::Wortel,
            "bayam" => PlantType::Bayam,
            "kangkung" => PlantType::Kangkung,
            "lainnya" => PlantType::Lainnya,
            other => PlantType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for PlantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A plant as the schedule engine and the calendar see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plant {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub plant_type: PlantType,
    pub planting_date: NaiveDate,
    pub harvest_date: NaiveDate,
    pub watering_schedule: i64,
    pub fertilizing_schedule: i64,
    pub last_watered: NaiveDate,
    pub last_fertilized: NaiveDate,
    pub state: PlantState,
    pub notes: String,
}

/// Stored form of a plant. Dates stay ISO strings until converted into a
/// [`Plant`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlantDocument {
    #[serde(rename = "_id")]
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub plant_type: String,
    pub planting_date: String,
    pub harvest_date: String,
    pub watering_schedule: i64,
    pub fertilizing_schedule: i64,
    pub last_watered: String,
    pub last_fertilized: String,
    #[serde(default)]
    pub status: PlantState,
    #[serde(default)]
    pub notes: String,
}

pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| PlantError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

impl TryFrom<&PlantDocument> for Plant {
    type Error = PlantError;

    fn try_from(doc: &PlantDocument) -> Result<Self> {
        Ok(Plant {
            id: doc.id,
            user_id: doc.user_id,
            name: doc.name.clone(),
            plant_type: PlantType::from(doc.plant_type.as_str()),
            planting_date: parse_date("plantingDate", &doc.planting_date)?,
            harvest_date: parse_date("harvestDate", &doc.harvest_date)?,
            watering_schedule: doc.watering_schedule,
            fertilizing_schedule: doc.fertilizing_schedule,
            last_watered: parse_date("lastWatered", &doc.last_watered)?,
            last_fertilized: parse_date("lastFertilized", &doc.last_fertilized)?,
            state: doc.status,
            notes: doc.notes.clone(),
        })
    }
}

impl From<&Plant> for PlantDocument {
    fn from(plant: &Plant) -> Self {
        PlantDocument {
            id: plant.id,
            user_id: plant.user_id,
            name: plant.name.clone(),
            plant_type: plant.plant_type.label().to_string(),
            planting_date: format_date(plant.planting_date),
            harvest_date: format_date(plant.harvest_date),
            watering_schedule: plant.watering_schedule,
            fertilizing_schedule: plant.fertilizing_schedule,
            last_watered: format_date(plant.last_watered),
            last_fertilized: format_date(plant.last_fertilized),
            status: plant.state,
            notes: plant.notes.clone(),
        }
    }
}

/// Harvest may not come before planting.
pub fn check_growing_season(planting: NaiveDate, harvest: NaiveDate) -> Result<()> {
    if harvest < planting {
        return Err(PlantError::HarvestBeforePlanting {
            planting: format_date(planting),
            harvest: format_date(harvest),
        });
    }
    Ok(())
}

/// Input of the add-plant flow.
#[derive(Debug, Clone)]
pub struct NewPlant {
    pub user_id: i64,
    pub name: String,
    pub plant_type: PlantType,
    pub planting_date: NaiveDate,
    pub harvest_date: NaiveDate,
    pub watering_schedule: i64,
    pub fertilizing_schedule: i64,
    pub notes: String,
}

impl NewPlant {
    pub fn validate(&self) -> Result<()> {
        if self.watering_schedule <= 0 {
            return Err(PlantError::InvalidSchedule {
                field: "wateringSchedule",
                value: self.watering_schedule,
            });
        }
        if self.fertilizing_schedule <= 0 {
            return Err(PlantError::InvalidSchedule {
                field: "fertilizingSchedule",
                value: self.fertilizing_schedule,
            });
        }
        check_growing_season(self.planting_date, self.harvest_date)
    }

    /// Builds the active plant under `id`. Both care dates start at the
    /// planting date.
    pub fn into_plant(self, id: i64) -> Result<Plant> {
        self.validate()?;
        Ok(Plant {
            id,
            user_id: self.user_id,
            name: self.name,
            plant_type: self.plant_type,
            planting_date: self.planting_date,
            harvest_date: self.harvest_date,
            watering_schedule: self.watering_schedule,
            fertilizing_schedule: self.fertilizing_schedule,
            last_watered: self.planting_date,
            last_fertilized: self.planting_date,
            state: PlantState::Active,
            notes: self.notes,
        })
    }
}
