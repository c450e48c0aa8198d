use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlantError {
    #[error("invalid date in field '{field}': '{value}'")]
    InvalidDate { field: &'static str, value: String },

    #[error("invalid month {month0} (zero-based) for year {year}")]
    InvalidMonth { year: i32, month0: u32 },

    #[error("date out of range while computing {0}")]
    DateOutOfRange(&'static str),

    #[error("{field} must be a positive number of days, got {value}")]
    InvalidSchedule { field: &'static str, value: i64 },

    #[error("harvest date {harvest} is before planting date {planting}")]
    HarvestBeforePlanting { planting: String, harvest: String },
}

pub type Result<T> = std::result::Result<T, PlantError>;
