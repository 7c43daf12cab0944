use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use uuid::Uuid;

use crate::cat_service;
use crate::errors::ServiceError;
use models::feeding::{self, Meal};

/// Raw submission from the feeding form. Both fields arrive as strings
/// and are validated here.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedingInput {
    pub date: String,
    pub meal: String,
}

/// Validate the submission without touching the database.
pub fn parse_input(input: &FeedingInput) -> Result<(NaiveDate, Meal), ServiceError> {
    let date = NaiveDate::parse_from_str(&input.date, "%Y-%m-%d")
        .map_err(|e| ServiceError::Validation(format!("bad date {:?}: {}", input.date, e)))?;
    let meal: Meal = input.meal.parse()?;
    Ok((date, meal))
}

/// Append a feeding to the cat's log. NotFound when the cat id does not
/// exist; Validation when the submission is malformed — the controller
/// decides whether that is surfaced or silently discarded.
pub async fn record_feeding(
    db: &DatabaseConnection,
    cat_id: Uuid,
    input: &FeedingInput,
) -> Result<feeding::Model, ServiceError> {
    cat_service::get_cat(db, cat_id).await?;
    let (date, meal) = parse_input(input)?;
    Ok(feeding::create(db, cat_id, date, meal).await?)
}
