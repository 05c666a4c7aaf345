use bson::{Document, doc};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::AppError,
    wire::{coerce_float, pass_through},
};

pub const RESTAURANTS: &str = "restaurants";
pub const MENUS: &str = "menus";
pub const ANALYTICS: &str = "analytics";

pub const ID: &str = "_id";
pub const CREATED_AT: &str = "createdAt";
pub const UPDATED_AT: &str = "updatedAt";
pub const RESTAURANT_ID: &str = "restaurantId";

/// A number sent either as JSON number or as numeric text, e.g. `4.5` or `"4.5"`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Numeral {
    Number(f64),
    Text(String),
}

#[derive(Deserialize, Debug, Default)]
pub struct RestaurantPayload {
    pub name: Option<Value>,
    pub address: Option<Value>,
    pub rating: Option<Numeral>,
    #[serde(rename = "type")]
    pub kind: Option<Value>,
}

impl RestaurantPayload {
    /// Every mutable restaurant field, used for both create and update.
    pub fn into_fields(self) -> Result<Document, AppError> {
        let rating = coerce_float("rating", self.rating.as_ref())?;

        Ok(doc! {
            "name": pass_through("name", self.name)?,
            "address": pass_through("address", self.address)?,
            "rating": rating,
            "type": pass_through("type", self.kind)?,
        })
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct MenuPayload {
    pub name: Option<Value>,
    pub price: Option<Numeral>,
    pub category: Option<Value>,
    pub restaurant_id: Option<Value>,
}

impl MenuPayload {
    pub fn into_create_fields(mut self) -> Result<Document, AppError> {
        let restaurant_id = self.restaurant_id.take();
        let mut fields = self.into_update_fields()?;

        fields.insert(RESTAURANT_ID, pass_through("restaurantId", restaurant_id)?);

        Ok(fields)
    }

    /// `restaurantId` is fixed at creation and never part of an update.
    pub fn into_update_fields(self) -> Result<Document, AppError> {
        let price = coerce_float("price", self.price.as_ref())?;

        Ok(doc! {
            "name": pass_through("name", self.name)?,
            "price": price,
            "category": pass_through("category", self.category)?,
        })
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub restaurant_id: Option<Value>,
    pub name: Option<Value>,
}
