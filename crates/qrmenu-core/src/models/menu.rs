//! Menu domain model.
//!
//! A menu is a four-level tree stored as a single document:
//! menu → categories → subcategories → items. Every level below the
//! menu carries a `displayOrder` used for presentation; ties keep their
//! stored order.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::QrMenuResult;
use crate::repository::{Entity, Timestamped};
use crate::validation::{
    MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_currency,
    validate_optional_text, validate_price, validate_required_text,
};

/// Collection holding menu documents.
pub const COLLECTION: &str = "menus";

/// Stored name of [`Menu::establishment_id`].
pub const FIELD_ESTABLISHMENT_ID: &str = "establishmentId";

pub const DEFAULT_CURRENCY: &str = "USD";

fn default_true() -> bool {
    true
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.into()
}

fn new_node_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    #[serde(default)]
    pub id: String,
    /// Owning establishment. Not checked for existence.
    pub establishment_id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub categories: Vec<MenuCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sub_categories: Vec<MenuSubCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuSubCategory {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Always greater than zero.
    pub price: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub is_vegetarian: bool,
    #[serde(default)]
    pub is_vegan: bool,
    #[serde(default)]
    pub is_gluten_free: bool,
    pub image_url: Option<String>,
    #[serde(default)]
    pub allergens: BTreeSet<String>,
    #[serde(default)]
    pub preparation_time_minutes: u32,
    #[serde(default)]
    pub display_order: i32,
}

impl Menu {
    pub fn new(input: CreateMenu) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            establishment_id: input.establishment_id,
            name: input.name,
            description: input.description,
            is_active: true,
            created_at: now,
            updated_at: now,
            categories: Vec::new(),
        }
    }

    /// Replace the editable header fields; the category tree and the
    /// owning establishment are kept.
    pub fn apply_update(&mut self, input: UpdateMenu) {
        self.name = input.name;
        self.description = input.description;
        self.is_active = input.is_active;
    }

    /// Stable-sort every level of the tree by `displayOrder`.
    pub fn sort_by_display_order(&mut self) {
        self.categories.sort_by_key(|c| c.display_order);
        for category in &mut self.categories {
            category.sub_categories.sort_by_key(|s| s.display_order);
            for sub in &mut category.sub_categories {
                sub.items.sort_by_key(|i| i.display_order);
            }
        }
    }

    pub fn category_mut(&mut self, category_id: &str) -> Option<&mut MenuCategory> {
        self.categories.iter_mut().find(|c| c.id == category_id)
    }

    /// Remove a category; `false` when no such category exists.
    pub fn remove_category(&mut self, category_id: &str) -> bool {
        let before = self.categories.len();
        self.categories.retain(|c| c.id != category_id);
        self.categories.len() != before
    }
}

impl MenuCategory {
    pub fn apply_update(&mut self, input: UpdateMenuCategory) {
        self.name = input.name;
        self.description = input.description;
        self.display_order = input.display_order;
        self.is_active = input.is_active;
    }

    pub fn sub_category_mut(&mut self, sub_category_id: &str) -> Option<&mut MenuSubCategory> {
        self.sub_categories
            .iter_mut()
            .find(|s| s.id == sub_category_id)
    }

    pub fn remove_sub_category(&mut self, sub_category_id: &str) -> bool {
        let before = self.sub_categories.len();
        self.sub_categories.retain(|s| s.id != sub_category_id);
        self.sub_categories.len() != before
    }
}

impl MenuSubCategory {
    pub fn apply_update(&mut self, input: UpdateMenuSubCategory) {
        self.name = input.name;
        self.description = input.description;
        self.display_order = input.display_order;
        self.is_active = input.is_active;
    }

    pub fn item_mut(&mut self, item_id: &str) -> Option<&mut MenuItem> {
        self.items.iter_mut().find(|i| i.id == item_id)
    }

    pub fn remove_item(&mut self, item_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != item_id);
        self.items.len() != before
    }
}

impl MenuItem {
    pub fn apply_update(&mut self, input: UpdateMenuItem) {
        self.name = input.name;
        self.description = input.description;
        self.price = input.price;
        self.currency = input.currency;
        self.is_available = input.is_available;
        self.is_vegetarian = input.is_vegetarian;
        self.is_vegan = input.is_vegan;
        self.is_gluten_free = input.is_gluten_free;
        self.image_url = input.image_url;
        self.allergens = input.allergens;
        self.preparation_time_minutes = input.preparation_time_minutes;
        self.display_order = input.display_order;
    }
}

impl Timestamped for Menu {
    fn set_created_at(&mut self, at: DateTime<Utc>) {
        self.created_at = at;
    }

    fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

impl Entity for Menu {
    const KIND: &'static str = "menu";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn timestamps_mut(&mut self) -> Option<&mut dyn Timestamped> {
        Some(self)
    }
}

// ---------------------------------------------------------------------------
// Input payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenu {
    pub establishment_id: String,
    pub name: String,
    pub description: Option<String>,
}

impl CreateMenu {
    pub fn validate(&self) -> QrMenuResult<()> {
        validate_required_text(&self.establishment_id, "establishmentId", MAX_SHORT_TEXT_LEN)?;
        validate_node_text(&self.name, self.description.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenu {
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl UpdateMenu {
    pub fn validate(&self) -> QrMenuResult<()> {
        validate_node_text(&self.name, self.description.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuCategory {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: i32,
}

impl CreateMenuCategory {
    pub fn validate(&self) -> QrMenuResult<()> {
        validate_node_text(&self.name, self.description.as_deref())
    }
}

impl From<CreateMenuCategory> for MenuCategory {
    fn from(input: CreateMenuCategory) -> Self {
        Self {
            id: new_node_id(),
            name: input.name,
            description: input.description,
            display_order: input.display_order,
            is_active: true,
            sub_categories: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuCategory {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl UpdateMenuCategory {
    pub fn validate(&self) -> QrMenuResult<()> {
        validate_node_text(&self.name, self.description.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuSubCategory {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: i32,
}

impl CreateMenuSubCategory {
    pub fn validate(&self) -> QrMenuResult<()> {
        validate_node_text(&self.name, self.description.as_deref())
    }
}

impl From<CreateMenuSubCategory> for MenuSubCategory {
    fn from(input: CreateMenuSubCategory) -> Self {
        Self {
            id: new_node_id(),
            name: input.name,
            description: input.description,
            display_order: input.display_order,
            is_active: true,
            items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuSubCategory {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl UpdateMenuSubCategory {
    pub fn validate(&self) -> QrMenuResult<()> {
        validate_node_text(&self.name, self.description.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuItem {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub is_vegetarian: bool,
    #[serde(default)]
    pub is_vegan: bool,
    #[serde(default)]
    pub is_gluten_free: bool,
    pub image_url: Option<String>,
    #[serde(default)]
    pub allergens: BTreeSet<String>,
    #[serde(default)]
    pub preparation_time_minutes: u32,
    #[serde(default)]
    pub display_order: i32,
}

impl CreateMenuItem {
    pub fn validate(&self) -> QrMenuResult<()> {
        validate_item(
            &self.name,
            self.description.as_deref(),
            self.price,
            &self.currency,
            self.image_url.as_deref(),
        )
    }
}

impl From<CreateMenuItem> for MenuItem {
    fn from(input: CreateMenuItem) -> Self {
        Self {
            id: new_node_id(),
            name: input.name,
            description: input.description,
            price: input.price,
            currency: input.currency,
            is_available: true,
            is_vegetarian: input.is_vegetarian,
            is_vegan: input.is_vegan,
            is_gluten_free: input.is_gluten_free,
            image_url: input.image_url,
            allergens: input.allergens,
            preparation_time_minutes: input.preparation_time_minutes,
            display_order: input.display_order,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuItem {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub is_vegetarian: bool,
    #[serde(default)]
    pub is_vegan: bool,
    #[serde(default)]
    pub is_gluten_free: bool,
    pub image_url: Option<String>,
    #[serde(default)]
    pub allergens: BTreeSet<String>,
    #[serde(default)]
    pub preparation_time_minutes: u32,
    #[serde(default)]
    pub display_order: i32,
}

impl UpdateMenuItem {
    pub fn validate(&self) -> QrMenuResult<()> {
        validate_item(
            &self.name,
            self.description.as_deref(),
            self.price,
            &self.currency,
            self.image_url.as_deref(),
        )
    }
}

fn validate_node_text(name: &str, description: Option<&str>) -> QrMenuResult<()> {
    validate_required_text(name, "name", MAX_NAME_LEN)?;
    validate_optional_text(description, "description", MAX_DESCRIPTION_LEN)
}

fn validate_item(
    name: &str,
    description: Option<&str>,
    price: Decimal,
    currency: &str,
    image_url: Option<&str>,
) -> QrMenuResult<()> {
    validate_node_text(name, description)?;
    validate_price(price, "price")?;
    validate_currency(currency, "currency")?;
    validate_optional_text(image_url, "imageUrl", MAX_URL_LEN)
}
