//! Establishment domain model.
//!
//! An establishment is a venue listed in the directory (hotel, café,
//! restaurant, ...). Each one gets a QR code that resolves back to its
//! public page or, when it has none, to a contact card.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::QrMenuResult;
use crate::repository::{Entity, Timestamped};
use crate::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, OWNER_MOBILE_LEN, OWNER_NAME_LEN,
    validate_email, validate_len_range, validate_optional_text, validate_phone,
    validate_required_text, validate_url,
};

/// Collection holding establishment documents.
pub const COLLECTION: &str = "establishments";

/// Stored name of [`Establishment::is_active`].
pub const FIELD_IS_ACTIVE: &str = "isActive";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub enum EstablishmentType {
    Hotel,
    Cafe,
    Restaurant,
    FastFood,
    Bar,
    Bakery,
    IceCream,
    TeaHouse,
}

/// Owner contact embedded in an establishment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Owner {
    /// 2–100 characters.
    pub name: String,
    /// 10–20 characters, phone-number shaped.
    pub mobile: String,
}

impl Owner {
    pub fn validate(&self) -> QrMenuResult<()> {
        validate_required_text(&self.name, "owner.name", OWNER_NAME_LEN.1)?;
        validate_len_range(&self.name, "owner.name", OWNER_NAME_LEN)?;
        validate_len_range(&self.mobile, "owner.mobile", OWNER_MOBILE_LEN)?;
        validate_phone(&self.mobile, "owner.mobile")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Establishment {
    /// Assigned by the repository on creation; empty until then.
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// External public page. When set, scanning the QR code redirects here.
    pub website: Option<String>,
    #[serde(rename = "type")]
    pub establishment_type: EstablishmentType,
    pub owner: Option<Owner>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Last generated QR code as a `data:image/png;base64,...` URL.
    pub qr_code_data_url: Option<String>,
}

fn default_active() -> bool {
    true
}

impl Establishment {
    /// Build a fresh, active establishment from a create payload.
    ///
    /// Id and timestamps are filled in by the repository on write.
    pub fn new(input: CreateEstablishment) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            name: input.name,
            address: input.address,
            city: input.city,
            country: input.country,
            postal_code: input.postal_code,
            phone: input.phone,
            email: input.email,
            website: input.website,
            establishment_type: input.establishment_type,
            owner: input.owner,
            is_active: true,
            created_at: now,
            updated_at: now,
            qr_code_data_url: None,
        }
    }

    /// Replace every user-editable field.
    ///
    /// Id, creation time, activation state and the cached QR code are
    /// server-owned and survive the update.
    pub fn apply_update(&mut self, input: UpdateEstablishment) {
        self.name = input.name;
        self.address = input.address;
        self.city = input.city;
        self.country = input.country;
        self.postal_code = input.postal_code;
        self.phone = input.phone;
        self.email = input.email;
        self.website = input.website;
        self.establishment_type = input.establishment_type;
        self.owner = input.owner;
    }

    /// The configured external site, if any non-blank one is set.
    pub fn website_url(&self) -> Option<&str> {
        self.website
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

impl Timestamped for Establishment {
    fn set_created_at(&mut self, at: DateTime<Utc>) {
        self.created_at = at;
    }

    fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

impl Entity for Establishment {
    const KIND: &'static str = "establishment";

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

/// The cached QR code of one establishment, written on its own.
///
/// Merging this projection touches `qrCodeDataUrl` and `updatedAt` only,
/// so an edit or (de)activation landing between the read and the write
/// is kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeCache {
    #[serde(default)]
    pub id: String,
    pub qr_code_data_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl QrCodeCache {
    pub fn new(id: &str, qr_code_data_url: Option<String>) -> Self {
        Self {
            id: id.to_string(),
            qr_code_data_url,
            updated_at: Utc::now(),
        }
    }
}

impl Timestamped for QrCodeCache {
    // Creation time belongs to the full record.
    fn set_created_at(&mut self, _at: DateTime<Utc>) {}

    fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

impl Entity for QrCodeCache {
    const KIND: &'static str = "establishment";

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

/// Fields required to create a new establishment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEstablishment {
    pub name: String,
    pub address: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    #[serde(rename = "type")]
    pub establishment_type: EstablishmentType,
    pub owner: Option<Owner>,
}

impl CreateEstablishment {
    pub fn validate(&self) -> QrMenuResult<()> {
        validate_fields(EstablishmentFields {
            name: &self.name,
            address: &self.address,
            city: self.city.as_deref(),
            country: self.country.as_deref(),
            postal_code: self.postal_code.as_deref(),
            phone: self.phone.as_deref(),
            email: self.email.as_deref(),
            website: self.website.as_deref(),
            owner: self.owner.as_ref(),
        })
    }
}

/// Replacement values for an existing establishment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEstablishment {
    pub name: String,
    pub address: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    #[serde(rename = "type")]
    pub establishment_type: EstablishmentType,
    pub owner: Option<Owner>,
}

impl UpdateEstablishment {
    pub fn validate(&self) -> QrMenuResult<()> {
        validate_fields(EstablishmentFields {
            name: &self.name,
            address: &self.address,
            city: self.city.as_deref(),
            country: self.country.as_deref(),
            postal_code: self.postal_code.as_deref(),
            phone: self.phone.as_deref(),
            email: self.email.as_deref(),
            website: self.website.as_deref(),
            owner: self.owner.as_ref(),
        })
    }
}

struct EstablishmentFields<'a> {
    name: &'a str,
    address: &'a str,
    city: Option<&'a str>,
    country: Option<&'a str>,
    postal_code: Option<&'a str>,
    phone: Option<&'a str>,
    email: Option<&'a str>,
    website: Option<&'a str>,
    owner: Option<&'a Owner>,
}

fn validate_fields(fields: EstablishmentFields<'_>) -> QrMenuResult<()> {
    validate_required_text(fields.name, "name", MAX_NAME_LEN)?;
    validate_required_text(fields.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(fields.city, "city", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(fields.country, "country", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(fields.postal_code, "postalCode", MAX_SHORT_TEXT_LEN)?;
    if let Some(phone) = fields.phone {
        validate_optional_text(Some(phone), "phone", MAX_SHORT_TEXT_LEN)?;
        validate_phone(phone, "phone")?;
    }
    if let Some(email) = fields.email {
        validate_email(email, "email")?;
    }
    if let Some(website) = fields.website.filter(|w| !w.trim().is_empty()) {
        validate_url(website, "website")?;
    }
    if let Some(owner) = fields.owner {
        owner.validate()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn create_input() -> CreateEstablishment {
        CreateEstablishment {
            name: "Blue Door Café".into(),
            address: "12 Harbour Street".into(),
            city: Some("Galway".into()),
            country: Some("Ireland".into()),
            postal_code: None,
            phone: Some("+353 91 555 0101".into()),
            email: Some("hello@bluedoor.cafe".into()),
            website: None,
            establishment_type: EstablishmentType::Cafe,
            owner: Some(Owner {
                name: "Aoife Byrne".into(),
                mobile: "+353 87 555 0199".into(),
            }),
        }
    }

    #[test]
    fn valid_create_passes() {
        assert!(create_input().validate().is_ok());
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut input = create_input();
        input.name = "  ".into();
        assert!(input.validate().is_err());
    }

    #[test]
    fn short_owner_name_is_rejected() {
        let mut input = create_input();
        input.owner = Some(Owner {
            name: "A".into(),
            mobile: "+353 87 555 0199".into(),
        });
        assert!(input.validate().is_err());
    }

    #[test]
    fn owner_mobile_must_look_like_a_phone() {
        let mut input = create_input();
        input.owner = Some(Owner {
            name: "Aoife Byrne".into(),
            mobile: "not-a-number".into(),
        });
        assert!(input.validate().is_err());
    }

    #[test]
    fn new_establishment_is_active_without_qr() {
        let est = Establishment::new(create_input());
        assert!(est.is_active);
        assert!(est.id.is_empty());
        assert!(est.qr_code_data_url.is_none());
    }

    #[test]
    fn apply_update_keeps_server_owned_fields() {
        let mut est = Establishment::new(create_input());
        est.id = "est-1".into();
        est.is_active = false;
        est.qr_code_data_url = Some("data:image/png;base64,AAAA".into());
        let created_at = est.created_at;

        est.apply_update(UpdateEstablishment {
            name: "Blue Door Bistro".into(),
            address: "14 Harbour Street".into(),
            city: None,
            country: None,
            postal_code: None,
            phone: None,
            email: None,
            website: Some("https://bluedoor.example".into()),
            establishment_type: EstablishmentType::Restaurant,
            owner: None,
        });

        assert_eq!(est.id, "est-1");
        assert_eq!(est.created_at, created_at);
        assert!(!est.is_active);
        assert_eq!(
            est.qr_code_data_url.as_deref(),
            Some("data:image/png;base64,AAAA")
        );
        assert_eq!(est.name, "Blue Door Bistro");
        assert_eq!(est.establishment_type, EstablishmentType::Restaurant);
    }

    #[test]
    fn website_url_ignores_blank_values() {
        let mut est = Establishment::new(create_input());
        est.website = Some("   ".into());
        assert_eq!(est.website_url(), None);
        est.website = Some("https://bluedoor.example".into());
        assert_eq!(est.website_url(), Some("https://bluedoor.example"));
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let est = Establishment::new(create_input());
        let value = serde_json::to_value(&est).unwrap();
        assert_eq!(value["type"], json!("Cafe"));
        assert_eq!(value[FIELD_IS_ACTIVE], json!(true));
        assert!(value.get("postalCode").is_some());
        assert!(value.get("qrCodeDataUrl").is_some());
    }
}
