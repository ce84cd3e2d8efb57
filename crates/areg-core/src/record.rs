//! # Acquisition Register Records
//!
//! A [`Record`] is one seller registration as stored by the server. A
//! [`RecordDraft`] is the editable projection used by the create and edit
//! forms and is the body sent back on `POST /records` and `PUT /records/{id}`.
//!
//! ## Wire Format
//!
//! camelCase JSON. The identifier arrives as `_id` (an `id` alias is also
//! accepted), the identity number may arrive as a JSON number, and an
//! unselected verification method is the empty string.
//!
//! ## Server-Owned Fields
//!
//! `code` and `createdAt` are assigned by the server. A draft created for a
//! new record receives its code exactly once (see [`RecordDraft::assign_code`]);
//! a draft built from an existing record carries both values through unchanged.
//! Neither can be reached through [`RecordDraft::set_field`].

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::{RecordCode, RecordId};

// ─── Verification Method ─────────────────────────────────────────────

/// The document used to verify the seller's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationMethod {
    /// National identity document.
    #[serde(rename = "ID Document")]
    IdDocument,
    /// Driver's licence.
    #[serde(rename = "Driver's License")]
    DriversLicense,
    /// Passport.
    #[serde(rename = "Passport")]
    Passport,
    /// Any other official document, named in `otherVerification`.
    #[serde(rename = "Other Official Document")]
    Other,
}

impl VerificationMethod {
    /// All methods in the order the form offers them.
    pub const ALL: [VerificationMethod; 4] = [
        Self::IdDocument,
        Self::DriversLicense,
        Self::Passport,
        Self::Other,
    ];

    /// The wire (and display) value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IdDocument => "ID Document",
            Self::DriversLicense => "Driver's License",
            Self::Passport => "Passport",
            Self::Other => "Other Official Document",
        }
    }

    /// Whether the free-text `otherVerification` field applies.
    pub fn requires_other_verification(&self) -> bool {
        matches!(self, Self::Other)
    }
}

impl std::fmt::Display for VerificationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| ValidationError::UnknownVerificationMethod(s.to_string()))
    }
}

/// `Option<VerificationMethod>` travels as a plain string; `""` means unselected.
///
/// Decoding is lenient: a value outside the accepted vocabulary reads as
/// unselected, so one odd record never hides the rest of the register.
mod optional_method {
    use super::VerificationMethod;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        value: &Option<VerificationMethod>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.map(|m| m.as_str()).unwrap_or(""))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<VerificationMethod>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(|s| s.parse().ok()))
    }
}

// ─── Record ──────────────────────────────────────────────────────────

/// A seller registration as returned by the server.
///
/// Serializes with the identifier under `_id`. Decoding goes through
/// a private wire shape that tolerates the shapes older servers sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RecordWire")]
pub struct Record {
    /// Server identity.
    #[serde(rename = "_id")]
    pub id: RecordId,
    /// Sequential register code.
    pub code: RecordCode,
    /// Seller's full names.
    pub full_names: String,
    /// Identity document number.
    pub identity_number: String,
    /// How the identity was verified, if recorded.
    #[serde(serialize_with = "optional_method::serialize")]
    pub verification_method: Option<VerificationMethod>,
    /// Name of the document when the method is [`VerificationMethod::Other`].
    pub other_verification: String,
    /// Contact numbers, in the order they were entered.
    pub telephone_numbers: Vec<String>,
    /// Vehicle registration number.
    pub vehicle_registration: String,
    /// Contact address.
    pub contact_address: String,
    /// Description of the goods acquired (optional).
    pub goods_description: String,
    /// Free-form notes (optional).
    pub additional_notes: String,
    /// Server timestamp of creation.
    pub created_at: DateTime<Utc>,
}

/// Record as it arrives on the wire. `_id` wins over `id` when both are
/// present; missing or `null` text fields read as empty.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordWire {
    #[serde(rename = "_id", default)]
    object_id: Option<RecordId>,
    #[serde(default)]
    id: Option<RecordId>,
    #[serde(default, deserialize_with = "crate::wire::lenient_string")]
    code: String,
    #[serde(default, deserialize_with = "crate::wire::lenient_string")]
    full_names: String,
    #[serde(default, deserialize_with = "crate::wire::lenient_string")]
    identity_number: String,
    #[serde(default, deserialize_with = "optional_method::deserialize")]
    verification_method: Option<VerificationMethod>,
    #[serde(default, deserialize_with = "crate::wire::lenient_string")]
    other_verification: String,
    #[serde(default, deserialize_with = "crate::wire::lenient_strings")]
    telephone_numbers: Vec<String>,
    #[serde(default, deserialize_with = "crate::wire::lenient_string")]
    vehicle_registration: String,
    #[serde(default, deserialize_with = "crate::wire::lenient_string")]
    contact_address: String,
    #[serde(default, deserialize_with = "crate::wire::lenient_string")]
    goods_description: String,
    #[serde(default, deserialize_with = "crate::wire::lenient_string")]
    additional_notes: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<RecordWire> for Record {
    type Error = String;

    fn try_from(wire: RecordWire) -> Result<Self, Self::Error> {
        let id = wire
            .object_id
            .or(wire.id)
            .filter(|id| !id.as_str().is_empty())
            .ok_or_else(|| "record has neither `_id` nor `id`".to_string())?;
        Ok(Self {
            id,
            code: RecordCode::new(wire.code),
            full_names: wire.full_names,
            identity_number: wire.identity_number,
            verification_method: wire.verification_method,
            other_verification: wire.other_verification,
            telephone_numbers: wire.telephone_numbers,
            vehicle_registration: wire.vehicle_registration,
            contact_address: wire.contact_address,
            goods_description: wire.goods_description,
            additional_notes: wire.additional_notes,
            created_at: wire.created_at,
        })
    }
}

// ─── Draft ───────────────────────────────────────────────────────────

/// Editable state of the create/edit form, serialized as the request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<RecordCode>,
    /// Seller's full names.
    pub full_names: String,
    /// Identity document number.
    pub identity_number: String,
    /// Selected verification method, `None` until chosen.
    #[serde(serialize_with = "optional_method::serialize")]
    pub verification_method: Option<VerificationMethod>,
    /// Name of the other official document.
    pub other_verification: String,
    /// Contact numbers. Starts with one empty entry.
    pub telephone_numbers: Vec<String>,
    /// Vehicle registration number.
    pub vehicle_registration: String,
    /// Contact address.
    pub contact_address: String,
    /// Description of the goods.
    pub goods_description: String,
    /// Free-form notes.
    pub additional_notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
}

impl RecordDraft {
    /// A blank draft for a new record: no code yet, one empty phone entry.
    pub fn new() -> Self {
        Self {
            code: None,
            full_names: String::new(),
            identity_number: String::new(),
            verification_method: None,
            other_verification: String::new(),
            telephone_numbers: vec![String::new()],
            vehicle_registration: String::new(),
            contact_address: String::new(),
            goods_description: String::new(),
            additional_notes: String::new(),
            created_at: None,
        }
    }

    /// A draft pre-filled from an existing record. `code` and `createdAt`
    /// are carried through unchanged.
    pub fn from_record(record: &Record) -> Self {
        Self {
            code: Some(record.code.clone()),
            full_names: record.full_names.clone(),
            identity_number: record.identity_number.clone(),
            verification_method: record.verification_method,
            other_verification: record.other_verification.clone(),
            telephone_numbers: record.telephone_numbers.clone(),
            vehicle_registration: record.vehicle_registration.clone(),
            contact_address: record.contact_address.clone(),
            goods_description: record.goods_description.clone(),
            additional_notes: record.additional_notes.clone(),
            created_at: Some(record.created_at),
        }
    }

    /// The register code, once known.
    pub fn code(&self) -> Option<&RecordCode> {
        self.code.as_ref()
    }

    /// The creation timestamp of the record being edited.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Set the code issued by the server. Only the first assignment takes
    /// effect; returns whether this call set it.
    pub fn assign_code(&mut self, code: RecordCode) -> bool {
        if self.code.is_some() {
            return false;
        }
        self.code = Some(code);
        true
    }

    /// Whether the other-document field applies to the current selection.
    pub fn other_verification_visible(&self) -> bool {
        self.verification_method
            .is_some_and(|m| m.requires_other_verification())
    }

    /// Replace one scalar field.
    ///
    /// # Errors
    ///
    /// [`ValidationError::UnknownVerificationMethod`] when `field` is the
    /// verification method and `value` names none of the accepted documents.
    /// An empty value clears the selection.
    pub fn set_field(&mut self, field: RecordField, value: &str) -> Result<(), ValidationError> {
        let target = match field {
            RecordField::FullNames => &mut self.full_names,
            RecordField::IdentityNumber => &mut self.identity_number,
            RecordField::OtherVerification => &mut self.other_verification,
            RecordField::VehicleRegistration => &mut self.vehicle_registration,
            RecordField::ContactAddress => &mut self.contact_address,
            RecordField::GoodsDescription => &mut self.goods_description,
            RecordField::AdditionalNotes => &mut self.additional_notes,
            RecordField::VerificationMethod => {
                self.verification_method = if value.trim().is_empty() {
                    None
                } else {
                    Some(value.parse()?)
                };
                return Ok(());
            }
        };
        *target = value.to_string();
        Ok(())
    }
}

impl Default for RecordDraft {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Field Names ─────────────────────────────────────────────────────

/// The scalar fields a form may edit, addressed by their wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    /// `fullNames`
    FullNames,
    /// `identityNumber`
    IdentityNumber,
    /// `verificationMethod`
    VerificationMethod,
    /// `otherVerification`
    OtherVerification,
    /// `vehicleRegistration`
    VehicleRegistration,
    /// `contactAddress`
    ContactAddress,
    /// `goodsDescription`
    GoodsDescription,
    /// `additionalNotes`
    AdditionalNotes,
}

impl RecordField {
    /// The wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullNames => "fullNames",
            Self::IdentityNumber => "identityNumber",
            Self::VerificationMethod => "verificationMethod",
            Self::OtherVerification => "otherVerification",
            Self::VehicleRegistration => "vehicleRegistration",
            Self::ContactAddress => "contactAddress",
            Self::GoodsDescription => "goodsDescription",
            Self::AdditionalNotes => "additionalNotes",
        }
    }
}

impl FromStr for RecordField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fullNames" => Ok(Self::FullNames),
            "identityNumber" => Ok(Self::IdentityNumber),
            "verificationMethod" => Ok(Self::VerificationMethod),
            "otherVerification" => Ok(Self::OtherVerification),
            "vehicleRegistration" => Ok(Self::VehicleRegistration),
            "contactAddress" => Ok(Self::ContactAddress),
            "goodsDescription" => Ok(Self::GoodsDescription),
            "additionalNotes" => Ok(Self::AdditionalNotes),
            "code" | "createdAt" => Err(ValidationError::ReadOnlyField(s.to_string())),
            other => Err(ValidationError::UnknownField(other.to_string())),
        }
    }
}
