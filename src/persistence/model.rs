use serde::{Deserialize, Deserializer, Serialize};

use crate::model::field::Field;

// ============================================================================
// Records exchanged with the form store
// ============================================================================

/// Identifier assigned by the store. Services may send it as text or as a
/// number, under `id` or `_id`.
pub type FormId = String;

fn form_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<FormId, D::Error> {
    crate::model::wire::text_or_number(deserializer)
}

fn optional_form_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<FormId>, D::Error> {
    #[derive(Deserialize)]
    struct Wrapped(#[serde(deserialize_with = "form_id")] FormId);

    Ok(Option::<Wrapped>::deserialize(deserializer)?.map(|Wrapped(id)| id))
}

/// Both spellings of the identifier as a service may send them. A
/// non-empty `id` wins over `_id`.
#[derive(Debug, Default, Deserialize)]
struct IdPair {
    #[serde(default, deserialize_with = "optional_form_id")]
    id: Option<FormId>,

    #[serde(rename = "_id", default, deserialize_with = "optional_form_id")]
    underscore_id: Option<FormId>,
}

impl IdPair {
    fn resolve(self) -> Result<FormId, String> {
        self.id
            .filter(|id| !id.is_empty())
            .or(self.underscore_id)
            .ok_or_else(|| "missing field `id`".to_string())
    }
}

/// A saved form: name plus its flat field list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawFormDocument")]
pub struct FormDocument {
    pub id: FormId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub fields: Vec<Field>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFormDocument {
    #[serde(flatten)]
    ids: IdPair,

    #[serde(default)]
    name: String,

    #[serde(default)]
    fields: Vec<Field>,

    #[serde(default)]
    created_at: Option<String>,
}

impl TryFrom<RawFormDocument> for FormDocument {
    type Error = String;

    fn try_from(raw: RawFormDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.ids.resolve()?,
            name: raw.name,
            fields: raw.fields,
            created_at: raw.created_at,
        })
    }
}

/// Listing entries carry the same members as a fetched form.
pub type FormSummary = FormDocument;

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormPayload {
    pub name: String,
    pub fields: Vec<Field>,
}

/// Body of an update request; absent members are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<Field>>,
}

impl FormUpdate {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            fields: None,
        }
    }
}

/// `{ "id": ... }` returned by create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "IdPair")]
pub struct Created {
    pub id: FormId,
}

impl TryFrom<IdPair> for Created {
    type Error = String;

    fn try_from(ids: IdPair) -> Result<Self, Self::Error> {
        Ok(Self { id: ids.resolve()? })
    }
}

/// Every successful response wraps its payload as `{ "data": ... }`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
}

/// Failure body: `{ "message": ... }`.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
