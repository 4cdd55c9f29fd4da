//! Salon record types
//!
//! Records live in the JSON document as plain objects. These structs are the
//! typed read views; a record that cannot be coerced into its view is
//! rejected from it but left untouched on disk.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Category label for services without one
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Staff label for services without an assigned staff member
pub const UNASSIGNED: &str = "Unassigned";

/// Top-level arrays of the salon document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Staff,
    Services,
    Appointments,
    /// Legacy array, served read-only
    Clients,
}

impl Collection {
    /// Key of the array in the JSON document (also the REST path segment)
    pub fn key(self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Services => "services",
            Self::Appointments => "appointments",
            Self::Clients => "clients",
        }
    }

    /// Human label for a single record, used in not-found messages
    pub fn singular(self) -> &'static str {
        match self {
            Self::Staff => "Staff member",
            Self::Services => "Service",
            Self::Appointments => "Appointment",
            Self::Clients => "Client",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, deserialize_with = "de_specialties")]
    pub specialties: Vec<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_rating")]
    pub rating: f64,
    #[serde(default)]
    pub completed_services: u64,
}

impl StaffMember {
    pub fn is_active(&self) -> bool {
        self.status == StaffStatus::Active.as_str()
    }

    pub fn is_inactive(&self) -> bool {
        self.status == StaffStatus::Inactive.as_str()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub duration: String,
    #[serde(default, deserialize_with = "de_lenient_price")]
    pub price: Option<f64>,
    /// Empty strings read as absent
    #[serde(default, deserialize_with = "de_category")]
    pub category: Option<String>,
    #[serde(default)]
    pub staff_member_id: Option<u64>,
    #[serde(default)]
    pub staff_member_name: Option<String>,
}

impl Service {
    /// Category used for grouping, `"Uncategorized"` when absent
    pub fn category_label(&self) -> &str {
        match self.category.as_deref() {
            Some(category) if !category.is_empty() => category,
            _ => UNCATEGORIZED,
        }
    }

    pub fn staff_label(&self) -> &str {
        self.staff_member_name.as_deref().unwrap_or(UNASSIGNED)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: u64,
    /// Service name (not id); joined case-insensitively to the catalog
    pub service: String,
    /// `YYYY-MM-DD`
    pub date: String,
    #[serde(deserialize_with = "de_price")]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stylist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Staff status accepted on input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StaffStatus {
    #[default]
    Active,
    Inactive,
}

impl StaffStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// New staff member before the store assigns an id
#[derive(Debug, Clone, PartialEq)]
pub struct StaffDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialties: Vec<String>,
    pub status: StaffStatus,
}

impl StaffDraft {
    /// New members start with a 5.0 rating and no completed services
    pub fn into_value(self) -> Value {
        serde_json::json!({
            "name": self.name,
            "email": self.email,
            "phone": self.phone,
            "specialties": self.specialties,
            "status": self.status.as_str(),
            "rating": default_rating(),
            "completedServices": 0,
        })
    }
}

/// Fill in the fields a new staff member starts with when a client omits them.
/// A comma-separated `specialties` string is split into a list.
pub fn with_staff_defaults(body: Value) -> Value {
    let Value::Object(mut fields) = body else {
        return body;
    };

    let split = match fields.get("specialties") {
        Some(Value::String(raw)) => Some(split_specialties(raw)),
        _ => None,
    };
    if let Some(list) = split {
        fields.insert("specialties".into(), Value::from(list));
    }
    fields
        .entry("status")
        .or_insert_with(|| Value::from(StaffStatus::Active.as_str()));
    fields
        .entry("rating")
        .or_insert_with(|| Value::from(default_rating()));
    fields
        .entry("completedServices")
        .or_insert_with(|| Value::from(0));
    Value::Object(fields)
}

/// Staff fields written onto a service
#[derive(Debug, Clone, PartialEq)]
pub struct StaffAssignment {
    pub staff_member_id: Option<u64>,
    pub staff_member_name: String,
}

/// Service fields for create (all set) or edit (only the changed ones)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub staff: Option<StaffAssignment>,
}

impl ServiceDraft {
    /// JSON object holding only the fields that are set
    pub fn into_patch(self) -> Value {
        let mut patch = Map::new();
        if let Some(name) = self.name {
            patch.insert("name".into(), Value::from(name));
        }
        if let Some(description) = self.description {
            patch.insert("description".into(), Value::from(description));
        }
        if let Some(duration) = self.duration {
            patch.insert("duration".into(), Value::from(duration));
        }
        if let Some(price) = self.price {
            patch.insert("price".into(), Value::from(price));
        }
        if let Some(category) = self.category {
            patch.insert("category".into(), Value::from(category));
        }
        if let Some(staff) = self.staff {
            patch.insert(
                "staffMemberId".into(),
                staff.staff_member_id.map_or(Value::Null, Value::from),
            );
            patch.insert(
                "staffMemberName".into(),
                Value::from(staff.staff_member_name),
            );
        }
        Value::Object(patch)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// New appointment before the store assigns an id
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentDraft {
    pub service: String,
    pub date: String,
    pub price: f64,
    pub client_name: Option<String>,
    pub time: Option<String>,
    pub stylist: Option<String>,
    pub status: Option<String>,
}

impl AppointmentDraft {
    pub fn into_value(self) -> Value {
        let mut record = Map::new();
        record.insert("service".into(), Value::from(self.service));
        record.insert("date".into(), Value::from(self.date));
        record.insert("price".into(), Value::from(self.price));
        let optional = [
            ("clientName", self.client_name),
            ("time", self.time),
            ("stylist", self.stylist),
            ("status", self.status),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                record.insert(key.into(), Value::from(value));
            }
        }
        Value::Object(record)
    }
}

/// Split a comma-separated specialties string, trimming blanks
pub fn split_specialties(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Coerce a JSON price: numbers and numeric strings, finite and non-negative.
pub fn coerce_price(value: &Value) -> std::result::Result<f64, String> {
    let price = match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| format!("price {} is not representable", n))?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("price {:?} is not numeric", s))?,
        other => return Err(format!("price {} is not numeric", other)),
    };

    if !price.is_finite() || price < 0.0 {
        return Err(format!("price {} must be a non-negative number", price));
    }
    Ok(price)
}

fn default_status() -> String {
    StaffStatus::Active.as_str().to_string()
}

fn default_rating() -> f64 {
    5.0
}

fn de_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    coerce_price(&value).map_err(de::Error::custom)
}

fn de_lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_price(&value).ok())
}

fn de_category<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    })
}

fn de_specialties<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Specialties {
        List(Vec<String>),
        Joined(String),
        Missing(()),
    }

    Ok(match Specialties::deserialize(deserializer)? {
        Specialties::List(list) => list,
        Specialties::Joined(raw) => split_specialties(&raw),
        Specialties::Missing(()) => Vec::new(),
    })
}
