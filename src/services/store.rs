//! JSON document record store
//!
//! The whole salon lives in one JSON file with top-level `staff`,
//! `services` and `appointments` arrays (plus a legacy `clients` array).
//! Records are kept as raw JSON objects so unknown fields survive a rewrite;
//! typed views are derived on read.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{
    Appointment, Collection, Result, SalonError, Service, StaffMember, StoreWarning,
};

/// On-disk document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalonDocument {
    #[serde(default)]
    pub appointments: Vec<Value>,
    #[serde(default)]
    pub clients: Vec<Value>,
    #[serde(default)]
    pub services: Vec<Value>,
    #[serde(default)]
    pub staff: Vec<Value>,
    /// Any other top-level keys, preserved as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SalonDocument {
    pub fn records(&self, collection: Collection) -> &[Value] {
        match collection {
            Collection::Staff => &self.staff,
            Collection::Services => &self.services,
            Collection::Appointments => &self.appointments,
            Collection::Clients => &self.clients,
        }
    }

    fn records_mut(&mut self, collection: Collection) -> &mut Vec<Value> {
        match collection {
            Collection::Staff => &mut self.staff,
            Collection::Services => &mut self.services,
            Collection::Appointments => &mut self.appointments,
            Collection::Clients => &mut self.clients,
        }
    }

    /// Next id for a collection: one past the largest, or 1 when empty
    pub fn next_id(&self, collection: Collection) -> u64 {
        self.records(collection)
            .iter()
            .filter_map(record_id)
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }
}

/// Typed view of one collection
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    pub records: Vec<T>,
    /// Records that could not be coerced into `T`
    pub rejected: usize,
}

impl<T: DeserializeOwned> Listing<T> {
    fn from_raw(collection: Collection, raw: &[Value]) -> Self {
        let mut records = Vec::with_capacity(raw.len());
        let mut rejected = 0;

        for value in raw {
            match serde_json::from_value::<T>(value.clone()) {
                Ok(record) => records.push(record),
                Err(e) => {
                    rejected += 1;
                    tracing::warn!(
                        collection = collection.key(),
                        id = ?record_id(value),
                        error = %e,
                        "skipping record that does not fit its type"
                    );
                }
            }
        }

        Self { records, rejected }
    }
}

/// Typed view of the whole document at one point in time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub staff: Vec<StaffMember>,
    pub services: Vec<Service>,
    pub appointments: Vec<Appointment>,
    /// Records rejected across all collections
    pub rejected: usize,
    pub warning: Option<StoreWarning>,
}

impl Snapshot {
    pub fn from_document(document: &SalonDocument, warning: Option<StoreWarning>) -> Self {
        let staff = Listing::<StaffMember>::from_raw(Collection::Staff, &document.staff);
        let services = Listing::<Service>::from_raw(Collection::Services, &document.services);
        let appointments =
            Listing::<Appointment>::from_raw(Collection::Appointments, &document.appointments);

        Self {
            rejected: staff.rejected + services.rejected + appointments.rejected,
            staff: staff.records,
            services: services.records,
            appointments: appointments.records,
            warning,
        }
    }
}

/// Record store backed by a single JSON file
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document. A missing file is an empty salon; an unreadable or
    /// corrupted one is logged and also read as empty.
    pub fn read(&self) -> (SalonDocument, Option<StoreWarning>) {
        match self.read_strict() {
            Ok(document) => (document, None),
            Err(warning) => {
                tracing::warn!(path = %self.path.display(), "{}", warning);
                (SalonDocument::default(), Some(warning))
            }
        }
    }

    /// Raw records of one collection, as stored
    pub fn list_raw(&self, collection: Collection) -> Vec<Value> {
        let (mut document, _) = self.read();
        std::mem::take(document.records_mut(collection))
    }

    pub fn staff(&self) -> Listing<StaffMember> {
        self.list(Collection::Staff)
    }

    pub fn services(&self) -> Listing<Service> {
        self.list(Collection::Services)
    }

    pub fn appointments(&self) -> Listing<Appointment> {
        self.list(Collection::Appointments)
    }

    pub fn snapshot(&self) -> Snapshot {
        let (document, warning) = self.read();
        Snapshot::from_document(&document, warning)
    }

    /// Append a record with the next free id. Any `id` in the body is replaced.
    pub fn create(&self, collection: Collection, body: Value) -> Result<Value> {
        let mut fields = into_object(collection, body)?;
        let mut document = self.read_for_write()?;

        let id = document.next_id(collection);
        fields.insert("id".into(), Value::from(id));
        let record = Value::Object(fields);
        check_typed(collection, &record)?;
        document.records_mut(collection).push(record.clone());

        self.save(&document)?;
        tracing::info!(collection = collection.key(), id, "created record");
        Ok(record)
    }

    /// Shallow-merge `body` over the record with `id`; the id itself is kept.
    pub fn update(&self, collection: Collection, id: u64, body: Value) -> Result<Value> {
        let patch = into_object(collection, body)?;
        let mut document = self.read_for_write()?;

        let record = document
            .records_mut(collection)
            .iter_mut()
            .find(|r| record_id(r) == Some(id))
            .ok_or(SalonError::NotFound {
                collection: collection.key(),
                id,
            })?;

        let mut updated = record.clone();
        if let Value::Object(fields) = &mut updated {
            fields.extend(patch);
            fields.insert("id".into(), Value::from(id));
        }
        check_typed(collection, &updated)?;
        *record = updated.clone();

        self.save(&document)?;
        tracing::info!(collection = collection.key(), id, "updated record");
        Ok(updated)
    }

    pub fn delete(&self, collection: Collection, id: u64) -> Result<()> {
        ensure_writable(collection)?;
        let mut document = self.read_for_write()?;

        let records = document.records_mut(collection);
        let before = records.len();
        records.retain(|r| record_id(r) != Some(id));
        if records.len() == before {
            return Err(SalonError::NotFound {
                collection: collection.key(),
                id,
            });
        }

        self.save(&document)?;
        tracing::info!(collection = collection.key(), id, "deleted record");
        Ok(())
    }

    fn list<T: DeserializeOwned>(&self, collection: Collection) -> Listing<T> {
        let (document, _) = self.read();
        Listing::from_raw(collection, document.records(collection))
    }

    /// Read with a shared lock, reporting failures as warnings
    fn read_strict(&self) -> std::result::Result<SalonDocument, StoreWarning> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no data file yet");
            return Ok(SalonDocument::default());
        }

        let file = File::open(&self.path)
            .map_err(|e| StoreWarning::LoadFailed(format!("Failed to open data file: {}", e)))?;

        file.lock_shared().map_err(|e| {
            StoreWarning::LoadFailed(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut content = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut content);
        let _ = file.unlock();
        read.map_err(|e| StoreWarning::LoadFailed(format!("Failed to read data file: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| StoreWarning::Corrupted(format!("Corrupted data file: {}", e)))
    }

    /// Mutations never overwrite a document they could not read
    fn read_for_write(&self) -> Result<SalonDocument> {
        self.read_strict().map_err(|warning| {
            SalonError::Store(format!(
                "refusing to rewrite {}: {}",
                self.path.display(),
                warning
            ))
        })
    }

    /// Save using atomic write (temp file + rename) with exclusive lock.
    fn save(&self, document: &SalonDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(document)
            .map_err(|e| SalonError::Store(format!("Serialization failed: {}", e)))?;

        let temp_path = self.path.with_extension("json.tmp");

        {
            let mut file = File::create(&temp_path)
                .map_err(|e| SalonError::Store(format!("Failed to create temp file: {}", e)))?;
            file.write_all(content.as_bytes())
                .map_err(|e| SalonError::Store(format!("Failed to write temp file: {}", e)))?;
            file.sync_all()
                .map_err(|e| SalonError::Store(format!("Failed to sync temp file: {}", e)))?;
        }

        let target = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)?;

        target
            .lock_exclusive()
            .map_err(|e| SalonError::Store(format!("Failed to acquire write lock: {}", e)))?;

        fs::rename(&temp_path, &self.path)
            .map_err(|e| SalonError::Store(format!("Failed to rename temp file: {}", e)))?;

        let _ = target.unlock();
        tracing::debug!(path = %self.path.display(), bytes = content.len(), "data file written");
        Ok(())
    }
}

/// Integer id of a raw record
pub fn record_id(record: &Value) -> Option<u64> {
    record.get("id").and_then(Value::as_u64)
}

fn ensure_writable(collection: Collection) -> Result<()> {
    if collection == Collection::Clients {
        return Err(SalonError::InvalidRecord(
            "clients are read-only".to_string(),
        ));
    }
    Ok(())
}

/// Appointments feed the insights, so one that would not read back as an
/// `Appointment` (bad price, missing service or date) is refused up front.
fn check_typed(collection: Collection, record: &Value) -> Result<()> {
    if collection != Collection::Appointments {
        return Ok(());
    }
    serde_json::from_value::<Appointment>(record.clone())
        .map(|_| ())
        .map_err(|e| SalonError::InvalidRecord(format!("invalid appointment: {}", e)))
}

fn into_object(collection: Collection, body: Value) -> Result<Map<String, Value>> {
    ensure_writable(collection)?;
    match body {
        Value::Object(fields) => Ok(fields),
        other => Err(SalonError::InvalidRecord(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_store() -> (RecordStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = RecordStore::new(temp_dir.path().join("salonData.json"));
        (store, temp_dir)
    }

    fn write_document(store: &RecordStore, value: Value) {
        fs::write(store.path(), serde_json::to_string_pretty(&value).unwrap()).unwrap();
    }

    // ========== read ==========

    #[test]
    fn test_missing_file_reads_empty_without_warning() {
        let (store, _temp) = create_test_store();
        let (document, warning) = store.read();

        assert!(warning.is_none());
        assert_eq!(document, SalonDocument::default());
    }

    #[test]
    fn test_corrupted_file_reads_empty_with_warning() {
        let (store, _temp) = create_test_store();
        fs::write(store.path(), "not valid json {{{").unwrap();

        let (document, warning) = store.read();

        assert!(matches!(warning, Some(StoreWarning::Corrupted(_))));
        assert!(document.services.is_empty());
    }

    #[test]
    fn test_missing_arrays_default_to_empty() {
        let (store, _temp) = create_test_store();
        write_document(&store, json!({"services": [{"id": 1, "name": "Trim"}]}));

        let (document, warning) = store.read();

        assert!(warning.is_none());
        assert_eq!(document.services.len(), 1);
        assert!(document.staff.is_empty());
        assert!(document.appointments.is_empty());
    }

    #[test]
    fn test_typed_views_reject_bad_records() {
        let (store, _temp) = create_test_store();
        write_document(
            &store,
            json!({
                "appointments": [
                    {"id": 1, "service": "Trim", "date": "2025-11-08", "price": 20},
                    {"id": 2, "service": "Trim", "date": "2025-11-08", "price": -1},
                    {"id": 3, "service": "Trim", "date": "2025-11-08", "price": "25.5"},
                    {"id": 4, "date": "2025-11-08", "price": 10}
                ]
            }),
        );

        let listing = store.appointments();

        assert_eq!(listing.records.len(), 2);
        assert_eq!(listing.rejected, 2);
        assert!((listing.records[1].price - 25.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_snapshot_counts_rejections() {
        let (store, _temp) = create_test_store();
        write_document(
            &store,
            json!({
                "staff": [{"id": 1, "name": "Emily"}],
                "services": [{"id": 1, "name": "Trim", "category": "Haircuts"}, {"name": "No id"}],
                "appointments": [{"id": 1, "service": "Trim", "date": "2025-11-08", "price": 20}]
            }),
        );

        let snapshot = store.snapshot();

        assert_eq!(snapshot.staff.len(), 1);
        assert_eq!(snapshot.services.len(), 1);
        assert_eq!(snapshot.appointments.len(), 1);
        assert_eq!(snapshot.rejected, 1);
        assert!(snapshot.warning.is_none());
    }

    // ========== create ==========

    #[test]
    fn test_create_assigns_sequential_ids() {
        let (store, _temp) = create_test_store();

        let first = store
            .create(Collection::Services, json!({"name": "Trim"}))
            .unwrap();
        let second = store
            .create(Collection::Services, json!({"name": "Color", "id": 99}))
            .unwrap();

        assert_eq!(first["id"], 1);
        assert_eq!(second["id"], 2);
        assert_eq!(store.list_raw(Collection::Services).len(), 2);
    }

    #[test]
    fn test_create_uses_max_id_not_length() {
        let (store, _temp) = create_test_store();
        write_document(&store, json!({"staff": [{"id": 7, "name": "A"}, {"id": 3, "name": "B"}]}));

        let created = store
            .create(Collection::Staff, json!({"name": "C"}))
            .unwrap();

        assert_eq!(created["id"], 8);
    }

    #[test]
    fn test_create_rejects_non_object() {
        let (store, _temp) = create_test_store();
        let result = store.create(Collection::Services, json!(["not", "an", "object"]));
        assert!(matches!(result, Err(SalonError::InvalidRecord(_))));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_create_refuses_corrupted_document() {
        let (store, _temp) = create_test_store();
        fs::write(store.path(), "{ broken").unwrap();

        let result = store.create(Collection::Staff, json!({"name": "Emily"}));

        assert!(matches!(result, Err(SalonError::Store(_))));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "{ broken");
    }

    #[test]
    fn test_create_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let store = RecordStore::new(temp_dir.path().join("nested").join("salonData.json"));

        store
            .create(Collection::Services, json!({"name": "Trim"}))
            .unwrap();

        assert!(store.path().exists());
    }

    #[test]
    fn test_create_refuses_unreadable_appointment() {
        let (store, _temp) = create_test_store();

        for price in [json!(-50), json!("free"), json!(null)] {
            let result = store.create(
                Collection::Appointments,
                json!({"service": "Balayage", "date": "2025-11-08", "price": price}),
            );
            assert!(matches!(result, Err(SalonError::InvalidRecord(_))), "price {}", price);
        }
        let result = store.create(
            Collection::Appointments,
            json!({"service": 7, "date": "2025-11-08", "price": 50}),
        );
        assert!(matches!(result, Err(SalonError::InvalidRecord(_))));

        assert!(!store.path().exists());
    }

    #[test]
    fn test_create_appointment_with_string_price() {
        let (store, _temp) = create_test_store();
        store
            .create(
                Collection::Appointments,
                json!({"service": "Balayage", "date": "2025-11-08", "price": "180"}),
            )
            .unwrap();

        let listing = store.appointments();
        assert_eq!(listing.records.len(), 1);
        assert_eq!(listing.rejected, 0);
    }

    #[test]
    fn test_clients_are_read_only() {
        let (store, _temp) = create_test_store();
        let result = store.create(Collection::Clients, json!({"name": "Ana"}));
        assert!(matches!(result, Err(SalonError::InvalidRecord(_))));
    }

    // ========== update ==========

    #[test]
    fn test_update_merges_and_keeps_id() {
        let (store, _temp) = create_test_store();
        write_document(
            &store,
            json!({"services": [{"id": 4, "name": "Trim", "price": 20, "legacyField": "kept"}]}),
        );

        let updated = store
            .update(Collection::Services, 4, json!({"price": 25, "id": 100}))
            .unwrap();

        assert_eq!(updated["id"], 4);
        assert_eq!(updated["price"], 25);
        assert_eq!(updated["name"], "Trim");
        assert_eq!(updated["legacyField"], "kept");
        assert_eq!(store.list_raw(Collection::Services)[0], updated);
    }

    #[test]
    fn test_update_refuses_bad_appointment_price() {
        let (store, _temp) = create_test_store();
        let original = json!({"id": 1, "service": "Trim", "date": "2025-11-08", "price": 20});
        write_document(&store, json!({"appointments": [original.clone()]}));

        let result = store.update(Collection::Appointments, 1, json!({"price": -5}));

        assert!(matches!(result, Err(SalonError::InvalidRecord(_))));
        assert_eq!(store.list_raw(Collection::Appointments), vec![original]);
    }

    #[test]
    fn test_update_missing_record() {
        let (store, _temp) = create_test_store();
        let result = store.update(Collection::Services, 1, json!({"price": 25}));
        assert!(matches!(
            result,
            Err(SalonError::NotFound {
                collection: "services",
                id: 1
            })
        ));
    }

    // ========== delete ==========

    #[test]
    fn test_delete_removes_record() {
        let (store, _temp) = create_test_store();
        write_document(
            &store,
            json!({"services": [{"id": 1, "name": "Trim"}, {"id": 2, "name": "Color"}]}),
        );

        store.delete(Collection::Services, 1).unwrap();

        let remaining = store.list_raw(Collection::Services);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0]["id"], 2);
    }

    #[test]
    fn test_delete_missing_record_leaves_file() {
        let (store, _temp) = create_test_store();
        write_document(&store, json!({"services": [{"id": 1, "name": "Trim"}]}));
        let before = fs::read_to_string(store.path()).unwrap();

        let result = store.delete(Collection::Services, 9);

        assert!(matches!(result, Err(SalonError::NotFound { .. })));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    }

    // ========== persistence ==========

    #[test]
    fn test_unknown_top_level_keys_survive_rewrite() {
        let (store, _temp) = create_test_store();
        write_document(&store, json!({"services": [], "settings": {"currency": "USD"}}));

        store
            .create(Collection::Services, json!({"name": "Trim"}))
            .unwrap();

        let raw: Value = serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["settings"]["currency"], "USD");
        assert!(raw["clients"].is_array());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let (store, temp) = create_test_store();
        store
            .create(Collection::Staff, json!({"name": "Emily"}))
            .unwrap();

        let leftovers: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .flatten()
            .filter(|e| e.path().extension().is_some_and(|x| x == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_next_id() {
        let document: SalonDocument = serde_json::from_value(json!({
            "staff": [{"id": 2}, {"id": "x"}, {"name": "no id"}]
        }))
        .unwrap();
        assert_eq!(document.next_id(Collection::Staff), 3);
        assert_eq!(document.next_id(Collection::Services), 1);
    }
}
