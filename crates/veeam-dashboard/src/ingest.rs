//! Normalization of raw API JSON into canonical records.
//!
//! The reporting API grew over several schema revisions, so the same fact
//! shows up under different keys (`summary_error`, `Error`, `error`;
//! `total_size`, `totalSize`; ...) and in different JSON types (counters are
//! TEXT columns, processing flags are 0/1 or booleans). Everything is mapped
//! here, once, so no later stage checks field variants.

use std::collections::HashMap;

use log::{debug, warn};
use serde_json::{Map, Value};

use crate::model::{BackupJob, ConfigBackup, Email, HostRecord, JobSource, Processed, VmEntry};

/// Which nested lists an email payload already carried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmbeddedLists {
    pub jobs: bool,
    pub host_data: bool,
    pub config_backups: bool,
}

/// Read accessor over one JSON object.
struct Fields<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    fn first(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter()
            .filter_map(|k| self.map.get(*k))
            .find(|v| !v.is_null())
    }

    fn text(&self, keys: &[&str]) -> Option<String> {
        match self.first(keys)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn int(&self, keys: &[&str]) -> Option<i64> {
        match self.first(keys)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Non-negative counter; anything unparseable counts as zero.
    fn count(&self, keys: &[&str]) -> u32 {
        match self.first(keys) {
            Some(Value::Number(n)) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
                .map_or(0, |v| u32::try_from(v).unwrap_or(u32::MAX)),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            Some(Value::Bool(true)) => 1,
            _ => 0,
        }
    }

    fn processed(&self, keys: &[&str]) -> Processed {
        match self.first(keys) {
            Some(Value::Bool(b)) => Processed::from_bool(*b),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(1) => Processed::Yes,
                Some(0) => Processed::No,
                _ => Processed::Unknown,
            },
            Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "1" | "true" => Processed::Yes,
                "0" | "false" => Processed::No,
                _ => Processed::Unknown,
            },
            _ => Processed::Unknown,
        }
    }

    fn list(&self, key: &str) -> Option<&'a Vec<Value>> {
        self.map.get(key).and_then(Value::as_array)
    }
}

/// Returns the object map, or `None` for non-objects and error markers.
///
/// The API answers storage faults with `[{"error": "..."}]`; such entries
/// are not records.
fn record_map<'a>(value: &'a Value, kind: &str) -> Option<Fields<'a>> {
    let Some(map) = value.as_object() else {
        warn!("Skipping non-object {} record: {}", kind, value);
        return None;
    };

    if map.len() == 1 {
        if let Some(message) = map.get("error") {
            warn!("API reported an error instead of {} records: {}", kind, message);
            return None;
        }
    }

    Some(Fields { map })
}

pub fn email_from_value(value: &Value) -> Option<(Email, EmbeddedLists)> {
    let f = record_map(value, "email")?;

    let embedded = EmbeddedLists {
        jobs: f.list("backup_jobs").is_some(),
        host_data: f.list("backup_data").is_some(),
        config_backups: f.list("config_backups").is_some(),
    };

    let email = Email {
        id: f.int(&["id"]),
        subject: f.text(&["subject"]),
        date: f.text(&["date"]),
        sent_time: f.text(&["sent_time"]),
        is_processed: f.processed(&["is_processed"]),
        processed_date: f.text(&["processed_date"]),
        status: f.text(&["status"]),
        backup_jobs: f.list("backup_jobs").map(|v| jobs(v)).unwrap_or_default(),
        backup_data: f
            .list("backup_data")
            .map(|v| host_records(v))
            .unwrap_or_default(),
        config_backups: f
            .list("config_backups")
            .map(|v| config_backups(v))
            .unwrap_or_default(),
    };

    Some((email, embedded))
}

pub fn job_from_value(value: &Value) -> Option<BackupJob> {
    let f = record_map(value, "backup job")?;

    Some(BackupJob {
        id: f.int(&["id"]),
        email_id: f.int(&["email_id"]),
        job_name: f.text(&["job_name", "jobName"]),
        host: f.text(&["host"]),
        status: f.text(&["status", "Status"]),
        summary_success: f.count(&["summary_success", "Success", "success"]),
        summary_warning: f.count(&["summary_warning", "Warning", "warning"]),
        summary_error: f.count(&["summary_error", "Error", "error"]),
        created_by: f.text(&["created_by"]),
        created_at: f.text(&["created_at"]),
        start_time: f.text(&["start_time"]),
        end_time: f.text(&["end_time"]),
        duration: f.text(&["duration", "duracao"]),
        total_size: f.text(&["total_size", "totalSize"]),
        backup_size: f.text(&["backup_size"]),
        data_read: f.text(&["data_read"]),
        dedupe: f.text(&["dedupe"]),
        transferred: f.text(&["transferred"]),
        compression: f.text(&["compression"]),
        processed_vms: f.text(&["processed_vms"]),
        processed_vms_total: f.text(&["processed_vms_total"]),
        source: JobSource::Vm,
    })
}

pub fn config_backup_from_value(value: &Value) -> Option<ConfigBackup> {
    let f = record_map(value, "config backup")?;

    Some(ConfigBackup {
        id: f.int(&["id"]),
        email_id: f.int(&["email_id"]),
        server: f.text(&["server"]),
        repository: f.text(&["repository"]),
        status: f.text(&["status"]),
        catalogs_processed: f.int(&["catalogs_processed"]),
        backup_date: f.text(&["backup_date"]),
        start_time: f.text(&["start_time"]),
        end_time: f.text(&["end_time"]),
        data_size: f.text(&["data_size"]),
        backup_size: f.text(&["backup_size"]),
        duration: f.text(&["duration"]),
        compression: f.text(&["compression"]),
        warnings: f.text(&["warnings"]),
    })
}

pub fn vm_from_value(value: &Value) -> Option<VmEntry> {
    let f = record_map(value, "vm")?;

    Some(VmEntry {
        id: f.int(&["id"]),
        job_id: f.int(&["job_id"]),
        name: f.text(&["name"]),
        status: f.text(&["status"]),
        start_time: f.text(&["start_time"]),
        end_time: f.text(&["end_time"]),
        size: f.text(&["size"]),
        read: f.text(&["read"]),
        transferred: f.text(&["transferred"]),
        duration: f.text(&["duration"]),
        details: f.text(&["details"]),
    })
}

pub fn host_record_from_value(value: &Value) -> Option<HostRecord> {
    let f = record_map(value, "host")?;

    Some(HostRecord {
        email_id: f.int(&["email_id"]),
        host: f.text(&["host"]),
        ip: f.text(&["ip"]),
        status: f.text(&["status"]),
        date: f.text(&["date"]),
    })
}

pub fn emails(values: &[Value]) -> Vec<(Email, EmbeddedLists)> {
    let parsed = values.iter().filter_map(email_from_value).collect();
    dedupe_by_id(parsed, |(email, _)| email.id)
}

pub fn jobs(values: &[Value]) -> Vec<BackupJob> {
    let parsed = values.iter().filter_map(job_from_value).collect();
    dedupe_by_id(parsed, |job| job.id)
}

pub fn config_backups(values: &[Value]) -> Vec<ConfigBackup> {
    let parsed = values.iter().filter_map(config_backup_from_value).collect();
    dedupe_by_id(parsed, |cfg| cfg.id)
}

pub fn vms(values: &[Value]) -> Vec<VmEntry> {
    let parsed = values.iter().filter_map(vm_from_value).collect();
    dedupe_by_id(parsed, |vm| vm.id)
}

pub fn host_records(values: &[Value]) -> Vec<HostRecord> {
    values.iter().filter_map(host_record_from_value).collect()
}

/// Removes repeated ids. The first occurrence keeps its position, the last
/// occurrence supplies the value. Records without an id are all kept.
pub fn dedupe_by_id<T, F>(items: Vec<T>, id_of: F) -> Vec<T>
where
    F: Fn(&T) -> Option<i64>,
{
    let before = items.len();
    let mut slots: Vec<Option<T>> = Vec::with_capacity(items.len());
    let mut positions: HashMap<i64, usize> = HashMap::new();

    for item in items {
        match id_of(&item) {
            Some(id) => match positions.get(&id) {
                Some(&pos) => slots[pos] = Some(item),
                None => {
                    positions.insert(id, slots.len());
                    slots.push(Some(item));
                }
            },
            None => slots.push(Some(item)),
        }
    }

    let result: Vec<T> = slots.into_iter().flatten().collect();
    if result.len() != before {
        debug!("Dropped {} duplicate records", before - result.len());
    }
    result
}
