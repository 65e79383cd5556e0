//! Backup jobs, configuration backups and VM detail rows.

use serde::{Deserialize, Serialize};

/// Where a job row came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobSource {
    #[default]
    Vm,
    Configuration,
}

/// A backup execution record scoped to one email.
///
/// `email_id` is a back-reference; the owning [`Email`](super::Email) holds
/// the job in its own list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BackupJob {
    pub id: Option<i64>,
    pub email_id: Option<i64>,
    pub job_name: Option<String>,
    pub host: Option<String>,
    pub status: Option<String>,
    pub summary_success: u32,
    pub summary_warning: u32,
    pub summary_error: u32,
    pub created_by: Option<String>,
    pub created_at: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub duration: Option<String>,
    pub total_size: Option<String>,
    pub backup_size: Option<String>,
    pub data_read: Option<String>,
    pub dedupe: Option<String>,
    pub transferred: Option<String>,
    pub compression: Option<String>,
    pub processed_vms: Option<String>,
    pub processed_vms_total: Option<String>,
    pub source: JobSource,
}

impl BackupJob {
    /// Job name, falling back to the host. Empty strings count as missing.
    pub fn display_name(&self) -> Option<&str> {
        non_empty(self.job_name.as_deref()).or_else(|| non_empty(self.host.as_deref()))
    }

    /// A record with neither its own id nor an owning email cannot be
    /// placed anywhere.
    pub fn is_unidentified(&self) -> bool {
        self.id.is_none() && self.email_id.is_none()
    }
}

/// A Veeam configuration backup result.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConfigBackup {
    pub id: Option<i64>,
    pub email_id: Option<i64>,
    pub server: Option<String>,
    pub repository: Option<String>,
    pub status: Option<String>,
    pub catalogs_processed: Option<i64>,
    pub backup_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub data_size: Option<String>,
    pub backup_size: Option<String>,
    pub duration: Option<String>,
    pub compression: Option<String>,
    pub warnings: Option<String>,
}

impl From<&ConfigBackup> for BackupJob {
    /// Adapts a configuration backup into a job row. Summary counters come
    /// from an exact, case-sensitive match on `status`.
    fn from(cfg: &ConfigBackup) -> Self {
        let status = cfg.status.as_deref();
        let flag = |expected: &str| u32::from(status == Some(expected));

        BackupJob {
            id: cfg.id,
            email_id: cfg.email_id,
            job_name: Some(format!(
                "Configuração: {}",
                cfg.server.as_deref().unwrap_or_default()
            )),
            host: cfg.server.clone(),
            status: cfg.status.clone(),
            summary_success: flag("Success"),
            summary_warning: flag("Warning"),
            summary_error: flag("Error"),
            created_by: None,
            created_at: cfg.backup_date.clone(),
            start_time: cfg.start_time.clone(),
            end_time: cfg.end_time.clone(),
            duration: cfg.duration.clone(),
            total_size: cfg.data_size.clone(),
            backup_size: cfg.backup_size.clone(),
            data_read: None,
            dedupe: None,
            transferred: None,
            compression: cfg.compression.clone(),
            processed_vms: None,
            processed_vms_total: None,
            source: JobSource::Configuration,
        }
    }
}

/// One VM line of a job's detail table. Not part of any aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VmEntry {
    pub id: Option<i64>,
    pub job_id: Option<i64>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub size: Option<String>,
    pub read: Option<String>,
    pub transferred: Option<String>,
    pub duration: Option<String>,
    pub details: Option<String>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
