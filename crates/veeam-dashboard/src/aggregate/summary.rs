//! Status counters over jobs and emails.

use serde::Serialize;

use crate::model::{BackupJob, Email, EmailIndex};
use crate::status::{classify_email, classify_job, Bucket, ClassificationRules, Status};

/// Success / warning / error counters.
///
/// `success + warning + error == total` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub success: usize,
    pub warning: usize,
    pub error: usize,
    pub total: usize,
}

impl Summary {
    pub fn add(&mut self, status: Status) {
        match status.bucket() {
            Bucket::Success => self.success += 1,
            Bucket::Warning => self.warning += 1,
            Bucket::Error => self.error += 1,
        }
        self.total += 1;
    }
}

/// Email header counters. `warning` does not include `pending`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EmailSummary {
    pub total: usize,
    pub success: usize,
    pub warning: usize,
    pub pending: usize,
    pub error: usize,
}

impl EmailSummary {
    /// Folds pending into warning, as the chart and info line do.
    pub fn buckets(&self) -> Summary {
        Summary {
            success: self.success,
            warning: self.warning + self.pending,
            error: self.error,
            total: self.total,
        }
    }
}

/// Flattens every email's native jobs and adapted configuration backups
/// into one list. Jobs missing their back-reference get the owner's id.
pub fn unify_jobs(emails: &[Email]) -> Vec<BackupJob> {
    emails
        .iter()
        .flat_map(|email| {
            email.all_jobs().map(move |mut job| {
                if job.email_id.is_none() {
                    job.email_id = email.id;
                }
                job
            })
        })
        .collect()
}

/// Classifies every job against its owning email and counts the buckets.
pub fn aggregate(jobs: &[BackupJob], emails: &[Email]) -> Summary {
    let index = EmailIndex::new(emails);
    let mut summary = Summary::default();
    for job in jobs {
        summary.add(classify_job(job, index.processed_of(job)));
    }
    summary
}

pub fn summarize_emails(emails: &[Email], rules: ClassificationRules) -> EmailSummary {
    let mut summary = EmailSummary {
        total: emails.len(),
        ..Default::default()
    };
    for email in emails {
        match classify_email(email, rules) {
            Status::Success => summary.success += 1,
            Status::Warning => summary.warning += 1,
            Status::Pending => summary.pending += 1,
            Status::Error | Status::Unknown => summary.error += 1,
        }
    }
    summary
}

/// One-line explanation under the summary counters. Errors take precedence
/// over warnings.
pub fn summary_message(summary: &Summary) -> String {
    if summary.success + summary.warning + summary.error == 0 {
        "Nenhum dado de backup encontrado para os dispositivos no período selecionado.".to_string()
    } else if summary.error > 0 {
        format!(
            "Atenção: {} backup(s) com status desconhecido.",
            summary.error
        )
    } else if summary.warning > 0 {
        format!(
            "Aviso: {} Backups foram concluídos, porém, com problemas. Verifique os detalhes.",
            summary.warning
        )
    } else {
        "Todos os backups foram processados com sucesso!".to_string()
    }
}
