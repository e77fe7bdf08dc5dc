use tracing::{error, info};

use crate::controller::{Controller, ValidationError};
use crate::models::resume_file::{accepted_resumes, ResumeFile};
use crate::session::progress::batch_percent;
use crate::session::{FileStatus, Session};

const BUSY_TEXT: &str = "Uploading resumes...";
const UPLOAD_FAILED: &str = "Upload failed";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadBatchReport {
    pub accepted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl Controller {
    /// Uploads the PDF/DOCX files of a batch one at a time, in order.
    ///
    /// A failed file gets an error row and the batch moves on. Once the batch is
    /// done the candidate cache is refreshed from the matcher and a batch
    /// notification is shown, whatever the per-file outcomes were.
    pub async fn upload_batch(
        &self,
        session: &mut Session,
        files: Vec<ResumeFile>,
    ) -> Result<UploadBatchReport, ValidationError> {
        let offered = files.len();
        let files = accepted_resumes(files);

        if files.is_empty() {
            info!("Upload batch rejected: none of {offered} file(s) is PDF or DOCX");
            let rejection = ValidationError::NoAcceptedFiles;
            session.notifications.error(rejection.to_string());
            return Err(rejection);
        }

        let total = files.len();
        let mut report = UploadBatchReport {
            accepted: total,
            ..Default::default()
        };
        info!("Uploading {total} of {offered} file(s)");

        self.progress.set_busy(BUSY_TEXT);

        for (i, file) in files.iter().enumerate() {
            self.progress.update(
                batch_percent(i + 1, total),
                format!("Processing {}...", file.name),
            );

            match self.matcher.upload_resume(file).await {
                Ok(uploaded) => {
                    session.add_file_row(
                        &file.name,
                        FileStatus::Success,
                        format!("Employee ID: {}", uploaded.employee_id),
                    );
                    session.uploaded.push(uploaded);
                    session.stats.upload_count += 1;
                    report.succeeded += 1;
                }
                Err(e) => {
                    error!("Upload error for {}: {e}", file.name);
                    session.add_file_row(&file.name, FileStatus::Error, e.user_message(UPLOAD_FAILED));
                    report.failed += 1;
                }
            }
        }

        self.progress.clear_busy();
        self.progress.reset();

        self.refresh_candidates(session).await;
        session
            .notifications
            .success(format!("{total} resume(s) processed successfully!"));

        info!(
            "Upload batch finished: {} succeeded, {} failed",
            report.succeeded, report.failed
        );
        Ok(report)
    }
}
