use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use super::{ExportFormat, PlayRecord};
use crate::error::Result;

/// Dated result log, one file per program run
pub struct SessionLog {
    base_dir: PathBuf,
    format: Box<dyn ExportFormat>,
    current_session: Option<PathBuf>,
}

impl SessionLog {
    pub fn new<P: AsRef<Path>>(base_dir: P, format: Box<dyn ExportFormat>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            format,
            current_session: None,
        }
    }

    /// Create `<base>/YYYY-MM-DD/session_HHMMSS.<ext>` and write the header.
    pub fn start_session(&mut self) -> Result<PathBuf> {
        let now: DateTime<Local> = Local::now();
        let session_dir = self.base_dir.join(now.format("%Y-%m-%d").to_string());
        fs::create_dir_all(&session_dir)?;

        let session_file = session_dir.join(format!(
            "session_{}.{}",
            now.format("%H%M%S"),
            self.format.extension()
        ));
        self.current_session = Some(session_file.clone());

        if let Some(header) = self.format.header() {
            self.append_line(&header)?;
        }
        info!("Session log: {}", session_file.display());

        Ok(session_file)
    }

    /// Append a record. Does nothing before `start_session`.
    pub fn append(&self, record: &PlayRecord) -> Result<()> {
        self.append_line(&self.format.format_row(record))
    }

    fn append_line(&self, line: &str) -> Result<()> {
        if let Some(ref path) = self.current_session {
            let mut file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }

    pub fn current_session_path(&self) -> Option<&Path> {
        self.current_session.as_deref()
    }
}
