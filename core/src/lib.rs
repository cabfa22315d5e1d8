pub mod core;
pub mod utils;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use crate::core::catalog::{ScanProfile, ScanType, ScanTypeCatalog};
pub use crate::core::errors::{FormError, ResolveError, ValidationError};
pub use crate::core::form::{FormField, FormPhase, FormState, ValidationErrors};
pub use crate::core::launch_log::LaunchLog;
pub use crate::core::resolver::{CanonicalHost, TargetResolver};
pub use crate::core::validator::{HostKind, TargetValidator};
pub use crate::utils::read_lines;

/// Scan request built by the form and handed to the launcher.
///
/// `target` is the raw text the user typed, never the resolved host.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanRequest {
    pub target: String,
    pub scan_type: ScanType,
    pub description: String,
}

impl ScanRequest {
    pub fn new(target: impl Into<String>, scan_type: ScanType, description: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            scan_type,
            description: description.into(),
        }
    }

    pub fn description_ref(&self) -> Option<&str> {
        if self.description.trim().is_empty() { None } else { Some(&self.description) }
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Outbound "start scan" collaborator.
/// Called once per accepted submit with a request that already passed validation.
pub trait ScanLauncher: Send + Sync {
    fn start_scan(&self, request: &ScanRequest) -> anyhow::Result<()>;
}

pub type LauncherRef = Arc<dyn ScanLauncher>;

/// Prints the accepted request to the terminal.
pub struct ConsoleLauncher;

impl ConsoleLauncher {
    pub fn new_ref() -> LauncherRef {
        Arc::new(Self)
    }
}

impl ScanLauncher for ConsoleLauncher {
    fn start_scan(&self, request: &ScanRequest) -> anyhow::Result<()> {
        use colored::*;
        use std::io::Write;
        let profile = request.scan_type.profile();
        let mut out = std::io::stdout().lock();
        write!(out, "{}\r\n", format!("[+] Scan queued:  {}", request.target).green().bold())?;
        write!(out, "{}\r\n", format!("    Profile:      {}", profile.label).magenta().bold())?;
        write!(out, "{}\r\n", format!("    Duration:     {}", profile.duration).blue())?;
        write!(out, "{}\r\n", format!("    Coverage:     {}", profile.coverage).blue())?;
        if let Some(notes) = request.description_ref() {
            write!(out, "{}\r\n", format!("    Notes:        {}", notes).yellow())?;
        }
        write!(out, "{}\r\n", "──────────────────────────────────────────".dimmed())?;
        out.flush()?;
        Ok(())
    }
}

/// Fans one request out to several launchers in order; stops at the first failure.
pub struct MultiLauncher {
    launchers: Vec<LauncherRef>,
}

impl MultiLauncher {
    pub fn new(launchers: Vec<LauncherRef>) -> Self {
        Self { launchers }
    }
}

impl ScanLauncher for MultiLauncher {
    fn start_scan(&self, request: &ScanRequest) -> anyhow::Result<()> {
        for launcher in &self.launchers {
            launcher.start_scan(request)?;
        }
        Ok(())
    }
}
