//! Audit logging for flag queries.
//!
//! Build-system integrations call the query tool many times per build, and
//! reconstructing what each call saw after the fact is painful. The audit
//! log records each query's inputs and output to an append-only file.
//!
//! Logging is activated via:
//! - The `--log-file` CLI flag
//! - The `MISOC_CONFIG_LOG` environment variable
//!
//! Writes are best-effort: a failing log never fails the query.
//!
//! # Log Format
//!
//! One entry per line, prefixed with seconds since the Unix epoch:
//!
//! ```text
//! [1754000000] QUERY: /build/soc/
//! [1754000000] VARIABLES: 14 from /build/soc/software/include/generated/variables.mak
//! [1754000000] LIBRARIES: libbase libcompiler_rt libnet
//! [1754000000] FLAGS: -nostdlib -nodefaultlibs ...
//! ```

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::library::Library;

/// An audit logger recording query events to a file.
#[derive(Debug)]
pub struct AuditLog {
    /// Path to the log file.
    path: PathBuf,

    /// The open file handle, wrapped in a mutex for interior mutability.
    file: Mutex<File>,
}

impl AuditLog {
    /// Open an audit log at the given file path, appending to it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, std::io::Error> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// Get the path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a raw log entry with a timestamp prefix.
    pub fn log(&self, message: &str) {
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "[{}] {message}", timestamp());
        }
    }

    /// Log the start of a query against a design root.
    pub fn log_query_start(&self, design_root: &str) {
        self.log(&format!("QUERY: {design_root}"));
    }

    /// Log how many variables were loaded, and from where.
    pub fn log_variables(&self, count: usize, path: &Path) {
        self.log(&format!("VARIABLES: {count} from {}", path.display()));
    }

    /// Log the inferred library list.
    pub fn log_libraries(&self, libraries: &[Library]) {
        let names: Vec<&str> = libraries.iter().map(|l| l.name.as_str()).collect();
        self.log(&format!("LIBRARIES: {}", names.join(" ")));
    }

    /// Log the rendered output flags.
    pub fn log_flags(&self, rendered: &str) {
        self.log(&format!("FLAGS: {rendered}"));
    }
}

/// Seconds since the Unix epoch.
///
/// Log entries only need to be ordered, so this stays coarse rather than
/// pulling in a datetime crate.
fn timestamp() -> u64 {
    use std::time::SystemTime;

    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
