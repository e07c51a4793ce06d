//! Parser for the generated `variables.mak` file.
//!
//! A built design tree carries a flat key/value description of itself at
//! `<design-root>/software/include/generated/variables.mak`:
//!
//! ```text
//! export BUILDINC_DIRECTORY
//! CPU=lm32
//! CPUFLAGS=-mbarrel-shift-enabled -mmultiply-enabled
//! SOC_DIRECTORY=/src/soc
//! BUILDINC_DIRECTORY=/build/software/include
//! LIBBASE_DIRECTORY=/src/soc/software/libbase
//! ```
//!
//! The format is deliberately dumb: a line defines a variable exactly when it
//! splits on `=` into two parts. Everything else — the `export` header the
//! build system emits, blank lines, values that themselves contain `=` — is
//! discarded without comment by the default parser. [`VariableMap::parse_strict`]
//! reports those lines instead, for callers that want to validate a file.
//!
//! Values are opaque strings. The parser performs no trimming and no path
//! normalization; a toolchain that needs OS-path cleanup applies
//! [`normalize_os_paths`] (or its own transform) via
//! [`VariableMap::transform_values`] as a separate step after parsing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// An ordered mapping from variable names to raw string values.
///
/// Keys are unique: redefining a key overwrites its value in place, so
/// iteration order is always the first-appearance order of each key in the
/// source text. That order is observable — it decides library enumeration
/// and therefore output flag order — which is why this is a plain ordered
/// list and not a hash map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableMap {
    entries: Vec<(String, String)>,
}

impl VariableMap {
    /// Create an empty variable map.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Parse variable-file text, silently discarding non-conforming lines.
    pub fn parse(text: &str) -> Self {
        let mut map = Self::new();
        // Split on '\n' only: values keep any trailing '\r', exactly as the
        // file was written. See normalize_os_paths.
        for line in text.split('\n') {
            if let Some((key, value)) = split_assignment(line) {
                map.insert(key, value);
            }
        }
        map
    }

    /// Parse variable-file text, reporting every non-conforming line.
    ///
    /// Blank lines are tolerated. Any other line that does not define a
    /// variable — the conventional `export` header included — becomes a
    /// [`Error::MalformedLine`] with its 1-based line number; several
    /// offenders are aggregated into [`Error::Multiple`].
    pub fn parse_strict(text: &str) -> Result<Self> {
        let mut map = Self::new();
        let mut errors = Vec::new();

        for (idx, line) in text.split('\n').enumerate() {
            if line.is_empty() {
                continue;
            }
            match split_assignment(line) {
                Some((key, value)) => map.insert(key, value),
                None => errors.push(Error::MalformedLine {
                    line: idx + 1,
                    text: line.to_string(),
                }),
            }
        }

        match errors.len() {
            0 => Ok(map),
            1 => Err(errors.remove(0)),
            _ => Err(Error::Multiple(errors)),
        }
    }

    /// Load and parse the variable file of a built design tree.
    pub fn from_design_root(design_root: &Path) -> Result<Self> {
        Ok(Self::parse(&read_variable_file(design_root)?))
    }

    /// Like [`VariableMap::from_design_root`], but with strict parsing.
    pub fn from_design_root_strict(design_root: &Path) -> Result<Self> {
        Self::parse_strict(&read_variable_file(design_root)?)
    }

    /// Insert a variable, overwriting in place if the key already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a variable's value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Look up a variable that must exist, failing with [`Error::MissingVariable`].
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| Error::MissingVariable {
            key: key.to_string(),
        })
    }

    /// Whether a variable is defined.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of variables defined.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Apply a transform to every value in place.
    ///
    /// This is the hook for the optional OS-path cleanup some toolchains
    /// need; it is never part of parsing itself.
    pub fn transform_values<F>(&mut self, transform: F)
    where
        F: Fn(&str) -> String,
    {
        for (_, value) in &mut self.entries {
            *value = transform(value);
        }
    }

    /// Serialize back to `KEY=VALUE` lines, one per entry, in map order.
    ///
    /// Feeding the result to [`VariableMap::parse`] reproduces this map.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.iter() {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
        out
    }
}

/// Split a line into `(key, value)` when it contains exactly one `=`.
fn split_assignment(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.splitn(3, '=');
    let key = parts.next()?;
    let value = parts.next()?;
    if parts.next().is_some() {
        // A second '=' means this is not a plain assignment; drop it.
        return None;
    }
    Some((key, value))
}

/// Path of the generated variable file under a design root.
pub fn variable_file_path(design_root: &Path) -> PathBuf {
    design_root.join(crate::VARIABLE_FILE_SUBPATH)
}

fn read_variable_file(design_root: &Path) -> Result<String> {
    let path = variable_file_path(design_root);
    fs::read_to_string(&path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            Error::VariableFileNotFound { path: path.clone() }
        } else {
            Error::Io(e)
        }
    })
}

/// Normalize Windows-flavored values emitted by some build hosts.
///
/// Rewrites the two-character `\\` sequence to `/`, strips carriage
/// returns, and maps the `C:/` drive prefix to `/c/` so that downstream
/// gcc-style tooling sees a single path convention.
pub fn normalize_os_paths(value: &str) -> String {
    value
        .replace("\\\\", "/")
        .replace('\r', "")
        .replace("C:/", "/c/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_assignments() {
        let vars = VariableMap::parse("CPU=lm32\nSOC_DIRECTORY=/src/soc\n");
        assert_eq!(vars.get("CPU"), Some("lm32"));
        assert_eq!(vars.get("SOC_DIRECTORY"), Some("/src/soc"));
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn discards_export_header_and_blank_lines() {
        let vars = VariableMap::parse("export BUILDINC_DIRECTORY\n\nCPU=lm32\n");
        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("CPU"), Some("lm32"));
    }

    #[test]
    fn discards_values_containing_equals() {
        let vars = VariableMap::parse("GOOD=1\nBAD=a=b\n");
        assert_eq!(vars.len(), 1);
        assert!(!vars.contains_key("BAD"));
    }

    #[test]
    fn keeps_empty_values() {
        let vars = VariableMap::parse("EMPTY=\n");
        assert_eq!(vars.get("EMPTY"), Some(""));
    }

    #[test]
    fn performs_no_trimming() {
        let vars = VariableMap::parse(" CPU = lm32 \n");
        assert_eq!(vars.get(" CPU "), Some(" lm32 "));
        assert_eq!(vars.get("CPU"), None);
    }

    #[test]
    fn values_keep_trailing_carriage_return() {
        let vars = VariableMap::parse("CPU=lm32\r\nTRIPLE=lm32-elf\r\n");
        assert_eq!(vars.get("CPU"), Some("lm32\r"));
    }

    #[test]
    fn later_definition_wins_but_keeps_first_position() {
        let vars = VariableMap::parse("A=1\nB=2\nA=3\n");
        assert_eq!(vars.get("A"), Some("3"));
        let keys: Vec<&str> = vars.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["A", "B"]);
    }

    #[test]
    fn render_round_trips() {
        let text = "export BUILDINC_DIRECTORY\nCPU=lm32\nA=1\nB=2\nA=3\n";
        let vars = VariableMap::parse(text);
        let reparsed = VariableMap::parse(&vars.render());
        assert_eq!(reparsed, vars);
    }

    #[test]
    fn strict_accepts_conforming_input() {
        let vars = VariableMap::parse_strict("CPU=lm32\n\nSOC_DIRECTORY=/s\n").unwrap();
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn strict_reports_export_header() {
        let err = VariableMap::parse_strict("export BUILDINC_DIRECTORY\nCPU=lm32\n").unwrap_err();
        match err {
            Error::MalformedLine { line, text } => {
                assert_eq!(line, 1);
                assert_eq!(text, "export BUILDINC_DIRECTORY");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn strict_aggregates_several_offenders() {
        let err = VariableMap::parse_strict("export A\nB=1\nc=d=e\n").unwrap_err();
        match err {
            Error::Multiple(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn transform_values_applies_in_place() {
        let mut vars = VariableMap::parse("A=x\nB=y\n");
        vars.transform_values(|v| v.to_uppercase());
        assert_eq!(vars.get("A"), Some("X"));
        assert_eq!(vars.get("B"), Some("Y"));
    }

    #[test]
    fn normalize_os_paths_rewrites_windows_values() {
        assert_eq!(
            normalize_os_paths("C:/msys64\\\\build\\\\soc\r"),
            "/c/msys64/build/soc"
        );
        assert_eq!(normalize_os_paths("/plain/unix/path"), "/plain/unix/path");
    }

    #[test]
    fn from_design_root_reads_the_generated_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let generated = dir.path().join("software/include/generated");
        fs::create_dir_all(&generated).unwrap();
        fs::write(generated.join("variables.mak"), "CPU=lm32\n").unwrap();

        let vars = VariableMap::from_design_root(dir.path()).unwrap();
        assert_eq!(vars.get("CPU"), Some("lm32"));
    }

    #[test]
    fn from_design_root_reports_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = VariableMap::from_design_root(dir.path()).unwrap_err();
        match err {
            Error::VariableFileNotFound { path } => {
                assert!(path.ends_with(crate::VARIABLE_FILE_SUBPATH));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
