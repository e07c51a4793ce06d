//! Library inference from the variable map's naming convention.
//!
//! A generated design declares each software library through a single
//! `<NAME>_DIRECTORY` variable pointing at the library's source directory;
//! there is no manifest beyond that. Discovery is therefore pure key
//! inspection: take every `*_DIRECTORY` key that is not one of the reserved
//! framework directories, strip the suffix, lowercase the rest. The
//! lowercased name is the library's on-disk directory name, so a library
//! with capital letters in its real name cannot be represented.

use crate::error::{Error, Result};
use crate::variables::VariableMap;

/// A software library present in the generated design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    /// Lowercase library name, e.g. `libbase`.
    pub name: String,

    /// The library's source directory, taken verbatim from the variable file.
    pub directory: String,
}

/// Enumerate the libraries declared in the variable map.
///
/// `exclude` supplements the built-in reserved prefixes
/// ([`crate::BUILTIN_EXCLUDE_PREFIXES`]); all prefix matching is
/// case-insensitive. The returned order is the first-appearance order of
/// the keys in the source text, which downstream flag composition relies on.
pub fn infer(vars: &VariableMap, exclude: &[String]) -> Vec<Library> {
    vars.iter()
        .filter(|(key, _)| key.ends_with(crate::DIRECTORY_SUFFIX))
        .filter(|(key, _)| !is_excluded(key, exclude))
        .map(|(key, value)| Library {
            name: key[..key.len() - crate::DIRECTORY_SUFFIX.len()].to_lowercase(),
            directory: value.to_string(),
        })
        .collect()
}

/// Locate a single library's directory by name.
///
/// Reconstructs the `UPPER(name)_DIRECTORY` key and fails with
/// [`Error::MissingVariable`] naming that key when it is absent.
pub fn lookup_directory<'a>(vars: &'a VariableMap, name: &str) -> Result<&'a str> {
    let key = format!("{}{}", name.to_uppercase(), crate::DIRECTORY_SUFFIX);
    vars.get(&key).ok_or(Error::MissingVariable { key })
}

fn is_excluded(key: &str, exclude: &[String]) -> bool {
    let key = key.to_uppercase();
    crate::BUILTIN_EXCLUDE_PREFIXES
        .iter()
        .any(|prefix| key.starts_with(prefix))
        || exclude
            .iter()
            .any(|entry| key.starts_with(&entry.to_uppercase()))
}
