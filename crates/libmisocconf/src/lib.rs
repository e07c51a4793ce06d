//! `libmisocconf` — build-configuration queries against a generated MiSoC/LiteX design.
//!
//! A MiSoC/LiteX hardware/software co-design build emits a `variables.mak`
//! file describing the generated system: the target CPU, its compiler flags,
//! and the directories of the software libraries that exist in the design.
//! This crate parses that file, infers the library set from its naming
//! convention, and composes ordered compiler/linker flag groups for a
//! downstream cross-compilation step — a project-specific `pkg-config`.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`error`] — Error types and result alias
//! - [`variables`] — Variable-file parsing, value transforms, and the ordered variable map
//! - [`library`] — Library inference from the `<NAME>_DIRECTORY` key convention
//! - [`fragment`] — Compiler/linker flag tokens and ordered flag lists
//! - [`compose`] — Query specification and flag-group composition
//! - [`audit`] — Audit logging of queries
//!
//! # Example
//!
//! ```rust
//! use libmisocconf::compose::{self, QuerySpec};
//! use libmisocconf::library;
//! use libmisocconf::variables::VariableMap;
//!
//! let vars = VariableMap::parse(
//!     "CPU=lm32\n\
//!      CPUFLAGS=-mbarrel-shift-enabled\n\
//!      SOC_DIRECTORY=/src/soc\n\
//!      BUILDINC_DIRECTORY=/build/software/include\n\
//!      LIBBASE_DIRECTORY=/src/soc/software/libbase\n\
//!      LIBNET_DIRECTORY=/src/soc/software/libnet\n",
//! );
//!
//! let libs = library::infer(&vars, &[]);
//! assert_eq!(libs.len(), 2);
//! assert_eq!(libs[0].name, "libbase");
//!
//! let spec = QuerySpec {
//!     libs_only_libname: true,
//!     ..QuerySpec::default()
//! };
//! let flags = compose::compose(&vars, &libs, "/build/", &spec).unwrap();
//! assert_eq!(flags.render(' '), "-lbase -lnet");
//! ```

pub mod audit;
pub mod compose;
pub mod error;
pub mod fragment;
pub mod library;
pub mod variables;

/// The version of this library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Location of the generated variable file, relative to the design root.
pub const VARIABLE_FILE_SUBPATH: &str = "software/include/generated/variables.mak";

/// Key suffix marking a directory-valued variable as a library candidate.
pub const DIRECTORY_SUFFIX: &str = "_DIRECTORY";

/// Key prefixes that are never libraries, regardless of suffix.
///
/// `SOC_DIRECTORY` is the source tree of the system-on-chip framework itself
/// and `BUILDINC_DIRECTORY` is the generated include directory; both carry
/// the `_DIRECTORY` suffix without naming a linkable library.
pub const BUILTIN_EXCLUDE_PREFIXES: &[&str] = &["BUILDINC", "SOC"];

/// The CPU identifier variable (e.g. `lm32`, `or1k`).
pub const KEY_CPU: &str = "CPU";

/// The CPU-specific compiler flags variable.
pub const KEY_CPUFLAGS: &str = "CPUFLAGS";

/// The framework source tree variable.
pub const KEY_SOC_DIRECTORY: &str = "SOC_DIRECTORY";

/// The generated include directory variable (also holds the linker script).
pub const KEY_BUILDINC_DIRECTORY: &str = "BUILDINC_DIRECTORY";

/// Environment variable naming an audit log file to append to.
pub const ENV_MISOC_CONFIG_LOG: &str = "MISOC_CONFIG_LOG";
