//! Flag-group composition.
//!
//! Given the variable map, the inferred library list, and a query
//! specification, this module assembles the ordered flag groups a
//! cross-compilation step needs:
//!
//! - **compile-other** — optimization, CPU flags, warnings, language mode
//! - **compile-include** — the framework and generated include roots
//! - **link-other** — bare-metal linking switches and the startup object
//! - **link-dir** — `-L` search paths (linker script first, then libraries)
//! - **link-lib** — one `-l` per library
//!
//! Composition is purely functional over its inputs. Groups are evaluated
//! lazily: a query that never emits a group never demands that group's
//! variables. Selectors are additive and intentionally NOT de-duplicated
//! against each other — `libs` together with `libs_only_other` emits the
//! link-other group twice, which downstream consumers of the historical
//! tool rely on observing unchanged.

use crate::error::Result;
use crate::fragment::{Fragment, FragmentList};
use crate::library::Library;
use crate::variables::VariableMap;

/// Include roots under `SOC_DIRECTORY`, in emission order.
const SOC_INCLUDE_SUBDIRS: &[&str] = &[
    "/software/include/base",
    "/software/include",
    "/software/common",
];

/// The output categories requested by a single query.
///
/// All selectors are independent; setting several concatenates (and can
/// repeat) the corresponding groups. `cpu_only` overrides everything else.
#[derive(Debug, Clone, Default)]
pub struct QuerySpec {
    /// Emit compile-other followed by compile-include.
    pub cflags: bool,

    /// Emit compile-include alone (ignored when `cflags` is set).
    pub cflags_only_include: bool,

    /// Emit compile-other alone (ignored when `cflags` is set).
    pub cflags_only_other: bool,

    /// Emit link-other, link-dir, and link-lib.
    pub libs: bool,

    /// Emit link-lib (additionally to `libs`, if both are set).
    pub libs_only_libname: bool,

    /// Emit link-dir (additionally to `libs`, if both are set).
    pub libs_only_libpath: bool,

    /// Emit link-other (additionally to `libs`, if both are set).
    pub libs_only_other: bool,

    /// Output the bare CPU identifier and nothing else.
    pub cpu_only: bool,

    /// Compose compile-other for C++ instead of C.
    pub cxx: bool,

    /// Library-name prefixes to exclude from inference.
    pub exclude: Vec<String>,
}

/// Compose the flag groups selected by `spec`, in fixed group order.
///
/// `design_root` is the root of the generated design tree as given by the
/// caller; when the startup object is emitted it is concatenated onto it
/// directly, so callers pass a root that already ends with a path
/// separator.
pub fn compose(
    vars: &VariableMap,
    libraries: &[Library],
    design_root: &str,
    spec: &QuerySpec,
) -> Result<FragmentList> {
    if spec.cpu_only {
        let cpu = vars.require(crate::KEY_CPU)?;
        let mut out = FragmentList::new();
        out.push(Fragment::untyped(cpu));
        return Ok(out);
    }

    let mut out = FragmentList::new();

    if spec.cflags {
        out.append(&compile_other(vars, spec.cxx)?);
        out.append(&compile_include(vars)?);
    }
    if spec.cflags_only_other && !spec.cflags {
        out.append(&compile_other(vars, spec.cxx)?);
    }
    if spec.cflags_only_include && !spec.cflags {
        out.append(&compile_include(vars)?);
    }

    if spec.libs {
        out.append(&link_other(vars, libraries, design_root)?);
        out.append(&link_dirs(vars, libraries)?);
        out.append(&link_libs(libraries));
    }
    if spec.libs_only_other {
        out.append(&link_other(vars, libraries, design_root)?);
    }
    if spec.libs_only_libpath {
        out.append(&link_dirs(vars, libraries)?);
    }
    if spec.libs_only_libname {
        out.append(&link_libs(libraries));
    }

    Ok(out)
}

/// Compile flags other than include paths.
fn compile_other(vars: &VariableMap, cxx: bool) -> Result<FragmentList> {
    let cpuflags = vars.require(crate::KEY_CPUFLAGS)?;

    let mut flags = FragmentList::new();
    flags.push(Fragment::untyped("-Os"));
    flags.append(&FragmentList::parse(cpuflags));
    for flag in ["-fomit-frame-pointer", "-Wall", "-fno-builtin", "-nostdinc"] {
        flags.push(Fragment::untyped(flag));
    }

    if cxx {
        let soc = vars.require(crate::KEY_SOC_DIRECTORY)?;
        flags.push(Fragment::untyped("-std=c++11"));
        flags.push(Fragment::new('I', format!("{soc}/software/include/basec++")));
        for flag in ["-fexceptions", "-fno-rtti", "-ffreestanding"] {
            flags.push(Fragment::untyped(flag));
        }
    } else {
        for flag in [
            "-fexceptions",
            "-Wstrict-prototypes",
            "-Wold-style-definition",
            "-Wmissing-prototypes",
        ] {
            flags.push(Fragment::untyped(flag));
        }
    }

    Ok(flags)
}

/// Include-path compile flags, in fixed order.
fn compile_include(vars: &VariableMap) -> Result<FragmentList> {
    let soc = vars.require(crate::KEY_SOC_DIRECTORY)?;
    let buildinc = vars.require(crate::KEY_BUILDINC_DIRECTORY)?;

    let mut flags = FragmentList::new();
    for subdir in SOC_INCLUDE_SUBDIRS {
        flags.push(Fragment::new('I', format!("{soc}{subdir}")));
    }
    flags.push(Fragment::new('I', buildinc));
    Ok(flags)
}

/// Linker flags other than `-L`/`-l`.
fn link_other(
    vars: &VariableMap,
    libraries: &[Library],
    design_root: &str,
) -> Result<FragmentList> {
    let mut flags = FragmentList::new();
    flags.push(Fragment::untyped("-nostdlib"));
    flags.push(Fragment::untyped("-nodefaultlibs"));

    // libbase carries the C runtime, so its presence implies a startup
    // object for the target CPU. The object path is a bare concatenation
    // onto the design root, with no separator inserted.
    if libraries.iter().any(|l| l.name == "libbase") {
        let cpu = vars.require(crate::KEY_CPU)?;
        flags.push(Fragment::untyped(format!(
            "{design_root}software/libbase/crt0-{cpu}.o"
        )));
    }

    Ok(flags)
}

/// `-L` search paths: the generated include directory first (it holds the
/// linker script), then each library's directory in inference order.
fn link_dirs(vars: &VariableMap, libraries: &[Library]) -> Result<FragmentList> {
    let buildinc = vars.require(crate::KEY_BUILDINC_DIRECTORY)?;

    let mut flags = FragmentList::new();
    flags.push(Fragment::new('L', buildinc));
    for lib in libraries {
        flags.push(Fragment::new('L', lib.directory.as_str()));
    }
    Ok(flags)
}

/// One `-l` per library, with a single leading `lib` prefix stripped.
fn link_libs(libraries: &[Library]) -> FragmentList {
    libraries
        .iter()
        .map(|lib| Fragment::new('l', lib.name.strip_prefix("lib").unwrap_or(&lib.name)))
        .collect()
}
