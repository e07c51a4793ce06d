//! `misoc-config` — pkg-config-style flag queries for a generated MiSoC/LiteX design.
//!
//! Reads the `variables.mak` file a design build emits, infers the software
//! libraries present in the design, and prints the compiler/linker flags a
//! cross-compilation step needs. Each invocation is a fresh, independent
//! query: read once, parse once, infer once, compose once, print once.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use libmisocconf::ENV_MISOC_CONFIG_LOG;
use libmisocconf::audit::AuditLog;
use libmisocconf::compose::{self, QuerySpec};
use libmisocconf::library;
use libmisocconf::variables::{self, VariableMap};

/// Query compiler and linker flags for a generated MiSoC/LiteX design.
#[derive(Parser, Debug)]
#[command(
    name = "misoc-config",
    version,
    about = "Query compiler and linker flags for a generated MiSoC/LiteX design"
)]
struct Cli {
    /// Root of the generated design (subdirectories should include software/ and gateware/).
    design_root: String,

    // ── Compile flag queries ─────────────────────────────────────────
    /// Output all preprocessor and compiler flags.
    #[arg(long)]
    cflags: bool,

    /// Output -I flags only.
    #[arg(long = "cflags-only-I")]
    cflags_only_i: bool,

    /// Output all other --cflags besides -I.
    #[arg(long = "cflags-only-other")]
    cflags_only_other: bool,

    /// Output --cflags assuming a C++ compile.
    #[arg(long)]
    cxx: bool,

    // ── Link flag queries ────────────────────────────────────────────
    /// Output all linker flags.
    #[arg(long)]
    libs: bool,

    /// Output -l flags only.
    #[arg(long = "libs-only-l")]
    libs_only_l_lower: bool,

    /// Output -L flags only.
    #[arg(long = "libs-only-L")]
    libs_only_l_upper: bool,

    /// Output all other --libs besides -L and -l.
    #[arg(long = "libs-only-other")]
    libs_only_other: bool,

    // ── Other queries ────────────────────────────────────────────────
    /// Print the CPU identifier and exit; overrides every other query flag.
    #[arg(long)]
    cpu: bool,

    /// Print the directory of one library present in the design.
    #[arg(long, value_name = "LIBRARY")]
    libdir: Option<String>,

    // ── Input handling ───────────────────────────────────────────────
    /// Exclude subdirectories under <DESIGN_ROOT>/software from --libs.
    #[arg(long = "exclude-dirs", value_name = "DIR", num_args = 1..)]
    exclude_dirs: Vec<String>,

    /// Fail on malformed variable-file lines instead of skipping them.
    #[arg(long)]
    strict: bool,

    /// Normalize Windows-style paths in variable values.
    #[arg(long = "normalize-paths")]
    normalize_paths: bool,

    /// Append an audit log of the query to a file.
    #[arg(long = "log-file", value_name = "FILENAME")]
    log_file: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Resolve the audit log destination: `--log-file` wins over the environment.
fn resolve_log_file(cli: &Cli) -> Option<String> {
    cli.log_file.clone().or_else(|| {
        std::env::var(ENV_MISOC_CONFIG_LOG)
            .ok()
            .filter(|s| !s.is_empty())
    })
}

fn run(cli: &Cli) -> Result<()> {
    let audit = resolve_log_file(cli).and_then(|p| AuditLog::open(p).ok());

    let root = Path::new(&cli.design_root);
    let file_path = variables::variable_file_path(root);
    let mut vars = if cli.strict {
        VariableMap::from_design_root_strict(root)
    } else {
        VariableMap::from_design_root(root)
    }
    .with_context(|| format!("Failed to load build variables for '{}'", cli.design_root))?;

    if cli.normalize_paths {
        vars.transform_values(variables::normalize_os_paths);
    }

    if let Some(ref log) = audit {
        log.log_query_start(&cli.design_root);
        log.log_variables(vars.len(), &file_path);
    }

    // --libdir: locate a single library by name and exit.
    if let Some(ref name) = cli.libdir {
        let dir = library::lookup_directory(&vars, name)?;
        println!("{dir}");
        return Ok(());
    }

    let spec = QuerySpec {
        cflags: cli.cflags,
        cflags_only_include: cli.cflags_only_i,
        cflags_only_other: cli.cflags_only_other,
        libs: cli.libs,
        libs_only_libname: cli.libs_only_l_lower,
        libs_only_libpath: cli.libs_only_l_upper,
        libs_only_other: cli.libs_only_other,
        cpu_only: cli.cpu,
        cxx: cli.cxx,
        exclude: cli.exclude_dirs.clone(),
    };

    let libraries = library::infer(&vars, &spec.exclude);
    if let Some(ref log) = audit {
        log.log_libraries(&libraries);
    }

    let flags = compose::compose(&vars, &libraries, &cli.design_root, &spec)?;
    let rendered = flags.render(' ');

    if let Some(ref log) = audit {
        log.log_flags(&rendered);
    }

    println!("{rendered}");
    Ok(())
}
