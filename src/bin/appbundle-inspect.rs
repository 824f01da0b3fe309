//! appbundle inspector binary
//!
//! Validates a container the way the device launcher does and exits with a
//! code that distinguishes "not an app", "incompatible version" and "corrupt".

use anyhow::{Context, bail};
use appbundle::exit_codes::{
    EXIT_CHECKSUM_ERROR, EXIT_ERROR, EXIT_PANIC, EXIT_SUCCESS, exit_code_for,
};
use appbundle::format_v2::defaults::parse_size;
use appbundle::{AppError, AppInfo, InspectOptions, inspect_app, verify_app_checksum};
use clap::Parser;
use std::{env, panic, path::PathBuf, process};

const VERSION: &str = appbundle::version::VERSION;

#[derive(Parser, Debug)]
#[command(version = VERSION, about = "Validate and describe APP2 containers")]
struct Args {
    /// Path to the .app file
    file: PathBuf,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Also require the whole file to match a fingerprint (crc32:…, adler32:…, sha256:…)
    #[arg(long)]
    expect_checksum: Option<String>,

    /// Maximum container size, e.g. 512K
    #[arg(long, value_parser = parse_size_arg)]
    max_app_size: Option<u64>,

    /// Log level (trace, debug, info, warn, error, optionally prefixed with json:)
    #[arg(long)]
    log_level: Option<String>,
}

/// Fingerprint supplied on the command line did not match
#[derive(Debug)]
struct FingerprintMismatch(String);

impl std::fmt::Display for FingerprintMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "file does not match {}", self.0)
    }
}

impl std::error::Error for FingerprintMismatch {}

fn parse_size_arg(value: &str) -> Result<u64, String> {
    parse_size(value).ok_or_else(|| format!("invalid size: {value}"))
}

fn main() {
    panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC: {}", panic_info);
        process::exit(EXIT_PANIC);
    }));

    let result = panic::catch_unwind(run);

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(_) => {
            eprintln!("Fatal: Unhandled panic in inspector");
            process::exit(EXIT_PANIC);
        }
    }
}

fn run() -> i32 {
    if env::args().nth(1).as_deref() == Some("--version") {
        println!("appbundle-inspect {}", appbundle::version::full_version());
        return EXIT_SUCCESS;
    }

    let args = Args::parse();

    if let Some(ref level) = args.log_level {
        appbundle::logger::JsonLogger::init_with_level(level);
    } else {
        appbundle::logger::JsonLogger::init();
    }

    match execute(&args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("{}: {e:#}", args.file.display());
            if e.is::<FingerprintMismatch>() {
                EXIT_CHECKSUM_ERROR
            } else {
                e.downcast_ref::<AppError>().map_or(EXIT_ERROR, exit_code_for)
            }
        }
    }
}

fn execute(args: &Args) -> anyhow::Result<()> {
    let info = inspect_app(
        &args.file,
        InspectOptions {
            max_app_size: args.max_app_size,
        },
    )?;

    if let Some(expected) = &args.expect_checksum {
        let matches = verify_app_checksum(&args.file, expected)
            .with_context(|| format!("checking fingerprint {expected}"))?;
        if !matches {
            bail!(FingerprintMismatch(expected.clone()));
        }
    }

    if args.json {
        println!("{}", info.to_json()?);
    } else {
        print_info(&info);
    }
    Ok(())
}

fn print_info(info: &AppInfo) {
    println!("{} (format {} v{})", info.path.display(), info.format, info.version);
    println!("  Name: {}", info.name);
    println!("  Creator: {}", info.creator);
    println!("  Category: {} ({})", info.category, info.category_kind);
    println!("  Size: {} bytes", info.total_size);
    println!("  Icon: {} bytes", info.icon_size);
    println!("  Code: {} bytes", info.code_size);
    println!("  Checksum: {}", info.checksum);
    println!("  Fingerprint: {}", info.sha256);
}
