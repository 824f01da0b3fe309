//! appbundle builder binary

use anyhow::Context;
use appbundle::exit_codes::{EXIT_ERROR, EXIT_PANIC, EXIT_SUCCESS, exit_code_for};
use appbundle::format_v2::AppCategory;
use appbundle::format_v2::defaults::parse_size;
use appbundle::{AppError, BuildOptions, build_app};
use clap::Parser;
use std::{env, panic, path::PathBuf, process};

const VERSION: &str = appbundle::version::VERSION;

#[derive(Parser, Debug)]
#[command(version = VERSION, about = "Build APP2 containers for the device launcher")]
struct Args {
    /// App name (31 bytes max, longer names are truncated)
    name: String,

    /// Creator name (31 bytes max)
    creator: String,

    /// Category: system, game, media, productivity, utility, communication, other
    category: String,

    /// Output path (defaults to <name>.app with spaces replaced by '_')
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Raw 128x128 RGB565 little-endian icon (defaults to a test pattern)
    #[arg(long)]
    icon: Option<PathBuf>,

    /// Code blob (defaults to a 1 KiB zero placeholder)
    #[arg(long)]
    code: Option<PathBuf>,

    /// Maximum container size, e.g. 512K
    #[arg(long, value_parser = parse_size_arg)]
    max_app_size: Option<u64>,

    /// Do not re-read and validate the written file
    #[arg(long)]
    skip_verification: bool,

    /// Log level (trace, debug, info, warn, error, optionally prefixed with json:)
    #[arg(long)]
    log_level: Option<String>,
}

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
            eprintln!("Fatal: Unhandled panic in builder");
            process::exit(EXIT_PANIC);
        }
    }
}

fn run() -> i32 {
    if env::args().nth(1).as_deref() == Some("--version") {
        println!("appbundle-builder {}", appbundle::version::full_version());
        return EXIT_SUCCESS;
    }

    let args = Args::parse();

    if let Some(ref level) = args.log_level {
        appbundle::logger::JsonLogger::init_with_level(level);
    } else {
        appbundle::logger::JsonLogger::init();
    }

    match execute(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Build error: {e:#}");
            e.downcast_ref::<AppError>()
                .map_or(EXIT_ERROR, exit_code_for)
        }
    }
}

fn execute(args: Args) -> anyhow::Result<()> {
    let options = BuildOptions {
        output: args.output,
        icon_path: args.icon,
        code_path: args.code,
        max_app_size: args.max_app_size,
        skip_verification: args.skip_verification,
    };

    let info = build_app(&args.name, &args.creator, &args.category, options)
        .with_context(|| format!("building app {:?}", args.name))?;

    println!("Created {}", info.path.display());
    println!("  Name: {}", info.name);
    println!("  Creator: {}", info.creator);
    if AppCategory::parse(&info.category).is_some() {
        println!("  Category: {}", info.category);
    } else {
        println!("  Category: {} (shown as {})", info.category, info.category_kind);
    }
    println!("  Size: {} bytes", info.total_size);
    println!("  Checksum: {}", info.checksum);
    Ok(())
}
