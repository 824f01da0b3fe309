//! appbundle - APP2 application container for the device launcher
//!
//! This crate builds and validates `.app` containers: a 128-byte header,
//! a 128x128 RGB565 icon and an opaque code blob, checked by a whole-file
//! CRC-32.

// Enforce strict code quality and reliability
#![deny(
    // Safety
    unsafe_code,

    // Correctness
    missing_debug_implementations,
    unreachable_pub,

    // Future compatibility
    future_incompatible,

    // Rust 2018 idioms
    rust_2018_idioms,
)]
#![warn(
    // Error handling best practices
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::unimplemented,
    clippy::todo,

    // Performance
    clippy::inefficient_to_string,
    clippy::large_enum_variant,

    // Code clarity and maintainability
    clippy::cognitive_complexity,
    clippy::type_complexity,

    // Best practices
    clippy::wildcard_imports,
    clippy::enum_glob_use,
    clippy::if_not_else,
    clippy::needless_continue,
    clippy::explicit_iter_loop,
    clippy::explicit_into_iter_loop,
)]

pub mod api;
pub mod container;
pub mod exceptions;
pub mod exit_codes;
pub mod logger;
pub mod version;

// Re-export main API functions
pub use api::{AppInfo, BuildOptions, InspectOptions, build_app, inspect_app, verify_app_checksum};
pub use exceptions::AppError;

// Re-export format-specific types for advanced usage
pub use container::ContainerFormat;
pub use container::format_v2;
pub use container::format_v2::{AppDescriptor, decode, encode};
