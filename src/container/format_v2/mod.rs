//! APP2 container format (version 2)

pub mod checksums;
pub mod codec;
pub mod constants;
pub mod defaults;
pub mod descriptor;
pub mod header;
pub mod icon;
pub mod schema;

// Re-export main functions
pub use codec::{
    DecodeOptions, decode, decode_view, decode_with_options, encode, encode_with_options,
};

// Re-export types for advanced usage
pub use descriptor::{AppCategory, AppDescriptor, AppView};
pub use header::Header;
pub use icon::Rgb565;
