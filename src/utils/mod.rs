//! Shared helpers

pub mod encoding;
pub mod hashing;
pub mod paths;

pub use encoding::read_text_file;
pub use hashing::sha256_hex;
pub use paths::leading_dir;
