//! Read and rewrite the `META_VERSION_{MAJOR,MINOR,PATCH}` assignments of a
//! CMake build file while keeping its line endings.

pub mod services;
pub mod utils;

pub use services::version_codec::{read_version, write_version};
pub use utils::newline::{detect, detect_or_default, LineEnding};
