pub mod version_codec;
pub mod version_file;
