pub mod bump;
pub mod config;
pub mod errors;
pub mod newline;
