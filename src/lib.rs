//! verbfs - HTTP verbs mapped onto a directory tree
//!
//! GET reads a file, POST appends to it, PUT replaces it, DELETE removes it.

pub mod config;
pub mod fs;
pub mod http;
pub mod server;
