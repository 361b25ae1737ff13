//! Service tests
//!
//! Exercise the real collaborators against temporary files and a local
//! mock HTTP server.
