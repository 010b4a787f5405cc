//! End-to-end tests
//!
//! Build fixture trees on disk and exercise the loader and router against them.
