//! Unit tests for the access module.
