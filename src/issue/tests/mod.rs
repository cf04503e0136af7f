//! Unit tests for the issue module.

mod support;
