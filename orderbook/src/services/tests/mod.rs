//! Tests for the file-backed store
