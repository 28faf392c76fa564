//! Tests for the HTTP client against a local mock server
