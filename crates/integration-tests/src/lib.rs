//! End-to-end tests for the faultline service live under `tests/`
