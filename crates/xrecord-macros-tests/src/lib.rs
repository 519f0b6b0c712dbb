//! Integration tests for the `xrecord` derive macros live under `tests/`.
