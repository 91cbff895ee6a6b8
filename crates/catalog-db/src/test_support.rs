//! Shared test utilities for catalog-db unit tests.
