//! Shared test helpers for template engine tests

use crate::template::ParameterSet;
use toml::toml;

/// Scalar parameters
pub(super) fn simple_params() -> ParameterSet {
    toml! {
        title = "My Title"
        count = 42
        price = 9.99
        enabled = true
        date = 2026-01-15
    }
}

/// Nested parameters with arrays and tables
pub(super) fn nested_params() -> ParameterSet {
    toml! {
        [user]
        name = "Ada"
        role = "admin"

        [[user.projects]]
        name = "Engine"
        stars = 12

        [[user.projects]]
        name = "Parser"
        stars = 7
    }
}
