//! Minimal CLI parsing for startup flags.

use std::env;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliOptions {
    /// Insert demo users, books and reviews into empty tables
    pub seed: bool,
}

impl CliOptions {
    pub fn from_args() -> Self {
        Self::parse(env::args().skip(1))
    }

    fn parse(args: impl IntoIterator<Item = String>) -> Self {
        let mut options = CliOptions::default();
        for arg in args {
            match arg.as_str() {
                "--seed" => options.seed = true,
                other => tracing::debug!(arg = other, "Ignoring unknown argument"),
            }
        }
        options
    }
}
