//! navmenu library exports for testing

use clap::ValueEnum;

pub mod core;
pub mod persistence;
pub mod tui;

#[cfg(test)]
pub mod test_support;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    #[default]
    Http,
    File,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Http => "http",
            Backend::File => "file",
        }
    }
}
