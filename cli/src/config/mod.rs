//! CLI configuration loading

mod loader;

pub use loader::ConfigLoader;
