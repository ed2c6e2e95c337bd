//! Domain models: captured entries and user configuration.

pub mod entry;
pub mod settings;
