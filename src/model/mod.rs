/// Declarative card options.
pub mod options;
