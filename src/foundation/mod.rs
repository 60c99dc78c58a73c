/// Colors shared by every drawing stage.
pub mod color;
/// Crate error types.
pub mod error;
