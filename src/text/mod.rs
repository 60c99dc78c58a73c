/// Composite font face with per-cluster fallback.
pub mod face;
