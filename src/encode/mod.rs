/// Final image encoding.
pub mod output;
