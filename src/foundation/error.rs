use std::fmt;

use crate::assets::decode::DecodeError;
use crate::assets::fonts::FontError;
use crate::assets::resolver::FetchError;
use crate::imaging::transform::TransformError;

/// Convenience result type used across the crate.
pub type PreviewResult<T> = Result<T, PreviewError>;

/// One ordered step of the render pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Solid fill or cropped background image.
    Background,
    /// Translucent black overlay inset by the margin.
    Foreground,
    /// Border circle plus circular avatar image.
    Avatar,
    /// Author line next to the avatar.
    Author,
    /// Wrapped, length-capped title block.
    Title,
    /// Bottom-right logo image.
    Logo,
}

impl Stage {
    /// All stages in draw order.
    pub const ORDER: [Stage; 6] = [
        Stage::Background,
        Stage::Foreground,
        Stage::Avatar,
        Stage::Author,
        Stage::Title,
        Stage::Logo,
    ];

    /// Stable lowercase name used in error messages and log fields.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Background => "background",
            Stage::Foreground => "foreground",
            Stage::Avatar => "avatar",
            Stage::Author => "author",
            Stage::Title => "title",
            Stage::Logo => "logo",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned by a render call. Stage-specific variants carry the failing
/// stage and keep the underlying cause reachable through `source()`.
#[derive(thiserror::Error, Debug)]
pub enum PreviewError {
    /// The resolver could not supply every requested buffer.
    #[error("could not get an image: {0}")]
    Fetch(#[from] FetchError),

    /// Image bytes for a stage could not be decoded.
    #[error("could not decode the {stage}: {source}")]
    Decode {
        /// Stage that was running.
        stage: Stage,
        /// Underlying decoder failure.
        #[source]
        source: DecodeError,
    },

    /// Resizing, cropping or re-encoding failed.
    #[error("could not resize the {stage}: {source}")]
    Transform {
        /// Stage that was running.
        stage: Stage,
        /// Underlying transform failure.
        #[source]
        source: TransformError,
    },

    /// One of the three font programs could not be read or parsed.
    #[error("could not load a font face for the {stage}: {source}")]
    FontLoad {
        /// Stage that was running.
        stage: Stage,
        /// Underlying font failure.
        #[source]
        source: FontError,
    },

    /// Canvas-level failure (surface allocation, readback).
    #[error("render error: {0}")]
    Render(String),

    /// Options rejected by [`crate::Options::validate`] or inconsistent inputs.
    #[error("validation error: {0}")]
    Validation(String),
}

impl PreviewError {
    /// Build a [`PreviewError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PreviewError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Stage that failed, when the error came from a pipeline stage.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Decode { stage, .. }
            | Self::Transform { stage, .. }
            | Self::FontLoad { stage, .. } => Some(*stage),
            Self::Fetch(_) | Self::Render(_) | Self::Validation(_) => None,
        }
    }

    /// Attach `stage` to a transform failure. Metadata that could not be read
    /// is reported as a decode error rather than a transform error.
    pub(crate) fn from_transform(stage: Stage, err: TransformError) -> Self {
        match err {
            TransformError::Decode(source) => Self::Decode { stage, source },
            source => Self::Transform { stage, source },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
