use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Deserialize, Serialize};

/// Logical font slots of the composite face, in lookup order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontRole {
    /// Primary text font.
    Text,
    /// Fallback for symbol codepoints.
    Symbols,
    /// Last-resort fallback for emoji.
    Emoji,
}

impl FontRole {
    /// Glyph lookup order: the first role whose font maps a codepoint wins.
    pub const LOOKUP_ORDER: [FontRole; 3] = [FontRole::Text, FontRole::Symbols, FontRole::Emoji];

    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            FontRole::Text => "text",
            FontRole::Symbols => "symbols",
            FontRole::Emoji => "emoji",
        }
    }
}

impl fmt::Display for FontRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Failure to obtain or parse a font program.
#[derive(thiserror::Error, Debug)]
pub enum FontError {
    /// The source has no font for this role.
    #[error("{role} font not found at '{}'", path.display())]
    NotFound {
        /// Missing role.
        role: FontRole,
        /// Where the source looked.
        path: PathBuf,
    },

    /// Reading the font bytes failed.
    #[error("read {role} font: {source}")]
    Io {
        /// Role being read.
        role: FontRole,
        /// Underlying reader failure.
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a font program the shaper understands.
    #[error("{role} font could not be parsed")]
    Parse {
        /// Role being parsed.
        role: FontRole,
    },

    /// Point size must be finite and positive.
    #[error("font size must be finite and > 0, got {0}")]
    InvalidSize(f32),
}

/// Read-only, by-role access to raw font program bytes.
pub trait FontSource: Sync {
    /// Raw bytes of the font for `role`.
    fn read(&self, role: FontRole) -> Result<Arc<Vec<u8>>, FontError>;
}

/// File names of the three roles inside a font directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontFiles {
    /// Primary text font.
    pub text: String,
    /// Symbols fallback.
    pub symbols: String,
    /// Emoji fallback.
    pub emoji: String,
}

impl Default for FontFiles {
    fn default() -> Self {
        Self {
            text: "Ubuntu-Medium.ttf".to_owned(),
            symbols: "NotoSansSymbols-Medium.ttf".to_owned(),
            emoji: "NotoEmoji-Regular.ttf".to_owned(),
        }
    }
}

impl FontFiles {
    /// File name configured for `role`.
    pub fn file_for(&self, role: FontRole) -> &str {
        match role {
            FontRole::Text => &self.text,
            FontRole::Symbols => &self.symbols,
            FontRole::Emoji => &self.emoji,
        }
    }
}

/// Fonts read from a directory on every call.
#[derive(Clone, Debug)]
pub struct DirFontSource {
    root: PathBuf,
    files: FontFiles,
}

impl DirFontSource {
    /// Directory source using the default file names.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_files(root, FontFiles::default())
    }

    /// Directory source with explicit file names.
    pub fn with_files(root: impl Into<PathBuf>, files: FontFiles) -> Self {
        Self {
            root: root.into(),
            files,
        }
    }

    /// Directory the fonts are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of the font for `role`.
    pub fn path_for(&self, role: FontRole) -> PathBuf {
        self.root.join(self.files.file_for(role))
    }
}

impl FontSource for DirFontSource {
    fn read(&self, role: FontRole) -> Result<Arc<Vec<u8>>, FontError> {
        let path = self.path_for(role);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Arc::new(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(FontError::NotFound { role, path })
            }
            Err(source) => Err(FontError::Io { role, source }),
        }
    }
}

/// Fonts held in memory, e.g. bundled with `include_bytes!` by the embedder.
#[derive(Clone, Debug)]
pub struct MemoryFontSource {
    text: Arc<Vec<u8>>,
    symbols: Arc<Vec<u8>>,
    emoji: Arc<Vec<u8>>,
}

impl MemoryFontSource {
    /// Source over three in-memory font programs.
    pub fn new(text: Vec<u8>, symbols: Vec<u8>, emoji: Vec<u8>) -> Self {
        Self {
            text: Arc::new(text),
            symbols: Arc::new(symbols),
            emoji: Arc::new(emoji),
        }
    }
}

impl FontSource for MemoryFontSource {
    fn read(&self, role: FontRole) -> Result<Arc<Vec<u8>>, FontError> {
        let bytes = match role {
            FontRole::Text => &self.text,
            FontRole::Symbols => &self.symbols,
            FontRole::Emoji => &self.emoji,
        };
        Ok(Arc::clone(bytes))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
