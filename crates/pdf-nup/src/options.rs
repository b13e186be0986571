use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Imposition configuration
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ImpositionOptions {
    // Input
    /// Source PDF, used when none is given on the command line
    pub input_file: Option<PathBuf>,

    // Layout
    pub pages_per_sheet: PagesPerSheet,
    pub paper_size: PaperSize,
    pub mode: ImposeMode,
}

impl ImpositionOptions {
    /// Build options from raw request values.
    ///
    /// `pages_per_sheet` must be 2, 4, 8 or 16. Paper and mode names are
    /// lenient: unknown papers become A4, and any mode not starting with
    /// "fold" is sequential.
    pub fn from_request(pages_per_sheet: usize, paper_size: &str, mode: &str) -> Result<Self> {
        Ok(Self {
            input_file: None,
            pages_per_sheet: PagesPerSheet::try_from(pages_per_sheet)?,
            paper_size: PaperSize::from_name(paper_size),
            mode: ImposeMode::from_name(mode),
        })
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ImposeError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ImposeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use serde::{Deserialize, Serialize};

    impl Serialize for PagesPerSheet {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.serialize_u64(self.count() as u64)
        }
    }

    impl<'de> Deserialize<'de> for PagesPerSheet {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            let n = usize::deserialize(deserializer)?;
            PagesPerSheet::try_from(n).map_err(serde::de::Error::custom)
        }
    }

    impl Serialize for PaperSize {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for PaperSize {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            Ok(PaperSize::from_name(&s))
        }
    }

    impl Serialize for ImposeMode {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for ImposeMode {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            Ok(ImposeMode::from_name(&s))
        }
    }
} // end of serde_impls module
