//! Configuration: where each dictionary line source lives on disk.

use crate::source::DictFile;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Paths to the flat dictionary files consumed by
/// [`FsLineSource`](crate::source::FsLineSource).
///
/// Serializable to/from TOML so deployments can point the analyzer at a
/// custom dictionary set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconConfig {
    pub dictionary: PathBuf,
    pub extension: PathBuf,
    pub compounds: PathBuf,
    pub josa: PathBuf,
    pub eomi: PathBuf,
    pub prefix: PathBuf,
    pub suffix: PathBuf,
    pub abbreviation: PathBuf,
    pub uncompounds: PathBuf,
    pub cj: PathBuf,
    pub syllable: PathBuf,
}

impl LexiconConfig {
    /// Point every source at its conventional file name under `dir`.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        let join = |name: &str| dir.join(name);
        Self {
            dictionary: join("total.dic"),
            extension: join("extension.dic"),
            compounds: join("compounds.dic"),
            josa: join("josa.dic"),
            eomi: join("eomi.dic"),
            prefix: join("prefix.dic"),
            suffix: join("suffix.dic"),
            abbreviation: join("abbreviation.dic"),
            uncompounds: join("uncompounds.dic"),
            cj: join("cj.dic"),
            syllable: join("syllable.dic"),
        }
    }

    /// The configured path for one source kind.
    pub fn path_for(&self, file: DictFile) -> &Path {
        match file {
            DictFile::Dictionary => &self.dictionary,
            DictFile::Extension => &self.extension,
            DictFile::Compounds => &self.compounds,
            DictFile::Josa => &self.josa,
            DictFile::Eomi => &self.eomi,
            DictFile::Prefix => &self.prefix,
            DictFile::Suffix => &self.suffix,
            DictFile::Abbreviation => &self.abbreviation,
            DictFile::Uncompounds => &self.uncompounds,
            DictFile::CjWord => &self.cj,
            DictFile::SyllableFeature => &self.syllable,
        }
    }

    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
