//! The reference content: an ordered list of collapsible sections, each a
//! list of headings, notes, links and command entries.
//!
//! The built-in guide is compiled into the binary from `assets/guide.toml`;
//! `--guide` or the `guide` config key point at a replacement file with the
//! same layout.

use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use setup_guide_command_block::CommandInput;
use thiserror::Error;

const EMBEDDED_GUIDE: &str = include_str!("../assets/guide.toml");

#[derive(Debug, Error)]
pub enum GuideError {
    #[error("failed to read guide {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid guide: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("guide has no sections")]
    Empty,

    #[error("duplicate section id `{0}`")]
    DuplicateSection(String),

    #[error("section `{0}` has an empty title")]
    UntitledSection(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Guide {
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Link {
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry {
    Heading {
        text: String,
    },
    Note {
        text: String,
    },
    List {
        #[serde(default)]
        ordered: bool,
        items: Vec<String>,
    },
    Link {
        #[serde(default)]
        prefix: Option<String>,
        text: String,
        url: String,
    },
    Callout {
        title: String,
        body: String,
        #[serde(default)]
        link: Option<Link>,
    },
    Command {
        #[serde(default)]
        label: Option<String>,
        commands: CommandInput,
    },
}

impl Guide {
    /// The guide shipped with the binary.
    pub fn embedded() -> Result<Self, GuideError> {
        Self::parse(EMBEDDED_GUIDE)
    }

    pub fn from_path(path: &Path) -> Result<Self, GuideError> {
        let contents = std::fs::read_to_string(path).map_err(|source| GuideError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Load `path` when given, otherwise the embedded guide.
    pub fn load(path: Option<&Path>) -> Result<Self, GuideError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::embedded(),
        }
    }

    pub fn parse(contents: &str) -> Result<Self, GuideError> {
        let guide: Guide = toml::from_str(contents)?;
        guide.validate()?;
        Ok(guide)
    }

    fn validate(&self) -> Result<(), GuideError> {
        if self.sections.is_empty() {
            return Err(GuideError::Empty);
        }
        let mut seen = HashSet::new();
        for section in &self.sections {
            if !seen.insert(section.id.as_str()) {
                return Err(GuideError::DuplicateSection(section.id.clone()));
            }
            if section.title.trim().is_empty() {
                return Err(GuideError::UntitledSection(section.id.clone()));
            }
        }
        Ok(())
    }

    pub fn section_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }
}

impl Section {
    pub fn command_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, Entry::Command { .. }))
            .count()
    }
}
