use std::borrow::Cow;

use serde::Deserialize;
use serde::Serialize;

/// The command text a block was constructed with: either one literal string
/// or an ordered list of command lines.
///
/// Deserializes from a bare string or an array of strings, which is how guide
/// files spell it:
///
/// ```toml
/// commands = "df -h"
/// commands = ["cd ~/.ssh", "cat id_rsa.pub"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandInput {
    Single(String),
    Lines(Vec<String>),
}

impl CommandInput {
    /// Text shown in the block and written to the clipboard. Lines are joined
    /// with `\n` in the order given; a single string is returned untouched.
    pub fn display_text(&self) -> Cow<'_, str> {
        match self {
            CommandInput::Single(s) => Cow::Borrowed(s.as_str()),
            CommandInput::Lines(lines) => Cow::Owned(lines.join("\n")),
        }
    }
}

impl From<&str> for CommandInput {
    fn from(value: &str) -> Self {
        CommandInput::Single(value.to_string())
    }
}

impl From<String> for CommandInput {
    fn from(value: String) -> Self {
        CommandInput::Single(value)
    }
}

impl From<Vec<String>> for CommandInput {
    fn from(value: Vec<String>) -> Self {
        CommandInput::Lines(value)
    }
}

impl From<Vec<&str>> for CommandInput {
    fn from(value: Vec<&str>) -> Self {
        CommandInput::Lines(value.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for CommandInput {
    fn from(value: [&str; N]) -> Self {
        CommandInput::Lines(value.iter().map(|s| (*s).to_string()).collect())
    }
}
