use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use dirs::home_dir;
use serde::Deserialize;

use crate::clipboard::ClipboardBackend;

/// Environment variable that relocates the configuration directory.
pub const SETUP_GUIDE_HOME_ENV: &str = "SETUP_GUIDE_HOME";

const CONFIG_FILE: &str = "config.toml";

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigToml {
    pub clipboard: Option<ClipboardBackend>,
    /// Guide file used instead of the embedded one. Relative paths resolve
    /// against the configuration directory.
    pub guide: Option<PathBuf>,
    #[serde(default)]
    pub tui: TuiToml,
}

#[derive(Debug, Default, Deserialize)]
pub struct TuiToml {
    pub alternate_screen: Option<bool>,
}

/// Optional overrides for user configuration (e.g., from CLI flags).
#[derive(Default, Debug, Clone)]
pub struct ConfigOverrides {
    pub clipboard: Option<ClipboardBackend>,
    pub guide: Option<PathBuf>,
}

/// Application configuration loaded from disk and merged with overrides.
#[derive(Debug, Clone)]
pub struct Config {
    pub home: PathBuf,
    pub clipboard: ClipboardBackend,
    pub guide: Option<PathBuf>,
    pub alternate_screen: bool,
}

impl Config {
    /// Load `<home>/config.toml` and apply `overrides` on top (highest
    /// precedence). A missing file yields the defaults.
    pub fn load_with_overrides(overrides: ConfigOverrides) -> std::io::Result<Self> {
        let home = find_setup_guide_home()?;
        Self::load_from_home(home, overrides)
    }

    pub fn load_from_home(home: PathBuf, overrides: ConfigOverrides) -> std::io::Result<Self> {
        let toml = load_config_toml(&home)?;

        let guide = overrides
            .guide
            .or_else(|| toml.guide.map(|p| resolve_relative(&home, p)));

        Ok(Self {
            clipboard: overrides
                .clipboard
                .or(toml.clipboard)
                .unwrap_or_default(),
            guide,
            alternate_screen: toml.tui.alternate_screen.unwrap_or(true),
            home,
        })
    }

    /// Folder where log files are written. Does not verify that the
    /// directory exists.
    pub fn log_dir(&self) -> PathBuf {
        self.home.join("log")
    }
}

fn load_config_toml(home: &Path) -> std::io::Result<ConfigToml> {
    let path = home.join(CONFIG_FILE);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ConfigToml::default()),
        Err(e) => return Err(e),
    };
    toml::from_str(&contents).map_err(|e| {
        std::io::Error::new(
            ErrorKind::InvalidData,
            format!("{}: {e}", path.display()),
        )
    })
}

fn resolve_relative(home: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        home.join(path)
    }
}

/// Returns the configuration directory: `$SETUP_GUIDE_HOME` when set,
/// otherwise `~/.setup-guide`. Does not verify that the directory exists.
pub fn find_setup_guide_home() -> std::io::Result<PathBuf> {
    match std::env::var(SETUP_GUIDE_HOME_ENV) {
        Ok(val) if !val.is_empty() => return Ok(PathBuf::from(val)),
        _ => {}
    }

    let mut p = home_dir().ok_or_else(|| {
        std::io::Error::new(ErrorKind::NotFound, "Could not find home directory")
    })?;
    p.push(".setup-guide");
    Ok(p)
}
