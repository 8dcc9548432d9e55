use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use popmenu_placement::{MenuConfig, PlacementError};

use super::errors::StorageError;

const CONFIG_FILE: &str = "menu.json";

/// What was found at the config location.
#[derive(Debug)]
pub(crate) enum ConfigLoadStatus {
    Loaded,
    Missing,
    /// The file exists but does not hold a usable config.
    Invalid(PlacementError),
}

/// JSON file holding the menu config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    pub(crate) fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$HOME/.config/popmenu/menu.json`, or the temp dir without a home.
    pub(crate) fn default_location() -> Self {
        let dir = match std::env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join(".config"),
            None => std::env::temp_dir(),
        };
        Self::at(dir.join("popmenu").join(CONFIG_FILE))
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Read the config. Only IO failures are errors; a missing or broken
    /// file yields defaults with the matching status.
    pub(crate) fn load(
        &self,
    ) -> Result<(MenuConfig, ConfigLoadStatus), StorageError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok((MenuConfig::default(), ConfigLoadStatus::Missing));
            },
            Err(err) => return Err(err.into()),
        };

        Ok(match MenuConfig::from_json_str(&data) {
            Ok(config) => (config, ConfigLoadStatus::Loaded),
            Err(err) => (MenuConfig::default(), ConfigLoadStatus::Invalid(err)),
        })
    }

    /// Write the config through a sibling temp file so readers never see
    /// a partial payload.
    pub(crate) fn save(&self, config: &MenuConfig) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let staged = self.path.with_extension("json.tmp");
        fs::write(&staged, config.to_json_pretty()?)?;
        fs::rename(&staged, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use popmenu_placement::{HiddenNotification, Placement};

    use super::*;

    /// Scratch directory removed when dropped.
    struct Scratch(PathBuf);

    impl Scratch {
        fn new() -> Self {
            static NEXT: AtomicUsize = AtomicUsize::new(0);
            let dir = std::env::temp_dir().join(format!(
                "popmenu-config-{}-{}",
                std::process::id(),
                NEXT.fetch_add(1, Ordering::Relaxed)
            ));
            fs::create_dir_all(&dir).expect("scratch dir should be created");
            Self(dir)
        }

        fn file(&self, name: &str) -> ConfigFile {
            ConfigFile::at(self.0.join(name))
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn given_saved_config_when_loaded_then_values_survive() {
        let scratch = Scratch::new();
        let file = ConfigFile::at(scratch.0.join("nested").join(CONFIG_FILE));
        let config = MenuConfig {
            screen_indent: 12.0,
            default_placement: Placement::BottomRight,
            hidden_notification: HiddenNotification::OnHostDismiss,
            ..MenuConfig::default()
        };

        file.save(&config).expect("config should save");
        let (loaded, status) = file.load().expect("config should load");

        assert!(matches!(status, ConfigLoadStatus::Loaded));
        assert_eq!(loaded, config);
        assert!(!file.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn given_no_file_when_loaded_then_defaults_are_reported_missing() {
        let scratch = Scratch::new();

        let (config, status) = scratch
            .file(CONFIG_FILE)
            .load()
            .expect("a missing file is not an error");

        assert_eq!(config, MenuConfig::default());
        assert!(matches!(status, ConfigLoadStatus::Missing));
    }

    #[test]
    fn given_broken_json_when_loaded_then_defaults_are_reported_invalid() {
        let scratch = Scratch::new();
        let file = scratch.file(CONFIG_FILE);
        fs::write(file.path(), "{ not json").expect("payload should write");

        let (config, status) = file.load().expect("bad json is not an error");

        assert_eq!(config, MenuConfig::default());
        assert!(matches!(
            status,
            ConfigLoadStatus::Invalid(PlacementError::Json(_))
        ));
    }

    #[test]
    fn given_negative_indent_when_loaded_then_invalid_names_the_field() {
        let scratch = Scratch::new();
        let file = scratch.file(CONFIG_FILE);
        fs::write(file.path(), r#"{"screen_indent": -4}"#)
            .expect("payload should write");

        let (_, status) = file.load().expect("bad value is not an error");

        match status {
            ConfigLoadStatus::Invalid(err) => {
                assert!(err.to_string().contains("screen_indent"));
            },
            other => panic!("expected an invalid config, got {other:?}"),
        }
    }

    #[test]
    fn given_default_location_when_resolved_then_ends_in_popmenu_dir() {
        let file = ConfigFile::default_location();

        assert!(file.path().ends_with("popmenu/menu.json"));
    }
}
