//! User preferences
//!
//! Small key/value settings (theme, profile) kept outside the transaction
//! database. `Settings` gives typed access on top of any `PreferenceStore`.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::models::UserProfile;

pub const KEY_DARK_MODE: &str = "is_dark_mode";
pub const KEY_USER_NAME: &str = "user_name";
pub const KEY_USER_EMAIL: &str = "user_email";
pub const KEY_PROFILE_IMAGE: &str = "user_profile_image";
pub const KEY_HAS_LAUNCHED_BEFORE: &str = "has_launched_before";

/// Name shown until the user sets one
pub const DEFAULT_USER_NAME: &str = "User";

/// String key/value storage for preferences
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Store a value; `None` removes the key
    fn set(&mut self, key: &str, value: Option<String>) -> Result<()>;
}

/// Preferences held in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Option<String>) -> Result<()> {
        match value {
            Some(v) => self.values.insert(key.to_string(), v),
            None => self.values.remove(key),
        };
        Ok(())
    }
}

/// Preferences persisted as a flat TOML table
///
/// Every `set` rewrites the whole file through a temp file in the same
/// directory, so a crash never leaves a half-written file behind.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferenceStore {
    /// Open the store at `path`, starting empty if the file does not exist
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let values = if path.exists() {
            let content = fs::read_to_string(&path)?;
            toml::from_str(&content)?
        } else {
            debug!("No preferences file at {}, starting empty", path.display());
            BTreeMap::new()
        };

        Ok(Self { path, values })
    }

    /// Open the store at the default location
    pub fn open_default() -> Result<Self> {
        let path = default_settings_path().ok_or_else(|| {
            Error::Preferences("Could not determine local data directory".to_string())
        })?;
        Self::open(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        let content = toml::to_string(&self.values)?;

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut temp = NamedTempFile::new_in(&dir)?;
        temp.write_all(content.as_bytes())?;
        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        Ok(())
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Option<String>) -> Result<()> {
        match value {
            Some(v) => self.values.insert(key.to_string(), v),
            None => self.values.remove(key),
        };
        self.save()
    }
}

/// Default preferences file location
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("finpal").join("settings.toml"))
}

/// Typed preferences over a `PreferenceStore`
#[derive(Debug, Clone)]
pub struct Settings<S: PreferenceStore> {
    store: S,
}

impl<S: PreferenceStore> Settings<S> {
    /// Wrap a store, seeding first-run defaults
    ///
    /// On the first launch dark mode is switched on. Later launches keep
    /// whatever the user chose.
    pub fn load(store: S) -> Result<Self> {
        let mut settings = Self { store };

        if !settings.has_launched_before() {
            info!("First launch, applying default preferences");
            settings.set_bool(KEY_DARK_MODE, true)?;
            settings.set_bool(KEY_HAS_LAUNCHED_BEFORE, true)?;
        }

        Ok(settings)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn dark_mode(&self) -> bool {
        self.get_bool(KEY_DARK_MODE).unwrap_or(true)
    }

    pub fn set_dark_mode(&mut self, enabled: bool) -> Result<()> {
        self.set_bool(KEY_DARK_MODE, enabled)
    }

    pub fn has_launched_before(&self) -> bool {
        self.get_bool(KEY_HAS_LAUNCHED_BEFORE).unwrap_or(false)
    }

    pub fn user_name(&self) -> String {
        self.store
            .get(KEY_USER_NAME)
            .unwrap_or_else(|| DEFAULT_USER_NAME.to_string())
    }

    pub fn email(&self) -> Option<String> {
        self.store.get(KEY_USER_EMAIL).filter(|e| !e.is_empty())
    }

    /// Raw profile image bytes; an undecodable value reads as no image
    pub fn profile_image(&self) -> Option<Vec<u8>> {
        let encoded = self.store.get(KEY_PROFILE_IMAGE)?;
        match STANDARD.decode(encoded.as_bytes()) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!("Ignoring invalid profile image data: {}", e);
                None
            }
        }
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            name: self.user_name(),
            email: self.email(),
            profile_image: self.profile_image(),
            prefers_dark_mode: self.dark_mode(),
        }
    }

    /// Save name and email; the image is replaced only when one is given
    pub fn update_profile(
        &mut self,
        name: &str,
        email: Option<&str>,
        profile_image: Option<&[u8]>,
    ) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidData("Name cannot be empty".to_string()));
        }

        self.store.set(KEY_USER_NAME, Some(name.to_string()))?;

        let email = email.map(str::trim).filter(|e| !e.is_empty());
        self.store.set(KEY_USER_EMAIL, email.map(String::from))?;

        if let Some(bytes) = profile_image {
            self.store
                .set(KEY_PROFILE_IMAGE, Some(STANDARD.encode(bytes)))?;
        }

        Ok(())
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.store.get(key).and_then(|v| v.parse().ok())
    }

    fn set_bool(&mut self, key: &str, value: bool) -> Result<()> {
        self.store.set(key, Some(value.to_string()))
    }
}
