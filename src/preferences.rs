//! Persisted observation position.
//!
//! The face itself only needs the hemisphere; latitude and longitude are
//! kept for hosts that derive the rotation offset from them.

use std::fs;
use std::path::{Path, PathBuf};

use dirs_next::home_dir;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SkyClockError};
use crate::orientation::Hemisphere;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ObservationPosition {
    pub latitude: f64,
    pub longitude: f64,
    pub southern_sky: bool,
}

impl ObservationPosition {
    pub fn new(latitude: f64, longitude: f64, southern_sky: bool) -> Result<Self> {
        let position = Self {
            latitude,
            longitude,
            southern_sky,
        };
        position.validate()?;
        Ok(position)
    }

    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(SkyClockError::InvalidPosition(format!(
                "latitude {} outside -90..=90",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(SkyClockError::InvalidPosition(format!(
                "longitude {} outside -180..=180",
                self.longitude
            )));
        }
        Ok(())
    }

    pub fn hemisphere(&self) -> Hemisphere {
        Hemisphere::from_mirrored(self.southern_sky)
    }
}

pub trait PreferenceStore {
    fn load(&self) -> Result<ObservationPosition>;
    fn save(&self, position: &ObservationPosition) -> Result<()>;
}

/// YAML file store. A missing file, or one that does not parse as a valid
/// position, reads as the default position.
#[derive(Debug, Clone)]
pub struct YamlPreferenceStore {
    path: PathBuf,
}

impl YamlPreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.config/skyclock/preferences.yaml`, or the working directory when
    /// there is no home directory.
    pub fn default_location() -> Self {
        let path = home_dir()
            .map(|home| home.join(".config/skyclock/preferences.yaml"))
            .unwrap_or_else(|| PathBuf::from("skyclock-preferences.yaml"));
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SkyClockError {
        SkyClockError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl PreferenceStore for YamlPreferenceStore {
    fn load(&self) -> Result<ObservationPosition> {
        if !self.path.exists() {
            debug!("no preferences at {}, using defaults", self.path.display());
            return Ok(ObservationPosition::default());
        }
        let text = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let parsed = serde_yaml::from_str::<ObservationPosition>(&text)
            .map_err(SkyClockError::from)
            .and_then(|position| position.validate().map(|()| position));
        match parsed {
            Ok(position) => Ok(position),
            Err(e) => {
                warn!("ignoring preferences at {}: {e}", self.path.display());
                Ok(ObservationPosition::default())
            }
        }
    }

    fn save(&self, position: &ObservationPosition) -> Result<()> {
        position.validate()?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let text = serde_yaml::to_string(position)?;
        fs::write(&self.path, text).map_err(|e| self.io_error(e))?;
        info!("saved observation position to {}", self.path.display());
        Ok(())
    }
}
