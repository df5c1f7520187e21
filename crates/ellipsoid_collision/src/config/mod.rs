//! Settings files
//!
//! Any serde-enabled settings struct can opt into file loading by
//! implementing [`Config`]. The format is picked from the file extension.

use serde::{Deserialize, Serialize};

use std::path::Path;

/// Settings that can be read from and written to TOML or RON files
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load from `path`, choosing the format by extension
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        
        match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => Self::from_toml_str(&contents),
            ConfigFormat::Ron => Self::from_ron_str(&contents),
        }
    }
    
    /// Write to `path`, choosing the format by extension
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => self.to_toml_string()?,
            ConfigFormat::Ron => self.to_ron_string()?,
        };
        
        Ok(std::fs::write(path, contents)?)
    }
    
    /// Parse from a TOML document
    fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }
    
    /// Parse from a RON document
    fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }
    
    /// Serialize as pretty TOML
    fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
    
    /// Serialize as pretty RON
    fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

/// Supported on-disk formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Ron,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Errors raised while loading or saving settings
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Reading or writing the file failed
    #[error("Config file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    
    /// The document did not match the settings struct
    #[error("Could not parse config: {0}")]
    Parse(String),
    
    /// The settings could not be written in the chosen format
    #[error("Could not serialize config: {0}")]
    Serialize(String),
    
    /// File extension is neither `.toml` nor `.ron`
    #[error("Unsupported config format for {0}")]
    UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        steps: u32,
    }
    
    impl Config for Sample {}
    
    #[test]
    fn test_file_round_trip_by_extension() {
        let sample = Sample { name: "walker".to_string(), steps: 12 };
        let dir = std::env::temp_dir();
        
        for file in ["ellipsoid_collision_sample.toml", "ellipsoid_collision_sample.ron"] {
            let path = dir.join(file);
            sample.save_to_file(&path).unwrap();
            assert_eq!(Sample::load_from_file(&path).unwrap(), sample);
            let _ = std::fs::remove_file(&path);
        }
    }
    
    #[test]
    fn test_missing_file_is_io_error() {
        let result = Sample::load_from_file(std::env::temp_dir().join("ellipsoid_collision_missing.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
    
    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a/b.toml")).unwrap(), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("b.ron")).unwrap(), ConfigFormat::Ron);
        assert!(matches!(
            ConfigFormat::from_path(Path::new("b.json")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }
}
