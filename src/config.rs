use log::info;
use std::path::PathBuf;

/// Folder name under the user's data directory
const APP_DIR: &str = "nutrition-tracker";
/// Dataset folder name, both under the data directory and as a last resort
const DATASET_DIR: &str = "nutrients_data";

/// Startup configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding the `.json` product records
    pub dataset_dir: PathBuf,
}

impl Config {
    /// Resolve the configuration from the process arguments.
    ///
    /// The first positional argument, if any, is the dataset directory.
    pub fn load() -> Self {
        Self::from_args(std::env::args().skip(1))
    }

    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let dataset_dir = match args.into_iter().find(|arg| !arg.starts_with('-')) {
            Some(dir) => PathBuf::from(dir),
            None => {
                let dir = Self::default_dataset_dir();
                info!("No dataset directory given, using default: {}", dir.display());
                dir
            }
        };

        Config { dataset_dir }
    }

    /// Get the default dataset location
    ///
    /// - Linux: ~/.local/share/nutrition-tracker/nutrients_data
    /// - macOS: ~/Library/Application Support/nutrition-tracker/nutrients_data
    /// - Windows: %APPDATA%\nutrition-tracker\nutrients_data
    ///
    /// Falls back to ./nutrients_data if no home directory is known.
    pub fn default_dataset_dir() -> PathBuf {
        match dirs::data_dir().or_else(dirs::home_dir) {
            Some(mut path) => {
                path.push(APP_DIR);
                path.push(DATASET_DIR);
                path
            }
            None => PathBuf::from(DATASET_DIR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_positional_argument_wins() {
        let args = vec!["--verbose".to_string(), "/tmp/foods".to_string(), "other".to_string()];
        let config = Config::from_args(args);
        assert_eq!(config.dataset_dir, PathBuf::from("/tmp/foods"));
    }

    #[test]
    fn test_default_dataset_dir() {
        let config = Config::from_args(Vec::new());
        assert_eq!(config.dataset_dir, Config::default_dataset_dir());
        assert!(config.dataset_dir.ends_with(DATASET_DIR));
    }
}
