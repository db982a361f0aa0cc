use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::collection::SampleCollection;
use crate::error::DatasetError;

fn default_mode() -> String {
    "train".to_string()
}

/// Settings to open an RGB image collection, typically read from YAML.
///
/// ```yaml
/// root: /data/flowers
/// mode: valid
/// shuffle: true
/// seed: 42
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Dataset folder holding `<mode>.txt`.
    pub root: PathBuf,
    /// Split to open.
    #[serde(default = "default_mode")]
    pub mode: String,
    /// Whether to shuffle right after opening.
    #[serde(default)]
    pub shuffle: bool,
    /// Optional fixed seed for a reproducible shuffle.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            mode: default_mode(),
            shuffle: false,
            seed: None,
        }
    }
}

impl DatasetConfig {
    /// Open the configured split with the default RGB image loader.
    pub fn open(&self) -> Result<SampleCollection, DatasetError> {
        let mut dataset = SampleCollection::open(&self.root, &self.mode)?;

        if self.shuffle {
            match self.seed {
                Some(seed) => dataset.shuffle_seeded(seed),
                None => dataset.shuffle(),
            }
        }

        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::BoxError;

    #[test]
    fn test_open_from_yaml() -> Result<(), BoxError> {
        let tmp_dir = tempfile::tempdir()?;
        let rows = (0..10).map(|i| format!("{i}.png {}\n", i % 3)).collect::<String>();
        std::fs::write(tmp_dir.path().join("valid.txt"), rows)?;

        let config_path = tmp_dir.path().join("dataset.yaml");
        std::fs::write(
            &config_path,
            format!(
                "root: {}\nmode: valid\nshuffle: true\nseed: 3\n",
                tmp_dir.path().display()
            ),
        )?;

        let config: DatasetConfig = cvkit_serialize::load_yaml(&config_path)?;
        assert_eq!(config.mode, "valid");
        assert_eq!(config.seed, Some(3));

        let a = config.open()?;
        let b = config.open()?;
        assert_eq!(a.len(), 10);
        assert_eq!(a.num_classes(), 3);
        assert_eq!(a.entries(), b.entries());
        Ok(())
    }

    #[test]
    fn test_defaults() -> Result<(), BoxError> {
        let config: DatasetConfig = load_config("root: /tmp/data\n")?;
        assert_eq!(config.mode, "train");
        assert!(!config.shuffle);
        assert_eq!(config.seed, None);
        Ok(())
    }

    fn load_config(text: &str) -> Result<DatasetConfig, BoxError> {
        let tmp_dir = tempfile::tempdir()?;
        let path = tmp_dir.path().join("config.yml");
        std::fs::write(&path, text)?;
        Ok(cvkit_serialize::load_yaml(&path)?)
    }
}
