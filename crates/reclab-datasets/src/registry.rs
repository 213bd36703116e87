//! Registry of the built-in datasets.

use crate::DatasetConfig;
use reclab_types::{DEFAULT_DELIMITER, DatasetManifest};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// The dataset definitions embedded at compile time.
const DATASETS_JSON: &str = include_str!("../data/datasets.json");

/// Global dataset registry instance.
static REGISTRY: OnceLock<DatasetRegistry> = OnceLock::new();

/// A registered dataset: where its archive comes from and what it must contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetDefinition {
    /// Dataset name, also the name of its cache subdirectory (e.g., "BOOK").
    name: String,
    /// Human-readable description.
    description: String,
    /// Remote archive URL.
    url: String,
    /// Table files the archive must contain.
    tables: Vec<String>,
    /// Field delimiter of the tables.
    #[serde(default = "default_delimiter")]
    delimiter: char,
}

const fn default_delimiter() -> char {
    DEFAULT_DELIMITER as char
}

impl DatasetDefinition {
    /// Creates a new definition.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
        tables: Vec<String>,
        delimiter: char,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            url: url.into(),
            tables,
            delimiter,
        }
    }

    /// Returns the dataset name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the remote archive URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the expected table names.
    #[must_use]
    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    /// Returns the delimiter as a byte, or the default if it is not ASCII.
    #[must_use]
    pub fn delimiter(&self) -> u8 {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .unwrap_or(DEFAULT_DELIMITER)
    }

    /// Builds the manifest for this dataset under the configured cache root.
    ///
    /// Layout: `<root>/datasets/<NAME>/<NAME>.zip` for the archive and
    /// `<root>/datasets/<NAME>/extracted/` for the tables.
    #[must_use]
    pub fn manifest(&self, config: &DatasetConfig) -> DatasetManifest {
        let dir = config.dataset_dir(&self.name);
        DatasetManifest::new(
            self.name.clone(),
            self.url.clone(),
            dir.join(format!("{}.zip", self.name)),
            dir.join("extracted"),
            self.tables.clone(),
            config.delimiter.unwrap_or_else(|| self.delimiter()),
        )
    }
}

/// Registry of all built-in datasets.
#[derive(Debug)]
pub struct DatasetRegistry {
    datasets: HashMap<String, DatasetDefinition>,
}

impl DatasetRegistry {
    /// Returns the global dataset registry.
    ///
    /// The registry is initialized lazily on first access.
    #[must_use]
    pub fn global() -> &'static Self {
        REGISTRY.get_or_init(Self::load)
    }

    /// Loads datasets from the embedded JSON data.
    fn load() -> Self {
        let datasets: HashMap<String, DatasetDefinition> =
            serde_json::from_str(DATASETS_JSON).expect("Invalid datasets.json");
        Self { datasets }
    }

    /// Looks up a dataset by name (case-insensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DatasetDefinition> {
        self.datasets.get(&name.to_uppercase())
    }

    /// Returns all datasets sorted by name.
    #[must_use]
    pub fn all(&self) -> Vec<&DatasetDefinition> {
        let mut all: Vec<_> = self.datasets.values().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    /// Returns all dataset names sorted alphabetically.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.datasets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered datasets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    /// Returns true if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}
