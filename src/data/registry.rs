use std::collections::HashMap;

use super::Dataset;
use crate::error::{AppError, Result};

/// Loaded datasets keyed by the name shown in the dataset selector
///
/// Keys keep their first-insertion order so the selector does not reshuffle
/// when a file is reloaded.
#[derive(Debug, Default)]
pub struct DatasetRegistry {
    datasets: HashMap<String, Dataset>,
    order: Vec<String>,
}

impl DatasetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a dataset, replacing any previous dataset under the same key
    pub fn put(&mut self, key: impl Into<String>, dataset: Dataset) {
        let key = key.into();
        if self.datasets.insert(key.clone(), dataset).is_some() {
            log::info!("Replaced dataset '{}'", key);
        } else {
            self.order.push(key);
        }
    }

    pub fn get(&self, key: &str) -> Result<&Dataset> {
        self.datasets.get(key).ok_or_else(|| AppError::DatasetNotFound {
            key: key.to_string(),
        })
    }

    pub fn get_mut(&mut self, key: &str) -> Result<&mut Dataset> {
        self.datasets
            .get_mut(key)
            .ok_or_else(|| AppError::DatasetNotFound {
                key: key.to_string(),
            })
    }

    /// Column labels of a dataset, in table order
    pub fn column_names(&self, key: &str) -> Result<Vec<String>> {
        Ok(self.get(key)?.column_names())
    }

    /// Registered keys in insertion order
    pub fn keys(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn dataset(frame: DataFrame) -> Dataset {
        Dataset::from_dataframe(frame, None)
    }

    #[test]
    fn test_put_and_get() {
        let mut registry = DatasetRegistry::new();
        registry.put("a.csv", dataset(df!("x" => [1i64, 2], "y" => [3i64, 4]).unwrap()));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("a.csv").unwrap().height(), 2);
        assert_eq!(registry.column_names("a.csv").unwrap(), vec!["x", "y"]);
    }

    #[test]
    fn test_missing_key() {
        let registry = DatasetRegistry::new();
        assert!(registry.is_empty());
        assert!(matches!(
            registry.get("nope.csv"),
            Err(AppError::DatasetNotFound { .. })
        ));
        assert!(registry.column_names("nope.csv").is_err());
    }

    #[test]
    fn test_put_overwrites_without_merging() {
        let mut registry = DatasetRegistry::new();
        registry.put("a.csv", dataset(df!("x" => [1i64, 2, 3]).unwrap()));
        registry.put("b.csv", dataset(df!("z" => [0i64]).unwrap()));
        registry.put("a.csv", dataset(df!("p" => [9i64], "q" => [8i64]).unwrap()));

        assert_eq!(registry.keys(), &["a.csv".to_string(), "b.csv".to_string()]);
        assert_eq!(registry.column_names("a.csv").unwrap(), vec!["p", "q"]);
        assert_eq!(registry.get("a.csv").unwrap().height(), 1);
    }

    #[test]
    fn test_same_base_name_from_two_directories() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        let first_path = first.path().join("readings.csv");
        let second_path = second.path().join("readings.csv");

        let mut f = std::fs::File::create(&first_path).unwrap();
        writeln!(f, "a,b\n1,2\n3,4").unwrap();
        let mut f = std::fs::File::create(&second_path).unwrap();
        writeln!(f, "c\n5").unwrap();

        let mut registry = DatasetRegistry::new();
        for path in [&first_path, &second_path] {
            registry.put(Dataset::key_for_path(path), Dataset::load(path).unwrap());
        }

        assert_eq!(registry.len(), 1);
        let ds = registry.get("readings.csv").unwrap();
        assert_eq!(ds.column_names(), vec!["c"]);
        assert_eq!(ds.file_path(), Some(second_path.as_path()));
    }
}
