use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionValidity {
    /// Every member of the collection was skipped
    pub skip: bool,
}

/// Aggregated result over the datasets of a list file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionResult<T> {
    /// Path of the list file
    pub collection_name: String,

    /// Set only when the whole collection could not be processed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub datasets: Vec<T>,

    #[serde(default)]
    pub valid: CollectionValidity,
}

impl<T> CollectionResult<T> {
    pub fn new(collection_name: impl Into<String>) -> Self {
        Self {
            collection_name: collection_name.into(),
            error: None,
            datasets: Vec::new(),
            valid: CollectionValidity::default(),
        }
    }

    pub fn with_error(collection_name: impl Into<String>, error: impl ToString) -> Self {
        let mut result = Self::new(collection_name);
        result.error = Some(error.to_string());
        result
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}
