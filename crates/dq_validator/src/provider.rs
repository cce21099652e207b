//! Dataset providers.
//!
//! A provider yields the dataset a run validates. Which provider is used is
//! decided by configuration, never by falling back after a failed load.

use crate::{DataSet, ProviderError};
use dq_core::FixtureRow;
use std::future::Future;

/// A source of datasets.
pub trait DatasetProvider: Send + Sync {
    /// Short description of the source, for logs and reports.
    fn describe(&self) -> String;

    /// Loads the dataset.
    fn load(&self) -> impl Future<Output = Result<DataSet, ProviderError>> + Send;
}

/// Serves rows held in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureSource {
    rows: Vec<FixtureRow>,
}

impl FixtureSource {
    pub fn new(rows: Vec<FixtureRow>) -> Self {
        Self { rows }
    }

    /// A source serving the single sample row.
    pub fn sample() -> Self {
        Self::new(vec![FixtureRow::sample()])
    }

    /// Creates the source for a fixture configuration; absent rows mean the sample.
    pub fn from_config(rows: Option<Vec<FixtureRow>>) -> Self {
        rows.map(Self::new).unwrap_or_else(Self::sample)
    }

    pub fn rows(&self) -> &[FixtureRow] {
        &self.rows
    }

    /// Builds the dataset synchronously.
    pub fn dataset(&self) -> DataSet {
        DataSet::from_fixture(&self.rows)
    }
}

impl Default for FixtureSource {
    fn default() -> Self {
        Self::sample()
    }
}

impl DatasetProvider for FixtureSource {
    fn describe(&self) -> String {
        format!("fixture ({} rows)", self.rows.len())
    }

    fn load(&self) -> impl Future<Output = Result<DataSet, ProviderError>> + Send {
        let dataset = self.dataset();
        async move { Ok(dataset) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_absent_rows_mean_sample() {
        assert_eq!(FixtureSource::from_config(None), FixtureSource::sample());
        assert_eq!(FixtureSource::from_config(Some(Vec::new())).rows().len(), 0);
    }

    #[tokio::test]
    async fn test_load_sample() {
        let source = FixtureSource::sample();
        let dataset = source.load().await.unwrap();

        assert_eq!(dataset.len(), 1);
        assert_eq!(source.describe(), "fixture (1 rows)");
    }
}
