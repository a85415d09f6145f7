//! Example index request.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use super::GuideClient;
use crate::error::IndexError;
use crate::fallback::fallback_examples;
use crate::transport::Transport;
use crate::types::{ExampleIndex, ExampleTable, IndexResponse};

impl<T: Transport> GuideClient<T> {
    /// Fetch the list of example tables.
    ///
    /// Never fails: any problem with the backend index (unreachable host,
    /// error status, malformed body, no usable entries) is logged and answered
    /// with [`fallback_examples`], flagged as such.
    pub async fn load_example_index(&self) -> ExampleIndex {
        match self.try_fetch_example_index().await {
            Ok(tables) => {
                info!("Loaded {} example tables", tables.len());
                ExampleIndex {
                    tables,
                    fallback: false,
                }
            }
            Err(e) => {
                warn!("Failed to load example index, using fallback: {}", e);
                ExampleIndex {
                    tables: fallback_examples(),
                    fallback: true,
                }
            }
        }
    }

    /// Example tables only, see [`load_example_index`](Self::load_example_index).
    pub async fn fetch_example_index(&self) -> Vec<ExampleTable> {
        self.load_example_index().await.tables
    }

    async fn try_fetch_example_index(&self) -> Result<Vec<ExampleTable>, IndexError> {
        let response = self.transport.get(&self.index_url()).await?;
        if !response.is_success() {
            return Err(IndexError::Status {
                status: response.status,
                reason: response.reason,
            });
        }

        let index: IndexResponse = serde_json::from_slice(&response.body)?;
        let tables = usable_tables(index.tables);
        if tables.is_empty() {
            return Err(IndexError::Empty);
        }
        Ok(tables)
    }
}

/// Drop entries without a name and repeated names, keeping first occurrences.
fn usable_tables(tables: Vec<ExampleTable>) -> Vec<ExampleTable> {
    let mut seen = HashSet::new();
    tables
        .into_iter()
        .filter(|table| {
            let keep = !table.name.is_empty() && seen.insert(table.name.clone());
            if !keep {
                debug!("Skipping example table entry {:?}", table.name);
            }
            keep
        })
        .collect()
}
