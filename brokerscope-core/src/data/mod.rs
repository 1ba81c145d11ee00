//! Record loading, the immutable store and its derived catalog.

pub mod catalog;
pub mod csv_io;
pub mod sample;
pub mod store;

pub use catalog::{Catalog, ContractOrder};
pub use csv_io::{load_csv, read_csv, write_csv, LoadError};
pub use sample::{sample_store, SampleSpec};
pub use store::{CleanedStore, RawObservation, RecordStore};

use std::path::Path;

/// The record store together with the catalog computed from it at load time.
///
/// Both are fixed for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct Dataset {
    store: RecordStore,
    catalog: Catalog,
}

impl Dataset {
    pub fn new(store: RecordStore) -> Self {
        let catalog = Catalog::from_store(&store);
        tracing::info!(
            rows = store.len(),
            brokers = catalog.brokers().len(),
            contracts = catalog.contract_order().contracts().len(),
            fingerprint = %store.fingerprint(),
            "dataset ready"
        );
        Self { store, catalog }
    }

    /// Load and clean a CSV file, then derive the catalog.
    pub fn from_csv(path: &Path) -> Result<Self, LoadError> {
        let cleaned = load_csv(path)?;
        Ok(Self::new(cleaned.store))
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
