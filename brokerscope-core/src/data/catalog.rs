//! Process-wide choice lists derived once from the full store.
//!
//! The catalog lives next to the [`RecordStore`], never inside it. It holds
//! the contract order (contracts ranked by the earliest date they appear)
//! together with the broker and year choice lists.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};

use super::store::RecordStore;
use crate::filter::FilterSet;

/// Total order over contracts: earliest first-appearance date first, ties
/// broken by contract name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContractOrder {
    contracts: Vec<String>,
    #[serde(skip)]
    rank: HashMap<String, usize>,
}

impl ContractOrder {
    pub fn from_store(store: &RecordStore) -> Self {
        let mut first_seen: HashMap<&str, NaiveDate> = HashMap::new();
        for obs in store.rows() {
            first_seen
                .entry(obs.contract.as_str())
                .and_modify(|d| *d = (*d).min(obs.date))
                .or_insert(obs.date);
        }

        let mut ranked: Vec<(NaiveDate, &str)> =
            first_seen.into_iter().map(|(c, d)| (d, c)).collect();
        ranked.sort();

        let contracts: Vec<String> = ranked.into_iter().map(|(_, c)| c.to_string()).collect();
        let rank = contracts
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        Self { contracts, rank }
    }

    /// Contracts in order.
    pub fn contracts(&self) -> &[String] {
        &self.contracts
    }

    pub fn rank(&self, contract: &str) -> Option<usize> {
        self.rank.get(contract).copied()
    }

    /// Order a set of contracts. Unknown contracts are dropped.
    pub fn arrange<'c>(&self, contracts: impl IntoIterator<Item = &'c str>) -> Vec<String> {
        let wanted: HashSet<&str> = contracts.into_iter().collect();
        self.contracts
            .iter()
            .filter(|c| wanted.contains(c.as_str()))
            .cloned()
            .collect()
    }
}

/// Choice lists offered to the UI layer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    contract_order: ContractOrder,
    brokers: Vec<String>,
    years: Vec<i32>,
}

impl Catalog {
    pub fn from_store(store: &RecordStore) -> Self {
        let mut seen = HashSet::new();
        let brokers = store
            .rows()
            .iter()
            .filter(|obs| seen.insert(obs.broker.as_str()))
            .map(|obs| obs.broker.clone())
            .collect();
        let years: BTreeSet<i32> = store.rows().iter().map(|obs| obs.year()).collect();

        Self {
            contract_order: ContractOrder::from_store(store),
            brokers,
            years: years.into_iter().collect(),
        }
    }

    pub fn contract_order(&self) -> &ContractOrder {
        &self.contract_order
    }

    /// Brokers in first-appearance order.
    pub fn brokers(&self) -> &[String] {
        &self.brokers
    }

    /// Years, ascending.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Contracts available under the current broker/year/side/action choice.
    ///
    /// Empty unless both brokers and years are chosen. The contract
    /// dimension of `filters` is ignored so the list never narrows itself.
    pub fn contract_choices(&self, store: &RecordStore, filters: &FilterSet) -> Vec<String> {
        if !filters.is_scoped() {
            return Vec::new();
        }
        let view = store.filter(&filters.without_contracts());
        self.contract_order
            .arrange(view.iter().map(|obs| obs.contract.as_str()))
    }
}
