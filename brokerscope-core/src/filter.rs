//! Filter engine: a conjunction of optional inclusion sets over the store.
//!
//! Two layers live here and are kept apart on purpose:
//! - [`FilterSet::matches`] is the raw engine. An empty selection imposes no
//!   constraint on its dimension.
//! - [`FilterSet::is_scoped`] / [`FilterSet::is_renderable`] are the query
//!   policy used by panels and the contract-choice list. They treat an empty
//!   broker, year or contract selection as "nothing to show".

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;

use crate::domain::{Action, NumericField, Observation, Side};

/// An inclusion set for one filter dimension.
///
/// Empty means unconstrained. A scalar and a singleton set are the same
/// selection: `Selection::from("A")` equals `Selection::from(vec!["A"])`, and
/// the serde form accepts either `"A"` or `["A"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<T: Ord>(BTreeSet<T>);

impl<T: Ord> Selection<T> {
    /// The unconstrained selection.
    pub fn any() -> Self {
        Self(BTreeSet::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if `value` passes this dimension.
    pub fn admits(&self, value: &T) -> bool {
        self.0.is_empty() || self.0.contains(value)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.0.contains(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }
}

impl<T: Ord> Default for Selection<T> {
    fn default() -> Self {
        Self::any()
    }
}

impl<T: Ord> FromIterator<T> for Selection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T: Ord> From<Vec<T>> for Selection<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T: Ord> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        value.into_iter().collect()
    }
}

impl From<String> for Selection<String> {
    fn from(value: String) -> Self {
        std::iter::once(value).collect()
    }
}

impl From<&str> for Selection<String> {
    fn from(value: &str) -> Self {
        std::iter::once(value.to_string()).collect()
    }
}

impl From<Vec<&str>> for Selection<String> {
    fn from(values: Vec<&str>) -> Self {
        values.into_iter().map(str::to_string).collect()
    }
}

impl From<i32> for Selection<i32> {
    fn from(value: i32) -> Self {
        std::iter::once(value).collect()
    }
}

impl From<Side> for Selection<Side> {
    fn from(value: Side) -> Self {
        std::iter::once(value).collect()
    }
}

impl From<Action> for Selection<Action> {
    fn from(value: Action) -> Self {
        std::iter::once(value).collect()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<'de, T> Deserialize<'de> for Selection<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
            None => Self::any(),
            Some(OneOrMany::One(value)) => std::iter::once(value).collect(),
            Some(OneOrMany::Many(values)) => values.into_iter().collect(),
        })
    }
}

impl<T: Ord + Serialize> Serialize for Selection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

/// The five filter dimensions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSet {
    pub brokers: Selection<String>,
    pub years: Selection<i32>,
    pub sides: Selection<Side>,
    pub actions: Selection<Action>,
    pub contracts: Selection<String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn brokers<I, S>(mut self, brokers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.brokers = brokers.into_iter().map(Into::into).collect();
        self
    }

    pub fn years(mut self, years: impl IntoIterator<Item = i32>) -> Self {
        self.years = years.into_iter().collect();
        self
    }

    pub fn sides(mut self, sides: impl IntoIterator<Item = Side>) -> Self {
        self.sides = sides.into_iter().collect();
        self
    }

    pub fn actions(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.actions = actions.into_iter().collect();
        self
    }

    pub fn contracts<I, S>(mut self, contracts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contracts = contracts.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the contract dimension with a single-value or multi-value selection.
    pub fn contract(mut self, contract: impl Into<Selection<String>>) -> Self {
        self.contracts = contract.into();
        self
    }

    /// Raw engine predicate: every non-empty dimension must admit the row.
    pub fn matches(&self, obs: &Observation) -> bool {
        self.brokers.admits(&obs.broker)
            && self.years.admits(&obs.year())
            && self.sides.admits(&obs.side)
            && self.actions.admits(&obs.action)
            && self.contracts.admits(&obs.contract)
    }

    /// Query policy for choice lists: brokers and years must both be chosen.
    pub fn is_scoped(&self) -> bool {
        !self.brokers.is_empty() && !self.years.is_empty()
    }

    /// Query policy for panels: brokers, years and contracts must all be chosen.
    pub fn is_renderable(&self) -> bool {
        self.is_scoped() && !self.contracts.is_empty()
    }

    /// Same predicates with the contract dimension lifted.
    pub fn without_contracts(&self) -> Self {
        Self {
            contracts: Selection::any(),
            ..self.clone()
        }
    }
}

/// A borrowed, order-preserving subsequence of the record store.
#[derive(Debug, Clone, Default)]
pub struct View<'a> {
    rows: Vec<&'a Observation>,
}

impl<'a> View<'a> {
    pub fn new(rows: Vec<&'a Observation>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Observation> + '_ {
        self.rows.iter().copied()
    }

    pub fn rows(&self) -> &[&'a Observation] {
        &self.rows
    }

    /// Narrow this view further. Store order is preserved.
    pub fn refine(&self, filters: &FilterSet) -> View<'a> {
        View::new(
            self.rows
                .iter()
                .copied()
                .filter(|obs| filters.matches(obs))
                .collect(),
        )
    }

    /// The time axis of this view.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|obs| obs.date).collect()
    }

    /// Values of one numeric column, row-aligned with [`View::dates`].
    pub fn column(&self, field: NumericField) -> Vec<Option<f64>> {
        self.rows.iter().map(|obs| field.value(obs)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SignalValues;

    fn obs(broker: &str, date: &str, contract: &str, side: Side, action: Action) -> Observation {
        Observation {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            broker: broker.into(),
            contract: contract.into(),
            side,
            action,
            position: 100.0,
            position_change_rate: 0.0,
            price: 3000.0,
            price_change_rate: None,
            signals: SignalValues::default(),
        }
    }

    fn rows() -> Vec<Observation> {
        vec![
            obs("A", "2022-12-30", "M2301", Side::Long, Action::Increase),
            obs("B", "2023-01-03", "M2305", Side::Short, Action::Decrease),
            obs("A", "2023-01-04", "M2305", Side::Long, Action::Unchanged),
            obs("A", "2023-01-05", "M2309", Side::Short, Action::Increase),
        ]
    }

    #[test]
    fn empty_filter_set_admits_everything() {
        let rows = rows();
        let filters = FilterSet::new();
        assert!(rows.iter().all(|o| filters.matches(o)));
    }

    #[test]
    fn conjunction_of_dimensions() {
        let rows = rows();
        let filters = FilterSet::new()
            .brokers(["A"])
            .years([2023])
            .sides([Side::Long]);
        let matched: Vec<_> = rows.iter().filter(|o| filters.matches(o)).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].contract, "M2305");
    }

    #[test]
    fn scalar_and_singleton_are_the_same_selection() {
        let scalar = FilterSet::new().contract("M2305");
        let list = FilterSet::new().contracts(vec!["M2305"]);
        assert_eq!(scalar, list);

        let from_json: FilterSet =
            serde_json::from_str(r#"{"contracts": "M2305", "years": 2023}"#).unwrap();
        let from_json_list: FilterSet =
            serde_json::from_str(r#"{"contracts": ["M2305"], "years": [2023]}"#).unwrap();
        assert_eq!(from_json, from_json_list);
        assert!(from_json.years.contains(&2023));
    }

    #[test]
    fn null_selection_deserializes_as_unconstrained() {
        let filters: FilterSet = serde_json::from_str(r#"{"brokers": null}"#).unwrap();
        assert!(filters.brokers.is_empty());
    }

    #[test]
    fn policy_requires_brokers_years_and_contracts() {
        let base = FilterSet::new().brokers(["A"]);
        assert!(!base.is_scoped());
        let scoped = base.years([2023]);
        assert!(scoped.is_scoped());
        assert!(!scoped.is_renderable());
        assert!(scoped.contract("M2305").is_renderable());
    }

    #[test]
    fn refine_preserves_order() {
        let rows = rows();
        let view = View::new(rows.iter().collect());
        let refined = view.refine(&FilterSet::new().brokers(["A"]));
        let dates: Vec<String> = refined.dates().iter().map(|d| d.to_string()).collect();
        assert_eq!(dates, vec!["2022-12-30", "2023-01-04", "2023-01-05"]);
    }

    #[test]
    fn without_contracts_keeps_other_dimensions() {
        let filters = FilterSet::new()
            .brokers(["A"])
            .actions([Action::Increase])
            .contract("M2301");
        let lifted = filters.without_contracts();
        assert!(lifted.contracts.is_empty());
        assert_eq!(lifted.actions, filters.actions);
    }
}
