//! Instrument catalog for the tickroll price simulator.
//!
//! The catalog is built once from seed groups and never gains or loses
//! entries afterwards. Only each instrument's current price changes, through
//! the atomic cell inside [`Instrument`].
//!
//! # Example
//!
//! ```
//! use tickroll_catalog::Catalog;
//!
//! let catalog = Catalog::seeded();
//!
//! if let Some(instrument) = catalog.get("NOVO") {
//!     println!("{}: {}", instrument.id(), instrument.current_price());
//! }
//! ```

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickroll/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::collections::{BTreeMap, HashMap};

use tickroll_types::{Group, Instrument, Result, TickrollError};

/// The seed groups embedded at compile time.
const SEED_JSON: &str = include_str!("../data/seed.json");

/// Registry of simulated instruments and the groups that classify them.
#[derive(Debug)]
pub struct Catalog {
    /// Instruments in seed order.
    instruments: Vec<Instrument>,
    /// Exact id to index into `instruments`.
    index: HashMap<String, usize>,
    /// Groups in seed order.
    groups: Vec<Group>,
}

impl Catalog {
    /// Builds a catalog from the embedded seed data.
    ///
    /// # Panics
    ///
    /// Panics if the embedded seed data is invalid.
    #[must_use]
    pub fn seeded() -> Self {
        Self::from_json(SEED_JSON).expect("Invalid seed.json")
    }

    /// Builds a catalog from a JSON array of groups.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or an id appears twice.
    pub fn from_json(json: &str) -> Result<Self> {
        let groups: Vec<Group> = serde_json::from_str(json)?;
        Self::from_groups(groups)
    }

    /// Builds a catalog from seed groups.
    ///
    /// # Errors
    ///
    /// Returns [`TickrollError::DuplicateInstrument`] if an id appears in more
    /// than one place.
    pub fn from_groups(groups: Vec<Group>) -> Result<Self> {
        let mut instruments = Vec::new();
        let mut index = HashMap::new();

        for member in groups.iter().flat_map(|g| &g.members) {
            if index.insert(member.id.clone(), instruments.len()).is_some() {
                return Err(TickrollError::DuplicateInstrument(member.id.clone()));
            }
            instruments.push(Instrument::new(member.id.clone(), member.price));
        }

        Ok(Self {
            instruments,
            index,
            groups,
        })
    }

    /// Looks up an instrument by id.
    ///
    /// Exact matches win; otherwise the lookup falls back to a
    /// case-insensitive comparison.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Instrument> {
        self.index
            .get(id)
            .map(|&i| &self.instruments[i])
            .or_else(|| {
                self.instruments
                    .iter()
                    .find(|i| i.id().eq_ignore_ascii_case(id))
            })
    }

    /// Looks up an instrument by id, failing if it is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`TickrollError::UnknownInstrument`] if no instrument matches.
    pub fn require(&self, id: &str) -> Result<&Instrument> {
        self.get(id)
            .ok_or_else(|| TickrollError::UnknownInstrument(id.to_string()))
    }

    /// Returns all instruments in seed order.
    pub fn all(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.iter()
    }

    /// Returns the total number of instruments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// Returns true if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// Returns all groups in seed order.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Returns the member ids of a group.
    ///
    /// # Errors
    ///
    /// Returns [`TickrollError::UnknownGroup`] if the group does not exist.
    pub fn group_members(&self, name: &str) -> Result<Vec<&str>> {
        self.groups
            .iter()
            .find(|g| g.name == name)
            .map(|g| g.ids().collect())
            .ok_or_else(|| TickrollError::UnknownGroup(name.to_string()))
    }

    /// Returns the name of the group an instrument belongs to.
    #[must_use]
    pub fn group_of(&self, id: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|g| g.contains(id))
            .map(|g| g.name.as_str())
    }

    /// Maps each known id in `ids` to its group name.
    ///
    /// Unknown ids are left out of the result.
    pub fn groups_of<'a, I>(&self, ids: I) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        ids.into_iter()
            .filter_map(|id| {
                self.group_of(id)
                    .map(|group| (id.to_string(), group.to_string()))
            })
            .collect()
    }

    /// Searches instrument ids by substring (case-insensitive).
    ///
    /// Results are sorted alphabetically.
    pub fn search(&self, pattern: &str) -> Vec<&str> {
        let pattern = pattern.to_lowercase();
        let mut ids: Vec<&str> = self
            .instruments
            .iter()
            .map(Instrument::id)
            .filter(|id| id.to_lowercase().contains(&pattern))
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Returns all instrument ids sorted alphabetically.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.instruments.iter().map(Instrument::id).collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_seed_loads() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.len(), 13);
        assert_eq!(catalog.groups().len(), 3);
    }

    #[test]
    fn test_get_novo() {
        let catalog = Catalog::seeded();
        let novo = catalog.get("NOVO").expect("NOVO should exist");
        assert_eq!(novo.id(), "NOVO");
        assert_relative_eq!(novo.origin_price(), 750.0);
        assert_relative_eq!(novo.current_price(), 750.0);
    }

    #[test]
    fn test_get_case_insensitive() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.get("brk.b").map(Instrument::id), Some("BRK.B"));
        assert!(catalog.get("Msft").is_some());
        assert!(catalog.get("TSLA").is_none());
    }

    #[test]
    fn test_require_unknown() {
        let catalog = Catalog::seeded();
        assert!(matches!(
            catalog.require("TSLA"),
            Err(TickrollError::UnknownInstrument(id)) if id == "TSLA"
        ));
    }

    #[test]
    fn test_group_members() {
        let catalog = Catalog::seeded();
        assert_eq!(
            catalog.group_members("C25").unwrap(),
            vec!["NOVO", "MAERSK", "ORSTED", "NETC", "DANSKE"]
        );
        assert!(matches!(
            catalog.group_members("DAX"),
            Err(TickrollError::UnknownGroup(_))
        ));
    }

    #[test]
    fn test_groups_of() {
        let catalog = Catalog::seeded();
        let groups = catalog.groups_of(["NOVO", "OIL", "TSLA"]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["NOVO"], "C25");
        assert_eq!(groups["OIL"], "WORLD");
    }

    #[test]
    fn test_search() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.search("a"), vec!["AAPL", "AMZN", "DANSKE", "MAERSK", "META", "NVDA"]);
        assert_eq!(catalog.search("brk"), vec!["BRK.B"]);
        assert!(catalog.search("zzz").is_empty());
    }

    #[test]
    fn test_duplicate_rejected() {
        let groups = vec![
            Group::new("A", [("X", 1.0)]),
            Group::new("B", [("X", 2.0)]),
        ];
        assert!(matches!(
            Catalog::from_groups(groups),
            Err(TickrollError::DuplicateInstrument(id)) if id == "X"
        ));
    }

    #[test]
    fn test_price_mutation_visible_through_catalog() {
        let catalog = Catalog::from_groups(vec![Group::new("T", [("AAA", 10.0)])]).unwrap();
        catalog.get("AAA").unwrap().apply_delta(0.5);
        assert_relative_eq!(catalog.get("AAA").unwrap().current_price(), 10.5);
        assert_relative_eq!(catalog.get("AAA").unwrap().origin_price(), 10.0);
    }
}
