use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::Serialize;

use super::Region;

/// Per-region availability of one service.
///
/// An immutable snapshot: once handed out by the prober it is never mutated again.
/// Iteration is always sorted by region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AvailabilityMap(BTreeMap<Region, bool>);

impl AvailabilityMap {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `None` when `region` was not part of the probe run.
    pub fn get(&self, region: &str) -> Option<bool> {
        self.0.get(region).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Region, bool)> {
        self.0.iter().map(|(region, available)| (region, *available))
    }

    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.0.keys()
    }

    /// Regions where the service was found, sorted.
    pub fn available(&self) -> impl Iterator<Item = &Region> {
        self.iter()
            .filter_map(|(region, available)| available.then_some(region))
    }

    pub fn available_count(&self) -> usize {
        self.0.values().filter(|available| **available).count()
    }
}

impl From<BTreeMap<Region, bool>> for AvailabilityMap {
    fn from(map: BTreeMap<Region, bool>) -> Self {
        Self(map)
    }
}

impl FromIterator<(Region, bool)> for AvailabilityMap {
    fn from_iter<I: IntoIterator<Item = (Region, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for AvailabilityMap {
    type Item = (Region, bool);
    type IntoIter = btree_map::IntoIter<Region, bool>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AvailabilityMap {
        AvailabilityMap::from_iter([
            (Region::from("us-east-1"), true),
            (Region::from("eu-west-1"), false),
            (Region::from("ap-south-1"), true),
        ])
    }

    #[test]
    fn iterates_sorted_by_region() {
        let map = sample();
        let regions: Vec<&str> = map.regions().map(Region::as_str).collect();
        assert_eq!(regions, ["ap-south-1", "eu-west-1", "us-east-1"]);
    }

    #[test]
    fn lookup_by_str() {
        let map = sample();
        assert_eq!(map.get("eu-west-1"), Some(false));
        assert_eq!(map.get("us-east-1"), Some(true));
        assert_eq!(map.get("sa-east-1"), None);
    }

    #[test]
    fn counts_available_regions() {
        let map = sample();
        assert_eq!(map.available_count(), 2);
        let available: Vec<&str> = map.available().map(Region::as_str).collect();
        assert_eq!(available, ["ap-south-1", "us-east-1"]);
    }

    #[test]
    fn serializes_as_json_object() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"{"ap-south-1":true,"eu-west-1":false,"us-east-1":true}"#
        );
    }

    #[test]
    fn empty_map() {
        let map = AvailabilityMap::default();
        assert!(map.is_empty());
        assert_eq!(map.available_count(), 0);
    }
}
