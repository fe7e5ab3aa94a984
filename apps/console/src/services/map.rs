//! Region map: count markers over a fixed table of known regions.

use std::collections::BTreeSet;

use serde_json::{json, Value};
use thiserror::Error;

use crate::models::RegionCounts;
use crate::services::charts::RenderError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub lat: f64,
    pub lng: f64,
    pub zoom: u8,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            lat: 9.082,
            lng: 8.6753,
            zoom: 6,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RegionPoint {
    pub name: &'static str,
    /// Alternate key the backend may use for this region.
    pub alias: Option<&'static str>,
    pub lat: f64,
    pub lng: f64,
}

impl RegionPoint {
    const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self {
            name,
            alias: None,
            lat,
            lng,
        }
    }

    const fn aliased(name: &'static str, alias: &'static str, lat: f64, lng: f64) -> Self {
        Self {
            name,
            alias: Some(alias),
            lat,
            lng,
        }
    }

    fn count_in(&self, counts: &RegionCounts) -> u64 {
        counts
            .get(self.name)
            .or_else(|| self.alias.and_then(|alias| counts.get(alias)))
            .copied()
            .unwrap_or(0)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegionTableError {
    #[error("region table is empty")]
    Empty,
    #[error("region at index {0} has a blank name")]
    BlankName(usize),
    #[error("region key {0:?} appears more than once")]
    DuplicateKey(String),
    #[error("region {name:?} has out-of-range coordinates ({lat}, {lng})")]
    OutOfRange { name: String, lat: f64, lng: f64 },
}

/// Known regions and where to draw them.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionTable {
    regions: Vec<RegionPoint>,
}

impl RegionTable {
    pub fn new(regions: Vec<RegionPoint>) -> Self {
        Self { regions }
    }

    /// Nigeria's 36 states plus the FCT.
    pub fn nigeria() -> Self {
        Self::new(NIGERIA_STATES.to_vec())
    }

    #[cfg(test)]
    pub fn regions(&self) -> &[RegionPoint] {
        &self.regions
    }

    pub fn validate(&self) -> Result<(), RegionTableError> {
        if self.regions.is_empty() {
            return Err(RegionTableError::Empty);
        }

        let mut seen = BTreeSet::new();
        for (idx, region) in self.regions.iter().enumerate() {
            if region.name.trim().is_empty() {
                return Err(RegionTableError::BlankName(idx));
            }
            for key in std::iter::once(region.name).chain(region.alias) {
                if !seen.insert(key.to_lowercase()) {
                    return Err(RegionTableError::DuplicateKey(key.to_string()));
                }
            }
            if !(-90.0..=90.0).contains(&region.lat) || !(-180.0..=180.0).contains(&region.lng) {
                return Err(RegionTableError::OutOfRange {
                    name: region.name.to_string(),
                    lat: region.lat,
                    lng: region.lng,
                });
            }
        }
        Ok(())
    }

    /// Markers for every known region with a positive count, in table order.
    pub fn markers(&self, counts: &RegionCounts) -> Vec<MarkerSpec> {
        self.regions
            .iter()
            .filter_map(|region| {
                let count = region.count_in(counts);
                (count > 0).then(|| MarkerSpec {
                    region: region.name,
                    lat: region.lat,
                    lng: region.lng,
                    count,
                })
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkerSpec {
    pub region: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub count: u64,
}

impl MarkerSpec {
    pub fn label(&self) -> String {
        self.count.to_string()
    }

    pub fn popup(&self) -> String {
        format!("<b>{}</b>: {}", self.region, self.count)
    }

    pub fn icon_options(&self) -> Value {
        json!({
            "className": "map-count-marker",
            "html": format!("<span>{}</span>", self.label()),
            "iconSize": [32, 32],
        })
    }
}

pub trait MapBackend {
    type Handle;

    /// New map on `container` with its base tile layer.
    fn create(&mut self, container_id: &str, viewport: &Viewport) -> Result<Self::Handle, RenderError>;

    fn add_marker(&mut self, map: &Self::Handle, marker: &MarkerSpec) -> Result<(), RenderError>;

    fn destroy(&mut self, map: Self::Handle);
}

/// Owns the single live map of one container.
pub struct MapSlot<B: MapBackend> {
    container_id: &'static str,
    viewport: Viewport,
    table: RegionTable,
    backend: B,
    live: Option<B::Handle>,
    markers: Vec<MarkerSpec>,
}

impl<B: MapBackend> MapSlot<B> {
    pub fn new(container_id: &'static str, table: RegionTable, backend: B) -> Self {
        Self {
            container_id,
            viewport: Viewport::default(),
            table,
            backend,
            live: None,
            markers: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    #[cfg(test)]
    pub fn markers(&self) -> &[MarkerSpec] {
        &self.markers
    }

    pub fn render(&mut self, counts: &RegionCounts) -> Result<usize, RenderError> {
        self.clear();

        let map = self.backend.create(self.container_id, &self.viewport)?;
        let markers = self.table.markers(counts);
        for marker in &markers {
            if let Err(err) = self.backend.add_marker(&map, marker) {
                self.backend.destroy(map);
                return Err(err);
            }
        }

        self.live = Some(map);
        self.markers = markers;
        Ok(self.markers.len())
    }

    pub fn clear(&mut self) {
        if let Some(map) = self.live.take() {
            self.backend.destroy(map);
        }
        self.markers.clear();
    }
}

impl<B: MapBackend> Drop for MapSlot<B> {
    fn drop(&mut self) {
        self.clear();
    }
}

const NIGERIA_STATES: [RegionPoint; 37] = [
    RegionPoint::new("Abia", 5.4527, 7.5248),
    RegionPoint::new("Adamawa", 9.3265, 12.3984),
    RegionPoint::new("Akwa Ibom", 5.0077, 7.8497),
    RegionPoint::new("Anambra", 6.2209, 6.9370),
    RegionPoint::new("Bauchi", 10.3158, 9.8442),
    RegionPoint::new("Bayelsa", 4.7719, 6.0699),
    RegionPoint::new("Benue", 7.3369, 8.7404),
    RegionPoint::new("Borno", 11.8846, 13.1510),
    RegionPoint::new("Cross River", 5.8702, 8.5988),
    RegionPoint::new("Delta", 5.7040, 5.9339),
    RegionPoint::new("Ebonyi", 6.2649, 8.0137),
    RegionPoint::new("Edo", 6.6342, 5.9304),
    RegionPoint::new("Ekiti", 7.7190, 5.3110),
    RegionPoint::new("Enugu", 6.5364, 7.4356),
    RegionPoint::aliased("Federal Capital Territory", "FCT", 8.8941, 7.1860),
    RegionPoint::new("Gombe", 10.3638, 11.1928),
    RegionPoint::new("Imo", 5.5720, 7.0588),
    RegionPoint::new("Jigawa", 12.2280, 9.5616),
    RegionPoint::new("Kaduna", 10.3764, 7.7095),
    RegionPoint::new("Kano", 11.7471, 8.5247),
    RegionPoint::new("Katsina", 12.3797, 7.6306),
    RegionPoint::new("Kebbi", 11.4942, 4.2333),
    RegionPoint::new("Kogi", 7.7337, 6.6906),
    RegionPoint::new("Kwara", 8.9669, 4.3874),
    RegionPoint::new("Lagos", 6.5244, 3.3792),
    RegionPoint::new("Nasarawa", 8.4998, 8.1997),
    RegionPoint::new("Niger", 9.9309, 5.5983),
    RegionPoint::new("Ogun", 6.9980, 3.4737),
    RegionPoint::new("Ondo", 6.9149, 5.1478),
    RegionPoint::new("Osun", 7.5629, 4.5200),
    RegionPoint::new("Oyo", 8.1574, 3.6147),
    RegionPoint::new("Plateau", 9.2182, 9.5179),
    RegionPoint::new("Rivers", 4.8396, 6.9112),
    RegionPoint::new("Sokoto", 13.0059, 5.2476),
    RegionPoint::new("Taraba", 7.9994, 10.7740),
    RegionPoint::new("Yobe", 12.2939, 11.4390),
    RegionPoint::new("Zamfara", 12.1222, 6.2236),
];

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Clone, Default)]
    struct RecordingMap {
        live_maps: Rc<RefCell<usize>>,
        markers: Rc<RefCell<Vec<(String, String)>>>,
    }

    impl MapBackend for RecordingMap {
        type Handle = ();

        fn create(&mut self, _container_id: &str, _viewport: &Viewport) -> Result<(), RenderError> {
            *self.live_maps.borrow_mut() += 1;
            self.markers.borrow_mut().clear();
            Ok(())
        }

        fn add_marker(&mut self, _map: &(), marker: &MarkerSpec) -> Result<(), RenderError> {
            self.markers
                .borrow_mut()
                .push((marker.region.to_string(), marker.label()));
            Ok(())
        }

        fn destroy(&mut self, _map: ()) {
            *self.live_maps.borrow_mut() -= 1;
        }
    }

    fn counts(pairs: &[(&str, u64)]) -> RegionCounts {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn default_table_is_valid() {
        let table = RegionTable::nigeria();
        assert_eq!(table.regions().len(), 37);
        table.validate().unwrap();
    }

    #[test]
    fn validation_catches_duplicates_and_ranges() {
        let duplicate = RegionTable::new(vec![
            RegionPoint::new("Lagos", 6.5, 3.4),
            RegionPoint::aliased("Lagos State", "lagos", 6.5, 3.4),
        ]);
        assert_eq!(
            duplicate.validate(),
            Err(RegionTableError::DuplicateKey("lagos".into()))
        );

        let off_planet = RegionTable::new(vec![RegionPoint::new("Nowhere", 91.0, 0.0)]);
        assert!(matches!(
            off_planet.validate(),
            Err(RegionTableError::OutOfRange { .. })
        ));

        assert_eq!(RegionTable::new(Vec::new()).validate(), Err(RegionTableError::Empty));
    }

    #[test]
    fn markers_only_for_positive_counts() {
        let markers = RegionTable::nigeria().markers(&counts(&[
            ("Lagos", 14),
            ("Kano", 0),
            ("Atlantis", 99),
        ]));
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].region, "Lagos");
        assert_eq!(markers[0].label(), "14");
    }

    #[test]
    fn aliased_region_uses_exact_count() {
        let markers = RegionTable::nigeria().markers(&counts(&[("FCT", 1_207)]));
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].region, "Federal Capital Territory");
        assert_eq!(markers[0].count, 1_207);
        assert_eq!(markers[0].popup(), "<b>Federal Capital Territory</b>: 1207");
    }

    #[test]
    fn primary_name_wins_over_alias() {
        let markers = RegionTable::nigeria().markers(&counts(&[
            ("Federal Capital Territory", 3),
            ("FCT", 8),
        ]));
        assert_eq!(markers[0].count, 3);
    }

    #[test]
    fn rerender_rebuilds_a_single_map() {
        let backend = RecordingMap::default();
        let mut slot = MapSlot::new("map", RegionTable::nigeria(), backend.clone());

        assert_eq!(slot.render(&counts(&[("Lagos", 2), ("Oyo", 5)])).unwrap(), 2);
        assert_eq!(slot.render(&counts(&[("Oyo", 6)])).unwrap(), 1);

        assert_eq!(*backend.live_maps.borrow(), 1);
        assert_eq!(
            backend.markers.borrow().as_slice(),
            [("Oyo".to_string(), "6".to_string())]
        );
        assert_eq!(slot.markers()[0].count, 6);
    }
}
