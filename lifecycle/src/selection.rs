/*
 * Copyright (c):
 * 2025 zephyrj
 * zephyrj@protonmail.com
 *
 * This file is part of eco-compare.
 *
 * eco-compare is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * eco-compare is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with eco-compare. If not, see <https://www.gnu.org/licenses/>.
 */


use std::fmt::{Display, Formatter};
use utils::numeric::parse_non_negative;
use crate::catalog::{Catalog, CatalogFilters, CatalogIndex};
use crate::record::vehicle_label;

pub const NO_SELECTION_ADVISORY: &str = "Select details for both Vehicle A and Vehicle B, then click Compare Now.";

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Side {
    A,
    B
}

impl Side {
    pub fn all_options() -> [Side; 2] {
        [Side::A, Side::B]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::A => "Vehicle A",
            Side::B => "Vehicle B"
        }
    }

    pub fn other(&self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The make/model/year chosen for one vehicle.
///
/// Every transition returns a new value that has already been reconciled against the
/// catalog, so a model that doesn't belong to the chosen make (or a year that doesn't
/// belong to the chosen make and model) never survives a change upstream of it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VehicleSelection {
    make: Option<String>,
    model: Option<String>,
    year: Option<u32>
}

impl VehicleSelection {
    pub fn new() -> VehicleSelection {
        VehicleSelection::default()
    }

    /// A selection taken as-is, e.g. restored from a previous session. Run it through
    /// [`VehicleSelection::reconciled`] once a catalog is available.
    pub fn from_parts(make: Option<String>, model: Option<String>, year: Option<u32>) -> VehicleSelection {
        VehicleSelection {
            make: non_blank(make),
            model: non_blank(model),
            year
        }
    }

    pub fn make(&self) -> Option<&str> {
        self.make.as_deref()
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn year(&self) -> Option<u32> {
        self.year
    }

    pub fn is_empty(&self) -> bool {
        self.make.is_none() && self.model.is_none() && self.year.is_none()
    }

    pub fn filters(&self) -> CatalogFilters<'_> {
        CatalogFilters {
            make: self.make(),
            model: self.model()
        }
    }

    /// Option lists for this selection's drop-downs
    pub fn options(&self, catalog: &Catalog) -> CatalogIndex {
        catalog.options(&self.filters())
    }

    pub fn with_make(self, make: Option<String>, catalog: &Catalog) -> VehicleSelection {
        VehicleSelection { make: non_blank(make), ..self }.reconciled(catalog)
    }

    pub fn with_model(self, model: Option<String>, catalog: &Catalog) -> VehicleSelection {
        VehicleSelection { model: non_blank(model), ..self }.reconciled(catalog)
    }

    pub fn with_year(self, year: Option<u32>, catalog: &Catalog) -> VehicleSelection {
        VehicleSelection { year, ..self }.reconciled(catalog)
    }

    pub fn cleared(self) -> VehicleSelection {
        VehicleSelection::new()
    }

    /// Drops any choice that is no longer offered given the choices upstream of it.
    /// Dropping a make also drops the model and year, dropping a model also drops the year.
    ///
    /// An empty catalog means the list hasn't been loaded yet, in which case the
    /// selection is kept untouched until there is something to check it against.
    pub fn reconciled(self, catalog: &Catalog) -> VehicleSelection {
        if catalog.is_empty() {
            return self;
        }
        let mut selection = self;

        let index = catalog.options(&CatalogFilters::none());
        if let Some(make) = &selection.make {
            if !index.has_make(make) {
                return VehicleSelection::new();
            }
        }

        let index = catalog.options(&CatalogFilters { make: selection.make(), model: None });
        if let Some(model) = &selection.model {
            if !index.has_model(model) {
                selection.model = None;
                selection.year = None;
                return selection;
            }
        }

        let index = catalog.options(&selection.filters());
        if let Some(year) = selection.year {
            if !index.has_year(year) {
                selection.year = None;
            }
        }
        selection
    }

    pub fn label(&self, side: Side) -> String {
        vehicle_label(self.make().unwrap_or(""), self.model().unwrap_or(""), self.year, side.as_str())
    }
}

/// A validated request to look up both vehicles
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRequest {
    pub vehicle_a: VehicleSelection,
    pub vehicle_b: VehicleSelection,
    pub daily_distance_km: Option<f64>,
    pub generation: u64
}

/// Everything the compare view holds between user actions
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CompareSession {
    vehicle_a: VehicleSelection,
    vehicle_b: VehicleSelection,
    daily_distance_input: String,
    generation: u64
}

impl CompareSession {
    pub fn new() -> CompareSession {
        CompareSession::default()
    }

    pub fn side(&self, side: Side) -> &VehicleSelection {
        match side {
            Side::A => &self.vehicle_a,
            Side::B => &self.vehicle_b
        }
    }

    pub fn with_side(self, side: Side, selection: VehicleSelection) -> CompareSession {
        match side {
            Side::A => CompareSession { vehicle_a: selection, ..self },
            Side::B => CompareSession { vehicle_b: selection, ..self }
        }
    }

    /// Applies `f` to one side's selection
    pub fn map_side<F>(self, side: Side, f: F) -> CompareSession
        where F: FnOnce(VehicleSelection) -> VehicleSelection
    {
        let selection = f(self.side(side).clone());
        self.with_side(side, selection)
    }

    pub fn reconciled(self, catalog: &Catalog) -> CompareSession {
        CompareSession {
            vehicle_a: self.vehicle_a.reconciled(catalog),
            vehicle_b: self.vehicle_b.reconciled(catalog),
            ..self
        }
    }

    pub fn daily_distance_input(&self) -> &str {
        &self.daily_distance_input
    }

    pub fn with_daily_distance_input(self, input: String) -> CompareSession {
        CompareSession { daily_distance_input: input, ..self }
    }

    /// The parsed daily distance, `Ok(None)` when nothing has been entered
    pub fn daily_distance_km(&self) -> Result<Option<f64>, String> {
        parse_non_negative(&self.daily_distance_input)
            .map_err(|e| format!("Daily distance {}", e))
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a response for `generation` still belongs to the latest request
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Checks the session is ready to compare and, if so, starts a new request
    /// generation so responses to earlier requests can be recognised and dropped.
    pub fn begin_request(self) -> Result<(CompareSession, ComparisonRequest), String> {
        if self.vehicle_a.is_empty() || self.vehicle_b.is_empty() {
            return Err(NO_SELECTION_ADVISORY.to_string());
        }
        let daily_distance_km = self.daily_distance_km()?;
        let next = CompareSession { generation: self.generation + 1, ..self };
        let request = ComparisonRequest {
            vehicle_a: next.vehicle_a.clone(),
            vehicle_b: next.vehicle_b.clone(),
            daily_distance_km,
            generation: next.generation
        };
        Ok((next, request))
    }
}

fn non_blank(val: Option<String>) -> Option<String> {
    val.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use crate::catalog::Catalog;
    use crate::record::VehicleRecord;
    use crate::selection::{CompareSession, Side, VehicleSelection, NO_SELECTION_ADVISORY};

    fn car(make: &str, model: &str, year: u32) -> VehicleRecord {
        VehicleRecord {
            make: make.to_string(),
            model: model.to_string(),
            model_year: Some(year),
            ..Default::default()
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            car("Tesla", "Model 3", 2021),
            car("Tesla", "Model 3", 2022),
            car("Tesla", "Model Y", 2023),
            car("Ford", "F-150", 2019),
            car("Ford", "Mustang Mach-E", 2022),
        ])
    }

    fn tesla_model_3_2022(catalog: &Catalog) -> VehicleSelection {
        VehicleSelection::new()
            .with_make(Some("Tesla".to_string()), catalog)
            .with_model(Some("Model 3".to_string()), catalog)
            .with_year(Some(2022), catalog)
    }

    #[test]
    fn full_selection_survives() {
        let catalog = catalog();
        let selection = tesla_model_3_2022(&catalog);
        assert_eq!(selection.make(), Some("Tesla"));
        assert_eq!(selection.model(), Some("Model 3"));
        assert_eq!(selection.year(), Some(2022));
        assert_eq!(selection.label(Side::A), "Tesla Model 3 (2022)");
    }

    #[test]
    fn changing_make_resets_model_and_year() {
        let catalog = catalog();
        let selection = tesla_model_3_2022(&catalog)
            .with_make(Some("Ford".to_string()), &catalog);
        assert_eq!(selection.make(), Some("Ford"));
        assert_eq!(selection.model(), None);
        assert_eq!(selection.year(), None);
        assert_eq!(selection.options(&catalog).models, vec!["F-150", "Mustang Mach-E"]);
    }

    #[test]
    fn changing_model_keeps_compatible_year() {
        let catalog = catalog();
        let selection = VehicleSelection::new()
            .with_make(Some("Ford".to_string()), &catalog)
            .with_year(Some(2022), &catalog)
            .with_model(Some("Mustang Mach-E".to_string()), &catalog);
        assert_eq!(selection.year(), Some(2022));

        let selection = selection.with_model(Some("F-150".to_string()), &catalog);
        assert_eq!(selection.year(), None);
    }

    #[test]
    fn unknown_choices_are_dropped() {
        let catalog = catalog();
        let selection = VehicleSelection::new()
            .with_make(Some("Tesla".to_string()), &catalog)
            .with_model(Some("F-150".to_string()), &catalog);
        assert_eq!(selection.model(), None);
        let selection = selection.with_year(Some(1999), &catalog);
        assert_eq!(selection.year(), None);
    }

    #[test]
    fn blank_choice_means_unset() {
        let catalog = catalog();
        let selection = tesla_model_3_2022(&catalog).with_make(Some("".to_string()), &catalog);
        assert_eq!(selection.make(), None);
        assert_eq!(selection.model(), Some("Model 3"));
        assert_eq!(selection.year(), Some(2022));
        assert_eq!(selection.label(Side::B), "Vehicle B Model 3 (2022)");
    }

    #[test]
    fn empty_catalog_keeps_selection() {
        let restored = VehicleSelection::from_parts(Some("Polestar".to_string()), Some("2".to_string()), Some(2020));
        let kept = restored.clone().reconciled(&Catalog::default());
        assert_eq!(kept, restored);

        let reloaded = restored.reconciled(&catalog());
        assert!(reloaded.is_empty());
    }

    #[test]
    fn dropped_make_clears_model_offered_elsewhere() {
        let restored = VehicleSelection::from_parts(Some("Polestar".to_string()),
                                                    Some("Model 3".to_string()),
                                                    Some(2022));
        let reloaded = restored.reconciled(&catalog());
        assert_eq!(reloaded.make(), None);
        assert_eq!(reloaded.model(), None);
        assert_eq!(reloaded.year(), None);
        assert!(reloaded.is_empty());
    }

    #[test]
    fn dropped_model_clears_year_offered_for_make() {
        let catalog = catalog();
        let selection = VehicleSelection::from_parts(Some("Ford".to_string()),
                                                     Some("Model 3".to_string()),
                                                     Some(2022))
            .reconciled(&catalog);
        assert_eq!(selection.make(), Some("Ford"));
        assert_eq!(selection.model(), None);
        assert_eq!(selection.year(), None);
    }

    #[test]
    fn session_requires_both_sides() {
        let catalog = catalog();
        let session = CompareSession::new()
            .with_side(Side::A, tesla_model_3_2022(&catalog));
        assert_eq!(session.clone().begin_request().unwrap_err(), NO_SELECTION_ADVISORY);

        let session = session.map_side(Side::B, |s| s.with_make(Some("Ford".to_string()), &catalog));
        let (next, request) = session.begin_request().unwrap();
        assert_eq!(request.generation, 1);
        assert_eq!(next.generation(), 1);
        assert_eq!(request.vehicle_b.make(), Some("Ford"));
        assert_eq!(request.daily_distance_km, None);
        assert!(next.is_current(1));
        assert!(!next.is_current(0));
    }

    #[test]
    fn daily_distance_is_validated() {
        let catalog = catalog();
        let session = CompareSession::new()
            .with_side(Side::A, tesla_model_3_2022(&catalog))
            .map_side(Side::B, |s| s.with_year(Some(2019), &catalog))
            .with_daily_distance_input("forty".to_string());
        assert!(session.clone().begin_request().is_err());

        let session = session.with_daily_distance_input("40".to_string());
        let (next, request) = session.begin_request().unwrap();
        assert_eq!(request.daily_distance_km, Some(40.0));
        let (_, request) = next.begin_request().unwrap();
        assert_eq!(request.generation, 2);
    }

    #[test]
    fn session_reconcile_applies_to_both_sides() {
        let catalog = catalog();
        let session = CompareSession::new()
            .with_side(Side::A, VehicleSelection::from_parts(Some("Tesla".to_string()), Some("F-150".to_string()), None))
            .with_side(Side::B, VehicleSelection::from_parts(Some("Ford".to_string()), None, Some(2023)))
            .reconciled(&catalog);
        assert_eq!(session.side(Side::A).model(), None);
        assert_eq!(session.side(Side::B).year(), None);
        assert_eq!(session.side(Side::B).make(), Some("Ford"));
        assert_eq!(Side::A.other(), Side::B);
    }
}
