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


use itertools::Itertools;
use crate::record::VehicleRecord;

/// The upstream choices that narrow the option lists. Matching is exact.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CatalogFilters<'a> {
    pub make: Option<&'a str>,
    pub model: Option<&'a str>
}

impl<'a> CatalogFilters<'a> {
    pub fn none() -> CatalogFilters<'a> {
        CatalogFilters::default()
    }

    pub fn make(make: &'a str) -> CatalogFilters<'a> {
        CatalogFilters { make: Some(make), model: None }
    }

    pub fn make_and_model(make: &'a str, model: &'a str) -> CatalogFilters<'a> {
        CatalogFilters { make: Some(make), model: Some(model) }
    }

    fn matches_make(&self, record: &VehicleRecord) -> bool {
        self.make.map_or(true, |make| record.make == make)
    }

    fn matches_model(&self, record: &VehicleRecord) -> bool {
        self.model.map_or(true, |model| record.model == model)
    }
}

/// Sorted, duplicate free option lists for the make, model and year drop-downs
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CatalogIndex {
    pub makes: Vec<String>,
    pub models: Vec<String>,
    pub years: Vec<u32>
}

impl CatalogIndex {
    pub fn has_make(&self, make: &str) -> bool {
        self.makes.binary_search_by(|m| m.as_str().cmp(make)).is_ok()
    }

    pub fn has_model(&self, model: &str) -> bool {
        self.models.binary_search_by(|m| m.as_str().cmp(model)).is_ok()
    }

    pub fn has_year(&self, year: u32) -> bool {
        self.years.binary_search(&year).is_ok()
    }
}

/// Projects the full vehicle list onto the make, model and year options that are
/// still compatible with `filters`.
///
/// Makes always come from the whole list. Models are narrowed by make and years by
/// make and model. Records with an empty make/model or no year don't produce an
/// option for that field.
pub fn derive_options(records: &[VehicleRecord], filters: &CatalogFilters) -> CatalogIndex {
    let makes = records.iter()
        .map(|r| r.make.as_str())
        .filter(|make| !make.is_empty())
        .sorted()
        .dedup()
        .map(str::to_string)
        .collect();

    let models = records.iter()
        .filter(|r| filters.matches_make(r))
        .map(|r| r.model.as_str())
        .filter(|model| !model.is_empty())
        .sorted()
        .dedup()
        .map(str::to_string)
        .collect();

    let years = records.iter()
        .filter(|r| filters.matches_make(r) && filters.matches_model(r))
        .filter_map(|r| r.model_year)
        .sorted()
        .dedup()
        .collect();

    CatalogIndex { makes, models, years }
}

/// The full vehicle list as fetched from `/cars`
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Catalog {
    records: Vec<VehicleRecord>
}

impl Catalog {
    pub fn new(records: Vec<VehicleRecord>) -> Catalog {
        Catalog { records }
    }

    pub fn records(&self) -> &[VehicleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn options(&self, filters: &CatalogFilters) -> CatalogIndex {
        derive_options(&self.records, filters)
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::{derive_options, CatalogFilters};
    use crate::record::VehicleRecord;

    fn car(make: &str, model: &str, year: u32) -> VehicleRecord {
        VehicleRecord {
            make: make.to_string(),
            model: model.to_string(),
            model_year: Some(year),
            ..Default::default()
        }
    }

    fn sample_list() -> Vec<VehicleRecord> {
        vec![
            car("Tesla", "Model Y", 2023),
            car("Ford", "Mustang Mach-E", 2022),
            car("Tesla", "Model 3", 2022),
            car("Tesla", "Model 3", 2021),
            car("BMW", "i4", 2023),
            car("Ford", "F-150", 2019),
            car("Tesla", "Model 3", 2022),
            car("Ford", "F-150", 2021),
        ]
    }

    fn is_strictly_ascending<T: Ord>(items: &[T]) -> bool {
        items.windows(2).all(|w| w[0] < w[1])
    }

    #[test]
    fn empty_list_has_no_options() {
        let index = derive_options(&[], &CatalogFilters::none());
        assert!(index.makes.is_empty());
        assert!(index.models.is_empty());
        assert!(index.years.is_empty());

        let index = derive_options(&[], &CatalogFilters::make_and_model("Tesla", "Model 3"));
        assert!(index.makes.is_empty());
        assert!(index.years.is_empty());
    }

    #[test]
    fn unfiltered_options() {
        let index = derive_options(&sample_list(), &CatalogFilters::none());
        assert_eq!(index.makes, vec!["BMW", "Ford", "Tesla"]);
        assert_eq!(index.models, vec!["F-150", "Model 3", "Model Y", "Mustang Mach-E", "i4"]);
        assert_eq!(index.years, vec![2019, 2021, 2022, 2023]);
        assert!(is_strictly_ascending(&index.makes));
        assert!(is_strictly_ascending(&index.models));
        assert!(is_strictly_ascending(&index.years));
    }

    #[test]
    fn make_narrows_models_and_years() {
        let list = sample_list();
        let all = derive_options(&list, &CatalogFilters::none());
        let tesla = derive_options(&list, &CatalogFilters::make("Tesla"));
        assert_eq!(tesla.makes, all.makes);
        assert_eq!(tesla.models, vec!["Model 3", "Model Y"]);
        assert_eq!(tesla.years, vec![2021, 2022, 2023]);
        for make in &all.makes {
            let narrowed = derive_options(&list, &CatalogFilters::make(make));
            assert!(narrowed.models.len() <= all.models.len());
            assert!(narrowed.years.len() <= all.years.len());
        }
    }

    #[test]
    fn make_and_model_narrow_years() {
        let index = derive_options(&sample_list(), &CatalogFilters::make_and_model("Tesla", "Model 3"));
        assert_eq!(index.years, vec![2021, 2022]);
        let index = derive_options(&sample_list(), &CatalogFilters::make_and_model("Ford", "F-150"));
        assert_eq!(index.years, vec![2019, 2021]);
    }

    #[test]
    fn unmatched_filter_empties_downstream() {
        let index = derive_options(&sample_list(), &CatalogFilters::make("Lada"));
        assert_eq!(index.makes.len(), 3);
        assert!(index.models.is_empty());
        assert!(index.years.is_empty());

        let index = derive_options(&sample_list(), &CatalogFilters::make_and_model("BMW", "Model 3"));
        assert_eq!(index.models, vec!["i4"]);
        assert!(index.years.is_empty());
    }

    #[test]
    fn matching_is_case_sensitive() {
        let index = derive_options(&sample_list(), &CatalogFilters::make("tesla"));
        assert!(index.models.is_empty());
    }

    #[test]
    fn model_only_filter() {
        let filters = CatalogFilters { make: None, model: Some("F-150") };
        let index = derive_options(&sample_list(), &filters);
        assert_eq!(index.models.len(), 5);
        assert_eq!(index.years, vec![2019, 2021]);
    }

    #[test]
    fn blank_fields_are_skipped() {
        let mut list = sample_list();
        list.push(VehicleRecord::default());
        let index = derive_options(&list, &CatalogFilters::none());
        assert_eq!(index.makes, vec!["BMW", "Ford", "Tesla"]);
        assert!(index.has_make("Ford"));
        assert!(!index.has_make(""));
        assert!(index.has_model("i4"));
        assert!(index.has_year(2019));
        assert!(!index.has_year(2020));
    }
}
