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
use lifecycle::VehicleSelection;

/// Parameters for `/cars/match`. Unset fields are left out of the request and the
/// server matches on whatever is given.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MatchQuery {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<u32>
}

impl MatchQuery {
    pub fn new(make: Option<&str>, model: Option<&str>, year: Option<u32>) -> MatchQuery {
        MatchQuery {
            make: make.filter(|s| !s.is_empty()).map(str::to_string),
            model: model.filter(|s| !s.is_empty()).map(str::to_string),
            year
        }
    }

    pub fn is_empty(&self) -> bool {
        self.make.is_none() && self.model.is_none() && self.year.is_none()
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(make) = &self.make {
            pairs.push(("make", make.clone()));
        }
        if let Some(model) = &self.model {
            pairs.push(("model", model.clone()));
        }
        if let Some(year) = self.year {
            pairs.push(("year", year.to_string()));
        }
        pairs
    }
}

impl From<&VehicleSelection> for MatchQuery {
    fn from(selection: &VehicleSelection) -> Self {
        MatchQuery::new(selection.make(), selection.model(), selection.year())
    }
}

impl Display for MatchQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "any vehicle");
        }
        let parts: Vec<String> = self.query_pairs().into_iter()
            .map(|(key, val)| format!("{}={}", key, val))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use lifecycle::{Catalog, VehicleRecord, VehicleSelection};
    use crate::query::MatchQuery;

    #[test]
    fn only_set_fields_are_sent() {
        let query = MatchQuery::new(Some("Tesla"), None, Some(2022));
        assert_eq!(query.query_pairs(), vec![("make", "Tesla".to_string()), ("year", "2022".to_string())]);
        assert_eq!(query.to_string(), "make=Tesla, year=2022");

        let query = MatchQuery::new(Some(""), Some(""), None);
        assert!(query.is_empty());
        assert!(query.query_pairs().is_empty());
        assert_eq!(query.to_string(), "any vehicle");
    }

    #[test]
    fn from_selection() {
        let catalog = Catalog::new(vec![VehicleRecord {
            make: "Kia".to_string(),
            model: "EV6".to_string(),
            model_year: Some(2023),
            ..Default::default()
        }]);
        let selection = VehicleSelection::new()
            .with_make(Some("Kia".to_string()), &catalog)
            .with_model(Some("EV6".to_string()), &catalog);
        let query = MatchQuery::from(&selection);
        assert_eq!(query, MatchQuery::new(Some("Kia"), Some("EV6"), None));
    }
}
