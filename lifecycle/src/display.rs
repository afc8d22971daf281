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


//! Text shown for records and comparisons. Anything missing is rendered as
//! [`PLACEHOLDER`] rather than treated as an error.

use crate::comparison::ComparisonResult;
use crate::record::{Metric, VehicleRecord};
use crate::selection::Side;
use utils::numeric::{round_float_to, round_half_away_to};

pub const PLACEHOLDER: &str = "—";

pub fn format_metric(value: Option<f64>, digits: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}", digits, round_half_away_to(v, digits as u32)),
        _ => PLACEHOLDER.to_string()
    }
}

fn with_unit(metric: Metric, unit: &str) -> String {
    match metric.value() {
        None => PLACEHOLDER.to_string(),
        Some(v) => format!("{}{}", format_metric(Some(v), 1), unit)
    }
}

fn tons(value: Option<f64>) -> String {
    match value {
        None => PLACEHOLDER.to_string(),
        Some(v) => format!("{}t CO₂", format_metric(Some(v), 1))
    }
}

fn trees(metric: Metric) -> String {
    match metric.value() {
        None => format!("{} Trees", PLACEHOLDER),
        Some(v) => format!("{} Trees", v.round())
    }
}

fn breakeven_years(metric: Metric) -> String {
    match metric.value() {
        None => PLACEHOLDER.to_string(),
        Some(v) => format!("{} Years", format_metric(Some(v), 1))
    }
}

fn fuel_efficiency(record: &VehicleRecord) -> String {
    match &record.fuel_efficiency {
        None => PLACEHOLDER.to_string(),
        Some(eff) => eff.to_string()
    }
}

pub fn fuel_type(record: &VehicleRecord) -> &'static str {
    if record.is_electric() { "Electric / BEV" } else { "ICE" }
}

/// "4.7" style savings figure or the placeholder
pub fn savings(result: &ComparisonResult) -> String {
    format_metric(result.savings_tons, 1)
}

pub fn headline(result: &ComparisonResult) -> String {
    format!("{} saves {} tons CO₂ over 10 years", result.winner, savings(result))
}

pub fn trees_saved(result: &ComparisonResult) -> String {
    match result.annual_trees_saved {
        None => PLACEHOLDER.to_string(),
        Some(n) => format!("{} Trees", n)
    }
}

pub fn daily_distance_note(daily_distance_km: Option<f64>) -> Option<String> {
    daily_distance_km.map(|km| format!("Based on your input of {} km driven per day.", round_float_to(km, 1)))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecRow {
    pub label: &'static str,
    pub a: String,
    pub b: String
}

impl SpecRow {
    fn new(label: &'static str, a: String, b: String) -> SpecRow {
        SpecRow { label, a, b }
    }

    fn per_vehicle<F>(label: &'static str, vehicle_a: &VehicleRecord, vehicle_b: &VehicleRecord, f: F) -> SpecRow
        where F: Fn(&VehicleRecord) -> String
    {
        SpecRow::new(label, f(vehicle_a), f(vehicle_b))
    }
}

/// Rows of the side by side comparison table
pub fn spec_rows(vehicle_a: &VehicleRecord, vehicle_b: &VehicleRecord, result: &ComparisonResult) -> Vec<SpecRow> {
    vec![
        SpecRow::new("Vehicle", vehicle_a.title(Side::A.as_str()), vehicle_b.title(Side::B.as_str())),
        SpecRow::new("Total Lifecycle Emissions", tons(result.total_a), tons(result.total_b)),
        SpecRow::per_vehicle("Annual Average Emissions", vehicle_a, vehicle_b, |v| tons(v.annual_avg_tons.value())),
        SpecRow::per_vehicle("Long-Term Carbon Impact (10 years)", vehicle_a, vehicle_b, |v| tons(v.ten_year_op_tons.value())),
        SpecRow::per_vehicle("Front Carbon Cost (Manufacturing)", vehicle_a, vehicle_b, |v| tons(v.manufacturing_emission.value())),
        SpecRow::per_vehicle("Disposal Emissions", vehicle_a, vehicle_b, |v| tons(v.disposal_emission.value())),
        SpecRow::per_vehicle("Tailpipe CO₂", vehicle_a, vehicle_b, |v| with_unit(v.tailpipe_co2, " g/km")),
        SpecRow::per_vehicle("Fuel Efficiency", vehicle_a, vehicle_b, fuel_efficiency),
        SpecRow::per_vehicle("Grid 100 MI", vehicle_a, vehicle_b, |v| with_unit(v.grid_100mi, " kg")),
        SpecRow::per_vehicle("Trees Needed (Lifetime Offset)", vehicle_a, vehicle_b, |v| trees(v.trees_needed)),
        SpecRow::per_vehicle("Breakeven Year", vehicle_a, vehicle_b, |v| breakeven_years(v.breakeven_year)),
        SpecRow::per_vehicle("Fuel Type", vehicle_a, vehicle_b, |v| fuel_type(v).to_string()),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
    pub unit: &'static str,
    pub subtitle: &'static str
}

impl StatCard {
    fn new(label: &'static str, value: String, unit: &'static str, subtitle: &'static str) -> StatCard {
        StatCard { label, value, unit, subtitle }
    }
}

/// The figures shown on the single vehicle details view
pub fn stat_cards(record: &VehicleRecord) -> Vec<StatCard> {
    let efficiency = record.fuel_efficiency.as_ref()
        .and_then(|eff| eff.leading_figure())
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    let trees = record.trees_needed.value()
        .map(|v| format!("{}", v.round()))
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    vec![
        StatCard::new("Total Lifecycle", format_metric(record.total_lifecycle_tons.value(), 1), "tons", "Cradle-to-grave CO2e"),
        StatCard::new("Annual Avg", format_metric(record.annual_avg_tons.value(), 1), "tons/yr", "Average per year of ownership"),
        StatCard::new("10-Year Operational", format_metric(record.ten_year_op_tons.value(), 1), "tons", "Projected usage"),
        StatCard::new("Fuel Efficiency", efficiency, "MPGe", "Combined city/hwy"),
        StatCard::new("Breakeven Year", format_metric(record.breakeven_year.value(), 1), "years", "Vs. ICE equivalent"),
        StatCard::new("Trees Needed", trees, "units", "To offset lifetime"),
        StatCard::new("Tailpipe CO2", format_metric(record.tailpipe_co2.value(), 1), "g/km", "Direct emissions"),
        StatCard::new("Manufacturing", format_metric(record.manufacturing_emission.value(), 1), "tons", "Production impact"),
        StatCard::new("Disposal Emission", format_metric(record.disposal_emission.value(), 1), "tons", "End of life impact"),
        StatCard::new("Grid 100 MI", format_metric(record.grid_100mi.value(), 1), "kg", "Regional avg energy"),
    ]
}

/// Plain text version of the result view for pasting elsewhere
pub fn comparison_summary(vehicle_a: &VehicleRecord,
                          vehicle_b: &VehicleRecord,
                          result: &ComparisonResult,
                          daily_distance_km: Option<f64>) -> String {
    let mut out = String::new();
    out.push_str("Lifecycle Impact Comparison\n");
    out.push_str(&headline(result));
    out.push('\n');
    if let Some(note) = daily_distance_note(daily_distance_km) {
        out.push_str(&note);
        out.push('\n');
    }
    out.push('\n');
    for row in spec_rows(vehicle_a, vehicle_b, result) {
        out.push_str(&format!("{}: {} | {}\n", row.label, row.a, row.b));
    }
    out.push('\n');
    for split in result.stages.iter() {
        out.push_str(&format!("{}: {}% | {}%\n", split.stage, split.a_percent, split.b_percent));
    }
    out.push_str(&format!("Greenwash risk (Vehicle A): {}\n", vehicle_a.risk().as_str().to_uppercase()));
    out.push_str(&format!("Trees saved annually: {}\n", trees_saved(result)));
    out
}
