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
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A numeric figure reported by the vehicle API.
///
/// The API is not strict about its types so a figure may arrive as a number, a numeric
/// string, `null` or not at all. Anything that can't be read as a finite number is
/// treated as absent rather than failing the whole record.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Metric(Option<f64>);

impl Metric {
    pub fn new(val: f64) -> Metric {
        Metric::from(val)
    }

    pub fn absent() -> Metric {
        Metric(None)
    }

    pub fn value(&self) -> Option<f64> {
        self.0
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    /// The value with absent figures counted as zero
    pub fn or_zero(&self) -> f64 {
        self.0.unwrap_or(0.0)
    }

    pub fn from_json(value: &Value) -> Metric {
        let parsed = match value {
            Value::Number(num) => num.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None
        };
        Metric(parsed.filter(|v| v.is_finite()))
    }
}

impl From<f64> for Metric {
    fn from(val: f64) -> Self {
        if val.is_finite() { Metric(Some(val)) } else { Metric(None) }
    }
}

impl From<Option<f64>> for Metric {
    fn from(val: Option<f64>) -> Self {
        match val {
            Some(v) => Metric::from(v),
            None => Metric(None)
        }
    }
}

impl<'de> Deserialize<'de> for Metric {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error> where D: Deserializer<'de> {
        let value = Value::deserialize(deserializer)?;
        Ok(Metric::from_json(&value))
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum GreenwashRisk {
    Low,
    Medium,
    High
}

impl GreenwashRisk {
    pub fn as_str(&self) -> &'static str {
        match self {
            GreenwashRisk::Low => "Low",
            GreenwashRisk::Medium => "Medium",
            GreenwashRisk::High => "High"
        }
    }

    pub fn from_str_lenient(val: &str) -> Option<GreenwashRisk> {
        match val.trim().to_ascii_lowercase().as_str() {
            "low" => Some(GreenwashRisk::Low),
            "medium" => Some(GreenwashRisk::Medium),
            "high" => Some(GreenwashRisk::High),
            _ => None
        }
    }
}

impl Default for GreenwashRisk {
    fn default() -> Self {
        GreenwashRisk::Low
    }
}

impl Display for GreenwashRisk {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fuel efficiency is either a ready made label like "124 MPGe" / "31.2 kWh/100mi"
/// or a bare MPGe figure.
#[derive(Debug, Clone, PartialEq)]
pub enum FuelEfficiency {
    Label(String),
    Value(f64)
}

impl FuelEfficiency {
    fn from_json(value: &Value) -> Option<FuelEfficiency> {
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(FuelEfficiency::Label(s.trim().to_string())),
            Value::Number(num) => num.as_f64().filter(|v| v.is_finite()).map(FuelEfficiency::Value),
            _ => None
        }
    }

    /// The first whole number found in the label, or the value itself
    pub fn leading_figure(&self) -> Option<String> {
        match self {
            FuelEfficiency::Value(v) => Some(format!("{}", v)),
            FuelEfficiency::Label(label) => {
                let digits: String = label.chars()
                    .skip_while(|c| !c.is_ascii_digit())
                    .take_while(|c| c.is_ascii_digit())
                    .collect();
                if digits.is_empty() { None } else { Some(digits) }
            }
        }
    }
}

impl Display for FuelEfficiency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FuelEfficiency::Label(label) => write!(f, "{}", label),
            FuelEfficiency::Value(v) => write!(f, "{} MPGe", v)
        }
    }
}

/// One vehicle as returned by the `/cars` and `/cars/match` endpoints
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct VehicleRecord {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub make: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub model: String,
    #[serde(default, deserialize_with = "deserialize_year")]
    pub model_year: Option<u32>,
    #[serde(default)]
    pub manufacturing_emission: Metric,
    #[serde(default)]
    pub ten_year_op_tons: Metric,
    #[serde(default)]
    pub disposal_emission: Metric,
    #[serde(default)]
    pub annual_avg_tons: Metric,
    #[serde(default)]
    pub total_lifecycle_tons: Metric,
    #[serde(default)]
    pub tailpipe_co2: Metric,
    #[serde(default, deserialize_with = "deserialize_fuel_efficiency")]
    pub fuel_efficiency: Option<FuelEfficiency>,
    #[serde(default)]
    pub grid_100mi: Metric,
    #[serde(default)]
    pub trees_needed: Metric,
    #[serde(default)]
    pub breakeven_year: Metric,
    #[serde(default, deserialize_with = "deserialize_risk")]
    pub greenwash_risk: Option<GreenwashRisk>,
}

impl VehicleRecord {
    /// "Make Model (Year)" using `fallback` when the make is unknown
    pub fn title(&self, fallback: &str) -> String {
        vehicle_label(&self.make, &self.model, self.model_year, fallback)
    }

    /// Greenwash risk with the API's omission shown as low risk
    pub fn risk(&self) -> GreenwashRisk {
        self.greenwash_risk.unwrap_or_default()
    }

    pub fn is_electric(&self) -> bool {
        self.tailpipe_co2.value() == Some(0.0)
    }

    /// Typical figures for a mid-size battery electric vehicle. Shown in place of a
    /// vehicle that couldn't be looked up so the details view still has something to
    /// lay out. Callers must make it clear to the user that this isn't real data.
    pub fn reference_sample(make: &str, model: &str, model_year: Option<u32>) -> VehicleRecord {
        VehicleRecord {
            id: None,
            make: make.to_string(),
            model: model.to_string(),
            model_year,
            manufacturing_emission: Metric::new(12.8),
            ten_year_op_tons: Metric::new(14.2),
            disposal_emission: Metric::new(1.4),
            annual_avg_tons: Metric::new(2.84),
            total_lifecycle_tons: Metric::new(28.4),
            tailpipe_co2: Metric::new(0.0),
            fuel_efficiency: Some(FuelEfficiency::Label("124 MPGe".to_string())),
            grid_100mi: Metric::new(16.8),
            trees_needed: Metric::new(210.0),
            breakeven_year: Metric::new(1.4),
            greenwash_risk: Some(GreenwashRisk::Low),
        }
    }
}

/// Builds "Make Model (Year)" skipping any part that isn't set. `fallback` stands in for
/// the make when it's empty.
pub fn vehicle_label(make: &str, model: &str, year: Option<u32>, fallback: &str) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(3);
    parts.push(if make.trim().is_empty() { fallback.to_string() } else { make.trim().to_string() });
    if !model.trim().is_empty() {
        parts.push(model.trim().to_string());
    }
    if let Some(y) = year {
        parts.push(format!("({})", y));
    }
    parts.join(" ").trim().to_string()
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error> where D: Deserializer<'de> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new()
    })
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error> where D: Deserializer<'de> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None
    })
}

fn deserialize_year<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error> where D: Deserializer<'de> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_u64().and_then(|y| u32::try_from(y).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None
    })
}

fn deserialize_fuel_efficiency<'de, D>(deserializer: D) -> Result<Option<FuelEfficiency>, D::Error> where D: Deserializer<'de> {
    let value = Value::deserialize(deserializer)?;
    Ok(FuelEfficiency::from_json(&value))
}

fn deserialize_risk<'de, D>(deserializer: D) -> Result<Option<GreenwashRisk>, D::Error> where D: Deserializer<'de> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => GreenwashRisk::from_str_lenient(&s),
        _ => None
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use crate::record::{FuelEfficiency, GreenwashRisk, Metric, VehicleRecord, vehicle_label};

    #[test]
    fn decode_full_record() {
        let raw = r#"{
            "make": "Tesla",
            "model": "Model 3",
            "model_year": 2022,
            "total_lifecycle_tons": 28.4,
            "annual_avg_tons": 2.84,
            "ten_year_op_tons": 14.2,
            "fuel_efficiency": "124 MPGe",
            "breakeven_year": 1.4,
            "trees_needed": 210,
            "tailpipe_co2": 0.0,
            "manufacturing_emission": 12.8,
            "disposal_emission": 1.4,
            "greenwash_risk": "Low",
            "grid_100mi": 16.8,
            "fuelType": "Electricity",
            "id": "Tesla-Model 3-2022-0"
        }"#;
        let record: VehicleRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.make, "Tesla");
        assert_eq!(record.model, "Model 3");
        assert_eq!(record.model_year, Some(2022));
        assert_eq!(record.ten_year_op_tons.value(), Some(14.2));
        assert_eq!(record.trees_needed.value(), Some(210.0));
        assert_eq!(record.fuel_efficiency, Some(FuelEfficiency::Label("124 MPGe".to_string())));
        assert_eq!(record.greenwash_risk, Some(GreenwashRisk::Low));
        assert_eq!(record.id.as_deref(), Some("Tesla-Model 3-2022-0"));
        assert!(record.is_electric());
    }

    #[test]
    fn decode_sparse_record() {
        let raw = r#"{
            "make": "Ford",
            "model": "F-150",
            "model_year": "2019",
            "ten_year_op_tons": "38.5",
            "manufacturing_emission": null,
            "breakeven_year": "n/a",
            "fuel_efficiency": 20,
            "greenwash_risk": "HIGH"
        }"#;
        let record: VehicleRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.model_year, Some(2019));
        assert_eq!(record.ten_year_op_tons.value(), Some(38.5));
        assert!(!record.manufacturing_emission.is_present());
        assert!(!record.breakeven_year.is_present());
        assert!(!record.disposal_emission.is_present());
        assert!(!record.tailpipe_co2.is_present());
        assert!(!record.is_electric());
        assert_eq!(record.fuel_efficiency, Some(FuelEfficiency::Value(20.0)));
        assert_eq!(record.risk(), GreenwashRisk::High);
    }

    #[test]
    fn decode_numeric_id_and_unknown_risk() {
        let record: VehicleRecord = serde_json::from_str(r#"{"id": 17, "greenwash_risk": "Extreme"}"#).unwrap();
        assert_eq!(record.id.as_deref(), Some("17"));
        assert_eq!(record.greenwash_risk, None);
        assert_eq!(record.risk(), GreenwashRisk::Low);
        assert_eq!(record.make, "");
        assert_eq!(record.model_year, None);
    }

    #[test]
    fn metric_from_json() {
        assert_eq!(Metric::from_json(&json!(3.5)).value(), Some(3.5));
        assert_eq!(Metric::from_json(&json!(" 7 ")).value(), Some(7.0));
        assert_eq!(Metric::from_json(&json!("")).value(), None);
        assert_eq!(Metric::from_json(&json!("seven")).value(), None);
        assert_eq!(Metric::from_json(&json!(null)).value(), None);
        assert_eq!(Metric::from_json(&json!("NaN")).value(), None);
        assert_eq!(Metric::from_json(&json!([1, 2])).value(), None);
        assert_eq!(Metric::from(f64::INFINITY).value(), None);
        assert_eq!(Metric::absent().or_zero(), 0.0);
    }

    #[test]
    fn fuel_efficiency_figures() {
        assert_eq!(FuelEfficiency::Label("124 MPGe".to_string()).leading_figure(), Some("124".to_string()));
        assert_eq!(FuelEfficiency::Label("28.5 kWh/100mi".to_string()).leading_figure(), Some("28".to_string()));
        assert_eq!(FuelEfficiency::Label("unknown".to_string()).leading_figure(), None);
        assert_eq!(FuelEfficiency::Value(97.0).leading_figure(), Some("97".to_string()));
        assert_eq!(format!("{}", FuelEfficiency::Value(97.0)), "97 MPGe");
    }

    #[test]
    fn labels() {
        assert_eq!(vehicle_label("Tesla", "Model 3", Some(2022), "Vehicle A"), "Tesla Model 3 (2022)");
        assert_eq!(vehicle_label("", "", None, "Vehicle A"), "Vehicle A");
        assert_eq!(vehicle_label("", "", Some(2020), "Vehicle B"), "Vehicle B (2020)");
        assert_eq!(vehicle_label("Kia", "", None, "Vehicle B"), "Kia");
        let sample = VehicleRecord::reference_sample("Rivian", "R1S", Some(2024));
        assert_eq!(sample.title("Vehicle"), "Rivian R1S (2024)");
        assert_eq!(sample.trees_needed.value(), Some(210.0));
    }
}
