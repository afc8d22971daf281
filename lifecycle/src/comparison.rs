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
use tracing::debug;
use utils::numeric::{clamp_percentage, percentage_share, round_half_up};
use crate::record::{Metric, VehicleRecord};
use crate::selection::Side;

/// Split shown when neither vehicle reports anything for a stage
pub const DEFAULT_STAGE_SPLIT: u8 = 50;

/// Breakeven marker position used when vehicle A has no breakeven year
pub const BREAKEVEN_FALLBACK_PERCENT: u8 = 28;

/// Years covered by the breakeven chart
pub const BREAKEVEN_CHART_YEARS: f64 = 10.0;

/// Lifetime the API amortises `trees_needed` over
pub const ASSUMED_LIFESPAN_YEARS: f64 = 10.0;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum LifecycleStage {
    Manufacturing,
    Operational,
    Disposal
}

impl LifecycleStage {
    pub fn all_options() -> [LifecycleStage; 3] {
        [LifecycleStage::Manufacturing, LifecycleStage::Operational, LifecycleStage::Disposal]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleStage::Manufacturing => "Manufacturing",
            LifecycleStage::Operational => "Operational (10 Years)",
            LifecycleStage::Disposal => "End of Life / Disposal"
        }
    }

    pub fn metric_of(&self, record: &VehicleRecord) -> Metric {
        match self {
            LifecycleStage::Manufacturing => record.manufacturing_emission,
            LifecycleStage::Operational => record.ten_year_op_tons,
            LifecycleStage::Disposal => record.disposal_emission
        }
    }
}

impl Display for LifecycleStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How one lifecycle stage divides between the two vehicles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageSplit {
    pub stage: LifecycleStage,
    pub a: Metric,
    pub b: Metric,
    pub a_percent: u8,
    pub b_percent: u8
}

impl StageSplit {
    fn between(stage: LifecycleStage, vehicle_a: &VehicleRecord, vehicle_b: &VehicleRecord) -> StageSplit {
        let a = stage.metric_of(vehicle_a);
        let b = stage.metric_of(vehicle_b);
        let a_percent = percentage_share(a.or_zero(), b.or_zero()).unwrap_or(DEFAULT_STAGE_SPLIT);
        StageSplit {
            stage,
            a,
            b,
            a_percent,
            b_percent: 100 - a_percent
        }
    }
}

/// Everything the result view derives from a pair of vehicles
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    /// The vehicle with the lower 10 year operational emissions. Ties and
    /// incomplete data favour vehicle A.
    pub winner: Side,
    /// Difference in 10 year operational emissions, `None` if either is unknown
    pub savings_tons: Option<f64>,
    pub stages: [StageSplit; 3],
    /// Where vehicle A's breakeven year sits on a 10 year axis, 0-100
    pub breakeven_percent: u8,
    pub annual_trees_saved: Option<u32>,
    pub total_a: Option<f64>,
    pub total_b: Option<f64>
}

impl ComparisonResult {
    pub fn total_for(&self, side: Side) -> Option<f64> {
        match side {
            Side::A => self.total_a,
            Side::B => self.total_b
        }
    }

    pub fn stage(&self, stage: LifecycleStage) -> &StageSplit {
        match stage {
            LifecycleStage::Manufacturing => &self.stages[0],
            LifecycleStage::Operational => &self.stages[1],
            LifecycleStage::Disposal => &self.stages[2]
        }
    }
}

pub fn compute_comparison(vehicle_a: &VehicleRecord, vehicle_b: &VehicleRecord) -> ComparisonResult {
    let (winner, savings_tons) =
        match (vehicle_a.ten_year_op_tons.value(), vehicle_b.ten_year_op_tons.value()) {
            (Some(a), Some(b)) => {
                let winner = if b < a { Side::B } else { Side::A };
                (winner, Some((a - b).abs()))
            }
            _ => {
                debug!("10 year operational figure missing, defaulting headline to vehicle A");
                (Side::A, None)
            }
        };

    let stages = LifecycleStage::all_options().map(|stage| {
        StageSplit::between(stage, vehicle_a, vehicle_b)
    });

    ComparisonResult {
        winner,
        savings_tons,
        stages,
        breakeven_percent: breakeven_percent(vehicle_a),
        annual_trees_saved: annual_trees_saved(vehicle_a, vehicle_b, winner),
        total_a: recomputed_total(vehicle_a),
        total_b: recomputed_total(vehicle_b)
    }
}

/// Sum of the three lifecycle stages, or the API's own total if any stage is missing
pub fn recomputed_total(record: &VehicleRecord) -> Option<f64> {
    let stages = LifecycleStage::all_options().map(|stage| stage.metric_of(record).value());
    match stages {
        [Some(manufacturing), Some(operational), Some(disposal)] => {
            Some(manufacturing + operational + disposal)
        }
        _ => record.total_lifecycle_tons.value()
    }
}

pub fn breakeven_percent(record: &VehicleRecord) -> u8 {
    match record.breakeven_year.value() {
        None => BREAKEVEN_FALLBACK_PERCENT,
        Some(years) => {
            let percent = round_half_up(years / BREAKEVEN_CHART_YEARS * 100.0);
            clamp_percentage(percent as i64)
        }
    }
}

fn annual_trees_saved(vehicle_a: &VehicleRecord, vehicle_b: &VehicleRecord, winner: Side) -> Option<u32> {
    let a_annual = vehicle_a.trees_needed.value()? / ASSUMED_LIFESPAN_YEARS;
    let b_annual = vehicle_b.trees_needed.value()? / ASSUMED_LIFESPAN_YEARS;
    let saved = match winner {
        Side::A => b_annual - a_annual,
        Side::B => a_annual - b_annual
    };
    Some(round_half_up(saved).max(0.0) as u32)
}
