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


mod record;
mod catalog;
mod selection;
mod comparison;
pub mod display;

pub use record::{FuelEfficiency, GreenwashRisk, Metric, VehicleRecord, vehicle_label};
pub use catalog::{Catalog, CatalogFilters, CatalogIndex, derive_options};
pub use selection::{ComparisonRequest, CompareSession, Side, VehicleSelection, NO_SELECTION_ADVISORY};
pub use comparison::{
    compute_comparison,
    breakeven_percent,
    recomputed_total,
    ComparisonResult,
    LifecycleStage,
    StageSplit,
    BREAKEVEN_FALLBACK_PERCENT,
    DEFAULT_STAGE_SPLIT,
};
