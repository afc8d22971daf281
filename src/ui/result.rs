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


use super::{Message, Tab};
use iced::{Alignment, Element, Length, theme};
use iced::widget::{scrollable, Button, Column, Container, Row, Text};
use iced_aw::{TabLabel};
use tracing::info;

use lifecycle::{compute_comparison, ComparisonResult, LifecycleStage, Side, VehicleRecord};
use lifecycle::display::{comparison_summary, daily_distance_note, headline, spec_rows, trees_saved};
use crate::ui::ApplicationData;
use crate::ui::elements::{create_percentage_bar, risk_colour};

/// A pair of fetched vehicles and the figures derived from them
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedComparison {
    pub vehicle_a: VehicleRecord,
    pub vehicle_b: VehicleRecord,
    pub result: ComparisonResult,
    pub daily_distance_km: Option<f64>
}

impl LoadedComparison {
    pub fn new(vehicle_a: VehicleRecord, vehicle_b: VehicleRecord, daily_distance_km: Option<f64>) -> LoadedComparison {
        let result = compute_comparison(&vehicle_a, &vehicle_b);
        LoadedComparison { vehicle_a, vehicle_b, result, daily_distance_km }
    }

    pub fn summary(&self) -> String {
        comparison_summary(&self.vehicle_a, &self.vehicle_b, &self.result, self.daily_distance_km)
    }

    fn vehicle(&self, side: Side) -> &VehicleRecord {
        match side {
            Side::A => &self.vehicle_a,
            Side::B => &self.vehicle_b
        }
    }
}

#[derive(Default)]
pub struct ResultTab {
    comparison: Option<LoadedComparison>,
    status_message: String
}

impl ResultTab {
    pub(crate) fn new() -> Self {
        ResultTab::default()
    }

    pub fn show(&mut self, comparison: LoadedComparison) {
        info!("{}", headline(&comparison.result));
        self.comparison = Some(comparison);
        self.status_message.clear();
    }

    pub fn comparison(&self) -> Option<&LoadedComparison> {
        self.comparison.as_ref()
    }

    pub fn update_status(&mut self, status: String) {
        self.status_message = status;
    }

    fn stage_breakdown<'a>(comparison: &LoadedComparison) -> Column<'a, Message> {
        LifecycleStage::all_options().iter().fold(
            Column::new().spacing(16).push(Text::new("Lifecycle Stage Breakdown").size(24)),
            |col, stage| {
                let split = comparison.result.stage(*stage);
                col.push(Text::new(stage.as_str()).size(20))
                   .push(create_percentage_bar(
                       comparison.vehicle(Side::A).title(Side::A.as_str()),
                       format!("{}%", split.a_percent),
                       split.a_percent))
                   .push(create_percentage_bar(
                       comparison.vehicle(Side::B).title(Side::B.as_str()),
                       format!("{}%", split.b_percent),
                       split.b_percent))
            }
        )
    }

    fn spec_table<'a>(comparison: &LoadedComparison) -> Column<'a, Message> {
        let header = Row::new()
            .spacing(10)
            .push(Text::new("Spec").width(Length::FillPortion(2)))
            .push(Text::new(Side::A.as_str()).width(Length::FillPortion(2)))
            .push(Text::new(Side::B.as_str()).width(Length::FillPortion(2)));
        spec_rows(&comparison.vehicle_a, &comparison.vehicle_b, &comparison.result)
            .into_iter()
            .fold(Column::new().spacing(6).push(header), |col, row| {
                col.push(Row::new()
                    .spacing(10)
                    .push(Text::new(row.label).width(Length::FillPortion(2)))
                    .push(Text::new(row.a).width(Length::FillPortion(2)))
                    .push(Text::new(row.b).width(Length::FillPortion(2))))
            })
    }
}

impl Tab for ResultTab {
    type Message = Message;

    fn title(&self) -> String {
        String::from("Result")
    }

    fn tab_label(&self) -> TabLabel {
        TabLabel::Text(self.title())
    }

    fn content<'a, 'b>(&'a self, _app_data: &'b ApplicationData) -> Element<'_, Self::Message>
        where 'b: 'a
    {
        let comparison = match &self.comparison {
            None => {
                return Container::new(
                    Text::new("Run a comparison from the Compare tab to see the results here.")
                ).padding(20).into();
            }
            Some(c) => c
        };

        let mut layout = Column::new()
            .width(Length::Fill)
            .align_items(Alignment::Start)
            .spacing(24)
            .push(Text::new("Lifecycle Impact Comparison").size(28))
            .push(Text::new(headline(&comparison.result)).size(22));
        if let Some(note) = daily_distance_note(comparison.daily_distance_km) {
            layout = layout.push(Text::new(note));
        }

        let risk = comparison.vehicle_a.risk();
        let risk_row = Row::new()
            .spacing(8)
            .push(Text::new("Greenwash risk:"))
            .push(Text::new(risk.as_str().to_uppercase()).style(theme::Text::Color(risk_colour(risk))));

        let breakeven = Column::new()
            .spacing(8)
            .push(Text::new("Carbon Breakeven Point").size(24))
            .push(create_percentage_bar(
                "Year 0 to Year 10".to_string(),
                format!("{}%", comparison.result.breakeven_percent),
                comparison.result.breakeven_percent));

        let trees = Row::new()
            .spacing(8)
            .push(Text::new("Trees saved annually:"))
            .push(Text::new(trees_saved(&comparison.result)));

        let mut copy_row = Row::new()
            .spacing(10)
            .align_items(Alignment::Center)
            .push(Button::new(Text::new("Copy summary")).on_press(Message::CopySummaryToClipboard));
        if !self.status_message.is_empty() {
            copy_row = copy_row.push(Text::new(self.status_message.clone()));
        }

        layout = layout
            .push(ResultTab::spec_table(comparison))
            .push(risk_row)
            .push(ResultTab::stage_breakdown(comparison))
            .push(breakeven)
            .push(trees)
            .push(copy_row);

        Container::new(scrollable(layout.padding(20))).height(Length::Fill).into()
    }
}

#[cfg(test)]
mod tests {
    use lifecycle::{Metric, Side, VehicleRecord};
    use crate::ui::result::{LoadedComparison, ResultTab};

    fn vehicle(make: &str, operational: f64) -> VehicleRecord {
        VehicleRecord {
            make: make.to_string(),
            model: "Test".to_string(),
            model_year: Some(2021),
            ten_year_op_tons: Metric::new(operational),
            ..Default::default()
        }
    }

    #[test]
    fn show_replaces_previous_comparison() {
        let mut tab = ResultTab::new();
        assert!(tab.comparison().is_none());
        tab.update_status("Copied".to_string());
        tab.show(LoadedComparison::new(vehicle("Tesla", 3.0), vehicle("Ford", 30.0), Some(40.0)));
        assert!(tab.status_message.is_empty());
        assert_eq!(tab.comparison().unwrap().result.winner, Side::A);

        tab.show(LoadedComparison::new(vehicle("Ford", 30.0), vehicle("Tesla", 3.0), None));
        assert_eq!(tab.comparison().unwrap().result.winner, Side::B);
    }

    #[test]
    fn summary_mentions_distance() {
        let loaded = LoadedComparison::new(vehicle("Tesla", 3.0), vehicle("Ford", 30.0), Some(40.0));
        let summary = loaded.summary();
        assert!(summary.contains("Vehicle A saves 27.0 tons"));
        assert!(summary.contains("40 km"));
    }
}
