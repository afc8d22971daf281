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
use itertools::Itertools;
use tracing::{info, warn};

use lifecycle::{vehicle_label, VehicleRecord, VehicleSelection};
use lifecycle::display::{format_metric, stat_cards, StatCard};
use vehicle_api::LookupOutcome;
use crate::ui::ApplicationData;
use crate::ui::elements::{advisory_text, create_vehicle_selector, risk_colour};

pub const NO_MATCH_ADVISORY: &str = "No matching vehicle found. Try different filters.";
pub const LOAD_FAILED_ADVISORY: &str = "Failed to load vehicle data.";
pub const NO_SELECTION_ADVISORY: &str = "No vehicle selected. Choose a make, model or year to view its details.";

#[derive(Debug, Clone)]
pub enum DetailsMessage {
    MakeSelected(String),
    ModelSelected(String),
    YearSelected(u32),
    ClearSelected,
    ShowLowestEmission(usize),
}

#[derive(Default)]
pub struct DetailsTab {
    selection: VehicleSelection,
    vehicle: Option<VehicleRecord>,
    showing_reference: bool,
    status_message: String,
    generation: u64
}

impl DetailsTab {
    pub(crate) fn new() -> Self {
        DetailsTab::default()
    }

    pub fn app_data_update(&mut self, app_data: &ApplicationData, update_event: &Message) {
        match update_event {
            Message::CatalogLoaded(..) => {
                self.selection = std::mem::take(&mut self.selection).reconciled(&app_data.catalog);
            }
            _ => {}
        }
    }

    pub fn update(&mut self, message: DetailsMessage, app_data: &ApplicationData) {
        let catalog = &app_data.catalog;
        let selection = std::mem::take(&mut self.selection);
        self.selection = match message {
            DetailsMessage::MakeSelected(make) => selection.with_make(Some(make), catalog),
            DetailsMessage::ModelSelected(model) => selection.with_model(Some(model), catalog),
            DetailsMessage::YearSelected(year) => selection.with_year(Some(year), catalog),
            DetailsMessage::ClearSelected => selection.cleared(),
            DetailsMessage::ShowLowestEmission(idx) => {
                match app_data.lowest_emissions.get(idx) {
                    Some(record) => {
                        self.show_vehicle(record.clone(), false);
                        VehicleSelection::from_parts(Some(record.make.clone()),
                                                     Some(record.model.clone()),
                                                     record.model_year).reconciled(catalog)
                    }
                    None => {
                        warn!("No lowest emission vehicle at position {}", idx);
                        selection
                    }
                }
            }
        };
    }

    /// Starts a lookup for the current selection. Returns the request generation
    /// to tag the response with or `None` if there's nothing to look up.
    pub fn begin_request(&mut self) -> Option<(u64, VehicleSelection)> {
        if self.selection.is_empty() {
            self.status_message = NO_SELECTION_ADVISORY.to_string();
            return None;
        }
        self.generation += 1;
        self.status_message = "Loading...".to_string();
        Some((self.generation, self.selection.clone()))
    }

    pub fn lookup_finished(&mut self, generation: u64, outcome: LookupOutcome) {
        if generation != self.generation {
            info!("Ignoring stale details response {} (current {})", generation, self.generation);
            return;
        }
        match outcome {
            LookupOutcome::Found(record) => {
                self.show_vehicle(record, false);
            }
            LookupOutcome::NotFound => {
                self.show_reference(NO_MATCH_ADVISORY);
            }
            LookupOutcome::NetworkError(reason) => {
                warn!("Details lookup failed. {}", reason);
                self.show_reference(LOAD_FAILED_ADVISORY);
            }
        }
    }

    fn show_vehicle(&mut self, record: VehicleRecord, reference: bool) {
        self.vehicle = Some(record);
        self.showing_reference = reference;
        if !reference {
            self.status_message.clear();
        }
    }

    fn show_reference(&mut self, advisory: &str) {
        let sample = VehicleRecord::reference_sample(
            self.selection.make().unwrap_or_default(),
            self.selection.model().unwrap_or_default(),
            self.selection.year()
        );
        self.show_vehicle(sample, true);
        self.status_message = advisory.to_string();
    }

    fn stat_card_view<'a>(card: StatCard) -> Column<'a, Message> {
        Column::new()
            .width(Length::FillPortion(1))
            .spacing(2)
            .push(Text::new(card.label).size(16))
            .push(Row::new()
                .spacing(6)
                .align_items(Alignment::End)
                .push(Text::new(card.value).size(28))
                .push(Text::new(card.unit).size(16)))
            .push(Text::new(card.subtitle).size(14))
    }

    fn vehicle_view<'a>(&self, record: &VehicleRecord) -> Column<'a, Message> {
        let mut header = Column::new()
            .spacing(4)
            .push(Text::new(record.title("Vehicle")).size(26));
        if self.showing_reference {
            header = header.push(Text::new("Reference vehicle shown, figures are not for the selected vehicle"));
        }
        let risk = record.risk();
        header = header.push(Row::new()
            .spacing(8)
            .push(Text::new("Greenwash risk:"))
            .push(Text::new(risk.as_str().to_uppercase()).style(theme::Text::Color(risk_colour(risk)))));

        let cards = stat_cards(record).into_iter().chunks(2);
        let layout = cards
            .into_iter()
            .fold(Column::new().spacing(18).push(header), |col, pair| {
                col.push(pair.fold(Row::new().spacing(20), |row, card| {
                    row.push(DetailsTab::stat_card_view(card))
                }))
            });
        layout
    }

    fn lowest_emissions_view<'a>(app_data: &ApplicationData) -> Column<'a, Message> {
        let title = Text::new("Lowest Lifecycle Emissions").size(24);
        if app_data.lowest_emissions.is_empty() {
            return Column::new().spacing(8).push(title).push(Text::new("No vehicles available"));
        }
        app_data.lowest_emissions.iter().enumerate().fold(
            Column::new().spacing(8).push(title),
            |col, (idx, record)| {
                col.push(Row::new()
                    .spacing(10)
                    .align_items(Alignment::Center)
                    .push(Text::new(format!("{}.", idx + 1)))
                    .push(Text::new(record.title("Unknown vehicle")).width(Length::Units(300)))
                    .push(Text::new(format!("{} t", format_metric(record.total_lifecycle_tons.value(), 1))))
                    .push(Button::new(Text::new("View"))
                        .on_press(Message::Details(DetailsMessage::ShowLowestEmission(idx)))))
            }
        )
    }
}

impl Tab for DetailsTab {
    type Message = Message;

    fn title(&self) -> String {
        String::from("Vehicle Details")
    }

    fn tab_label(&self) -> TabLabel {
        TabLabel::Text(String::from("Details"))
    }

    fn content<'a, 'b>(&'a self, app_data: &'b ApplicationData) -> Element<'_, Self::Message>
        where 'b: 'a
    {
        let options = self.selection.options(&app_data.catalog);
        let selector = create_vehicle_selector(
            &self.selection,
            options.makes,
            options.models,
            options.years,
            |val| Message::Details(DetailsMessage::MakeSelected(val)),
            |val| Message::Details(DetailsMessage::ModelSelected(val)),
            |val| Message::Details(DetailsMessage::YearSelected(val)),
        );
        let buttons = Row::new()
            .spacing(10)
            .push(Button::new(Text::new("View Details")).on_press(Message::DetailsRequested))
            .push(Button::new(Text::new("Clear")).on_press(Message::Details(DetailsMessage::ClearSelected)));

        let mut layout = Column::new()
            .width(Length::Fill)
            .spacing(24)
            .push(Text::new(format!("Selected: {}", vehicle_label(self.selection.make().unwrap_or_default(),
                                                                   self.selection.model().unwrap_or_default(),
                                                                   self.selection.year(),
                                                                   "Any make"))))
            .push(selector)
            .push(buttons);
        if !self.status_message.is_empty() {
            layout = layout.push(advisory_text(&self.status_message));
        }
        if let Some(record) = &self.vehicle {
            layout = layout.push(self.vehicle_view(record));
        }
        layout = layout.push(DetailsTab::lowest_emissions_view(app_data));

        Container::new(scrollable(layout.padding(20))).height(Length::Fill).into()
    }
}

#[cfg(test)]
mod tests {
    use lifecycle::{Catalog, VehicleRecord};
    use vehicle_api::LookupOutcome;
    use crate::settings::GlobalSettings;
    use crate::ui::data::ApplicationData;
    use crate::ui::details::{DetailsMessage, DetailsTab, LOAD_FAILED_ADVISORY, NO_MATCH_ADVISORY, NO_SELECTION_ADVISORY};

    fn record(make: &str, model: &str, year: u32) -> VehicleRecord {
        VehicleRecord {
            make: make.to_string(),
            model: model.to_string(),
            model_year: Some(year),
            ..Default::default()
        }
    }

    fn app_data() -> ApplicationData {
        let mut data = ApplicationData::with_settings(GlobalSettings::default());
        data.catalog = Catalog::new(vec![record("Tesla", "Model 3", 2022), record("Nissan", "Leaf", 2020)]);
        data.lowest_emissions = vec![record("Nissan", "Leaf", 2020)];
        data
    }

    #[test]
    fn empty_selection_is_not_requested() {
        let mut tab = DetailsTab::new();
        assert!(tab.begin_request().is_none());
        assert_eq!(tab.status_message, NO_SELECTION_ADVISORY);
    }

    #[test]
    fn not_found_shows_reference_vehicle() {
        let data = app_data();
        let mut tab = DetailsTab::new();
        tab.update(DetailsMessage::MakeSelected("Tesla".to_string()), &data);
        let (generation, selection) = tab.begin_request().unwrap();
        assert_eq!(selection.make(), Some("Tesla"));
        tab.lookup_finished(generation, LookupOutcome::NotFound);
        assert!(tab.showing_reference);
        assert_eq!(tab.status_message, NO_MATCH_ADVISORY);
        let shown = tab.vehicle.as_ref().unwrap();
        assert_eq!(shown.make, "Tesla");
        assert_eq!(shown.ten_year_op_tons.value(), Some(14.2));

        let (generation, _) = tab.begin_request().unwrap();
        tab.lookup_finished(generation, LookupOutcome::NetworkError("timed out".to_string()));
        assert_eq!(tab.status_message, LOAD_FAILED_ADVISORY);
    }

    #[test]
    fn stale_response_ignored() {
        let data = app_data();
        let mut tab = DetailsTab::new();
        tab.update(DetailsMessage::MakeSelected("Tesla".to_string()), &data);
        let (first, _) = tab.begin_request().unwrap();
        let (second, _) = tab.begin_request().unwrap();
        tab.lookup_finished(first, LookupOutcome::Found(record("Tesla", "Old", 2001)));
        assert!(tab.vehicle.is_none());
        tab.lookup_finished(second, LookupOutcome::Found(record("Tesla", "Model 3", 2022)));
        assert_eq!(tab.vehicle.as_ref().unwrap().model, "Model 3");
        assert!(!tab.showing_reference);
        assert!(tab.status_message.is_empty());
    }

    #[test]
    fn lowest_emission_entry_selected() {
        let data = app_data();
        let mut tab = DetailsTab::new();
        tab.update(DetailsMessage::ShowLowestEmission(0), &data);
        assert_eq!(tab.selection.make(), Some("Nissan"));
        assert_eq!(tab.selection.model(), Some("Leaf"));
        assert_eq!(tab.vehicle.as_ref().unwrap().make, "Nissan");
        tab.update(DetailsMessage::ShowLowestEmission(7), &data);
        assert_eq!(tab.selection.make(), Some("Nissan"));
    }
}
