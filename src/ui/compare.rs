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
use iced::{Alignment, Element, Length, Padding};
use iced::widget::{Button, Column, Container, Row, Text, TextInput};
use iced_aw::{TabLabel};
use iced::alignment::Horizontal;
use tracing::{info, warn};

use lifecycle::{ComparisonRequest, CompareSession, Side, VehicleSelection};
use crate::ui::ApplicationData;
use crate::ui::elements::{advisory_text, create_vehicle_selector};

pub const LOOKUP_FAILED_ADVISORY: &str = "Could not find one of the vehicles in the database. Try different selections.";

#[derive(Debug, Clone)]
pub enum CompareMessage {
    MakeSelected(Side, String),
    ModelSelected(Side, String),
    YearSelected(Side, u32),
    ClearSelected(Side),
    DailyDistanceEntered(String),
}

#[derive(Default)]
pub struct CompareTab {
    session: CompareSession,
    in_flight: bool,
    status_message: String
}

impl CompareTab {
    pub(crate) fn new() -> Self {
        CompareTab {
            session: CompareSession::new(),
            in_flight: false,
            status_message: "".to_string()
        }
    }

    pub fn app_data_update(&mut self, app_data: &ApplicationData, update_event: &Message) {
        match update_event {
            Message::CatalogLoaded(..) => self.refresh(app_data),
            _ => {}
        }
    }

    pub fn update(&mut self, message: CompareMessage, app_data: &ApplicationData) {
        let catalog = &app_data.catalog;
        let session = std::mem::take(&mut self.session);
        self.session = match message {
            CompareMessage::MakeSelected(side, make) => {
                session.map_side(side, |s| s.with_make(Some(make), catalog))
            }
            CompareMessage::ModelSelected(side, model) => {
                session.map_side(side, |s| s.with_model(Some(model), catalog))
            }
            CompareMessage::YearSelected(side, year) => {
                session.map_side(side, |s| s.with_year(Some(year), catalog))
            }
            CompareMessage::ClearSelected(side) => {
                session.map_side(side, VehicleSelection::cleared)
            }
            CompareMessage::DailyDistanceEntered(distance) => {
                let session = session.with_daily_distance_input(distance);
                match session.daily_distance_km() {
                    Ok(_) => self.status_message.clear(),
                    Err(e) => self.status_message = e
                }
                session
            }
        };
    }

    /// Validates the current selections and starts a new lookup if they are usable
    pub fn begin_request(&mut self) -> Option<ComparisonRequest> {
        match self.session.clone().begin_request() {
            Ok((next, request)) => {
                info!("Comparing {} with {}", next.side(Side::A).label(Side::A), next.side(Side::B).label(Side::B));
                self.session = next;
                self.in_flight = true;
                self.status_message.clear();
                Some(request)
            }
            Err(advisory) => {
                warn!("Comparison not started. {}", advisory);
                self.status_message = advisory;
                None
            }
        }
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.session.is_current(generation)
    }

    pub fn request_succeeded(&mut self) {
        self.in_flight = false;
        self.status_message.clear();
    }

    pub fn request_failed(&mut self, reason: &str) {
        self.in_flight = false;
        self.status_message = reason.to_string();
    }

    pub fn update_status(&mut self, status: String) {
        self.status_message = status;
    }

    pub fn refresh(&mut self, app_data: &ApplicationData) {
        self.session = std::mem::take(&mut self.session).reconciled(&app_data.catalog);
    }

    fn vehicle_panel<'a>(&self, side: Side, app_data: &ApplicationData) -> Column<'a, Message> {
        let selection = self.session.side(side);
        let options = selection.options(&app_data.catalog);
        let selector = create_vehicle_selector(
            selection,
            options.makes,
            options.models,
            options.years,
            move |val| Message::Compare(CompareMessage::MakeSelected(side, val)),
            move |val| Message::Compare(CompareMessage::ModelSelected(side, val)),
            move |val| Message::Compare(CompareMessage::YearSelected(side, val)),
        );
        let mut panel = Column::new()
            .spacing(10)
            .push(Text::new(side.as_str()).size(24))
            .push(selector);
        if !selection.is_empty() {
            panel = panel.push(
                Row::new()
                    .spacing(10)
                    .align_items(Alignment::Center)
                    .push(Text::new(format!("Selected: {}", selection.label(side))))
                    .push(Button::new(Text::new("Clear"))
                        .on_press(Message::Compare(CompareMessage::ClearSelected(side))))
            );
        }
        panel
    }
}

impl Tab for CompareTab {
    type Message = Message;

    fn title(&self) -> String {
        String::from("Compare")
    }

    fn tab_label(&self) -> TabLabel {
        TabLabel::Text(self.title())
    }

    fn content<'a, 'b>(&'a self, app_data: &'b ApplicationData ) -> Element<'_, Self::Message>
        where 'b: 'a
    {
        let panels = Side::all_options().iter().fold(
            Column::new().spacing(30),
            |col, side| col.push(self.vehicle_panel(*side, app_data))
        );

        let distance_input = Column::new()
            .push(Text::new("Daily distance (km)"))
            .push(TextInput::new(
                "Enter your average daily km",
                self.session.daily_distance_input(),
                move |val| { Message::Compare(CompareMessage::DailyDistanceEntered(val)) },
            ).width(Length::Units(300)));

        let button_text = if self.in_flight { "Comparing..." } else { "Compare Now" };
        let compare_button = Button::new(Text::new(button_text))
            .on_press(Message::CompareRequested);

        let mut layout = Column::new().width(Length::Fill)
            .align_items(Alignment::Start)
            .padding(Padding::from([0, 10]))
            .spacing(30)
            .push(panels)
            .push(distance_input)
            .push(compare_button);

        if app_data.catalog.is_empty() {
            layout = layout.push(Text::new(app_data.catalog_state.describe()));
        }
        if !self.status_message.is_empty() {
            layout = layout.push(
                Row::new()
                    .align_items(Alignment::Center)
                    .push(advisory_text(&self.status_message).horizontal_alignment(Horizontal::Center))
            )
        }
        Container::new(layout).padding(20).into()
    }
}

#[cfg(test)]
mod tests {
    use lifecycle::{Catalog, Side, VehicleRecord};
    use crate::ui::compare::{CompareMessage, CompareTab};
    use crate::settings::GlobalSettings;
    use crate::ui::data::ApplicationData;

    fn app_data() -> ApplicationData {
        let mut data = ApplicationData::with_settings(GlobalSettings::default());
        data.catalog = Catalog::new(vec![
            VehicleRecord { make: "Tesla".to_string(), model: "Model 3".to_string(), model_year: Some(2022), ..Default::default() },
            VehicleRecord { make: "Ford".to_string(), model: "F-150".to_string(), model_year: Some(2019), ..Default::default() },
        ]);
        data
    }

    #[test]
    fn compare_flow() {
        let data = app_data();
        let mut tab = CompareTab::new();
        assert!(tab.begin_request().is_none());
        assert!(!tab.status_message.is_empty());

        tab.update(CompareMessage::MakeSelected(Side::A, "Tesla".to_string()), &data);
        tab.update(CompareMessage::ModelSelected(Side::A, "Model 3".to_string()), &data);
        tab.update(CompareMessage::MakeSelected(Side::B, "Ford".to_string()), &data);
        tab.update(CompareMessage::ModelSelected(Side::B, "Model 3".to_string()), &data);
        assert_eq!(tab.session.side(Side::B).model(), None);

        let request = tab.begin_request().unwrap();
        assert!(tab.in_flight);
        assert!(tab.is_current(request.generation));
        assert_eq!(request.vehicle_a.model(), Some("Model 3"));

        let newer = tab.begin_request().unwrap();
        assert!(!tab.is_current(request.generation));
        assert!(tab.is_current(newer.generation));
    }

    #[test]
    fn bad_distance_sets_status() {
        let data = app_data();
        let mut tab = CompareTab::new();
        tab.update(CompareMessage::DailyDistanceEntered("-3".to_string()), &data);
        assert!(!tab.status_message.is_empty());
        tab.update(CompareMessage::DailyDistanceEntered("12".to_string()), &data);
        assert!(tab.status_message.is_empty());
    }
}
