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
use iced::{Alignment, Color, Element, Length, Padding, theme};
use iced::widget::{Button, Column, Container, Row, Text, TextInput};
use iced_aw::{TabLabel};
use crate::ui::{ApplicationData};
use crate::settings::GlobalSettings;
use crate::ui::data::LoadState;

#[derive(Default)]
pub struct SettingsTab {
    api_address_input: String,
    status_message: String
}

#[derive(Debug, Clone)]
pub enum SettingsMessage {
    ApiAddressEdited(String)
}

impl SettingsTab {
    pub(crate) fn new(app_data: &ApplicationData) -> Self {
        SettingsTab {
            api_address_input: app_data.settings.api_base_url().to_string(),
            ..Default::default()
        }
    }

    pub fn update(&mut self, message: SettingsMessage, _app_data: &ApplicationData) {
        match message {
            SettingsMessage::ApiAddressEdited(address) => {
                self.api_address_input = address;
                self.status_message.clear();
            }
        }
    }

    pub fn api_address_input(&self) -> &str {
        &self.api_address_input
    }

    pub fn app_data_update(&mut self, app_data: &ApplicationData, update_event: &Message) {
        match update_event {
            Message::ApplyApiAddress => {
                self.api_address_input = app_data.settings.api_base_url().to_string();
            }
            _ => {}
        }
    }

    pub fn notify_action_success(&mut self, _action_event: &Message) {
        self.status_message = "API address updated".to_string();
    }

    pub fn notify_action_failure(&mut self, _action_event: &Message, reason: &str) {
        self.status_message = format!("Couldn't use that address. {}", reason);
    }
}

impl Tab for SettingsTab {
    type Message = Message;

    fn title(&self) -> String {
        String::from("Settings")
    }

    fn tab_label(&self) -> TabLabel {
        TabLabel::Text(self.title())
    }

    fn content<'a, 'b>(
        &'a self,
        app_data: &'b ApplicationData
    ) -> Element<'_, Self::Message>
    where 'b: 'a
    {
        let address_input = Column::new()
            .spacing(5)
            .push(Text::new("Vehicle API address"))
            .push(Row::new()
                .spacing(5)
                .align_items(Alignment::Center)
                .push(TextInput::new(
                    GlobalSettings::DEFAULT_API_BASE_URL,
                    &self.api_address_input,
                    move |val| { Message::Settings(SettingsMessage::ApiAddressEdited(val)) },
                ).padding(8).width(Length::Units(400)))
                .push(Button::new(Text::new("Apply")).on_press(Message::ApplyApiAddress)))
            .push(Text::new(format!("Active: {}", app_data.settings.api_base_url())).size(16))
            .padding(Padding::from([15, 3, 0, 3]));

        let limits = Column::new()
            .spacing(5)
            .push(Text::new(format!("Catalog limit: {} vehicles", app_data.settings.catalog_limit())))
            .push(Text::new(format!("Lowest emissions list: {} vehicles", app_data.settings.lowest_emissions_limit())))
            .push(Text::new(format!("Request timeout: {} seconds", app_data.settings.request_timeout().as_secs())))
            .padding(Padding::from([0, 3, 0, 3]));

        let catalog_colour = match app_data.catalog_state {
            LoadState::Loaded(_) => success_green_colour(),
            LoadState::Failed(_) => fail_red_colour(),
            _ => Color::from_rgb(0.5, 0.5, 0.5)
        };
        let catalog = Row::new()
            .spacing(10)
            .align_items(Alignment::Center)
            .push(Text::new(app_data.catalog_state.describe()).style(theme::Text::Color(catalog_colour)))
            .push(Button::new(Text::new("Reload catalog")).on_press(Message::CatalogReloadRequested))
            .padding(Padding::from([0, 3, 0, 3]));

        let mut layout = Column::new()
            .push(address_input)
            .push(limits)
            .push(catalog)
            .spacing(25);
        if !self.status_message.is_empty() {
            layout = layout.push(Text::new(self.status_message.clone()));
        }
        let container : Container<'_, Message> = Container::new(layout);
        container.into()
    }
}

fn success_green_colour() -> Color {
    Color::from_rgb8(75, 181, 67)
}

fn fail_red_colour() -> Color {
    Color::from_rgb8(237, 67, 55)
}

#[cfg(test)]
mod tests {
    use crate::settings::GlobalSettings;
    use crate::ui::data::ApplicationData;
    use crate::ui::Message;
    use crate::ui::settings::{SettingsMessage, SettingsTab};

    #[test]
    fn address_edit_round_trip() {
        let data = ApplicationData::with_settings(GlobalSettings::default());
        let mut tab = SettingsTab::new(&data);
        assert_eq!(tab.api_address_input(), "http://127.0.0.1:8000");
        tab.update(SettingsMessage::ApiAddressEdited("https://carbon.example.org".to_string()), &data);
        assert_eq!(tab.api_address_input(), "https://carbon.example.org");
        tab.app_data_update(&data, &Message::ApplyApiAddress);
        assert_eq!(tab.api_address_input(), "http://127.0.0.1:8000");
    }
}
