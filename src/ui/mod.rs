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


mod compare;
mod result;
mod details;
mod settings;
mod data;
mod elements;

use compare::{CompareMessage, CompareTab, LOOKUP_FAILED_ADVISORY};
use result::{LoadedComparison, ResultTab};
use details::{DetailsMessage, DetailsTab};
use settings::{SettingsMessage, SettingsTab};

use iced::{Application, Background, Color, Command, Element, Error, Padding, Settings};
use iced::widget::{Column, Text, Container};
use iced_aw::{TabLabel, Tabs};
use iced::alignment::{Horizontal, Vertical};
use iced::Theme;
use iced_aw::style::tab_bar::Appearance;
use iced_aw::style::TabBarStyles;
use iced_aw::tab_bar::StyleSheet;
use tracing::{span, Level, info, error, warn};
use lifecycle::VehicleRecord;
use vehicle_api::{ApiError, LookupOutcome, MatchQuery};
use crate::ui::data::ApplicationData;

const HEADER_SIZE: u16 = 32;
const TAB_PADDING: u16 = 16;

const COMPARE_TAB: usize = 0;
const RESULT_TAB: usize = 1;

pub fn launch() -> Result<(), Error> {
    UIMain::run(Settings::default())
}

#[derive(Debug, Clone)]
pub enum Message {
    TabSelected(usize),
    Compare(CompareMessage),
    CompareRequested,
    ComparisonFetched {
        generation: u64,
        daily_distance_km: Option<f64>,
        vehicle_a: LookupOutcome,
        vehicle_b: LookupOutcome
    },
    Details(DetailsMessage),
    DetailsRequested,
    DetailsFetched(u64, LookupOutcome),
    CatalogReloadRequested,
    CatalogLoaded(u64, Result<Vec<VehicleRecord>, ApiError>),
    LowestEmissionsLoaded(u64, Result<Vec<VehicleRecord>, ApiError>),
    Settings(SettingsMessage),
    ApplyApiAddress,
    CopySummaryToClipboard,
}

/// The default appearance of a [`TabBar`](crate::native::TabBar).
#[derive(Clone, Copy, Debug)]
pub struct CustomStyleSheet;

impl StyleSheet for CustomStyleSheet {
    type Style = Theme;

    fn active(&self, _style: &Self::Style, is_active: bool) -> Appearance {
        Appearance {
            background: None,
            border_color: None,
            border_width: 0.0,
            tab_label_background: if is_active {
                Background::Color([0.85, 0.93, 0.87].into())
            } else {
                Background::Color([0.67, 0.67, 0.67].into())
            },
            tab_label_border_color: [0.7, 0.7, 0.7].into(),
            tab_label_border_width: 1.0,
            icon_color: if is_active {
                Color::BLACK
            } else {
                Color::from_rgb(0.5, 0.5, 0.5)
            },
            text_color: if is_active {
                Color::BLACK
            } else {
                Color::from_rgb(0.5, 0.5, 0.5)
            },
        }
    }

    fn hovered(&self, style: &Self::Style, is_active: bool) -> Appearance {
        Appearance {
            tab_label_background: Background::Color([0.16, 0.45, 0.27].into()),
            text_color: Color::WHITE,
            ..self.active(style, is_active)
        }
    }
}

pub struct UIMain {
    app_data: ApplicationData,
    active_tab: usize,
    compare_tab: CompareTab,
    result_tab: ResultTab,
    details_tab: DetailsTab,
    settings_tab: SettingsTab
}

impl UIMain {
    pub fn notify_app_data_update(&mut self, update_event: &Message) {
        self.settings_tab.app_data_update(&self.app_data, update_event);
        self.compare_tab.app_data_update(&self.app_data, update_event);
        self.details_tab.app_data_update(&self.app_data, update_event);
    }

    fn load_catalog(&mut self, generation: u64) -> Command<Message> {
        let api = match self.app_data.api() {
            Ok(api) => api,
            Err(e) => {
                let event = Message::CatalogLoaded(generation, Err(e.clone()));
                if self.app_data.update_catalog(generation, Err(e)) {
                    self.notify_app_data_update(&event);
                }
                return Command::none();
            }
        };
        let limit = self.app_data.settings.catalog_limit();
        Command::perform(
            async move { api.list_cars(limit).await },
            move |result| Message::CatalogLoaded(generation, result)
        )
    }

    fn load_lowest_emissions(&mut self, generation: u64) -> Command<Message> {
        let api = match self.app_data.api() {
            Ok(api) => api,
            Err(e) => {
                self.app_data.update_lowest_emissions(generation, Err(e));
                return Command::none();
            }
        };
        let limit = self.app_data.settings.lowest_emissions_limit();
        Command::perform(
            async move { api.lowest_emissions(limit).await },
            move |result| Message::LowestEmissionsLoaded(generation, result)
        )
    }

    fn refresh_remote_data(&mut self) -> Command<Message> {
        let generation = self.app_data.begin_refresh();
        Command::batch([self.load_catalog(generation), self.load_lowest_emissions(generation)])
    }

    fn request_comparison(&mut self) -> Command<Message> {
        let api = match self.app_data.api() {
            Ok(api) => api,
            Err(e) => {
                error!("Can't compare vehicles. {}", e.to_string());
                self.compare_tab.update_status(e.to_string());
                return Command::none();
            }
        };
        let request = match self.compare_tab.begin_request() {
            Some(r) => r,
            None => return Command::none()
        };
        let generation = request.generation;
        let daily_distance_km = request.daily_distance_km;
        let query_a = MatchQuery::from(&request.vehicle_a);
        let query_b = MatchQuery::from(&request.vehicle_b);
        Command::perform(
            async move { api.find_pair(&query_a, &query_b).await },
            move |(vehicle_a, vehicle_b)| Message::ComparisonFetched {
                generation,
                daily_distance_km,
                vehicle_a,
                vehicle_b
            }
        )
    }

    fn comparison_fetched(&mut self,
                          generation: u64,
                          daily_distance_km: Option<f64>,
                          vehicle_a: LookupOutcome,
                          vehicle_b: LookupOutcome) {
        if !self.compare_tab.is_current(generation) {
            info!("Ignoring stale comparison response {}", generation);
            return;
        }
        match (vehicle_a, vehicle_b) {
            (LookupOutcome::Found(a), LookupOutcome::Found(b)) => {
                self.result_tab.show(LoadedComparison::new(a, b, daily_distance_km));
                self.compare_tab.request_succeeded();
                self.active_tab = RESULT_TAB;
            }
            (a, b) => {
                warn!("Comparison lookup incomplete. A: {:?}, B: {:?}", a.is_found(), b.is_found());
                self.compare_tab.request_failed(LOOKUP_FAILED_ADVISORY);
                self.active_tab = COMPARE_TAB;
            }
        }
    }

    fn request_details(&mut self) -> Command<Message> {
        let api = match self.app_data.api() {
            Ok(api) => api,
            Err(e) => {
                error!("Can't look up vehicle. {}", e.to_string());
                return Command::none();
            }
        };
        let (generation, selection) = match self.details_tab.begin_request() {
            Some(r) => r,
            None => return Command::none()
        };
        let query = MatchQuery::from(&selection);
        Command::perform(
            async move { api.find_match(&query).await },
            move |outcome| Message::DetailsFetched(generation, outcome)
        )
    }

    fn copy_summary_to_clipboard(&mut self) {
        let summary = match self.result_tab.comparison() {
            Some(c) => c.summary(),
            None => {
                warn!("No comparison to copy");
                return;
            }
        };
        let res = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(summary));
        match res {
            Ok(_) => {
                info!("Copied comparison summary to clipboard");
                self.result_tab.update_status(String::from("Copied to clipboard"));
            }
            Err(e) => {
                error!("Failed to copy to clipboard. {}", e.to_string());
                self.result_tab.update_status(format!("Couldn't copy to clipboard. {}", e.to_string()));
            }
        }
    }
}

impl Application for UIMain {
    type Executor = iced::executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = ();

    fn new(_flags: ()) -> (Self, Command<Message>) {
        let span = span!(Level::INFO, "Creating UIMain");
        let _enter = span.enter();
        let app_data = ApplicationData::new();
        info!("Initialised settings successfully");
        let settings_tab = SettingsTab::new(&app_data);
        info!("Created settings tab");
        let compare_tab = CompareTab::new();
        info!("Created compare tab");
        let result_tab = ResultTab::new();
        info!("Created result tab");
        let details_tab = DetailsTab::new();
        info!("Created details tab");
        let mut ui = UIMain {
            app_data,
            active_tab: COMPARE_TAB,
            compare_tab,
            result_tab,
            details_tab,
            settings_tab
        };
        let startup = ui.refresh_remote_data();
        (ui, startup)
    }

    fn title(&self) -> String {
        String::from("Eco Compare")
    }

    fn update(&mut self, message: Self::Message) -> Command<Message> {
        match message {
            Message::TabSelected(selected) => self.active_tab = selected,
            Message::Compare(message) => self.compare_tab.update(message, &self.app_data),
            Message::Details(message) => self.details_tab.update(message, &self.app_data),
            Message::Settings(message) => self.settings_tab.update(message, &self.app_data),
            Message::CompareRequested => return self.request_comparison(),
            Message::ComparisonFetched { generation, daily_distance_km, vehicle_a, vehicle_b } => {
                self.comparison_fetched(generation, daily_distance_km, vehicle_a, vehicle_b)
            }
            Message::DetailsRequested => return self.request_details(),
            Message::DetailsFetched(generation, outcome) => {
                self.details_tab.lookup_finished(generation, outcome)
            }
            Message::CatalogReloadRequested => return self.refresh_remote_data(),
            Message::CatalogLoaded(generation, ref result) => {
                if self.app_data.update_catalog(generation, result.clone()) {
                    self.notify_app_data_update(&message);
                }
            }
            Message::LowestEmissionsLoaded(generation, result) => {
                self.app_data.update_lowest_emissions(generation, result);
            }
            Message::ApplyApiAddress => {
                let new_address = self.settings_tab.api_address_input().to_string();
                match self.app_data.update_api_base_url(&new_address) {
                    Ok(_) => {
                        info!("Vehicle API address changed to {}", new_address);
                        self.settings_tab.notify_action_success(&message);
                        self.notify_app_data_update(&message);
                        return self.refresh_remote_data();
                    }
                    Err(e) => {
                        error!("Failed to change vehicle API address. {}", e);
                        self.settings_tab.notify_action_failure(&message, &e);
                    }
                }
            }
            Message::CopySummaryToClipboard => self.copy_summary_to_clipboard(),
        }
        Command::none()
    }

    fn view(&self) -> Element<'_, Self::Message> {
        Tabs::new(self.active_tab, Message::TabSelected)
            .push(
                self.compare_tab.tab_label(),
                self.compare_tab.view(&self.app_data)
            )
            .push(
                self.result_tab.tab_label(),
                self.result_tab.view(&self.app_data)
            )
            .push(
                self.details_tab.tab_label(),
                self.details_tab.view(&self.app_data)
            )
            .push(
                self.settings_tab.tab_label(),
                self.settings_tab.view(&self.app_data)
            )
            .tab_bar_style(TabBarStyles::Custom(Box::new(CustomStyleSheet)))
            .tab_bar_position(iced_aw::TabBarPosition::Top)
            .into()
    }
}


trait Tab {
    type Message;

    fn title(&self) -> String;

    fn tab_label(&self) -> TabLabel;

    fn view<'a, 'b>(
        &'a self,
        app_data: &'b ApplicationData
    ) -> Element<'_, Self::Message>
    where 'b: 'a
    {
        let column = Column::new()
            .spacing(5)
            .push(Text::new(self.title()).size(HEADER_SIZE))
            .push(self.content(app_data));

        Container::new(column)
            .align_x(Horizontal::Left)
            .align_y(Vertical::Top)
            .padding(Padding::from([TAB_PADDING*2, TAB_PADDING, TAB_PADDING, TAB_PADDING]))
            .into()
    }

    fn content<'a, 'b>(
        &'a self,
        app_data: &'b ApplicationData
    ) -> Element<'_, Self::Message>
    where 'b: 'a;
}
