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


use iced::{Alignment, Color, Length, theme};
use iced::widget::{pick_list, progress_bar, Column, Row, Text};
use lifecycle::{GreenwashRisk, VehicleSelection};
use crate::ui::Message;

pub fn create_drop_down_list<'a, T, F>(title: &'static str,
                                       options: Vec<T>,
                                       current_selection: Option<T>,
                                       placeholder: &'static str,
                                       on_select: F) -> Column<'a, Message>
    where T: ToString + Eq + Clone + 'static,
          F: Fn(T) -> Message + 'a
{
    let picklist = pick_list(options, current_selection, on_select)
        .placeholder(placeholder)
        .width(Length::Units(220));
    Column::new()
        .align_items(Alignment::Start)
        .spacing(3)
        .push(Text::new(title))
        .push(picklist)
}

/// Make, model and year drop-downs for one vehicle
pub fn create_vehicle_selector<'a, FMake, FModel, FYear>(selection: &VehicleSelection,
                                                         makes: Vec<String>,
                                                         models: Vec<String>,
                                                         years: Vec<u32>,
                                                         on_make: FMake,
                                                         on_model: FModel,
                                                         on_year: FYear) -> Row<'a, Message>
    where FMake: Fn(String) -> Message + 'a,
          FModel: Fn(String) -> Message + 'a,
          FYear: Fn(u32) -> Message + 'a
{
    Row::new()
        .spacing(12)
        .align_items(Alignment::Start)
        .push(create_drop_down_list("Select Make",
                                    makes,
                                    selection.make().map(str::to_string),
                                    "Choose Brand",
                                    on_make))
        .push(create_drop_down_list("Model",
                                    models,
                                    selection.model().map(str::to_string),
                                    "Select Model",
                                    on_model))
        .push(create_drop_down_list("Year",
                                    years,
                                    selection.year(),
                                    "Select Year",
                                    on_year))
}

/// A labelled horizontal bar filled to `percent`
pub fn create_percentage_bar<'a>(label: String, detail: String, percent: u8) -> Column<'a, Message> {
    Column::new()
        .spacing(4)
        .push(Row::new()
            .spacing(10)
            .push(Text::new(label).width(Length::Fill))
            .push(Text::new(detail)))
        .push(progress_bar(0.0..=100.0, percent as f32).height(Length::Units(10)))
}

pub fn risk_colour(risk: GreenwashRisk) -> Color {
    match risk {
        GreenwashRisk::High => Color::from_rgb8(237, 67, 55),
        GreenwashRisk::Medium => Color::from_rgb8(245, 158, 11),
        GreenwashRisk::Low => Color::from_rgb8(75, 181, 67)
    }
}

pub fn advisory_text<'a>(message: &str) -> Text<'a> {
    Text::new(message.to_string()).style(theme::Text::Color(Color::from_rgb8(245, 158, 11)))
}
