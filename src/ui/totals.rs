/// Nutrient totals overlay
use iced::widget::{button, column, container, horizontal_space, row, text, Column};
use iced::{Alignment, Color, Element, Length};

use crate::state::data::{Nutrient, NutrientTotals};
use crate::Message;

/// Dimmed backdrop with the totals panel centered on top
pub fn totals_overlay<'a>(totals: &NutrientTotals) -> Element<'a, Message> {
    let lines = Nutrient::ALL.iter().fold(Column::new().spacing(10), |lines, &nutrient| {
        lines.push(
            row![text(nutrient.icon()), text(nutrient.format_total(totals.get(nutrient)))]
                .spacing(8)
                .align_y(Alignment::Center),
        )
    });

    let panel = column![
        row![
            text("Total Nutrients").size(24),
            horizontal_space(),
            button("X").on_press(Message::CloseTotals).padding(6),
        ]
        .align_y(Alignment::Center),
        lines,
    ]
    .spacing(16)
    .padding(24)
    .width(Length::Fixed(360.0));

    container(container(panel).style(container::rounded_box))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(Color::from_rgba(0.0, 0.0, 0.0, 0.6).into()),
            ..container::Style::default()
        })
        .into()
}
