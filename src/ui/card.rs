/// Product card shown in the carousel
use iced::widget::{column, container, image, row, text, text_input, Image};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;
use std::path::Path;

use crate::state::data::{Nutrient, Product};
use crate::Message;

/// Height of the product picture
const IMAGE_HEIGHT: f32 = 200.0;
/// Card width
const CARD_WIDTH: f32 = 420.0;

/// Value shown on a card for one nutrient.
///
/// With no quantity entered the card shows the per-unit value instead of
/// zero. Totals never use this rule.
pub fn displayed_value(per_unit: f64, quantity: u32) -> f64 {
    if quantity > 0 {
        per_unit * f64::from(quantity)
    } else {
        per_unit
    }
}

/// Build the card for `product`
pub fn product_card<'a>(product: &'a Product, quantity: u32, dataset_dir: &Path) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match product.image_path(dataset_dir) {
        Some(path) => Image::<image::Handle>::new(image::Handle::from_path(path))
            .height(Length::Fixed(IMAGE_HEIGHT))
            .into(),
        None => container(text("No image").size(14))
            .height(Length::Fixed(IMAGE_HEIGHT))
            .center_y(Length::Fixed(IMAGE_HEIGHT))
            .into(),
    };

    let id = product.id.clone();
    let quantity_input = text_input("0", &quantity.to_string())
        .on_input(move |raw| Message::QuantityChanged(id.clone(), raw))
        .width(Length::Fixed(120.0))
        .padding(6);

    let profile = product.nutrients.unwrap_or_default();
    let nutrients: Vec<Element<'a, Message>> = Nutrient::ALL
        .iter()
        .map(|&nutrient| nutrient_item(nutrient, displayed_value(profile.get(nutrient), quantity)))
        .collect();

    let content = column![
        picture,
        text(&product.name).size(24),
        text(product.category.as_deref().unwrap_or("")).size(14),
        row![text("Quantity").size(14), quantity_input]
            .spacing(10)
            .align_y(Alignment::Center),
        Wrap::with_elements(nutrients)
            .spacing(16.0)
            .line_spacing(8.0),
    ]
    .spacing(12)
    .padding(20)
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fixed(CARD_WIDTH))
        .style(container::rounded_box)
        .into()
}

fn nutrient_item<'a>(nutrient: Nutrient, value: f64) -> Element<'a, Message> {
    row![text(nutrient.icon()), text(nutrient.format(value)).size(14)]
        .spacing(6)
        .align_y(Alignment::Center)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_quantity_shows_per_unit_value() {
        assert_eq!(displayed_value(12.5, 0), 12.5);
    }

    #[test]
    fn test_quantity_multiplies_displayed_value() {
        assert_eq!(displayed_value(12.5, 2), 25.0);
        assert_eq!(displayed_value(0.0, 4), 0.0);
    }
}
