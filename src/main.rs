use iced::widget::{button, column, container, pick_list, row, stack, text, text_input};
use iced::{Alignment, Element, Length, Task, Theme};
use log::{error, info, warn};
use rfd::FileDialog;
use std::fmt;
use std::path::PathBuf;

mod config;
mod error;
mod state;
mod ui;

use error::CatalogError;
use state::catalog::{load_catalog, load_catalog_async, Catalog};
use state::data::ProductId;
use state::session::Session;

/// Entry of the category pick list
#[derive(Debug, Clone, PartialEq, Eq)]
enum CategoryChoice {
    All,
    Only(String),
}

impl fmt::Display for CategoryChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryChoice::All => f.write_str("All"),
            CategoryChoice::Only(category) => f.write_str(category),
        }
    }
}

/// Main application state
struct NutritionTracker {
    /// Catalog, quantities, filters and totals
    session: Session,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked the "Open Dataset" button
    OpenDataset,
    /// Background dataset load finished
    CatalogLoaded(PathBuf, Result<Catalog, CatalogError>),
    /// User picked an entry of the category list
    CategorySelected(CategoryChoice),
    /// User edited the search box
    SearchChanged(String),
    /// User edited the quantity of a product
    QuantityChanged(ProductId, String),
    /// Carousel arrows
    Next,
    Previous,
    /// User clicked "Calculate Nutrients"
    CalculateTotals,
    /// User closed the totals overlay
    CloseTotals,
}

impl NutritionTracker {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = config::Config::load();
        let dataset_dir = config.dataset_dir;

        // The catalog is read once, synchronously, before the first frame
        let (session, status) = match load_catalog(&dataset_dir) {
            Ok(catalog) => {
                let status = loaded_status(&catalog);
                (Session::new(catalog), status)
            }
            Err(err) => {
                warn!("Starting with an empty catalog: {}", err);
                let empty = Catalog::from_products(&dataset_dir, Vec::new());
                (Session::new(empty), format!("⚠️ {}", err))
            }
        };

        info!("Nutrition Tracker initialized with {} products", session.catalog().len());

        (
            NutritionTracker {
                session,
                status,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenDataset => {
                // Show the native folder picker dialog
                let folder = FileDialog::new()
                    .set_title("Select Folder with Nutrient Data")
                    .set_directory(self.session.catalog().dir())
                    .pick_folder();

                if let Some(folder_path) = folder {
                    self.status = format!("Loading {}...", folder_path.display());

                    return Task::perform(
                        load_catalog_async(folder_path.clone()),
                        catalog_loaded(folder_path),
                    );
                }

                Task::none()
            }
            Message::CatalogLoaded(folder_path, Ok(catalog)) => {
                self.status = loaded_status(&catalog);
                info!("Switched dataset to {}", folder_path.display());
                self.session = Session::new(catalog);
                Task::none()
            }
            Message::CatalogLoaded(folder_path, Err(err)) => {
                error!("Failed to load {}: {}", folder_path.display(), err);
                self.status = format!("⚠️ {}", err);
                Task::none()
            }
            Message::CategorySelected(choice) => {
                let category = match choice {
                    CategoryChoice::All => None,
                    CategoryChoice::Only(category) => Some(category),
                };
                self.session.filter_by_type(category);
                Task::none()
            }
            Message::SearchChanged(search) => {
                self.session.search_by_text(search);
                Task::none()
            }
            Message::QuantityChanged(id, raw) => {
                self.session.change_quantity(&id, &raw);
                Task::none()
            }
            Message::Next => {
                self.session.next();
                Task::none()
            }
            Message::Previous => {
                self.session.previous();
                Task::none()
            }
            Message::CalculateTotals => {
                let totals = self.session.compute_total();
                info!("Total calories over {} products: {:.2}", self.session.view().len(), totals.calories);
                Task::none()
            }
            Message::CloseTotals => {
                self.session.close_totals();
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let session = &self.session;

        let mut choices = vec![CategoryChoice::All];
        choices.extend(session.categories().iter().cloned().map(CategoryChoice::Only));
        let selected = match &session.filters().category {
            Some(category) => CategoryChoice::Only(category.clone()),
            None => CategoryChoice::All,
        };

        let filters = row![
            pick_list(choices, Some(selected), Message::CategorySelected).width(Length::Fixed(180.0)),
            text_input("Search...", &session.filters().search)
                .on_input(Message::SearchChanged)
                .width(Length::Fill),
            button("Open Dataset").on_press(Message::OpenDataset),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        // Arrows are disabled on an empty view so the cursor is never moved
        let has_products = !session.view().is_empty();
        let card: Element<'_, Message> = match session.current_product() {
            Some(product) => ui::card::product_card(product, session.quantity(&product.id), session.catalog().dir()),
            None if session.catalog().is_empty() => text("No products loaded").size(18).into(),
            None => text("No products match").size(18).into(),
        };
        let carousel = row![
            button("◀").on_press_maybe(has_products.then_some(Message::Previous)).padding(10),
            container(card).width(Length::Fill).center_x(Length::Fill),
            button("▶").on_press_maybe(has_products.then_some(Message::Next)).padding(10),
        ]
        .spacing(20)
        .align_y(Alignment::Center);
        let position = if has_products {
            format!("{} / {}", session.cursor().index() + 1, session.view().len())
        } else {
            String::new()
        };

        let content = column![
            text("Nutrition Tracker").size(36),
            filters,
            carousel,
            text(position).size(14),
            button("Calculate Nutrients")
                .on_press(Message::CalculateTotals)
                .padding(10),
            text(&self.status).size(14),
        ]
        .spacing(20)
        .padding(30)
        .align_x(Alignment::Center);

        let base = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill);

        match session.visible_totals() {
            Some(totals) => stack![base, ui::totals::totals_overlay(totals)].into(),
            None => base.into(),
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Tag a finished dataset load with the folder it was read from
fn catalog_loaded(folder_path: PathBuf) -> impl Fn(Result<Catalog, CatalogError>) -> Message {
    move |result| Message::CatalogLoaded(folder_path.clone(), result)
}

fn loaded_status(catalog: &Catalog) -> String {
    format!(
        "{} products loaded from {}",
        catalog.len(),
        catalog.dir().display()
    )
}

fn main() -> iced::Result {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    iced::application(
        "Nutrition Tracker",
        NutritionTracker::update,
        NutritionTracker::view,
    )
    .theme(NutritionTracker::theme)
    .window_size((960.0, 820.0))
    .centered()
    .run_with(NutritionTracker::new)
}
