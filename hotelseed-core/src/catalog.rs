use std::{fs::read_to_string, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::{
    FormField, FormOption, FormValues, Geolocation, HotelEvent, Location, ReservationForm,
    RoomInfo, RoomTemplate, TagThemeStyle,
};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Could not read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    /// A list the generators index into is empty
    #[error("The catalog's {field} list cannot be empty")]
    Empty { field: &'static str },
}

/// The fixed templates every generated record is built from.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// One hotel is generated per name, in order
    pub hotel_names: Vec<String>,
    /// Hotels take their images from this pool by rotation
    pub images: Vec<String>,
    pub events: Vec<HotelEvent>,
    pub hotel: HotelTemplate,
    /// Every hotel gets one room per template, in order
    pub rooms: Vec<RoomTemplate>,
    pub forms: Vec<ReservationForm>,
    pub form_values: FormValues,
}

/// The fields shared by every hotel
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelTemplate {
    pub comment: String,
    pub contents: String,
    pub location: Location,
}

impl Catalog {
    /// Loads a catalog from a JSON file and validates it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = read_to_string(path)?;
        let catalog: Catalog = serde_json::from_str(&raw)?;

        catalog.validate()?;

        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.hotel_names.is_empty() {
            return Err(CatalogError::Empty {
                field: "hotelNames",
            });
        }

        if self.images.is_empty() {
            return Err(CatalogError::Empty { field: "images" });
        }

        // Reservations point at rooms by template position
        if self.rooms.is_empty() {
            return Err(CatalogError::Empty { field: "rooms" });
        }

        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let hotel_names = [
            "Seaside Harbor Hotel",
            "Grand Palace Seoul",
            "Maple Leaf Inn",
            "Jeju Ocean Resort",
            "Busan Marina Suites",
            "Hanok Stay Bukchon",
            "Skyline Tower Hotel",
            "Riverside Garden Lodge",
            "Mountain View Retreat",
            "City Central Residence",
        ];

        let images = (1..=8)
            .map(|n| format!("https://images.hotelseed.dev/hotels/{n:02}.jpg"))
            .collect();

        Self {
            hotel_names: hotel_names.iter().map(|n| n.to_string()).collect(),
            images,
            events: default_events(),
            hotel: HotelTemplate {
                comment: "A comfortable stay close to everything you need.".to_string(),
                contents: "Free breakfast, an outdoor pool and a 24 hour front desk. \
                    Check-in from 15:00, check-out until 11:00."
                    .to_string(),
                location: Location {
                    directions: "5 minutes on foot from the nearest subway station".to_string(),
                    point_geolocation: Geolocation {
                        x: 126.978,
                        y: 37.5665,
                    },
                },
            },
            rooms: default_rooms(),
            forms: default_forms(),
            form_values: FormValues {
                name: "Gildong Hong".to_string(),
                phone: "010-1234-5678".to_string(),
                email: "test@example.com".to_string(),
            },
        }
    }
}

fn default_events() -> Vec<HotelEvent> {
    let event = |name: &str, promo_end_time: Option<&str>, background: &str, font: &str| {
        HotelEvent {
            name: name.to_string(),
            promo_end_time: promo_end_time.map(String::from),
            tag_theme_style: TagThemeStyle {
                background_color: background.to_string(),
                font_color: font.to_string(),
            },
        }
    };

    vec![
        event("Early bird sale", Some("2026-12-31T23:59:59"), "#e4f0fe", "#3182f6"),
        event("Members only", None, "#fff1e6", "#f26b22"),
        event("Last minute deal", Some("2026-11-30T23:59:59"), "#fde8e8", "#f04452"),
        event("Free breakfast", None, "#e6f8ee", "#03b26c"),
    ]
}

fn default_rooms() -> Vec<RoomTemplate> {
    let room = |name: &str, price, refundable, count, bed: &str, occupancy, size| RoomTemplate {
        room_name: name.to_string(),
        price,
        refundable,
        available_count: count,
        image_url: format!(
            "https://images.hotelseed.dev/rooms/{}.jpg",
            name.to_lowercase().replace(' ', "-")
        ),
        basic_info: RoomInfo {
            bed_type: bed.to_string(),
            max_occupancy: occupancy,
            square_meters: size,
        },
    };

    vec![
        room("Standard Double", 120000, true, 5, "Double", 2, 22),
        room("Deluxe Twin", 180000, true, 3, "Twin", 2, 28),
        room("Family Suite", 320000, false, 1, "King and single", 4, 45),
    ]
}

fn default_forms() -> Vec<ReservationForm> {
    let field = |id: &str, label: &str, required: &str, help: Option<&str>| FormField {
        id: id.to_string(),
        label: label.to_string(),
        required: required.to_string(),
        help_message: help.map(String::from),
    };

    vec![
        ReservationForm::TextField {
            field: field("name", "Guest name", "Please enter the guest name", None),
        },
        ReservationForm::TextField {
            field: field(
                "phone",
                "Phone number",
                "Please enter a phone number",
                Some("We will only use this to contact you about your stay"),
            ),
        },
        ReservationForm::Select {
            field: field("heads", "Guests", "Please choose the number of guests", None),
            options: (1..=4)
                .map(|n| FormOption {
                    label: format!("{n} guest{}", if n > 1 { "s" } else { "" }),
                    value: n.to_string(),
                })
                .collect(),
        },
    ]
}
