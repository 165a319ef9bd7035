use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The collections the seed writes to.
/// Their names are read by the booking application and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Hotel,
    Room,
    HotelForm,
    User,
    Like,
    Reservation,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hotel => "hotel",
            Self::Room => "room",
            Self::HotelForm => "hotel_form",
            Self::User => "user",
            Self::Like => "like",
            Self::Reservation => "reservation",
        }
    }
}

/// A hotel listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    #[serde(skip)]
    pub id: String,
    pub name: String,
    pub main_image_url: String,
    pub images: Vec<String>,
    pub price: i64,
    pub star_rating: i64,
    pub comment: String,
    pub contents: String,
    pub location: Location,
    pub forms: Vec<ReservationForm>,
    /// At most one promotion. Omitted entirely when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<HotelEvent>,
    pub recommend_hotels: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub directions: String,
    pub point_geolocation: Geolocation,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Geolocation {
    pub x: f64,
    pub y: f64,
}

/// A promotion shown on a hotel card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelEvent {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_end_time: Option<String>,
    pub tag_theme_style: TagThemeStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagThemeStyle {
    pub background_color: String,
    pub font_color: String,
}

/// A field of the reservation form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ReservationForm {
    #[serde(rename = "TEXT_FIELD")]
    TextField {
        #[serde(flatten)]
        field: FormField,
    },
    #[serde(rename = "SELECT")]
    Select {
        #[serde(flatten)]
        field: FormField,
        options: Vec<FormOption>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: String,
    pub label: String,
    /// The message shown when the field is left empty
    pub required: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormOption {
    pub label: String,
    pub value: String,
}

/// The singleton `hotel_form/default` record
#[derive(Debug, Clone, Serialize)]
pub struct HotelForm {
    pub forms: Vec<ReservationForm>,
}

/// The fields every room of a hotel is stamped from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTemplate {
    pub room_name: String,
    pub price: i64,
    pub refundable: bool,
    pub available_count: u32,
    pub image_url: String,
    pub basic_info: RoomInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomInfo {
    pub bed_type: String,
    pub max_occupancy: u32,
    pub square_meters: u32,
}

/// A room belonging to a hotel
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(skip)]
    pub id: String,
    pub hotel_id: String,
    #[serde(flatten)]
    pub template: RoomTemplate,
}

/// A test account
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// A hotel a user has saved.
/// Note: `order` is the rank within one user's likes, not a global position.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    #[serde(skip)]
    pub id: String,
    pub user_id: String,
    pub hotel_id: String,
    pub order: usize,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(skip)]
    pub id: String,
    pub user_id: String,
    pub hotel_id: String,
    /// Derived from the hotel id, see [crate::RoomReferencePolicy]
    pub room_id: String,
    #[serde(with = "timestamp")]
    pub check_in_date: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub check_out_date: DateTime<Utc>,
    pub price: i64,
    pub form_values: FormValues,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// What the guest typed into the reservation form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormValues {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// Timestamps are stored as `2026-10-17T09:30:00.000Z`, the format the web app parses.
pub mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::Serializer;

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(value))
    }
}

#[cfg(test)]
mod test {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::{FormField, FormOption, ReservationForm, User};

    #[test]
    fn users_serialize_with_app_field_names() {
        let user = User {
            uid: "test_user_1_1000".to_string(),
            email: "test1@example.com".to_string(),
            display_name: "Test User 1".to_string(),
            photo_url: None,
            created_at: Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap(),
        };

        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            json!({
                "uid": "test_user_1_1000",
                "email": "test1@example.com",
                "displayName": "Test User 1",
                "photoURL": null,
                "createdAt": "2026-10-17T09:30:00.000Z",
            })
        );
    }

    #[test]
    fn form_fields_are_tagged_by_type() {
        let select = ReservationForm::Select {
            field: FormField {
                id: "bed".to_string(),
                label: "Bed".to_string(),
                required: "Pick a bed".to_string(),
                help_message: None,
            },
            options: vec![FormOption {
                label: "Double".to_string(),
                value: "double".to_string(),
            }],
        };

        let value = serde_json::to_value(&select).unwrap();

        assert_eq!(value["type"], "SELECT");
        assert_eq!(value["id"], "bed");
        assert_eq!(value["options"][0]["value"], "double");
        assert!(value.get("helpMessage").is_none());

        let parsed: ReservationForm = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, select);
    }
}
