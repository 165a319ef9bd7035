use chrono::{DateTime, Utc};

use crate::{Catalog, Hotel, HotelForm, Randomizer, Room, User};

const HOTEL_PRICE_RANGE: (i64, i64) = (100_000, 500_000);
const STAR_RATING_RANGE: (i64, i64) = (1, 5);
const EVENT_PROBABILITY: f64 = 0.5;
const UID_SUFFIX_RANGE: (i64, i64) = (1000, 9999);

/// Every hotel shows this many images, starting with the main image
const IMAGES_PER_HOTEL: usize = 4;

/// The key of the `index`th hotel (0-based), e.g. `hotel_1`
pub fn hotel_id(index: usize) -> String {
    format!("hotel_{}", index + 1)
}

/// The key of the `position`th room (1-based) of a hotel, e.g. `hotel_1_room_2`
pub fn room_id(hotel_id: &str, position: usize) -> String {
    format!("{hotel_id}_room_{position}")
}

/// Likes are keyed by user and hotel together, so a user can only like a hotel once
pub fn like_id(user_id: &str, hotel_id: &str) -> String {
    format!("{user_id}_{hotel_id}")
}

/// A synthetic uid from the creation time and a random 4 digit suffix
pub fn user_id(created_at: DateTime<Utc>, rng: &mut Randomizer) -> String {
    let suffix = rng.bounded_int(UID_SUFFIX_RANGE.0, UID_SUFFIX_RANGE.1);

    format!("test_user_{}_{suffix}", created_at.timestamp_millis())
}

/// Generates the `index`th hotel (0-based) without recommendations.
pub fn generate_hotel(
    catalog: &Catalog,
    name: &str,
    index: usize,
    rng: &mut Randomizer,
) -> Hotel {
    let pool = &catalog.images;
    let main_image_index = index % pool.len();

    // Rotation, not chance: neighbouring hotels share images predictably
    let images = (0..IMAGES_PER_HOTEL)
        .map(|offset| pool[(main_image_index + offset) % pool.len()].clone())
        .collect();

    let price = rng.bounded_int(HOTEL_PRICE_RANGE.0, HOTEL_PRICE_RANGE.1);
    let star_rating = rng.bounded_int(STAR_RATING_RANGE.0, STAR_RATING_RANGE.1);

    let has_event = rng.weighted_bool(EVENT_PROBABILITY) && !catalog.events.is_empty();
    let events = has_event.then(|| {
        let event_index = rng.bounded_usize(0, catalog.events.len() - 1);
        catalog.events[event_index].clone()
    });

    Hotel {
        id: hotel_id(index),
        name: name.to_string(),
        main_image_url: pool[main_image_index].clone(),
        images,
        price,
        star_rating,
        comment: catalog.hotel.comment.clone(),
        contents: catalog.hotel.contents.clone(),
        location: catalog.hotel.location.clone(),
        forms: catalog.forms.clone(),
        events,
        recommend_hotels: vec![],
    }
}

/// Stamps every room template onto the hotel, keeping template order.
pub fn generate_rooms(catalog: &Catalog, hotel_id: &str) -> Vec<Room> {
    catalog
        .rooms
        .iter()
        .enumerate()
        .map(|(i, template)| Room {
            id: room_id(hotel_id, i + 1),
            hotel_id: hotel_id.to_string(),
            template: template.clone(),
        })
        .collect()
}

/// Generates the `sequence_index`th test user (0-based).
///
/// The uid combines the current time with a random suffix. Two users created in
/// the same millisecond can still collide, so callers that need uniqueness must check.
pub fn generate_user(sequence_index: usize, now: DateTime<Utc>, rng: &mut Randomizer) -> User {
    let n = sequence_index + 1;

    User {
        uid: user_id(now, rng),
        email: format!("test{n}@example.com"),
        display_name: format!("Test User {n}"),
        photo_url: None,
        created_at: now,
    }
}

/// The reservation form every hotel shares
pub fn generate_hotel_form(catalog: &Catalog) -> HotelForm {
    HotelForm {
        forms: catalog.forms.clone(),
    }
}

#[cfg(test)]
mod test {
    use chrono::Utc;
    use regex::Regex;

    use super::{generate_hotel, generate_rooms, generate_user, hotel_id, room_id};
    use crate::{Catalog, Randomizer};

    #[test]
    fn hotel_images_rotate_through_the_pool() {
        let mut catalog = Catalog::default();
        catalog.images = (0..6).map(|n| format!("{n}.jpg")).collect();
        let mut rng = Randomizer::seeded(1);

        let hotel = generate_hotel(&catalog, "Rotated", 4, &mut rng);

        assert_eq!(hotel.id, "hotel_5");
        assert_eq!(hotel.main_image_url, "4.jpg");
        assert_eq!(hotel.images, vec!["4.jpg", "5.jpg", "0.jpg", "1.jpg"]);
    }

    #[test]
    fn hotel_fields_are_in_range() {
        let catalog = Catalog::default();
        let mut rng = Randomizer::seeded(2);
        let mut with_event = 0;

        for index in 0..200 {
            let hotel = generate_hotel(&catalog, "Ranged", index, &mut rng);

            assert!((100_000..=500_000).contains(&hotel.price));
            assert!((1..=5).contains(&hotel.star_rating));
            assert!(hotel.recommend_hotels.is_empty());

            if let Some(event) = &hotel.events {
                assert!(catalog.events.contains(event));
                with_event += 1;
            }
        }

        // Roughly half of the hotels carry an event
        assert!((60..140).contains(&with_event), "{with_event} hotels had events");
    }

    #[test]
    fn hotels_without_event_catalog_have_no_event() {
        let mut catalog = Catalog::default();
        catalog.events.clear();
        let mut rng = Randomizer::seeded(3);

        assert!((0..50).all(|i| generate_hotel(&catalog, "Plain", i, &mut rng)
            .events
            .is_none()));
    }

    #[test]
    fn missing_event_is_omitted_from_the_record() {
        let mut catalog = Catalog::default();
        catalog.events.clear();
        let mut rng = Randomizer::seeded(4);

        let hotel = generate_hotel(&catalog, "Plain", 0, &mut rng);
        let value = serde_json::to_value(&hotel).unwrap();

        assert!(value.get("events").is_none());
        assert!(value.get("id").is_none());
        assert_eq!(value["mainImageUrl"], hotel.main_image_url.as_str());
        assert!(value["recommendHotels"].is_array());
    }

    #[test]
    fn rooms_follow_template_order() {
        let catalog = Catalog::default();
        let pattern = Regex::new(r"^hotel_3_room_([0-9]+)$").unwrap();

        let rooms = generate_rooms(&catalog, &hotel_id(2));

        assert_eq!(rooms.len(), catalog.rooms.len());

        for (i, room) in rooms.iter().enumerate() {
            let position: usize = pattern.captures(&room.id).unwrap()[1].parse().unwrap();

            assert_eq!(position, i + 1);
            assert_eq!(room.hotel_id, "hotel_3");
            assert_eq!(room.template, catalog.rooms[i]);
        }

        let value = serde_json::to_value(&rooms[0]).unwrap();
        assert_eq!(value["hotelId"], "hotel_3");
        assert_eq!(value["roomName"], catalog.rooms[0].room_name.as_str());
    }

    #[test]
    fn users_follow_naming_patterns() {
        let now = Utc::now();
        let mut rng = Randomizer::seeded(5);
        let pattern = Regex::new(r"^test_user_[0-9]+_[0-9]{4}$").unwrap();

        let user = generate_user(1, now, &mut rng);

        assert!(pattern.is_match(&user.uid), "{}", user.uid);
        assert!(user.uid.contains(&now.timestamp_millis().to_string()));
        assert_eq!(user.email, "test2@example.com");
        assert_eq!(user.display_name, "Test User 2");
        assert_eq!(user.created_at, now);
    }

    #[test]
    fn key_formats() {
        assert_eq!(hotel_id(0), "hotel_1");
        assert_eq!(room_id("hotel_1", 3), "hotel_1_room_3");
        assert_eq!(super::like_id("u", "hotel_2"), "u_hotel_2");
    }
}
