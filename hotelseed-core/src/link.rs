use chrono::{DateTime, Duration, Utc};

use crate::{like_id, room_id, FormValues, Like, Randomizer, Reservation};

const RECOMMENDATIONS: (usize, usize) = (3, 5);
const LIKES: (usize, usize) = (3, 7);
const RESERVATIONS: (usize, usize) = (1, 2);
const LEAD_DAYS: (i64, i64) = (1, 30);
const STAY_NIGHTS: (i64, i64) = (1, 5);
const RESERVATION_PRICE_RANGE: (i64, i64) = (150_000, 500_000);
const RESERVATION_SUFFIX_RANGE: (i64, i64) = (1000, 9999);

/// The highest room position a reservation may point at
const MAX_RESERVED_ROOM: usize = 3;

/// How a reservation picks the room it refers to.
///
/// Room ids on reservations are derived from the hotel id, never looked up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoomReferencePolicy {
    /// Draw from rooms that exist for every hotel, so the reference always resolves.
    #[default]
    WithinTemplate,
    /// Draw from `1..=3` regardless of how many rooms a hotel has.
    /// With fewer than three room templates this can point at a room that was never written.
    Unchecked,
}

impl RoomReferencePolicy {
    /// The highest room position to draw, given how many rooms each hotel has.
    pub fn max_position(&self, room_template_count: usize) -> usize {
        match self {
            Self::WithinTemplate => MAX_RESERVED_ROOM.min(room_template_count).max(1),
            Self::Unchecked => MAX_RESERVED_ROOM,
        }
    }
}

/// Draws how many items to take from `available`, within `range`.
/// The upper bound shrinks to what is available, and the result never exceeds it.
fn prefix_len(rng: &mut Randomizer, range: (usize, usize), available: usize) -> usize {
    let upper = range.1.min(available).max(range.0);

    rng.bounded_usize(range.0, upper).min(available)
}

/// Picks the hotels recommended alongside `own_id`.
///
/// Never includes `own_id` or duplicates. Takes 3 to 5 hotels, or all of the
/// others if there are fewer than 3.
pub fn recommend_hotels(own_id: &str, all_ids: &[String], rng: &mut Randomizer) -> Vec<String> {
    let others: Vec<_> = all_ids.iter().filter(|id| *id != own_id).cloned().collect();
    let len = prefix_len(rng, RECOMMENDATIONS, others.len());

    rng.sample_prefix(&others, len)
}

/// Picks the hotels a user likes and ranks them.
///
/// The `order` of each like is its 1-based position in the user's own picks.
pub fn link_likes(
    user_id: &str,
    hotel_ids: &[String],
    now: DateTime<Utc>,
    rng: &mut Randomizer,
) -> Vec<Like> {
    let len = prefix_len(rng, LIKES, hotel_ids.len());

    rng.sample_prefix(hotel_ids, len)
        .into_iter()
        .enumerate()
        .map(|(i, hotel_id)| Like {
            id: like_id(user_id, &hotel_id),
            user_id: user_id.to_string(),
            hotel_id,
            order: i + 1,
            created_at: now,
        })
        .collect()
}

/// A reservation key: creation time, position within the user's reservations, and a random suffix
pub fn reservation_id(created_at: DateTime<Utc>, index: usize, rng: &mut Randomizer) -> String {
    let suffix = rng.bounded_int(RESERVATION_SUFFIX_RANGE.0, RESERVATION_SUFFIX_RANGE.1);

    format!(
        "reservation_{}_{index}_{suffix}",
        created_at.timestamp_millis()
    )
}

/// Books a user into one or two different hotels, starting 1 to 30 days after `now`.
pub fn link_reservations(
    user_id: &str,
    hotel_ids: &[String],
    room_template_count: usize,
    policy: RoomReferencePolicy,
    form_values: &FormValues,
    now: DateTime<Utc>,
    rng: &mut Randomizer,
) -> Vec<Reservation> {
    let len = prefix_len(rng, RESERVATIONS, hotel_ids.len());
    let max_room = policy.max_position(room_template_count);

    rng.sample_prefix(hotel_ids, len)
        .into_iter()
        .enumerate()
        .map(|(i, hotel_id)| {
            let room_position = rng.bounded_usize(1, max_room);

            let lead_days = rng.bounded_int(LEAD_DAYS.0, LEAD_DAYS.1);
            let nights = rng.bounded_int(STAY_NIGHTS.0, STAY_NIGHTS.1);

            let check_in_date = now + Duration::days(lead_days);
            let check_out_date = check_in_date + Duration::days(nights);

            Reservation {
                id: reservation_id(now, i, rng),
                user_id: user_id.to_string(),
                room_id: room_id(&hotel_id, room_position),
                hotel_id,
                check_in_date,
                check_out_date,
                price: rng.bounded_int(RESERVATION_PRICE_RANGE.0, RESERVATION_PRICE_RANGE.1),
                form_values: form_values.clone(),
                created_at: now,
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use chrono::{Duration, Utc};

    use super::{link_likes, link_reservations, recommend_hotels, RoomReferencePolicy};
    use crate::{hotel_id, Catalog, Randomizer};

    fn hotel_ids(count: usize) -> Vec<String> {
        (0..count).map(hotel_id).collect()
    }

    #[test]
    fn recommendations_exclude_own_hotel() {
        let ids = hotel_ids(10);

        for seed in 0..50 {
            let mut rng = Randomizer::seeded(seed);
            let picks = recommend_hotels("hotel_4", &ids, &mut rng);
            let unique: HashSet<_> = picks.iter().collect();

            assert!(!picks.contains(&"hotel_4".to_string()));
            assert_eq!(unique.len(), picks.len());
            assert!((3..=5).contains(&picks.len()));
        }
    }

    #[test]
    fn recommendations_are_capped_by_other_hotels() {
        let ids = hotel_ids(3);
        let mut rng = Randomizer::seeded(8);

        let picks = recommend_hotels("hotel_1", &ids, &mut rng);
        let picks: HashSet<_> = picks.into_iter().collect();

        assert_eq!(
            picks,
            HashSet::from(["hotel_2".to_string(), "hotel_3".to_string()])
        );
    }

    #[test]
    fn lone_hotel_has_no_recommendations() {
        let mut rng = Randomizer::seeded(9);

        assert!(recommend_hotels("hotel_1", &hotel_ids(1), &mut rng).is_empty());
    }

    #[test]
    fn likes_with_three_hotels_cover_all_of_them() {
        let ids = hotel_ids(3);
        let mut rng = Randomizer::seeded(10);

        let likes = link_likes("user", &ids, Utc::now(), &mut rng);

        let liked: HashSet<_> = likes.iter().map(|l| l.hotel_id.clone()).collect();
        let mut orders: Vec<_> = likes.iter().map(|l| l.order).collect();
        orders.sort();

        assert_eq!(liked, ids.into_iter().collect::<HashSet<_>>());
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn like_orders_are_a_permutation() {
        let ids = hotel_ids(10);

        for seed in 0..50 {
            let mut rng = Randomizer::seeded(seed);
            let likes = link_likes("user", &ids, Utc::now(), &mut rng);

            let mut orders: Vec<_> = likes.iter().map(|l| l.order).collect();
            orders.sort();

            assert!((3..=7).contains(&likes.len()));
            assert_eq!(orders, (1..=likes.len()).collect::<Vec<_>>());

            for like in &likes {
                assert_eq!(like.id, format!("user_{}", like.hotel_id));
            }
        }
    }

    #[test]
    fn reservations_are_in_the_future() {
        let ids = hotel_ids(5);
        let form_values = Catalog::default().form_values;
        let now = Utc::now();

        for seed in 0..50 {
            let mut rng = Randomizer::seeded(seed);
            let reservations = link_reservations(
                "user",
                &ids,
                3,
                RoomReferencePolicy::default(),
                &form_values,
                now,
                &mut rng,
            );

            let hotels: HashSet<_> = reservations.iter().map(|r| &r.hotel_id).collect();

            assert!((1..=2).contains(&reservations.len()));
            assert_eq!(hotels.len(), reservations.len());

            for reservation in &reservations {
                let lead = reservation.check_in_date - now;
                let stay = reservation.check_out_date - reservation.check_in_date;

                assert!(reservation.check_in_date > now);
                assert!(reservation.check_out_date > reservation.check_in_date);
                assert!(lead >= Duration::days(1) && lead <= Duration::days(30));
                assert!(stay >= Duration::days(1) && stay <= Duration::days(5));
                assert!((150_000..=500_000).contains(&reservation.price));
                assert!(reservation.room_id.starts_with(&format!("{}_room_", reservation.hotel_id)));
            }
        }
    }

    #[test]
    fn reservations_stay_within_room_templates() {
        let ids = hotel_ids(5);
        let form_values = Catalog::default().form_values;

        for seed in 0..50 {
            let mut rng = Randomizer::seeded(seed);
            let reservations = link_reservations(
                "user",
                &ids,
                1,
                RoomReferencePolicy::WithinTemplate,
                &form_values,
                Utc::now(),
                &mut rng,
            );

            for reservation in reservations {
                assert!(reservation.room_id.ends_with("_room_1"));
            }
        }
    }

    #[test]
    fn unchecked_policy_ignores_room_count() {
        assert_eq!(RoomReferencePolicy::Unchecked.max_position(1), 3);
        assert_eq!(RoomReferencePolicy::WithinTemplate.max_position(1), 1);
        assert_eq!(RoomReferencePolicy::WithinTemplate.max_position(2), 2);
        assert_eq!(RoomReferencePolicy::WithinTemplate.max_position(8), 3);
    }
}
