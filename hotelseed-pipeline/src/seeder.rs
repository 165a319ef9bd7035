use std::{collections::HashSet, sync::Arc, time::Instant};

use chrono::Utc;
use futures_util::{stream, StreamExt, TryStreamExt};
use hotelseed_core::{
    generate_hotel, generate_hotel_form, generate_rooms, generate_user, hotel_id, link_likes,
    link_reservations, recommend_hotels, reservation_id, user_id, Catalog, CatalogError,
    Collection, Randomizer, RoomReferencePolicy,
};
use hotelseed_store::{Document, DocumentStore, Result, StoreError, WriteBatch};
use log::{debug, info};
use thiserror::Error;

use crate::{Phase, PhasePlan, RunReport, Schedule};

#[derive(Debug, Error)]
pub enum SeedError {
    /// The catalog cannot produce a consistent seed, nothing was written
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// A write failed, and every following phase was skipped
    #[error("Seeding {phase} failed: {source}")]
    Store { phase: Phase, source: StoreError },
}

/// What to seed, beyond the catalog
#[derive(Debug, Clone)]
pub struct SeedOptions {
    /// How many test users to create
    pub user_count: usize,
    pub room_policy: RoomReferencePolicy,
    pub schedule: Schedule,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            user_count: 3,
            room_policy: RoomReferencePolicy::default(),
            schedule: Schedule::default(),
        }
    }
}

/// Ids created so far, which later phases refer to
#[derive(Debug, Default)]
struct SeedState {
    hotel_ids: Vec<String>,
    user_ids: Vec<String>,
    reservation_ids: HashSet<String>,
    report: RunReport,
}

/// Generates the fixtures and writes them to a store, phase by phase.
pub struct Seeder<S> {
    store: Arc<S>,
    catalog: Catalog,
    rng: Randomizer,
    options: SeedOptions,
}

impl<S> Seeder<S>
where
    S: DocumentStore,
{
    pub fn new(store: Arc<S>, catalog: Catalog, rng: Randomizer, options: SeedOptions) -> Self {
        Self {
            store,
            catalog,
            rng,
            options,
        }
    }

    /// Runs every phase in schedule order.
    ///
    /// A phase only starts once every write of the previous phase has completed.
    /// The first failed write stops the run, and no later phase is started.
    pub async fn run(mut self) -> std::result::Result<RunReport, SeedError> {
        let started = Instant::now();

        self.catalog.validate()?;

        let mut state = SeedState {
            hotel_ids: (0..self.catalog.hotel_names.len()).map(hotel_id).collect(),
            ..Default::default()
        };

        info!("Seeding {} hotels", state.hotel_ids.len());

        let plans = self.options.schedule.plans().to_vec();

        for plan in plans {
            self.run_phase(plan, &mut state)
                .await
                .map_err(|source| SeedError::Store {
                    phase: plan.phase,
                    source,
                })?;
        }

        state.report.user_ids = state.user_ids;
        state.report.elapsed = started.elapsed();

        Ok(state.report)
    }

    async fn run_phase(&mut self, plan: PhasePlan, state: &mut SeedState) -> Result<()> {
        info!("Seeding {}...", plan.phase);

        match plan.phase {
            Phase::Hotels => {
                state.report.hotels = self.seed_hotels(&state.hotel_ids, plan.concurrency).await?;
                info!("Added {} hotels", state.report.hotels);
            }
            Phase::Rooms => {
                state.report.rooms = self.seed_rooms(&state.hotel_ids, plan.concurrency).await?;
                info!("Added {} rooms", state.report.rooms);
            }
            Phase::HotelForm => {
                let form = generate_hotel_form(&self.catalog);
                let key = "default";

                self.store
                    .set(Document::from_record(Collection::HotelForm.as_str(), key, &form)?)
                    .await?;

                state.report.forms = 1;
                info!("Added the reservation form");
            }
            Phase::Users => {
                self.seed_users(state).await?;
                info!("Added {} test users", state.user_ids.len());
            }
            Phase::Engagement => {
                for user_id in state.user_ids.clone() {
                    self.seed_likes(&user_id, state).await?;
                    self.seed_reservations(&user_id, state).await?;
                }

                info!(
                    "Added {} likes and {} reservations",
                    state.report.likes, state.report.reservations
                );
            }
        }

        Ok(())
    }

    /// Generates every hotel, then writes up to `concurrency` of them at once.
    async fn seed_hotels(&mut self, hotel_ids: &[String], concurrency: usize) -> Result<usize> {
        let mut documents = Vec::with_capacity(hotel_ids.len());

        for (index, name) in self.catalog.hotel_names.iter().enumerate() {
            let mut hotel = generate_hotel(&self.catalog, name, index, &mut self.rng);
            hotel.recommend_hotels = recommend_hotels(&hotel.id, hotel_ids, &mut self.rng);

            let summary = format!(
                "Added {} (recommendations: {}, event: {})",
                hotel.name,
                hotel.recommend_hotels.len(),
                if hotel.events.is_some() { "yes" } else { "no" }
            );

            let document = Document::from_record(Collection::Hotel.as_str(), &hotel.id, &hotel)?;
            documents.push((summary, document));
        }

        let store = self.store.as_ref();

        stream::iter(documents)
            .map(|(summary, document)| async move {
                store.set(document).await?;
                info!("{summary}");

                Ok::<_, StoreError>(())
            })
            .buffer_unordered(concurrency)
            .try_fold(0, |written, ()| async move {
                Ok::<_, StoreError>(written + 1)
            })
            .await
    }

    /// Writes each hotel's rooms one at a time, handling up to `concurrency` hotels at once.
    async fn seed_rooms(&self, hotel_ids: &[String], concurrency: usize) -> Result<usize> {
        let store = self.store.as_ref();
        let catalog = &self.catalog;

        stream::iter(hotel_ids)
            .map(|hotel_id| async move {
                let rooms = generate_rooms(catalog, hotel_id);
                debug!("{hotel_id}: writing {} rooms", rooms.len());

                for room in &rooms {
                    store
                        .set(Document::from_record(Collection::Room.as_str(), &room.id, room)?)
                        .await?;
                }

                Ok::<_, StoreError>(rooms.len())
            })
            .buffer_unordered(concurrency)
            .try_fold(0, |total, written| async move {
                Ok::<_, StoreError>(total + written)
            })
            .await
    }

    /// Creates the test users one after another.
    async fn seed_users(&mut self, state: &mut SeedState) -> Result<()> {
        for index in 0..self.options.user_count {
            let mut user = generate_user(index, Utc::now(), &mut self.rng);

            while state.user_ids.contains(&user.uid) {
                user.uid = user_id(user.created_at, &mut self.rng);
            }

            self.store
                .set(Document::from_record(Collection::User.as_str(), &user.uid, &user)?)
                .await?;

            info!("Created test user {} ({})", index + 1, user.uid);
            state.user_ids.push(user.uid);
        }

        Ok(())
    }

    /// Commits all of a user's likes in one batch.
    async fn seed_likes(&mut self, user_id: &str, state: &mut SeedState) -> Result<()> {
        let likes = link_likes(user_id, &state.hotel_ids, Utc::now(), &mut self.rng);

        for like in &likes {
            debug!("{user_id}: likes {} (order {})", like.hotel_id, like.order);
        }

        let batch = likes
            .iter()
            .map(|like| Document::from_record(Collection::Like.as_str(), &like.id, like))
            .collect::<Result<WriteBatch>>()?;

        self.store.commit(batch).await?;

        info!("{user_id}: added {} likes", likes.len());
        state.report.likes += likes.len();

        Ok(())
    }

    /// Writes a user's reservations one after another.
    async fn seed_reservations(&mut self, user_id: &str, state: &mut SeedState) -> Result<()> {
        let mut reservations = link_reservations(
            user_id,
            &state.hotel_ids,
            self.catalog.rooms.len(),
            self.options.room_policy,
            &self.catalog.form_values,
            Utc::now(),
            &mut self.rng,
        );

        for (index, reservation) in reservations.iter_mut().enumerate() {
            while !state.reservation_ids.insert(reservation.id.clone()) {
                reservation.id = reservation_id(reservation.created_at, index, &mut self.rng);
            }
        }

        for reservation in &reservations {
            debug!(
                "{user_id}: reserves {} from {} to {}",
                reservation.room_id,
                reservation.check_in_date.date_naive(),
                reservation.check_out_date.date_naive()
            );

            self.store
                .set(Document::from_record(
                    Collection::Reservation.as_str(),
                    &reservation.id,
                    reservation,
                )?)
                .await?;
        }

        info!("{user_id}: added {} reservations", reservations.len());
        state.report.reservations += reservations.len();

        Ok(())
    }
}
