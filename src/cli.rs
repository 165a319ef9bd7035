use std::path::PathBuf;

use clap::Parser;
use hotelseed_core::RoomReferencePolicy;
use hotelseed_pipeline::{Schedule, SeedOptions};

/// Fills a document store with hotels, rooms, test users, likes and reservations.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// How many test users to create
    #[arg(long, default_value_t = 3)]
    pub users: usize,

    /// Seed for the random generator, for reproducible fixtures
    #[arg(long)]
    pub seed: Option<u64>,

    /// A JSON catalog replacing the built-in hotel names, images, events, rooms and forms
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// How many hotels may be written at once
    #[arg(long, default_value_t = 8)]
    pub hotel_concurrency: usize,

    /// How many hotels may have their rooms written at once
    #[arg(long, default_value_t = 1)]
    pub room_concurrency: usize,

    /// Let reservations point at rooms 1 to 3 even if hotels have fewer rooms
    #[arg(long)]
    pub unchecked_room_refs: bool,

    /// Seed an in-memory store instead of SurrealDB
    #[arg(long)]
    pub dry_run: bool,

    /// Also log debug messages
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn seed_options(&self) -> SeedOptions {
        let room_policy = if self.unchecked_room_refs {
            RoomReferencePolicy::Unchecked
        } else {
            RoomReferencePolicy::WithinTemplate
        };

        SeedOptions {
            user_count: self.users,
            room_policy,
            schedule: Schedule::standard(self.hotel_concurrency, self.room_concurrency),
        }
    }
}
