//! Writes a generated fixture set to a document store.
//!
//! Hotels come first, then their rooms, the shared reservation form, the test
//! users, and finally each user's likes and reservations. Every phase finishes
//! before the next one starts, since later records refer to earlier ones.

mod report;
mod schedule;
mod seeder;

pub use report::*;
pub use schedule::*;
pub use seeder::*;
