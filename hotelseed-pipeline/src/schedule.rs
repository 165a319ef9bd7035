use std::fmt::Display;

use thiserror::Error;

/// A step of the seed. Every write of a phase completes before the next phase starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Hotels,
    Rooms,
    HotelForm,
    Users,
    /// Likes and reservations, per user
    Engagement,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::Hotels,
        Phase::Rooms,
        Phase::HotelForm,
        Phase::Users,
        Phase::Engagement,
    ];

    /// The phases that must have completed before this one starts.
    ///
    /// Besides the records a phase refers to, this pins the form before the users,
    /// so every valid schedule runs the phases in the same order.
    pub fn dependencies(&self) -> &'static [Phase] {
        match self {
            Phase::Hotels => &[],
            Phase::Rooms => &[Phase::Hotels],
            Phase::HotelForm => &[Phase::Rooms],
            Phase::Users => &[Phase::HotelForm],
            Phase::Engagement => &[Phase::Hotels, Phase::Users],
        }
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Hotels => "hotels",
            Phase::Rooms => "rooms",
            Phase::HotelForm => "hotel form",
            Phase::Users => "users",
            Phase::Engagement => "likes and reservations",
        };

        f.write_str(name)
    }
}

/// A phase and how many of its writes may be in flight at once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhasePlan {
    pub phase: Phase,
    pub concurrency: usize,
}

impl PhasePlan {
    /// A phase that writes one record at a time
    pub fn sequential(phase: Phase) -> Self {
        Self {
            phase,
            concurrency: 1,
        }
    }

    pub fn concurrent(phase: Phase, concurrency: usize) -> Self {
        Self {
            phase,
            concurrency: concurrency.max(1),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("The {phase} phase runs before {dependency}, which it depends on")]
    OutOfOrder { phase: Phase, dependency: Phase },
    #[error("The {0} phase is scheduled more than once")]
    Duplicate(Phase),
    #[error("The {0} phase is not scheduled")]
    Missing(Phase),
}

/// The order in which phases run.
///
/// A schedule always contains every phase exactly once, each after the phases it depends on.
#[derive(Debug, Clone)]
pub struct Schedule {
    plans: Vec<PhasePlan>,
}

impl Schedule {
    pub fn new(plans: Vec<PhasePlan>) -> Result<Self, ScheduleError> {
        for (position, plan) in plans.iter().enumerate() {
            let earlier = &plans[..position];

            if earlier.iter().any(|p| p.phase == plan.phase) {
                return Err(ScheduleError::Duplicate(plan.phase));
            }

            for dependency in plan.phase.dependencies() {
                if !earlier.iter().any(|p| p.phase == *dependency) {
                    return Err(ScheduleError::OutOfOrder {
                        phase: plan.phase,
                        dependency: *dependency,
                    });
                }
            }
        }

        if let Some(missing) = Phase::ALL
            .into_iter()
            .find(|phase| !plans.iter().any(|p| p.phase == *phase))
        {
            return Err(ScheduleError::Missing(missing));
        }

        Ok(Self { plans })
    }

    /// The usual order: hotels, rooms, form, users, then likes and reservations.
    ///
    /// Hotels are written `hotel_concurrency` at a time. Rooms are always written one at a time
    /// per hotel, with `room_concurrency` hotels handled at once.
    pub fn standard(hotel_concurrency: usize, room_concurrency: usize) -> Self {
        Self {
            plans: vec![
                PhasePlan::concurrent(Phase::Hotels, hotel_concurrency),
                PhasePlan::concurrent(Phase::Rooms, room_concurrency),
                PhasePlan::sequential(Phase::HotelForm),
                PhasePlan::sequential(Phase::Users),
                PhasePlan::sequential(Phase::Engagement),
            ],
        }
    }

    pub fn plans(&self) -> &[PhasePlan] {
        &self.plans
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::standard(8, 1)
    }
}
