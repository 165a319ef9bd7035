use std::{fmt::Display, time::Duration};

use log::info;

/// What a seed run wrote. Only logged, never stored.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub hotels: usize,
    pub rooms: usize,
    pub forms: usize,
    pub likes: usize,
    pub reservations: usize,
    /// The uids of the created users, in creation order
    pub user_ids: Vec<String>,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn users(&self) -> usize {
        self.user_ids.len()
    }

    /// Logs the summary line by line.
    pub fn log(&self) {
        for line in self.to_string().lines() {
            info!("{line}");
        }
    }
}

impl Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Seed summary ({:.2?}):", self.elapsed)?;
        writeln!(f, "  - Hotels: {}", self.hotels)?;
        writeln!(f, "  - Rooms: {}", self.rooms)?;
        writeln!(f, "  - Reservation forms: {}", self.forms)?;
        writeln!(f, "  - Test users: {}", self.users())?;
        writeln!(f, "  - Likes: {}", self.likes)?;
        writeln!(f, "  - Reservations: {}", self.reservations)?;
        writeln!(f, "Test users:")?;

        for (i, user_id) in self.user_ids.iter().enumerate() {
            writeln!(f, "  {}. {user_id}", i + 1)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::RunReport;

    #[test]
    fn summary_lists_counts_and_users() {
        let report = RunReport {
            hotels: 3,
            rooms: 6,
            forms: 1,
            likes: 9,
            reservations: 4,
            user_ids: vec!["a".to_string(), "b".to_string()],
            ..Default::default()
        };

        let summary = report.to_string();

        assert!(summary.contains("Hotels: 3"));
        assert!(summary.contains("Rooms: 6"));
        assert!(summary.contains("Test users: 2"));
        assert!(summary.contains("Likes: 9"));
        assert!(summary.contains("Reservations: 4"));
        assert!(summary.contains("  2. b"));
    }
}
