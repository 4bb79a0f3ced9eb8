use super::club::Club;
use super::event::Header;
use super::waiting::{WaitingOrder, WaitingSet};

/// Mutable state of one replay: the club and its waiting clients.
///
/// Owned by the driver and lent to one handler at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct ClubState {
    pub club: Club,
    pub waiting: WaitingSet,
}

impl ClubState {
    pub fn new(club: Club, order: WaitingOrder) -> Self {
        Self {
            club,
            waiting: WaitingSet::new(order),
        }
    }

    pub fn from_header(header: &Header, order: WaitingOrder) -> Self {
        Self::new(Club::from_header(header), order)
    }

    /// Seated at a table or waiting
    pub fn is_known(&self, name: &str) -> bool {
        self.club.is_client_present(name) || self.waiting.contains(name)
    }

    /// Check the cross-structure invariant: nobody waits while seated.
    pub fn is_consistent(&self) -> bool {
        self.club
            .tables()
            .filter_map(|(_, table)| table.occupant())
            .all(|name| !self.waiting.contains(name))
    }
}
