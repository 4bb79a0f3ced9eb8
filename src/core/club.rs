use super::errors::{ClubError, ClubResult};
use super::event::{ClientName, Header};
use super::time::Time;
use log::debug;
use serde::Serialize;

/// One table with its occupancy and running totals.
///
/// A table is occupied exactly when it has an occupant, so the flag and the
/// name cannot disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    occupant: Option<ClientName>,
    started_at: Time,
    occupied_for: Time,
    revenue: u64,
}

impl Table {
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn occupant(&self) -> Option<&str> {
        self.occupant.as_deref()
    }

    /// Time the current occupant sat down
    pub fn started_at(&self) -> Time {
        self.started_at
    }

    /// Accumulated occupied duration
    pub fn occupied_for(&self) -> Time {
        self.occupied_for
    }

    pub fn revenue(&self) -> u64 {
        self.revenue
    }

    fn seat(&mut self, name: ClientName, at: Time) {
        self.occupant = Some(name);
        self.started_at = at;
    }

    /// Free the table and bill the finished stay. Returns the occupant that
    /// left, or `None` if the table was already free.
    fn check_out(&mut self, at: Time, price: u32) -> Option<ClientName> {
        let occupant = self.occupant.take()?;
        self.occupied_for.accumulate_stay(self.started_at, at);
        let billed = u64::from(Time::billed_hours(self.started_at, at));
        self.revenue = self.revenue.saturating_add(u64::from(price) * billed);
        Some(occupant)
    }
}

/// Final report row for one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableReport {
    pub table: usize,
    pub revenue: u64,
    pub occupied_for: Time,
}

/// Club state for one replay: tables `1..=N`, opening hours and price
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Club {
    tables: Vec<Table>,
    opening: Time,
    closing: Time,
    price: u32,
}

impl Club {
    pub fn new(table_count: usize, opening: Time, closing: Time, price: u32) -> Self {
        Self {
            tables: vec![Table::default(); table_count],
            opening,
            closing,
            price,
        }
    }

    pub fn from_header(header: &Header) -> Self {
        Self::new(header.table_count, header.opening, header.closing, header.price)
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn opening(&self) -> Time {
        self.opening
    }

    pub fn closing(&self) -> Time {
        self.closing
    }

    pub fn price(&self) -> u32 {
        self.price
    }

    /// Table by its 1-based index
    pub fn table(&self, index: usize) -> Option<&Table> {
        index.checked_sub(1).and_then(|i| self.tables.get(i))
    }

    /// Tables paired with their 1-based indices
    pub fn tables(&self) -> impl Iterator<Item = (usize, &Table)> {
        self.tables.iter().enumerate().map(|(i, table)| (i + 1, table))
    }

    /// True if `name` occupies any table
    pub fn is_client_present(&self, name: &str) -> bool {
        self.table_of(name).is_some()
    }

    /// Index of the table `name` occupies
    pub fn table_of(&self, name: &str) -> Option<usize> {
        self.tables()
            .find(|(_, table)| table.occupant() == Some(name))
            .map(|(index, _)| index)
    }

    /// True if the table is unoccupied.
    ///
    /// Fails with `IndexOutOfRange` for indices outside `1..=N`.
    pub fn is_table_free(&self, index: usize) -> ClubResult<bool> {
        Ok(!self.table_checked(index)?.is_occupied())
    }

    pub fn has_any_free_table(&self) -> bool {
        self.tables.iter().any(|table| !table.is_occupied())
    }

    /// Put `name` at table `index` starting at `at`
    pub fn seat(&mut self, index: usize, name: ClientName, at: Time) -> ClubResult<()> {
        let table = self.table_checked_mut(index)?;
        debug!("{} takes table {} at {}", name, index, at);
        table.seat(name, at);
        Ok(())
    }

    /// Free table `index` at `at`, adding the stay to its duration and
    /// revenue. Returns the client that left, `None` if the table was free.
    pub fn check_out(&mut self, index: usize, at: Time) -> ClubResult<Option<ClientName>> {
        let price = self.price;
        let table = self.table_checked_mut(index)?;
        let left = table.check_out(at, price);
        if let Some(name) = &left {
            debug!(
                "{} leaves table {} at {} (total {}, revenue {})",
                name,
                index,
                at,
                table.occupied_for(),
                table.revenue()
            );
        }
        Ok(left)
    }

    pub fn report(&self) -> Vec<TableReport> {
        self.tables()
            .map(|(index, table)| TableReport {
                table: index,
                revenue: table.revenue(),
                occupied_for: table.occupied_for(),
            })
            .collect()
    }

    fn table_checked(&self, index: usize) -> ClubResult<&Table> {
        let table_count = self.table_count();
        self.table(index)
            .ok_or(ClubError::IndexOutOfRange { index, table_count })
    }

    fn table_checked_mut(&mut self, index: usize) -> ClubResult<&mut Table> {
        let table_count = self.table_count();
        index
            .checked_sub(1)
            .and_then(|i| self.tables.get_mut(i))
            .ok_or(ClubError::IndexOutOfRange { index, table_count })
    }
}
