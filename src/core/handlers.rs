//! Handlers for the four incoming event kinds and the closing sweep.
//!
//! Each handler validates the event against [`ClubState`], mutates it and
//! returns the notices to emit at the event time. Business-rule violations
//! are notices; only an out-of-range table index is an error.

use super::errors::ClubResult;
use super::event::{Event, EventKind};
use super::output::Notice;
use super::state::ClubState;
use super::time::Time;
use log::{debug, trace};

/// Route an event to its handler
pub fn dispatch(state: &mut ClubState, event: &Event) -> ClubResult<Vec<Notice>> {
    let at = event.time;
    trace!("{} event {} for {}", at, event.kind.code(), event.kind.client());
    match &event.kind {
        EventKind::Arrival { name } => Ok(arrival(state, name, at)),
        EventKind::SeatRequest { name, table } => seat_request(state, name, *table, at),
        EventKind::WaitNotice { name } => Ok(wait_notice(state, name)),
        EventKind::Departure { name } => departure(state, name, at),
    }
}

/// Kind 1: a new client enters and starts waiting.
pub fn arrival(state: &mut ClubState, name: &str, at: Time) -> Vec<Notice> {
    if state.is_known(name) {
        return vec![Notice::YouShallNotPass];
    }

    debug!("{} arrives at {} and waits", name, at);
    state.waiting.insert(name.to_string());
    Vec::new()
}

/// Kind 2: a known client asks for a specific table.
///
/// A client that already sits elsewhere keeps the old table too; it stays
/// occupied until a departure or the closing sweep frees it.
pub fn seat_request(
    state: &mut ClubState,
    name: &str,
    table: usize,
    at: Time,
) -> ClubResult<Vec<Notice>> {
    if !state.is_known(name) {
        return Ok(vec![Notice::ClientUnknown]);
    }

    if !state.club.is_table_free(table)? {
        return Ok(vec![Notice::PlaceIsBusy]);
    }

    state.club.seat(table, name.to_string(), at)?;
    state.waiting.remove(name);
    Ok(Vec::new())
}

/// Kind 3: a client says they will wait.
///
/// Both checks run independently. Waiting while a table is free is reported
/// but changes nothing; a queue longer than the number of tables sends the
/// client away.
pub fn wait_notice(state: &mut ClubState, name: &str) -> Vec<Notice> {
    let mut notices = Vec::new();

    if state.club.has_any_free_table() && state.waiting.contains(name) {
        notices.push(Notice::ICanWaitNoLonger);
    }

    if state.waiting.len() > state.club.table_count() {
        debug!(
            "queue of {} exceeds {} tables, {} leaves",
            state.waiting.len(),
            state.club.table_count(),
            name
        );
        state.waiting.remove(name);
        notices.push(Notice::ClientLeft {
            name: name.to_string(),
        });
    }

    notices
}

/// Kind 4: a client leaves the club.
///
/// A freed table goes straight to the next waiting client. A client that is
/// only waiting stays in the queue. If the client holds several tables, the
/// lowest-numbered one is freed.
pub fn departure(state: &mut ClubState, name: &str, at: Time) -> ClubResult<Vec<Notice>> {
    if !state.is_known(name) {
        return Ok(vec![Notice::ClientUnknown]);
    }

    let Some(table) = state.club.table_of(name) else {
        debug!("{} is not seated at {}, still waiting", name, at);
        return Ok(Vec::new());
    };

    state.club.check_out(table, at)?;

    let mut notices = Vec::new();
    if let Some(next) = state.waiting.pop_next() {
        state.club.seat(table, next.clone(), at)?;
        notices.push(Notice::ClientSeated { name: next, table });
    }
    Ok(notices)
}

/// Check out every occupied table at closing time, in table order.
///
/// Nobody is seated from the queue; the returned notices name each client
/// sent away.
pub fn closing_sweep(state: &mut ClubState) -> ClubResult<Vec<Notice>> {
    let closing = state.club.closing();
    let occupied: Vec<usize> = state
        .club
        .tables()
        .filter(|(_, table)| table.is_occupied())
        .map(|(index, _)| index)
        .collect();

    let mut notices = Vec::with_capacity(occupied.len());
    for index in occupied {
        if let Some(name) = state.club.check_out(index, closing)? {
            notices.push(Notice::ClientLeft { name });
        }
    }
    Ok(notices)
}
