use super::errors::{ClubError, ClubResult};
use super::time::Time;
use log::trace;

pub type ClientName = String;

/// Incoming event kinds with their positional arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Kind 1
    Arrival { name: ClientName },
    /// Kind 2
    SeatRequest { name: ClientName, table: usize },
    /// Kind 3
    WaitNotice { name: ClientName },
    /// Kind 4
    Departure { name: ClientName },
}

impl EventKind {
    pub fn code(&self) -> u8 {
        match self {
            EventKind::Arrival { .. } => 1,
            EventKind::SeatRequest { .. } => 2,
            EventKind::WaitNotice { .. } => 3,
            EventKind::Departure { .. } => 4,
        }
    }

    pub fn client(&self) -> &str {
        match self {
            EventKind::Arrival { name }
            | EventKind::SeatRequest { name, .. }
            | EventKind::WaitNotice { name }
            | EventKind::Departure { name } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub time: Time,
    pub kind: EventKind,
}

impl Event {
    pub fn new(time: Time, kind: EventKind) -> Self {
        Self { time, kind }
    }
}

/// Result of classifying one event line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    /// Timestamp precedes opening time; nothing after the time was parsed
    TooEarly(Time),
    Event(Event),
}

/// Turn one raw event line into a [`Classified`] value.
///
/// Fails with `MalformedTime`, `UnknownEventKind` or `MalformedArgument`;
/// each of these is fatal for the whole replay.
pub fn classify_line(line: &str, opening: Time) -> ClubResult<Classified> {
    let time = line
        .get(..5)
        .and_then(Time::parse_field)
        .ok_or_else(|| ClubError::MalformedTime { line: line.to_string() })?;

    if time < opening {
        trace!("{} precedes opening {}, dropping", time, opening);
        return Ok(Classified::TooEarly(time));
    }

    let rest = line[5..]
        .strip_prefix(' ')
        .ok_or_else(|| malformed(line, "expected a space after the time"))?;

    let (kind_token, args) = match rest.split_once(' ') {
        Some((kind, args)) => (kind, Some(args)),
        None => (rest, None),
    };

    let kind = match kind_token.parse::<u8>() {
        Ok(1) => EventKind::Arrival { name: single_name(line, args)? },
        Ok(2) => {
            let (name, table) = name_and_table(line, args)?;
            EventKind::SeatRequest { name, table }
        }
        Ok(3) => EventKind::WaitNotice { name: single_name(line, args)? },
        Ok(4) => EventKind::Departure { name: single_name(line, args)? },
        _ => return Err(ClubError::UnknownEventKind { line: line.to_string() }),
    };

    Ok(Classified::Event(Event::new(time, kind)))
}

fn malformed(line: &str, reason: &str) -> ClubError {
    ClubError::MalformedArgument {
        line: line.to_string(),
        reason: reason.to_string(),
    }
}

fn single_name(line: &str, args: Option<&str>) -> ClubResult<ClientName> {
    let name = args.ok_or_else(|| malformed(line, "missing client name"))?;
    if name.is_empty() {
        return Err(malformed(line, "empty client name"));
    }
    if name.contains(' ') {
        return Err(malformed(line, "unexpected token after client name"));
    }
    Ok(name.to_string())
}

fn name_and_table(line: &str, args: Option<&str>) -> ClubResult<(ClientName, usize)> {
    let args = args.ok_or_else(|| malformed(line, "missing client name"))?;
    let (name, table) = args
        .split_once(' ')
        .ok_or_else(|| malformed(line, "missing table index"))?;

    if name.is_empty() {
        return Err(malformed(line, "empty client name"));
    }
    if table.is_empty() || !table.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(line, "table index is not a non-negative integer"));
    }
    let table = table
        .parse::<usize>()
        .map_err(|_| malformed(line, "table index does not fit"))?;

    Ok((name.to_string(), table))
}

/// The three header lines of an input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub table_count: usize,
    pub opening: Time,
    pub closing: Time,
    pub price: u32,
}

impl Header {
    /// Parse table count, `HH:MM HH:MM` window and hourly price.
    pub fn parse(count_line: &str, window_line: &str, price_line: &str) -> ClubResult<Header> {
        let table_count = parse_unsigned::<usize>(count_line)
            .filter(|&n| n > 0)
            .ok_or_else(|| header_error(count_line, "table count must be a positive integer"))?;

        let (opening, closing) = parse_window(window_line)
            .ok_or_else(|| header_error(window_line, "expected `HH:MM HH:MM`"))?;

        let price = parse_unsigned::<u32>(price_line)
            .ok_or_else(|| header_error(price_line, "price must be a non-negative integer"))?;

        Ok(Header {
            table_count,
            opening,
            closing,
            price,
        })
    }
}

fn header_error(line: &str, reason: &str) -> ClubError {
    ClubError::MalformedHeader {
        line: line.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_unsigned<T: std::str::FromStr>(field: &str) -> Option<T> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

fn parse_window(line: &str) -> Option<(Time, Time)> {
    if line.len() != 11 || line.as_bytes()[5] != b' ' {
        return None;
    }
    let opening = Time::parse_field(line.get(..5)?)?;
    let closing = Time::parse_field(line.get(6..)?)?;
    Some((opening, closing))
}
