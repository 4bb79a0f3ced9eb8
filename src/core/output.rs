use super::club::TableReport;
use super::event::ClientName;
use super::time::Time;
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};

/// Business-rule outcome attached to an event time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "notice", rename_all = "snake_case")]
pub enum Notice {
    NotOpenYet,
    YouShallNotPass,
    ClientUnknown,
    PlaceIsBusy,
    ICanWaitNoLonger,
    /// Outgoing code 11: forced leave or closing checkout
    ClientLeft { name: ClientName },
    /// Outgoing code 12: waiting client handed a freed table
    ClientSeated { name: ClientName, table: usize },
}

impl Notice {
    pub fn code(&self) -> u8 {
        match self {
            Notice::ClientLeft { .. } => 11,
            Notice::ClientSeated { .. } => 12,
            _ => 13,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = self.code();
        match self {
            Notice::NotOpenYet => write!(f, "{} NotOpenYet", code),
            Notice::YouShallNotPass => write!(f, "{} YouShallNotPass", code),
            Notice::ClientUnknown => write!(f, "{} ClientUnknown", code),
            Notice::PlaceIsBusy => write!(f, "{} PlaceIsBusy", code),
            Notice::ICanWaitNoLonger => write!(f, "{} ICanWaitNoLonger!", code),
            Notice::ClientLeft { name } => write!(f, "{} {}", code, name),
            Notice::ClientSeated { name, table } => write!(f, "{} {} {}", code, name, table),
        }
    }
}

/// Everything a replay writes, in emission order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Output {
    Opened { time: Time },
    /// Raw input line, echoed before its notices
    Echo { line: String },
    Notice {
        time: Time,
        #[serde(flatten)]
        notice: Notice,
    },
    Closed { time: Time },
    Report(TableReport),
}

impl Output {
    pub fn notice(time: Time, notice: Notice) -> Self {
        Output::Notice { time, notice }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Opened { time } | Output::Closed { time } => write!(f, "{}", time),
            Output::Echo { line } => f.write_str(line),
            Output::Notice { time, notice } => write!(f, "{} {}", time, notice),
            Output::Report(row) => write!(f, "{} {} {}", row.table, row.revenue, row.occupied_for),
        }
    }
}

/// Consumer of replay output
pub trait OutputSink {
    fn emit(&mut self, output: Output) -> io::Result<()>;
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn emit(&mut self, output: Output) -> io::Result<()> {
        (**self).emit(output)
    }
}

/// Collects records in memory
impl OutputSink for Vec<Output> {
    fn emit(&mut self, output: Output) -> io::Result<()> {
        self.push(output);
        Ok(())
    }
}

/// Writes one console line per record
pub struct LineSink<W: Write> {
    writer: W,
}

impl<W: Write> LineSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for LineSink<W> {
    fn emit(&mut self, output: Output) -> io::Result<()> {
        writeln!(self.writer, "{}", output)
    }
}

/// Writes one JSON object per record
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for JsonLinesSink<W> {
    fn emit(&mut self, output: Output) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, &output)?;
        self.writer.write_all(b"\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_lines() {
        let t = Time::new(9, 5);
        let cases = [
            (Output::Opened { time: t }, "09:05"),
            (Output::Echo { line: "09:05 1 a".to_string() }, "09:05 1 a"),
            (Output::notice(t, Notice::NotOpenYet), "09:05 13 NotOpenYet"),
            (Output::notice(t, Notice::YouShallNotPass), "09:05 13 YouShallNotPass"),
            (Output::notice(t, Notice::ClientUnknown), "09:05 13 ClientUnknown"),
            (Output::notice(t, Notice::PlaceIsBusy), "09:05 13 PlaceIsBusy"),
            (Output::notice(t, Notice::ICanWaitNoLonger), "09:05 13 ICanWaitNoLonger!"),
            (
                Output::notice(t, Notice::ClientLeft { name: "a".to_string() }),
                "09:05 11 a",
            ),
            (
                Output::notice(t, Notice::ClientSeated { name: "a".to_string(), table: 2 }),
                "09:05 12 a 2",
            ),
            (
                Output::Report(TableReport { table: 1, revenue: 70, occupied_for: Time::new(5, 58) }),
                "1 70 05:58",
            ),
        ];

        for (output, expected) in cases {
            assert_eq!(output.to_string(), expected);
        }
    }

    #[test]
    fn test_line_sink_writes_newlines() {
        let mut sink = LineSink::new(Vec::new());
        sink.emit(Output::Opened { time: Time::new(9, 0) }).unwrap();
        sink.emit(Output::Closed { time: Time::new(19, 0) }).unwrap();
        assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "09:00\n19:00\n");
    }

    #[test]
    fn test_json_lines_sink() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.emit(Output::notice(
            Time::new(10, 0),
            Notice::ClientSeated { name: "bob".to_string(), table: 1 },
        ))
        .unwrap();
        sink.emit(Output::Report(TableReport { table: 1, revenue: 20, occupied_for: Time::new(1, 5) }))
            .unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines[0]["type"], "notice");
        assert_eq!(lines[0]["time"], "10:00");
        assert_eq!(lines[0]["notice"], "client_seated");
        assert_eq!(lines[0]["name"], "bob");
        assert_eq!(lines[0]["table"], 1);
        assert_eq!(lines[1]["type"], "report");
        assert_eq!(lines[1]["revenue"], 20);
        assert_eq!(lines[1]["occupied_for"], "01:05");
    }
}
