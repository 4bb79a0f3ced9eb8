use crate::core::errors::{ClubError, ClubResult};
use crate::core::event::{classify_line, Classified, Header};
use crate::core::execution::config::ReplayConfig;
use crate::core::handlers;
use crate::core::output::{Notice, Output, OutputSink};
use crate::core::state::ClubState;
use crate::core::time::Time;
use log::info;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Drives one replay: event lines in, output records out.
pub struct SimulationEngine<S: OutputSink> {
    state: ClubState,
    config: ReplayConfig,
    sink: S,
    lines_processed: u64,
}

impl<S: OutputSink> SimulationEngine<S> {
    /// Build the club from the header and emit the opening time.
    pub fn new(header: &Header, config: ReplayConfig, mut sink: S) -> ClubResult<Self> {
        info!(
            "club opens {}-{} with {} tables at {} per hour",
            header.opening, header.closing, header.table_count, header.price
        );
        sink.emit(Output::Opened {
            time: header.opening,
        })?;

        Ok(Self {
            state: ClubState::from_header(header, config.waiting_order),
            config,
            sink,
            lines_processed: 0,
        })
    }

    /// Classify and dispatch one event line.
    ///
    /// Fatal failures echo the line before returning the error.
    pub fn step(&mut self, line: &str) -> ClubResult<()> {
        self.lines_processed += 1;

        let classified = match classify_line(line, self.state.club.opening()) {
            Ok(classified) => classified,
            Err(err) => {
                self.echo(line)?;
                return Err(err);
            }
        };

        match classified {
            Classified::TooEarly(time) => {
                if self.config.echo_dropped_lines {
                    self.echo(line)?;
                }
                self.sink.emit(Output::notice(time, Notice::NotOpenYet))?;
            }
            Classified::Event(event) => {
                self.echo(line)?;
                let notices = handlers::dispatch(&mut self.state, &event)?;
                self.emit_notices(event.time, notices)?;
            }
        }
        Ok(())
    }

    /// Emit the closing time, check out every table and write the report.
    pub fn finish(mut self) -> ClubResult<(ClubState, S)> {
        let closing = self.state.club.closing();
        self.sink.emit(Output::Closed { time: closing })?;

        let notices = handlers::closing_sweep(&mut self.state)?;
        self.emit_notices(closing, notices)?;

        let report = self.state.club.report();
        let total: u64 = report.iter().map(|row| row.revenue).sum();
        for row in report {
            self.sink.emit(Output::Report(row))?;
        }

        info!(
            "club closed at {} after {} event lines, total revenue {}",
            closing, self.lines_processed, total
        );
        Ok((self.state, self.sink))
    }

    pub fn state(&self) -> &ClubState {
        &self.state
    }

    pub fn lines_processed(&self) -> u64 {
        self.lines_processed
    }

    fn echo(&mut self, line: &str) -> io::Result<()> {
        self.sink.emit(Output::Echo {
            line: line.to_string(),
        })
    }

    fn emit_notices(&mut self, time: Time, notices: Vec<Notice>) -> io::Result<()> {
        for notice in notices {
            self.sink.emit(Output::notice(time, notice))?;
        }
        Ok(())
    }
}

/// Replay a whole input: three header lines followed by event lines.
///
/// Returns the final state; everything observable goes to `sink`.
pub fn replay<I, S>(lines: I, config: ReplayConfig, sink: &mut S) -> ClubResult<ClubState>
where
    I: IntoIterator<Item = io::Result<String>>,
    S: OutputSink,
{
    let mut lines = lines.into_iter();

    let header = match read_header(&mut lines) {
        Ok(header) => header,
        Err(err) => {
            if let Some(line) = err.offending_line().filter(|line| !line.is_empty()) {
                sink.emit(Output::Echo {
                    line: line.to_string(),
                })?;
            }
            return Err(err);
        }
    };

    let mut engine = SimulationEngine::new(&header, config, &mut *sink)?;
    for line in lines {
        let line = line?;
        engine.step(trim_line_end(&line))?;
    }

    let (state, _) = engine.finish()?;
    Ok(state)
}

/// Replay the input held in a string.
pub fn replay_str<S: OutputSink>(input: &str, config: ReplayConfig, sink: &mut S) -> ClubResult<ClubState> {
    replay(input.lines().map(|line| Ok(line.to_string())), config, sink)
}

/// Open `path` and replay it.
pub fn run_file<P, S>(path: P, config: ReplayConfig, sink: &mut S) -> ClubResult<ClubState>
where
    P: AsRef<Path>,
    S: OutputSink,
{
    let file = File::open(path.as_ref())?;
    info!("replaying {}", path.as_ref().display());
    replay(BufReader::new(file).lines(), config, sink)
}

fn read_header<I>(lines: &mut I) -> ClubResult<Header>
where
    I: Iterator<Item = io::Result<String>>,
{
    let mut next = |what: &str| -> ClubResult<String> {
        match lines.next() {
            Some(line) => Ok(trim_line_end(&line?).to_string()),
            None => Err(ClubError::MalformedHeader {
                line: String::new(),
                reason: format!("missing {} line", what),
            }),
        }
    };

    let count = next("table count")?;
    let window = next("opening hours")?;
    let price = next("price")?;
    Header::parse(&count, &window, &price)
}

fn trim_line_end(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}
