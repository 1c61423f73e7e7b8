//! Concurrent parse orchestration.
//!
//! A parse runs as a small pipeline of threads:
//!
//! ```text
//!                    ┌─ worker ─┐  statements  ┌────────────┐
//! reader ─ lines ──▶ ├─ worker ─┤ ───────────▶ │ aggregator │ ─▶ Netlist
//!  (bounded)         └─ worker ─┘              └────────────┘
//!                         │      diagnostics   ┌────────────┐
//!                         └──────────────────▶ │ collector  │ ─▶ Vec<Diagnostic>
//!                                 (bounded)    └────────────┘
//! ```
//!
//! Workers are stateless. The aggregator thread is the only owner of the
//! [`Netlist`] and the collector the only owner of the diagnostic list, so
//! no lock guards either. Each stage stops when every sender feeding it has
//! been dropped. Once all threads are joined, semantic validation appends
//! its findings to the returned list directly.

mod aggregate;
mod config;

pub use aggregate::Aggregate;
pub use config::{ParserConfig, DEFAULT_QUEUE_CAPACITY};

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};
use serde::Serialize;

use crate::error::{NetlistError, Result};
use crate::netlist::{validate_netlist, Diagnostic, Netlist};
use crate::parser::{parse_line, Parsed};

/// The result of a completed parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseOutcome {
    /// The assembled netlist
    pub netlist: Netlist,
    /// Every non-fatal problem found, in no particular order unless sorted
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutcome {
    /// Whether any ERROR diagnostic was raised.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Number of ERROR diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Serialize the netlist as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.netlist)?)
    }
}

/// Parser front-end that owns the configuration.
#[derive(Debug, Clone, Default)]
pub struct ParseSession {
    config: ParserConfig,
}

impl ParseSession {
    /// Create a session with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// The session's configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a netlist file.
    pub fn parse_file(&self, path: &Path) -> Result<ParseOutcome> {
        let file = File::open(path)
            .map_err(|e| NetlistError::file_read(path.display().to_string(), e))?;
        self.parse_reader(BufReader::new(file))
    }

    /// Parse a netlist held in memory.
    pub fn parse_str(&self, input: &str) -> Result<ParseOutcome> {
        self.parse_reader(input.as_bytes())
    }

    /// Parse a netlist from any line source.
    ///
    /// A read failure is fatal, but is only returned once the lines already
    /// dispatched have been fully processed.
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<ParseOutcome> {
        let workers = self.config.worker_count();
        let warn_dropped = self.config.warn_on_dropped_params;
        let _span = tracing::info_span!("parse_session", workers).entered();

        let (line_tx, line_rx) = bounded::<(usize, String)>(self.config.line_queue_capacity);
        let (stmt_tx, stmt_rx) = bounded::<(usize, Parsed)>(self.config.line_queue_capacity);
        let (diag_tx, diag_rx) = bounded::<Diagnostic>(self.config.error_queue_capacity);

        let (read_result, pool_result, netlist, diagnostics) = thread::scope(|s| {
            let aggregator = s.spawn(move || {
                let mut aggregate = Aggregate::new();
                for (line, parsed) in stmt_rx {
                    aggregate.apply(line, parsed);
                }
                aggregate.into_netlist()
            });
            let collector = s.spawn(move || diag_rx.into_iter().collect::<Vec<_>>());

            let pool: Vec<_> = (0..workers)
                .map(|id| {
                    let lines = line_rx.clone();
                    let statements = stmt_tx.clone();
                    let diagnostics = diag_tx.clone();
                    s.spawn(move || run_worker(id, lines, statements, diagnostics, warn_dropped))
                })
                .collect();

            // Only the workers may hold these ends, so the downstream stages
            // see disconnection as soon as the pool exits.
            drop(line_rx);
            drop(stmt_tx);
            drop(diag_tx);

            let read_result = feed_lines(reader, line_tx);

            let mut pool_result = Ok(());
            for handle in pool {
                if handle.join().is_err() {
                    pool_result = Err(NetlistError::worker_panicked("worker"));
                }
            }
            let netlist = aggregator
                .join()
                .map_err(|_| NetlistError::worker_panicked("aggregator"));
            let diagnostics = collector
                .join()
                .map_err(|_| NetlistError::worker_panicked("diagnostic collector"));

            (read_result, pool_result, netlist, diagnostics)
        });

        let feed = read_result?;
        pool_result?;
        let mut netlist = netlist?;
        let mut diagnostics = diagnostics?;

        diagnostics.extend(feed.lossy_lines.iter().map(|&line| {
            Diagnostic::warning(line, "line is not valid UTF-8; undecodable bytes replaced")
        }));
        diagnostics.extend(validate_netlist(&netlist));

        if self.config.sort_output {
            netlist.sort_by_line();
            diagnostics.sort();
        }

        tracing::info!(
            lines = feed.lines,
            components = netlist.components.len(),
            models = netlist.models.len(),
            commands = netlist.commands.len(),
            diagnostics = diagnostics.len(),
            "netlist parsed"
        );

        Ok(ParseOutcome {
            netlist,
            diagnostics,
        })
    }
}

/// What the reader saw while feeding the queue.
#[derive(Debug, Default)]
struct FeedSummary {
    /// Number of lines read
    lines: usize,
    /// Lines that had to be decoded lossily
    lossy_lines: Vec<usize>,
}

/// Stream numbered lines into the queue, blocking while it is full.
///
/// Lines are read as raw bytes; invalid UTF-8 is replaced rather than
/// rejected, so only an I/O failure is fatal. Dropping the sender on return
/// closes the queue.
fn feed_lines<R: BufRead>(mut reader: R, lines: Sender<(usize, String)>) -> Result<FeedSummary> {
    let mut summary = FeedSummary::default();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let line = summary.lines + 1;
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| NetlistError::ReadError { line, source })?;
        if read == 0 {
            break;
        }
        while matches!(buf.last(), Some(b'\n' | b'\r')) {
            buf.pop();
        }
        let text = match String::from_utf8_lossy(&buf) {
            Cow::Borrowed(text) => text.to_string(),
            Cow::Owned(text) => {
                summary.lossy_lines.push(line);
                text
            }
        };
        summary.lines = line;
        if lines.send((line, text)).is_err() {
            // Every worker is gone; the join below reports why.
            break;
        }
    }
    Ok(summary)
}

fn run_worker(
    id: usize,
    lines: Receiver<(usize, String)>,
    statements: Sender<(usize, Parsed)>,
    diagnostics: Sender<Diagnostic>,
    warn_dropped: bool,
) {
    let mut processed = 0usize;
    'lines: for (line, text) in lines {
        let output = parse_line(line, &text, warn_dropped);
        if let Some(parsed) = output.parsed {
            if statements.send((line, parsed)).is_err() {
                break;
            }
        }
        for diag in output.diagnostics {
            if diagnostics.send(diag).is_err() {
                break 'lines;
            }
        }
        processed += 1;
    }
    tracing::debug!(worker = id, processed, "worker finished");
}

/// Parse a netlist string with default configuration.
pub fn parse_str(input: &str) -> Result<ParseOutcome> {
    ParseSession::new().parse_str(input)
}

/// Parse a netlist from a line source with default configuration.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<ParseOutcome> {
    ParseSession::new().parse_reader(reader)
}

/// Parse a netlist file with default configuration.
pub fn parse_file(path: &Path) -> Result<ParseOutcome> {
    ParseSession::new().parse_file(path)
}

#[cfg(test)]
mod tests {
    use std::io::{self, Read};

    use approx::assert_relative_eq;

    use super::*;
    use crate::netlist::{ComponentType, Severity};

    const AMP: &str = "\
* Common-source stage
.model nch NMOS (vto=0.7 kp=110u)
RD vdd out 10k
M1 out in 0 0 nch
CL out 0 1p
.tran tstep=1n tstop=10u
.end
";

    #[test]
    fn test_parse_amp() {
        let outcome = parse_str(AMP).unwrap();
        let netlist = &outcome.netlist;
        assert_eq!(netlist.title, "Common-source stage");
        assert_eq!(netlist.components.len(), 3);
        assert_eq!(netlist.commands.len(), 2);
        assert_eq!(netlist.models.len(), 1);
        assert_relative_eq!(netlist.models["nch"].params["kp"], 110e-6);
        assert!(outcome.diagnostics.is_empty());
        assert!(!outcome.has_errors());
    }

    #[test]
    fn test_diagnostics_do_not_stop_parsing() {
        let input = "R1 a b 1k\nQ1 c b e\nR2 a\nC1 a 0 1u\n.model\n";
        let outcome = ParseSession::with_config(ParserConfig::new().with_sorted_output(true))
            .parse_str(input)
            .unwrap();

        assert_eq!(outcome.netlist.components.len(), 2);
        let lines: Vec<usize> = outcome.diagnostics.iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![2, 3, 5]);
        assert_eq!(outcome.error_count(), 3);
    }

    #[test]
    fn test_undefined_model_after_validation() {
        let outcome = parse_str("M1 d g s b nch\nM2 d g s b pch\n.model pch PMOS\n").unwrap();
        assert_eq!(outcome.diagnostics.len(), 1);
        let diag = &outcome.diagnostics[0];
        assert_eq!(diag.line, 1);
        assert_eq!(diag.message, "undefined model: nch");
        assert_eq!(diag.severity, Severity::Error);
    }

    #[test]
    fn test_sorted_output_follows_source_order() {
        let input: String = (1..=50).map(|i| format!("R{} n{} 0 {}k\n", i, i, i)).collect();
        let config = ParserConfig::new().with_workers(4).with_sorted_output(true);
        let outcome = ParseSession::with_config(config).parse_str(&input).unwrap();

        let lines: Vec<usize> = outcome.netlist.components.iter().map(|c| c.line).collect();
        assert_eq!(lines, (1..=50).collect::<Vec<_>>());
        assert!(outcome
            .netlist
            .components
            .iter()
            .all(|c| c.component_type == ComponentType::Resistor));
    }

    #[test]
    fn test_line_count_survives_pool_result() {
        let outcome = ParseSession::with_config(ParserConfig::new().with_workers(2))
            .parse_str("R1 a b 1k\n\n.op\n")
            .unwrap();
        assert_eq!(outcome.netlist.components.len(), 1);
        assert_eq!(outcome.netlist.commands.len(), 1);
    }

    #[test]
    fn test_worker_stops_when_collector_is_gone() {
        let (line_tx, line_rx) = bounded(4);
        let (stmt_tx, stmt_rx) = bounded(4);
        let (diag_tx, diag_rx) = bounded::<Diagnostic>(4);
        drop(diag_rx);

        line_tx.send((1, "Q1 a b c".to_string())).unwrap();
        line_tx.send((2, "R1 a b 1k".to_string())).unwrap();
        drop(line_tx);

        run_worker(0, line_rx.clone(), stmt_tx, diag_tx, true);

        // The worker quit on line 1, so line 2 is still queued and unparsed.
        assert_eq!(line_rx.try_recv().unwrap().0, 2);
        assert!(stmt_rx.try_recv().is_err());
    }

    #[test]
    fn test_tiny_queues_still_drain() {
        let input: String = (1..=200).map(|i| format!("Q{} a b c\n", i)).collect();
        let config = ParserConfig::new()
            .with_workers(3)
            .with_line_queue_capacity(1)
            .with_error_queue_capacity(1);
        let outcome = ParseSession::with_config(config).parse_str(&input).unwrap();
        assert_eq!(outcome.diagnostics.len(), 200);
        assert!(outcome.netlist.components.is_empty());
    }

    /// Yields a few good lines, then fails.
    struct FailingReader {
        data: io::Cursor<Vec<u8>>,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::new(io::ErrorKind::Other, "device unplugged")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn test_read_failure_is_fatal() {
        let reader = io::BufReader::new(FailingReader {
            data: io::Cursor::new(b"R1 a b 1k\nR2 a b 2k\n".to_vec()),
        });
        let err = parse_reader(reader).unwrap_err();
        assert!(matches!(err, NetlistError::ReadError { line: 3, .. }));
    }

    #[test]
    fn test_latin1_lines_are_content_not_fatal() {
        let input: &[u8] = b"* Verst\xe4rker\r\nR1 n\xe4 0 1k\r\nC1 a b 1n\n";
        let config = ParserConfig::new().with_sorted_output(true);
        let outcome = ParseSession::with_config(config).parse_reader(input).unwrap();

        assert_eq!(outcome.netlist.title, "Verst\u{FFFD}rker");
        assert_eq!(outcome.netlist.components.len(), 2);
        assert_eq!(outcome.netlist.components[0].nodes, vec!["n\u{FFFD}", "0"]);
        assert_eq!(outcome.netlist.components[1].nodes, vec!["a", "b"]);

        let lines: Vec<usize> = outcome.diagnostics.iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![1, 2]);
        assert!(outcome
            .diagnostics
            .iter()
            .all(|d| d.severity == Severity::Warning));
        assert!(!outcome.has_errors());
    }

    #[test]
    fn test_json_shape() {
        let outcome = parse_str(AMP).unwrap();
        let json: serde_json::Value = serde_json::from_str(&outcome.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["title"], "Common-source stage");
        assert_eq!(json["models"]["nch"]["type"], "NMOS");
        assert!(json["components"].as_array().unwrap().len() == 3);
        assert!(json["commands"].is_array());
    }
}
