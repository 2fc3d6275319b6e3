//! Console output for solver events.
//!
//! Provides a `tracing` layer that turns the solver's structured events
//! into one readable line each. Enabled with the `console` feature.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::OnceLock;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_DIRECTIVE: &str = "talkforge_solver=info";

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. `RUST_LOG`
/// overrides the default `talkforge_solver=info` filter. If another global
/// subscriber is already installed it is left in place.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(
                DEFAULT_DIRECTIVE
                    .parse()
                    .unwrap_or_else(|_| LevelFilter::INFO.into()),
            )
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SolverConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats talkforge solver events.
pub struct SolverConsoleLayer;

impl<S: Subscriber> Layer<S> for SolverConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("talkforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        if let Some(line) = format_event(&visitor) {
            let _ = writeln!(io::stderr().lock(), "{line}");
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    fields: Vec<(&'static str, String)>,
}

impl EventVisitor {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let value = format!("{value:?}").trim_matches('"').to_string();
        self.record_value(field, value);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_value(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record_value(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_value(field, value.to_string());
    }
}

impl EventVisitor {
    fn record_value(&mut self, field: &Field, value: String) {
        if field.name() == "event" {
            self.event = Some(value);
        } else {
            self.fields.push((field.name(), value));
        }
    }
}

fn format_event(v: &EventVisitor) -> Option<String> {
    let get = |name| v.field(name).unwrap_or("?");
    let line = match v.event.as_deref()? {
        "solve_start" => format!(
            "[Solver] solving {} talks over {} timeslots and {} rooms ({} run(s), seed {})",
            get("talk_count"),
            get("timeslot_count"),
            get("room_count"),
            get("run_count"),
            get("seed"),
        ),
        "capacity_warning" => format!(
            "[Solver] WARN {} talks but only {} (timeslot, room) pairs; at least {} will remain unassigned",
            get("talk_count"),
            get("capacity"),
            get("shortfall"),
        ),
        "phase_start" => format!("[{}] phase ({}) started", get("phase"), get("phase_index")),
        "phase_end" => format!(
            "[{}] phase ({}) ended: time spent ({}), best score ({}), move evaluation speed ({}/sec), step total ({})",
            get("phase"),
            get("phase_index"),
            format_duration_ms(v.field("duration_ms").and_then(|d| d.parse().ok()).unwrap_or(0)),
            get("score"),
            get("speed"),
            get("steps"),
        ),
        "new_best" => format!("    -> Step {:>7} | {}", get("step"), get("score")),
        "solve_end" => {
            let mut line = format!(
                "[Solver] solving ended: {} with score ({})",
                get("status"),
                get("score")
            );
            if let Some(unassigned) = v.field("unassigned").filter(|u| *u != "0") {
                let _ = write!(line, ", {unassigned} talk(s) unassigned");
            }
            line
        }
        _ => return None,
    };
    Some(line)
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}
