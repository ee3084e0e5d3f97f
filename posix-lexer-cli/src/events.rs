//! Tracing configuration for the command-line interface.

use std::{collections::HashSet, fmt::Display};

use tracing_subscriber::{Layer, filter::Targets, layer::SubscriberExt, util::SubscriberInitExt};

/// Type of event to trace.
#[derive(Clone, Debug, Eq, Hash, PartialEq, clap::ValueEnum)]
pub enum TraceEvent {
    /// Traces configuration file loading.
    #[clap(name = "config")]
    Config,
    /// Traces reading of the input text.
    #[clap(name = "input")]
    Input,
    /// Traces the process of tokenizing input text.
    #[clap(name = "tokenize")]
    Tokenize,
}

impl Display for TraceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config => write!(f, "config"),
            Self::Input => write!(f, "input"),
            Self::Tokenize => write!(f, "tokenize"),
        }
    }
}

#[derive(Default)]
pub(crate) struct TraceEventConfig {
    enabled_trace_events: HashSet<TraceEvent>,
}

impl TraceEventConfig {
    fn new(enabled_log_events: &[TraceEvent]) -> Self {
        Self {
            enabled_trace_events: enabled_log_events.iter().cloned().collect(),
        }
    }

    /// Installs a global subscriber writing enabled events to stderr.
    pub fn init(enabled_log_events: &[TraceEvent]) -> Self {
        let config = Self::new(enabled_log_events);

        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .without_time()
            .with_target(false)
            .with_filter(config.compose_filter());

        if tracing_subscriber::registry()
            .with(layer)
            .try_init()
            .is_err()
        {
            // Something went wrong; proceed on anyway but complain audibly.
            eprintln!("warning: failed to initialize tracing.");
        }

        config
    }

    fn compose_filter(&self) -> Targets {
        let mut filter =
            Targets::new().with_default(tracing_subscriber::filter::LevelFilter::INFO);

        for event in &self.enabled_trace_events {
            let target = match event {
                TraceEvent::Config => "config",
                TraceEvent::Input => "input",
                TraceEvent::Tokenize => "tokenize",
            };

            filter = filter.with_target(target, tracing::Level::DEBUG);
        }

        filter
    }

    pub fn get_enabled_events(&self) -> &HashSet<TraceEvent> {
        &self.enabled_trace_events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_enables_only_selected_targets() {
        let config = TraceEventConfig::new(&[TraceEvent::Tokenize]);
        let filter = config.compose_filter();

        assert!(filter.would_enable("tokenize", &tracing::Level::DEBUG));
        assert!(!filter.would_enable("config", &tracing::Level::DEBUG));
        assert!(filter.would_enable("config", &tracing::Level::INFO));
    }

    #[test]
    fn duplicate_events_collapse() {
        let config = TraceEventConfig::new(&[TraceEvent::Input, TraceEvent::Input]);
        assert_eq!(config.get_enabled_events().len(), 1);
    }
}
