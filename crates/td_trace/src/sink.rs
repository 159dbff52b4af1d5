//! Forwarding trace payloads to the `log` facade.

use alloc::sync::Arc;
use core::fmt;

use td_reflect::Trace;

use crate::gate::{TracePayload, ensure_serializable};

/// Target of the records emitted by [`log_payload`].
pub const LOG_TARGET: &str = "td_trace::sink";

// -----------------------------------------------------------------------------
// TraceLevel

/// Severity and kind of a trace event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TraceLevel {
    Critical,
    Error,
    Warning,
    Information,
    Verbose,
    Start,
    Stop,
    Suspend,
    Resume,
    Transfer,
}

impl TraceLevel {
    pub const ALL: [TraceLevel; 10] = [
        Self::Critical,
        Self::Error,
        Self::Warning,
        Self::Information,
        Self::Verbose,
        Self::Start,
        Self::Stop,
        Self::Suspend,
        Self::Resume,
        Self::Transfer,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::Information => "Information",
            Self::Verbose => "Verbose",
            Self::Start => "Start",
            Self::Stop => "Stop",
            Self::Suspend => "Suspend",
            Self::Resume => "Resume",
            Self::Transfer => "Transfer",
        }
    }

    /// A human readable description of the level.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Critical => "Fatal error or application crash",
            Self::Error => "Recoverable error",
            Self::Warning => "Noncritical problem",
            Self::Information => "Informational message",
            Self::Verbose => "Debugging trace",
            Self::Start => "Starting of a logical operation",
            Self::Stop => "Stopping of a logical operation",
            Self::Suspend => "Suspension of a logical operation",
            Self::Resume => "Resumption of a logical operation",
            Self::Transfer => "Changing of correlation identity",
        }
    }

    /// The category under which events of this level are filed.
    pub const fn category(self) -> &'static str {
        match self {
            Self::Critical => "Critical Error",
            Self::Verbose => "Debug Message",
            Self::Information => "Informational Message",
            Self::Start => "Start Operation",
            Self::Stop => "Stop Operation",
            Self::Suspend => "Suspend Operation",
            Self::Resume => "Resume Operation",
            Self::Transfer => "Correlation change",
            Self::Error | Self::Warning => self.name(),
        }
    }

    /// The `log` level events of this level are emitted at.
    ///
    /// Activity events (start, stop, suspend, resume, transfer) are `Trace`.
    pub const fn log_level(self) -> log::Level {
        match self {
            Self::Critical | Self::Error => log::Level::Error,
            Self::Warning => log::Level::Warn,
            Self::Information => log::Level::Info,
            Self::Verbose => log::Level::Debug,
            Self::Start | Self::Stop | Self::Suspend | Self::Resume | Self::Transfer => log::Level::Trace,
        }
    }
}

impl fmt::Display for TraceLevel {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// -----------------------------------------------------------------------------
// log_payload

/// Gates `payload` and emits it as a `log` record.
///
/// The payload is rendered only when the level is enabled. The gated
/// payload is returned either way, so further sinks can reuse it.
pub fn log_payload(level: TraceLevel, event_id: u32, payload: Option<Arc<dyn Trace>>) -> Option<TracePayload> {
    let payload = ensure_serializable(payload);

    let log_level = level.log_level();
    if !log::log_enabled!(target: LOG_TARGET, log_level) {
        return payload;
    }

    match &payload {
        None => log::log!(target: LOG_TARGET, log_level, "[{event_id}] {}", level.description()),
        Some(gated) => match gated.render() {
            Ok(text) => log::log!(
                target: LOG_TARGET,
                log_level,
                "[{event_id}] {}: {text}",
                level.description()
            ),
            Err(error) => log::warn!(target: LOG_TARGET, "[{event_id}] payload could not be rendered: {error}"),
        },
    }
    payload
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use alloc::vec;

    use td_reflect::Trace;

    use super::{TraceLevel, log_payload};

    #[test]
    fn level_texts() {
        assert_eq!(TraceLevel::Error.category(), "Error");
        assert_eq!(TraceLevel::Verbose.category(), "Debug Message");
        assert_eq!(TraceLevel::Transfer.description(), "Changing of correlation identity");
        assert_eq!(TraceLevel::Warning.to_string(), "Warning");
    }

    #[test]
    fn log_levels() {
        assert_eq!(TraceLevel::Critical.log_level(), log::Level::Error);
        assert_eq!(TraceLevel::Information.log_level(), log::Level::Info);
        assert!(
            TraceLevel::ALL[5..]
                .iter()
                .all(|level| level.log_level() == log::Level::Trace)
        );
    }

    #[test]
    fn payload_is_returned_gated() {
        let value: Arc<dyn Trace> = Arc::new(vec![1_i32]);
        let payload = log_payload(TraceLevel::Error, 1, Some(value)).unwrap();
        assert!(payload.is_wrapped());

        let number: Arc<dyn Trace> = Arc::new(1_i32);
        let payload = log_payload(TraceLevel::Verbose, 2, Some(number)).unwrap();
        assert!(!payload.is_wrapped());

        assert!(log_payload(TraceLevel::Start, 3, None).is_none());
    }
}
