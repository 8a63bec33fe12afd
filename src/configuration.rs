//! Config for the resolver behaviors
//!
//! Configuration is created programmatically using [`Configuration::new()`] and the `with_*`
//! builders.

use std::time::Duration;

/// How long a UI is expected to show a round's result before moving on, by default.
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(1500);

/// Configuration for resolver behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    pub(crate) verbose: bool,
    pub(crate) log: bool,
    pub(crate) auto_advance: bool,
    pub(crate) reveal_delay: Duration,
}

impl Configuration {
    /// Create a new configuration with default parameters.
    ///
    /// By default:
    /// - Nothing is printed to stdout.
    /// - Logging to file is disabled.
    /// - The resolver stays in the reveal state after each round until
    ///   [`advance`](crate::controller::RoundResolver::advance) is called.
    /// - The suggested reveal delay is [`DEFAULT_REVEAL_DELAY`].
    pub fn new() -> Self {
        Self {
            verbose: false,
            log: false,
            auto_advance: false,
            reveal_delay: DEFAULT_REVEAL_DELAY,
        }
    }

    /// Enable or disable printing each round result to stdout.
    pub fn with_verbose(mut self, value: bool) -> Self {
        self.verbose = value;
        self
    }

    /// Enable or disable logging to file.
    ///
    /// The log file is created in the current directory. Do not enable it if you already set a
    /// global tracing subscriber.
    pub fn with_log(mut self, value: bool) -> Self {
        self.log = value;
        self
    }

    /// Enable or disable leaving the reveal state as soon as a round is resolved.
    pub fn with_auto_advance(mut self, value: bool) -> Self {
        self.auto_advance = value;
        self
    }

    /// Set the reveal delay. Purely informative: the resolver never waits.
    pub fn with_reveal_delay(mut self, value: Duration) -> Self {
        self.reveal_delay = value;
        self
    }

    /// Suggested reveal delay.
    pub fn reveal_delay(&self) -> Duration {
        self.reveal_delay
    }

    /// Whether rounds are left without waiting for [`advance`](crate::controller::RoundResolver::advance).
    pub fn auto_advance(&self) -> bool {
        self.auto_advance
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}
