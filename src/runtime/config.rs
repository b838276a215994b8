/// Interpreter configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// Emit a `tracing` debug event for every executed statement
    pub trace_output: bool,
    /// Maximum nesting of user function calls before the run is aborted
    pub max_call_depth: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            trace_output: false,
            max_call_depth: 10_000,
        }
    }
}

impl InterpreterConfig {
    /// Environment variable enabling `trace_output` (`1`/`true`)
    pub const TRACE_VAR: &'static str = "BREWIN_TRACE";
    /// Environment variable overriding `max_call_depth`
    pub const MAX_CALL_DEPTH_VAR: &'static str = "BREWIN_MAX_CALL_DEPTH";

    /// Defaults, overridden by `BREWIN_TRACE` and `BREWIN_MAX_CALL_DEPTH`
    ///
    /// Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(Self::TRACE_VAR) {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => config.trace_output = true,
                "0" | "false" | "no" | "off" | "" => config.trace_output = false,
                other => tracing::warn!(var = Self::TRACE_VAR, value = other, "ignoring invalid value"),
            }
        }

        if let Some(raw) = lookup(Self::MAX_CALL_DEPTH_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => config.max_call_depth = depth,
                _ => tracing::warn!(
                    var = Self::MAX_CALL_DEPTH_VAR,
                    value = %raw,
                    "ignoring invalid value"
                ),
            }
        }

        config
    }

    /// Enables or disables per-statement tracing
    pub fn with_trace_output(mut self, trace_output: bool) -> Self {
        self.trace_output = trace_output;
        self
    }

    /// Sets the maximum call depth
    pub fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }
}
