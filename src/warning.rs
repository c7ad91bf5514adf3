use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::fmt;
use std::sync::Mutex;

type Sink = Box<dyn Fn(&str) + Send + Sync>;

static GLOBAL_WARNINGS: Lazy<WarningLog> = Lazy::new(WarningLog::new);

/// Emits `"Warning: <message>"` once per key. Lines go to `log::error!`
/// unless a sink was supplied.
pub struct WarningLog {
    seen: Mutex<HashSet<String>>,
    sink: Option<Sink>,
}

impl WarningLog {
    pub fn new() -> Self {
        Self {
            seen: Mutex::new(HashSet::new()),
            sink: None,
        }
    }

    pub fn with_sink(sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self {
            seen: Mutex::new(HashSet::new()),
            sink: Some(Box::new(sink)),
        }
    }

    /// Returns whether the warning was emitted.
    pub fn warn(&self, message: &str, key: &str) -> bool {
        {
            let mut seen = match self.seen.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if !seen.insert(key.to_string()) {
                return false;
            }
        }
        let line = format!("Warning: {message}");
        match &self.sink {
            Some(sink) => sink(&line),
            None => log::error!("{line}"),
        }
        true
    }

    pub fn has_warned(&self, key: &str) -> bool {
        self.seen
            .lock()
            .map(|seen| seen.contains(key))
            .unwrap_or(false)
    }
}

impl Default for WarningLog {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WarningLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seen = self.seen.lock().map(|seen| seen.len()).unwrap_or(0);
        f.debug_struct("WarningLog")
            .field("seen", &seen)
            .field("custom_sink", &self.sink.is_some())
            .finish()
    }
}

/// Process-wide warning; each key is reported at most once per process.
pub fn warning(message: &str, key: &str) -> bool {
    GLOBAL_WARNINGS.warn(message, key)
}
