/// Retry state for loading a single URL
///
/// Transitions:
///
/// ```text
/// Attempting(n) --success--> Succeeded(n)
/// Attempting(n) --failure--> Attempting(n + 1)   if n < max
/// Attempting(n) --failure--> Exhausted(n)        if n == max
/// ```
///
/// Attempt numbers are one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    Attempting(u32),
    Succeeded(u32),
    Exhausted(u32),
}

impl AttemptState {
    /// The state before the first try
    pub fn start() -> Self {
        Self::Attempting(1)
    }

    /// Records a successful try
    pub fn succeed(self) -> Self {
        match self {
            Self::Attempting(n) => Self::Succeeded(n),
            terminal => terminal,
        }
    }

    /// Records a failed try against the attempt budget
    pub fn fail(self, max_attempts: u32) -> Self {
        match self {
            Self::Attempting(n) if n < max_attempts => Self::Attempting(n + 1),
            Self::Attempting(n) => Self::Exhausted(n),
            terminal => terminal,
        }
    }

    /// Number of the try in progress, or of the last try made
    pub fn attempt(&self) -> u32 {
        match self {
            Self::Attempting(n) | Self::Succeeded(n) | Self::Exhausted(n) => *n,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Attempting(_))
    }
}
