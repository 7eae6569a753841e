use std::time::Duration;

use typed_builder::TypedBuilder;

/// Step budget applied when none is configured.
pub const DEFAULT_MAX_STEPS: u64 = 1_000;

/// Options for a driver run.
#[derive(TypedBuilder, Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// Stop after this many executed instructions if no HLT was reached.
    #[builder(default = DEFAULT_MAX_STEPS)]
    pub max_steps: u64,
    /// Delay between steps. Zero runs flat out.
    #[builder(default)]
    pub clock: Duration,
    /// Address the program is loaded at and execution starts from.
    #[builder(default)]
    pub origin: u16,
    /// Number of presented steps a touched register stays highlighted.
    #[builder(default = 2)]
    pub highlight_steps: u32,
    /// Memory map shape, starting at address 0.
    #[builder(default = 8)]
    pub memory_rows: usize,
    #[builder(default = 8)]
    pub memory_cols: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
