use clap::ValueEnum;

/// How the converter fills the event `category` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CategoryMode {
    /// Store the raw numeric subcategory code from the source.
    #[default]
    SubCategoryCode,
    /// Resolve the category label against the EventCategory table, creating
    /// missing rows with the default type label.
    ResolvedCategory,
}

/// Per-run tuning knobs, owned by the orchestrator and threaded by
/// parameter. Nothing here is process-wide mutable state.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Upper bound on events refreshed per run, bounding source API and
    /// database load.
    pub max_events_per_run: usize,
    /// Detail fetches issued concurrently per chunk.
    pub fetch_chunk_size: usize,
    /// Drop remote events whose own date is older than this many days;
    /// `None` disables the filter.
    pub recency_window_days: Option<i64>,
    pub category_mode: CategoryMode,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_events_per_run: 100,
            fetch_chunk_size: 20,
            recency_window_days: Some(30),
            category_mode: CategoryMode::default(),
        }
    }
}
