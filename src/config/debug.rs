//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet. Every use site is additionally gated by
//! `cfg(debug_assertions)`.

pub struct DebugFlags {
    /// Emit UI interaction logs (ticker switching, slider moves).
    pub print_ui_interactions: bool,
    /// Emit per-stage timings of every pipeline run.
    pub print_pipeline_timings: bool,
    /// Emit memo cache hit/miss diagnostics for price history.
    pub print_cache_events: bool,
    /// Emit fitted model summaries (changepoints, enabled seasonalities, noise).
    pub print_model_fit: bool,
    /// Emit shutdown app messages.
    pub print_shutdown: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_ui_interactions: true,
    print_pipeline_timings: false,
    print_cache_events: false,
    print_model_fit: false,
    print_shutdown: false,
};
