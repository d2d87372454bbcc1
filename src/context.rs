//! Process-wide mutable state, bundled per spec.md §5/§9: a small struct
//! of configuration scalars and statistics counters, constructed fresh for
//! every top-level solve call and threaded through the engine and the
//! parametric driver by `&mut` reference. Never a global or a `static`.

/// Tolerance and rounding policy, populated identically by the CLI and by
/// the flat programmatic entry point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Floating point slack used for lambda comparisons and for
    /// tolerating small negative realized capacities.
    pub tolerance: f64,
    /// When true, a negative realized capacity is clamped to zero
    /// instead of raising `CapacityInfeasible`.
    pub round_negative: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            tolerance: 1e-8,
            round_negative: false,
        }
    }
}

/// Counters matching the five-element statistics array named in spec.md
/// §6: arc scans, mergers, pushes, relabels, gaps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverStats {
    pub arc_scans: u64,
    pub mergers: u64,
    pub pushes: u64,
    pub relabels: u64,
    pub gaps: u64,
}

impl SolverStats {
    pub fn as_array(&self) -> [u64; 5] {
        [
            self.arc_scans,
            self.mergers,
            self.pushes,
            self.relabels,
            self.gaps,
        ]
    }
}

/// The single block of process-wide state a top-level solve call owns:
/// the lambda range under solution, the rounding/tolerance policy, and
/// running statistics. Reset (via `SolverContext::new`) at the start of
/// every top-level call.
#[derive(Debug, Clone, Copy)]
pub struct SolverContext {
    pub config: SolverConfig,
    pub lambda_low: f64,
    pub lambda_high: f64,
    pub stats: SolverStats,
}

impl SolverContext {
    pub fn new(config: SolverConfig, lambda_low: f64, lambda_high: f64) -> Self {
        SolverContext {
            config,
            lambda_low,
            lambda_high,
            stats: SolverStats::default(),
        }
    }
}
