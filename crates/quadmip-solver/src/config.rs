//! Optimize options shared by every engine.

/// Options passed to [`Engine::optimize`](crate::Engine::optimize).
///
/// Every field is optional; `None` leaves the engine's own default in place.
/// Engines map the fields they understand and ignore (or warn about) the rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverConfig {
    /// Wall-clock limit in seconds.
    pub time_limit: Option<f64>,
    /// Relative gap between incumbent and best bound.
    pub mip_gap: Option<f64>,
    /// Absolute gap between incumbent and best bound.
    pub absolute_gap: Option<f64>,
    /// Stop after this many improving solutions.
    pub solution_limit: Option<u32>,
    pub verbosity: Option<u32>,
    pub presolve: Option<bool>,
    pub threads: Option<u32>,
    /// Primal feasibility tolerance.
    pub tolerance: Option<f64>,
    pub log_to_console: Option<bool>,
}

macro_rules! config_setters {
    ($($(#[$doc:meta])* $setter:ident => $field:ident: $ty:ty),+ $(,)?) => {
        impl SolverConfig {
            $(
                $(#[$doc])*
                pub fn $setter(mut self, value: $ty) -> Self {
                    self.$field = Some(value);
                    self
                }
            )+

            /// True when no option is set.
            pub fn is_empty(&self) -> bool {
                true $(&& self.$field.is_none())+
            }
        }
    };
}

config_setters! {
    /// Time limit in seconds.
    with_time_limit => time_limit: f64,
    with_mip_gap => mip_gap: f64,
    with_absolute_gap => absolute_gap: f64,
    /// Stop after `count` improving solutions.
    with_solution_limit => solution_limit: u32,
    with_verbosity => verbosity: u32,
    with_presolve => presolve: bool,
    with_threads => threads: u32,
    with_tolerance => tolerance: f64,
    with_log_to_console => log_to_console: bool,
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }
}
