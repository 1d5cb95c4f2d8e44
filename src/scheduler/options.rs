/// Options to configure the allocation engine.
///
/// The caps guarantee termination on any input. They are parameters, so that
/// tests can exercise them without walking thousands of days.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub struct SchedulerOptions {
    /// The maximum number of days an open-ended load is walked forward.
    pub iteration_cap: usize,
    /// How many days after the start of a bounded load are searched for a
    /// working day, when its window does not contain one.
    pub lookahead_days: usize,
    /// Hour differences below this value are treated as rounding noise.
    pub tolerance: f64,
}

impl SchedulerOptions {
    #[must_use]
    pub fn with_iteration_cap(mut self, iteration_cap: usize) -> Self {
        self.iteration_cap = iteration_cap;
        self
    }

    #[must_use]
    pub fn with_lookahead_days(mut self, lookahead_days: usize) -> Self {
        self.lookahead_days = lookahead_days;
        self
    }
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            iteration_cap: 5000,
            // about two years
            lookahead_days: 731,
            tolerance: 0.01,
        }
    }
}
