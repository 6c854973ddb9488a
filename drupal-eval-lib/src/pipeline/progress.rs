/// A trait for reporting progress of long-running evaluations.
pub trait Progress: Send + Sync {
    /// Set the phase label for the current operation (e.g., "Evaluating").
    fn set_phase(&self, phase: &str);

    /// Describe the step currently in flight.
    fn set_message(&self, message: &str);

    /// Finish and clear the progress indicator.
    fn done(&self);
}

/// Progress that goes nowhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn set_phase(&self, _phase: &str) {}
    fn set_message(&self, _message: &str) {}
    fn done(&self) {}
}
