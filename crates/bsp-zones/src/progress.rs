//! Status reporting for long-running rebuild passes.
//!
//! Reporters only observe; a pass always runs to completion.

/// Receives human-readable status updates at phase boundaries.
pub trait StatusReporter {
    fn status(&mut self, message: &str);
}

/// Discards all status updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoStatus;

impl StatusReporter for NoStatus {
    fn status(&mut self, _message: &str) {}
}

/// A reporter that calls a closure for each update.
pub struct FnStatus<F>
where
    F: FnMut(&str),
{
    func: F,
}

impl<F> FnStatus<F>
where
    F: FnMut(&str),
{
    /// Creates a new reporter from a closure.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> StatusReporter for FnStatus<F>
where
    F: FnMut(&str),
{
    fn status(&mut self, message: &str) {
        (self.func)(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fn_status_calls_closure() {
        let mut seen = Vec::new();
        {
            let mut reporter = FnStatus::new(|msg: &str| seen.push(msg.to_owned()));
            reporter.status("Zoning");
            reporter.status("Computing zones");
        }
        assert_eq!(seen, vec!["Zoning", "Computing zones"]);
    }
}
