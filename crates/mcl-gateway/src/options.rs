use std::time::Duration;

/// Per-phase deadline budget for gateway operations.
///
/// The defaults are the reference values: 5 s to evaluate, 15 s to
/// collect endorsements, 5 s to hand the envelope to the ordering
/// service, and 60 s for the transaction to be committed and reflected
/// in state.
#[derive(Clone, Debug)]
pub struct GatewayOptions {
    pub evaluate_timeout: Duration,
    pub endorse_timeout: Duration,
    pub submit_timeout: Duration,
    pub commit_timeout: Duration,
}

impl Default for GatewayOptions {
    fn default() -> Self {
        Self {
            evaluate_timeout: Duration::from_secs(5),
            endorse_timeout: Duration::from_secs(15),
            submit_timeout: Duration::from_secs(5),
            commit_timeout: Duration::from_secs(60),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_deadlines() {
        let opts = GatewayOptions::default();
        assert_eq!(opts.evaluate_timeout, Duration::from_secs(5));
        assert_eq!(opts.endorse_timeout, Duration::from_secs(15));
        assert_eq!(opts.submit_timeout, Duration::from_secs(5));
        assert_eq!(opts.commit_timeout, Duration::from_secs(60));
    }
}
