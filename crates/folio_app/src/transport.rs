//! Contact submission transport
//!
//! The contact form hands validated submissions to a [`SubmissionTransport`].
//! The page only ships a simulated one: it takes a fixed time and fails at
//! random, standing in for a real network call.

use folio_core::Millis;
use rand::{Rng, RngCore};
use serde::Serialize;
use thiserror::Error;

/// The four contact form fields, trimmed
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// A rejected submission
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// The simulated endpoint rejected the message
    #[error("simulated transport failure")]
    Simulated,

    /// A transport-specific failure
    #[error("submission failed: {0}")]
    Failed(String),
}

/// Delivers contact submissions
///
/// Delivery is split in two so it can run on the page clock: the form waits
/// [`latency`](SubmissionTransport::latency) ms and then asks for the
/// outcome with [`deliver`](SubmissionTransport::deliver).
pub trait SubmissionTransport {
    /// Time between submitting and learning the outcome
    fn latency(&self) -> Millis;

    /// Outcome of sending `submission`
    fn deliver(
        &mut self,
        submission: &ContactSubmission,
        rng: &mut dyn RngCore,
    ) -> Result<(), SubmissionError>;
}

/// Succeeds or fails at random after a fixed delay
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulatedTransport {
    latency: Millis,
    failure_rate: f64,
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new(2000, 0.1)
    }
}

impl SimulatedTransport {
    pub fn new(latency: Millis, failure_rate: f64) -> Self {
        Self {
            latency,
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }

    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }
}

impl SubmissionTransport for SimulatedTransport {
    fn latency(&self) -> Millis {
        self.latency
    }

    fn deliver(
        &mut self,
        submission: &ContactSubmission,
        rng: &mut dyn RngCore,
    ) -> Result<(), SubmissionError> {
        tracing::info!(
            name = %submission.name,
            email = %submission.email,
            subject = %submission.subject,
            "submitting contact form"
        );
        if rng.gen_bool(self.failure_rate) {
            Err(SubmissionError::Simulated)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_extreme_rates_are_deterministic() {
        let mut rng = StdRng::seed_from_u64(1);
        let submission = ContactSubmission::default();

        let mut always = SimulatedTransport::new(10, 0.0);
        let mut never = SimulatedTransport::new(10, 1.0);
        for _ in 0..50 {
            assert_eq!(always.deliver(&submission, &mut rng), Ok(()));
            assert_eq!(
                never.deliver(&submission, &mut rng),
                Err(SubmissionError::Simulated)
            );
        }
    }

    #[test]
    fn test_failure_rate_is_clamped() {
        assert_eq!(SimulatedTransport::new(0, 7.0).failure_rate(), 1.0);
        assert_eq!(SimulatedTransport::new(0, -1.0).failure_rate(), 0.0);
    }

    #[test]
    fn test_default_fails_roughly_one_in_ten() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut transport = SimulatedTransport::default();
        let failures = (0..2_000)
            .filter(|_| transport.deliver(&ContactSubmission::default(), &mut rng).is_err())
            .count();
        assert!((100..300).contains(&failures), "{} failures", failures);
    }
}
