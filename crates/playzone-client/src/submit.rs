//! # Submission Gate
//!
//! Lets one order submission through at a time and turns its result into
//! something the UI can act on.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  submit pressed ──► try_begin() ──► already in flight? ──► Busy        │
//! │                          │                                              │
//! │                          ▼                                              │
//! │                    POST /bookings                                       │
//! │                          │                                              │
//! │          ┌───────────────┼────────────────────┐                         │
//! │          ▼               ▼                    ▼                         │
//! │        2xx              401              anything else                  │
//! │     Confirmed      LoginRequired     Failed { generic message }         │
//! │          │                                                              │
//! │          ▼                                                              │
//! │   on_confirmed() ──► caller clears its cart (gate still closed)         │
//! │                                                                         │
//! │  guard dropped ──► gate open again (also on cancel / panic)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no retry. A failed submission leaves the caller's state alone so
//! the customer can press submit again.

use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, warn};

use crate::error::{ClientError, ClientResult};

/// The in-flight flag.
#[derive(Debug, Default)]
pub struct SubmitGate {
    in_flight: AtomicBool,
}

/// Holds the gate closed until dropped.
#[derive(Debug)]
pub struct SubmitGuard<'a> {
    gate: &'a SubmitGate,
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.gate.in_flight.store(false, Ordering::Release);
    }
}

impl SubmitGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a submission is currently running.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Closes the gate, or fails if it is already closed.
    pub fn try_begin(&self) -> ClientResult<SubmitGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ClientError::SubmissionInProgress)?;
        Ok(SubmitGuard { gate: self })
    }

    /// Runs `op` with the gate closed and classifies the result.
    ///
    /// `on_confirmed` runs only for a confirmed submission, before the gate
    /// opens again. Whatever state the order was built from must be cleared
    /// there, or a second submit could post it again.
    pub async fn run<T, F, Fut, C>(&self, op: F, on_confirmed: C) -> SubmissionOutcome<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
        C: FnOnce(&T),
    {
        let _guard = match self.try_begin() {
            Ok(guard) => guard,
            Err(e) => return SubmissionOutcome::from_error(e),
        };
        let outcome = SubmissionOutcome::from_result(op().await);
        if let SubmissionOutcome::Confirmed { receipt } = &outcome {
            on_confirmed(receipt);
        }
        outcome
    }
}

/// What the UI should do after a submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmissionOutcome<T> {
    /// Accepted by the server.
    Confirmed { receipt: T },
    /// 401: drop the session and go to the login screen.
    LoginRequired,
    /// Another submission is still running.
    Busy,
    /// Show `message` and stay on the page.
    Failed { message: String },
}

impl<T> SubmissionOutcome<T> {
    pub fn from_result(result: ClientResult<T>) -> Self {
        match result {
            Ok(receipt) => {
                info!("Submission confirmed");
                SubmissionOutcome::Confirmed { receipt }
            }
            Err(e) => Self::from_error(e),
        }
    }

    pub fn from_error(err: ClientError) -> Self {
        match err {
            ClientError::Unauthorized => {
                warn!("Submission rejected: session expired");
                SubmissionOutcome::LoginRequired
            }
            ClientError::SubmissionInProgress => SubmissionOutcome::Busy,
            other => {
                if other.is_input_error() {
                    warn!(error = %other, "Submission blocked by input check");
                } else {
                    error!(error = %other, status = ?other.status(), "Submission failed");
                }
                SubmissionOutcome::Failed {
                    message: other.user_message(),
                }
            }
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, SubmissionOutcome::Confirmed { .. })
    }

    pub fn receipt(&self) -> Option<&T> {
        match self {
            SubmissionOutcome::Confirmed { receipt } => Some(receipt),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GENERIC_FAILURE_MESSAGE;
    use playzone_core::CoreError;
    use std::sync::Arc;
    use tokio::sync::oneshot;

    #[test]
    fn test_gate_opens_when_guard_drops() {
        let gate = SubmitGate::new();
        {
            let _guard = gate.try_begin().unwrap();
            assert!(gate.is_submitting());
            assert!(matches!(
                gate.try_begin(),
                Err(ClientError::SubmissionInProgress)
            ));
        }
        assert!(!gate.is_submitting());
        assert!(gate.try_begin().is_ok());
    }

    #[test]
    fn test_outcome_classification() {
        assert_eq!(
            SubmissionOutcome::from_result(Ok(5)),
            SubmissionOutcome::Confirmed { receipt: 5 }
        );
        assert_eq!(
            SubmissionOutcome::<()>::from_error(ClientError::Unauthorized),
            SubmissionOutcome::LoginRequired
        );
        assert_eq!(
            SubmissionOutcome::<()>::from_error(ClientError::Server {
                status: 500,
                message: "db down".into()
            }),
            SubmissionOutcome::Failed {
                message: GENERIC_FAILURE_MESSAGE.to_string()
            }
        );
        assert_eq!(
            SubmissionOutcome::<()>::from_error(ClientError::Core(CoreError::EmptyCart)),
            SubmissionOutcome::Failed {
                message: "Cart is empty".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_second_submission_while_first_in_flight_is_busy() {
        let gate = Arc::new(SubmitGate::new());
        let (release_tx, release_rx) = oneshot::channel::<()>();
        let (started_tx, started_rx) = oneshot::channel::<()>();

        let first = {
            let gate = Arc::clone(&gate);
            tokio::spawn(async move {
                gate.run(
                    || async move {
                        let _ = started_tx.send(());
                        let _ = release_rx.await;
                        Ok::<_, ClientError>("INV-1")
                    },
                    |_| {},
                )
                .await
            })
        };

        started_rx.await.unwrap();
        let second = gate
            .run(|| async { Ok::<_, ClientError>("INV-2") }, |_| {})
            .await;
        assert_eq!(second, SubmissionOutcome::Busy);

        release_tx.send(()).unwrap();
        let first = first.await.unwrap();
        assert_eq!(first.receipt(), Some(&"INV-1"));
        assert!(!gate.is_submitting());
    }

    #[tokio::test]
    async fn test_confirmed_callback_runs_before_gate_opens() {
        let gate = SubmitGate::new();
        let mut seen = None;

        let outcome = gate
            .run(
                || async { Ok::<_, ClientError>("INV-9") },
                |receipt| seen = Some((*receipt, gate.is_submitting())),
            )
            .await;

        assert!(outcome.is_confirmed());
        assert_eq!(seen, Some(("INV-9", true)));
        assert!(!gate.is_submitting());
    }

    #[tokio::test]
    async fn test_confirmed_callback_skipped_on_failure() {
        let gate = SubmitGate::new();
        let mut called = false;

        let outcome = gate
            .run(
                || async { Err::<&str, _>(ClientError::Unauthorized) },
                |_| called = true,
            )
            .await;

        assert_eq!(outcome, SubmissionOutcome::LoginRequired);
        assert!(!called);
        assert!(!gate.is_submitting());
    }

    #[test]
    fn test_outcome_json_shape() {
        let json = serde_json::to_value(SubmissionOutcome::<u32>::LoginRequired).unwrap();
        assert_eq!(json["kind"], "login_required");
    }
}
