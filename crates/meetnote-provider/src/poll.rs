//! Bounded readiness polling for remote assets.
//!
//! The provider processes uploads asynchronously, so every action has to wait
//! for the asset to leave `Processing`. The wait is bounded: a fixed attempt
//! budget with a growing, capped backoff interval. The outcome is tagged so
//! callers can distinguish a ready asset from a provider-reported failure or
//! an exhausted budget.

use std::time::Duration;
use tokio::time::sleep;

use crate::traits::{ModelProvider, ProviderResult};
use meetnote_core::models::{AssetHandle, AssetState};

/// Retry budget and backoff shape for one readiness wait.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    pub initial_interval: Duration,
    pub max_interval: Duration,
    pub max_attempts: u32,
}

impl PollPolicy {
    pub fn new(initial_interval: Duration, max_interval: Duration, max_attempts: u32) -> Self {
        Self {
            initial_interval,
            max_interval,
            // An attempt budget of zero would mean never observing a state;
            // at least one status check always happens.
            max_attempts: max_attempts.max(1),
        }
    }

    /// Delay before the next attempt: the base interval scaled by the attempt
    /// number, capped at `max_interval`.
    fn delay_for(&self, attempt: u32) -> Duration {
        let scaled = self.initial_interval.saturating_mul(attempt);
        scaled.min(self.max_interval)
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), Duration::from_secs(5), 120)
    }
}

/// Terminal result of a readiness wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Ready(AssetHandle),
    Failed { reason: String },
    TimedOut { attempts: u32 },
}

/// Poll the asset state until it leaves `Processing` or the budget runs out.
///
/// Stops on the first terminal observation; no further state checks are made
/// after `Ready` or `Failed`. Transport errors from the state check itself
/// propagate as `Err` rather than being folded into an outcome.
pub async fn wait_until_ready(
    provider: &dyn ModelProvider,
    handle: &AssetHandle,
    policy: &PollPolicy,
) -> ProviderResult<PollOutcome> {
    for attempt in 1..=policy.max_attempts {
        match provider.asset_state(handle).await? {
            AssetState::Ready => {
                tracing::info!(asset = %handle.name, attempt, "Remote asset ready");
                return Ok(PollOutcome::Ready(handle.clone()));
            }
            AssetState::Failed { reason } => {
                let reason =
                    reason.unwrap_or_else(|| "provider reported asset as failed".to_string());
                tracing::warn!(asset = %handle.name, attempt, reason = %reason, "Remote asset failed");
                return Ok(PollOutcome::Failed { reason });
            }
            AssetState::Processing => {
                if attempt == policy.max_attempts {
                    break;
                }
                sleep(policy.delay_for(attempt)).await;
            }
        }
    }

    tracing::warn!(
        asset = %handle.name,
        attempts = policy.max_attempts,
        "Remote asset still processing after exhausting poll budget"
    );
    Ok(PollOutcome::TimedOut {
        attempts: policy.max_attempts,
    })
}
