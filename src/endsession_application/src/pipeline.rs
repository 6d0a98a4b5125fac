//! Stage runner shared by every step of the logout pipeline.

use std::future::Future;

use endsession_core::{EndpointError, Stage, StageOutcome};
use tokio_util::sync::CancellationToken;

/// Run one provider hook under the call's cancellation token.
///
/// Cancellation wins over a hook that completes in the same poll, so a cancelled
/// call never proceeds to the next stage. Hook errors are faults and abort the call.
pub async fn run_stage<F, E>(
    stage: Stage,
    cancellation: &CancellationToken,
    hook: F,
) -> Result<StageOutcome, EndpointError>
where
    F: Future<Output = Result<StageOutcome, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    let result = tokio::select! {
        biased;
        _ = cancellation.cancelled() => {
            tracing::debug!(%stage, "Stage cancelled");
            return Err(EndpointError::Cancelled);
        }
        result = hook => result,
    };

    let outcome = result.map_err(|source| {
        tracing::error!(%stage, error = %source, "Provider hook failed");
        EndpointError::Provider {
            stage,
            source: Box::new(source),
        }
    })?;

    match &outcome {
        StageOutcome::Continue => tracing::debug!(%stage, "Stage continued"),
        StageOutcome::Handled => tracing::debug!(%stage, "Request handled by the provider"),
        StageOutcome::Skipped => tracing::debug!(%stage, "Request skipped by the provider"),
        StageOutcome::Rejected(rejection) => tracing::info!(
            %stage,
            error = rejection.error.as_deref(),
            error_description = rejection.description.as_deref(),
            "Request rejected by the provider"
        ),
    }

    Ok(outcome)
}
