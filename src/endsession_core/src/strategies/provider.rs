use async_trait::async_trait;

use crate::stages::{
    ApplyLogoutResponseContext, ExtractLogoutRequestContext, HandleLogoutRequestContext,
    StageOutcome, ValidateLogoutRequestContext,
};

// ============================================================================
// Logout Provider - pluggable policy for the logout pipeline
// ============================================================================

/// Policy object supplying the four hooks of the logout pipeline.
///
/// Each hook runs once per call, in order Extract → Validate → Handle, followed by
/// Apply when a response is delivered. A hook resolves its stage by returning a
/// [`StageOutcome`]:
///
/// - `Continue`: move on (after Handle this is treated as a rejection, because
///   nothing claimed the request)
/// - `Handled`: the hook wrote the complete HTTP response through
///   `context.transport`
/// - `Skipped`: let the host's next handler deal with the call
/// - `Rejected`: answer with a protocol error
///
/// Every hook defaults to `Continue`, so providers override only the stages they
/// care about. Returning `Err` is reserved for faults (a backing store being
/// unreachable, ...) and aborts the call; it is never rendered as a protocol error.
///
/// Hooks that perform long-running work should observe `context.cancellation`.
#[async_trait]
pub trait LogoutProvider: Send + Sync + 'static {
    /// Faults a hook can raise
    type Error: std::error::Error + Send + Sync + 'static;

    async fn extract_logout_request(
        &self,
        _context: &mut ExtractLogoutRequestContext<'_>,
    ) -> Result<StageOutcome, Self::Error> {
        Ok(StageOutcome::Continue)
    }

    /// Approve a redirect target by setting `context.post_logout_redirect_uri`.
    async fn validate_logout_request(
        &self,
        _context: &mut ValidateLogoutRequestContext<'_>,
    ) -> Result<StageOutcome, Self::Error> {
        Ok(StageOutcome::Continue)
    }

    async fn handle_logout_request(
        &self,
        _context: &mut HandleLogoutRequestContext<'_>,
    ) -> Result<StageOutcome, Self::Error> {
        Ok(StageOutcome::Continue)
    }

    /// Last chance to amend the response or the redirect target before delivery.
    async fn apply_logout_response(
        &self,
        _context: &mut ApplyLogoutResponseContext<'_>,
    ) -> Result<StageOutcome, Self::Error> {
        Ok(StageOutcome::Continue)
    }
}
