//! The visit-counted landing page.

use axum::{extract::State, response::Html};

use crate::error::AppError;
use crate::state::AppState;

/// Static page body. Byte-identical on every successful request; the counter
/// value is logged, not rendered.
pub const INDEX_HTML: &str = "\
<!DOCTYPE html>
<html>
<head><title>Test</title></head>
<body>
    <h1>all is working</h1>
    <p>nothing to see here</p>
</body>
</html>
";

/// Root handler, bound to every HTTP method.
///
/// Issues exactly one atomic increment against the store per invocation.
/// Not idempotent with respect to the counter; idempotent with respect to
/// the response body. A failed increment surfaces as a 500 to this caller
/// only, with no retry.
pub async fn visit(State(state): State<AppState>) -> Result<Html<&'static str>, AppError> {
    let count = state.counter.increment().await?;
    tracing::info!(count, "page visit");
    Ok(Html(INDEX_HTML))
}
