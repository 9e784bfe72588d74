//! Newsletter sign-up route.

use axum::{extract::State, Json};

use crate::db::models::{NewsletterCreate, NewsletterSubscription};
use crate::error::ApiError;
use crate::state::AppState;
use crate::validate;

/// POST /api/newsletter
///
/// Uniqueness is a check-then-insert: two concurrent submissions of the
/// same email can both pass the existence check and produce duplicates.
/// Accepted race; a unique index on `doc->>'email'` would close it.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(payload): Json<NewsletterCreate>,
) -> Result<Json<NewsletterSubscription>, ApiError> {
    validate::newsletter(&payload)?;

    if state
        .store
        .find_by_email::<NewsletterSubscription>(&payload.email)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict("Email already subscribed".to_string()));
    }

    let subscription = NewsletterSubscription::new(payload);
    state.store.insert(&subscription).await?;

    tracing::info!(id = %subscription.id, "newsletter subscription stored");
    Ok(Json(subscription))
}

#[cfg(test)]
mod tests {
    use crate::routes::tests::{live_test_app, post_json, test_app};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_subscribe_rejects_invalid_email_without_touching_store() {
        let (status, bytes) =
            post_json(test_app(), "/api/newsletter", &json!({ "email": "nope" })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["field"], "email");
    }

    #[tokio::test]
    async fn test_subscribe_rejects_missing_email() {
        let (status, _) = post_json(test_app(), "/api/newsletter", &json!({})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_subscribe_with_valid_email_reaches_the_store() {
        // Validation passes; the unreachable store turns the uniqueness
        // lookup into a 500.
        let (status, _) = post_json(
            test_app(),
            "/api/newsletter",
            &json!({ "email": "ada@example.com" }),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_second_subscribe_with_same_email_conflicts() {
        let Some(app) = live_test_app().await else {
            return;
        };
        let email = format!("{}@example.com", uuid::Uuid::new_v4());

        let (first, _) =
            post_json(app.clone(), "/api/newsletter", &json!({ "email": email })).await;
        assert_eq!(first, StatusCode::OK);

        let (second, bytes) =
            post_json(app, "/api/newsletter", &json!({ "email": email })).await;
        assert_eq!(second, StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Email already subscribed");
    }
}
