//! Contact form submissions.

use chrono::Utc;
use sea_orm::Set;
use serde::Deserialize;
use sitecms_common::{AppError, AppResult, IdGenerator};
use sitecms_db::entities::contact_submission;
use sitecms_db::repositories::ContactSubmissionRepository;
use tracing::info;
use validator::Validate;

/// A message sent through the public contact form.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitContactInput {
    /// Sender name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Reply address.
    #[validate(email)]
    pub email: String,
    /// Sender's company, if given.
    #[validate(length(max = 200))]
    pub company: Option<String>,
    /// Message body.
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
}

/// Service for the contact inbox.
#[derive(Clone)]
pub struct ContactService {
    contact_repo: ContactSubmissionRepository,
    id_gen: IdGenerator,
}

impl ContactService {
    /// Create a new contact service.
    #[must_use]
    pub const fn new(contact_repo: ContactSubmissionRepository) -> Self {
        Self {
            contact_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Store a new submission.
    pub async fn submit(&self, input: SubmitContactInput) -> AppResult<contact_submission::Model> {
        input.validate()?;

        let name = input.name.trim().to_string();
        let message = input.message.trim().to_string();
        if name.is_empty() || message.is_empty() {
            return Err(AppError::Validation(
                "name and message must not be blank".to_string(),
            ));
        }

        let now = Utc::now();
        let model = contact_submission::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(name),
            email: Set(input.email.trim().to_lowercase()),
            company: Set(input
                .company
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())),
            message: Set(message),
            is_read: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let submission = self.contact_repo.create(model).await?;
        info!(id = %submission.id, "Contact submission received");
        Ok(submission)
    }

    /// List submissions, newest first.
    pub async fn list(
        &self,
        unread_only: bool,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<contact_submission::Model>> {
        self.contact_repo
            .find_recent(unread_only, limit.clamp(1, 100), offset)
            .await
    }

    /// Count unread submissions.
    pub async fn count_unread(&self) -> AppResult<u64> {
        self.contact_repo.count_unread().await
    }

    /// Mark a submission read or unread.
    pub async fn mark_read(&self, id: &str, is_read: bool) -> AppResult<contact_submission::Model> {
        let submission = self
            .contact_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Contact submission {id}")))?;

        if submission.is_read == is_read {
            return Ok(submission);
        }
        self.contact_repo.set_read(submission, is_read).await
    }

    /// Delete a submission.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if !self.contact_repo.delete(id).await? {
            return Err(AppError::NotFound(format!("Contact submission {id}")));
        }
        info!(id = %id, "Contact submission deleted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_submission(id: &str, is_read: bool) -> contact_submission::Model {
        contact_submission::Model {
            id: id.to_string(),
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            company: Some("Navy".to_string()),
            message: "Hello".to_string(),
            is_read,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn input(name: &str, email: &str, message: &str) -> SubmitContactInput {
        SubmitContactInput {
            name: name.to_string(),
            email: email.to_string(),
            company: None,
            message: message.to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_stores_row() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_submission("c1", false)]])
                .into_connection(),
        );

        let service = ContactService::new(ContactSubmissionRepository::new(db));
        let stored = service
            .submit(input("Grace", "grace@example.com", "Hello"))
            .await
            .unwrap();

        assert!(!stored.is_read);
    }

    #[tokio::test]
    async fn test_submit_rejects_bad_email() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = ContactService::new(ContactSubmissionRepository::new(db));

        let result = service.submit(input("Grace", "not-an-email", "Hello")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_submit_rejects_blank_message() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = ContactService::new(ContactSubmissionRepository::new(db));

        let result = service.submit(input("Grace", "g@example.com", "   ")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_mark_read_skips_write_when_unchanged() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_submission("c1", true)]])
                .into_connection(),
        );

        let service = ContactService::new(ContactSubmissionRepository::new(db));
        let result = service.mark_read("c1", true).await.unwrap();
        assert!(result.is_read);
    }

    #[tokio::test]
    async fn test_mark_read_missing() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<contact_submission::Model>::new()])
                .into_connection(),
        );

        let service = ContactService::new(ContactSubmissionRepository::new(db));
        assert!(matches!(
            service.mark_read("gone", true).await,
            Err(AppError::NotFound(_))
        ));
    }
}
