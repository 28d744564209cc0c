//! Public site content.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serde::Serialize;
use serde_json::Value;
use sitecms_common::{AppError, AppResult};
use sitecms_db::entities::{case_study, service, team_member, testimonial, working_process};
use sitecms_db::repositories::ContentRepository;
use tracing::debug;

use crate::content::Content;
use crate::gateway::{ContentGateway, DynGateway};
use crate::schema::ContentKind;
use crate::services::ContentService;

/// One gateway per content table.
#[derive(Clone)]
pub struct ContentGateways {
    /// Services table.
    pub services: DynGateway<service::Model>,
    /// Case studies table.
    pub case_studies: DynGateway<case_study::Model>,
    /// Team members table.
    pub team_members: DynGateway<team_member::Model>,
    /// Testimonials table.
    pub testimonials: DynGateway<testimonial::Model>,
    /// Working process steps table.
    pub working_processes: DynGateway<working_process::Model>,
}

impl ContentGateways {
    /// Database-backed gateways sharing one connection.
    #[must_use]
    pub fn from_db(db: &Arc<DatabaseConnection>) -> Self {
        Self {
            services: Arc::new(ContentService::new(ContentRepository::<service::Entity>::new(
                Arc::clone(db),
            ))),
            case_studies: Arc::new(ContentService::new(
                ContentRepository::<case_study::Entity>::new(Arc::clone(db)),
            )),
            team_members: Arc::new(ContentService::new(
                ContentRepository::<team_member::Entity>::new(Arc::clone(db)),
            )),
            testimonials: Arc::new(ContentService::new(
                ContentRepository::<testimonial::Entity>::new(Arc::clone(db)),
            )),
            working_processes: Arc::new(ContentService::new(
                ContentRepository::<working_process::Entity>::new(Arc::clone(db)),
            )),
        }
    }
}

/// Everything the public site renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    /// Active services.
    pub services: Vec<service::Model>,
    /// Active case studies.
    pub case_studies: Vec<case_study::Model>,
    /// Active team members.
    pub team_members: Vec<team_member::Model>,
    /// Active testimonials.
    pub testimonials: Vec<testimonial::Model>,
    /// Active working process steps.
    pub working_processes: Vec<working_process::Model>,
}

/// Row count of one content kind.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KindCount {
    /// Kind slug.
    pub kind: &'static str,
    /// Plural display label.
    pub label: String,
    /// All rows.
    pub total: usize,
    /// Rows shown on the site.
    pub active: usize,
}

/// Read side of the public site.
#[derive(Clone)]
pub struct SiteService {
    gateways: ContentGateways,
}

impl SiteService {
    /// Create a new site service.
    #[must_use]
    pub const fn new(gateways: ContentGateways) -> Self {
        Self { gateways }
    }

    /// Active rows of every content table, fetched concurrently.
    pub async fn snapshot(&self) -> AppResult<SiteContent> {
        let g = &self.gateways;
        let (services, case_studies, team_members, testimonials, working_processes) = tokio::try_join!(
            g.services.list_active(),
            g.case_studies.list_active(),
            g.team_members.list_active(),
            g.testimonials.list_active(),
            g.working_processes.list_active(),
        )?;

        debug!(
            services = services.len(),
            case_studies = case_studies.len(),
            team_members = team_members.len(),
            testimonials = testimonials.len(),
            working_processes = working_processes.len(),
            "Loaded site content"
        );

        Ok(SiteContent {
            services,
            case_studies,
            team_members,
            testimonials,
            working_processes,
        })
    }

    /// Active rows of one content kind.
    pub async fn active(&self, kind: ContentKind) -> AppResult<Vec<Value>> {
        let g = &self.gateways;
        match kind {
            ContentKind::Service => rows(g.services.list_active().await?),
            ContentKind::CaseStudy => rows(g.case_studies.list_active().await?),
            ContentKind::TeamMember => rows(g.team_members.list_active().await?),
            ContentKind::Testimonial => rows(g.testimonials.list_active().await?),
            ContentKind::WorkingProcess => rows(g.working_processes.list_active().await?),
        }
    }

    /// Total and active row counts for the admin dashboard.
    pub async fn counts(&self) -> AppResult<Vec<KindCount>> {
        let g = &self.gateways;
        let (services, case_studies, team_members, testimonials, working_processes) = tokio::try_join!(
            count(&g.services),
            count(&g.case_studies),
            count(&g.team_members),
            count(&g.testimonials),
            count(&g.working_processes),
        )?;

        Ok(vec![
            services,
            case_studies,
            team_members,
            testimonials,
            working_processes,
        ])
    }
}

fn rows<C: Content>(items: Vec<C>) -> AppResult<Vec<Value>> {
    items
        .into_iter()
        .map(|item| serde_json::to_value(item).map_err(|e| AppError::Internal(e.to_string())))
        .collect()
}

async fn count<C: Content>(gateway: &DynGateway<C>) -> AppResult<KindCount> {
    let items = gateway.list().await?;
    let active = rows(items.clone())?
        .iter()
        .filter(|row| row.get("is_active").and_then(Value::as_bool) == Some(true))
        .count();
    let kind = C::schema().kind;

    Ok(KindCount {
        kind: kind.slug(),
        label: kind.title_label(),
        total: items.len(),
        active,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_service(id: &str, is_active: bool) -> service::Model {
        service::Model {
            id: id.to_string(),
            title: format!("Service {id}"),
            description: "We build things".to_string(),
            icon_url: None,
            link_url: None,
            sort_order: 0,
            is_active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_active_for_one_kind() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_service("s1", true)]])
                .into_connection(),
        );

        let site = SiteService::new(ContentGateways::from_db(&db));
        let rows = site.active(ContentKind::Service).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["title"], "Service s1");
    }

    #[tokio::test]
    async fn test_counts_split_active_rows() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[
                    create_test_service("s1", true),
                    create_test_service("s2", false),
                ]])
                .into_connection(),
        );

        // Only the services query is answered; count it directly.
        let gateways = ContentGateways::from_db(&db);
        let counted = count(&gateways.services).await.unwrap();

        assert_eq!(counted.kind, "services");
        assert_eq!(counted.total, 2);
        assert_eq!(counted.active, 1);
    }
}
