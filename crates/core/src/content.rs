//! Content types edited through the admin panel.

use serde::{Serialize, de::DeserializeOwned};
use sitecms_db::entities::{case_study, service, team_member, testimonial, working_process};

use crate::schema::{ContentKind, ContentSchema, FieldKind, FieldSpec, IS_ACTIVE, SORT_ORDER};

/// A row of one of the ordered content tables.
///
/// Rows travel as snake_case JSON objects, which is how the editor reads
/// list titles and merges saved patches without knowing the concrete type.
pub trait Content: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The schema describing this type's editable fields.
    fn schema() -> &'static ContentSchema;

    /// Gateway-assigned row id.
    fn id(&self) -> &str;
}

static SERVICE_SCHEMA: ContentSchema = ContentSchema {
    kind: ContentKind::Service,
    table: "services",
    image_field: Some("icon_url"),
    title_field: "title",
    subtitle_field: Some("description"),
    fields: &[
        FieldSpec::required("title", FieldKind::Text),
        FieldSpec::required("description", FieldKind::LongText),
        FieldSpec::optional("icon_url", FieldKind::Image),
        FieldSpec::optional("link_url", FieldKind::Url),
        SORT_ORDER,
        IS_ACTIVE,
    ],
};

static CASE_STUDY_SCHEMA: ContentSchema = ContentSchema {
    kind: ContentKind::CaseStudy,
    table: "case_studies",
    image_field: Some("image_url"),
    title_field: "title",
    subtitle_field: Some("client_name"),
    fields: &[
        FieldSpec::required("title", FieldKind::Text),
        FieldSpec::required("description", FieldKind::LongText),
        FieldSpec::optional("client_name", FieldKind::Text),
        FieldSpec::optional("image_url", FieldKind::Image),
        FieldSpec::optional("project_url", FieldKind::Url),
        FieldSpec::optional("results", FieldKind::JsonText),
        SORT_ORDER,
        IS_ACTIVE,
    ],
};

static TEAM_MEMBER_SCHEMA: ContentSchema = ContentSchema {
    kind: ContentKind::TeamMember,
    table: "team_members",
    image_field: Some("avatar_url"),
    title_field: "name",
    subtitle_field: Some("role"),
    fields: &[
        FieldSpec::required("name", FieldKind::Text),
        FieldSpec::required("role", FieldKind::Text),
        FieldSpec::optional("bio", FieldKind::LongText),
        FieldSpec::optional("avatar_url", FieldKind::Image),
        FieldSpec::optional("linkedin_url", FieldKind::Url),
        SORT_ORDER,
        IS_ACTIVE,
    ],
};

static TESTIMONIAL_SCHEMA: ContentSchema = ContentSchema {
    kind: ContentKind::Testimonial,
    table: "testimonials",
    image_field: Some("avatar_url"),
    title_field: "name",
    subtitle_field: Some("role_company"),
    fields: &[
        FieldSpec::required("name", FieldKind::Text),
        FieldSpec::required("role_company", FieldKind::Text),
        FieldSpec::required("message", FieldKind::LongText),
        FieldSpec::required(
            "rating",
            FieldKind::Integer {
                min: 1,
                max: Some(5),
            },
        ),
        FieldSpec::optional("avatar_url", FieldKind::Image),
        SORT_ORDER,
        IS_ACTIVE,
    ],
};

static WORKING_PROCESS_SCHEMA: ContentSchema = ContentSchema {
    kind: ContentKind::WorkingProcess,
    table: "working_processes",
    image_field: None,
    title_field: "title",
    subtitle_field: Some("description"),
    fields: &[
        FieldSpec::required("step_no", FieldKind::Integer { min: 1, max: None }),
        FieldSpec::required("title", FieldKind::Text),
        FieldSpec::required("description", FieldKind::LongText),
        SORT_ORDER,
        IS_ACTIVE,
    ],
};

macro_rules! impl_content {
    ($model:ty, $schema:ident) => {
        impl Content for $model {
            fn schema() -> &'static ContentSchema {
                &$schema
            }

            fn id(&self) -> &str {
                &self.id
            }
        }
    };
}

impl_content!(service::Model, SERVICE_SCHEMA);
impl_content!(case_study::Model, CASE_STUDY_SCHEMA);
impl_content!(team_member::Model, TEAM_MEMBER_SCHEMA);
impl_content!(testimonial::Model, TESTIMONIAL_SCHEMA);
impl_content!(working_process::Model, WORKING_PROCESS_SCHEMA);

/// Schema of a content kind.
#[must_use]
pub fn schema_for(kind: ContentKind) -> &'static ContentSchema {
    match kind {
        ContentKind::Service => &SERVICE_SCHEMA,
        ContentKind::CaseStudy => &CASE_STUDY_SCHEMA,
        ContentKind::TeamMember => &TEAM_MEMBER_SCHEMA,
        ContentKind::Testimonial => &TESTIMONIAL_SCHEMA,
        ContentKind::WorkingProcess => &WORKING_PROCESS_SCHEMA,
    }
}
