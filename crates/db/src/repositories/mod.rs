//! Database repositories.

mod admin;
mod contact_submission;
mod content;

pub use admin::AdminRepository;
pub use contact_submission::ContactSubmissionRepository;
pub use content::{ContentRepository, ContentTable};

use crate::entities::{CaseStudy, Service, TeamMember, Testimonial, WorkingProcess};

/// Repository for the `services` table.
pub type ServiceRepository = ContentRepository<Service>;
/// Repository for the `case_studies` table.
pub type CaseStudyRepository = ContentRepository<CaseStudy>;
/// Repository for the `team_members` table.
pub type TeamMemberRepository = ContentRepository<TeamMember>;
/// Repository for the `testimonials` table.
pub type TestimonialRepository = ContentRepository<Testimonial>;
/// Repository for the `working_processes` table.
pub type WorkingProcessRepository = ContentRepository<WorkingProcess>;
