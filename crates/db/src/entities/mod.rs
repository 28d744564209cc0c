//! Database entities.

pub mod admin_session;
pub mod admin_user;
pub mod case_study;
pub mod contact_submission;
pub mod service;
pub mod team_member;
pub mod testimonial;
pub mod working_process;

pub use admin_session::Entity as AdminSession;
pub use admin_user::Entity as AdminUser;
pub use case_study::Entity as CaseStudy;
pub use contact_submission::Entity as ContactSubmission;
pub use service::Entity as Service;
pub use team_member::Entity as TeamMember;
pub use testimonial::Entity as Testimonial;
pub use working_process::Entity as WorkingProcess;
