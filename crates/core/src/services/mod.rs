//! Business logic services.

pub mod auth;
pub mod contact;
pub mod content;
pub mod site;

pub use auth::{AuthService, LoginInput, SessionGrant};
pub use contact::{ContactService, SubmitContactInput};
pub use content::ContentService;
pub use site::{ContentGateways, KindCount, SiteContent, SiteService};
