//! Generic master-detail editor for the content types.
//!
//! One [`ContentEditor`] drives the sidebar list, the detail form, the
//! image sub-flow and the confirmation gates for any [`crate::Content`]
//! type. Remote effects go through [`crate::gateway::ContentGateway`] and
//! [`crate::gateway::ObjectStore`].

mod content_editor;
mod error;
mod gate;
mod list;
mod mode;
mod notice;

pub use content_editor::{ContentEditor, Navigation};
pub use error::EditorError;
pub use gate::{ConfirmGate, GateState};
pub use list::ListRow;
pub use mode::EditorMode;
pub use notice::{Notice, NoticeLevel, Notices};
