//! Editor mode state machine.

use crate::schema::Form;

/// What the detail pane is doing.
///
/// Only one entity can be under edit at a time, and the data each mode needs
/// to undo itself lives inside the variant.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditorMode {
    /// Nothing selected.
    #[default]
    Idle,
    /// Read-only view of the selected entity.
    Viewing,
    /// Editing the selected entity.
    Editing {
        /// Buffer as it was when editing started; restored on cancel.
        snapshot: Form,
    },
    /// Editing a draft that does not exist remotely yet.
    Creating {
        /// Selection to restore on cancel.
        restore: Option<String>,
        /// The draft as it was seeded, for change detection.
        pristine: Form,
    },
}

impl EditorMode {
    /// Whether field input is accepted.
    #[must_use]
    pub const fn accepts_input(&self) -> bool {
        matches!(self, Self::Editing { .. } | Self::Creating { .. })
    }

    /// Whether a draft is open.
    #[must_use]
    pub const fn is_creating(&self) -> bool {
        matches!(self, Self::Creating { .. })
    }

    /// Whether an existing entity is under edit.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    /// Baseline the buffer is compared with for unsaved changes.
    #[must_use]
    pub const fn baseline(&self) -> Option<&Form> {
        match self {
            Self::Editing { snapshot } => Some(snapshot),
            Self::Creating { pristine, .. } => Some(pristine),
            Self::Idle | Self::Viewing => None,
        }
    }

    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Viewing => "viewing",
            Self::Editing { .. } => "editing",
            Self::Creating { .. } => "creating",
        }
    }
}
