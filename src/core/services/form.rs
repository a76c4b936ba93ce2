//! Admin form controller
//!
//! One controller per content kind. It holds the draft being edited and
//! walks it through a small state machine:
//!
//! ```text
//! idle ──begin_new/begin_edit──▶ editing ──start_submit──▶ submitting
//!   ▲                              ▲  │                        │
//!   │                              │  └─cancel──▶ idle         │
//!   └────────── success ───────────┴──────── failure ──────────┘
//! ```
//!
//! A failed submit keeps the draft so the operator can retry.

use serde::Serialize;

use super::repository::ContentRepository;
use crate::core::models::{ContentKind, DocumentId, FormError};
use crate::core::ports::StoreError;

/// What a draft will be written as
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "id", rename_all = "lowercase")]
pub enum Target {
    /// A new document
    New,
    /// An existing document
    Existing(DocumentId),
}

/// Controller state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum FormState<F> {
    /// No draft; the list view
    Idle,
    /// A draft is open
    Editing {
        /// Where the draft goes
        target: Target,
        /// The form text
        draft: F,
        /// Why the last submit failed, if it did
        error: Option<String>,
    },
    /// A write is in flight; submit is disabled
    Submitting {
        /// Where the draft goes
        target: Target,
        /// The form text
        draft: F,
    },
}

/// A transformed draft ready to be written
#[derive(Debug, Clone, PartialEq)]
pub enum PendingWrite<K> {
    /// Create a document
    Create(K),
    /// Overwrite a document
    Update(DocumentId, K),
}

/// How a submit ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Written; the controller is idle again
    Saved(DocumentId),
    /// The draft did not validate; still editing
    Invalid(String),
    /// The store refused the write; still editing, draft kept
    Failed(String),
}

impl SubmitOutcome {
    /// Operator-facing status line
    #[must_use]
    pub fn status(&self) -> String {
        match self {
            Self::Saved(id) => format!("Saved {id}"),
            Self::Invalid(message) | Self::Failed(message) => message.clone(),
        }
    }
}

/// Editing state machine for one content kind
#[derive(Debug, Clone)]
pub struct FormController<K: ContentKind> {
    state: FormState<K::Form>,
    original: Option<K>,
}

impl<K: ContentKind> Default for FormController<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ContentKind> FormController<K> {
    /// An idle controller
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: FormState::Idle,
            original: None,
        }
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &FormState<K::Form> {
        &self.state
    }

    /// Whether the submit control is enabled
    #[must_use]
    pub const fn can_submit(&self) -> bool {
        matches!(self.state, FormState::Editing { .. })
    }

    /// The open draft, if any
    #[must_use]
    pub const fn draft(&self) -> Option<&K::Form> {
        match &self.state {
            FormState::Editing { draft, .. } | FormState::Submitting { draft, .. } => Some(draft),
            FormState::Idle => None,
        }
    }

    /// Open a blank draft for a new item
    pub fn begin_new(&mut self) -> Result<(), FormError> {
        self.ensure_not_submitting()?;
        self.original = None;
        self.state = FormState::Editing {
            target: Target::New,
            draft: K::Form::default(),
            error: None,
        };
        Ok(())
    }

    /// Open a draft populated from an existing item
    pub fn begin_edit(&mut self, id: DocumentId, item: &K) -> Result<(), FormError> {
        self.ensure_not_submitting()?;
        self.state = FormState::Editing {
            target: Target::Existing(id),
            draft: item.to_form(),
            error: None,
        };
        self.original = Some(item.clone());
        Ok(())
    }

    /// Replace the draft text
    pub fn set_draft(&mut self, form: K::Form) -> Result<(), FormError> {
        match &mut self.state {
            FormState::Editing { draft, .. } => {
                *draft = form;
                Ok(())
            },
            FormState::Submitting { .. } => Err(FormError::Busy),
            FormState::Idle => Err(FormError::NotEditing),
        }
    }

    /// Discard the draft
    pub fn cancel(&mut self) -> Result<(), FormError> {
        self.ensure_not_submitting()?;
        self.state = FormState::Idle;
        self.original = None;
        Ok(())
    }

    /// Validate and transform the draft, entering `submitting`
    ///
    /// On a validation error the controller stays in `editing` with the
    /// error recorded.
    pub fn start_submit(&mut self) -> Result<PendingWrite<K>, FormError> {
        let (target, draft) = match &self.state {
            FormState::Editing { target, draft, .. } => (target.clone(), draft.clone()),
            FormState::Submitting { .. } => return Err(FormError::Busy),
            FormState::Idle => return Err(FormError::NotEditing),
        };
        let draft = match &self.original {
            Some(original) => K::keep_kind(draft, original),
            None => draft,
        };

        let item = match K::from_form(&draft) {
            Ok(item) => item,
            Err(e) => {
                self.state = FormState::Editing {
                    target,
                    draft,
                    error: Some(e.to_string()),
                };
                return Err(e);
            },
        };

        let pending = match (&target, &self.original) {
            (Target::Existing(id), Some(original)) => {
                PendingWrite::Update(id.clone(), item.carry_over(original))
            },
            (Target::Existing(id), None) => PendingWrite::Update(id.clone(), item),
            (Target::New, _) => PendingWrite::Create(item),
        };
        self.state = FormState::Submitting { target, draft };
        Ok(pending)
    }

    /// Finish a submit with the store's answer
    pub fn finish_submit(&mut self, result: Result<DocumentId, StoreError>) -> SubmitOutcome {
        let FormState::Submitting { target, draft } =
            std::mem::replace(&mut self.state, FormState::Idle)
        else {
            log::warn!("{} submit finished while not submitting", K::LABEL);
            return SubmitOutcome::Failed(FormError::NotEditing.to_string());
        };

        match result {
            Ok(id) => {
                self.original = None;
                SubmitOutcome::Saved(id)
            },
            Err(e) => {
                log::warn!("saving {} failed: {e}", K::LABEL);
                let message = format!("Could not save {}: {e}", K::LABEL);
                self.state = FormState::Editing {
                    target,
                    draft,
                    error: Some(message.clone()),
                };
                SubmitOutcome::Failed(message)
            },
        }
    }

    /// Submit the draft through `repo`
    pub fn submit(&mut self, repo: &ContentRepository<K>) -> SubmitOutcome {
        let pending = match self.start_submit() {
            Ok(pending) => pending,
            Err(e) => return SubmitOutcome::Invalid(e.to_string()),
        };
        let result = match pending {
            PendingWrite::Create(item) => repo.create(&item),
            PendingWrite::Update(id, item) => repo.update(&id, &item).map(|()| id),
        };
        self.finish_submit(result)
    }

    fn ensure_not_submitting(&self) -> Result<(), FormError> {
        if matches!(self.state, FormState::Submitting { .. }) {
            Err(FormError::Busy)
        } else {
            Ok(())
        }
    }
}
