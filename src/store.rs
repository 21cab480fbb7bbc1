//! Persistence seam for templates.
//!
//! The engine is storage-agnostic; callers plug in a [`TemplateStore`]
//! backed by whatever they have (a database table, files, an in-memory
//! map in tests). At most one template is active at a time — the active
//! one is what respondents get their form from.

use serde::{Deserialize, Serialize};

use crate::types::TemplateDocument;
use crate::Result;

/// Lifecycle state of a stored template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateState {
    /// Published; respondents fill this one.
    Active,
    /// Saved but not published.
    Inactive,
    /// Recorded but its body failed to load or was never written.
    Missing,
}

impl TemplateState {
    /// Human-readable state label.
    pub fn describe(&self) -> &'static str {
        match self {
            TemplateState::Active => "активен",
            TemplateState::Inactive => "не активен",
            TemplateState::Missing => "повреждён",
        }
    }

    /// Whether respondents may be served a form from this template.
    pub fn can_be_used_for_fill(&self) -> bool {
        matches!(self, TemplateState::Active)
    }

    /// Whether the template may be switched to [`TemplateState::Active`].
    pub fn can_be_activated(&self) -> bool {
        matches!(self, TemplateState::Inactive)
    }
}

/// A template as it sits in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTemplate {
    pub id: i64,
    pub name: String,
    /// `None` when the stored body could not be decoded.
    pub document: Option<TemplateDocument>,
    pub state: TemplateState,
}

impl StoredTemplate {
    /// A record whose body is gone; kept listable so administrators can
    /// see and delete it.
    pub fn missing(id: i64, name: impl Into<String>) -> Self {
        StoredTemplate {
            id,
            name: name.into(),
            document: None,
            state: TemplateState::Missing,
        }
    }
}

/// Storage backend for templates.
pub trait TemplateStore {
    /// Persist a new template; returns the stored record with its id.
    /// When `make_active` is set the new template becomes the single
    /// active one and every other template is deactivated.
    fn create(&mut self, document: &TemplateDocument, make_active: bool)
        -> Result<StoredTemplate>;

    /// Fetch one template by id.
    fn fetch_by_id(&self, id: i64) -> Result<Option<StoredTemplate>>;

    /// Fetch the active template, if any.
    fn fetch_active(&self) -> Result<Option<StoredTemplate>>;

    /// List every stored template.
    fn list(&self) -> Result<Vec<StoredTemplate>>;

    /// Make one template the single active one, deactivating the rest.
    fn set_active(&mut self, id: i64) -> Result<()>;
}
