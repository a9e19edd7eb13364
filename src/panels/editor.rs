//! Append-only list editor with a draft form.
//!
//! DESIGN
//! ======
//! The editor mirrors a form: a draft record of raw text fields plus the
//! list it appends to. `add` validates the draft; when a required field is
//! empty nothing happens at all (no error, draft kept), otherwise the new
//! record gets the next id, is appended, and the draft is cleared.
//!
//! `submit` overlays fields on the draft and adds in one store update, so a
//! view never observes the half-applied form.

use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;
use tracing::debug;

use super::{PanelError, PanelView};
use crate::ids::IdSequence;
use crate::store::Store;

/// The raw form behind one kind of list record.
pub trait Draft: Default + Clone + Serialize + Send + 'static {
    type Item: Clone + Serialize + Send + 'static;

    /// Snapshot key under which the list is published.
    const LIST: &'static str;

    fn item_id(item: &Self::Item) -> u64;

    /// Overwrite one named field.
    ///
    /// # Errors
    ///
    /// `UnknownField` if the form has no such field.
    fn set_field(&mut self, field: &str, value: String) -> Result<(), PanelError>;

    /// Build a record from the draft. `Ok(None)` when a required field is
    /// empty; `next_id` is only called when a record is produced.
    ///
    /// # Errors
    ///
    /// When a field is present but unusable.
    fn build(&self, next_id: impl FnOnce() -> u64) -> Result<Option<Self::Item>, PanelError>;
}

struct EditorState<D: Draft> {
    items: Vec<D::Item>,
    draft: D,
    ids: IdSequence,
}

pub struct ListEditor<D: Draft> {
    state: Store<EditorState<D>>,
}

impl<D: Draft> ListEditor<D> {
    /// Editor seeded with `items`; new ids continue after the highest seed.
    pub fn new(items: Vec<D::Item>) -> Self {
        let ids = IdSequence::after_all(items.iter().map(D::item_id));
        Self { state: Store::new(EditorState { items, draft: D::default(), ids }) }
    }

    #[must_use]
    pub fn items(&self) -> Vec<D::Item> {
        self.state.read(|s| s.items.clone())
    }

    #[must_use]
    pub fn draft(&self) -> D {
        self.state.read(|s| s.draft.clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read(|s| s.items.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Update one draft field.
    ///
    /// # Errors
    ///
    /// `UnknownField` if the form has no such field; the draft is unchanged.
    pub fn set_field(&self, field: &str, value: impl Into<String>) -> Result<(), PanelError> {
        let value = value.into();
        self.state.try_update(|s| s.draft.set_field(field, value))
    }

    /// Add the current draft.
    ///
    /// # Errors
    ///
    /// See `Draft::build`.
    pub fn add(&self) -> Result<Option<D::Item>, PanelError> {
        self.submit(Vec::new())
    }

    /// Overlay `fields` on the draft, then add.
    ///
    /// Returns `Ok(None)` when a required field is still empty, in which case
    /// the list is untouched and the overlaid draft is kept.
    ///
    /// # Errors
    ///
    /// `UnknownField` for a field the form lacks, or any error from
    /// `Draft::build`. Neither the draft nor the list changes.
    pub fn submit(&self, fields: Vec<(String, String)>) -> Result<Option<D::Item>, PanelError> {
        self.state.try_update(|s| {
            let mut draft = s.draft.clone();
            for (field, value) in fields {
                draft.set_field(&field, value)?;
            }
            let Some(item) = draft.build(|| s.ids.next_id())? else {
                s.draft = draft;
                return Ok(None);
            };
            s.items.push(item.clone());
            s.draft = D::default();
            debug!(list = D::LIST, id = D::item_id(&item), "editor: item added");
            Ok(Some(item))
        })
    }
}

impl<D: Draft> PanelView for ListEditor<D> {
    fn snapshot(&self) -> Value {
        self.state.read(|s| {
            let mut map = serde_json::Map::new();
            map.insert(D::LIST.into(), serde_json::to_value(&s.items).unwrap_or_default());
            map.insert("draft".into(), serde_json::to_value(&s.draft).unwrap_or_default());
            Value::Object(map)
        })
    }

    fn feeds(&self) -> Vec<watch::Receiver<u64>> {
        vec![self.state.subscribe()]
    }
}
