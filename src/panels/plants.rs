//! Plant list editor. Name and photo URL are required; notes are optional.

use serde::Serialize;

use super::PanelError;
use super::editor::{Draft, ListEditor};
use crate::model::Plant;

pub type PlantsPanel = ListEditor<PlantDraft>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlantDraft {
    pub name: String,
    pub photo_url: String,
    pub notes: String,
}

impl Draft for PlantDraft {
    type Item = Plant;

    const LIST: &'static str = "plants";

    fn item_id(item: &Plant) -> u64 {
        item.id
    }

    fn set_field(&mut self, field: &str, value: String) -> Result<(), PanelError> {
        match field {
            "name" => self.name = value,
            "photo_url" => self.photo_url = value,
            "notes" => self.notes = value,
            other => return Err(PanelError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    fn build(&self, next_id: impl FnOnce() -> u64) -> Result<Option<Plant>, PanelError> {
        if self.name.is_empty() || self.photo_url.is_empty() {
            return Ok(None);
        }
        Ok(Some(Plant {
            id: next_id(),
            name: self.name.clone(),
            photo_url: self.photo_url.clone(),
            notes: self.notes.clone(),
        }))
    }
}
