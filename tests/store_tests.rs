//! Tests for the storage seam
//!
//! Drives the `TemplateStore` trait through a small in-memory backend,
//! checking the single-active-template lifecycle a real store must keep.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use gridform::store::{StoredTemplate, TemplateState, TemplateStore};
use gridform::{GridformError, Result, TemplateDocument};

#[derive(Default)]
struct MemoryStore {
    records: Vec<StoredTemplate>,
    next_id: i64,
}

impl TemplateStore for MemoryStore {
    fn create(&mut self, document: &TemplateDocument, make_active: bool) -> Result<StoredTemplate> {
        self.next_id += 1;
        if make_active {
            for record in &mut self.records {
                if record.state == TemplateState::Active {
                    record.state = TemplateState::Inactive;
                }
            }
        }
        let record = StoredTemplate {
            id: self.next_id,
            name: document.name().to_string(),
            document: Some(document.clone()),
            state: if make_active {
                TemplateState::Active
            } else {
                TemplateState::Inactive
            },
        };
        self.records.push(record.clone());
        Ok(record)
    }

    fn fetch_by_id(&self, id: i64) -> Result<Option<StoredTemplate>> {
        Ok(self.records.iter().find(|r| r.id == id).cloned())
    }

    fn fetch_active(&self) -> Result<Option<StoredTemplate>> {
        Ok(self
            .records
            .iter()
            .find(|r| r.state == TemplateState::Active)
            .cloned())
    }

    fn list(&self) -> Result<Vec<StoredTemplate>> {
        Ok(self.records.clone())
    }

    fn set_active(&mut self, id: i64) -> Result<()> {
        if !self.records.iter().any(|r| r.id == id) {
            return Err(GridformError::Store(format!("no template with id {id}")));
        }
        for record in &mut self.records {
            record.state = if record.id == id {
                TemplateState::Active
            } else {
                TemplateState::Inactive
            };
        }
        Ok(())
    }
}

#[test]
fn creating_an_active_template_deactivates_the_previous_one() {
    let mut store = MemoryStore::default();
    let first = store.create(&TemplateDocument::default(), true).unwrap();

    let mut second_doc = TemplateDocument::default();
    second_doc.set_name("Второй шаблон");
    let second = store.create(&second_doc, true).unwrap();

    assert_eq!(store.fetch_active().unwrap().unwrap().id, second.id);
    assert_eq!(
        store.fetch_by_id(first.id).unwrap().unwrap().state,
        TemplateState::Inactive
    );
}

#[test]
fn at_most_one_template_is_ever_active() {
    let mut store = MemoryStore::default();
    for _ in 0..4 {
        store.create(&TemplateDocument::default(), false).unwrap();
    }
    store.set_active(2).unwrap();
    store.set_active(4).unwrap();

    let active: Vec<_> = store
        .list()
        .unwrap()
        .into_iter()
        .filter(|r| r.state == TemplateState::Active)
        .collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, 4);
}

#[test]
fn activating_an_unknown_id_fails_without_touching_state() {
    let mut store = MemoryStore::default();
    store.create(&TemplateDocument::default(), true).unwrap();

    assert!(store.set_active(99).is_err());
    assert_eq!(store.fetch_active().unwrap().unwrap().id, 1);
}

#[test]
fn inactive_templates_are_listed_but_not_served() {
    let mut store = MemoryStore::default();
    let record = store.create(&TemplateDocument::default(), false).unwrap();

    assert!(store.fetch_active().unwrap().is_none());
    assert!(!record.state.can_be_used_for_fill());
    assert!(record.state.can_be_activated());
    assert_eq!(store.list().unwrap().len(), 1);
}
