//! Local Collection Store
//!
//! Ordered in-memory collections with id-keyed replace/remove. Queries build a
//! fresh list from the base collection each time; nothing is sorted in place.

use std::cmp::Ordering;
use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::error::CollectionError;
use crate::models::{Document, InspectionRecord};

/// Anything stored in a [`Collection`]
pub trait Entity: Clone {
    type Id: Copy + Eq + Debug;

    fn id(&self) -> Self::Id;
}

impl Entity for InspectionRecord {
    type Id = u64;
    fn id(&self) -> u64 {
        self.id
    }
}

impl Entity for Document {
    type Id = u64;
    fn id(&self) -> u64 {
        self.id
    }
}

/// Millisecond-timestamp ids, bumped so they strictly increase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn next(&mut self) -> u64 {
        let now = chrono::Utc::now().timestamp_millis().max(0) as u64;
        self.next_at(now)
    }

    pub fn next_at(&mut self, now_ms: u64) -> u64 {
        let id = now_ms.max(self.last + 1);
        self.last = id;
        id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from seed records; later duplicates of an id are dropped
    pub fn from_vec(seed: Vec<T>) -> Self {
        let mut collection = Self::new();
        for item in seed {
            if let Err(e) = collection.push_back(item) {
                log::warn!("[STORE] Skipping seed record: {}", e);
            }
        }
        collection
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: T::Id) -> bool {
        self.get(id).is_some()
    }

    fn check_unique(&self, item: &T) -> Result<(), CollectionError> {
        if self.contains(item.id()) {
            return Err(CollectionError::DuplicateId(format!("{:?}", item.id())));
        }
        Ok(())
    }

    /// Insert at the head (newest first lists)
    pub fn insert_front(&mut self, item: T) -> Result<(), CollectionError> {
        self.check_unique(&item)?;
        self.items.insert(0, item);
        Ok(())
    }

    pub fn push_back(&mut self, item: T) -> Result<(), CollectionError> {
        self.check_unique(&item)?;
        self.items.push(item);
        Ok(())
    }

    /// Replace the record with the same id. Returns false (and changes
    /// nothing) when no such record exists.
    pub fn replace(&mut self, updated: T) -> bool {
        match self.items.iter_mut().find(|item| item.id() == updated.id()) {
            Some(item) => {
                *item = updated;
                true
            }
            None => false,
        }
    }

    /// Remove exactly one record by id
    pub fn remove(&mut self, id: T::Id) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Filtered, optionally sorted copy of the collection
    pub fn query<P>(&self, predicate: P, order: Option<&dyn Fn(&T, &T) -> Ordering>) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        let mut result: Vec<T> = self.items.iter().filter(|item| predicate(item)).cloned().collect();
        if let Some(cmp) = order {
            result.sort_by(|a, b| cmp(a, b));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InspectionFields;

    fn record(id: u64, op: &str) -> InspectionRecord {
        InspectionRecord {
            id,
            fields: InspectionFields { op: op.to_string(), ..Default::default() },
        }
    }

    #[test]
    fn test_ids_strictly_increase() {
        let mut ids = IdGenerator::default();
        assert_eq!(ids.next_at(1000), 1000);
        assert_eq!(ids.next_at(1000), 1001);
        assert_eq!(ids.next_at(999), 1002);
        assert_eq!(ids.next_at(5000), 5000);
    }

    #[test]
    fn test_n_creates_give_n_distinct_ids() {
        let mut ids = IdGenerator::default();
        let mut submissions = Collection::new();
        for i in 0..50 {
            submissions.insert_front(record(ids.next(), &i.to_string())).unwrap();
        }
        let mut seen: Vec<u64> = submissions.iter().map(|r| r.id).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 50);
    }

    #[test]
    fn test_remove_one_keeps_order() {
        let mut submissions = Collection::from_vec((1..=5).map(|i| record(i, "x")).collect());
        let removed = submissions.remove(3);
        assert_eq!(removed.map(|r| r.id), Some(3));
        let ids: Vec<u64> = submissions.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 4, 5]);
    }

    #[test]
    fn test_missing_ids_are_noops() {
        let mut submissions = Collection::from_vec(vec![record(1, "a")]);
        assert!(submissions.remove(9).is_none());
        assert!(!submissions.replace(record(9, "b")));
        assert_eq!(submissions.as_slice(), &[record(1, "a")]);
    }

    #[test]
    fn test_replace_is_full_record() {
        let mut submissions = Collection::from_vec(vec![record(1, "a"), record(2, "b")]);
        let mut edited = record(2, "b2");
        edited.fields.estado = "Rechazado".to_string();
        assert!(submissions.replace(edited.clone()));
        assert_eq!(submissions.get(2), Some(&edited));
        assert_eq!(submissions.as_slice()[0], record(1, "a"));
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let mut submissions = Collection::new();
        submissions.push_back(record(1, "a")).unwrap();
        assert!(submissions.insert_front(record(1, "b")).is_err());
        assert_eq!(submissions.len(), 1);
    }

    #[test]
    fn test_query_does_not_mutate() {
        let submissions = Collection::from_vec(vec![record(1, "c"), record(2, "a"), record(3, "b")]);
        let by_op = |a: &InspectionRecord, b: &InspectionRecord| a.fields.op.cmp(&b.fields.op);
        let sorted = submissions.query(|r| r.fields.op != "b", Some(&by_op));
        assert_eq!(sorted.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(submissions.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
