use crate::traits::FieldValues;
use derive_more::{Deref, DerefMut};
use std::any::Any;

///
/// Roster
///
/// Insertion-ordered live instances of one entity type. Passive storage:
/// mutated only by successful construction appending, explicit removal, or
/// bulk clear. Enforces no constraints itself.
///

#[derive(Debug, Deref, DerefMut)]
pub struct Roster<E> {
    rows: Vec<E>,
}

impl<E: PartialEq> Roster<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Append an instance. Idempotent: an instance already present is not
    /// inserted twice.
    pub fn add(&mut self, instance: E) {
        if !self.rows.contains(&instance) {
            self.rows.push(instance);
        }
    }

    /// Remove the first matching instance. Returns whether one was found.
    pub fn remove(&mut self, target: &E) -> bool {
        match self.rows.iter().position(|row| row == target) {
            Some(index) => {
                self.rows.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

impl<E: PartialEq> Default for Roster<E> {
    fn default() -> Self {
        Self::new()
    }
}

///
/// RosterOps
///
/// Type-erased view over a roster, used where the store cannot name the
/// entity type (uniqueness scans, snapshot writing, bulk clears).
///

pub(crate) trait RosterOps {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live instances as field projections, in insertion order.
    fn rows(&self) -> Vec<&dyn FieldValues>;

    fn clear(&mut self);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<E: FieldValues + PartialEq + 'static> RosterOps for Roster<E> {
    fn len(&self) -> usize {
        self.rows.len()
    }

    fn rows(&self) -> Vec<&dyn FieldValues> {
        self.rows.iter().map(|row| row as &dyn FieldValues).collect()
    }

    fn clear(&mut self) {
        self.rows.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

///
/// TESTS
///
