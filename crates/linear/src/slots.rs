//! Indexed slot storage shared by the concrete backends.

use log::debug;

use crate::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotKind {
    Matrix,
    Vector,
    Solution,
}

impl SlotKind {
    pub fn name(self) -> &'static str {
        match self {
            SlotKind::Matrix => "matrix",
            SlotKind::Vector => "vector",
            SlotKind::Solution => "solution",
        }
    }

    fn index_field(self) -> &'static str {
        match self {
            SlotKind::Matrix => "matrix index",
            SlotKind::Vector => "vector index",
            SlotKind::Solution => "solution index",
        }
    }
}

#[track_caller]
fn not_initialized(kind: SlotKind, index: usize, location: &str) -> Error {
    Error::linear_system(
        location,
        format!("{} slot {} is not initialized", kind.name(), index),
    )
}

/// A fixed number of independently allocated storage slots of one kind.
///
/// A slot is either empty (never initialized, or destroyed) or holds storage `S`. Swapping
/// exchanges the storage of two slots, including empty ones.
#[derive(Clone, Debug)]
pub struct Slots<S> {
    kind: SlotKind,
    slots: Vec<Option<S>>,
}

impl<S> Slots<S> {
    pub fn new(kind: SlotKind, count: usize) -> Self {
        Slots {
            kind,
            slots: (0..count).map(|_| None).collect(),
        }
    }

    #[track_caller]
    fn check(&self, index: usize, location: &str) -> Result<(), Error> {
        if index < self.slots.len() {
            Ok(())
        } else {
            Err(Error::bounds(location, self.kind.index_field(), index))
        }
    }

    pub fn is_initialized(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(Some(_)))
    }

    #[track_caller]
    pub fn get(&self, index: usize, location: &str) -> Result<&S, Error> {
        self.check(index, location)?;
        let kind = self.kind;
        match self.slots[index].as_ref() {
            Some(storage) => Ok(storage),
            None => Err(not_initialized(kind, index, location)),
        }
    }

    #[track_caller]
    pub fn get_mut(&mut self, index: usize, location: &str) -> Result<&mut S, Error> {
        self.check(index, location)?;
        let kind = self.kind;
        match self.slots[index].as_mut() {
            Some(storage) => Ok(storage),
            None => Err(not_initialized(kind, index, location)),
        }
    }

    /// Installs fresh storage in a slot, replacing whatever it held.
    #[track_caller]
    pub fn insert(&mut self, index: usize, storage: S, location: &str) -> Result<(), Error> {
        self.check(index, location)?;
        debug!("initialize {} slot {}", self.kind.name(), index);
        self.slots[index] = Some(storage);
        Ok(())
    }

    /// Frees a slot. Destroying an empty slot is a no-op.
    #[track_caller]
    pub fn remove(&mut self, index: usize, location: &str) -> Result<(), Error> {
        self.check(index, location)?;
        if self.slots[index].take().is_some() {
            debug!("destroy {} slot {}", self.kind.name(), index);
        }
        Ok(())
    }

    #[track_caller]
    pub fn swap(&mut self, a: usize, b: usize, location: &str) -> Result<(), Error> {
        self.check(a, location)?;
        self.check(b, location)?;
        self.slots.swap(a, b);
        Ok(())
    }
}
