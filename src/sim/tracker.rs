//! Objects currently inside the light's trigger volume
//!
//! Only the overlap callbacks mutate the set; the frame update only reads it.

use super::scene::ObjectId;

/// Set of objects overlapping the light's trigger capsule
#[derive(Debug, Clone, Default)]
pub struct IntersectionTracker {
    /// Tracked objects in first-overlap order (stable iteration)
    tracked: Vec<ObjectId>,
    /// Objects that are never tracked (floor, wall)
    exempt: Vec<ObjectId>,
}

impl IntersectionTracker {
    pub fn new(exempt: Vec<ObjectId>) -> Self {
        Self {
            tracked: Vec::new(),
            exempt,
        }
    }

    /// Overlap started. Returns true if the object is now newly tracked.
    pub fn on_enter(&mut self, id: ObjectId) -> bool {
        if self.exempt.contains(&id) || self.tracked.contains(&id) {
            return false;
        }
        self.tracked.push(id);
        true
    }

    /// Overlap ended. Returns true if the object was tracked.
    pub fn on_exit(&mut self, id: ObjectId) -> bool {
        match self.tracked.iter().position(|&t| t == id) {
            Some(index) => {
                self.tracked.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.tracked.contains(&id)
    }

    pub fn is_exempt(&self, id: ObjectId) -> bool {
        self.exempt.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.tracked.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }
}
