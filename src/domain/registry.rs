//! EntityRegistry - arena that owns every entity.
//!
//! Slots are addressed by generational [`EntityId`]s; all cross references
//! (parent, children, ground) are plain ids, so a freed slot can never be
//! read through a stale handle. Processing order is the spawn order kept in
//! `order`, independent of slot reuse.

use super::entity::{Entity, EntityId};

struct Slot {
    generation: u32,
    entity: Option<Entity>,
}

pub struct EntityRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
    order: Vec<EntityId>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            order: Vec::new(),
        }
    }

    pub fn insert(&mut self, entity: Entity) -> EntityId {
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.entity = Some(entity);
                EntityId::new(index, slot.generation)
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot { generation: 0, entity: Some(entity) });
                EntityId::new(index, 0)
            }
        };
        self.order.push(id);
        id
    }

    #[inline]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entity.as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entity.as_mut()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Mutable access to two distinct live entities at once.
    pub fn pair_mut(&mut self, a: EntityId, b: EntityId) -> Option<(&mut Entity, &mut Entity)> {
        if a.index == b.index {
            return None;
        }
        let (ia, ib) = (a.index as usize, b.index as usize);
        if ia.max(ib) >= self.slots.len() {
            return None;
        }

        let (slot_a, slot_b) = if ia < ib {
            let (lo, hi) = self.slots.split_at_mut(ib);
            (&mut lo[ia], &mut hi[0])
        } else {
            let (lo, hi) = self.slots.split_at_mut(ia);
            (&mut hi[0], &mut lo[ib])
        };

        if slot_a.generation != a.generation || slot_b.generation != b.generation {
            return None;
        }
        match (slot_a.entity.as_mut(), slot_b.entity.as_mut()) {
            (Some(ea), Some(eb)) => Some((ea, eb)),
            _ => None,
        }
    }

    /// Ids in processing (spawn) order. Includes entities flagged destroyed
    /// until the next [`prune_destroyed`](Self::prune_destroyed).
    pub fn ids(&self) -> &[EntityId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.order
            .iter()
            .filter_map(move |&id| self.get(id).map(|e| (id, e)))
    }

    /// Remove every entity flagged destroyed. Returns how many were freed.
    pub fn prune_destroyed(&mut self) -> usize {
        let before = self.order.len();
        let slots = &mut self.slots;
        let free = &mut self.free;
        self.order.retain(|id| {
            let slot = &mut slots[id.index as usize];
            let dead = slot.entity.as_ref().map_or(true, |e| e.destroyed);
            if dead {
                slot.entity = None;
                slot.generation = slot.generation.wrapping_add(1);
                free.push(id.index);
            }
            !dead
        });
        before - self.order.len()
    }

    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.entity.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        self.order.clear();
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
