//! Arena of units keyed by id.
//!
//! Units are never removed; dead units stay in place, inert. Iteration
//! order is insertion order, which fixes hit-test order for projectiles.

use std::collections::HashMap;

use tankcombat_core::types::UnitId;

use crate::capability::Damageable;
use crate::unit::Unit;

#[derive(Debug, Clone, Default)]
pub struct UnitRegistry {
    units: Vec<Unit>,
    index: HashMap<UnitId, usize>,
    next_id: u32,
}

impl UnitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a fresh id.
    pub fn allocate_id(&mut self) -> UnitId {
        let id = UnitId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a unit. Returns false, leaving the registry untouched, if its
    /// id is already present.
    pub fn insert(&mut self, unit: Unit) -> bool {
        let id = unit.id();
        if self.index.contains_key(&id) {
            return false;
        }
        self.next_id = self.next_id.max(id.0 + 1);
        self.index.insert(id, self.units.len());
        self.units.push(unit);
        true
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.index.get(&id).map(|&i| &self.units[i])
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.index.get(&id).map(|&i| &mut self.units[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.units.iter_mut()
    }

    pub fn as_slice(&self) -> &[Unit] {
        &self.units
    }

    pub fn as_mut_slice(&mut self) -> &mut [Unit] {
        &mut self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn alive_count(&self) -> usize {
        self.units.iter().filter(|u| u.is_alive()).count()
    }
}
