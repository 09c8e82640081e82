//! Entity registry
//!
//! Live projectiles and enemies are plain records held in three independent
//! slot arenas (player bullets, enemy bullets, enemies). Everything outside the
//! registry refers to them through a [`Handle`], never by reference.
//!
//! Handles are generational: destroying a body bumps its slot generation, so a
//! stale handle can never address whatever later reuses the slot.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The three independent entity collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collection {
    PlayerBullets,
    EnemyBullets,
    Enemies,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::PlayerBullets,
        Collection::EnemyBullets,
        Collection::Enemies,
    ];

    fn slot(self) -> usize {
        match self {
            Collection::PlayerBullets => 0,
            Collection::EnemyBullets => 1,
            Collection::Enemies => 2,
        }
    }
}

/// Enemy variants (visual only, behaviorally identical)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Scout,
    Raider,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 2] = [EnemyKind::Scout, EnemyKind::Raider];

    /// Texture id handed to the renderer
    pub fn texture(&self) -> &'static str {
        match self {
            EnemyKind::Scout => "enemy_scout",
            EnemyKind::Raider => "enemy_raider",
        }
    }
}

/// What a body is; decides the collection it lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    PlayerBullet,
    EnemyBullet,
    Enemy(EnemyKind),
}

impl BodyKind {
    pub fn collection(&self) -> Collection {
        match self {
            BodyKind::PlayerBullet => Collection::PlayerBullets,
            BodyKind::EnemyBullet => Collection::EnemyBullets,
            BodyKind::Enemy(_) => Collection::Enemies,
        }
    }
}

/// A projectile or enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    /// Velocity in pixels/s (y grows downward)
    pub vel: Vec2,
    pub kind: BodyKind,
}

impl Body {
    /// Player bullet moving straight up
    pub fn player_bullet(pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            vel: Vec2::new(0.0, -speed),
            kind: BodyKind::PlayerBullet,
        }
    }

    /// Enemy bullet moving straight down
    pub fn enemy_bullet(pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            vel: Vec2::new(0.0, speed),
            kind: BodyKind::EnemyBullet,
        }
    }

    /// Enemy descending at `speed`
    pub fn enemy(kind: EnemyKind, pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            vel: Vec2::new(0.0, speed),
            kind: BodyKind::Enemy(kind),
        }
    }
}

/// Opaque reference to a body in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Handle {
    collection: Collection,
    index: u32,
    generation: u32,
}

impl Handle {
    pub fn collection(&self) -> Collection {
        self.collection
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    body: Option<Body>,
}

/// One collection: slots plus a free list of vacant indices
#[derive(Debug, Clone, Default)]
struct Pool {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl Pool {
    fn insert(&mut self, body: Body) -> (u32, u32) {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.body = Some(body);
            return (index, slot.generation);
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            body: Some(body),
        });
        (index, 0)
    }

    fn remove(&mut self, index: u32, generation: u32) -> Option<Body> {
        let slot = self.slots.get_mut(index as usize)?;
        if slot.generation != generation {
            return None;
        }
        let body = slot.body.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
        self.live -= 1;
        Some(body)
    }

    fn get(&self, index: u32, generation: u32) -> Option<&Body> {
        self.slots
            .get(index as usize)
            .filter(|s| s.generation == generation)
            .and_then(|s| s.body.as_ref())
    }

    fn get_mut(&mut self, index: u32, generation: u32) -> Option<&mut Body> {
        self.slots
            .get_mut(index as usize)
            .filter(|s| s.generation == generation)
            .and_then(|s| s.body.as_mut())
    }

    fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.body.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        self.live = 0;
    }
}

/// Owner of every live projectile and enemy
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pools: [Pool; 3],
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a body; the collection follows from its kind
    pub fn spawn(&mut self, body: Body) -> Handle {
        let collection = body.kind.collection();
        let (index, generation) = self.pools[collection.slot()].insert(body);
        Handle {
            collection,
            index,
            generation,
        }
    }

    /// Remove a body. Destroying an already-destroyed handle is a no-op and
    /// returns `false`.
    pub fn destroy(&mut self, handle: Handle) -> bool {
        self.pools[handle.collection.slot()]
            .remove(handle.index, handle.generation)
            .is_some()
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: Handle) -> Option<&Body> {
        self.pools[handle.collection.slot()].get(handle.index, handle.generation)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut Body> {
        self.pools[handle.collection.slot()].get_mut(handle.index, handle.generation)
    }

    /// Number of live bodies in a collection
    pub fn len(&self, collection: Collection) -> usize {
        self.pools[collection.slot()].live
    }

    pub fn is_empty(&self, collection: Collection) -> bool {
        self.len(collection) == 0
    }

    /// Live bodies across all collections
    pub fn total(&self) -> usize {
        self.pools.iter().map(|p| p.live).sum()
    }

    /// Iterate a collection. Order is unspecified.
    pub fn iter(&self, collection: Collection) -> impl Iterator<Item = (Handle, &Body)> + '_ {
        self.pools[collection.slot()]
            .slots
            .iter()
            .enumerate()
            .filter_map(move |(index, slot)| {
                slot.body.as_ref().map(|body| {
                    (
                        Handle {
                            collection,
                            index: index as u32,
                            generation: slot.generation,
                        },
                        body,
                    )
                })
            })
    }

    /// Visit every live body of a collection. Order is unspecified.
    pub fn for_each(&self, collection: Collection, mut visitor: impl FnMut(Handle, &Body)) {
        for (handle, body) in self.iter(collection) {
            visitor(handle, body);
        }
    }

    /// Visit every live body of a collection mutably. Order is unspecified.
    pub fn for_each_mut(&mut self, collection: Collection, mut visitor: impl FnMut(Handle, &mut Body)) {
        for (index, slot) in self.pools[collection.slot()].slots.iter_mut().enumerate() {
            let generation = slot.generation;
            if let Some(body) = slot.body.as_mut() {
                let handle = Handle {
                    collection,
                    index: index as u32,
                    generation,
                };
                visitor(handle, body);
            }
        }
    }

    /// Destroy everything. Outstanding handles all become stale.
    pub fn clear(&mut self) {
        for pool in &mut self.pools {
            pool.clear();
        }
    }
}
