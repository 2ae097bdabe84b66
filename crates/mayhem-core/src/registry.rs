use slotmap::Key;

/// Insertion-ordered set of handles eligible for a collision pass.
///
/// Membership is independent of entity lifetime: the owner must call
/// [`CollisionRegistry::remove`] when an entity is destroyed. Iteration order
/// is insertion order, which the separation pass depends on.
#[derive(Debug, Clone)]
pub struct CollisionRegistry<K: Key> {
    members: Vec<K>,
}

impl<K: Key> Default for CollisionRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key> CollisionRegistry<K> {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Enrol a handle. Returns `false` if it was already present.
    pub fn insert(&mut self, key: K) -> bool {
        if self.contains(key) {
            return false;
        }
        self.members.push(key);
        true
    }

    /// Remove a handle. Returns `false` if it was not present.
    pub fn remove(&mut self, key: K) -> bool {
        match self.members.iter().position(|&k| k == key) {
            Some(idx) => {
                self.members.remove(idx);
                true
            },
            None => false,
        }
    }

    pub fn contains(&self, key: K) -> bool {
        self.members.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn as_slice(&self) -> &[K] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        self.members.iter().copied()
    }
}
