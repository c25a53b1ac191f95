/// A generational index storage container
#[derive(Debug, Clone)]
pub struct DenseStorage<T> {
    // (generation, value)
    storage: Vec<(u32, Option<T>)>,
    recycled_indices: Vec<usize>,
}

/// Stores the dense storage index and generational index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DenseStorageIndex(pub usize, pub u32);

impl<T> DenseStorage<T> {
    pub fn new() -> Self {
        Self {
            storage: Vec::new(),
            recycled_indices: Vec::new(),
        }
    }

    pub fn push(&mut self, value: T) -> DenseStorageIndex {
        if let Some(i) = self.recycled_indices.pop() {
            let (generation, v) = &mut self.storage[i];
            *v = Some(value);
            DenseStorageIndex(i, *generation)
        } else {
            self.storage.push((0, Some(value)));
            DenseStorageIndex(self.storage.len() - 1, 0)
        }
    }

    pub fn get(&self, index: DenseStorageIndex) -> Option<&T> {
        self.storage
            .get(index.0)
            .filter(|(generation, _)| *generation == index.1)
            .and_then(|(_, value)| value.as_ref())
    }

    pub fn get_mut(&mut self, index: DenseStorageIndex) -> Option<&mut T> {
        self.storage
            .get_mut(index.0)
            .filter(|(generation, _)| *generation == index.1)
            .and_then(|(_, value)| value.as_mut())
    }

    /// Replaces the value behind a live handle, returning the old one.
    pub fn replace(&mut self, index: DenseStorageIndex, value: T) -> Option<T> {
        self.get_mut(index).map(|slot| std::mem::replace(slot, value))
    }

    pub fn remove(&mut self, index: DenseStorageIndex) -> Option<T> {
        match self.storage.get_mut(index.0) {
            Some((generation, value)) if *generation == index.1 && value.is_some() => {
                *generation += 1;
                self.recycled_indices.push(index.0);
                value.take()
            }
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.storage.len() - self.recycled_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over live values in slot order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.storage.iter().filter_map(|(_, value)| value.as_ref())
    }
}

impl<T> Default for DenseStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}
