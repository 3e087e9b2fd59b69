//! Cached, ordered collections of API entities.

use blitzware_core::models::{
    AppLog, Application, ChatMessage, File, License, Log, User, UserSubscription,
};

/// Entity with a stable server-side id.
pub trait Identified {
    type Id: PartialEq + ToString;

    fn id(&self) -> &Self::Id;
}

macro_rules! identified {
    ($($ty:ty => $id:ty),* $(,)?) => {
        $(
            impl Identified for $ty {
                type Id = $id;

                fn id(&self) -> &Self::Id {
                    &self.id
                }
            }
        )*
    };
}

identified! {
    Application => String,
    ChatMessage => i64,
    Log => i64,
    AppLog => i64,
    User => String,
    UserSubscription => i64,
    License => String,
    File => String,
}

/// Ordered cache of one resource, in the order the server returned it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Identified> Collection<T> {
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Replace the contents wholesale.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) {
        self.items.extend(items);
    }

    /// Remove the first entry with `id`. Later duplicates are left alone.
    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Apply `patch` to the first entry with `id`. Returns whether one matched.
    pub fn patch(&mut self, id: &T::Id, patch: impl FnOnce(&mut T)) -> bool {
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                patch(item);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a, T: Identified> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
