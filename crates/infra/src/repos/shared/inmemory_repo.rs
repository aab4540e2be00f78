use companion_reminders_domain::{Entity, ID};
use std::sync::{Mutex, MutexGuard};

/// Useful functions for creating inmemory repositories

fn lock<T>(collection: &Mutex<Vec<T>>) -> MutexGuard<'_, Vec<T>> {
    collection.lock().unwrap_or_else(|e| e.into_inner())
}

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = lock(collection);
    collection.push(val.clone());
}

/// Replaces the value with the same id or inserts it
pub fn upsert<T: Clone + Entity<ID>>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = lock(collection);
    let val_id = val.id();
    match collection.iter().position(|item| item.id() == val_id) {
        Some(i) => collection[i] = val.clone(),
        None => collection.push(val.clone()),
    }
}

pub fn find<T: Clone + Entity<ID>>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let collection = lock(collection);
    collection.iter().find(|item| item.id() == *val_id).cloned()
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(collection: &Mutex<Vec<T>>, mut compare: F) -> Vec<T> {
    let collection = lock(collection);
    let mut items = Vec::new();
    for item in collection.iter() {
        if compare(item) {
            items.push(item.clone());
        }
    }
    items
}

/// Applies `update` to the value with the given id and returns the result
pub fn update<T: Clone + Entity<ID>, U: FnOnce(&mut T)>(
    val_id: &ID,
    collection: &Mutex<Vec<T>>,
    update: U,
) -> Option<T> {
    let mut collection = lock(collection);
    let item = collection.iter_mut().find(|item| item.id() == *val_id)?;
    update(item);
    Some(item.clone())
}

pub fn delete<T: Clone + Entity<ID>>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let mut collection = lock(collection);
    let index = collection.iter().position(|item| item.id() == *val_id)?;
    Some(collection.remove(index))
}
