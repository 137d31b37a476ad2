// ============================================================================
// STORAGE - Persistencia clave/valor de tokens
// ============================================================================
// localStorage en el navegador; MemoryStorage cuando no está disponible
// (modo privado, storage deshabilitado) y en tests.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use web_sys::{window, Storage};

pub trait TokenStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove(&self, key: &str) -> Result<(), String>;
}

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// Backend de `window.localStorage`
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// `None` si localStorage no es accesible
    pub fn open() -> Option<Self> {
        get_local_storage().map(|storage| Self { storage })
    }
}

impl TokenStorage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.storage
            .set_item(key, value)
            .map_err(|_| format!("Error guardando {} en localStorage", key))
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        self.storage
            .remove_item(key)
            .map_err(|_| format!("Error eliminando {} de localStorage", key))
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl TokenStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_remove_is_idempotent() {
        let storage = MemoryStorage::new();
        storage.set("access_token", "A").unwrap();
        assert_eq!(storage.get("access_token").as_deref(), Some("A"));

        storage.remove("access_token").unwrap();
        storage.remove("access_token").unwrap();
        assert!(storage.is_empty());
        assert_eq!(storage.get("access_token"), None);
    }
}
