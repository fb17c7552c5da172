//! Coin/win persistence
//!
//! Two integers outlive a session: total coins and total wins. Each is stored
//! as a decimal string under its own key; there is no envelope or versioning.
//! Writes are fire-and-forget.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Minimal string key-value store (LocalStorage on web, a map elsewhere)
pub trait Storage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str);
}

/// In-memory store for native builds and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }
}

/// Browser LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    inner: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn open() -> Self {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if inner.is_none() {
            log::warn!("LocalStorage unavailable, coins will not persist");
        }
        Self { inner }
    }
}

#[cfg(target_arch = "wasm32")]
impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.inner.as_ref()?.get_item(key).ok().flatten()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.inner {
            let _ = storage.set_item(key, value);
        }
    }
}

/// Persistent economy values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub coins: u64,
    pub wins: u32,
}

impl Wallet {
    const COINS_KEY: &'static str = "coins";
    const WINS_KEY: &'static str = "wins";

    /// Read both values; missing or malformed entries count as zero
    pub fn load(storage: &dyn Storage) -> Self {
        let wallet = Self {
            coins: read_int(storage, Self::COINS_KEY),
            wins: read_int(storage, Self::WINS_KEY),
        };
        log::info!("Loaded wallet: {} coins, {} wins", wallet.coins, wallet.wins);
        wallet
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        storage.set_item(Self::COINS_KEY, &self.coins.to_string());
        storage.set_item(Self::WINS_KEY, &self.wins.to_string());
        log::debug!("Wallet saved ({} coins, {} wins)", self.coins, self.wins);
    }
}

fn read_int<T: std::str::FromStr + Default>(storage: &dyn Storage, key: &str) -> T {
    match storage.get_item(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring malformed {key} value: {raw:?}");
            T::default()
        }),
        None => T::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_storage_loads_zero() {
        let storage = MemoryStorage::new();
        assert_eq!(Wallet::load(&storage), Wallet::default());
    }

    #[test]
    fn test_saved_values_are_plain_integers() {
        let mut storage = MemoryStorage::new();
        Wallet { coins: 42, wins: 3 }.save(&mut storage);
        assert_eq!(storage.get_item("coins").as_deref(), Some("42"));
        assert_eq!(storage.get_item("wins").as_deref(), Some("3"));
        assert_eq!(Wallet::load(&storage), Wallet { coins: 42, wins: 3 });
    }

    #[test]
    fn test_malformed_value_falls_back_independently() {
        let mut storage = MemoryStorage::new();
        storage.set_item("coins", "lots");
        storage.set_item("wins", "7");
        let wallet = Wallet::load(&storage);
        assert_eq!(wallet.coins, 0);
        assert_eq!(wallet.wins, 7);
    }
}
