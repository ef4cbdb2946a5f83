//! Durable key-value storage and the tracked-city list built on top of it.

use std::{
    collections::HashMap,
    fmt::Debug,
    fs,
    path::PathBuf,
    sync::Mutex,
};

use anyhow::{Context, Result, anyhow};

use crate::{error::StoreError, model::TrackedCity};

/// Key under which the city list is stored.
pub const CITIES_KEY: &str = "weatherCities";

/// A tiny string-to-string store. Each `set` replaces the whole value.
pub trait KeyValueStore: Send + Sync + Debug {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(contents))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create data directory: {}", self.dir.display()))?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, value).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        Ok(())
    }
}

/// In-process store, mostly for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().map_err(|_| anyhow!("memory store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries =
            self.entries.lock().map_err(|_| anyhow!("memory store lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The persisted list of tracked cities, in insertion order.
///
/// The in-memory copy only ever changes after a successful write, so it always
/// mirrors what is on disk.
#[derive(Debug)]
pub struct CityStore {
    backend: Box<dyn KeyValueStore>,
    cities: Vec<TrackedCity>,
}

impl CityStore {
    pub fn open(backend: Box<dyn KeyValueStore>) -> Self {
        let cities = read_cities(backend.as_ref());
        Self { backend, cities }
    }

    /// Re-read the durable list. Absent or malformed content yields an empty list.
    pub fn load(&mut self) -> Vec<TrackedCity> {
        self.cities = read_cities(self.backend.as_ref());
        self.cities.clone()
    }

    pub fn cities(&self) -> &[TrackedCity] {
        &self.cities
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cities.iter().any(|c| c.is_named(name))
    }

    pub fn add(&mut self, city: TrackedCity) -> Result<(), StoreError> {
        if self.contains(&city.name) {
            return Err(StoreError::AlreadyTracked(city.name));
        }

        let mut next = self.cities.clone();
        tracing::info!(city = %city.name, "tracking city");
        next.push(city);
        self.persist(next)
    }

    /// Drop the case-insensitive match. Returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> Result<bool, StoreError> {
        if !self.contains(name) {
            return Ok(false);
        }

        let next: Vec<TrackedCity> =
            self.cities.iter().filter(|c| !c.is_named(name)).cloned().collect();
        tracing::info!(city = %name, "untracking city");
        self.persist(next)?;
        Ok(true)
    }

    fn persist(&mut self, next: Vec<TrackedCity>) -> Result<(), StoreError> {
        let json = serde_json::to_string(&next)
            .context("Failed to serialize city list")
            .map_err(StoreError::Storage)?;
        self.backend.set(CITIES_KEY, &json).map_err(StoreError::Storage)?;
        self.cities = next;
        Ok(())
    }
}

fn read_cities(backend: &dyn KeyValueStore) -> Vec<TrackedCity> {
    let raw = match backend.get(CITIES_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!("could not read stored cities, starting empty: {e:#}");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Option<Vec<TrackedCity>>>(&raw) {
        Ok(cities) => cities.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("stored city list is malformed, starting empty: {e}");
            Vec::new()
        }
    }
}
