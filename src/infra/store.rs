use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use color_eyre::eyre::{Result, eyre};
use heed::{Database, Env, EnvOpenOptions, types::Str};

use crate::config::get_data_dir;

const PREFERENCES_DB: &str = "preferences";

/// Key/value storage for UI preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Wrapper around LMDB database for persistent storage.
#[derive(Clone)]
pub struct Store {
    env: Env,
}

impl Store {
    pub fn new() -> Result<Self> {
        Self::with_path(get_data_dir().join("preferences.mdb"))
    }

    pub fn with_path(path: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&path)?;
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(1024 * 1024) // 1MB
                .max_dbs(1)
                .open(path)?
        };
        Ok(Self { env })
    }
}

impl PreferenceStore for Store {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let rtxn = self.env.read_txn()?;
        let db: Option<Database<Str, Str>> = self.env.open_database(&rtxn, Some(PREFERENCES_DB))?;

        match db {
            Some(db) => Ok(db.get(&rtxn, key)?.map(str::to_owned)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut wtxn = self.env.write_txn()?;
        let db: Database<Str, Str> = self.env.create_database(&mut wtxn, Some(PREFERENCES_DB))?;
        db.put(&mut wtxn, key, value)?;
        wtxn.commit()?;
        Ok(())
    }
}

/// In-memory store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| eyre!("preference map lock poisoned"))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| eyre!("preference map lock poisoned"))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
