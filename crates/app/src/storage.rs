//! Durable client-side state.
//!
//! The storefront keeps two files under one state directory: the cart
//! snapshot and the auth token pair. Reads are guarded: a missing or
//! corrupt file yields the empty value with a warning, never an error, so
//! a damaged snapshot cannot take the session down.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

#[cfg(test)]
use std::sync::Mutex;

use mockall::automock;
use thiserror::Error;
use tracing::warn;

use canteen::cart::CartLine;

use crate::api::TokenPair;

const CART_FILE: &str = "cart.json";
const TOKENS_FILE: &str = "tokens.json";

/// Errors produced when writing state to disk.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem failure.
    #[error("storage io error")]
    Io(#[from] io::Error),

    /// Serialization failure.
    #[error("failed to encode state")]
    Encode(#[from] serde_json::Error),
}

/// The directory holding all persisted client state.
#[derive(Debug, Clone)]
pub struct StateDir {
    root: PathBuf,
}

impl StateDir {
    /// Wraps a state directory path. The directory is created lazily on
    /// first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the cart snapshot.
    #[must_use]
    pub fn cart_path(&self) -> PathBuf {
        self.root.join(CART_FILE)
    }

    /// Path of the token pair.
    #[must_use]
    pub fn tokens_path(&self) -> PathBuf {
        self.root.join(TOKENS_FILE)
    }
}

/// Write-through persistence for the cart line list.
#[automock]
pub trait CartStorage: Send + Sync {
    /// Reads the persisted snapshot; missing or corrupt data yields an
    /// empty list.
    fn load(&self) -> Vec<CartLine>;

    /// Rewrites the full snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error when the snapshot cannot be written.
    fn save(&self, lines: &[CartLine]) -> Result<(), StorageError>;
}

/// Persistence for the auth token pair.
pub trait TokenStorage: Send + Sync {
    /// Reads the persisted pair; missing or corrupt data yields `None`.
    fn load(&self) -> Option<TokenPair>;

    /// Rewrites the pair.
    ///
    /// # Errors
    ///
    /// Returns an error when the pair cannot be written.
    fn save(&self, tokens: &TokenPair) -> Result<(), StorageError>;

    /// Removes the persisted pair.
    ///
    /// # Errors
    ///
    /// Returns an error when removal fails.
    fn clear(&self) -> Result<(), StorageError>;
}

/// File-backed cart storage under the state directory.
#[derive(Debug, Clone)]
pub struct JsonFileCartStorage {
    path: PathBuf,
}

impl JsonFileCartStorage {
    /// Storage at the state directory's cart path.
    #[must_use]
    pub fn new(state: &StateDir) -> Self {
        Self {
            path: state.cart_path(),
        }
    }
}

impl CartStorage for JsonFileCartStorage {
    fn load(&self) -> Vec<CartLine> {
        read_guarded(&self.path, "cart snapshot").unwrap_or_default()
    }

    fn save(&self, lines: &[CartLine]) -> Result<(), StorageError> {
        write_json(&self.path, lines)
    }
}

/// File-backed token storage under the state directory.
#[derive(Debug, Clone)]
pub struct JsonFileTokenStorage {
    path: PathBuf,
}

impl JsonFileTokenStorage {
    /// Storage at the state directory's tokens path.
    #[must_use]
    pub fn new(state: &StateDir) -> Self {
        Self {
            path: state.tokens_path(),
        }
    }
}

impl TokenStorage for JsonFileTokenStorage {
    fn load(&self) -> Option<TokenPair> {
        read_guarded(&self.path, "token pair")
    }

    fn save(&self, tokens: &TokenPair) -> Result<(), StorageError> {
        write_json(&self.path, tokens)
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

/// In-memory token storage for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    tokens: Mutex<Option<TokenPair>>,
}

#[cfg(test)]
impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Option<TokenPair> {
        self.tokens.lock().ok().and_then(|guard| guard.clone())
    }

    fn save(&self, tokens: &TokenPair) -> Result<(), StorageError> {
        if let Ok(mut guard) = self.tokens.lock() {
            *guard = Some(tokens.clone());
        }

        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        if let Ok(mut guard) = self.tokens.lock() {
            *guard = None;
        }

        Ok(())
    }
}

fn read_guarded<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Option<T> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return None,
        Err(error) => {
            warn!("failed to read {what} from {}: {error}", path.display());
            return None;
        }
    };

    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(
                "discarding corrupt {what} at {}: {error}",
                path.display()
            );
            None
        }
    }
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let text = serde_json::to_string(value)?;
    fs::write(path, text)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::dec;
    use testresult::TestResult;
    use uuid::Uuid;

    use canteen::{currency::Currency, products::Product};

    use super::*;

    fn line(quantity: u32) -> CartLine {
        CartLine {
            product: Product {
                id: Uuid::from_u128(1),
                name: "Koshari".to_string(),
                description: None,
                price: dec!(50.00),
                currency: Currency::Egp,
                image_url: None,
                category: "mains".to_string(),
                available: true,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            },
            quantity,
        }
    }

    #[test]
    fn cart_round_trips_through_disk() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = JsonFileCartStorage::new(&StateDir::new(dir.path()));

        storage.save(&[line(2)])?;

        assert_eq!(storage.load(), vec![line(2)]);

        Ok(())
    }

    #[test]
    fn missing_cart_file_loads_as_empty() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = JsonFileCartStorage::new(&StateDir::new(dir.path()));

        assert!(storage.load().is_empty(), "missing file must yield empty cart");

        Ok(())
    }

    #[test]
    fn corrupt_cart_file_loads_as_empty() -> TestResult {
        let dir = tempfile::tempdir()?;
        let state = StateDir::new(dir.path());

        fs::write(state.cart_path(), "{not json")?;

        let storage = JsonFileCartStorage::new(&state);

        assert!(storage.load().is_empty(), "corrupt file must yield empty cart");

        Ok(())
    }

    #[test]
    fn tokens_round_trip_and_clear() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = JsonFileTokenStorage::new(&StateDir::new(dir.path()));
        let pair = TokenPair {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
        };

        storage.save(&pair)?;

        let loaded = storage.load().ok_or("expected persisted tokens")?;
        assert_eq!(loaded.access_token, "access");

        storage.clear()?;
        assert!(storage.load().is_none(), "cleared tokens must not reload");

        storage.clear()?;

        Ok(())
    }

    #[test]
    fn token_files_use_camel_case_keys() -> TestResult {
        let dir = tempfile::tempdir()?;
        let state = StateDir::new(dir.path());
        let storage = JsonFileTokenStorage::new(&state);

        storage.save(&TokenPair {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
        })?;

        let text = fs::read_to_string(state.tokens_path())?;

        assert!(text.contains("accessToken"), "expected camelCase keys in {text}");

        Ok(())
    }
}
