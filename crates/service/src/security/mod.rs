//! Restaurant-scoped API key authorization.
//!
//! The validator is built once at startup from two configuration values and
//! never mutated afterwards, so request handlers may share it freely:
//! - `API_KEYS`: comma-separated keys accepted for authentication.
//! - `API_KEY_PERMISSIONS`: optional `key1:r1,r2;key2:*` mapping of keys to
//!   the restaurants they may access. `*` grants access to all restaurants.
//!   Absent or empty means legacy mode: every known key may access every
//!   restaurant.
//!
//! The check is two pure steps: authenticate (is the key recognized at all),
//! then authorize (may it touch this restaurant). Authentication failures
//! surface before restaurant scoping is evaluated.

pub mod errors;

use std::collections::{HashMap, HashSet};

pub use errors::AuthError;

/// What a recognized key may access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyScope {
    /// Wildcard entry: all restaurants.
    All,
    /// Explicit set. May be empty, which denies every restaurant while the
    /// key still authenticates; distinct from the key being absent.
    Restaurants(HashSet<String>),
}

#[derive(Clone, Debug)]
pub struct ApiKeyValidator {
    valid_keys: HashSet<String>,
    permissions: Option<HashMap<String, KeyScope>>,
}

impl ApiKeyValidator {
    pub fn new(valid_keys: HashSet<String>, permissions: Option<HashMap<String, KeyScope>>) -> Self {
        // A permission map that parsed to nothing behaves like no map at all.
        let permissions = permissions.filter(|m| !m.is_empty());
        Self { valid_keys, permissions }
    }

    /// Build from the raw configuration strings.
    pub fn from_config(api_keys: &str, permissions: Option<&str>) -> Self {
        let valid_keys = parse_api_keys(api_keys);
        let permissions = permissions
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(parse_permissions);
        Self::new(valid_keys, permissions)
    }

    /// Step 1: is the presented key recognized? With a permission map
    /// configured, the map is the authoritative key set; otherwise the basic
    /// `API_KEYS` set is (legacy mode).
    pub fn authenticate<'a>(&self, api_key: Option<&'a str>) -> Result<&'a str, AuthError> {
        let key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(AuthError::Unauthenticated)?;
        let known = match &self.permissions {
            Some(map) => map.contains_key(key),
            None => self.valid_keys.contains(key),
        };
        if known {
            Ok(key)
        } else {
            Err(AuthError::Unauthenticated)
        }
    }

    /// Step 2: may an already-authenticated key access the restaurant?
    /// Matching is case-sensitive on trimmed identifiers.
    pub fn authorize(&self, api_key: &str, restaurant_id: &str) -> Result<(), AuthError> {
        let scope = match &self.permissions {
            None => return Ok(()),
            Some(map) => map.get(api_key),
        };
        match scope {
            Some(KeyScope::All) => Ok(()),
            Some(KeyScope::Restaurants(set)) if set.contains(restaurant_id) => Ok(()),
            _ => Err(AuthError::Forbidden { restaurant_id: restaurant_id.to_string() }),
        }
    }

    /// Full check: authenticate, then authorize against the restaurant.
    pub fn check(&self, api_key: Option<&str>, restaurant_id: &str) -> Result<(), AuthError> {
        let key = self.authenticate(api_key)?;
        self.authorize(key, restaurant_id)
    }
}

/// Parse the comma-separated `API_KEYS` value. Entries are trimmed, empties
/// dropped.
pub fn parse_api_keys(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}

/// Parse the `API_KEY_PERMISSIONS` value: `entry (";" entry)*` with
/// `entry = key ":" ("*" | rid ("," rid)*)`.
///
/// Identifiers are trimmed and matched case-sensitively. Entries without a
/// `:` or with an empty key are skipped. An entry with an empty restaurant
/// list is kept (it denies every restaurant for that key). When the same key
/// appears more than once the last entry wins. Parsing is deterministic.
pub fn parse_permissions(raw: &str) -> HashMap<String, KeyScope> {
    let mut map = HashMap::new();
    for entry in raw.split(';') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let Some((key, restaurants)) = entry.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let ids: Vec<&str> = restaurants
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .collect();
        let scope = if ids.iter().any(|r| *r == "*") {
            KeyScope::All
        } else {
            KeyScope::Restaurants(ids.into_iter().map(String::from).collect())
        };
        map.insert(key.to_string(), scope);
    }
    map
}
