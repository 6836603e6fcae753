//! The process-wide XMP namespace registry.
//!
//! It starts out with the built-in table from `imgmeta_types`. Packets can
//! teach it new prefixes, and callers can add (or remove) their own.

use std::sync::LazyLock;

use imgmeta_types::xmp::{BUILTIN_NAMESPACES, builtin_by_prefix};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

#[derive(Debug, Default)]
struct Registry {
    by_prefix: FxHashMap<String, String>,
    by_uri: FxHashMap<String, String>,
}

impl Registry {
    fn insert(&mut self, uri: &str, prefix: &str) {
        // one prefix per uri, and one uri per prefix
        if let Some(old_uri) = self.by_prefix.remove(prefix) {
            self.by_uri.remove(&old_uri);
        }
        if let Some(old_prefix) = self.by_uri.remove(uri) {
            self.by_prefix.remove(&old_prefix);
        }

        self.by_prefix.insert(prefix.into(), uri.into());
        self.by_uri.insert(uri.into(), prefix.into());
    }
}

static REGISTRY: LazyLock<RwLock<Registry>> = LazyLock::new(|| {
    let mut registry = Registry::default();
    for ns in BUILTIN_NAMESPACES {
        registry.insert(ns.uri, ns.prefix);
    }
    RwLock::new(registry)
});

/// Registers `prefix` for `uri`, replacing any earlier mapping of either.
///
/// ```
/// use imgmeta::xmp::namespaces;
///
/// namespaces::register_namespace("https://example.com/ns/doctest/", "doctest");
/// assert_eq!(
///     namespaces::namespace_uri("doctest").as_deref(),
///     Some("https://example.com/ns/doctest/")
/// );
/// ```
pub fn register_namespace(uri: &str, prefix: &str) {
    log::debug!("registering XMP namespace `{prefix}` => `{uri}`");
    REGISTRY.write().insert(uri, prefix);
}

/// Removes a prefix. Built-in prefixes go back to their built-in URI.
///
/// Returns whether the prefix was registered.
pub fn unregister_namespace(prefix: &str) -> bool {
    let mut registry = REGISTRY.write();

    let Some(uri) = registry.by_prefix.remove(prefix) else {
        return false;
    };
    registry.by_uri.remove(&uri);
    log::debug!("unregistered XMP namespace `{prefix}`");

    if let Some(builtin) = builtin_by_prefix(prefix) {
        registry.insert(builtin.uri, builtin.prefix);
    }
    true
}

/// The URI registered for a prefix.
pub fn namespace_uri(prefix: &str) -> Option<String> {
    REGISTRY.read().by_prefix.get(prefix).cloned()
}

/// The prefix registered for a URI.
pub fn namespace_prefix(uri: &str) -> Option<String> {
    REGISTRY.read().by_uri.get(uri).cloned()
}

/// Every registered `(prefix, uri)` pair, sorted by prefix.
pub fn registered() -> Vec<(String, String)> {
    let mut all: Vec<(String, String)> = REGISTRY
        .read()
        .by_prefix
        .iter()
        .map(|(p, u)| (p.clone(), u.clone()))
        .collect();
    all.sort();
    all
}

/// Finds the prefix for a URI found in a packet, registering it if needed.
///
/// The packet's own prefix is used when it's free. Otherwise, we make one up.
pub(crate) fn learn(uri: &str, suggested: Option<&str>) -> String {
    if let Some(prefix) = namespace_prefix(uri) {
        return prefix;
    }

    let mut registry = REGISTRY.write();

    // someone may have beaten us to it
    if let Some(prefix) = registry.by_uri.get(uri) {
        return prefix.clone();
    }

    let prefix = match suggested {
        Some(p) if !p.is_empty() && !registry.by_prefix.contains_key(p) => p.to_string(),
        _ => (1..)
            .map(|n| format!("ns{n}"))
            .find(|p| !registry.by_prefix.contains_key(p))
            .unwrap_or_default(),
    };

    log::debug!("learned XMP namespace `{prefix}` => `{uri}` from a packet");
    registry.insert(uri, &prefix);
    prefix
}
