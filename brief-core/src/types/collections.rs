//! Collection aliases used throughout the workspace.

/// Fast hash map (FxHash) for non-adversarial keys.
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// Fast hash set (FxHash) for non-adversarial keys.
pub type FxHashSet<T> = rustc_hash::FxHashSet<T>;
