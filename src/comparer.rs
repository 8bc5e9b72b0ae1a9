//! Pluggable key equality for keyed stores and the set/join operators.
//!
//! An [`EqualityComparer`] is an `equals` / `hash_code` pair. The only contract
//! is `equals(a, b) ⇒ hash_code(a) == hash_code(b)`; the converse is not
//! required, and the keyed store resolves collisions rather than assuming
//! distinct keys hash apart. A comparer whose `hash_code` is constant is slow
//! but still correct.
//!
//! Provided comparers:
//! - [`DefaultComparer`] -- canonical value serialization for primitive keys,
//!   identity tokens for shared references (`Rc` / `Arc`). Used whenever an
//!   operator is called without an explicit comparer.
//! - [`EqHashComparer`] -- the key type's own `Eq` + `Hash`.
//! - [`JsonComparer`] -- structural equality through `serde` serialization.
//! - [`FnComparer`] -- any pair of closures.
//!
//! # Example
//! ```
//! use ironseq::{Dictionary, FnComparer, HashKey};
//!
//! // Every key lands in the same bucket; lookups still resolve correctly.
//! let comparer = FnComparer::new(|a: &i32, b: &i32| a == b, |_: &i32| HashKey::from(7u64));
//! let mut d = Dictionary::with_comparer(comparer);
//! d.add(1, "one").unwrap();
//! d.add(2, "two").unwrap();
//! assert_eq!(d.get(&1), Ok(&"one"));
//! assert_eq!(d.get(&2), Ok(&"two"));
//! ```

use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::Arc;

/// The value a comparer hashes a key to.
///
/// Keys that compare equal must produce equal `HashKey`s. The keyed store
/// reduces a `HashKey` to a bucket index with [`HashKey::bucket_hash`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum HashKey {
    /// A plain numeric hash.
    Number(u64),
    /// A canonical textual form (e.g. serialized JSON).
    Text(String),
    /// An opaque identity token assigned by an [`IdentityTable`].
    Identity(u64),
    /// A shared reference no stored key has a token for, keyed by address.
    /// Equal only to another handle on the same live allocation.
    Unassigned(usize),
    /// Element-wise keys of a composite value (tuples, vectors).
    Composite(Vec<HashKey>),
}

impl HashKey {
    /// Reduce the key to the 64-bit hash used for slot addressing.
    ///
    /// Deterministic across runs: the hasher is SipHash with fixed keys.
    pub fn bucket_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl From<u64> for HashKey {
    fn from(value: u64) -> Self {
        HashKey::Number(value)
    }
}

impl From<u32> for HashKey {
    fn from(value: u32) -> Self {
        HashKey::Number(u64::from(value))
    }
}

impl From<i64> for HashKey {
    #[allow(clippy::cast_sign_loss)]
    fn from(value: i64) -> Self {
        HashKey::Number(value as u64)
    }
}

impl From<i32> for HashKey {
    fn from(value: i32) -> Self {
        HashKey::from(i64::from(value))
    }
}

impl From<String> for HashKey {
    fn from(value: String) -> Self {
        HashKey::Text(value)
    }
}

impl From<&str> for HashKey {
    fn from(value: &str) -> Self {
        HashKey::Text(value.to_owned())
    }
}

/// Equality and hashing for keys of type `K`.
pub trait EqualityComparer<K: ?Sized> {
    /// Whether the two keys denote the same entry.
    fn equals(&self, left: &K, right: &K) -> bool;

    /// Hash of the key. Equal keys must hash equally.
    fn hash_code(&self, key: &K) -> HashKey;

    /// Hash of a key about to be stored. Must agree with `hash_code` for
    /// every later lookup of an equal key.
    fn insertion_hash_code(&self, key: &K) -> HashKey {
        self.hash_code(key)
    }
}

impl<K: ?Sized, C: EqualityComparer<K> + ?Sized> EqualityComparer<K> for &C {
    fn equals(&self, left: &K, right: &K) -> bool {
        (**self).equals(left, right)
    }

    fn hash_code(&self, key: &K) -> HashKey {
        (**self).hash_code(key)
    }

    fn insertion_hash_code(&self, key: &K) -> HashKey {
        (**self).insertion_hash_code(key)
    }
}

impl<K: ?Sized, C: EqualityComparer<K> + ?Sized> EqualityComparer<K> for Rc<C> {
    fn equals(&self, left: &K, right: &K) -> bool {
        (**self).equals(left, right)
    }

    fn hash_code(&self, key: &K) -> HashKey {
        (**self).hash_code(key)
    }

    fn insertion_hash_code(&self, key: &K) -> HashKey {
        (**self).insertion_hash_code(key)
    }
}

/* ===================== Identity tokens ===================== */

/// Whether hashing a shared reference may assign it a new token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMode {
    /// The key is being stored: unseen allocations receive a token.
    Assign,
    /// The key is only being looked up: unseen allocations hash by address
    /// and the table is left untouched.
    Lookup,
}

type Liveness = Box<dyn Fn() -> bool>;

const MIN_PRUNE_AT: usize = 64;

/// Side table assigning opaque identity tokens to shared allocations.
///
/// The first time an `Rc` / `Arc` is stored it receives the next token from a
/// counter; later hashes of any clone pointing at the same allocation return
/// the same token. Lookups never assign. The table keeps a weak handle to each
/// allocation so its address cannot be reused while the token is live, and
/// drops entries whose allocation has died once the table has doubled since
/// the last sweep. Values are never mutated.
#[derive(Default)]
pub struct IdentityTable {
    next: Cell<u64>,
    prune_at: Cell<usize>,
    assigned: RefCell<HashMap<usize, (u64, Liveness)>>,
}

impl IdentityTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of allocations holding a token, dead ones not yet swept included.
    pub fn len(&self) -> usize {
        self.assigned.borrow().len()
    }

    /// Whether no token is held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hash key for the allocation behind `value`.
    pub fn rc_key<T: ?Sized + 'static>(&self, value: &Rc<T>, mode: TokenMode) -> HashKey {
        let address = Rc::as_ptr(value).cast::<()>() as usize;
        self.key_for(address, mode, || {
            let weak = Rc::downgrade(value);
            Box::new(move || weak.strong_count() > 0)
        })
    }

    /// Hash key for the allocation behind `value`.
    pub fn arc_key<T: ?Sized + 'static>(&self, value: &Arc<T>, mode: TokenMode) -> HashKey {
        let address = Arc::as_ptr(value).cast::<()>() as usize;
        self.key_for(address, mode, || {
            let weak = Arc::downgrade(value);
            Box::new(move || weak.strong_count() > 0)
        })
    }

    fn key_for(&self, address: usize, mode: TokenMode, liveness: impl FnOnce() -> Liveness) -> HashKey {
        if let Some((token, _)) = self.assigned.borrow().get(&address) {
            return HashKey::Identity(*token);
        }
        if mode == TokenMode::Lookup {
            return HashKey::Unassigned(address);
        }
        let mut assigned = self.assigned.borrow_mut();
        if assigned.len() >= self.prune_at.get() {
            assigned.retain(|_, entry| (entry.1)());
            self.prune_at.set((assigned.len() * 2).max(MIN_PRUNE_AT));
        }
        let token = self.next.get() + 1;
        self.next.set(token);
        assigned.insert(address, (token, liveness()));
        HashKey::Identity(token)
    }
}

impl fmt::Debug for IdentityTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityTable")
            .field("assigned", &self.len())
            .finish()
    }
}

/* ===================== Default hashing ===================== */

/// Hashing used by [`DefaultComparer`].
///
/// Primitive and string values hash by their canonical JSON serialization, so
/// two equal values always collide regardless of where they came from.
/// Shared references (`Rc`, `Arc`) hash by allocation identity: two distinct
/// allocations never compare equal even when their contents match. `mode`
/// says whether an unseen allocation may be given a token.
/// Tuples, `Option`, `Vec`, and slices combine the keys of their parts.
pub trait DefaultHash {
    fn default_hash(&self, identities: &IdentityTable, mode: TokenMode) -> HashKey;
}

fn canonical_key<S: Serialize + ?Sized>(value: &S) -> HashKey {
    match serde_json::to_string(value) {
        Ok(text) => HashKey::Text(text),
        Err(err) => HashKey::Text(format!("<unserializable: {err}>")),
    }
}

macro_rules! canonical_default_hash {
    ($($t:ty),* $(,)?) => {
        $(
            impl DefaultHash for $t {
                fn default_hash(&self, _identities: &IdentityTable, _mode: TokenMode) -> HashKey {
                    canonical_key(self)
                }
            }
        )*
    };
}

canonical_default_hash!(
    i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool, char, (), String, str,
    serde_json::Value,
);

impl<T: DefaultHash + ?Sized> DefaultHash for &T {
    fn default_hash(&self, identities: &IdentityTable, mode: TokenMode) -> HashKey {
        (**self).default_hash(identities, mode)
    }
}

impl<T: DefaultHash + ?Sized> DefaultHash for Box<T> {
    fn default_hash(&self, identities: &IdentityTable, mode: TokenMode) -> HashKey {
        (**self).default_hash(identities, mode)
    }
}

impl<T: DefaultHash> DefaultHash for Option<T> {
    fn default_hash(&self, identities: &IdentityTable, mode: TokenMode) -> HashKey {
        match self {
            Some(value) => value.default_hash(identities, mode),
            None => HashKey::Text("null".to_owned()),
        }
    }
}

impl<T: DefaultHash> DefaultHash for [T] {
    fn default_hash(&self, identities: &IdentityTable, mode: TokenMode) -> HashKey {
        HashKey::Composite(self.iter().map(|v| v.default_hash(identities, mode)).collect())
    }
}

impl<T: DefaultHash> DefaultHash for Vec<T> {
    fn default_hash(&self, identities: &IdentityTable, mode: TokenMode) -> HashKey {
        self.as_slice().default_hash(identities, mode)
    }
}

impl<T: ?Sized + 'static> DefaultHash for Rc<T> {
    fn default_hash(&self, identities: &IdentityTable, mode: TokenMode) -> HashKey {
        identities.rc_key(self, mode)
    }
}

impl<T: ?Sized + 'static> DefaultHash for Arc<T> {
    fn default_hash(&self, identities: &IdentityTable, mode: TokenMode) -> HashKey {
        identities.arc_key(self, mode)
    }
}

macro_rules! tuple_default_hash {
    ($($name:ident),+) => {
        impl<$($name: DefaultHash),+> DefaultHash for ($($name,)+) {
            #[allow(non_snake_case)]
            fn default_hash(&self, identities: &IdentityTable, mode: TokenMode) -> HashKey {
                let ($($name,)+) = self;
                HashKey::Composite(vec![$($name.default_hash(identities, mode)),+])
            }
        }
    };
}

tuple_default_hash!(A);
tuple_default_hash!(A, B);
tuple_default_hash!(A, B, C);
tuple_default_hash!(A, B, C, D);

/* ===================== Comparers ===================== */

/// The comparer used when none is supplied.
///
/// Owns the [`IdentityTable`] for reference-like keys; clones share it, so a
/// given `Rc` keeps its token across every store built from the same comparer.
#[derive(Clone, Debug, Default)]
pub struct DefaultComparer {
    identities: Rc<IdentityTable>,
}

impl DefaultComparer {
    /// Create a comparer with a fresh identity table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The identity side table backing reference-like keys.
    pub fn identities(&self) -> &IdentityTable {
        &self.identities
    }
}

impl<K: DefaultHash + ?Sized> EqualityComparer<K> for DefaultComparer {
    fn equals(&self, left: &K, right: &K) -> bool {
        self.hash_code(left) == self.hash_code(right)
    }

    fn hash_code(&self, key: &K) -> HashKey {
        key.default_hash(&self.identities, TokenMode::Lookup)
    }

    fn insertion_hash_code(&self, key: &K) -> HashKey {
        key.default_hash(&self.identities, TokenMode::Assign)
    }
}

/// Comparer built on the key type's own `Eq` and `Hash`.
#[derive(Clone, Copy, Debug, Default)]
pub struct EqHashComparer;

impl<K: Eq + Hash + ?Sized> EqualityComparer<K> for EqHashComparer {
    fn equals(&self, left: &K, right: &K) -> bool {
        left == right
    }

    fn hash_code(&self, key: &K) -> HashKey {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        HashKey::Number(hasher.finish())
    }
}

/// Structural comparer: keys are equal when they serialize to the same JSON.
///
/// Field order follows the type's `Serialize` impl, so structs and tuples are
/// canonical. Maps with unspecified iteration order (e.g. `HashMap`) are not.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonComparer;

impl<K: Serialize + ?Sized> EqualityComparer<K> for JsonComparer {
    fn equals(&self, left: &K, right: &K) -> bool {
        self.hash_code(left) == self.hash_code(right)
    }

    fn hash_code(&self, key: &K) -> HashKey {
        canonical_key(key)
    }
}

/// Comparer assembled from an `equals` closure and a `hash_code` closure.
#[derive(Clone, Copy)]
pub struct FnComparer<E, H> {
    equals: E,
    hash: H,
}

impl<E, H> FnComparer<E, H> {
    pub fn new(equals: E, hash: H) -> Self {
        Self { equals, hash }
    }
}

impl<K, E, H> EqualityComparer<K> for FnComparer<E, H>
where
    K: ?Sized,
    E: Fn(&K, &K) -> bool,
    H: Fn(&K) -> HashKey,
{
    fn equals(&self, left: &K, right: &K) -> bool {
        (self.equals)(left, right)
    }

    fn hash_code(&self, key: &K) -> HashKey {
        (self.hash)(key)
    }
}

impl<E, H> fmt::Debug for FnComparer<E, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnComparer { .. }")
    }
}
