use std::collections::hash_map::RandomState;
use std::collections::HashSet;
use std::hash::{BuildHasher, Hasher};

use crate::attribute::Attribute;
use crate::string_writer::StringWriter;

/// What makes two attributes of one tag the same attribute.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum AttributeKey {
    /// The name as written.
    Raw,
    /// Namespace URI and local name, once prefixes are resolved.
    Resolved,
}

/// Duplicate detection for the attributes of one tag.
///
/// The attributes themselves live in the pool; this only remembers hashes of
/// their keys, and only once a tag has enough attributes to make that pay off.
pub(crate) struct AttributeIndex {
    /// Uses a no-op hasher, because these u64s are hashes already
    may_contain: HashSet<u64, U64HasherBuilder>,
    hasher: RandomState,
}

/// Use linear search and don't fill the `HashSet` if there are few attributes,
/// because hashing costs more than a few comparisons.
const HASH_THRESHOLD: usize = 8;

impl AttributeIndex {
    pub fn new() -> Self {
        AttributeIndex {
            may_contain: HashSet::default(),
            hasher: RandomState::new(),
        }
    }

    pub fn clear(&mut self) {
        self.may_contain.clear();
    }

    /// Checks the last attribute of `attrs` against all the ones before it.
    ///
    /// Must be called for every prefix of the attribute list in turn, with the
    /// same key, after a [`clear`](AttributeIndex::clear).
    pub fn has_duplicate<S: StringWriter>(&mut self, attrs: &[Attribute<S>], key: AttributeKey) -> bool {
        let (last, earlier) = match attrs.split_last() {
            Some(split) => split,
            None => return false,
        };
        if earlier.len() >= HASH_THRESHOLD {
            if earlier.len() == HASH_THRESHOLD {
                self.may_contain.reserve(HASH_THRESHOLD * 2);
                for attr in earlier {
                    let h = self.hash(attr, key);
                    self.may_contain.insert(h);
                }
            }
            // fall back to linear search only on duplicate or hash collision
            let h = self.hash(last, key);
            if self.may_contain.insert(h) {
                return false;
            }
        }
        earlier.iter().any(|attr| same(attr, last, key))
    }

    fn hash<S: StringWriter>(&self, attr: &Attribute<S>, key: AttributeKey) -> u64 {
        let mut h = self.hasher.build_hasher();
        match key {
            AttributeKey::Raw => attr.name.name.hash(&mut h),
            AttributeKey::Resolved => {
                attr.name.namespace_uri.hash(&mut h);
                attr.name.local_name.hash(&mut h);
            }
        }
        h.finish()
    }
}

fn same<S: StringWriter>(a: &Attribute<S>, b: &Attribute<S>, key: AttributeKey) -> bool {
    match key {
        AttributeKey::Raw => a.name.name == b.name.name,
        AttributeKey::Resolved => a.name.namespace_uri == b.name.namespace_uri && a.name.local_name == b.name.local_name,
    }
}

/// Hasher that does nothing except passing u64 through
struct U64Hasher(u64);

impl Hasher for U64Hasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, slice: &[u8]) {
        for &v in slice {
            self.0 ^= u64::from(v); // unused in practice
        }
    }

    fn write_u64(&mut self, i: u64) {
        self.0 ^= i;
    }
}

#[derive(Default)]
struct U64HasherBuilder;

impl BuildHasher for U64HasherBuilder {
    type Hasher = U64Hasher;

    fn build_hasher(&self) -> U64Hasher {
        U64Hasher(0)
    }
}
