/* Copyright (c) 2024 Jeremy Davis (jeremydavis519@gmail.com)
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy of this software
 * and associated documentation files (the "Software"), to deal in the Software without restriction,
 * including without limitation the rights to use, copy, modify, merge, publish, distribute,
 * sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all copies or
 * substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT
 * NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
 * NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
 * DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
 */

//! `maplike<K,V>` and `setlike<T>`, https://webidl.spec.whatwg.org/#dfn-maplike. Most interfaces
//! that declare one of these hold only a handful of entries at a time, so both wrappers start
//! inline in a fixed-size array and only allocate an [`OrderedMap`]/[`OrderedSet`] once a fifth
//! entry forces the issue. No `smallvec`: the growth trigger needs to be explicit here because
//! the backing storage's key-equality semantics (linear scan either way) have to stay identical
//! across the inline/heap boundary, which a generic small-vector type would hide.

use super::collections::{OrderedMap, OrderedSet};

const INLINE_CAPACITY: usize = 4;

#[derive(Debug, Clone, PartialEq)]
enum MapStorage<K, V> {
    Inline([Option<(K, V)>; INLINE_CAPACITY], usize),
    Heap(OrderedMap<K, V>),
}

/// The read/write half of `maplike<K,V>`. A `[ReadOnly] maplike` (the `.readonly()` flavor below)
/// forwards every read method but has no mutators at all, rather than failing mutations at
/// runtime -- the type system enforces it.
#[derive(Debug, Clone, PartialEq)]
pub struct Maplike<K, V> {
    storage: MapStorage<K, V>,
}

impl<K: Clone + PartialEq, V: Clone> Default for Maplike<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + PartialEq, V: Clone> Maplike<K, V> {
    pub fn new() -> Self {
        Self { storage: MapStorage::Inline([None, None, None, None], 0) }
    }

    pub fn len(&self) -> usize {
        match &self.storage {
            MapStorage::Inline(_, len) => *len,
            MapStorage::Heap(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        match &self.storage {
            MapStorage::Inline(slots, len) => {
                slots[..*len].iter().find_map(|slot| slot.as_ref().filter(|(k, _)| k == key).map(|(_, v)| v))
            }
            MapStorage::Heap(map) => map.get(key),
        }
    }

    pub fn has(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    pub fn set(&mut self, key: K, value: V) {
        match &mut self.storage {
            MapStorage::Inline(slots, len) => {
                if let Some(slot) = slots[..*len].iter_mut().find(|slot| matches!(slot, Some((k, _)) if k == &key)) {
                    *slot = Some((key, value));
                    return;
                }
                if *len < INLINE_CAPACITY {
                    slots[*len] = Some((key, value));
                    *len += 1;
                } else {
                    self.promote_to_heap();
                    self.set(key, value);
                }
            }
            MapStorage::Heap(map) => {
                map.insert(key, value);
            }
        }
    }

    pub fn delete(&mut self, key: &K) -> bool {
        match &mut self.storage {
            MapStorage::Inline(slots, len) => {
                if let Some(i) = slots[..*len].iter().position(|slot| matches!(slot, Some((k, _)) if k == key)) {
                    for j in i..*len - 1 {
                        slots[j] = slots[j + 1].take();
                    }
                    slots[*len - 1] = None;
                    *len -= 1;
                    true
                } else {
                    false
                }
            }
            MapStorage::Heap(map) => map.remove(key).is_some(),
        }
    }

    pub fn clear(&mut self) {
        self.storage = MapStorage::Inline([None, None, None, None], 0);
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        match &self.storage {
            MapStorage::Inline(slots, len) => {
                Box::new(slots[..*len].iter().filter_map(|slot| slot.as_ref().map(|(k, v)| (k, v))))
            }
            MapStorage::Heap(map) => Box::new(map.iter()),
        }
    }

    fn promote_to_heap(&mut self) {
        if let MapStorage::Inline(slots, len) = &mut self.storage {
            let mut map = OrderedMap::new();
            for slot in slots[..*len].iter_mut() {
                if let Some((k, v)) = slot.take() {
                    map.insert(k, v);
                }
            }
            self.storage = MapStorage::Heap(map);
        }
    }

    /// Wraps `self` so only read access remains, for `[ReadOnly] maplike<K,V>`.
    pub fn readonly(self) -> ReadOnlyMaplike<K, V> {
        ReadOnlyMaplike(self)
    }
}

/// A `maplike<K,V>` declared `[ReadOnly]`: every read method is still available, but there is no
/// `set`/`delete`/`clear` to call.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadOnlyMaplike<K, V>(Maplike<K, V>);

impl<K: Clone + PartialEq, V: Clone> ReadOnlyMaplike<K, V> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.0.get(key)
    }

    pub fn has(&self, key: &K) -> bool {
        self.0.has(key)
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        self.0.iter()
    }
}

#[derive(Debug, Clone, PartialEq)]
enum SetStorage<T> {
    Inline([Option<T>; INLINE_CAPACITY], usize),
    Heap(OrderedSet<T>),
}

/// The read/write half of `setlike<T>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Setlike<T> {
    storage: SetStorage<T>,
}

impl<T: Clone + PartialEq> Default for Setlike<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + PartialEq> Setlike<T> {
    pub fn new() -> Self {
        Self { storage: SetStorage::Inline([None, None, None, None], 0) }
    }

    pub fn len(&self) -> usize {
        match &self.storage {
            SetStorage::Inline(_, len) => *len,
            SetStorage::Heap(set) => set.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has(&self, value: &T) -> bool {
        match &self.storage {
            SetStorage::Inline(slots, len) => slots[..*len].iter().any(|slot| slot.as_ref() == Some(value)),
            SetStorage::Heap(set) => set.contains(value),
        }
    }

    pub fn add(&mut self, value: T) {
        match &mut self.storage {
            SetStorage::Inline(slots, len) => {
                if slots[..*len].iter().any(|slot| slot.as_ref() == Some(&value)) {
                    return;
                }
                if *len < INLINE_CAPACITY {
                    slots[*len] = Some(value);
                    *len += 1;
                } else {
                    self.promote_to_heap();
                    self.add(value);
                }
            }
            SetStorage::Heap(set) => {
                set.insert(value);
            }
        }
    }

    pub fn delete(&mut self, value: &T) -> bool {
        match &mut self.storage {
            SetStorage::Inline(slots, len) => {
                if let Some(i) = slots[..*len].iter().position(|slot| slot.as_ref() == Some(value)) {
                    for j in i..*len - 1 {
                        slots[j] = slots[j + 1].take();
                    }
                    slots[*len - 1] = None;
                    *len -= 1;
                    true
                } else {
                    false
                }
            }
            SetStorage::Heap(set) => set.remove(value),
        }
    }

    pub fn clear(&mut self) {
        self.storage = SetStorage::Inline([None, None, None, None], 0);
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        match &self.storage {
            SetStorage::Inline(slots, len) => Box::new(slots[..*len].iter().filter_map(|slot| slot.as_ref())),
            SetStorage::Heap(set) => Box::new(set.iter()),
        }
    }

    fn promote_to_heap(&mut self) {
        if let SetStorage::Inline(slots, len) = &mut self.storage {
            let mut set = OrderedSet::new();
            for slot in slots[..*len].iter_mut() {
                if let Some(v) = slot.take() {
                    set.insert(v);
                }
            }
            self.storage = SetStorage::Heap(set);
        }
    }

    pub fn readonly(self) -> ReadOnlySetlike<T> {
        ReadOnlySetlike(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadOnlySetlike<T>(Setlike<T>);

impl<T: Clone + PartialEq> ReadOnlySetlike<T> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, value: &T) -> bool {
        self.0.has(value)
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maplike_stays_inline_under_five_entries() {
        let mut map = Maplike::new();
        for i in 0..4 {
            map.set(i, i * 10);
        }
        assert!(matches!(map.storage, MapStorage::Inline(_, 4)));
        assert_eq!(map.get(&2), Some(&20));
    }

    #[test]
    fn maplike_promotes_to_heap_on_fifth_entry() {
        let mut map = Maplike::new();
        for i in 0..5 {
            map.set(i, i * 10);
        }
        assert!(matches!(map.storage, MapStorage::Heap(_)));
        assert_eq!(map.len(), 5);
        for i in 0..5 {
            assert_eq!(map.get(&i), Some(&(i * 10)));
        }
    }

    #[test]
    fn maplike_overwrite_does_not_duplicate() {
        let mut map = Maplike::new();
        map.set("a", 1);
        map.set("a", 2);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&"a"), Some(&2));
    }

    #[test]
    fn maplike_delete_shifts_inline_slots() {
        let mut map = Maplike::new();
        map.set(1, "a");
        map.set(2, "b");
        map.set(3, "c");
        assert!(map.delete(&2));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&3), Some(&"c"));
        assert!(!map.delete(&2));
    }

    #[test]
    fn readonly_maplike_exposes_only_reads() {
        let mut map = Maplike::new();
        map.set(1, "a");
        let ro = map.readonly();
        assert_eq!(ro.get(&1), Some(&"a"));
        assert!(ro.has(&1));
    }

    #[test]
    fn setlike_promotes_to_heap_on_fifth_entry() {
        let mut set = Setlike::new();
        for i in 0..5 {
            set.add(i);
        }
        assert!(matches!(set.storage, SetStorage::Heap(_)));
        assert!(set.has(&4));
    }

    #[test]
    fn setlike_add_is_idempotent() {
        let mut set = Setlike::new();
        set.add(1);
        set.add(1);
        assert_eq!(set.len(), 1);
    }
}
