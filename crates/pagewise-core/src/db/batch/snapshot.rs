use std::collections::BTreeSet;

///
/// IdentifierSnapshot
///
/// Keys captured once at the start of a traversal, walked front to back
/// in fixed-size chunks. The key list itself never changes after capture;
/// only the cursor advances.
///

#[derive(Debug)]
pub(crate) struct IdentifierSnapshot<K> {
    keys: Vec<K>,
    cursor: usize,
}

impl<K: Ord> IdentifierSnapshot<K> {
    /// Capture a snapshot, keeping only the first occurrence of each key.
    pub(crate) fn capture(keys: Vec<K>) -> Self {
        let duplicates: Vec<usize> = {
            let mut seen = BTreeSet::new();
            keys.iter()
                .enumerate()
                .filter_map(|(index, key)| (!seen.insert(key)).then_some(index))
                .collect()
        };

        if duplicates.is_empty() {
            return Self { keys, cursor: 0 };
        }

        let mut duplicates = duplicates.into_iter().peekable();
        let keys = keys
            .into_iter()
            .enumerate()
            .filter_map(|(index, key)| duplicates.next_if_eq(&index).is_none().then_some(key))
            .collect();

        Self { keys, cursor: 0 }
    }
}

impl<K> IdentifierSnapshot<K> {
    pub(crate) const fn len(&self) -> usize {
        self.keys.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub(crate) const fn remaining(&self) -> usize {
        self.keys.len().saturating_sub(self.cursor)
    }

    /// Advance past the next `size` keys and return them. The final chunk
    /// may be shorter; `None` once the snapshot is exhausted.
    pub(crate) fn next_chunk(&mut self, size: usize) -> Option<&[K]> {
        if self.cursor >= self.keys.len() {
            return None;
        }

        let start = self.cursor;
        let end = start.saturating_add(size.max(1)).min(self.keys.len());
        self.cursor = end;

        Some(&self.keys[start..end])
    }
}

///
/// TESTS
///
