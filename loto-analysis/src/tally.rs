use std::collections::HashMap;
use std::hash::Hash;
use std::ops::AddAssign;

/// Compteur qui conserve l'ordre de première insertion des clés.
///
/// Le classement final est un tri stable : à score égal, la clé vue en
/// premier reste devant.
#[derive(Debug, Clone)]
pub struct Tally<K, V = u32> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K, V> Default for Tally<K, V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K, V> Tally<K, V>
where
    K: Copy + Eq + Hash,
    V: Copy + Default + AddAssign + PartialOrd,
{
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, key: K) -> &mut V {
        let idx = *self.index.entry(key).or_insert_with(|| {
            self.entries.push((key, V::default()));
            self.entries.len() - 1
        });
        &mut self.entries[idx].1
    }

    pub fn add(&mut self, key: K, amount: V) {
        *self.slot(key) += amount;
    }

    /// Remplace la valeur sans changer la position de la clé.
    pub fn set(&mut self, key: K, value: V) {
        *self.slot(key) = value;
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.index.get(key).map(|&idx| self.entries[idx].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, V)> + '_ {
        self.entries.iter().copied()
    }

    /// Entrées triées par valeur décroissante (tri stable).
    pub fn into_ranked(self) -> Vec<(K, V)> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        entries
    }
}
