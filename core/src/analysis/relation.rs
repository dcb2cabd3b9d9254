use core::hash::Hash;
use hashbrown::HashMap;

use crate::Position;

/// Entities that can be told apart by a key.
pub trait Identity {
    type Id: Clone + Eq + Hash + core::fmt::Debug;

    fn id(&self) -> Self::Id;
}

impl Identity for Position {
    type Id = String;

    fn id(&self) -> String {
        Position::id(self)
    }
}

impl Identity for usize {
    type Id = usize;

    fn id(&self) -> usize {
        *self
    }
}

impl Identity for char {
    type Id = char;

    fn id(&self) -> char {
        *self
    }
}

/// Finite relation between a domain and a range, held as a table of tables keyed by identity.
#[derive(Clone, Debug)]
pub struct Relation<T: Identity, U: Identity = T> {
    domain: Vec<T>,
    range: Vec<U>,
    table: HashMap<T::Id, HashMap<U::Id, bool>>,
}

impl<T: Identity, U: Identity> Relation<T, U> {
    /// Tabulates `holds` over every pair of `domain × range`.
    pub fn new<F>(domain: Vec<T>, range: Vec<U>, mut holds: F) -> Self
    where
        F: FnMut(&T, &U) -> bool,
    {
        let table = domain
            .iter()
            .map(|a| {
                let row = range.iter().map(|b| (b.id(), holds(a, b))).collect();
                (a.id(), row)
            })
            .collect();
        Self {
            domain,
            range,
            table,
        }
    }

    pub fn domain(&self) -> &[T] {
        &self.domain
    }

    pub fn range(&self) -> &[U] {
        &self.range
    }

    /// Pairs outside the domain or range are never related.
    pub fn related(&self, a: &T, b: &U) -> bool {
        self.related_ids(&a.id(), &b.id())
    }

    fn related_ids(&self, a: &T::Id, b: &U::Id) -> bool {
        self.table
            .get(a)
            .and_then(|row| row.get(b))
            .copied()
            .unwrap_or(false)
    }

    /// Range elements related to `a`.
    pub fn image<'a>(&'a self, a: &T) -> impl Iterator<Item = &'a U> + use<'a, T, U> {
        let id = a.id();
        self.range
            .iter()
            .filter(move |b| self.related_ids(&id, &b.id()))
    }

    /// Number of related pairs.
    pub fn size(&self) -> usize {
        self.table
            .values()
            .map(|row| row.values().filter(|&&related| related).count())
            .sum()
    }
}

impl<T: Identity + Clone> Relation<T, T> {
    /// Relation of a domain onto itself.
    pub fn on<F>(domain: Vec<T>, holds: F) -> Self
    where
        F: FnMut(&T, &T) -> bool,
    {
        Self::new(domain.clone(), domain, holds)
    }
}

/// Transitive closure of a relation over its domain, using Warshall's algorithm.
///
/// Runs in `O(n³)` for a domain of `n` elements.
pub fn closure<T: Identity + Clone>(relation: &Relation<T, T>) -> Relation<T, T> {
    let ids: Vec<T::Id> = relation.domain.iter().map(Identity::id).collect();

    let mut table: HashMap<T::Id, HashMap<T::Id, bool>> = ids
        .iter()
        .map(|i| {
            let row = ids
                .iter()
                .map(|j| (j.clone(), relation.related_ids(i, j)))
                .collect();
            (i.clone(), row)
        })
        .collect();

    for k in &ids {
        // row k is unchanged while k is the intermediate
        let through_k: Vec<T::Id> = ids.iter().filter(|&j| table[k][j]).cloned().collect();
        if through_k.is_empty() {
            continue;
        }

        for i in &ids {
            let row = table.get_mut(i).expect("every domain id has a row");
            if row[k] {
                for j in &through_k {
                    row.insert(j.clone(), true);
                }
            }
        }
    }

    Relation {
        domain: relation.domain.clone(),
        range: relation.domain.clone(),
        table,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn successor(limit: usize) -> Relation<usize> {
        Relation::on((0..limit).collect(), |&a, &b| b == a + 1)
    }

    #[test]
    fn chain_closes_forward_only() {
        let closed = closure(&successor(4));

        assert!(closed.related(&0, &3));
        assert!(closed.related(&1, &3));
        assert!(!closed.related(&3, &0));
        assert!(!closed.related(&2, &2));
        assert_eq!(closed.size(), 6);
    }

    #[test]
    fn cycle_relates_everything() {
        let cycle = Relation::on(vec!['a', 'b', 'c'], |&a, &b| {
            matches!((a, b), ('a', 'b') | ('b', 'c') | ('c', 'a'))
        });

        let closed = closure(&cycle);

        assert_eq!(closed.size(), 9);
        assert!(closed.related(&'a', &'a'));
    }

    #[test]
    fn closure_keeps_original_pairs_and_is_idempotent() {
        let base = Relation::on((0..6usize).collect(), |&a, &b| a % 3 == 0 && b == a + 2);
        let closed = closure(&base);
        let twice = closure(&closed);

        for a in base.domain() {
            for b in base.range() {
                if base.related(a, b) {
                    assert!(closed.related(a, b));
                }
                assert_eq!(closed.related(a, b), twice.related(a, b));
            }
        }
    }

    #[test]
    fn heterogeneous_relation_lookups() {
        let relation = Relation::new(vec![0usize, 1, 2], vec!['a', 'b'], |&n, &c| {
            (c == 'a' && n % 2 == 0) || (c == 'b' && n == 1)
        });

        assert!(relation.related(&2, &'a'));
        assert!(!relation.related(&2, &'b'));
        assert!(!relation.related(&7, &'a'));
        assert_eq!(relation.image(&1).collect::<Vec<_>>(), vec![&'b']);
        assert_eq!(relation.size(), 3);
    }

    #[test]
    fn positions_are_keyed_by_id() {
        let cells: Vec<Position> = (0..2)
            .flat_map(|row| (0..2).map(move |column| Position::new(row, column)))
            .collect();
        let same_row = Relation::on(cells, |a, b| a.row == b.row && a != b);

        assert!(same_row.related(&Position::new(1, 0), &Position::new(1, 1)));
        assert!(!same_row.related(&Position::new(0, 0), &Position::new(1, 0)));
        assert_eq!(closure(&same_row).size(), 8);
    }
}
