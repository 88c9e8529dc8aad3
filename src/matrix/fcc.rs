use ahash::AHashSet;
use log::debug;

use crate::contacts::{CommonContacts, ContactKey, ContactSequence, ContactSets};
use crate::types::PairScore;

/// `1 / |set|`, or 0 for an empty set so that its scores are all 0.
fn inverse_sizes<C: CommonContacts>(contacts: &[C]) -> Vec<f64> {
    contacts
        .iter()
        .map(|c| match c.contact_count() {
            0 => 0.0,
            n => 1.0 / n as f64,
        })
        .collect()
}

/// Directional FCC scores of two contact collections.
///
/// Returns `(|A∩B| / |A|, |A∩B| / |B|)`, each 0 when its side is empty.
pub fn fcc<C: CommonContacts>(a: &C, b: &C) -> (f64, f64) {
    let common = a.common_with(b) as f64;
    let ratio = |n: usize| if n == 0 { 0.0 } else { common / n as f64 };
    (ratio(a.contact_count()), ratio(b.contact_count()))
}

/// Lazily yields every pair `(i, k)`, `1 <= i < k <= n`, in row order.
pub struct PairIter<'a, C: CommonContacts> {
    contacts: &'a [C],
    inverse: Vec<f64>,
    i: usize,
    k: usize,
}

impl<'a, C: CommonContacts> PairIter<'a, C> {
    pub fn new(contacts: &'a [C]) -> Self {
        Self {
            inverse: inverse_sizes(contacts),
            contacts,
            i: 0,
            k: 1,
        }
    }
}

impl<'a, C: CommonContacts> Iterator for PairIter<'a, C> {
    type Item = PairScore;

    fn next(&mut self) -> Option<PairScore> {
        let n = self.contacts.len();
        if self.k >= n {
            self.i += 1;
            self.k = self.i + 1;
            if self.k >= n {
                return None;
            }
        }

        let (i, k) = (self.i, self.k);
        self.k += 1;

        let cc = self.contacts[i].common_with(&self.contacts[k]) as f64;
        Some(PairScore::new(i + 1, k + 1, cc * self.inverse[i], cc * self.inverse[k]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.contacts.len();
        if self.i + 1 >= n {
            return (0, Some(0));
        }
        // rest of the current row plus every later row
        let rest_of_row = n.saturating_sub(self.k);
        let later_rows = n - self.i - 1;
        let remaining = rest_of_row + later_rows * later_rows.saturating_sub(1) / 2;
        (remaining, Some(remaining))
    }
}

/// The pairwise FCC matrix over a run's contact sets, computed on demand.
pub struct FccMatrix {
    contacts: ContactSets,
}

impl FccMatrix {
    pub fn new(contacts: ContactSets) -> Self {
        debug!("Matrix over {} structures ({:?} chains)", contacts.len(), contacts.mode());
        Self { contacts }
    }

    pub fn structure_count(&self) -> usize {
        self.contacts.len()
    }

    pub fn pair_count(&self) -> usize {
        let n = self.contacts.len();
        n * n.saturating_sub(1) / 2
    }

    /// Rows in `(i, k)` order. The counting rule is picked here, once.
    pub fn pairs(&self) -> Box<dyn Iterator<Item = PairScore> + '_> {
        match &self.contacts {
            ContactSets::Aware(sets) => Box::new(PairIter::<AHashSet<ContactKey>>::new(sets)),
            ContactSets::Ignore(seqs) => Box::new(PairIter::<ContactSequence>::new(seqs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(keys: &[ContactKey]) -> AHashSet<ContactKey> {
        keys.iter().copied().collect()
    }

    #[test]
    fn test_fcc_identical() {
        let a = set(&[1, 2, 3]);
        let (f, fv) = fcc(&a, &a);
        assert!((f - 1.0).abs() < 1e-12);
        assert!((fv - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_fcc_is_directional() {
        let a = set(&[1, 2, 3]);
        let b = set(&[1, 2, 3, 4]);
        let (ab, ba) = fcc(&a, &b);
        assert!((ab - 1.0).abs() < 1e-12);
        assert!((ba - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_fcc_empty_side_scores_zero() {
        let a = set(&[]);
        let b = set(&[1, 2]);
        assert_eq!(fcc(&a, &b), (0.0, 0.0));
    }

    #[test]
    fn test_pairs_in_row_order() {
        let sets = vec![set(&[1, 2, 3]), set(&[2, 3, 4]), set(&[1, 2, 3, 4])];
        let matrix = FccMatrix::new(ContactSets::Aware(sets));
        let rows: Vec<String> = matrix.pairs().map(|p| p.to_row()).collect();
        assert_eq!(rows, vec![
            "1 2 0.667 0.667",
            "1 3 1.000 0.750",
            "2 3 1.000 0.750",
        ]);
        assert_eq!(matrix.pair_count(), 3);
    }

    #[test]
    fn test_pairs_with_empty_set() {
        let sets = vec![set(&[]), set(&[5])];
        let matrix = FccMatrix::new(ContactSets::Aware(sets));
        let pairs: Vec<PairScore> = matrix.pairs().collect();
        assert_eq!(pairs, vec![PairScore::new(1, 2, 0.0, 0.0)]);
    }

    #[test]
    fn test_single_structure_has_no_pairs() {
        let matrix = FccMatrix::new(ContactSets::Aware(vec![set(&[1])]));
        assert_eq!(matrix.pairs().count(), 0);
        let matrix = FccMatrix::new(ContactSets::Aware(Vec::new()));
        assert_eq!(matrix.pairs().count(), 0);
    }

    #[test]
    fn test_size_hint_tracks_remaining_pairs() {
        let sets: Vec<_> = (0..5).map(|i| set(&[i])).collect();
        let mut iter = PairIter::new(&sets);
        assert_eq!(iter.size_hint(), (10, Some(10)));
        iter.next();
        iter.next();
        assert_eq!(iter.size_hint(), (8, Some(8)));
        assert_eq!(iter.count(), 8);
    }

    #[test]
    fn test_chain_ignore_counts_duplicates() {
        // structure 1 has the same collapsed contact twice
        let seqs = vec![
            ContactSequence::new(vec![10, 10, 20]),
            ContactSequence::new(vec![10, 30, 40, 50]),
        ];
        let matrix = FccMatrix::new(ContactSets::Ignore(seqs));
        let pair = matrix.pairs().next().unwrap();
        assert!((pair.score_ik - 2.0 / 3.0).abs() < 1e-12);
        assert!((pair.score_ki - 0.5).abs() < 1e-12);
    }
}
