use std::collections::BTreeMap;

use crate::error::{CodecError, Result};

/// Occurrence count of every symbol present in a sample stream.
///
/// Symbols that never occur are not stored. The table cannot be
/// modified once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, u64>,
    total: u64,
}

impl FrequencyTable {
    pub fn from_samples(samples: &[u8]) -> Result<Self> {
        if samples.is_empty() {
            return Err(CodecError::EmptyInput);
        }

        let mut histogram = [0u64; 256];
        for &sample in samples {
            histogram[sample as usize] += 1;
        }

        let counts = histogram
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(symbol, count)| (symbol as u8, *count))
            .collect();

        Ok(FrequencyTable {
            counts,
            total: samples.len() as u64,
        })
    }

    /// Builds a table from explicit counts. Zero counts are dropped and
    /// repeated symbols are summed.
    pub fn from_counts<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let mut counts = BTreeMap::new();
        let mut total = 0u64;
        for (symbol, count) in pairs.into_iter().filter(|&(_, count)| count > 0) {
            *counts.entry(symbol).or_insert(0) += count;
            total = total
                .checked_add(count)
                .ok_or_else(|| CodecError::format("symbol counts overflow u64"))?;
        }

        if counts.is_empty() {
            return Err(CodecError::EmptyInput);
        }
        Ok(FrequencyTable { counts, total })
    }

    pub fn get(&self, symbol: u8) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// (symbol, count) pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_only_present_symbols() {
        let table = FrequencyTable::from_samples(&[10, 10, 20, 30]).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.get(10), Some(2));
        assert_eq!(table.get(20), Some(1));
        assert_eq!(table.get(30), Some(1));
        assert_eq!(table.get(0), None);
        assert_eq!(table.total(), 4);
    }

    #[test]
    fn test_total_matches_sum() {
        let samples: Vec<u8> = (0..1000u32).map(|i| (i * 7 % 13) as u8).collect();
        let table = FrequencyTable::from_samples(&samples).unwrap();
        let sum: u64 = table.iter().map(|(_, count)| count).sum();
        assert_eq!(sum, table.total());
        assert_eq!(sum, 1000);
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(
            FrequencyTable::from_samples(&[]),
            Err(CodecError::EmptyInput)
        ));
        assert!(matches!(
            FrequencyTable::from_counts([(4, 0)]),
            Err(CodecError::EmptyInput)
        ));
    }

    #[test]
    fn test_from_counts_merges_and_sorts() {
        let table = FrequencyTable::from_counts([(9, 2), (1, 5), (9, 3), (7, 0)]).unwrap();
        let pairs: Vec<_> = table.iter().collect();
        assert_eq!(pairs, vec![(1, 5), (9, 5)]);
        assert_eq!(table.total(), 10);
    }
}
