use ahash::AHashMap;
use compact_str::CompactString;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Allowed deviation of a distribution sum from 1.0
pub const SUM_TOLERANCE: f64 = 1e-6;

pub type DistributionMap = FxHashMap<CompactString, f64>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistributionError {
    #[error("Probability {value} of token {token:?} is not in [0, 1]")]
    InvalidProbability { token: CompactString, value: f64 },
    #[error("Probabilities sum to {0}, expected 1")]
    NotNormalized(f64),
}

/// Inserted in token order, so equal contents iterate in the same order
fn sorted_map(entries: impl IntoIterator<Item = (CompactString, f64)>) -> DistributionMap {
    entries
        .into_iter()
        .sorted_unstable_by(|a, b| a.0.cmp(&b.0))
        .collect()
}

/// Token to probability mapping.
///
/// Probabilities sum to 1 (within [`SUM_TOLERANCE`]), unless the distribution is empty.
/// Absent tokens have probability 0.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Distribution(DistributionMap);

impl Distribution {
    /// Normalizes raw counts by their total. No tokens gives an empty distribution.
    pub fn from_counts<K: AsRef<str>>(counts: impl IntoIterator<Item = (K, usize)>) -> Self {
        let mut merged = FxHashMap::<CompactString, usize>::default();
        for (token, count) in counts.into_iter().filter(|(_, c)| *c > 0) {
            *merged.entry(CompactString::new(token)).or_default() += count;
        }

        let total = merged.values().sum::<usize>();
        if total == 0 {
            return Self::default();
        }

        let total = total as f64;
        Self(sorted_map(
            merged
                .into_iter()
                .map(|(token, count)| (token, count as f64 / total)),
        ))
    }

    /// Validates already normalized probabilities
    pub fn from_probabilities(map: DistributionMap) -> Result<Self, DistributionError> {
        let mut sum = 0.0;
        for (token, &value) in map.iter() {
            if !(0.0..=1.0).contains(&value) {
                return Err(DistributionError::InvalidProbability {
                    token: token.clone(),
                    value,
                });
            }
            sum += value;
        }

        if !map.is_empty() && (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(DistributionError::NotNormalized(sum));
        }

        Ok(Self(sorted_map(map)))
    }

    #[inline]
    pub fn get(&self, token: &str) -> f64 {
        self.0.get(token).copied().unwrap_or_default()
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.0.contains_key(token)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + Clone {
        self.0.iter().map(|(t, &p)| (t.as_str(), p))
    }

    #[inline]
    pub fn tokens(&self) -> impl Iterator<Item = &str> + Clone {
        self.0.keys().map(CompactString::as_str)
    }

    #[inline]
    pub fn sum(&self) -> f64 {
        self.0.values().sum()
    }

    #[inline]
    pub fn into_map(self) -> DistributionMap {
        self.0
    }
}

impl Serialize for Distribution {
    /// Sorted by token, so written files are stable
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().sorted_unstable_by(|a, b| a.0.cmp(b.0)))
    }
}

impl<'de> Deserialize<'de> for Distribution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = DistributionMap::deserialize(deserializer)?;
        Self::from_probabilities(map).map_err(D::Error::custom)
    }
}

/// Raw token counts, before normalization
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenCounts(AHashMap<CompactString, usize>);

impl TokenCounts {
    #[inline]
    pub fn add(&mut self, token: &str) {
        match self.0.get_mut(token) {
            Some(count) => *count += 1,
            None => {
                self.0.insert(CompactString::new(token), 1);
            }
        }
    }

    #[inline]
    pub fn add_char(&mut self, ch: char) {
        let mut buf = [0; 4];
        self.add(ch.encode_utf8(&mut buf));
    }

    /// Commutative and associative
    pub fn merge(&mut self, other: TokenCounts) {
        if self.0.len() < other.0.len() {
            let smaller = ::core::mem::replace(&mut self.0, other.0);
            return self.merge(TokenCounts(smaller));
        }
        for (token, count) in other.0 {
            *self.0.entry(token).or_default() += count;
        }
    }

    #[inline]
    pub fn get(&self, token: &str) -> usize {
        self.0.get(token).copied().unwrap_or_default()
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drops tokens whose relative frequency is below `threshold` (inclusive boundary).
    /// Threshold `0.0` keeps everything.
    pub fn prune(&mut self, threshold: f64) {
        if threshold <= 0.0 {
            return;
        }
        let total = self.total() as f64;
        self.0.retain(|_, &mut count| count as f64 / total >= threshold);
    }

    #[inline]
    pub fn into_distribution(self) -> Distribution {
        Distribution::from_counts(self.0)
    }
}

impl<K: AsRef<str>> FromIterator<K> for TokenCounts {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut counts = Self::default();
        for token in iter {
            counts.add(token.as_ref());
        }
        counts
    }
}
