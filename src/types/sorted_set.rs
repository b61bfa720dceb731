use bytes::Bytes;
use itertools::Itertools;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use strum_macros::{Display, EnumString};

use crate::store::StoreError;
use crate::types::{normalize_range, NumberKind, SetValue};

/// How scores of the same member are combined by union and intersection stores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Aggregate {
    #[default]
    Sum,
    Min,
    Max,
}

impl Aggregate {
    fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            // inf + -inf
            Aggregate::Sum => zero_if_nan(a + b),
            Aggregate::Min => a.min(b),
            Aggregate::Max => a.max(b),
        }
    }
}

/// A score ordered totally, so it can be part of a `BTreeSet` key. NaN never gets here.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Score(f64);

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// A collection of unique members, each bound to a score.
///
/// Members are ordered by `(score, member)`, both ascending, and a member's rank is its 0 based
/// position in that order. Scores are kept twice: by member for lookups, and in order for ranks
/// and ranges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortedSetValue {
    scores: HashMap<Bytes, f64>,
    ordered: BTreeSet<(Score, Bytes)>,
}

impl SortedSetValue {
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Sets the score of `member`, returning `true` if the member is new. The last write wins when
    /// the member already exists.
    ///
    /// Fails when `score` is NaN.
    pub fn insert(&mut self, member: Bytes, score: f64) -> Result<bool, StoreError> {
        let score = checked_score(score)?;

        let previous = self.scores.insert(member.clone(), score);
        if let Some(previous) = previous {
            self.ordered.remove(&(Score(previous), member.clone()));
        }
        self.ordered.insert((Score(score), member));

        Ok(previous.is_none())
    }

    /// Adds every `(member, score)` pair and returns the number of new members. Nothing is added
    /// if any score is NaN.
    pub fn add(
        &mut self,
        pairs: impl IntoIterator<Item = (Bytes, f64)>,
    ) -> Result<usize, StoreError> {
        let pairs: Vec<_> = pairs.into_iter().collect();
        for (_, score) in pairs.iter() {
            checked_score(*score)?;
        }

        let mut added = 0;
        for (member, score) in pairs {
            if self.insert(member, score)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Adds `delta` to the score of `member`, a missing member starting from 0.
    pub fn increment(&mut self, member: Bytes, delta: f64) -> Result<f64, StoreError> {
        let score = self.score(&member).unwrap_or(0.0) + delta;
        self.insert(member, score)?;
        Ok(score)
    }

    pub fn score(&self, member: &Bytes) -> Option<f64> {
        self.scores.get(member).copied()
    }

    pub fn rank(&self, member: &Bytes) -> Option<usize> {
        let score = self.score(member)?;
        Some(self.ordered.range(..(Score(score), member.clone())).count())
    }

    /// Number of members whose score lies within `min..=max`.
    pub fn count(&self, min: f64, max: f64) -> usize {
        if min > max {
            return 0;
        }

        self.ordered
            .range((Score(min), Bytes::new())..)
            .take_while(|(score, _)| score.0 <= max)
            .count()
    }

    /// Removes the given members and returns how many of them were present.
    pub fn remove<'a>(&mut self, members: impl IntoIterator<Item = &'a Bytes>) -> usize {
        let mut removed = 0;
        for member in members {
            if let Some(score) = self.scores.remove(member) {
                self.ordered.remove(&(Score(score), member.clone()));
                removed += 1;
            }
        }
        removed
    }

    /// Members with their scores, from rank `start` to rank `end`, both inclusive.
    pub fn range(&self, start: i64, end: i64) -> Vec<(Bytes, f64)> {
        match normalize_range(start, end, self.len()) {
            Some((start, end)) => self
                .ordered
                .iter()
                .skip(start)
                .take(end - start + 1)
                .map(|(score, member)| (member.clone(), score.0))
                .collect(),
            None => vec![],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Bytes, f64)> {
        self.ordered.iter().map(|(score, member)| (member, score.0))
    }

    /// Members present in any of `sources`, scored by aggregating their weighted scores.
    pub fn union<'a>(
        sources: impl IntoIterator<Item = (ScoreSource<'a>, f64)>,
        aggregate: Aggregate,
    ) -> SortedSetValue {
        let mut scores: HashMap<Bytes, f64> = HashMap::new();

        for (source, weight) in sources {
            for (member, score) in source.scores() {
                let score = weighted(score, weight);
                scores
                    .entry(member.clone())
                    .and_modify(|current| *current = aggregate.apply(*current, score))
                    .or_insert(score);
            }
        }

        SortedSetValue::from_scores(scores)
    }

    /// Members present in every one of `sources`, scored by aggregating their weighted scores.
    pub fn intersection<'a>(
        sources: impl IntoIterator<Item = (ScoreSource<'a>, f64)>,
        aggregate: Aggregate,
    ) -> SortedSetValue {
        // Smallest source first, every candidate has to be looked up in all the others anyway.
        let sources = sources
            .into_iter()
            .sorted_by_key(|(source, _)| source.len())
            .collect_vec();

        let Some(((first, first_weight), others)) = sources.split_first() else {
            return SortedSetValue::default();
        };

        let scores = first
            .scores()
            .filter_map(|(member, score)| {
                others
                    .iter()
                    .try_fold(weighted(score, *first_weight), |acc, (other, weight)| {
                        other
                            .score(member)
                            .map(|score| aggregate.apply(acc, weighted(score, *weight)))
                    })
                    .map(|score| (member.clone(), score))
            })
            .collect();

        SortedSetValue::from_scores(scores)
    }

    fn from_scores(mut scores: HashMap<Bytes, f64>) -> SortedSetValue {
        for score in scores.values_mut() {
            *score += 0.0;
        }

        let ordered = scores
            .iter()
            .map(|(member, score)| (Score(*score), member.clone()))
            .collect();

        SortedSetValue { scores, ordered }
    }
}

/// A value taking part in a union or intersection store. Plain sets take part with a score of 0
/// for every member, and a missing key behaves as an empty set.
#[derive(Debug, Clone, Copy)]
pub enum ScoreSource<'a> {
    Set(&'a SetValue),
    SortedSet(&'a SortedSetValue),
    Missing,
}

impl<'a> ScoreSource<'a> {
    fn len(&self) -> usize {
        match self {
            ScoreSource::Set(set) => set.len(),
            ScoreSource::SortedSet(sorted_set) => sorted_set.len(),
            ScoreSource::Missing => 0,
        }
    }

    fn score(&self, member: &Bytes) -> Option<f64> {
        match self {
            ScoreSource::Set(set) => set.contains(member).then_some(0.0),
            ScoreSource::SortedSet(sorted_set) => sorted_set.score(member),
            ScoreSource::Missing => None,
        }
    }

    fn scores(&self) -> Box<dyn Iterator<Item = (&'a Bytes, f64)> + 'a> {
        match *self {
            ScoreSource::Set(set) => Box::new(set.iter().map(|member| (member, 0.0))),
            ScoreSource::SortedSet(sorted_set) => Box::new(sorted_set.iter()),
            ScoreSource::Missing => Box::new(std::iter::empty()),
        }
    }
}

fn checked_score(score: f64) -> Result<f64, StoreError> {
    if score.is_nan() {
        return Err(StoreError::NotANumber {
            expected: NumberKind::Float,
        });
    }

    // Normalizes -0 so it sorts as 0.
    Ok(score + 0.0)
}

fn weighted(score: f64, weight: f64) -> f64 {
    // inf * 0
    zero_if_nan(score * weight)
}

fn zero_if_nan(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn zset(pairs: &[(&'static str, f64)]) -> SortedSetValue {
        let mut value = SortedSetValue::default();
        value
            .add(pairs.iter().map(|(member, score)| (Bytes::from(*member), *score)))
            .unwrap();
        value
    }

    fn pairs(value: &SortedSetValue) -> Vec<(Bytes, f64)> {
        value.range(0, -1)
    }

    #[test]
    fn add_updates_existing_members() {
        let mut value = zset(&[("a", 3.0), ("b", 2.0), ("c", 1.0)]);

        assert_eq!(value.len(), 3);
        assert_eq!(
            value.add([(Bytes::from("a"), 0.5), (Bytes::from("d"), 4.0)]),
            Ok(1)
        );
        assert_eq!(value.len(), 4);
        assert_eq!(value.score(&Bytes::from("a")), Some(0.5));
        assert_eq!(value.rank(&Bytes::from("a")), Some(0));
    }

    #[test]
    fn add_rejects_nan_without_mutating() {
        let mut value = zset(&[("a", 1.0)]);

        assert_eq!(
            value.add([(Bytes::from("b"), 2.0), (Bytes::from("c"), f64::NAN)]),
            Err(StoreError::NotANumber {
                expected: NumberKind::Float
            })
        );
        assert_eq!(value.len(), 1);
    }

    #[test]
    fn increment_and_rank() {
        let mut value = zset(&[("a", 1.0), ("b", 2.0), ("c", 3.0)]);

        assert_eq!(value.increment(Bytes::from("c"), 3.0), Ok(6.0));
        assert_eq!(value.score(&Bytes::from("c")), Some(6.0));
        assert_eq!(value.rank(&Bytes::from("c")), Some(2));
        assert_eq!(value.count(0.0, 3.0), 2);

        assert_eq!(value.increment(Bytes::from("z"), -1.5), Ok(-1.5));
        assert_eq!(value.rank(&Bytes::from("z")), Some(0));
        assert_eq!(value.rank(&Bytes::from("missing")), None);
    }

    #[test]
    fn equal_scores_are_ordered_by_member() {
        let value = zset(&[("c", 1.0), ("a", 1.0), ("b", 1.0), ("0", 2.0)]);

        assert_eq!(value.rank(&Bytes::from("a")), Some(0));
        assert_eq!(value.rank(&Bytes::from("b")), Some(1));
        assert_eq!(value.rank(&Bytes::from("c")), Some(2));
        assert_eq!(value.rank(&Bytes::from("0")), Some(3));
    }

    #[test]
    fn negative_zero_sorts_as_zero() {
        let value = zset(&[("b", 0.0), ("a", -0.0)]);

        assert_eq!(value.rank(&Bytes::from("a")), Some(0));
        assert_eq!(value.count(0.0, 0.0), 2);
    }

    #[test]
    fn count_bounds_are_inclusive() {
        let value = zset(&[("a", 1.0), ("b", 2.0), ("c", 3.0)]);

        assert_eq!(value.count(1.0, 3.0), 3);
        assert_eq!(value.count(1.5, 2.0), 1);
        assert_eq!(value.count(f64::NEG_INFINITY, f64::INFINITY), 3);
        assert_eq!(value.count(3.0, 1.0), 0);
    }

    #[test]
    fn remove_and_range() {
        let mut value = zset(&[("a", 3.0), ("b", 2.0), ("c", 1.0)]);

        assert_eq!(value.remove(&[Bytes::from("b"), Bytes::from("x")]), 1);
        assert_eq!(
            pairs(&value),
            vec![(Bytes::from("c"), 1.0), (Bytes::from("a"), 3.0)]
        );
        assert_eq!(value.range(-1, -1), vec![(Bytes::from("a"), 3.0)]);
        assert!(value.range(2, 5).is_empty());
    }

    #[test]
    fn union_aggregates_scores() {
        let first = zset(&[("a", 1.0), ("b", 2.0), ("c", 3.0)]);
        let second = zset(&[("b", 4.0), ("c", 1.0), ("d", 0.0)]);
        let sources = || {
            [
                (ScoreSource::SortedSet(&first), 1.0),
                (ScoreSource::SortedSet(&second), 1.0),
            ]
        };

        let sum = SortedSetValue::union(sources(), Aggregate::Sum);
        assert_eq!(
            pairs(&sum),
            vec![
                (Bytes::from("d"), 0.0),
                (Bytes::from("a"), 1.0),
                (Bytes::from("c"), 4.0),
                (Bytes::from("b"), 6.0),
            ]
        );

        let min = SortedSetValue::union(sources(), Aggregate::Min);
        assert_eq!(min.score(&Bytes::from("b")), Some(2.0));
        assert_eq!(min.score(&Bytes::from("c")), Some(1.0));

        let max = SortedSetValue::union(sources(), Aggregate::Max);
        assert_eq!(max.score(&Bytes::from("b")), Some(4.0));
        assert_eq!(max.score(&Bytes::from("c")), Some(3.0));
    }

    #[test]
    fn union_with_plain_sets_and_weights() {
        let first = zset(&[("a", 1.0), ("b", 2.0)]);
        let set: SetValue = [Bytes::from("a"), Bytes::from("d")].into_iter().collect();

        let result = SortedSetValue::union(
            [
                (ScoreSource::SortedSet(&first), 2.0),
                (ScoreSource::Set(&set), 1.0),
                (ScoreSource::Missing, 1.0),
            ],
            Aggregate::Sum,
        );

        assert_eq!(result.score(&Bytes::from("a")), Some(2.0));
        assert_eq!(result.score(&Bytes::from("b")), Some(4.0));
        assert_eq!(result.score(&Bytes::from("d")), Some(0.0));
    }

    #[test]
    fn intersection() {
        let first = zset(&[("a", 1.0), ("b", 2.0), ("c", 3.0)]);
        let second = zset(&[("b", 4.0), ("c", 1.0), ("d", 0.0)]);

        let result = SortedSetValue::intersection(
            [
                (ScoreSource::SortedSet(&first), 1.0),
                (ScoreSource::SortedSet(&second), 1.0),
            ],
            Aggregate::Sum,
        );
        assert_eq!(
            pairs(&result),
            vec![(Bytes::from("c"), 4.0), (Bytes::from("b"), 6.0)]
        );

        let result = SortedSetValue::intersection(
            [
                (ScoreSource::SortedSet(&first), 1.0),
                (ScoreSource::Missing, 1.0),
            ],
            Aggregate::Sum,
        );
        assert!(result.is_empty());
    }

    #[test]
    fn parse_aggregate() {
        assert_eq!(Aggregate::from_str("sum"), Ok(Aggregate::Sum));
        assert_eq!(Aggregate::from_str("MIN"), Ok(Aggregate::Min));
        assert_eq!(Aggregate::from_str("Max"), Ok(Aggregate::Max));
        assert!(Aggregate::from_str("avg").is_err());
        assert_eq!(Aggregate::Sum.to_string(), "SUM");
    }
}
