use bytes::Bytes;
use rand::seq::IteratorRandom;
use std::collections::HashSet;

/// An unordered collection of unique members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetValue {
    members: HashSet<Bytes>,
}

impl SetValue {
    /// Adds the given members and returns how many of them were not present yet.
    pub fn add(&mut self, members: impl IntoIterator<Item = Bytes>) -> usize {
        members
            .into_iter()
            .filter(|member| self.members.insert(member.clone()))
            .count()
    }

    /// Removes the given members and returns how many of them were present.
    pub fn remove<'a>(&mut self, members: impl IntoIterator<Item = &'a Bytes>) -> usize {
        members
            .into_iter()
            .filter(|member| self.members.remove(*member))
            .count()
    }

    pub fn contains(&self, member: &Bytes) -> bool {
        self.members.contains(member)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> HashSet<Bytes> {
        self.members.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bytes> {
        self.members.iter()
    }

    /// Removes and returns a random member.
    pub fn pop(&mut self) -> Option<Bytes> {
        let member = self.members.iter().choose(&mut rand::thread_rng())?.clone();
        self.members.remove(&member);
        Some(member)
    }

    /// Members of `self` that are not present in any of `others`.
    pub fn difference<'a>(&self, others: impl IntoIterator<Item = &'a SetValue>) -> HashSet<Bytes> {
        let mut result = self.members.clone();
        for other in others {
            result.retain(|member| !other.contains(member));
        }
        result
    }

    /// Members present in every one of `sets`. No sets at all yield an empty result.
    pub fn intersection<'a>(sets: impl IntoIterator<Item = &'a SetValue>) -> HashSet<Bytes> {
        let mut sets = sets.into_iter();
        let Some(first) = sets.next() else {
            return HashSet::new();
        };

        let mut result = first.members.clone();
        for other in sets {
            result.retain(|member| other.contains(member));
        }
        result
    }

    /// Members present in at least one of `sets`.
    pub fn union<'a>(sets: impl IntoIterator<Item = &'a SetValue>) -> HashSet<Bytes> {
        sets.into_iter()
            .flat_map(|set| set.members.iter().cloned())
            .collect()
    }
}

impl FromIterator<Bytes> for SetValue {
    fn from_iter<I: IntoIterator<Item = Bytes>>(iter: I) -> Self {
        SetValue {
            members: iter.into_iter().collect(),
        }
    }
}
