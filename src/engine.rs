use bytes::Bytes;
use glob_match::glob_match;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::warn;

use crate::store::{Entry, Key, KeyGuard, KeyGuards, Kind, Payload, Store, StoreError};
use crate::types::sorted_set::ScoreSource;
use crate::types::{
    add, Aggregate, End, HashValue, ListValue, Number, SetValue, SortedSetValue, StringValue,
};
use crate::wait::WaitCoordinator;

type Result<T> = std::result::Result<T, StoreError>;

/// Strings can't grow past 512 MiB.
pub const MAX_STRING_LENGTH: usize = 512 * 1024 * 1024;
pub const MAX_BIT_OFFSET: u64 = (MAX_STRING_LENGTH as u64) * 8 - 1;

/// The engine is the entry point for every operation. It's a cheap handle: clones share the same
/// keys and the same blocked callers, so it can be handed to as many threads or tasks as needed.
#[derive(Clone, Default)]
pub struct Engine {
    store: Store,
    waiters: Arc<WaitCoordinator>,
}

impl Engine {
    pub fn new() -> Engine {
        Engine::default()
    }

    /// Runs `read` over the payload of `key`, `None` if the key doesn't exist.
    fn read<T: Payload, R>(&self, key: &str, read: impl FnOnce(Option<&T>) -> R) -> Result<R> {
        let guard = self.store.lock(key);
        Ok(read(guard.get::<T>()?))
    }

    /// Runs `write` over the payload of `key`, creating the key if needed.
    fn write<T: Payload, R>(&self, key: &str, write: impl FnOnce(&mut T) -> R) -> Result<R> {
        let mut guard = self.store.lock(key);
        Ok(write(guard.get_or_create::<T>()?))
    }

    /// Runs `update` over the payload of `key` if it exists, returning `R::default()` otherwise.
    fn update<T: Payload, R: Default>(
        &self,
        key: &str,
        update: impl FnOnce(&mut T) -> R,
    ) -> Result<R> {
        let mut guard = self.store.lock(key);
        Ok(guard.get_mut::<T>()?.map(update).unwrap_or_default())
    }

    // Keyspace

    /// Removes the given keys, whatever they hold, and returns how many existed.
    pub fn del(&self, keys: &[Key]) -> usize {
        keys.iter()
            .filter(|key| self.store.lock(key).remove().is_some())
            .count()
    }

    /// Counts how many of the given keys exist. A key mentioned twice is counted twice.
    pub fn exists(&self, keys: &[Key]) -> usize {
        keys.iter()
            .filter(|key| self.store.lock(key).exists())
            .count()
    }

    pub fn kind(&self, key: &str) -> Option<Kind> {
        self.store.lock(key).kind()
    }

    /// Keys matching the glob `pattern`, in no particular order.
    pub fn keys(&self, pattern: &str) -> Vec<Key> {
        self.store
            .keys()
            .into_iter()
            .filter(|key| glob_match(pattern, key))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.store.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Strings

    /// Sets `key` to hold `value`, discarding whatever it held before regardless of its kind.
    pub fn set(&self, key: &str, value: Bytes) {
        self.store.lock(key).replace(StringValue::from(value));
    }

    /// Sets `key` only if it doesn't exist yet. Returns whether it was set.
    pub fn set_nx(&self, key: &str, value: Bytes) -> bool {
        let mut guard = self.store.lock(key);
        if guard.exists() {
            return false;
        }

        guard.replace(StringValue::from(value));
        true
    }

    pub fn get(&self, key: &str) -> Result<Option<Bytes>> {
        self.read(key, |value: Option<&StringValue>| value.map(StringValue::get))
    }

    pub fn get_del(&self, key: &str) -> Result<Option<Bytes>> {
        let mut guard = self.store.lock(key);
        guard.check::<StringValue>()?;

        Ok(match guard.remove() {
            Some(Entry::String(value)) => Some(value.get()),
            _ => None,
        })
    }

    /// Values of every key, in order. Keys that don't exist or don't hold a string yield `None`.
    pub fn mget(&self, keys: &[Key]) -> Vec<Option<Bytes>> {
        let guards = self.store.lock_many(keys.iter().map(String::as_str));

        keys.iter()
            .map(|key| {
                guards
                    .get(key)
                    .and_then(|guard| guard.get::<StringValue>().ok().flatten())
                    .map(StringValue::get)
            })
            .collect()
    }

    /// Sets every key at once. When a key is repeated the last value wins.
    pub fn mset(&self, pairs: Vec<(Key, Bytes)>) {
        let mut guards = self
            .store
            .lock_many(pairs.iter().map(|(key, _)| key.as_str()));

        for (key, value) in pairs {
            if let Some(guard) = guards.get_mut(&key) {
                guard.replace(StringValue::from(value));
            }
        }
    }

    /// Appends `value` to the string at `key`, creating it if needed. Returns the new length.
    pub fn append(&self, key: &str, value: &[u8]) -> Result<usize> {
        let mut guard = self.store.lock(key);
        let current = guard.get::<StringValue>()?.map_or(0, StringValue::len);
        check_length(current, value.len())?;

        Ok(guard.get_or_create::<StringValue>()?.append(value))
    }

    pub fn strlen(&self, key: &str) -> Result<usize> {
        self.read(key, |value: Option<&StringValue>| {
            value.map_or(0, StringValue::len)
        })
    }

    pub fn incr_by(&self, key: &str, delta: i64) -> Result<i64> {
        self.increment(key, delta)
    }

    pub fn incr_by_float(&self, key: &str, delta: f64) -> Result<f64> {
        self.increment(key, delta)
    }

    fn increment<T: Number>(&self, key: &str, delta: T) -> Result<T> {
        let mut guard = self.store.lock(key);

        match guard.get_mut::<StringValue>()? {
            Some(value) => value.increment(delta),
            None => {
                let next = add(None, delta)?;
                guard.replace(StringValue::new(next.to_string()));
                Ok(next)
            }
        }
    }

    pub fn get_range(&self, key: &str, start: i64, end: i64) -> Result<Bytes> {
        self.read(key, |value: Option<&StringValue>| {
            value.map_or_else(Bytes::new, |value| value.get_range(start, end))
        })
    }

    /// Overwrites part of the string at `key` starting at `offset`. Returns the new length.
    ///
    /// An empty `value` leaves the key untouched, it isn't even created.
    pub fn set_range(&self, key: &str, offset: usize, value: &[u8]) -> Result<usize> {
        check_length(offset, value.len())?;

        let mut guard = self.store.lock(key);
        if value.is_empty() {
            return Ok(guard.get::<StringValue>()?.map_or(0, StringValue::len));
        }

        Ok(guard.get_or_create::<StringValue>()?.set_range(offset, value))
    }

    pub fn get_bit(&self, key: &str, offset: u64) -> Result<bool> {
        check_bit_offset(offset)?;
        self.read(key, |value: Option<&StringValue>| {
            value.is_some_and(|value| value.get_bit(offset))
        })
    }

    /// Sets or clears the bit at `offset` and returns its previous value.
    pub fn set_bit(&self, key: &str, offset: u64, bit: bool) -> Result<bool> {
        check_bit_offset(offset)?;
        self.write(key, |value: &mut StringValue| value.set_bit(offset, bit))
    }

    // Lists

    /// Pushes `values` onto `end` of the list at `key` and returns the length of the list after
    /// the push. As many callers blocked on the key as there are elements are woken up.
    pub fn push(&self, key: &str, end: End, values: Vec<Bytes>) -> Result<usize> {
        let mut guard = self.store.lock(key);
        let list = guard.get_or_create::<ListValue>()?;

        let len = list.push(end, values);
        self.waiters.wake(key, len);

        Ok(len)
    }

    pub fn lpush(&self, key: &str, values: Vec<Bytes>) -> Result<usize> {
        self.push(key, End::Left, values)
    }

    pub fn rpush(&self, key: &str, values: Vec<Bytes>) -> Result<usize> {
        self.push(key, End::Right, values)
    }

    pub fn pop(&self, key: &str, end: End) -> Result<Option<Bytes>> {
        let mut guard = self.store.lock(key);
        Ok(guard.get_mut::<ListValue>()?.and_then(|list| list.pop(end)))
    }

    pub fn lpop(&self, key: &str) -> Result<Option<Bytes>> {
        self.pop(key, End::Left)
    }

    pub fn rpop(&self, key: &str) -> Result<Option<Bytes>> {
        self.pop(key, End::Right)
    }

    pub fn llen(&self, key: &str) -> Result<usize> {
        self.read(key, |list: Option<&ListValue>| list.map_or(0, ListValue::len))
    }

    pub fn lindex(&self, key: &str, index: i64) -> Result<Option<Bytes>> {
        self.read(key, |list: Option<&ListValue>| {
            list.and_then(|list| list.index(index))
        })
    }

    pub fn lrange(&self, key: &str, start: i64, end: i64) -> Result<Vec<Bytes>> {
        self.read(key, |list: Option<&ListValue>| {
            list.map(|list| list.range(start, end)).unwrap_or_default()
        })
    }

    pub fn ltrim(&self, key: &str, start: i64, end: i64) -> Result<()> {
        self.update(key, |list: &mut ListValue| list.trim(start, end))
    }

    /// Pops from `end` of the list at `key`, waiting up to `timeout` for an element if the list
    /// is empty. `None` as timeout waits forever.
    ///
    /// Returns `Ok(None)` when the timeout elapses.
    pub async fn blocking_pop(
        &self,
        key: &str,
        end: End,
        timeout: Option<Duration>,
    ) -> Result<Option<Bytes>> {
        let deadline = deadline(timeout);
        let mut woken = false;

        loop {
            let ticket = {
                let mut guard = self.store.lock(key);
                if let Some(value) = guard.get_mut::<ListValue>()?.and_then(|list| list.pop(end)) {
                    return Ok(Some(value));
                }

                if woken && expired(deadline) {
                    return Ok(None);
                }

                self.waiters.register(key, woken)
            };

            if !ticket.wait(deadline).await {
                return Ok(None);
            }
            woken = true;
        }
    }

    pub async fn blpop(&self, key: &str, timeout: Option<Duration>) -> Result<Option<Bytes>> {
        self.blocking_pop(key, End::Left, timeout).await
    }

    pub async fn brpop(&self, key: &str, timeout: Option<Duration>) -> Result<Option<Bytes>> {
        self.blocking_pop(key, End::Right, timeout).await
    }

    /// Atomically pops the last element of `source` and pushes it in front of `destination`.
    /// Returns `Ok(None)`, changing nothing, when `source` doesn't exist.
    ///
    /// Using the same key for both rotates the list.
    pub fn rpoplpush(&self, source: &str, destination: &str) -> Result<Option<Bytes>> {
        let (mut source, mut destination) = self.store.lock_pair(source, destination);
        self.pop_push(&mut source, destination.as_mut())
    }

    /// Same as [`Engine::rpoplpush`], waiting up to `timeout` for `source` to get an element.
    ///
    /// The element is moved while both keys are locked, exactly like `rpoplpush` does. If the
    /// destination changed kind while waiting, the element stays in `source`.
    pub async fn brpoplpush(
        &self,
        source: &str,
        destination: &str,
        timeout: Option<Duration>,
    ) -> Result<Option<Bytes>> {
        let deadline = deadline(timeout);
        let mut woken = false;

        loop {
            let ticket = {
                let (mut src, mut dst) = self.store.lock_pair(source, destination);
                match self.pop_push(&mut src, dst.as_mut()) {
                    Ok(Some(value)) => return Ok(Some(value)),
                    Ok(None) => {}
                    Err(err) => {
                        if woken {
                            warn!(source, destination, "woken but could not move: {err}");
                            // The element is still there, for the next waiter.
                            let available = src
                                .get::<ListValue>()
                                .ok()
                                .flatten()
                                .map_or(0, ListValue::len);
                            self.waiters.wake(source, available);
                        }
                        return Err(err);
                    }
                }

                if woken && expired(deadline) {
                    return Ok(None);
                }

                self.waiters.register(source, woken)
            };

            if !ticket.wait(deadline).await {
                return Ok(None);
            }
            woken = true;
        }
    }

    fn pop_push(
        &self,
        source: &mut KeyGuard,
        destination: Option<&mut KeyGuard>,
    ) -> Result<Option<Bytes>> {
        let Some(list) = source.get_mut::<ListValue>()? else {
            return Ok(None);
        };

        let Some(destination) = destination else {
            let value = list.pop(End::Right);
            list.push(End::Left, value.clone());
            return Ok(value);
        };

        destination.check::<ListValue>()?;
        let Some(value) = list.pop(End::Right) else {
            return Ok(None);
        };

        let key = destination.key().to_string();
        let target = destination.get_or_create::<ListValue>()?;
        let len = target.push(End::Left, [value.clone()]);
        self.waiters.wake(&key, len);

        Ok(Some(value))
    }

    // Sets

    pub fn sadd(&self, key: &str, members: Vec<Bytes>) -> Result<usize> {
        self.write(key, |set: &mut SetValue| set.add(members))
    }

    pub fn srem(&self, key: &str, members: &[Bytes]) -> Result<usize> {
        self.update(key, |set: &mut SetValue| set.remove(members))
    }

    pub fn smembers(&self, key: &str) -> Result<HashSet<Bytes>> {
        self.read(key, |set: Option<&SetValue>| {
            set.map(SetValue::members).unwrap_or_default()
        })
    }

    pub fn scard(&self, key: &str) -> Result<usize> {
        self.read(key, |set: Option<&SetValue>| set.map_or(0, SetValue::len))
    }

    pub fn sismember(&self, key: &str, member: &Bytes) -> Result<bool> {
        self.read(key, |set: Option<&SetValue>| {
            set.is_some_and(|set| set.contains(member))
        })
    }

    /// Atomically moves `member` from the set at `source` to the set at `destination`. Returns
    /// `false`, changing nothing, when `member` isn't in `source`.
    pub fn smove(&self, source: &str, destination: &str, member: Bytes) -> Result<bool> {
        let (mut source, destination) = self.store.lock_pair(source, destination);
        let Some(set) = source.get_mut::<SetValue>()? else {
            return Ok(false);
        };

        let Some(mut destination) = destination else {
            return Ok(set.contains(&member));
        };

        destination.check::<SetValue>()?;
        if set.remove([&member]) == 0 {
            return Ok(false);
        }

        destination.get_or_create::<SetValue>()?.add([member]);
        Ok(true)
    }

    /// Removes and returns a random member.
    pub fn spop(&self, key: &str) -> Result<Option<Bytes>> {
        self.update(key, |set: &mut SetValue| set.pop())
    }

    /// Members of the first set that aren't in any of the others.
    pub fn sdiff(&self, keys: &[Key]) -> Result<HashSet<Bytes>> {
        let guards = self.store.lock_many(keys.iter().map(String::as_str));
        let empty = SetValue::default();
        let sets = sets(&guards, keys, &empty)?;

        Ok(match sets.split_first() {
            Some((first, others)) => first.difference(others.iter().copied()),
            None => HashSet::new(),
        })
    }

    pub fn sinter(&self, keys: &[Key]) -> Result<HashSet<Bytes>> {
        let guards = self.store.lock_many(keys.iter().map(String::as_str));
        let empty = SetValue::default();

        Ok(SetValue::intersection(sets(&guards, keys, &empty)?))
    }

    pub fn sunion(&self, keys: &[Key]) -> Result<HashSet<Bytes>> {
        let guards = self.store.lock_many(keys.iter().map(String::as_str));
        let empty = SetValue::default();

        Ok(SetValue::union(sets(&guards, keys, &empty)?))
    }

    // Sorted sets

    /// Adds every `(member, score)` pair and returns how many members are new. Scores of existing
    /// members are updated.
    pub fn zadd(&self, key: &str, pairs: Vec<(Bytes, f64)>) -> Result<usize> {
        let mut guard = self.store.lock(key);
        guard.get_or_create::<SortedSetValue>()?.add(pairs)
    }

    pub fn zcard(&self, key: &str) -> Result<usize> {
        self.read(key, |set: Option<&SortedSetValue>| {
            set.map_or(0, SortedSetValue::len)
        })
    }

    pub fn zincrby(&self, key: &str, member: Bytes, delta: f64) -> Result<f64> {
        let mut guard = self.store.lock(key);
        guard
            .get_or_create::<SortedSetValue>()?
            .increment(member, delta)
    }

    pub fn zscore(&self, key: &str, member: &Bytes) -> Result<Option<f64>> {
        self.read(key, |set: Option<&SortedSetValue>| {
            set.and_then(|set| set.score(member))
        })
    }

    pub fn zrank(&self, key: &str, member: &Bytes) -> Result<Option<usize>> {
        self.read(key, |set: Option<&SortedSetValue>| {
            set.and_then(|set| set.rank(member))
        })
    }

    pub fn zcount(&self, key: &str, min: f64, max: f64) -> Result<usize> {
        self.read(key, |set: Option<&SortedSetValue>| {
            set.map_or(0, |set| set.count(min, max))
        })
    }

    pub fn zrem(&self, key: &str, members: &[Bytes]) -> Result<usize> {
        self.update(key, |set: &mut SortedSetValue| set.remove(members))
    }

    pub fn zrange(&self, key: &str, start: i64, end: i64) -> Result<Vec<(Bytes, f64)>> {
        self.read(key, |set: Option<&SortedSetValue>| {
            set.map(|set| set.range(start, end)).unwrap_or_default()
        })
    }

    /// Stores at `destination` the union of the sorted sets (or plain sets) at `keys` and returns
    /// its size. Each source's scores are multiplied by its weight, 1 when `weights` is empty.
    pub fn zunionstore(
        &self,
        destination: &str,
        keys: &[Key],
        weights: &[f64],
        aggregate: Aggregate,
    ) -> Result<usize> {
        self.store_scores(destination, keys, weights, |sources| {
            SortedSetValue::union(sources, aggregate)
        })
    }

    /// Same as [`Engine::zunionstore`], keeping only the members present in every source.
    pub fn zinterstore(
        &self,
        destination: &str,
        keys: &[Key],
        weights: &[f64],
        aggregate: Aggregate,
    ) -> Result<usize> {
        self.store_scores(destination, keys, weights, |sources| {
            SortedSetValue::intersection(sources, aggregate)
        })
    }

    /// The previous value of `destination` is replaced whatever its kind, and the key is removed
    /// when the result is empty.
    fn store_scores(
        &self,
        destination: &str,
        keys: &[Key],
        weights: &[f64],
        combine: impl FnOnce(Vec<(ScoreSource<'_>, f64)>) -> SortedSetValue,
    ) -> Result<usize> {
        let mut guards = self
            .store
            .lock_many(keys.iter().map(String::as_str).chain([destination]));

        let result = {
            let sources = keys
                .iter()
                .enumerate()
                .map(|(i, key)| -> Result<_> {
                    let weight = weights.get(i).copied().unwrap_or(1.0);
                    Ok((score_source(guards.get(key))?, weight))
                })
                .collect::<Result<Vec<_>>>()?;

            combine(sources)
        };

        let len = result.len();
        if let Some(guard) = guards.get_mut(destination) {
            match result.is_empty() {
                true => guard.remove(),
                false => guard.replace(result),
            };
        }

        Ok(len)
    }

    // Hashes

    /// Sets every field and returns how many of them are new.
    pub fn hset(&self, key: &str, pairs: Vec<(Bytes, Bytes)>) -> Result<usize> {
        self.write(key, |hash: &mut HashValue| hash.put_all(pairs))
    }

    pub fn hget(&self, key: &str, field: &Bytes) -> Result<Option<Bytes>> {
        self.read(key, |hash: Option<&HashValue>| {
            hash.and_then(|hash| hash.get(field))
        })
    }

    pub fn hmget(&self, key: &str, fields: &[Bytes]) -> Result<Vec<Option<Bytes>>> {
        self.read(key, |hash: Option<&HashValue>| match hash {
            Some(hash) => hash.multi_get(fields),
            None => vec![None; fields.len()],
        })
    }

    pub fn hlen(&self, key: &str) -> Result<usize> {
        self.read(key, |hash: Option<&HashValue>| hash.map_or(0, HashValue::len))
    }

    pub fn hdel(&self, key: &str, fields: &[Bytes]) -> Result<usize> {
        self.update(key, |hash: &mut HashValue| hash.delete(fields))
    }

    pub fn hexists(&self, key: &str, field: &Bytes) -> Result<bool> {
        self.read(key, |hash: Option<&HashValue>| {
            hash.is_some_and(|hash| hash.exists(field))
        })
    }

    pub fn hincr_by(&self, key: &str, field: Bytes, delta: i64) -> Result<i64> {
        self.hincrement(key, field, delta)
    }

    pub fn hincr_by_float(&self, key: &str, field: Bytes, delta: f64) -> Result<f64> {
        self.hincrement(key, field, delta)
    }

    fn hincrement<T: Number>(&self, key: &str, field: Bytes, delta: T) -> Result<T> {
        let mut guard = self.store.lock(key);
        guard
            .get_or_create::<HashValue>()?
            .increment(field, delta)
    }

    pub fn hgetall(&self, key: &str) -> Result<Vec<(Bytes, Bytes)>> {
        self.read(key, |hash: Option<&HashValue>| {
            hash.into_iter()
                .flat_map(HashValue::iter)
                .map(|(field, value)| (field.clone(), value.clone()))
                .collect()
        })
    }

    pub fn hkeys(&self, key: &str) -> Result<Vec<Bytes>> {
        self.read(key, |hash: Option<&HashValue>| {
            hash.into_iter().flat_map(HashValue::keys).cloned().collect()
        })
    }

    pub fn hvals(&self, key: &str) -> Result<Vec<Bytes>> {
        self.read(key, |hash: Option<&HashValue>| {
            hash.into_iter().flat_map(HashValue::values).cloned().collect()
        })
    }
}

/// The instant a blocking call gives up at. Timeouts too large to be represented wait forever.
fn deadline(timeout: Option<Duration>) -> Option<Instant> {
    timeout.and_then(|timeout| Instant::now().checked_add(timeout))
}

fn expired(deadline: Option<Instant>) -> bool {
    deadline.is_some_and(|deadline| Instant::now() >= deadline)
}

fn check_length(offset: usize, len: usize) -> Result<()> {
    match offset.checked_add(len) {
        Some(end) if end <= MAX_STRING_LENGTH => Ok(()),
        _ => Err(StoreError::StringTooLong),
    }
}

fn check_bit_offset(offset: u64) -> Result<()> {
    match offset <= MAX_BIT_OFFSET {
        true => Ok(()),
        false => Err(StoreError::BitOffsetOutOfRange),
    }
}

/// The sets at `keys`, in order. Missing keys read as `empty`.
fn sets<'a>(guards: &'a KeyGuards, keys: &[Key], empty: &'a SetValue) -> Result<Vec<&'a SetValue>> {
    keys.iter()
        .map(|key| -> Result<&SetValue> {
            let set = match guards.get(key) {
                Some(guard) => guard.get::<SetValue>()?,
                None => None,
            };
            Ok(set.unwrap_or(empty))
        })
        .collect()
}

fn score_source(guard: Option<&KeyGuard>) -> Result<ScoreSource<'_>> {
    match guard.and_then(KeyGuard::entry) {
        None => Ok(ScoreSource::Missing),
        Some(Entry::Set(set)) => Ok(ScoreSource::Set(set)),
        Some(Entry::SortedSet(sorted_set)) => Ok(ScoreSource::SortedSet(sorted_set)),
        Some(entry) => Err(StoreError::TypeMismatch {
            expected: Kind::SortedSet,
            actual: entry.kind(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NumberKind;

    fn bytes(values: &[&'static str]) -> Vec<Bytes> {
        values.iter().copied().map(Bytes::from).collect()
    }

    fn keys(keys: &[&str]) -> Vec<Key> {
        keys.iter().map(|key| key.to_string()).collect()
    }

    #[test]
    fn type_mismatch_does_not_mutate() {
        let engine = Engine::new();
        engine.rpush("list", bytes(&["a"])).unwrap();

        let mismatch = StoreError::TypeMismatch {
            expected: Kind::String,
            actual: Kind::List,
        };
        assert_eq!(engine.get("list"), Err(mismatch.clone()));
        assert_eq!(engine.incr_by("list", 1), Err(mismatch.clone()));
        assert_eq!(engine.append("list", b"x"), Err(mismatch));
        assert_eq!(engine.lrange("list", 0, -1), Ok(bytes(&["a"])));

        // Plain writes replace the value whatever it is.
        engine.set("list", Bytes::from("value"));
        assert_eq!(engine.kind("list"), Some(Kind::String));
    }

    #[test]
    fn reads_never_create_keys() {
        let engine = Engine::new();

        assert_eq!(engine.get("key1"), Ok(None));
        assert_eq!(engine.lrange("key1", 0, -1), Ok(vec![]));
        assert_eq!(engine.smembers("key1"), Ok(HashSet::new()));
        assert_eq!(engine.zscore("key1", &Bytes::from("a")), Ok(None));
        assert_eq!(
            engine.hmget("key1", &bytes(&["a", "b"])),
            Ok(vec![None, None])
        );
        assert_eq!(engine.srem("key1", &bytes(&["a"])), Ok(0));
        assert_eq!(engine.set_range("key1", 10, b""), Ok(0));
        assert!(engine.is_empty());
    }

    #[test]
    fn increments() {
        let engine = Engine::new();

        assert_eq!(engine.incr_by("key1", 1), Ok(1));
        assert_eq!(engine.incr_by("key1", 10), Ok(11));
        assert_eq!(engine.incr_by("key1", -5), Ok(6));
        assert_eq!(engine.incr_by_float("key1", 0.5), Ok(6.5));
        assert_eq!(engine.get("key1"), Ok(Some(Bytes::from("6.5"))));

        engine.set("max", Bytes::from(i64::MAX.to_string()));
        assert_eq!(
            engine.incr_by("max", 1),
            Err(StoreError::NotANumber {
                expected: NumberKind::Integer
            })
        );
        assert_eq!(engine.get("max"), Ok(Some(Bytes::from(i64::MAX.to_string()))));
    }

    #[test]
    fn string_limits() {
        let engine = Engine::new();

        assert_eq!(
            engine.set_bit("key1", MAX_BIT_OFFSET + 1, true),
            Err(StoreError::BitOffsetOutOfRange)
        );
        assert_eq!(
            engine.get_bit("key1", MAX_BIT_OFFSET + 1),
            Err(StoreError::BitOffsetOutOfRange)
        );
        assert_eq!(
            engine.set_range("key1", MAX_STRING_LENGTH, b"x"),
            Err(StoreError::StringTooLong)
        );
        assert!(engine.is_empty());
    }

    #[test]
    fn bits() {
        let engine = Engine::new();

        assert_eq!(engine.set_bit("key1", 7, true), Ok(false));
        assert_eq!(engine.set_bit("key1", 7, true), Ok(true));
        assert_eq!(engine.get("key1"), Ok(Some(Bytes::from_static(&[1]))));
        assert_eq!(engine.get_bit("key1", 7), Ok(true));
        assert_eq!(engine.get_bit("key1", 100), Ok(false));
        assert_eq!(engine.get_bit("missing", 0), Ok(false));
    }

    #[test]
    fn rpoplpush_rotates_the_same_key() {
        let engine = Engine::new();
        engine.rpush("key1", bytes(&["a", "b", "c"])).unwrap();

        assert_eq!(engine.rpoplpush("key1", "key1"), Ok(Some(Bytes::from("c"))));
        assert_eq!(engine.lrange("key1", 0, -1), Ok(bytes(&["c", "a", "b"])));
    }

    #[test]
    fn rpoplpush_checks_the_destination_first() {
        let engine = Engine::new();
        engine.rpush("src", bytes(&["a"])).unwrap();
        engine.set("dst", Bytes::from("value"));

        assert_eq!(
            engine.rpoplpush("src", "dst"),
            Err(StoreError::TypeMismatch {
                expected: Kind::List,
                actual: Kind::String
            })
        );
        assert_eq!(engine.llen("src"), Ok(1));

        assert_eq!(engine.rpoplpush("missing", "dst"), Ok(None));
    }

    #[test]
    fn rpoplpush_deletes_the_emptied_source() {
        let engine = Engine::new();
        engine.rpush("src", bytes(&["a"])).unwrap();

        assert_eq!(engine.rpoplpush("src", "dst"), Ok(Some(Bytes::from("a"))));
        assert_eq!(engine.exists(&keys(&["src", "dst"])), 1);
        assert_eq!(engine.lrange("dst", 0, -1), Ok(bytes(&["a"])));
    }

    #[test]
    fn smove() {
        let engine = Engine::new();
        engine.sadd("src", bytes(&["a", "b"])).unwrap();

        assert_eq!(engine.smove("src", "dst", Bytes::from("a")), Ok(true));
        assert_eq!(engine.smove("src", "dst", Bytes::from("a")), Ok(false));
        assert_eq!(engine.smove("missing", "dst", Bytes::from("a")), Ok(false));
        assert_eq!(engine.sismember("dst", &Bytes::from("a")), Ok(true));

        assert_eq!(engine.smove("src", "dst", Bytes::from("b")), Ok(true));
        assert_eq!(engine.kind("src"), None);
        assert_eq!(engine.scard("dst"), Ok(2));
    }

    #[test]
    fn set_algebra_over_missing_keys() {
        let engine = Engine::new();
        engine.sadd("a", bytes(&["x", "y"])).unwrap();

        let expected: HashSet<Bytes> = bytes(&["x", "y"]).into_iter().collect();
        assert_eq!(engine.sdiff(&keys(&["a", "missing"])), Ok(expected.clone()));
        assert_eq!(engine.sunion(&keys(&["missing", "a"])), Ok(expected));
        assert_eq!(engine.sinter(&keys(&["a", "missing"])), Ok(HashSet::new()));

        engine.set("string", Bytes::from("value"));
        assert!(engine.sunion(&keys(&["a", "string"])).is_err());
    }

    #[test]
    fn zstore_replaces_the_destination() {
        let engine = Engine::new();
        engine
            .zadd("z1", vec![(Bytes::from("a"), 1.0), (Bytes::from("b"), 2.0)])
            .unwrap();
        engine.sadd("s1", bytes(&["b", "c"])).unwrap();
        engine.set("dst", Bytes::from("value"));

        let sources = keys(&["z1", "s1"]);
        assert_eq!(
            engine.zunionstore("dst", &sources, &[], Aggregate::Sum),
            Ok(3)
        );
        assert_eq!(
            engine.zrange("dst", 0, -1),
            Ok(vec![
                (Bytes::from("c"), 0.0),
                (Bytes::from("a"), 1.0),
                (Bytes::from("b"), 2.0),
            ])
        );

        assert_eq!(
            engine.zinterstore("dst", &sources, &[2.0, 1.0], Aggregate::Max),
            Ok(1)
        );
        assert_eq!(engine.zscore("dst", &Bytes::from("b")), Ok(Some(4.0)));

        assert_eq!(
            engine.zinterstore("dst", &keys(&["z1", "missing"]), &[], Aggregate::Sum),
            Ok(0)
        );
        assert_eq!(engine.kind("dst"), None);
    }

    #[test]
    fn zadd_rejects_nan() {
        let engine = Engine::new();

        assert!(engine
            .zadd("z1", vec![(Bytes::from("a"), 1.0), (Bytes::from("b"), f64::NAN)])
            .is_err());
        assert_eq!(engine.kind("z1"), None);
    }

    #[test]
    fn hashes() {
        let engine = Engine::new();

        assert_eq!(
            engine.hset(
                "h",
                vec![
                    (Bytes::from("f1"), Bytes::from("v1")),
                    (Bytes::from("f2"), Bytes::from("10")),
                ]
            ),
            Ok(2)
        );
        assert_eq!(engine.hincr_by("h", Bytes::from("f2"), 5), Ok(15));
        assert_eq!(
            engine.hincr_by("h", Bytes::from("f1"), 5),
            Err(StoreError::NotANumber {
                expected: NumberKind::Integer
            })
        );
        assert_eq!(engine.hdel("h", &bytes(&["f1", "f2", "f3"])), Ok(2));
        assert_eq!(engine.kind("h"), None);
    }

    #[tokio::test]
    async fn brpoplpush_leaves_the_value_when_the_destination_changed() {
        let engine = Engine::new();

        let blocked = {
            let engine = engine.clone();
            tokio::spawn(async move { engine.brpoplpush("src", "dst", None).await })
        };

        while engine.waiters.waiting("src") == 0 {
            tokio::task::yield_now().await;
        }

        engine.set("dst", Bytes::from("value"));
        engine.rpush("src", bytes(&["a"])).unwrap();

        assert_eq!(
            blocked.await.unwrap(),
            Err(StoreError::TypeMismatch {
                expected: Kind::List,
                actual: Kind::String
            })
        );
        assert_eq!(engine.lrange("src", 0, -1), Ok(bytes(&["a"])));
    }

    async fn wait_for_waiters(engine: &Engine, key: &str, count: usize) {
        while engine.waiters.waiting(key) < count {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn brpoplpush_aborted_after_wake_up_keeps_the_value() {
        let engine = Engine::new();

        let blocked = {
            let engine = engine.clone();
            tokio::spawn(async move {
                engine
                    .brpoplpush("src", "dst", Some(Duration::from_secs(10)))
                    .await
            })
        };
        wait_for_waiters(&engine, "src", 1).await;

        engine.rpush("src", bytes(&["a"])).unwrap();

        // Woken, but not moved yet: the value is still in the source.
        assert_eq!(engine.lrange("src", 0, -1), Ok(bytes(&["a"])));
        assert_eq!(engine.lrange("dst", 0, -1), Ok(vec![]));

        blocked.abort();
        assert!(blocked.await.unwrap_err().is_cancelled());

        assert_eq!(engine.lrange("src", 0, -1), Ok(bytes(&["a"])));
        assert_eq!(engine.waiters.waiting("src"), 0);
    }

    #[tokio::test]
    async fn aborted_waiter_passes_its_wake_up_on() {
        let engine = Engine::new();

        let spawn_blpop = |engine: Engine| tokio::spawn(async move { engine.blpop("key1", None).await });

        let first = spawn_blpop(engine.clone());
        wait_for_waiters(&engine, "key1", 1).await;
        let second = spawn_blpop(engine.clone());
        wait_for_waiters(&engine, "key1", 2).await;

        // Only the first one is woken.
        engine.rpush("key1", bytes(&["a"])).unwrap();
        assert_eq!(engine.waiters.waiting("key1"), 1);

        first.abort();

        assert_eq!(second.await.unwrap(), Ok(Some(Bytes::from("a"))));
        assert_eq!(engine.kind("key1"), None);
    }

    #[tokio::test]
    async fn woken_waiter_retries_when_the_element_is_taken() {
        let engine = Engine::new();

        let blocked = {
            let engine = engine.clone();
            tokio::spawn(async move { engine.blpop("key1", None).await })
        };
        wait_for_waiters(&engine, "key1", 1).await;

        engine.rpush("key1", bytes(&["a"])).unwrap();
        assert_eq!(engine.lpop("key1"), Ok(Some(Bytes::from("a"))));

        // Back in line.
        wait_for_waiters(&engine, "key1", 1).await;

        engine.rpush("key1", bytes(&["b"])).unwrap();
        assert_eq!(blocked.await.unwrap(), Ok(Some(Bytes::from("b"))));
    }
}
