use crate::item::Item;
use crate::tier::{TIER_COUNT, Tier};
use rand::Rng;
use rand::seq::SliceRandom;
use strum::IntoEnumIterator;

/// Share of the shuffled items given to each tier except the last, which
/// takes whatever remains. Independent of the open-time probabilities.
pub const BUCKET_SHARES: [f64; TIER_COUNT - 1] = [0.50, 0.30, 0.15, 0.05];

/// Partition of the item set into one bucket per tier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierAssignment {
    buckets: [Vec<Item>; TIER_COUNT],
}

impl TierAssignment {
    pub fn from_buckets(buckets: [Vec<Item>; TIER_COUNT]) -> Self {
        Self { buckets }
    }

    pub fn bucket(&self, tier: Tier) -> &[Item] {
        &self.buckets[tier.as_index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tier, &[Item])> {
        Tier::iter().map(|t| (t, self.bucket(t)))
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    pub fn tier_of(&self, item: &Item) -> Option<Tier> {
        self.iter()
            .find(|(_, bucket)| bucket.contains(item))
            .map(|(tier, _)| tier)
    }

    /// Splits `shuffled` into contiguous slices in tier order. Each slice but
    /// the last is `max(1, floor(total * share))`, clamped so the running
    /// total never passes the end; the last tier takes the tail.
    pub fn partition(shuffled: Vec<Item>) -> Self {
        let total = shuffled.len();
        let mut buckets: [Vec<Item>; TIER_COUNT] = Default::default();
        if total == 0 {
            return Self { buckets };
        }

        let mut rest = shuffled.into_iter();
        let mut taken = 0;
        for (bucket, share) in buckets.iter_mut().zip(BUCKET_SHARES) {
            let count = ((total as f64 * share).floor() as usize)
                .max(1)
                .min(total - taken);
            bucket.extend(rest.by_ref().take(count));
            taken += count;
        }
        buckets[TIER_COUNT - 1].extend(rest);

        Self { buckets }
    }
}

/// Shuffles a copy of `items` and partitions it. Every call draws a fresh
/// shuffle, so tier membership is not stable across reloads.
pub fn assign<R: Rng + ?Sized>(items: &[Item], rng: &mut R) -> TierAssignment {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    TierAssignment::partition(shuffled)
}
