use crate::assign::TierAssignment;
use crate::item::Item;
use crate::tier::{Tier, TierTable};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

/// Label returned when there is nothing to open.
pub const NO_ITEMS_LABEL: &str = "No problems available";

/// Outcome of one case open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenResult {
    pub item: Item,
    pub tier: Tier,
}

impl OpenResult {
    pub fn new(item: Item, tier: Tier) -> Self {
        Self { item, tier }
    }

    pub fn no_items(table: &TierTable) -> Self {
        Self::new(Item::from(NO_ITEMS_LABEL), table.default_tier())
    }
}

pub struct CaseSelector<'a> {
    table: &'a TierTable,
    assignment: &'a TierAssignment,
    all_items: &'a [Item],
}

impl<'a> CaseSelector<'a> {
    pub fn new(
        table: &'a TierTable,
        assignment: &'a TierAssignment,
        all_items: &'a [Item],
    ) -> Self {
        Self {
            table,
            assignment,
            all_items,
        }
    }

    /// Samples a tier, then an item from that tier's bucket.
    pub fn open<R: Rng + ?Sized>(&self, rng: &mut R) -> OpenResult {
        if self.all_items.is_empty() {
            return OpenResult::no_items(self.table);
        }
        let tier = self.table.sample_tier(rng);
        self.open_in_tier(tier, rng)
    }

    /// Picks uniformly from `tier`'s bucket, or from the whole pool when the
    /// bucket is empty.
    pub fn open_in_tier<R: Rng + ?Sized>(&self, tier: Tier, rng: &mut R) -> OpenResult {
        match self.pick(tier, rng) {
            Some(item) => OpenResult::new(item.clone(), tier),
            None => OpenResult::no_items(self.table),
        }
    }

    pub(crate) fn pick<R: Rng + ?Sized>(&self, tier: Tier, rng: &mut R) -> Option<&'a Item> {
        let bucket = self.assignment.bucket(tier);
        if bucket.is_empty() {
            log::trace!("{tier} bucket is empty, drawing from the full pool");
            self.all_items.choose(rng)
        } else {
            bucket.choose(rng)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assign::assign;
    use crate::tier::TIER_TABLE;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn labels(names: &[&str]) -> Vec<Item> {
        names.iter().map(|&n| Item::from(n)).collect()
    }

    #[test]
    fn test_empty_pool_returns_sentinel() {
        let assignment = TierAssignment::default();
        let selector = CaseSelector::new(&TIER_TABLE, &assignment, &[]);
        let mut rng = ChaCha20Rng::seed_from_u64(0);

        let result = selector.open(&mut rng);
        assert_eq!(result.item.as_str(), "No problems available");
        assert_eq!(result.tier, Tier::MilSpec);
    }

    #[test]
    fn test_pick_from_bucket() {
        let all = labels(&["A", "B", "C", "D"]);
        let assignment = TierAssignment::from_buckets([
            labels(&["A", "B"]),
            labels(&["D"]),
            vec![],
            labels(&["C"]),
            vec![],
        ]);
        let selector = CaseSelector::new(&TIER_TABLE, &assignment, &all);
        let mut rng = ChaCha20Rng::seed_from_u64(3);

        for _ in 0..20 {
            let result = selector.open_in_tier(Tier::Covert, &mut rng);
            assert_eq!(result, OpenResult::new(Item::from("C"), Tier::Covert));
        }
    }

    #[test]
    fn test_empty_bucket_falls_back_to_pool() {
        let all = labels(&["A", "B", "C", "D"]);
        let assignment = TierAssignment::from_buckets([
            labels(&["A", "B", "C", "D"]),
            vec![],
            vec![],
            vec![],
            vec![],
        ]);
        let selector = CaseSelector::new(&TIER_TABLE, &assignment, &all);
        let mut rng = ChaCha20Rng::seed_from_u64(11);

        let result = selector.open_in_tier(Tier::ExceedinglyRare, &mut rng);
        assert_eq!(result.tier, Tier::ExceedinglyRare);
        assert!(all.contains(&result.item));
    }

    #[test]
    fn test_open_result_tier_matches_bucket() {
        let all: Vec<Item> = (0..50).map(|i| Item::new(format!("p{i}"))).collect();
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let assignment = assign(&all, &mut rng);
        let selector = CaseSelector::new(&TIER_TABLE, &assignment, &all);

        for _ in 0..500 {
            let result = selector.open(&mut rng);
            let bucket = assignment.bucket(result.tier);
            if !bucket.is_empty() {
                assert!(bucket.contains(&result.item));
            }
        }
    }
}
