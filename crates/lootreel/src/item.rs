use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

/// Maximum number of characters shown on a reel card before truncation.
pub const CARD_LABEL_LIMIT: usize = 30;

/// An opaque label from the item source. Two items are the same item iff
/// their labels are byte-for-byte equal.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Item(String);

crate::impl_label_newtype!(Item);

impl From<&str> for Item {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl Item {
    pub fn card_label(&self) -> String {
        if self.0.chars().count() > CARD_LABEL_LIMIT {
            let head: String = self.0.chars().take(CARD_LABEL_LIMIT).collect();
            format!("{head}...")
        } else {
            self.0.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_label_truncates_long_labels() {
        let short = Item::from("Two Sum");
        assert_eq!(short.card_label(), "Two Sum");

        let long = Item::from("Longest Substring Without Repeating Characters");
        assert_eq!(long.card_label(), "Longest Substring Without Repe...");
    }

    #[test]
    fn test_card_label_counts_chars_not_bytes() {
        let label: String = std::iter::repeat('é').take(31).collect();
        let item = Item::new(label);
        assert_eq!(item.card_label().chars().count(), CARD_LABEL_LIMIT + 3);
    }

    #[test]
    fn test_item_serializes_transparently() {
        let item: Item = serde_json::from_str("\"Valid Anagram\"").unwrap();
        assert_eq!(item, Item::from("Valid Anagram"));
    }
}
