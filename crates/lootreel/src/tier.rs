use palette::Srgb;
use rand::Rng;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use strum::{Display as StrumDisplay, EnumCount, EnumIter, EnumString, IntoEnumIterator};

pub const TIER_COUNT: usize = Tier::COUNT;

/// Rarity levels from most to least common. Declaration order is the order
/// of the cumulative probability walk and of the bucket split.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    EnumCount,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
pub enum Tier {
    #[strum(to_string = "Mil-Spec (Blue)", serialize = "milspec", serialize = "blue")]
    MilSpec,
    #[strum(
        to_string = "Restricted (Purple)",
        serialize = "restricted",
        serialize = "purple"
    )]
    Restricted,
    #[strum(
        to_string = "Classified (Pink)",
        serialize = "classified",
        serialize = "pink"
    )]
    Classified,
    #[strum(to_string = "Covert (Red)", serialize = "covert", serialize = "red")]
    Covert,
    #[strum(
        to_string = "Exceedingly Rare (Gold)",
        serialize = "rare",
        serialize = "gold"
    )]
    ExceedinglyRare,
}

impl Tier {
    pub fn as_index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::iter().nth(idx)
    }

    /// First word of the display name, as printed on reel cards.
    pub fn short_name(&self) -> String {
        let name = self.to_string();
        name.split_whitespace().next().unwrap_or_default().to_string()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TierEntry {
    pub tier: Tier,
    /// Open-time sampling weight, in percent.
    pub probability: f64,
    rgb: [u8; 3],
}

impl TierEntry {
    const fn new(tier: Tier, probability: f64, rgb: [u8; 3]) -> Self {
        Self {
            tier,
            probability,
            rgb,
        }
    }

    pub fn color(&self) -> Srgb<u8> {
        let [r, g, b] = self.rgb;
        Srgb::new(r, g, b)
    }

    pub fn hex(&self) -> String {
        let [r, g, b] = self.rgb;
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

/// Ordered (tier, weight, colour) table. Weights sum to 100.
#[derive(Debug)]
pub struct TierTable {
    entries: [TierEntry; TIER_COUNT],
}

pub static TIER_TABLE: TierTable = TierTable {
    entries: [
        TierEntry::new(Tier::MilSpec, 79.92, [0x4B, 0x69, 0xFF]),
        TierEntry::new(Tier::Restricted, 15.98, [0x88, 0x47, 0xFF]),
        TierEntry::new(Tier::Classified, 3.20, [0xD3, 0x2C, 0xE6]),
        TierEntry::new(Tier::Covert, 0.64, [0xEB, 0x4B, 0x4B]),
        TierEntry::new(Tier::ExceedinglyRare, 0.26, [0xFF, 0xD7, 0x00]),
    ],
};

impl TierTable {
    pub fn entries(&self) -> &[TierEntry] {
        &self.entries
    }

    pub fn entry(&self, tier: Tier) -> &TierEntry {
        self.entries
            .iter()
            .find(|e| e.tier == tier)
            .unwrap_or(&self.entries[0])
    }

    pub fn default_tier(&self) -> Tier {
        self.entries[0].tier
    }

    pub fn rarest(&self) -> Tier {
        self.entries[TIER_COUNT - 1].tier
    }

    pub fn color(&self, tier: Tier) -> Srgb<u8> {
        self.entry(tier).color()
    }

    /// Draws `r` from [0, 100) and returns the first tier whose running
    /// cumulative weight reaches it. Rounding past the final sum lands on the
    /// last tier.
    pub fn sample_tier<R: Rng + ?Sized>(&self, rng: &mut R) -> Tier {
        let r = rng.gen_range(0.0..100.0);
        let mut cumulative = 0.0;
        for entry in &self.entries {
            cumulative += entry.probability;
            if cumulative >= r {
                return entry.tier;
            }
        }
        self.rarest()
    }
}
