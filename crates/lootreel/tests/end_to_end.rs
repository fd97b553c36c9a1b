use lootreel::assign::{TierAssignment, assign};
use lootreel::audio::Silent;
use lootreel::select::CaseSelector;
use lootreel::settings::ReelSettings;
use lootreel::source::{Library, TextFileSource};
use lootreel::{CaseOpener, Item, OpenError, OpenResult, TIER_TABLE, Tier};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::time::{Duration, Instant};

fn abcd() -> Vec<Item> {
    ["A", "B", "C", "D"].into_iter().map(Item::from).collect()
}

#[test]
fn seeded_assignment_is_deterministic() {
    let items = abcd();
    let first = assign(&items, &mut ChaCha20Rng::seed_from_u64(2024));
    let second = assign(&items, &mut ChaCha20Rng::seed_from_u64(2024));
    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
    assert_eq!(first.bucket(Tier::MilSpec).len(), 2);
    assert_eq!(first.bucket(Tier::Restricted).len(), 1);
    assert_eq!(first.bucket(Tier::Classified).len(), 1);
}

#[test]
fn forced_covert_draw_returns_its_only_item() {
    let items = abcd();
    let assignment = TierAssignment::from_buckets([
        vec![Item::from("A"), Item::from("B")],
        vec![Item::from("D")],
        vec![],
        vec![Item::from("C")],
        vec![],
    ]);
    let selector = CaseSelector::new(&TIER_TABLE, &assignment, &items);
    let mut rng = ChaCha20Rng::seed_from_u64(1);

    let result = selector.open_in_tier(Tier::Covert, &mut rng);
    assert_eq!(result.item.as_str(), "C");
    assert_eq!(result.tier.to_string(), "Covert (Red)");
}

#[test]
fn empty_collection_returns_sentinel() {
    let dir = tempfile::tempdir().unwrap();
    let source = TextFileSource::new(dir.path().join("learned.txt"));
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let library = Library::load(&source, &mut rng).unwrap();
    assert!(library.assignment().is_empty());

    let selector = CaseSelector::new(&TIER_TABLE, library.assignment(), library.items());
    let result = selector.open(&mut rng);
    assert_eq!(
        result,
        OpenResult::new(Item::from("No problems available"), Tier::MilSpec)
    );
}

#[test]
fn empty_collection_never_starts_an_animation() {
    let opener = CaseOpener::from_source(
        &Vec::<Item>::new(),
        &TIER_TABLE,
        ReelSettings::default(),
        Some(1),
        Box::new(Silent),
    );
    let mut opener = opener.unwrap();
    assert_eq!(opener.open(Instant::now()), Err(OpenError::NoItems));
    assert!(!opener.is_opening());
}

#[test]
fn seeded_opener_lands_on_its_result() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("learned.txt");
    std::fs::write(&path, "Two Sum\nLRU Cache\nWord Ladder\nN-Queens\nTrapping Rain Water\n")
        .unwrap();
    let source = TextFileSource::new(&path);
    let settings = ReelSettings {
        duration: Duration::from_millis(1000),
        ..Default::default()
    };

    let run = || {
        let mut opener = CaseOpener::from_source(
            &source,
            &TIER_TABLE,
            settings.clone(),
            Some(99),
            Box::new(Silent),
        )
        .unwrap();
        let start = Instant::now();
        let result = opener.open(start).unwrap().unwrap();

        let mut now = start;
        let finished = loop {
            now += Duration::from_millis(33);
            if let Some(done) = opener.tick(now).finished {
                break done;
            }
        };
        assert_eq!(finished, result);

        let stage = opener.stage().unwrap();
        let geometry = opener.geometry();
        let card = geometry.card_rect(stage.reel.winner_index(), stage.offset);
        assert_eq!(card.center().x, geometry.center_line_x);
        result
    };

    assert_eq!(run(), run());
}
