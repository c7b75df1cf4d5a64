//! Integration tests for the pairing memory tables.

use chrono::Utc;
use padel_league_scheduler::{
    CurveConfig, Match, MemoryTable, Normalization, PairingMemory, Player, SchedulerConfig,
    TeamPair,
};

fn player(i: usize) -> Player {
    Player::new(format!("p{i:02}"), format!("user{i}"), format!("email{i}@nextmail.com"))
}

fn flat_curve(coefficients: &[f64]) -> CurveConfig {
    CurveConfig {
        coefficients: coefficients.to_vec(),
        overflow: 10.0,
        normalization: Normalization::None,
    }
}

fn finished_match(a: &Player, b: &Player, c: &Player, d: &Player) -> Match {
    let mut m = Match::new(
        "league1",
        TeamPair::new(a.clone(), b.clone()),
        TeamPair::new(c.clone(), d.clone()),
        Utc::now(),
        1,
    );
    m.finished = true;
    m
}

#[test]
fn add_item_is_symmetric_and_counts_every_call() {
    let mut table = MemoryTable::new(flat_curve(&[4.0, 2.0, 0.0]));
    for _ in 0..3 {
        table.add_item("a", "b");
    }
    assert_eq!(table.count("a", "b"), 3);
    assert_eq!(table.count("b", "a"), 3);
    assert_eq!(table.get_amount_of_matches("a"), 3);
    assert_eq!(table.get_amount_of_matches("b"), 3);
    assert_eq!(table.get_amount_of_matches("c"), 0);
}

#[test]
fn score_depends_only_on_the_unordered_pair_count() {
    let mut one_way = MemoryTable::new(CurveConfig::play_with());
    one_way.add_item("a", "b");
    one_way.add_item("a", "b");

    let mut both_ways = MemoryTable::new(CurveConfig::play_with());
    both_ways.add_item("b", "a");
    both_ways.add_item("a", "b");

    assert_eq!(one_way.get_score("a", "b", false), both_ways.get_score("a", "b", false));
    assert_eq!(one_way.get_score("b", "a", false), both_ways.get_score("b", "a", false));
}

#[test]
fn curve_lookup_falls_back_to_overflow_past_the_end() {
    let mut table = MemoryTable::new(flat_curve(&[4.0, 2.0, 0.0]));
    assert_eq!(table.get_score("a", "b", false), 4.0);
    table.add_item("a", "b");
    assert_eq!(table.get_score("a", "b", false), 2.0);
    table.add_item("a", "b");
    assert_eq!(table.get_score("a", "b", false), 0.0);
    table.add_item("a", "b");
    assert_eq!(table.get_score("a", "b", false), 10.0);
}

#[test]
fn guests_always_score_zero() {
    let mut table = MemoryTable::new(flat_curve(&[-4.0]));
    table.add_item("a", "b");
    assert_eq!(table.get_score("a", "b", true), 0.0);
    assert_eq!(table.get_score("a", "z", true), 0.0);
}

#[test]
fn play_with_normalizes_by_matches_played() {
    let mut table = MemoryTable::new(CurveConfig::play_with());
    assert_eq!(table.get_score("a", "d", false), 25.0);

    table.add_item("a", "b");
    table.add_item("a", "c");
    // a has 2 matches: positive scores are divided by 3
    assert_eq!(table.get_score("a", "b", false), 5.0);
    assert!((table.get_score("a", "d", false) - 25.0 / 3.0).abs() < 1e-12);

    table.add_item("a", "b");
    // a has 3 matches and met b twice: -5 multiplied by 4
    assert_eq!(table.get_score("a", "b", false), -20.0);
    assert_eq!(table.get_score("a", "c", false), 3.75);
}

#[test]
fn max_score_picks_the_best_candidate() {
    let (a, b, c) = (player(1), player(2), player(3));
    let guest = Player::guest("g1", "guest", "guest@nextmail.com");
    let mut table = MemoryTable::new(flat_curve(&[4.0, 2.0, -1.0]));
    table.add_item(&a.id, &b.id);
    table.add_item(&a.id, &b.id);
    table.add_item(&a.id, &c.id);

    assert_eq!(table.get_max_score(&a.id, [&b, &c], false), 2.0);
    assert_eq!(table.get_max_score(&a.id, [&b], false), -1.0);
    // A guest candidate scores zero, which beats a repeat penalty.
    assert_eq!(table.get_max_score(&a.id, [&b, &guest], false), 0.0);
    assert_eq!(table.get_max_score(&a.id, [&b, &c], true), 0.0);
    // The player itself is never a candidate.
    assert_eq!(table.get_max_score(&a.id, [&a, &b], false), -1.0);
}

#[test]
fn max_score_without_candidates_is_the_table_upper_bound() {
    let table = MemoryTable::new(CurveConfig::play_against());
    assert_eq!(table.get_max_score("a", std::iter::empty::<&Player>(), false), 130.0);
    assert_eq!(table.upper_bound(), 130.0);

    let penalties = MemoryTable::new(CurveConfig {
        coefficients: vec![-3.0, -8.0],
        overflow: -20.0,
        normalization: Normalization::None,
    });
    assert_eq!(penalties.upper_bound(), 0.0);
}

#[test]
fn history_replay_counts_only_finished_official_matches() {
    let p: Vec<Player> = (1..=4).map(player).collect();
    let config = SchedulerConfig::default();

    let official = finished_match(&p[0], &p[1], &p[2], &p[3]);
    let mut unofficial = finished_match(&p[0], &p[2], &p[1], &p[3]);
    unofficial.official = false;
    let mut unfinished = finished_match(&p[0], &p[3], &p[1], &p[2]);
    unfinished.finished = false;

    let memory = PairingMemory::from_history(&config, [&official, &unofficial, &unfinished]);

    assert_eq!(memory.play_with.count(&p[0].id, &p[1].id), 1);
    assert_eq!(memory.play_with.count(&p[2].id, &p[3].id), 1);
    assert_eq!(memory.play_with.count(&p[0].id, &p[2].id), 0);
    assert_eq!(memory.play_with.count(&p[0].id, &p[3].id), 0);
    for local in &p[..2] {
        for visitor in &p[2..] {
            assert_eq!(memory.play_against.count(&local.id, &visitor.id), 1);
        }
    }
    assert_eq!(memory.play_against.count(&p[0].id, &p[1].id), 0);
    for q in &p {
        assert_eq!(memory.play_with.get_amount_of_matches(&q.id), 1);
        assert_eq!(memory.play_against.get_amount_of_matches(&q.id), 2);
    }
}

#[test]
fn guest_matches_never_feed_history() {
    let p: Vec<Player> = (1..=3).map(player).collect();
    let guest = Player::guest("g1", "guest", "guest@nextmail.com");
    let m = finished_match(&p[0], &p[1], &p[2], &guest);
    assert!(!m.official);

    let memory = PairingMemory::from_history(&SchedulerConfig::default(), [&m]);
    assert_eq!(memory.play_with.get_amount_of_matches(&p[0].id), 0);
}
