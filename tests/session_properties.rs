use std::time::{Duration, Instant};

use assert_matches::assert_matches;
use keeblab::{Corpus, Session, SessionConfig, SessionEvent};

fn session_for(prompt: &str) -> Session {
    Session::with_seed(Corpus::new([prompt]), SessionConfig::default(), 5)
}

#[test]
fn accuracy_is_full_for_empty_input() {
    let mut s = session_for("anything");
    assert_eq!(s.accuracy(), 100);
    s.on_input_changed_at("a", Instant::now());
    s.on_input_changed_at("", Instant::now());
    assert_eq!(s.accuracy(), 100);
}

#[test]
fn completion_fires_once_per_equality_transition() {
    let mut s = session_for("cat");
    let t0 = Instant::now();
    let mut completions = 0;
    for text in ["c", "ca", "cat"] {
        for e in s.on_input_changed_at(text, t0) {
            if matches!(e, SessionEvent::Completed { .. }) {
                completions += 1;
            }
        }
        assert_eq!(s.accuracy(), 100);
    }
    assert_eq!(completions, 1);

    // repeated identical input while the paragraph is locked fires nothing
    assert!(s.on_input_changed_at("cat", t0).is_empty());
    assert_eq!(s.completed_count(), 1);
}

#[test]
fn cat_with_typo_scores_fifty() {
    let mut s = session_for("cat");
    let t0 = Instant::now();
    s.on_input_changed_at("c", t0);
    let events = s.on_input_changed_at("cb", t0);
    assert_eq!(s.accuracy(), 50);
    assert_matches!(events.as_slice(), [SessionEvent::Mistake { .. }]);
    s.on_input_changed_at("cbt", t0);
    assert_eq!(s.accuracy(), 67);
}

#[test]
fn wpm_zero_whenever_not_started() {
    let mut s = session_for("one two three");
    let t0 = Instant::now();
    for secs in [0, 1, 30, 120] {
        s.tick_at(t0 + Duration::from_secs(secs));
        assert!(s.started_at().is_none());
        assert_eq!(s.wpm(), 0);
    }
}

#[test]
fn streak_ignores_deletions() {
    let mut s = session_for("abcdef");
    let t0 = Instant::now();
    for text in ["a", "ab", "abc"] {
        s.on_input_changed_at(text, t0);
    }
    let (streak, errors) = (s.streak(), s.errors());
    for text in ["ab", "a", ""] {
        s.on_input_changed_at(text, t0);
        assert_eq!(s.streak(), streak);
        assert_eq!(s.errors(), errors);
    }
}

#[test]
fn reset_always_yields_zeroed_metrics() {
    let corpus = Corpus::builtin();
    let mut s = Session::with_seed(corpus.clone(), SessionConfig::default(), 99);
    let t0 = Instant::now();
    for round in 0..5u64 {
        let target = s.target().to_string();
        let mut buf = String::new();
        for c in target.chars().take(10 + round as usize) {
            buf.push(c);
            s.on_input_changed_at(&buf, t0);
        }
        s.tick_at(t0 + Duration::from_secs(5 + round));
        s.reset();

        let m = s.snapshot();
        assert_eq!(
            (m.wpm, m.accuracy, m.completed_count, m.elapsed_secs, m.streak),
            (0, 100, 0, 0, 0)
        );
        assert!(corpus.contains(s.target()));
    }
}

#[test]
fn paragraphs_are_drawn_uniformly() {
    let corpus = Corpus::builtin();
    let mut s = Session::with_seed(corpus.clone(), SessionConfig::default(), 2024);
    let mut counts = vec![0usize; corpus.len()];
    let trials = 10_000;
    for _ in 0..trials {
        s.next();
        let idx = corpus
            .paragraphs()
            .iter()
            .position(|p| p == s.target())
            .unwrap();
        counts[idx] += 1;
    }
    let expected = (trials / corpus.len()) as i64;
    for count in counts {
        // expected 1000, stddev ~30
        assert!((count as i64 - expected).abs() < 200, "count {count}");
    }
}

#[test]
fn continuous_timer_spans_paragraphs() {
    let mut s = session_for("ab");
    let t0 = Instant::now();
    s.on_input_changed_at("a", t0);
    s.on_input_changed_at("ab", t0 + Duration::from_secs(1));

    let t1 = t0 + Duration::from_secs(2);
    assert_eq!(s.tick_at(t1), Some(SessionEvent::Advanced));
    assert_eq!(s.started_at(), Some(t1));

    s.on_input_changed_at("a", t1 + Duration::from_secs(1));
    assert_eq!(s.started_at(), Some(t1));
    s.tick_at(t1 + Duration::from_secs(6));
    assert_eq!(s.elapsed_secs(), 6);
    // one word over six seconds
    assert_eq!(s.wpm(), 10);
}
