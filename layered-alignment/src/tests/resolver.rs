//! Resolution scenarios for OPUS-style and pivot-aligned corpora.

use crate::{
    Alignment, AlignmentError, AlignmentResolver, AlignmentSet, LabelStyle, LanguagePair,
};

/// en-nl alignments as found in an OPUS alignment file.
fn opus() -> Vec<AlignmentSet> {
    vec![AlignmentSet::new(LanguagePair::new("en", "nl"))
        .with(Alignment::new(["1"], ["1"]).with_certainty(Some(0.9)))
        .with(Alignment::new(["2"], ["2", "3"]).with_certainty(Some(0.4)))
        .with(Alignment::new(["3", "4"], ["4"]))
        .with(Alignment::new(["5"], Vec::<String>::new()))]
}

/// DPC-style alignments: Dutch always on the first side.
fn dpc() -> Vec<AlignmentSet> {
    vec![
        AlignmentSet::new(LanguagePair::ordered("nl", "en"))
            .with(Alignment::from_targets("p1.s1; p1.s1").unwrap().with_kind("1-1"))
            .with(Alignment::from_targets("p1.s2; p1.s2 p1.s3").unwrap().with_kind("1-2"))
            .with(Alignment::from_targets("p1.s3 p1.s4; p1.s4").unwrap().with_kind("2-1")),
        AlignmentSet::new(LanguagePair::ordered("nl", "fr"))
            .with(Alignment::from_targets("p1.s1; p1.s1").unwrap().with_kind("1-1"))
            .with(Alignment::from_targets("p1.s2; p1.s2").unwrap().with_kind("1-1"))
            .with(Alignment::from_targets("p1.s3; p1.s3").unwrap().with_kind("1-1"))
            .with(Alignment::from_targets("p1.s4; p1.s3").unwrap().with_kind("1-1")),
    ]
}

// ============ Direct ============

#[test]
fn test_one_to_one() {
    let sets = vec![AlignmentSet::new(LanguagePair::new("a", "b")).with(Alignment::new(["1"], ["1"]))];
    let resolution = AlignmentResolver::new().resolve(&sets, "a", "b", "1");
    assert_eq!(resolution.targets, vec!["1"]);
    assert_eq!(resolution.label, "1=>1");
}

#[test]
fn test_unaligned_segment() {
    let resolution = AlignmentResolver::new().resolve(&opus(), "en", "nl", "9");
    assert!(resolution.targets.is_empty());
    assert_eq!(resolution.label, "");
}

#[test]
fn test_one_to_many() {
    let resolution = AlignmentResolver::new().resolve(&opus(), "en", "nl", "2");
    assert_eq!(resolution.sources, vec!["2"]);
    assert_eq!(resolution.targets, vec!["2", "3"]);
    assert_eq!(resolution.label, "1=>2");
    assert_eq!(resolution.certainty, Some(0.4));
}

#[test]
fn test_reverse_direction() {
    let resolver = AlignmentResolver::new().with_style(LabelStyle::Spaced);
    let resolution = resolver.resolve(&opus(), "nl", "en", "4");
    assert_eq!(resolution.sources, vec!["4"]);
    assert_eq!(resolution.targets, vec!["3", "4"]);
    assert_eq!(resolution.label, "1 => 2");
}

#[test]
fn test_deleted_sentence_is_unaligned() {
    let resolution = AlignmentResolver::new().resolve(&opus(), "en", "nl", "5");
    assert!(resolution.is_empty());
    assert_eq!(resolution.label, "");
}

#[test]
fn test_round_trip_contains_original() {
    let sets = opus();
    let resolver = AlignmentResolver::new();
    for id in ["1", "2", "3", "4"] {
        let forward = resolver.resolve(&sets, "en", "nl", id);
        let back: Vec<String> = forward
            .targets
            .iter()
            .flat_map(|t| resolver.resolve(&sets, "nl", "en", t).targets)
            .collect();
        assert!(back.iter().any(|b| b == id), "{} not in {:?}", id, back);
    }
}

#[test]
fn test_kind_label_is_reversed_against_the_pair() {
    let resolver = AlignmentResolver::new().with_pivot("nl");
    let sets = dpc();

    let forward = resolver.resolve(&sets, "nl", "en", "p1.s2");
    assert_eq!(forward.targets, vec!["p1.s2", "p1.s3"]);
    assert_eq!(forward.label, "1=>2");

    let backward = resolver.resolve(&sets, "en", "nl", "p1.s3");
    assert_eq!(backward.targets, vec!["p1.s2"]);
    assert_eq!(backward.label, "2=>1");
}

// ============ Pivot ============

#[test]
fn test_transitive_resolution() {
    let resolver = AlignmentResolver::new().with_pivot("nl");
    let sets = dpc();

    // en p1.s4 -> nl p1.s3 p1.s4 -> fr p1.s3 (twice)
    let resolution = resolver.resolve(&sets, "en", "fr", "p1.s4");
    assert_eq!(resolution.targets, vec!["p1.s3"]);
    assert_eq!(resolution.label, "1=>1");

    // en p1.s1 -> nl p1.s1 -> fr p1.s1
    let resolution = resolver.resolve(&sets, "en", "fr", "p1.s1");
    assert_eq!(resolution.targets, vec!["p1.s1"]);
}

#[test]
fn test_transitive_label_uses_first_hop_prefix() {
    let resolver = AlignmentResolver::new().with_pivot("nl");
    let sets = dpc();

    // fr p1.s2 -> nl p1.s2 ("1=>1") -> en p1.s2 p1.s3
    let resolution = resolver.resolve(&sets, "fr", "en", "p1.s2");
    assert_eq!(resolution.targets, vec!["p1.s2", "p1.s3"]);
    assert_eq!(resolution.label, "1=>2");
}

#[test]
fn test_transitive_without_first_hop() {
    let resolver = AlignmentResolver::new().with_pivot("nl");
    let resolution = resolver.resolve(&dpc(), "en", "fr", "p9.s9");
    assert!(resolution.is_empty());
    assert_eq!(resolution.label, "");
}

#[test]
fn test_is_transitive() {
    let resolver = AlignmentResolver::new().with_pivot("nl");
    assert!(resolver.is_transitive("en", "fr"));
    assert!(!resolver.is_transitive("nl", "fr"));
    assert!(!AlignmentResolver::new().is_transitive("en", "fr"));
}

#[test]
fn test_pivot_table() {
    let resolver = AlignmentResolver::new()
        .with_pivot("nl")
        .with_style(LabelStyle::Spaced);
    let sets = dpc();

    let mut table = String::new();
    for (from, to) in [("nl", "en"), ("en", "nl"), ("en", "fr"), ("fr", "en")] {
        for id in ["p1.s1", "p1.s2", "p1.s3", "p1.s4"] {
            let resolution = resolver.resolve(&sets, from, to, id);
            table.push_str(&format!(
                "{}:{} -> {}:{} [{}]\n",
                from,
                id,
                to,
                resolution.targets.join(" "),
                resolution.label
            ));
        }
    }

    insta::assert_snapshot!(table.trim_end(), @r###"
    nl:p1.s1 -> en:p1.s1 [1 => 1]
    nl:p1.s2 -> en:p1.s2 p1.s3 [1 => 2]
    nl:p1.s3 -> en:p1.s4 [2 => 1]
    nl:p1.s4 -> en:p1.s4 [2 => 1]
    en:p1.s1 -> nl:p1.s1 [1 => 1]
    en:p1.s2 -> nl:p1.s2 [2 => 1]
    en:p1.s3 -> nl:p1.s2 [2 => 1]
    en:p1.s4 -> nl:p1.s3 p1.s4 [1 => 2]
    en:p1.s1 -> fr:p1.s1 [1 => 1]
    en:p1.s2 -> fr:p1.s2 [2 => 1]
    en:p1.s3 -> fr:p1.s2 [2 => 1]
    en:p1.s4 -> fr:p1.s3 [1 => 1]
    fr:p1.s1 -> en:p1.s1 [1 => 1]
    fr:p1.s2 -> en:p1.s2 p1.s3 [1 => 2]
    fr:p1.s3 -> en:p1.s4 [1 => 1]
    fr:p1.s4 -> en: []
    "###);
}

// ============ Failures ============

#[test]
fn test_malformed_segment() {
    let err = AlignmentResolver::new()
        .try_resolve(&opus(), "en", "nl", "1 2")
        .unwrap_err();
    assert_eq!(err, AlignmentError::MalformedSegment { id: "1 2".into() });
}

#[test]
fn test_missing_pair() {
    let resolver = AlignmentResolver::new();
    let err = resolver.try_resolve(&opus(), "en", "de", "1").unwrap_err();
    assert_eq!(err.to_string(), "no alignments between en and de");

    // the lenient variant reports nothing aligned
    assert!(resolver.resolve(&opus(), "en", "de", "1").is_empty());
}
