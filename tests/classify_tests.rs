mod common;

use common::EventBuilder;
use democracy_score::dimensions::Dimension::{
    self, CivilLiberties, Deliberation, ElectoralProcess, MediaFreedom, RuleOfLaw,
};
use democracy_score::scorer::classify::{classify, dimensions_for_tag, TAG_TABLE};
use rstest::rstest;

#[rstest]
#[case("media", &[MediaFreedom])]
#[case("press", &[MediaFreedom])]
#[case("journalism", &[MediaFreedom])]
#[case("independent-media", &[MediaFreedom])]
#[case("press-freedom", &[MediaFreedom, CivilLiberties])]
#[case("censorship", &[MediaFreedom, CivilLiberties])]
#[case("misinformation", &[MediaFreedom, Deliberation])]
#[case("fact-check", &[MediaFreedom, Deliberation])]
#[case("transparency", &[MediaFreedom, RuleOfLaw])]
#[case("election", &[ElectoralProcess])]
#[case("elections", &[ElectoralProcess])]
#[case("electoral", &[ElectoralProcess])]
#[case("voting", &[ElectoralProcess])]
#[case("ballot", &[ElectoralProcess])]
#[case("campaign", &[ElectoralProcess])]
#[case("referendum", &[ElectoralProcess])]
#[case("voting-rights", &[ElectoralProcess, CivilLiberties])]
#[case("redistricting", &[ElectoralProcess, RuleOfLaw])]
#[case("parliament", &[ElectoralProcess, Deliberation])]
#[case("civil-rights", &[CivilLiberties])]
#[case("civil-liberties", &[CivilLiberties])]
#[case("human-rights", &[CivilLiberties])]
#[case("privacy", &[CivilLiberties])]
#[case("protest", &[CivilLiberties])]
#[case("discrimination", &[CivilLiberties])]
#[case("immigration", &[CivilLiberties])]
#[case("free-speech", &[CivilLiberties, MediaFreedom])]
#[case("surveillance", &[CivilLiberties, RuleOfLaw])]
#[case("law", &[RuleOfLaw])]
#[case("legal", &[RuleOfLaw])]
#[case("justice", &[RuleOfLaw])]
#[case("corruption", &[RuleOfLaw])]
#[case("judiciary", &[RuleOfLaw, CivilLiberties])]
#[case("judicial", &[RuleOfLaw, CivilLiberties])]
#[case("courts", &[RuleOfLaw, CivilLiberties])]
#[case("supreme-court", &[RuleOfLaw, CivilLiberties])]
#[case("constitution", &[RuleOfLaw, CivilLiberties])]
#[case("politics", &[Deliberation])]
#[case("policy", &[Deliberation])]
#[case("opinion", &[Deliberation])]
#[case("op-ed", &[Deliberation])]
#[case("editorial", &[Deliberation])]
#[case("analysis", &[Deliberation])]
#[case("community", &[Deliberation])]
#[case("debate", &[Deliberation, ElectoralProcess])]
#[case("town-hall", &[Deliberation, ElectoralProcess])]
fn test_tag_table_entry(#[case] tag: &str, #[case] expected: &[Dimension]) {
    let dims = dimensions_for_tag(tag).unwrap_or_else(|| panic!("'{}' not mapped", tag));
    assert_eq!(dims, expected);
}

#[test]
fn test_case_table_covers_whole_tag_table() {
    // Keep the rstest cases above in sync with the table.
    assert_eq!(TAG_TABLE.len(), 46);
}

#[rstest]
#[case("Elections")]
#[case("  elections  ")]
#[case("#elections")]
#[case("ELECTIONS")]
fn test_tag_lookup_normalizes(#[case] raw: &str) {
    assert_eq!(dimensions_for_tag(raw), Some(&[ElectoralProcess][..]));
}

#[rstest]
#[case("Press Freedom")]
#[case("press_freedom")]
#[case("Press-Freedom")]
fn test_multiword_tags(#[case] raw: &str) {
    assert_eq!(
        dimensions_for_tag(raw),
        Some(&[MediaFreedom, CivilLiberties][..])
    );
}

#[rstest]
#[case("sports")]
#[case("weather")]
#[case("")]
#[case("electionz")]
fn test_unknown_tags(#[case] raw: &str) {
    assert!(dimensions_for_tag(raw).is_none());
}

#[test]
fn test_classify_unions_category_and_topics() {
    let event = EventBuilder::new("a", "s", "elections")
        .topics(&["privacy", "sports", "law"])
        .build();
    let c = classify(&event);

    let dims: Vec<Dimension> = c.dimensions.iter().collect();
    assert_eq!(dims, vec![ElectoralProcess, CivilLiberties, RuleOfLaw]);
    assert_eq!(c.unknown_tags, vec!["sports".to_string()]);
}

#[test]
fn test_classify_empty_event() {
    let event = EventBuilder::new("a", "s", "").build();
    let c = classify(&event);
    assert!(c.dimensions.is_empty());
    assert!(c.unknown_tags.is_empty());
}
