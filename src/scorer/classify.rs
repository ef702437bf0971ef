use crate::dimensions::Dimension::{
    self, CivilLiberties, Deliberation, ElectoralProcess, MediaFreedom, RuleOfLaw,
};
use crate::dimensions::DIMENSION_COUNT;
use crate::history::ReadEvent;

/// Category/topic tag -> dimensions it feeds. Keys are stored normalized
/// (see [`normalize_tag`]).
pub const TAG_TABLE: &[(&str, &[Dimension])] = &[
    // === MEDIA FREEDOM ===
    ("media", &[MediaFreedom]),
    ("press", &[MediaFreedom]),
    ("journalism", &[MediaFreedom]),
    ("independent-media", &[MediaFreedom]),
    ("press-freedom", &[MediaFreedom, CivilLiberties]),
    ("censorship", &[MediaFreedom, CivilLiberties]),
    ("misinformation", &[MediaFreedom, Deliberation]),
    ("fact-check", &[MediaFreedom, Deliberation]),
    ("transparency", &[MediaFreedom, RuleOfLaw]),
    // === ELECTORAL PROCESS ===
    ("election", &[ElectoralProcess]),
    ("elections", &[ElectoralProcess]),
    ("electoral", &[ElectoralProcess]),
    ("voting", &[ElectoralProcess]),
    ("ballot", &[ElectoralProcess]),
    ("campaign", &[ElectoralProcess]),
    ("referendum", &[ElectoralProcess]),
    ("voting-rights", &[ElectoralProcess, CivilLiberties]),
    ("redistricting", &[ElectoralProcess, RuleOfLaw]),
    ("parliament", &[ElectoralProcess, Deliberation]),
    // === CIVIL LIBERTIES ===
    ("civil-rights", &[CivilLiberties]),
    ("civil-liberties", &[CivilLiberties]),
    ("human-rights", &[CivilLiberties]),
    ("privacy", &[CivilLiberties]),
    ("protest", &[CivilLiberties]),
    ("discrimination", &[CivilLiberties]),
    ("immigration", &[CivilLiberties]),
    ("free-speech", &[CivilLiberties, MediaFreedom]),
    ("surveillance", &[CivilLiberties, RuleOfLaw]),
    // === RULE OF LAW ===
    ("law", &[RuleOfLaw]),
    ("legal", &[RuleOfLaw]),
    ("justice", &[RuleOfLaw]),
    ("corruption", &[RuleOfLaw]),
    ("judiciary", &[RuleOfLaw, CivilLiberties]),
    ("judicial", &[RuleOfLaw, CivilLiberties]),
    ("courts", &[RuleOfLaw, CivilLiberties]),
    ("supreme-court", &[RuleOfLaw, CivilLiberties]),
    ("constitution", &[RuleOfLaw, CivilLiberties]),
    // === DELIBERATION ===
    ("politics", &[Deliberation]),
    ("policy", &[Deliberation]),
    ("opinion", &[Deliberation]),
    ("op-ed", &[Deliberation]),
    ("editorial", &[Deliberation]),
    ("analysis", &[Deliberation]),
    ("community", &[Deliberation]),
    ("debate", &[Deliberation, ElectoralProcess]),
    ("town-hall", &[Deliberation, ElectoralProcess]),
];

/// Lowercase, trim, drop a leading `#`, and join words with `-`
/// (`"Press_Freedom"`, `"press freedom"` and `"#press-freedom"` all match).
pub fn normalize_tag(tag: &str) -> String {
    let trimmed = tag.trim().trim_start_matches('#');
    let mut out = String::with_capacity(trimmed.len());
    let mut pending_sep = false;
    for c in trimmed.chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            pending_sep = !out.is_empty();
            continue;
        }
        if pending_sep {
            out.push('-');
            pending_sep = false;
        }
        out.extend(c.to_lowercase());
    }
    out
}

pub fn dimensions_for_tag(tag: &str) -> Option<&'static [Dimension]> {
    let key = normalize_tag(tag);
    TAG_TABLE
        .iter()
        .find(|(t, _)| *t == key)
        .map(|(_, dims)| *dims)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DimensionSet([bool; DIMENSION_COUNT]);

impl DimensionSet {
    pub fn insert(&mut self, dim: Dimension) {
        self.0[dim.index()] = true;
    }

    pub fn contains(&self, dim: Dimension) -> bool {
        self.0[dim.index()]
    }

    pub fn is_empty(&self) -> bool {
        !self.0.iter().any(|&b| b)
    }

    pub fn len(&self) -> usize {
        self.0.iter().filter(|&&b| b).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = Dimension> + '_ {
        Dimension::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub dimensions: DimensionSet,
    pub unknown_tags: Vec<String>,
}

/// Maps an event onto every dimension any of its tags feeds. An event
/// counts at most once per dimension however many tags overlap.
pub fn classify(event: &ReadEvent) -> Classification {
    let mut out = Classification::default();
    for tag in event.tags() {
        match dimensions_for_tag(tag) {
            Some(dims) => {
                for &d in dims {
                    out.dimensions.insert(d);
                }
            }
            None => out.unknown_tags.push(normalize_tag(tag)),
        }
    }
    out
}
