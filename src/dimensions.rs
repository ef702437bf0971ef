use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Upper bound of every dimension and of the overall score.
pub const FULL_MARK: u8 = 100;

/// Overall score of the neutral profile (mean of the dimension baselines).
pub const NEUTRAL_OVERALL: u8 = 75;

pub const DIMENSION_COUNT: usize = 5;

/// The five axes of democratic engagement.
///
/// Declaration order is the chart order: the radar legend relies on it being
/// stable, so new variants go at the end.
#[derive(
    Debug,
    Clone,
    Copy,
    EnumIter,
    EnumString,
    Display,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive)]
pub enum Dimension {
    #[strum(
        to_string = "Media Freedom",
        serialize = "media_freedom",
        serialize = "mediaFreedom"
    )]
    MediaFreedom,
    #[strum(
        to_string = "Electoral Process",
        serialize = "electoral_process",
        serialize = "electoralProcess"
    )]
    ElectoralProcess,
    #[strum(
        to_string = "Civil Liberties",
        serialize = "civil_liberties",
        serialize = "civilLiberties"
    )]
    CivilLiberties,
    #[strum(
        to_string = "Rule of Law",
        serialize = "rule_of_law",
        serialize = "ruleOfLaw"
    )]
    RuleOfLaw,
    #[strum(to_string = "Deliberation", serialize = "deliberation")]
    Deliberation,
}

impl Dimension {
    pub const ALL: [Dimension; DIMENSION_COUNT] = [
        Dimension::MediaFreedom,
        Dimension::ElectoralProcess,
        Dimension::CivilLiberties,
        Dimension::RuleOfLaw,
        Dimension::Deliberation,
    ];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Wire key used by the score consumer (`dimensions.mediaFreedom`, ...).
    pub fn key(self) -> &'static str {
        match self {
            Self::MediaFreedom => "mediaFreedom",
            Self::ElectoralProcess => "electoralProcess",
            Self::CivilLiberties => "civilLiberties",
            Self::RuleOfLaw => "ruleOfLaw",
            Self::Deliberation => "deliberation",
        }
    }

    /// Tooltip text shown next to the dimension on the chart.
    pub fn description(self) -> &'static str {
        match self {
            Self::MediaFreedom => "Your engagement with diverse and independent news sources",
            Self::ElectoralProcess => "Your understanding of electoral systems and participation",
            Self::CivilLiberties => "Your awareness of civil rights issues and discourse",
            Self::RuleOfLaw => "Your engagement with legal and judicial news",
            Self::Deliberation => "Your participation in balanced political discussions",
        }
    }

    /// Neutral baseline for a dimension with no supporting events.
    ///
    /// This is also the default chart state shown before any history loads.
    pub fn baseline(self) -> u8 {
        match self {
            Self::MediaFreedom => 80,
            Self::ElectoralProcess => 65,
            Self::CivilLiberties => 75,
            Self::RuleOfLaw => 70,
            Self::Deliberation => 85,
        }
    }

    /// Dimensions that reward reading across the political spectrum.
    pub fn rewards_balance(self) -> bool {
        matches!(self, Self::MediaFreedom | Self::Deliberation)
    }
}

pub fn baseline_profile() -> [u8; DIMENSION_COUNT] {
    let mut out = [0u8; DIMENSION_COUNT];
    for dim in Dimension::iter() {
        out[dim.index()] = dim.baseline();
    }
    out
}
