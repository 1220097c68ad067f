use chrono::{Datelike, Local, NaiveDate};
use relman_core::{SchemeId, Tag};

use crate::segment::{Segment, SegmentValue, Segments};

fn short_year(date: NaiveDate) -> u32 {
    u32::try_from(date.year().rem_euclid(100)).unwrap_or(0)
}

fn current_short_year() -> u32 {
    short_year(Local::now().date_naive())
}

fn current_month() -> u32 {
    Local::now().date_naive().month()
}

fn current_day() -> u32 {
    Local::now().date_naive().day()
}

/// A policy for suggesting the next tag and describing a tag in prose.
///
/// The set of policies is closed and selected by a [`SchemeId`] that was
/// validated when the project configuration was loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersioningScheme {
    /// Plain incrementing segments: sprints, revisions and hotfixes.
    IncrementingSegments,
    /// Calendar tags of the form `vYY.M.D.N`, anchored to the date the
    /// scheme was instantiated.
    DateBased { today: NaiveDate },
}

impl VersioningScheme {
    /// Instantiates the scheme for an id, capturing the current date for
    /// the date-based variant.
    #[must_use]
    pub fn new(id: SchemeId) -> Self {
        match id {
            SchemeId::IncrementingSegments => Self::IncrementingSegments,
            SchemeId::DateBased => Self::DateBased {
                today: Local::now().date_naive(),
            },
        }
    }

    #[must_use]
    pub fn id(&self) -> SchemeId {
        match self {
            Self::IncrementingSegments => SchemeId::IncrementingSegments,
            Self::DateBased { .. } => SchemeId::DateBased,
        }
    }

    /// Suggested next tags, most specific first. The order is part of the
    /// contract: presentation layers show fix bumps before patch bumps
    /// before minor bumps.
    #[must_use]
    pub fn tag_suggestions(&self, current: &Tag) -> Vec<Tag> {
        match self {
            Self::IncrementingSegments => {
                let mut suggestions = Vec::with_capacity(3);
                if let Some(fix) = current.fix {
                    suggestions.push(Tag::new(current.major, current.minor, current.patch, Some(fix + 1)));
                }
                suggestions.push(Tag::new(current.major, current.minor, current.patch + 1, None));
                suggestions.push(Tag::new(current.major, current.minor + 1, 0, None));
                suggestions
            }
            Self::DateBased { today } => {
                let today_segments = (short_year(*today), today.month(), today.day());
                let suggestion = if (current.major, current.minor, current.patch) == today_segments {
                    Tag::new(
                        current.major,
                        current.minor,
                        current.patch,
                        Some(current.fix.unwrap_or(0) + 1),
                    )
                } else {
                    Tag::new(today_segments.0, today_segments.1, today_segments.2, Some(0))
                };
                vec![suggestion]
            }
        }
    }

    /// Human-readable description of a tag, used as the annotated tag
    /// message.
    #[must_use]
    pub fn tag_description(&self, tag: &Tag) -> String {
        match self {
            Self::IncrementingSegments => {
                let mut description = format!("Sprint {}", tag.minor);
                if tag.patch != 0 {
                    description.push_str(&format!(" revision {}", tag.patch));
                }
                if let Some(fix) = tag.fix {
                    description.push_str(&format!(" fix {fix}"));
                }
                description
            }
            Self::DateBased { today } => {
                // The century comes from the scheme's instantiation date,
                // the last two digits from the tag itself.
                let century = today.year().div_euclid(100);
                format!(
                    "{century}{:02}-{:02}-{:02} deployment {}",
                    tag.major,
                    tag.minor,
                    tag.patch,
                    tag.fix.unwrap_or(0)
                )
            }
        }
    }

    /// Segment descriptors driving input constraints for this scheme.
    #[must_use]
    pub fn segments(&self) -> Segments {
        match self {
            Self::IncrementingSegments => Segments {
                major: Segment {
                    label: "Major",
                    help_text: "",
                    required: true,
                    initial: Some(SegmentValue::Literal(1)),
                    min_value: Some(SegmentValue::Literal(1)),
                },
                minor: Segment {
                    label: "Minor",
                    help_text: "Bumped up when new sprint begins",
                    required: true,
                    initial: None,
                    min_value: Some(SegmentValue::Literal(0)),
                },
                patch: Segment {
                    label: "Patch",
                    help_text: "Enumerates consequent planned deployment during sprint",
                    required: true,
                    initial: Some(SegmentValue::Literal(0)),
                    min_value: Some(SegmentValue::Literal(0)),
                },
                fix: Segment {
                    label: "Fix",
                    help_text: "Optional segment used for hotfixes",
                    required: false,
                    initial: None,
                    min_value: Some(SegmentValue::Literal(0)),
                },
            },
            Self::DateBased { .. } => Segments {
                major: Segment {
                    label: "Year",
                    help_text: "Short year number, eg. 21 for 2021",
                    required: true,
                    initial: Some(SegmentValue::Computed(current_short_year)),
                    min_value: Some(SegmentValue::Literal(0)),
                },
                minor: Segment {
                    label: "Month",
                    help_text: "",
                    required: true,
                    initial: Some(SegmentValue::Computed(current_month)),
                    min_value: Some(SegmentValue::Literal(1)),
                },
                patch: Segment {
                    label: "Day",
                    help_text: "",
                    required: true,
                    initial: Some(SegmentValue::Computed(current_day)),
                    min_value: Some(SegmentValue::Literal(1)),
                },
                fix: Segment {
                    label: "Deployment",
                    help_text: "Enumerates consequent deployment during the day",
                    required: true,
                    initial: Some(SegmentValue::Literal(0)),
                    min_value: Some(SegmentValue::Literal(0)),
                },
            },
        }
    }
}
