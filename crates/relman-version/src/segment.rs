/// A default or minimum for a tag segment: either a fixed number or a
/// provider evaluated at the moment the value is needed.
///
/// Date-based defaults must reflect the current moment, so computed
/// values are never memoized.
#[derive(Debug, Clone, Copy)]
pub enum SegmentValue {
    Literal(u32),
    Computed(fn() -> u32),
}

impl SegmentValue {
    #[must_use]
    pub fn resolve(&self) -> u32 {
        match self {
            Self::Literal(value) => *value,
            Self::Computed(provider) => provider(),
        }
    }
}

/// Describes one segment of a tag for input validation purposes.
///
/// Carries no computation of its own; an external form layer honors the
/// constraints when collecting tag segments from a user.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    pub label: &'static str,
    pub help_text: &'static str,
    pub required: bool,
    pub initial: Option<SegmentValue>,
    pub min_value: Option<SegmentValue>,
}

/// The four segment descriptors of a versioning scheme.
#[derive(Debug, Clone, Copy)]
pub struct Segments {
    pub major: Segment,
    pub minor: Segment,
    pub patch: Segment,
    pub fix: Segment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_resolves_to_itself() {
        assert_eq!(SegmentValue::Literal(7).resolve(), 7);
    }

    #[test]
    fn computed_resolves_at_call_time() {
        let value = SegmentValue::Computed(|| 21);
        assert_eq!(value.resolve(), 21);
    }
}
