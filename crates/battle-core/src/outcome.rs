//! Discrete outcome tiers for resolved actions.

/// How well a resolved action went, from "no roll happened" up to a critical
/// success. The declaration order is the comparison order: `None` sorts below
/// every real outcome and `CriticalSuccess` above everything else.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DegreeOfSuccess {
    /// No outcome was produced (the action never rolled).
    #[default]
    None,
    CriticalFailure,
    Failure,
    Success,
    CriticalSuccess,
}

impl DegreeOfSuccess {
    /// True only for [`Success`](Self::Success) and
    /// [`CriticalSuccess`](Self::CriticalSuccess).
    pub const fn at_least_successful(self) -> bool {
        matches!(self, Self::Success | Self::CriticalSuccess)
    }

    /// True only for [`Failure`](Self::Failure) and
    /// [`CriticalFailure`](Self::CriticalFailure).
    pub const fn at_best_failure(self) -> bool {
        matches!(self, Self::Failure | Self::CriticalFailure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [DegreeOfSuccess; 5] = [
        DegreeOfSuccess::None,
        DegreeOfSuccess::CriticalFailure,
        DegreeOfSuccess::Failure,
        DegreeOfSuccess::Success,
        DegreeOfSuccess::CriticalSuccess,
    ];

    #[test]
    fn predicates_are_mutually_exclusive() {
        for degree in ALL {
            assert!(
                !(degree.at_least_successful() && degree.at_best_failure()),
                "{degree} claims to be both a success and a failure"
            );
        }
    }

    #[test]
    fn none_satisfies_neither_predicate() {
        assert!(!DegreeOfSuccess::None.at_least_successful());
        assert!(!DegreeOfSuccess::None.at_best_failure());
    }

    #[test]
    fn ordering_follows_declaration() {
        for pair in ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert!(DegreeOfSuccess::CriticalSuccess > DegreeOfSuccess::Success);
        assert!(DegreeOfSuccess::None < DegreeOfSuccess::CriticalFailure);
    }
}
