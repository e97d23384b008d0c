use crate::fixture::CompetitionId;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnockoutStage {
    /// Continental knockout play-off between league-phase places 9-24
    Playoff,
    RoundOf32,
    RoundOf16,
    QuarterFinal,
    SemiFinal,
    Final,
}

const CUP_STAGES: [KnockoutStage; 5] = [
    KnockoutStage::RoundOf32,
    KnockoutStage::RoundOf16,
    KnockoutStage::QuarterFinal,
    KnockoutStage::SemiFinal,
    KnockoutStage::Final,
];

const CONTINENTAL_STAGES: [KnockoutStage; 5] = [
    KnockoutStage::Playoff,
    KnockoutStage::RoundOf16,
    KnockoutStage::QuarterFinal,
    KnockoutStage::SemiFinal,
    KnockoutStage::Final,
];

impl KnockoutStage {
    /// Stage order for a competition; leagues have no knockout.
    pub fn stages(competition: CompetitionId) -> &'static [KnockoutStage] {
        match competition {
            CompetitionId::Cup(_) => &CUP_STAGES,
            CompetitionId::Continental(_) => &CONTINENTAL_STAGES,
            CompetitionId::League(_) => &[],
        }
    }

    fn position(self, competition: CompetitionId) -> Option<usize> {
        Self::stages(competition).iter().position(|s| *s == self)
    }

    pub fn is_first(self, competition: CompetitionId) -> bool {
        self.position(competition) == Some(0)
    }

    pub fn next(self, competition: CompetitionId) -> Option<KnockoutStage> {
        let position = self.position(competition)?;
        Self::stages(competition).get(position + 1).copied()
    }

    pub fn previous(self, competition: CompetitionId) -> Option<KnockoutStage> {
        let position = self.position(competition)?;
        position.checked_sub(1).map(|p| Self::stages(competition)[p])
    }

    /// Whether `self` is played earlier than `other` in the competition.
    pub fn comes_before(self, other: KnockoutStage, competition: CompetitionId) -> bool {
        match (self.position(competition), other.position(competition)) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        }
    }

    /// Cup stage a field of `eligible` teams enters at, if it halves down
    /// to a final.
    pub fn cup_entry(eligible: usize) -> Option<KnockoutStage> {
        CUP_STAGES.iter().copied().find(|stage| stage.capacity() == eligible)
    }

    /// Participants the stage is drawn for.
    pub fn capacity(self) -> usize {
        match self {
            KnockoutStage::RoundOf32 => 32,
            KnockoutStage::Playoff | KnockoutStage::RoundOf16 => 16,
            KnockoutStage::QuarterFinal => 8,
            KnockoutStage::SemiFinal => 4,
            KnockoutStage::Final => 2,
        }
    }

    pub fn legs(self, competition: CompetitionId) -> usize {
        self.rounds(competition).len()
    }

    pub fn is_two_legged(self, competition: CompetitionId) -> bool {
        self.legs(competition) == 2
    }

    /// Round number of every leg, empty when the stage does not exist in
    /// the competition.
    pub fn rounds(self, competition: CompetitionId) -> &'static [u16] {
        match (competition, self) {
            (CompetitionId::Cup(_), KnockoutStage::RoundOf32) => &[100],
            (CompetitionId::Cup(_), KnockoutStage::RoundOf16) => &[101],
            (CompetitionId::Cup(_), KnockoutStage::QuarterFinal) => &[102],
            (CompetitionId::Cup(_), KnockoutStage::SemiFinal) => &[103],
            (CompetitionId::Cup(_), KnockoutStage::Final) => &[104],
            (CompetitionId::Continental(_), KnockoutStage::Playoff) => &[209, 210],
            (CompetitionId::Continental(_), KnockoutStage::RoundOf16) => &[211, 212],
            (CompetitionId::Continental(_), KnockoutStage::QuarterFinal) => &[213, 214],
            (CompetitionId::Continental(_), KnockoutStage::SemiFinal) => &[215, 216],
            (CompetitionId::Continental(_), KnockoutStage::Final) => &[217],
            _ => &[],
        }
    }
}

impl fmt::Display for KnockoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KnockoutStage::Playoff => "play-off",
            KnockoutStage::RoundOf32 => "round of 32",
            KnockoutStage::RoundOf16 => "round of 16",
            KnockoutStage::QuarterFinal => "quarter-final",
            KnockoutStage::SemiFinal => "semi-final",
            KnockoutStage::Final => "final",
        };

        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::CompetitionTier;

    const CUP: CompetitionId = CompetitionId::Cup(1);
    const CL: CompetitionId = CompetitionId::Continental(CompetitionTier::ChampionsLeague);

    #[test]
    fn stage_chains() {
        assert!(KnockoutStage::RoundOf32.is_first(CUP));
        assert!(KnockoutStage::Playoff.is_first(CL));
        assert_eq!(KnockoutStage::Playoff.next(CL), Some(KnockoutStage::RoundOf16));
        assert_eq!(KnockoutStage::RoundOf16.previous(CUP), Some(KnockoutStage::RoundOf32));
        assert_eq!(KnockoutStage::RoundOf16.previous(CL), Some(KnockoutStage::Playoff));
        assert_eq!(KnockoutStage::Final.next(CUP), None);
        assert_eq!(KnockoutStage::Playoff.next(CUP), None);
    }

    #[test]
    fn cup_entry_follows_field_size() {
        assert_eq!(KnockoutStage::cup_entry(32), Some(KnockoutStage::RoundOf32));
        assert_eq!(KnockoutStage::cup_entry(16), Some(KnockoutStage::RoundOf16));
        assert_eq!(KnockoutStage::cup_entry(8), Some(KnockoutStage::QuarterFinal));
        assert_eq!(KnockoutStage::cup_entry(2), Some(KnockoutStage::Final));
        assert_eq!(KnockoutStage::cup_entry(20), None);
        assert_eq!(KnockoutStage::cup_entry(36), None);
        assert_eq!(KnockoutStage::cup_entry(0), None);

        assert!(KnockoutStage::RoundOf32.comes_before(KnockoutStage::RoundOf16, CUP));
        assert!(!KnockoutStage::Final.comes_before(KnockoutStage::SemiFinal, CUP));
        assert!(!KnockoutStage::Playoff.comes_before(KnockoutStage::Final, CUP));
    }

    #[test]
    fn legs_per_competition() {
        assert!(!KnockoutStage::SemiFinal.is_two_legged(CUP));
        assert!(KnockoutStage::SemiFinal.is_two_legged(CL));
        assert_eq!(KnockoutStage::Final.legs(CL), 1);
        assert_eq!(KnockoutStage::Final.rounds(CL), &[217]);
        assert_eq!(KnockoutStage::RoundOf32.rounds(CUP), &[100]);
        assert!(KnockoutStage::RoundOf32.rounds(CL).is_empty());
    }
}
