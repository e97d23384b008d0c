use crate::team::builder::TeamBuilder;

pub const MAX_REPUTATION: f32 = 5.0;

/// The scheduling view of a team. Owned by the surrounding application;
/// the scheduler only reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub id: u32,
    pub name: String,
    /// 0.0 - 5.0
    pub reputation: f32,
    pub league_id: u32,
    pub country_id: u32,
    pub cup_banned: bool,
}

impl Team {
    pub fn builder() -> TeamBuilder {
        TeamBuilder::new()
    }

    pub fn is_cup_eligible(&self) -> bool {
        !self.cup_banned
    }
}

/// Orders teams strongest first, by reputation then id.
pub fn by_reputation_desc(a: &Team, b: &Team) -> std::cmp::Ordering {
    b.reputation
        .total_cmp(&a.reputation)
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_requires_id_and_name() {
        assert!(Team::builder().name("Nowhere".to_string()).build().is_err());
        assert!(Team::builder().id(1).build().is_err());
    }

    #[test]
    fn builder_clamps_reputation() {
        let team = Team::builder()
            .id(3)
            .name("Harbour Athletic".to_string())
            .reputation(7.5)
            .league_id(1)
            .build()
            .unwrap();

        assert_eq!(team.reputation, MAX_REPUTATION);
        assert!(team.is_cup_eligible());
    }

    #[test]
    fn reputation_ordering_breaks_ties_by_id() {
        let a = Team::builder().id(2).name("A".into()).reputation(3.0).build().unwrap();
        let b = Team::builder().id(1).name("B".into()).reputation(3.0).build().unwrap();
        let c = Team::builder().id(9).name("C".into()).reputation(4.0).build().unwrap();

        let mut teams = vec![a, b, c];
        teams.sort_by(by_reputation_desc);

        let ids: Vec<u32> = teams.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![9, 1, 2]);
    }
}
