//! Static skill catalog used when rendering unlock notifications.

/// Display metadata for an unlockable skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skill {
    pub id: &'static str,
    pub title: &'static str,
    pub blurb: &'static str,
}

/// Every skill the shipped campaign can unlock. Content may name ids
/// outside this table; those still unlock and render generically.
pub const SKILLS: &[Skill] = &[
    Skill {
        id: "risk_management",
        title: "🛡️ Risk Management",
        blurb: "Better position sizing, lower liquidation risk",
    },
    Skill {
        id: "due_diligence",
        title: "🔍 Due Diligence",
        blurb: "Spot scams and fake platforms easier",
    },
    Skill {
        id: "scam_detection",
        title: "🚨 Scam Detection",
        blurb: "Immune to most crypto scams",
    },
    Skill {
        id: "emotional_control",
        title: "🧘 Emotional Control",
        blurb: "Resist panic selling and FOMO",
    },
    Skill {
        id: "backup_discipline",
        title: "🔐 Backup Discipline",
        blurb: "Never lose keys to technical failures",
    },
    Skill {
        id: "wealth_preservation",
        title: "💎 Wealth Preservation",
        blurb: "Resist lifestyle inflation",
    },
    Skill {
        id: "portfolio_management",
        title: "📊 Portfolio Management",
        blurb: "Proper diversification skills",
    },
    Skill {
        id: "community_leader",
        title: "👥 Community Leader",
        blurb: "Respected voice in the nomad community",
    },
    Skill {
        id: "security_expert",
        title: "🔒 Security Expert",
        blurb: "Help others with Bitcoin security",
    },
    Skill {
        id: "life_priorities",
        title: "❤️ Life Priorities",
        blurb: "Know when family matters more than money",
    },
];

/// Catalog lookup by skill id.
#[must_use]
pub fn describe(skill_id: &str) -> Option<&'static Skill> {
    SKILLS.iter().find(|skill| skill.id == skill_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lookup() {
        assert_eq!(describe("due_diligence").map(|s| s.title), Some("🔍 Due Diligence"));
        assert!(describe("unknown_skill").is_none());
    }

    #[test]
    fn catalog_ids_are_unique() {
        for (index, skill) in SKILLS.iter().enumerate() {
            assert!(
                SKILLS[index + 1..].iter().all(|other| other.id != skill.id),
                "duplicate skill id {}",
                skill.id
            );
        }
    }
}
