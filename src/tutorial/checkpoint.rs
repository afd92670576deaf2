use serde::{Deserialize, Serialize};

use crate::core::Settlement;
use crate::model::{Anchor, Building, Feature, ResourceKind, Role, Tab};

use super::popup::PopupRequest;

/// Tutorial checkpoints, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Checkpoint {
    Resource,
    Tent,
    Assign,
    Pier,
    Chaos,
    Stone,
    Smithy,
    Academy,
    Mentor,
    Manager,
}

impl Checkpoint {
    pub const ALL: [Self; 10] = [
        Self::Resource,
        Self::Tent,
        Self::Assign,
        Self::Pier,
        Self::Chaos,
        Self::Stone,
        Self::Smithy,
        Self::Academy,
        Self::Mentor,
        Self::Manager,
    ];

    pub fn canonical_name(self) -> &'static str {
        match self {
            Self::Resource => "resource",
            Self::Tent => "tent",
            Self::Assign => "assign",
            Self::Pier => "pier",
            Self::Chaos => "chaos",
            Self::Stone => "stone",
            Self::Smithy => "smithy",
            Self::Academy => "academy",
            Self::Mentor => "mentor",
            Self::Manager => "manager",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|checkpoint| checkpoint.canonical_name() == name)
    }

    pub fn is_met(self, settlement: &Settlement) -> bool {
        let wood = settlement.resources.amount(ResourceKind::Wood);
        let food = settlement.resources.amount(ResourceKind::Food);
        match self {
            Self::Resource => wood >= 4.0,
            Self::Tent => wood >= 10.0 && food >= 10.0,
            Self::Assign => settlement.level(Building::Tent) >= 1,
            Self::Pier => settlement.level(Building::Pier) >= 1,
            Self::Chaos => settlement.chaos(Role::Fisherman) > 0.0,
            Self::Stone => settlement.level(Building::Quarry) >= 1,
            Self::Smithy => settlement.level(Building::Smithy) >= 1,
            Self::Academy => settlement.level(Building::Academy) >= 1,
            Self::Mentor => settlement.is_unlocked(Feature::Mentor),
            Self::Manager => settlement.is_unlocked(Feature::Manager),
        }
    }

    pub fn popup(self) -> PopupRequest {
        let (text, anchor, tab) = match self {
            Self::Resource => (
                "Your current resource stocks are shown here.",
                Anchor::Warehouse,
                None,
            ),
            Self::Tent => (
                "Nice! You have enough to build your first tent. It will invite two \
                 villagers to your settlement, who will start working as lumberjacks \
                 and produce wood for you. Click \"Build a tent\" in the upgrade list \
                 to get started.",
                Anchor::Craft,
                None,
            ),
            Self::Assign => (
                "With a tent up, two lumberjacks now live in your village; you can see \
                 them in the newly unlocked Assign tab. Head back to the Craft tab to \
                 see whether you can build a fishing pier, and craft anything else \
                 useful along the way!",
                Anchor::Assign,
                Some(Tab::Assign),
            ),
            Self::Pier => (
                "Now that the pier is built you can assign villagers as fishermen, who \
                 produce food over time. Use the + and - buttons to change assignments. \
                 Anyone left unassigned keeps gathering wood for you.",
                Anchor::Assign,
                Some(Tab::Assign),
            ),
            Self::Chaos => (
                "Uh oh! Two villagers are working the pier at once and they keep getting \
                 in each other's way. The more villagers share a workplace, the more \
                 chaotic it gets and the slower they work. The Chaos column shows how \
                 much they are slowed down; keep it low to get the most from your village.",
                Anchor::Assign,
                None,
            ),
            Self::Stone => (
                "With the quarry built you have unlocked a new resource! Assign miners \
                 to start gathering stone. Upgrading your buildings may reveal new \
                 crafts as well...",
                Anchor::Warehouse,
                None,
            ),
            Self::Smithy => (
                "Noticed how crafting takes longer and longer? Assign blacksmiths to \
                 help and it will speed up considerably. The speed bonus is shown next \
                 to your resources.",
                Anchor::Warehouse,
                None,
            ),
            Self::Academy => (
                "The village academy is open! A whole new kind of upgrade, research, is \
                 available in the new Research tab. Professors speed up research the \
                 same way blacksmiths speed up crafting.",
                Anchor::Research,
                Some(Tab::Research),
            ),
            Self::Mentor => (
                "Congratulations! You can now assign mentors to every job. Mentors work \
                 better than regular villagers and take apprentices; each mentor and \
                 apprentice pair counts as one person for chaos, so workplaces can grow \
                 without descending into mismanagement.",
                Anchor::Assign,
                Some(Tab::Assign),
            ),
            Self::Manager => (
                "The cutting edge of team management. Managers produce nothing \
                 themselves, but the more of them a team has, the less chaotic it gets. \
                 The potential is limitless! Soon you may be able to deal with that \
                 monolith on the horizon...",
                Anchor::Assign,
                Some(Tab::Assign),
            ),
        };

        PopupRequest {
            checkpoint: Some(self),
            text: text.to_string(),
            anchor: Some(anchor),
            activate_tab: tab,
        }
    }
}
