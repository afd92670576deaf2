use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Wood,
    Food,
    Stone,
}

impl ResourceKind {
    pub const ALL: [Self; 3] = [Self::Wood, Self::Food, Self::Stone];

    pub fn canonical_name(self) -> &'static str {
        match self {
            Self::Wood => "wood",
            Self::Food => "food",
            Self::Stone => "stone",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.canonical_name() == name)
    }
}

/// Buildings whose level gates upgrades and tutorial checkpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Building {
    Tent,
    Pier,
    Quarry,
    Smithy,
    Academy,
}

impl Building {
    pub const ALL: [Self; 5] = [
        Self::Tent,
        Self::Pier,
        Self::Quarry,
        Self::Smithy,
        Self::Academy,
    ];

    pub fn canonical_name(self) -> &'static str {
        match self {
            Self::Tent => "tent",
            Self::Pier => "pier",
            Self::Quarry => "quarry",
            Self::Smithy => "smithy",
            Self::Academy => "academy",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|building| building.canonical_name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Lumberjack,
    Fisherman,
    Miner,
    Blacksmith,
    Professor,
}

impl Role {
    pub const ALL: [Self; 5] = [
        Self::Lumberjack,
        Self::Fisherman,
        Self::Miner,
        Self::Blacksmith,
        Self::Professor,
    ];

    pub fn canonical_name(self) -> &'static str {
        match self {
            Self::Lumberjack => "lumberjack",
            Self::Fisherman => "fisherman",
            Self::Miner => "miner",
            Self::Blacksmith => "blacksmith",
            Self::Professor => "professor",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.canonical_name() == name)
    }

    /// Resource gathered by workers in this role, if any.
    pub fn output(self) -> Option<ResourceKind> {
        match self {
            Self::Lumberjack => Some(ResourceKind::Wood),
            Self::Fisherman => Some(ResourceKind::Food),
            Self::Miner => Some(ResourceKind::Stone),
            Self::Blacksmith | Self::Professor => None,
        }
    }

    /// Unlock needed before villagers can be assigned to this role.
    /// Lumberjacks are the default job and never need one.
    pub fn required_feature(self) -> Option<Feature> {
        match self {
            Self::Lumberjack => None,
            Self::Fisherman => Some(Feature::Fisherman),
            Self::Miner => Some(Feature::Miner),
            Self::Blacksmith => Some(Feature::Blacksmith),
            Self::Professor => Some(Feature::Professor),
        }
    }
}

/// One-way unlock flags set by upgrade effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Assign,
    Income,
    Fisherman,
    Stone,
    Miner,
    Blacksmith,
    CraftSpeed,
    Professor,
    Research,
    ResearchSpeed,
    Mentor,
    Manager,
}

impl Feature {
    pub const ALL: [Self; 12] = [
        Self::Assign,
        Self::Income,
        Self::Fisherman,
        Self::Stone,
        Self::Miner,
        Self::Blacksmith,
        Self::CraftSpeed,
        Self::Professor,
        Self::Research,
        Self::ResearchSpeed,
        Self::Mentor,
        Self::Manager,
    ];

    pub fn canonical_name(self) -> &'static str {
        match self {
            Self::Assign => "assign",
            Self::Income => "income",
            Self::Fisherman => "fisherman",
            Self::Stone => "stone",
            Self::Miner => "miner",
            Self::Blacksmith => "blacksmith",
            Self::CraftSpeed => "craft_speed",
            Self::Professor => "professor",
            Self::Research => "research",
            Self::ResearchSpeed => "research_speed",
            Self::Mentor => "mentor",
            Self::Manager => "manager",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|feature| feature.canonical_name() == name)
    }
}

/// Shop list and work lane an upgrade is routed to. Crafts and research
/// each finish one at a time, independently of the other lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Craft,
    Research,
}

impl Category {
    pub const ALL: [Self; 2] = [Self::Craft, Self::Research];

    pub fn canonical_name(self) -> &'static str {
        match self {
            Self::Craft => "craft",
            Self::Research => "research",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.canonical_name() == name)
    }

    /// Job that shortens work in this lane once `speed_feature` is owned.
    pub fn crew(self) -> Role {
        match self {
            Self::Craft => Role::Blacksmith,
            Self::Research => Role::Professor,
        }
    }

    pub fn speed_feature(self) -> Feature {
        match self {
            Self::Craft => Feature::CraftSpeed,
            Self::Research => Feature::ResearchSpeed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Craft,
    Assign,
    Research,
}

impl Tab {
    pub const ALL: [Self; 3] = [Self::Craft, Self::Assign, Self::Research];

    pub fn canonical_name(self) -> &'static str {
        match self {
            Self::Craft => "craft",
            Self::Assign => "assign",
            Self::Research => "research",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.canonical_name() == name)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Craft => "Craft",
            Self::Assign => "Assign",
            Self::Research => "Research",
        }
    }

    /// Unlock that makes the tab button visible.
    pub fn required_feature(self) -> Option<Feature> {
        match self {
            Self::Craft => None,
            Self::Assign => Some(Feature::Assign),
            Self::Research => Some(Feature::Research),
        }
    }
}

/// UI regions a tutorial pop-up can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    Warehouse,
    Craft,
    Assign,
    Research,
}

impl Anchor {
    pub const ALL: [Self; 4] = [Self::Warehouse, Self::Craft, Self::Assign, Self::Research];

    pub fn canonical_name(self) -> &'static str {
        match self {
            Self::Warehouse => "warehouse",
            Self::Craft => "craft",
            Self::Assign => "assign",
            Self::Research => "research",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|anchor| anchor.canonical_name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::{Anchor, Building, Category, Feature, ResourceKind, Role, Tab};

    #[test]
    fn names_round_trip_through_from_name() {
        for kind in ResourceKind::ALL {
            assert_eq!(ResourceKind::from_name(kind.canonical_name()), Some(kind));
        }
        for building in Building::ALL {
            assert_eq!(Building::from_name(building.canonical_name()), Some(building));
        }
        for feature in Feature::ALL {
            assert_eq!(Feature::from_name(feature.canonical_name()), Some(feature));
        }
        for role in Role::ALL {
            assert_eq!(Role::from_name(role.canonical_name()), Some(role));
        }
        for category in Category::ALL {
            assert_eq!(Category::from_name(category.canonical_name()), Some(category));
        }
        for tab in Tab::ALL {
            assert_eq!(Tab::from_name(tab.canonical_name()), Some(tab));
        }
        for anchor in Anchor::ALL {
            assert_eq!(Anchor::from_name(anchor.canonical_name()), Some(anchor));
        }
        assert_eq!(Role::from_name("quarryman"), None);
    }

    #[test]
    fn serde_names_match_canonical_names() {
        let json = serde_json::to_string(&Feature::CraftSpeed).expect("feature should serialize");
        assert_eq!(json, "\"craft_speed\"");
        let building: Building = serde_json::from_str("\"quarry\"").expect("building should parse");
        assert_eq!(building, Building::Quarry);
    }
}
