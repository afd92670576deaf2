use bevy::prelude::*;
use village_progression::{
    Anchor, Category, GameConfig, PopupRequest, PopupSchedule, ProgressionEngine, ResourceKind,
    Role, Settlement, Tab, TutorialController,
};

pub const SHROUD_Z: i32 = 900;
pub const ANCHOR_Z: i32 = 1000;
pub const STORY_Z: i32 = 1500;
pub const POPUP_Z: i32 = 2000;

#[derive(Resource, Debug, Clone, Default)]
pub struct RuntimeConfig(pub GameConfig);

#[derive(Resource, Debug)]
pub struct SessionState {
    pub settlement: Settlement,
    pub engine: ProgressionEngine,
    pub tutorial: TutorialController,
    pub popups: PopupSchedule,
    pub tick_timer: Timer,
    pub last_save_message: Option<String>,
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ActiveTab(pub Tab);

/// Pop-up currently on screen. At most one is shown at a time; later due
/// requests wait in the schedule until it is dismissed.
#[derive(Resource, Debug, Default)]
pub struct ActivePopup(pub Option<ShownPopup>);

#[derive(Debug)]
pub struct ShownPopup {
    pub request: PopupRequest,
    pub root: Entity,
    pub shroud: Entity,
    pub anchor: Option<ElevatedAnchor>,
}

/// Anchor raised above the shroud, with the stacking it had before.
#[derive(Debug, Clone, Copy)]
pub struct ElevatedAnchor {
    pub entity: Entity,
    pub previous_z: Option<GlobalZIndex>,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub enum UiAction {
    Purchase(String),
    Assign(Role),
    Unassign(Role),
    Gather(ResourceKind),
    SelectTab(Tab),
    DismissPopup,
    AcknowledgeStory,
}

/// Marks a subtree whose buttons ignore clicks.
#[derive(Component, Debug, Clone, Copy)]
pub struct Inert;

#[derive(Component, Debug, Clone, Copy)]
pub struct AnchorRegion(pub Anchor);

#[derive(Component, Debug, Clone, Copy)]
pub struct TabButton(pub Tab);

#[derive(Component, Debug, Clone, Copy)]
pub struct TabPanel(pub Tab);

/// Upgrade list for one shop category. `shown` is the last rendered listing
/// so the buttons are only rebuilt when it changes.
#[derive(Component, Debug, Clone)]
pub struct ShopList {
    pub category: Category,
    pub shown: Vec<(String, bool, u32)>,
}

#[derive(Component, Debug, Clone)]
pub struct ShopButton(pub String);

#[derive(Component, Debug, Clone, Copy)]
pub struct RoleRow(pub Role);

#[derive(Component, Debug, Clone, Copy)]
pub struct RoleText(pub Role);

#[derive(Component, Debug, Clone, Copy)]
pub struct RoleButton {
    pub role: Role,
    pub assign: bool,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct GatherButton(pub ResourceKind);

#[derive(Component)]
pub struct HudText;

#[derive(Component)]
pub struct ResourceText;

#[derive(Component)]
pub struct LogText;

#[derive(Component)]
pub struct StoryOverlay;

#[derive(Component)]
pub struct StoryText;

#[derive(Component)]
pub struct StoryButton;

#[derive(Component)]
pub struct StoryButtonLabel;

#[derive(Component)]
pub struct PopupRoot;

#[derive(Component)]
pub struct PopupDismiss;
