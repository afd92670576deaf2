use bevy::prelude::*;
use village_progression::Tab;

use super::resources::{
    GatherButton, Inert, PopupDismiss, RoleButton, ShopButton, StoryButton, TabButton, UiAction,
};
use super::state::SimRunState;

type Pressed<'a, T> = (Entity, &'a Interaction, &'a T);

pub fn handle_keyboard_controls(
    keys: Res<ButtonInput<KeyCode>>,
    run_state: Res<State<SimRunState>>,
    mut next_run_state: ResMut<NextState<SimRunState>>,
    mut actions: EventWriter<UiAction>,
) {
    if keys.just_pressed(KeyCode::Digit1) {
        actions.send(UiAction::SelectTab(Tab::Craft));
    }
    if keys.just_pressed(KeyCode::Digit2) {
        actions.send(UiAction::SelectTab(Tab::Assign));
    }
    if keys.just_pressed(KeyCode::Digit3) {
        actions.send(UiAction::SelectTab(Tab::Research));
    }

    if keys.just_pressed(KeyCode::Space) || keys.just_pressed(KeyCode::KeyP) {
        let next = match run_state.get() {
            SimRunState::Running => SimRunState::Paused,
            SimRunState::Paused => SimRunState::Running,
        };
        next_run_state.set(next);
    }
}

/// Turns button presses into [`UiAction`]s. Buttons inside an [`Inert`]
/// subtree are ignored.
#[allow(clippy::too_many_arguments)]
pub fn emit_button_actions(
    shop: Query<Pressed<ShopButton>, Changed<Interaction>>,
    roles: Query<Pressed<RoleButton>, Changed<Interaction>>,
    gather: Query<Pressed<GatherButton>, Changed<Interaction>>,
    tabs: Query<Pressed<TabButton>, Changed<Interaction>>,
    dismiss: Query<Pressed<PopupDismiss>, Changed<Interaction>>,
    story: Query<Pressed<StoryButton>, Changed<Interaction>>,
    inert: Query<(), With<Inert>>,
    parents: Query<&Parent>,
    mut actions: EventWriter<UiAction>,
) {
    let clickable = |entity: Entity, interaction: &Interaction| {
        *interaction == Interaction::Pressed
            && !inert.contains(entity)
            && !parents
                .iter_ancestors(entity)
                .any(|ancestor| inert.contains(ancestor))
    };

    for (entity, interaction, button) in &shop {
        if clickable(entity, interaction) {
            actions.send(UiAction::Purchase(button.0.clone()));
        }
    }
    for (entity, interaction, button) in &roles {
        if clickable(entity, interaction) {
            actions.send(if button.assign {
                UiAction::Assign(button.role)
            } else {
                UiAction::Unassign(button.role)
            });
        }
    }
    for (entity, interaction, button) in &gather {
        if clickable(entity, interaction) {
            actions.send(UiAction::Gather(button.0));
        }
    }
    for (entity, interaction, button) in &tabs {
        if clickable(entity, interaction) {
            actions.send(UiAction::SelectTab(button.0));
        }
    }
    for (entity, interaction, _) in &dismiss {
        if clickable(entity, interaction) {
            actions.send(UiAction::DismissPopup);
        }
    }
    for (entity, interaction, _) in &story {
        if clickable(entity, interaction) {
            actions.send(UiAction::AcknowledgeStory);
        }
    }
}
