use bevy::prelude::*;
use bevy::ui::FocusPolicy;
use village_progression::{ScreenRect, ScreenSize, place_in_viewport};

use super::resources::{
    ANCHOR_Z, ActivePopup, ActiveTab, AnchorRegion, ElevatedAnchor, Inert, POPUP_Z, PopupDismiss,
    PopupRoot, RuntimeConfig, SHROUD_Z, SessionState, ShownPopup, UiAction,
};

const POPUP_WIDTH: f32 = 320.0;

/// Shows the next due tutorial pop-up once the previous one is dismissed.
pub fn show_next_popup(
    mut commands: Commands,
    time: Res<Time>,
    mut session: ResMut<SessionState>,
    mut active: ResMut<ActivePopup>,
    mut tab: ResMut<ActiveTab>,
    anchors: Query<(Entity, &AnchorRegion, Option<&GlobalZIndex>)>,
) {
    if active.0.is_some() {
        return;
    }
    let Some(request) = session.popups.pop_due(time.elapsed()) else {
        return;
    };
    info!("showing tutorial pop-up {:?}", request.checkpoint);

    if let Some(activate) = request.activate_tab {
        tab.0 = activate;
    }

    let shroud = commands
        .spawn((
            Name::new("PopupShroud"),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
            FocusPolicy::Block,
            GlobalZIndex(SHROUD_Z),
        ))
        .id();

    let anchor = request.anchor.and_then(|wanted| {
        anchors
            .iter()
            .find(|(_, region, _)| region.0 == wanted)
            .map(|(entity, _, previous_z)| {
                commands.entity(entity).insert((GlobalZIndex(ANCHOR_Z), Inert));
                ElevatedAnchor {
                    entity,
                    previous_z: previous_z.copied(),
                }
            })
    });

    let root = commands
        .spawn((
            Name::new("TutorialPopup"),
            PopupRoot,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Px(POPUP_WIDTH),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(10.0),
                padding: UiRect::all(Val::Px(14.0)),
                ..default()
            },
            BackgroundColor(Color::srgb(0.96, 0.93, 0.84)),
            GlobalZIndex(POPUP_Z),
            // Hidden until it has been measured and placed.
            Visibility::Hidden,
        ))
        .with_children(|popup| {
            popup.spawn((
                Text::new(request.text.clone()),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.12, 0.1, 0.08)),
            ));
            popup
                .spawn((
                    Button,
                    PopupDismiss,
                    Node {
                        align_self: AlignSelf::FlexEnd,
                        padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.3, 0.45, 0.3)),
                ))
                .with_child((
                    Text::new("Got it"),
                    TextFont {
                        font_size: 15.0,
                        ..default()
                    },
                ));
        })
        .id();

    active.0 = Some(ShownPopup {
        request,
        root,
        shroud,
        anchor,
    });
}

/// Re-measures the anchor and the pop-up every frame and moves the pop-up
/// next to the anchor. Uses the previous frame's layout, so a new pop-up stays
/// hidden for one frame until it has a size.
pub fn place_active_popup(
    active: Res<ActivePopup>,
    config: Res<RuntimeConfig>,
    windows: Query<&Window>,
    mut popups: Query<(&mut Node, &ComputedNode, &mut Visibility), With<PopupRoot>>,
    anchors: Query<(&ComputedNode, &GlobalTransform), Without<PopupRoot>>,
) {
    let Some(shown) = &active.0 else {
        return;
    };
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((mut node, computed, mut visibility)) = popups.get_mut(shown.root) else {
        return;
    };

    let scale = f64::from(window.scale_factor());
    let popup_size = computed.size();
    if popup_size.x <= 0.0 || popup_size.y <= 0.0 {
        return;
    }
    let popup = ScreenSize::new(
        f64::from(popup_size.x) / scale,
        f64::from(popup_size.y) / scale,
    );
    let viewport = ScreenSize::new(f64::from(window.width()), f64::from(window.height()));

    let target = shown
        .anchor
        .and_then(|anchor| anchors.get(anchor.entity).ok())
        .and_then(|(computed, transform)| screen_rect(computed, transform, scale));

    let point = place_in_viewport(target, popup, viewport, config.0.popup_margin);
    node.left = Val::Px(point.left as f32);
    node.top = Val::Px(point.top as f32);
    *visibility = Visibility::Inherited;
}

/// Logical-pixel rectangle of a laid-out node, or `None` while it has no
/// size (for example on a hidden tab).
fn screen_rect(computed: &ComputedNode, transform: &GlobalTransform, scale: f64) -> Option<ScreenRect> {
    let size = computed.size();
    if size.x <= 0.0 || size.y <= 0.0 {
        return None;
    }
    let center = transform.translation();
    let width = f64::from(size.x) / scale;
    let height = f64::from(size.y) / scale;
    Some(ScreenRect::new(
        f64::from(center.x) / scale - width / 2.0,
        f64::from(center.y) / scale - height / 2.0,
        width,
        height,
    ))
}

pub fn dismiss_popup(
    mut commands: Commands,
    mut actions: EventReader<UiAction>,
    mut active: ResMut<ActivePopup>,
) {
    let dismissed = actions
        .read()
        .fold(false, |seen, action| seen || *action == UiAction::DismissPopup);
    if !dismissed {
        return;
    }
    if let Some(shown) = active.0.take() {
        close_popup(&mut commands, shown);
    }
}

/// Removes a shown pop-up and its shroud and puts the anchor back the way
/// it was.
pub(super) fn close_popup(commands: &mut Commands, shown: ShownPopup) {
    commands.entity(shown.root).despawn_recursive();
    commands.entity(shown.shroud).despawn_recursive();
    if let Some(anchor) = shown.anchor {
        let mut entity = commands.entity(anchor.entity);
        entity.remove::<Inert>();
        match anchor.previous_z {
            Some(z) => {
                entity.insert(z);
            }
            None => {
                entity.remove::<GlobalZIndex>();
            }
        }
    }
    debug!("closed tutorial pop-up {:?}", shown.request.checkpoint);
}
