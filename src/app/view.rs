use bevy::prelude::*;
use bevy::ui::FocusPolicy;
use village_progression::{
    Anchor, Category, Cost, Feature, LogCategory, ResourceKind, Role, Settlement, Tab,
    UpgradeSummary,
};

use super::resources::{
    ActiveTab, AnchorRegion, GatherButton, HudText, LogText, ResourceText, RoleButton, RoleRow,
    RoleText, STORY_Z, SessionState, ShopButton, ShopList, StoryButton, StoryButtonLabel,
    StoryOverlay, StoryText, TabButton, TabPanel, UiAction,
};
use super::state::SimRunState;

const PANEL_COLOR: Color = Color::srgb(0.13, 0.12, 0.1);
const BUTTON_COLOR: Color = Color::srgb(0.28, 0.24, 0.18);
const BUTTON_MUTED_COLOR: Color = Color::srgb(0.18, 0.17, 0.15);
const TAB_ACTIVE_COLOR: Color = Color::srgb(0.45, 0.36, 0.2);
const TEXT_COLOR: Color = Color::srgb(0.94, 0.92, 0.86);
const MUTED_TEXT_COLOR: Color = Color::srgb(0.6, 0.58, 0.54);
const LOG_LINES: usize = 8;

fn label(text: impl Into<String>, font_size: f32) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(TEXT_COLOR),
    )
}

fn button_node() -> Node {
    Node {
        padding: UiRect::axes(Val::Px(10.0), Val::Px(5.0)),
        margin: UiRect::all(Val::Px(2.0)),
        ..default()
    }
}

fn panel_node() -> Node {
    Node {
        flex_direction: FlexDirection::Column,
        padding: UiRect::all(Val::Px(10.0)),
        row_gap: Val::Px(4.0),
        ..default()
    }
}

pub fn spawn_ui(mut commands: Commands) {
    commands
        .spawn((
            Name::new("UiRoot"),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(12.0)),
                row_gap: Val::Px(10.0),
                ..default()
            },
        ))
        .with_children(|root| {
            root.spawn((HudText, label("Initializing...", 16.0)));

            root.spawn(Node {
                flex_grow: 1.0,
                column_gap: Val::Px(12.0),
                ..default()
            })
            .with_children(|columns| {
                columns
                    .spawn((
                        Name::new("Warehouse"),
                        AnchorRegion(Anchor::Warehouse),
                        Node {
                            width: Val::Px(260.0),
                            align_self: AlignSelf::FlexStart,
                            ..panel_node()
                        },
                        BackgroundColor(PANEL_COLOR),
                    ))
                    .with_children(spawn_warehouse);

                columns
                    .spawn(Node {
                        flex_grow: 1.0,
                        flex_direction: FlexDirection::Column,
                        row_gap: Val::Px(6.0),
                        ..default()
                    })
                    .with_children(spawn_tabs);
            });

            root.spawn((
                Name::new("EventLog"),
                Node {
                    min_height: Val::Px(150.0),
                    ..panel_node()
                },
                BackgroundColor(PANEL_COLOR),
            ))
            .with_children(|log| {
                log.spawn((LogText, label("", 14.0)));
            });
        });

    commands
        .spawn((
            Name::new("StoryOverlay"),
            StoryOverlay,
            Node {
                display: Display::None,
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.8)),
            FocusPolicy::Block,
            GlobalZIndex(STORY_Z),
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        width: Val::Px(520.0),
                        row_gap: Val::Px(14.0),
                        ..panel_node()
                    },
                    BackgroundColor(PANEL_COLOR),
                ))
                .with_children(|card| {
                    card.spawn((StoryText, label("", 17.0)));
                    card.spawn((
                        Button,
                        StoryButton,
                        Node {
                            align_self: AlignSelf::Center,
                            ..button_node()
                        },
                        BackgroundColor(BUTTON_COLOR),
                    ))
                    .with_child((StoryButtonLabel, label("", 16.0)));
                });
        });
}

fn spawn_warehouse(panel: &mut ChildBuilder) {
    panel.spawn((ResourceText, label("", 16.0)));
    for kind in [ResourceKind::Wood, ResourceKind::Food] {
        panel
            .spawn((
                Button,
                GatherButton(kind),
                button_node(),
                BackgroundColor(BUTTON_COLOR),
            ))
            .with_child(label(format!("Gather {}", kind.canonical_name()), 15.0));
    }
}

fn spawn_tabs(column: &mut ChildBuilder) {
    column
        .spawn(Node {
            column_gap: Val::Px(4.0),
            ..default()
        })
        .with_children(|bar| {
            for tab in Tab::ALL {
                bar.spawn((
                    Button,
                    TabButton(tab),
                    button_node(),
                    BackgroundColor(BUTTON_COLOR),
                ))
                .with_child(label(tab.label(), 15.0));
            }
        });

    column
        .spawn((TabPanel(Tab::Craft), Node::default()))
        .with_children(|panel| {
            spawn_shop_list(panel, Anchor::Craft, Category::Craft);
        });

    column
        .spawn((TabPanel(Tab::Assign), Node::default()))
        .with_children(|panel| {
            panel
                .spawn((
                    Name::new("AssignPanel"),
                    AnchorRegion(Anchor::Assign),
                    Node {
                        min_width: Val::Px(420.0),
                        ..panel_node()
                    },
                    BackgroundColor(PANEL_COLOR),
                ))
                .with_children(|rows| {
                    for role in Role::ALL {
                        spawn_role_row(rows, role);
                    }
                });
        });

    column
        .spawn((TabPanel(Tab::Research), Node::default()))
        .with_children(|panel| {
            spawn_shop_list(panel, Anchor::Research, Category::Research);
        });
}

fn spawn_shop_list(panel: &mut ChildBuilder, anchor: Anchor, category: Category) {
    panel.spawn((
        Name::new(format!("{}List", category.canonical_name())),
        AnchorRegion(anchor),
        ShopList {
            category,
            shown: Vec::new(),
        },
        Node {
            min_width: Val::Px(420.0),
            ..panel_node()
        },
        BackgroundColor(PANEL_COLOR),
    ));
}

fn spawn_role_row(rows: &mut ChildBuilder, role: Role) {
    rows.spawn((
        RoleRow(role),
        Node {
            align_items: AlignItems::Center,
            column_gap: Val::Px(6.0),
            ..default()
        },
    ))
    .with_children(|row| {
        if role != Role::Lumberjack {
            for assign in [false, true] {
                row.spawn((
                    Button,
                    RoleButton { role, assign },
                    button_node(),
                    BackgroundColor(BUTTON_COLOR),
                ))
                .with_child(label(if assign { "+" } else { "-" }, 15.0));
            }
        }
        row.spawn((RoleText(role), label("", 15.0)));
    });
}

fn tab_unlocked(settlement: &Settlement, tab: Tab) -> bool {
    tab.required_feature()
        .is_none_or(|feature| settlement.is_unlocked(feature))
}

pub fn refresh_tabs(
    session: Res<SessionState>,
    mut actions: EventReader<UiAction>,
    mut active: ResMut<ActiveTab>,
    mut buttons: Query<(&TabButton, &mut Node, &mut BackgroundColor)>,
    mut panels: Query<(&TabPanel, &mut Node), Without<TabButton>>,
) {
    let settlement = &session.settlement;
    for action in actions.read() {
        if let UiAction::SelectTab(tab) = action
            && tab_unlocked(settlement, *tab)
        {
            active.0 = *tab;
        }
    }
    if !tab_unlocked(settlement, active.0) {
        active.0 = Tab::default();
    }

    for (button, mut node, mut color) in &mut buttons {
        node.display = if tab_unlocked(settlement, button.0) {
            Display::Flex
        } else {
            Display::None
        };
        color.0 = if button.0 == active.0 {
            TAB_ACTIVE_COLOR
        } else {
            BUTTON_COLOR
        };
    }
    for (panel, mut node) in &mut panels {
        node.display = if panel.0 == active.0 {
            Display::Flex
        } else {
            Display::None
        };
    }
}

fn format_cost(cost: &Cost) -> String {
    cost.iter()
        .map(|(kind, amount)| format!("{amount:.0} {}", kind.canonical_name()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn spawn_shop_entry(list: &mut ChildBuilder, summary: &UpgradeSummary) {
    let (background, text_color) = if summary.affordable {
        (BUTTON_COLOR, TEXT_COLOR)
    } else {
        (BUTTON_MUTED_COLOR, MUTED_TEXT_COLOR)
    };
    let mut title = format!("{}  [{}]", summary.name, format_cost(&summary.cost));
    if summary.repeatable && summary.purchase_count > 0 {
        title.push_str(&format!("  (owned {})", summary.purchase_count));
    }

    list.spawn((
        Button,
        ShopButton(summary.id.clone()),
        Node {
            flex_direction: FlexDirection::Column,
            ..button_node()
        },
        BackgroundColor(background),
    ))
    .with_children(|entry| {
        entry.spawn((
            Text::new(title),
            TextFont {
                font_size: 15.0,
                ..default()
            },
            TextColor(text_color),
        ));
        entry.spawn((
            Text::new(format!("{} ({}s)", summary.description, summary.duration)),
            TextFont {
                font_size: 12.0,
                ..default()
            },
            TextColor(MUTED_TEXT_COLOR),
        ));
    });
}

/// Rebuilds a shop list whenever its listing changes.
pub fn refresh_shop_lists(
    mut commands: Commands,
    session: Res<SessionState>,
    mut lists: Query<(Entity, &mut ShopList)>,
) {
    for (entity, mut list) in &mut lists {
        let listing = session
            .engine
            .list_eligible_in(list.category, &session.settlement);
        let shown = listing
            .iter()
            .map(|summary| (summary.id.clone(), summary.affordable, summary.purchase_count))
            .collect::<Vec<_>>();
        if shown == list.shown {
            continue;
        }
        list.shown = shown;

        commands
            .entity(entity)
            .despawn_descendants()
            .with_children(|parent| {
                if listing.is_empty() {
                    parent.spawn((
                        Text::new("Nothing available yet."),
                        TextFont {
                            font_size: 14.0,
                            ..default()
                        },
                        TextColor(MUTED_TEXT_COLOR),
                    ));
                }
                for summary in &listing {
                    spawn_shop_entry(parent, summary);
                }
            });
    }
}

pub fn refresh_roles(
    session: Res<SessionState>,
    mut rows: Query<(&RoleRow, &mut Node)>,
    mut texts: Query<(&RoleText, &mut Text)>,
) {
    let settlement = &session.settlement;
    for (row, mut node) in &mut rows {
        let visible = row.0 == Role::Lumberjack || settlement.can_assign(row.0);
        node.display = if visible { Display::Flex } else { Display::None };
    }
    for (role_text, mut text) in &mut texts {
        let role = role_text.0;
        *text = Text::new(format!(
            "{}: {}   output x{:.2}   chaos {:.0}%",
            role.canonical_name(),
            settlement.workers(role),
            settlement.production(role),
            settlement.chaos(role) * 100.0,
        ));
    }
}

pub fn refresh_resources(
    session: Res<SessionState>,
    mut query: Query<&mut Text, With<ResourceText>>,
) {
    let Ok(mut text) = query.get_single_mut() else {
        return;
    };
    let settlement = &session.settlement;

    let mut lines = vec![format!("Villagers: {}", settlement.villagers)];
    for kind in ResourceKind::ALL {
        if kind == ResourceKind::Stone && !settlement.is_unlocked(Feature::Stone) {
            continue;
        }
        lines.push(format!(
            "{}: {:.1} ({:+.2})",
            kind.canonical_name(),
            settlement.resources.amount(kind),
            settlement.resources.tick_deltas.get(kind),
        ));
    }
    for category in Category::ALL {
        if let Some(line) = work_line(settlement, category) {
            lines.push(line);
        }
    }
    *text = Text::new(lines.join("\n"));
}

/// Progress of the running order in one lane, with the speed bonus once
/// the lane's crew can help.
fn work_line(settlement: &Settlement, category: Category) -> Option<String> {
    let verb = match category {
        Category::Craft => "Crafting",
        Category::Research => "Researching",
    };
    let mut line = match settlement.work.active(category) {
        Some(order) => format!("{verb}: {} {:.0}%", order.name, order.progress() * 100.0),
        None if settlement.is_unlocked(category.speed_feature()) => format!("{verb}: idle"),
        None => return None,
    };
    let waiting = settlement.work.queued_in(category).saturating_sub(1);
    if waiting > 0 {
        line.push_str(&format!(" (+{waiting} queued)"));
    }
    if settlement.is_unlocked(category.speed_feature()) {
        line.push_str(&format!("  x{:.2}", settlement.work_speed(category)));
    }
    Some(line)
}

pub fn refresh_log(session: Res<SessionState>, mut query: Query<&mut Text, With<LogText>>) {
    let Ok(mut text) = query.get_single_mut() else {
        return;
    };
    let lines = session
        .settlement
        .log
        .recent(LOG_LINES)
        .map(|entry| match entry.category {
            LogCategory::Warning => format!("! {}", entry.text),
            _ => entry.text.clone(),
        })
        .collect::<Vec<_>>();
    *text = Text::new(lines.join("\n"));
}

pub fn refresh_story(
    session: Res<SessionState>,
    mut overlay: Query<&mut Node, With<StoryOverlay>>,
    mut story_text: Query<&mut Text, (With<StoryText>, Without<StoryButtonLabel>)>,
    mut button_label: Query<&mut Text, (With<StoryButtonLabel>, Without<StoryText>)>,
) {
    let Ok(mut node) = overlay.get_single_mut() else {
        return;
    };
    let Some(step) = session.settlement.stories.current() else {
        node.display = Display::None;
        return;
    };
    node.display = Display::Flex;
    if let Ok(mut text) = story_text.get_single_mut() {
        *text = Text::new(step.text.clone());
    }
    if let Ok(mut text) = button_label.get_single_mut() {
        *text = Text::new(step.button.clone());
    }
}

pub fn refresh_hud(
    session: Res<SessionState>,
    run_state: Res<State<SimRunState>>,
    mut hud_query: Query<&mut Text, With<HudText>>,
) {
    let Ok(mut hud) = hud_query.get_single_mut() else {
        return;
    };

    let run_label = match run_state.get() {
        SimRunState::Running => "RUNNING",
        SimRunState::Paused => "PAUSED",
    };
    let save_line = session
        .last_save_message
        .as_deref()
        .unwrap_or("F5 save, F9 load, F6 export, F7 import");

    *hud = Text::new(format!(
        "Tick: {}  Mode: {}  Upgrades bought: {}\n1-3 switch tab, Space/P pause  |  {}",
        session.settlement.tick_index,
        run_label,
        session.engine.purchase_counts().values().sum::<u32>(),
        save_line,
    ));
}
