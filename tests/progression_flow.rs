use village_progression::{
    Anchor, Building, Category, Checkpoint, Eligibility, Feature, GameConfig, ProgressionEngine,
    PurchaseError, ResourceKind, Role, Settlement, StoryAdvance, Tab, TutorialController,
    bundled_catalog,
};

const EPSILON: f64 = 1e-9;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= EPSILON * expected.abs().max(1.0),
        "expected {expected}, got {actual}"
    );
}

fn new_session() -> (ProgressionEngine, TutorialController, Settlement) {
    let catalog = bundled_catalog().expect("bundled catalog should validate");
    (
        ProgressionEngine::new(catalog),
        TutorialController::default(),
        GameConfig::default().new_settlement(),
    )
}

/// Buys `id` and runs the clock until every queued order has finished.
fn buy_and_wait(engine: &mut ProgressionEngine, settlement: &mut Settlement, id: &str) {
    engine
        .purchase(id, settlement)
        .unwrap_or_else(|err| panic!("{id} should be purchasable: {err}"));
    for _ in 0..1_000 {
        if settlement.work.is_empty() {
            return;
        }
        settlement.tick(1.0);
    }
    panic!("{id} never finished");
}

fn listed_ids(engine: &ProgressionEngine, settlement: &Settlement) -> Vec<String> {
    engine
        .list_eligible(settlement)
        .into_iter()
        .map(|summary| summary.id)
        .collect()
}

#[test]
fn opening_flow_builds_the_first_tent() {
    let (mut engine, mut tutorial, mut settlement) = new_session();

    assert_eq!(listed_ids(&engine, &settlement), vec!["build_tent"]);
    assert_eq!(
        engine.eligibility("build_tent", &settlement),
        Some(Eligibility::Unaffordable)
    );
    assert!(tutorial.tick(&settlement).is_empty());

    for _ in 0..10 {
        settlement.gather(ResourceKind::Wood, 1.0);
        settlement.gather(ResourceKind::Food, 1.0);
    }
    let popups = tutorial.tick(&settlement);
    let reached = popups
        .iter()
        .filter_map(|popup| popup.checkpoint)
        .collect::<Vec<_>>();
    assert_eq!(reached, vec![Checkpoint::Resource, Checkpoint::Tent]);
    assert_eq!(popups[0].anchor, Some(Anchor::Warehouse));

    let receipt = engine
        .purchase("build_tent", &mut settlement)
        .expect("tent should be affordable");
    assert!(receipt.consumed);
    assert_close(settlement.resources.amount(ResourceKind::Wood), 0.0);
    assert_close(settlement.resources.amount(ResourceKind::Food), 0.0);
    assert_eq!(settlement.level(Building::Tent), 0);
    assert!(tutorial.tick(&settlement).is_empty());

    settlement.tick(receipt.duration);
    assert!(settlement.work.is_empty());
    assert_eq!(settlement.level(Building::Tent), 1);
    assert_eq!(settlement.villagers, 2);
    assert!(settlement.is_unlocked(Feature::Assign));

    let popups = tutorial.tick(&settlement);
    assert_eq!(popups.len(), 1);
    assert_eq!(popups[0].checkpoint, Some(Checkpoint::Assign));
    assert_eq!(popups[0].activate_tab, Some(Tab::Assign));

    let listed = listed_ids(&engine, &settlement);
    assert!(!listed.contains(&"build_tent".to_string()));
    for id in ["expand_tent", "build_pier", "wooden_axes", "hunt_wildlife"] {
        assert!(listed.contains(&id.to_string()), "{id} should be listed");
    }
    assert_eq!(
        engine.purchase("build_tent", &mut settlement),
        Err(PurchaseError::AlreadyPurchased {
            id: "build_tent".to_string()
        })
    );
}

#[test]
fn lumberjacks_produce_wood_slowed_by_chaos() {
    let (mut engine, _, mut settlement) = new_session();
    settlement.resources.set(ResourceKind::Wood, 10.0);
    settlement.resources.set(ResourceKind::Food, 10.0);
    engine
        .purchase("build_tent", &mut settlement)
        .expect("tent should be affordable");
    settlement.tick(2.0);
    assert_eq!(settlement.villagers, 2);

    for _ in 0..10 {
        settlement.tick(1.0);
    }

    assert_close(settlement.chaos(Role::Lumberjack), 0.08);
    assert_close(
        settlement.resources.amount(ResourceKind::Wood),
        2.0 * 0.4 * 0.92 * 10.0,
    );
    assert_eq!(settlement.tick_index, 11);
}

#[test]
fn expanding_the_tent_compounds_its_cost() {
    let (mut engine, _, mut settlement) = new_session();
    settlement.resources.set(ResourceKind::Wood, 1_000.0);
    settlement.resources.set(ResourceKind::Food, 1_000.0);
    buy_and_wait(&mut engine, &mut settlement, "build_tent");

    let mut paid = Vec::new();
    for _ in 0..3 {
        let receipt = engine
            .purchase("expand_tent", &mut settlement)
            .expect("expansion should be affordable");
        assert!(!receipt.consumed);
        paid.push(receipt.spent.get(ResourceKind::Food));
    }

    assert_close(paid[0], 40.0);
    assert_close(paid[1], 60.0);
    assert_close(paid[2], 90.0);
    assert_eq!(settlement.work.queued_in(Category::Craft), 3);
    settlement.tick(6.0);
    assert!(settlement.work.is_empty());
    assert_eq!(settlement.villagers, 5);
    assert_eq!(settlement.level(Building::Tent), 4);
    assert_eq!(engine.purchase_count("expand_tent"), 3);
}

#[test]
fn crowded_pier_raises_the_chaos_checkpoint() {
    let (mut engine, mut tutorial, mut settlement) = new_session();
    settlement.resources.set(ResourceKind::Wood, 500.0);
    settlement.resources.set(ResourceKind::Food, 500.0);
    buy_and_wait(&mut engine, &mut settlement, "build_tent");
    buy_and_wait(&mut engine, &mut settlement, "build_pier");
    tutorial.tick(&settlement);

    settlement
        .assign(Role::Fisherman)
        .expect("fishermen unlocked");
    settlement.tick(1.0);
    assert!(tutorial.tick(&settlement).is_empty());

    settlement
        .assign(Role::Fisherman)
        .expect("a second villager is free");
    settlement.tick(1.0);
    let popups = tutorial.tick(&settlement);
    assert_eq!(popups.len(), 1);
    assert_eq!(popups[0].checkpoint, Some(Checkpoint::Chaos));
    assert_eq!(settlement.workers(Role::Lumberjack), 0);
}

#[test]
fn monolith_survey_tells_a_story_until_acknowledged() {
    let (mut engine, _, mut settlement) = new_session();
    for kind in ResourceKind::ALL {
        settlement.resources.set(kind, 10_000.0);
    }
    for id in [
        "build_tent",
        "build_pier",
        "build_quarry",
        "develop_quarry",
        "investigate_monolith",
    ] {
        buy_and_wait(&mut engine, &mut settlement, id);
    }

    let step = settlement.stories.current().expect("story is showing");
    assert_eq!(step.button, "Return");
    assert_eq!(settlement.stories.acknowledge(), StoryAdvance::Finished);
    assert!(settlement.stories.current().is_none());
    assert_eq!(settlement.stories.acknowledge(), StoryAdvance::Idle);
}

#[test]
fn research_is_gated_behind_the_academy() {
    let (engine, _, mut settlement) = new_session();
    settlement.resources.set(ResourceKind::Food, 100_000.0);

    assert_eq!(
        engine.eligibility("mentorship", &settlement),
        Some(Eligibility::Hidden)
    );
    settlement.raise_level(Building::Academy, 1);
    assert_eq!(
        engine.eligibility("mentorship", &settlement),
        Some(Eligibility::Available)
    );
}

#[test]
fn blacksmiths_shorten_crafting_after_the_smithy() {
    let (mut engine, _, mut settlement) = new_session();
    for kind in ResourceKind::ALL {
        settlement.resources.set(kind, 10_000.0);
    }
    for id in [
        "build_tent",
        "build_pier",
        "build_quarry",
        "develop_quarry",
        "build_smithy",
    ] {
        buy_and_wait(&mut engine, &mut settlement, id);
    }
    assert!(settlement.is_unlocked(Feature::CraftSpeed));
    assert_close(settlement.work_speed(Category::Craft), 1.0);

    settlement.assign(Role::Blacksmith).expect("blacksmiths unlocked");
    settlement.assign(Role::Blacksmith).expect("a second villager is free");
    settlement.tick(0.1);
    assert_close(settlement.work_speed(Category::Craft), 1.0 + 2.0 * 0.5 * 0.92);
    assert_close(settlement.work_speed(Category::Research), 1.0);

    let receipt = engine
        .purchase("wooden_axes", &mut settlement)
        .expect("axes should be affordable");
    assert_eq!(receipt.duration, 3.0);
    settlement.tick(1.0);
    assert!(!settlement.work.is_empty());
    settlement.tick(1.0);
    assert!(settlement.work.is_empty());
    assert_eq!(engine.purchase_count("wooden_axes"), 1);
}
