use super::*;
use crate::catalog::{
    AbilityCategory, AttackKind, ModifierSpec, SkillBook, SkillDefinition, TargetMode, TargetType,
};
use crate::env::PcgRng;
use crate::stats::{CombatStat, ModifierKind, StatPoolSpec};

const EMBER_WAVE: SkillId = SkillId(1);
const MEND: SkillId = SkillId(2);
const WAR_CRY: SkillId = SkillId(3);

fn skill_book() -> SkillBook {
    let mut book = SkillBook::new();
    book.insert(
        EMBER_WAVE,
        SkillDefinition {
            name: "Ember Wave".into(),
            description: "Scorches every enemy.".into(),
            base_magnitude: 20.0,
            technique_cost: 15.0,
            attack_kind: AttackKind::Magical,
            category: AbilityCategory::Offensive,
            target_type: TargetType::Enemy,
            target_mode: TargetMode::All,
            cast_duration: 0.0,
            modifier: None,
        },
    );
    book.insert(
        MEND,
        SkillDefinition {
            name: "Mend".into(),
            description: "Knits wounds closed.".into(),
            base_magnitude: 40.0,
            technique_cost: 10.0,
            attack_kind: AttackKind::Magical,
            category: AbilityCategory::Heal,
            target_type: TargetType::Caster,
            target_mode: TargetMode::Single,
            cast_duration: 0.0,
            modifier: None,
        },
    );
    book.insert(
        WAR_CRY,
        SkillDefinition {
            name: "War Cry".into(),
            description: "Bolsters the caster's strikes.".into(),
            base_magnitude: 0.0,
            technique_cost: 5.0,
            attack_kind: AttackKind::Physical,
            category: AbilityCategory::Buff,
            target_type: TargetType::Caster,
            target_mode: TargetMode::Single,
            cast_duration: 0.0,
            modifier: Some(ModifierSpec {
                stat: CombatStat::PhysicalAttack,
                value: 0.2,
                kind: ModifierKind::Percentage,
                duration_turns: 2,
            }),
        },
    );
    book
}

fn player_spec() -> CombatantSpec {
    CombatantSpec {
        name: "wanderer".into(),
        stats: StatPoolSpec {
            max_health: 250.0,
            max_technique_points: 50.0,
            physical_attack: 50.0,
            magical_attack: 50.0,
            physical_defense: 0.0,
            magical_defense: 0.0,
            speed: 80.0,
            ..StatPoolSpec::default()
        },
        known_skills: vec![EMBER_WAVE, MEND, WAR_CRY],
    }
}

fn enemy_spec(name: &str, speed: f32, attack: f32, health: f32) -> CombatantSpec {
    CombatantSpec {
        name: name.into(),
        stats: StatPoolSpec {
            max_health: health,
            physical_attack: attack,
            physical_defense: 0.0,
            magical_defense: 0.0,
            speed,
            ..StatPoolSpec::default()
        },
        known_skills: Vec::new(),
    }
}

fn orchestrator(enemies: Vec<CombatantSpec>) -> CombatOrchestrator {
    let setup = EncounterSetup {
        return_destination: "verdant-crossing".into(),
        player: player_spec(),
        enemies,
        seed: 7,
    };
    let mut orchestrator =
        CombatOrchestrator::new(setup, CombatConfig::instant(), &BalanceTables::default()).unwrap();
    orchestrator.begin();
    orchestrator
}

struct TestEnv {
    book: SkillBook,
    tables: BalanceTables,
    rng: PcgRng,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            book: skill_book(),
            tables: BalanceTables::default(),
            rng: PcgRng,
        }
    }

    fn env(&self) -> CombatEnv<'_> {
        CombatEnv::new(&self.book, &self.tables, &self.rng)
    }
}

/// Drive every pending enemy turn (and any staged resolution) until the
/// player acts again or the encounter ends.
fn run_until_player_turn(orchestrator: &mut CombatOrchestrator, env: &CombatEnv<'_>) {
    for _ in 0..64 {
        if orchestrator.outcome().is_some() {
            return;
        }
        if orchestrator.has_staged_action() {
            orchestrator.resolve_staged(env).unwrap();
            continue;
        }
        if orchestrator.is_player_turn() {
            return;
        }
        orchestrator.enemy_take_turn().unwrap();
    }
    panic!("encounter did not hand control back to the player");
}

#[test]
fn round_one_orders_by_speed() {
    let mut o = orchestrator(vec![
        enemy_spec("husk", 60.0, 10.0, 100.0),
        enemy_spec("wisp", 40.0, 10.0, 100.0),
    ]);

    assert_eq!(o.round(), 1);
    assert!(o.is_player_turn());
    let events = o.drain_events();
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::TurnOrderChanged { order }
            if order == &[EntityId::PLAYER, EntityId(1), EntityId(2)]
    )));
}

#[test]
fn attack_resolves_damage_and_hands_off_the_turn() {
    let test_env = TestEnv::new();
    let env = test_env.env();
    let mut o = orchestrator(vec![enemy_spec("husk", 60.0, 10.0, 100.0)]);

    o.attack().unwrap();
    let staged = o.confirm_target(&env).unwrap();
    assert_eq!(staged.delay_secs, 0.0);
    o.resolve_staged(&env).unwrap();

    // 50 physical attack against 0 defense.
    let husk = o.state().combatant(EntityId(1)).unwrap();
    assert!((husk.stats.health() - 50.0).abs() < 1e-4);
    assert!(!o.is_player_turn());
}

#[test]
fn input_is_rejected_while_a_cast_is_staged() {
    let test_env = TestEnv::new();
    let env = test_env.env();
    let mut o = orchestrator(vec![enemy_spec("husk", 60.0, 10.0, 100.0)]);

    o.attack().unwrap();
    o.confirm_target(&env).unwrap();

    assert_eq!(o.attack(), Err(ActionError::CastInProgress));
    assert_eq!(o.defend(), Err(ActionError::CastInProgress));
    assert_eq!(o.flee(), Err(ActionError::CastInProgress));
}

#[test]
fn confirm_without_selection_is_rejected() {
    let test_env = TestEnv::new();
    let env = test_env.env();
    let mut o = orchestrator(vec![enemy_spec("husk", 60.0, 10.0, 100.0)]);

    assert_eq!(
        o.confirm_target(&env).unwrap_err(),
        ActionError::NotSelecting
    );
}

#[test]
fn unaffordable_skill_is_rejected_without_any_mutation() {
    let test_env = TestEnv::new();
    let env = test_env.env();
    let mut o = orchestrator(vec![enemy_spec("husk", 60.0, 10.0, 100.0)]);

    // Burn points down to 10 so the 15-cost skill is out of reach.
    o.state
        .player_mut()
        .unwrap()
        .stats
        .use_technique_points(40.0);

    let err = o.cast_skill(&env, EMBER_WAVE).unwrap_err();
    assert_eq!(
        err,
        ActionError::InsufficientTechniquePoints {
            available: 10.0,
            required: 15.0,
        }
    );

    // Nothing moved: same actor, same points, no selection.
    assert!(o.is_player_turn());
    assert_eq!(o.targeting_state(), TargetingState::Idle);
    assert_eq!(o.state().player().unwrap().stats.technique_points(), 10.0);
}

#[test]
fn unknown_skills_are_rejected() {
    let test_env = TestEnv::new();
    let env = test_env.env();
    let mut o = orchestrator(vec![enemy_spec("husk", 60.0, 10.0, 100.0)]);

    assert_eq!(
        o.cast_skill(&env, SkillId(99)).unwrap_err(),
        ActionError::UnknownSkill(SkillId(99))
    );
}

#[test]
fn offensive_skill_hits_every_enemy_and_spends_points() {
    let test_env = TestEnv::new();
    let env = test_env.env();
    let mut o = orchestrator(vec![
        enemy_spec("husk", 60.0, 10.0, 100.0),
        enemy_spec("wisp", 40.0, 10.0, 100.0),
    ]);

    o.cast_skill(&env, EMBER_WAVE).unwrap();
    o.confirm_target(&env).unwrap();
    o.resolve_staged(&env).unwrap();

    // 20 + 50 magical attack against 0 magical defense, on both enemies.
    for id in [EntityId(1), EntityId(2)] {
        let enemy = o.state().combatant(id).unwrap();
        assert!((enemy.stats.health() - 30.0).abs() < 1e-4);
    }
    assert!((o.state().player().unwrap().stats.technique_points() - 35.0).abs() < 1e-4);
}

#[test]
fn buff_skill_applies_its_modifier_to_the_caster() {
    let test_env = TestEnv::new();
    let env = test_env.env();
    let mut o = orchestrator(vec![enemy_spec("husk", 60.0, 10.0, 100.0)]);

    o.cast_skill(&env, WAR_CRY).unwrap();
    o.confirm_target(&env).unwrap();
    o.resolve_staged(&env).unwrap();

    let player = o.state().player().unwrap();
    assert!((player.stats.stat(CombatStat::PhysicalAttack) - 60.0).abs() < 1e-4);
    assert_eq!(player.stats.active_modifiers().len(), 1);
}

#[test]
fn defending_reduces_incoming_damage_by_the_stance_factor() {
    let test_env = TestEnv::new();
    let env = test_env.env();
    let mut o = orchestrator(vec![enemy_spec("husk", 60.0, 100.0, 100.0)]);

    o.defend().unwrap();
    assert!(o.state().player().unwrap().stats.is_defending());

    // The enemy's 100 attack lands for 70 through the defend stance.
    run_until_player_turn(&mut o, &env);
    let player = o.state().player().unwrap();
    assert!((player.stats.health() - 180.0).abs() < 1e-4);

    // The stance expired with the round and the player opens round two.
    assert_eq!(o.round(), 2);
    assert!(!player.stats.is_defending());
    assert!(o.is_player_turn());
}

#[test]
fn defended_slow_player_still_opens_the_next_round() {
    let test_env = TestEnv::new();
    let env = test_env.env();
    let mut setup_player = player_spec();
    setup_player.stats.speed = 10.0;
    let setup = EncounterSetup {
        return_destination: "verdant-crossing".into(),
        player: setup_player,
        enemies: vec![enemy_spec("husk", 60.0, 10.0, 100.0)],
        seed: 7,
    };
    let mut o =
        CombatOrchestrator::new(setup, CombatConfig::instant(), &BalanceTables::default()).unwrap();
    o.begin();

    // Slow player: the enemy acts first in round one.
    run_until_player_turn(&mut o, &env);
    o.defend().unwrap();
    run_until_player_turn(&mut o, &env);

    assert_eq!(o.round(), 2);
    assert!(o.is_player_turn());
}

#[test]
fn fleeing_exits_at_the_round_boundary() {
    let test_env = TestEnv::new();
    let env = test_env.env();
    let mut o = orchestrator(vec![enemy_spec("husk", 60.0, 10.0, 100.0)]);

    o.flee().unwrap();
    // The enemy still takes its turn this round.
    assert!(!o.is_player_turn());
    run_until_player_turn(&mut o, &env);

    assert_eq!(o.outcome(), Some(CombatOutcome::Fled));
    let result = o.result().unwrap();
    assert_eq!(result.outcome, CombatOutcome::Fled);
    assert_eq!(result.return_destination, "verdant-crossing");
    let player = o.state().player().unwrap();
    assert!((player.stats.health() - 240.0).abs() < 1e-4);
}

#[test]
fn victory_ends_the_encounter_and_removes_the_enemy() {
    let test_env = TestEnv::new();
    let env = test_env.env();
    let mut o = orchestrator(vec![enemy_spec("husk", 60.0, 10.0, 40.0)]);

    o.attack().unwrap();
    o.confirm_target(&env).unwrap();
    o.resolve_staged(&env).unwrap();

    assert_eq!(o.outcome(), Some(CombatOutcome::Victory));
    assert!(o.state().combatant(EntityId(1)).is_none());
    assert!(o
        .drain_events()
        .iter()
        .any(|e| matches!(e, CombatEvent::CombatEnded { outcome: CombatOutcome::Victory })));
}

#[test]
fn defeat_is_detected_at_the_round_boundary() {
    let test_env = TestEnv::new();
    let env = test_env.env();
    let mut o = orchestrator(vec![enemy_spec("husk", 60.0, 10_000.0, 100.0)]);

    o.defend().unwrap();
    for _ in 0..8 {
        if o.outcome().is_some() {
            break;
        }
        if o.has_staged_action() {
            o.resolve_staged(&env).unwrap();
        } else if !o.is_player_turn() {
            o.enemy_take_turn().unwrap();
        }
    }

    assert_eq!(o.outcome(), Some(CombatOutcome::Defeat));
}

#[test]
fn actions_after_the_outcome_are_rejected() {
    let test_env = TestEnv::new();
    let env = test_env.env();
    let mut o = orchestrator(vec![enemy_spec("husk", 60.0, 10.0, 40.0)]);

    o.attack().unwrap();
    o.confirm_target(&env).unwrap();
    o.resolve_staged(&env).unwrap();
    assert_eq!(o.outcome(), Some(CombatOutcome::Victory));

    assert_eq!(o.attack(), Err(ActionError::CombatOver));
    assert_eq!(o.enemy_take_turn(), Err(TurnError::EncounterOver));
}

#[test]
fn combat_terminates_within_a_bounded_number_of_steps() {
    let test_env = TestEnv::new();
    let env = test_env.env();

    // Zero attack on both sides: the damage floor alone must finish it.
    let mut player = player_spec();
    player.stats.physical_attack = 0.0;
    player.stats.max_health = 50.0;
    let setup = EncounterSetup {
        return_destination: "verdant-crossing".into(),
        player,
        enemies: vec![enemy_spec("husk", 60.0, 0.0, 50.0)],
        seed: 7,
    };
    let mut o =
        CombatOrchestrator::new(setup, CombatConfig::instant(), &BalanceTables::default()).unwrap();
    o.begin();

    let mut steps = 0;
    while o.outcome().is_none() {
        steps += 1;
        assert!(steps < 1_000, "combat failed to terminate");

        if o.has_staged_action() {
            o.resolve_staged(&env).unwrap();
        } else if o.is_player_turn() {
            o.attack().unwrap();
            o.confirm_target(&env).unwrap();
        } else {
            o.enemy_take_turn().unwrap();
        }
    }

    assert!(o.outcome().is_some());
}
