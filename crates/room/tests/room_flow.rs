use std::time::Duration;

use battle_room::{BattleRoom, RoomError};
use perk_content::PerkCatalog;
use perk_core::{BalanceConfig, EffectTag, Position, TeamId, UnitId, UnitRuntime};

const FRAME: Duration = Duration::from_millis(50);

fn room() -> BattleRoom {
    BattleRoom::new(&BalanceConfig::default()).expect("default config is valid")
}

fn deploy(room: &mut BattleRoom, id: u32, team: TeamId, x: f32) -> UnitId {
    let id = UnitId(id);
    room.deploy(UnitRuntime::new(id, team, Position::new(x, 0.0), 100.0))
        .expect("fresh id");
    id
}

fn equip(room: &mut BattleRoom, id: UnitId, unit_name: &str, perk_id: &str) {
    let found = room
        .equip(id, PerkCatalog::builtin(), unit_name, perk_id)
        .expect("unit deployed");
    assert!(found, "{unit_name}/{perk_id} should be in the catalog");
}

fn run_for(room: &mut BattleRoom, total: Duration) {
    let frames = total.as_millis() / FRAME.as_millis();
    for _ in 0..frames {
        room.step(FRAME);
    }
}

#[test]
fn frost_aura_slows_while_in_range_and_lapses_after() {
    let mut room = room();
    let cryo = deploy(&mut room, 1, TeamId::BLUE, 0.0);
    let grunt = deploy(&mut room, 2, TeamId::RED, 30.0);
    let far = deploy(&mut room, 3, TeamId::RED, 80.0);
    equip(&mut room, cryo, "Cryomancer", "frost_aura");

    run_for(&mut room, Duration::from_millis(1000));
    assert_eq!(room.slow_pct(grunt), 0.20);
    assert_eq!(room.slow_pct(far), 0.0);

    room.move_unit(grunt, Position::new(200.0, 0.0)).unwrap();
    run_for(&mut room, Duration::from_millis(200));
    assert_eq!(room.slow_pct(grunt), 0.0);
    assert!(!room.effects().contains(EffectTag::AURA_SLOW, grunt));
}

#[test]
fn aura_stops_when_owner_dies() {
    let mut room = room();
    let cryo = deploy(&mut room, 1, TeamId::BLUE, 0.0);
    let grunt = deploy(&mut room, 2, TeamId::RED, 30.0);
    equip(&mut room, cryo, "Cryomancer", "frost_aura");

    run_for(&mut room, Duration::from_millis(400));
    assert_eq!(room.slow_pct(grunt), 0.20);

    assert_eq!(room.kill(cryo), Ok(true));
    run_for(&mut room, Duration::from_millis(200));
    assert_eq!(room.slow_pct(grunt), 0.0);
}

#[test]
fn berserker_cleaves_every_fourth_swing() {
    let mut room = room();
    let berserker = deploy(&mut room, 1, TeamId::BLUE, 0.0);
    let dummy = deploy(&mut room, 2, TeamId::RED, 10.0);
    equip(&mut room, berserker, "Berserker", "cleave");

    let damages: Vec<f32> = (0..8)
        .map(|_| room.resolve_attack(berserker, dummy, 5.0).unwrap().damage)
        .collect();

    assert_eq!(damages[..3], [5.0_f32; 3]);
    assert!((damages[3] - 7.0).abs() < 1e-5);
    assert_eq!(damages[4..7], [5.0_f32; 3]);
    assert!((damages[7] - 7.0).abs() < 1e-5);

    let state = room.unit(berserker).unwrap().perk_state;
    assert_eq!(state.attack_count, 0);
    assert_eq!(state.last_target_id, Some(dummy));
}

#[test]
fn war_banner_buffs_ally_damage_only_from_a_leader() {
    let mut room = room();
    let captain = deploy(&mut room, 1, TeamId::BLUE, 0.0);
    let soldier = deploy(&mut room, 2, TeamId::BLUE, 20.0);
    let enemy = deploy(&mut room, 3, TeamId::RED, 40.0);
    equip(&mut room, captain, "Vanguard Captain", "war_banner");

    run_for(&mut room, Duration::from_millis(200));
    assert_eq!(room.attack_buff(soldier), 1.0);

    room.despawn(captain).unwrap();
    room.deploy(
        UnitRuntime::new(captain, TeamId::BLUE, Position::ORIGIN, 100.0).squad_leader(),
    )
    .unwrap();
    equip(&mut room, captain, "Vanguard Captain", "war_banner");
    run_for(&mut room, Duration::from_millis(200));
    assert!((room.attack_buff(soldier) - 1.10).abs() < 1e-6);
    assert_eq!(room.attack_buff(captain), 1.0);

    let outcome = room.resolve_attack(soldier, enemy, 10.0).unwrap();
    assert!((outcome.damage - 11.0).abs() < 1e-5);
}

#[test]
fn shield_wall_and_last_stand_reduce_incoming_damage() {
    let mut room = room();
    let bearer = deploy(&mut room, 1, TeamId::BLUE, 0.0);
    let buddy = deploy(&mut room, 2, TeamId::BLUE, 100.0);
    let raider = deploy(&mut room, 3, TeamId::RED, 50.0);
    equip(&mut room, bearer, "Vanguard Captain", "shield_wall");

    let near = room.resolve_attack(raider, bearer, 20.0).unwrap();
    assert!((near.damage_taken_multiplier - 0.85).abs() < 1e-6);
    assert!((near.damage - 17.0).abs() < 1e-4);

    room.move_unit(buddy, Position::new(500.0, 0.0)).unwrap();
    let alone = room.resolve_attack(raider, bearer, 20.0).unwrap();
    assert_eq!(alone.damage_taken_multiplier, 1.0);

    let berserker = deploy(&mut room, 4, TeamId::BLUE, 0.0);
    equip(&mut room, berserker, "Berserker", "last_stand");
    let healthy = room.resolve_attack(raider, berserker, 75.0).unwrap();
    assert_eq!(healthy.damage, 75.0);
    let wounded = room.resolve_attack(raider, berserker, 20.0).unwrap();
    assert!((wounded.damage - 15.0).abs() < 1e-5);
}

#[test]
fn dead_ally_gives_no_shield_wall_reduction() {
    let mut room = room();
    let captain = deploy(&mut room, 1, TeamId::BLUE, 0.0);
    let ally = deploy(&mut room, 2, TeamId::BLUE, 50.0);
    let raider = deploy(&mut room, 3, TeamId::RED, 30.0);
    equip(&mut room, captain, "Vanguard Captain", "shield_wall");

    let guarded = room.resolve_attack(raider, captain, 20.0).unwrap();
    assert!((guarded.damage_taken_multiplier - 0.85).abs() < 1e-6);

    assert_eq!(room.kill(ally), Ok(true));
    let exposed = room.resolve_attack(raider, captain, 20.0).unwrap();
    assert_eq!(exposed.damage_taken_multiplier, 1.0);
    assert_eq!(exposed.damage, 20.0);
}

#[test]
fn corpses_receive_no_aura_effects() {
    let mut room = room();
    let cryo = deploy(&mut room, 1, TeamId::BLUE, 0.0);
    let grunt = deploy(&mut room, 2, TeamId::RED, 30.0);
    equip(&mut room, cryo, "Cryomancer", "frost_aura");
    assert_eq!(room.kill(grunt), Ok(true));

    run_for(&mut room, Duration::from_millis(400));
    assert_eq!(room.slow_pct(grunt), 0.0);
    assert!(room.command_log().is_empty());
}

#[test]
fn frozen_veil_fires_exactly_once_on_death() {
    let mut room = room();
    let cryo = deploy(&mut room, 1, TeamId::RED, 0.0);
    let near = deploy(&mut room, 2, TeamId::BLUE, 50.0);
    let far = deploy(&mut room, 3, TeamId::BLUE, 100.0);
    let friend = deploy(&mut room, 4, TeamId::RED, 10.0);
    equip(&mut room, cryo, "Cryomancer", "frozen_veil");

    let outcome = room.resolve_attack(near, cryo, 500.0).unwrap();
    assert!(outcome.killed);
    assert!(!room.unit(cryo).unwrap().alive);

    assert_eq!(room.slow_pct(near), 0.50);
    assert_eq!(room.slow_pct(far), 0.0);
    assert_eq!(room.slow_pct(friend), 0.0);
    let veil_calls = room
        .command_log()
        .entries()
        .iter()
        .filter(|call| call.tag() == EffectTag::FROZEN_VEIL)
        .count();
    assert_eq!(veil_calls, 1);

    assert_eq!(
        room.resolve_attack(near, cryo, 1.0),
        Err(RoomError::UnitDead(cryo))
    );
    assert_eq!(room.kill(cryo), Ok(false));

    run_for(&mut room, Duration::from_millis(1950));
    assert_eq!(room.slow_pct(near), 0.50);
    run_for(&mut room, Duration::from_millis(50));
    assert_eq!(room.slow_pct(near), 0.0);
}

#[test]
fn unknown_perk_leaves_unit_without_perk() {
    let mut room = room();
    let cryo = deploy(&mut room, 1, TeamId::BLUE, 0.0);
    let grunt = deploy(&mut room, 2, TeamId::RED, 5.0);

    assert_eq!(
        room.equip(cryo, PerkCatalog::builtin(), "Cryomancer", "cleave"),
        Ok(false)
    );
    assert!(room.unit(cryo).unwrap().active_perk.is_none());

    run_for(&mut room, Duration::from_millis(400));
    assert_eq!(room.slow_pct(grunt), 0.0);
    assert!(room.command_log().is_empty());
}

fn scripted_battle() -> BattleRoom {
    let mut room = room();
    let cryo = deploy(&mut room, 1, TeamId::BLUE, 0.0);
    let captain = deploy(&mut room, 2, TeamId::RED, 40.0);
    let soldier = deploy(&mut room, 3, TeamId::RED, 45.0);
    let veil = deploy(&mut room, 4, TeamId::BLUE, 60.0);
    equip(&mut room, cryo, "Cryomancer", "frost_aura");
    equip(&mut room, veil, "Cryomancer", "frozen_veil");
    room.despawn(captain).unwrap();
    let leader = UnitRuntime::new(captain, TeamId::RED, Position::new(40.0, 0.0), 100.0);
    room.deploy(leader.squad_leader()).unwrap();
    equip(&mut room, captain, "Vanguard Captain", "war_banner");

    for frame in 0..40 {
        room.step(FRAME);
        if frame % 5 == 0 {
            let _ = room.resolve_attack(soldier, veil, 12.0);
        }
    }
    room
}

#[test]
fn replays_produce_identical_command_digests() {
    let first = scripted_battle();
    let second = scripted_battle();

    assert!(!first.command_log().is_empty());
    assert_eq!(first.command_log(), second.command_log());
    assert_eq!(
        hex::encode(first.command_log().digest()),
        hex::encode(second.command_log().digest())
    );
}
