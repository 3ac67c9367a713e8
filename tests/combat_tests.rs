// tests/combat_tests.rs
//! Melee, opportunity attacks and experience through the session.

mod helpers;

use combat::{Ability, Combatant, EffectKind, Monster, MonsterKind};
use helpers::ArenaBuilder;
use hero::CunningChoice;
use pretty_assertions::assert_eq;

#[test]
fn test_natural_one_misses_ac_10() {
    let mut rat = Monster::new(MonsterKind::Rat, 6, 5);
    rat.attack_bonus = 0;
    let (mut session, _) = ArenaBuilder::new()
        .monster(rat, 5)
        .rolls([1])
        .hero(|hero| {
            hero.scores = combat::AbilityScores::new(12, 10, 14, 12, 12, 10);
            hero.bag.equipment.armor = None;
        })
        .build();
    assert_eq!(session.player().armor_class(), 10);
    assert_eq!(session.player().modifier(Ability::Dexterity), 0);

    let hp = session.player().hp;
    assert!(session.handle_player_move(0, 0));
    session.advance_turn();

    assert_eq!(session.player().hp, hp);
    assert!(session.messages().contains("Rat fumbles the attack!"));
    assert!(session.turns().is_players_turn());
}

#[test]
fn test_critical_hit_doubles_weapon_dice() {
    let orc = Monster::new(MonsterKind::Orc, 6, 5);
    let (mut session, ids) = ArenaBuilder::new().monster(orc, 5).rolls([20, 3, 4]).build();

    assert!(session.handle_player_attack(ids[0]));

    // 3 + 4 from 2d6, +1 STR
    let orc = session.entity(ids[0]).and_then(|e| e.as_monster()).unwrap();
    assert_eq!(orc.hp, 14 - 8);
    assert!(session.messages().contains("Critical hit!"));
    assert!(session.floating().iter().any(|t| t.text == "-8!"));
}

#[test]
fn test_attack_needs_adjacent_target() {
    let goblin = Monster::new(MonsterKind::Goblin, 8, 5);
    let (mut session, ids) = ArenaBuilder::new().monster(goblin, 5).build();

    assert!(!session.handle_player_attack(ids[0]));
    assert!(session.messages().contains("out of range"));
    assert!(!session.player_acted());
}

#[test]
fn test_bumping_a_monster_attacks_it() {
    let rat = Monster::new(MonsterKind::Rat, 6, 5);
    let (mut session, ids) = ArenaBuilder::new().monster(rat, 5).rolls([15, 2]).build();

    assert!(session.handle_player_move(1, 0));

    assert_eq!(session.player().position(), (5, 5));
    let rat = session.entity(ids[0]).and_then(|e| e.as_monster()).unwrap();
    assert_eq!(rat.hp, 4 - 3);
}

#[test]
fn test_killing_blow_awards_xp_and_levels_up() {
    let rat = Monster::new(MonsterKind::Rat, 6, 5);
    let (mut session, ids) = ArenaBuilder::new()
        .monster(rat, 5)
        .rolls([15, 6])
        .hero(|hero| hero.experience = 95)
        .build();

    assert!(session.handle_player_attack(ids[0]));
    assert_eq!(session.player().level, 2);
    assert_eq!(session.player().experience, 5);
    assert_eq!(session.player().xp_to_next, 150);
    assert!(session.messages().contains("You reach level 2!"));

    // the corpse is cleared at the next advancement
    session.advance_turn();
    assert!(session.entity(ids[0]).is_none());
    assert_eq!(helpers::order_ids(&session), vec![dungeon_crawler::EntityId::PLAYER]);
}

#[test]
fn test_one_kill_can_grant_several_levels() {
    let mut wraith = Monster::new(MonsterKind::Wraith, 6, 5);
    wraith.hp = 1;
    let (mut session, ids) = ArenaBuilder::new()
        .monster(wraith, 5)
        .rolls([15, 1])
        .hero(|hero| hero.experience = 90)
        .build();
    let max_hp = session.player().max_hp;

    assert!(session.handle_player_attack(ids[0]));

    // 270 XP: 100 for level 2, 150 for level 3, 20 carried over
    assert_eq!(session.player().level, 3);
    assert_eq!(session.player().experience, 20);
    assert_eq!(session.player().xp_to_next, 225);
    assert_eq!(session.player().max_hp, max_hp + 14);
}

#[test]
fn test_opportunity_attack_can_abort_the_move() {
    let goblin = Monster::new(MonsterKind::Goblin, 6, 5);
    let (mut session, _) = ArenaBuilder::new()
        .monster(goblin, 5)
        .rolls([20, 4])
        .hero(|hero| hero.hp = 1)
        .build();

    assert!(session.handle_player_move(-1, 0));

    assert_eq!(session.player().position(), (5, 5));
    assert!(session.is_game_over());
    assert!(session.messages().contains("lashes out"));
    assert!(session.messages().contains("You have died."));
    // nothing works after death
    assert!(!session.handle_player_move(-1, 0));
}

#[test]
fn test_no_opportunity_attack_while_staying_adjacent() {
    let goblin = Monster::new(MonsterKind::Goblin, 6, 5);
    let (mut session, _) = ArenaBuilder::new().monster(goblin, 5).build();
    let hp = session.player().hp;

    assert!(session.handle_player_move(0, 1));

    assert_eq!(session.player().position(), (5, 6));
    assert_eq!(session.player().hp, hp);
    assert!(!session.messages().contains("lashes out"));
}

#[test]
fn test_disengage_prevents_opportunity_attacks() {
    let goblin = Monster::new(MonsterKind::Goblin, 6, 5);
    let (mut session, _) = ArenaBuilder::new().monster(goblin, 5).build();
    let hp = session.player().hp;

    assert!(!session.use_ability(2));
    assert!(!session.choose_cunning_action(CunningChoice::Disengage));
    assert!(session.player().effects.has(EffectKind::Disengaged));

    assert!(session.handle_player_move(-1, 0));
    assert_eq!(session.player().position(), (4, 5));
    assert_eq!(session.player().hp, hp);
    assert!(!session.messages().contains("lashes out"));
}

#[test]
fn test_dash_makes_the_next_move_free() {
    let (mut session, _) = ArenaBuilder::new().build();

    assert!(!session.use_ability(2));
    assert!(!session.choose_cunning_action(CunningChoice::Dash));

    assert!(!session.handle_player_move(1, 0));
    assert_eq!(session.player().position(), (6, 5));
    assert!(!session.player_acted());
    assert!(!session.player().effects.has(EffectKind::CunningActionDashBuff));

    assert!(session.handle_player_move(1, 0));
    assert_eq!(session.player().position(), (7, 5));
}

#[test]
fn test_power_attack_trades_accuracy_for_damage() {
    let orc = Monster::new(MonsterKind::Orc, 6, 5);
    let (mut session, ids) = ArenaBuilder::new().monster(orc, 5).rolls([12, 1]).build();
    let plain = session.player().strike();

    // bonus action, the turn is still open
    assert!(!session.use_ability(0));
    assert!(session.player().effects.has(EffectKind::PowerAttackBuff));
    let buffed = session.player().strike();
    assert_eq!(buffed.attack_bonus, plain.attack_bonus - 3);
    assert_eq!(buffed.damage_bonus, plain.damage_bonus + 6);

    assert!(session.handle_player_attack(ids[0]));
    let orc = session.entity(ids[0]).and_then(|e| e.as_monster()).unwrap();
    assert_eq!(orc.hp, 14 - 8);
}
