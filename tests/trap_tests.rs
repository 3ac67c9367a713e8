// tests/trap_tests.rs
//! Searching, disarming and stepping on traps.

mod helpers;

use combat::EffectKind;
use dungeon::{Tile, Trap, TrapKind};
use helpers::ArenaBuilder;
use items::ToolKind;
use pretty_assertions::assert_eq;

const SEARCH: usize = 3;

fn trap_at(session: &dungeon_crawler::GameSession, x: i32, y: i32) -> Trap {
    *session.map().get(x, y).and_then(Tile::as_trap).unwrap()
}

#[test]
fn test_search_total_meeting_dc_reveals_trap() {
    let spike = Trap::new(TrapKind::Spike, 1);
    assert_eq!(spike.detection_dc, 12);
    // natural 12 + INT 1 + proficiency 2
    let (mut session, _) = ArenaBuilder::new().tile(6, 5, Tile::Trap(spike)).rolls([12]).build();

    assert!(session.use_ability(SEARCH));

    assert!(trap_at(&session, 6, 5).is_revealed());
    assert!(session.messages().contains("You spot a spike trap!"));
    assert!(session.player_acted());
}

#[test]
fn test_search_total_below_dc_keeps_trap_hidden() {
    let spike = Trap::new(TrapKind::Spike, 1);
    // natural 7 + 3 = 10
    let (mut session, _) = ArenaBuilder::new().tile(6, 5, Tile::Trap(spike)).rolls([7]).build();

    assert!(session.use_ability(SEARCH));

    assert!(trap_at(&session, 6, 5).is_hidden());
    assert!(session.messages().contains("You search but find nothing."));
    // hidden traps still draw as floor
    assert_eq!(session.map().get(6, 5).unwrap().info().glyph, Tile::Floor.info().glyph);
}

#[test]
fn test_search_only_reaches_adjacent_cells() {
    let spike = Trap::new(TrapKind::Spike, 1);
    let (mut session, _) = ArenaBuilder::new().tile(7, 5, Tile::Trap(spike)).rolls([20]).build();

    assert!(session.use_ability(SEARCH));
    assert!(trap_at(&session, 7, 5).is_hidden());
}

#[test]
fn test_search_rolls_separately_for_each_trap() {
    let spike = Trap::new(TrapKind::Spike, 1);
    // cells are searched row by row: (6, 4) gets the 5, (6, 6) the 20
    let (mut session, _) = ArenaBuilder::new()
        .tile(6, 4, Tile::Trap(spike))
        .tile(6, 6, Tile::Trap(spike))
        .rolls([5, 20])
        .build();

    assert!(session.use_ability(SEARCH));

    assert!(trap_at(&session, 6, 4).is_hidden());
    assert!(trap_at(&session, 6, 6).is_revealed());
    assert_eq!(
        session.messages().iter().filter(|m| m.text == "You spot a spike trap!").count(),
        1
    );
}

#[test]
fn test_disarm_without_thieves_tools() {
    let trap = Trap::new(TrapKind::Spike, 1).revealed();
    let (mut session, _) = ArenaBuilder::new()
        .tile(6, 5, Tile::Trap(trap))
        .hero(|hero| {
            hero.bag.remove(0).expect("the kit starts with tools");
        })
        .build();
    assert!(!session.player().bag.has_tool(ToolKind::ThievesTools));

    assert!(!session.disarm_trap(1, 0));

    assert!(session.messages().contains("You need Thieves' Tools for that."));
    assert!(trap_at(&session, 6, 5).is_armed());
}

#[test]
fn test_disarm_needs_a_revealed_trap() {
    let trap = Trap::new(TrapKind::Spike, 1);
    let (mut session, _) = ArenaBuilder::new().tile(6, 5, Tile::Trap(trap)).build();

    assert!(!session.disarm_trap(1, 0));
    assert!(session.messages().contains("That trap has not been found yet."));
    assert!(!session.player_acted());
}

#[test]
fn test_disarm_only_in_cardinal_directions() {
    let trap = Trap::new(TrapKind::Spike, 1).revealed();
    let (mut session, _) = ArenaBuilder::new().tile(6, 6, Tile::Trap(trap)).build();

    assert!(!session.disarm_trap(1, 1));
    assert!(trap_at(&session, 6, 6).is_armed());
}

#[test]
fn test_successful_disarm() {
    let trap = Trap::new(TrapKind::Spike, 1).revealed();
    // natural 10 + DEX 3 + proficiency 2 against DC 12
    let (mut session, _) = ArenaBuilder::new().tile(6, 5, Tile::Trap(trap)).rolls([10]).build();

    assert!(session.disarm_trap(1, 0));

    let trap = trap_at(&session, 6, 5);
    assert!(trap.is_spent());
    assert!(!trap.is_armed());
    // a disarmed trap is safe to walk over
    let hp = session.player().hp;
    assert!(session.handle_player_move(1, 0));
    assert_eq!(session.player().hp, hp);
}

#[test]
fn test_failed_disarm_can_set_the_trap_off() {
    let trap = Trap::new(TrapKind::Spike, 1).revealed();
    // fail the check, lose the 50% roll, 4 on the d6
    let (mut session, _) = ArenaBuilder::new()
        .tile(6, 5, Tile::Trap(trap))
        .rolls([1, 30, 4])
        .build();
    let hp = session.player().hp;

    assert!(session.disarm_trap(1, 0));

    assert_eq!(session.player().hp, hp - 4);
    assert!(trap_at(&session, 6, 5).is_spent());
    assert!(session.messages().contains("goes off"));
}

#[test]
fn test_failed_disarm_may_leave_the_trap_armed() {
    let trap = Trap::new(TrapKind::Spike, 1).revealed();
    let (mut session, _) = ArenaBuilder::new()
        .tile(6, 5, Tile::Trap(trap))
        .rolls([1, 90])
        .build();
    let hp = session.player().hp;

    assert!(session.disarm_trap(1, 0));

    assert_eq!(session.player().hp, hp);
    assert!(trap_at(&session, 6, 5).is_armed());
}

#[test]
fn test_hidden_fire_trap_burns_on_failed_save() {
    let fire = Trap::new(TrapKind::Fire, 4);
    // 2d4+1 damage, then a DEX save rolled as a natural 1
    let (mut session, _) = ArenaBuilder::new()
        .tile(6, 5, Tile::Trap(fire))
        .rolls([2, 2, 1])
        .build();
    let hp = session.player().hp;

    assert!(session.handle_player_move(1, 0));

    assert_eq!(session.player().position(), (6, 5));
    assert_eq!(session.player().hp, hp - 5);
    assert!(session.player().effects.has(EffectKind::Burning));
    assert!(trap_at(&session, 6, 5).is_spent());
}

#[test]
fn test_poison_dart_resisted_on_good_save() {
    let dart = Trap::new(TrapKind::PoisonDart, 1);
    // natural 18 + CON 2 beats DC 12
    let (mut session, _) = ArenaBuilder::new()
        .tile(6, 5, Tile::Trap(dart))
        .rolls([3, 18])
        .build();

    assert!(session.handle_player_move(1, 0));

    assert!(!session.player().effects.has(EffectKind::Poisoned));
    assert!(session.messages().contains("You resist"));
}

#[test]
fn test_trap_damage_can_kill() {
    let spike = Trap::new(TrapKind::Spike, 1);
    let (mut session, _) = ArenaBuilder::new()
        .tile(6, 5, Tile::Trap(spike))
        .rolls([6])
        .hero(|hero| hero.hp = 2)
        .build();

    assert!(session.handle_player_move(1, 0));

    assert!(session.is_game_over());
    assert!(session.messages().contains("You have died."));
}
