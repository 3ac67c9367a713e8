// tests/session_tests.rs
//! Tavern, stairs and doors, NPC services and level generation end to end.

mod helpers;

use combat::{Combatant, DungeonRng, EffectKind, StatusEffect};
use dungeon::{GeneratedLevel, Npc, NpcKind, Tile, Visibility, generate_tavern};
use dungeon_crawler::{Actor, CoreConfig, EntityId, GameSession, StairsDirection};
use helpers::ArenaBuilder;
use hero::Hero;
use pretty_assertions::assert_eq;

const EVASION: usize = 1;

fn seeded(seed: u64) -> GameSession {
    GameSession::new(CoreConfig::default(), Box::new(DungeonRng::new(seed)))
}

fn adventurer() -> Hero {
    Hero::adventurer(CoreConfig::default().rules.inventory_capacity)
}

/// The tavern with the given hero standing where `place` says.
fn tavern_with(seed: u64, hero: Hero, place: impl FnOnce(&GeneratedLevel) -> (i32, i32)) -> GameSession {
    let mut tavern = generate_tavern();
    tavern.player_start = place(&tavern);
    GameSession::from_level(CoreConfig::default(), Box::new(DungeonRng::new(seed)), hero, tavern)
}

fn on_the_door(seed: u64) -> GameSession {
    tavern_with(seed, adventurer(), |tavern| tavern.door.expect("the tavern has a door"))
}

#[test]
fn test_new_session_starts_in_the_tavern() {
    let session = seeded(1);

    assert!(session.is_tavern());
    assert_eq!(session.depth(), 0);
    assert!(session.door().is_some());
    assert_eq!(session.get_current_entity(), Some(EntityId::PLAYER));
    assert_eq!(session.fov().classify(0, 0), Visibility::VisibleByPlayer);
    assert!(session.entities().iter().any(|e| e.as_npc().is_some()));
}

#[test]
fn test_tavern_door_leads_to_level_one() {
    let mut session = on_the_door(7);
    assert!(session.is_tavern());
    assert!(session.check_door_interaction());

    // changing level is free
    assert!(!session.use_door());

    assert!(!session.is_tavern());
    assert_eq!(session.depth(), 1);
    assert!(session.stairs_up().is_none());
    let (px, py) = session.player().position();
    assert!(session.map().is_walkable(px, py));
    assert_eq!(session.fov().classify(px, py), Visibility::VisibleByPlayer);
    assert!(session.turns().contains(EntityId::PLAYER));
    assert!(session.messages().contains("You enter dungeon level 1."));
}

#[test]
fn test_door_requires_standing_on_it() {
    let mut session = seeded(7);

    assert!(!session.use_door());
    assert!(session.is_tavern());
}

#[test]
fn test_dungeon_door_returns_to_the_tavern() {
    let (mut session, _) = ArenaBuilder::new().door(6, 5).player_at(6, 5).build();

    assert!(!session.use_door());

    assert!(session.is_tavern());
    assert_eq!(session.depth(), 0);
}

#[test]
fn test_descend_requires_stairs() {
    let (mut session, _) = ArenaBuilder::new().build();

    assert!(!session.descend());
    assert!(session.messages().contains("There is nothing to descend there."));
    assert_eq!(session.depth(), 1);
}

#[test]
fn test_descend_lands_on_the_up_stairs() {
    let (mut session, _) = ArenaBuilder::new().stairs_down(5, 5).build();
    assert_eq!(session.check_stairs_interaction(), Some(StairsDirection::Down));

    assert!(!session.descend());

    assert_eq!(session.depth(), 2);
    let up = session.stairs_up().unwrap();
    assert_eq!(session.player().position(), up);
    assert_eq!(session.map().get(up.0, up.1), Some(&Tile::StairsUp));
    assert_eq!(session.check_stairs_interaction(), Some(StairsDirection::Up));
}

#[test]
fn test_new_level_starts_with_the_players_turn_open() {
    let (mut session, _) = ArenaBuilder::new().stairs_down(5, 5).build();
    // a bonus action leaves the turn open and starts a cooldown
    assert!(!session.use_ability(EVASION));
    let cooldown = session.player().abilities[EVASION].current_cooldown;
    assert!(cooldown > 0);

    assert!(!session.descend());
    if session.is_game_over() {
        return;
    }

    assert_eq!(session.get_current_entity(), Some(EntityId::PLAYER));
    assert!(!session.player_acted());
    // entering the level does not count as a new turn
    assert_eq!(session.player().abilities[EVASION].current_cooldown, cooldown);
    assert!(session.handle_player_move(0, 0));
}

#[test]
fn test_climbing_from_level_two_arrives_on_the_down_stairs() {
    let (mut session, _) = ArenaBuilder::new().stairs_down(5, 5).build();
    session.descend();
    if session.is_game_over() {
        return;
    }

    session.ascend();

    assert_eq!(session.depth(), 1);
    if let Some(down) = session.stairs_down() {
        assert_eq!(session.player().position(), down);
    }
}

#[test]
fn test_generated_levels_keep_monsters_off_the_player() {
    let mut session = on_the_door(42);
    session.use_door();
    assert_eq!(session.depth(), 1);

    let player = session.player().position();
    for entity in session.entities() {
        assert_ne!(entity.position(), player);
        if let Actor::Monster(monster) = &entity.actor {
            assert!(session.map().is_walkable(monster.x, monster.y));
            assert_eq!(session.turns().contains(entity.id), !monster.disguised);
        }
    }
}

#[test]
fn test_healer_serves_once() {
    let (mut session, _) = ArenaBuilder::new()
        .npc(Npc::healer(6, 5))
        .hero(|hero| hero.hp = 3)
        .build();

    assert!(session.interact_with_npc());
    assert_eq!(session.player().hp, session.player().max_hp);
    assert!(session.messages().contains("The healer restores"));

    assert!(!session.interact_with_npc());
    assert!(session.messages().contains("The healer has nothing left to give."));
}

#[test]
fn test_barkeep_rest_clears_effects() {
    let mut hero = adventurer();
    hero.hp = 1;
    hero.apply_effect(StatusEffect::new(EffectKind::Poisoned, 3));
    let mut session = tavern_with(3, hero, |tavern| {
        let barkeep = tavern
            .npcs
            .iter()
            .find(|npc| npc.kind == NpcKind::Barkeep)
            .expect("the tavern has a barkeep");
        (barkeep.x, barkeep.y + 1)
    });

    // resting in the tavern is free
    assert!(!session.interact_with_npc());
    assert_eq!(session.player().hp, session.player().max_hp);
    assert!(session.player().effects.is_empty());
    assert!(session.messages().contains("You rest and wake refreshed."));
}

#[test]
fn test_npcs_block_movement() {
    let (mut session, _) = ArenaBuilder::new().npc(Npc::healer(6, 5)).build();

    assert!(!session.handle_player_move(1, 0));
    assert_eq!(session.player().position(), (5, 5));
    assert!(session.player().is_alive());
}

#[test]
fn test_walls_block_and_crates_break() {
    let (mut session, _) = ArenaBuilder::new()
        .tile(4, 5, Tile::Wall)
        .tile(6, 5, Tile::Crate)
        .build();

    assert!(!session.handle_player_move(-1, 0));
    assert!(session.messages().contains("You can't move there."));

    assert!(session.handle_player_move(1, 0));
    assert_eq!(session.player().position(), (5, 5));
    assert_eq!(session.map().get(6, 5), Some(&Tile::Floor));
}

#[test]
fn test_messages_are_bounded() {
    let mut config = CoreConfig::default();
    config.rules.message_capacity = 3;
    let (mut session, _) = ArenaBuilder::new().config(config).build();

    for _ in 0..5 {
        session.pickup_item();
    }
    assert_eq!(session.messages().len(), 3);
}
