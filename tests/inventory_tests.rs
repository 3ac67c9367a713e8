// tests/inventory_tests.rs
//! Picking up, chests, equipment and potions.

mod helpers;

use helpers::{ArenaBuilder, fill_bag};
use hero::EquipSlot;
use items::{Item, ItemKind, PotionKind, Weapon, WeaponKind};
use pretty_assertions::assert_eq;

fn potion() -> Item {
    Item::potion(PotionKind::Healing)
}

#[test]
fn test_pickup_moves_item_into_bag() {
    let (mut session, _) = ArenaBuilder::new().item(5, 5, potion()).build();
    let before = session.player().bag.len();

    assert!(session.pickup_item());

    assert_eq!(session.player().bag.len(), before + 1);
    assert!(!session.map().has_item(5, 5));
    assert!(session.messages().contains("You pick up Potion of Healing."));
}

#[test]
fn test_pickup_with_full_bag_leaves_item_on_ground() {
    let (mut session, _) = ArenaBuilder::new()
        .item(5, 5, potion())
        .hero(|hero| fill_bag(hero, 10))
        .build();

    assert!(!session.pickup_item());

    assert_eq!(session.player().bag.len(), 10);
    assert!(session.map().has_item(5, 5));
    assert!(session.messages().contains("Your pack is full."));
    assert!(!session.player_acted());
}

#[test]
fn test_pickup_with_nothing_here() {
    let (mut session, _) = ArenaBuilder::new().build();

    assert!(!session.pickup_item());
    assert!(session.messages().contains("There is nothing here to pick up."));
}

#[test]
fn test_chest_contents_fill_the_bag_and_the_rest_stay() {
    let chest = Item::chest(vec![potion(), potion(), potion()]);
    let (mut session, _) = ArenaBuilder::new()
        .item(5, 5, chest)
        .hero(|hero| fill_bag(hero, 9))
        .build();

    assert!(session.pickup_item());

    assert!(session.player().bag.is_full());
    let left = session.map().item_at(5, 5).unwrap();
    match &left.kind {
        ItemKind::Chest(chest) => assert_eq!(chest.contents.len(), 2),
        other => panic!("expected the chest to stay, found {other:?}"),
    }
}

#[test]
fn test_emptied_chest_is_removed() {
    let chest = Item::chest(vec![potion(), Item::weapon(Weapon::new(WeaponKind::Dagger))]);
    let (mut session, _) = ArenaBuilder::new().item(5, 5, chest).build();

    assert!(session.pickup_item());

    assert!(!session.map().has_item(5, 5));
    assert!(session.messages().contains("You empty the chest (2 items)."));
}

#[test]
fn test_equip_swaps_with_bag_slot() {
    let (mut session, _) = ArenaBuilder::new()
        .hero(|hero| {
            hero.bag
                .add(Item::weapon(Weapon::new(WeaponKind::Longsword)))
                .expect("room for a longsword");
        })
        .build();
    let index = session.player().bag.len() - 1;

    assert!(session.equip_item(index));

    let weapon = session.player().bag.equipment.weapon.as_ref().unwrap();
    assert_eq!(weapon.kind, WeaponKind::Longsword);
    assert_eq!(session.player().bag.get(index).unwrap().name, "Shortsword");
    assert!(session.messages().contains("You swap Shortsword for Longsword."));
}

#[test]
fn test_equip_rejects_potions() {
    let (mut session, _) = ArenaBuilder::new().build();

    // slot 1 of the starting kit is the healing potion
    assert!(!session.equip_item(1));
    assert!(session.player().bag.equipment.weapon.is_some());
}

#[test]
fn test_unequip_needs_room_in_the_bag() {
    let (mut session, _) = ArenaBuilder::new().hero(|hero| fill_bag(hero, 10)).build();

    assert!(!session.unequip(EquipSlot::Armor));
    assert!(session.player().bag.equipment.armor.is_some());

    // drinking a potion frees a slot
    assert!(session.use_item(9));
    session.advance_turn();
    assert_eq!(session.player().bag.len(), 9);
    assert!(session.unequip(EquipSlot::Armor));
    assert!(session.player().bag.equipment.armor.is_none());
    assert_eq!(session.player().bag.len(), 10);
}

#[test]
fn test_drinking_a_potion_heals_and_consumes_it() {
    let (mut session, _) = ArenaBuilder::new()
        .rolls([4, 4])
        .hero(|hero| hero.hp = 3)
        .build();
    let before = session.player().bag.len();

    assert!(session.use_item(1));

    // 2d4+2 = 10, capped at max HP
    assert_eq!(session.player().hp, session.player().max_hp);
    assert_eq!(session.player().bag.len(), before - 1);
    assert!(session.floating().iter().any(|t| t.text == "+7"));
}

#[test]
fn test_tools_cannot_be_used_directly() {
    let (mut session, _) = ArenaBuilder::new().build();

    assert!(!session.use_item(0));
    assert!(session.messages().contains("You can't use that here."));
}
