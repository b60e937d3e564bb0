use bevy::math::Vec2;

use super::*;
use crate::sim::geom::Rect;
use crate::sim::player::{Carry, Player};

#[test]
fn portal_stays_active_once_activated() {
    let mut portal = Portal::new(Vec2::new(560.0, 10.0));
    assert!(!portal.active);
    portal.activate();
    portal.update();
    assert!(portal.active);
    assert_eq!(portal.rect(), Rect::new(560.0, 10.0, 80.0, 60.0));
}

#[test]
fn spore_floats_around_its_rest_point() {
    let mut spore = Spore::new(Vec2::new(600.0, 400.0));
    for _ in 0..100 {
        spore.update();
        let c = spore.center();
        assert_eq!(c.x, 600.0);
        assert!((c.y - 400.0).abs() <= 8.0);
    }
    assert_eq!(spore.rect().w, 30.0);
}

#[test]
fn magnet_pulls_only_within_range() {
    let mut spore = Spore::new(Vec2::new(600.0, 400.0));
    spore.attract(Vec2::new(600.0, 800.0));
    assert_eq!(spore.pos, Vec2::new(600.0, 400.0));

    spore.attract(Vec2::new(400.0, 400.0));
    assert_eq!(spore.pos, Vec2::new(594.0, 400.0));

    // Never overshoots the target.
    let mut close = Spore::new(Vec2::new(100.0, 100.0));
    close.attract(Vec2::new(102.0, 100.0));
    assert_eq!(close.pos, Vec2::new(102.0, 100.0));
}

#[test]
fn shop_item_rect_is_centred() {
    let mut item = ShopItem {
        name: "Extra Life".into(),
        kind: ShopItemKind::Life,
        cost: 5,
        description: "+1 life".into(),
        pos: Vec2::new(300.0, 600.0),
        purchased: false,
        hover: false,
    };
    assert_eq!(item.rect(), Rect::new(240.0, 560.0, 120.0, 80.0));
    assert!(item.check_hover(&Rect::new(250.0, 580.0, 40.0, 60.0)));
    assert!(!item.check_hover(&Rect::new(0.0, 0.0, 40.0, 60.0)));
}

#[test]
fn purchases_apply_effects() {
    let mut p = Player::new(Vec2::ZERO, &Carry::default());
    assert_eq!(ShopItemKind::LifeBundle.apply(&mut p), 3);
    assert_eq!(ShopItemKind::WeaponSpread.apply(&mut p), 0);
    assert_eq!(ShopItemKind::Shield.apply(&mut p), 0);
    assert!(p.unlocks.spread);
    assert!(p.modifiers.shield);
    assert!(!p.modifiers.pierce);
    assert_eq!(ShopItemKind::parse("extra_jump"), Some(ShopItemKind::ExtraJump));
    assert_eq!(ShopItemKind::parse("laser"), None);
}
