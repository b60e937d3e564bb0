use super::*;
use crate::sim::platform::PlatformKind;

const MINIMAL: &str = r#"{
    "player_spawn": { "x": 100, "y": 650 },
    "platforms": [
        { "x": 0, "y": 750, "width": 1200, "height": 50, "color": [1, 2, 3] },
        { "x": 200, "y": 600, "width": 100, "height": 20, "bouncy": true },
        { "x": 400, "y": 600, "width": 100, "height": 20, "unstable": true }
    ],
    "monsters": [
        { "type": "walker", "x": 500, "y": 710, "patrol_range": 100, "speed": 2, "health": 3 },
        { "type": "dragon", "x": 600, "y": 710, "patrol_range": 100, "speed": 2, "health": 3 },
        { "type": "snake", "x": 700, "y": 710, "patrol_range": 100, "speed": 2, "health": 3, "aggro_duration": 90 }
    ]
}"#;

#[test]
fn parses_platform_kinds_and_defaults() {
    let level = LevelData::from_json(MINIMAL).expect("valid level");
    assert_eq!(level.spawn().expect("spawn"), Vec2::new(100.0, 650.0));
    assert!(!level.is_shop);
    assert_eq!(level.background_color, [30, 35, 45]);
    assert!(level.portal_position.is_none());

    let platforms = level.build_platforms();
    assert_eq!(platforms.len(), 3);
    assert_eq!(platforms[0].color, [1, 2, 3]);
    assert!(matches!(platforms[0].kind, PlatformKind::Normal));
    assert!(matches!(platforms[1].kind, PlatformKind::Bouncy(_)));
    assert!(matches!(platforms[2].kind, PlatformKind::Unstable(_)));
}

#[test]
fn unknown_monster_types_are_filtered_not_fatal() {
    let level = LevelData::from_json(MINIMAL).expect("valid level");
    let (monsters, dropped) = level.build_monsters(10);
    assert_eq!(dropped, 1);
    assert_eq!(monsters.len(), 2);
    assert_eq!(monsters[0].kind(), MonsterKind::Walker);
    assert_eq!(monsters[1].kind(), MonsterKind::Snake);
    assert_eq!(monsters[0].id(), MonsterId(10));
    assert_eq!(monsters[1].id(), MonsterId(11));
}

#[test]
fn optional_monster_fields_fall_back() {
    let data = MonsterData {
        kind: "shriek".into(),
        x: 0.0,
        y: 0.0,
        patrol_range: 50.0,
        speed: 1.0,
        health: 2,
        aggro_duration: None,
        size: None,
    };
    let spawn = data.spawn().expect("known kind");
    assert_eq!(spawn.aggro_duration, 180);
    assert_eq!(spawn.size, 1.0);
}

#[test]
fn missing_spawn_is_rejected() {
    let err = LevelData::from_json(r#"{ "platforms": [] }"#).unwrap_err();
    assert!(matches!(err, LevelError::MissingSpawn));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = LevelData::from_json("{ not json").unwrap_err();
    assert!(matches!(err, LevelError::Parse(_)));
    assert!(err.to_string().starts_with("malformed level descriptor"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn shop_items_parse_and_skip_unknown_kinds() {
    let level = LevelData::from_json(
        r#"{
            "player_spawn": { "x": 0, "y": 0 },
            "is_shop": true,
            "shop_items": [
                { "name": "Life", "type": "life", "cost": 3, "description": "+1", "x": 100, "y": 600 },
                { "name": "Mystery", "type": "mystery", "cost": 1, "x": 300, "y": 600 }
            ]
        }"#,
    )
    .expect("valid shop");
    assert!(level.is_shop);
    let items = level.build_shop_items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].kind, ShopItemKind::Life);
    assert_eq!(items[0].cost, 3);
}

#[test]
fn embedded_sets_load() {
    let campaign = parse_all(CAMPAIGN).expect("campaign levels parse");
    assert_eq!(campaign.len(), CAMPAIGN.len());
    assert!(campaign.iter().any(|l| l.is_shop));
    for level in &campaign {
        let (_, dropped) = level.build_monsters(0);
        assert_eq!(dropped, 0, "{} names an unknown monster", level.name);
        assert_eq!(level.build_shop_items().len(), level.shop_items.len());
    }
    assert_eq!(parse_all(TUTORIAL).expect("tutorial parses").len(), TUTORIAL.len());
}
