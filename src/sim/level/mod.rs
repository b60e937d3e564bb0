//! Level descriptors and the factories that turn them into live entities.
//!
//! Descriptors are JSON; the built-in sets are embedded at compile time so
//! the binary and headless tests see identical data.

use std::fmt;

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::geom::Rect;
use crate::sim::monsters::{Monster, MonsterId, MonsterKind, Spawn};
use crate::sim::pickups::{ShopItem, ShopItemKind};
use crate::sim::platform::Platform;

const DEFAULT_AGGRO_DURATION: u32 = 180;

pub const CAMPAIGN: &[&str] = &[
    include_str!("../../../assets/levels/level1.json"),
    include_str!("../../../assets/levels/level2.json"),
    include_str!("../../../assets/levels/shop1.json"),
    include_str!("../../../assets/levels/level3.json"),
    include_str!("../../../assets/levels/level4.json"),
];

pub const TUTORIAL: &[&str] = &[
    include_str!("../../../assets/levels/tutorial1.json"),
    include_str!("../../../assets/levels/tutorial2.json"),
];

#[derive(Debug)]
pub enum LevelError {
    Parse(serde_json::Error),
    MissingSpawn,
    /// A run was started with no levels to play.
    EmptySequence,
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Parse(e) => write!(f, "malformed level descriptor: {e}"),
            LevelError::MissingSpawn => f.write_str("level descriptor has no player_spawn"),
            LevelError::EmptySequence => f.write_str("level sequence is empty"),
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Parse(e) => Some(e),
            LevelError::MissingSpawn | LevelError::EmptySequence => None,
        }
    }
}

impl From<serde_json::Error> for LevelError {
    fn from(e: serde_json::Error) -> Self {
        LevelError::Parse(e)
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl From<Point> for Vec2 {
    fn from(p: Point) -> Self {
        Vec2::new(p.x, p.y)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PlatformData {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default = "default_platform_color")]
    pub color: [u8; 3],
    #[serde(default)]
    pub bouncy: bool,
    #[serde(default)]
    pub unstable: bool,
}

impl PlatformData {
    pub fn build(&self) -> Platform {
        let rect = Rect::new(self.x, self.y, self.width, self.height);
        if self.bouncy {
            Platform::bouncy(rect, self.color)
        } else if self.unstable {
            Platform::unstable(rect, self.color)
        } else {
            Platform::normal(rect, self.color)
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct MonsterData {
    #[serde(rename = "type", default = "default_monster_type")]
    pub kind: String,
    pub x: f32,
    pub y: f32,
    pub patrol_range: f32,
    pub speed: f32,
    pub health: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggro_duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,
}

impl MonsterData {
    /// `None` for an unrecognised type name.
    pub fn spawn(&self) -> Option<Spawn> {
        Some(Spawn {
            kind: MonsterKind::parse(&self.kind)?,
            pos: Vec2::new(self.x, self.y),
            patrol_range: self.patrol_range,
            speed: self.speed,
            health: self.health,
            aggro_duration: self.aggro_duration.unwrap_or(DEFAULT_AGGRO_DURATION),
            size: self.size.unwrap_or(1.0),
        })
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ShopItemData {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub cost: u32,
    #[serde(default)]
    pub description: String,
    pub x: f32,
    pub y: f32,
}

impl ShopItemData {
    pub fn build(&self) -> Option<ShopItem> {
        Some(ShopItem {
            name: self.name.clone(),
            kind: ShopItemKind::parse(&self.kind)?,
            cost: self.cost,
            description: self.description.clone(),
            pos: Vec2::new(self.x, self.y),
            purchased: false,
            hover: false,
        })
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct LevelData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub player_spawn: Option<Point>,
    #[serde(default)]
    pub platforms: Vec<PlatformData>,
    #[serde(default)]
    pub monsters: Vec<MonsterData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portal_position: Option<Point>,
    #[serde(default = "default_background")]
    pub background_color: [u8; 3],
    #[serde(default)]
    pub is_shop: bool,
    #[serde(default)]
    pub shop_items: Vec<ShopItemData>,
}

impl LevelData {
    /// Parse and validate a descriptor.
    pub fn from_json(text: &str) -> Result<Self, LevelError> {
        let level: LevelData = serde_json::from_str(text)?;
        level.spawn()?;
        Ok(level)
    }

    pub fn spawn(&self) -> Result<Vec2, LevelError> {
        self.player_spawn.map(Vec2::from).ok_or(LevelError::MissingSpawn)
    }

    pub fn build_platforms(&self) -> Vec<Platform> {
        self.platforms.iter().map(PlatformData::build).collect()
    }

    /// Live monsters with ids from `first_id`, plus how many entries were
    /// dropped for naming an unknown type.
    pub fn build_monsters(&self, first_id: u32) -> (Vec<Monster>, usize) {
        let monsters: Vec<Monster> = self
            .monsters
            .iter()
            .filter_map(MonsterData::spawn)
            .enumerate()
            .map(|(i, spawn)| Monster::spawn(MonsterId(first_id + i as u32), &spawn))
            .collect();
        let dropped = self.monsters.len() - monsters.len();
        (monsters, dropped)
    }

    pub fn build_shop_items(&self) -> Vec<ShopItem> {
        self.shop_items.iter().filter_map(ShopItemData::build).collect()
    }
}

/// Parse a whole embedded set.
pub fn parse_all(sources: &[&str]) -> Result<Vec<LevelData>, LevelError> {
    sources.iter().map(|s| LevelData::from_json(s)).collect()
}

fn default_platform_color() -> [u8; 3] {
    [100, 100, 100]
}

fn default_background() -> [u8; 3] {
    [30, 35, 45]
}

fn default_monster_type() -> String {
    "walker".to_string()
}

#[cfg(test)]
mod tests;
