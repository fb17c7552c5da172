//! Difficulty tiers and cosmetic preferences
//!
//! A difficulty is picked once per session (or while paused) and feeds both the
//! obstacle generator and coin rewards.

use serde::{Deserialize, Serialize};

/// Difficulty tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Insane,
}

/// Obstacle geometry, probabilities and rewards for one tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    pub platform_width: f32,
    pub pillar_width: f32,
    /// Chance (0-1) a new obstacle carries a spike
    pub spike_chance: f64,
    /// Chance (0-1) a new obstacle is a pillar instead of a platform
    pub pillar_chance: f64,
    /// Scroll speed at score 0 (pixels per tick)
    pub base_speed: f32,
    /// Coins paid every `COIN_SCORE_INTERVAL` points
    pub coin_reward: u64,
    /// One-time coins for reaching the win score
    pub win_bonus: u64,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Insane,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Insane => "Insane",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            "insane" => Some(Difficulty::Insane),
            _ => None,
        }
    }

    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                platform_width: 240.0,
                pillar_width: 100.0,
                spike_chance: 0.2,
                pillar_chance: 0.15,
                base_speed: 2.5,
                coin_reward: 1,
                win_bonus: 10,
            },
            Difficulty::Normal => DifficultyProfile {
                platform_width: 200.0,
                pillar_width: 80.0,
                spike_chance: 0.35,
                pillar_chance: 0.25,
                base_speed: 3.0,
                coin_reward: 2,
                win_bonus: 25,
            },
            Difficulty::Hard => DifficultyProfile {
                platform_width: 160.0,
                pillar_width: 70.0,
                spike_chance: 0.5,
                pillar_chance: 0.35,
                base_speed: 3.5,
                coin_reward: 3,
                win_bonus: 50,
            },
            Difficulty::Insane => DifficultyProfile {
                platform_width: 130.0,
                pillar_width: 60.0,
                spike_chance: 0.65,
                pillar_chance: 0.45,
                base_speed: 4.0,
                coin_reward: 5,
                win_bonus: 100,
            },
        }
    }
}

/// Player color palette. Purely cosmetic; the renderer maps it to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ColorSet {
    #[default]
    Blue,
    Red,
    Green,
    Gold,
}

impl ColorSet {
    /// Gradient stops (start, end) as 0xRRGGBB
    pub fn gradient(&self) -> (u32, u32) {
        match self {
            ColorSet::Blue => (0x0066ff, 0x66a3ff),
            ColorSet::Red => (0xff0000, 0xff6666),
            ColorSet::Green => (0x4caf50, 0x8bd48e),
            ColorSet::Gold => (0xffd700, 0xffe866),
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "blue" => Some(ColorSet::Blue),
            "red" => Some(ColorSet::Red),
            "green" => Some(ColorSet::Green),
            "gold" => Some(ColorSet::Gold),
            _ => None,
        }
    }
}
