//! Defend-the-Village tuning

/// Horizon row where animals appear
pub const HORIZON_Y: f32 = 180.0;
/// Village fence; an approaching animal reaching it breaches
pub const VILLAGE_Y: f32 = 560.0;
/// Lateral spawn/drift band
pub const SPAWN_X_MIN: f32 = 60.0;
pub const SPAWN_X_MAX: f32 = 420.0;
/// Depth scale at the horizon and at the fence
pub const MIN_SCALE: f32 = 0.35;
pub const MAX_SCALE: f32 = 1.0;
/// Maximum lateral drift per frame
pub const MAX_DRIFT: f32 = 0.5;

/// Hit radius = visual radius * scale * this
pub const HIT_RADIUS_MULT: f32 = 1.2;
/// Knockback on a non-lethal hit (px)
pub const KNOCKBACK: f32 = 14.0;
pub const HIT_FLASH_FRAMES: u32 = 6;
pub const RETREAT_SPEED: f32 = 3.0;

/// Reticle
pub const RETICLE_SPEED: f32 = 6.0;
pub const RETICLE_MIN_X: f32 = 10.0;
pub const RETICLE_MAX_X: f32 = 470.0;
pub const RETICLE_MIN_Y: f32 = 100.0;
pub const RETICLE_MAX_Y: f32 = 600.0;

/// Weapon
pub const MAX_AMMO: u32 = 6;
pub const RELOAD_FRAMES: u32 = 90;
pub const SHOT_COOLDOWN: u32 = 8;

/// Village health at the start of a run
pub const VILLAGE_HP: u32 = 10;

/// Combo scoring
pub const COMBO_WINDOW: u32 = 120;
pub const COMBO_BONUS: f32 = 0.1;

/// Transient phase after a cleared level
pub const LEVELUP_FRAMES: u32 = 150;
/// At most this many animals approach at once; extra spawns are dropped
pub const MAX_APPROACHING: usize = 8;
/// The boss only shows up once the field has thinned to this many regulars
pub const BOSS_THINNED_MAX: usize = 2;
/// First spawns of a run are always wolves
pub const WARMUP_SPAWNS: u32 = 3;

/// Per-kind stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimalStats {
    pub hp: u32,
    pub speed: f32,
    pub radius: f32,
    pub points: u32,
    /// Village hp lost on breach
    pub damage: u32,
}

pub const WOLF: AnimalStats = AnimalStats {
    hp: 1,
    speed: 1.1,
    radius: 26.0,
    points: 100,
    damage: 1,
};

pub const BOAR: AnimalStats = AnimalStats {
    hp: 2,
    speed: 0.8,
    radius: 32.0,
    points: 150,
    damage: 1,
};

pub const BEAR: AnimalStats = AnimalStats {
    hp: 3,
    speed: 0.55,
    radius: 42.0,
    points: 250,
    damage: 2,
};

/// Boss hp comes from the level table
pub const BOSS: AnimalStats = AnimalStats {
    hp: 0,
    speed: 0.35,
    radius: 64.0,
    points: 1000,
    damage: 5,
};

/// Base weights (wolf, boar, bear)
pub const BASE_WEIGHTS: [f32; 3] = [45.0, 35.0, 20.0];
/// Weight moved from wolves to bears per level
pub const WEIGHT_SHIFT_PER_LEVEL: f32 = 5.0;

/// One level of the defense
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelParams {
    /// Regular animals before the boss
    pub quota: u32,
    pub start_interval: u32,
    pub min_interval: u32,
    pub speed_mult: f32,
    pub boss_hp: u32,
}

pub const LEVELS: [LevelParams; 3] = [
    LevelParams {
        quota: 20,
        start_interval: 90,
        min_interval: 40,
        speed_mult: 1.0,
        boss_hp: 10,
    },
    LevelParams {
        quota: 26,
        start_interval: 80,
        min_interval: 34,
        speed_mult: 1.15,
        boss_hp: 14,
    },
    LevelParams {
        quota: 32,
        start_interval: 70,
        min_interval: 28,
        speed_mult: 1.3,
        boss_hp: 18,
    },
];

/// Parameters for a level index, saturating at the last level
pub fn level_params(level: u32) -> LevelParams {
    LEVELS[(level as usize).min(LEVELS.len() - 1)]
}

/// Spawn weights (wolf, boar, bear) for a level
pub fn kind_weights(level: u32) -> [f32; 3] {
    let shift = WEIGHT_SHIFT_PER_LEVEL * level as f32;
    [
        (BASE_WEIGHTS[0] - shift).max(5.0),
        BASE_WEIGHTS[1],
        BASE_WEIGHTS[2] + shift,
    ]
}

/// Depth scale for a screen row
pub fn scale_at(y: f32) -> f32 {
    let t = ((y - HORIZON_Y) / (VILLAGE_Y - HORIZON_Y)).clamp(0.0, 1.0);
    MIN_SCALE + t * (MAX_SCALE - MIN_SCALE)
}
