//! Polyp Sniper tuning

use glam::Vec2;

/// Center of the endoscope tunnel
pub const TUNNEL_CENTER: Vec2 = Vec2::new(240.0, 320.0);
/// Polyps sit on the tunnel wall between these radii
pub const TUNNEL_RADIUS_MIN: f32 = 70.0;
pub const TUNNEL_RADIUS_MAX: f32 = 200.0;
/// Tunnel twist (rad/frame) = BASE + PER_SECTION * section
pub const TWIST_BASE: f32 = 0.004;
pub const TWIST_PER_SECTION: f32 = 0.001;

/// Reticle
pub const RETICLE_SPEED: f32 = 5.0;
pub const RETICLE_MIN_X: f32 = 40.0;
pub const RETICLE_MAX_X: f32 = 440.0;
pub const RETICLE_MIN_Y: f32 = 120.0;
pub const RETICLE_MAX_Y: f32 = 520.0;

/// Snip resolves when the reticle is within size * this of a polyp center
pub const HIT_RADIUS_MULT: f32 = 1.3;
pub const SNIP_COOLDOWN: u32 = 10;
/// Misses plus escapes that end the procedure
pub const MAX_MISSES: u32 = 5;

/// Lifecycle durations
pub const GROW_FRAMES: u32 = 40;
pub const RETREAT_FRAMES: u32 = 30;
pub const SNIPPED_FRAMES: u32 = 18;

/// Combo scoring
pub const COMBO_WINDOW: u32 = 150;
pub const COMBO_BONUS: f32 = 0.2;
/// `combo` event from this streak on
pub const COMBO_EVENT_MIN: u32 = 3;

/// Spawning
pub const MAX_LIVE: usize = 5;
/// Extra clearance between polyps on spawn
pub const SPAWN_CLEARANCE: f32 = 10.0;
/// Opening stretch of every section
pub const WARMUP_FRAMES: u64 = 180;

pub const SECTIONS: u32 = 4;
pub const SECTION_CLEAR_FRAMES: u32 = 120;

/// Per-kind stats (size is the full-grown radius)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolypStats {
    pub size: f32,
    pub points: u32,
}

pub const SMALL: PolypStats = PolypStats {
    size: 14.0,
    points: 150,
};
pub const MEDIUM: PolypStats = PolypStats {
    size: 20.0,
    points: 100,
};
pub const LARGE: PolypStats = PolypStats {
    size: 28.0,
    points: 75,
};

/// Base weights (small, medium, large)
pub const BASE_WEIGHTS: [f32; 3] = [45.0, 35.0, 20.0];
pub const WEIGHT_SHIFT_PER_SECTION: f32 = 5.0;

/// One colon section
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionParams {
    pub quota: u32,
    pub start_interval: u32,
    pub min_interval: u32,
    /// Frames a grown polyp stays before escaping
    pub active_frames: u32,
    pub twist: f32,
}

pub fn section_params(section: u32) -> SectionParams {
    let s = section.min(SECTIONS - 1);
    SectionParams {
        quota: 12 + 4 * s,
        start_interval: 80 - 8 * s,
        min_interval: 30 - 3 * s,
        active_frames: 240 - 25 * s,
        twist: TWIST_BASE + TWIST_PER_SECTION * s as f32,
    }
}

/// Spawn weights (small, medium, large); warmup never spawns small polyps
pub fn kind_weights(section: u32, warmup: bool) -> [f32; 3] {
    let shift = WEIGHT_SHIFT_PER_SECTION * section as f32;
    let small = if warmup { 0.0 } else { BASE_WEIGHTS[0] + shift };
    [small, BASE_WEIGHTS[1], (BASE_WEIGHTS[2] - shift).max(5.0)]
}
