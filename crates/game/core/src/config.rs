/// Rule constants and tunable parameters for the battlefield.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// AP spent per tile walked.
    pub move_cost_per_tile: u32,
    /// AP spent when an attack resolves.
    pub shoot_ap_cost: u32,
    /// AP spent by a reload.
    pub reload_ap_cost: u32,
    /// AP spent when a grenade detonates.
    pub grenade_ap_cost: u32,
    /// Maximum Manhattan distance between thrower and grenade target.
    pub grenade_range: u32,
    /// Manhattan radius of the blast around the grenade target.
    pub grenade_blast_radius: u32,
    /// Whether the map-authoring mode may be entered.
    pub editor_enabled: bool,
}

impl GameConfig {
    // ===== compile-time limits =====
    /// Largest accepted grid width or height.
    pub const MAX_GRID_DIMENSION: u32 = 256;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MOVE_COST_PER_TILE: u32 = 1;
    pub const DEFAULT_SHOOT_AP_COST: u32 = 2;
    pub const DEFAULT_RELOAD_AP_COST: u32 = 1;
    pub const DEFAULT_GRENADE_AP_COST: u32 = 2;
    pub const DEFAULT_GRENADE_RANGE: u32 = 4;
    pub const DEFAULT_GRENADE_BLAST_RADIUS: u32 = 1;

    pub fn new() -> Self {
        Self {
            move_cost_per_tile: Self::DEFAULT_MOVE_COST_PER_TILE,
            shoot_ap_cost: Self::DEFAULT_SHOOT_AP_COST,
            reload_ap_cost: Self::DEFAULT_RELOAD_AP_COST,
            grenade_ap_cost: Self::DEFAULT_GRENADE_AP_COST,
            grenade_range: Self::DEFAULT_GRENADE_RANGE,
            grenade_blast_radius: Self::DEFAULT_GRENADE_BLAST_RADIUS,
            editor_enabled: false,
        }
    }

    /// Default rules with the map editor unlocked.
    pub fn editor() -> Self {
        Self {
            editor_enabled: true,
            ..Self::new()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
