// Domain-level simulation entities, identities and render snapshots.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u64);

/// Either kind of removable entity, so callers can remove without caring which map holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityId {
    Projectile(ProjectileId),
    Target(TargetId),
}

impl From<ProjectileId> for EntityId {
    fn from(id: ProjectileId) -> Self {
        EntityId::Projectile(id)
    }
}

impl From<TargetId> for EntityId {
    fn from(id: TargetId) -> Self {
        EntityId::Target(id)
    }
}

/// Seat of a player in a round. Fixed at round creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub fn number(self) -> u8 {
        match self {
            PlayerSlot::One => 1,
            PlayerSlot::Two => 2,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(PlayerSlot::One),
            2 => Some(PlayerSlot::Two),
            _ => None,
        }
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    SinglePlayer,
    TwoPlayer,
}

impl GameMode {
    pub fn slots(self) -> &'static [PlayerSlot] {
        match self {
            GameMode::SinglePlayer => &[PlayerSlot::One],
            GameMode::TwoPlayer => &[PlayerSlot::One, PlayerSlot::Two],
        }
    }

    pub fn includes(self, slot: PlayerSlot) -> bool {
        self.slots().contains(&slot)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Running,
    Ended,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub slot: PlayerSlot,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: ProjectileId,
    pub owner: PlayerSlot,
    pub x: f32,
    pub y: f32,
    // Units per reference tick; positive is up.
    pub vy: f32,
}

#[derive(Debug, Clone)]
pub struct Target {
    pub id: TargetId,
    pub x: f32,
    pub y: f32,
    pub vy: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    pub slot: PlayerSlot,
    pub x: f32,
    pub y: f32,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileSnapshot {
    pub id: ProjectileId,
    pub owner: PlayerSlot,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TargetSnapshot {
    pub id: TargetId,
    pub x: f32,
    pub y: f32,
}

/// Read-only view of a round handed to the host shell for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSnapshot {
    pub tick: u64,
    pub mode: GameMode,
    pub phase: RoundPhase,
    pub remaining_secs: u32,
    pub players: Vec<PlayerSnapshot>,
    pub projectiles: Vec<ProjectileSnapshot>,
    pub targets: Vec<TargetSnapshot>,
}

impl From<&Projectile> for ProjectileSnapshot {
    fn from(p: &Projectile) -> Self {
        Self {
            id: p.id,
            owner: p.owner,
            x: p.x,
            y: p.y,
        }
    }
}

impl From<&Target> for TargetSnapshot {
    fn from(t: &Target) -> Self {
        Self {
            id: t.id,
            x: t.x,
            y: t.y,
        }
    }
}
