/// Eight-way compass heading. Each has its own walk cycle in the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Self::N,
        Self::NE,
        Self::E,
        Self::SE,
        Self::S,
        Self::SW,
        Self::W,
        Self::NW,
    ];
}

/// Idle-only sub-animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdleKind {
    ScratchSelf,
    ScratchWallN,
    ScratchWallS,
    ScratchWallE,
    ScratchWallW,
    Sleeping,
}

impl IdleKind {
    /// Last sub-frame a sub-animation plays before it hands back to `Idle`.
    pub fn last_sub_frame(self) -> u64 {
        match self {
            Self::Sleeping => 193,
            Self::ScratchSelf
            | Self::ScratchWallN
            | Self::ScratchWallS
            | Self::ScratchWallE
            | Self::ScratchWallW => 10,
        }
    }
}

/// What the creature is doing this tick. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Idle,
    Alert,
    Moving(Direction),
    IdleSub(IdleKind),
}

/// Named frame sets in the sprite sheet.
///
/// Mostly one-to-one with [`AnimationState`], except that `Sleeping` is drawn
/// with `Tired` for its first few sub-frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Idle,
    Alert,
    Tired,
    Sleeping,
    ScratchSelf,
    ScratchWallN,
    ScratchWallS,
    ScratchWallE,
    ScratchWallW,
    Walk(Direction),
}

impl From<IdleKind> for Sprite {
    fn from(kind: IdleKind) -> Self {
        match kind {
            IdleKind::ScratchSelf => Self::ScratchSelf,
            IdleKind::ScratchWallN => Self::ScratchWallN,
            IdleKind::ScratchWallS => Self::ScratchWallS,
            IdleKind::ScratchWallE => Self::ScratchWallE,
            IdleKind::ScratchWallW => Self::ScratchWallW,
            IdleKind::Sleeping => Self::Sleeping,
        }
    }
}

/// A state together with the sprite and cycle position that draws it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pose {
    pub state: AnimationState,
    pub sprite: Sprite,
    /// Raw frame counter; the atlas wraps it by the sprite's frame count.
    pub frame: u64,
}

impl Pose {
    pub const IDLE: Pose = Pose {
        state: AnimationState::Idle,
        sprite: Sprite::Idle,
        frame: 0,
    };

    pub const ALERT: Pose = Pose {
        state: AnimationState::Alert,
        sprite: Sprite::Alert,
        frame: 0,
    };

    pub fn walking(direction: Direction, frame: u64) -> Self {
        Self {
            state: AnimationState::Moving(direction),
            sprite: Sprite::Walk(direction),
            frame,
        }
    }
}
