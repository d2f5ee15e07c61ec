use glam::Vec2;

use super::state::{AnimationState, IdleKind, Pose, Sprite};
use super::Viewport;

/// Rest ticks required before a sub-animation may start.
const RESTLESS_AFTER: u32 = 10;
/// A sub-animation starts when a draw in `0..TRIGGER_ODDS` comes up zero.
const TRIGGER_ODDS: u32 = 200;
/// Distance from an edge that makes the matching wall scratch eligible.
const WALL_PROXIMITY: f32 = 32.0;
/// Sleeping shows the tired pose for sub-frames below this.
const TIRED_FRAMES: u64 = 8;
/// Sleeping cycle advances once every this many sub-frames.
const SLEEP_FRAME_DIVISOR: u64 = 4;

/// A running sub-animation and how far into it we are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveIdle {
    pub kind: IdleKind,
    pub sub_frame: u64,
}

/// Idle bookkeeping: rest ticks and the current sub-animation, if any.
#[derive(Debug, Clone, Default)]
pub struct IdleBehavior {
    /// Ticks spent resting.
    pub ticks: u32,
    active: Option<ActiveIdle>,
}

impl IdleBehavior {
    pub fn active(&self) -> Option<ActiveIdle> {
        self.active
    }

    /// Begin `kind` from sub-frame 0, replacing anything already playing.
    pub fn start(&mut self, kind: IdleKind) {
        log::debug!("idle sub-animation started: {kind:?}");
        self.active = Some(ActiveIdle { kind, sub_frame: 0 });
    }

    /// Drop any sub-animation; the creature is on the move again.
    pub fn interrupt(&mut self) {
        self.active = None;
    }

    /// One resting tick: maybe start a sub-animation, then play it.
    pub fn update(&mut self, pos: Vec2, viewport: Viewport, rng: &mut fastrand::Rng) -> Pose {
        self.ticks += 1;

        if self.active.is_none() && self.ticks > RESTLESS_AFTER && rng.u32(0..TRIGGER_ODDS) == 0 {
            let eligible = candidates(pos, viewport);
            self.start(eligible[rng.usize(0..eligible.len())]);
        }

        let Some(active) = self.active.as_mut() else {
            return Pose::IDLE;
        };

        let sub_frame = active.sub_frame;
        let pose = playback(active.kind, sub_frame);

        if sub_frame >= active.kind.last_sub_frame() {
            log::debug!("idle sub-animation finished: {:?}", active.kind);
            self.active = None;
        } else {
            active.sub_frame += 1;
        }

        pose
    }
}

/// Pose for a sub-animation at a given sub-frame.
fn playback(kind: IdleKind, sub_frame: u64) -> Pose {
    let state = AnimationState::IdleSub(kind);
    match kind {
        IdleKind::Sleeping if sub_frame < TIRED_FRAMES => Pose {
            state,
            sprite: Sprite::Tired,
            frame: 0,
        },
        IdleKind::Sleeping => Pose {
            state,
            sprite: Sprite::Sleeping,
            frame: sub_frame / SLEEP_FRAME_DIVISOR,
        },
        IdleKind::ScratchSelf
        | IdleKind::ScratchWallN
        | IdleKind::ScratchWallS
        | IdleKind::ScratchWallE
        | IdleKind::ScratchWallW => Pose {
            state,
            sprite: Sprite::from(kind),
            frame: sub_frame,
        },
    }
}

/// Sub-animations available at `pos`. Sleeping and self-scratching always
/// are; each wall scratch needs the creature to be close to that wall.
pub fn candidates(pos: Vec2, viewport: Viewport) -> Vec<IdleKind> {
    let mut eligible = vec![IdleKind::Sleeping, IdleKind::ScratchSelf];
    if pos.x < WALL_PROXIMITY {
        eligible.push(IdleKind::ScratchWallW);
    }
    if pos.y < WALL_PROXIMITY {
        eligible.push(IdleKind::ScratchWallN);
    }
    if pos.x > viewport.width - WALL_PROXIMITY {
        eligible.push(IdleKind::ScratchWallE);
    }
    if pos.y > viewport.height - WALL_PROXIMITY {
        eligible.push(IdleKind::ScratchWallS);
    }
    eligible
}
