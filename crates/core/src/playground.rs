//! Free-roam avatar movement between levels.
//!
//! A fixed-timestep integrator: every tick moves the avatar by a constant
//! step per held direction, clamps it to the viewport and resolves collisions
//! against a static set of axis-aligned obstacles, sliding along whichever
//! axis is still free. Crossing the right-edge trigger zone reports an exit.

use std::time::Duration;

/// Tick period of the roaming loop.
pub const TICK_INTERVAL: Duration = Duration::from_millis(30);
pub const MOVEMENT_SPEED: f64 = 12.0;
pub const AVATAR_SIZE: f64 = 48.0;
pub const ROTATION_SPEED: f64 = 15.0;
/// Width of the exit trigger measured from the right edge.
pub const EXIT_ZONE_WIDTH: f64 = 100.0;

pub const START_POSITION: Position = Position { x: 50.0, y: 300.0 };
/// Where the avatar is parked after walking through the exit.
pub const EXIT_RESET_POSITION: Position = Position { x: 100.0, y: 300.0 };

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub id: &'static str,
    pub rect: Rect,
}

/// The four blocks placed in the playground.
pub const OBSTACLES: [Obstacle; 4] = [
    Obstacle {
        id: "wall-1",
        rect: Rect { x: 400.0, y: 100.0, w: 50.0, h: 400.0 },
    },
    Obstacle {
        id: "block-1",
        rect: Rect { x: 200.0, y: 500.0, w: 100.0, h: 100.0 },
    },
    Obstacle {
        id: "block-2",
        rect: Rect { x: 600.0, y: 100.0, w: 200.0, h: 50.0 },
    },
    Obstacle {
        id: "block-3",
        rect: Rect { x: 800.0, y: 400.0, w: 50.0, h: 200.0 },
    },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// Directions currently held, from keyboard or on-screen pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    #[must_use]
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Union of two input sources.
    #[must_use]
    pub fn merge(self, other: HeldKeys) -> Self {
        Self {
            up: self.up || other.up,
            down: self.down || other.down,
            left: self.left || other.left,
            right: self.right || other.right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    /// Both axes were blocked; the avatar stayed put.
    Blocked,
    /// The avatar crossed into the exit zone and was parked back at the start.
    ReachedExit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Avatar {
    position: Position,
    rotation: f64,
}

impl Default for Avatar {
    fn default() -> Self {
        Self::new()
    }
}

impl Avatar {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: START_POSITION,
            rotation: 0.0,
        }
    }

    #[must_use]
    pub fn at(position: Position) -> Self {
        Self {
            position,
            rotation: 0.0,
        }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Rotation in degrees, unbounded.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn reset(&mut self) {
        self.position = START_POSITION;
    }

    /// Advance one tick against the built-in obstacles.
    pub fn step(&mut self, keys: HeldKeys, viewport: Viewport) -> StepOutcome {
        self.step_with(keys, viewport, &OBSTACLES)
    }

    pub fn step_with(
        &mut self,
        keys: HeldKeys,
        viewport: Viewport,
        obstacles: &[Obstacle],
    ) -> StepOutcome {
        // up/right spin clockwise, down/left counter-clockwise
        for (held, spin) in [
            (keys.right, ROTATION_SPEED),
            (keys.left, -ROTATION_SPEED),
            (keys.up, ROTATION_SPEED),
            (keys.down, -ROTATION_SPEED),
        ] {
            if held {
                self.rotation += spin;
            }
        }

        let mut dx = 0.0;
        let mut dy = 0.0;
        if keys.up {
            dy -= MOVEMENT_SPEED;
        }
        if keys.down {
            dy += MOVEMENT_SPEED;
        }
        if keys.left {
            dx -= MOVEMENT_SPEED;
        }
        if keys.right {
            dx += MOVEMENT_SPEED;
        }

        let prev = self.position;
        let max_x = (viewport.width - AVATAR_SIZE).max(0.0);
        let max_y = (viewport.height - AVATAR_SIZE).max(0.0);
        let bounded_x = (prev.x + dx).clamp(0.0, max_x);
        let bounded_y = (prev.y + dy).clamp(0.0, max_y);

        if collides(bounded_x, bounded_y, obstacles) {
            let slide = if !collides(bounded_x, prev.y, obstacles) {
                Position { x: bounded_x, y: prev.y }
            } else if !collides(prev.x, bounded_y, obstacles) {
                Position { x: prev.x, y: bounded_y }
            } else {
                prev
            };
            if slide == prev {
                return StepOutcome::Blocked;
            }
            self.position = slide;
            return StepOutcome::Moved;
        }

        if bounded_x > viewport.width - EXIT_ZONE_WIDTH {
            self.position = EXIT_RESET_POSITION;
            return StepOutcome::ReachedExit;
        }

        self.position = Position {
            x: bounded_x,
            y: bounded_y,
        };
        StepOutcome::Moved
    }
}

fn collides(x: f64, y: f64, obstacles: &[Obstacle]) -> bool {
    let avatar = Rect {
        x,
        y,
        w: AVATAR_SIZE,
        h: AVATAR_SIZE,
    };
    obstacles.iter().any(|obstacle| avatar.intersects(&obstacle.rect))
}
