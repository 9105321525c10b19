//! Sprite-sheet animation driven by movement
//!
//! Frames advance on a fixed cadence while the owner is moving and snap
//! back to the first frame as soon as it stops.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::ANIM_FRAME_SECONDS;

/// Frames per facing direction
pub const FRAMES_PER_FACING: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
    Up,
    #[default]
    Down,
}

/// Atlas frame indices for each facing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationSet {
    pub left: [u32; FRAMES_PER_FACING],
    pub right: [u32; FRAMES_PER_FACING],
    pub up: [u32; FRAMES_PER_FACING],
    pub down: [u32; FRAMES_PER_FACING],
}

impl AnimationSet {
    /// 4x4 walk-cycle sheet laid out one column per direction
    pub const PLAYER_SHEET: Self = Self {
        left: [1, 5, 9, 13],
        right: [3, 7, 11, 15],
        up: [2, 6, 10, 14],
        down: [0, 4, 8, 12],
    };

    pub fn frames(&self, facing: Facing) -> &[u32; FRAMES_PER_FACING] {
        match facing {
            Facing::Left => &self.left,
            Facing::Right => &self.right,
            Facing::Up => &self.up,
            Facing::Down => &self.down,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub set: AnimationSet,
    pub facing: Facing,
    /// Position in the current facing's frame table, always < `frames`
    pub index: usize,
    pub time: f32,
    pub frames: usize,
    pub cols: u32,
    pub rows: u32,
}

impl Animation {
    pub fn new(set: AnimationSet, facing: Facing, cols: u32, rows: u32) -> Self {
        Self {
            set,
            facing,
            index: 0,
            time: 0.0,
            frames: FRAMES_PER_FACING,
            cols,
            rows,
        }
    }

    pub fn face(&mut self, facing: Facing) {
        self.facing = facing;
    }

    /// Advance by `dt` seconds of movement, or reset when standing still
    pub fn advance(&mut self, dt: f32, movement: Vec3) {
        if movement.length() != 0.0 {
            self.time += dt;

            if self.time >= ANIM_FRAME_SECONDS {
                self.time = 0.0;
                self.index += 1;
                if self.index >= self.frames {
                    self.index = 0;
                }
            }
        } else {
            self.index = 0;
        }
    }

    /// Atlas index of the frame currently shown
    pub fn frame(&self) -> u32 {
        let table = self.set.frames(self.facing);
        table[self.index.min(table.len() - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn walker() -> Animation {
        Animation::new(AnimationSet::PLAYER_SHEET, Facing::Right, 4, 4)
    }

    #[test]
    fn test_advances_every_quarter_second() {
        let mut anim = walker();

        anim.advance(0.2, Vec3::X);
        assert_eq!(anim.index, 0);
        anim.advance(0.05, Vec3::X);
        assert_eq!(anim.index, 1);
        assert_eq!(anim.frame(), 7);
        assert_eq!(anim.time, 0.0);
    }

    #[test]
    fn test_wraps_to_first_frame() {
        let mut anim = walker();
        for _ in 0..4 {
            anim.advance(0.25, Vec3::X);
        }
        assert_eq!(anim.index, 0);
        assert_eq!(anim.frame(), 3);
    }

    #[test]
    fn test_facing_selects_table() {
        let mut anim = walker();
        anim.advance(0.25, Vec3::NEG_X);
        anim.face(Facing::Left);
        assert_eq!(anim.frame(), 5);
    }

    #[test]
    fn test_stopping_resets_index() {
        let mut anim = walker();
        anim.advance(0.3, Vec3::X);
        anim.advance(0.3, Vec3::X);
        assert_eq!(anim.index, 2);

        anim.advance(0.016, Vec3::ZERO);
        assert_eq!(anim.index, 0);
    }

    proptest! {
        #[test]
        fn prop_index_stays_in_range(
            steps in proptest::collection::vec((0.0f32..0.5, any::<bool>()), 1..200),
        ) {
            let mut anim = walker();
            for (dt, moving) in steps {
                let before = anim.index;
                let movement = if moving { Vec3::X } else { Vec3::ZERO };
                anim.advance(dt, movement);

                prop_assert!(anim.index < anim.frames);
                if !moving {
                    prop_assert_eq!(anim.index, 0);
                } else if anim.index != before {
                    prop_assert_eq!(anim.index, (before + 1) % anim.frames);
                }
            }
        }
    }
}
