//! Axis-separated AABB collision detection and response
//!
//! Boxes are centred on `position` and sized `width` x `height`. Movement is
//! resolved one axis at a time: the caller integrates Y, resolves Y, then
//! integrates X and resolves X. This is only correct for axis-aligned
//! rectangles, which is all these games have.

use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// How several simultaneous contacts along one axis are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContactPolicy {
    /// Every overlapping neighbour, in list order. Once one contact zeroes
    /// the velocity on that axis the rest leave the entity alone.
    #[default]
    Sequential,
    /// Only the contact with the smallest penetration depth
    MinPenetration,
}

impl ContactPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactPolicy::Sequential => "sequential",
            ContactPolicy::MinPenetration => "min-penetration",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn center(self, entity: &Entity) -> f32 {
        match self {
            Axis::X => entity.position.x,
            Axis::Y => entity.position.y,
        }
    }

    fn extent(self, entity: &Entity) -> f32 {
        match self {
            Axis::X => entity.width,
            Axis::Y => entity.height,
        }
    }
}

/// True iff both entities are active and their boxes overlap strictly on both axes
pub fn check_collision(a: &Entity, b: &Entity) -> bool {
    if !a.is_active || !b.is_active {
        return false;
    }

    let xdist = (a.position.x - b.position.x).abs() - (a.width + b.width) / 2.0;
    let ydist = (a.position.y - b.position.y).abs() - (a.height + b.height) / 2.0;

    xdist < 0.0 && ydist < 0.0
}

/// True if `entity` overlaps any of `others`
pub fn touching_any(entity: &Entity, others: &[Entity]) -> bool {
    others.iter().any(|other| check_collision(entity, other))
}

/// Overlap magnitude between two boxes along one axis
fn penetration(entity: &Entity, other: &Entity, axis: Axis) -> f32 {
    let dist = (axis.center(entity) - axis.center(other)).abs();
    (dist - axis.extent(entity) / 2.0 - axis.extent(other) / 2.0).abs()
}

/// Push `entity` out of `others` along Y against its vertical velocity.
///
/// Moving up sets `contacts.top`, moving down sets `contacts.bottom`; the
/// vertical velocity is zeroed either way. Nothing happens while the
/// vertical velocity is exactly zero, even if the boxes overlap.
/// Returns the number of contacts applied.
pub fn resolve_y(entity: &mut Entity, others: &[Entity], policy: ContactPolicy) -> usize {
    resolve_axis(entity, others, policy, Axis::Y)
}

/// Push `entity` out of `others` along X against its horizontal velocity.
///
/// Moving right sets `contacts.right`, moving left sets `contacts.left`.
pub fn resolve_x(entity: &mut Entity, others: &[Entity], policy: ContactPolicy) -> usize {
    resolve_axis(entity, others, policy, Axis::X)
}

fn resolve_axis(entity: &mut Entity, others: &[Entity], policy: ContactPolicy, axis: Axis) -> usize {
    match policy {
        ContactPolicy::Sequential => {
            let mut applied = 0;
            for other in others {
                if check_collision(entity, other) {
                    let depth = penetration(entity, other, axis);
                    if apply_correction(entity, depth, axis) {
                        applied += 1;
                    }
                }
            }
            applied
        }
        ContactPolicy::MinPenetration => {
            let shallowest = others
                .iter()
                .filter(|other| check_collision(entity, other))
                .map(|other| penetration(entity, other, axis))
                .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

            match shallowest {
                Some(depth) if apply_correction(entity, depth, axis) => 1,
                _ => 0,
            }
        }
    }
}

fn apply_correction(entity: &mut Entity, depth: f32, axis: Axis) -> bool {
    match axis {
        Axis::Y => {
            if entity.velocity.y > 0.0 {
                entity.position.y -= depth;
                entity.velocity.y = 0.0;
                entity.contacts.top = true;
            } else if entity.velocity.y < 0.0 {
                entity.position.y += depth;
                entity.velocity.y = 0.0;
                entity.contacts.bottom = true;
            } else {
                return false;
            }
        }
        Axis::X => {
            if entity.velocity.x > 0.0 {
                entity.position.x -= depth;
                entity.velocity.x = 0.0;
                entity.contacts.right = true;
            } else if entity.velocity.x < 0.0 {
                entity.position.x += depth;
                entity.velocity.x = 0.0;
                entity.contacts.left = true;
            } else {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use proptest::prelude::*;

    fn boxed(x: f32, y: f32, w: f32, h: f32) -> Entity {
        Entity::platform(Vec3::new(x, y, 0.0)).with_size(w, h)
    }

    #[test]
    fn test_overlap_and_touching() {
        let a = boxed(0.0, 0.0, 1.0, 1.0);

        assert!(check_collision(&a, &boxed(0.5, 0.5, 1.0, 1.0)));
        // Edges exactly touching is not an overlap
        assert!(!check_collision(&a, &boxed(1.0, 0.0, 1.0, 1.0)));
        assert!(!check_collision(&a, &boxed(0.0, 3.0, 1.0, 1.0)));
    }

    #[test]
    fn test_inactive_never_collides() {
        let a = boxed(0.0, 0.0, 1.0, 1.0);
        let mut b = boxed(0.0, 0.0, 1.0, 1.0);
        b.is_active = false;

        assert!(!check_collision(&a, &b));
        assert!(!check_collision(&b, &a));
        assert!(!touching_any(&a, std::slice::from_ref(&b)));
    }

    #[test]
    fn test_resolve_y_moving_up_hits_ceiling() {
        let ceiling = [boxed(0.0, 1.0, 1.0, 1.0)];
        let mut mover = Entity::player(Vec3::new(0.0, 0.2, 0.0)).with_size(0.8, 0.8);
        mover.velocity.y = 3.0;

        let applied = resolve_y(&mut mover, &ceiling, ContactPolicy::Sequential);

        assert_eq!(applied, 1);
        assert!(mover.contacts.top);
        assert!(!mover.contacts.bottom);
        assert_eq!(mover.velocity.y, 0.0);
        // Penetration |0.8 - 0.4 - 0.5| = 0.1
        assert!((mover.position.y - 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_resolve_y_ignores_resting_overlap() {
        let floor = [boxed(0.0, 0.0, 1.0, 1.0)];
        let mut mover = Entity::player(Vec3::new(0.0, 0.5, 0.0));

        let applied = resolve_y(&mut mover, &floor, ContactPolicy::Sequential);

        assert_eq!(applied, 0);
        assert!(!mover.contacts.any());
        assert_eq!(mover.position.y, 0.5);
    }

    #[test]
    fn test_resolve_x_sets_side_flags() {
        let wall = [boxed(1.0, 0.0, 1.0, 1.0)];

        let mut right = Entity::player(Vec3::new(0.2, 0.0, 0.0)).with_size(0.8, 0.8);
        right.velocity.x = 1.0;
        resolve_x(&mut right, &wall, ContactPolicy::Sequential);
        assert!(right.contacts.right);
        assert_eq!(right.velocity.x, 0.0);
        assert!((right.position.x - 0.1).abs() < 1e-5);

        let mut left = Entity::player(Vec3::new(1.7, 0.0, 0.0)).with_size(0.8, 0.8);
        left.velocity.x = -1.0;
        resolve_x(&mut left, &wall, ContactPolicy::Sequential);
        assert!(left.contacts.left);
        assert!((left.position.x - 1.9).abs() < 1e-5);
    }

    #[test]
    fn test_sequential_stops_after_first_contact() {
        // Two floor tiles under the player, different depths
        let floor = [boxed(-0.5, 0.0, 1.0, 1.0), boxed(0.5, 0.1, 1.0, 1.0)];
        let mut mover = Entity::player(Vec3::new(0.0, 0.8, 0.0)).with_size(0.8, 0.8);
        mover.velocity.y = -1.0;

        let applied = resolve_y(&mut mover, &floor, ContactPolicy::Sequential);

        // First tile wins; velocity is zero afterwards so the second is skipped
        assert_eq!(applied, 1);
        assert!((mover.position.y - 0.9).abs() < 1e-5);
    }

    #[test]
    fn test_min_penetration_picks_shallowest() {
        let floor = [boxed(-0.5, 0.1, 1.0, 1.0), boxed(0.5, 0.0, 1.0, 1.0)];
        let mut mover = Entity::player(Vec3::new(0.0, 0.8, 0.0)).with_size(0.8, 0.8);
        mover.velocity.y = -1.0;

        let applied = resolve_y(&mut mover, &floor, ContactPolicy::MinPenetration);

        // Depths 0.2 (first) and 0.1 (second): the 0.1 push is applied
        assert_eq!(applied, 1);
        assert!(mover.contacts.bottom);
        assert!((mover.position.y - 0.9).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn prop_separated_boxes_never_collide(
            x in -10.0f32..10.0,
            y in -10.0f32..10.0,
            w in 0.1f32..3.0,
            h in 0.1f32..3.0,
            gap in 0.01f32..5.0,
        ) {
            let a = boxed(x, y, w, h);
            let beside = boxed(x + w + gap, y, w, h);
            let above = boxed(x, y + h + gap, w, h);
            prop_assert!(!check_collision(&a, &beside));
            prop_assert!(!check_collision(&a, &above));
        }

        #[test]
        fn prop_overlapping_boxes_collide_when_active(
            x in -10.0f32..10.0,
            y in -10.0f32..10.0,
            w in 0.1f32..3.0,
            h in 0.1f32..3.0,
            fx in -0.9f32..0.9,
            fy in -0.9f32..0.9,
            a_active: bool,
            b_active: bool,
        ) {
            let mut a = boxed(x, y, w, h);
            let mut b = boxed(x + fx * w, y + fy * h, w, h);
            a.is_active = a_active;
            b.is_active = b_active;
            prop_assert_eq!(check_collision(&a, &b), a_active && b_active);
        }

        #[test]
        fn prop_resolved_y_velocity_is_zero(
            dy in -0.85f32..0.85,
            vy in prop_oneof![-5.0f32..-0.01, 0.01f32..5.0],
        ) {
            let floor = [boxed(0.0, 0.0, 1.0, 1.0)];
            let mut mover = Entity::player(Vec3::new(0.0, dy, 0.0)).with_size(0.8, 0.8);
            mover.velocity.y = vy;

            let applied = resolve_y(&mut mover, &floor, ContactPolicy::Sequential);
            prop_assert_eq!(applied, 1);
            prop_assert_eq!(mover.velocity.y, 0.0);
        }
    }
}
