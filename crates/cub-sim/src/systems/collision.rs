//! Axis-separated player-vs-terrain resolution.
//!
//! Each axis moves first and is then pushed out of the nearest overlapping
//! solid along the direction of travel. X always resolves before Y.

use glam::Vec2;

use crate::components::entity::Entity;
use crate::core::geometry::Aabb;

/// What the vertical sweep ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalHit {
    Floor,
    Ceiling,
}

fn live_solids(terrain: &[Entity]) -> impl Iterator<Item = Aabb> + '_ {
    terrain
        .iter()
        .filter(|e| e.is_alive() && e.is_solid())
        .map(|e| e.aabb())
}

/// Apply `vel.x` to `pos.x` and resolve. Returns true if a wall stopped the body.
pub fn sweep_x(pos: &mut Vec2, size: Vec2, vel: &mut Vec2, terrain: &[Entity]) -> bool {
    pos.x += vel.x;
    if vel.x == 0.0 {
        return false;
    }
    let body = Aabb::new(*pos, size);
    let moving_right = vel.x > 0.0;

    let mut edge: Option<f32> = None;
    for solid in live_solids(terrain).filter(|s| s.overlaps(&body)) {
        edge = Some(match (edge, moving_right) {
            (None, true) => solid.left(),
            (None, false) => solid.right(),
            (Some(e), true) => e.min(solid.left()),
            (Some(e), false) => e.max(solid.right()),
        });
    }

    match edge {
        Some(e) => {
            pos.x = if moving_right { e - size.x } else { e };
            vel.x = 0.0;
            true
        }
        None => false,
    }
}

/// Apply `vel.y` to `pos.y` and resolve. Downward contact is a landing.
pub fn sweep_y(pos: &mut Vec2, size: Vec2, vel: &mut Vec2, terrain: &[Entity]) -> Option<VerticalHit> {
    pos.y += vel.y;
    if vel.y == 0.0 {
        return None;
    }
    let body = Aabb::new(*pos, size);
    let falling = vel.y > 0.0;

    let mut edge: Option<f32> = None;
    for solid in live_solids(terrain).filter(|s| s.overlaps(&body)) {
        edge = Some(match (edge, falling) {
            (None, true) => solid.top(),
            (None, false) => solid.bottom(),
            (Some(e), true) => e.min(solid.top()),
            (Some(e), false) => e.max(solid.bottom()),
        });
    }

    let e = edge?;
    vel.y = 0.0;
    if falling {
        pos.y = e - size.y;
        Some(VerticalHit::Floor)
    } else {
        pos.y = e;
        Some(VerticalHit::Ceiling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::entity::Kind;

    fn block(id: u32, x: f32, y: f32, w: f32, h: f32) -> Entity {
        Entity::new(EntityId(id), Kind::Platform)
            .with_pos(Vec2::new(x, y))
            .with_size(Vec2::new(w, h))
    }

    const BODY: Vec2 = Vec2::new(30.0, 30.0);

    #[test]
    fn moving_right_snaps_flush_to_left_edge() {
        let terrain = [block(1, 200.0, 0.0, 40.0, 400.0)];
        let mut pos = Vec2::new(165.0, 100.0);
        let mut vel = Vec2::new(6.0, 0.0);
        assert!(sweep_x(&mut pos, BODY, &mut vel, &terrain));
        assert_eq!(pos.x + BODY.x, 200.0);
        assert_eq!(vel.x, 0.0);
    }

    #[test]
    fn moving_left_snaps_to_right_edge() {
        let terrain = [block(1, 0.0, 0.0, 40.0, 400.0)];
        let mut pos = Vec2::new(42.0, 100.0);
        let mut vel = Vec2::new(-5.0, 0.0);
        assert!(sweep_x(&mut pos, BODY, &mut vel, &terrain));
        assert_eq!(pos.x, 40.0);
    }

    #[test]
    fn nearest_obstacle_wins_regardless_of_order() {
        let far = block(1, 215.0, 0.0, 40.0, 400.0);
        let near = block(2, 200.0, 0.0, 40.0, 400.0);
        for terrain in [[far.clone(), near.clone()], [near.clone(), far.clone()]] {
            let mut pos = Vec2::new(165.0, 100.0);
            let mut vel = Vec2::new(30.0, 0.0);
            sweep_x(&mut pos, BODY, &mut vel, &terrain);
            assert_eq!(pos.x, 170.0);
        }
    }

    #[test]
    fn falling_onto_floor_lands() {
        let terrain = [block(1, 0.0, 400.0, 800.0, 50.0)];
        let mut pos = Vec2::new(100.0, 365.0);
        let mut vel = Vec2::new(0.0, 8.0);
        assert_eq!(sweep_y(&mut pos, BODY, &mut vel, &terrain), Some(VerticalHit::Floor));
        assert_eq!(pos.y, 370.0);
        assert_eq!(vel.y, 0.0);
    }

    #[test]
    fn rising_into_ceiling_bumps() {
        let terrain = [block(1, 0.0, 0.0, 800.0, 40.0)];
        let mut pos = Vec2::new(100.0, 45.0);
        let mut vel = Vec2::new(0.0, -10.0);
        assert_eq!(sweep_y(&mut pos, BODY, &mut vel, &terrain), Some(VerticalHit::Ceiling));
        assert_eq!(pos.y, 40.0);
    }

    #[test]
    fn dead_walls_do_not_block() {
        let mut wall = block(1, 200.0, 0.0, 40.0, 400.0);
        wall.kill();
        let mut pos = Vec2::new(165.0, 100.0);
        let mut vel = Vec2::new(6.0, 0.0);
        assert!(!sweep_x(&mut pos, BODY, &mut vel, &[wall]));
        assert_eq!(pos.x, 171.0);
    }

    #[test]
    fn non_solid_entities_are_ignored() {
        let coin = Entity::new(EntityId(1), Kind::Coin)
            .with_pos(Vec2::new(100.0, 380.0))
            .with_size(Vec2::new(20.0, 20.0));
        let mut pos = Vec2::new(100.0, 360.0);
        let mut vel = Vec2::new(0.0, 5.0);
        assert_eq!(sweep_y(&mut pos, BODY, &mut vel, &[coin]), None);
    }
}
