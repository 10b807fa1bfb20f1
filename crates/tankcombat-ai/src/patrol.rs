//! Patrol route generation around a spawn point.

use rand::Rng;

use tankcombat_core::constants::*;
use tankcombat_core::types::Vec2;

/// Four points 90° apart around `spawn`, each at a random radius, clamped
/// to stay `AI_PATROL_EDGE_MARGIN` inside the world.
///
/// Without a known world size a square of `AI_DEFAULT_WORLD_SIZE` is assumed.
pub fn generate_patrol_points<R: Rng + ?Sized>(
    spawn: Vec2,
    world_size: Option<Vec2>,
    rng: &mut R,
) -> Vec<Vec2> {
    let world = world_size.unwrap_or(Vec2::splat(AI_DEFAULT_WORLD_SIZE));
    (0..AI_PATROL_POINT_COUNT)
        .map(|i| {
            let angle = (i as f64 * 90.0).to_radians();
            let distance = rng.gen_range(AI_PATROL_RADIUS_MIN..AI_PATROL_RADIUS_MAX);
            let point = spawn + Vec2::new(angle.cos(), angle.sin()) * distance;
            // Lower bound wins when the world is narrower than two margins.
            Vec2::new(
                point.x.min(world.x - AI_PATROL_EDGE_MARGIN).max(AI_PATROL_EDGE_MARGIN),
                point.y.min(world.y - AI_PATROL_EDGE_MARGIN).max(AI_PATROL_EDGE_MARGIN),
            )
        })
        .collect()
}
