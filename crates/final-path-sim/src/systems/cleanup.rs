//! Cleanup system: despawns everything the other systems queued for removal.

use hecs::{Entity, World};

/// Despawn queued entities. Runs between passes so no system ever mutates
/// the world's entity set while iterating it.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    for entity in despawn_buffer.drain(..) {
        // An entity may be queued twice; the second despawn is a no-op.
        let _ = world.despawn(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drains_buffer_and_tolerates_duplicates() {
        let mut world = World::new();
        let a = world.spawn((1u32,));
        let b = world.spawn((2u32,));
        let mut buffer = vec![a, a];

        run(&mut world, &mut buffer);
        assert!(buffer.is_empty());
        assert!(!world.contains(a));
        assert!(world.contains(b));
    }
}
