use bytemuck::{Pod, Zeroable};

use crate::components::entity::{Entity, Kind, KindTag};
use crate::core::simulation::Simulation;
use crate::systems::effects::Particle;

/// Per-sprite presentation record written to the shared buffer.
/// 8 floats = 32 bytes stride, matching the host's reader.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Top-left corner, world space (or screen space for flagged particles).
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// `KindTag` value, or [`SpriteInstance::PARTICLE`].
    pub kind: f32,
    /// Enemy/spawner variant, checkpoint state, or a particle's 0xRRGGBB tint.
    pub variant: f32,
    /// 0 = invisible, 1 = opaque.
    pub alpha: f32,
    /// Bit set of `FLAG_*`.
    pub flags: f32,
}

impl SpriteInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    /// Kind value used for particles.
    pub const PARTICLE: f32 = 255.0;

    pub const FLAG_FACING_RIGHT: u32 = 1 << 0;
    pub const FLAG_ATTACKING: u32 = 1 << 1;
    pub const FLAG_BUFFED: u32 = 1 << 2;
    pub const FLAG_INVULNERABLE: u32 = 1 << 3;
    pub const FLAG_DEAD: u32 = 1 << 4;
    pub const FLAG_SCREEN_SPACE: u32 = 1 << 5;
    pub const FLAG_FOLLOWING: u32 = 1 << 6;

    fn from_entity(entity: &Entity, corpse_frames: u32) -> Self {
        let mut flags = 0;
        let variant = match &entity.kind {
            Kind::Enemy(state) => {
                if state.following {
                    flags |= Self::FLAG_FOLLOWING;
                }
                if entity.vel.x >= 0.0 {
                    flags |= Self::FLAG_FACING_RIGHT;
                }
                state.variant as u32 as f32
            }
            Kind::Spawner(state) => state.variant as u32 as f32,
            Kind::Checkpoint { activated } => f32::from(u8::from(*activated)),
            _ => 0.0,
        };
        let alpha = if entity.dead {
            flags |= Self::FLAG_DEAD;
            1.0 - entity.dead_for as f32 / corpse_frames.max(1) as f32
        } else {
            1.0
        };
        Self {
            x: entity.pos.x,
            y: entity.pos.y,
            w: entity.size.x,
            h: entity.size.y,
            kind: entity.kind.tag() as u8 as f32,
            variant,
            alpha: alpha.max(0.0),
            flags: flags as f32,
        }
    }

    fn from_particle(p: &Particle) -> Self {
        let (rgb, tint_alpha) = match p.color {
            Some(c) => (c.0 >> 8, f32::from(c.alpha()) / 255.0),
            None => (0xFFFFFF, 1.0),
        };
        let flags = if p.screen_space { Self::FLAG_SCREEN_SPACE } else { 0 };
        Self {
            x: p.pos.x,
            y: p.pos.y,
            w: p.size,
            h: p.size,
            kind: Self::PARTICLE,
            // 24 bits are exact in an f32 mantissa
            variant: rgb as f32,
            alpha: (p.life.min(1.0) * tint_alpha).max(0.0),
            flags: flags as f32,
        }
    }
}

/// Flat sprite list for one presented frame: level entities first (dead ones
/// fading out), then projectiles, then the player, then particles on top.
pub struct SpriteBuffer {
    pub instances: Vec<SpriteInstance>,
    capacity: usize,
}

impl SpriteBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Append one sprite. Silently dropped once the buffer is full.
    pub fn push(&mut self, instance: SpriteInstance) {
        if self.instances.len() < self.capacity {
            self.instances.push(instance);
        }
    }

    /// Rebuild from the simulation's read surface.
    pub fn build(&mut self, sim: &Simulation) {
        self.clear();
        let corpse_frames = sim.config().corpse_frames;
        for entity in sim.world().entities() {
            self.push(SpriteInstance::from_entity(entity, corpse_frames));
        }
        for projectile in sim.world().projectiles() {
            self.push(SpriteInstance::from_entity(projectile, corpse_frames));
        }

        let view = sim.player_view();
        let mut flags = 0;
        if view.facing_right {
            flags |= SpriteInstance::FLAG_FACING_RIGHT;
        }
        if view.attacking {
            flags |= SpriteInstance::FLAG_ATTACKING;
        }
        if view.buffed {
            flags |= SpriteInstance::FLAG_BUFFED;
        }
        if view.invulnerable {
            flags |= SpriteInstance::FLAG_INVULNERABLE;
        }
        // squash/stretch around the feet
        let size = view.size * view.render_scale;
        self.push(SpriteInstance {
            x: view.pos.x + (view.size.x - size.x) / 2.0,
            y: view.pos.y + view.size.y - size.y,
            w: size.x,
            h: size.y,
            kind: KindTag::Player as u8 as f32,
            variant: 0.0,
            alpha: if view.visible { 1.0 } else { 0.0 },
            flags: flags as f32,
        });

        for particle in sim.particles().iter() {
            self.push(SpriteInstance::from_particle(particle));
        }
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// The instances as raw floats, for copying into a shared buffer.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}
