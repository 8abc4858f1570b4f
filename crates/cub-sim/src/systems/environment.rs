//! Ambient weather particles and status-effect trails.

use glam::Vec2;

use crate::components::player::Player;
use crate::level::weather::{Ambient, WeatherTag};
use crate::systems::effects::{Color, ParticlePool, ParticleSpawn};

/// Top up the weather's background stream by one particle per tick, up to its cap.
pub fn emit_ambient(weather: WeatherTag, camera_x: f32, viewport: Vec2, particles: &mut ParticlePool) {
    let Some(ambient) = weather.ambient() else {
        return;
    };
    if particles.active_count() >= ambient.cap() {
        return;
    }

    particles.emit(1, |rng| match ambient {
        Ambient::SpeedLines => ParticleSpawn::at(Vec2::new(
            camera_x + viewport.x + rng.next_f32() * 100.0,
            rng.next_f32() * viewport.y,
        ))
        .with_vel(Vec2::new(-10.0 - rng.next_f32() * 5.0, 0.0))
        .with_size(rng.range(1.0, 3.0))
        .with_life(0.5)
        .with_color(Color::SPEED_LINE),

        Ambient::Bubbles => ParticleSpawn::at(Vec2::new(
            camera_x + rng.next_f32() * viewport.x,
            viewport.y + 10.0,
        ))
        .with_vel(Vec2::new(rng.spread(0.25), -1.0 - rng.next_f32()))
        .with_size(rng.range(2.0, 6.0))
        .with_color(Color::BUBBLE),

        Ambient::Snow => ParticleSpawn::at(Vec2::new(
            camera_x + rng.next_f32() * viewport.x - 100.0,
            -10.0,
        ))
        .with_vel(Vec2::new(rng.spread(0.5), rng.range(1.0, 3.0)))
        .with_size(rng.range(2.0, 5.0))
        .with_color(Color::WHITE),

        Ambient::Rain => ParticleSpawn::at(Vec2::new(rng.next_f32() * viewport.x, -10.0))
            .with_vel(Vec2::new(-1.0, rng.range(8.0, 12.0)))
            .with_size(2.0)
            .in_screen_space(),
    });
}

/// Two fading sparks per tick at the player's feet while buffed.
pub fn emit_buff_trail(player: &Player, particles: &mut ParticlePool) {
    if !player.is_buffed() {
        return;
    }
    let (pos, size) = (player.pos, player.size);
    particles.emit(2, |rng| {
        let color = if rng.coin_flip() { Color::EMBER_RED } else { Color::EMBER_AMBER };
        ParticleSpawn::at(Vec2::new(pos.x + rng.next_f32() * size.x, pos.y + size.y))
            .with_vel(Vec2::new(rng.spread(1.0), -1.0 - rng.next_f32() * 3.0))
            .with_size(rng.range(2.0, 8.0))
            .with_life(0.8)
            .with_color(color)
    });
}
