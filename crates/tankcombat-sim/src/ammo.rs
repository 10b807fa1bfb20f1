//! Projectile profiles and per-ammo override tables.

use tankcombat_core::components::{AmmoOverride, ExplosiveOverride, ProjectileProfile};
use tankcombat_core::enums::{AmmoKind, ProjectileKind};
use tankcombat_core::types::Size;

/// Base profile for a projectile body.
pub fn projectile_profile(kind: ProjectileKind) -> ProjectileProfile {
    match kind {
        ProjectileKind::NormalShell => ProjectileProfile {
            size: Size::new(8.0, 8.0),
            lifetime: 2.0,
            speed_rate: 1.0,
            damage_rate: 1.0,
            penetration: [1.2, 1.0, 0.8],
            is_explosive: false,
            explosion_radius: 0.0,
            explosion_damage_rate: 0.0,
            image_path: Some("assets/projectiles/normal_shell.png".to_string()),
            explosion_image_path: None,
        },
        ProjectileKind::RocketShell => ProjectileProfile {
            size: Size::new(12.0, 12.0),
            lifetime: 1.5,
            speed_rate: 0.8,
            damage_rate: 1.5,
            penetration: [0.8, 1.0, 1.2],
            is_explosive: true,
            explosion_radius: 60.0,
            explosion_damage_rate: 0.8,
            image_path: None,
            explosion_image_path: None,
        },
    }
}

/// Adjustments applied to every projectile fired with `ammo` selected.
pub fn ammo_override(ammo: AmmoKind) -> AmmoOverride {
    match ammo {
        AmmoKind::Bullet => AmmoOverride {
            damage_rate: Some(1.0),
            penetration: Some([1.0, 1.0, 1.0]),
            speed_rate: Some(1.0),
            explosive: Some(ExplosiveOverride::Inert),
        },
        AmmoKind::ArmorPiercing => AmmoOverride {
            damage_rate: Some(1.2),
            penetration: Some([0.9, 1.1, 1.4]),
            speed_rate: Some(1.3),
            explosive: Some(ExplosiveOverride::Inert),
        },
        AmmoKind::HighExplosive => AmmoOverride {
            damage_rate: Some(1.1),
            penetration: Some([1.3, 1.0, 0.6]),
            speed_rate: Some(0.9),
            explosive: Some(ExplosiveOverride::Charge {
                radius: 45.0,
                damage_rate: 0.7,
            }),
        },
    }
}

/// Apply an override to a profile. Unset fields keep the profile value.
pub fn apply_override(mut profile: ProjectileProfile, ammo: &AmmoOverride) -> ProjectileProfile {
    if let Some(rate) = ammo.damage_rate {
        profile.damage_rate = rate;
    }
    if let Some(penetration) = ammo.penetration {
        profile.penetration = penetration;
    }
    if let Some(rate) = ammo.speed_rate {
        profile.speed_rate = rate;
    }
    match ammo.explosive {
        Some(ExplosiveOverride::Inert) => {
            profile.is_explosive = false;
            profile.explosion_radius = 0.0;
            profile.explosion_damage_rate = 0.0;
        }
        Some(ExplosiveOverride::Charge {
            radius,
            damage_rate,
        }) => {
            profile.is_explosive = true;
            profile.explosion_radius = radius;
            profile.explosion_damage_rate = damage_rate;
        }
        None => {}
    }
    profile
}
