//! 描画に使う色。陰影は `palette` の HSL で明るさをずらして作る。

use palette::{Darken, FromColor, Hsl, Lighten, Srgb};

use crate::physics::ParticleTint;
use crate::render::canvas::Rgba;

pub const SKY: Rgba = [170, 214, 242, 255];
pub const GROUND: Rgba = [122, 166, 96, 255];

pub const GLASS_EDGE: Rgba = [60, 80, 100, 255];
pub const GLASS_BACK: Rgba = [200, 225, 240, 70];
pub const GLASS_FRONT: Rgba = [220, 240, 255, 45];

pub const SHADOW: Rgba = [0, 0, 0, 60];
pub const GLOW: Rgba = [255, 214, 64, 130];

pub const LIQUID: Rgba = [52, 120, 220, 200];
pub const ROCK: Rgba = [128, 112, 100, 255];

fn srgb(color: Rgba) -> Srgb {
    Srgb::new(color[0], color[1], color[2]).into_format::<f32>()
}

fn rgba(color: Srgb, alpha: u8) -> Rgba {
    let c = color.into_format::<u8>();
    [c.red, c.green, c.blue, alpha]
}

/// 明るくする（`amount` は 0..1）。透明度はそのまま。
pub fn lighter(color: Rgba, amount: f32) -> Rgba {
    let hsl: Hsl = Hsl::from_color(srgb(color));
    let hsl = hsl.lighten(amount);
    rgba(Srgb::from_color(hsl), color[3])
}

/// 暗くする（`amount` は 0..1）。透明度はそのまま。
pub fn darker(color: Rgba, amount: f32) -> Rgba {
    let hsl: Hsl = Hsl::from_color(srgb(color));
    let hsl = hsl.darken(amount);
    rgba(Srgb::from_color(hsl), color[3])
}

/// 気体の粒子の色。
pub fn particle_color(tint: ParticleTint) -> Rgba {
    match tint {
        ParticleTint::Pale => [236, 222, 250, 220],
        ParticleTint::Mid => [196, 168, 236, 220],
        ParticleTint::Deep => [150, 118, 214, 220],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luma(c: Rgba) -> u32 {
        c[0] as u32 + c[1] as u32 + c[2] as u32
    }

    #[test]
    fn shading_keeps_alpha_and_moves_brightness() {
        let up = lighter(LIQUID, 0.3);
        let down = darker(LIQUID, 0.3);
        assert_eq!(up[3], LIQUID[3]);
        assert_eq!(down[3], LIQUID[3]);
        assert!(luma(up) > luma(LIQUID));
        assert!(luma(down) < luma(LIQUID));
    }
}
