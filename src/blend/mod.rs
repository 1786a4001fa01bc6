//! Pixel blend modes.
//!
//! Every mode computes an intermediate colour per channel with its own
//! formula and then runs it through [`normal`], the shared alpha
//! compositing step. Channel formulas live in [`channel`] and work on
//! 8-bit values normalised to `[0, 1]`.
//!
//! The HSL family (hue, saturation, color, luminosity) is not implemented;
//! those modes composite with [`normal`] and report
//! [`BlendMode::is_implemented`] as `false`.

mod compositor;

pub use compositor::*;

use crate::util::Rgba;

/// Pixel blend function: `(background, foreground, opacity) -> result`.
pub type BlendFn = fn(Rgba, Rgba, u8) -> Rgba;

/// Layer blend mode as stored in layer chunks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum BlendMode {
    #[default]
    Normal = 0,
    Multiply = 1,
    Screen = 2,
    Overlay = 3,
    Darken = 4,
    Lighten = 5,
    ColorDodge = 6,
    ColorBurn = 7,
    HardLight = 8,
    SoftLight = 9,
    Difference = 10,
    Exclusion = 11,
    Hue = 12,
    Saturation = 13,
    Color = 14,
    Luminosity = 15,
}

impl BlendMode {
    /// Number of known blend modes.
    pub const COUNT: usize = 16;

    pub const fn from_u16(v: u16) -> Option<Self> {
        Some(match v {
            0 => Self::Normal,
            1 => Self::Multiply,
            2 => Self::Screen,
            3 => Self::Overlay,
            4 => Self::Darken,
            5 => Self::Lighten,
            6 => Self::ColorDodge,
            7 => Self::ColorBurn,
            8 => Self::HardLight,
            9 => Self::SoftLight,
            10 => Self::Difference,
            11 => Self::Exclusion,
            12 => Self::Hue,
            13 => Self::Saturation,
            14 => Self::Color,
            15 => Self::Luminosity,
            _ => return None,
        })
    }

    /// Whether this mode has its own formula.
    ///
    /// `false` for the HSL modes, which fall back to [`normal`].
    pub const fn is_implemented(self) -> bool {
        !matches!(
            self,
            Self::Hue | Self::Saturation | Self::Color | Self::Luminosity
        )
    }

    /// Pixel function implementing this mode.
    pub fn blend_fn(self) -> BlendFn {
        match self {
            Self::Normal => normal,
            Self::Multiply => multiply,
            Self::Screen => screen,
            Self::Overlay => overlay,
            Self::Darken => darken,
            Self::Lighten => lighten,
            Self::ColorDodge => color_dodge,
            Self::ColorBurn => color_burn,
            Self::HardLight => hard_light,
            Self::SoftLight => soft_light,
            Self::Difference => difference,
            Self::Exclusion => exclusion,
            Self::Hue | Self::Saturation | Self::Color | Self::Luminosity => normal,
        }
    }
}

/// Scale an 8-bit value by `factor`, truncating and clamping to `[0, 255]`.
#[inline]
fn scale(p: u8, factor: f32) -> i32 {
    ((p as f32 * factor) as i32).clamp(0, 255)
}

/// `a * b / 255`, rounded.
#[inline]
pub fn mul_un8(a: u8, b: u8) -> u8 {
    ((a as u32 * b as u32 + 127) / 255) as u8
}

/// Ignore the background and return the foreground.
///
/// Used when a sprite has no layer metadata: cels paint over each other.
pub fn take_foreground(_bg: Rgba, fg: Rgba, _opacity: u8) -> Rgba {
    fg
}

/// Shared alpha compositing step.
///
/// A transparent background yields the foreground with its alpha scaled by
/// `opacity / 255`; a transparent foreground leaves the background as is.
pub fn normal(bg: Rgba, fg: Rgba, opacity: u8) -> Rgba {
    let factor = opacity as f32 / 255.0;
    if bg.a == 0 {
        return Rgba::new(fg.r, fg.g, fg.b, scale(fg.a, factor) as u8);
    }
    if fg.a == 0 {
        return bg;
    }

    let demand = (255 - scale(bg.a, factor)) as f32;
    let alpha = (bg.a as i32 + scale(fg.a, demand)).clamp(1, 255);
    let mix = |b: u8, f: u8| (b as i32 + scale(f, demand) / alpha).clamp(0, 255) as u8;
    Rgba::new(mix(bg.r, fg.r), mix(bg.g, fg.g), mix(bg.b, fg.b), alpha as u8)
}

/// Per-channel colour formulas, run before [`normal`].
pub mod channel {
    use super::mul_un8;

    pub fn multiply(b: u8, f: u8) -> u8 {
        mul_un8(b, f)
    }

    pub fn screen(b: u8, f: u8) -> u8 {
        (b as i32 + f as i32 - mul_un8(b, f) as i32).clamp(0, 255) as u8
    }

    /// Screen for bright foregrounds, multiply otherwise.
    pub fn overlay(b: u8, f: u8) -> u8 {
        if f > 0x80 {
            screen(b, f)
        } else {
            multiply(b, f)
        }
    }

    pub fn darken(b: u8, f: u8) -> u8 {
        b.min(f)
    }

    pub fn lighten(b: u8, f: u8) -> u8 {
        b.max(f)
    }

    /// Saturates once `b` reaches `255 - f`, else `f / (255 - f)`.
    pub fn color_dodge(b: u8, f: u8) -> u8 {
        if b == 0 {
            return 0;
        }
        let inv = 255 - f;
        if b >= inv {
            255
        } else {
            // b < inv, so inv > 0
            f / inv
        }
    }

    /// Mirror of [`color_dodge`]: `(255 - b) / f` below saturation.
    pub fn color_burn(b: u8, f: u8) -> u8 {
        if b == 255 {
            return 255;
        }
        let inv = 255 - b;
        if inv >= f {
            0
        } else {
            // inv < f, so f > 0
            inv / f
        }
    }

    pub fn soft_light(b: u8, f: u8) -> u8 {
        let b = b as f64 / 255.0;
        let s = f as f64 / 255.0;
        let r = if s <= 0.5 {
            b - (1.0 - 2.0 * s) * b * (1.0 - b)
        } else {
            let d = if b <= 0.25 {
                ((16.0 * b - 12.0) * b + 4.0) * b
            } else {
                b.sqrt()
            };
            b + (2.0 * s - 1.0) * (d - b)
        };
        (r * 255.0 + 0.5).clamp(0.0, 255.0) as u8
    }

    pub fn difference(b: u8, f: u8) -> u8 {
        b.abs_diff(f)
    }

    pub fn exclusion(b: u8, f: u8) -> u8 {
        (b as i32 + f as i32 - 2 * mul_un8(b, f) as i32).clamp(0, 255) as u8
    }
}

macro_rules! channel_blend {
    ($($(#[$doc:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $name(bg: Rgba, fg: Rgba, opacity: u8) -> Rgba {
                normal(bg, Rgba::zip_rgb(bg, fg, channel::$name), opacity)
            }
        )*
    };
}

channel_blend!(
    multiply,
    screen,
    overlay,
    darken,
    lighten,
    color_dodge,
    color_burn,
    soft_light,
    difference,
    exclusion,
);

/// Same as [`overlay`].
pub fn hard_light(bg: Rgba, fg: Rgba, opacity: u8) -> Rgba {
    overlay(bg, fg, opacity)
}
