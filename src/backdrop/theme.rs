use eframe::egui::Color32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode { Self::Dark } else { Self::Light }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            Self::Dark => &DARK,
            Self::Light => &LIGHT,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color32,
}

// Colors are premultiplied so the tables can stay `const`.
const fn stop(offset: f32, r: u8, g: u8, b: u8, a: u8) -> GradientStop {
    GradientStop {
        offset,
        color: Color32::from_rgba_premultiplied(r, g, b, a),
    }
}

/// How the canvas combines with whatever sits behind it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CanvasBlend {
    Screen,
    Multiply,
}

impl CanvasBlend {
    /// Backing color for which the blend reduces to plain alpha compositing.
    ///
    /// egui has no blend modes, so the host fills the canvas rect with this color first.
    pub fn identity(self) -> Color32 {
        match self {
            Self::Screen => Color32::BLACK,
            Self::Multiply => Color32::WHITE,
        }
    }
}

#[derive(Debug)]
pub struct Palette {
    pub wash: Color32,
    pub glow: &'static [GradientStop],
    pub core: Color32,
    pub edge: Color32,
    pub pulse: Color32,
    pub pulse_alpha: f32,
    pub pulse_halo: Color32,
    pub pulse_halo_alpha: f32,
    pub canvas_opacity: f32,
    pub blend: CanvasBlend,
}

static DARK: Palette = Palette {
    wash: Color32::from_rgb(0, 0, 0),
    glow: &[
        stop(0.0, 255, 215, 100, 255),
        stop(0.3, 216, 216, 216, 230),
        stop(0.6, 110, 100, 75, 128),
        stop(1.0, 0, 0, 0, 0),
    ],
    core: Color32::from_rgb(255, 223, 150),
    edge: Color32::from_rgb(245, 220, 170),
    pulse: Color32::from_rgb(255, 215, 100),
    pulse_alpha: 1.0,
    pulse_halo: Color32::from_rgb(255, 230, 150),
    pulse_halo_alpha: 0.3,
    canvas_opacity: 0.55,
    blend: CanvasBlend::Screen,
};

static LIGHT: Palette = Palette {
    wash: Color32::from_rgb(250, 250, 250),
    glow: &[
        stop(0.0, 180, 135, 45, 230),
        stop(0.5, 50, 50, 50, 128),
        stop(1.0, 0, 0, 0, 0),
    ],
    core: Color32::from_rgba_premultiplied(171, 123, 38, 242),
    edge: Color32::from_rgb(150, 110, 40),
    pulse: Color32::from_rgb(200, 140, 30),
    pulse_alpha: 0.8,
    pulse_halo: Color32::from_rgb(180, 130, 40),
    pulse_halo_alpha: 0.2,
    canvas_opacity: 0.45,
    blend: CanvasBlend::Multiply,
};

/// Returns `color` with its alpha replaced by `opacity` in `[0, 1]`.
pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}
