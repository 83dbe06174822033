use crate::Color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
    pub radius: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PaddingValues {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl PaddingValues {
    pub fn all(v: f32) -> Self {
        Self {
            left: v,
            right: v,
            top: v,
            bottom: v,
        }
    }
}

/// Layout and paint hints attached to a view. Lengths are in points.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Modifier {
    pub width: Option<f32>,
    pub fill_max: bool,
    pub padding: Option<PaddingValues>,
    /// Gap between children along the container's main axis.
    pub spacing: Option<f32>,
    pub background: Option<Color>,
    pub border: Option<Border>,
    /// Share of the parent's main axis; children without a fixed size and
    /// with equal weights are laid out equally.
    pub weight: Option<f32>,
    /// Makes the view a hit region.
    pub click: bool,
    /// Works for hit-testing only, draw order is not changed.
    pub z_index: f32,
}

impl Modifier {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn width(mut self, w: f32) -> Self {
        self.width = Some(w);
        self
    }
    pub fn fill_max_size(mut self) -> Self {
        self.fill_max = true;
        self
    }
    pub fn padding(mut self, v: f32) -> Self {
        self.padding = Some(PaddingValues::all(v));
        self
    }
    pub fn spacing(mut self, v: f32) -> Self {
        self.spacing = Some(v);
        self
    }
    pub fn background(mut self, c: Color) -> Self {
        self.background = Some(c);
        self
    }
    pub fn border(mut self, width: f32, color: Color, radius: f32) -> Self {
        self.border = Some(Border {
            width,
            color,
            radius,
        });
        self
    }
    pub fn weight(mut self, w: f32) -> Self {
        self.weight = Some(w);
        self
    }
    pub fn clickable(mut self) -> Self {
        self.click = true;
        self
    }
    pub fn z_index(mut self, z: f32) -> Self {
        self.z_index = z;
        self
    }
}
