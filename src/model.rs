use crate::{
    color::Rgba8,
    error::{GeoloomError, GeoloomResult},
};

/// The working canvas never exceeds this on either axis after supersampling;
/// it also keeps the buffers inside the rasterizer's u16 limits.
pub const MAX_WORKING_DIM: u32 = 4096;

/// Default supersample factor (3x3 working pixels per output pixel).
pub const DEFAULT_SUPERSAMPLE: u32 = 3;

/// Cap on `layers` counts; bounds the command list (the flower lattice
/// grows quadratically, the tetrahedron grid as `(2*layers+1)^2`).
pub const MAX_LAYERS: u32 = 64;

/// Cap on spiral `iterations`; keeps the Fibonacci recurrence and the
/// derived arc bounds finite in f64.
pub const MAX_ITERATIONS: u32 = 128;

/// Cap on torus `rings`.
pub const MAX_RINGS: u32 = 256;

/// One pattern kind together with the numeric parameters its generator
/// consumes. The serde tag keeps kind/params mismatches unrepresentable:
/// an unknown `kind` or a missing field fails at deserialization.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Pattern {
    FlowerOfLife { radius: f64, layers: u32 },
    SeedOfLife { radius: f64 },
    MetatronsCube { radius: f64 },
    SriYantra { radius: f64 },
    VesicaPiscis { radius: f64 },
    Merkaba { radius: f64 },
    GoldenSpiral { scale: f64, iterations: u32 },
    FibonacciSpiral { scale: f64, iterations: u32 },
    Torus { radius: f64, rings: u32 },
    Icosahedron { radius: f64 },
    TetrahedronGrid { radius: f64, layers: u32 },
}

impl Pattern {
    /// Stable tag used by the CLI listing; matches the serde tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FlowerOfLife { .. } => "flower_of_life",
            Self::SeedOfLife { .. } => "seed_of_life",
            Self::MetatronsCube { .. } => "metatrons_cube",
            Self::SriYantra { .. } => "sri_yantra",
            Self::VesicaPiscis { .. } => "vesica_piscis",
            Self::Merkaba { .. } => "merkaba",
            Self::GoldenSpiral { .. } => "golden_spiral",
            Self::FibonacciSpiral { .. } => "fibonacci_spiral",
            Self::Torus { .. } => "torus",
            Self::Icosahedron { .. } => "icosahedron",
            Self::TetrahedronGrid { .. } => "tetrahedron_grid",
        }
    }

    pub fn validate(&self) -> GeoloomResult<()> {
        let positive = |name: &str, v: f64| -> GeoloomResult<()> {
            if !v.is_finite() || v <= 0.0 {
                return Err(GeoloomError::validation(format!(
                    "{}.{name} must be finite and > 0",
                    self.kind()
                )));
            }
            Ok(())
        };
        let capped = |name: &str, v: u32, max: u32| -> GeoloomResult<()> {
            if v > max {
                return Err(GeoloomError::validation(format!(
                    "{}.{name} must be <= {max}",
                    self.kind()
                )));
            }
            Ok(())
        };
        match *self {
            Self::SeedOfLife { radius }
            | Self::MetatronsCube { radius }
            | Self::SriYantra { radius }
            | Self::VesicaPiscis { radius }
            | Self::Merkaba { radius }
            | Self::Icosahedron { radius } => positive("radius", radius)?,
            Self::FlowerOfLife { radius, layers } | Self::TetrahedronGrid { radius, layers } => {
                positive("radius", radius)?;
                capped("layers", layers, MAX_LAYERS)?;
            }
            Self::GoldenSpiral { scale, iterations }
            | Self::FibonacciSpiral { scale, iterations } => {
                positive("scale", scale)?;
                if iterations == 0 {
                    return Err(GeoloomError::validation(format!(
                        "{}.iterations must be >= 1",
                        self.kind()
                    )));
                }
                capped("iterations", iterations, MAX_ITERATIONS)?;
            }
            Self::Torus { radius, rings } => {
                positive("radius", radius)?;
                if rings == 0 {
                    return Err(GeoloomError::validation("torus.rings must be >= 1"));
                }
                capped("rings", rings, MAX_RINGS)?;
            }
        }
        Ok(())
    }

    /// Linear parameters scaled for the supersampled working canvas. Counts
    /// (layers, iterations, rings) are resolution-independent and stay put.
    pub fn scaled(&self, factor: f64) -> Self {
        let mut out = *self;
        match &mut out {
            Self::FlowerOfLife { radius, .. }
            | Self::SeedOfLife { radius }
            | Self::MetatronsCube { radius }
            | Self::SriYantra { radius }
            | Self::VesicaPiscis { radius }
            | Self::Merkaba { radius }
            | Self::Torus { radius, .. }
            | Self::Icosahedron { radius }
            | Self::TetrahedronGrid { radius, .. } => *radius *= factor,
            Self::GoldenSpiral { scale, .. } | Self::FibonacciSpiral { scale, .. } => {
                *scale *= factor;
            }
        }
        out
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerShape {
    Circle,
    Square,
    Rectangle,
    Triangle,
    Hexagon,
    Octagon,
}

/// Optional bounding shape drawn over the pattern, sized as a percentage of
/// the half-canvas. Built fresh per render; never persisted.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ContainerConfig {
    pub shape: ContainerShape,
    /// 0 < percent <= 100 of the half-canvas, used as the bounding radius.
    pub scale_percent: f64,
    pub stroke_color: Rgba8,
    /// Rectangle only: explicit half-extents overriding the derived radius.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rect_length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rect_width: Option<f64>,
}

impl ContainerConfig {
    pub fn validate(&self) -> GeoloomResult<()> {
        if !self.scale_percent.is_finite()
            || self.scale_percent <= 0.0
            || self.scale_percent > 100.0
        {
            return Err(GeoloomError::validation(
                "container.scale_percent must be in (0, 100]",
            ));
        }
        if (self.rect_length.is_some() || self.rect_width.is_some())
            && self.shape != ContainerShape::Rectangle
        {
            return Err(GeoloomError::validation(
                "container rect_length/rect_width only apply to the rectangle shape",
            ));
        }
        for (name, v) in [
            ("rect_length", self.rect_length),
            ("rect_width", self.rect_width),
        ] {
            if let Some(v) = v
                && (!v.is_finite() || v <= 0.0)
            {
                return Err(GeoloomError::validation(format!(
                    "container.{name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

fn default_supersample() -> u32 {
    DEFAULT_SUPERSAMPLE
}

fn default_glow() -> bool {
    true
}

/// Everything one render needs. A request is a plain value: rendering it
/// twice yields byte-identical output.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderRequest {
    #[serde(flatten)]
    pub pattern: Pattern,
    pub stroke_color: Rgba8,
    /// Stroke width in output pixels, >= 1.
    pub stroke_width: f64,
    /// Output canvas edge in pixels (square).
    pub size: u32,
    pub background: Rgba8,
    #[serde(default = "default_glow")]
    pub glow: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerConfig>,
    #[serde(default = "default_supersample")]
    pub supersample: u32,
}

impl RenderRequest {
    pub fn validate(&self) -> GeoloomResult<()> {
        self.pattern.validate()?;
        if !self.stroke_width.is_finite() || self.stroke_width < 1.0 {
            return Err(GeoloomError::validation("stroke_width must be >= 1"));
        }
        if self.size == 0 {
            return Err(GeoloomError::validation("size must be >= 1"));
        }
        if self.supersample == 0 {
            return Err(GeoloomError::validation("supersample must be >= 1"));
        }
        let working = self
            .size
            .checked_mul(self.supersample)
            .ok_or_else(|| GeoloomError::validation("size * supersample overflows"))?;
        if working > MAX_WORKING_DIM {
            return Err(GeoloomError::validation(format!(
                "size * supersample must be <= {MAX_WORKING_DIM} (got {working})"
            )));
        }
        if let Some(container) = &self.container {
            container.validate()?;
        }
        Ok(())
    }
}
