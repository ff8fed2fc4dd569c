//! Mapping from design-canvas coordinates to window pixels.
//!
//! [`Projection::Flat`] is the 2D path: a uniform scale plus an origin.
//! [`Projection::Perspective`] lays the design canvas on a plane tilted away
//! from a pinhole [`Camera`] and projects it; pegs become spheres resting on
//! that plane.

/// Perspective camera looking down -Z at a tilted board plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Distance from the eye to the plane's center
    pub distance: f32,
    /// Rotation of the plane about the X axis in radians; the top edge recedes
    pub tilt: f32,
    /// World units per design pixel
    pub units_per_px: f32,
    pub design: (f32, f32),
    pub window: (f32, f32),
}

impl Camera {
    /// Camera used by the 3D mode for a given window size.
    pub fn for_window(design: (f32, f32), window: (f32, f32)) -> Self {
        Self {
            fov_y: 45f32.to_radians(),
            distance: 26.0,
            tilt: 25f32.to_radians(),
            units_per_px: 28.0 / design.0,
            design,
            window: (window.0.max(1.0), window.1.max(1.0)),
        }
    }

    fn focal(&self) -> f32 {
        1.0 / (self.fov_y / 2.0).tan()
    }

    fn aspect(&self) -> f32 {
        self.window.0 / self.window.1
    }

    /// Unit normal of the board plane, pointing at the camera.
    fn normal(&self) -> [f32; 3] {
        [0.0, self.tilt.sin(), self.tilt.cos()]
    }

    /// World position of a design-canvas point on the board plane.
    pub fn world(&self, p: [f32; 2]) -> [f32; 3] {
        let dx = (p[0] - self.design.0 / 2.0) * self.units_per_px;
        let dy = (p[1] - self.design.1 / 2.0) * self.units_per_px;
        [
            dx,
            -dy * self.tilt.cos(),
            -self.distance + dy * self.tilt.sin(),
        ]
    }

    /// Window pixel and view depth of a world point.
    pub fn project(&self, w: [f32; 3]) -> ([f32; 2], f32) {
        let depth = (-w[2]).max(1e-3);
        let f = self.focal();
        let ndc_x = f / self.aspect() * w[0] / depth;
        let ndc_y = f * w[1] / depth;
        (
            [
                (ndc_x + 1.0) / 2.0 * self.window.0,
                (1.0 - ndc_y) / 2.0 * self.window.1,
            ],
            depth,
        )
    }

    /// Window pixels per world unit at a given depth.
    pub fn pixels_per_unit(&self, depth: f32) -> f32 {
        self.focal() / depth.max(1e-3) * self.window.1 / 2.0
    }

    /// Sphere of `radius_px` design pixels resting on the plane at `p`.
    ///
    /// Returns the projected center, projected radius and depth.
    pub fn sphere(&self, p: [f32; 2], radius_px: f32) -> ([f32; 2], f32, f32) {
        let r = radius_px * self.units_per_px;
        let base = self.world(p);
        let n = self.normal();
        let center = [base[0] + n[0] * r, base[1] + n[1] * r, base[2] + n[2] * r];
        let (screen, depth) = self.project(center);
        (screen, r * self.pixels_per_unit(depth), depth)
    }
}

/// How design coordinates reach the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Flat { origin: [f32; 2], scale: f32 },
    Perspective(Camera),
}

impl Projection {
    pub fn point(&self, p: [f32; 2]) -> [f32; 2] {
        match self {
            Projection::Flat { origin, scale } => {
                [origin[0] + p[0] * scale, origin[1] + p[1] * scale]
            }
            Projection::Perspective(camera) => camera.project(camera.world(p)).0,
        }
    }

    /// Window pixels per design pixel around `p`.
    pub fn scale_at(&self, p: [f32; 2]) -> f32 {
        match self {
            Projection::Flat { scale, .. } => *scale,
            Projection::Perspective(camera) => {
                let (_, depth) = camera.project(camera.world(p));
                camera.units_per_px * camera.pixels_per_unit(depth)
            }
        }
    }

    pub fn is_perspective(&self) -> bool {
        matches!(self, Projection::Perspective(_))
    }
}
