//! Recursive Whitted-style shading.
//!
//! Implements:
//! - Direct illumination from point lights with hard shadows
//! - Phong-style specular highlights around the mirror direction
//! - Recursive mirror reflection up to a configurable depth

use std::cell::Cell;
use std::ops::AddAssign;

use glint_core::{Color, Surface};
use glint_math::{unit, Ray, Vec3};

use crate::{Intersection, Scene, SceneObject, DEFAULT_BAND_HEIGHT};

/// Secondary rays start this far along their direction so they do not
/// re-hit the surface they leave.
pub const SURFACE_OFFSET: f64 = 1e-3;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Maximum reflection depth; primary rays are depth 0
    pub max_depth: u32,
    /// Color when a ray doesn't hit anything
    pub background: Color,
    /// Added instead of the reflection once `max_depth` is reached
    pub depth_fallback: Color,
    /// Rows per parallel work item
    pub band_height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            background: Color::BACKGROUND,
            depth_fallback: Color::GRAY,
            band_height: DEFAULT_BAND_HEIGHT,
        }
    }
}

/// Counters gathered while tracing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceStats {
    /// Calls to `Tracer::trace`, primary and reflected
    pub trace_calls: u64,
    pub shadow_rays: u64,
    pub reflected_rays: u64,
    /// Deepest recursion level reached
    pub deepest: u32,
}

impl AddAssign for TraceStats {
    fn add_assign(&mut self, other: TraceStats) {
        self.trace_calls += other.trace_calls;
        self.shadow_rays += other.shadow_rays;
        self.reflected_rays += other.reflected_rays;
        self.deepest = self.deepest.max(other.deepest);
    }
}

/// Traces rays through one scene.
///
/// A tracer keeps its own counters, so parallel drivers give each worker
/// its own tracer and sum the stats afterwards.
pub struct Tracer<'a> {
    scene: &'a Scene,
    config: &'a RenderConfig,
    stats: Cell<TraceStats>,
}

impl<'a> Tracer<'a> {
    pub fn new(scene: &'a Scene, config: &'a RenderConfig) -> Self {
        Self {
            scene,
            config,
            stats: Cell::new(TraceStats::default()),
        }
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> TraceStats {
        self.stats.get()
    }

    /// Final device color of pixel (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let ray = self.scene.camera().primary_ray(x, y);
        self.trace(&ray, 0).to_rgb8()
    }

    /// Color seen along `ray` at recursion level `depth`.
    pub fn trace(&self, ray: &Ray, depth: u32) -> Color {
        self.update_stats(|s| {
            s.trace_calls += 1;
            s.deepest = s.deepest.max(depth);
        });

        match self.scene.closest_intersection(ray) {
            Some(hit) => self.shade(&hit, depth),
            None => self.config.background,
        }
    }

    /// Local lighting at a hit plus whatever its mirror direction sees.
    fn shade(&self, hit: &Intersection<'_>, depth: u32) -> Color {
        // R = 2(N.L)N - L with L pointing back along the incoming ray
        let to_viewer = -hit.ray.direction;
        let position = hit.position();
        let normal = hit.object.normal(position);
        let reflect_dir = 2.0 * normal.dot(to_viewer) * normal - to_viewer;

        let color = Color::DEFAULT + self.natural_color(hit.object, position, normal, reflect_dir);

        if depth >= self.config.max_depth {
            return color + self.config.depth_fallback;
        }

        color + self.reflection_color(hit.object.surface(), position, reflect_dir, depth)
    }

    /// Diffuse and specular light reaching `position` directly from each light.
    fn natural_color(
        &self,
        object: &SceneObject,
        position: Vec3,
        normal: Vec3,
        reflect_dir: Vec3,
    ) -> Color {
        let surface = object.surface();
        let mut color = Color::BLACK;

        for light in self.scene.lights() {
            let to_light = light.position - position;
            // A light sitting exactly on the surface lights nothing
            let Ok(light_dir) = unit(to_light) else {
                continue;
            };

            if self.in_shadow(position, light_dir, to_light.length()) {
                continue;
            }

            let illumination = light_dir.dot(normal);
            let diffuse = if illumination > 0.0 {
                illumination * light.color
            } else {
                Color::BLACK
            };

            let highlight = light_dir.dot(reflect_dir);
            let specular = if highlight > 0.0 {
                highlight.powf(surface.roughness()) * light.color
            } else {
                Color::BLACK
            };

            color += surface.diffuse(position) * diffuse + surface.specular(position) * specular;
        }

        color
    }

    /// Whether something sits between `position` and a light `distance` away.
    ///
    /// An occluder beyond the light does not cast a shadow.
    fn in_shadow(&self, position: Vec3, light_dir: Vec3, distance: f64) -> bool {
        self.update_stats(|s| s.shadow_rays += 1);

        let shadow_ray = Ray::new(position + SURFACE_OFFSET * light_dir, light_dir);
        match self.scene.test_ray(&shadow_ray) {
            Some(occluder) => occluder <= distance - SURFACE_OFFSET,
            None => false,
        }
    }

    fn reflection_color(
        &self,
        surface: &Surface,
        position: Vec3,
        reflect_dir: Vec3,
        depth: u32,
    ) -> Color {
        let reflectiveness = surface.reflectiveness(position);
        if reflectiveness <= 0.0 {
            return Color::BLACK;
        }

        self.update_stats(|s| s.reflected_rays += 1);
        let ray = Ray::new(position + SURFACE_OFFSET * reflect_dir, reflect_dir);
        reflectiveness * self.trace(&ray, depth + 1)
    }

    fn update_stats(&self, f: impl FnOnce(&mut TraceStats)) {
        let mut stats = self.stats.get();
        f(&mut stats);
        self.stats.set(stats);
    }
}
