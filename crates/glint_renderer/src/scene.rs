//! The runtime scene: primitives, lights and the camera.

use std::collections::HashMap;
use std::sync::Arc;

use glint_core::{Light, ObjectDescription, SceneDescription, Surface};
use glint_math::{Ray, Vec3};

use crate::{Camera, Cube, Intersection, Model, Plane, Polygon, RenderResult, SceneObject, Sphere};

/// Everything the tracer reads. Built once, never mutated while rendering.
#[derive(Debug, Clone)]
pub struct Scene {
    objects: Vec<SceneObject>,
    lights: Vec<Light>,
    camera: Camera,
}

impl Scene {
    /// Create an empty scene viewed through `camera`.
    pub fn new(camera: Camera) -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
            camera,
        }
    }

    /// Add a primitive.
    pub fn add_object(&mut self, object: impl Into<SceneObject>) {
        self.objects.push(object.into());
    }

    /// Add a point light.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Flatten a model into the primitive list.
    pub fn add_model(&mut self, model: &dyn Model) -> RenderResult<()> {
        self.objects.extend(model.objects()?);
        Ok(())
    }

    /// Builder-style `add_object`.
    pub fn with_object(mut self, object: impl Into<SceneObject>) -> Self {
        self.add_object(object);
        self
    }

    /// Builder-style `add_light`.
    pub fn with_light(mut self, light: Light) -> Self {
        self.add_light(light);
        self
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Replace the camera, e.g. to override the resolution.
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    /// Nearest hit of `ray` across all primitives.
    pub fn closest_intersection(&self, ray: &Ray) -> Option<Intersection<'_>> {
        self.objects
            .iter()
            .filter_map(|object| object.intersect(ray))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    /// Distance to the nearest surface along `ray`, or `None` when nothing
    /// is in the way. Used for shadow rays.
    pub fn test_ray(&self, ray: &Ray) -> Option<f64> {
        self.closest_intersection(ray).map(|hit| hit.distance)
    }

    /// Build a scene from a description, resolving surface names.
    ///
    /// Objects naming the same surface share one `Arc<Surface>`.
    pub fn from_description(desc: &SceneDescription) -> RenderResult<Self> {
        let cam = &desc.camera;
        let camera = Camera::new(
            Vec3::from_array(cam.position),
            Vec3::from_array(cam.look_at),
            cam.width,
            cam.height,
        )?
        .with_fov_scale(cam.fov_scale)?;

        let mut scene = Scene::new(camera);
        let mut surfaces: HashMap<&str, Arc<Surface>> = HashMap::new();

        for object in &desc.objects {
            let name = object.surface();
            let surface = match surfaces.get(name) {
                Some(surface) => Arc::clone(surface),
                None => {
                    let surface = Arc::new(desc.resolve_surface(name)?);
                    surfaces.insert(name, Arc::clone(&surface));
                    surface
                }
            };

            match object {
                ObjectDescription::Plane { normal, point, .. } => {
                    scene.add_object(Plane::new(
                        Vec3::from_array(*normal),
                        Vec3::from_array(*point),
                        surface,
                    )?);
                }
                ObjectDescription::Sphere { center, radius, .. } => {
                    scene.add_object(Sphere::new(Vec3::from_array(*center), *radius, surface)?);
                }
                ObjectDescription::Polygon {
                    vertices, normal, ..
                } => {
                    let vertices = vertices.iter().copied().map(Vec3::from_array).collect();
                    scene.add_object(Polygon::new(vertices, Vec3::from_array(*normal), surface)?);
                }
                ObjectDescription::Cube { size, offset, .. } => {
                    scene.add_model(&Cube::new(*size, Vec3::from_array(*offset), surface)?)?;
                }
            }
        }

        for light in &desc.lights {
            scene.add_light(light.to_light());
        }

        log::info!(
            "Built scene: {} primitives, {} lights, {} surfaces, {}x{}",
            scene.objects.len(),
            scene.lights.len(),
            surfaces.len(),
            scene.camera.width(),
            scene.camera.height()
        );

        Ok(scene)
    }
}
