//! Render drivers and pixel sinks.
//!
//! `render` is the sequential reference loop. `render_parallel` traces row
//! bands on the rayon pool and then hands pixels to the sink in the same
//! order, so both produce identical output.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;

use crate::{
    generate_bands, render_band, BandResult, RenderConfig, RenderError, RenderResult, Scene,
    TraceStats, Tracer,
};

/// Receives each finished pixel exactly once.
pub trait PixelSink {
    fn put(&mut self, x: u32, y: u32, rgb: [u8; 3]);
}

impl<F> PixelSink for F
where
    F: FnMut(u32, u32, [u8; 3]),
{
    fn put(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        self(x, y, rgb)
    }
}

/// Cooperative cancellation flag shared between a caller and a render.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// 8-bit RGB image buffer for storing render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 3]>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0]; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let i = self.index(x, y);
        self.pixels[i] = rgb;
    }

    /// Packed RGB bytes, row-major.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }

    /// Save the image; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        image::save_buffer(
            path.as_ref(),
            &self.to_bytes(),
            self.width,
            self.height,
            image::ColorType::Rgb8,
        )?;
        log::info!("Saved {}x{} image to {:?}", self.width, self.height, path.as_ref());
        Ok(())
    }
}

impl PixelSink for ImageBuffer {
    fn put(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        self.set(x, y, rgb);
    }
}

/// Render the whole scene, row-major from the top row, on this thread.
pub fn render<S>(scene: &Scene, config: &RenderConfig, sink: &mut S) -> TraceStats
where
    S: PixelSink + ?Sized,
{
    let camera = scene.camera();
    let (width, height) = (camera.width(), camera.height());
    log::info!("Rendering {}x{} (max depth {})", width, height, config.max_depth);

    let start = Instant::now();
    let tracer = Tracer::new(scene, config);
    for y in 0..height {
        for x in 0..width {
            sink.put(x, y, tracer.pixel(x, y));
        }
    }

    let stats = tracer.stats();
    log_finished(start, &stats);
    stats
}

/// Render the scene on the rayon pool, one task per row band.
///
/// The sink is only called once every band has finished, in row-major
/// order. If `cancel` fires, nothing is written and `Cancelled` is returned.
pub fn render_parallel<S>(
    scene: &Scene,
    config: &RenderConfig,
    sink: &mut S,
    cancel: &CancelToken,
) -> RenderResult<TraceStats>
where
    S: PixelSink + ?Sized,
{
    let camera = scene.camera();
    let (width, height) = (camera.width(), camera.height());
    let bands = generate_bands(width, height, config.band_height);
    log::info!(
        "Rendering {}x{} in {} bands on {} threads (max depth {})",
        width,
        height,
        bands.len(),
        rayon::current_num_threads(),
        config.max_depth
    );

    let start = Instant::now();
    let results: Option<Vec<BandResult>> = bands
        .par_iter()
        .map(|band| render_band(band, scene, config, cancel))
        .collect();

    let Some(results) = results else {
        log::warn!("Render cancelled after {:?}", start.elapsed());
        return Err(RenderError::Cancelled);
    };

    let mut stats = TraceStats::default();
    for result in results {
        let band = result.band;
        for (i, rgb) in result.pixels.into_iter().enumerate() {
            let x = (i % band.width as usize) as u32;
            let y = band.y + (i / band.width as usize) as u32;
            sink.put(x, y, rgb);
        }
        stats += result.stats;
    }

    log_finished(start, &stats);
    Ok(stats)
}

fn log_finished(start: Instant, stats: &TraceStats) {
    log::info!(
        "Rendered in {:?}: {} traces, {} shadow rays, {} reflections, depth {}",
        start.elapsed(),
        stats.trace_calls,
        stats.shadow_rays,
        stats.reflected_rays,
        stats.deepest
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Camera, Cube, Plane, Sphere};
    use glint_core::{Color, Light, SceneDescription, Surface};
    use glint_math::Vec3;

    /// A checkerboard floor lit from (8, 4, 8), seen from (6, 3, 6).
    fn checkerboard_scene(width: u32, height: u32) -> Scene {
        let camera = Camera::new(Vec3::new(6.0, 3.0, 6.0), Vec3::ZERO, width, height).unwrap();
        Scene::new(camera)
            .with_object(
                Plane::new(
                    Vec3::Y,
                    Vec3::new(0.0, -0.5, 0.0),
                    Arc::new(Surface::checkerboard()),
                )
                .unwrap(),
            )
            .with_light(Light::white(Vec3::new(8.0, 4.0, 8.0)))
    }

    fn busy_scene() -> Scene {
        let mut scene = checkerboard_scene(48, 40);
        let sphere = Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, Arc::new(Surface::shiny()));
        scene.add_object(sphere.unwrap());
        let cube = Cube::new(1.0, Vec3::new(1.5, -0.5, -1.0), Arc::new(Surface::red()));
        scene.add_model(&cube.unwrap()).unwrap();
        scene.add_light(Light::new(Vec3::new(-2.0, 2.5, 0.0), Color::new(0.49, 0.07, 0.07)));
        scene
    }

    #[test]
    fn test_render_visits_every_pixel_once_in_order() {
        let scene = checkerboard_scene(7, 5);
        let mut visited = Vec::new();
        render(&scene, &RenderConfig::default(), &mut |x: u32, y: u32, _rgb: [u8; 3]| {
            visited.push((x, y))
        });

        let expected: Vec<(u32, u32)> = (0..5).flat_map(|y| (0..7).map(move |x| (x, y))).collect();
        assert_eq!(visited, expected);
    }

    #[test]
    fn test_render_is_deterministic() {
        let scene = busy_scene();
        let config = RenderConfig::default();

        let mut first = ImageBuffer::new(48, 40);
        let mut second = ImageBuffer::new(48, 40);
        let stats_a = render(&scene, &config, &mut first);
        let stats_b = render(&scene, &config, &mut second);

        assert_eq!(first.to_bytes(), second.to_bytes());
        assert_eq!(stats_a, stats_b);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let scene = busy_scene();
        let config = RenderConfig {
            band_height: 7,
            ..Default::default()
        };

        let mut sequential = ImageBuffer::new(48, 40);
        let seq_stats = render(&scene, &config, &mut sequential);

        let mut parallel = ImageBuffer::new(48, 40);
        let par_stats =
            render_parallel(&scene, &config, &mut parallel, &CancelToken::new()).unwrap();

        assert_eq!(sequential, parallel);
        assert_eq!(seq_stats, par_stats);
    }

    /// Rows and columns of `image` in which every pixel equals `rgb`.
    fn uniform_lines(image: &ImageBuffer, rgb: [u8; 3]) -> (Vec<u32>, Vec<u32>) {
        let rows = (0..image.height)
            .filter(|&y| (0..image.width).all(|x| image.get(x, y) == rgb))
            .collect();
        let columns = (0..image.width)
            .filter(|&x| (0..image.height).all(|y| image.get(x, y) == rgb))
            .collect();
        (rows, columns)
    }

    #[test]
    fn test_checkerboard_floor_fills_the_image() {
        // Black tiles render as pure black, so use a background no tile produces
        let config = RenderConfig {
            background: Color::new(0.0, 0.0, 1.0),
            ..Default::default()
        };
        let background = config.background.to_rgb8();

        for (width, height) in [(60, 60), (600, 600)] {
            let scene = checkerboard_scene(width, height);
            let mut image = ImageBuffer::new(width, height);
            render_parallel(&scene, &config, &mut image, &CancelToken::new()).unwrap();

            // The pattern is visible
            let first = image.get(0, 0);
            assert!(image.pixels.iter().any(|p| *p != first));

            // The floor is infinite: no row or column is entirely background
            let (rows, columns) = uniform_lines(&image, background);
            assert!(rows.is_empty(), "{}x{} rows {:?}", width, height, rows);
            assert!(columns.is_empty(), "{}x{} columns {:?}", width, height, columns);
        }
    }

    #[test]
    fn test_every_primary_ray_hits_the_floor() {
        let scene = checkerboard_scene(600, 600);
        let camera = scene.camera();

        for y in 0..camera.height() {
            for x in 0..camera.width() {
                let ray = camera.primary_ray(x, y);
                assert!(scene.closest_intersection(&ray).is_some(), "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_wide_demo_view_sees_past_the_horizon() {
        let mut scene = Scene::from_description(&SceneDescription::demo()).unwrap();
        assert_eq!(scene.camera().fov_scale(), 1.5);
        scene.set_camera(scene.camera().clone().with_resolution(600, 600).unwrap());

        let camera = scene.camera();
        let row_misses = |y: u32| {
            (0..camera.width())
                .all(|x| scene.closest_intersection(&camera.primary_ray(x, y)).is_none())
        };

        // The top rows look above the floor, the bottom rows all hit it
        assert!(row_misses(0));
        assert!(!row_misses(300));
        assert!(!row_misses(599));
    }

    #[test]
    fn test_center_column_sees_only_black_tiles() {
        // The center column lies in the plane x = z, where floor(x) + floor(z)
        // is always even, and the light sits in that plane too
        let scene = checkerboard_scene(60, 60);
        let mut image = ImageBuffer::new(60, 60);
        render(&scene, &RenderConfig::default(), &mut image);

        let (_, columns) = uniform_lines(&image, Color::BACKGROUND.to_rgb8());
        assert!(columns.contains(&30), "{:?}", columns);
    }

    #[test]
    fn test_cancelled_render_writes_nothing() {
        let scene = checkerboard_scene(16, 16);
        let cancel = CancelToken::new();
        cancel.cancel();

        let mut writes = 0;
        let mut count = |_: u32, _: u32, _: [u8; 3]| writes += 1;
        let result = render_parallel(&scene, &RenderConfig::default(), &mut count, &cancel);

        assert!(matches!(result, Err(RenderError::Cancelled)));
        assert_eq!(writes, 0);
    }

    #[test]
    fn test_empty_scene_renders_background() {
        let camera = Camera::new(Vec3::ZERO, Vec3::Z, 4, 3).unwrap();
        let scene = Scene::new(camera);
        let config = RenderConfig {
            background: Color::new(0.0, 0.0, 1.0),
            ..Default::default()
        };

        let mut image = ImageBuffer::new(4, 3);
        let stats = render(&scene, &config, &mut image);

        assert!(image.pixels.iter().all(|p| *p == [0, 0, 255]));
        assert_eq!(stats.trace_calls, 12);
        assert_eq!(stats.deepest, 0);
    }

    #[test]
    fn test_demo_scene_small() {
        let mut scene = Scene::from_description(&SceneDescription::demo()).unwrap();
        let camera = scene.camera().clone().with_resolution(32, 32).unwrap();
        scene.set_camera(camera);

        let mut image = ImageBuffer::new(32, 32);
        let stats = render(&scene, &RenderConfig::default(), &mut image);
        assert!(stats.trace_calls >= 32 * 32);
        assert!(image.pixels.iter().any(|p| p[0] > p[1]), "the red cube is visible");
    }

    #[test]
    fn test_image_buffer_bytes_and_save() {
        let mut image = ImageBuffer::new(2, 2);
        image.put(1, 0, [10, 20, 30]);
        image.put(0, 1, [40, 50, 60]);

        assert_eq!(image.get(1, 0), [10, 20, 30]);
        assert_eq!(
            image.to_bytes(),
            vec![0, 0, 0, 10, 20, 30, 40, 50, 60, 0, 0, 0]
        );

        let path = std::env::temp_dir().join(format!("glint_test_{}.png", std::process::id()));
        image.save(&path).unwrap();
        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded.into_raw(), image.to_bytes());
        std::fs::remove_file(&path).unwrap();
    }
}
