//! Presentation records: which dataset is shown, and how.
//!
//! A [`Scene`] is a plain description (actors, a legend, a window size) that
//! a viewer or exporter can consume. Nothing here draws.

use crate::pipeline::PipelineOutput;
use crate::polydata::PolyData;
#[cfg(feature = "stl-io")]
use crate::errors::PipelineError;
#[cfg(feature = "stl-io")]
use std::path::{Path, PathBuf};

/// RGB color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Color { r, g, b }
    }
}

/// How an actor's polygons are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    Surface,
    Wireframe,
}

/// One displayed dataset with its style
#[derive(Debug, Clone)]
pub struct Actor {
    pub name: String,
    pub geometry: PolyData,
    /// `None` leaves the viewer's default color
    pub color: Option<Color>,
    pub representation: Representation,
    /// Polygon edges drawn in this color on top of the surface
    pub edge_color: Option<Color>,
    /// Color the geometry by its scalars instead of `color`
    pub scalar_visibility: bool,
}

impl Actor {
    fn new(name: &str, geometry: PolyData) -> Self {
        Actor {
            name: name.to_string(),
            geometry,
            color: None,
            representation: Representation::Surface,
            edge_color: None,
            scalar_visibility: true,
        }
    }

    /// Actor name made safe for use as a file stem
    pub fn file_stem(&self) -> String {
        self.name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect()
    }
}

/// Screen-space text overlay
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub text: String,
    /// Display position in pixels from the bottom-left corner
    pub position: (i32, i32),
    pub font_size: u32,
    pub font_family: String,
    pub color: Color,
}

impl Default for Legend {
    fn default() -> Self {
        Legend {
            text: "Red: Surface    Green: Cutting Plane     White: Intersection     Lines: Wireframe"
                .to_string(),
            position: (20, 30),
            font_size: 20,
            font_family: "Arial".to_string(),
            color: Color::YELLOW,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub window_size: (u32, u32),
    pub surface_color: Color,
    pub intersection_color: Color,
    pub plane_edge_color: Color,
    pub legend: Legend,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            window_size: (1920, 1080),
            surface_color: Color::RED,
            intersection_color: Color::WHITE,
            plane_edge_color: Color::GREEN,
            legend: Legend::default(),
        }
    }
}

/// Actors in draw order, a legend, and the window they are meant for
#[derive(Debug, Clone)]
pub struct Scene {
    pub actors: Vec<Actor>,
    pub legend: Legend,
    pub window_size: (u32, u32),
}

impl Scene {
    /// Style the results of a pipeline run: the kept half as a solid surface,
    /// the intersection surface, the clipped-away half as a wireframe, and the
    /// contoured plane with highlighted edges.
    pub fn from_output(output: &PipelineOutput, config: &SceneConfig) -> Scene {
        let surface = Actor {
            color: Some(config.surface_color),
            scalar_visibility: false,
            ..Actor::new("surface", output.clip.kept.clone())
        };
        let intersection = Actor {
            color: Some(config.intersection_color),
            ..Actor::new("intersection", output.intersection_surface.clone())
        };
        let wireframe = Actor {
            representation: Representation::Wireframe,
            scalar_visibility: false,
            ..Actor::new("wireframe", output.clip.clipped_output())
        };
        let cutting_plane = Actor {
            edge_color: Some(config.plane_edge_color),
            scalar_visibility: false,
            ..Actor::new("cutting plane", output.plane_surface.clone())
        };

        Scene {
            actors: vec![surface, intersection, wireframe, cutting_plane],
            legend: config.legend.clone(),
            window_size: config.window_size,
        }
    }

    pub fn actor(&self, name: &str) -> Option<&Actor> {
        self.actors.iter().find(|a| a.name == name)
    }

    /// Write each actor's polygons to `<dir>/<actor>.stl` as binary STL,
    /// creating `dir` if needed. Returns the written paths in actor order.
    #[cfg(feature = "stl-io")]
    pub fn export_stl(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, PipelineError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        self.actors
            .iter()
            .map(|actor| {
                let path = dir.join(format!("{}.stl", actor.file_stem()));
                crate::io::write_stl_binary(&actor.geometry, &path)?;
                log::info!("wrote {} ({} polygons)", path.display(), actor.geometry.num_polys());
                Ok(path)
            })
            .collect()
    }
}
