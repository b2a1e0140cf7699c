//! The rendering seam.
//!
//! Mesh, material, and scene-graph work live behind [`SceneAdapter`]. The
//! session pushes transforms through it once per tick; failures are logged
//! and the tick continues.

use glam::{DQuat, DVec3};
use rustc_hash::FxHashMap;

/// Errors a scene collaborator may report.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    /// The named node does not exist in the scene.
    #[error("no scene node for '{0}'")]
    UnknownNode(String),

    /// A transform with NaN or infinite components was rejected.
    #[error("non-finite transform for '{0}'")]
    InvalidTransform(String),

    /// The backend cannot accept updates right now.
    #[error("scene unavailable: {0}")]
    Unavailable(String),
}

/// Static facts about a body the scene needs to build its node.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyVisual {
    pub name: String,
    /// Mean radius, km.
    pub radius: f64,
    /// Attach ring geometry.
    pub has_rings: bool,
    /// Axial tilt beyond 90°.
    pub extreme_tilt: bool,
}

/// What the session needs from a renderer.
pub trait SceneAdapter {
    /// Create the node for a body. Called once per body at session start.
    fn register_body(&mut self, visual: &BodyVisual) -> Result<(), SceneError>;

    fn sync_body(
        &mut self,
        name: &str,
        position: DVec3,
        orientation: DQuat,
    ) -> Result<(), SceneError>;

    fn sync_camera(&mut self, position: DVec3, orientation: DQuat) -> Result<(), SceneError>;

    /// Replace the orbit path polylines. `visible` false hides them.
    fn sync_orbit_paths(
        &mut self,
        paths: &[(String, Vec<DVec3>)],
        visible: bool,
    ) -> Result<(), SceneError>;
}

/// A scene that only records what it was told. Used by the headless binary
/// and by tests.
#[derive(Debug, Default)]
pub struct HeadlessScene {
    visuals: FxHashMap<String, BodyVisual>,
    bodies: FxHashMap<String, (DVec3, DQuat)>,
    camera: Option<(DVec3, DQuat)>,
    orbit_paths: FxHashMap<String, Vec<DVec3>>,
    orbits_visible: bool,
    frames: u64,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visual(&self, name: &str) -> Option<&BodyVisual> {
        self.visuals.get(name)
    }

    pub fn body_transform(&self, name: &str) -> Option<(DVec3, DQuat)> {
        self.bodies.get(name).copied()
    }

    pub fn camera(&self) -> Option<(DVec3, DQuat)> {
        self.camera
    }

    pub fn orbit_path(&self, name: &str) -> Option<&[DVec3]> {
        self.orbit_paths.get(name).map(Vec::as_slice)
    }

    pub fn orbits_visible(&self) -> bool {
        self.orbits_visible
    }

    /// Camera syncs received, one per rendered frame.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl SceneAdapter for HeadlessScene {
    fn register_body(&mut self, visual: &BodyVisual) -> Result<(), SceneError> {
        self.visuals.insert(visual.name.clone(), visual.clone());
        Ok(())
    }

    fn sync_body(
        &mut self,
        name: &str,
        position: DVec3,
        orientation: DQuat,
    ) -> Result<(), SceneError> {
        if !self.visuals.contains_key(name) {
            return Err(SceneError::UnknownNode(name.to_string()));
        }
        if !position.is_finite() || !orientation.is_finite() {
            return Err(SceneError::InvalidTransform(name.to_string()));
        }
        self.bodies.insert(name.to_string(), (position, orientation));
        Ok(())
    }

    fn sync_camera(&mut self, position: DVec3, orientation: DQuat) -> Result<(), SceneError> {
        if !position.is_finite() || !orientation.is_finite() {
            return Err(SceneError::InvalidTransform("camera".to_string()));
        }
        self.camera = Some((position, orientation));
        self.frames += 1;
        Ok(())
    }

    fn sync_orbit_paths(
        &mut self,
        paths: &[(String, Vec<DVec3>)],
        visible: bool,
    ) -> Result<(), SceneError> {
        self.orbits_visible = visible;
        if visible {
            self.orbit_paths = paths.iter().cloned().collect();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn earth_visual() -> BodyVisual {
        BodyVisual {
            name: "Earth".to_string(),
            radius: 6_371.0,
            has_rings: false,
            extreme_tilt: false,
        }
    }

    #[test]
    fn test_unregistered_body_rejected() {
        let mut scene = HeadlessScene::new();
        let result = scene.sync_body("Earth", DVec3::ZERO, DQuat::IDENTITY);
        assert_eq!(result, Err(SceneError::UnknownNode("Earth".to_string())));
    }

    #[test]
    fn test_records_transforms() {
        let mut scene = HeadlessScene::new();
        scene.register_body(&earth_visual()).unwrap();
        scene
            .sync_body("Earth", DVec3::X, DQuat::from_rotation_y(1.0))
            .unwrap();
        scene.sync_camera(DVec3::Y, DQuat::IDENTITY).unwrap();

        let (position, _) = scene.body_transform("Earth").unwrap();
        assert_eq!(position, DVec3::X);
        assert_eq!(scene.camera().unwrap().0, DVec3::Y);
        assert_eq!(scene.frames(), 1);
    }

    #[test]
    fn test_nan_transform_rejected() {
        let mut scene = HeadlessScene::new();
        scene.register_body(&earth_visual()).unwrap();
        let result = scene.sync_body("Earth", DVec3::NAN, DQuat::IDENTITY);
        assert!(matches!(result, Err(SceneError::InvalidTransform(_))));
        assert!(scene.sync_camera(DVec3::NAN, DQuat::IDENTITY).is_err());
        assert_eq!(scene.frames(), 0);
    }

    #[test]
    fn test_hidden_orbits_keep_previous_paths() {
        let mut scene = HeadlessScene::new();
        let paths = vec![("Earth".to_string(), vec![DVec3::X, DVec3::Z])];
        scene.sync_orbit_paths(&paths, true).unwrap();
        scene.sync_orbit_paths(&[], false).unwrap();
        assert!(!scene.orbits_visible());
        assert_eq!(scene.orbit_path("Earth").unwrap().len(), 2);
    }
}
