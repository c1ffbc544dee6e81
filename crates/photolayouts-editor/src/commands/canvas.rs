use photolayouts_core::{CanvasSize, Result};
use photolayouts_scene::{SceneChange, SceneModel};
use tracing::debug;

use super::Command;

/// Resizes the layout canvas.
#[derive(Debug, Clone, Copy)]
pub struct CanvasResize {
    size: CanvasSize,
    previous: CanvasSize,
}

impl CanvasResize {
    pub const DESCRIPTION: &'static str = "Canvas size change";

    pub fn new(scene: &dyn SceneModel, size: CanvasSize) -> Result<Self> {
        size.validate()?;
        Ok(Self {
            size,
            previous: scene.canvas_size(),
        })
    }

    pub fn new_size(&self) -> CanvasSize {
        self.size
    }

    pub fn old_size(&self) -> CanvasSize {
        self.previous
    }

    fn resize(scene: &mut dyn SceneModel, size: CanvasSize) -> Result<()> {
        scene.set_canvas_size(size)?;
        debug!("Canvas resized to {}x{}", size.width, size.height);
        scene.notify_changed(SceneChange::CanvasResized { size });
        Ok(())
    }
}

impl Command for CanvasResize {
    fn apply(&mut self, scene: &mut dyn SceneModel) -> Result<()> {
        Self::resize(scene, self.size)
    }

    fn reverse(&mut self, scene: &mut dyn SceneModel) -> Result<()> {
        Self::resize(scene, self.previous)
    }

    fn description(&self) -> &str {
        Self::DESCRIPTION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photolayouts_core::{CommandError, Error};
    use photolayouts_scene::Scene;

    #[test]
    fn test_resize_and_restore() {
        let mut scene = Scene::default();
        let original = scene.canvas_size();
        let mut cmd = CanvasResize::new(&scene, CanvasSize::new(640.0, 480.0)).unwrap();
        assert_eq!(cmd.old_size(), original);

        cmd.apply(&mut scene).unwrap();
        assert_eq!(scene.canvas_size(), CanvasSize::new(640.0, 480.0));

        cmd.reverse(&mut scene).unwrap();
        assert_eq!(scene.canvas_size(), original);
        assert_eq!(cmd.description(), "Canvas size change");
    }

    #[test]
    fn test_rejects_empty_canvas() {
        let scene = Scene::default();
        let err = CanvasResize::new(&scene, CanvasSize::new(0.0, 480.0)).unwrap_err();
        assert!(matches!(
            err,
            Error::Command(CommandError::InvalidCanvasSize { .. })
        ));
    }
}
