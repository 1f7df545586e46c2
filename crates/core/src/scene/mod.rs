use crate::ResourceError;

/// A unit of application state following the four-stage protocol.
///
/// The legal call sequence is `init` exactly once, then any number of
/// `update`/`draw` frames, then `destroy` exactly once. A scene acquires
/// its resources (fonts, sounds, music streams) in `init` and releases
/// them in `destroy`; within a frame, control operations issued in
/// `update` take effect before the `draw` that depends on them, since
/// nothing is queued. Drive implementations through a [`SceneDriver`],
/// which enforces the ordering.
pub trait Scene {
    fn init(&mut self) -> Result<(), ResourceError>;
    fn update(&mut self, delta_seconds: f32) -> Result<(), ResourceError>;
    fn draw(&mut self) -> Result<(), ResourceError>;
    fn destroy(&mut self) -> Result<(), ResourceError>;
}

/// Where a scene currently sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneStage {
    /// Constructed, `init` not yet run.
    Created,
    /// `init` succeeded; `update`/`draw` are legal.
    Running,
    /// `destroy` has run; the scene is inert.
    Destroyed,
}

impl std::fmt::Display for SceneStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Created => "created",
            Self::Running => "running",
            Self::Destroyed => "destroyed",
        };
        f.write_str(name)
    }
}

/// Errors surfaced while driving a scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// The caller broke the stage protocol, e.g. `update` before `init` or
    /// a second `destroy`. A protocol error, not a resource failure.
    #[error("cannot `{attempted}` a scene while it is {current}")]
    IllegalStage {
        attempted: &'static str,
        current: SceneStage,
    },
    /// A resource operation inside the scene failed.
    #[error(transparent)]
    Resource(#[from] ResourceError),
}

/// Wraps a [`Scene`] in an explicit stage machine with transition guards.
#[derive(Debug)]
pub struct SceneDriver<S: Scene> {
    scene: S,
    stage: SceneStage,
}

impl<S: Scene> SceneDriver<S> {
    pub fn new(scene: S) -> Self {
        Self {
            scene,
            stage: SceneStage::Created,
        }
    }

    pub fn stage(&self) -> SceneStage {
        self.stage
    }

    fn guard(&self, attempted: &'static str, expected: SceneStage) -> Result<(), SceneError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(SceneError::IllegalStage {
                attempted,
                current: self.stage,
            })
        }
    }

    /// Runs `init`. Legal only once, from the created stage. A failed init
    /// leaves the scene in the created stage; the scene's own `init` is
    /// responsible for releasing anything it acquired before failing.
    pub fn init(&mut self) -> Result<(), SceneError> {
        self.guard("init", SceneStage::Created)?;
        self.scene.init()?;
        self.stage = SceneStage::Running;
        Ok(())
    }

    pub fn update(&mut self, delta_seconds: f32) -> Result<(), SceneError> {
        self.guard("update", SceneStage::Running)?;
        self.scene.update(delta_seconds)?;
        Ok(())
    }

    pub fn draw(&mut self) -> Result<(), SceneError> {
        self.guard("draw", SceneStage::Running)?;
        self.scene.draw()?;
        Ok(())
    }

    /// Runs `destroy`. The scene becomes inert even when the inner destroy
    /// reports an error; the error is still propagated.
    pub fn destroy(&mut self) -> Result<(), SceneError> {
        self.guard("destroy", SceneStage::Running)?;
        let result = self.scene.destroy();
        self.stage = SceneStage::Destroyed;
        result.map_err(SceneError::from)
    }
}
