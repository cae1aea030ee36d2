use cannon_sim::core::error::SimError;
use cannon_sim::core::mapper::DisplayConfig;
use cannon_sim::core::model::PhysicsModel;
use cannon_sim::core::params::ParameterSet;
use cannon_sim::core::playback::PlaybackController;
use cannon_sim::core::scheduler::FrameScheduler;

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum AppScene {
    Title,
    Simulation,
}

pub(crate) struct AppRuntime {
    pub(crate) params: ParameterSet,
    pub(crate) controller: PlaybackController,
    pub(crate) scheduler: FrameScheduler,
    pub(crate) scene: AppScene,
    pub(crate) status_line: String,
}

impl AppRuntime {
    pub(crate) fn new() -> Result<Self, SimError> {
        Ok(Self {
            params: ParameterSet::default(),
            controller: PlaybackController::new(PhysicsModel::Analytic, DisplayConfig::default())?,
            scheduler: FrameScheduler::default(),
            scene: AppScene::Title,
            status_line: "Ready".to_string(),
        })
    }

    pub(crate) fn toggle_model(&mut self) {
        let next = match self.controller.model() {
            PhysicsModel::Analytic => PhysicsModel::Drag,
            PhysicsModel::Drag => PhysicsModel::Analytic,
        };
        self.controller.set_model(next);
        self.status_line = format!("Model: {next} (applies on next fire)");
    }
}
