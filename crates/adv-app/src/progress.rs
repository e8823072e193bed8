use adv_schemes::Scheme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    LoadingRequest,
    Lowering,
    CheckingStability,
    Stepping,
    ComputingDiagnostics,
    Completed,
    Failed,
}

impl RunStage {
    pub fn label(&self) -> &'static str {
        match self {
            RunStage::LoadingRequest => "loading",
            RunStage::Lowering => "lowering",
            RunStage::CheckingStability => "cfl-check",
            RunStage::Stepping => "stepping",
            RunStage::ComputingDiagnostics => "diagnostics",
            RunStage::Completed => "completed",
            RunStage::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunProgressEvent {
    pub scheme: Option<Scheme>,
    pub stage: RunStage,
    pub elapsed_wall_s: f64,
    /// Last completed time level while stepping.
    pub level: Option<usize>,
    pub total_levels: Option<usize>,
    pub message: Option<String>,
}

impl RunProgressEvent {
    pub fn stage(stage: RunStage, elapsed_wall_s: f64, message: Option<String>) -> Self {
        Self {
            scheme: None,
            stage,
            elapsed_wall_s,
            level: None,
            total_levels: None,
            message,
        }
    }

    /// Fraction of time levels completed, when stepping.
    pub fn fraction_complete(&self) -> Option<f64> {
        match (self.level, self.total_levels) {
            (Some(level), Some(total)) if total > 1 => Some(level as f64 / (total - 1) as f64),
            (Some(_), Some(_)) => Some(1.0),
            _ => None,
        }
    }
}
