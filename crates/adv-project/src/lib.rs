//! adv-project: solve request file format, validation and lowering.

pub mod lower;
pub mod schema;
pub mod validate;

pub use lower::{SolverInputs, boundary_policy, lower_request, sample_initial};
pub use schema::*;
pub use validate::{ValidationError, validate_request};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Grid error: {0}")]
    Grid(#[from] adv_core::AdvError),

    #[error("Unsupported file extension: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn from_yaml_str(content: &str) -> ProjectResult<SolveRequest> {
    let request: SolveRequest = serde_yaml::from_str(content)?;
    validate_request(&request)?;
    Ok(request)
}

pub fn from_json_str(content: &str) -> ProjectResult<SolveRequest> {
    let request: SolveRequest = serde_json::from_str(content)?;
    validate_request(&request)?;
    Ok(request)
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<SolveRequest> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

pub fn save_yaml(path: &std::path::Path, request: &SolveRequest) -> ProjectResult<()> {
    validate_request(request)?;
    let content = serde_yaml::to_string(request)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<SolveRequest> {
    let content = std::fs::read_to_string(path)?;
    from_json_str(&content)
}

pub fn save_json(path: &std::path::Path, request: &SolveRequest) -> ProjectResult<()> {
    validate_request(request)?;
    let content = serde_json::to_string_pretty(request)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a request, choosing the format from the file extension.
pub fn load_request(path: &std::path::Path) -> ProjectResult<SolveRequest> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => load_yaml(path),
        Some("json") => load_json(path),
        other => Err(ProjectError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}
