use mayhem_core::error::WorldError;

/// Failure to turn a scenario file into a running session.
#[derive(Debug)]
pub enum ScenarioError {
    Io { path: String, source: std::io::Error },
    Parse { path: String, source: toml::de::Error },
    World(WorldError),
}

impl std::fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read {path}: {source}"),
            Self::Parse { path, source } => write!(f, "failed to parse {path}: {source}"),
            Self::World(e) => write!(f, "failed to build world: {e}"),
        }
    }
}

impl std::error::Error for ScenarioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::World(e) => Some(e),
        }
    }
}

impl From<WorldError> for ScenarioError {
    fn from(e: WorldError) -> Self {
        Self::World(e)
    }
}
