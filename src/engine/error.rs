use std::fmt;

use crate::data::DataError;
use crate::forecast::ForecastError;

/// First failure of a pipeline run. Nothing after the failing step ran.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    Data(DataError),
    Forecast(ForecastError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Data(e) => write!(f, "{}", e),
            PipelineError::Forecast(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Data(e) => Some(e),
            PipelineError::Forecast(e) => Some(e),
        }
    }
}

impl From<DataError> for PipelineError {
    fn from(e: DataError) -> Self {
        PipelineError::Data(e)
    }
}

impl From<ForecastError> for PipelineError {
    fn from(e: ForecastError) -> Self {
        PipelineError::Forecast(e)
    }
}
