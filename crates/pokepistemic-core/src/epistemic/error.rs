use crate::model::proposition::Proposition;
use core::fmt;
use thiserror::Error;

/// Failure kinds reported to the command surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnknownSubject,
    NoActiveModel,
    ContradictoryObservation,
    UnrecognizedProposition,
    NoSurvivingWorlds,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::UnknownSubject => "unknown_subject",
            ErrorKind::NoActiveModel => "no_active_model",
            ErrorKind::ContradictoryObservation => "contradictory_observation",
            ErrorKind::UnrecognizedProposition => "unrecognized_proposition",
            ErrorKind::NoSurvivingWorlds => "no_surviving_worlds",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by engine operations. Every failing operation leaves model state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("unknown subject '{subject}': not present in the catalog")]
    UnknownSubject { subject: String },
    #[error("'{subject}' has not been revealed yet")]
    NoActiveModel { subject: String },
    #[error(
        "observation {proposition} contradicts every one of the {surviving} remaining sets for '{subject}'"
    )]
    ContradictoryObservation {
        subject: String,
        proposition: Proposition,
        surviving: usize,
    },
    #[error("{proposition} is not mentioned by any catalog set for '{subject}'")]
    UnrecognizedProposition {
        subject: String,
        proposition: Proposition,
    },
    #[error("no surviving worlds remain for '{subject}'")]
    NoSurvivingWorlds { subject: String },
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::UnknownSubject { .. } => ErrorKind::UnknownSubject,
            EngineError::NoActiveModel { .. } => ErrorKind::NoActiveModel,
            EngineError::ContradictoryObservation { .. } => ErrorKind::ContradictoryObservation,
            EngineError::UnrecognizedProposition { .. } => ErrorKind::UnrecognizedProposition,
            EngineError::NoSurvivingWorlds { .. } => ErrorKind::NoSurvivingWorlds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_maps_each_variant() {
        let err = EngineError::ContradictoryObservation {
            subject: "Dragapult".into(),
            proposition: Proposition::has_move("Surf"),
            surviving: 3,
        };
        assert_eq!(err.kind(), ErrorKind::ContradictoryObservation);
        assert_eq!(err.kind().as_str(), "contradictory_observation");
        assert!(err.to_string().contains("has_move:Surf"));

        let err = EngineError::NoActiveModel {
            subject: "Garchomp".into(),
        };
        assert_eq!(err.kind(), ErrorKind::NoActiveModel);
    }
}
