use thiserror::Error;

/// The clipper's result type.
pub type ClipResult<T> = Result<T, ClipError>;

/// Describes an unexpected error happening while clipping.
///
/// These indicate a broken mesh invariant rather than a problem with the input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum InternalError {
    #[error("Walk around the face of edge {edge} does not return to its start")]
    UnterminatedFaceWalk { edge: u32 },
    #[error("Walk around vertex {vertex} does not return to its start")]
    UnterminatedVertexWalk { vertex: u32 },
}

/// The clipper's error enumeration.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ClipError {
    #[error("Input path contains a non-finite coordinate")]
    NonFiniteCoordinate,
    #[error("Internal error: {0}")]
    Internal(#[from] InternalError),
}

#[test]
fn error_messages() {
    use std::string::ToString;

    let err: ClipError = InternalError::UnterminatedFaceWalk { edge: 3 }.into();
    assert_eq!(
        err.to_string(),
        "Internal error: Walk around the face of edge 3 does not return to its start"
    );
    assert_eq!(
        ClipError::NonFiniteCoordinate.to_string(),
        "Input path contains a non-finite coordinate"
    );
}
