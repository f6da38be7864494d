//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from provider/IO errors.

/// Domain-level errors for route validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Route has no stops
    #[error("route must have at least one stop")]
    EmptyRoute,

    /// Station name appears more than once in a route
    #[error("station {0} appears more than once in the route")]
    DuplicateStation(String),

    /// Station name is blank
    #[error("station name must not be blank")]
    BlankStation,
}
