use super::Error;

/// Error while turning a result row back into an entity.
#[derive(Debug)]
pub(super) struct MaterializationError {
    pub(super) kind: MaterializationErrorKind,
}

#[derive(Debug)]
pub(super) enum MaterializationErrorKind {
    /// A column value cannot be coerced to the declared field type.
    TypeConversion {
        value_ty: &'static str,
        to_ty: &'static str,
    },

    /// A value was assigned to a field the entity does not declare.
    UnknownField { entity: &'static str, field: String },
}

impl std::error::Error for MaterializationError {}

impl core::fmt::Display for MaterializationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use MaterializationErrorKind::*;

        match &self.kind {
            TypeConversion { value_ty, to_ty } => {
                write!(f, "cannot convert {value_ty} to {to_ty}")
            }
            UnknownField { entity, field } => {
                write!(f, "unknown field: entity={entity} field={field}")
            }
        }
    }
}

impl Error {
    pub fn type_conversion(value_ty: &'static str, to_ty: &'static str) -> Error {
        Error::from(super::ErrorKind::Materialization(MaterializationError {
            kind: MaterializationErrorKind::TypeConversion { value_ty, to_ty },
        }))
    }

    pub fn unknown_field(entity: &'static str, field: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Materialization(MaterializationError {
            kind: MaterializationErrorKind::UnknownField {
                entity,
                field: field.into(),
            },
        }))
    }

    /// Returns `true` if this error is a materialization error.
    pub fn is_materialization(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Materialization(_))
    }
}
