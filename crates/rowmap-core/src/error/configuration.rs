use super::Error;

/// Error in an entity declaration or in how it is used.
///
/// Configuration errors surface at statement-build or key-resolution time,
/// before anything reaches the database.
#[derive(Debug)]
pub(super) struct ConfigurationError {
    pub(super) kind: ConfigurationErrorKind,
}

#[derive(Debug)]
pub(super) enum ConfigurationErrorKind {
    /// A DELETE or UPDATE was requested for an entity that declares no
    /// primary-key field.
    MissingPrimaryKey { table: String },

    /// Two entity definitions reference each other through their primary
    /// keys.
    CyclicKeyReference { table: String },

    /// A foreign-key spec string does not parse as
    /// `"local:target[ local2:target2 ...]"`.
    ForeignKeySpec { field: String, spec: String },

    /// An UPDATE produced no SET assignments.
    EmptySetList { table: String },

    /// A statement was requested for an entity that declares no backing
    /// table.
    MissingTable { entity: String },
}

impl std::error::Error for ConfigurationError {}

impl core::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use ConfigurationErrorKind::*;

        match &self.kind {
            MissingPrimaryKey { table } => {
                write!(f, "missing primary key: table={table}")
            }
            CyclicKeyReference { table } => {
                write!(f, "cyclic key reference: table={table}")
            }
            ForeignKeySpec { field, spec } => {
                write!(f, "invalid foreign key spec: field={field} spec={spec:?}")
            }
            EmptySetList { table } => {
                write!(f, "no updatable columns: table={table}")
            }
            MissingTable { entity } => {
                write!(f, "missing table declaration: entity={entity}")
            }
        }
    }
}

impl Error {
    pub fn missing_primary_key(table: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Configuration(ConfigurationError {
            kind: ConfigurationErrorKind::MissingPrimaryKey {
                table: table.into(),
            },
        }))
    }

    pub fn cyclic_key_reference(table: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Configuration(ConfigurationError {
            kind: ConfigurationErrorKind::CyclicKeyReference {
                table: table.into(),
            },
        }))
    }

    pub fn invalid_foreign_key_spec(field: impl Into<String>, spec: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Configuration(ConfigurationError {
            kind: ConfigurationErrorKind::ForeignKeySpec {
                field: field.into(),
                spec: spec.into(),
            },
        }))
    }

    pub fn empty_set_list(table: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Configuration(ConfigurationError {
            kind: ConfigurationErrorKind::EmptySetList {
                table: table.into(),
            },
        }))
    }

    pub fn missing_table(entity: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Configuration(ConfigurationError {
            kind: ConfigurationErrorKind::MissingTable {
                entity: entity.into(),
            },
        }))
    }

    /// Returns `true` if this error is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Configuration(_))
    }

    /// Returns `true` if this error is specifically a cyclic key reference.
    pub fn is_cyclic_key_reference(&self) -> bool {
        matches!(
            self.kind(),
            super::ErrorKind::Configuration(ConfigurationError {
                kind: ConfigurationErrorKind::CyclicKeyReference { .. },
            })
        )
    }
}
