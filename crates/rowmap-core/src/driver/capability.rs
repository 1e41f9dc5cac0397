/// Transaction isolation levels a connection may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IsolationLevel {
    ReadUncommitted,
    ReadCommitted,
    RepeatableRead,
    Serializable,
}

/// What the connected database reports it can do.
#[derive(Debug)]
pub struct Capability {
    /// Isolation levels the database accepts.
    pub isolation_levels: &'static [IsolationLevel],

    /// The level a fresh connection starts at.
    pub default_isolation: IsolationLevel,
}

impl Capability {
    /// PostgreSQL capabilities
    pub const POSTGRESQL: Self = Self {
        isolation_levels: &[
            IsolationLevel::ReadUncommitted,
            IsolationLevel::ReadCommitted,
            IsolationLevel::RepeatableRead,
            IsolationLevel::Serializable,
        ],
        default_isolation: IsolationLevel::ReadCommitted,
    };

    /// MySQL capabilities
    pub const MYSQL: Self = Self {
        default_isolation: IsolationLevel::RepeatableRead,
        ..Self::POSTGRESQL
    };

    /// SQLite capabilities. SQLite only honors serializable and (through
    /// shared-cache read-uncommitted mode) one relaxation of it.
    pub const SQLITE: Self = Self {
        isolation_levels: &[IsolationLevel::Serializable, IsolationLevel::ReadUncommitted],
        default_isolation: IsolationLevel::Serializable,
    };

    pub fn supports_isolation(&self, level: IsolationLevel) -> bool {
        self.isolation_levels.contains(&level)
    }
}
