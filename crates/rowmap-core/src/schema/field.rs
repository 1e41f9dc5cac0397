use crate::{entity::EntityRef, stmt::Type, Error, Result};

/// Column binding for a single declared field.
#[derive(Debug, Clone)]
pub struct FieldDef {
    name: &'static str,
    column: Option<&'static str>,
    primary_key: bool,
    has_default: bool,
    not_null: bool,
    ty: FieldTy,
}

/// Scalar column or foreign-key reference.
#[derive(Debug, Clone)]
pub enum FieldTy {
    Scalar(Type),
    ForeignKey(ForeignKeyDef),
}

/// Foreign-key binding: the referenced target plus the raw column spec.
#[derive(Debug, Clone)]
pub struct ForeignKeyDef {
    target: FkTarget,
    spec: &'static str,
}

/// What a foreign-key field points at.
#[derive(Debug, Clone, Copy)]
pub enum FkTarget {
    /// The referenced key is a bare scalar; the field's value binds directly.
    Scalar(Type),

    /// The referenced key belongs to another mapped entity.
    Entity(EntityRef),
}

/// One `local:target` column pair from a foreign-key spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FkPair {
    /// Column on the declaring entity's table.
    pub local: &'static str,

    /// Column on the referenced entity's table.
    pub target: &'static str,
}

impl FieldDef {
    /// Declares a scalar field mapped to a single column.
    pub fn scalar(name: &'static str, ty: Type) -> Self {
        Self {
            name,
            column: None,
            primary_key: false,
            has_default: false,
            not_null: false,
            ty: FieldTy::Scalar(ty),
        }
    }

    /// Declares a foreign-key field referencing another mapped entity.
    ///
    /// The spec is `"local:target"` pairs separated by whitespace; it may be
    /// empty, in which case dereferencing falls back to a single-column
    /// primary-key lookup on the field's own column.
    pub fn foreign_key(name: &'static str, target: EntityRef, spec: &'static str) -> Self {
        Self {
            name,
            column: None,
            primary_key: false,
            has_default: false,
            not_null: false,
            ty: FieldTy::ForeignKey(ForeignKeyDef {
                target: FkTarget::Entity(target),
                spec,
            }),
        }
    }

    /// Declares a foreign-key field whose referenced key is a bare scalar.
    pub fn scalar_foreign_key(name: &'static str, ty: Type, spec: &'static str) -> Self {
        Self {
            name,
            column: None,
            primary_key: false,
            has_default: false,
            not_null: false,
            ty: FieldTy::ForeignKey(ForeignKeyDef {
                target: FkTarget::Scalar(ty),
                spec,
            }),
        }
    }

    /// Renames the column backing this field. By default the column is named
    /// after the field.
    pub fn column(mut self, column: &'static str) -> Self {
        self.column = Some(column);
        self
    }

    /// Marks the field as part of the primary key.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Marks the column as carrying a database-side default.
    pub fn has_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    /// Documents a NOT NULL constraint. The core never enforces it; the
    /// database does.
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The backing column name, defaulting to the field name.
    pub fn column_name(&self) -> &'static str {
        self.column.unwrap_or(self.name)
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    pub fn is_has_default(&self) -> bool {
        self.has_default
    }

    pub fn is_not_null(&self) -> bool {
        self.not_null
    }

    pub fn ty(&self) -> &FieldTy {
        &self.ty
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.ty, FieldTy::Scalar(_))
    }

    pub fn is_foreign_key(&self) -> bool {
        matches!(self.ty, FieldTy::ForeignKey(_))
    }

    pub fn as_foreign_key(&self) -> Option<&ForeignKeyDef> {
        match &self.ty {
            FieldTy::ForeignKey(fk) => Some(fk),
            _ => None,
        }
    }
}

impl ForeignKeyDef {
    pub fn target(&self) -> &FkTarget {
        &self.target
    }

    pub fn raw_spec(&self) -> &'static str {
        self.spec
    }

    pub fn has_spec(&self) -> bool {
        !self.spec.trim().is_empty()
    }

    /// Parses the spec into ordered `(local, target)` column pairs.
    ///
    /// An empty or malformed spec is a configuration error; callers that
    /// support the no-spec fallback must check [`has_spec`] first.
    ///
    /// [`has_spec`]: ForeignKeyDef::has_spec
    pub fn pairs(&self, field: &str) -> Result<Vec<FkPair>> {
        let mut pairs = vec![];

        for part in self.spec.split_whitespace() {
            let (local, target) = part
                .split_once(':')
                .ok_or_else(|| Error::invalid_foreign_key_spec(field, self.spec))?;

            if local.is_empty() || target.is_empty() || target.contains(':') {
                return Err(Error::invalid_foreign_key_spec(field, self.spec));
            }

            pairs.push(FkPair { local, target });
        }

        if pairs.is_empty() {
            return Err(Error::invalid_foreign_key_spec(field, self.spec));
        }

        Ok(pairs)
    }
}
