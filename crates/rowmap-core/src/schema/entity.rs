use super::FieldDef;

/// Declarative schema for a mapped type: the table it binds to and the
/// column bindings of its fields.
///
/// Built once per type via [`EntityDef::builder`] and held in a `static`
/// (typically behind a `LazyLock`) by the type's [`Mapped`] implementation.
/// Field declaration order carries no semantics; consumers filter by the
/// per-field flags.
///
/// [`Mapped`]: crate::Mapped
#[derive(Debug)]
pub struct EntityDef {
    name: &'static str,
    table: Option<String>,
    fields: Vec<FieldDef>,
}

#[derive(Debug)]
pub struct EntityDefBuilder {
    def: EntityDef,
}

impl EntityDef {
    pub fn builder(name: &'static str) -> EntityDefBuilder {
        EntityDefBuilder {
            def: EntityDef {
                name,
                table: None,
                fields: vec![],
            },
        }
    }

    /// The entity (type-level) name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declared table, if any. An entity without a table declaration can
    /// still contribute flattened key columns but cannot be dereferenced or
    /// queried.
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Primary-key fields, in declaration order.
    pub fn primary_key_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|field| field.is_primary_key())
    }

    pub fn has_primary_key(&self) -> bool {
        self.primary_key_fields().next().is_some()
    }
}

impl EntityDefBuilder {
    /// Declares the backing table, named after the entity.
    pub fn table(mut self) -> Self {
        self.def.table = Some(self.def.name.to_string());
        self
    }

    /// Declares the backing table with an explicit name.
    pub fn table_named(mut self, name: impl Into<String>) -> Self {
        self.def.table = Some(name.into());
        self
    }

    pub fn field(mut self, field: FieldDef) -> Self {
        self.def.fields.push(field);
        self
    }

    pub fn build(self) -> EntityDef {
        self.def
    }
}
