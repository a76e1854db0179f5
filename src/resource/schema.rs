/// Decides whether two textually different values should count as unchanged.
pub type DiffSuppressFn = fn(&str, &str) -> bool;

/// Declaration of one attribute of a declarative resource.
#[derive(Debug, Clone, Copy)]
pub struct FieldSchema {
    pub name: &'static str,
    pub required: bool,
    pub default: Option<&'static str>,
    /// Changing the value cannot be done in place; the resource is replaced.
    pub force_new: bool,
    pub description: &'static str,
    pub diff_suppress: Option<DiffSuppressFn>,
}

impl FieldSchema {
    /// Returns true if moving from `old` to `new` is a change for this field.
    pub fn has_change(&self, old: &str, new: &str) -> bool {
        if old == new {
            return false;
        }
        !self.diff_suppress.is_some_and(|suppress| suppress(old, new))
    }

    /// Returns true if moving from `old` to `new` forces a replacement.
    pub fn requires_replacement(&self, old: &str, new: &str) -> bool {
        self.force_new && self.has_change(old, new)
    }
}

/// Schema used when none is configured.
pub const DEFAULT_SCHEMA: &str = "PUBLIC";

pub const NAME: FieldSchema = FieldSchema {
    name: "name",
    required: true,
    default: None,
    force_new: false,
    description: "Specifies the identifier for the table; must be unique for the schema in which the table is created. Don't use the | character.",
    diff_suppress: None,
};

pub const DATABASE: FieldSchema = FieldSchema {
    name: "database",
    required: true,
    default: None,
    force_new: true,
    description: "The database in which to create the table. Don't use the | character.",
    diff_suppress: None,
};

pub const SCHEMA: FieldSchema = FieldSchema {
    name: "schema",
    required: false,
    default: Some(DEFAULT_SCHEMA),
    force_new: true,
    description: "The schema in which to create the table. Don't use the | character.",
    diff_suppress: None,
};

pub const COMMENT: FieldSchema = FieldSchema {
    name: "comment",
    required: false,
    default: None,
    force_new: false,
    description: "Specifies a comment for the table.",
    diff_suppress: None,
};

/// Attributes of the table resource, in declaration order.
pub const TABLE_SCHEMA: [FieldSchema; 4] = [NAME, DATABASE, SCHEMA, COMMENT];
