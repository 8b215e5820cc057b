//! Type descriptors and the bind/project algorithms.
//!
//! A [`TypeDescriptor`] declares, for one target type, its serialized fields
//! and how instances are constructed: either setter-based over a mutable
//! default (`Mutable`) or through one of several creators over fully
//! resolved arguments (`Creators`). The bind algorithm is uniform over both
//! capabilities; a creator target is never partially constructed.

use databind_core::{BindError, Value};
use indexmap::IndexMap;

use crate::convert;

pub type ProjectFn<T> = fn(&T) -> Value;
pub type AssignFn<T> = fn(&mut T, &Value) -> Result<(), BindError>;
pub type BuildFn<T> = fn(&Args) -> Result<T, BindError>;

/// One serialized field of a target type.
pub struct FieldSpec<T> {
    name: &'static str,
    nullable: bool,
    default: Option<Value>,
    omit_null: bool,
    project: ProjectFn<T>,
    assign: Option<AssignFn<T>>,
}

impl<T> FieldSpec<T> {
    pub fn new(name: &'static str, project: ProjectFn<T>) -> Self {
        Self {
            name,
            nullable: false,
            default: None,
            omit_null: false,
            project,
            assign: None,
        }
    }

    /// Setter used in `Mutable` construction. Creator-constructed fields
    /// need none.
    pub fn assign(mut self, assign: AssignFn<T>) -> Self {
        self.assign = Some(assign);
        self
    }

    /// Marks the field as tolerating absence; an absent nullable field is
    /// left at the target's initial/creator value.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Value substituted when the field is absent from the source mapping.
    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Drops the field from projection when its value is null. The default
    /// policy is to include nulls.
    pub fn omit_null(mut self) -> Self {
        self.omit_null = true;
        self
    }
}

/// A constructor over fully resolved arguments. `params` are the formal
/// parameter names matched against source keys.
pub struct CreatorSpec<T> {
    params: &'static [&'static str],
    build: BuildFn<T>,
}

impl<T> CreatorSpec<T> {
    pub fn new(params: &'static [&'static str], build: BuildFn<T>) -> Self {
        Self { params, build }
    }
}

enum Construction<T> {
    Mutable { init: fn() -> T },
    Creators(Vec<CreatorSpec<T>>),
}

pub struct TypeDescriptor<T> {
    name: &'static str,
    fields: Vec<FieldSpec<T>>,
    construction: Construction<T>,
}

impl<T> TypeDescriptor<T> {
    /// Setter-based target: bind starts from `init()` and assigns fields.
    pub fn mutable(name: &'static str, init: fn() -> T) -> Self {
        Self {
            name,
            fields: Vec::new(),
            construction: Construction::Mutable { init },
        }
    }

    /// Creator-based target (immutable types). At least one creator is
    /// required.
    pub fn with_creators(name: &'static str, creators: Vec<CreatorSpec<T>>) -> Self {
        assert!(
            !creators.is_empty(),
            "descriptor {name} declares no creators"
        );
        Self {
            name,
            fields: Vec::new(),
            construction: Construction::Creators(creators),
        }
    }

    /// Registers a field. Serialized names are unique within a descriptor.
    pub fn field(mut self, spec: FieldSpec<T>) -> Self {
        assert!(
            self.fields.iter().all(|f| f.name != spec.name),
            "duplicate field \"{}\" in descriptor {}",
            spec.name,
            self.name
        );
        self.fields.push(spec);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Binds a mapping value into a typed instance. Unknown mapping keys are
    /// ignored; missing required fields abort the call.
    pub fn bind(&self, value: &Value) -> Result<T, BindError> {
        let entries = value
            .entries()
            .ok_or(BindError::NotMapping(self.name))?;
        match &self.construction {
            Construction::Mutable { init } => {
                let mut obj = init();
                for field in &self.fields {
                    let Some(assign) = field.assign else {
                        continue;
                    };
                    match lookup(entries, field.name) {
                        Some(v) => assign(&mut obj, v)?,
                        None => match &field.default {
                            Some(d) => assign(&mut obj, d)?,
                            None if field.nullable => {}
                            None => {
                                return Err(BindError::MissingField(field.name.to_string()));
                            }
                        },
                    }
                }
                Ok(obj)
            }
            Construction::Creators(creators) => {
                let creator = self.select_creator(creators, entries)?;
                let args = self.resolve_args(creator.params, entries)?;
                (creator.build)(&args)
            }
        }
    }

    /// Projects an instance into a mapping in declared field order.
    pub fn project(&self, obj: &T) -> Value {
        let mut entries = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let value = (field.project)(obj);
            if field.omit_null && value.is_null() {
                continue;
            }
            entries.push((field.name.to_string(), value));
        }
        Value::Map(entries)
    }

    /// Creator selection: among creators whose every parameter resolves, the
    /// one with the most parameters actually present in the mapping wins;
    /// an exact tie is ambiguous. Authors who need a different preference
    /// order the creator list so no tie arises.
    fn select_creator<'a>(
        &self,
        creators: &'a [CreatorSpec<T>],
        entries: &[(String, Value)],
    ) -> Result<&'a CreatorSpec<T>, BindError> {
        let mut best: Option<(&CreatorSpec<T>, usize)> = None;
        let mut tied = false;
        for creator in creators {
            if !creator
                .params
                .iter()
                .all(|p| self.resolvable(p, entries))
            {
                continue;
            }
            let matched = creator
                .params
                .iter()
                .filter(|p| lookup(entries, p).is_some())
                .count();
            match best {
                Some((_, n)) if matched < n => {}
                Some((_, n)) if matched == n => tied = true,
                _ => {
                    best = Some((creator, matched));
                    tied = false;
                }
            }
        }
        match best {
            Some(_) if tied => Err(BindError::AmbiguousConstructor(self.name)),
            Some((creator, _)) => Ok(creator),
            None => Err(self.missing_field_error(creators, entries)),
        }
    }

    fn resolvable(&self, param: &str, entries: &[(String, Value)]) -> bool {
        if lookup(entries, param).is_some() {
            return true;
        }
        self.fields
            .iter()
            .find(|f| f.name == param)
            .is_some_and(|f| f.default.is_some() || f.nullable)
    }

    /// No creator was callable: report the first unresolvable parameter of
    /// the closest candidate.
    fn missing_field_error(
        &self,
        creators: &[CreatorSpec<T>],
        entries: &[(String, Value)],
    ) -> BindError {
        let mut best: Option<(&CreatorSpec<T>, usize)> = None;
        for creator in creators {
            let matched = creator
                .params
                .iter()
                .filter(|p| lookup(entries, p).is_some())
                .count();
            if best.map_or(true, |(_, n)| matched > n) {
                best = Some((creator, matched));
            }
        }
        if let Some((creator, _)) = best {
            for param in creator.params {
                if !self.resolvable(param, entries) {
                    return BindError::MissingField((*param).to_string());
                }
            }
        }
        BindError::MissingField(String::new())
    }

    fn resolve_args(
        &self,
        params: &[&'static str],
        entries: &[(String, Value)],
    ) -> Result<Args, BindError> {
        let mut resolved = IndexMap::with_capacity(params.len());
        for param in params {
            let value = match lookup(entries, param) {
                Some(v) => v.clone(),
                None => {
                    let field = self.fields.iter().find(|f| f.name == *param);
                    match field {
                        Some(FieldSpec {
                            default: Some(d), ..
                        }) => d.clone(),
                        Some(f) if f.nullable => Value::Null,
                        _ => return Err(BindError::MissingField((*param).to_string())),
                    }
                }
            };
            resolved.insert(*param, value);
        }
        Ok(Args { resolved })
    }
}

fn lookup<'a>(entries: &'a [(String, Value)], key: &str) -> Option<&'a Value> {
    entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

/// Resolved creator arguments, keyed by formal parameter name.
pub struct Args {
    resolved: IndexMap<&'static str, Value>,
}

impl Args {
    pub fn value(&self, name: &str) -> Result<&Value, BindError> {
        self.resolved
            .get(name)
            .ok_or_else(|| BindError::MissingField(name.to_string()))
    }

    pub fn string(&self, name: &str) -> Result<String, BindError> {
        convert::string(self.value(name)?, name)
    }

    pub fn int(&self, name: &str) -> Result<i64, BindError> {
        convert::int(self.value(name)?, name)
    }

    pub fn uint(&self, name: &str) -> Result<u64, BindError> {
        convert::uint(self.value(name)?, name)
    }

    pub fn float(&self, name: &str) -> Result<f64, BindError> {
        convert::float(self.value(name)?, name)
    }

    pub fn boolean(&self, name: &str) -> Result<bool, BindError> {
        convert::boolean(self.value(name)?, name)
    }
}
