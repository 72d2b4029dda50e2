//! Form validation rules.
//!
//! A [`Validations`] set maps field names to rules. The Beer form declares its `name`
//! field with no rules, so every beer is valid; the structure is there for fields that
//! need them.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    MinLength(usize),
    MaxLength(usize),
}

impl Rule {
    fn check(&self, value: Option<&str>) -> bool {
        match (self, value) {
            (Rule::Required, value) => value.is_some_and(|v| !v.trim().is_empty()),
            // Length rules only apply to values that are present
            (_, None) => true,
            (Rule::MinLength(min), Some(v)) => v.chars().count() >= *min,
            (Rule::MaxLength(max), Some(v)) => v.chars().count() <= *max,
        }
    }
}

/// Read access to a form's fields by name.
pub trait FormFields {
    fn field(&self, name: &str) -> Option<&str>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub rule: Rule,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validations {
    fields: Vec<(&'static str, Vec<Rule>)>,
}

impl Validations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &'static str, rules: Vec<Rule>) -> Self {
        self.fields.push((name, rules));
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    pub fn rules_for(&self, name: &str) -> Option<&[Rule]> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, rules)| rules.as_slice())
    }

    pub fn validate(&self, form: &impl FormFields) -> Vec<Violation> {
        self.fields
            .iter()
            .flat_map(|&(name, ref rules)| {
                let value = form.field(name);
                rules
                    .iter()
                    .filter(move |rule| !rule.check(value))
                    .map(move |rule| Violation {
                        field: name,
                        rule: *rule,
                    })
            })
            .collect()
    }

    pub fn is_valid(&self, form: &impl FormFields) -> bool {
        self.validate(form).is_empty()
    }
}

/// Rules of the Beer form.
pub fn beer_validations() -> Validations {
    Validations::new().field("name", Vec::new())
}
