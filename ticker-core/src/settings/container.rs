//! Settings containers
//!
//! A container groups the descriptors persisted to one file and shown as
//! one form in the UI. Descriptor order is the order of the file lines and
//! of the form fields.

use alloc::string::String;
use alloc::vec::Vec;

use ticker_protocol::SettingsUpdate;

use super::field::{FieldDescriptor, FieldKind, Lens};

/// Ordered group of descriptors sharing one file and one target
pub struct SettingsContainer<S> {
    name: String,
    file: String,
    target: String,
    fields: Vec<FieldDescriptor<S>>,
}

impl<S> SettingsContainer<S> {
    /// Create an empty container
    ///
    /// # Arguments
    /// * `name` - Display name of the form
    /// * `file` - Absolute path of the settings file
    /// * `target` - Identifier the UI uses to route updates
    pub fn new(name: &str, file: &str, target: &str) -> Self {
        Self {
            name: String::from(name),
            file: String::from(file),
            target: String::from(target),
            fields: Vec::new(),
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the settings file
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Target identifier
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Descriptors in registration order
    pub fn fields(&self) -> &[FieldDescriptor<S>] {
        &self.fields
    }

    /// Find a descriptor by name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor<S>> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Add a string field of at most `max_len` characters
    pub fn add_text(
        &mut self,
        name: &'static str,
        prompt: &'static str,
        max_len: usize,
        get: fn(&S) -> &String,
        get_mut: fn(&mut S) -> &mut String,
    ) -> &mut Self {
        self.push(FieldDescriptor::new(
            name,
            prompt,
            FieldKind::Text {
                max_len,
                value: Lens::new(get, get_mut),
            },
        ))
    }

    /// Add an integer field limited to `[min, max]`
    #[allow(clippy::too_many_arguments)]
    pub fn add_number(
        &mut self,
        name: &'static str,
        prompt: &'static str,
        min: i32,
        max: i32,
        step: i32,
        get: fn(&S) -> &i32,
        get_mut: fn(&mut S) -> &mut i32,
    ) -> &mut Self {
        let (min, max) = if min > max {
            log_warn!("add_number(): [{}] min {} > max {}, swapped", name, min, max);
            (max, min)
        } else {
            (min, max)
        };
        self.push(FieldDescriptor::new(
            name,
            prompt,
            FieldKind::Number {
                min,
                max,
                step,
                value: Lens::new(get, get_mut),
            },
        ))
    }

    /// Add a boolean field
    pub fn add_flag(
        &mut self,
        name: &'static str,
        prompt: &'static str,
        get: fn(&S) -> &bool,
        get_mut: fn(&mut S) -> &mut bool,
    ) -> &mut Self {
        self.push(FieldDescriptor::new(
            name,
            prompt,
            FieldKind::Flag {
                value: Lens::new(get, get_mut),
            },
        ))
    }

    /// Add a prebuilt descriptor
    ///
    /// Names must be unique within the container and must not contain `=`
    /// or whitespace; offending descriptors are dropped.
    pub fn push(&mut self, field: FieldDescriptor<S>) -> &mut Self {
        let name = field.name();
        if name.is_empty() || name.contains(|c: char| c == '=' || c.is_whitespace()) {
            log_warn!("[{}]: invalid field name [{}]", self.name.as_str(), name);
        } else if self.field(name).is_some() {
            log_warn!("[{}]: duplicate field [{}]", self.name.as_str(), name);
        } else {
            self.fields.push(field);
        }
        self
    }

    /// Form describing every field with its current value
    pub fn to_update(&self, state: &S) -> SettingsUpdate {
        let mut update = SettingsUpdate::new(&self.target, &self.name);
        update.fields = self.fields.iter().map(|f| f.to_entry(state)).collect();
        update
    }

    /// Clamp every live value into its constraint
    ///
    /// Returns the number of values that changed.
    pub fn normalize(&self, state: &mut S) -> usize {
        self.fields.iter().filter(|f| f.normalize(state)).count()
    }

    /// Settings file contents for the current values
    pub fn render(&self, state: &S) -> String {
        let mut out = String::new();
        for field in &self.fields {
            field.write_line(state, &mut out);
        }
        out
    }

    /// Apply one `name=value` line
    ///
    /// The line and the value are trimmed. Returns false for lines that do
    /// not name a field of this container.
    pub fn apply_line(&self, state: &mut S, line: &str) -> bool {
        let line = line.trim();
        for field in &self.fields {
            let value = line
                .strip_prefix(field.name())
                .and_then(|rest| rest.strip_prefix('='));
            if let Some(value) = value {
                let value = value.trim();
                log_trace!("apply_line(): [{}] = [{}]", field.name(), value);
                field.apply_text(state, value);
                return true;
            }
        }
        false
    }

    /// Apply a whole settings file
    ///
    /// Returns the number of lines that set a field.
    pub fn apply_text(&self, state: &mut S, text: &str) -> usize {
        text.lines()
            .filter(|line| self.apply_line(state, line))
            .count()
    }
}
