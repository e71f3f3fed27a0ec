//! Field descriptors
//!
//! A descriptor names one setting, describes its constraint and knows how
//! to reach the live value inside the configuration state `S`. It never
//! owns the value.

use alloc::string::{String, ToString};
use core::fmt::Write as _;

use ticker_protocol::{FieldEntry, FieldValue};

use super::parse::{char_boundary, format_bool, parse_bool, parse_int};

/// Accessor pair selecting one field of the state `S`
pub struct Lens<S, T> {
    get: fn(&S) -> &T,
    get_mut: fn(&mut S) -> &mut T,
}

// Manual impls: a derive would require `S: Clone` and `T: Clone`
impl<S, T> Clone for Lens<S, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, T> Copy for Lens<S, T> {}

impl<S, T> Lens<S, T> {
    /// Create a lens from its two accessors
    pub const fn new(get: fn(&S) -> &T, get_mut: fn(&mut S) -> &mut T) -> Self {
        Self { get, get_mut }
    }

    /// Borrow the selected value
    pub fn get<'a>(&self, state: &'a S) -> &'a T {
        (self.get)(state)
    }

    /// Mutably borrow the selected value
    pub fn get_mut<'a>(&self, state: &'a mut S) -> &'a mut T {
        (self.get_mut)(state)
    }
}

/// Field type with its constraint and value binding
pub enum FieldKind<S> {
    /// String of at most `max_len` characters
    Text { max_len: usize, value: Lens<S, String> },
    /// Integer in `[min, max]`; `step` is a UI hint only
    Number {
        min: i32,
        max: i32,
        step: i32,
        value: Lens<S, i32>,
    },
    /// Boolean
    Flag { value: Lens<S, bool> },
}

/// One named setting
pub struct FieldDescriptor<S> {
    name: &'static str,
    prompt: &'static str,
    kind: FieldKind<S>,
}

impl<S> FieldDescriptor<S> {
    /// Create a descriptor
    pub fn new(name: &'static str, prompt: &'static str, kind: FieldKind<S>) -> Self {
        Self { name, prompt, kind }
    }

    /// Key used in the settings file and the wire format
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Label shown in the UI
    pub fn prompt(&self) -> &'static str {
        self.prompt
    }

    /// Type, constraint and binding
    pub fn kind(&self) -> &FieldKind<S> {
        &self.kind
    }

    /// Wire entry with the current value
    pub fn to_entry(&self, state: &S) -> FieldEntry {
        let value = match &self.kind {
            FieldKind::Text { max_len, value } => FieldValue::Text {
                field_value: value.get(state).clone(),
                field_len: *max_len,
            },
            FieldKind::Number {
                min,
                max,
                step,
                value,
            } => FieldValue::Number {
                field_value: *value.get(state),
                field_min: *min,
                field_max: *max,
                field_step: *step,
            },
            FieldKind::Flag { value } => FieldValue::Flag {
                field_value: *value.get(state),
            },
        };

        FieldEntry {
            field_name: self.name.to_string(),
            field_prompt: self.prompt.to_string(),
            value,
        }
    }

    /// Set the live value from its textual form
    ///
    /// Text is taken as-is; constraints are enforced by
    /// [`FieldDescriptor::normalize`].
    pub fn apply_text(&self, state: &mut S, raw: &str) {
        match &self.kind {
            FieldKind::Text { value, .. } => {
                let target = value.get_mut(state);
                target.clear();
                target.push_str(raw);
            }
            FieldKind::Number { value, .. } => *value.get_mut(state) = parse_int(raw),
            FieldKind::Flag { value } => *value.get_mut(state) = parse_bool(raw),
        }
    }

    /// Force the live value into its constraint
    ///
    /// Strings get line breaks replaced by spaces, surrounding whitespace
    /// trimmed and are cut to `max_len` characters, so they read back from
    /// a file unchanged. Numbers are clamped to `[min, max]`. Returns
    /// whether the value changed.
    pub fn normalize(&self, state: &mut S) -> bool {
        match &self.kind {
            FieldKind::Text { max_len, value } => {
                let text = value.get_mut(state);
                let flat = text.replace(['\r', '\n'], " ");
                let mut cut = flat.trim();
                if let Some(end) = char_boundary(cut, *max_len) {
                    cut = cut[..end].trim_end();
                }
                if cut == text.as_str() {
                    return false;
                }
                log_debug!("normalize(): [{}] cut to [{}]", self.name, cut);
                *text = String::from(cut);
                true
            }
            FieldKind::Number {
                min, max, value, ..
            } => {
                let number = value.get_mut(state);
                let clamped = (*number).clamp(*min, *max);
                if clamped == *number {
                    return false;
                }
                log_debug!(
                    "normalize(): [{}] {} clamped to {}",
                    self.name,
                    *number,
                    clamped
                );
                *number = clamped;
                true
            }
            FieldKind::Flag { .. } => false,
        }
    }

    /// Append `name=value\n` to `out`
    pub fn write_line(&self, state: &S, out: &mut String) {
        out.push_str(self.name);
        out.push('=');
        match &self.kind {
            FieldKind::Text { value, .. } => out.push_str(value.get(state)),
            FieldKind::Number { value, .. } => {
                // Writing to a String cannot fail
                let _ = write!(out, "{}", value.get(state));
            }
            FieldKind::Flag { value } => out.push_str(format_bool(*value.get(state))),
        }
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Panel {
        label: String,
        brightness: i32,
        enabled: bool,
    }

    fn label() -> FieldDescriptor<Panel> {
        FieldDescriptor::new(
            "label",
            "Label",
            FieldKind::Text {
                max_len: 8,
                value: Lens::<Panel, String>::new(|p| &p.label, |p| &mut p.label),
            },
        )
    }

    fn brightness() -> FieldDescriptor<Panel> {
        FieldDescriptor::new(
            "brightness",
            "Brightness",
            FieldKind::Number {
                min: 10,
                max: 120,
                step: 5,
                value: Lens::<Panel, i32>::new(|p| &p.brightness, |p| &mut p.brightness),
            },
        )
    }

    fn enabled() -> FieldDescriptor<Panel> {
        FieldDescriptor::new(
            "enabled",
            "Enabled",
            FieldKind::Flag {
                value: Lens::<Panel, bool>::new(|p| &p.enabled, |p| &mut p.enabled),
            },
        )
    }

    #[test]
    fn test_apply_text_by_kind() {
        let mut panel = Panel::default();
        label().apply_text(&mut panel, "lobby");
        brightness().apply_text(&mut panel, "77");
        enabled().apply_text(&mut panel, "Yes");
        assert_eq!(panel.label, "lobby");
        assert_eq!(panel.brightness, 77);
        assert!(panel.enabled);
    }

    #[test]
    fn test_normalize_clamps_number() {
        let field = brightness();
        let mut panel = Panel {
            brightness: 5,
            ..Default::default()
        };
        assert!(field.normalize(&mut panel));
        assert_eq!(panel.brightness, 10);

        panel.brightness = 999;
        assert!(field.normalize(&mut panel));
        assert_eq!(panel.brightness, 120);

        panel.brightness = 60;
        assert!(!field.normalize(&mut panel));
        assert_eq!(panel.brightness, 60);
    }

    #[test]
    fn test_normalize_truncates_text_by_chars() {
        let field = label();
        let mut panel = Panel {
            label: "ééééééééééé".to_string(),
            ..Default::default()
        };
        assert!(field.normalize(&mut panel));
        assert_eq!(panel.label, "éééééééé");
        assert!(!field.normalize(&mut panel));
    }

    #[test]
    fn test_normalize_removes_line_breaks() {
        let field = label();
        let mut panel = Panel {
            label: "a\nb\r\nc".to_string(),
            ..Default::default()
        };
        assert!(field.normalize(&mut panel));
        assert_eq!(panel.label, "a b  c");
    }

    #[test]
    fn test_normalize_trims_surrounding_whitespace() {
        let field = label();
        let mut panel = Panel {
            label: "  lobby \t".to_string(),
            ..Default::default()
        };
        assert!(field.normalize(&mut panel));
        assert_eq!(panel.label, "lobby");
        assert!(!field.normalize(&mut panel));

        // a cut that ends on a space is trimmed as well
        panel.label = "\nlobby   east".to_string();
        assert!(field.normalize(&mut panel));
        assert_eq!(panel.label, "lobby");
    }

    #[test]
    fn test_write_line() {
        let panel = Panel {
            label: "hall".to_string(),
            brightness: -3,
            enabled: false,
        };
        let mut out = String::new();
        label().write_line(&panel, &mut out);
        brightness().write_line(&panel, &mut out);
        enabled().write_line(&panel, &mut out);
        assert_eq!(out, "label=hall\nbrightness=-3\nenabled=false\n");
    }

    #[test]
    fn test_to_entry_reads_live_value() {
        let mut panel = Panel::default();
        let field = brightness();
        panel.brightness = 42;
        assert_eq!(
            field.to_entry(&panel).value,
            FieldValue::Number {
                field_value: 42,
                field_min: 10,
                field_max: 120,
                field_step: 5
            }
        );
        assert_eq!(field.to_entry(&panel).field_prompt, "Brightness");
    }
}
