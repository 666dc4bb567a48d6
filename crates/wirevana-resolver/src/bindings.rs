//! Binding resolution against sample data, session state and the current item.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

use wirevana_core::{
    ast::PropValue,
    binding::{Binding, BindingPath},
    value::{display, lookup},
};

use crate::converters::Converter;

/// Data visible to a binding.
#[derive(Debug, Clone, Copy)]
pub struct BindingContext<'a> {
    pub sample_data: &'a Value,
    pub state: &'a Value,
    /// The list item, inside a collection template.
    pub item: Option<&'a Value>,
}

impl<'a> BindingContext<'a> {
    pub fn new(sample_data: &'a Value, state: &'a Value) -> Self {
        Self {
            sample_data,
            state,
            item: None,
        }
    }

    pub fn with_item(self, item: &'a Value) -> Self {
        Self {
            item: Some(item),
            ..self
        }
    }
}

/// Resolves parsed bindings to values.
///
/// A path that misses yields the expression text unchanged, so a broken
/// binding is visible in the preview rather than silently empty.
#[derive(Debug, Clone)]
pub struct BindingResolver {
    /// Reference time for relative-date conversion.
    now: DateTime<Utc>,
}

impl BindingResolver {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Resolve to a value, or `None` when the path misses.
    pub fn lookup(&self, binding: &Binding, ctx: &BindingContext<'_>) -> Option<Value> {
        match binding {
            Binding::Literal(text) => Some(Value::String(text.clone())),
            Binding::SampleDataRef(r) => self.follow(ctx.sample_data, &r.path, ctx),
            Binding::StateRef(r) => self.follow(ctx.state, &r.path, ctx),
            Binding::ItemBinding(b) => {
                let root = ctx.item.unwrap_or(ctx.state);
                let value = lookup(root, &b.path)?;
                Some(self.convert(value, b.converter.as_deref()))
            }
        }
    }

    /// Resolve to a value, falling back to the expression text on a miss.
    pub fn resolve(&self, binding: &Binding, ctx: &BindingContext<'_>) -> Value {
        self.lookup(binding, ctx).unwrap_or_else(|| {
            debug!(expression = binding.source(), "binding did not resolve");
            Value::String(binding.source().to_string())
        })
    }

    pub fn resolve_prop(&self, prop: &PropValue, ctx: &BindingContext<'_>) -> Value {
        match prop {
            PropValue::Binding(binding) => self.resolve(binding, ctx),
            PropValue::Value(value) => value.clone(),
        }
    }

    /// Resolve an optional prop to display text.
    pub fn text(&self, prop: Option<&PropValue>, ctx: &BindingContext<'_>) -> Option<String> {
        prop.map(|prop| display(&self.resolve_prop(prop, ctx)))
    }

    /// Resolve an optional prop to a value; `Value::Null` when absent.
    pub fn value(&self, prop: Option<&PropValue>, ctx: &BindingContext<'_>) -> Value {
        prop.map(|prop| self.resolve_prop(prop, ctx))
            .unwrap_or(Value::Null)
    }

    /// Follow a data reference. Values that are themselves `@sampleData.`
    /// references (as in `state: { todos: "@sampleData.todos" }`) are followed
    /// one level.
    fn follow(&self, root: &Value, path: &BindingPath, ctx: &BindingContext<'_>) -> Option<Value> {
        let value = lookup(root, path)?;
        if let Some(target) = value.as_str().and_then(|s| s.strip_prefix("@sampleData.")) {
            if let Some(inner) = lookup(ctx.sample_data, &BindingPath::parse(target)) {
                return Some(inner.clone());
            }
        }
        Some(value.clone())
    }

    fn convert(&self, value: &Value, converter: Option<&str>) -> Value {
        let Some(name) = converter else {
            return value.clone();
        };
        match Converter::from_name(name) {
            Some(converter) => converter.apply(value, self.now),
            None => {
                debug!(converter = name, "unknown converter, value left unconverted");
                value.clone()
            }
        }
    }
}

impl Default for BindingResolver {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use wirevana_parser::parse_binding;

    fn resolver() -> BindingResolver {
        BindingResolver::new(Utc.with_ymd_and_hms(2024, 2, 20, 12, 0, 0).unwrap())
    }

    fn data() -> (Value, Value) {
        (
            json!({ "loans": [{ "itemName": "DSLR Camera" }], "todos": [1, 2] }),
            json!({ "form": { "notes": "Lens cap" }, "copy": "@sampleData.todos" }),
        )
    }

    #[test]
    fn test_sample_data_and_state() {
        let (sample, state) = data();
        let ctx = BindingContext::new(&sample, &state);
        let r = resolver();

        assert_eq!(
            r.resolve(&parse_binding("@sampleData.loans.0.itemName"), &ctx),
            json!("DSLR Camera")
        );
        assert_eq!(r.resolve(&parse_binding("@state.form.notes"), &ctx), json!("Lens cap"));
        assert_eq!(r.resolve(&parse_binding("@state.copy"), &ctx), json!([1, 2]));
    }

    #[test]
    fn test_item_binding_uses_item() {
        let (sample, state) = data();
        let item = json!({ "itemName": "Tripod", "loanedOn": "2024-02-18T18:30:00Z" });
        let ctx = BindingContext::new(&sample, &state).with_item(&item);
        let r = resolver();

        assert_eq!(r.resolve(&parse_binding("{binding itemName}"), &ctx), json!("Tripod"));
        assert_eq!(
            r.resolve(&parse_binding("{binding loanedOn, converter=RelativeDate}"), &ctx),
            json!("2 days ago")
        );
        assert_eq!(r.resolve(&parse_binding("{binding}"), &ctx), item);
    }

    #[test]
    fn test_item_binding_without_item_reads_state() {
        let (sample, state) = data();
        let ctx = BindingContext::new(&sample, &state);
        assert_eq!(
            resolver().resolve(&parse_binding("{binding form.notes}"), &ctx),
            json!("Lens cap")
        );
    }

    #[test]
    fn test_missing_path_passes_through() {
        let (sample, state) = data();
        let ctx = BindingContext::new(&sample, &state);
        let r = resolver();

        for expression in ["{binding missingField}", "@sampleData.nope.deeper", "@state.form.gone"] {
            let binding = parse_binding(expression);
            assert_eq!(r.resolve(&binding, &ctx), json!(expression));
            assert_eq!(r.lookup(&binding, &ctx), None);
        }
    }

    #[test]
    fn test_unknown_converter_leaves_value() {
        let (sample, state) = data();
        let item = json!({ "name": "Jordan" });
        let ctx = BindingContext::new(&sample, &state).with_item(&item);
        assert_eq!(
            resolver().resolve(&parse_binding("{binding name, converter=Sparkle}"), &ctx),
            json!("Jordan")
        );
    }

    #[test]
    fn test_text_and_value_helpers() {
        let (sample, state) = data();
        let ctx = BindingContext::new(&sample, &state);
        let r = resolver();

        let number = PropValue::Value(json!(8));
        assert_eq!(r.text(Some(&number), &ctx).as_deref(), Some("8"));
        assert_eq!(r.text(None, &ctx), None);
        assert_eq!(r.value(None, &ctx), Value::Null);
    }
}
