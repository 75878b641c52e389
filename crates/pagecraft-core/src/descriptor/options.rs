//! Descriptor options, static or computed from sibling props

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use super::PropsSnapshot;
use crate::data::{ComboboxValue, Length};

/// Options every control kind shares.
pub trait ControlOptions: Clone + Default {
    fn hidden(&self) -> bool;
    fn set_hidden(&mut self, hidden: bool);

    /// Options used when a dynamic options function fails.
    fn hidden_fallback() -> Self {
        let mut options = Self::default();
        options.set_hidden(true);
        options
    }
}

/// Computes options from the enclosing component's raw props and the active
/// device id.
pub type OptionsFn<T> = Arc<dyn Fn(&PropsSnapshot<'_>, &str) -> anyhow::Result<T> + Send + Sync>;

/// Static options or a function evaluated against sibling props.
pub enum Options<T> {
    Static(T),
    Dynamic(OptionsFn<T>),
}

impl<T: ControlOptions> Options<T> {
    pub fn dynamic(
        f: impl Fn(&PropsSnapshot<'_>, &str) -> anyhow::Result<T> + Send + Sync + 'static,
    ) -> Self {
        Options::Dynamic(Arc::new(f))
    }

    /// Concrete options for these props and device. A failing function hides
    /// the control instead of propagating.
    pub fn evaluate(&self, props: &PropsSnapshot<'_>, device: &str) -> T {
        match self {
            Options::Static(options) => options.clone(),
            Options::Dynamic(f) => match f(props, device) {
                Ok(options) => options,
                Err(err) => {
                    warn!(device, error = %err, "options function failed, hiding control");
                    T::hidden_fallback()
                }
            },
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Options::Dynamic(_))
    }
}

impl<T: Default> Default for Options<T> {
    fn default() -> Self {
        Options::Static(T::default())
    }
}

impl<T: Clone> Clone for Options<T> {
    fn clone(&self) -> Self {
        match self {
            Options::Static(options) => Options::Static(options.clone()),
            Options::Dynamic(f) => Options::Dynamic(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Options<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Options::Static(options) => f.debug_tuple("Static").field(options).finish(),
            Options::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl<T> From<T> for Options<T> {
    fn from(options: T) -> Self {
        Options::Static(options)
    }
}

impl<T: Serialize> Serialize for Options<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Options::Static(options) => options.serialize(serializer),
            Options::Dynamic(_) => Err(serde::ser::Error::custom(
                "dynamic options cannot be serialized",
            )),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Options<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Options::Static)
    }
}

macro_rules! control_options {
    ($($name:ident),* $(,)?) => {
        $(
            impl ControlOptions for $name {
                fn hidden(&self) -> bool {
                    self.hidden
                }

                fn set_hidden(&mut self, hidden: bool) {
                    self.hidden = hidden;
                }
            }
        )*
    };
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckboxOptions {
    pub label: Option<String>,
    pub default_value: Option<bool>,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NumberOptions {
    pub label: Option<String>,
    pub default_value: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub suffix: Option<String>,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextInputOptions {
    pub label: Option<String>,
    pub default_value: Option<String>,
    pub placeholder: Option<String>,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextAreaOptions {
    pub label: Option<String>,
    pub default_value: Option<String>,
    pub rows: Option<u32>,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectOptions {
    pub label: Option<String>,
    pub options: Vec<SelectOption>,
    pub default_value: Option<String>,
    pub hidden: bool,
}

impl SelectOptions {
    /// `value` if it is one of the options, else the default.
    pub fn pick<'a>(&'a self, value: Option<&'a str>) -> Option<&'a str> {
        value
            .filter(|v| self.options.iter().any(|o| o.value == *v))
            .or(self.default_value.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconRadioOption {
    pub value: String,
    pub label: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IconRadioGroupOptions {
    pub label: Option<String>,
    pub options: Vec<IconRadioOption>,
    pub default_value: Option<String>,
    pub hidden: bool,
}

impl IconRadioGroupOptions {
    pub fn pick<'a>(&'a self, value: Option<&'a str>) -> Option<&'a str> {
        value
            .filter(|v| self.options.iter().any(|o| o.value == *v))
            .or(self.default_value.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComboboxOptions {
    pub label: Option<String>,
    pub options: Vec<ComboboxValue>,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColorOptions {
    pub label: Option<String>,
    /// Raw color shown when nothing is stored.
    pub placeholder: Option<String>,
    pub hide_alpha: bool,
    pub hidden: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageFormat {
    #[default]
    Url,
    WithDimensions,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageOptions {
    pub label: Option<String>,
    pub format: ImageFormat,
    pub hidden: bool,
}

/// Shared by link, list, shape, style, rich text, slot, typography and
/// element id controls.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BasicOptions {
    pub label: Option<String>,
    pub hidden: bool,
}

/// How style-like values are handed to components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueFormat {
    #[default]
    ResponsiveValue,
    ClassName,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidthOptions {
    pub label: Option<String>,
    pub format: ValueFormat,
    pub default_value: Option<Length>,
    pub hidden: bool,
}

/// Margin, padding, border, border radius and shadows.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoxOptions {
    pub label: Option<String>,
    pub format: ValueFormat,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResponsiveLengthOptions {
    pub label: Option<String>,
    pub default_value: Option<Length>,
    pub hidden: bool,
}

control_options!(
    CheckboxOptions,
    NumberOptions,
    TextInputOptions,
    TextAreaOptions,
    SelectOptions,
    IconRadioGroupOptions,
    ComboboxOptions,
    ColorOptions,
    ImageOptions,
    BasicOptions,
    WidthOptions,
    BoxOptions,
    ResponsiveLengthOptions,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Props;
    use serde_json::json;

    #[test]
    fn failing_function_hides_control() {
        let options: Options<TextInputOptions> =
            Options::dynamic(|_, _| Err(anyhow::anyhow!("boom")));
        let props = Props::new();
        let evaluated = options.evaluate(&PropsSnapshot::new(&props), "desktop");
        assert!(evaluated.hidden);
        assert_eq!(evaluated.label, None);
    }

    #[test]
    fn dynamic_options_read_raw_siblings() {
        let options: Options<BasicOptions> = Options::dynamic(|props, _| {
            Ok(BasicOptions {
                hidden: !props.checkbox("showCaption").unwrap_or(false),
                ..BasicOptions::default()
            })
        });
        let props = json!({"showCaption": {"@@pagecraft/type": "checkbox::v1", "value": true}});
        let props = props.as_object().unwrap();
        assert!(!options.evaluate(&PropsSnapshot::new(props), "mobile").hidden);
    }

    #[test]
    fn dynamic_options_refuse_to_serialize() {
        let options: Options<BasicOptions> = Options::dynamic(|_, _| Ok(BasicOptions::default()));
        assert!(serde_json::to_value(&options).is_err());
    }

    #[test]
    fn select_falls_back_to_default() {
        let select = SelectOptions {
            options: vec![SelectOption::new("a", "A"), SelectOption::new("b", "B")],
            default_value: Some("a".into()),
            ..SelectOptions::default()
        };
        assert_eq!(select.pick(Some("b")), Some("b"));
        assert_eq!(select.pick(Some("z")), Some("a"));
        assert_eq!(select.pick(None), Some("a"));
    }

    #[test]
    fn icon_radio_group_deserializes_icons() {
        let options: IconRadioGroupOptions = serde_json::from_value(json!({
            "label": "Alignment",
            "options": [
                {"value": "left", "label": "Left", "icon": "TextAlignLeft16"},
                {"value": "center", "label": "Center", "icon": "TextAlignCenter16"}
            ],
            "defaultValue": "left"
        }))
        .unwrap();
        assert_eq!(options.options[1].icon, "TextAlignCenter16");
        assert_eq!(options.pick(Some("center")), Some("center"));
        assert_eq!(options.pick(Some("justify")), Some("left"));
    }
}
