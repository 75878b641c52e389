//! Control descriptors
//!
//! A [`Descriptor`] names a control kind and carries its options. The kind
//! alone decides the shape of the data stored for a prop; options may be
//! computed from sibling props through [`Options::Dynamic`], but the kind is
//! fixed when the component is registered.
//!
//! Every operation over descriptors (copy, merge, translation, resolution)
//! matches all variants explicitly so a new kind cannot be added without
//! deciding how each operation treats it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::{self, Data, Props};
use crate::responsive::ResponsiveValue;

mod options;

pub use options::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDescriptor {
    #[serde(rename = "itemType")]
    pub item: Box<Descriptor>,
    #[serde(flatten)]
    pub options: Options<BasicOptions>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeDescriptor {
    pub fields: BTreeMap<String, Descriptor>,
    #[serde(flatten)]
    pub options: Options<BasicOptions>,
}

/// Per-device values of a nested control, stored as overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleV2Descriptor {
    pub config: Box<Descriptor>,
    #[serde(flatten)]
    pub options: Options<BasicOptions>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Descriptor {
    Checkbox(Options<CheckboxOptions>),
    Number(Options<NumberOptions>),
    TextInput(Options<TextInputOptions>),
    TextArea(Options<TextAreaOptions>),
    Select(Options<SelectOptions>),
    IconRadioGroup(Options<IconRadioGroupOptions>),
    Combobox(Options<ComboboxOptions>),
    Color(Options<ColorOptions>),
    ResponsiveColor(Options<ColorOptions>),
    Image(Options<ImageOptions>),
    Link(Options<BasicOptions>),
    List(ListDescriptor),
    Shape(ShapeDescriptor),
    Style(Options<BasicOptions>),
    #[serde(rename = "style-v2")]
    StyleV2(StyleV2Descriptor),
    RichText(Options<BasicOptions>),
    #[serde(rename = "rich-text-v2")]
    RichTextV2(Options<BasicOptions>),
    Slot(Options<BasicOptions>),
    Width(Options<WidthOptions>),
    Margin(Options<BoxOptions>),
    Padding(Options<BoxOptions>),
    Border(Options<BoxOptions>),
    BorderRadius(Options<BoxOptions>),
    Shadows(Options<BoxOptions>),
    Typography(Options<BasicOptions>),
    ResponsiveLength(Options<ResponsiveLengthOptions>),
    ResponsiveSelect(Options<SelectOptions>),
    ElementId(Options<BasicOptions>),
    /// A kind this version does not know. Its data passes through untouched.
    #[serde(other)]
    Unknown,
}

impl Descriptor {
    pub fn list(item: Descriptor) -> Self {
        Descriptor::List(ListDescriptor {
            item: Box::new(item),
            options: Options::default(),
        })
    }

    pub fn shape<K: Into<String>>(fields: impl IntoIterator<Item = (K, Descriptor)>) -> Self {
        Descriptor::Shape(ShapeDescriptor {
            fields: fields.into_iter().map(|(k, d)| (k.into(), d)).collect(),
            options: Options::default(),
        })
    }

    pub fn style_v2(config: Descriptor) -> Self {
        Descriptor::StyleV2(StyleV2Descriptor {
            config: Box::new(config),
            options: Options::default(),
        })
    }

    /// The stable `type` discriminator.
    pub fn type_name(&self) -> &'static str {
        match self {
            Descriptor::Checkbox(_) => "checkbox",
            Descriptor::Number(_) => "number",
            Descriptor::TextInput(_) => "text-input",
            Descriptor::TextArea(_) => "text-area",
            Descriptor::Select(_) => "select",
            Descriptor::IconRadioGroup(_) => "icon-radio-group",
            Descriptor::Combobox(_) => "combobox",
            Descriptor::Color(_) => "color",
            Descriptor::ResponsiveColor(_) => "responsive-color",
            Descriptor::Image(_) => "image",
            Descriptor::Link(_) => "link",
            Descriptor::List(_) => "list",
            Descriptor::Shape(_) => "shape",
            Descriptor::Style(_) => "style",
            Descriptor::StyleV2(_) => "style-v2",
            Descriptor::RichText(_) => "rich-text",
            Descriptor::RichTextV2(_) => "rich-text-v2",
            Descriptor::Slot(_) => "slot",
            Descriptor::Width(_) => "width",
            Descriptor::Margin(_) => "margin",
            Descriptor::Padding(_) => "padding",
            Descriptor::Border(_) => "border",
            Descriptor::BorderRadius(_) => "border-radius",
            Descriptor::Shadows(_) => "shadows",
            Descriptor::Typography(_) => "typography",
            Descriptor::ResponsiveLength(_) => "responsive-length",
            Descriptor::ResponsiveSelect(_) => "responsive-select",
            Descriptor::ElementId(_) => "element-id",
            Descriptor::Unknown => "unknown",
        }
    }

    /// This descriptor with every dynamic option set evaluated. Nested item
    /// and field descriptors are left as they are; they are evaluated against
    /// their own data when visited.
    pub fn evaluate(&self, props: &PropsSnapshot<'_>, device: &str) -> Descriptor {
        fn eval<T: ControlOptions>(o: &Options<T>, p: &PropsSnapshot<'_>, d: &str) -> Options<T> {
            Options::Static(o.evaluate(p, d))
        }

        match self {
            Descriptor::Checkbox(o) => Descriptor::Checkbox(eval(o, props, device)),
            Descriptor::Number(o) => Descriptor::Number(eval(o, props, device)),
            Descriptor::TextInput(o) => Descriptor::TextInput(eval(o, props, device)),
            Descriptor::TextArea(o) => Descriptor::TextArea(eval(o, props, device)),
            Descriptor::Select(o) => Descriptor::Select(eval(o, props, device)),
            Descriptor::IconRadioGroup(o) => Descriptor::IconRadioGroup(eval(o, props, device)),
            Descriptor::Combobox(o) => Descriptor::Combobox(eval(o, props, device)),
            Descriptor::Color(o) => Descriptor::Color(eval(o, props, device)),
            Descriptor::ResponsiveColor(o) => Descriptor::ResponsiveColor(eval(o, props, device)),
            Descriptor::Image(o) => Descriptor::Image(eval(o, props, device)),
            Descriptor::Link(o) => Descriptor::Link(eval(o, props, device)),
            Descriptor::List(list) => Descriptor::List(ListDescriptor {
                item: list.item.clone(),
                options: eval(&list.options, props, device),
            }),
            Descriptor::Shape(shape) => Descriptor::Shape(ShapeDescriptor {
                fields: shape.fields.clone(),
                options: eval(&shape.options, props, device),
            }),
            Descriptor::Style(o) => Descriptor::Style(eval(o, props, device)),
            Descriptor::StyleV2(style) => Descriptor::StyleV2(StyleV2Descriptor {
                config: style.config.clone(),
                options: eval(&style.options, props, device),
            }),
            Descriptor::RichText(o) => Descriptor::RichText(eval(o, props, device)),
            Descriptor::RichTextV2(o) => Descriptor::RichTextV2(eval(o, props, device)),
            Descriptor::Slot(o) => Descriptor::Slot(eval(o, props, device)),
            Descriptor::Width(o) => Descriptor::Width(eval(o, props, device)),
            Descriptor::Margin(o) => Descriptor::Margin(eval(o, props, device)),
            Descriptor::Padding(o) => Descriptor::Padding(eval(o, props, device)),
            Descriptor::Border(o) => Descriptor::Border(eval(o, props, device)),
            Descriptor::BorderRadius(o) => Descriptor::BorderRadius(eval(o, props, device)),
            Descriptor::Shadows(o) => Descriptor::Shadows(eval(o, props, device)),
            Descriptor::Typography(o) => Descriptor::Typography(eval(o, props, device)),
            Descriptor::ResponsiveLength(o) => {
                Descriptor::ResponsiveLength(eval(o, props, device))
            }
            Descriptor::ResponsiveSelect(o) => {
                Descriptor::ResponsiveSelect(eval(o, props, device))
            }
            Descriptor::ElementId(o) => Descriptor::ElementId(eval(o, props, device)),
            Descriptor::Unknown => Descriptor::Unknown,
        }
    }

    /// Whether the control is hidden for these props and device.
    pub fn hidden(&self, props: &PropsSnapshot<'_>, device: &str) -> bool {
        fn h<T: ControlOptions>(o: &Options<T>, p: &PropsSnapshot<'_>, d: &str) -> bool {
            o.evaluate(p, d).hidden()
        }

        match self {
            Descriptor::Checkbox(o) => h(o, props, device),
            Descriptor::Number(o) => h(o, props, device),
            Descriptor::TextInput(o) => h(o, props, device),
            Descriptor::TextArea(o) => h(o, props, device),
            Descriptor::Select(o) | Descriptor::ResponsiveSelect(o) => h(o, props, device),
            Descriptor::IconRadioGroup(o) => h(o, props, device),
            Descriptor::Combobox(o) => h(o, props, device),
            Descriptor::Color(o) | Descriptor::ResponsiveColor(o) => h(o, props, device),
            Descriptor::Image(o) => h(o, props, device),
            Descriptor::List(ListDescriptor { options, .. })
            | Descriptor::Shape(ShapeDescriptor { options, .. })
            | Descriptor::StyleV2(StyleV2Descriptor { options, .. }) => h(options, props, device),
            Descriptor::Link(o)
            | Descriptor::Style(o)
            | Descriptor::RichText(o)
            | Descriptor::RichTextV2(o)
            | Descriptor::Slot(o)
            | Descriptor::Typography(o)
            | Descriptor::ElementId(o) => h(o, props, device),
            Descriptor::Width(o) => h(o, props, device),
            Descriptor::Margin(o)
            | Descriptor::Padding(o)
            | Descriptor::Border(o)
            | Descriptor::BorderRadius(o)
            | Descriptor::Shadows(o) => h(o, props, device),
            Descriptor::ResponsiveLength(o) => h(o, props, device),
            Descriptor::Unknown => false,
        }
    }

    /// Whether any options in this descriptor tree are computed.
    pub fn is_dynamic(&self) -> bool {
        match self {
            Descriptor::Checkbox(o) => o.is_dynamic(),
            Descriptor::Number(o) => o.is_dynamic(),
            Descriptor::TextInput(o) => o.is_dynamic(),
            Descriptor::TextArea(o) => o.is_dynamic(),
            Descriptor::Select(o) | Descriptor::ResponsiveSelect(o) => o.is_dynamic(),
            Descriptor::IconRadioGroup(o) => o.is_dynamic(),
            Descriptor::Combobox(o) => o.is_dynamic(),
            Descriptor::Color(o) | Descriptor::ResponsiveColor(o) => o.is_dynamic(),
            Descriptor::Image(o) => o.is_dynamic(),
            Descriptor::List(list) => list.options.is_dynamic() || list.item.is_dynamic(),
            Descriptor::Shape(shape) => {
                shape.options.is_dynamic() || shape.fields.values().any(Descriptor::is_dynamic)
            }
            Descriptor::StyleV2(style) => style.options.is_dynamic() || style.config.is_dynamic(),
            Descriptor::Link(o)
            | Descriptor::Style(o)
            | Descriptor::RichText(o)
            | Descriptor::RichTextV2(o)
            | Descriptor::Slot(o)
            | Descriptor::Typography(o)
            | Descriptor::ElementId(o) => o.is_dynamic(),
            Descriptor::Width(o) => o.is_dynamic(),
            Descriptor::Margin(o)
            | Descriptor::Padding(o)
            | Descriptor::Border(o)
            | Descriptor::BorderRadius(o)
            | Descriptor::Shadows(o) => o.is_dynamic(),
            Descriptor::ResponsiveLength(o) => o.is_dynamic(),
            Descriptor::Unknown => false,
        }
    }
}

/// Read-only view of a component's raw prop data, handed to options
/// functions.
///
/// Values are unresolved. The typed helpers coerce legacy shapes the same way
/// the data parsers do.
#[derive(Debug, Clone, Copy)]
pub struct PropsSnapshot<'a> {
    props: &'a Props,
}

impl<'a> PropsSnapshot<'a> {
    pub fn new(props: &'a Props) -> Self {
        Self { props }
    }

    pub fn props(&self) -> &'a Props {
        self.props
    }

    /// Raw data of a prop; `Null` when absent.
    pub fn get(&self, name: &str) -> &'a Data {
        static NULL: Data = Data::Null;
        self.props.get(name).unwrap_or(&NULL)
    }

    pub fn checkbox(&self, name: &str) -> Option<bool> {
        data::checkbox::parse(self.get(name))
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        data::number::parse(self.get(name))
    }

    pub fn text(&self, name: &str) -> Option<&'a str> {
        data::text::parse(self.get(name))
    }

    pub fn responsive_select(&self, name: &str) -> ResponsiveValue<String> {
        ResponsiveValue::parse_with(self.get(name), |v| v.as_str().map(str::to_string))
    }

    pub fn list_len(&self, name: &str) -> usize {
        data::list::parse(self.get(name)).map_or(0, |list| list.items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_nested_descriptors() {
        let descriptor: Descriptor = serde_json::from_value(json!({
            "type": "list",
            "label": "Cards",
            "itemType": {
                "type": "shape",
                "fields": {
                    "title": {"type": "text-input", "label": "Title"},
                    "image": {"type": "image", "format": "with-dimensions"}
                }
            }
        }))
        .unwrap();

        let Descriptor::List(list) = &descriptor else {
            panic!("expected a list");
        };
        let Descriptor::Shape(shape) = list.item.as_ref() else {
            panic!("expected a shape item");
        };
        assert_eq!(shape.fields.len(), 2);
        assert!(matches!(
            shape.fields.get("image"),
            Some(Descriptor::Image(Options::Static(ImageOptions {
                format: ImageFormat::WithDimensions,
                ..
            })))
        ));
    }

    #[test]
    fn style_v2_wraps_a_nested_control() {
        let descriptor: Descriptor = serde_json::from_value(json!({
            "type": "style-v2",
            "config": {"type": "responsive-length"},
            "label": "Gap"
        }))
        .unwrap();
        let Descriptor::StyleV2(style) = &descriptor else {
            panic!("expected style-v2");
        };
        assert!(matches!(style.config.as_ref(), Descriptor::ResponsiveLength(_)));
        assert_eq!(descriptor.type_name(), "style-v2");

        for kind in ["icon-radio-group", "border", "border-radius", "shadows", "typography"] {
            let descriptor: Descriptor = serde_json::from_value(json!({"type": kind})).unwrap();
            assert_eq!(descriptor.type_name(), kind);
        }
    }

    #[test]
    fn unknown_kinds_deserialize() {
        let descriptor: Descriptor =
            serde_json::from_value(json!({"type": "video", "label": "Clip"})).unwrap();
        assert!(matches!(descriptor, Descriptor::Unknown));
    }

    #[test]
    fn type_names_round_trip_through_serde() {
        let descriptor = Descriptor::RichTextV2(Options::default());
        let value = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(value["type"], descriptor.type_name());
    }

    #[test]
    fn hidden_follows_sibling_checkbox() {
        let caption = Descriptor::TextInput(Options::dynamic(|props, _| {
            Ok(TextInputOptions {
                hidden: props.checkbox("showCaption") != Some(true),
                ..TextInputOptions::default()
            })
        }));
        let shown = json!({"showCaption": true});
        let hidden = json!({"showCaption": false});

        assert!(!caption.hidden(&PropsSnapshot::new(shown.as_object().unwrap()), "desktop"));
        assert!(caption.hidden(&PropsSnapshot::new(hidden.as_object().unwrap()), "desktop"));
        assert!(caption.is_dynamic());
        assert!(!caption
            .evaluate(&PropsSnapshot::new(shown.as_object().unwrap()), "desktop")
            .is_dynamic());
    }

    #[test]
    fn options_can_read_responsive_layout_and_list_size() {
        let columns = Descriptor::Number(Options::dynamic(|props, device| {
            let layout = props.responsive_select("layout");
            Ok(NumberOptions {
                hidden: layout.get(device).map(String::as_str) != Some("grid"),
                max: Some(props.list_len("cards") as f64),
                ..NumberOptions::default()
            })
        }));
        let props = json!({
            "layout": [{"deviceId": "desktop", "value": "grid"}, {"deviceId": "mobile", "value": "stack"}],
            "cards": [{"id": "a", "value": {}}, {"id": "b", "value": {}}]
        });
        let snapshot = PropsSnapshot::new(props.as_object().unwrap());

        assert!(!columns.hidden(&snapshot, "desktop"));
        assert!(columns.hidden(&snapshot, "mobile"));
        let Descriptor::Number(Options::Static(evaluated)) = columns.evaluate(&snapshot, "desktop")
        else {
            panic!("expected static number options");
        };
        assert_eq!(evaluated.max, Some(2.0));
    }
}
