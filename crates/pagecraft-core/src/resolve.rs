//! Resolution of stored data into render-ready values
//!
//! A [`Resolver`] is built once per descriptor and device: dynamic options are
//! evaluated and the value format is fixed at that point. Resolving is then a
//! pure function of the data and the [`ResolveContext`].

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::breakpoints::Breakpoints;
use crate::data::{
    self, Border, BorderRadii, BorderSides, BorderStyle, BoxSides, ColorData, Data, ImageData,
    Length, LinkAction, LinkData, Props, ScrollBlock, SlotColumn, TypographyStyle,
};
use crate::descriptor::{
    CheckboxOptions, ColorOptions, Descriptor, IconRadioGroupOptions, ImageFormat, NumberOptions,
    PropsSnapshot, ResponsiveLengthOptions, SelectOptions, ValueFormat, WidthOptions,
};
use crate::document::ElementNode;
use crate::registry::ComponentRegistry;
use crate::resources::SiteResources;
use crate::responsive::ResponsiveValue;
use crate::theme::{Rgba, Theme};

/// Everything resolution reads besides the data itself.
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    pub device: &'a str,
    pub breakpoints: &'a Breakpoints,
    pub theme: &'a dyn Theme,
    pub resources: &'a dyn SiteResources,
    /// Raw props of the object holding the value, for dynamic options.
    pub props: &'a Props,
    pub class_prefix: &'a str,
}

impl<'a> ResolveContext<'a> {
    fn within<'b>(&self, props: &'b Props) -> ResolveContext<'b>
    where
        'a: 'b,
    {
        ResolveContext {
            device: self.device,
            breakpoints: self.breakpoints,
            theme: self.theme,
            resources: self.resources,
            props,
            class_prefix: self.class_prefix,
        }
    }

    fn for_device<'b>(&self, device: &'b str) -> ResolveContext<'b>
    where
        'a: 'b,
    {
        ResolveContext {
            device,
            breakpoints: self.breakpoints,
            theme: self.theme,
            resources: self.resources,
            props: self.props,
            class_prefix: self.class_prefix,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum LinkTarget {
    #[serde(rename_all = "camelCase")]
    Navigate { href: String, open_in_new_tab: bool },
    Scroll {
        anchor: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        block: Option<ScrollBlock>,
    },
    Email { href: String },
    Phone { href: String },
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedImage {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedBorder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Length>,
    pub style: BorderStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ResolvedBorderSides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<ResolvedBorder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<ResolvedBorder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<ResolvedBorder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<ResolvedBorder>,
}

/// Text properties for one device, each taken from the nearest breakpoint
/// that sets it.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ResolvedTypography {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub style: TypographyStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Style properties for one device.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ResolvedStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<BoxSides>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<BoxSides>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<ResolvedBorder>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ResolvedSlot {
    pub elements: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<SlotColumn>,
}

/// A value ready to hand to a component.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum ResolvedValue {
    None,
    Bool(bool),
    Number(f64),
    Text(String),
    /// A CSS color.
    Color(String),
    Image(ResolvedImage),
    Link(LinkTarget),
    List(Vec<ResolvedValue>),
    Shape(BTreeMap<String, ResolvedValue>),
    Style(ResolvedStyle),
    /// The document in its current stored layout.
    RichText(Data),
    Slot(ResolvedSlot),
    Length(Length),
    ResponsiveLength(ResponsiveValue<Length>),
    ResponsiveBoxSides(ResponsiveValue<BoxSides>),
    ResponsiveBorder(ResponsiveValue<ResolvedBorderSides>),
    ResponsiveBorderRadius(ResponsiveValue<BorderRadii>),
    /// CSS `box-shadow` values per device.
    ResponsiveShadows(ResponsiveValue<String>),
    Typography(ResolvedTypography),
    /// A nested control resolved once per device.
    Responsive(ResponsiveValue<ResolvedValue>),
    ClassName(String),
    Raw(Data),
}

enum Plan {
    Checkbox(CheckboxOptions),
    Number(NumberOptions),
    Text(Option<String>),
    Select(SelectOptions),
    IconRadioGroup(IconRadioGroupOptions),
    Combobox,
    Color(ColorOptions),
    ResponsiveColor(ColorOptions),
    Image(ImageFormat),
    Link,
    List(Descriptor),
    Shape(BTreeMap<String, Descriptor>),
    Style,
    StyleV2(Descriptor),
    RichText,
    Slot,
    Width(WidthOptions),
    BoxSides(&'static str, ValueFormat),
    Border(ValueFormat),
    BorderRadius(ValueFormat),
    Shadows(ValueFormat),
    Typography,
    ResponsiveLength(ResponsiveLengthOptions),
    ResponsiveSelect(SelectOptions),
    ElementId,
    Unknown,
}

/// Resolves data of one descriptor.
pub struct Resolver {
    plan: Plan,
}

impl Resolver {
    /// Evaluate the options of `descriptor` against the props in `ctx`.
    pub fn new(descriptor: &Descriptor, ctx: &ResolveContext<'_>) -> Self {
        let props = PropsSnapshot::new(ctx.props);
        let device = ctx.device;
        let plan = match descriptor {
            Descriptor::Checkbox(o) => Plan::Checkbox(o.evaluate(&props, device)),
            Descriptor::Number(o) => Plan::Number(o.evaluate(&props, device)),
            Descriptor::TextInput(o) => Plan::Text(o.evaluate(&props, device).default_value),
            Descriptor::TextArea(o) => Plan::Text(o.evaluate(&props, device).default_value),
            Descriptor::Select(o) => Plan::Select(o.evaluate(&props, device)),
            Descriptor::IconRadioGroup(o) => Plan::IconRadioGroup(o.evaluate(&props, device)),
            Descriptor::Combobox(_) => Plan::Combobox,
            Descriptor::Color(o) => Plan::Color(o.evaluate(&props, device)),
            Descriptor::ResponsiveColor(o) => Plan::ResponsiveColor(o.evaluate(&props, device)),
            Descriptor::Image(o) => Plan::Image(o.evaluate(&props, device).format),
            Descriptor::Link(_) => Plan::Link,
            Descriptor::List(list) => Plan::List(list.item.as_ref().clone()),
            Descriptor::Shape(shape) => Plan::Shape(shape.fields.clone()),
            Descriptor::Style(_) => Plan::Style,
            Descriptor::StyleV2(style) => Plan::StyleV2(style.config.as_ref().clone()),
            Descriptor::RichText(_) | Descriptor::RichTextV2(_) => Plan::RichText,
            Descriptor::Slot(_) => Plan::Slot,
            Descriptor::Width(o) => Plan::Width(o.evaluate(&props, device)),
            Descriptor::Margin(o) => Plan::BoxSides("margin", o.evaluate(&props, device).format),
            Descriptor::Padding(o) => {
                Plan::BoxSides("padding", o.evaluate(&props, device).format)
            }
            Descriptor::Border(o) => Plan::Border(o.evaluate(&props, device).format),
            Descriptor::BorderRadius(o) => Plan::BorderRadius(o.evaluate(&props, device).format),
            Descriptor::Shadows(o) => Plan::Shadows(o.evaluate(&props, device).format),
            Descriptor::Typography(_) => Plan::Typography,
            Descriptor::ResponsiveLength(o) => Plan::ResponsiveLength(o.evaluate(&props, device)),
            Descriptor::ResponsiveSelect(o) => Plan::ResponsiveSelect(o.evaluate(&props, device)),
            Descriptor::ElementId(_) => Plan::ElementId,
            Descriptor::Unknown => Plan::Unknown,
        };
        Self { plan }
    }

    pub fn resolve(&self, data: &Data, ctx: &ResolveContext<'_>) -> ResolvedValue {
        match &self.plan {
            Plan::Checkbox(o) => ResolvedValue::Bool(
                data::checkbox::parse(data)
                    .or(o.default_value)
                    .unwrap_or(false),
            ),
            Plan::Number(o) => match data::number::parse(data).or(o.default_value) {
                Some(n) => ResolvedValue::Number(clamp(n, o.min, o.max)),
                None => ResolvedValue::None,
            },
            Plan::Text(default) => data::text::parse(data)
                .or(default.as_deref())
                .map_or(ResolvedValue::None, |t| ResolvedValue::Text(t.to_string())),
            Plan::Select(o) => o
                .pick(data::text::parse(data))
                .map_or(ResolvedValue::None, |v| ResolvedValue::Text(v.to_string())),
            Plan::IconRadioGroup(o) => o
                .pick(data::text::parse_icon_radio(data))
                .map_or(ResolvedValue::None, |v| ResolvedValue::Text(v.to_string())),
            Plan::Combobox => data::combobox::parse(data)
                .map_or(ResolvedValue::None, |c| ResolvedValue::Raw(c.value)),
            Plan::Color(o) => resolve_color(data::color::parse(data).as_ref(), o, ctx),
            Plan::ResponsiveColor(o) => {
                let colors = data::color::parse_responsive(data);
                resolve_color(ctx.breakpoints.find_override(&colors, ctx.device), o, ctx)
            }
            Plan::Image(format) => resolve_image(data, *format, ctx),
            Plan::Link => match data::link::parse(data) {
                Some(link) => ResolvedValue::Link(resolve_link(&link, ctx)),
                None => ResolvedValue::None,
            },
            Plan::List(item) => match data::list::parse(data) {
                Some(list) => ResolvedValue::List(
                    list.items
                        .iter()
                        .map(|entry| {
                            let item_ctx = match entry.value.as_object() {
                                Some(fields) => ctx.within(fields),
                                None => *ctx,
                            };
                            Resolver::new(item, &item_ctx).resolve(&entry.value, &item_ctx)
                        })
                        .collect(),
                ),
                None => ResolvedValue::None,
            },
            Plan::Shape(fields) => {
                let empty = Props::new();
                let values = data::shape::parse(data).unwrap_or(&empty);
                let field_ctx = ctx.within(values);
                ResolvedValue::Shape(
                    fields
                        .iter()
                        .map(|(name, field)| {
                            let value = values.get(name).unwrap_or(&Data::Null);
                            let resolved =
                                Resolver::new(field, &field_ctx).resolve(value, &field_ctx);
                            (name.clone(), resolved)
                        })
                        .collect(),
                )
            }
            Plan::Style => match data::style::parse(data) {
                Some(style) => ResolvedValue::Style(resolve_style(&style, ctx)),
                None => ResolvedValue::None,
            },
            Plan::StyleV2(config) => {
                let overrides = ResponsiveValue::parse_with(data, |value| Some(value.clone()));
                let normalized = ctx.breakpoints.normalize(&overrides, None);
                if normalized.is_empty() {
                    return ResolvedValue::None;
                }
                ResolvedValue::Responsive(
                    normalized
                        .iter()
                        .map(|o| {
                            let device_ctx = ctx.for_device(&o.device_id);
                            let resolved =
                                Resolver::new(config, &device_ctx).resolve(&o.value, &device_ctx);
                            (o.device_id.clone(), resolved)
                        })
                        .collect(),
                )
            }
            Plan::RichText => match data::rich_text::parse(data) {
                Some(doc) => ResolvedValue::RichText(data::rich_text::to_data(&doc)),
                None => ResolvedValue::None,
            },
            Plan::Slot => {
                let slot = data::slot::parse(data).unwrap_or_default();
                ResolvedValue::Slot(ResolvedSlot {
                    columns: ctx
                        .breakpoints
                        .find_override(&slot.columns, ctx.device)
                        .cloned(),
                    elements: slot.elements,
                })
            }
            Plan::Width(o) => {
                let widths = data::length::parse_width(data).unwrap_or_default();
                let normalized = ctx.breakpoints.normalize(&widths, o.default_value.as_ref());
                if normalized.is_empty() {
                    return ResolvedValue::None;
                }
                match o.format {
                    ValueFormat::ResponsiveValue => ResolvedValue::ResponsiveLength(normalized),
                    ValueFormat::ClassName => ResolvedValue::ClassName(class_name(
                        ctx.class_prefix,
                        "width",
                        &data::length::width_to_data(&normalized),
                    )),
                }
            }
            Plan::BoxSides(kind, format) => {
                let sides = data::length::parse_responsive_box_sides(data).unwrap_or_default();
                let normalized = ctx.breakpoints.normalize(&sides, None);
                if normalized.is_empty() {
                    return ResolvedValue::None;
                }
                match format {
                    ValueFormat::ResponsiveValue => ResolvedValue::ResponsiveBoxSides(normalized),
                    ValueFormat::ClassName => ResolvedValue::ClassName(class_name(
                        ctx.class_prefix,
                        kind,
                        &data::length::responsive_box_sides_to_data(&normalized),
                    )),
                }
            }
            Plan::Border(format) => {
                let borders = data::border::parse_responsive(data).unwrap_or_default();
                let normalized = ctx.breakpoints.normalize(&borders, None);
                if normalized.is_empty() {
                    return ResolvedValue::None;
                }
                let resolved = normalized.map(|sides| resolve_border_sides(sides, ctx));
                match format {
                    ValueFormat::ResponsiveValue => ResolvedValue::ResponsiveBorder(resolved),
                    ValueFormat::ClassName => ResolvedValue::ClassName(class_name(
                        ctx.class_prefix,
                        "border",
                        &serde_json::to_value(&resolved).unwrap_or_default(),
                    )),
                }
            }
            Plan::BorderRadius(format) => {
                let radii = data::border::parse_responsive_radii(data).unwrap_or_default();
                let normalized = ctx.breakpoints.normalize(&radii, None);
                if normalized.is_empty() {
                    return ResolvedValue::None;
                }
                match format {
                    ValueFormat::ResponsiveValue => ResolvedValue::ResponsiveBorderRadius(normalized),
                    ValueFormat::ClassName => ResolvedValue::ClassName(class_name(
                        ctx.class_prefix,
                        "border-radius",
                        &serde_json::to_value(&normalized).unwrap_or_default(),
                    )),
                }
            }
            Plan::Shadows(format) => {
                let shadows = data::shadow::parse_responsive(data).unwrap_or_default();
                let normalized = ctx.breakpoints.normalize(&shadows, None);
                if normalized.is_empty() {
                    return ResolvedValue::None;
                }
                let css = normalized.map(|layers| {
                    layers
                        .iter()
                        .map(|shadow| {
                            let color = css_color(shadow.color.as_ref(), ctx)
                                .unwrap_or_else(|| "black".to_string());
                            shadow.css(&color)
                        })
                        .collect::<Vec<_>>()
                        .join(", ")
                });
                match format {
                    ValueFormat::ResponsiveValue => ResolvedValue::ResponsiveShadows(css),
                    ValueFormat::ClassName => ResolvedValue::ClassName(class_name(
                        ctx.class_prefix,
                        "shadows",
                        &serde_json::to_value(&css).unwrap_or_default(),
                    )),
                }
            }
            Plan::Typography => match data::typography::parse(data) {
                Some(typography) => {
                    let mut style = TypographyStyle::default();
                    for breakpoint in ctx.breakpoints.fallback_chain(ctx.device) {
                        if let Some(value) = typography.style.get(&breakpoint.id) {
                            style.fill_from(value);
                        }
                    }
                    ResolvedValue::Typography(ResolvedTypography {
                        id: typography.id,
                        color: css_color(style.color.as_ref(), ctx),
                        style,
                    })
                }
                None => ResolvedValue::None,
            },
            Plan::ResponsiveLength(o) => {
                let lengths = data::length::parse_responsive_length(data).unwrap_or_default();
                ctx.breakpoints
                    .find_override(&lengths, ctx.device)
                    .or(o.default_value.as_ref())
                    .map_or(ResolvedValue::None, |l| ResolvedValue::Length(*l))
            }
            Plan::ResponsiveSelect(o) => {
                let values: ResponsiveValue<String> =
                    ResponsiveValue::parse_with(data, |v| v.as_str().map(str::to_string));
                let value = ctx.breakpoints.find_override(&values, ctx.device);
                o.pick(value.map(String::as_str))
                    .map_or(ResolvedValue::None, |v| ResolvedValue::Text(v.to_string()))
            }
            Plan::ElementId => data::text::parse_element_id(data)
                .map_or(ResolvedValue::None, |id| ResolvedValue::Text(id.to_string())),
            Plan::Unknown => {
                if data.is_null() {
                    ResolvedValue::None
                } else {
                    ResolvedValue::Raw(data.clone())
                }
            }
        }
    }
}

/// Resolve `data` for `descriptor`, evaluating options against `ctx.props`.
pub fn resolve(descriptor: &Descriptor, data: &Data, ctx: &ResolveContext<'_>) -> ResolvedValue {
    Resolver::new(descriptor, ctx).resolve(data, ctx)
}

/// Every declared prop of an element, resolved against its own raw props.
pub fn resolve_element_props(
    registry: &ComponentRegistry,
    node: &ElementNode,
    ctx: &ResolveContext<'_>,
) -> BTreeMap<String, ResolvedValue> {
    let Some(component) = registry.get(&node.component_type) else {
        debug!(component = %node.component_type, "resolving unregistered component");
        return BTreeMap::new();
    };
    let element_ctx = ctx.within(&node.props);
    component
        .props
        .iter()
        .map(|(name, descriptor)| {
            let data = node.props.get(name).unwrap_or(&Data::Null);
            (name.clone(), resolve(descriptor, data, &element_ctx))
        })
        .collect()
}

fn clamp(n: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let n = min.map_or(n, |min| n.max(min));
    max.map_or(n, |max| n.min(max))
}

/// Swatch (with stored alpha), then raw color, then placeholder.
fn resolve_color(
    color: Option<&ColorData>,
    options: &ColorOptions,
    ctx: &ResolveContext<'_>,
) -> ResolvedValue {
    if let Some(color) = color {
        if let Some(swatch_id) = &color.swatch_id {
            match ctx.theme.resolve_swatch(swatch_id) {
                Some(rgba) => return ResolvedValue::Color(rgba.with_alpha(color.alpha).to_string()),
                None => debug!(swatch = %swatch_id, "swatch no longer exists"),
            }
        }
        if let Some(raw) = &color.color {
            let css = match Rgba::from_hex(raw) {
                Some(rgba) if color.alpha < 1.0 => rgba.with_alpha(color.alpha).to_string(),
                _ => raw.clone(),
            };
            return ResolvedValue::Color(css);
        }
    }
    match &options.placeholder {
        Some(placeholder) => ResolvedValue::Color(placeholder.clone()),
        None => ResolvedValue::None,
    }
}

fn resolve_image(data: &Data, format: ImageFormat, ctx: &ResolveContext<'_>) -> ResolvedValue {
    let image = match data::image::parse(data) {
        Some(ImageData::File { id }) => match ctx.resources.resolve_file(&id) {
            Some(asset) => ResolvedImage {
                url: asset.url,
                width: asset.width,
                height: asset.height,
            },
            None => {
                warn!(file = %id, "image refers to a missing file");
                return ResolvedValue::None;
            }
        },
        Some(ImageData::External { url, width, height }) => ResolvedImage { url, width, height },
        None => return ResolvedValue::None,
    };
    match format {
        ImageFormat::Url => ResolvedValue::Text(image.url),
        ImageFormat::WithDimensions => ResolvedValue::Image(image),
    }
}

fn resolve_link(link: &LinkData, ctx: &ResolveContext<'_>) -> LinkTarget {
    let action = match link {
        LinkData::Action(action) => action,
        LinkData::Unknown(_) => {
            debug!("unknown link action resolves to no-op");
            return LinkTarget::NoOp;
        }
    };

    match action {
        LinkAction::OpenUrl {
            url,
            open_in_new_tab,
        } => LinkTarget::Navigate {
            href: url.clone(),
            open_in_new_tab: *open_in_new_tab,
        },
        LinkAction::OpenPage {
            page_id,
            open_in_new_tab,
        } => match page_id.as_deref().and_then(|id| ctx.resources.resolve_page(id)) {
            Some(path) => LinkTarget::Navigate {
                href: path,
                open_in_new_tab: *open_in_new_tab,
            },
            None => {
                warn!(page = ?page_id, "link to a missing page");
                LinkTarget::NoOp
            }
        },
        LinkAction::SendEmail { to, subject, body } => {
            let query: Vec<String> = [("subject", subject), ("body", body)]
                .into_iter()
                .filter_map(|(key, value)| {
                    value
                        .as_deref()
                        .map(|v| format!("{key}={}", urlencoding::encode(v)))
                })
                .collect();
            let mut href = format!("mailto:{to}");
            if !query.is_empty() {
                href.push('?');
                href.push_str(&query.join("&"));
            }
            LinkTarget::Email { href }
        }
        LinkAction::CallPhone { phone_number } => LinkTarget::Phone {
            href: format!("tel:{phone_number}"),
        },
        LinkAction::ScrollToElement {
            element_id_config,
            block,
        } => match element_id_config.as_ref().and_then(|target| {
            ctx.resources
                .resolve_element_id(&target.element_key, &target.prop_name)
        }) {
            Some(id) => LinkTarget::Scroll {
                anchor: format!("#{id}"),
                block: *block,
            },
            None => {
                debug!("scroll target has no element id");
                LinkTarget::NoOp
            }
        },
    }
}

/// A stored color as CSS, without a placeholder.
fn css_color(color: Option<&ColorData>, ctx: &ResolveContext<'_>) -> Option<String> {
    match resolve_color(color, &ColorOptions::default(), ctx) {
        ResolvedValue::Color(css) => Some(css),
        _ => None,
    }
}

fn resolve_border(border: &Border, ctx: &ResolveContext<'_>) -> ResolvedBorder {
    ResolvedBorder {
        width: border.width,
        style: border.style,
        color: css_color(border.color.as_ref(), ctx),
    }
}

fn resolve_border_sides(sides: &BorderSides, ctx: &ResolveContext<'_>) -> ResolvedBorderSides {
    let side = |border: &Option<Border>| border.as_ref().map(|b| resolve_border(b, ctx));
    ResolvedBorderSides {
        top: side(&sides.top),
        right: side(&sides.right),
        bottom: side(&sides.bottom),
        left: side(&sides.left),
    }
}

fn resolve_style(style: &data::StyleData, ctx: &ResolveContext<'_>) -> ResolvedStyle {
    let border = style
        .border
        .as_ref()
        .and_then(|b| ctx.breakpoints.find_override(b, ctx.device))
        .map(|border| resolve_border(border, ctx));

    ResolvedStyle {
        width: style
            .width
            .as_ref()
            .and_then(|v| ctx.breakpoints.find_override(v, ctx.device))
            .copied(),
        margin: style
            .margin
            .as_ref()
            .and_then(|v| ctx.breakpoints.find_override(v, ctx.device))
            .copied(),
        padding: style
            .padding
            .as_ref()
            .and_then(|v| ctx.breakpoints.find_override(v, ctx.device))
            .copied(),
        border,
    }
}

/// `{prefix}-{kind}-{digest}` over the normalized value, stable across runs.
fn class_name(prefix: &str, kind: &str, normalized: &Data) -> String {
    let digest = blake3::hash(normalized.to_string().as_bytes()).to_hex();
    format!("{prefix}-{kind}-{}", &digest[..10])
}
