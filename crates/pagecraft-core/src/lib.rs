//! # Pagecraft Core
//!
//! Prop controllers for a visual page builder. A component declares its props
//! with [`Descriptor`]s; each descriptor kind knows how to read the data stored
//! for it (current and legacy layouts), and how to copy, merge, translate and
//! resolve that data.
//!
//! Documents are flat maps of elements. Slot props reference children by key,
//! and [`DocumentTree`] lets copy and merge walk into those children.

#![warn(clippy::all)]

pub mod breakpoints;
pub mod copy;
pub mod data;
pub mod descriptor;
pub mod document;
pub mod ids;
pub mod merge;
pub mod registry;
pub mod resolve;
pub mod resources;
pub mod responsive;
pub mod theme;
pub mod translation;
pub mod tree;

pub use breakpoints::Breakpoints;
pub use copy::{copy, CopyContext};
pub use data::{Data, Props, DATA_TYPE_KEY};
pub use descriptor::{Descriptor, Options, PropsSnapshot};
pub use document::{Document, DocumentError, ElementNode, Subtree};
pub use ids::{IdGenerator, IdNamespace, IdRemap, SequentialIds, UuidGenerator};
pub use merge::{merge, MergeContext};
pub use registry::{ComponentMeta, ComponentRegistry, RegistryError};
pub use resolve::{
    resolve, resolve_element_props, LinkTarget, ResolveContext, ResolvedValue, Resolver,
};
pub use resources::{FileAsset, ResourceIndex, SiteResources};
pub use responsive::{DeviceOverride, ResponsiveValue};
pub use theme::{Palette, Rgba, Theme};
pub use translation::{
    apply_document_translations, extract_document, get_translatable_data, merge_translated_data,
    DocumentTranslations, TranslationContext,
};
pub use tree::{duplicate_element, merge_documents, DocumentTree, TreeMerge, TreeStore};
