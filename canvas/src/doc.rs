//! Document model: presentations, slides, broadcast fields and the patch types
//! exchanged with the store.
//!
//! These types double as the JSON wire format (camelCase keys). Values read from the
//! outside are never trusted as-is: enums decode leniently to their default variant,
//! geometry is repaired by [`Slide::sanitize`], and a `currentSlideId` that no longer
//! names a slide is treated as "nothing presented".
//!
//! Data flows into this layer from the network (polls) and from the engine (optimistic
//! edits). [`Presentation::merge_from_server`] is where the two meet.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::consts::{DEFAULT_SLIDE_HEIGHT, DEFAULT_SLIDE_WIDTH, MAX_ROTATION_DEG};
use crate::geometry::{Rect, sanitize_rect};

/// Unique identifier for a slide.
pub type SlideId = Uuid;

/// Unique identifier for a presentation.
pub type PresentationId = Uuid;

/// Returned when a string does not name any variant of a wire enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// String-valued enum with a fixed wire spelling and lenient decoding.
///
/// Serializes as its wire string. Deserializes from any JSON value; anything that is
/// not one of the known strings becomes the default variant.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($kind:literal, default = $default:ident) {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "serde_json::Value", into = "&'static str")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$( $name::$variant, )+];

            /// Wire spelling of this variant.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $wire, )+
                }
            }

            /// Look up a variant by its wire spelling.
            #[must_use]
            pub fn from_wire(s: &str) -> Option<Self> {
                match s {
                    $( $wire => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_wire(s).ok_or_else(|| UnknownVariant { kind: $kind, value: s.to_owned() })
            }
        }

        impl From<$name> for &'static str {
            fn from(v: $name) -> Self {
                v.as_str()
            }
        }

        impl From<Value> for $name {
            fn from(v: Value) -> Self {
                v.as_str().and_then($name::from_wire).unwrap_or_default()
            }
        }
    };
}

wire_enum! {
    /// Outline drawn around a slide.
    pub enum FrameType ("frame type", default = Rectangle) {
        Rectangle => "rectangle",
        /// Ellipse inscribed in the slide rectangle.
        Circle => "circle",
        /// Corner brackets only.
        Bracket => "bracket",
        /// No outline; the slide is still hit-testable.
        Invisible => "invisible",
    }
}

wire_enum! {
    /// How viewers size the live deck.
    pub enum ViewerSize ("viewer size", default = Responsive) {
        /// Fill the viewer's window.
        Responsive => "responsive",
        /// Fixed 16:9 stage, letterboxed.
        Fixed16x9 => "1920x1080",
    }
}

wire_enum! {
    /// Backdrop painted behind the deck on viewers.
    pub enum BackgroundType ("background type", default = Interactive) {
        Interactive => "interactive",
        Plain => "plain",
        Dots => "dots",
        Hexagon => "hexagon",
        Radial => "radial",
        Paper => "paper",
        Stars => "stars",
        Circuit => "circuit",
    }
}

wire_enum! {
    /// Animation shown to viewers while nobody is presenting.
    pub enum ViewerAnimation ("viewer animation", default = Pulse) {
        /// Large countdown digits; falls back to pulse when no countdown runs.
        Countdown => "countdown",
        Pulse => "pulse",
        Wave => "wave",
        Spinner => "spinner",
        Particles => "particles",
        Gradient => "gradient",
    }
}

wire_enum! {
    /// Starting points offered by "add slide".
    pub enum SlideTemplate ("slide template", default = Blank) {
        Title => "title",
        Content => "content",
        ImageFocus => "image",
        Video => "video",
        Split => "split",
        Blank => "blank",
    }
}

/// Decode `null` or a missing value as `T::default()`.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

#[allow(clippy::cast_possible_truncation)]
fn clamp_rotation(deg: f64) -> i32 {
    if !deg.is_finite() {
        return 0;
    }
    let max = f64::from(MAX_ROTATION_DEG);
    deg.round().max(-max).min(max) as i32
}

fn lenient_rotation<'de, D: Deserializer<'de>>(d: D) -> Result<i32, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(v.as_f64().map_or(0, clamp_rotation))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lenient_seconds<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(match v.as_f64() {
        Some(s) if s.is_finite() && s > 0.0 => s.min(f64::from(u32::MAX)) as u32,
        _ => 0,
    })
}

fn is_default<T: Default + PartialEq>(v: &T) -> bool {
    *v == T::default()
}

// =============================================================
// Slide
// =============================================================

/// Open metadata bag attached to every slide.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideMetadata {
    /// Outline style.
    #[serde(default)]
    pub frame_type: FrameType,
    /// Rotation in whole degrees, `[-180, 180]`.
    #[serde(default, rename = "rotation", deserialize_with = "lenient_rotation")]
    pub rotation_degrees: i32,
    /// Speaker notes, never shown to viewers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Keys this crate does not interpret, preserved on round-trip.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SlideMetadata {
    /// Clamp rotation into range.
    pub fn sanitize(&mut self) {
        self.rotation_degrees = self.rotation_degrees.clamp(-MAX_ROTATION_DEG, MAX_ROTATION_DEG);
    }
}

/// A positioned, stylable slide on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: SlideId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Rich content, opaque to the editor.
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    /// Left edge in canvas units.
    pub x: f64,
    /// Top edge in canvas units.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Path position. Ties are broken by array position.
    #[serde(default, deserialize_with = "null_as_default")]
    pub order: i32,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: SlideMetadata,
}

impl Slide {
    /// Geometry as a rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Overwrite geometry without validation. Callers clamp first.
    pub fn set_rect(&mut self, rect: Rect) {
        self.x = rect.x;
        self.y = rect.y;
        self.width = rect.width;
        self.height = rect.height;
    }

    /// Apply the present fields of `patch`, then clamp the result onto the canvas.
    pub fn apply_geometry(&mut self, patch: &GeometryPatch) {
        let mut r = self.rect();
        if let Some(x) = patch.x {
            r.x = x;
        }
        if let Some(y) = patch.y {
            r.y = y;
        }
        if let Some(w) = patch.width {
            r.width = w;
        }
        if let Some(h) = patch.height {
            r.height = h;
        }
        self.set_rect(sanitize_rect(r));
    }

    /// Apply the present fields of an edit-form patch.
    pub fn apply_properties(&mut self, patch: &PropertiesPatch) {
        if let Some(ref title) = patch.title {
            self.title.clone_from(title);
        }
        if let Some(ref content) = patch.content {
            self.content.clone_from(content);
        }
        if let Some(ref bg) = patch.background_color {
            self.background_color = Some(bg.clone());
        }
        if let Some(ref fg) = patch.text_color {
            self.text_color = Some(fg.clone());
        }
        if let Some(ref metadata) = patch.metadata {
            self.metadata = metadata.clone();
            self.metadata.sanitize();
        }
    }

    /// Repair geometry and metadata in place.
    pub fn sanitize(&mut self) {
        self.set_rect(sanitize_rect(self.rect()));
        self.metadata.sanitize();
    }
}

// =============================================================
// Presentation
// =============================================================

/// Presenter-owned fields that drive what viewers see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BroadcastFields {
    pub is_presenting: bool,
    pub show_slide_ring: bool,
    pub viewer_size: ViewerSize,
    pub background_type: BackgroundType,
    pub viewer_animation: ViewerAnimation,
    #[serde(deserialize_with = "lenient_seconds")]
    pub viewer_countdown_seconds: u32,
}

impl Default for BroadcastFields {
    fn default() -> Self {
        Self {
            is_presenting: false,
            show_slide_ring: true,
            viewer_size: ViewerSize::default(),
            background_type: BackgroundType::default(),
            viewer_animation: ViewerAnimation::default(),
            viewer_countdown_seconds: 0,
        }
    }
}

impl BroadcastFields {
    /// Apply the present fields of `patch`.
    pub fn apply(&mut self, patch: &BroadcastPatch) {
        if let Some(v) = patch.is_presenting {
            self.is_presenting = v;
        }
        if let Some(v) = patch.show_slide_ring {
            self.show_slide_ring = v;
        }
        if let Some(v) = patch.viewer_size {
            self.viewer_size = v;
        }
        if let Some(v) = patch.background_type {
            self.background_type = v;
        }
        if let Some(v) = patch.viewer_animation {
            self.viewer_animation = v;
        }
        if let Some(v) = patch.viewer_countdown_seconds {
            self.viewer_countdown_seconds = v;
        }
    }
}

/// A presentation with its slides, as returned by `getPresentation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub id: PresentationId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Authoritative "what is being presented" pointer.
    #[serde(default)]
    pub current_slide_id: Option<SlideId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slides: Vec<Slide>,
    #[serde(flatten)]
    pub broadcast: BroadcastFields,
}

impl Presentation {
    /// Empty presentation with default broadcast fields.
    #[must_use]
    pub fn new(id: PresentationId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            current_slide_id: None,
            slides: Vec::new(),
            broadcast: BroadcastFields::default(),
        }
    }

    #[must_use]
    pub fn slide(&self, id: SlideId) -> Option<&Slide> {
        self.slides.iter().find(|s| s.id == id)
    }

    pub fn slide_mut(&mut self, id: SlideId) -> Option<&mut Slide> {
        self.slides.iter_mut().find(|s| s.id == id)
    }

    /// Array position of a slide.
    #[must_use]
    pub fn slide_index(&self, id: SlideId) -> Option<usize> {
        self.slides.iter().position(|s| s.id == id)
    }

    /// The slide being presented. A dangling `current_slide_id` yields `None`.
    #[must_use]
    pub fn current_slide(&self) -> Option<&Slide> {
        self.current_slide_id.and_then(|id| self.slide(id))
    }

    /// Slides sorted by `order`; equal orders keep their array position.
    #[must_use]
    pub fn slides_in_order(&self) -> Vec<&Slide> {
        let mut out: Vec<&Slide> = self.slides.iter().collect();
        out.sort_by_key(|s| s.order);
        out
    }

    /// Order value for a slide appended to the end of the path.
    #[must_use]
    pub fn next_order(&self) -> i32 {
        self.slides.iter().map(|s| s.order).max().map_or(0, |m| m.saturating_add(1))
    }

    /// Repair every slide and drop a dangling current pointer.
    pub fn sanitize(&mut self) {
        for slide in &mut self.slides {
            slide.sanitize();
        }
        if self.current_slide().is_none() {
            self.current_slide_id = None;
        }
    }

    /// Replace local state with server truth, keeping local geometry for slides whose
    /// ids are in `in_flight`.
    pub fn merge_from_server(&mut self, server: Presentation, in_flight: &HashSet<SlideId>) {
        let mut next = server;
        next.sanitize();
        for slide in &mut next.slides {
            if !in_flight.contains(&slide.id) {
                continue;
            }
            if let Some(local) = self.slide(slide.id) {
                slide.set_rect(local.rect());
            }
        }
        *self = next;
    }

    /// Remove a slide, clearing the current pointer if it named it.
    pub fn remove_slide(&mut self, id: SlideId) -> Option<Slide> {
        let idx = self.slide_index(id)?;
        if self.current_slide_id == Some(id) {
            self.current_slide_id = None;
        }
        Some(self.slides.remove(idx))
    }

    /// Rewrite `order` so listed slides follow the given sequence. Unlisted slides keep
    /// their relative order after them.
    pub fn reorder(&mut self, ids: &[SlideId]) {
        let listed = ids.len();
        let mut tail = 0usize;
        let mut rank: Vec<(usize, SlideId)> = Vec::with_capacity(self.slides.len());
        for slide in self.slides_in_order() {
            match ids.iter().position(|id| *id == slide.id) {
                Some(pos) => rank.push((pos, slide.id)),
                None => {
                    rank.push((listed + tail, slide.id));
                    tail += 1;
                }
            }
        }
        for (pos, id) in rank {
            if let Some(slide) = self.slide_mut(id) {
                slide.order = i32::try_from(pos).unwrap_or(i32::MAX);
            }
        }
    }
}

/// Row shape returned by `list_presentations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationSummary {
    pub id: PresentationId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub slide_count: usize,
    pub is_presenting: bool,
}

impl From<&Presentation> for PresentationSummary {
    fn from(p: &Presentation) -> Self {
        Self {
            id: p.id,
            title: p.title.clone(),
            description: p.description.clone(),
            slide_count: p.slides.len(),
            is_presenting: p.broadcast.is_presenting,
        }
    }
}

/// Body of `create_presentation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPresentation {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// =============================================================
// Patches
// =============================================================

/// Sparse geometry update. Only present fields are applied.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl GeometryPatch {
    /// Patch setting only the origin.
    #[must_use]
    pub fn position(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), ..Self::default() }
    }

    /// Patch setting every field from `rect`.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        Self { x: Some(rect.x), y: Some(rect.y), width: Some(rect.width), height: Some(rect.height) }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.width.is_none() && self.height.is_none()
    }

    /// Fold a later patch into this one; present fields of `later` win.
    pub fn merge(&mut self, later: &GeometryPatch) {
        self.x = later.x.or(self.x);
        self.y = later.y.or(self.y);
        self.width = later.width.or(self.width);
        self.height = later.height.or(self.height);
    }
}

/// Sparse edit-form update.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertiesPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SlideMetadata>,
}

impl PropertiesPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Sparse broadcast-field update.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_presenting: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_slide_ring: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewer_size: Option<ViewerSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_type: Option<BackgroundType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewer_animation: Option<ViewerAnimation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewer_countdown_seconds: Option<u32>,
}

impl BroadcastPatch {
    #[must_use]
    pub fn presenting(on: bool) -> Self {
        Self { is_presenting: Some(on), ..Self::default() }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        is_default(self)
    }

    /// Fold a later patch into this one; present fields of `later` win.
    pub fn merge(&mut self, later: &BroadcastPatch) {
        self.is_presenting = later.is_presenting.or(self.is_presenting);
        self.show_slide_ring = later.show_slide_ring.or(self.show_slide_ring);
        self.viewer_size = later.viewer_size.or(self.viewer_size);
        self.background_type = later.background_type.or(self.background_type);
        self.viewer_animation = later.viewer_animation.or(self.viewer_animation);
        self.viewer_countdown_seconds = later.viewer_countdown_seconds.or(self.viewer_countdown_seconds);
    }
}

// =============================================================
// Creation
// =============================================================

/// Body of `create_slide`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSlide {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SlideMetadata>,
    /// Path position; the store appends when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

impl NewSlide {
    /// Unstyled slide at `rect`.
    #[must_use]
    pub fn at(rect: Rect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            title: None,
            content: None,
            background_color: None,
            text_color: None,
            metadata: None,
            order: None,
        }
    }

    /// Copy of an existing slide's content and style at a new origin.
    #[must_use]
    pub fn copy_of(slide: &Slide, x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            width: slide.width,
            height: slide.height,
            title: Some(slide.title.clone()),
            content: Some(slide.content.clone()),
            background_color: slide.background_color.clone(),
            text_color: slide.text_color.clone(),
            metadata: Some(slide.metadata.clone()),
            order: None,
        }
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Materialize into a stored slide. Geometry is clamped.
    #[must_use]
    pub fn into_slide(self, id: SlideId, fallback_order: i32) -> Slide {
        let mut slide = Slide {
            id,
            title: self.title.unwrap_or_else(|| SlideTemplate::Blank.title().to_owned()),
            content: self.content.unwrap_or_default(),
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            order: self.order.unwrap_or(fallback_order),
            background_color: self.background_color,
            text_color: self.text_color,
            metadata: self.metadata.unwrap_or_default(),
        };
        slide.sanitize();
        slide
    }
}

impl SlideTemplate {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Content => "Content Slide",
            Self::ImageFocus => "Image Slide",
            Self::Video => "Video Slide",
            Self::Split => "Split Content",
            Self::Blank => "New Slide",
        }
    }

    #[must_use]
    pub fn content(self) -> &'static str {
        match self {
            Self::Title => "<h1>Main Title</h1><p>Subtitle</p>",
            Self::Content => "<h2>Heading</h2><p>Your content here</p>",
            Self::ImageFocus => "<h2>Image Title</h2><p>Add your image</p>",
            Self::Video => "<h2>Video Title</h2><p>Add your video</p>",
            Self::Split => "<div class=\"split\"><div><h2>Left</h2><p>Content</p></div><div><h2>Right</h2><p>Content</p></div></div>",
            Self::Blank => "",
        }
    }

    /// `(background, text)` colours, or `None` for the renderer defaults.
    #[must_use]
    pub fn colors(self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Title => Some(("#1e40af", "#ffffff")),
            Self::Content | Self::Split => Some(("#ffffff", "#000000")),
            Self::ImageFocus => Some(("#f3f4f6", "#111827")),
            Self::Video => Some(("#000000", "#ffffff")),
            Self::Blank => None,
        }
    }

    /// `(width, height)` in canvas units.
    #[must_use]
    pub fn size(self) -> (f64, f64) {
        match self {
            Self::Title | Self::Content => (400.0, 300.0),
            Self::ImageFocus | Self::Video => (500.0, 375.0),
            Self::Split => (500.0, 300.0),
            Self::Blank => (DEFAULT_SLIDE_WIDTH, DEFAULT_SLIDE_HEIGHT),
        }
    }

    /// A `NewSlide` for this template with its origin at `(x, y)`.
    #[must_use]
    pub fn new_slide(self, x: f64, y: f64) -> NewSlide {
        let (width, height) = self.size();
        let mut ns = NewSlide::at(Rect::new(x, y, width, height));
        ns.title = Some(self.title().to_owned());
        if !self.content().is_empty() {
            ns.content = Some(self.content().to_owned());
        }
        if let Some((bg, fg)) = self.colors() {
            ns.background_color = Some(bg.to_owned());
            ns.text_color = Some(fg.to_owned());
        }
        ns
    }
}
