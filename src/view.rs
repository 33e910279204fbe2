//! View types for tree rendering.
//!
//! This module provides the minimal renderable tree that providers wrap and
//! scoped components produce.
//!
//! ## Overview
//!
//! The `View` enum is the abstraction for all rendered content in the
//! component tree. It can represent elements, text nodes, fragments, or
//! nothing at all. Providers never invent views of their own; they evaluate
//! their children inside their scope and pass the resulting tree through.
//!
//! ## Example
//!
//! ```ignore
//! use scoped_store::view::{View, ViewElement, IntoView};
//!
//! let view = ViewElement::new("div")
//!     .attr("class", "container")
//!     .child("Hello, World!")
//!     .into_view();
//!
//! let html = view.render_to_string();
//! ```

use std::borrow::Cow;

/// A unified representation of renderable content.
///
/// `View` is deliberately value-like (`Clone + PartialEq`) so that tests and
/// hosts can compare rendered trees structurally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
	/// An element node.
	Element(ViewElement),
	/// A text node.
	Text(Cow<'static, str>),
	/// A fragment containing multiple views (no wrapper element).
	Fragment(Vec<View>),
	/// An empty view (renders nothing).
	Empty,
}

impl View {
	/// Creates a text view.
	pub fn text(text: impl Into<Cow<'static, str>>) -> Self {
		View::Text(text.into())
	}

	/// Creates an element view.
	pub fn element(tag: impl Into<Cow<'static, str>>) -> ViewElement {
		ViewElement::new(tag)
	}

	/// Renders the view to an HTML string.
	///
	/// Text content is escaped; attribute values are escaped as well.
	pub fn render_to_string(&self) -> String {
		match self {
			View::Element(el) => el.render_to_string(),
			View::Text(text) => html_escape(text),
			View::Fragment(views) => views.iter().map(View::render_to_string).collect(),
			View::Empty => String::new(),
		}
	}
}

/// Represents an element in the view tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewElement {
	/// The tag name (e.g., "div", "span").
	tag: Cow<'static, str>,
	/// Attributes, in insertion order.
	attrs: Vec<(Cow<'static, str>, Cow<'static, str>)>,
	/// Child views.
	children: Vec<View>,
}

impl ViewElement {
	/// Creates a new element view.
	pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
		Self {
			tag: tag.into(),
			attrs: Vec::new(),
			children: Vec::new(),
		}
	}

	/// Adds an attribute.
	pub fn attr(
		mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Adds a child view.
	pub fn child(mut self, child: impl IntoView) -> Self {
		self.children.push(child.into_view());
		self
	}

	/// Adds multiple child views.
	pub fn children(mut self, children: impl IntoIterator<Item = impl IntoView>) -> Self {
		self.children
			.extend(children.into_iter().map(|c| c.into_view()));
		self
	}

	/// Returns the tag name.
	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	/// Returns the child views.
	pub fn child_views(&self) -> &[View] {
		&self.children
	}

	fn render_to_string(&self) -> String {
		let mut out = String::new();
		out.push('<');
		out.push_str(&self.tag);
		for (name, value) in &self.attrs {
			out.push(' ');
			out.push_str(name);
			out.push_str("=\"");
			out.push_str(&html_escape(value));
			out.push('"');
		}
		out.push('>');
		for child in &self.children {
			out.push_str(&child.render_to_string());
		}
		out.push_str("</");
		out.push_str(&self.tag);
		out.push('>');
		out
	}
}

/// Conversion into a `View`.
///
/// Implemented for views, elements, strings, options and vectors so that
/// builder call sites stay terse.
pub trait IntoView {
	/// Converts the value into a view.
	fn into_view(self) -> View;
}

impl IntoView for View {
	fn into_view(self) -> View {
		self
	}
}

impl IntoView for ViewElement {
	fn into_view(self) -> View {
		View::Element(self)
	}
}

impl IntoView for String {
	fn into_view(self) -> View {
		View::Text(Cow::Owned(self))
	}
}

impl IntoView for &'static str {
	fn into_view(self) -> View {
		View::Text(Cow::Borrowed(self))
	}
}

impl<T: IntoView> IntoView for Option<T> {
	fn into_view(self) -> View {
		match self {
			Some(v) => v.into_view(),
			None => View::Empty,
		}
	}
}

impl<T: IntoView> IntoView for Vec<T> {
	fn into_view(self) -> View {
		View::Fragment(self.into_iter().map(IntoView::into_view).collect())
	}
}

/// Escapes text for safe inclusion in HTML content or attribute values.
pub(crate) fn html_escape(input: &str) -> String {
	let mut out = String::with_capacity(input.len());
	for c in input.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#39;"),
			_ => out.push(c),
		}
	}
	out
}
