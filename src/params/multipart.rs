//! Multipart field values and the flattened parts sent on the wire.

// std
use std::path::Path;
// self
use crate::_prelude::*;

/// A file attached to a multipart request; contents are read eagerly.
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
	/// Original file name reported to the server.
	pub filename: String,
	/// Raw file contents.
	pub contents: Vec<u8>,
}
impl FileUpload {
	/// Wraps in-memory contents under the provided file name.
	pub fn new(filename: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
		Self { filename: filename.into(), contents: contents.into() }
	}

	/// Reads the file at `path` and keeps its final path component as the file name.
	pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
		let path = path.as_ref();
		let contents = std::fs::read(path)?;
		let filename = path
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_default();

		Ok(Self { filename, contents })
	}
}
impl Debug for FileUpload {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("FileUpload")
			.field("filename", &self.filename)
			.field("len", &self.contents.len())
			.finish()
	}
}

/// Caller-supplied multipart value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MultipartValue {
	/// Plain scalar field.
	Text(String),
	/// File field carrying contents and original file name.
	File(FileUpload),
	/// Nested field rendered with bracketed names (`name[sub]`), in insertion order.
	Nested(Vec<(String, MultipartValue)>),
}
impl MultipartValue {
	/// Convenience constructor for nested values.
	pub fn nested<I, K, V>(entries: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<MultipartValue>,
	{
		Self::Nested(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}
}
impl From<&str> for MultipartValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_owned())
	}
}
impl From<String> for MultipartValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}
impl From<FileUpload> for MultipartValue {
	fn from(value: FileUpload) -> Self {
		Self::File(value)
	}
}

/// Part body; text and binary contents are kept apart so transports can pick encodings.
#[derive(Clone, PartialEq, Eq)]
pub enum PartContents {
	/// UTF-8 text body.
	Text(String),
	/// Binary body, typically a file.
	Bytes(Vec<u8>),
}
impl Debug for PartContents {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
			Self::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
		}
	}
}

/// Flattened multipart part ready for dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultipartPart {
	/// Field name, possibly bracketed (`tags[first]`).
	pub name: String,
	/// Part body.
	pub contents: PartContents,
	/// Original file name for file parts.
	pub filename: Option<String>,
}
impl MultipartPart {
	/// Creates a text part without a file name.
	pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self { name: name.into(), contents: PartContents::Text(value.into()), filename: None }
	}
}

/// Flattens one caller entry into wire parts.
///
/// Top-level nested maps emit one part per entry (`name[sub]`); anything deeper contributes
/// only its first entry (`name[sub][first]`).
pub(crate) fn flatten(name: &str, value: MultipartValue) -> Vec<MultipartPart> {
	match value {
		MultipartValue::Nested(entries) => entries
			.into_iter()
			.filter_map(|(sub, inner)| first_leaf(format!("{name}[{sub}]"), inner))
			.collect(),
		leaf => first_leaf(name.to_owned(), leaf).into_iter().collect(),
	}
}

fn first_leaf(mut name: String, mut value: MultipartValue) -> Option<MultipartPart> {
	loop {
		match value {
			MultipartValue::Text(text) => return Some(MultipartPart::text(name, text)),
			MultipartValue::File(file) =>
				return Some(MultipartPart {
					name,
					contents: PartContents::Bytes(file.contents),
					filename: Some(file.filename),
				}),
			MultipartValue::Nested(entries) => {
				let (sub, inner) = entries.into_iter().next()?;

				name = format!("{name}[{sub}]");
				value = inner;
			},
		}
	}
}
