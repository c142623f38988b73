//! Character encoding policy for DBF text fields.
//!
//! DBF files predate Unicode; character values are stored in a single-byte
//! codepage. Which codepage, and what happens to characters the codepage
//! cannot represent, is an explicit choice made per table instead of a silent
//! default.

use encoding_rs::{Encoding, WINDOWS_1252};

use crate::file::DbfError;

/// What to do with characters the target codepage cannot represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodingPolicy {
	/// Fail with [`DbfError::Unencodable`], naming the offending character
	#[default]
	Strict,

	/// Substitute `?` for each unmappable character
	Replace,
}

/// Codepage and replacement policy used to encode character field values.
///
/// The default is windows-1252 with the [`Strict`](EncodingPolicy::Strict)
/// policy, the common "ANSI" codepage of DBF-producing tools.
///
/// # Examples
///
/// ```
/// use dbase_types::file::dbf::{CharacterEncoding, EncodingPolicy};
///
/// let ansi = CharacterEncoding::default();
/// assert_eq!(ansi.name(), "windows-1252");
///
/// let dos_cyrillic = CharacterEncoding::for_label("ibm866", EncodingPolicy::Replace).unwrap();
/// assert_eq!(dos_cyrillic.name(), "IBM866");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CharacterEncoding {
	encoding: &'static Encoding,
	policy: EncodingPolicy,
}

impl CharacterEncoding {
	/// Resolves an encoding by WHATWG label (`"windows-1252"`, `"ibm866"`, ...)
	///
	/// # Errors
	///
	/// Returns [`DbfError::UnknownEncoding`] when no encoding is registered
	/// under the label.
	pub fn for_label(label: &str, policy: EncodingPolicy) -> Result<Self, DbfError> {
		let encoding =
			Encoding::for_label(label.as_bytes()).ok_or_else(|| DbfError::UnknownEncoding {
				label: label.to_string(),
			})?;
		Ok(Self { encoding, policy })
	}

	/// Creates the windows-1252 encoding with the given policy
	pub fn windows_1252(policy: EncodingPolicy) -> Self {
		Self {
			encoding: WINDOWS_1252,
			policy,
		}
	}

	/// Canonical name of the underlying encoding
	pub fn name(&self) -> &'static str {
		self.encoding.name()
	}

	/// The policy applied to unmappable characters
	pub fn policy(&self) -> EncodingPolicy {
		self.policy
	}

	/// Encodes `text` into the codepage, applying the replacement policy.
	///
	/// `field` only labels the error when encoding fails.
	pub(crate) fn encode(&self, field: &str, text: &str) -> Result<Vec<u8>, DbfError> {
		let (bytes, _, had_errors) = self.encoding.encode(text);
		if !had_errors {
			return Ok(bytes.into_owned());
		}

		match self.policy {
			EncodingPolicy::Strict => Err(DbfError::Unencodable {
				field: field.to_string(),
				character: self.first_unmappable(text),
				encoding: self.encoding.name(),
			}),
			EncodingPolicy::Replace => {
				// Re-encode character by character; encoding_rs would otherwise
				// substitute numeric character references of varying width.
				let mut out = Vec::with_capacity(text.len());
				let mut utf8 = [0u8; 4];
				for character in text.chars() {
					let (bytes, _, failed) = self.encoding.encode(character.encode_utf8(&mut utf8));
					if failed {
						out.push(b'?');
					} else {
						out.extend_from_slice(&bytes);
					}
				}
				Ok(out)
			}
		}
	}

	fn first_unmappable(&self, text: &str) -> char {
		let mut utf8 = [0u8; 4];
		text.chars()
			.find(|character| {
				let (_, _, failed) = self.encoding.encode(character.encode_utf8(&mut utf8));
				failed
			})
			.unwrap_or(char::REPLACEMENT_CHARACTER)
	}
}

impl Default for CharacterEncoding {
	fn default() -> Self {
		Self::windows_1252(EncodingPolicy::Strict)
	}
}
