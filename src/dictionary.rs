//! Core dictionary implementation and data structures.
//!
//! This module provides the registry populated by dictionary parsing, including:
//! - The `Dictionary` struct for looking up attributes by name or code
//! - The `AttributeType` and `AttributeKind` type descriptors
//! - The `DictionaryBuilder` for composing dictionaries from multiple files
//! - Error handling for dictionary operations

use std::{collections::HashMap, io, path::PathBuf};

use crate::parser;

#[cfg(test)]
mod tests;

/// Contents of the bundled default dictionary, see
/// [`Dictionary::default_dictionary`].
const DEFAULT_DICTIONARY: &str = include_str!("../dictionaries/default.dict");

/// Errors that can occur while parsing a dictionary.
///
/// Every error is fatal: parsing stops at the first fault and the dictionary
/// written so far must be treated as partial. Line numbers are 1-based and
/// local to the file in which the fault occurred; included files restart at
/// line 1 and syntax errors carry no file name context.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input/output error while reading a dictionary source
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Malformed dictionary line
    #[error("syntax error on line {line}: {kind}")]
    Syntax {
        /// 1-based line number within the current source
        line: u32,
        /// What exactly was wrong with the line
        kind: SyntaxErrorKind,
    },

    /// A `VALUE` line referenced an attribute that has not been declared
    /// in the base namespace
    #[error("unknown attribute type {name:?} on line {line}")]
    UnknownAttributeType { name: String, line: u32 },

    /// An `$INCLUDE` target does not exist or cannot be opened
    #[error("included file {path:?} cannot be opened (line {line}): {source}")]
    Include {
        path: PathBuf,
        line: u32,
        source: io::Error,
    },

    /// An `$INCLUDE` target is already being parsed further up the include
    /// chain
    #[error("include cycle detected: {path:?} included again on line {line}")]
    IncludeCycle { path: PathBuf, line: u32 },
}

/// Detailed cause of a [`Error::Syntax`] fault.
#[derive(Debug, thiserror::Error)]
pub enum SyntaxErrorKind {
    /// The first token on the line is not a known directive
    #[error("unknown line type {0:?}")]
    UnknownLineType(String),

    /// A recognized directive was followed by the wrong number of tokens
    #[error("{directive} expects {expected} arguments, got {found}")]
    WrongArgCount {
        directive: &'static str,
        expected: usize,
        found: usize,
    },

    /// A numeric field did not parse as an integer
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
}

/// The semantic kind of an attribute's value.
///
/// RADIUS dictionaries assign each attribute one of a closed set of value
/// kinds which downstream encode/decode logic switches on. The reserved
/// `VendorSpecific` kind marks the container attribute (code 26) that wraps
/// vendor-scoped sub-attributes on the wire rather than a leaf value.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AttributeKind {
    /// Raw octets with no further interpretation
    Octets,
    /// Printable text
    String,
    /// Unsigned 32-bit integer (also used for `date` values)
    Integer,
    /// IPv4 address
    IpAddr,
    /// The Vendor-Specific container attribute
    VendorSpecific,
}

impl AttributeKind {
    /// Resolves a dictionary type name to an attribute kind.
    ///
    /// Matching is case-insensitive. Unrecognized names fall back to
    /// [`AttributeKind::Octets`] rather than failing, so dictionaries using
    /// exotic type names still load.
    ///
    /// ```
    /// use radius_dictionary::AttributeKind;
    ///
    /// assert_eq!(AttributeKind::from_type_name("STRING"), AttributeKind::String);
    /// assert_eq!(AttributeKind::from_type_name("date"), AttributeKind::Integer);
    /// assert_eq!(AttributeKind::from_type_name("abinary"), AttributeKind::Octets);
    /// ```
    pub fn from_type_name(type_name: &str) -> AttributeKind {
        if type_name.eq_ignore_ascii_case("string") {
            AttributeKind::String
        } else if type_name.eq_ignore_ascii_case("octets") {
            AttributeKind::Octets
        } else if type_name.eq_ignore_ascii_case("integer")
            || type_name.eq_ignore_ascii_case("date")
        {
            AttributeKind::Integer
        } else if type_name.eq_ignore_ascii_case("ipaddr") {
            AttributeKind::IpAddr
        } else {
            AttributeKind::Octets
        }
    }
}

/// A single named, coded attribute definition.
///
/// Attributes declared with `ATTRIBUTE` live in the base namespace and carry
/// no vendor id; attributes declared with `VENDORATTR` are scoped to a
/// vendor's own code space. Enumerated value labels attached by `VALUE`
/// lines accumulate in the `enumeration` map.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttributeType {
    /// On-wire attribute code, scoped to the owning namespace
    code: u16,

    /// Human-readable name, the lookup key used by `VALUE` lines
    name: String,

    /// The semantic value kind of this attribute
    kind: AttributeKind,

    /// Owning vendor id, `None` for the base namespace
    vendor_id: Option<u32>,

    /// Symbolic names for enumerated values, keyed by integer value
    enumeration: HashMap<u32, String>,
}

impl AttributeType {
    /// Creates an attribute definition in the base namespace
    pub fn new(code: u16, name: impl Into<String>, kind: AttributeKind) -> AttributeType {
        AttributeType {
            code,
            name: name.into(),
            kind,
            vendor_id: None,
            enumeration: HashMap::new(),
        }
    }

    /// Creates an attribute definition scoped to the given vendor's namespace
    pub fn vendor_specific(
        vendor_id: u32,
        code: u16,
        name: impl Into<String>,
        kind: AttributeKind,
    ) -> AttributeType {
        AttributeType {
            code,
            name: name.into(),
            kind,
            vendor_id: Some(vendor_id),
            enumeration: HashMap::new(),
        }
    }

    /// Returns the on-wire code of this attribute
    pub fn code(&self) -> u16 {
        self.code
    }

    /// Returns the name of this attribute
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the semantic value kind of this attribute
    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    /// Returns the owning vendor id, or `None` for base namespace attributes
    pub fn vendor_id(&self) -> Option<u32> {
        self.vendor_id
    }

    /// Binds a symbolic name to one integer value of this attribute.
    ///
    /// A later binding for the same integer value replaces the earlier one.
    pub fn add_enumeration_value(&mut self, value: u32, name: impl Into<String>) {
        self.enumeration.insert(value, name.into());
    }

    /// Looks up the symbolic name bound to an integer value
    pub fn enumeration_name(&self, value: u32) -> Option<&str> {
        self.enumeration.get(&value).map(|name| name.as_str())
    }

    /// Looks up the integer value bound to a symbolic name
    pub fn enumeration_value(&self, name: &str) -> Option<u32> {
        self.enumeration
            .iter()
            .find(|(_, enum_name)| enum_name.as_str() == name)
            .map(|(value, _)| *value)
    }

    /// Returns an iterator over all (value, symbolic name) bindings
    pub fn enumeration(&self) -> impl Iterator<Item = (u32, &str)> {
        self.enumeration
            .iter()
            .map(|(value, name)| (*value, name.as_str()))
    }
}

/// One attribute namespace: the base namespace, or a single vendor's code
/// space.
///
/// Insertion is last-write-wins for both the name and the code index, plain
/// map-insert semantics. The format itself never rejects duplicates.
#[derive(Clone, Debug, Default, PartialEq)]
struct Namespace {
    types_by_name: HashMap<String, AttributeType>,
    names_by_code: HashMap<u16, String>,
}

impl Namespace {
    fn insert(&mut self, attribute_type: AttributeType) {
        // drop the stale code index entry when a name is re-registered
        // under a different code
        if let Some(previous) = self.types_by_name.get(&attribute_type.name) {
            if previous.code != attribute_type.code {
                self.names_by_code.remove(&previous.code);
            }
        }
        self.names_by_code
            .insert(attribute_type.code, attribute_type.name.clone());
        self.types_by_name
            .insert(attribute_type.name.clone(), attribute_type);
    }

    fn by_name(&self, name: &str) -> Option<&AttributeType> {
        self.types_by_name.get(name)
    }

    fn by_name_mut(&mut self, name: &str) -> Option<&mut AttributeType> {
        self.types_by_name.get_mut(name)
    }

    fn by_code(&self, code: u16) -> Option<&AttributeType> {
        self.names_by_code
            .get(&code)
            .and_then(|name| self.types_by_name.get(name))
    }
}

/// The registry populated by dictionary parsing.
///
/// A `Dictionary` holds the base attribute namespace, the vendor id/name
/// table, and one disjoint sub-namespace per vendor. It is created empty (or
/// supplied by the caller for merging), grows monotonically while parsing,
/// and offers no deletion. Access is single-writer: one parse mutates one
/// dictionary at a time, no internal locking is provided.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dictionary {
    /// The base (non-vendor) attribute namespace
    base: Namespace,

    /// Vendor names indexed by vendor id
    vendor_names: HashMap<u32, String>,

    /// Per-vendor attribute namespaces, created lazily
    vendor_namespaces: HashMap<u32, Namespace>,
}

impl Dictionary {
    /// Creates an empty dictionary
    pub fn new() -> Dictionary {
        Dictionary::default()
    }

    /// Returns a dictionary populated from the bundled default dictionary.
    ///
    /// The bundled file covers the common RFC 2865/2866 attributes plus a
    /// few well-known vendor blocks. Every call parses a fresh, independent
    /// instance; there is no shared global dictionary.
    pub fn default_dictionary() -> Result<Dictionary, Error> {
        parser::parse(DEFAULT_DICTIONARY.as_bytes())
    }

    /// Inserts an attribute definition.
    ///
    /// The definition is routed to the base namespace or, when it carries a
    /// vendor id, to that vendor's namespace. The vendor namespace is created
    /// on first use, so a `VENDORATTR` line may legally precede its `VENDOR`
    /// declaration. A definition with an already registered name or code
    /// replaces the earlier entry.
    pub fn add_attribute(&mut self, attribute_type: AttributeType) {
        match attribute_type.vendor_id {
            Some(vendor_id) => self
                .vendor_namespaces
                .entry(vendor_id)
                .or_default()
                .insert(attribute_type),
            None => self.base.insert(attribute_type),
        }
    }

    /// Registers a vendor id/name pair and ensures its namespace exists.
    ///
    /// Registering an id again overwrites the stored name.
    pub fn add_vendor(&mut self, vendor_id: u32, vendor_name: impl Into<String>) {
        self.vendor_names.insert(vendor_id, vendor_name.into());
        self.vendor_namespaces.entry(vendor_id).or_default();
    }

    /// Looks up a base namespace attribute by name
    pub fn attribute_by_name(&self, name: &str) -> Option<&AttributeType> {
        self.base.by_name(name)
    }

    /// Looks up a base namespace attribute by code
    pub fn attribute_by_code(&self, code: u16) -> Option<&AttributeType> {
        self.base.by_code(code)
    }

    /// Looks up a vendor-scoped attribute by name
    pub fn vendor_attribute_by_name(&self, vendor_id: u32, name: &str) -> Option<&AttributeType> {
        self.vendor_namespaces
            .get(&vendor_id)
            .and_then(|namespace| namespace.by_name(name))
    }

    /// Looks up a vendor-scoped attribute by code
    pub fn vendor_attribute_by_code(&self, vendor_id: u32, code: u16) -> Option<&AttributeType> {
        self.vendor_namespaces
            .get(&vendor_id)
            .and_then(|namespace| namespace.by_code(code))
    }

    /// Returns the name registered for a vendor id
    pub fn vendor_name(&self, vendor_id: u32) -> Option<&str> {
        self.vendor_names.get(&vendor_id).map(|name| name.as_str())
    }

    /// Returns the id of a vendor registered under the given name.
    ///
    /// Vendor names are not required to be unique; when several ids share a
    /// name, an arbitrary one of them is returned.
    pub fn vendor_id(&self, vendor_name: &str) -> Option<u32> {
        self.vendor_names
            .iter()
            .find(|(_, name)| name.as_str() == vendor_name)
            .map(|(vendor_id, _)| *vendor_id)
    }

    /// Returns an iterator over all base namespace attributes
    pub fn attributes(&self) -> impl Iterator<Item = &AttributeType> {
        self.base.types_by_name.values()
    }

    /// Returns an iterator over all attributes in one vendor's namespace.
    ///
    /// The iterator is empty for an unknown vendor id.
    pub fn vendor_attributes(&self, vendor_id: u32) -> impl Iterator<Item = &AttributeType> {
        self.vendor_namespaces
            .get(&vendor_id)
            .into_iter()
            .flat_map(|namespace| namespace.types_by_name.values())
    }

    /// Returns an iterator over all registered (vendor id, vendor name) pairs
    pub fn vendors(&self) -> impl Iterator<Item = (u32, &str)> {
        self.vendor_names
            .iter()
            .map(|(vendor_id, name)| (*vendor_id, name.as_str()))
    }

    /// Mutable base namespace lookup, used by `VALUE` line processing.
    ///
    /// `VALUE` lines only ever resolve names in the base namespace;
    /// vendor-scoped attributes are not addressable by this grammar.
    pub(crate) fn attribute_by_name_mut(&mut self, name: &str) -> Option<&mut AttributeType> {
        self.base.by_name_mut(name)
    }
}

/// Builder for composing a dictionary from multiple sources.
///
/// Files are parsed in the order they were added, into one shared dictionary,
/// so later files override earlier definitions with the same name or code.
/// This composes independent dictionary files without nesting them via
/// `$INCLUDE`.
#[derive(Debug, Default)]
pub struct DictionaryBuilder {
    /// Dictionary files to parse, in order
    paths: Vec<PathBuf>,

    /// Whether to seed the dictionary with the bundled defaults
    use_default_dictionary: bool,
}

impl DictionaryBuilder {
    /// Creates a new, empty builder
    ///
    /// Use the builder's methods to configure and then call `build()` to
    /// create the dictionary.
    pub fn new() -> DictionaryBuilder {
        DictionaryBuilder::default()
    }

    /// Sets whether to seed the dictionary with the bundled default
    /// dictionary before parsing any added files
    pub fn with_default_dictionary(mut self, use_default_dictionary: bool) -> Self {
        self.use_default_dictionary = use_default_dictionary;
        self
    }

    /// Adds a dictionary file to parse
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// Adds multiple dictionary files to parse
    pub fn with_files(mut self, paths: impl IntoIterator<Item = PathBuf>) -> Self {
        self.paths.extend(paths);
        self
    }

    /// Builds the dictionary from the configured sources.
    ///
    /// Parsing stops at the first error; a builder with no sources yields an
    /// empty dictionary.
    pub fn build(self) -> Result<Dictionary, Error> {
        let mut dictionary = if self.use_default_dictionary {
            Dictionary::default_dictionary()?
        } else {
            Dictionary::new()
        };

        for path in &self.paths {
            parser::parse_file_into(path, &mut dictionary)?;
        }

        Ok(dictionary)
    }
}
