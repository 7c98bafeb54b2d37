//! # radius-dictionary
//!
//! A crate for parsing and representing RADIUS attribute dictionaries.
//!
//! This crate parses dictionary files in the line-oriented "Radiator format"
//! into an in-memory registry that protocol encode/decode code consults to
//! translate between wire-format attribute codes and typed, named values.
//! It supports attribute declarations with data kinds, enumerated value
//! labels, vendor declarations, vendor-specific attribute sub-namespaces,
//! and recursive file inclusion via `$INCLUDE`.
//!
//! ## Features
//!
//! - Line-by-line parsing of Radiator format dictionaries
//! - Base and vendor-scoped attribute namespaces with name and code lookup
//! - Recursive `$INCLUDE` handling with cycle detection
//! - Bundled default dictionary covering the common RFC 2865/2866 attributes
//! - Builder pattern for composing multiple dictionary files
//! - Comprehensive error handling
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use radius_dictionary::DictionaryBuilder;
//!
//! // Start from the bundled defaults and overlay a site-specific dictionary
//! let dictionary = DictionaryBuilder::new()
//!     .with_default_dictionary(true)
//!     .with_file("path/to/dictionary.local")
//!     .build()
//!     .expect("Failed to parse dictionary");
//!
//! // Access attribute definitions
//! if let Some(attribute) = dictionary.attribute_by_name("User-Name") {
//!     println!("Attribute code: {}", attribute.code());
//! }
//!
//! // Access vendor-specific definitions
//! if let Some(attribute) = dictionary.vendor_attribute_by_code(9, 1) {
//!     println!("Vendor attribute: {}", attribute.name());
//! }
//! ```

mod dictionary;
mod parser;

// Re-export all public items from the dictionary module
pub use dictionary::{
    AttributeKind, AttributeType, Dictionary, DictionaryBuilder, Error, SyntaxErrorKind,
};
pub use parser::{VENDOR_SPECIFIC, parse, parse_file, parse_file_into, parse_into};
