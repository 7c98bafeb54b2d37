//! Line parser for dictionaries in "Radiator format".
//!
//! The format is one directive per line, fields separated by whitespace.
//! Blank lines and lines starting with `#` are ignored. Five directives are
//! recognized (case-insensitively): `ATTRIBUTE`, `VALUE`, `VENDOR`,
//! `VENDORATTR` and `$INCLUDE`. Parsing is a single sequential scan;
//! `$INCLUDE` recurses synchronously into the named file, writing into the
//! same dictionary, before the including file continues.

use std::{
    collections::HashSet,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    str::FromStr,
};

use tracing::{debug, trace};

use crate::dictionary::{AttributeKind, AttributeType, Dictionary, Error, SyntaxErrorKind};


/// Attribute code reserved by RFC 2865 for the Vendor-Specific container.
///
/// An `ATTRIBUTE` line declaring this code always gets
/// [`AttributeKind::VendorSpecific`], whatever its type field says.
pub const VENDOR_SPECIFIC: u16 = 26;

/// Parses a dictionary source into a fresh dictionary.
pub fn parse<R: BufRead>(reader: R) -> Result<Dictionary, Error> {
    let mut dictionary = Dictionary::new();
    parse_into(reader, &mut dictionary)?;
    Ok(dictionary)
}

/// Parses a dictionary source into a caller-supplied dictionary.
///
/// Definitions merge into `dictionary` with last-write-wins semantics. On
/// error the dictionary holds everything registered before the fault and
/// should be treated as partial.
pub fn parse_into<R: BufRead>(reader: R, dictionary: &mut Dictionary) -> Result<(), Error> {
    Parser {
        dictionary,
        active_includes: HashSet::new(),
    }
    .run(reader)
}

/// Parses a dictionary file into a fresh dictionary.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Dictionary, Error> {
    let mut dictionary = Dictionary::new();
    parse_file_into(path, &mut dictionary)?;
    Ok(dictionary)
}

/// Parses a dictionary file into a caller-supplied dictionary.
///
/// The top-level file takes part in include cycle detection, so a file that
/// `$INCLUDE`s itself (directly or through a chain) is reported as a cycle.
pub fn parse_file_into(path: impl AsRef<Path>, dictionary: &mut Dictionary) -> Result<(), Error> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut parser = Parser {
        dictionary,
        active_includes: HashSet::new(),
    };
    if let Ok(canonical) = path.canonicalize() {
        parser.active_includes.insert(canonical);
    }
    parser.run(BufReader::new(file))?;
    debug!("loaded dictionary file {}", path.display());
    Ok(())
}

/// Parser state threaded through recursive includes.
struct Parser<'a> {
    dictionary: &'a mut Dictionary,
    /// Canonical paths of files currently being parsed, for cycle detection
    active_includes: HashSet<PathBuf>,
}

impl Parser<'_> {
    fn run<R: BufRead>(&mut self, reader: R) -> Result<(), Error> {
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            let line_num = index as u32 + 1;

            // ignore comments and blank lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let tokens: Vec<&str> = line.split_whitespace().collect();
            let Some((directive, args)) = tokens.split_first() else {
                continue;
            };

            if directive.eq_ignore_ascii_case("ATTRIBUTE") {
                self.attribute_line(args, line_num)?;
            } else if directive.eq_ignore_ascii_case("VALUE") {
                self.value_line(args, line_num)?;
            } else if directive.eq_ignore_ascii_case("VENDORATTR") {
                self.vendor_attribute_line(args, line_num)?;
            } else if directive.eq_ignore_ascii_case("VENDOR") {
                self.vendor_line(args, line_num)?;
            } else if directive.eq_ignore_ascii_case("$INCLUDE") {
                self.include_file(args, line_num)?;
            } else {
                return Err(Error::Syntax {
                    line: line_num,
                    kind: SyntaxErrorKind::UnknownLineType((*directive).to_string()),
                });
            }
        }
        Ok(())
    }

    /// `ATTRIBUTE <name> <code> <type>`
    fn attribute_line(&mut self, args: &[&str], line_num: u32) -> Result<(), Error> {
        let [name, code, type_name] = expect_args("ATTRIBUTE", args, line_num)?;
        let code = parse_number(code, line_num)?;

        // code 26 always denotes the Vendor-Specific container, whatever
        // type the dictionary claims
        let kind = if code == VENDOR_SPECIFIC {
            AttributeKind::VendorSpecific
        } else {
            AttributeKind::from_type_name(type_name)
        };

        trace!("ATTRIBUTE {name} {code} {kind:?}");
        self.dictionary
            .add_attribute(AttributeType::new(code, name, kind));
        Ok(())
    }

    /// `VALUE <attributeName> <enumName> <value>`
    fn value_line(&mut self, args: &[&str], line_num: u32) -> Result<(), Error> {
        let [attribute_name, enum_name, value] = expect_args("VALUE", args, line_num)?;
        let value = parse_number(value, line_num)?;

        let Some(attribute_type) = self.dictionary.attribute_by_name_mut(attribute_name) else {
            return Err(Error::UnknownAttributeType {
                name: attribute_name.to_string(),
                line: line_num,
            });
        };
        trace!("VALUE {attribute_name} {enum_name} {value}");
        attribute_type.add_enumeration_value(value, enum_name);
        Ok(())
    }

    /// `VENDORATTR <vendorId> <name> <code> <type>`
    fn vendor_attribute_line(&mut self, args: &[&str], line_num: u32) -> Result<(), Error> {
        let [vendor_id, name, code, type_name] = expect_args("VENDORATTR", args, line_num)?;
        let vendor_id = parse_number(vendor_id, line_num)?;
        let code = parse_number(code, line_num)?;
        let kind = AttributeKind::from_type_name(type_name);

        trace!("VENDORATTR {vendor_id} {name} {code} {kind:?}");
        self.dictionary
            .add_attribute(AttributeType::vendor_specific(vendor_id, code, name, kind));
        Ok(())
    }

    /// `VENDOR <vendorId> <vendorName>`
    fn vendor_line(&mut self, args: &[&str], line_num: u32) -> Result<(), Error> {
        let [vendor_id, vendor_name] = expect_args("VENDOR", args, line_num)?;
        let vendor_id = parse_number(vendor_id, line_num)?;

        trace!("VENDOR {vendor_id} {vendor_name}");
        self.dictionary.add_vendor(vendor_id, vendor_name);
        Ok(())
    }

    /// `$INCLUDE <filePath>`
    ///
    /// The path is resolved as written, relative paths against the process
    /// working directory. The included file's own error messages restart
    /// line numbering at 1; lines after the include continue once the
    /// included parse returns.
    fn include_file(&mut self, args: &[&str], line_num: u32) -> Result<(), Error> {
        let [path] = expect_args("$INCLUDE", args, line_num)?;
        let path = Path::new(path);

        let canonical = path.canonicalize().map_err(|source| Error::Include {
            path: path.to_path_buf(),
            line: line_num,
            source,
        })?;
        if !self.active_includes.insert(canonical.clone()) {
            return Err(Error::IncludeCycle {
                path: canonical,
                line: line_num,
            });
        }

        debug!("including dictionary file {}", path.display());
        let result = File::open(path)
            .map_err(|source| Error::Include {
                path: path.to_path_buf(),
                line: line_num,
                source,
            })
            .and_then(|file| self.run(BufReader::new(file)));

        self.active_includes.remove(&canonical);
        result
    }
}

/// Checks a directive's argument count, returning the arguments as a
/// fixed-size array.
fn expect_args<'a, const N: usize>(
    directive: &'static str,
    args: &[&'a str],
    line_num: u32,
) -> Result<[&'a str; N], Error> {
    <[&'a str; N]>::try_from(args).map_err(|_| Error::Syntax {
        line: line_num,
        kind: SyntaxErrorKind::WrongArgCount {
            directive,
            expected: N,
            found: args.len(),
        },
    })
}

/// Parses a numeric token, reporting a syntax error on failure.
fn parse_number<T: FromStr>(token: &str, line_num: u32) -> Result<T, Error> {
    token.parse().map_err(|_| Error::Syntax {
        line: line_num,
        kind: SyntaxErrorKind::InvalidNumber(token.to_string()),
    })
}
