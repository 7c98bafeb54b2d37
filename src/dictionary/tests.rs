use std::{env, fs, path::PathBuf};

use assert_matches::assert_matches;
use uuid::Uuid;

use super::*;

struct TestDir {
    path: PathBuf,
}

impl TestDir {
    fn new() -> TestDir {
        let path = env::temp_dir().join(Uuid::new_v4().hyphenated().to_string());
        fs::create_dir(&path).unwrap_or_else(|err| {
            panic!("Failed to create temporary directory {}: {err}", path.display())
        });
        TestDir { path }
    }

    fn write(&self, file_name: &str, data: &str) -> PathBuf {
        let path = self.path.join(file_name);
        fs::write(&path, data)
            .unwrap_or_else(|err| panic!("Failed to write temporary file {}: {err}", path.display()));
        path
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_dir_all(&self.path) {
            eprintln!(
                "Warning: Failed to clean up temporary directory {}: {err}",
                self.path.display(),
            );
        }
    }
}

// AttributeKind tests

#[test]
fn test_type_name_resolution() {
    assert_eq!(AttributeKind::from_type_name("string"), AttributeKind::String);
    assert_eq!(AttributeKind::from_type_name("octets"), AttributeKind::Octets);
    assert_eq!(
        AttributeKind::from_type_name("integer"),
        AttributeKind::Integer
    );
    assert_eq!(AttributeKind::from_type_name("date"), AttributeKind::Integer);
    assert_eq!(AttributeKind::from_type_name("ipaddr"), AttributeKind::IpAddr);
}

#[test]
fn test_type_name_resolution_is_case_insensitive() {
    assert_eq!(AttributeKind::from_type_name("STRING"), AttributeKind::String);
    assert_eq!(AttributeKind::from_type_name("IpAddr"), AttributeKind::IpAddr);
    assert_eq!(AttributeKind::from_type_name("DATE"), AttributeKind::Integer);
}

#[test]
fn test_unrecognized_type_name_falls_back_to_octets() {
    assert_eq!(AttributeKind::from_type_name("abinary"), AttributeKind::Octets);
    assert_eq!(AttributeKind::from_type_name("tlv"), AttributeKind::Octets);
    assert_eq!(AttributeKind::from_type_name(""), AttributeKind::Octets);
}

// AttributeType tests

#[test]
fn test_enumeration_lookup_in_both_directions() {
    let mut attribute_type = AttributeType::new(6, "Service-Type", AttributeKind::Integer);
    attribute_type.add_enumeration_value(1, "Login-User");
    attribute_type.add_enumeration_value(2, "Framed-User");

    assert_eq!(attribute_type.enumeration_name(1), Some("Login-User"));
    assert_eq!(attribute_type.enumeration_name(3), None);
    assert_eq!(attribute_type.enumeration_value("Framed-User"), Some(2));
    assert_eq!(attribute_type.enumeration_value("Nobody"), None);
    assert_eq!(attribute_type.enumeration().count(), 2);
}

#[test]
fn test_enumeration_rebinding_replaces_earlier_name() {
    let mut attribute_type = AttributeType::new(6, "Service-Type", AttributeKind::Integer);
    attribute_type.add_enumeration_value(1, "Old-Name");
    attribute_type.add_enumeration_value(1, "New-Name");

    assert_eq!(attribute_type.enumeration_name(1), Some("New-Name"));
    assert_eq!(attribute_type.enumeration_value("Old-Name"), None);
}

// Dictionary tests

#[test]
fn test_attribute_lookup_by_name_and_code() {
    let mut dictionary = Dictionary::new();
    dictionary.add_attribute(AttributeType::new(1, "User-Name", AttributeKind::String));

    let by_name = dictionary.attribute_by_name("User-Name").unwrap();
    assert_eq!(by_name.code(), 1);
    assert_eq!(by_name.kind(), AttributeKind::String);
    assert_eq!(by_name.vendor_id(), None);

    let by_code = dictionary.attribute_by_code(1).unwrap();
    assert_eq!(by_code.name(), "User-Name");

    assert!(dictionary.attribute_by_name("Unknown").is_none());
    assert!(dictionary.attribute_by_code(99).is_none());
}

#[test]
fn test_later_registration_replaces_earlier() {
    let mut dictionary = Dictionary::new();
    dictionary.add_attribute(AttributeType::new(1, "Foo", AttributeKind::Integer));
    dictionary.add_attribute(AttributeType::new(7, "Foo", AttributeKind::IpAddr));

    let foo = dictionary.attribute_by_name("Foo").unwrap();
    assert_eq!(foo.code(), 7);
    assert_eq!(foo.kind(), AttributeKind::IpAddr);
    assert_eq!(dictionary.attribute_by_code(7).unwrap().name(), "Foo");
}

#[test]
fn test_rebinding_a_name_drops_its_old_code_entry() {
    let mut dictionary = Dictionary::new();
    dictionary.add_attribute(AttributeType::new(1, "Foo", AttributeKind::Integer));
    dictionary.add_attribute(AttributeType::new(7, "Foo", AttributeKind::IpAddr));

    // the old code must not resolve to an attribute carrying the new code
    assert!(dictionary.attribute_by_code(1).is_none());
    assert_eq!(dictionary.attribute_by_code(7).unwrap().code(), 7);
}

#[test]
fn test_code_lookup_stays_consistent_after_reparse() {
    let mut dictionary = Dictionary::new();
    parser::parse_into(
        "ATTRIBUTE Foo 1 integer\nATTRIBUTE Foo 7 ipaddr\n".as_bytes(),
        &mut dictionary,
    )
    .unwrap();

    assert!(dictionary.attribute_by_code(1).is_none());
    let foo = dictionary.attribute_by_code(7).unwrap();
    assert_eq!(foo.name(), "Foo");
    assert_eq!(foo.kind(), AttributeKind::IpAddr);
}

#[test]
fn test_vendor_namespace_is_created_lazily() {
    let mut dictionary = Dictionary::new();
    // VENDORATTR may legally precede the VENDOR declaration
    dictionary.add_attribute(AttributeType::vendor_specific(
        9,
        5,
        "Widget",
        AttributeKind::String,
    ));

    let widget = dictionary.vendor_attribute_by_name(9, "Widget").unwrap();
    assert_eq!(widget.code(), 5);
    assert_eq!(widget.vendor_id(), Some(9));
    assert!(dictionary.vendor_name(9).is_none());

    dictionary.add_vendor(9, "Acme");
    assert_eq!(dictionary.vendor_name(9), Some("Acme"));
}

#[test]
fn test_vendor_scoped_attributes_are_absent_from_base_namespace() {
    let mut dictionary = Dictionary::new();
    dictionary.add_vendor(9, "Acme");
    dictionary.add_attribute(AttributeType::vendor_specific(
        9,
        5,
        "Widget",
        AttributeKind::String,
    ));

    assert!(dictionary.attribute_by_name("Widget").is_none());
    assert!(dictionary.attribute_by_code(5).is_none());
    assert!(dictionary.vendor_attribute_by_code(9, 5).is_some());
    // other vendors' namespaces stay disjoint
    assert!(dictionary.vendor_attribute_by_code(311, 5).is_none());
}

#[test]
fn test_vendor_name_and_id_lookup() {
    let mut dictionary = Dictionary::new();
    dictionary.add_vendor(9, "Cisco");
    dictionary.add_vendor(311, "Microsoft");

    assert_eq!(dictionary.vendor_name(311), Some("Microsoft"));
    assert_eq!(dictionary.vendor_id("Cisco"), Some(9));
    assert_eq!(dictionary.vendor_id("Nobody"), None);
    assert_eq!(dictionary.vendors().count(), 2);
}

#[test]
fn test_iterators() {
    let mut dictionary = Dictionary::new();
    dictionary.add_attribute(AttributeType::new(1, "User-Name", AttributeKind::String));
    dictionary.add_attribute(AttributeType::new(5, "NAS-Port", AttributeKind::Integer));
    dictionary.add_vendor(9, "Cisco");
    dictionary.add_attribute(AttributeType::vendor_specific(
        9,
        1,
        "Cisco-AVPair",
        AttributeKind::String,
    ));

    assert_eq!(dictionary.attributes().count(), 2);
    assert_eq!(dictionary.vendor_attributes(9).count(), 1);
    assert_eq!(dictionary.vendor_attributes(311).count(), 0);
}

// Default dictionary tests

#[test]
fn test_default_dictionary_contains_core_attributes() {
    let dictionary = Dictionary::default_dictionary().unwrap();

    let user_name = dictionary.attribute_by_name("User-Name").unwrap();
    assert_eq!(user_name.code(), 1);
    assert_eq!(user_name.kind(), AttributeKind::String);

    // the Vendor-Specific container overrides its declared type
    let vendor_specific = dictionary.attribute_by_code(26).unwrap();
    assert_eq!(vendor_specific.name(), "Vendor-Specific");
    assert_eq!(vendor_specific.kind(), AttributeKind::VendorSpecific);

    // `date` resolves to the integer kind
    let event_timestamp = dictionary.attribute_by_name("Event-Timestamp").unwrap();
    assert_eq!(event_timestamp.kind(), AttributeKind::Integer);

    let service_type = dictionary.attribute_by_name("Service-Type").unwrap();
    assert_eq!(service_type.enumeration_name(6), Some("Administrative-User"));
    assert_eq!(service_type.enumeration_value("Framed-User"), Some(2));

    assert_eq!(dictionary.vendor_name(311), Some("Microsoft"));
    assert_eq!(dictionary.vendor_id("WISPr"), Some(14122));
    let avpair = dictionary.vendor_attribute_by_code(9, 1).unwrap();
    assert_eq!(avpair.name(), "Cisco-AVPair");
}

#[test]
fn test_default_dictionary_instances_are_independent() {
    let first = Dictionary::default_dictionary().unwrap();
    let mut second = Dictionary::default_dictionary().unwrap();
    assert_eq!(first, second);

    second.add_attribute(AttributeType::new(200, "Local-Attr", AttributeKind::Octets));
    assert_ne!(first, second);
    assert!(first.attribute_by_name("Local-Attr").is_none());
}

// DictionaryBuilder tests

#[test]
fn test_builder_composes_files_in_order() {
    let test_dir = TestDir::new();
    let base = test_dir.write(
        "base.dict",
        "ATTRIBUTE Foo 1 integer\nATTRIBUTE Bar 2 string\n",
    );
    let overlay = test_dir.write("overlay.dict", "ATTRIBUTE Foo 1 ipaddr\n");

    let dictionary = DictionaryBuilder::new()
        .with_files([base, overlay])
        .build()
        .unwrap();

    // later files win
    assert_eq!(
        dictionary.attribute_by_name("Foo").unwrap().kind(),
        AttributeKind::IpAddr
    );
    assert_eq!(dictionary.attribute_by_name("Bar").unwrap().code(), 2);
}

#[test]
fn test_builder_without_sources_yields_empty_dictionary() {
    let dictionary = DictionaryBuilder::new().build().unwrap();
    assert_eq!(dictionary, Dictionary::new());
}

#[test]
fn test_builder_reports_unreadable_file() {
    let test_dir = TestDir::new();
    let missing = test_dir.path.join("missing.dict");

    let result = DictionaryBuilder::new().with_file(missing).build();
    assert_matches!(result, Err(Error::Io(_)));
}

#[test]
fn test_builder_with_default_dictionary() {
    let test_dir = TestDir::new();
    let local = test_dir.write("local.dict", "ATTRIBUTE User-Name 1 octets\n");

    let dictionary = DictionaryBuilder::new()
        .with_default_dictionary(true)
        .with_file(local)
        .build()
        .unwrap();

    // local file overrides the bundled definition
    assert_eq!(
        dictionary.attribute_by_name("User-Name").unwrap().kind(),
        AttributeKind::Octets
    );
    // untouched bundled definitions remain
    assert!(dictionary.attribute_by_name("Acct-Status-Type").is_some());
}
