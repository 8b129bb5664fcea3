//! Mapping file reader integration tests
//!
//! These tests drive the variant fallback chain end to end through
//! in-memory openers, so the number of streams opened per read can be
//! observed.

use std::io::{self, Cursor, Read};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use pretty_assertions::assert_eq;
use url::Url;

use ormxml::loaders::{ResourceOpener, ResourceStream};
use ormxml::mapping::{
    CacheCoordinationType, CacheType, CascadeType, DiscriminatorType, EnumType, FetchType,
    InheritanceType, LockModeType, TemporalType,
};
use ormxml::{
    read_mapping_file, ContextRegistry, Error, Limits, MappingReader, MemoryOpener, VariantId,
};

const ORM_2_0: &str = include_str!("fixtures/orm_2_0.xml");
const ORM_1_0: &str = include_str!("fixtures/orm_1_0.xml");
const ECLIPSELINK: &str = include_str!("fixtures/eclipselink_orm_1_1.xml");
const UNKNOWN_DIALECT: &str = include_str!("fixtures/unknown_dialect.xml");
const MALFORMED: &str = include_str!("fixtures/malformed.xml");
const LATIN1: &str = include_str!("fixtures/latin1.xml");
const ORM_2_0_BILLING: &str = include_str!("fixtures/orm_2_0_billing.xml");
const ORM_1_0_STAFF: &str = include_str!("fixtures/orm_1_0_staff.xml");
const ECLIPSELINK_FLEET: &str = include_str!("fixtures/eclipselink_orm_1_1_fleet.xml");

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn mem_url() -> Url {
    Url::parse("mem:///META-INF/orm.xml").unwrap()
}

fn memory_opener(content: impl Into<Vec<u8>>) -> Arc<MemoryOpener> {
    Arc::new(MemoryOpener::new().with_resource(mem_url(), content))
}

fn reader_for(opener: &Arc<MemoryOpener>) -> MappingReader {
    MappingReader::new()
        .with_opener(opener.clone())
        .with_registry(Arc::new(ContextRegistry::new()))
}

/// Opener whose streams fail to close a configurable number of times
#[derive(Debug)]
struct FailingCloseOpener {
    content: Vec<u8>,
    opened: AtomicUsize,
    failures_left: Arc<AtomicUsize>,
}

impl FailingCloseOpener {
    fn new(content: &str, failures: usize) -> Self {
        Self {
            content: content.as_bytes().to_vec(),
            opened: AtomicUsize::new(0),
            failures_left: Arc::new(AtomicUsize::new(failures)),
        }
    }
}

struct FailingCloseStream {
    cursor: Cursor<Vec<u8>>,
    failures_left: Arc<AtomicUsize>,
}

impl Read for FailingCloseStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl ResourceStream for FailingCloseStream {
    fn close(self: Box<Self>) -> io::Result<()> {
        let failed = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            Err(io::Error::new(io::ErrorKind::Other, "disk went away"))
        } else {
            Ok(())
        }
    }
}

impl ResourceOpener for FailingCloseOpener {
    fn open(&self, _url: &Url) -> ormxml::Result<Box<dyn ResourceStream>> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FailingCloseStream {
            cursor: Cursor::new(self.content.clone()),
            failures_left: Arc::clone(&self.failures_left),
        }))
    }
}

// ============================================================================
// Fallback order
// ============================================================================

#[test]
fn test_orm_2_0_succeeds_on_first_attempt() {
    let opener = memory_opener(ORM_2_0);
    let mappings = reader_for(&opener).read(&mem_url()).unwrap();

    assert_eq!(opener.opened(), 1);
    assert_eq!(mappings.schema_variant, Some(VariantId::Orm2_0));
    assert_eq!(mappings.version.as_deref(), Some("2.0"));
    assert_eq!(mappings.mapping_file(), Some(&mem_url()));

    assert_eq!(mappings.description.as_deref(), Some("Order management"));
    assert_eq!(mappings.package.as_deref(), Some("com.acme.orders"));
    assert_eq!(mappings.entities.len(), 2);
    assert_eq!(mappings.embeddables.len(), 1);

    let defaults = mappings
        .persistence_unit_metadata
        .as_ref()
        .and_then(|m| m.persistence_unit_defaults.as_ref())
        .unwrap();
    assert!(defaults.delimited_identifiers);
    assert!(defaults.cascade_persist);

    let query = &mappings.named_queries[0];
    assert_eq!(query.lock_mode, Some(LockModeType::Optimistic));
    assert_eq!(query.hints[0].value, "true");

    let order = mappings.entity("Order").unwrap();
    assert_eq!(order.cacheable, Some(true));
    assert_eq!(mappings.qualified_class_name(&order.class), "com.acme.orders.Order");

    let attributes = order.attributes.as_ref().unwrap();
    assert_eq!(attributes.len(), 7);
    assert_eq!(attributes.many_to_ones[0].fetch, Some(FetchType::Lazy));
    assert_eq!(attributes.one_to_manys[0].cascade, vec![CascadeType::All]);
    assert_eq!(attributes.element_collections[0].name, "tags");
}

#[test]
fn test_orm_1_0_succeeds_on_second_attempt() {
    let opener = memory_opener(ORM_1_0);
    let mappings = reader_for(&opener).read(&mem_url()).unwrap();

    assert_eq!(opener.opened(), 2);
    assert_eq!(mappings.schema_variant, Some(VariantId::Orm1_0));
    assert_eq!(mappings.version.as_deref(), Some("1.0"));

    let customer = mappings.entity("Customer").unwrap();
    assert_eq!(customer.table.as_ref().unwrap().schema.as_deref(), Some("CRM"));
    let orders = &customer.attributes.as_ref().unwrap().one_to_manys[0];
    assert_eq!(orders.cascade, vec![CascadeType::Persist, CascadeType::Merge]);
}

#[test]
fn test_eclipselink_succeeds_on_third_attempt() {
    let opener = memory_opener(ECLIPSELINK);
    let mappings = reader_for(&opener).read(&mem_url()).unwrap();

    assert_eq!(opener.opened(), 3);
    assert_eq!(mappings.schema_variant, Some(VariantId::EclipseLink1_1));
    assert_eq!(mappings.version.as_deref(), Some("1.1"));

    let converter = &mappings.object_type_converters[0];
    assert_eq!(converter.object_value("F"), Some("FEMALE"));
    assert_eq!(converter.object_value("X"), Some("UNKNOWN"));

    let product = mappings.entity("Product").unwrap();
    assert_eq!(product.read_only, Some(true));
    assert_eq!(
        product.customizer.as_deref(),
        Some("com.acme.catalog.ProductCustomizer")
    );
    assert_eq!(product.cache.as_ref().unwrap().cache_type, Some(CacheType::Soft));
    let basic = &product.attributes.as_ref().unwrap().basics[0];
    assert_eq!(basic.convert.as_deref(), Some("gender"));
}

#[test]
fn test_unknown_dialect_exhausts_every_variant() {
    let opener = memory_opener(UNKNOWN_DIALECT);
    let err = reader_for(&opener).read(&mem_url()).unwrap_err();

    assert_eq!(opener.opened(), 3);
    match err {
        Error::MappingFile {
            location,
            variant,
            source,
        } => {
            assert_eq!(location, mem_url().to_string());
            assert_eq!(variant, VariantId::EclipseLink1_1);
            assert!(matches!(*source, Error::Validation(_)), "got {:?}", source);
        }
        other => panic!("expected MappingFile error, got {:?}", other),
    }
}

#[test]
fn test_malformed_document_reports_last_parse_error() {
    let opener = memory_opener(MALFORMED);
    let err = reader_for(&opener).read(&mem_url()).unwrap_err();

    assert_eq!(opener.opened(), 3);
    match err {
        Error::MappingFile { source, .. } => assert!(matches!(*source, Error::Xml(_))),
        other => panic!("expected MappingFile error, got {:?}", other),
    }
}

#[test]
fn test_utf8_bom_is_accepted() {
    let mut content = vec![0xEF, 0xBB, 0xBF];
    content.extend_from_slice(ORM_2_0.as_bytes());
    let opener = memory_opener(content);

    let mappings = reader_for(&opener).read(&mem_url()).unwrap();
    assert_eq!(mappings.schema_variant, Some(VariantId::Orm2_0));
}

#[test]
fn test_oversized_document_falls_through_as_recoverable() {
    let opener = memory_opener(ORM_2_0);
    let reader = reader_for(&opener).with_limits(Limits {
        max_xml_size: 64,
        ..Limits::default()
    });

    let err = reader.read(&mem_url()).unwrap_err();
    assert_eq!(opener.opened(), 3);
    match err {
        Error::MappingFile { source, .. } => {
            assert!(matches!(*source, Error::LimitExceeded(_)))
        }
        other => panic!("expected MappingFile error, got {:?}", other),
    }
}

// ============================================================================
// Inheritance, listeners and overrides
// ============================================================================

#[test]
fn test_orm_2_0_inheritance_and_overrides() {
    let opener = memory_opener(ORM_2_0_BILLING);
    let mappings = reader_for(&opener).read(&mem_url()).unwrap();

    assert_eq!(opener.opened(), 1);
    assert_eq!(mappings.schema_variant, Some(VariantId::Orm2_0));

    let defaults = mappings
        .persistence_unit_metadata
        .as_ref()
        .and_then(|m| m.persistence_unit_defaults.as_ref())
        .unwrap();
    let audit = &defaults.entity_listeners[0];
    assert_eq!(audit.class, "com.acme.billing.AuditListener");
    assert_eq!(audit.callbacks.pre_update.as_deref(), Some("updated"));

    let totals = &mappings.sql_result_set_mappings[0];
    assert_eq!(totals.name, "InvoiceTotals");
    assert_eq!(totals.entity_results[0].field_results[0].column, "ID");
    assert_eq!(
        mappings.named_native_queries[0].result_set_mapping.as_deref(),
        Some("InvoiceTotals")
    );

    let auditable = &mappings.mapped_superclasses[0];
    assert_eq!(auditable.callbacks.post_load.as_deref(), Some("afterLoad"));
    assert_eq!(auditable.entity_listeners[0].callbacks.post_update.as_deref(), Some("bump"));

    let invoice = mappings.entity("Invoice").unwrap();
    assert_eq!(
        invoice.inheritance.as_ref().unwrap().strategy,
        Some(InheritanceType::Joined)
    );
    assert_eq!(invoice.discriminator_value.as_deref(), Some("INV"));
    let discriminator = invoice.discriminator_column.as_ref().unwrap();
    assert_eq!(discriminator.discriminator_type, Some(DiscriminatorType::String));
    assert_eq!(
        invoice.table.as_ref().unwrap().unique_constraints[0].name.as_deref(),
        Some("UK_INVOICE_NUMBER")
    );
    assert_eq!(invoice.secondary_tables[0].name, "INVOICE_NOTES");
    assert_eq!(invoice.callbacks.pre_persist.as_deref(), Some("assignNumber"));
    let issued = &invoice.attribute_override("createdAt").unwrap().column;
    assert_eq!(issued.name.as_deref(), Some("ISSUED_AT"));

    let attributes = invoice.attributes.as_ref().unwrap();
    let lines = attributes.one_to_manys[0].map_key.as_ref().unwrap();
    assert_eq!(lines.class.as_deref(), Some("java.lang.Integer"));
    assert_eq!(lines.column.as_ref().unwrap().name.as_deref(), Some("POSITION"));
    let taxes = &attributes.element_collections[0];
    assert_eq!(taxes.map_key.as_ref().unwrap().enumerated, Some(EnumType::String));
    assert_eq!(taxes.column.as_ref().unwrap().scale, Some(2));
    assert_eq!(attributes.embeddeds[0].attribute_overrides.len(), 2);

    let credit_note = mappings.entity("CreditNote").unwrap();
    assert_eq!(
        credit_note.primary_key_join_columns[0].name.as_deref(),
        Some("INVOICE_ID")
    );
    assert_eq!(
        credit_note.association_overrides[0].join_columns[0].name.as_deref(),
        Some("REFUND_CUSTOMER_ID")
    );
}

#[test]
fn test_orm_1_0_inheritance_and_listeners() {
    let opener = memory_opener(ORM_1_0_STAFF);
    let mappings = reader_for(&opener).read(&mem_url()).unwrap();

    assert_eq!(opener.opened(), 2);
    assert_eq!(mappings.schema_variant, Some(VariantId::Orm1_0));

    let metadata = mappings.persistence_unit_metadata.as_ref().unwrap();
    assert!(metadata.xml_mapping_metadata_complete);
    let defaults = metadata.persistence_unit_defaults.as_ref().unwrap();
    assert_eq!(
        defaults.entity_listeners[0].callbacks.post_remove.as_deref(),
        Some("logDelete")
    );

    assert_eq!(mappings.table_generators[0].pk_column_value.as_deref(), Some("PERSON"));
    let headcount = &mappings.sql_result_set_mappings[0];
    assert!(headcount.entity_results.is_empty());
    assert_eq!(headcount.column_results.len(), 2);

    let person = mappings.entity("Person").unwrap();
    assert_eq!(
        person.inheritance.as_ref().unwrap().strategy,
        Some(InheritanceType::SingleTable)
    );
    let discriminator = person.discriminator_column.as_ref().unwrap();
    assert_eq!(discriminator.discriminator_type, Some(DiscriminatorType::Char));
    assert_eq!(discriminator.length, Some(1));
    assert_eq!(person.entity_listeners[0].class, "com.acme.staff.PersonValidator");
    let home = &person.attributes.as_ref().unwrap().embeddeds[0];
    assert_eq!(
        home.attribute_overrides[0].column.name.as_deref(),
        Some("HOME_STREET")
    );

    let employee = mappings.entity("Employee").unwrap();
    assert!(employee.exclude_superclass_listeners);
    assert_eq!(employee.callbacks.post_load.as_deref(), Some("computeTenure"));
    assert_eq!(employee.attribute_override("name").unwrap().column.length, Some(80));
    let attributes = employee.attributes.as_ref().unwrap();
    assert_eq!(attributes.basics[0].temporal, Some(TemporalType::Date));
    let projects = &attributes.many_to_manys[0];
    assert_eq!(projects.map_key.as_ref().unwrap().name.as_deref(), Some("code"));
    let join_table = projects.join_table.as_ref().unwrap();
    assert_eq!(join_table.inverse_join_columns[0].name.as_deref(), Some("PROJECT_ID"));
}

#[test]
fn test_eclipselink_inheritance_and_vendor_settings() {
    let opener = memory_opener(ECLIPSELINK_FLEET);
    let mappings = reader_for(&opener).read(&mem_url()).unwrap();

    assert_eq!(opener.opened(), 3);
    assert_eq!(mappings.schema_variant, Some(VariantId::EclipseLink1_1));
    assert_eq!(mappings.version.as_deref(), Some("1.1"));
    assert_eq!(mappings.type_converters[0].name, "yesNo");
    assert_eq!(mappings.sql_result_set_mappings[0].name, "Mileage");

    let asset = &mappings.mapped_superclasses[0];
    assert_eq!(
        asset.entity_listeners[0].callbacks.post_persist.as_deref(),
        Some("register")
    );

    let vehicle = mappings.entity("Vehicle").unwrap();
    assert_eq!(
        vehicle.inheritance.as_ref().unwrap().strategy,
        Some(InheritanceType::TablePerClass)
    );
    assert_eq!(vehicle.callbacks.pre_remove.as_deref(), Some("checkRetired"));
    assert_eq!(
        vehicle.attribute_override("version").unwrap().column.name.as_deref(),
        Some("ROW_VERSION")
    );

    let cache = vehicle.cache.as_ref().unwrap();
    assert_eq!(cache.cache_type, Some(CacheType::SoftWeak));
    assert_eq!(cache.expiry, Some(3_600_000));
    assert_eq!(
        cache.coordination_type,
        Some(CacheCoordinationType::SendObjectChanges)
    );

    let attributes = vehicle.attributes.as_ref().unwrap();
    assert_eq!(attributes.basics[0].convert.as_deref(), Some("yesNo"));
    assert_eq!(
        attributes.one_to_manys[0].order_by.as_deref(),
        Some("performedOn DESC")
    );
    assert_eq!(
        attributes.embeddeds[0].attribute_overrides[0].column.name.as_deref(),
        Some("PLATE_NO")
    );
}

// ============================================================================
// Encoding and fatal errors
// ============================================================================

#[test]
fn test_declared_latin1_ascii_document_loads() {
    let opener = memory_opener(LATIN1);
    let mappings = reader_for(&opener).read(&mem_url()).unwrap();

    assert_eq!(opener.opened(), 1);
    assert_eq!(mappings.schema_variant, Some(VariantId::Orm2_0));
    assert!(mappings.entity("Caf").is_some());
}

#[test]
fn test_non_utf8_bytes_fall_through_every_variant() {
    let mut bytes = LATIN1.replace("Caf", "Caf\u{0}").into_bytes();
    let marker = bytes.iter().position(|&b| b == 0).unwrap();
    bytes[marker] = 0xE9;

    let opener = memory_opener(bytes);
    let err = reader_for(&opener).read(&mem_url()).unwrap_err();

    assert_eq!(opener.opened(), 3);
    match err {
        Error::MappingFile { source, .. } => assert!(matches!(*source, Error::Xml(_)), "got {:?}", source),
        other => panic!("expected MappingFile error, got {:?}", other),
    }
}

#[test]
fn test_utf16_content_is_fatal() {
    let utf16: Vec<u8> = [0xFF, 0xFE]
        .into_iter()
        .chain(ORM_2_0.encode_utf16().flat_map(|unit| unit.to_le_bytes()))
        .collect();
    let opener = memory_opener(utf16);
    let err = reader_for(&opener).read(&mem_url()).unwrap_err();

    assert_eq!(opener.opened(), 1);
    assert!(matches!(err, Error::Encoding { .. }));
}

#[test]
fn test_missing_resource_is_fatal() {
    let opener = Arc::new(MemoryOpener::new());
    let err = reader_for(&opener).read(&mem_url()).unwrap_err();

    assert_eq!(opener.opened(), 0);
    assert!(matches!(err, Error::Resource(_)));
}

// ============================================================================
// Stream closing
// ============================================================================

#[test]
fn test_close_error_after_success_is_reported() {
    let opener = Arc::new(FailingCloseOpener::new(ORM_2_0, usize::MAX));
    let reader = MappingReader::new()
        .with_opener(opener.clone())
        .with_registry(Arc::new(ContextRegistry::new()));

    let err = reader.read(&mem_url()).unwrap_err();
    assert_eq!(opener.opened.load(Ordering::SeqCst), 1);
    match err {
        Error::FileClose { location, source } => {
            assert_eq!(location, mem_url().to_string());
            assert_eq!(source.to_string(), "disk went away");
        }
        other => panic!("expected FileClose error, got {:?}", other),
    }
}

#[test]
fn test_close_error_never_masks_parse_failure() {
    let opener = Arc::new(FailingCloseOpener::new(UNKNOWN_DIALECT, usize::MAX));
    let reader = MappingReader::new()
        .with_opener(opener.clone())
        .with_registry(Arc::new(ContextRegistry::new()));

    let err = reader.read(&mem_url()).unwrap_err();
    assert_eq!(opener.opened.load(Ordering::SeqCst), 3);
    assert!(matches!(err, Error::MappingFile { .. }), "got {:?}", err);
}

#[test]
fn test_close_error_on_failed_attempt_is_reported_after_success() {
    let opener = Arc::new(FailingCloseOpener::new(ORM_1_0, 1));
    let reader = MappingReader::new()
        .with_opener(opener.clone())
        .with_registry(Arc::new(ContextRegistry::new()));

    // The first stream fails to close, the second variant still gets its attempt
    let err = reader.read(&mem_url()).unwrap_err();
    assert_eq!(opener.opened.load(Ordering::SeqCst), 2);
    match err {
        Error::FileClose { location, source } => {
            assert_eq!(location, mem_url().to_string());
            assert_eq!(source.to_string(), "disk went away");
        }
        other => panic!("expected FileClose error, got {:?}", other),
    }
}

#[test]
fn test_close_error_on_failed_attempt_never_masks_exhaustion() {
    let opener = Arc::new(FailingCloseOpener::new(UNKNOWN_DIALECT, 1));
    let reader = MappingReader::new()
        .with_opener(opener.clone())
        .with_registry(Arc::new(ContextRegistry::new()));

    let err = reader.read(&mem_url()).unwrap_err();
    assert_eq!(opener.opened.load(Ordering::SeqCst), 3);
    assert!(
        matches!(err, Error::MappingFile { variant: VariantId::EclipseLink1_1, .. }),
        "got {:?}",
        err
    );
}

// ============================================================================
// Binding contexts
// ============================================================================

#[test]
fn test_contexts_are_built_once_per_variant() {
    let registry = Arc::new(ContextRegistry::new());
    let opener = memory_opener(ECLIPSELINK);
    let reader = MappingReader::new()
        .with_opener(opener.clone())
        .with_registry(Arc::clone(&registry));

    reader.read(&mem_url()).unwrap();
    reader.read(&mem_url()).unwrap();

    assert_eq!(opener.opened(), 6);
    for id in VariantId::ALL {
        assert_eq!(registry.constructions(id), 1, "{}", id);
    }
}

#[test]
fn test_contexts_are_built_lazily() {
    let registry = Arc::new(ContextRegistry::new());
    let opener = memory_opener(ORM_2_0);
    MappingReader::new()
        .with_opener(opener)
        .with_registry(Arc::clone(&registry))
        .read(&mem_url())
        .unwrap();

    assert!(registry.is_initialized(VariantId::Orm2_0));
    assert!(!registry.is_initialized(VariantId::Orm1_0));
    assert!(!registry.is_initialized(VariantId::EclipseLink1_1));
}

#[test]
fn test_repeated_reads_return_independent_documents() {
    let opener = memory_opener(ORM_1_0);
    let reader = reader_for(&opener);

    let first = reader.read(&mem_url()).unwrap();
    let mut second = reader.read(&mem_url()).unwrap();
    assert_eq!(first, second);

    second.set_mapping_file(Url::parse("mem:///other/orm.xml").unwrap());
    assert_eq!(first.mapping_file(), Some(&mem_url()));
    assert_ne!(first, second);
}

#[test]
fn test_concurrent_reads_share_contexts() {
    let registry = Arc::new(ContextRegistry::new());
    let opener = memory_opener(ECLIPSELINK);
    let reader = MappingReader::new()
        .with_opener(opener.clone())
        .with_registry(Arc::clone(&registry));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let reader = reader.clone();
            thread::spawn(move || reader.read(&mem_url()))
        })
        .collect();

    for handle in handles {
        let mappings = handle.join().unwrap().unwrap();
        assert_eq!(mappings.schema_variant, Some(VariantId::EclipseLink1_1));
    }
    assert_eq!(opener.opened(), 24);
    for id in VariantId::ALL {
        assert_eq!(registry.constructions(id), 1);
    }
}

#[test]
fn test_builtin_validation_when_schema_attachment_is_unsupported() {
    let registry = Arc::new(ContextRegistry::new().without_schema_attachment());
    let opener = memory_opener(ORM_1_0);
    let reader = MappingReader::new()
        .with_opener(opener.clone())
        .with_registry(registry);

    // Built-in validation still rejects the document under ORM 2.0
    let mappings = reader.read(&mem_url()).unwrap();
    assert_eq!(opener.opened(), 2);
    assert_eq!(mappings.schema_variant, Some(VariantId::Orm1_0));
}

// ============================================================================
// Filesystem locations
// ============================================================================

#[test]
fn test_read_mapping_file_from_disk() {
    let url = Url::from_file_path(fixture_path("orm_1_0.xml")).unwrap();
    let mappings = read_mapping_file(&url).unwrap();

    assert_eq!(mappings.schema_variant, Some(VariantId::Orm1_0));
    assert_eq!(mappings.mapping_file(), Some(&url));
}

#[test]
fn test_read_location_resolves_relative_references() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orm.xml");
    std::fs::write(&path, ORM_2_0).unwrap();

    let mappings = MappingReader::new()
        .read_location(path.to_str().unwrap())
        .unwrap();

    let sibling = mappings.resolve("queries.xml").unwrap();
    assert_eq!(sibling, Url::from_file_path(dir.path().join("queries.xml")).unwrap());
}

#[test]
fn test_missing_file_is_resource_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = MappingReader::new()
        .read_location(dir.path().join("absent.xml").to_str().unwrap())
        .unwrap_err();
    assert!(matches!(err, Error::Resource(_)));
}

#[test]
fn test_mappings_serialize_to_json() {
    let opener = memory_opener(ECLIPSELINK);
    let mappings = reader_for(&opener).read(&mem_url()).unwrap();
    let json = serde_json::to_value(&mappings).unwrap();

    assert_eq!(json["schema-variant"], "eclipselink-1.1");
    assert_eq!(json["mapping-file"], "mem:///META-INF/orm.xml");
    assert_eq!(json["entities"][0]["cache"]["type"], "SOFT");
}
