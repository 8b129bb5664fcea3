//! Typed mapping file model
//!
//! The object graph produced by unmarshalling an `entity-mappings`
//! document. Field names follow the XML vocabulary; optional XML attributes
//! are `Option`s so an absent value stays distinguishable from a default.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use url::Url;

use crate::error::{Error, Result};
use crate::locations::resolve_location;
use crate::reader::VariantId;

/// Declares an enumerated XML token type with `FromStr`, `Display` and `Serialize`
macro_rules! xml_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$variant_meta])* $variant),+
        }

        impl $name {
            /// Lexical value used in mapping files
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s.trim() {
                    $($text => Ok(Self::$variant),)+
                    other => Err(Error::Binding(format!(
                        "Invalid {} value '{}'",
                        stringify!($name),
                        other
                    ))),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

xml_enum! {
    /// How the persistence provider accesses entity state
    AccessType {
        /// Through accessor methods
        Property => "PROPERTY",
        /// Directly through fields
        Field => "FIELD",
    }
}

xml_enum! {
    /// When an attribute or association is loaded
    FetchType {
        /// On first access
        Lazy => "LAZY",
        /// With the owning object
        Eager => "EAGER",
    }
}

xml_enum! {
    /// SQL type of a temporal attribute
    TemporalType {
        /// `java.sql.Date`
        Date => "DATE",
        /// `java.sql.Time`
        Time => "TIME",
        /// `java.sql.Timestamp`
        Timestamp => "TIMESTAMP",
    }
}

xml_enum! {
    /// Storage of an enumerated attribute
    EnumType {
        /// Stored as its ordinal
        Ordinal => "ORDINAL",
        /// Stored as its name
        String => "STRING",
    }
}

xml_enum! {
    /// Primary key generation strategy
    GenerationType {
        /// Generator table
        Table => "TABLE",
        /// Database sequence
        Sequence => "SEQUENCE",
        /// Identity column
        Identity => "IDENTITY",
        /// Provider's choice
        Auto => "AUTO",
    }
}

xml_enum! {
    /// Lock mode of a named query
    LockModeType {
        Read => "READ",
        Write => "WRITE",
        Optimistic => "OPTIMISTIC",
        OptimisticForceIncrement => "OPTIMISTIC_FORCE_INCREMENT",
        PessimisticRead => "PESSIMISTIC_READ",
        PessimisticWrite => "PESSIMISTIC_WRITE",
        PessimisticForceIncrement => "PESSIMISTIC_FORCE_INCREMENT",
        None => "NONE",
    }
}

xml_enum! {
    /// Operations cascaded across a relationship
    CascadeType {
        All => "ALL",
        Persist => "PERSIST",
        Merge => "MERGE",
        Remove => "REMOVE",
        Refresh => "REFRESH",
        Detach => "DETACH",
    }
}

xml_enum! {
    /// Table layout of an entity hierarchy
    InheritanceType {
        /// One table for the whole hierarchy
        SingleTable => "SINGLE_TABLE",
        /// One table per class, joined on the primary key
        Joined => "JOINED",
        /// One table per concrete class
        TablePerClass => "TABLE_PER_CLASS",
    }
}

xml_enum! {
    /// Type of a discriminator column
    DiscriminatorType {
        String => "STRING",
        Char => "CHAR",
        Integer => "INTEGER",
    }
}

xml_enum! {
    /// Identity map type of a vendor entity cache
    CacheType {
        Full => "FULL",
        Weak => "WEAK",
        Soft => "SOFT",
        SoftWeak => "SOFT_WEAK",
        HardWeak => "HARD_WEAK",
        Cache => "CACHE",
        None => "NONE",
    }
}

xml_enum! {
    /// How cache changes are propagated across a cluster
    CacheCoordinationType {
        SendObjectChanges => "SEND_OBJECT_CHANGES",
        InvalidateChangedObjects => "INVALIDATE_CHANGED_OBJECTS",
        SendNewObjectsWithChanges => "SEND_NEW_OBJECTS_WITH_CHANGES",
        None => "NONE",
    }
}

/// Root of a mapping file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct EntityMappings {
    /// Value of the `version` attribute (or the schema default)
    pub version: Option<String>,
    /// Free text description
    pub description: Option<String>,
    /// Persistence unit wide settings
    pub persistence_unit_metadata: Option<PersistenceUnitMetadata>,
    /// Default package for unqualified class names
    pub package: Option<String>,
    /// Default database schema
    pub schema: Option<String>,
    /// Default database catalog
    pub catalog: Option<String>,
    /// Default access type of the file's managed classes
    pub access: Option<AccessType>,
    /// Sequence generators
    pub sequence_generators: Vec<SequenceGenerator>,
    /// Table generators
    pub table_generators: Vec<TableGenerator>,
    /// JPQL named queries
    pub named_queries: Vec<NamedQuery>,
    /// SQL named queries
    pub named_native_queries: Vec<NamedNativeQuery>,
    /// Result set mappings of native queries
    pub sql_result_set_mappings: Vec<SqlResultSetMapping>,
    /// Vendor custom converters
    pub converters: Vec<Converter>,
    /// Vendor type converters
    pub type_converters: Vec<TypeConverter>,
    /// Vendor object type converters
    pub object_type_converters: Vec<ObjectTypeConverter>,
    /// Mapped superclasses
    pub mapped_superclasses: Vec<MappedSuperclass>,
    /// Entities
    pub entities: Vec<Entity>,
    /// Embeddable classes
    pub embeddables: Vec<Embeddable>,
    /// Schema variant the file was read with
    pub schema_variant: Option<VariantId>,
    /// Location the file was read from
    pub mapping_file: Option<Url>,
}

impl EntityMappings {
    /// Record the location the file was read from
    pub fn set_mapping_file(&mut self, location: Url) {
        self.mapping_file = Some(location);
    }

    /// Location the file was read from
    pub fn mapping_file(&self) -> Option<&Url> {
        self.mapping_file.as_ref()
    }

    /// Resolve a reference made inside the file against its location
    pub fn resolve(&self, href: &str) -> Result<Url> {
        let base = self.mapping_file.as_ref().ok_or_else(|| {
            Error::Resource(format!(
                "Cannot resolve '{}': the mapping file location is not set",
                href
            ))
        })?;
        resolve_location(base, href)
    }

    /// Find an entity by class name
    pub fn entity(&self, class: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.class == class)
    }

    /// Fully qualified class name, applying the default package
    pub fn qualified_class_name(&self, class: &str) -> String {
        match &self.package {
            Some(package) if !class.contains('.') && !package.is_empty() => {
                format!("{}.{}", package, class)
            }
            _ => class.to_string(),
        }
    }

    /// Iterate over all named queries, file level first, then per entity
    pub fn all_named_queries(&self) -> impl Iterator<Item = &NamedQuery> {
        self.named_queries
            .iter()
            .chain(self.entities.iter().flat_map(|e| e.named_queries.iter()))
    }
}

/// `persistence-unit-metadata`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PersistenceUnitMetadata {
    pub description: Option<String>,
    /// Whether annotations are ignored for the whole unit
    pub xml_mapping_metadata_complete: bool,
    pub persistence_unit_defaults: Option<PersistenceUnitDefaults>,
}

/// `persistence-unit-defaults`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PersistenceUnitDefaults {
    pub description: Option<String>,
    pub schema: Option<String>,
    pub catalog: Option<String>,
    /// Quote every database identifier
    pub delimited_identifiers: bool,
    pub access: Option<AccessType>,
    /// Cascade persist across every relationship
    pub cascade_persist: bool,
    /// Listeners applied to every entity of the unit
    pub entity_listeners: Vec<EntityListener>,
}

/// `sequence-generator`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SequenceGenerator {
    pub name: String,
    pub description: Option<String>,
    pub sequence_name: Option<String>,
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub initial_value: Option<i32>,
    pub allocation_size: Option<i32>,
}

/// `table-generator`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TableGenerator {
    pub name: String,
    pub description: Option<String>,
    pub table: Option<String>,
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub pk_column_name: Option<String>,
    pub value_column_name: Option<String>,
    pub pk_column_value: Option<String>,
    pub initial_value: Option<i32>,
    pub allocation_size: Option<i32>,
}

/// `hint` of a named query
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct QueryHint {
    pub name: String,
    pub value: String,
    pub description: Option<String>,
}

/// `named-query`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct NamedQuery {
    pub name: String,
    pub description: Option<String>,
    /// Query text
    pub query: String,
    pub lock_mode: Option<LockModeType>,
    pub hints: Vec<QueryHint>,
}

/// `named-native-query`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct NamedNativeQuery {
    pub name: String,
    pub description: Option<String>,
    /// SQL text
    pub query: String,
    pub result_class: Option<String>,
    pub result_set_mapping: Option<String>,
    pub hints: Vec<QueryHint>,
}

/// `sql-result-set-mapping`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SqlResultSetMapping {
    pub name: String,
    pub description: Option<String>,
    pub entity_results: Vec<EntityResult>,
    pub column_results: Vec<ColumnResult>,
}

/// `entity-result`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct EntityResult {
    pub entity_class: String,
    pub discriminator_column: Option<String>,
    pub field_results: Vec<FieldResult>,
}

/// `field-result`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct FieldResult {
    pub name: String,
    pub column: String,
}

/// `column-result`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ColumnResult {
    pub name: String,
}

/// Callback methods invoked on lifecycle events
///
/// Each field holds the name of the method bound to the event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LifecycleCallbacks {
    pub pre_persist: Option<String>,
    pub post_persist: Option<String>,
    pub pre_remove: Option<String>,
    pub post_remove: Option<String>,
    pub pre_update: Option<String>,
    pub post_update: Option<String>,
    pub post_load: Option<String>,
}

impl LifecycleCallbacks {
    /// Whether no callback method is declared
    pub fn is_empty(&self) -> bool {
        self.events().all(|(_, method)| method.is_none())
    }

    /// Callback method for each event, in the order events are declared
    pub fn events(&self) -> impl Iterator<Item = (&'static str, Option<&str>)> {
        [
            ("pre-persist", self.pre_persist.as_deref()),
            ("post-persist", self.post_persist.as_deref()),
            ("pre-remove", self.pre_remove.as_deref()),
            ("post-remove", self.post_remove.as_deref()),
            ("pre-update", self.pre_update.as_deref()),
            ("post-update", self.post_update.as_deref()),
            ("post-load", self.post_load.as_deref()),
        ]
        .into_iter()
    }
}

/// `entity-listener`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct EntityListener {
    pub class: String,
    pub description: Option<String>,
    pub callbacks: LifecycleCallbacks,
}

/// `mapped-superclass`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MappedSuperclass {
    pub class: String,
    pub access: Option<AccessType>,
    pub metadata_complete: Option<bool>,
    pub description: Option<String>,
    pub id_class: Option<String>,
    pub exclude_default_listeners: bool,
    pub exclude_superclass_listeners: bool,
    pub entity_listeners: Vec<EntityListener>,
    /// Callbacks declared on the class itself
    pub callbacks: LifecycleCallbacks,
    pub attributes: Option<Attributes>,
}

/// `entity`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Entity {
    /// Entity name used in queries; defaults to the unqualified class name
    pub name: Option<String>,
    /// Entity class
    pub class: String,
    /// Access type for this entity
    pub access: Option<AccessType>,
    /// Shared cache participation
    pub cacheable: Option<bool>,
    /// Whether annotations on the class are ignored
    pub metadata_complete: Option<bool>,
    /// Vendor read-only flag
    pub read_only: Option<bool>,
    /// Free text description
    pub description: Option<String>,
    /// Vendor descriptor customizer class
    pub customizer: Option<String>,
    /// Primary table
    pub table: Option<Table>,
    /// Additional tables the entity is spread over
    pub secondary_tables: Vec<SecondaryTable>,
    /// Columns joining a subclass table to its parent table
    pub primary_key_join_columns: Vec<PrimaryKeyJoinColumn>,
    /// Composite primary key class
    pub id_class: Option<String>,
    /// Inheritance strategy, declared on the hierarchy root
    pub inheritance: Option<Inheritance>,
    /// Value identifying this class in the discriminator column
    pub discriminator_value: Option<String>,
    pub discriminator_column: Option<DiscriminatorColumn>,
    /// Vendor cache settings
    pub cache: Option<Cache>,
    /// Sequence generator scoped to the entity
    pub sequence_generator: Option<SequenceGenerator>,
    /// Table generator scoped to the entity
    pub table_generator: Option<TableGenerator>,
    /// JPQL named queries
    pub named_queries: Vec<NamedQuery>,
    /// SQL named queries
    pub named_native_queries: Vec<NamedNativeQuery>,
    pub sql_result_set_mappings: Vec<SqlResultSetMapping>,
    /// Skip the unit's default listeners
    pub exclude_default_listeners: bool,
    /// Skip listeners declared on superclasses
    pub exclude_superclass_listeners: bool,
    pub entity_listeners: Vec<EntityListener>,
    /// Callbacks declared on the entity class itself
    pub callbacks: LifecycleCallbacks,
    /// Column overrides of inherited or embedded attributes
    pub attribute_overrides: Vec<AttributeOverride>,
    /// Join overrides of inherited relationships
    pub association_overrides: Vec<AssociationOverride>,
    /// Attribute mappings
    pub attributes: Option<Attributes>,
}

impl Entity {
    /// Entity name, defaulting to the unqualified class name
    pub fn entity_name(&self) -> &str {
        match &self.name {
            Some(name) => name,
            None => self.class.rsplit('.').next().unwrap_or(&self.class),
        }
    }

    /// Override applied to the named attribute, if any
    pub fn attribute_override(&self, name: &str) -> Option<&AttributeOverride> {
        self.attribute_overrides.iter().find(|o| o.name == name)
    }
}

/// `embeddable`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Embeddable {
    pub class: String,
    pub access: Option<AccessType>,
    pub metadata_complete: Option<bool>,
    pub description: Option<String>,
    pub attributes: Option<Attributes>,
}

/// `table`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Table {
    pub name: Option<String>,
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub unique_constraints: Vec<UniqueConstraint>,
}

/// `secondary-table`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SecondaryTable {
    pub name: String,
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub primary_key_join_columns: Vec<PrimaryKeyJoinColumn>,
    pub unique_constraints: Vec<UniqueConstraint>,
}

/// `unique-constraint`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct UniqueConstraint {
    pub name: Option<String>,
    pub column_names: Vec<String>,
}

/// `primary-key-join-column`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PrimaryKeyJoinColumn {
    pub name: Option<String>,
    pub referenced_column_name: Option<String>,
    pub column_definition: Option<String>,
}

/// `inheritance`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Inheritance {
    pub strategy: Option<InheritanceType>,
}

/// `discriminator-column`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DiscriminatorColumn {
    pub name: Option<String>,
    pub discriminator_type: Option<DiscriminatorType>,
    pub column_definition: Option<String>,
    pub length: Option<i32>,
}

/// `attribute-override`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AttributeOverride {
    pub name: String,
    pub description: Option<String>,
    pub column: Column,
}

/// `association-override`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AssociationOverride {
    pub name: String,
    pub description: Option<String>,
    pub join_columns: Vec<JoinColumn>,
    pub join_table: Option<JoinTable>,
}

/// Attribute mappings of a managed class
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Attributes {
    pub description: Option<String>,
    pub ids: Vec<Id>,
    pub embedded_id: Option<EmbeddedId>,
    pub basics: Vec<Basic>,
    pub versions: Vec<Version>,
    pub many_to_ones: Vec<ManyToOne>,
    pub one_to_manys: Vec<OneToMany>,
    pub one_to_ones: Vec<OneToOne>,
    pub many_to_manys: Vec<ManyToMany>,
    pub element_collections: Vec<ElementCollection>,
    pub embeddeds: Vec<Embedded>,
    pub transients: Vec<Transient>,
}

impl Attributes {
    /// Total number of mapped attributes
    pub fn len(&self) -> usize {
        self.ids.len()
            + usize::from(self.embedded_id.is_some())
            + self.basics.len()
            + self.versions.len()
            + self.many_to_ones.len()
            + self.one_to_manys.len()
            + self.one_to_ones.len()
            + self.many_to_manys.len()
            + self.element_collections.len()
            + self.embeddeds.len()
            + self.transients.len()
    }

    /// Whether no attribute is mapped
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `column`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Column {
    pub name: Option<String>,
    pub unique: Option<bool>,
    pub nullable: Option<bool>,
    pub insertable: Option<bool>,
    pub updatable: Option<bool>,
    pub column_definition: Option<String>,
    pub table: Option<String>,
    pub length: Option<i32>,
    pub precision: Option<i32>,
    pub scale: Option<i32>,
}

/// `generated-value`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct GeneratedValue {
    pub strategy: Option<GenerationType>,
    pub generator: Option<String>,
}

/// `id`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Id {
    pub name: String,
    pub access: Option<AccessType>,
    pub column: Option<Column>,
    pub generated_value: Option<GeneratedValue>,
    pub temporal: Option<TemporalType>,
}

/// `embedded-id`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct EmbeddedId {
    pub name: String,
    pub access: Option<AccessType>,
    pub attribute_overrides: Vec<AttributeOverride>,
}

/// `basic`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Basic {
    pub name: String,
    pub fetch: Option<FetchType>,
    pub optional: Option<bool>,
    pub access: Option<AccessType>,
    pub column: Option<Column>,
    /// Mapped as a large object
    pub lob: bool,
    pub temporal: Option<TemporalType>,
    pub enumerated: Option<EnumType>,
    /// Vendor converter name
    pub convert: Option<String>,
}

/// `version`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Version {
    pub name: String,
    pub access: Option<AccessType>,
    pub column: Option<Column>,
    pub temporal: Option<TemporalType>,
}

/// `join-column` and `inverse-join-column`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct JoinColumn {
    pub name: Option<String>,
    pub referenced_column_name: Option<String>,
    pub unique: Option<bool>,
    pub nullable: Option<bool>,
    pub insertable: Option<bool>,
    pub updatable: Option<bool>,
}

/// `join-table`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct JoinTable {
    pub name: Option<String>,
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub join_columns: Vec<JoinColumn>,
    pub inverse_join_columns: Vec<JoinColumn>,
    pub unique_constraints: Vec<UniqueConstraint>,
}

/// `collection-table`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CollectionTable {
    pub name: Option<String>,
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub join_columns: Vec<JoinColumn>,
    pub unique_constraints: Vec<UniqueConstraint>,
}

/// Key mapping of a `java.util.Map` valued collection
///
/// Collects `map-key` and the `map-key-*` elements of a collection mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MapKey {
    /// Attribute of the target used as the key (`map-key`)
    pub name: Option<String>,
    /// Key class (`map-key-class`)
    pub class: Option<String>,
    pub temporal: Option<TemporalType>,
    pub enumerated: Option<EnumType>,
    pub attribute_overrides: Vec<AttributeOverride>,
    pub column: Option<Column>,
    pub join_columns: Vec<JoinColumn>,
}

/// `order-column`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct OrderColumn {
    pub name: Option<String>,
    pub nullable: Option<bool>,
    pub insertable: Option<bool>,
    pub updatable: Option<bool>,
    pub column_definition: Option<String>,
}

/// `many-to-one`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ManyToOne {
    pub name: String,
    pub target_entity: Option<String>,
    pub fetch: Option<FetchType>,
    pub optional: Option<bool>,
    pub access: Option<AccessType>,
    pub maps_id: Option<String>,
    pub id: Option<bool>,
    pub join_columns: Vec<JoinColumn>,
    pub join_table: Option<JoinTable>,
    pub cascade: Vec<CascadeType>,
}

/// `one-to-many`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct OneToMany {
    pub name: String,
    pub target_entity: Option<String>,
    pub fetch: Option<FetchType>,
    pub access: Option<AccessType>,
    pub mapped_by: Option<String>,
    pub orphan_removal: Option<bool>,
    pub order_by: Option<String>,
    pub order_column: Option<OrderColumn>,
    pub map_key: Option<MapKey>,
    pub join_table: Option<JoinTable>,
    pub join_columns: Vec<JoinColumn>,
    pub cascade: Vec<CascadeType>,
}

/// `one-to-one`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct OneToOne {
    pub name: String,
    pub target_entity: Option<String>,
    pub fetch: Option<FetchType>,
    pub optional: Option<bool>,
    pub access: Option<AccessType>,
    pub mapped_by: Option<String>,
    pub orphan_removal: Option<bool>,
    pub maps_id: Option<String>,
    pub id: Option<bool>,
    pub primary_key_join_columns: Vec<PrimaryKeyJoinColumn>,
    pub join_columns: Vec<JoinColumn>,
    pub join_table: Option<JoinTable>,
    pub cascade: Vec<CascadeType>,
}

/// `many-to-many`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ManyToMany {
    pub name: String,
    pub target_entity: Option<String>,
    pub fetch: Option<FetchType>,
    pub access: Option<AccessType>,
    pub mapped_by: Option<String>,
    pub order_by: Option<String>,
    pub order_column: Option<OrderColumn>,
    pub map_key: Option<MapKey>,
    pub join_table: Option<JoinTable>,
    pub cascade: Vec<CascadeType>,
}

/// `element-collection`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ElementCollection {
    pub name: String,
    pub target_class: Option<String>,
    pub fetch: Option<FetchType>,
    pub access: Option<AccessType>,
    pub order_by: Option<String>,
    pub order_column: Option<OrderColumn>,
    pub map_key: Option<MapKey>,
    pub column: Option<Column>,
    pub temporal: Option<TemporalType>,
    pub enumerated: Option<EnumType>,
    pub lob: bool,
    pub attribute_overrides: Vec<AttributeOverride>,
    pub association_overrides: Vec<AssociationOverride>,
    pub collection_table: Option<CollectionTable>,
}

/// `embedded`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Embedded {
    pub name: String,
    pub access: Option<AccessType>,
    pub attribute_overrides: Vec<AttributeOverride>,
    pub association_overrides: Vec<AssociationOverride>,
}

/// `transient`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Transient {
    pub name: String,
}

/// Vendor `converter`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Converter {
    pub name: String,
    pub class: String,
}

/// Vendor `type-converter`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TypeConverter {
    pub name: String,
    pub data_type: Option<String>,
    pub object_type: Option<String>,
}

/// One data/object pair of an object type converter
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConversionValue {
    pub data_value: String,
    pub object_value: String,
}

/// Vendor `object-type-converter`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ObjectTypeConverter {
    pub name: String,
    pub data_type: Option<String>,
    pub object_type: Option<String>,
    pub conversion_values: Vec<ConversionValue>,
    pub default_object_value: Option<String>,
}

impl ObjectTypeConverter {
    /// Object value stored for a data value, falling back to the default
    pub fn object_value(&self, data_value: &str) -> Option<&str> {
        self.conversion_values
            .iter()
            .find(|v| v.data_value == data_value)
            .map(|v| v.object_value.as_str())
            .or(self.default_object_value.as_deref())
    }
}

/// Vendor entity `cache`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Cache {
    #[serde(rename = "type")]
    pub cache_type: Option<CacheType>,
    pub size: Option<i32>,
    pub shared: Option<bool>,
    /// Expiry in milliseconds
    pub expiry: Option<i64>,
    /// Daily time at which cached objects expire
    pub expiry_time_of_day: Option<TimeOfDay>,
    pub always_refresh: Option<bool>,
    pub refresh_only_if_newer: Option<bool>,
    pub disable_hits: Option<bool>,
    pub coordination_type: Option<CacheCoordinationType>,
}

/// `expiry-time-of-day`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TimeOfDay {
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub second: Option<u32>,
    pub millisecond: Option<u32>,
}
