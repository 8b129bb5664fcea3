//! Binding of mapping file elements to the typed model
//!
//! Each `bind_*` function maps one XML element to its model struct. The
//! functions rely on names only; namespaces are checked once at the root.

use std::fmt::Display;
use std::str::FromStr;

use crate::documents::Element;
use crate::error::{Error, Result};

use super::model::*;

fn binding_error(elem: &Element, message: impl Display) -> Error {
    Error::Binding(format!("<{}>: {}", elem.local_name(), message))
}

fn attr(elem: &Element, name: &str) -> Option<String> {
    elem.get_attribute(name).map(str::to_string)
}

fn required_attr(elem: &Element, name: &str) -> Result<String> {
    attr(elem, name)
        .ok_or_else(|| binding_error(elem, format!("missing required attribute '{}'", name)))
}

fn parsed_attr<T>(elem: &Element, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    elem.get_attribute(name)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|e| binding_error(elem, format!("attribute '{}': {}", name, e)))
        })
        .transpose()
}

/// xsd:boolean lexical space
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn bool_attr(elem: &Element, name: &str) -> Result<Option<bool>> {
    elem.get_attribute(name)
        .map(|value| {
            parse_bool(value).ok_or_else(|| {
                binding_error(elem, format!("attribute '{}' is not a boolean: '{}'", name, value))
            })
        })
        .transpose()
}

fn text(elem: &Element, name: &str) -> Option<String> {
    elem.child_text(name).map(str::to_string)
}

fn parsed_text<T>(elem: &Element, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    elem.child_text(name)
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|e| binding_error(elem, format!("<{}>: {}", name, e)))
        })
        .transpose()
}

fn flag(elem: &Element, name: &str) -> bool {
    elem.child(name).is_some()
}

fn bind_all<T>(elem: &Element, name: &str, bind: fn(&Element) -> Result<T>) -> Result<Vec<T>> {
    elem.children_named(name).map(bind).collect()
}

fn bind_opt<T>(elem: &Element, name: &str, bind: fn(&Element) -> Result<T>) -> Result<Option<T>> {
    elem.child(name).map(bind).transpose()
}

/// Bind the root `entity-mappings` element
pub fn bind_entity_mappings(root: &Element) -> Result<EntityMappings> {
    Ok(EntityMappings {
        version: attr(root, "version"),
        description: text(root, "description"),
        persistence_unit_metadata: bind_opt(
            root,
            "persistence-unit-metadata",
            bind_persistence_unit_metadata,
        )?,
        package: text(root, "package"),
        schema: text(root, "schema"),
        catalog: text(root, "catalog"),
        access: parsed_text(root, "access")?,
        sequence_generators: bind_all(root, "sequence-generator", bind_sequence_generator)?,
        table_generators: bind_all(root, "table-generator", bind_table_generator)?,
        named_queries: bind_all(root, "named-query", bind_named_query)?,
        named_native_queries: bind_all(root, "named-native-query", bind_named_native_query)?,
        sql_result_set_mappings: bind_all(
            root,
            "sql-result-set-mapping",
            bind_sql_result_set_mapping,
        )?,
        converters: bind_all(root, "converter", bind_converter)?,
        type_converters: bind_all(root, "type-converter", bind_type_converter)?,
        object_type_converters: bind_all(root, "object-type-converter", bind_object_type_converter)?,
        mapped_superclasses: bind_all(root, "mapped-superclass", bind_mapped_superclass)?,
        entities: bind_all(root, "entity", bind_entity)?,
        embeddables: bind_all(root, "embeddable", bind_embeddable)?,
        schema_variant: None,
        mapping_file: None,
    })
}

fn bind_persistence_unit_metadata(elem: &Element) -> Result<PersistenceUnitMetadata> {
    Ok(PersistenceUnitMetadata {
        description: text(elem, "description"),
        xml_mapping_metadata_complete: flag(elem, "xml-mapping-metadata-complete"),
        persistence_unit_defaults: bind_opt(
            elem,
            "persistence-unit-defaults",
            bind_persistence_unit_defaults,
        )?,
    })
}

fn bind_persistence_unit_defaults(elem: &Element) -> Result<PersistenceUnitDefaults> {
    Ok(PersistenceUnitDefaults {
        description: text(elem, "description"),
        schema: text(elem, "schema"),
        catalog: text(elem, "catalog"),
        delimited_identifiers: flag(elem, "delimited-identifiers"),
        access: parsed_text(elem, "access")?,
        cascade_persist: flag(elem, "cascade-persist"),
        entity_listeners: bind_entity_listeners(elem)?,
    })
}

fn bind_sequence_generator(elem: &Element) -> Result<SequenceGenerator> {
    Ok(SequenceGenerator {
        name: required_attr(elem, "name")?,
        description: text(elem, "description"),
        sequence_name: attr(elem, "sequence-name"),
        catalog: attr(elem, "catalog"),
        schema: attr(elem, "schema"),
        initial_value: parsed_attr(elem, "initial-value")?,
        allocation_size: parsed_attr(elem, "allocation-size")?,
    })
}

fn bind_table_generator(elem: &Element) -> Result<TableGenerator> {
    Ok(TableGenerator {
        name: required_attr(elem, "name")?,
        description: text(elem, "description"),
        table: attr(elem, "table"),
        catalog: attr(elem, "catalog"),
        schema: attr(elem, "schema"),
        pk_column_name: attr(elem, "pk-column-name"),
        value_column_name: attr(elem, "value-column-name"),
        pk_column_value: attr(elem, "pk-column-value"),
        initial_value: parsed_attr(elem, "initial-value")?,
        allocation_size: parsed_attr(elem, "allocation-size")?,
    })
}

fn bind_query_hint(elem: &Element) -> Result<QueryHint> {
    Ok(QueryHint {
        name: required_attr(elem, "name")?,
        value: required_attr(elem, "value")?,
        description: text(elem, "description"),
    })
}

fn query_text(elem: &Element) -> Result<String> {
    text(elem, "query").ok_or_else(|| binding_error(elem, "missing <query>"))
}

fn bind_named_query(elem: &Element) -> Result<NamedQuery> {
    Ok(NamedQuery {
        name: required_attr(elem, "name")?,
        description: text(elem, "description"),
        query: query_text(elem)?,
        lock_mode: parsed_text(elem, "lock-mode")?,
        hints: bind_all(elem, "hint", bind_query_hint)?,
    })
}

fn bind_named_native_query(elem: &Element) -> Result<NamedNativeQuery> {
    Ok(NamedNativeQuery {
        name: required_attr(elem, "name")?,
        description: text(elem, "description"),
        query: query_text(elem)?,
        result_class: attr(elem, "result-class"),
        result_set_mapping: attr(elem, "result-set-mapping"),
        hints: bind_all(elem, "hint", bind_query_hint)?,
    })
}

fn bind_sql_result_set_mapping(elem: &Element) -> Result<SqlResultSetMapping> {
    Ok(SqlResultSetMapping {
        name: required_attr(elem, "name")?,
        description: text(elem, "description"),
        entity_results: bind_all(elem, "entity-result", bind_entity_result)?,
        column_results: bind_all(elem, "column-result", bind_column_result)?,
    })
}

fn bind_entity_result(elem: &Element) -> Result<EntityResult> {
    Ok(EntityResult {
        entity_class: required_attr(elem, "entity-class")?,
        discriminator_column: attr(elem, "discriminator-column"),
        field_results: bind_all(elem, "field-result", bind_field_result)?,
    })
}

fn bind_field_result(elem: &Element) -> Result<FieldResult> {
    Ok(FieldResult {
        name: required_attr(elem, "name")?,
        column: required_attr(elem, "column")?,
    })
}

fn bind_column_result(elem: &Element) -> Result<ColumnResult> {
    Ok(ColumnResult {
        name: required_attr(elem, "name")?,
    })
}

/// Method names of the lifecycle callback elements directly under `elem`
fn bind_callbacks(elem: &Element) -> Result<LifecycleCallbacks> {
    let method = |event: &str| -> Result<Option<String>> {
        elem.child(event)
            .map(|callback| required_attr(callback, "method-name"))
            .transpose()
    };
    Ok(LifecycleCallbacks {
        pre_persist: method("pre-persist")?,
        post_persist: method("post-persist")?,
        pre_remove: method("pre-remove")?,
        post_remove: method("post-remove")?,
        pre_update: method("pre-update")?,
        post_update: method("post-update")?,
        post_load: method("post-load")?,
    })
}

fn bind_entity_listener(elem: &Element) -> Result<EntityListener> {
    Ok(EntityListener {
        class: required_attr(elem, "class")?,
        description: text(elem, "description"),
        callbacks: bind_callbacks(elem)?,
    })
}

/// Listeners of the `entity-listeners` wrapper, empty when it is absent
fn bind_entity_listeners(elem: &Element) -> Result<Vec<EntityListener>> {
    match elem.child("entity-listeners") {
        Some(listeners) => bind_all(listeners, "entity-listener", bind_entity_listener),
        None => Ok(Vec::new()),
    }
}

fn id_class(elem: &Element) -> Result<Option<String>> {
    elem.child("id-class")
        .map(|id_class| required_attr(id_class, "class"))
        .transpose()
}

fn bind_mapped_superclass(elem: &Element) -> Result<MappedSuperclass> {
    Ok(MappedSuperclass {
        class: required_attr(elem, "class")?,
        access: parsed_attr(elem, "access")?,
        metadata_complete: bool_attr(elem, "metadata-complete")?,
        description: text(elem, "description"),
        id_class: id_class(elem)?,
        exclude_default_listeners: flag(elem, "exclude-default-listeners"),
        exclude_superclass_listeners: flag(elem, "exclude-superclass-listeners"),
        entity_listeners: bind_entity_listeners(elem)?,
        callbacks: bind_callbacks(elem)?,
        attributes: bind_opt(elem, "attributes", bind_attributes)?,
    })
}

fn bind_entity(elem: &Element) -> Result<Entity> {
    Ok(Entity {
        name: attr(elem, "name"),
        class: required_attr(elem, "class")?,
        access: parsed_attr(elem, "access")?,
        cacheable: bool_attr(elem, "cacheable")?,
        metadata_complete: bool_attr(elem, "metadata-complete")?,
        read_only: bool_attr(elem, "read-only")?,
        description: text(elem, "description"),
        customizer: elem
            .child("customizer")
            .map(|c| required_attr(c, "class"))
            .transpose()?,
        table: bind_opt(elem, "table", bind_table)?,
        secondary_tables: bind_all(elem, "secondary-table", bind_secondary_table)?,
        primary_key_join_columns: bind_all(
            elem,
            "primary-key-join-column",
            bind_primary_key_join_column,
        )?,
        id_class: id_class(elem)?,
        inheritance: bind_opt(elem, "inheritance", bind_inheritance)?,
        discriminator_value: text(elem, "discriminator-value"),
        discriminator_column: bind_opt(elem, "discriminator-column", bind_discriminator_column)?,
        cache: bind_opt(elem, "cache", bind_cache)?,
        sequence_generator: bind_opt(elem, "sequence-generator", bind_sequence_generator)?,
        table_generator: bind_opt(elem, "table-generator", bind_table_generator)?,
        named_queries: bind_all(elem, "named-query", bind_named_query)?,
        named_native_queries: bind_all(elem, "named-native-query", bind_named_native_query)?,
        sql_result_set_mappings: bind_all(
            elem,
            "sql-result-set-mapping",
            bind_sql_result_set_mapping,
        )?,
        exclude_default_listeners: flag(elem, "exclude-default-listeners"),
        exclude_superclass_listeners: flag(elem, "exclude-superclass-listeners"),
        entity_listeners: bind_entity_listeners(elem)?,
        callbacks: bind_callbacks(elem)?,
        attribute_overrides: bind_all(elem, "attribute-override", bind_attribute_override)?,
        association_overrides: bind_all(elem, "association-override", bind_association_override)?,
        attributes: bind_opt(elem, "attributes", bind_attributes)?,
    })
}

fn bind_embeddable(elem: &Element) -> Result<Embeddable> {
    Ok(Embeddable {
        class: required_attr(elem, "class")?,
        access: parsed_attr(elem, "access")?,
        metadata_complete: bool_attr(elem, "metadata-complete")?,
        description: text(elem, "description"),
        attributes: bind_opt(elem, "attributes", bind_attributes)?,
    })
}

fn bind_table(elem: &Element) -> Result<Table> {
    Ok(Table {
        name: attr(elem, "name"),
        catalog: attr(elem, "catalog"),
        schema: attr(elem, "schema"),
        unique_constraints: bind_all(elem, "unique-constraint", bind_unique_constraint)?,
    })
}

fn bind_secondary_table(elem: &Element) -> Result<SecondaryTable> {
    Ok(SecondaryTable {
        name: required_attr(elem, "name")?,
        catalog: attr(elem, "catalog"),
        schema: attr(elem, "schema"),
        primary_key_join_columns: bind_all(
            elem,
            "primary-key-join-column",
            bind_primary_key_join_column,
        )?,
        unique_constraints: bind_all(elem, "unique-constraint", bind_unique_constraint)?,
    })
}

fn bind_unique_constraint(elem: &Element) -> Result<UniqueConstraint> {
    let column_names: Vec<String> = elem
        .children_named("column-name")
        .map(|c| c.text().trim().to_string())
        .collect();
    if column_names.is_empty() {
        return Err(binding_error(elem, "missing <column-name>"));
    }
    Ok(UniqueConstraint {
        name: attr(elem, "name"),
        column_names,
    })
}

fn bind_primary_key_join_column(elem: &Element) -> Result<PrimaryKeyJoinColumn> {
    Ok(PrimaryKeyJoinColumn {
        name: attr(elem, "name"),
        referenced_column_name: attr(elem, "referenced-column-name"),
        column_definition: attr(elem, "column-definition"),
    })
}

fn bind_inheritance(elem: &Element) -> Result<Inheritance> {
    Ok(Inheritance {
        strategy: parsed_attr(elem, "strategy")?,
    })
}

fn bind_discriminator_column(elem: &Element) -> Result<DiscriminatorColumn> {
    Ok(DiscriminatorColumn {
        name: attr(elem, "name"),
        discriminator_type: parsed_attr(elem, "discriminator-type")?,
        column_definition: attr(elem, "column-definition"),
        length: parsed_attr(elem, "length")?,
    })
}

fn bind_attribute_override(elem: &Element) -> Result<AttributeOverride> {
    let column = elem
        .child("column")
        .ok_or_else(|| binding_error(elem, "missing <column>"))?;
    Ok(AttributeOverride {
        name: required_attr(elem, "name")?,
        description: text(elem, "description"),
        column: bind_column(column)?,
    })
}

fn bind_association_override(elem: &Element) -> Result<AssociationOverride> {
    Ok(AssociationOverride {
        name: required_attr(elem, "name")?,
        description: text(elem, "description"),
        join_columns: bind_all(elem, "join-column", bind_join_column)?,
        join_table: bind_opt(elem, "join-table", bind_join_table)?,
    })
}

fn bind_cache(elem: &Element) -> Result<Cache> {
    Ok(Cache {
        cache_type: parsed_attr(elem, "type")?,
        size: parsed_attr(elem, "size")?,
        shared: bool_attr(elem, "shared")?,
        expiry: parsed_text(elem, "expiry")?,
        expiry_time_of_day: bind_opt(elem, "expiry-time-of-day", bind_time_of_day)?,
        always_refresh: bool_attr(elem, "always-refresh")?,
        refresh_only_if_newer: bool_attr(elem, "refresh-only-if-newer")?,
        disable_hits: bool_attr(elem, "disable-hits")?,
        coordination_type: parsed_attr(elem, "coordination-type")?,
    })
}

fn bind_time_of_day(elem: &Element) -> Result<TimeOfDay> {
    Ok(TimeOfDay {
        hour: parsed_attr(elem, "hour")?,
        minute: parsed_attr(elem, "minute")?,
        second: parsed_attr(elem, "second")?,
        millisecond: parsed_attr(elem, "millisecond")?,
    })
}

fn bind_attributes(elem: &Element) -> Result<Attributes> {
    Ok(Attributes {
        description: text(elem, "description"),
        ids: bind_all(elem, "id", bind_id)?,
        embedded_id: bind_opt(elem, "embedded-id", bind_embedded_id)?,
        basics: bind_all(elem, "basic", bind_basic)?,
        versions: bind_all(elem, "version", bind_version)?,
        many_to_ones: bind_all(elem, "many-to-one", bind_many_to_one)?,
        one_to_manys: bind_all(elem, "one-to-many", bind_one_to_many)?,
        one_to_ones: bind_all(elem, "one-to-one", bind_one_to_one)?,
        many_to_manys: bind_all(elem, "many-to-many", bind_many_to_many)?,
        element_collections: bind_all(elem, "element-collection", bind_element_collection)?,
        embeddeds: bind_all(elem, "embedded", bind_embedded)?,
        transients: bind_all(elem, "transient", bind_transient)?,
    })
}

fn bind_column(elem: &Element) -> Result<Column> {
    Ok(Column {
        name: attr(elem, "name"),
        unique: bool_attr(elem, "unique")?,
        nullable: bool_attr(elem, "nullable")?,
        insertable: bool_attr(elem, "insertable")?,
        updatable: bool_attr(elem, "updatable")?,
        column_definition: attr(elem, "column-definition"),
        table: attr(elem, "table"),
        length: parsed_attr(elem, "length")?,
        precision: parsed_attr(elem, "precision")?,
        scale: parsed_attr(elem, "scale")?,
    })
}

fn bind_generated_value(elem: &Element) -> Result<GeneratedValue> {
    Ok(GeneratedValue {
        strategy: parsed_attr(elem, "strategy")?,
        generator: attr(elem, "generator"),
    })
}

fn bind_id(elem: &Element) -> Result<Id> {
    Ok(Id {
        name: required_attr(elem, "name")?,
        access: parsed_attr(elem, "access")?,
        column: bind_opt(elem, "column", bind_column)?,
        generated_value: bind_opt(elem, "generated-value", bind_generated_value)?,
        temporal: parsed_text(elem, "temporal")?,
    })
}

fn bind_embedded_id(elem: &Element) -> Result<EmbeddedId> {
    Ok(EmbeddedId {
        name: required_attr(elem, "name")?,
        access: parsed_attr(elem, "access")?,
        attribute_overrides: bind_all(elem, "attribute-override", bind_attribute_override)?,
    })
}

fn bind_basic(elem: &Element) -> Result<Basic> {
    Ok(Basic {
        name: required_attr(elem, "name")?,
        fetch: parsed_attr(elem, "fetch")?,
        optional: bool_attr(elem, "optional")?,
        access: parsed_attr(elem, "access")?,
        column: bind_opt(elem, "column", bind_column)?,
        lob: flag(elem, "lob"),
        temporal: parsed_text(elem, "temporal")?,
        enumerated: parsed_text(elem, "enumerated")?,
        convert: text(elem, "convert"),
    })
}

fn bind_version(elem: &Element) -> Result<Version> {
    Ok(Version {
        name: required_attr(elem, "name")?,
        access: parsed_attr(elem, "access")?,
        column: bind_opt(elem, "column", bind_column)?,
        temporal: parsed_text(elem, "temporal")?,
    })
}

fn bind_join_column(elem: &Element) -> Result<JoinColumn> {
    Ok(JoinColumn {
        name: attr(elem, "name"),
        referenced_column_name: attr(elem, "referenced-column-name"),
        unique: bool_attr(elem, "unique")?,
        nullable: bool_attr(elem, "nullable")?,
        insertable: bool_attr(elem, "insertable")?,
        updatable: bool_attr(elem, "updatable")?,
    })
}

fn bind_join_table(elem: &Element) -> Result<JoinTable> {
    Ok(JoinTable {
        name: attr(elem, "name"),
        catalog: attr(elem, "catalog"),
        schema: attr(elem, "schema"),
        join_columns: bind_all(elem, "join-column", bind_join_column)?,
        inverse_join_columns: bind_all(elem, "inverse-join-column", bind_join_column)?,
        unique_constraints: bind_all(elem, "unique-constraint", bind_unique_constraint)?,
    })
}

fn bind_collection_table(elem: &Element) -> Result<CollectionTable> {
    Ok(CollectionTable {
        name: attr(elem, "name"),
        catalog: attr(elem, "catalog"),
        schema: attr(elem, "schema"),
        join_columns: bind_all(elem, "join-column", bind_join_column)?,
        unique_constraints: bind_all(elem, "unique-constraint", bind_unique_constraint)?,
    })
}

fn bind_order_column(elem: &Element) -> Result<OrderColumn> {
    Ok(OrderColumn {
        name: attr(elem, "name"),
        nullable: bool_attr(elem, "nullable")?,
        insertable: bool_attr(elem, "insertable")?,
        updatable: bool_attr(elem, "updatable")?,
        column_definition: attr(elem, "column-definition"),
    })
}

/// `map-key` and `map-key-*` children, `None` when the collection is not a map
fn bind_map_key(elem: &Element) -> Result<Option<MapKey>> {
    let is_map = elem
        .children
        .iter()
        .any(|c| c.local_name() == "map-key" || c.local_name().starts_with("map-key-"));
    if !is_map {
        return Ok(None);
    }

    Ok(Some(MapKey {
        name: elem.child("map-key").and_then(|k| attr(k, "name")),
        class: elem
            .child("map-key-class")
            .map(|k| required_attr(k, "class"))
            .transpose()?,
        temporal: parsed_text(elem, "map-key-temporal")?,
        enumerated: parsed_text(elem, "map-key-enumerated")?,
        attribute_overrides: bind_all(elem, "map-key-attribute-override", bind_attribute_override)?,
        column: bind_opt(elem, "map-key-column", bind_column)?,
        join_columns: bind_all(elem, "map-key-join-column", bind_join_column)?,
    }))
}

/// `cascade-all`, `cascade-persist`, ... become [`CascadeType`]s
fn bind_cascade(elem: &Element) -> Result<Vec<CascadeType>> {
    let cascade = match elem.child("cascade") {
        Some(cascade) => cascade,
        None => return Ok(Vec::new()),
    };

    cascade
        .children
        .iter()
        .map(|child| {
            child
                .local_name()
                .strip_prefix("cascade-")
                .ok_or_else(|| binding_error(cascade, format!("unexpected <{}>", child.local_name())))?
                .to_ascii_uppercase()
                .parse()
        })
        .collect()
}

fn bind_many_to_one(elem: &Element) -> Result<ManyToOne> {
    Ok(ManyToOne {
        name: required_attr(elem, "name")?,
        target_entity: attr(elem, "target-entity"),
        fetch: parsed_attr(elem, "fetch")?,
        optional: bool_attr(elem, "optional")?,
        access: parsed_attr(elem, "access")?,
        maps_id: attr(elem, "maps-id"),
        id: bool_attr(elem, "id")?,
        join_columns: bind_all(elem, "join-column", bind_join_column)?,
        join_table: bind_opt(elem, "join-table", bind_join_table)?,
        cascade: bind_cascade(elem)?,
    })
}

fn bind_one_to_many(elem: &Element) -> Result<OneToMany> {
    Ok(OneToMany {
        name: required_attr(elem, "name")?,
        target_entity: attr(elem, "target-entity"),
        fetch: parsed_attr(elem, "fetch")?,
        access: parsed_attr(elem, "access")?,
        mapped_by: attr(elem, "mapped-by"),
        orphan_removal: bool_attr(elem, "orphan-removal")?,
        order_by: text(elem, "order-by"),
        order_column: bind_opt(elem, "order-column", bind_order_column)?,
        map_key: bind_map_key(elem)?,
        join_table: bind_opt(elem, "join-table", bind_join_table)?,
        join_columns: bind_all(elem, "join-column", bind_join_column)?,
        cascade: bind_cascade(elem)?,
    })
}

fn bind_one_to_one(elem: &Element) -> Result<OneToOne> {
    Ok(OneToOne {
        name: required_attr(elem, "name")?,
        target_entity: attr(elem, "target-entity"),
        fetch: parsed_attr(elem, "fetch")?,
        optional: bool_attr(elem, "optional")?,
        access: parsed_attr(elem, "access")?,
        mapped_by: attr(elem, "mapped-by"),
        orphan_removal: bool_attr(elem, "orphan-removal")?,
        maps_id: attr(elem, "maps-id"),
        id: bool_attr(elem, "id")?,
        primary_key_join_columns: bind_all(
            elem,
            "primary-key-join-column",
            bind_primary_key_join_column,
        )?,
        join_columns: bind_all(elem, "join-column", bind_join_column)?,
        join_table: bind_opt(elem, "join-table", bind_join_table)?,
        cascade: bind_cascade(elem)?,
    })
}

fn bind_many_to_many(elem: &Element) -> Result<ManyToMany> {
    Ok(ManyToMany {
        name: required_attr(elem, "name")?,
        target_entity: attr(elem, "target-entity"),
        fetch: parsed_attr(elem, "fetch")?,
        access: parsed_attr(elem, "access")?,
        mapped_by: attr(elem, "mapped-by"),
        order_by: text(elem, "order-by"),
        order_column: bind_opt(elem, "order-column", bind_order_column)?,
        map_key: bind_map_key(elem)?,
        join_table: bind_opt(elem, "join-table", bind_join_table)?,
        cascade: bind_cascade(elem)?,
    })
}

fn bind_element_collection(elem: &Element) -> Result<ElementCollection> {
    Ok(ElementCollection {
        name: required_attr(elem, "name")?,
        target_class: attr(elem, "target-class"),
        fetch: parsed_attr(elem, "fetch")?,
        access: parsed_attr(elem, "access")?,
        order_by: text(elem, "order-by"),
        order_column: bind_opt(elem, "order-column", bind_order_column)?,
        map_key: bind_map_key(elem)?,
        column: bind_opt(elem, "column", bind_column)?,
        temporal: parsed_text(elem, "temporal")?,
        enumerated: parsed_text(elem, "enumerated")?,
        lob: flag(elem, "lob"),
        attribute_overrides: bind_all(elem, "attribute-override", bind_attribute_override)?,
        association_overrides: bind_all(elem, "association-override", bind_association_override)?,
        collection_table: bind_opt(elem, "collection-table", bind_collection_table)?,
    })
}

fn bind_embedded(elem: &Element) -> Result<Embedded> {
    Ok(Embedded {
        name: required_attr(elem, "name")?,
        access: parsed_attr(elem, "access")?,
        attribute_overrides: bind_all(elem, "attribute-override", bind_attribute_override)?,
        association_overrides: bind_all(elem, "association-override", bind_association_override)?,
    })
}

fn bind_transient(elem: &Element) -> Result<Transient> {
    Ok(Transient {
        name: required_attr(elem, "name")?,
    })
}

fn bind_converter(elem: &Element) -> Result<Converter> {
    Ok(Converter {
        name: required_attr(elem, "name")?,
        class: required_attr(elem, "class")?,
    })
}

fn bind_type_converter(elem: &Element) -> Result<TypeConverter> {
    Ok(TypeConverter {
        name: required_attr(elem, "name")?,
        data_type: attr(elem, "data-type"),
        object_type: attr(elem, "object-type"),
    })
}

fn bind_conversion_value(elem: &Element) -> Result<ConversionValue> {
    Ok(ConversionValue {
        data_value: required_attr(elem, "data-value")?,
        object_value: required_attr(elem, "object-value")?,
    })
}

fn bind_object_type_converter(elem: &Element) -> Result<ObjectTypeConverter> {
    Ok(ObjectTypeConverter {
        name: required_attr(elem, "name")?,
        data_type: attr(elem, "data-type"),
        object_type: attr(elem, "object-type"),
        conversion_values: bind_all(elem, "conversion-value", bind_conversion_value)?,
        default_object_value: text(elem, "default-object-value"),
    })
}
