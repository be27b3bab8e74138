//! End-to-end generation scenarios.

use fixturegen_engine::{
    CreationKind, FixtureEngine, FixtureError, GeneratedFixture, GenerationConfig,
    GenerationRequest, TypeCatalog,
};
use fixturegen_types::{
    ConstantDirective, CreatorDirective, FieldDescription, TypeDescription, TypeParameter, TypeRef,
};

fn ty(text: &str) -> TypeRef {
    text.parse().unwrap()
}

fn engine(descriptions: Vec<TypeDescription>) -> FixtureEngine {
    let catalog = TypeCatalog::from_descriptions(descriptions).unwrap();
    FixtureEngine::with_config(catalog, GenerationConfig::default().with_seed(42)).unwrap()
}

fn generate(engine: &FixtureEngine, type_name: &str) -> GeneratedFixture {
    engine.generate(&GenerationRequest::new(type_name)).unwrap()
}

fn value_of<'f>(fixture: &'f GeneratedFixture, name: &str) -> &'f str {
    &fixture
        .constants
        .iter()
        .find(|c| c.name == name)
        .unwrap_or_else(|| panic!("no constant {name} in {:?}", fixture.constants))
        .value
}

#[test]
fn string_field_gets_named_placeholder() {
    let engine = engine(vec![TypeDescription::class("com.acme", "Item")
        .with_field(FieldDescription::new("stringField", ty("String")))]);
    let fixture = generate(&engine, "com.acme.Item");

    assert_eq!(value_of(&fixture, "STRING_FIELD"), "\"STRING_FIELD_VALUE\"");
    assert_eq!(fixture.constants[0].declared_type, "String");
}

#[test]
fn uuid_field_gets_fixed_parse_expression() {
    let engine = engine(vec![TypeDescription::class("com.acme", "Item")
        .with_field(FieldDescription::new("uuidField", ty("java.util.UUID")))]);
    let fixture = generate(&engine, "com.acme.Item");

    let value = value_of(&fixture, "UUID_FIELD");
    let literal = value
        .strip_prefix("java.util.UUID.fromString(\"")
        .and_then(|rest| rest.strip_suffix("\")"))
        .unwrap();
    assert!(uuid::Uuid::parse_str(literal).is_ok());
    assert_eq!(fixture.constants[0].declared_type, "java.util.UUID");
}

#[test]
fn naming_directives_share_the_field_value() {
    let engine = engine(vec![TypeDescription::class("com.acme", "Item").with_field(
        FieldDescription::new("itemId", ty("UUID"))
            .with_constant(ConstantDirective::named("ITEM_ID_1"))
            .with_constant(ConstantDirective::named("ITEM_ID_2")),
    )]);
    let fixture = generate(&engine, "com.acme.Item");

    assert_eq!(fixture.constants.len(), 2);
    assert_eq!(value_of(&fixture, "ITEM_ID_1"), value_of(&fixture, "ITEM_ID_2"));
    assert_eq!(fixture.methods[0].body, "new Item(ITEM_ID_1)");
}

#[test]
fn cross_references_call_the_upstream_default_method() {
    let engine = engine(vec![
        TypeDescription::class("com.acme", "Order")
            .as_fixture()
            .with_field(FieldDescription::new("orderId", ty("UUID"))),
        TypeDescription::class("com.acme.cart", "Cart")
            .as_fixture()
            .with_field(FieldDescription::new("order", ty("com.acme.Order")))
            .with_field(
                FieldDescription::new("lastOrderId", ty("com.acme.Order")).with_constant(
                    ConstantDirective::named("LAST_ORDER").with_reference("ORDER_ID"),
                ),
            ),
    ]);
    let report = engine.run(&[
        GenerationRequest::new("com.acme.cart.Cart"),
        GenerationRequest::new("com.acme.Order"),
    ]);
    assert!(report.is_success(), "{report}");

    let cart = report.outcome("com.acme.cart.Cart").unwrap().result.as_ref().unwrap();
    assert_eq!(value_of(cart, "ORDER"), "com.acme.OrderFixture.createOrder()");
    assert_eq!(value_of(cart, "LAST_ORDER"), "com.acme.OrderFixture.ORDER_ID");
    assert_eq!(cart.relative_path, "com/acme/cart/CartFixture.java");
    assert!(cart
        .source
        .contains("public static final com.acme.Order ORDER = com.acme.OrderFixture.createOrder();"));
}

#[test]
fn constructor_directive_follows_declared_order() {
    let engine = engine(vec![TypeDescription::class("com.acme", "Item")
        .with_field(FieldDescription::new("intField", ty("int")))
        .with_field(FieldDescription::new("stringField", ty("String")))
        .with_creator(CreatorDirective::constructor(["stringField", "intField"]))]);
    let fixture = generate(&engine, "com.acme.Item");

    assert_eq!(fixture.methods.len(), 1);
    let method = &fixture.methods[0];
    assert_eq!(method.method_name, "createItemWithStringFieldAndIntField");
    assert_eq!(method.body, "new Item(STRING_FIELD, INT_FIELD)");
    assert_eq!(method.source_kind, CreationKind::Constructor);
}

#[test]
fn conflicting_directive_values_fail_the_pass() {
    let engine = engine(vec![TypeDescription::class("com.acme", "Item")
        .with_field(
            FieldDescription::new("first", ty("String"))
                .with_constant(ConstantDirective::named("SAMPLE")),
        )
        .with_field(
            FieldDescription::new("second", ty("String"))
                .with_constant(ConstantDirective::named("SAMPLE")),
        )]);
    let err = engine
        .generate(&GenerationRequest::new("com.acme.Item"))
        .unwrap_err();
    assert!(matches!(err, FixtureError::DuplicateConstantName { .. }), "{err}");
    assert!(engine.registry().is_empty());
}

#[test]
fn builder_directive_chains_prefixed_setters() {
    let engine = engine(vec![TypeDescription::class("com.acme", "Item")
        .with_field(FieldDescription::new("name", ty("String")))
        .with_field(FieldDescription::new("count", ty("Integer")))
        .with_creator(CreatorDirective::Builder {
            setters: vec!["count".into(), "name".into()],
            builder_method: "builder".into(),
            build_method: "build".into(),
            setter_prefix: Some("with".into()),
            name: None,
        })]);
    let fixture = generate(&engine, "com.acme.Item");

    assert_eq!(fixture.methods[0].method_name, "buildItemWithCountAndName");
    assert_eq!(
        fixture.methods[0].body,
        "Item.builder().withCount(COUNT).withName(NAME).build()"
    );
    assert_eq!(value_of(&fixture, "COUNT"), "0");
}

#[test]
fn generic_instantiation_substitutes_arguments() {
    let engine = engine(vec![
        TypeDescription::class("com.acme", "Box")
            .with_type_parameter(TypeParameter::new("T"))
            .with_field(FieldDescription::new("value", ty("T")))
            .with_field(FieldDescription::new("values", ty("java.util.List<T>"))),
        TypeDescription::enumeration("com.acme", "Color", ["RED", "GREEN"]),
    ]);
    let fixture = engine
        .generate(&GenerationRequest::new("com.acme.Box").with_arguments(vec![ty("Color")]))
        .unwrap();

    assert_eq!(value_of(&fixture, "VALUE"), "com.acme.Color.RED");
    assert_eq!(value_of(&fixture, "VALUES"), "new java.util.ArrayList<>()");
    assert_eq!(fixture.methods[0].return_type, "Box<Color>");
    assert_eq!(fixture.methods[0].body, "new Box<>(VALUE, VALUES)");
    assert!(fixture.source.contains("public class BoxFixture<T> {"));
    assert!(fixture
        .source
        .contains("public static final java.util.List<Color> VALUES = new java.util.ArrayList<>();"));

    let err = engine
        .generate(&GenerationRequest::new("com.acme.Box").with_arguments(vec![]))
        .unwrap_err();
    assert_eq!(
        err,
        FixtureError::GenericArityMismatch {
            type_name: "com.acme.Box".into(),
            declared: 1,
            supplied: 0,
        }
    );
}

#[test]
fn cycles_fail_and_block_dependents() {
    let engine = engine(vec![
        TypeDescription::class("com.acme", "A")
            .as_fixture()
            .with_field(FieldDescription::new("b", ty("B"))),
        TypeDescription::class("com.acme", "B")
            .as_fixture()
            .with_field(FieldDescription::new("a", ty("A"))),
        TypeDescription::class("com.acme", "C")
            .as_fixture()
            .with_field(FieldDescription::new("a", ty("A"))),
        TypeDescription::class("com.acme", "D")
            .as_fixture()
            .with_field(FieldDescription::new("label", ty("String"))),
    ]);
    let requests: Vec<GenerationRequest> = ["A", "B", "C", "D"]
        .iter()
        .map(|n| GenerationRequest::new(format!("com.acme.{n}")))
        .collect();
    let report = engine.run(&requests);

    assert_eq!(report.succeeded(), 1);
    assert_eq!(
        report.outcomes[0].result.as_ref().unwrap_err(),
        &FixtureError::CyclicFixtureDependency(vec![
            "com.acme.A".into(),
            "com.acme.B".into(),
            "com.acme.A".into(),
        ])
    );
    assert!(matches!(
        report.outcomes[2].result,
        Err(FixtureError::UnresolvedFixtureReference(_))
    ));
    assert!(report.outcomes[3].result.is_ok());
}

#[test]
fn explicit_values_break_reference_cycles() {
    let engine = engine(vec![
        TypeDescription::class("com.acme", "A").as_fixture().with_field(
            FieldDescription::new("b", ty("B"))
                .with_constant(ConstantDirective::named("B").with_value("null")),
        ),
        TypeDescription::class("com.acme", "B")
            .as_fixture()
            .with_field(FieldDescription::new("a", ty("A"))),
    ]);
    let report = engine.run(&[
        GenerationRequest::new("com.acme.B"),
        GenerationRequest::new("com.acme.A"),
    ]);
    assert!(report.is_success(), "{report}");

    let a = report.outcome("com.acme.A").unwrap().result.as_ref().unwrap();
    assert_eq!(value_of(a, "B"), "null");
    let b = report.outcome("com.acme.B").unwrap().result.as_ref().unwrap();
    assert_eq!(value_of(b, "A"), "AFixture.createA()");
}

#[test]
fn custom_providers_override_built_ins() {
    let catalog = TypeCatalog::from_descriptions(vec![TypeDescription::class("com.acme", "Item")
        .with_field(FieldDescription::new("label", ty("String")))
        .with_field(FieldDescription::new("count", ty("int")))
        .with_provider("String", "quote(field.constantName + '_CUSTOM')")])
    .unwrap();
    let config = GenerationConfig::default()
        .with_seed(1)
        .with_provider("scalar", "'42'")
        .with_provider("string", "quote('run-wide')");
    let engine = FixtureEngine::with_config(catalog, config).unwrap();
    let fixture = generate(&engine, "com.acme.Item");

    assert_eq!(value_of(&fixture, "LABEL"), "\"LABEL_CUSTOM\"");
    assert_eq!(value_of(&fixture, "COUNT"), "42");
}

#[test]
fn statement_bodies_are_rejected() {
    let engine = engine(vec![TypeDescription::class("com.acme", "Item")
        .with_field(FieldDescription::new("label", ty("String")))
        .with_provider("String", "{ return \"x\"; }")]);
    assert!(matches!(
        engine.generate(&GenerationRequest::new("com.acme.Item")),
        Err(FixtureError::UnsupportedProviderBody(_))
    ));
}

#[test]
fn composed_text_matches_layout() {
    let engine = engine(vec![TypeDescription::class("com.acme", "Item")
        .with_field(FieldDescription::new("label", ty("String")))
        .with_field(FieldDescription::new("active", ty("boolean")))
        .with_field(FieldDescription::new("COUNTER", ty("int")).as_static())]);
    let fixture = generate(&engine, "com.acme.Item");

    let expected = "\
// Generated by fixturegen. Do not edit.
package com.acme;

public class ItemFixture {

    public static final boolean ACTIVE = false;
    public static final String LABEL = \"LABEL_VALUE\";

    public static Item createItem() {
        return new Item(LABEL, ACTIVE);
    }
}
";
    assert_eq!(fixture.source, expected);
    assert_eq!(fixture.relative_path, "com/acme/ItemFixture.java");
}

#[test]
fn descriptions_load_from_json() {
    let json = r#"[
        { "package": "com.acme", "name": "Color", "kind": "enum", "enumConstants": ["RED"] },
        { "package": "com.acme", "name": "Item", "fixture": true,
          "fields": [
            { "name": "color", "type": "Color" },
            { "name": "tags", "type": "java.util.Set<String>" },
            { "name": "scores", "type": "int[]" }
          ],
          "creators": [{ "kind": "builder", "setters": ["color", "tags"] }] }
    ]"#;
    let descriptions: Vec<TypeDescription> = serde_json::from_str(json).unwrap();
    let engine = engine(descriptions);
    let fixture = generate(&engine, "com.acme.Item");

    assert_eq!(value_of(&fixture, "COLOR"), "com.acme.Color.RED");
    assert_eq!(value_of(&fixture, "TAGS"), "new java.util.HashSet<>()");
    assert_eq!(value_of(&fixture, "SCORES"), "new int[0]");
    assert_eq!(
        fixture.methods[0].body,
        "Item.builder().color(COLOR).tags(TAGS).build()"
    );

    let round_trip: GeneratedFixture =
        serde_json::from_str(&serde_json::to_string(&fixture).unwrap()).unwrap();
    assert_eq!(round_trip, fixture);
}
