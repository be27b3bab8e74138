//! Normalized, generics-aware type and field metadata.
//!
//! [`TypeMetadata`] is built once per generation pass from a catalog entry
//! (plus optional concrete type arguments) and is immutable afterwards.
//! [`FieldMetadata`] resolves each declared field through the owner's
//! generic parameter bindings so that every field maps to exactly one
//! concrete [`TypeMetadata`].

use crate::catalog::TypeCatalog;
use crate::description::{FieldDescription, GenerationRequest, TypeDescription, TypeKind};
use crate::error::{FixtureError, FixtureResult};
use crate::known;
use crate::type_ref::{PrimitiveKind, TypeRef};

/// Structural shape of a resolved type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeShape {
    /// A primitive scalar.
    Primitive(PrimitiveKind),
    /// An array; the component is available via [`TypeMetadata::component`].
    Array,
    /// An enum described in the catalog.
    Enum,
    /// Any other declared type.
    Class,
}

/// One generic parameter and its concrete substitution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenericParameter {
    /// Parameter name as declared (`T`), or positional (`arg0`) when undeclared.
    pub name: String,
    /// Concrete type bound for this pass.
    pub concrete: TypeMetadata,
}

/// Normalized view of a type for one generation pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeMetadata {
    type_ref: TypeRef,
    package_name: String,
    simple_name: String,
    qualified_name: String,
    generic_parameters: Vec<GenericParameter>,
    shape: TypeShape,
    described: bool,
    enum_constants: Vec<String>,
    component: Option<Box<TypeMetadata>>,
}

impl TypeMetadata {
    /// Resolve a described type for a generation pass.
    ///
    /// `arguments`, when present, must match the declared generic parameter
    /// count; otherwise each parameter is bound to its declared bound.
    pub fn resolve(
        catalog: &TypeCatalog,
        description: &TypeDescription,
        arguments: Option<&[TypeRef]>,
    ) -> FixtureResult<Self> {
        let package = description.package.as_str();
        let declared = description.type_parameters.len();

        let concrete: Vec<TypeRef> = match arguments {
            Some(arguments) => {
                if arguments.len() != declared {
                    return Err(FixtureError::GenericArityMismatch {
                        type_name: description.qualified_name(),
                        declared,
                        supplied: arguments.len(),
                    });
                }
                arguments
                    .iter()
                    .map(|a| catalog.qualify_type(a, package))
                    .collect()
            }
            None => default_arguments(catalog, description),
        };

        let type_ref = TypeRef::generic(description.qualified_name(), concrete);
        Self::of(catalog, &type_ref)
    }

    /// Build metadata for a qualified, variable-free type reference.
    pub fn of(catalog: &TypeCatalog, type_ref: &TypeRef) -> FixtureResult<Self> {
        match type_ref {
            TypeRef::Primitive(kind) => Ok(Self {
                type_ref: type_ref.clone(),
                package_name: String::new(),
                simple_name: kind.keyword().to_string(),
                qualified_name: kind.keyword().to_string(),
                generic_parameters: Vec::new(),
                shape: TypeShape::Primitive(*kind),
                described: false,
                enum_constants: Vec::new(),
                component: None,
            }),
            TypeRef::Array(component) => {
                let component = Self::of(catalog, component)?;
                Ok(Self {
                    type_ref: type_ref.clone(),
                    package_name: component.package_name.clone(),
                    simple_name: format!("{}[]", component.simple_name),
                    qualified_name: format!("{}[]", component.qualified_name),
                    generic_parameters: Vec::new(),
                    shape: TypeShape::Array,
                    described: false,
                    enum_constants: Vec::new(),
                    component: Some(Box::new(component)),
                })
            }
            // A variable that survived substitution erases to Object.
            TypeRef::Variable(_) => Self::of(catalog, &TypeRef::named(known::OBJECT)),
            TypeRef::Declared { name, arguments } => {
                let description = catalog.get(name);

                let parameter_names: Vec<String> = match description {
                    Some(desc) => {
                        let declared = desc.type_parameters.len();
                        if !arguments.is_empty() && arguments.len() != declared {
                            return Err(FixtureError::GenericArityMismatch {
                                type_name: name.clone(),
                                declared,
                                supplied: arguments.len(),
                            });
                        }
                        desc.parameter_names()
                    }
                    None => (0..arguments.len()).map(|i| format!("arg{i}")).collect(),
                };

                // Raw use of a described generic type binds the declared bounds.
                let arguments: Vec<TypeRef> = match description {
                    Some(desc) if arguments.is_empty() => default_arguments(catalog, desc),
                    _ => arguments.clone(),
                };

                let generic_parameters = parameter_names
                    .into_iter()
                    .zip(arguments.iter())
                    .map(|(name, argument)| {
                        Ok(GenericParameter {
                            name,
                            concrete: Self::of(catalog, argument)?,
                        })
                    })
                    .collect::<FixtureResult<Vec<_>>>()?;

                let (shape, enum_constants) = match description {
                    Some(desc) if desc.kind == TypeKind::Enum => {
                        (TypeShape::Enum, desc.enum_constants.clone())
                    }
                    _ => (TypeShape::Class, Vec::new()),
                };

                Ok(Self {
                    type_ref: TypeRef::generic(name.clone(), arguments),
                    package_name: known::package_of(name).to_string(),
                    simple_name: known::simple_name_of(name).to_string(),
                    qualified_name: name.clone(),
                    generic_parameters,
                    shape,
                    described: description.is_some(),
                    enum_constants,
                    component: None,
                })
            }
        }
    }

    /// The fully substituted type reference.
    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    /// Package name; empty for primitives and the default package.
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// Simple name without generics.
    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    /// Qualified name without generics (arrays as `component[]`).
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Qualified name of the companion fixture type.
    pub fn fixture_qualified_name(&self) -> String {
        format!("{}Fixture", self.qualified_name)
    }

    /// Simple name of the companion fixture type.
    pub fn fixture_simple_name(&self) -> String {
        format!("{}Fixture", self.simple_name)
    }

    /// Generic parameters with their concrete substitutions, in declaration order.
    pub fn generic_parameters(&self) -> &[GenericParameter] {
        &self.generic_parameters
    }

    /// Whether the type has generic parameters.
    pub fn is_generic(&self) -> bool {
        !self.generic_parameters.is_empty()
    }

    /// Concrete substitution of a named generic parameter.
    pub fn binding(&self, parameter: &str) -> Option<&TypeMetadata> {
        self.generic_parameters
            .iter()
            .find(|p| p.name == parameter)
            .map(|p| &p.concrete)
    }

    /// Structural shape.
    pub fn shape(&self) -> TypeShape {
        self.shape
    }

    /// Whether the type is described in the catalog.
    pub fn is_described(&self) -> bool {
        self.described
    }

    /// Declared enumerators, for enums.
    pub fn enum_constants(&self) -> &[String] {
        &self.enum_constants
    }

    /// Component type, for arrays.
    pub fn component(&self) -> Option<&TypeMetadata> {
        self.component.as_deref()
    }
}

/// Bind each declared parameter to its bound, with variables and the
/// parameters of raw generic catalog types erased to `Object`.
///
/// The result never contains a raw generic catalog type, so resolving it
/// cannot re-enter this function (`Node<T extends Node>` binds `Node<Object>`).
fn default_arguments(catalog: &TypeCatalog, description: &TypeDescription) -> Vec<TypeRef> {
    let names = description.parameter_names();
    let object = TypeRef::named(known::OBJECT);
    description
        .type_parameters
        .iter()
        .map(|p| match &p.bound {
            Some(bound) => {
                let bound = catalog
                    .qualify_type(&bound.bind_variables(&names), &description.package)
                    .substitute(&|_: &str| Some(object.clone()));
                erase_raw_generics(catalog, &bound)
            }
            None => object.clone(),
        })
        .collect()
}

fn erase_raw_generics(catalog: &TypeCatalog, type_ref: &TypeRef) -> TypeRef {
    match type_ref {
        TypeRef::Declared { name, arguments } if arguments.is_empty() => {
            match catalog.get(name) {
                Some(desc) if !desc.type_parameters.is_empty() => TypeRef::generic(
                    name.clone(),
                    vec![TypeRef::named(known::OBJECT); desc.type_parameters.len()],
                ),
                _ => type_ref.clone(),
            }
        }
        TypeRef::Declared { name, arguments } => TypeRef::generic(
            name.clone(),
            arguments
                .iter()
                .map(|a| erase_raw_generics(catalog, a))
                .collect(),
        ),
        TypeRef::Array(component) => TypeRef::array_of(erase_raw_generics(catalog, component)),
        other => other.clone(),
    }
}

/// Normalized view of one field of a target type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldMetadata {
    name: String,
    index: usize,
    owner: String,
    field: FieldDescription,
    declared: TypeRef,
    resolved: TypeMetadata,
}

impl FieldMetadata {
    /// Resolve a field of `owner` through the owner's generic bindings.
    pub fn resolve(
        catalog: &TypeCatalog,
        owner: &TypeMetadata,
        owner_description: &TypeDescription,
        index: usize,
        field: &FieldDescription,
    ) -> FixtureResult<Self> {
        let parameters = owner_description.parameter_names();
        let declared = catalog.qualify_type(
            &field.declared_type.bind_variables(&parameters),
            &owner_description.package,
        );
        let concrete = declared.substitute(&|name: &str| {
            owner.binding(name).map(|m| m.type_ref().clone())
        });
        let resolved = TypeMetadata::of(catalog, &concrete)?;

        Ok(Self {
            name: field.name.clone(),
            index,
            owner: owner.qualified_name().to_string(),
            field: field.clone(),
            declared,
            resolved,
        })
    }

    /// Field identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declaration index within the owning type.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Qualified name of the owning type.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The raw field description (modifiers, directives).
    pub fn field(&self) -> &FieldDescription {
        &self.field
    }

    /// Declared type, qualified, with generic parameters unsubstituted.
    pub fn declared_type(&self) -> &TypeRef {
        &self.declared
    }

    /// Resolved concrete type.
    pub fn resolved(&self) -> &TypeMetadata {
        &self.resolved
    }

    /// Whether the field is transient.
    pub fn is_transient(&self) -> bool {
        self.field.is_transient
    }
}

/// A generation target: its metadata and the fields it owns.
#[derive(Clone, Debug)]
pub struct TargetModel {
    metadata: TypeMetadata,
    description: TypeDescription,
    fields: Vec<FieldMetadata>,
}

impl TargetModel {
    /// Resolve a generation request against the catalog. Static fields are skipped.
    pub fn resolve(catalog: &TypeCatalog, request: &GenerationRequest) -> FixtureResult<Self> {
        let description = catalog.require(&request.type_name)?;
        let metadata =
            TypeMetadata::resolve(catalog, description, request.type_arguments.as_deref())?;

        let fields = description
            .fields
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.is_static)
            .map(|(i, f)| FieldMetadata::resolve(catalog, &metadata, description, i, f))
            .collect::<FixtureResult<Vec<_>>>()?;

        Ok(Self {
            metadata,
            description: description.clone(),
            fields,
        })
    }

    /// Type metadata of the target.
    pub fn metadata(&self) -> &TypeMetadata {
        &self.metadata
    }

    /// Raw description of the target (directives).
    pub fn description(&self) -> &TypeDescription {
        &self.description
    }

    /// Instance fields, in declaration order.
    pub fn fields(&self) -> &[FieldMetadata] {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::{FieldDescription, TypeParameter};

    fn ty(text: &str) -> TypeRef {
        text.parse().unwrap()
    }

    fn catalog() -> TypeCatalog {
        TypeCatalog::from_descriptions(vec![
            TypeDescription::class("com.acme", "Box")
                .with_type_parameter(TypeParameter::new("T"))
                .with_field(FieldDescription::new("value", ty("T")))
                .with_field(FieldDescription::new("values", ty("List<T>")))
                .with_field(FieldDescription::new("COUNT", ty("int")).as_static()),
            TypeDescription::class("com.acme", "Ranked").with_type_parameter(TypeParameter {
                name: "T".into(),
                bound: Some(ty("Comparable<T>")),
            }),
            TypeDescription::enumeration("com.acme", "Color", ["RED", "GREEN"]),
        ])
        .unwrap()
    }

    #[test]
    fn resolves_explicit_instantiation() {
        let catalog = catalog();
        let request = GenerationRequest::new("com.acme.Box").with_arguments(vec![ty("String")]);
        let model = TargetModel::resolve(&catalog, &request).unwrap();

        let meta = model.metadata();
        assert_eq!(meta.qualified_name(), "com.acme.Box");
        assert_eq!(meta.simple_name(), "Box");
        assert_eq!(meta.package_name(), "com.acme");
        assert_eq!(meta.fixture_qualified_name(), "com.acme.BoxFixture");
        assert_eq!(meta.generic_parameters().len(), 1);
        assert_eq!(meta.binding("T").unwrap().qualified_name(), "java.lang.String");

        // Static field skipped.
        assert_eq!(model.fields().len(), 2);
        assert_eq!(model.fields()[0].resolved().qualified_name(), "java.lang.String");
        assert_eq!(
            model.fields()[1].resolved().type_ref().to_string(),
            "java.util.List<java.lang.String>"
        );
        assert_eq!(model.fields()[1].declared_type().to_string(), "java.util.List<T>");
    }

    #[test]
    fn arity_mismatch_is_fatal() {
        let catalog = catalog();
        let request = GenerationRequest::new("com.acme.Box")
            .with_arguments(vec![ty("String"), ty("Integer")]);
        let err = TargetModel::resolve(&catalog, &request).unwrap_err();
        assert_eq!(
            err,
            FixtureError::GenericArityMismatch {
                type_name: "com.acme.Box".into(),
                declared: 1,
                supplied: 2,
            }
        );
    }

    #[test]
    fn default_instantiation_uses_bounds() {
        let catalog = catalog();
        let model = TargetModel::resolve(&catalog, &GenerationRequest::new("com.acme.Box")).unwrap();
        assert_eq!(model.metadata().binding("T").unwrap().qualified_name(), known::OBJECT);

        let ranked =
            TargetModel::resolve(&catalog, &GenerationRequest::new("com.acme.Ranked")).unwrap();
        assert_eq!(
            ranked.metadata().binding("T").unwrap().type_ref().to_string(),
            "java.lang.Comparable<java.lang.Object>"
        );
    }

    #[test]
    fn raw_generic_bounds_terminate() {
        let catalog = TypeCatalog::from_descriptions(vec![
            TypeDescription::class("com.acme", "Node")
                .with_type_parameter(TypeParameter {
                    name: "T".into(),
                    bound: Some(ty("Node")),
                })
                .with_field(FieldDescription::new("next", ty("Node")))
                .with_field(FieldDescription::new("value", ty("T"))),
            TypeDescription::class("com.acme", "Left").with_type_parameter(TypeParameter {
                name: "L".into(),
                bound: Some(ty("Right[]")),
            }),
            TypeDescription::class("com.acme", "Right").with_type_parameter(TypeParameter {
                name: "R".into(),
                bound: Some(ty("Left")),
            }),
        ])
        .unwrap();

        let node = TargetModel::resolve(&catalog, &GenerationRequest::new("com.acme.Node")).unwrap();
        assert_eq!(
            node.metadata().type_ref().to_string(),
            "com.acme.Node<com.acme.Node<java.lang.Object>>"
        );
        assert_eq!(
            node.fields()[0].resolved().type_ref().to_string(),
            "com.acme.Node<com.acme.Node<java.lang.Object>>"
        );

        let left = TargetModel::resolve(&catalog, &GenerationRequest::new("com.acme.Left")).unwrap();
        assert_eq!(
            left.metadata().binding("L").unwrap().type_ref().to_string(),
            "com.acme.Right<java.lang.Object>[]"
        );
        let right =
            TargetModel::resolve(&catalog, &GenerationRequest::new("com.acme.Right")).unwrap();
        assert_eq!(
            right.metadata().binding("R").unwrap().type_ref().to_string(),
            "com.acme.Left<java.lang.Object>"
        );
    }

    #[test]
    fn unknown_target_is_reported() {
        let err =
            TargetModel::resolve(&catalog(), &GenerationRequest::new("com.acme.Nope")).unwrap_err();
        assert!(matches!(err, FixtureError::UnknownTypeReference(_)));
    }

    #[test]
    fn enum_and_array_shapes() {
        let catalog = catalog();
        let color = TypeMetadata::of(&catalog, &ty("com.acme.Color")).unwrap();
        assert_eq!(color.shape(), TypeShape::Enum);
        assert_eq!(color.enum_constants(), ["RED".to_string(), "GREEN".to_string()]);
        assert!(color.is_described());

        let array = TypeMetadata::of(&catalog, &ty("java.lang.String[]")).unwrap();
        assert_eq!(array.shape(), TypeShape::Array);
        assert_eq!(array.qualified_name(), "java.lang.String[]");
        assert_eq!(array.component().unwrap().simple_name(), "String");
    }

    #[test]
    fn undeclared_generics_use_positional_names() {
        let meta = TypeMetadata::of(&catalog(), &ty("java.util.Map<java.lang.String, int>")).unwrap();
        let names: Vec<&str> = meta.generic_parameters().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["arg0", "arg1"]);
    }
}
