use pretty_assertions::assert_eq;
use proptest::prelude::*;
use scenegen_codegen::{
    CodeGenerator, FormatError, FormatProfile, Formatter, GenerationConfig, JsxGenerator, Parser,
    SourceFormatter,
};
use scenegen_graph::{AnimationClip, LoadedModel, MeshBinding, NodeKind, SceneGraph, SceneNode};

fn model() -> LoadedModel {
    LoadedModel::new(SceneGraph::new(
        SceneNode::named(NodeKind::Group, "Scene")
            .with_child(SceneNode::mesh("Body", MeshBinding::new("body", Some("Paint".into()))))
            .with_child(SceneNode::mesh("Wheel.FL", MeshBinding::new("wheel", None)))
            .with_child(SceneNode::mesh("Wheel.FR", MeshBinding::new("wheel", None))),
    ))
    .with_animations(vec![AnimationClip::new("Drive")])
}

fn configs() -> impl Strategy<Value = GenerationConfig> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        1u8..=8,
        40usize..140,
    )
        .prop_map(|(types, instance, verbose, keepgroups, aggressive, meta, precision, width)| {
            GenerationConfig::new()
                .with_types(types)
                .with_instance(instance)
                .with_verbose(verbose)
                .with_keepgroups(keepgroups)
                .with_aggressive(aggressive)
                .with_meta(meta)
                .with_precision(precision)
                .with_printwidth(width)
        })
}

proptest! {
    #[test]
    fn prop_generated_code_formats_under_its_own_profile(config in configs()) {
        let code = JsxGenerator::new().generate("car.glb", &model(), &config);
        let profile = FormatProfile::for_config(&config);
        let formatted = SourceFormatter::new().format(&code, &profile);
        prop_assert!(formatted.is_ok(), "{formatted:?}");
    }
}

#[test]
fn typed_code_does_not_parse_as_babel() {
    let config = GenerationConfig::new().with_types(true);
    let code = JsxGenerator::new().generate("car.glb", &model(), &config);
    let babel = FormatProfile {
        parser: Parser::Babel,
        print_width: 100,
    };
    assert!(matches!(
        SourceFormatter::new().format(&code, &babel),
        Err(FormatError::TypeSyntax { .. })
    ));
}

#[test]
fn formatting_generated_code_is_stable() {
    let config = GenerationConfig::default();
    let code = JsxGenerator::new().generate("car.glb", &model(), &config);
    let profile = FormatProfile::for_config(&config);
    let once = SourceFormatter::new().format(&code, &profile).unwrap();
    let twice = SourceFormatter::new().format(&once, &profile).unwrap();
    assert_eq!(once, twice);
    assert_eq!(once, code);
}

#[test]
fn dotted_names_use_bracket_access() {
    let code = JsxGenerator::new().generate("car.glb", &model(), &GenerationConfig::default());
    assert!(code.contains("geometry={nodes['Wheel.FL'].geometry}"));
    assert!(code.contains("material={materials.Paint}"));
    assert!(code.contains("const { actions } = useAnimations(animations, group)"));
}
