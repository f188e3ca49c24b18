//! react-three-fiber JSX generation
//!
//! [`JsxGenerator`] mirrors a loaded scene as a `Model` component. The scene
//! is first lowered into a small [`Element`] tree (pruning and flattening
//! happen there), then printed with the configured line width.

use crate::config::GenerationConfig;
use crate::generator::CodeGenerator;
use indexmap::{IndexMap, IndexSet};
use scenegen_graph::{LoadedModel, NodeKind, RenderFlags, SceneNode, Transform};
use std::borrow::Cow;
use std::fmt::Write as _;

const INDENT: &str = "  ";

/// JSX / TSX generator for react-three-fiber
#[derive(Debug, Clone)]
pub struct JsxGenerator {
    component: String,
}

impl Default for JsxGenerator {
    fn default() -> Self {
        Self {
            component: "Model".to_string(),
        }
    }
}

impl JsxGenerator {
    /// Create generator emitting a `Model` component
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a different component name
    #[inline]
    #[must_use]
    pub fn with_component_name(mut self, name: impl Into<String>) -> Self {
        self.component = name.into();
        self
    }
}

impl CodeGenerator for JsxGenerator {
    fn generate(&self, file_name: &str, model: &LoadedModel, config: &GenerationConfig) -> String {
        let plan = Plan::collect(model, config);
        let url = js_string(&format!("/{file_name}"));
        let typed = config.types;
        let animated = model.has_animations();

        let mut out = String::new();
        let _ = writeln!(out, "/*\nAuto-generated by scenegen {}\nFile: {file_name}\n*/\n", crate::VERSION);

        // imports
        if typed {
            out.push_str("import * as THREE from 'three'\n");
        }
        if animated {
            out.push_str("import React, { useRef } from 'react'\n");
        } else {
            out.push_str("import React from 'react'\n");
        }
        let mut drei = vec!["useGLTF"];
        if animated {
            drei.push("useAnimations");
        }
        if plan.perspective {
            drei.push("PerspectiveCamera");
        }
        if plan.orthographic {
            drei.push("OrthographicCamera");
        }
        if !plan.instances.is_empty() {
            drei.push("Merged");
        }
        let _ = writeln!(out, "import {{ {} }} from '@react-three/drei'", drei.join(", "));
        if typed {
            out.push_str("import { GLTF } from 'three-stdlib'\n");
        }
        out.push('\n');

        if typed {
            plan.write_types(&mut out, model);
        }

        let load = if typed {
            format!("useGLTF({url}) as GLTFResult")
        } else {
            format!("useGLTF({url})")
        };

        if !plan.instances.is_empty() {
            plan.write_instances(&mut out, &load);
        }

        // component
        let props = if typed {
            "props: JSX.IntrinsicElements['group']"
        } else {
            "props"
        };
        let _ = writeln!(out, "export function {}({props}) {{", self.component);
        if animated {
            let group = if typed { "useRef<THREE.Group>(null)" } else { "useRef()" };
            let _ = writeln!(out, "{INDENT}const group = {group}");
        }
        if !plan.instances.is_empty() {
            let _ = writeln!(out, "{INDENT}const instances = React.useContext(context)");
        }
        let fields = if animated {
            "nodes, materials, animations"
        } else {
            "nodes, materials"
        };
        let _ = writeln!(out, "{INDENT}const {{ {fields} }} = {load}");
        if animated {
            let _ = writeln!(out, "{INDENT}const {{ actions }} = useAnimations(animations, group)");
        }
        let _ = writeln!(out, "{INDENT}return (");

        let mut wrapper = Element::new("group");
        if animated {
            wrapper.attrs.push(Attr::expr("ref", "group"));
        }
        wrapper.attrs.push(Attr::Spread("props"));
        wrapper.attrs.push(Attr::expr("dispose", "null"));
        wrapper.children = plan.lower_root(model.scene.root());
        wrapper.print(&mut out, 2, config.printwidth);

        let _ = writeln!(out, "{INDENT})");
        out.push_str("}\n\n");
        let _ = writeln!(out, "useGLTF.preload({url})");

        tracing::debug!(
            file = %file_name,
            dialect = ?config.dialect(),
            instances = plan.instances.len(),
            bytes = out.len(),
            "generated component source"
        );
        out
    }
}

/// One geometry routed through the `Merged` context
#[derive(Debug, Clone)]
struct Instance {
    name: String,
    source: String,
}

/// Everything gathered from the scene before printing
#[derive(Debug)]
struct Plan<'a> {
    config: &'a GenerationConfig,
    nodes: IndexMap<String, &'static str>,
    materials: IndexSet<String>,
    instances: IndexMap<String, Instance>,
    perspective: bool,
    orthographic: bool,
}

impl<'a> Plan<'a> {
    fn collect(model: &LoadedModel, config: &'a GenerationConfig) -> Self {
        let mut plan = Self {
            config,
            nodes: IndexMap::new(),
            materials: IndexSet::new(),
            instances: IndexMap::new(),
            perspective: false,
            orthographic: false,
        };

        let mut usage: IndexMap<String, (usize, String)> = IndexMap::new();
        model.scene.traverse(|node| {
            let key = node_key(node).into_owned();
            match node.kind() {
                NodeKind::Mesh => {
                    plan.nodes.insert(key.clone(), "THREE.Mesh");
                    if let Some(binding) = &node.mesh {
                        usage
                            .entry(binding.geometry.clone())
                            .or_insert((0, key))
                            .0 += 1;
                    }
                }
                NodeKind::SkinnedMesh => {
                    plan.nodes.insert(key, "THREE.SkinnedMesh");
                }
                NodeKind::Bone => {
                    plan.nodes.insert(key, "THREE.Bone");
                }
                NodeKind::PerspectiveCamera => plan.perspective = true,
                NodeKind::OrthographicCamera => plan.orthographic = true,
                NodeKind::Group | NodeKind::Object3D => {}
            }
            if let Some(material) = node.mesh.as_ref().and_then(|m| m.material.clone()) {
                plan.materials.insert(material);
            }
        });

        let threshold = if config.instanceall {
            1
        } else if config.instance {
            2
        } else {
            usize::MAX
        };
        let mut taken = IndexSet::new();
        for (geometry, (count, source)) in usage {
            if count >= threshold {
                let name = unique(instance_name(&geometry), &mut taken);
                plan.instances.insert(geometry, Instance { name, source });
            }
        }
        plan
    }

    fn write_types(&self, out: &mut String, model: &LoadedModel) {
        if model.has_animations() {
            let names: Vec<String> = model.animations.iter().map(|a| js_string(&a.name)).collect();
            let _ = writeln!(out, "type ActionName = {}\n", names.join(" | "));
            out.push_str("interface GLTFAction extends THREE.AnimationClip {\n");
            let _ = writeln!(out, "{INDENT}name: ActionName");
            out.push_str("}\n\n");
        }
        out.push_str("type GLTFResult = GLTF & {\n");
        let _ = writeln!(out, "{INDENT}nodes: {{");
        for (name, ty) in &self.nodes {
            let _ = writeln!(out, "{INDENT}{INDENT}{}: {ty}", property_name(name));
        }
        let _ = writeln!(out, "{INDENT}}}");
        let _ = writeln!(out, "{INDENT}materials: {{");
        for name in &self.materials {
            let _ = writeln!(
                out,
                "{INDENT}{INDENT}{}: THREE.MeshStandardMaterial",
                property_name(name)
            );
        }
        let _ = writeln!(out, "{INDENT}}}");
        if model.has_animations() {
            let _ = writeln!(out, "{INDENT}animations: GLTFAction[]");
        }
        out.push_str("}\n\n");
        if !self.instances.is_empty() {
            out.push_str(
                "type ContextType = Record<string, React.ForwardRefExoticComponent<JSX.IntrinsicElements['mesh']>>\n\n",
            );
        }
    }

    fn write_instances(&self, out: &mut String, load: &str) {
        if self.config.types {
            out.push_str("const context = React.createContext({} as ContextType)\n\n");
            out.push_str(
                "export function Instances({ children, ...props }: JSX.IntrinsicElements['group']) {\n",
            );
        } else {
            out.push_str("const context = React.createContext()\n\n");
            out.push_str("export function Instances({ children, ...props }) {\n");
        }
        let _ = writeln!(out, "{INDENT}const {{ nodes }} = {load}");
        let _ = writeln!(out, "{INDENT}const instances = React.useMemo(");
        let _ = writeln!(out, "{INDENT}{INDENT}() => ({{");
        for instance in self.instances.values() {
            let _ = writeln!(
                out,
                "{INDENT}{INDENT}{INDENT}{}: {},",
                instance.name,
                member("nodes", &instance.source)
            );
        }
        let _ = writeln!(out, "{INDENT}{INDENT}}}),");
        let _ = writeln!(out, "{INDENT}{INDENT}[nodes]");
        let _ = writeln!(out, "{INDENT})");
        let _ = writeln!(out, "{INDENT}return (");
        let _ = writeln!(out, "{INDENT}{INDENT}<Merged meshes={{instances}} {{...props}}>");
        let _ = writeln!(
            out,
            "{INDENT}{INDENT}{INDENT}{{(instances) => <context.Provider value={{instances}} children={{children}} />}}"
        );
        let _ = writeln!(out, "{INDENT}{INDENT}</Merged>");
        let _ = writeln!(out, "{INDENT})");
        out.push_str("}\n\n");
    }

    /// Children of the wrapper group
    fn lower_root(&self, root: &SceneNode) -> Vec<Element> {
        let passthrough = matches!(root.kind(), NodeKind::Group | NodeKind::Object3D) && is_plain(root);
        if passthrough {
            root.children().iter().flat_map(|c| self.lower(c)).collect()
        } else {
            self.lower(root)
        }
    }

    /// Lower one node; zero elements when pruned, several when flattened
    fn lower(&self, node: &SceneNode) -> Vec<Element> {
        let config = self.config;
        let key = node_key(node);
        let mut element = match node.kind() {
            NodeKind::Group | NodeKind::Object3D => {
                let children: Vec<Element> =
                    node.children().iter().flat_map(|c| self.lower(c)).collect();
                if children.is_empty() && !config.keeps_empty_groups() {
                    return Vec::new();
                }
                if config.aggressive && !config.emits_names() && is_plain(node) {
                    return children;
                }
                let mut element = Element::new("group");
                element.children = children;
                element
            }
            NodeKind::Mesh => {
                let instance = node
                    .mesh
                    .as_ref()
                    .and_then(|binding| self.instances.get(&binding.geometry));
                match instance {
                    Some(instance) => Element::new(format!("instances.{}", instance.name)),
                    None => {
                        let mut element = Element::new("mesh");
                        self.push_mesh_attrs(&mut element, node, &key);
                        element
                    }
                }
            }
            NodeKind::SkinnedMesh => {
                let mut element = Element::new("skinnedMesh");
                self.push_mesh_attrs(&mut element, node, &key);
                element
                    .attrs
                    .push(Attr::expr("skeleton", format!("{}.skeleton", member("nodes", &key))));
                element
            }
            NodeKind::Bone => {
                let mut element = Element::new("primitive");
                element.attrs.push(Attr::expr("object", member("nodes", &key)));
                // the bone carries its own subtree
                return vec![element];
            }
            NodeKind::PerspectiveCamera | NodeKind::OrthographicCamera => {
                let mut element = Element::new(node.kind().type_name());
                element.attrs.push(Attr::expr("makeDefault", "false"));
                element
            }
        };

        if config.emits_names() && node.is_named() {
            element.attrs.insert(0, Attr::text("name", node.name()));
        }
        self.push_common_attrs(&mut element, node);
        if !matches!(node.kind(), NodeKind::Group | NodeKind::Object3D) {
            element.children = node.children().iter().flat_map(|c| self.lower(c)).collect();
        }
        vec![element]
    }

    fn push_mesh_attrs(&self, element: &mut Element, node: &SceneNode, key: &str) {
        element
            .attrs
            .push(Attr::expr("geometry", format!("{}.geometry", member("nodes", key))));
        let material = match node.mesh.as_ref().and_then(|m| m.material.as_deref()) {
            Some(material) => member("materials", material),
            None => format!("{}.material", member("nodes", key)),
        };
        element.attrs.push(Attr::expr("material", material));
    }

    fn push_common_attrs(&self, element: &mut Element, node: &SceneNode) {
        let precision = self.config.precision;
        let flags = node.flags;
        if flags.cast_shadow {
            element.attrs.push(Attr::Flag("castShadow"));
        }
        if flags.receive_shadow {
            element.attrs.push(Attr::Flag("receiveShadow"));
        }
        if !flags.visible {
            element.attrs.push(Attr::expr("visible", "false"));
        }
        if !flags.frustum_culled {
            element.attrs.push(Attr::expr("frustumCulled", "false"));
        }
        if node.render_order != 0.0 {
            element
                .attrs
                .push(Attr::expr("renderOrder", number(node.render_order, precision)));
        }

        let Transform {
            position,
            rotation,
            scale,
        } = node.transform;
        let position = vec3(position, precision);
        if position != "[0, 0, 0]" {
            element.attrs.push(Attr::expr("position", position));
        }
        let rotation = vec3(rotation, precision);
        if rotation != "[0, 0, 0]" {
            element.attrs.push(Attr::expr("rotation", rotation));
        }
        let uniform = scale[0] == scale[1] && scale[1] == scale[2];
        let scale = if uniform {
            number(f64::from(scale[0]), precision)
        } else {
            vec3(scale, precision)
        };
        if scale != "1" {
            element.attrs.push(Attr::expr("scale", scale));
        }

        if self.config.meta && node.is_named() {
            element
                .attrs
                .push(Attr::expr("userData", format!("{{ name: {} }}", js_string(node.name()))));
        }
    }
}

/// Group without transform, flags or draw order
fn is_plain(node: &SceneNode) -> bool {
    node.transform.is_identity() && node.flags == RenderFlags::default() && node.render_order == 0.0
}

/// Lookup key of a node in `nodes`
fn node_key(node: &SceneNode) -> Cow<'_, str> {
    if node.is_named() {
        Cow::Borrowed(node.name())
    } else {
        Cow::Owned(format!("{}_{}", node.kind().type_name(), node.id().short()))
    }
}

/// JSX attribute
#[derive(Debug, Clone, PartialEq)]
enum Attr {
    /// `name`
    Flag(&'static str),
    /// `name={expr}`
    Expr(&'static str, String),
    /// `name="text"`
    Text(&'static str, String),
    /// `{...ident}`
    Spread(&'static str),
}

impl Attr {
    fn expr(name: &'static str, value: impl Into<String>) -> Self {
        Self::Expr(name, value.into())
    }

    fn text(name: &'static str, value: impl Into<String>) -> Self {
        Self::Text(name, value.into())
    }

    fn render(&self) -> String {
        match self {
            Self::Flag(name) => (*name).to_string(),
            Self::Expr(name, value) => format!("{name}={{{value}}}"),
            Self::Text(name, value) if value.contains('"') || value.contains('\\') => {
                format!("{name}={{{}}}", js_string(value))
            }
            Self::Text(name, value) => format!("{name}=\"{value}\""),
            Self::Spread(ident) => format!("{{...{ident}}}"),
        }
    }
}

/// Lowered JSX element
#[derive(Debug, Clone, PartialEq)]
struct Element {
    tag: String,
    attrs: Vec<Attr>,
    children: Vec<Element>,
}

impl Element {
    fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    fn print(&self, out: &mut String, depth: usize, width: usize) {
        let pad = INDENT.repeat(depth);
        let attrs: Vec<String> = self.attrs.iter().map(Attr::render).collect();
        let close = if self.children.is_empty() { " />" } else { ">" };

        let mut line = format!("{pad}<{}", self.tag);
        for attr in &attrs {
            line.push(' ');
            line.push_str(attr);
        }
        line.push_str(close);

        if line.len() <= width || attrs.is_empty() {
            out.push_str(&line);
            out.push('\n');
        } else {
            let _ = writeln!(out, "{pad}<{}", self.tag);
            for attr in &attrs {
                let _ = writeln!(out, "{pad}{INDENT}{attr}");
            }
            let _ = writeln!(out, "{pad}{}", close.trim_start());
        }

        if !self.children.is_empty() {
            for child in &self.children {
                child.print(out, depth + 1, width);
            }
            let _ = writeln!(out, "{pad}</{}>", self.tag);
        }
    }
}

/// Round to `precision` fractional digits, trailing zeros trimmed
fn number(value: f64, precision: u8) -> String {
    let fixed = format!("{:.*}", usize::from(precision), value);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn vec3(values: [f32; 3], precision: u8) -> String {
    let [x, y, z] = values.map(|v| number(f64::from(v), precision));
    format!("[{x}, {y}, {z}]")
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// `obj.key` or `obj['key']`
fn member(object: &str, key: &str) -> String {
    if is_identifier(key) {
        format!("{object}.{key}")
    } else {
        format!("{object}[{}]", js_string(key))
    }
}

/// Object-literal property name
fn property_name(key: &str) -> Cow<'_, str> {
    if is_identifier(key) {
        Cow::Borrowed(key)
    } else {
        Cow::Owned(js_string(key))
    }
}

/// Single-quoted JS string literal
fn js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// PascalCase component name for a geometry
fn instance_name(geometry: &str) -> String {
    let mut name: String = geometry
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_ascii_uppercase().to_string() + chars.as_str()
            })
        })
        .collect();
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, 'I');
    }
    name
}

fn unique(name: String, taken: &mut IndexSet<String>) -> String {
    let mut candidate = name.clone();
    let mut n = 1;
    while !taken.insert(candidate.clone()) {
        candidate = format!("{name}{n}");
        n += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scenegen_graph::{AnimationClip, MeshBinding, SceneGraph};

    fn cube_scene() -> LoadedModel {
        LoadedModel::new(SceneGraph::new(
            SceneNode::named(NodeKind::Group, "Scene").with_child(
                SceneNode::mesh("Cube", MeshBinding::new("Cube", Some("Red".into()))).with_transform(
                    Transform {
                        position: [0.0, 1.0, 0.0],
                        ..Transform::IDENTITY
                    },
                ),
            ),
        ))
    }

    #[test]
    fn generates_plain_component() {
        let code = JsxGenerator::new().generate("box.glb", &cube_scene(), &GenerationConfig::default());
        let expected = format!(
            "/*
Auto-generated by scenegen {}
File: box.glb
*/

import React from 'react'
import {{ useGLTF }} from '@react-three/drei'

export function Model(props) {{
  const {{ nodes, materials }} = useGLTF('/box.glb')
  return (
    <group {{...props}} dispose={{null}}>
      <mesh geometry={{nodes.Cube.geometry}} material={{materials.Red}} position={{[0, 1, 0]}} />
    </group>
  )
}}

useGLTF.preload('/box.glb')
",
            crate::VERSION
        );
        assert_eq!(code, expected);
    }

    #[test]
    fn flags_only_when_not_default() {
        let mut model = cube_scene();
        model.scene.root_mut().children_mut()[0].flags.visible = false;
        model.scene.root_mut().children_mut()[0].flags.cast_shadow = true;
        model.scene.root_mut().children_mut()[0].render_order = 3.0;
        let code = JsxGenerator::new().generate("box.glb", &model, &GenerationConfig::default());
        assert!(code.contains("castShadow visible={false} renderOrder={3}"));
        assert!(!code.contains("receiveShadow"));
        assert!(!code.contains("frustumCulled"));
    }

    #[test]
    fn typed_dialect_with_animations() {
        let model = cube_scene().with_animations(vec![AnimationClip::new("Spin")]);
        let config = GenerationConfig::new().with_types(true);
        let code = JsxGenerator::new().generate("box.glb", &model, &config);
        assert!(code.contains("import * as THREE from 'three'"));
        assert!(code.contains("import { useGLTF, useAnimations } from '@react-three/drei'"));
        assert!(code.contains("type ActionName = 'Spin'"));
        assert!(code.contains("    Cube: THREE.Mesh\n"));
        assert!(code.contains("    Red: THREE.MeshStandardMaterial\n"));
        assert!(code.contains("const group = useRef<THREE.Group>(null)"));
        assert!(code.contains("useGLTF('/box.glb') as GLTFResult"));
        assert!(code.contains("<group ref={group} {...props} dispose={null}>"));
    }

    #[test]
    fn empty_groups_pruned_unless_kept() {
        let model = LoadedModel::new(SceneGraph::new(
            SceneNode::named(NodeKind::Group, "Scene")
                .with_child(SceneNode::named(NodeKind::Group, "Empty"))
                .with_child(SceneNode::mesh("Cube", MeshBinding::new("Cube", None))),
        ));
        let plain = JsxGenerator::new().generate("a.gltf", &model, &GenerationConfig::default());
        assert!(!plain.contains("<group />"));
        assert!(plain.contains("material={nodes.Cube.material}"));

        let kept = JsxGenerator::new()
            .generate("a.gltf", &model, &GenerationConfig::new().with_keepgroups(true));
        assert!(kept.contains("<group />"));

        let verbose = JsxGenerator::new()
            .generate("a.gltf", &model, &GenerationConfig::new().with_verbose(true));
        assert!(verbose.contains("<group name=\"Empty\" />"));
        assert!(verbose.contains("<mesh name=\"Cube\""));
    }

    #[test]
    fn aggressive_flattens_identity_groups() {
        let model = LoadedModel::new(SceneGraph::new(
            SceneNode::named(NodeKind::Group, "Scene").with_child(
                SceneNode::named(NodeKind::Group, "Wrapper")
                    .with_child(SceneNode::mesh("Cube", MeshBinding::new("Cube", None))),
            ),
        ));
        let normal = JsxGenerator::new().generate("a.glb", &model, &GenerationConfig::default());
        assert!(normal.contains("      <group>\n        <mesh"));

        let flat = JsxGenerator::new()
            .generate("a.glb", &model, &GenerationConfig::new().with_aggressive(true));
        assert!(flat.contains("    <group {...props} dispose={null}>\n      <mesh"));
    }

    #[test]
    fn instancing_routes_shared_geometry() {
        let model = LoadedModel::new(SceneGraph::new(
            SceneNode::named(NodeKind::Group, "Scene")
                .with_child(SceneNode::mesh("WheelA", MeshBinding::new("wheel.001", None)))
                .with_child(SceneNode::mesh("WheelB", MeshBinding::new("wheel.001", None)))
                .with_child(SceneNode::mesh("Body", MeshBinding::new("body", None))),
        ));
        let code = JsxGenerator::new()
            .generate("car.glb", &model, &GenerationConfig::new().with_instance(true));
        assert!(code.contains("import { useGLTF, Merged } from '@react-three/drei'"));
        assert!(code.contains("Wheel001: nodes.WheelA,"));
        assert_eq!(code.matches("<instances.Wheel001 />").count(), 2);
        assert!(code.contains("<mesh geometry={nodes.Body.geometry}"));

        let all = JsxGenerator::new()
            .generate("car.glb", &model, &GenerationConfig::new().with_instanceall(true));
        assert!(all.contains("<instances.Body />"));
    }

    #[test]
    fn transforms_follow_precision() {
        let model = LoadedModel::new(SceneGraph::new(
            SceneNode::mesh("Cube", MeshBinding::new("Cube", None)).with_transform(Transform {
                position: [0.123_456, -0.000_1, 2.5],
                rotation: [0.0; 3],
                scale: [2.0; 3],
            }),
        ));
        let code = JsxGenerator::new().generate("a.glb", &model, &GenerationConfig::default());
        assert!(code.contains("position={[0.12, 0, 2.5]} scale={2}"));

        let fine = JsxGenerator::new()
            .generate("a.glb", &model, &GenerationConfig::new().with_precision(4));
        assert!(fine.contains("position={[0.1235, -0.0001, 2.5]}"));
    }

    #[test]
    fn odd_names_use_bracket_access() {
        let model = LoadedModel::new(SceneGraph::new(SceneNode::mesh(
            "Mesh: 1",
            MeshBinding::new("g", Some("My Mat".into())),
        )));
        let code = JsxGenerator::new().generate("a.glb", &model, &GenerationConfig::default());
        assert!(code.contains("geometry={nodes['Mesh: 1'].geometry}"));
        assert!(code.contains("material={materials['My Mat']}"));
    }

    #[test]
    fn long_elements_wrap_attributes() {
        let code = JsxGenerator::new()
            .generate("box.glb", &cube_scene(), &GenerationConfig::new().with_printwidth(40));
        assert!(code.contains("      <mesh\n        geometry={nodes.Cube.geometry}\n"));
        assert!(code.contains("        position={[0, 1, 0]}\n      />\n"));
    }

    #[test]
    fn bones_and_cameras() {
        let model = LoadedModel::new(SceneGraph::new(
            SceneNode::named(NodeKind::Group, "Scene")
                .with_child(
                    SceneNode::named(NodeKind::Bone, "Hip")
                        .with_child(SceneNode::named(NodeKind::Bone, "Knee")),
                )
                .with_child(SceneNode::named(NodeKind::PerspectiveCamera, "Cam")),
        ));
        let code = JsxGenerator::new().generate("rig.glb", &model, &GenerationConfig::default());
        assert!(code.contains("<primitive object={nodes.Hip} />"));
        assert!(!code.contains("nodes.Knee"));
        assert!(code.contains("<PerspectiveCamera makeDefault={false} />"));
        assert!(code.contains("import { useGLTF, PerspectiveCamera }"));
    }

    #[test]
    fn helpers() {
        assert_eq!(number(-0.0001, 2), "0");
        assert_eq!(number(1.50, 2), "1.5");
        assert_eq!(number(3.0, 1), "3");
        assert_eq!(instance_name("wheel.001"), "Wheel001");
        assert_eq!(instance_name("42"), "I42");
        let mut taken = IndexSet::new();
        assert_eq!(unique("A".into(), &mut taken), "A");
        assert_eq!(unique("A".into(), &mut taken), "A1");
    }
}
