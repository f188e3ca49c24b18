use pretty_assertions::assert_eq;
use scenegen_codegen::GenerationConfig;
use scenegen_graph::{Property, PropertyValue, SceneGraph, SceneNode};
use scenegen_props::{PropertyKey, SyntheticBatch};
use scenegen_session::{ExportAction, RegenerationPath, SessionError, SyncPhase};
use scenegen_test_utils::{animated_model, harness, model_file, two_mesh_model, Harness};
use std::io::{Cursor, Read};

fn child<'a>(scene: &'a SceneGraph, name: &str) -> &'a SceneNode {
    scene.find_by_name(name)[0]
}

#[tokio::test]
async fn load_generates_once_and_syncs() {
    let Harness {
        mut reconciler,
        loader,
        generator,
    } = harness(two_mesh_model());

    reconciler.load(model_file("car.glb")).await.unwrap();

    assert_eq!(reconciler.regenerations(), 1);
    assert_eq!(loader.calls(), 1);
    assert_eq!(generator.calls(), 1);
    assert_eq!(reconciler.phase(), SyncPhase::Synced);
    let code = reconciler.code().unwrap();
    assert!(code.contains("nodes.Cube.geometry"));
    assert!(code.contains("nodes.Sphere.geometry"));

    let schema = reconciler.schema().unwrap();
    assert!(schema.group("Cube").is_some());
    assert!(schema.group("Sphere").is_some());
    assert!(!reconciler.sync().await.unwrap());
    assert_eq!(reconciler.regenerations(), 1);
}

#[tokio::test]
async fn visible_edit_patches_one_mesh_and_regenerates_once() {
    let Harness { mut reconciler, .. } = harness(two_mesh_model());
    reconciler.load(model_file("car.glb")).await.unwrap();
    assert!(!reconciler.session().animations());

    let changed = reconciler.edit_synthetic("visible:Cube", false.into()).unwrap();
    assert_eq!(changed, 1);
    assert!(reconciler.sync().await.unwrap());
    assert!(!reconciler.sync().await.unwrap());

    assert_eq!(reconciler.regenerations(), 2);
    assert_eq!(reconciler.phase(), SyncPhase::Synced);
    let scene = reconciler.scene().unwrap();
    assert!(!child(scene, "Cube").flags.visible);
    assert!(child(scene, "Sphere").flags.visible);
    assert_eq!(reconciler.code().unwrap().matches("visible={false}").count(), 1);
}

#[tokio::test]
async fn unchanged_value_does_not_regenerate() {
    let Harness { mut reconciler, .. } = harness(two_mesh_model());
    reconciler.load(model_file("car.glb")).await.unwrap();
    let cube = child(reconciler.scene().unwrap(), "Cube").id();

    assert!(!reconciler
        .edit(PropertyKey::new(cube, Property::Visible), true.into())
        .unwrap());
    assert!(!reconciler.sync().await.unwrap());
    assert_eq!(reconciler.regenerations(), 1);
}

#[tokio::test]
async fn edits_batch_into_one_regeneration() {
    let Harness { mut reconciler, .. } = harness(two_mesh_model());
    reconciler.load(model_file("car.glb")).await.unwrap();

    assert_eq!(
        reconciler
            .edit_synthetic("castShadow:Cube", true.into())
            .unwrap(),
        1
    );
    assert_eq!(
        reconciler
            .edit_synthetic("renderOrder:Sphere", PropertyValue::Number(4.0))
            .unwrap(),
        1
    );
    assert_eq!(reconciler.edit_synthetic("visible:Nope", false.into()).unwrap(), 0);
    assert_eq!(reconciler.phase(), SyncPhase::Synced);

    assert!(reconciler.sync().await.unwrap());
    assert_eq!(reconciler.regenerations(), 2);
    let code = reconciler.code().unwrap();
    assert!(code.contains("castShadow"));
    assert!(code.contains("renderOrder={4}"));
}

#[tokio::test]
async fn mismatched_kind_is_rejected() {
    let Harness { mut reconciler, .. } = harness(two_mesh_model());
    reconciler.load(model_file("car.glb")).await.unwrap();
    let cube = child(reconciler.scene().unwrap(), "Cube").id();

    let result = reconciler.edit(PropertyKey::new(cube, Property::Visible), PropertyValue::Number(1.0));
    assert!(matches!(result, Err(SessionError::Edit(_))));
    assert_eq!(reconciler.snapshot().unwrap().revision(), 0);
}

#[tokio::test]
async fn synthetic_batch_is_folded_into_snapshot() {
    let Harness { mut reconciler, .. } = harness(two_mesh_model());
    reconciler.load(model_file("car.glb")).await.unwrap();
    let cube = child(reconciler.scene().unwrap(), "Cube").id();

    let mut batch = SyntheticBatch::new();
    batch.insert("receiveShadow:Cube".to_string(), true.into());
    batch.insert("receiveShadow:Missing".to_string(), true.into());
    let report = reconciler.apply_synthetic(&batch).await.unwrap();

    assert_eq!(report.applied, 1);
    assert_eq!(reconciler.regenerations(), 2);
    assert_eq!(
        reconciler
            .snapshot()
            .unwrap()
            .get(&PropertyKey::new(cube, Property::ReceiveShadow)),
        Some(PropertyValue::Bool(true))
    );
    assert!(reconciler.code().unwrap().contains("receiveShadow"));
    assert_eq!(reconciler.phase(), SyncPhase::Synced);
}

#[tokio::test]
async fn animations_turn_on_verbose() {
    let Harness {
        mut reconciler,
        loader,
        ..
    } = harness(animated_model());

    reconciler.load(model_file("walker.glb")).await.unwrap();
    assert!(reconciler.session().animations());
    assert!(reconciler.config().verbose);
    assert_eq!(reconciler.regenerations(), 2);
    let code = reconciler.code().unwrap();
    assert!(code.contains("useAnimations"));
    assert!(code.contains("name=\"Cube\""));

    loader.replace(two_mesh_model());
    reconciler.load(model_file("car.glb")).await.unwrap();
    assert!(!reconciler.config().verbose);
    assert_eq!(reconciler.regenerations(), 4);
    assert!(!reconciler.code().unwrap().contains("useAnimations"));
}

#[tokio::test]
async fn config_change_regenerates_exactly_once() {
    let Harness { mut reconciler, .. } = harness(two_mesh_model());
    reconciler.load(model_file("car.glb")).await.unwrap();

    reconciler
        .set_config(GenerationConfig::new().with_types(true))
        .await
        .unwrap();
    assert_eq!(reconciler.regenerations(), 2);
    assert!(reconciler.code().unwrap().contains("type GLTFResult"));
}

#[tokio::test]
async fn reparse_path_ignores_edits_in_code() {
    let Harness { reconciler, .. } = harness(two_mesh_model());
    let mut reconciler = reconciler.with_studio_config(scenegen_session::StudioConfig {
        regeneration: RegenerationPath::Reparse,
        ..Default::default()
    });
    reconciler.load(model_file("car.glb")).await.unwrap();
    let cube = child(reconciler.scene().unwrap(), "Cube").id();

    reconciler
        .edit(PropertyKey::new(cube, Property::Visible), false.into())
        .unwrap();
    assert!(reconciler.sync().await.unwrap());
    assert!(!child(reconciler.scene().unwrap(), "Cube").flags.visible);
    assert!(!reconciler.code().unwrap().contains("visible={false}"));
}

#[tokio::test]
async fn reload_resets_session() {
    let Harness { mut reconciler, .. } = harness(two_mesh_model());
    reconciler.load(model_file("car.glb")).await.unwrap();
    let cube = child(reconciler.scene().unwrap(), "Cube").id();
    reconciler
        .edit(PropertyKey::new(cube, Property::Visible), false.into())
        .unwrap();

    reconciler.load(model_file("car.glb")).await.unwrap();
    assert_eq!(reconciler.snapshot().unwrap().revision(), 0);
    assert_eq!(reconciler.phase(), SyncPhase::Synced);
    assert!(child(reconciler.scene().unwrap(), "Cube").flags.visible);
    assert_eq!(reconciler.session().epoch(), 2);
    // the new model goes Idle to Synced; the dropped edit never runs a Dirty cycle
    assert_eq!(reconciler.regenerations(), 2);
    assert!(!reconciler.sync().await.unwrap());
    assert_eq!(reconciler.regenerations(), 2);
}

#[tokio::test]
async fn archive_carries_generated_code() {
    let Harness { mut reconciler, .. } = harness(two_mesh_model());
    reconciler.load(model_file("car.gltf")).await.unwrap();

    let bytes = reconciler.export_archive().await.unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut model = String::new();
    archive
        .by_name("src/Model.js")
        .unwrap()
        .read_to_string(&mut model)
        .unwrap();
    assert_eq!(model, reconciler.code().unwrap());
    assert!(archive.by_name("public/car.gltf").is_ok());
}

#[tokio::test]
async fn sandbox_offer_follows_format_and_failures() {
    let Harness { mut reconciler, loader, .. } = harness(two_mesh_model());

    reconciler.load(model_file("car.glb")).await.unwrap();
    assert!(!reconciler.available_exports().contains(&ExportAction::OpenInSandbox));
    assert!(matches!(
        reconciler.sandbox_link("abc"),
        Err(SessionError::SandboxUnavailable(_))
    ));

    loader.replace(two_mesh_model());
    reconciler.load(model_file("car.gltf")).await.unwrap();
    assert_eq!(reconciler.available_exports().len(), 4);
    assert_eq!(
        reconciler.sandbox_link("abc").unwrap(),
        "https://codesandbox.io/s/abc?file=/src/Model.js"
    );

    reconciler.mark_sandbox_failed();
    assert_eq!(reconciler.available_exports().len(), 3);
    assert!(reconciler.sandbox_link("abc").is_err());
}
