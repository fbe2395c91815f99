//! Integration tests for rig resolution and degraded rigs
//!
//! Tests: canonical names → aliases → missing targets, rest-relative writes

use idlerig::core::{BoneId, MemoryRig, MotionEngine, Rig};
use idlerig::types::rotation::euler_deg;
use idlerig::types::{BlinkShape, Bone, MotionConfig, ReasonCode, Rotation};
use nalgebra::Vector3;
use pretty_assertions::assert_eq;

const DT: f32 = 1.0 / 60.0;

/// A missing eye disables only that eye
#[test]
fn test_missing_bone_isolated() {
    let rig = MemoryRig::humanoid().without_bone("LeftEye");
    let mut engine = MotionEngine::new(rig, MotionConfig::default(), 6).unwrap();

    let missing = engine.adapter().missing_targets();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].reason, ReasonCode::M001_BONE_MISSING);
    assert_eq!(missing[0].name, "LeftEye");
    assert!(!engine.adapter().has_bone(Bone::LeftEye));

    for _ in 0..120 {
        let out = engine.advance(DT);
        assert_eq!(out.rotation(Bone::LeftEye), None);
        assert!(out.rotation(Bone::RightEye).is_some());
        assert!(out.rotation(Bone::Head).is_some());
        assert!(out.rotation(Bone::Chest).is_some());
    }
    assert_eq!(engine.rig().bone_rotation("LeftEye"), None);
}

/// Exporter naming conventions resolve through the alias lists
#[test]
fn test_alias_names_resolve() {
    let mut rig = MemoryRig::new();
    for bone in Bone::ALL {
        rig = rig.with_bone(bone.aliases()[0], Rotation::identity(), Vector3::zeros());
    }
    for shape in BlinkShape::ALL {
        rig = rig.with_blend_shape(shape.alias());
    }
    let mut engine = MotionEngine::new(rig, MotionConfig::default(), 2).unwrap();
    assert!(engine.adapter().missing_targets().is_empty());

    for _ in 0..30 {
        let out = engine.advance(DT);
        assert!(out.rotation(Bone::Head).is_some());
        assert_eq!(engine.rig().blend_shape_weight("Blink_L"), Some(out.blink_weight));
        assert_eq!(engine.rig().blend_shape_weight("Blink_R"), Some(out.blink_weight));
    }
    assert!(engine.rig().bone_rotation("J_Bip_C_Head").is_some());
}

/// The canonical name wins when both it and an alias exist
#[test]
fn test_canonical_name_preferred() {
    let rig = MemoryRig::humanoid().with_bone("J_Bip_C_Head", Rotation::identity(), Vector3::zeros());
    let mut engine = MotionEngine::new(rig, MotionConfig::default(), 2).unwrap();
    engine.advance(DT);
    assert_eq!(engine.rig().bone_rotation("J_Bip_C_Head"), Some(Rotation::identity()));
    assert_ne!(engine.rig().bone_rotation("Head"), Some(euler_deg(-1.0, 0.0, 0.0)));
}

/// A rig without blink shapes or expressions runs body motion unchanged
#[test]
fn test_faceless_rig() {
    let rig = MemoryRig::humanoid().without_face();
    let mut engine = MotionEngine::new(rig, MotionConfig::default(), 10).unwrap();
    assert!(!engine.adapter().has_blink_shapes());

    let reasons: Vec<ReasonCode> = engine
        .adapter()
        .missing_targets()
        .iter()
        .map(|m| m.reason)
        .collect();
    assert_eq!(
        reasons,
        vec![ReasonCode::M001_BLEND_SHAPE_MISSING, ReasonCode::M001_BLEND_SHAPE_MISSING]
    );

    assert_eq!(engine.set_emotion("joy"), ReasonCode::M002_EMOTION_APPLIED);
    assert_eq!(engine.rig().expression_writes(), 0);

    for _ in 0..300 {
        let out = engine.advance(DT);
        assert_eq!(out.speech_intensity, 0.0);
        assert!(out.rotation(Bone::Head).is_some());
        assert!(out.rotation(Bone::LeftEye).is_some());
    }
}

/// Bones are always written as rest × offset, never accumulated
#[test]
fn test_recapture_rest() {
    let mut engine = MotionEngine::new(MemoryRig::humanoid(), MotionConfig::default(), 4).unwrap();
    let turned = euler_deg(0.0, 30.0, 0.0);
    let head = engine.rig().find_bone("Head").unwrap();
    engine.rig_mut().set_local_rotation(head, turned);
    engine.recapture_rest();
    assert_eq!(engine.adapter().rest(Bone::Head), turned);
    assert_eq!(engine.adapter().rest_position(Bone::Head), Some(Vector3::new(0.0, 0.2, 0.02)));
    assert_eq!(engine.adapter().rest_position(Bone::Spine), None);

    for _ in 0..600 {
        engine.advance(DT);
        let written = engine.rig().bone_rotation("Head").unwrap();
        assert!(written.angle_to(&turned).to_degrees() < 6.0);
    }
}

/// Skeleton-only host relying on the trait's face defaults
#[derive(Debug, Default)]
struct Skeleton {
    rotations: Vec<(String, Rotation)>,
}

impl Rig for Skeleton {
    fn find_bone(&self, name: &str) -> Option<BoneId> {
        self.rotations.iter().position(|(n, _)| n == name).map(BoneId)
    }

    fn local_rotation(&self, bone: BoneId) -> Rotation {
        self.rotations[bone.0].1
    }

    fn set_local_rotation(&mut self, bone: BoneId, rotation: Rotation) {
        self.rotations[bone.0].1 = rotation;
    }

    fn local_position(&self, _bone: BoneId) -> Vector3<f32> {
        Vector3::zeros()
    }
}

#[test]
fn test_skeleton_only_host() {
    let skeleton = Skeleton {
        rotations: ["Spine", "Chest", "Head"]
            .iter()
            .map(|n| (n.to_string(), Rotation::identity()))
            .collect(),
    };
    let mut engine = MotionEngine::new(skeleton, MotionConfig::default(), 8).unwrap();
    let missing: Vec<&str> = engine
        .adapter()
        .missing_targets()
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(
        missing,
        vec![
            "Hips",
            "LeftEye",
            "RightEye",
            "LeftUpperArm",
            "RightUpperArm",
            "Fcl_EYE_Close_L",
            "Fcl_EYE_Close_R"
        ]
    );

    engine.set_debug_speech(true, 0.8);
    for _ in 0..120 {
        let out = engine.advance(DT);
        assert!(out.rotation(Bone::Head).is_some());
        assert_eq!(out.rotation(Bone::LeftUpperArm), None);
    }
    let rig = engine.into_rig();
    assert_ne!(rig.rotations[2].1, Rotation::identity());
}
