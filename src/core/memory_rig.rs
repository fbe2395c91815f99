//! In-memory humanoid rig for the simulator and tests

use std::cell::Cell;

use nalgebra::Vector3;

use crate::core::rig::{BoneId, ExpressionId, Rig};
use crate::types::rotation::{euler_deg, Rotation};
use crate::types::{BlinkShape, Bone, VOWEL_KEYS};

#[derive(Debug, Clone)]
struct BoneSlot {
    name: String,
    rotation: Rotation,
    position: Vector3<f32>,
}

#[derive(Debug, Clone)]
struct WeightSlot {
    name: String,
    weight: f32,
}

/// A flat list of named bones, blend shapes and expressions
///
/// Counts every name lookup and expression write so tests can check
/// the engine's resolve-once and short-circuit behavior.
#[derive(Debug, Clone, Default)]
pub struct MemoryRig {
    bones: Vec<BoneSlot>,
    shapes: Vec<WeightSlot>,
    expressions: Vec<WeightSlot>,
    lookups: Cell<usize>,
    expression_writes: usize,
}

/// Expression keys a VRM-style face ships with
const HUMANOID_EXPRESSIONS: [&str; 6] = ["neutral", "happy", "angry", "sad", "relaxed", "surprised"];

impl MemoryRig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every semantic bone under its canonical name, a slightly pitched
    /// chest rest pose, blink shapes, vowels and emotion expressions
    pub fn humanoid() -> Self {
        let mut rig = Self::new();
        for bone in Bone::ALL {
            let (rotation, position) = match bone {
                Bone::Hips => (Rotation::identity(), Vector3::new(0.0, 0.95, 0.0)),
                Bone::Spine => (euler_deg(-2.0, 0.0, 0.0), Vector3::new(0.0, 0.1, 0.0)),
                Bone::Chest => (euler_deg(4.0, 0.0, 0.0), Vector3::new(0.0, 0.15, 0.0)),
                Bone::Head => (euler_deg(-1.0, 0.0, 0.0), Vector3::new(0.0, 0.2, 0.02)),
                Bone::LeftEye => (Rotation::identity(), Vector3::new(0.03, 0.07, 0.08)),
                Bone::RightEye => (Rotation::identity(), Vector3::new(-0.03, 0.07, 0.08)),
                Bone::LeftUpperArm => (Rotation::identity(), Vector3::new(0.08, 0.0, 0.0)),
                Bone::RightUpperArm => (Rotation::identity(), Vector3::new(-0.08, 0.0, 0.0)),
            };
            rig = rig.with_bone(bone.canonical_name(), rotation, position);
        }
        for shape in BlinkShape::ALL {
            rig = rig.with_blend_shape(shape.canonical_name());
        }
        for key in VOWEL_KEYS.iter().chain(HUMANOID_EXPRESSIONS.iter()) {
            rig = rig.with_expression(key);
        }
        rig
    }

    pub fn with_bone(mut self, name: &str, rotation: Rotation, position: Vector3<f32>) -> Self {
        self.bones.push(BoneSlot {
            name: name.to_string(),
            rotation,
            position,
        });
        self
    }

    pub fn without_bone(mut self, name: &str) -> Self {
        self.bones.retain(|b| b.name != name);
        self
    }

    pub fn with_blend_shape(mut self, name: &str) -> Self {
        self.shapes.push(WeightSlot {
            name: name.to_string(),
            weight: 0.0,
        });
        self
    }

    pub fn with_expression(mut self, key: &str) -> Self {
        self.expressions.push(WeightSlot {
            name: key.to_string(),
            weight: 0.0,
        });
        self
    }

    /// Drop every blend shape and expression
    pub fn without_face(mut self) -> Self {
        self.shapes.clear();
        self.expressions.clear();
        self
    }

    pub fn bone_rotation(&self, name: &str) -> Option<Rotation> {
        self.bones.iter().find(|b| b.name == name).map(|b| b.rotation)
    }

    pub fn blend_shape_weight(&self, name: &str) -> Option<f32> {
        self.shapes.iter().find(|s| s.name == name).map(|s| s.weight)
    }

    pub fn expression(&self, key: &str) -> Option<f32> {
        self.expressions.iter().find(|e| e.name == key).map(|e| e.weight)
    }

    /// Set an expression directly, as a lip-sync driver would
    pub fn set_expression(&mut self, key: &str, weight: f32) {
        if let Some(slot) = self.expressions.iter_mut().find(|e| e.name == key) {
            slot.weight = weight;
        }
    }

    /// Name lookups performed through the `Rig` trait
    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }

    /// Expression writes performed through the `Rig` trait
    pub fn expression_writes(&self) -> usize {
        self.expression_writes
    }

    fn count_lookup(&self) {
        self.lookups.set(self.lookups.get() + 1);
    }
}

impl Rig for MemoryRig {
    fn find_bone(&self, name: &str) -> Option<BoneId> {
        self.count_lookup();
        self.bones.iter().position(|b| b.name == name).map(BoneId)
    }

    fn local_rotation(&self, bone: BoneId) -> Rotation {
        self.bones
            .get(bone.0)
            .map(|b| b.rotation)
            .unwrap_or_else(Rotation::identity)
    }

    fn set_local_rotation(&mut self, bone: BoneId, rotation: Rotation) {
        if let Some(slot) = self.bones.get_mut(bone.0) {
            slot.rotation = rotation;
        }
    }

    fn local_position(&self, bone: BoneId) -> Vector3<f32> {
        self.bones
            .get(bone.0)
            .map(|b| b.position)
            .unwrap_or_else(Vector3::zeros)
    }

    fn blend_shape_index(&self, name: &str) -> Option<usize> {
        self.count_lookup();
        self.shapes.iter().position(|s| s.name == name)
    }

    fn set_blend_shape_weight(&mut self, index: usize, weight: f32) {
        if let Some(slot) = self.shapes.get_mut(index) {
            slot.weight = weight;
        }
    }

    fn find_expression(&self, key: &str) -> Option<ExpressionId> {
        self.count_lookup();
        self.expressions.iter().position(|e| e.name == key).map(ExpressionId)
    }

    fn expression_weight(&self, expression: ExpressionId) -> f32 {
        self.expressions.get(expression.0).map(|e| e.weight).unwrap_or(0.0)
    }

    fn set_expression_weight(&mut self, expression: ExpressionId, weight: f32) {
        self.expression_writes += 1;
        if let Some(slot) = self.expressions.get_mut(expression.0) {
            slot.weight = weight;
        }
    }
}
