//! Rig adapter: semantic bones and face targets resolved once
//!
//! The host implements `Rig`. `RigAdapter` resolves every bone, blink
//! shape and expression key at construction, captures the rest pose, and
//! from then on only indexes the resolved handles. Anything missing is
//! warned about once and its writes become no-ops.

use nalgebra::Vector3;
use tracing::warn;

use crate::types::rotation::Rotation;
use crate::types::{BlinkShape, Bone, ReasonCode, VOWEL_KEYS};

/// Host handle for a bone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoneId(pub usize);

/// Host handle for a named expression (emotion or mouth shape)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExpressionId(pub usize);

/// Host skeleton and face, as seen by the engine
///
/// Face methods default to "absent" so skeleton-only hosts implement
/// just the first four.
pub trait Rig {
    fn find_bone(&self, name: &str) -> Option<BoneId>;
    fn local_rotation(&self, bone: BoneId) -> Rotation;
    fn set_local_rotation(&mut self, bone: BoneId, rotation: Rotation);
    fn local_position(&self, bone: BoneId) -> Vector3<f32>;

    fn blend_shape_index(&self, _name: &str) -> Option<usize> {
        None
    }

    /// Weight on the 0-100 scale
    fn set_blend_shape_weight(&mut self, _index: usize, _weight: f32) {}

    fn find_expression(&self, _key: &str) -> Option<ExpressionId> {
        None
    }

    /// Weight on the 0-1 scale
    fn expression_weight(&self, _expression: ExpressionId) -> f32 {
        0.0
    }

    fn set_expression_weight(&mut self, _expression: ExpressionId, _weight: f32) {}
}

/// A target that failed to resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTarget {
    pub reason: ReasonCode,
    pub name: String,
}

/// Resolved handles plus the captured rest pose
#[derive(Debug)]
pub struct RigAdapter<R: Rig> {
    rig: R,
    bones: [Option<BoneId>; Bone::COUNT],
    rest: [Rotation; Bone::COUNT],
    rest_positions: [Option<Vector3<f32>>; Bone::COUNT],
    blink_shapes: [Option<usize>; 2],
    vowels: [Option<ExpressionId>; VOWEL_KEYS.len()],
    missing: Vec<MissingTarget>,
}

impl<R: Rig> RigAdapter<R> {
    /// Resolve every target and capture the rest pose
    pub fn new(rig: R) -> Self {
        let mut missing = Vec::new();

        let mut bones = [None; Bone::COUNT];
        for bone in Bone::ALL {
            let found = rig.find_bone(bone.canonical_name()).or_else(|| {
                bone.aliases().iter().find_map(|alias| rig.find_bone(alias))
            });
            if found.is_none() {
                warn!(bone = %bone, "bone not found; its motion is disabled");
                missing.push(MissingTarget {
                    reason: ReasonCode::M001_BONE_MISSING,
                    name: bone.canonical_name().to_string(),
                });
            }
            bones[bone.index()] = found;
        }

        let mut blink_shapes = [None; 2];
        for shape in BlinkShape::ALL {
            let found = rig
                .blend_shape_index(shape.canonical_name())
                .or_else(|| rig.blend_shape_index(shape.alias()));
            if found.is_none() {
                warn!(
                    shape = shape.canonical_name(),
                    alias = shape.alias(),
                    "blink blend shape not found; blinking disabled on this side"
                );
                missing.push(MissingTarget {
                    reason: ReasonCode::M001_BLEND_SHAPE_MISSING,
                    name: shape.canonical_name().to_string(),
                });
            }
            blink_shapes[shape.index()] = found;
        }

        let mut vowels = [None; VOWEL_KEYS.len()];
        for (slot, key) in vowels.iter_mut().zip(VOWEL_KEYS) {
            *slot = rig.find_expression(key);
        }

        let mut adapter = Self {
            rig,
            bones,
            rest: [Rotation::identity(); Bone::COUNT],
            rest_positions: [None; Bone::COUNT],
            blink_shapes,
            vowels,
            missing,
        };
        adapter.recapture_rest();
        adapter
    }

    /// Capture the current local pose as the new rest pose
    pub fn recapture_rest(&mut self) {
        for bone in Bone::ALL {
            let Some(id) = self.bones[bone.index()] else {
                continue;
            };
            self.rest[bone.index()] = self.rig.local_rotation(id);
            if bone.captures_position() {
                self.rest_positions[bone.index()] = Some(self.rig.local_position(id));
            }
        }
    }

    pub fn has_bone(&self, bone: Bone) -> bool {
        self.bones[bone.index()].is_some()
    }

    pub fn rest(&self, bone: Bone) -> Rotation {
        self.rest[bone.index()]
    }

    pub fn rest_position(&self, bone: Bone) -> Option<Vector3<f32>> {
        self.rest_positions[bone.index()]
    }

    /// Write `rest * offset`; returns the rotation written, or `None` for a missing bone
    pub fn apply_offset(&mut self, bone: Bone, offset: &Rotation) -> Option<Rotation> {
        let id = self.bones[bone.index()]?;
        let rotation = self.rest[bone.index()] * offset;
        self.rig.set_local_rotation(id, rotation);
        Some(rotation)
    }

    /// Write the same blink weight (0-100) to both eyes
    pub fn set_blink_weight(&mut self, weight: f32) {
        for index in self.blink_shapes.into_iter().flatten() {
            self.rig.set_blend_shape_weight(index, weight);
        }
    }

    pub fn has_blink_shapes(&self) -> bool {
        self.blink_shapes.iter().any(Option::is_some)
    }

    /// Current mouth-shape weights, 0 for unresolved vowels
    pub fn vowel_weights(&self) -> [f32; VOWEL_KEYS.len()] {
        let mut weights = [0.0; VOWEL_KEYS.len()];
        for (w, id) in weights.iter_mut().zip(self.vowels) {
            if let Some(id) = id {
                *w = self.rig.expression_weight(id);
            }
        }
        weights
    }

    /// Resolve an expression key (setup time only)
    pub fn resolve_expression(&self, key: &str) -> Option<ExpressionId> {
        self.rig.find_expression(key)
    }

    pub fn set_expression_weight(&mut self, expression: ExpressionId, weight: f32) {
        self.rig.set_expression_weight(expression, weight);
    }

    /// Targets that failed to resolve at construction
    pub fn missing_targets(&self) -> &[MissingTarget] {
        &self.missing
    }

    pub fn rig(&self) -> &R {
        &self.rig
    }

    pub fn rig_mut(&mut self) -> &mut R {
        &mut self.rig
    }

    pub fn into_inner(self) -> R {
        self.rig
    }
}
