//! Semantic rig targets: bones, blink shapes and vowel expressions

use serde::{Deserialize, Serialize};

/// Humanoid bones the engine drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bone {
    Hips,
    Spine,
    Chest,
    Head,
    LeftEye,
    RightEye,
    LeftUpperArm,
    RightUpperArm,
}

impl Bone {
    pub const COUNT: usize = 8;

    pub const ALL: [Bone; Bone::COUNT] = [
        Bone::Hips,
        Bone::Spine,
        Bone::Chest,
        Bone::Head,
        Bone::LeftEye,
        Bone::RightEye,
        Bone::LeftUpperArm,
        Bone::RightUpperArm,
    ];

    /// Dense index for per-bone tables
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical humanoid name, tried first
    pub fn canonical_name(self) -> &'static str {
        match self {
            Bone::Hips => "Hips",
            Bone::Spine => "Spine",
            Bone::Chest => "Chest",
            Bone::Head => "Head",
            Bone::LeftEye => "LeftEye",
            Bone::RightEye => "RightEye",
            Bone::LeftUpperArm => "LeftUpperArm",
            Bone::RightUpperArm => "RightUpperArm",
        }
    }

    /// Fallback names used by common exporters
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Bone::Hips => &["J_Bip_C_Hips", "pelvis"],
            Bone::Spine => &["J_Bip_C_Spine", "spine_01"],
            Bone::Chest => &["J_Bip_C_Chest", "UpperChest", "spine_02"],
            Bone::Head => &["J_Bip_C_Head", "head"],
            Bone::LeftEye => &["J_Adj_L_FaceEye", "eye_L"],
            Bone::RightEye => &["J_Adj_R_FaceEye", "eye_R"],
            Bone::LeftUpperArm => &["J_Bip_L_UpperArm", "upperarm_l"],
            Bone::RightUpperArm => &["J_Bip_R_UpperArm", "upperarm_r"],
        }
    }

    /// Bones whose rest position is captured alongside the rotation
    pub fn captures_position(self) -> bool {
        matches!(self, Bone::Hips | Bone::Head)
    }
}

impl std::fmt::Display for Bone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical_name())
    }
}

/// Eye side of a blink blend shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlinkShape {
    Left,
    Right,
}

impl BlinkShape {
    pub const ALL: [BlinkShape; 2] = [BlinkShape::Left, BlinkShape::Right];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn canonical_name(self) -> &'static str {
        match self {
            BlinkShape::Left => "Fcl_EYE_Close_L",
            BlinkShape::Right => "Fcl_EYE_Close_R",
        }
    }

    pub fn alias(self) -> &'static str {
        match self {
            BlinkShape::Left => "Blink_L",
            BlinkShape::Right => "Blink_R",
        }
    }
}

/// Mouth-shape expressions summed into the speech signal
pub const VOWEL_KEYS: [&str; 5] = ["aa", "ih", "ou", "ee", "oh"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_are_dense() {
        for (i, bone) in Bone::ALL.iter().enumerate() {
            assert_eq!(bone.index(), i);
        }
    }

    #[test]
    fn test_only_hips_and_head_capture_position() {
        let captured: Vec<Bone> = Bone::ALL.into_iter().filter(|b| b.captures_position()).collect();
        assert_eq!(captured, vec![Bone::Hips, Bone::Head]);
    }

    #[test]
    fn test_blink_names_mirror() {
        assert!(BlinkShape::Left.canonical_name().ends_with("_L"));
        assert!(BlinkShape::Right.alias().ends_with("_R"));
    }
}
