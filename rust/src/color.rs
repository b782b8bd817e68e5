//! Deterministic project colors.
//!
//! FNV-1a over `project_name + workspace_id`, reduced onto a fixed palette.
//! Stable across processes, platforms and releases.

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

pub const PALETTE: [&str; 12] = [
    "#3B82F6", // blue
    "#10B981", // emerald
    "#F59E0B", // amber
    "#EF4444", // red
    "#8B5CF6", // violet
    "#EC4899", // pink
    "#14B8A6", // teal
    "#F97316", // orange
    "#6366F1", // indigo
    "#84CC16", // lime
    "#06B6D4", // cyan
    "#A855F7", // purple
];

/// 32-bit FNV-1a hash of the concatenated bytes.
pub fn fnv1a(parts: &[&str]) -> u32 {
    parts
        .iter()
        .flat_map(|part| part.bytes())
        .fold(FNV_OFFSET_BASIS, |hash, byte| {
            (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
        })
}

pub fn color_seed(project_name: &str, workspace_id: &str) -> u32 {
    fnv1a(&[project_name, workspace_id])
}

/// Hex color shared by every event of a project.
pub fn project_color(project_name: &str, workspace_id: &str) -> &'static str {
    PALETTE[color_seed(project_name, workspace_id) as usize % PALETTE.len()]
}
