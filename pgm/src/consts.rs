//! Tuning constants
//! 调优常量

/// Smallest accepted epsilon
/// 允许的最小 epsilon
pub const MIN_EPSILON: usize = 1;

/// Epsilon of the upper (segment-indexing) levels
/// 上层（索引段的层）使用的 epsilon
pub const EPSILON_REC: usize = 4;

/// Slopes below this are treated as flat
/// 小于此值的斜率视为水平
pub const ZERO_SLOPE_THRESHOLD: f64 = 1e-12;
