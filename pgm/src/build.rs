//! Segment building using the streaming shrinking cone
//! 使用流式收缩锥算法构建段
//!
//! Time Complexity: O(N) per level

#![allow(clippy::cast_precision_loss)]

use crate::{Key, Segment};

/// Split sorted keys into segments whose predictions stay within `epsilon`.
/// 将已排序键切分为预测误差不超过 `epsilon` 的段。
pub fn build_segments<K: Key>(keys: &[K], epsilon: usize) -> Vec<Segment<K>> {
  let n = keys.len();
  if n == 0 {
    return vec![];
  }

  // Compression ratio is roughly 2 * epsilon on near-uniform data
  // 近似均匀数据的压缩比约为 2 * epsilon
  let mut segments = Vec::with_capacity((n / (epsilon * 2).max(1)).clamp(1, 1 << 20));
  let eps = epsilon as f64;
  let mut start = 0;

  while start < n {
    let first_key = keys[start].as_f64();
    let first_idx = start as f64;

    let mut min_slope = f64::NEG_INFINITY;
    let mut max_slope = f64::INFINITY;
    let mut end = start + 1;

    while end < n {
      let idx = end as f64;
      let dx = keys[end].as_f64() - first_key;

      if dx == 0.0 {
        // Equal keys share a prediction, the run must fit in the window
        // 相同键共享预测值，连续段须在误差窗口内
        if idx - first_idx > eps {
          break;
        }
        end += 1;
        continue;
      }

      let new_min = min_slope.max((idx - first_idx - eps) / dx);
      let new_max = max_slope.min((idx - first_idx + eps) / dx);
      if new_min > new_max {
        break;
      }
      min_slope = new_min;
      max_slope = new_max;
      end += 1;
    }

    // Cone never narrowed (single key or only duplicates): flat model
    // 锥未收缩（单键或全重复）：水平模型
    let slope = if min_slope.is_finite() && max_slope.is_finite() {
      (min_slope + max_slope) * 0.5
    } else {
      0.0
    };

    segments.push(Segment {
      min_key: keys[start],
      max_key: keys[end - 1],
      slope,
      intercept: first_idx - slope * first_key,
      start_idx: start,
      end_idx: end,
    });

    start = end;
  }

  segments
}

/// Build all levels bottom-up; the last level holds exactly one segment.
/// 自底向上构建所有层；最后一层恰好只有一个段。
pub fn build_levels<K: Key>(data: &[K], epsilon: usize, epsilon_rec: usize) -> Vec<Vec<Segment<K>>> {
  let mut levels = vec![build_segments(data, epsilon)];

  loop {
    let below = &levels[levels.len() - 1];
    if below.len() <= 1 {
      break;
    }
    let keys: Vec<K> = below.iter().map(|s| s.min_key).collect();
    let mut upper = build_segments(&keys, epsilon_rec);
    if upper.len() >= below.len() {
      // No compression left (e.g. many equal min_keys): collapse into one root
      // 已无法压缩（如大量相同 min_key）：直接合并为一个根段
      upper = vec![Segment {
        min_key: keys[0],
        max_key: keys[keys.len() - 1],
        slope: 0.0,
        intercept: 0.0,
        start_idx: 0,
        end_idx: keys.len(),
      }];
    }
    levels.push(upper);
  }

  levels
}
