//! Pgm core (no data ownership)
//! Pgm 核心（不持有数据）

#![allow(clippy::cast_precision_loss)]

use std::mem::size_of;

use crate::{
  Error, Key, PgmStats, Result, Segment,
  build::build_levels,
  consts::{EPSILON_REC, MIN_EPSILON},
};

/// Recursive Pgm index. `levels[0]` maps keys to data positions, each level
/// above maps keys to segment positions in the level below.
/// 递归 Pgm 索引。`levels[0]` 将键映射到数据位置，上层将键映射到下层的段位置。
#[derive(Clone, Debug)]
pub struct Pgm<K: Key> {
  epsilon: usize,
  epsilon_rec: usize,
  len: usize,
  levels: Vec<Vec<Segment<K>>>,
}

impl<K: Key> Pgm<K> {
  /// Build from sorted data with the default recursive epsilon
  /// 使用默认递归 epsilon 从已排序数据构建
  ///
  /// # Errors
  /// See [`Pgm::with_rec`]
  pub fn new(data: &[K], epsilon: usize, check_sorted: bool) -> Result<Self> {
    Self::with_rec(data, epsilon, EPSILON_REC, check_sorted)
  }

  /// Build from sorted data (O(N) build time)
  /// 从已排序数据构建（O(N)）
  ///
  /// # Errors
  /// Returns `Error::InvalidEpsilon` if either epsilon < `MIN_EPSILON`
  /// Returns `Error::EmptyData` if data is empty
  /// Returns `Error::NotSorted` if `check_sorted` is true and data is not sorted
  pub fn with_rec(data: &[K], epsilon: usize, epsilon_rec: usize, check_sorted: bool) -> Result<Self> {
    for provided in [epsilon, epsilon_rec] {
      if provided < MIN_EPSILON {
        return Err(Error::InvalidEpsilon {
          provided,
          min: MIN_EPSILON,
        });
      }
    }
    if data.is_empty() {
      return Err(Error::EmptyData);
    }
    if check_sorted && !data.is_sorted() {
      return Err(Error::NotSorted);
    }

    Ok(Self {
      epsilon,
      epsilon_rec,
      len: data.len(),
      levels: build_levels(data, epsilon, epsilon_rec),
    })
  }

  #[inline]
  #[must_use]
  pub fn epsilon(&self) -> usize {
    self.epsilon
  }

  /// Number of indexed keys
  /// 索引的键数量
  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.len
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Levels including the root
  /// 层数（含根）
  #[inline]
  #[must_use]
  pub fn height(&self) -> usize {
    self.levels.len()
  }

  /// Leaf segments
  /// 叶子段数
  #[inline]
  #[must_use]
  pub fn segment_count(&self) -> usize {
    self.levels.first().map_or(0, Vec::len)
  }

  #[inline]
  #[must_use]
  pub fn avg_segment_size(&self) -> f64 {
    self.len as f64 / self.segment_count().max(1) as f64
  }

  /// Memory usage of all levels (excluding data)
  /// 所有层的内存占用（不含数据）
  #[must_use]
  pub fn mem_usage(&self) -> usize {
    let segments: usize = self.levels.iter().map(Vec::len).sum();
    size_of::<Self>()
      + self.levels.len() * size_of::<Vec<Segment<K>>>()
      + segments * size_of::<Segment<K>>()
  }

  #[must_use]
  pub fn stats(&self) -> PgmStats {
    PgmStats {
      segments: self.segment_count(),
      height: self.height(),
      avg_segment_size: self.avg_segment_size(),
      memory_bytes: self.mem_usage(),
    }
  }

  /// Predict position for a key
  /// 预测键的位置
  #[inline]
  #[must_use]
  pub fn predict(&self, key: K) -> usize {
    self.leaf(key).predict(key)
  }

  /// Predict search range [start, end) for a key present in the data. The
  /// range holds one occurrence of the key; when a run of equal keys spans
  /// several segments it need not be the first. Use [`Pgm::lower_bound`] for
  /// the first position.
  /// 预测已存在键的搜索范围 [start, end)。范围内包含该键的某一处出现；
  /// 相同键跨越多个段时不一定是第一处。需要第一处位置请用 [`Pgm::lower_bound`]。
  #[inline]
  #[must_use]
  pub fn predict_range(&self, key: K) -> (usize, usize) {
    let pred = self.predict(key);
    (
      pred.saturating_sub(self.epsilon),
      (pred + self.epsilon + 1).min(self.len),
    )
  }

  /// First position whose key is >= `key`, `data.len()` if none.
  /// 第一个 >= `key` 的位置，不存在则为 `data.len()`。
  ///
  /// `data` must be the slice this index was built from.
  /// `data` 必须是构建此索引的切片。
  #[must_use]
  pub fn lower_bound(&self, data: &[K], key: K) -> usize {
    let len = data.len();
    let pred = self.predict(key);
    let hi = (pred + self.epsilon + 2).min(len);
    let lo = pred.saturating_sub(self.epsilon + 1).min(hi);

    let r = lo + data[lo..hi].partition_point(|k| *k < key);
    let left_ok = r > lo || lo == 0 || data[lo - 1] < key;
    let right_ok = r < hi || hi == len || data[hi] >= key;
    if left_ok && right_ok {
      r
    } else {
      data.partition_point(|k| *k < key)
    }
  }

  /// Position of `key` in `data` (None if absent)
  /// 键在 `data` 中的位置（不存在则返回 None）
  #[inline]
  #[must_use]
  pub fn get(&self, data: &[K], key: K) -> Option<usize> {
    let pos = self.lower_bound(data, key);
    (data.get(pos) == Some(&key)).then_some(pos)
  }

  /// Walk from the root down to the leaf segment responsible for `key`
  /// 从根向下找到负责 `key` 的叶子段
  fn leaf(&self, key: K) -> &Segment<K> {
    let top = self.levels.len() - 1;
    let root = &self.levels[top];
    let mut pos = find_seg(root, key, 0, root.len());

    for lvl in (0..top).rev() {
      let pred = self.levels[lvl + 1][pos].predict(key);
      let below = &self.levels[lvl];
      let hi = (pred + self.epsilon_rec + 2).min(below.len());
      let lo = pred.saturating_sub(self.epsilon_rec + 1).min(hi);
      pos = find_seg(below, key, lo, hi);
    }

    &self.levels[0][pos]
  }
}

/// Last segment with `min_key <= key` (0 when key precedes all). Searches
/// `[lo, hi)` first and falls back to the whole level if the window can't
/// prove the answer.
/// 最后一个 `min_key <= key` 的段（键小于所有段时为 0）。先在 `[lo, hi)` 查找，无法确定时回退到整层。
#[inline]
fn find_seg<K: Key>(level: &[Segment<K>], key: K, lo: usize, hi: usize) -> usize {
  let pp = level[lo..hi].partition_point(|s| s.min_key <= key);
  let left_ok = pp > 0 || lo == 0;
  let right_ok = hi == level.len() || level[hi].min_key > key;
  if left_ok && right_ok {
    (lo + pp).saturating_sub(1)
  } else {
    level.partition_point(|s| s.min_key <= key).saturating_sub(1)
  }
}
