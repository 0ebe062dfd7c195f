// Query workload drawn from the dataset
// 从数据集抽取的查询负载

/// Default random seed / 默认随机种子
pub const SEED: u64 = 42;

/// Default number of queries / 默认查询数
pub const QUERIES: usize = 100_000;

/// One in `NEAR_EVERY` queries is nudged off its key
/// 每 `NEAR_EVERY` 个查询中有一个偏离原键
const NEAR_EVERY: usize = 8;

/// Fixed list of lookup keys, identical for every candidate
/// 固定的查询键列表，对每个候选都相同
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
  keys: Vec<i64>,
}

impl Workload {
  /// Sample `count` keys from sorted `data` (capped at 4x its length)
  /// 从已排序 `data` 中采样 `count` 个键（上限为其长度的 4 倍）
  pub fn sample(data: &[i64], count: usize, seed: u64) -> Self {
    if data.is_empty() {
      return Self { keys: Vec::new() };
    }
    let count = count.min(data.len().saturating_mul(4)).max(1);
    let mut rng = fastrand::Rng::with_seed(seed);
    let keys = (0..count)
      .map(|i| {
        let key = data[rng.usize(..data.len())];
        if i % NEAR_EVERY == NEAR_EVERY - 1 {
          key.saturating_add(1)
        } else {
          key
        }
      })
      .collect();
    Self { keys }
  }

  #[inline]
  pub fn keys(&self) -> &[i64] {
    &self.keys
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.keys.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.keys.is_empty()
  }
}
