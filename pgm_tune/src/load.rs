// Dataset loading: raw binary integers or delimited text
// 数据集加载：原始二进制整数或分隔文本

use std::{fs, path::Path};

use log::debug;

use crate::{Error, Result};

/// Integer width of a binary file
/// 二进制文件的整数宽度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Width {
  #[default]
  W32,
  W64,
}

impl Width {
  #[inline]
  pub fn bytes(self) -> usize {
    match self {
      Self::W32 => 4,
      Self::W64 => 8,
    }
  }
}

/// Input encoding
/// 输入编码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
  /// Little-endian signed integers, no header
  /// 小端有符号整数，无文件头
  Binary(Width),
  /// Integers separated by newlines and/or commas
  /// 以换行和/或逗号分隔的整数
  Csv,
}

/// Read the whole dataset; nothing is returned on partial failure
/// 读取整个数据集；部分失败时不返回任何数据
pub fn load(path: impl AsRef<Path>, format: Format) -> Result<Vec<i64>> {
  let path = path.as_ref();
  let read_err = |source| Error::Read {
    path: path.to_path_buf(),
    source,
  };

  let data = match format {
    Format::Binary(width) => decode_binary(path, &fs::read(path).map_err(read_err)?, width)?,
    Format::Csv => decode_csv(path, &fs::read_to_string(path).map_err(read_err)?)?,
  };
  debug!("{}: {} keys ({format:?})", path.display(), data.len());
  Ok(data)
}

fn decode_binary(path: &Path, bytes: &[u8], width: Width) -> Result<Vec<i64>> {
  let w = width.bytes();
  if bytes.len() % w != 0 {
    return Err(Error::Truncated {
      path: path.to_path_buf(),
      len: bytes.len(),
      width: w,
    });
  }

  let chunks = bytes.chunks_exact(w);
  Ok(match width {
    Width::W32 => chunks
      .map(|c| i64::from(i32::from_le_bytes([c[0], c[1], c[2], c[3]])))
      .collect(),
    Width::W64 => chunks
      .map(|c| i64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
      .collect(),
  })
}

fn decode_csv(path: &Path, text: &str) -> Result<Vec<i64>> {
  let mut data = Vec::new();
  for (no, line) in text.lines().enumerate() {
    for field in line.split(',') {
      let field = field.trim();
      if field.is_empty() {
        continue;
      }
      match field.parse::<i64>() {
        Ok(v) => data.push(v),
        Err(_) => {
          return Err(Error::Malformed {
            path: path.to_path_buf(),
            line: no + 1,
            field: field.to_owned(),
          });
        }
      }
    }
  }
  Ok(data)
}
