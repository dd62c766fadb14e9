//! 选项生成
//!
//! 每道题的选项 = 标准答案 + 最多 3 个从其他题目答案里随机抽取的干扰项，再整体打乱。

use crate::error::{QuizError, QuizResult};
use crate::models::QuestionSet;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// 每道题最多的干扰项数量
pub const MAX_DISTRACTORS: usize = 3;

/// 一道题的候选答案列表
pub type OptionList = Vec<String>;

/// 为第 `index` 题生成选项
///
/// # 参数
/// - `set`: 题目集合
/// - `index`: 题目索引（0-based）
/// - `rng`: 随机源，测试时传入固定种子的 `StdRng`
///
/// # 返回
/// 长度为 `min(4, set.len())` 的选项列表，标准答案位置随机。
/// 干扰项按题目排除而不去重，其他题目的答案文本重复时会原样保留。
pub fn synthesize<R: Rng + ?Sized>(
    set: &QuestionSet,
    index: usize,
    rng: &mut R,
) -> QuizResult<OptionList> {
    let record = set.get(index).ok_or(QuizError::IndexOutOfRange {
        index,
        len: set.len(),
    })?;

    let mut options = vec![record.answer.clone()];
    let mut pool: Vec<&str> = set
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, r)| r.answer.as_str())
        .collect();

    // 不放回抽样
    while options.len() <= MAX_DISTRACTORS && !pool.is_empty() {
        let pick = rng.gen_range(0..pool.len());
        options.push(pool.swap_remove(pick).to_string());
    }

    options.shuffle(rng);
    Ok(options)
}

/// 选项的生成策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionPolicy {
    /// 按会话种子和题目索引确定性生成，同一题每次看到的选项都一样，
    /// 评分时使用的选项也和答题时一致
    Stable { seed: u64 },
    /// 每次调用重新随机，答题时看到的选项和评分时使用的可能不同
    Reshuffle,
}

impl OptionPolicy {
    /// 取第 `index` 题的选项
    pub fn options_for(&self, set: &QuestionSet, index: usize) -> QuizResult<OptionList> {
        match self {
            OptionPolicy::Stable { seed } => {
                let mut rng = StdRng::seed_from_u64(question_seed(*seed, index));
                synthesize(set, index, &mut rng)
            }
            OptionPolicy::Reshuffle => synthesize(set, index, &mut rand::thread_rng()),
        }
    }
}

fn question_seed(seed: u64, index: usize) -> u64 {
    seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
