// ============================================
// src/question.rs
// 1問ぶんの出題データを組み立てるモジュール
// ============================================

use rand::Rng;
use rand::seq::SliceRandom;

use crate::capitals::CapitalTable;
use crate::error::QuizError;

/// 選択肢の数（首都1 + ハズレ3）
pub const OPTION_COUNT: usize = 4;

/// 出題1問ぶんのデータ
///
/// `answer` は必ず `options` の中に1回だけ現れ、その位置が
/// `answer_index`。作られてから答えるまでの使い捨て。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub title: String,
    pub options: Vec<String>,
    pub answer: String,
    pub answer_index: usize,
}

impl Question {
    /// 選ばれた選択肢が正解かどうか
    pub fn is_correct(&self, selected: &str) -> bool {
        self.answer == selected
    }
}

/// 国名から問題を1問作る
///
/// ハズレ3つをシャッフルしてから、首都を 0..=3 のランダムな位置に
/// 差し込む。この手順だと首都の最終位置は4箇所で完全には均等に
/// ならないが、挙動として意図したものなのでこのまま。
pub fn build_question(
    table: &CapitalTable,
    country: &str,
    rng: &mut impl Rng,
) -> Result<Question, QuizError> {
    let title = table.title_of(country)?.to_string();
    let capital = table.capital_of(country)?.to_string();

    let mut options: Vec<String> = table.distractors_of(country)?.to_vec();
    options.shuffle(rng);

    let answer_index = rng.random_range(0..=3);
    options.insert(answer_index, capital.clone());

    Ok(Question {
        title,
        options,
        answer: capital,
        answer_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn question_has_four_unique_options_with_answer() {
        let table = CapitalTable::builtin();
        for seed in 0..50 {
            let q = build_question(&table, "France", &mut rng(seed)).unwrap();

            assert_eq!(q.options.len(), OPTION_COUNT);
            let unique: HashSet<&str> = q.options.iter().map(String::as_str).collect();
            assert_eq!(unique.len(), OPTION_COUNT);

            // 正解は options の中に1回だけ、answer_index の位置にある
            assert_eq!(q.options.iter().filter(|o| **o == q.answer).count(), 1);
            assert_eq!(q.options[q.answer_index], q.answer);
            assert_eq!(q.answer, "Paris");
            assert_eq!(q.title, "Capital of France?");
        }
    }

    #[test]
    fn options_are_capital_plus_distractors() {
        let table = CapitalTable::builtin();
        let q = build_question(&table, "Japan", &mut rng(7)).unwrap();

        let mut expected: Vec<String> = table.distractors_of("Japan").unwrap().to_vec();
        expected.push(table.capital_of("Japan").unwrap().to_string());
        expected.sort();

        let mut actual = q.options.clone();
        actual.sort();
        assert_eq!(actual, expected);
    }

    #[test]
    fn answer_lands_on_every_position() {
        // 偏りはあっても、4箇所どこにでも置かれうること
        let table = CapitalTable::builtin();
        let mut seen: HashSet<usize> = HashSet::new();
        for seed in 0..200 {
            let q = build_question(&table, "Germany", &mut rng(seed)).unwrap();
            seen.insert(q.answer_index);
        }
        assert_eq!(seen, HashSet::from([0, 1, 2, 3]));
    }

    #[test]
    fn rebuilding_a_question_keeps_invariants() {
        let table = CapitalTable::builtin();
        let q1 = build_question(&table, "Sweden", &mut rng(1)).unwrap();
        let q2 = build_question(&table, "Sweden", &mut rng(2)).unwrap();

        // 並びは違ってよいが、どちらも正しい問題であること
        for q in [&q1, &q2] {
            assert_eq!(q.options.len(), OPTION_COUNT);
            assert_eq!(q.options[q.answer_index], q.answer);
        }
    }

    #[test]
    fn unknown_country_is_rejected() {
        let table = CapitalTable::builtin();
        assert!(matches!(
            build_question(&table, "Atlantis", &mut rng(0)),
            Err(QuizError::UnknownCountry(_))
        ));
    }

    #[test]
    fn is_correct_matches_answer_only() {
        let table = CapitalTable::builtin();
        let q = build_question(&table, "Italy", &mut rng(3)).unwrap();
        assert!(q.is_correct(&q.answer));
        for option in &q.options {
            if *option != q.answer {
                assert!(!q.is_correct(option));
            }
        }
    }
}
