// ============================================
// src/round.rs
// 1ラウンド（5問）の進行を管理するモジュール
// ============================================

use rand::Rng;
use rand::seq::SliceRandom;

use crate::capitals::CapitalTable;
use crate::error::QuizError;
use crate::question::{Question, build_question};

/// 1ラウンドの問題数
pub const ROUND_SIZE: usize = 5;

// --------------------------------------------------
// 描画側との境界
// --------------------------------------------------

/// 問題画面でプレイヤーが返してくる操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// 選択肢のインデックス（必ず options の範囲内）
    Choice(usize),
    /// ラウンドを途中でやめる
    Quit,
}

/// 結果画面でプレイヤーが返してくる操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryChoice {
    PlayAgain,
    Quit,
}

/// 描画側（端末UIなど）が実装する最小のインターフェース
///
/// どちらも同期呼び出しで、プレイヤーの操作が決まるまで返らない。
/// エンジン側はウィンドウも色もレイアウトも知らない。
pub trait Screen {
    /// 問題を表示して、選ばれた選択肢を返す
    fn show_question(&mut self, question: &Question) -> Result<Selection, QuizError>;

    /// 結果を表示して、もう1回遊ぶかどうかを返す
    fn show_summary(&mut self, score: u32, total: u32) -> Result<SummaryChoice, QuizError>;
}

// --------------------------------------------------
// スコア
// --------------------------------------------------

/// 正解数のカウンタ
///
/// 1正解につき +1 するだけ。減らすことも戻すこともない。
/// ラウンドごとに新しく作る。スレッドセーフではない（全体が
/// シングルスレッド前提）。
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreCounter {
    value: u32,
}

impl ScoreCounter {
    pub fn increment(&mut self) {
        self.value += 1;
    }

    pub fn value(&self) -> u32 {
        self.value
    }
}

// --------------------------------------------------
// 出題する国の抽選
// --------------------------------------------------

/// テーブルに round_size ぶんの国があるか確認する
///
/// 足りなければ設定ミスなので、起動時に呼んで早めに落とす。
pub fn ensure_pool(table: &CapitalTable, round_size: usize) -> Result<(), QuizError> {
    if round_size > table.len() {
        return Err(QuizError::InsufficientCountries {
            requested: round_size,
            available: table.len(),
        });
    }
    Ok(())
}

/// テーブルから round_size 個の国を重複なしで引く
///
/// 選ばれ方も並び順も一様ランダム。
pub fn draw_countries(
    table: &CapitalTable,
    round_size: usize,
    rng: &mut impl Rng,
) -> Result<Vec<String>, QuizError> {
    ensure_pool(table, round_size)?;

    let mut names: Vec<&str> = table.countries().collect();
    let (picked, _) = names.partial_shuffle(rng, round_size);
    Ok(picked.iter().map(|name| name.to_string()).collect())
}

// --------------------------------------------------
// ラウンド本体（状態機械）
// --------------------------------------------------

/// ラウンドの状態。回答待ちか、全問終わったかの2つだけ
#[derive(Debug, Clone)]
enum RoundState {
    AwaitingAnswer(Question),
    Complete(u32),
}

/// 回答を1つ受け付けた結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// 次の問題に進んだ
    Next,
    /// 全問終わった（最終スコア付き）
    Complete(u32),
}

/// 1ラウンドぶんのゲーム状態
///
/// 残りの国は一方向にしか消費できない。使い切ったら
/// `Complete` に遷移して、そこから戻ることはない。
pub struct Round<'a> {
    table: &'a CapitalTable,
    remaining: std::vec::IntoIter<String>,
    state: RoundState,
    score: ScoreCounter,
    total: usize,
}

impl<'a> Round<'a> {
    /// 国を抽選して最初の問題を作り、回答待ちで始める
    pub fn start(
        table: &'a CapitalTable,
        round_size: usize,
        rng: &mut impl Rng,
    ) -> Result<Self, QuizError> {
        let mut remaining = draw_countries(table, round_size, rng)?.into_iter();

        let state = match remaining.next() {
            Some(country) => RoundState::AwaitingAnswer(build_question(table, &country, rng)?),
            None => RoundState::Complete(0),
        };

        Ok(Self {
            table,
            remaining,
            state,
            score: ScoreCounter::default(),
            total: round_size,
        })
    }

    /// いま表示すべき問題。ラウンドが終わっていたら None
    pub fn question(&self) -> Option<&Question> {
        match &self.state {
            RoundState::AwaitingAnswer(question) => Some(question),
            RoundState::Complete(_) => None,
        }
    }

    /// ここまでの正解数
    pub fn score(&self) -> u32 {
        self.score.value()
    }

    /// このラウンドの問題数
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.state, RoundState::Complete(_))
    }

    /// 確定した最終スコア。まだ途中なら None
    pub fn final_score(&self) -> Option<u32> {
        match self.state {
            RoundState::Complete(score) => Some(score),
            RoundState::AwaitingAnswer(_) => None,
        }
    }

    /// 回答を受け付けて次に進む
    ///
    /// 正解ならスコア +1。残りの国があれば次の問題を作って
    /// 回答待ちのまま、無ければ `Complete` に遷移する。
    /// 終了後に呼ばれた場合は何もせず `Complete` を返す。
    pub fn submit_answer(
        &mut self,
        selected: &str,
        rng: &mut impl Rng,
    ) -> Result<Progress, QuizError> {
        let RoundState::AwaitingAnswer(question) = &self.state else {
            return Ok(Progress::Complete(self.score.value()));
        };

        if question.is_correct(selected) {
            self.score.increment();
        }

        match self.remaining.next() {
            Some(country) => {
                self.state =
                    RoundState::AwaitingAnswer(build_question(self.table, &country, rng)?);
                Ok(Progress::Next)
            }
            None => {
                let final_score = self.score.value();
                self.state = RoundState::Complete(final_score);
                Ok(Progress::Complete(final_score))
            }
        }
    }
}

// --------------------------------------------------
// ゲーム全体のループ
// --------------------------------------------------

/// ラウンドを回し続けるメインループ
///
/// 問題 → 回答 を繰り返して、終わったら結果画面。
/// 「もう1回」なら新しいラウンドを作り直す。問題画面で
/// やめた場合は結果を出さずにそのまま戻る。
pub fn play(
    table: &CapitalTable,
    round_size: usize,
    screen: &mut impl Screen,
    rng: &mut impl Rng,
) -> Result<(), QuizError> {
    loop {
        let mut round = Round::start(table, round_size, rng)?;

        while let Some(question) = round.question().cloned() {
            match screen.show_question(&question)? {
                Selection::Quit => return Ok(()),
                Selection::Choice(index) => {
                    round.submit_answer(&question.options[index], rng)?;
                }
            }
        }

        // ここに来た時点でラウンドは必ず終わっている
        debug_assert!(round.is_complete());
        let final_score = round.final_score().unwrap_or_else(|| round.score());

        match screen.show_summary(final_score, round.total() as u32)? {
            SummaryChoice::PlayAgain => continue,
            SummaryChoice::Quit => return Ok(()),
        }
    }
}
