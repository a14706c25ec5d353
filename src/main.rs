// ============================================
// src/main.rs (メインファイル)
// ============================================

use std::io::{self, stdout};
use std::time::Duration;

// クイズエンジン（UIなし）のモジュール群
mod capitals;
mod error;
mod question;
mod round;

use capitals::CapitalTable;
use error::QuizError;
use question::{OPTION_COUNT, Question};
use round::{ROUND_SIZE, Screen, Selection, SummaryChoice, play};

use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    cursor::{Hide, Show},
};

use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Gauge},
};

/// 結果画面のひとこと（0点 → 満点の順）
const RESULT_COMMENTS: &'static [&'static str] = &[
    "Needs more practice :(",
    "Better than nothing.",
    "Someday it will be more.",
    "Not too bad.",
    "You are not so bad :)",
    "Wow, perfect!",
];

/// スコアに応じたひとことを選ぶ
fn result_comment(score: u32, total: u32) -> &'static str {
    let last = RESULT_COMMENTS.len() - 1;
    let index = if total == 0 {
        last
    } else {
        (score as usize * last) / total as usize
    };
    RESULT_COMMENTS[index]
}

// --------------------------------------------------
// メイン関数 (TUIセットアップと実行ループ)
// --------------------------------------------------

fn main() -> Result<(), QuizError> {
    // 首都テーブルは起動時に一度だけ読む。国が足りないなら
    // 画面を作る前にここで落とす
    let table = CapitalTable::load();
    round::ensure_pool(&table, ROUND_SIZE)?;

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &table);
    restore_terminal()?;
    result
}

fn setup_terminal() -> io::Result<Terminal<impl Backend>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?; // 代替スクリーンを使用
    stdout().execute(Hide)?; // カーソルを非表示
    let backend = CrosstermBackend::new(stdout());
    Ok(Terminal::new(backend)?)
}

fn restore_terminal() -> io::Result<()> {
    stdout().execute(Show)?; // カーソルを再表示
    stdout().execute(LeaveAlternateScreen)?; // 代替スクリーンを終了
    disable_raw_mode()?;
    Ok(())
}

fn run_app(terminal: &mut Terminal<impl Backend>, table: &CapitalTable) -> Result<(), QuizError> {
    // タイトル → ラウンド → (またタイトルへ) の繰り返し
    loop {
        if !welcome_screen(terminal)? {
            return Ok(());
        }

        let mut screen = Tui {
            terminal: &mut *terminal,
        };
        play(table, ROUND_SIZE, &mut screen, &mut rand::rng())?;
    }
}

/// タイトル画面。遊ぶなら true、やめるなら false
fn welcome_screen(terminal: &mut Terminal<impl Backend>) -> Result<bool, QuizError> {
    loop {
        terminal.draw(draw_welcome)?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Press {
                    match key.code {
                        KeyCode::Enter => return Ok(true),
                        KeyCode::Esc | KeyCode::Char('q') => return Ok(false),
                        _ => {}
                    }
                }
            }
        }
    }
}

// --------------------------------------------------
// Screen トレイトの端末実装
// --------------------------------------------------

/// ratatui 製のゲーム画面
struct Tui<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
}

impl<B: Backend> Screen for Tui<'_, B> {
    /// 問題を表示して回答を受け付ける
    ///
    /// 回答を選ぶと正誤を色で見せて、Enter でエンジンに返す
    fn show_question(&mut self, question: &Question) -> Result<Selection, QuizError> {
        let mut selected: usize = 0;
        let mut revealed: Option<usize> = None; // 回答済みなら選んだ位置

        loop {
            self.terminal
                .draw(|f| draw_question(f, question, selected, revealed))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == event::KeyEventKind::Press {
                        if let Some(choice) = revealed {
                            // 正誤表示中。Enter で次へ
                            match key.code {
                                KeyCode::Enter | KeyCode::Char(' ') => {
                                    return Ok(Selection::Choice(choice));
                                }
                                KeyCode::Esc => return Ok(Selection::Quit),
                                _ => {}
                            }
                        } else {
                            match key.code {
                                KeyCode::Esc => return Ok(Selection::Quit),
                                KeyCode::Up | KeyCode::Char('k') => {
                                    selected = if selected == 0 {
                                        question.options.len() - 1
                                    } else {
                                        selected - 1
                                    };
                                }
                                KeyCode::Down | KeyCode::Char('j') => {
                                    selected = (selected + 1) % question.options.len();
                                }
                                KeyCode::Enter | KeyCode::Char(' ') => {
                                    revealed = Some(selected);
                                }
                                KeyCode::Char(c) => {
                                    // 数字キーで直接選択
                                    if let Some(digit) = c.to_digit(10) {
                                        let index = digit as usize;
                                        if (1..=question.options.len()).contains(&index) {
                                            selected = index - 1;
                                        }
                                    }
                                }
                                _ => {}
                            }
                        }
                    }
                }
            }
        }
    }

    /// 結果を表示して、もう1回遊ぶか聞く
    fn show_summary(&mut self, score: u32, total: u32) -> Result<SummaryChoice, QuizError> {
        loop {
            self.terminal.draw(|f| draw_summary(f, score, total))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == event::KeyEventKind::Press {
                        match key.code {
                            KeyCode::Enter | KeyCode::Char('r') => {
                                return Ok(SummaryChoice::PlayAgain);
                            }
                            KeyCode::Esc | KeyCode::Char('q') => {
                                return Ok(SummaryChoice::Quit);
                            }
                            _ => {}
                        }
                    }
                }
            }
        }
    }
}

// --------------------------------------------------
// UI描画
// --------------------------------------------------

/// 外枠を描いて内側の領域を返す
fn outer_block(f: &mut Frame) -> Rect {
    let size = f.area();
    let block = Block::default().borders(Borders::ALL).title("CAPITAL QUiZ !");
    let inner_area = block.inner(size);
    f.render_widget(block, size);
    inner_area
}

fn draw_welcome(f: &mut Frame) {
    let inner_area = outer_block(f);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // [0] 余白
            Constraint::Length(1), // [1] タイトル
            Constraint::Length(2), // [2] 余白
            Constraint::Length(1), // [3] サブタイトル
            Constraint::Min(1),    // [4] 操作ガイド
        ])
        .split(inner_area);

    f.render_widget(
        Paragraph::new("C A P I T A L   Q U i Z")
            .style(Style::default().fg(Color::Magenta).bold())
            .centered(),
        chunks[1],
    );

    f.render_widget(
        Paragraph::new("Guess the capitals of the world! (5 questions)")
            .style(Style::default().fg(Color::Gray))
            .centered(),
        chunks[3],
    );

    f.render_widget(
        Paragraph::new("Enter: Play   Esc: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .centered(),
        chunks[4],
    );
}

fn draw_question(f: &mut Frame, question: &Question, selected: usize, revealed: Option<usize>) {
    let inner_area = outer_block(f);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),                         // [0] 余白
            Constraint::Length(1),                         // [1] 出題文
            Constraint::Length(2),                         // [2] 余白
            Constraint::Length((OPTION_COUNT * 2) as u16), // [3] 選択肢
            Constraint::Length(1),                         // [4] 正誤メッセージ
            Constraint::Min(1),                            // [5] 操作ガイド
        ])
        .split(inner_area);

    // 1. 出題文
    f.render_widget(
        Paragraph::new(question.title.as_str())
            .style(Style::default().fg(Color::White).bold())
            .centered(),
        chunks[1],
    );

    // 2. 選択肢（間に空行を挟む）
    let mut lines: Vec<Line> = Vec::new();
    for (i, option) in question.options.iter().enumerate() {
        let label = format!("{}. {}", i + 1, option);
        let style = match revealed {
            // 選択中
            None => {
                if i == selected {
                    Style::default().fg(Color::Black).bg(Color::White)
                } else {
                    Style::default().fg(Color::Gray)
                }
            }
            // 回答済み。正解は緑、選んだハズレは赤
            Some(choice) => {
                if i == question.answer_index {
                    Style::default().fg(Color::Black).bg(Color::Green)
                } else if i == choice {
                    Style::default().fg(Color::White).bg(Color::Red)
                } else {
                    Style::default().fg(Color::DarkGray)
                }
            }
        };
        lines.push(Line::from(Span::styled(label, style)));
        lines.push(Line::from(""));
    }
    f.render_widget(Paragraph::new(lines).centered(), chunks[3]);

    // 3. 正誤メッセージ
    if let Some(choice) = revealed {
        let (message, color) = if choice == question.answer_index {
            ("Correct!", Color::Green)
        } else {
            ("Wrong...", Color::Red)
        };
        f.render_widget(
            Paragraph::new(message)
                .style(Style::default().fg(color).bold())
                .centered(),
            chunks[4],
        );
    }

    // 4. 操作ガイド
    let guide = if revealed.is_some() {
        ">>>  Enter: Next"
    } else {
        "Up/Down: Select   1-4: Jump   Enter: Answer   Esc: Quit"
    };
    f.render_widget(
        Paragraph::new(guide)
            .style(Style::default().fg(Color::DarkGray))
            .centered(),
        chunks[5],
    );
}

fn draw_summary(f: &mut Frame, score: u32, total: u32) {
    let inner_area = outer_block(f);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // [0] 余白
            Constraint::Length(1), // [1] 見出し
            Constraint::Length(2), // [2] 余白
            Constraint::Length(1), // [3] スコア
            Constraint::Length(1), // [4] ひとこと
            Constraint::Length(2), // [5] 余白
            Constraint::Length(1), // [6] スコアゲージ
            Constraint::Min(1),    // [7] 操作ガイド
        ])
        .split(inner_area);

    f.render_widget(
        Paragraph::new("Your result:")
            .style(Style::default().fg(Color::White).bold())
            .centered(),
        chunks[1],
    );

    f.render_widget(
        Paragraph::new(format!("{} / {}", score, total))
            .style(Style::default().fg(Color::Yellow).bold())
            .centered(),
        chunks[3],
    );

    f.render_widget(
        Paragraph::new(result_comment(score, total))
            .style(Style::default().fg(Color::Gray))
            .centered(),
        chunks[4],
    );

    // スコアゲージ
    let ratio = if total > 0 {
        (score as f64 / total as f64).min(1.0)
    } else {
        0.0
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::NONE))
        .gauge_style(Style::default().fg(Color::Magenta).bg(Color::Black))
        .ratio(ratio)
        .label(format!("{} / {}", score, total));
    f.render_widget(gauge, chunks[6]);

    f.render_widget(
        Paragraph::new("Enter: Play Again   Esc: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .centered(),
        chunks[7],
    );
}
